#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use anyhow::{Context, Result};

use propstand::{
    config, labels,
    lcd_screen::{self, character_pattern, FrameBuffer, LCDLineNumbers},
    monitor, settings,
    string_table::LabelStore,
};

#[derive(Clone, Copy, Debug)]
enum Command {
    Labels,
    Glyphs,
    Panel,
    Monitor,
}

fn main() -> Result<()> {
    let logger = flexi_logger::Logger::try_with_str("error")?
        .format(log_format)
        .start()?;

    let mut config_path =
        String::from(option_env!("PROPSTAND_CONFIG_PATH").unwrap_or("config.toml"));
    let mut command = Command::Labels;

    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                config_path = args.next().context("No config specified")?;
            }
            "-V" | "--version" => {
                println!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "labels" => command = Command::Labels,
            "glyphs" => command = Command::Glyphs,
            "panel" => command = Command::Panel,
            "monitor" => command = Command::Monitor,
            _ => return Err(anyhow::Error::msg(format!("Unhandled argument {:?}", arg))),
        }
    }

    let config = config::Config::from_file(&config_path);

    if let Err(err) = logger.parse_new_spec(&config.log_level) {
        log::error!("Bad log level {:?}: {}", config.log_level, err);
    }

    log::debug!("{:?}", config);

    let result = match command {
        Command::Labels => print_labels(),
        Command::Glyphs => {
            print_glyphs();
            Ok(())
        }
        Command::Panel => print_panel(&config.settings),
        Command::Monitor => run_monitor(&config),
    };

    logger.shutdown();

    result
}

fn print_labels() -> Result<()> {
    let store = LabelStore::builtin();

    println!("{} bytes of labels", store.image().len());
    for (id, address) in store.labels() {
        println!("  {} {:?}", address, id);
    }

    for table in labels::ALL_TABLES.iter() {
        println!("{}:", table.name);
        for (index, id) in table.iter().enumerate() {
            let address = store
                .address_of(id)
                .with_context(|| format!("{:?} is not stored", id))?;
            let label = store
                .decode(address)
                .with_context(|| format!("Failed to decode {:?}", id))?;
            println!("  {} {} {:?}", index, address, label);
        }
    }

    Ok(())
}

fn print_glyphs() {
    let mut lcd = FrameBuffer::new();
    lcd_screen::upload_glyphs(&mut lcd);

    for glyph in character_pattern::Glyph::ALL.iter() {
        println!("{} {:?}", glyph.slot(), glyph);
        for row in character_pattern::render_bitmap(&lcd.glyph(glyph.slot())) {
            println!("  {}", row);
        }
    }

    for &blades in settings::BladeCount::ALL.iter() {
        println!("{} blades", blades.count());
        for row in character_pattern::PropellerIcon::for_blades(blades).render() {
            println!("  {}", row);
        }
    }
}

fn print_screen(lcd: &FrameBuffer) {
    println!("+{}+", "-".repeat(lcd_screen::NUM_CHARACTERS_PER_LINE));
    for line in lcd.render() {
        println!("|{}|", line);
    }
    println!("+{}+", "-".repeat(lcd_screen::NUM_CHARACTERS_PER_LINE));
}

fn print_panel(settings: &settings::Settings) -> Result<()> {
    let store = LabelStore::builtin();
    let mut lcd = FrameBuffer::new();
    lcd_screen::upload_glyphs(&mut lcd);

    lcd_screen::show_table(&mut lcd, &store, &labels::HEADERS, LCDLineNumbers::Line1)
        .context("Failed to show main screen")?;
    print_screen(&lcd);

    for field in settings.fields() {
        settings
            .show_field(&mut lcd, &store, field)
            .with_context(|| format!("Failed to show {:?}", field))?;
        print_screen(&lcd);
    }

    Ok(())
}

fn run_monitor(config: &config::Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let summary = runtime.block_on(async {
        let csv = match &config.csv_path {
            Some(path) => Some(monitor::open_csv(path).await?),
            None => None,
        };

        let on_reading = |reading: &propstand_messages::Reading| println!("{}", reading);

        match &config.device {
            Some(device) => {
                log::info!(
                    "Connecting to {:?}, the stand sends at {} baud",
                    device.display(),
                    config.baud_rate
                );

                let port = tokio::fs::OpenOptions::new()
                    .read(true)
                    .write(true)
                    .open(device)
                    .await
                    .with_context(|| format!("Failed to open {:?}", device.display()))?;
                let (mut input, mut output) = tokio::io::split(port);

                monitor::send_settings(
                    &mut input,
                    &mut output,
                    config.settings.motor_type,
                    monitor::HANDSHAKE_TIMEOUT,
                )
                .await?;

                monitor::run(
                    tokio::io::BufReader::new(input),
                    csv,
                    config.only_populated,
                    on_reading,
                )
                .await
            }
            None => {
                log::info!(
                    "Reading telemetry from stdin, the stand sends at {} baud",
                    config.baud_rate
                );

                monitor::run(
                    tokio::io::BufReader::new(tokio::io::stdin()),
                    csv,
                    config.only_populated,
                    on_reading,
                )
                .await
            }
        }
    })?;

    log::info!(
        "{} lines, {} recorded, {} malformed, {} idle",
        summary.lines,
        summary.recorded,
        summary.malformed,
        summary.idle
    );

    Ok(())
}

fn log_format(
    w: &mut dyn std::io::Write,
    _now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use crossterm::style::{style, Attribute, Color, Stylize};
    use log::Level;

    let color = match record.level() {
        Level::Trace => Color::Magenta,
        Level::Debug => Color::Blue,
        Level::Info => Color::Green,
        Level::Warn => Color::Yellow,
        Level::Error => Color::Red,
    };

    let level = style(record.level()).with(color);

    let args = match record.level() {
        Level::Trace => style(record.args()).with(Color::DarkGrey),
        Level::Debug | Level::Info => style(record.args()),
        Level::Warn | Level::Error => style(record.args()).with(color).attribute(Attribute::Bold),
    };

    write!(w, "{:<5} [{}] {}", level, record.target(), args)
}

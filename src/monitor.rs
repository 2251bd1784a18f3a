use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use propstand_messages::{is_ack, Reading, CSV_HEADER};
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt,
};

use crate::settings::MotorType;

/// How long to wait for the stand to acknowledge
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub lines: usize,
    pub recorded: usize,
    pub malformed: usize,
    pub idle: usize,
}

/// Open a CSV file for appending, writing the header if the file is new
pub async fn open_csv(path: &Path) -> Result<tokio::fs::File> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("Failed to open {:?}", path.display()))?;

    let metadata = file.metadata().await?;
    if metadata.len() == 0 {
        file.write_all(format!("{}\n", CSV_HEADER).as_bytes())
            .await
            .context("Failed to write CSV header")?;
        file.flush().await?;
    }

    Ok(file)
}

/// Wait for the stand's acknowledgement. `false` if it sent something else or nothing in time.
async fn handshake<R: AsyncRead + Unpin>(input: &mut R, timeout: Duration) -> Result<bool> {
    let mut response = [0; 16];

    match tokio::time::timeout(timeout, input.read(&mut response)).await {
        Ok(count) => {
            let count = count.context("Failed to read handshake")?;
            let response = &response[..count];
            if !is_ack(response) {
                log::warn!("Unexpected handshake {:?}", response);
            }
            Ok(is_ack(response))
        }
        Err(_) => {
            log::warn!("No handshake within {:?}", timeout);
            Ok(false)
        }
    }
}

/// Wait for the stand to be ready, send it the motor settings and wait for it to accept them.
///
/// Returns whether the stand accepted the settings.
pub async fn send_settings<R, W>(
    input: &mut R,
    output: &mut W,
    motor_type: MotorType,
    timeout: Duration,
) -> Result<bool>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if !handshake(input, timeout).await? {
        log::warn!("Stand is not ready, settings not sent");
        return Ok(false);
    }

    let command = motor_type.settings_command();
    output
        .write_all(command.encode().as_bytes())
        .await
        .context("Failed to send settings")?;
    output.flush().await?;
    log::debug!("SetSettings command sent: {:?}", command);

    let accepted = handshake(input, timeout).await?;
    if accepted {
        log::info!("Stand accepted {:?}", command);
    } else {
        log::warn!("Stand did not accept {:?}", command);
    }

    Ok(accepted)
}

/// Read telemetry lines until the input closes.
///
/// Lines with bad fields are still recorded, keeping the fields which did parse.
pub async fn run<R, W>(
    input: R,
    mut csv: Option<W>,
    only_populated: bool,
    mut on_reading: impl FnMut(&Reading),
) -> Result<Summary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = Summary::default();
    let mut lines = input.lines();

    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read telemetry")?
    {
        summary.lines += 1;

        let reading = match Reading::try_parse(&line) {
            Ok(reading) => reading,
            Err(err) => {
                log::warn!("{} in {:?}", err, line);
                summary.malformed += 1;
                Reading::parse(&line)
            }
        };

        if only_populated && !reading.is_populated() {
            log::debug!("Motor idle: {:?}", line);
            summary.idle += 1;
            continue;
        }

        log::info!("{}", reading);
        on_reading(&reading);

        if let Some(csv) = csv.as_mut() {
            csv.write_all(format!("{}\n", reading.to_csv()).as_bytes())
                .await
                .context("Failed to write CSV row")?;
        }

        summary.recorded += 1;
    }

    if let Some(csv) = csv.as_mut() {
        csv.flush().await?;
    }

    log::debug!("Telemetry finished: {:?}", summary);

    Ok(summary)
}

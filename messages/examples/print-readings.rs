use tokio::io::AsyncBufReadExt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Pipe the stand's serial output into stdin, e.g. `cat /dev/ttyUSB0 | cargo run --example print-readings`
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    println!("{}", propstand_messages::CSV_HEADER);

    while let Some(line) = lines.next_line().await? {
        match line.parse::<propstand_messages::Reading>() {
            Ok(reading) if reading.is_populated() => println!("{}", reading.to_csv()),
            Ok(_) => (),
            Err(err) => eprintln!("Skipping {:?}: {}", line, err),
        }
    }

    Ok(())
}

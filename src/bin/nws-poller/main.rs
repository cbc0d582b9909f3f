mod args;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use args::Args;
use clap::Parser as _;
use log::info;
use nws_observations::NwsDriver;
use nws_observations::driver::{DRIVER_NAME, confeditor_loader};
use nws_observations::nws::FieldValue;
use tokio_stream::StreamExt as _;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    if let Err(e) = run().await {
        eprintln!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

async fn run() -> Result<()> {
    let args = Args::parse();

    if args.print_stanza {
        print!("{}", confeditor_loader().default_stanza());
        return Ok(());
    }

    let driver = NwsDriver::new(args.station_config()).context("failed to create driver")?;
    info!("{} via {}", driver.hardware_name(), driver.client().url());

    if let Some(name) = &args.field {
        let value = driver
            .client()
            .fetch_field(name)
            .await
            .with_context(|| format!("failed to fetch field: {name}"))?;

        match value {
            FieldValue::Number(Some(v)) => println!("{name} = {v}"),
            FieldValue::Number(None) => println!("{name} = None"),
            FieldValue::Timestamp(ts) => println!("{name} = {ts}"),
        }
        return Ok(());
    }

    let records = driver
        .loop_packets()
        .take(args.count.unwrap_or(usize::MAX));
    tokio::pin!(records);

    while let Some(record) = records.next().await {
        let record = record.with_context(|| {
            format!("failed to fetch observation for {}", driver.config().icao)
        })?;

        if args.json {
            let line = serde_json::to_string(&record).context("failed to serialize record")?;
            println!("{line}");
        } else {
            println!("{record}");
        }
    }

    info!("{DRIVER_NAME} driver stopped");

    Ok(())
}

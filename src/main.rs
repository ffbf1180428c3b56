use anyhow::{bail, Result};
use std::env;
use std::time::Duration;
use wavescope::capture::{CapturePipeline, PipelineState};
use wavescope::config::{parse_endpoint, CaptureConfig};
use wavescope::sinks::ConsoleSink;
use wavescope::transport::ZmqSubscription;

struct Args {
    address: String,
    config: CaptureConfig,
}

fn parse_args() -> Result<Args> {
    let argv: Vec<String> = env::args().collect();

    let mut address = None;
    let mut config_path = None;
    let mut period_ms = None;

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--config" | "-f" => {
                if i + 1 >= argv.len() {
                    bail!("--config requires a file path");
                }
                config_path = Some(argv[i + 1].clone());
                i += 2;
            }
            "--period" => {
                if i + 1 >= argv.len() {
                    bail!("--period requires a value in milliseconds");
                }
                period_ms = Some(argv[i + 1].parse::<u64>()?);
                i += 2;
            }
            "--help" | "-h" => {
                print_usage(&argv[0]);
                std::process::exit(0);
            }
            other if address.is_none() && !other.starts_with('-') => {
                address = Some(other.to_string());
                i += 1;
            }
            other => bail!("unrecognized argument: {}", other),
        }
    }

    let address = match address {
        Some(address) => address,
        None => {
            print_usage(&argv[0]);
            bail!("missing node address");
        }
    };

    let mut config = match config_path {
        Some(path) => CaptureConfig::from_json_file(path)?,
        None => CaptureConfig::default(),
    };
    if let Some(ms) = period_ms {
        config.tick_period_ms = ms;
    }
    config.validate()?;

    Ok(Args { address, config })
}

fn print_usage(prog: &str) {
    println!("Usage: {} [--config <file.json>] [--period <ms>] <address>", prog);
    println!();
    println!("Subscribes to a node's waveform stream and reconstructs");
    println!("per-channel sample buffers on a fixed cadence.");
    println!();
    println!("  <address>          node host, optionally host:port (default port 50006)");
    println!("  --config, -f       JSON capture configuration file");
    println!("  --period           override the reconstruction period in milliseconds");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args()?;
    let endpoint = parse_endpoint(&args.address);

    println!("wavescope: subscribing to {}", endpoint);
    println!(
        "wavescope: geometry {} units x {} channels x {} samples, {} ms cadence",
        args.config.units,
        args.config.channels,
        args.config.samples_per_channel,
        args.config.tick_period_ms
    );

    let subscription = ZmqSubscription::connect(&endpoint)?;
    let mut pipeline = CapturePipeline::new(
        args.config,
        Box::new(subscription),
        Box::new(ConsoleSink::new()),
    )?;
    pipeline.start().await?;

    // Run until interrupted, or until the receiver dies on a transport
    // error. A dead receiver must end the process, not freeze it.
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\nwavescope: shutting down");
                break;
            }
            _ = tokio::time::sleep(Duration::from_millis(250)) => {
                if let PipelineState::Failed { message } = pipeline.state() {
                    eprintln!("wavescope: capture stopped: {}", message);
                    break;
                }
            }
        }
    }

    let result = pipeline.stop().await;

    let snapshot = pipeline.metrics().snapshot();
    println!(
        "wavescope: {} frames received, {} reconstructed, {} decode failures, {} dropped",
        snapshot.frames_received,
        snapshot.frames_reconstructed,
        snapshot.decode_failures,
        snapshot.frames_dropped
    );

    result
}

//! Buraunza — command-line front end for the download core.
//!
//! Usage: `buraunza <url> [directory]`. Downloads `url` into `directory`, or
//! into the configured/default download directory, printing progress.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use buraunza::app::App;
use buraunza::managers::download_manager::human_readable_size;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(url) = args.next() else {
        eprintln!("usage: buraunza <url> [directory]");
        return Ok(ExitCode::from(2));
    };
    let directory = args.next().map(PathBuf::from);

    let app = App::new(None)?;

    let mut progress = app.download_manager.subscribe_progress();
    let printer = tokio::spawn(async move {
        loop {
            match progress.recv().await {
                Ok(item) => {
                    let total = item
                        .total_bytes
                        .map(human_readable_size)
                        .unwrap_or_else(|| "?".to_string());
                    print!(
                        "\r{}: {} / {} ({:.1}%)   ",
                        item.file_name,
                        human_readable_size(item.downloaded_bytes),
                        total,
                        item.progress()
                    );
                    let _ = std::io::stdout().flush();
                }
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    });

    let result = app
        .download_manager
        .download_file(&url, directory.as_deref())
        .await;
    printer.abort();
    println!();

    match result {
        Ok(item) => {
            println!(
                "Saved {} ({}) in {:.1}s",
                item.destination_path.display(),
                human_readable_size(item.downloaded_bytes),
                item.duration().num_milliseconds() as f64 / 1000.0
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Download failed: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

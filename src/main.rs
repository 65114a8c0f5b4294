// Interactive entry point: prompt, list, choose, download.

use std::io::{self, Write};

use tracing::{error, info};

use ytfetch::config::AppConfig;
use ytfetch::downloader::backends::YtDlpBackend;
use ytfetch::downloader::models::{DownloadOptions, MenuChoice, SelectionMode};
use ytfetch::downloader::orchestrator::Session;
use ytfetch::downloader::{tools, DownloadError};
use ytfetch::logging;

#[tokio::main]
async fn main() {
    let config = AppConfig::load();

    let log_path = match logging::init_session_log(&config.logs_dir) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("Could not set up the session log: {}", err);
            return;
        }
    };

    // Every failure lands here: logged, reported once, exit stays 0.
    if let Err(err) = run_session(&config).await {
        error!("Session failed: {}", err);
        println!(
            "Something went wrong. Check the log at {} for details.",
            log_path.display()
        );
    }
}

async fn run_session(config: &AppConfig) -> Result<(), DownloadError> {
    let tool = tools::resolve_tool(config.tool_path.as_deref());
    if !tools::tool_available(&tool) {
        return Err(DownloadError::ToolNotFound(tool));
    }
    if let Some(version) = tools::tool_version(&tool) {
        info!("Using {} {}", tool, version);
    }

    let options = DownloadOptions {
        output_dir: config.download_dir.clone(),
        merge_format: config.merge_format.clone(),
        postprocessor_args: config.postprocessor_args.clone(),
    };
    let session = Session::new(Box::new(YtDlpBackend::new(tool, options)));

    let url = prompt("Enter the video URL: ")?;
    let listing = session.fetch_listing(&url).await?;

    println!("{}", listing);
    println!("How do you want to pick a format?");
    println!("  1) Best quality (auto-select video+audio)");
    println!("  2) Enter a format code from the table above");
    let choice = MenuChoice::parse(&prompt("Choice [1/2]: ")?)?;

    let mode = match choice {
        MenuChoice::BestQuality => SelectionMode::BestQuality,
        MenuChoice::CustomCode => {
            let code = prompt("Format code (e.g. '18', or 'all' for best available): ")?;
            SelectionMode::Custom(code)
        }
    };
    info!("Selection mode: {:?}", mode);

    let spec = session.resolve_specifier(&listing, &mode);
    let outcome = session.download(&url, &spec).await?;
    println!("Done. Saved as: {}", outcome.display_name());

    Ok(())
}

fn prompt(message: &str) -> Result<String, DownloadError> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

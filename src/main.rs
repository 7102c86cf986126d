use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use well::api::WellClient;
use well::core::config::{self, well_dir};
use well::core::editor::{EditorSession, remove_live_scratch_files};
use well::menu::Menu;

#[derive(Parser)]
#[command(
    name = "well",
    version,
    about = "Write and read Well tasks, notes and bookmarks in your editor"
)]
struct Args {}

/// Exit status after Ctrl-C, matching what a shell reports for SIGINT.
const INTERRUPTED: i32 = 130;

/// Writes to `~/.well/well.log`, or `well.log` in the current directory.
fn init_logging() {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    let path = match well_dir() {
        Some(dir) if fs::create_dir_all(&dir).is_ok() => dir.join("well.log"),
        _ => PathBuf::from("well.log"),
    };

    if let Ok(log_file) = File::create(&path) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }
}

/// On Ctrl-C, remove any live scratch file before exiting.
fn spawn_interrupt_handler() {
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            let removed = remove_live_scratch_files();
            log::warn!("Interrupted, {} scratch file(s) removed", removed);
            eprintln!("\nInterrupted.");
            std::process::exit(INTERRUPTED);
        }
    });
}

#[tokio::main]
async fn main() -> ExitCode {
    let _args = Args::parse();

    // Neither file overrides variables already set in the environment
    dotenv::dotenv().ok();
    if let Some(dir) = well_dir() {
        dotenv::from_path(dir.join(".env")).ok();
    }

    init_logging();
    log::info!("Well starting up");

    let config = match config::load_config().and_then(|file| config::resolve(&file)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Using {} with editor {}", config.base_url, config.editor);

    spawn_interrupt_handler();

    let api = Arc::new(WellClient::from_config(&config));
    let editor = EditorSession::from_config(&config);
    let mut menu = Menu::new(api, editor, io::stdin().lock(), io::stdout());

    match menu.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal I/O failed: {}", e);
            eprintln!("Error: terminal I/O failed: {e}");
            ExitCode::FAILURE
        }
    }
}

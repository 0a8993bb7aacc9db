// Inherit lint configuration from lib.rs for consistency
#![allow(
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::items_after_statements
)]

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docsift::api;
use docsift::clean::Cleaner;
use docsift::config::Settings;
use docsift::error::Result;
use docsift::extract::Dispatcher;
use docsift::progress::ProgressTx;

#[derive(Parser)]
#[command(
    name = "docsift",
    version,
    about = "Extract raw text from documents and clean it into Markdown-ish structure"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract and clean a single document, printing the result to stdout.
    Process {
        /// Path to the document
        file: PathBuf,
        /// Print the raw extracted text, skipping the cleaning pass
        #[arg(long)]
        raw: bool,
        /// Print percentage progress updates to stderr
        #[arg(long)]
        progress: bool,
    },

    /// Run the HTTP upload API.
    Serve {
        /// Port to listen on (overrides docsift.toml)
        #[arg(short, long)]
        port: Option<u16>,
        /// Directory for temporary upload storage (overrides docsift.toml)
        #[arg(long)]
        upload_dir: Option<PathBuf>,
    },

    /// List the supported file extensions as JSON.
    Supported,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(Path::new("."));

    match cli.command {
        Command::Process {
            file,
            raw,
            progress,
        } => cmd_process(&settings, &file, raw, progress),
        Command::Serve { port, upload_dir } => cmd_serve(settings, port, upload_dir),
        Command::Supported => {
            let supported = Dispatcher::new().extensions();
            println!("{}", serde_json::to_string(&supported)?);
            Ok(())
        }
    }
}

fn cmd_process(settings: &Settings, file: &Path, raw: bool, progress: bool) -> Result<()> {
    let dispatcher = Dispatcher::new();

    let (mut sink, watcher) = if progress {
        let (sink, rx) = ProgressTx::channel();
        let handle = std::thread::spawn(move || {
            for pct in rx {
                eprintln!("{pct}%");
            }
        });
        (sink, Some(handle))
    } else {
        (ProgressTx::none(), None)
    };

    let text = dispatcher.extract_text(file, &mut sink);
    drop(sink);
    if let Some(handle) = watcher {
        let _ = handle.join();
    }
    let text = text?;

    if raw {
        println!("{text}");
    } else {
        let cleaner = Cleaner::new(&settings.clean)?;
        println!("{}", cleaner.clean(&text));
    }
    Ok(())
}

fn cmd_serve(
    mut settings: Settings,
    port: Option<u16>,
    upload_dir: Option<PathBuf>,
) -> Result<()> {
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(dir) = upload_dir {
        settings.server.upload_dir = dir;
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(api::serve(&settings))
}

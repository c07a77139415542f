use std::path::{Path, PathBuf};

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use osf_downloader::prelude::*;

mod progress;

use progress::ProgressTracker;

#[derive(Debug, Parser)]
#[command(name = "osf-downloader", version, about = "Download files and project archives from the Open Science Framework")]
pub struct Cli {
    /// OSF project identifier, e.g. `ytpuq`
    pub project_id: String,

    /// Output path. If it has no extension, the downloaded file's one
    /// (or `.zip` for whole projects) is appended
    pub save_path: Option<PathBuf>,

    /// File path inside the project storage, e.g. `data/results.csv`.
    /// The whole project is downloaded as ZIP archive if omitted
    #[arg(short, long)]
    pub file: Option<String>,

    /// Don't display the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Print nothing but errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase logging verbosity (`-v` for debug, `-vv` for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// OSF API root, `https://api.osf.io/v2` by default
    #[arg(long)]
    pub api_root: Option<String>
}

pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(match verbose {
            0 => "warn",
            1 => "warn,osf_downloader=debug",
            _ => "warn,osf_downloader=trace"
        }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Output path used when none was given: name of the requested file,
/// or the project id for whole project archives
pub fn default_save_path(project_id: &str, file_path: Option<&str>) -> PathBuf {
    file_path
        .and_then(|path| Path::new(path).file_name())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(project_id))
}

/// - `2` - project, provider or path not found
/// - `3` - request failed
/// - `1` - anything else
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<OsfError>() {
        Some(OsfError::NotFound(_)) | Some(OsfError::PathIsFolder(_)) => 2,
        Some(OsfError::Request(_)) => 3,
        _ => 1
    }
}

fn status(quiet: bool, message: impl std::fmt::Display) {
    if !quiet {
        println!("{}", style(message).blue());
    }
}

pub fn run(args: &Cli) -> anyhow::Result<PathBuf> {
    let mut downloader = Downloader::new()?;

    if let Some(api_root) = &args.api_root {
        downloader = downloader.with_api_root(api_root);
    }

    let file_path = args.file.as_deref();

    let save_path = args.save_path.clone()
        .unwrap_or_else(|| default_save_path(&args.project_id, file_path));

    let show_progress = !args.no_progress && !args.quiet;
    let mut progress: Option<ProgressTracker> = None;

    let result = downloader.download_with_updater(&args.project_id, save_path, file_path, |update| {
        match update {
            Update::Connecting(project_id) => status(args.quiet, format!("Connecting to OSF project {project_id}")),
            Update::PreparingZip => status(args.quiet, "Preparing project ZIP"),

            Update::DownloadingStarted { path, total_chunks } if show_progress => {
                let label = path.file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default();

                progress = Some(ProgressTracker::new(&label, total_chunks));
            }

            Update::DownloadingProgress { .. } => {
                if let Some(progress) = &progress {
                    progress.step();
                }
            }

            Update::DownloadingFinished => {
                if let Some(progress) = progress.take() {
                    progress.finish();
                }
            }

            Update::Saved(path) => status(args.quiet, format!("Saved to {}", path.display())),

            _ => ()
        }
    });

    if let Some(progress) = progress.take() {
        progress.abandon();
    }

    Ok(result?)
}

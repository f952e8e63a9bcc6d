//! Command-line entry point for overlog.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "overlog", version, about = "Overlay instrument-log charts onto video")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full overlay job and encode the output video.
    Render {
        /// Path to the job JSON file.
        #[arg(long = "in")]
        input: PathBuf,
    },
    /// Render the chart raster for one moment of a job, as a PNG.
    Chart {
        /// Path to the job JSON file.
        #[arg(long = "in")]
        input: PathBuf,
        /// Video-timeline position in seconds.
        #[arg(long)]
        at: f64,
        /// Output PNG path.
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render { input } => cmd_render(&input),
        Commands::Chart { input, at, out } => cmd_chart(&input, at, &out),
    }
}

fn cmd_render(input: &std::path::Path) -> anyhow::Result<()> {
    let job = overlog::OverlayJob::from_path(input)?;
    let stats = overlog::run_job(&job)?;
    eprintln!(
        "wrote {} ({} frames from {} streams, {} truncated)",
        job.out.display(),
        stats.frames_written,
        stats.streams,
        stats.truncated_streams
    );
    Ok(())
}

fn cmd_chart(input: &std::path::Path, at: f64, out: &std::path::Path) -> anyhow::Result<()> {
    let job = overlog::OverlayJob::from_path(input)?;
    let raster = overlog::render_chart_at(&job, at)?;

    overlog::ensure_parent_dir(out)?;
    image::save_buffer_with_format(
        out,
        &raster.data,
        raster.width,
        raster.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("failed to write chart png '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

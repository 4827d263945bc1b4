use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "legend", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scene script and write the final canvas as a PNG.
    Render(RenderArgs),
    /// Print how a string splits into script runs.
    Runs(RunsArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// UI config JSON (window size, fonts, fade timing).
    #[arg(long)]
    config: PathBuf,

    /// Scene script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Skip fade delays (the ramp still runs every step).
    #[arg(long)]
    no_delay: bool,
}

#[derive(Parser, Debug)]
struct RunsArgs {
    /// Text to segment.
    text: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Runs(args) => cmd_runs(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut config = legend::UiConfig::from_path(&args.config)?;
    if args.no_delay {
        config.fade.step_delay_ms = 0;
    }

    let mut ui = legend::Ui::init(&config).context("ui init failed")?;

    let script = legend::Script::from_path(&args.script)?;
    let assets_root = args.script.parent().unwrap_or_else(|| Path::new("."));
    let report = legend::run_script(&mut ui, &script, assets_root)?;

    let frame = ui.canvas().snapshot().into_straight();

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} commands, {} images skipped, title '{}')",
        args.out.display(),
        report.executed,
        report.images_failed.len(),
        ui.title()
    );
    Ok(())
}

fn cmd_runs(args: RunsArgs) -> anyhow::Result<()> {
    let bytes = args.text.as_bytes();
    for run in legend::segment(bytes) {
        let text = String::from_utf8_lossy(run.bytes(bytes).unwrap_or_default());
        println!(
            "{:<5} {:>4} +{:<4} {text}",
            run.script.name(),
            run.start,
            run.len
        );
    }
    Ok(())
}

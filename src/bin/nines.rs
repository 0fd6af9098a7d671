use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "nines", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the available scene names.
    List,
    /// Play a scene and write its recorded frames as JSON.
    Sample(SampleArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Scene to play (see `nines list`).
    #[arg(long)]
    scene: String,

    /// Config JSON; defaults are used for anything it leaves out.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured frame rate (frames per second).
    #[arg(long)]
    fps: Option<u32>,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::List => cmd_list(),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_list() -> anyhow::Result<()> {
    for name in nines::scenes::SCENES {
        println!("{name}");
    }
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => nines::Config::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => nines::Config::default(),
    };
    if let Some(fps) = args.fps {
        cfg.fps = nines::Fps::new(fps, 1)?;
    }

    let recording = nines::scenes::run(&args.scene, &cfg)
        .with_context(|| format!("play scene '{}'", args.scene))?;
    let json = recording.to_json_pretty()?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, json)
                .with_context(|| format!("write frames '{}'", out.display()))?;
            eprintln!(
                "wrote {} frames to {}",
                recording.frames.len(),
                out.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

use std::{
    io::BufRead as _,
    path::{Path, PathBuf},
    sync::mpsc,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use fukuwarai::{
    Advance, Dimension, Rng64, Score, Session, SessionConfig, resolve_export_path, unix_now,
    write_png,
};

#[derive(Parser, Debug)]
#[command(name = "fukuwarai", version)]
struct Cli {
    /// Session config JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scripted play-through: animate each part for a number of frames, then freeze it.
    Play(PlayArgs),
    /// Real-time play: every stdin line is a click, `r` resets.
    Interactive(InteractiveArgs),
    /// Rebuild a finished face from a share link.
    Restore(RestoreArgs),
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Session seed (defaults to the clock).
    #[arg(long)]
    seed: Option<u64>,

    /// Frames each part animates before it is frozen (random per part when absent).
    #[arg(long)]
    ticks: Option<u32>,

    /// Output PNG path, or a directory for a timestamped filename.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct InteractiveArgs {
    /// Session seed (defaults to the clock).
    #[arg(long)]
    seed: Option<u64>,

    /// Display frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Output PNG path, or a directory for a timestamped filename, written on completion.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RestoreArgs {
    /// Share link produced by a finished session.
    #[arg(long)]
    url: String,

    /// Output PNG path, or a directory for a timestamped filename.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Play(args) => cmd_play(cfg, args),
        Command::Interactive(args) => cmd_interactive(cfg, args),
        Command::Restore(args) => cmd_restore(cfg, args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SessionConfig> {
    match path {
        Some(path) => SessionConfig::from_json_file(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(SessionConfig::default()),
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn cmd_play(cfg: SessionConfig, args: PlayArgs) -> anyhow::Result<()> {
    let seed = args.seed.unwrap_or_else(clock_seed);
    let mut session = Session::new(cfg, seed);
    let mut pacing = Rng64::new(seed.rotate_left(17) ^ 0x5eed);

    let score = loop {
        match session.advance() {
            Advance::Completed { score, .. } => break score,
            Advance::AlreadyComplete => anyhow::bail!("session completed without a score"),
            _ => {}
        }
        let ticks = args.ticks.unwrap_or_else(|| 1 + pacing.below(240));
        for _ in 0..ticks {
            session.tick();
        }
        println!("{}: {ticks} frames", session.status_text());
    };

    println!("seed: {seed}");
    finish(&session, &score, args.out.as_deref())
}

enum Input {
    Line(String),
    Eof,
}

fn cmd_interactive(cfg: SessionConfig, args: InteractiveArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.fps > 0, "fps must be positive");
    let frame = Duration::from_secs(1) / args.fps;
    let mut session = Session::new(cfg, args.seed.unwrap_or_else(clock_seed));

    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Input::Eof);
    });

    println!("{}", session.status_text());
    let mut next_frame = Instant::now() + frame;
    loop {
        let timeout = next_frame.saturating_duration_since(Instant::now());
        match rx.recv_timeout(timeout) {
            Err(mpsc::RecvTimeoutError::Timeout) => {
                session.tick();
                next_frame += frame;
            }
            Err(mpsc::RecvTimeoutError::Disconnected) | Ok(Input::Eof) => return Ok(()),
            Ok(Input::Line(line)) if line.trim() == "r" => {
                session.reset();
                println!("{}", session.status_text());
            }
            Ok(Input::Line(_)) => match session.advance() {
                Advance::Completed { score, .. } => {
                    finish(&session, &score, args.out.as_deref())?;
                }
                Advance::AlreadyComplete => {}
                Advance::Started(_) | Advance::Switched { .. } => {
                    println!("{}", session.status_text());
                }
            },
        }
    }
}

fn cmd_restore(cfg: SessionConfig, args: RestoreArgs) -> anyhow::Result<()> {
    let session = Session::restore(cfg, &args.url, clock_seed()).context("restore share link")?;
    let score = session
        .score()
        .cloned()
        .context("restored scene is not complete")?;
    finish(&session, &score, args.out.as_deref())
}

fn finish(session: &Session, score: &Score, out: Option<&Path>) -> anyhow::Result<()> {
    println!("{}", session.status_text());
    println!("score: {:.1}", score.overall);
    for dim in Dimension::ALL {
        if let Some(s) = score.dimension(dim) {
            println!("  {dim:?}: {s:.1}");
        }
    }
    println!("share: {}", session.share_link()?);

    if let Some(out) = out {
        let pending = session.spawn_snapshot();
        let path = resolve_export_path(out, &session.config().export_prefix, unix_now());
        write_png(&path, &pending.wait()?)?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

//! Terminal eco-games host (default binary).
//!
//! Line-based: every command is typed and confirmed with Enter, the session
//! runs on its own task and the board is reprinted after each change, including
//! the ones its timers make.
//!
//! Usage: `eco-games [--seed N] [--catalog content.json] <preset-id|kind|game.json>`
//!        `eco-games --list`

use std::path::Path;
use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use eco_games::core::{challenge_presets, find_preset, Catalog, Dispatch};
use eco_games::input::{parse_command, usage, HostCommand};
use eco_games::runtime::{new_session, spawn_session, RuntimeConfig, SessionEvent, SessionHandle};
use eco_games::types::{GameConfig, GameKind};
use eco_games::view;

struct Args {
    seed: Option<u32>,
    catalog: Option<String>,
    game: Option<String>,
    list: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        seed: None,
        catalog: None,
        game: None,
        list: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--list" => args.list = true,
            "--seed" => {
                let value = it.next().context("--seed needs a value")?;
                args.seed = Some(value.parse().with_context(|| format!("bad seed '{value}'"))?);
            }
            "--catalog" => args.catalog = Some(it.next().context("--catalog needs a path")?),
            other if other.starts_with("--") => bail!("unknown option '{other}'"),
            other => args.game = Some(other.to_string()),
        }
    }
    Ok(args)
}

fn load_game(name: &str) -> Result<GameConfig> {
    if name.ends_with(".json") && Path::new(name).exists() {
        let json = std::fs::read_to_string(name).with_context(|| format!("reading {name}"))?;
        return GameConfig::from_json(&json).with_context(|| format!("parsing {name}"));
    }
    find_preset(name).with_context(|| format!("no preset or game kind named '{name}' (try --list)"))
}

fn print_presets() {
    for preset in challenge_presets() {
        println!(
            "{:<28} {:<12} {}",
            preset.id,
            preset.kind.as_str(),
            preset.title
        );
    }
}

fn print_help(kind: GameKind) {
    println!("commands: start | reset | abort | show | help | quit");
    println!("actions:  {}", usage(kind));
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    if args.list {
        print_presets();
        return Ok(());
    }
    let Some(name) = args.game.as_deref() else {
        print_presets();
        bail!("choose a game");
    };

    let game = load_game(name)?;
    let catalog = match &args.catalog {
        Some(path) => {
            let json = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            Some(Catalog::from_json(&json).with_context(|| format!("parsing {path}"))?)
        }
        None => None,
    };

    let mut config = RuntimeConfig::from_env();
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let kind = game.kind;
    let session = new_session(game, catalog, &config)?;
    let mut handle = spawn_session(session, &config);

    print_help(kind);
    redraw(&handle).await?;

    let result = run(&mut handle, kind).await;
    handle.shutdown().await?;
    result
}

/// What woke the host loop
enum Wake {
    Line(Option<String>),
    Event(Option<SessionEvent>),
}

async fn run(handle: &mut SessionHandle, kind: GameKind) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let wake = tokio::select! {
            line = lines.next_line() => Wake::Line(line?),
            event = handle.next_event() => Wake::Event(event),
        };

        match wake {
            Wake::Line(None) | Wake::Event(None) => return Ok(()),
            Wake::Line(Some(line)) => match parse_command(kind, &line) {
                Some(HostCommand::Quit) => return Ok(()),
                Some(HostCommand::Help) => print_help(kind),
                Some(HostCommand::Show) => redraw(handle).await?,
                Some(HostCommand::Start) => handle.start().await?,
                Some(HostCommand::Reset) => handle.reset().await?,
                Some(HostCommand::Abort) => handle.abort().await?,
                Some(HostCommand::Action(action)) => handle.dispatch(action).await?,
                None if line.trim().is_empty() => {}
                None => println!("? {}", usage(kind)),
            },
            Wake::Event(Some(event)) => {
                report(&event);
                if !matches!(
                    event,
                    SessionEvent::Dispatched { result: Dispatch::Ignored, .. }
                        | SessionEvent::StartFailed(_)
                ) {
                    redraw(handle).await?;
                }
            }
        }
    }
}

fn report(event: &SessionEvent) {
    match event {
        SessionEvent::Started => println!("-- started"),
        SessionEvent::StartFailed(err) => println!("-- could not start: {err}"),
        SessionEvent::Advanced => {}
        SessionEvent::Dispatched { result: Dispatch::Ignored, .. } => println!("-- not now"),
        SessionEvent::Dispatched {
            result: Dispatch::Applied { score_delta },
            ..
        } if *score_delta != 0 => println!("-- {score_delta:+}"),
        SessionEvent::Dispatched { .. } => {}
        SessionEvent::Completed(report) => {
            tracing::info!(game_id = %report.game_id, score = report.score, "game completed");
            println!("-- game over: {}", report.reason.as_str());
        }
        SessionEvent::Aborted => println!("-- aborted"),
        SessionEvent::Reset => println!("-- reset"),
    }
}

async fn redraw(handle: &SessionHandle) -> Result<()> {
    let snapshot = handle.snapshot().await?;
    print!("{}", view::render(&snapshot));
    Ok(())
}

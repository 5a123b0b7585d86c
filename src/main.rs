//! Binary entrypoint for the Dungeon Door CLI.
//!
//! Commands:
//! - `play [--player <name>] [--seed <n>] [--fresh]` - play in the console, resuming any save
//! - `init` - write a starter `config.toml`
//! - `status [--player <name>]` - summarize a saved session
//! - `reset [--player <name>]` - delete a saved session
//!
//! See the library crate docs for module-level details: `dungeondoor::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use std::io::{BufRead, Write};
use std::path::Path;

use dungeondoor::config::Config;
use dungeondoor::game::render::{help_text, options_line, render, status_line};
use dungeondoor::game::{Action, Dungeon, GameError, SessionStore};
use dungeondoor::logutil::escape_log;

#[derive(Parser)]
#[command(name = "dungeondoor")]
#[command(about = "A compact, action-driven dungeon text adventure")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in the console
    Play {
        /// Save slot name
        #[arg(short, long, default_value = "player")]
        player: String,

        /// RNG seed for reproducible runs (overrides the config seed)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Ignore any existing save and start over
        #[arg(long)]
        fresh: bool,
    },
    /// Write a default configuration file
    Init,
    /// Show a saved session
    Status {
        #[arg(short, long, default_value = "player")]
        player: String,
    },
    /// Delete a saved session
    Reset {
        #[arg(short, long, default_value = "player")]
        player: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        init_logging(&Config::default(), cli.verbose);
        if Path::new(&cli.config).exists() {
            warn!("{} already exists; leaving it untouched", cli.config);
            return Ok(());
        }
        Config::create_default(&cli.config).await?;
        println!("Configuration file created at {}", cli.config);
        return Ok(());
    }

    let config = if Path::new(&cli.config).exists() {
        Config::load(&cli.config).await?
    } else {
        Config::default()
    };
    init_logging(&config, cli.verbose);
    info!("Starting Dungeon Door v{}", env!("CARGO_PKG_VERSION"));

    let store = SessionStore::new(&config.storage.data_dir);
    match cli.command {
        Commands::Play {
            player,
            seed,
            fresh,
        } => {
            let dungeon = Dungeon::new(config.game.clone())?;
            play(&dungeon, &store, &player, seed, fresh)?;
        }
        Commands::Status { player } => match store.load_save(&player)? {
            Some(save) => {
                let s = &save.session;
                println!("{} - saved {}", player, save.saved_at.format("%Y-%m-%d %H:%M UTC"));
                println!("{}", status_line(s));
                println!("State: {}  Turn: {}", s.state, s.turn);
                println!(
                    "Slain: {}  Gold earned: {}  Fled: {}",
                    s.stats.monsters_slain, s.stats.gold_earned, s.stats.times_fled
                );
                println!("{}", s.story);
            }
            None => println!("No saved session for {}.", player),
        },
        Commands::Reset { player } => {
            if store.delete(&player)? {
                println!("Deleted saved session for {}.", player);
            } else {
                println!("No saved session for {}.", player);
            }
        }
        Commands::Init => {}
    }

    Ok(())
}

fn play(
    dungeon: &Dungeon,
    store: &SessionStore,
    player: &str,
    seed: Option<u64>,
    fresh: bool,
) -> Result<()> {
    let (mut session, is_new) = if fresh {
        (dungeon.new_session(), true)
    } else {
        store.load_or_new(player, dungeon)?
    };
    if let Some(seed) = seed {
        if is_new {
            session = dungeon.new_session_with_seed(seed);
        } else {
            session.reseed(seed);
        }
    }
    info!(
        "{} session for {} (seed {})",
        if is_new { "new" } else { "resumed" },
        escape_log(player),
        session.seed
    );

    let mut out = std::io::stdout();
    if is_new {
        writeln!(
            out,
            "Welcome to Dungeon Door: explore, fight, shop and level up. Type ? for help."
        )?;
    }
    write!(out, "{}", render(&session))?;

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let cmd = line.trim();
        debug!("input: {}", escape_log(cmd));
        if cmd.is_empty() {
            continue;
        }
        if cmd.eq_ignore_ascii_case("Q") || cmd.eq_ignore_ascii_case("QUIT") {
            break;
        }
        if cmd == "?" || cmd.eq_ignore_ascii_case("HELP") {
            writeln!(out, "{}", help_text())?;
            continue;
        }
        let Some(action) = Action::parse(cmd) else {
            writeln!(out, "Bad cmd. Use ? for help.")?;
            writeln!(out, "{}", options_line(&session))?;
            continue;
        };
        match dungeon.handle_action(&mut session, action) {
            Ok(()) => {
                write!(out, "{}", render(&session))?;
                store.save(player, &session)?;
            }
            Err(e @ GameError::ActionUnavailable { .. }) => {
                writeln!(out, "You can't {} right now.", action)?;
                debug!("{}", e);
                writeln!(out, "{}", options_line(&session))?;
            }
            Err(e) => return Err(e.into()),
        }
    }
    store.save(player, &session)?;
    writeln!(out, "Saved. Farewell, {}.", player)?;
    Ok(())
}

fn init_logging(config: &Config, verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let level = match verbosity {
        0 => config.logging.level_filter(),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);
    if let Some(ref file) = config.logging.file {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
        {
            let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
            // Echo to the console only when stderr is a terminal
            let is_tty = atty::is(atty::Stream::Stderr);
            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
            let _ = builder.try_init();
            return;
        }
    }
    builder.format(|fmt, record| {
        writeln!(
            fmt,
            "{} [{}] {}",
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
            record.level(),
            record.args()
        )
    });
    let _ = builder.try_init();
}

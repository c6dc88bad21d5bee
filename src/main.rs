use anyhow::{Context, bail};
use clap::Parser;
use gold_tile::{Cell, Game, GameConfig, HandOpt, Move, Tiles};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author,
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_COMMIT"), ")"),
    about = "Play Gold Tile at the console",
    long_about = None
)]
struct Args {
    /// TOML game configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Hands in seating order, as name[:local|:auto[:skip]]
    #[arg(long, value_delimiter = ',', default_value = "You:local,Robot:auto")]
    hands: Vec<String>,
    /// Override the configured seed
    #[arg(long)]
    seed: Option<u64>,
    /// Write the turn log here when the game ends
    #[arg(long)]
    save: Option<PathBuf>,
    /// Log every turn
    #[arg(short, long)]
    verbose: bool,
}

/// What a local player typed.
#[derive(Debug, PartialEq)]
enum Command {
    Move(Move),
    Hint,
    Quit,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log(args.verbose);

    let mut config = match &args.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let opts = args
        .hands
        .iter()
        .map(|s| parse_hand(s))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut game = Game::new(config, opts)?;
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    while !game.is_over() {
        println!("\n{}", game.board());
        for hand in game.hands().iter() {
            println!("  {}", hand);
        }
        println!("  stock: {} tiles", game.stock().count());

        let m = if game.active_hand().is_automatic() {
            game.suggest_move()
        } else {
            print!("{}> ", game.active_hand().name());
            std::io::stdout().flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            match parse_command(&line?, game.active_hand().tiles()) {
                Ok(Command::Move(m)) => m,
                Ok(Command::Hint) => {
                    println!("try: {}", game.clone().suggest_move());
                    continue;
                }
                Ok(Command::Quit) => break,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            }
        };
        if let Some(reason) = game.legality(&m) {
            println!("illegal move: {}", reason);
            continue;
        }
        let report = game.finish_turn(m)?;
        println!(
            "{} scored {}{} in {:.1}s",
            report.hand,
            report.points,
            if report.went_out {
                format!(" and went out (+{})", report.bonus)
            } else {
                String::new()
            },
            report.elapsed_ms as f64 / 1000.0
        );
    }

    println!("\nfinal scores:");
    for hand in game.hands().iter() {
        println!("  {}", hand);
    }
    let winners: Vec<&str> = game.winners().iter().map(|h| h.name()).collect();
    if !winners.is_empty() {
        println!("winner: {}", winners.join(", "));
    }
    if let Some(path) = &args.save {
        std::fs::write(path, game.turns().to_string())
            .with_context(|| format!("cannot save turns to {}", path.display()))?;
        log::info!("{:<32}{}", "saved turns", path.display());
    }
    Ok(())
}

/// Terminal logging, INFO by default and DEBUG with --verbose.
fn log(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    // A logger may already be installed when embedded; keep going without ours
    let _ = simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
}

/// "Ann", "Ann:local", "Bot:auto" or "Bot:auto:0.2"
fn parse_hand(text: &str) -> anyhow::Result<HandOpt> {
    let mut parts = text.split(':');
    let name = parts.next().unwrap_or_default().trim();
    if name.is_empty() {
        bail!("hand '{}' has no name", text);
    }
    let opt = match (parts.next(), parts.next()) {
        (None | Some("local"), None) => HandOpt::local(name),
        (Some("auto"), skip) => {
            let skip = match skip {
                Some(p) => p
                    .parse::<f64>()
                    .ok()
                    .filter(|p| (0.0..=1.0).contains(p))
                    .with_context(|| format!("skip probability '{}' must be 0-1", p))?,
                None => 0.0,
            };
            HandOpt::automatic(name, skip)
        }
        (Some("remote"), _) => bail!("remote hands need a network front-end"),
        _ => bail!("cannot understand hand '{}'", text),
    };
    Ok(opt)
}

/// Commands, by tile id from the rack:
/// `play 12@0,0 31@0,1`, `swap 12 31`, `pass`, `resign`, `hint`, `quit`
fn parse_command(line: &str, rack: &Tiles) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let tile = |id: &str| {
        id.parse()
            .ok()
            .and_then(|id| rack.get(id))
            .cloned()
            .ok_or_else(|| format!("you hold no tile '{}'", id))
    };
    let command = match verb {
        "pass" => Command::Move(Move::pass()),
        "resign" => Command::Move(Move::resign(rack)),
        "hint" => Command::Hint,
        "quit" => Command::Quit,
        "swap" => {
            let mut m = Move::pass();
            for id in words.by_ref() {
                m.add_swap_tile(tile(id)?);
            }
            Command::Move(m)
        }
        "play" => {
            let mut m = Move::pass();
            for word in words.by_ref() {
                let (id, cell) = word
                    .split_once('@')
                    .ok_or_else(|| format!("'{}' should look like id@row,column", word))?;
                let cell: Cell = cell.parse().map_err(|e: gold_tile::Error| e.to_string())?;
                m.add_cell(tile(id)?, cell);
            }
            if m.is_pass() {
                return Err("play needs at least one tile".to_string());
            }
            Command::Move(m)
        }
        "" => return Err("type play, swap, pass, resign, hint or quit".to_string()),
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(command)
}

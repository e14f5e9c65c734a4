//! Command-line front end for generating and playing tile-link puzzles.
//!
//! ```text
//! $ tilelink daily --date 2025-08-11
//! $ tilelink show --seed SEED_2025-08-11 --tier easy --json
//! $ tilelink play --seed SEED_2025-08-11 --tier easy --swap 1,0:2,1 --save game.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use serde::Serialize;
use time::macros::{date, format_description};
use time::{Date, OffsetDateTime};
use tilelink_core::*;

mod render;

/// Date of daily puzzle number 1.
const FIRST_DAILY: Date = date!(2025 - 08 - 11);

#[derive(Parser)]
#[command(about, version, long_about = None)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// TOML file with engine, generator and search limits
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of a drawing
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Daily puzzle of a date, today (UTC) by default
    Daily {
        /// Date as YYYY-MM-DD
        #[arg(short, long, value_parser = parse_date)]
        date: Option<Date>,
    },
    /// Puzzle from a fresh random seed
    Practice {
        #[arg(short, long, value_enum, default_value_t = TierArg::Medium)]
        tier: TierArg,
    },
    /// Puzzle for an explicit seed
    Show {
        #[arg(short, long)]
        seed: String,
        #[arg(short, long, value_enum)]
        tier: TierArg,
        /// Also draw the unscrambled board
        #[arg(long)]
        solution: bool,
    },
    /// Apply swaps to a puzzle, optionally continuing a saved game
    Play {
        #[arg(short, long)]
        seed: String,
        #[arg(short, long, value_enum)]
        tier: TierArg,
        /// Swap given as `x1,y1:x2,y2`, repeatable
        #[arg(short = 'm', long = "swap", value_parser = parse_swap)]
        swaps: Vec<(Coord2, Coord2)>,
        /// Revert the last swap after applying the others
        #[arg(long)]
        undo: bool,
        /// Saved game to resume from and write back to
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum TierArg {
    Easy,
    Medium,
    Hard,
}

impl From<TierArg> for Tier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Easy => Tier::Easy,
            TierArg::Medium => Tier::Medium,
            TierArg::Hard => Tier::Hard,
        }
    }
}

#[derive(Serialize)]
struct PuzzleReport<'a> {
    number: Option<u32>,
    #[serde(flatten)]
    puzzle: &'a GeneratedPuzzle,
}

#[derive(Serialize)]
struct PlayReport {
    saved: SavedGame,
    rating: StarRating,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Daily { date } => {
            let date = date.unwrap_or_else(|| OffsetDateTime::now_utc().date());
            let request = daily_request(date)?;
            print_puzzle(&request, &config, cli.json, false)
        }
        Command::Practice { tier } => {
            let request = PuzzleRequest::practice(&mut rand::rng(), tier.into());
            print_puzzle(&request, &config, cli.json, false)
        }
        Command::Show {
            seed,
            tier,
            solution,
        } => {
            let request = PuzzleRequest::new(seed, tier.into());
            print_puzzle(&request, &config, cli.json, solution)
        }
        Command::Play {
            seed,
            tier,
            swaps,
            undo,
            save,
        } => {
            let request = PuzzleRequest::new(seed, tier.into());
            play(&request, &config, &swaps, undo, save.as_deref(), cli.json)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn parse_date(value: &str) -> Result<Date> {
    Ok(Date::parse(value, format_description!("[year]-[month]-[day]"))?)
}

fn parse_swap(value: &str) -> Result<(Coord2, Coord2)> {
    fn parse_cell(cell: &str) -> Result<Coord2> {
        let Some((x, y)) = cell.split_once(',') else {
            bail!("expected x,y but got {cell:?}");
        };
        Ok((x.trim().parse()?, y.trim().parse()?))
    }

    let Some((a, b)) = value.split_once(':') else {
        bail!("expected x1,y1:x2,y2 but got {value:?}");
    };
    Ok((parse_cell(a)?, parse_cell(b)?))
}

fn daily_request(date: Date) -> Result<PuzzleRequest> {
    let days = (date - FIRST_DAILY).whole_days();
    let Some(number) = u32::try_from(days).ok().and_then(|days| days.checked_add(1)) else {
        bail!("no daily puzzle before {FIRST_DAILY}");
    };
    let date_key = date.format(format_description!("[year]-[month]-[day]"))?;
    let day_index = u32::from(date.weekday().number_days_from_sunday());
    Ok(PuzzleRequest::daily(&date_key, day_index, number))
}

fn print_puzzle(
    request: &PuzzleRequest,
    config: &EngineConfig,
    json: bool,
    with_solution: bool,
) -> Result<()> {
    let puzzle = request.generate(config);

    if json {
        let report = PuzzleReport {
            number: request.number,
            puzzle: &puzzle,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let (cols, rows) = puzzle.template.size;
    match request.number {
        Some(number) => print!("Puzzle #{number:02}  "),
        None => print!("Practice  "),
    }
    println!("{}  {:?}  {cols}x{rows}", puzzle.seed, puzzle.tier());
    println!(
        "optimal swaps {} to goal, {} with all {} gems",
        puzzle.profile.optimal_to_goal, puzzle.profile.optimal_all_gems, puzzle.profile.total_gems
    );
    println!();
    for row in render::board_rows(&puzzle.board) {
        println!("{row}");
    }
    if with_solution {
        println!();
        for row in render::board_rows(&puzzle.solution) {
            println!("{row}");
        }
    }
    Ok(())
}

fn play(
    request: &PuzzleRequest,
    config: &EngineConfig,
    swaps: &[(Coord2, Coord2)],
    undo: bool,
    save: Option<&Path>,
    json: bool,
) -> Result<()> {
    let saved = match save {
        Some(path) if path.exists() => Some(
            fs::read_to_string(path)
                .with_context(|| format!("reading saved game {}", path.display()))?,
        ),
        _ => None,
    };

    let (mut engine, outcome) = PlayEngine::resume(saved.as_deref(), request, config);
    if outcome.should_clear_saved() {
        log::warn!("Saved game was unusable, starting {} over", request.seed);
    }

    for &(a, b) in swaps {
        match engine.swap(a, b) {
            Ok(SwapOutcome::Solved) => log::info!("Solved after {} moves", engine.move_count()),
            Ok(SwapOutcome::Moved) => {}
            Err(err) => log::warn!("Swap {a:?} <-> {b:?} rejected: {err}"),
        }
    }
    if undo {
        if let Err(err) = engine.undo() {
            log::warn!("Undo rejected: {err}");
        }
    }

    let saved = engine.to_saved_game();
    if let Some(path) = save {
        fs::write(path, saved.to_json())
            .with_context(|| format!("writing saved game {}", path.display()))?;
    }

    let rating = engine.rating();
    if json {
        let report = PlayReport { saved, rating };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for row in render::board_rows(engine.board()) {
        println!("{row}");
    }
    println!();
    println!(
        "{}",
        render::rating_line(&rating, engine.move_count(), engine.gems_collected())
    );
    Ok(())
}

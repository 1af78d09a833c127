use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::Rng;
use tanguramu_core::{
    CanvasSize, CoreAction, CoreEvent, Difficulty, Level, Mode, PieceKind, Session, decode_level,
    encode_level, game, kind_by_name,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tanguramu-cli", version, about = "Local tools for tanguramu level files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Levels {
        #[command(subcommand)]
        command: LevelCommand,
    },
}

#[derive(Subcommand)]
enum LevelCommand {
    /// Print a summary of a level file.
    Show {
        file: PathBuf,
        /// Only list targets and pieces of one kind, e.g. "square".
        #[arg(long)]
        kind: Option<String>,
    },
    /// Check a level file against the catalog and record constraints.
    Validate { file: PathBuf },
    /// Drag every piece onto its target and report whether the level completes.
    Solve {
        file: PathBuf,
        #[arg(long, env = "TANGURAMU_CANVAS_WIDTH", default_value_t = 768.0)]
        canvas_width: f32,
        #[arg(long, env = "TANGURAMU_CANVAS_HEIGHT", default_value_t = 1024.0)]
        canvas_height: f32,
    },
    /// Rewrite the starting poses with a deterministic scatter layout.
    Scatter {
        file: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        seed: Option<u32>,
        #[arg(long, default_value_t = 768.0)]
        canvas_width: f32,
        #[arg(long, default_value_t = 1024.0)]
        canvas_height: f32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Levels { command } => match command {
            LevelCommand::Show { file, kind } => {
                let level = read_level(&file)?;
                let filter = match kind.as_deref() {
                    Some(name) => Some(
                        kind_by_name(name)
                            .ok_or_else(|| format!("unknown piece kind {name:?}"))?,
                    ),
                    None => None,
                };
                print_summary(&level, filter);
            }
            LevelCommand::Validate { file } => {
                let level = read_level(&file)?;
                match level.validate() {
                    Ok(()) => println!("{}: ok", level.id),
                    Err(err) => {
                        eprintln!("{}: {err}", level.id);
                        std::process::exit(1);
                    }
                }
            }
            LevelCommand::Solve {
                file,
                canvas_width,
                canvas_height,
            } => {
                let level = read_level(&file)?;
                let solved = solve(level, canvas_width, canvas_height);
                if !solved {
                    std::process::exit(1);
                }
            }
            LevelCommand::Scatter {
                file,
                out,
                seed,
                canvas_width,
                canvas_height,
            } => {
                let level = read_level(&file)?;
                let seed = seed.unwrap_or_else(|| rand::rng().random());
                let scattered = scatter(level, seed, canvas_width, canvas_height)?;
                let bytes = encode_level(&scattered).ok_or("failed to encode level")?;
                fs::write(&out, bytes)?;
                println!("wrote {} (seed {seed})", out.display());
            }
        },
    }
    Ok(())
}

fn read_level(path: &PathBuf) -> Result<Level, Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;
    decode_level(&bytes).ok_or_else(|| format!("{} is not a level file", path.display()).into())
}

fn print_summary(level: &Level, filter: Option<PieceKind>) {
    let keep = |kind: PieceKind| filter.is_none_or(|wanted| wanted == kind);
    let difficulty = match level.difficulty {
        Difficulty::Easy => "easy",
        Difficulty::Medium => "medium",
        Difficulty::Hard => "hard",
    };
    println!("{} — {} ({difficulty})", level.id, level.name);
    let targets: Vec<_> = level
        .targets
        .iter()
        .filter(|target| keep(target.kind))
        .collect();
    println!("targets: {}", targets.len());
    for target in targets {
        println!(
            "  #{} {} at ({:.1}%, {:.1}%) rot {:.1}{}",
            target.id,
            target.kind.label(),
            target.x_pct,
            target.y_pct,
            target.rotation_deg,
            if target.mirrored { " mirrored" } else { "" },
        );
    }
    let pieces: Vec<_> = level
        .pieces
        .iter()
        .filter(|piece| keep(piece.kind))
        .collect();
    println!("pieces: {}", pieces.len());
    for piece in pieces {
        println!(
            "  #{} {} at ({:.1}%, {:.1}%) rot {:.1}",
            piece.id,
            piece.kind.label(),
            piece.x_pct,
            piece.y_pct,
            piece.rotation_deg,
        );
    }
}

/// Replays the level against the engine: each target gets the first free
/// piece of its kind dragged onto it.
fn solve(level: Level, canvas_width: f32, canvas_height: f32) -> bool {
    let canvas = CanvasSize::new(canvas_width, canvas_height);
    let mut session = Session::new(canvas, Mode::Play);
    if session.load_level(level).is_err() {
        eprintln!("level failed validation");
        return false;
    }

    let targets: Vec<_> = session
        .state()
        .targets
        .iter()
        .map(|target| (target.id, target.kind, target.transform))
        .collect();
    for (target_id, kind, transform) in targets {
        let Some((piece_id, rotation)) = session
            .state()
            .pieces
            .iter()
            .find(|piece| piece.kind == kind && piece.bound_target.is_none())
            .map(|piece| (piece.id, piece.transform.rotation_deg))
        else {
            eprintln!("no free piece for target #{target_id} ({})", kind.label());
            return false;
        };
        session.apply(CoreAction::BeginDrag { piece_id });
        session.apply(CoreAction::DragMove {
            piece_id,
            x: transform.x,
            y: transform.y,
        });
        session.apply(CoreAction::Rotate {
            piece_id,
            delta_deg: game::angle_delta(transform.rotation_deg, rotation),
        });
        session.apply(CoreAction::DragEnd { piece_id });
        for event in session.take_events() {
            debug!(?event, "solve step");
            if let CoreEvent::Snapped { piece_id, target_id } = event {
                println!("piece #{piece_id} -> target #{target_id}");
            }
        }
    }

    if session.is_complete() {
        println!("level completes");
        true
    } else {
        eprintln!("level did not complete");
        false
    }
}

fn scatter(
    level: Level,
    seed: u32,
    canvas_width: f32,
    canvas_height: f32,
) -> Result<Level, Box<dyn std::error::Error>> {
    let canvas = CanvasSize::new(canvas_width, canvas_height);
    let mut session = Session::new(canvas, Mode::Author);
    let (id, name, difficulty) = (level.id.clone(), level.name.clone(), level.difficulty);
    let tags: Vec<(u32, String)> = level
        .pieces
        .iter()
        .map(|piece| (piece.id, piece.color_tag.clone()))
        .collect();
    session.load_level(level)?;
    session.scatter(seed);
    let mut captured = session.capture_level(&id, &name, difficulty);
    // capture_level does not carry presentation hints; restore them.
    for piece in &mut captured.pieces {
        if let Some((_, tag)) = tags.iter().find(|(tag_id, _)| *tag_id == piece.id) {
            piece.color_tag = tag.clone();
        }
    }
    Ok(captured)
}

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use gridlock::{Board, Coordinate, Direction, OccupantKind, OverwriteBehavior, Pathfinder, only_empty};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    Fail,
    Swap,
    Replace,
    Push,
}

impl From<Policy> for OverwriteBehavior {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Fail => OverwriteBehavior::Fail,
            Policy::Swap => OverwriteBehavior::Swap,
            Policy::Replace => OverwriteBehavior::Replace,
            Policy::Push => OverwriteBehavior::Push,
        }
    }
}

fn parse_coordinate(s: &str) -> Result<Coordinate, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got `{}`", s))?;
    let x = x.trim().parse::<i32>().map_err(|e| format!("bad x `{}`: {}", x, e))?;
    let y = y.trim().parse::<i32>().map_err(|e| format!("bad y `{}`: {}", y, e))?;
    Ok(Coordinate::new(x, y))
}

#[derive(Parser)]
#[command(name = "gridlock")]
#[command(about = "Load a puzzle board, drive its player and find paths", long_about = None)]
struct Args {
    /// Path to the board file (one glyph per cell)
    #[arg(value_name = "FILE")]
    board_file: PathBuf,

    /// Moves for the first player, e.g. "RRUL" (U/D/L/R or N/S/E/W)
    #[arg(short, long)]
    moves: Option<String>,

    /// What a move does about occupied cells
    #[arg(short, long, value_enum, default_value = "push")]
    policy: Policy,

    /// Print an A* path from the player to this cell over empty cells
    #[arg(long, value_name = "X,Y", value_parser = parse_coordinate)]
    path: Option<Coordinate>,

    /// Allow diagonal steps when pathfinding
    #[arg(long, default_value = "false")]
    diagonal: bool,

    /// Maximum number of cells to expand before giving up on a path
    #[arg(short = 'n', long)]
    max_expansions: Option<usize>,

    /// Print the board after every move
    #[arg(long, default_value = "false")]
    print_steps: bool,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let text = match std::fs::read_to_string(&args.board_file) {
        Ok(text) => text,
        Err(e) => fail(format!("cannot read {}: {}", args.board_file.display(), e)),
    };
    let mut board = match Board::load_state(&text) {
        Ok(board) => board,
        Err(e) => fail(format!("cannot load board: {}", e)),
    };

    let player = board
        .find_objects_of_type(OccupantKind::Player)
        .first()
        .map(|&(id, _)| id);

    if let Some(ref moves) = args.moves {
        let Some(player) = player else {
            fail("the board has no player to move");
        };
        let policy = OverwriteBehavior::from(args.policy);
        let total = moves.chars().filter(|ch| !ch.is_whitespace()).count();

        println!("Starting position:\n{}", board);
        for (count, ch) in moves.chars().filter(|ch| !ch.is_whitespace()).enumerate() {
            let Some(direction) = Direction::from_char(ch) else {
                fail(format!("unknown move '{}'", ch));
            };
            let moved = board.move_by(player, direction, policy);
            if args.print_steps {
                println!(
                    "Move {} {} ({}/{}):\n{}",
                    direction,
                    if moved { "ok" } else { "blocked" },
                    count + 1,
                    total,
                    board
                );
            }
        }
    }

    println!("{}", board);

    if let Some(goal) = args.path {
        let Some(start) = player.and_then(|id| board.occupant(id)).map(|o| o.position()) else {
            fail("the board has no player to start a path from");
        };

        let mut finder = Pathfinder::new(&board).diagonal(args.diagonal);
        if let Some(limit) = args.max_expansions {
            finder = finder.max_expansions(limit);
        }

        match finder.find_path(start, goal, only_empty) {
            Some(path) => {
                let steps: Vec<String> = path.steps.iter().map(|pos| pos.to_string()).collect();
                println!("path: {} moves, cost {}", path.moves(), path.cost);
                println!("{}", steps.join(" -> "));
            }
            None => println!("path: none from {} to {}", start, goal),
        }
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use anstream::println;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use hrsw::Stopwatch;
use human_duration::human_duration;
use owo_colors::OwoColorize;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use thiserror::Error;

use puzzle_search::algorithms::BreadthFirstSearch;
use puzzle_search::algorithms::DepthFirstSearch;
use puzzle_search::error::InvalidConfiguration;
use puzzle_search::problems::peg_solitaire::GridPegSolitaireState;
use puzzle_search::problems::sliding_tile::SlidingTileState;
use puzzle_search::problems::word_ladder::Dictionary;
use puzzle_search::problems::word_ladder::DictionaryError;
use puzzle_search::problems::word_ladder::WordLadderState;
use puzzle_search::puzzle::Puzzle;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Depth-first, finds some solution
    Dfs,
    /// Breadth-first, finds a shortest solution
    Bfs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Peg solitaire. Rows separated by '/', '*' peg, '.' hole, '#' unused
    Peg {
        board: String,
        #[arg(long, default_value = "*.#")]
        markers: String,
    },
    /// Sliding tiles. Rows separated by '/', '*' is the empty cell
    Sliding { current: String, goal: String },
    /// Sliding tiles, scrambled from the goal with random moves
    Scramble {
        goal: String,
        #[arg(long, default_value_t = 20usize)]
        moves: usize,
        #[arg(long, default_value_t = 0u64)]
        seed: u64,
    },
    /// Word ladder over a newline-delimited word list
    Ladder {
        from: String,
        to: String,
        #[arg(short, long, env = "WORDS", default_value = "words.txt")]
        words: PathBuf,
    },
}

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(long_version = puzzle_search::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, value_enum, default_value_t = Strategy::Bfs)]
    strategy: Strategy,

    /// Let breadth-first search expand repeated states
    #[arg(long)]
    no_memoization: bool,

    /// Print memory stats after searching
    #[arg(long)]
    stats: bool,

    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

#[derive(Debug, Error)]
enum SolveError {
    #[error("Invalid puzzle: {0}")]
    InvalidConfiguration(#[from] InvalidConfiguration),
    #[error("{0}")]
    Dictionary(#[from] DictionaryError),
    #[error("I/O error: {0}")]
    IOError(#[from] std::io::Error),
}

fn solve<P: Puzzle>(args: &Args, start: P) -> std::io::Result<()> {
    println!("{}\n{start}\n", "Start".bold());

    let mut stopwatch = Stopwatch::new_started();
    let path = match args.strategy {
        Strategy::Dfs => {
            let mut search = DepthFirstSearch::new(start);
            let path = search.find_solution();
            stopwatch.stop();
            if args.stats {
                search.print_memory_stats()?;
            }
            path
        }
        Strategy::Bfs => {
            let mut search = BreadthFirstSearch::new(start).with_memoization(!args.no_memoization);
            let path = search.find_solution();
            stopwatch.stop();
            if args.stats {
                search.print_memory_stats()?;
            }
            path
        }
    };
    let elapsed = stopwatch.elapsed();

    match path {
        Some(path) => {
            println!(
                "Solved in {} using {:?}:\n\n{path}",
                human_duration(&elapsed).green(),
                args.strategy
            );
        }
        None => {
            println!(
                "{} after {} using {:?}",
                "No solution".red(),
                human_duration(&elapsed).yellow(),
                args.strategy
            );
        }
    }

    Ok(())
}

fn main() -> Result<(), SolveError> {
    env_logger::init();
    let args = Args::parse();
    args.color.write_global();

    match &args.command {
        Command::Peg { board, markers } => {
            let start = GridPegSolitaireState::parse(board, markers)?;
            solve(&args, start)?;
        }
        Command::Sliding { current, goal } => {
            let start = SlidingTileState::parse(current, goal)?;
            solve(&args, start)?;
        }
        Command::Scramble { goal, moves, seed } => {
            let goal = SlidingTileState::parse(goal, goal)?.goal().clone();
            let mut rng = ChaCha8Rng::seed_from_u64(*seed);
            let start =
                SlidingTileState::scrambled(goal, &SlidingTileState::EMPTY, *moves, &mut rng)?;
            solve(&args, start)?;
        }
        Command::Ladder { from, to, words } => {
            println!("Loading words from {}", words.display().yellow());
            let dictionary = Arc::new(Dictionary::load(words)?);
            solve(&args, WordLadderState::new(from.as_str(), to.as_str(), dictionary))?;
        }
    }

    Ok(())
}

//! Daily Puzzles Demo
//!
//! Plays every Mirror Maze level with the solver, breaks today's code,
//! posts both scores to an in-memory leaderboard and rotates the daily
//! puzzle.

use std::sync::Arc;
use std::time::Duration;
use anyhow::{bail, Context, Result};
use chrono::Utc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use daily_puzzles::{
    VERSION,
    config::AppConfig,
    core::clock::{Clock, ManualClock, SystemClock},
    codebreaker::{DailyCodeCache, GuessPolicy},
    maze::{replay_level, solve, LevelCatalog, MazeEngine, MazePhase, MoveOutcome},
    store::{Game, Leaderboard, MemoryStore, PuzzleSchedule},
};

/// Simulated time per move in the maze demo.
const MOVE_TIME: Duration = Duration::from_millis(400);

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Daily Puzzles v{}", VERSION);

    let config = AppConfig::from_env()?;
    let catalog = Arc::new(config.load_catalog().context("Failed to load level catalog")?);
    info!("Levels: {} | Advance delay: {:?}", catalog.len(), config.maze.advance_delay);

    let store = Arc::new(MemoryStore::new());
    let leaderboard = Leaderboard::new(Arc::clone(&store), SystemClock);

    let maze_moves = demo_maze(&config, Arc::clone(&catalog))?;
    let guesses = demo_code_breaker(&config.guess_policy)?;

    leaderboard.submit("demo", maze_moves, Game::MirrorMaze)?;
    leaderboard.submit("demo", guesses, Game::CodeBreaker)?;
    for game in [Game::MirrorMaze, Game::CodeBreaker] {
        for (rank, entry) in leaderboard.today(game)?.iter().enumerate() {
            info!("{} #{}: {} ({})", game.as_str(), rank + 1, entry.name, entry.moves);
        }
    }

    let schedule = PuzzleSchedule::new(Arc::clone(&store), SystemClock);
    schedule.add_puzzle(SystemClock.today(), catalog.first())?;
    if schedule.rotate()? {
        info!("Current puzzle: {}x{}", catalog.first().width, catalog.first().height);
    }

    Ok(())
}

/// Play the whole catalog on a simulated clock. Returns total moves.
fn demo_maze(config: &AppConfig, catalog: Arc<LevelCatalog>) -> Result<u32> {
    info!("=== Mirror Maze ===");

    let clock = Arc::new(ManualClock::new(Utc::now()));
    let mut engine = MazeEngine::new(Arc::clone(&catalog), Arc::clone(&clock), config.maze.clone());
    engine.start()?;

    loop {
        let level_index = engine.state().level_index;
        let solution = solve(engine.current_level())
            .with_context(|| format!("Level {} has no solution", level_index + 1))?;

        let replay = replay_level(level_index, engine.current_level(), &solution);
        info!(
            "Level {}: {} moves, final state {}",
            level_index + 1,
            solution.len(),
            &replay.digest_hex()[..16]
        );

        let mut last = MoveOutcome::Moved;
        for dir in solution {
            clock.advance(MOVE_TIME);
            last = engine.attempt_move(dir);
            if !last.is_accepted() {
                bail!("Solver move {:?} was rejected on level {}", dir, level_index + 1);
            }
        }

        match last {
            MoveOutcome::Completed { .. } => break,
            MoveOutcome::LevelWon { .. } => {
                clock.advance(config.maze.advance_delay);
                engine.poll()?;
            }
            _ => bail!("Level {} not won after its solution", level_index + 1),
        }
    }

    let events = engine.take_events();
    if let MazePhase::Completed { total } = engine.phase() {
        info!(
            "Run complete: {:.1}s, {} moves, {} events",
            total.as_secs_f64(),
            engine.total_moves(),
            events.len()
        );
    }

    Ok(engine.total_moves())
}

/// Break today's code in two guesses. Returns the guess count.
fn demo_code_breaker(policy: &GuessPolicy) -> Result<u32> {
    info!("=== Code Breaker ===");

    let cache = DailyCodeCache::new(SystemClock);
    let today = cache.today();
    info!("Code for {} generated", today.day);

    let mut guesses = 0;
    for input in ["01234".to_string(), today.code.to_string()] {
        guesses += 1;
        let result = cache.check(&input, policy)?;
        info!(
            "Guess {}: {} in place, {} misplaced",
            input, result.correct_position, result.correct_digit
        );
        if result.is_correct {
            break;
        }
    }

    Ok(guesses)
}

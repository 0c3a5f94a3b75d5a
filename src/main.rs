//! HATETRIS runner (default binary).
//!
//! Interactive play in the terminal by default. `--headless` verifies a
//! replay or autoplays a game and prints a JSON report instead.

use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event, KeyEventKind};
use log::debug;

use hatetris::core::{
    Config, Fitness, Hatetris, HolesAndHeight, Lovetris, PieceSelector, RotationSystem,
    SeededRandom, StackHeight, Timeline,
};
use hatetris::engine::autoplay;
use hatetris::input::{handle_key_event, should_quit};
use hatetris::report::GameReport;
use hatetris::term::{FrameBuffer, TerminalRenderer, Viewport, WellView};
use hatetris::types::{Command, TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Ai {
    /// Sends the worst piece for the player
    Hatetris,
    /// Sends the best piece for the player
    Lovetris,
    /// Seeded pseudo-random pieces
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FitnessKind {
    /// Stack height only
    Height,
    /// Stack height plus covered holes
    Holes,
}

#[derive(Parser, Debug)]
#[command(name = "hatetris", version, about)]
struct Args {
    /// Well width in cells (default: HATETRIS_WELL_WIDTH or 10).
    #[arg(long)]
    width: Option<u32>,

    /// Well depth in cells (default: HATETRIS_WELL_DEPTH or 20).
    #[arg(long)]
    depth: Option<u32>,

    /// Bar row; completed rows above it never clear (default: HATETRIS_BAR or 4).
    #[arg(long)]
    bar: Option<u32>,

    /// Delay between replay moves (default: HATETRIS_REPLAY_STEP_MS or 50).
    #[arg(long, value_name = "ms")]
    replay_step_ms: Option<u32>,

    /// Piece selector.
    #[arg(long, value_enum, default_value_t = Ai::Hatetris)]
    ai: Ai,

    /// Metric the selector and autoplay rank wells by.
    #[arg(long, value_enum, default_value_t = FitnessKind::Height)]
    fitness: FitnessKind,

    /// Seed for `--ai random`.
    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// Hex replay to load instead of starting a fresh game.
    #[arg(long)]
    replay: Option<String>,

    /// Print a JSON report instead of opening the terminal UI.
    #[arg(long)]
    headless: bool,

    /// With --headless: play the game with the placement planner.
    #[arg(long)]
    autoplay: bool,

    /// With --autoplay: stop after this many pieces.
    #[arg(long, default_value_t = 1000)]
    max_pieces: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.headless);

    let mut config = Config::from_env();
    if let Some(width) = args.width {
        config.well_width = width;
    }
    if let Some(depth) = args.depth {
        config.well_depth = depth;
    }
    if let Some(bar) = args.bar {
        config.bar = bar;
    }
    if let Some(step) = args.replay_step_ms {
        config.replay_step_ms = step;
    }
    debug!("config: {:?}", config);

    let rules = config.build_rules(RotationSystem::standard())?;
    let selector = make_selector(args.ai, args.fitness, args.seed);
    let mut timeline = Timeline::new(rules, selector).with_replay_step_ms(config.replay_step_ms);

    if args.headless {
        return run_headless(&args, &mut timeline);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run_interactive(&mut term, &mut timeline, args.replay.as_deref());

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// stderr logging would tear the alternate screen, so the terminal UI stays
/// silent unless RUST_LOG asks otherwise.
fn init_logging(headless: bool) {
    let default = if headless { "warn" } else { "off" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn make_fitness(kind: FitnessKind) -> Box<dyn Fitness> {
    match kind {
        FitnessKind::Height => Box::new(StackHeight),
        FitnessKind::Holes => Box::new(HolesAndHeight::default()),
    }
}

fn make_selector(ai: Ai, fitness: FitnessKind, seed: u32) -> Box<dyn PieceSelector> {
    match ai {
        Ai::Hatetris => Box::new(Hatetris::new(make_fitness(fitness))),
        Ai::Lovetris => Box::new(Lovetris::new(make_fitness(fitness))),
        Ai::Random => Box::new(SeededRandom { seed }),
    }
}

fn run_headless(args: &Args, timeline: &mut Timeline) -> Result<()> {
    if args.replay.is_none() && !args.autoplay {
        bail!("--headless needs --replay or --autoplay");
    }

    match &args.replay {
        Some(text) => {
            timeline.load_replay(text);
            let steps = timeline.run_replay_to_end();
            debug!("replayed {} moves", steps);
        }
        None => timeline.start(),
    }

    let mut report = None;
    if args.autoplay {
        let fitness = make_fitness(args.fitness);
        report = Some(autoplay(timeline, fitness.as_ref(), args.max_pieces)?);
    }

    let mut game = GameReport::from_timeline(timeline);
    if let Some(report) = &report {
        game = game.with_autoplay(report);
    }
    println!("{}", game.to_json()?);
    Ok(())
}

fn run_interactive(
    term: &mut TerminalRenderer,
    timeline: &mut Timeline,
    replay: Option<&str>,
) -> Result<()> {
    match replay {
        Some(text) => timeline.load_replay(text),
        None => timeline.start(),
    }

    let view = WellView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(timeline, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        apply_command(timeline, command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            timeline.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }

        // ignored inputs were already logged
        timeline.take_diagnostics();
    }
}

fn apply_command(timeline: &mut Timeline, command: Command) {
    let _ = match command {
        Command::Move(mv) => timeline.apply_move(mv),
        Command::Undo => timeline.undo(),
        Command::Redo => timeline.redo(),
        Command::NewGame => {
            timeline.start();
            Ok(())
        }
    };
}

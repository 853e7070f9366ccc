//! Terminal match-3 runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from the `term`
//! crate. Set `MATCH3_LOG=<file>` to write `tracing` output there (filtered
//! by `RUST_LOG`, default `warn`); stderr would corrupt the alternate screen.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_match3::cli::parse_args;
use tui_match3::core::{BoardEngine, BoardSnapshot};
use tui_match3::input::{handle_key_event, should_quit};
use tui_match3::term::{BoardView, FrameBuffer, PlayState, TerminalRenderer, Viewport};
use tui_match3::types::TICK_MS;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let run = parse_args(&args)?;
    init_logging()?;

    let config = run.board_config()?;
    let seed = run.seed.unwrap_or_else(clock_seed);
    info!(seed, width = config.width, height = config.height, "starting board");
    let engine = BoardEngine::new(config, seed)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = play(&mut term, engine);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("MATCH3_LOG") else {
        return Ok(());
    };
    let log_file = std::fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn play(term: &mut TerminalRenderer, mut engine: BoardEngine) -> Result<()> {
    let config = *engine.config();
    let mut state = PlayState::new(config.width, config.height);
    let view = BoardView::default();

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = BoardSnapshot::default();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        engine.snapshot_into(&mut snap);
        view.render_into(&snap, &state.overlay(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        state.apply_action(&mut engine, action)?;
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
            state.tick(&mut engine, elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }
}

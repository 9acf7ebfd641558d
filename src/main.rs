use std::collections::HashMap;
use std::env;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{error, info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use bullet_rain::clock::SystemClock;
use bullet_rain::config::GameConfig;
use bullet_rain::display::terminal::TerminalSurface;
use bullet_rain::game::Game;
use bullet_rain::input::{Action, KeyInput};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// Terminals without key-release reporting only send repeated presses.
/// A movement key counts as released once no press has arrived for this
/// long, which is longer than any OS key-repeat gap.
const HOLD_WINDOW: Duration = Duration::from_millis(120);

const DEFAULT_LOG_FILE: &str = "bullet_rain.log";

// ── Command line ──────────────────────────────────────────────────────────────

struct Options {
    seed: Option<u64>,
    log_file: String,
}

fn parse_args() -> Options {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut options = Options {
        seed: None,
        log_file: DEFAULT_LOG_FILE.to_string(),
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => options.seed = iter.next().and_then(|s| s.parse().ok()),
            "--log" => {
                if let Some(path) = iter.next() {
                    options.log_file = path.clone();
                }
            }
            other => eprintln!("ignoring unknown argument: {other}"),
        }
    }
    options
}

fn action_for(code: &KeyCode) -> Option<Action> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::MoveRight),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Game over is terminal: the loop keeps
/// drawing the final message until Q / Esc.
fn game_loop<W: Write>(
    surface: &mut TerminalSurface<W>,
    game: &mut Game<SystemClock, StdRng>,
    rx: &mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
) -> std::io::Result<()> {
    // Maps each held movement key → when it was last seen (press or repeat).
    let mut held: HashMap<Action, Instant> = HashMap::new();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
                    }
                    let Some(action) = action_for(&code) else {
                        continue;
                    };
                    match kind {
                        KeyEventKind::Press => {
                            held.insert(action, frame_start);
                            game.handle_input(KeyInput::Pressed(action));
                        }
                        // Refresh timestamp so key stays "held"
                        KeyEventKind::Repeat => {
                            held.insert(action, frame_start);
                        }
                        KeyEventKind::Release => {
                            held.remove(&action);
                            game.handle_input(KeyInput::Released(action));
                        }
                    }
                }
                Event::Resize(cols, rows) => surface.resize(cols, rows),
                _ => {}
            }
        }

        // Classic terminals never report releases: expire stale keys
        if !keyboard_enhanced {
            let expired: Vec<Action> = held
                .iter()
                .filter(|(_, seen)| frame_start.duration_since(**seen) > HOLD_WINDOW)
                .map(|(action, _)| *action)
                .collect();
            for action in expired {
                held.remove(&action);
                game.handle_input(KeyInput::Released(action));
            }
        }

        game.pump_timers();
        game.frame(surface)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let options = parse_args();
    simple_logging::log_to_file(&options.log_file, LevelFilter::Info)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    info!("keyboard release events: {keyboard_enhanced}");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, keyboard_enhanced, options.seed);
    if let Err(e) = &result {
        error!("terminal error: {e}");
    }

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
    seed: Option<u64>,
) -> std::io::Result<()> {
    let config = GameConfig::default();
    let (cols, rows) = terminal::size()?;
    let mut surface = TerminalSurface::new(out, cols, rows, config.field_width, config.field_height);

    let rng = match seed {
        Some(seed) => {
            info!("using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let mut game = Game::new(config, SystemClock::new(), rng);

    game_loop(&mut surface, &mut game, rx, keyboard_enhanced)?;

    let final_state = game.state();
    info!(
        "session ended: level {}, score {}",
        final_state.player.level, final_state.player.score
    );
    Ok(())
}

mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::info;

use display::Mood;
use kokaton_musou::config::Config;
use kokaton_musou::constants::{GAME_OVER_PAUSE, TICKS_PER_SECOND};
use kokaton_musou::driver::{Driver, Step};
use kokaton_musou::entities::GameStatus;
use kokaton_musou::error::GameResult;
use kokaton_musou::events::GameEvent;
use kokaton_musou::input::{Command, Keys, TickInput};
use kokaton_musou::logging;

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key counts as held if its last press/repeat event arrived within this
/// many frames.  Covers terminals that never report key releases: OS key
/// repeat runs at 15 Hz or more, so a window of 7 frames (140 ms at 50 Hz)
/// is always refreshed before it expires.
const HOLD_WINDOW: u64 = 7;

/// How long the player keeps cheering after a kill.
const CHEER_FRAMES: u32 = TICKS_PER_SECOND;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .is_some_and(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| is_held(key_frame, key, frame))
}

/// Snapshot of the held keys for this frame.
fn held_keys(key_frame: &HashMap<KeyCode, u64>, shift_space: bool, frame: u64) -> Keys {
    let bindings: [(Keys, &[KeyCode]); 6] = [
        (Keys::UP, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
        (Keys::DOWN, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
        (Keys::LEFT, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
        (Keys::RIGHT, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        (Keys::FIRE, &[KeyCode::Char(' ')]),
        (Keys::FAN, &[KeyCode::Char('z'), KeyCode::Char('Z')]),
    ];

    let mut held = Keys::empty();
    for (flag, codes) in bindings {
        if any_held(key_frame, codes, frame) {
            held |= flag;
        }
    }
    if shift_space && held.contains(Keys::FIRE) {
        held |= Keys::FAN;
    }
    held
}

/// One-shot commands bound to a key-down edge.
fn command_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(Command::Hyper),
        KeyCode::Enter => Some(Command::Gravity),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(Command::Emp),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(Command::Shield),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Whether Space is currently held with Shift.  Press and Repeat refresh it
/// from the modifiers; Release clears it.  Other keys leave it alone.
fn track_shift_space(current: bool, code: KeyCode, kind: KeyEventKind, modifiers: KeyModifiers) -> bool {
    if code != KeyCode::Char(' ') {
        return current;
    }
    match kind {
        KeyEventKind::Press | KeyEventKind::Repeat => modifiers.contains(KeyModifiers::SHIFT),
        KeyEventKind::Release => false,
    }
}

/// Input model: a `key_frame` map records the frame of the last press or
/// repeat event for every key.  Each frame the keys that are still fresh
/// make up the held set, while presses of command keys are queued once in
/// the order they arrived.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events, so keys drop out on release.
/// * **Classic terminals**: only `Press` events.  Keys expire after
///   `HOLD_WINDOW` frames of silence.
fn game_loop<W: Write>(out: &mut W, driver: &mut Driver, rx: &mpsc::Receiver<Event>) -> GameResult<()> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut shift_space = false;
    let mut cheer_frames: u32 = 0;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut commands = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code, kind, modifiers, ..
            }) = ev
            else {
                continue;
            };
            shift_space = track_shift_space(shift_space, code, kind, modifiers);
            match kind {
                KeyEventKind::Press => {
                    if let Some(command) = command_for(code, modifiers) {
                        commands.push(command);
                    }
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = TickInput::new(held_keys(&key_frame, shift_space, frame), commands);

        match driver.step(&input) {
            Step::Continue(events) => {
                if events.iter().any(GameEvent::is_enemy_kill) {
                    cheer_frames = CHEER_FRAMES;
                } else {
                    cheer_frames = cheer_frames.saturating_sub(1);
                }
                let mood = if cheer_frames > 0 {
                    Mood::Cheering
                } else {
                    Mood::Neutral
                };
                display::render(out, driver.state(), mood)?;
            }
            Step::Ended { status, score, .. } => {
                if status == GameStatus::GameOver {
                    display::render(out, driver.state(), Mood::Defeated)?;
                    info!(score, "final score");
                    thread::sleep(GAME_OVER_PAUSE);
                }
                return Ok(());
            }
        }

        thread::sleep(driver.remaining_budget(frame_start.elapsed()));
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> GameResult<()> {
    let config = Config::from_env()?;
    logging::init(&config)?;
    info!(seed = ?config.seed, "starting run");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Terminals without the kitty protocol fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the game loop never
    // blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut driver = Driver::new(config.seed);
    let result = game_loop(&mut out, &mut driver, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let state = driver.state();
    info!(tick = state.tick, score = state.score.value(), status = ?state.status, "run finished");
    result
}

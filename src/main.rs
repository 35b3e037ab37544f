mod display;

use std::collections::VecDeque;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use tracing::{error, info};

use display::Overlay;
use wonkey_kong::compute::World;
use wonkey_kong::config::GameConfig;
use wonkey_kong::entities::{Command, Sound, TickOutcome};
use wonkey_kong::level::{load_level, LevelError};
use wonkey_kong::session::Session;

/// How long a sound caption stays on screen.
const CAPTION_TICKS: u32 = 20;

// ── Input ─────────────────────────────────────────────────────────────────────

enum Key {
    Command(Command),
    Quit,
    Other,
}

fn classify(KeyEvent { code, modifiers, .. }: KeyEvent) -> Key {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Key::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Key::Quit,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Command(Command::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Command(Command::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Key::Command(Command::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Key::Command(Command::Down),
        KeyCode::Char(' ') => Key::Command(Command::Jump),
        KeyCode::Tab | KeyCode::Char('x') | KeyCode::Char('X') => Key::Command(Command::Action),
        _ => Key::Other,
    }
}

/// Commands waiting for a tick. Only the most recent presses are kept, so
/// key auto-repeat cannot build up a backlog that outlives the key.
struct InputQueue {
    pending: VecDeque<Command>,
}

impl InputQueue {
    const CAPACITY: usize = 2;

    fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(Self::CAPACITY),
        }
    }

    fn push(&mut self, command: Command) {
        if self.pending.len() == Self::CAPACITY {
            let _ = self.pending.pop_front();
        }
        self.pending.push_back(command);
    }

    fn pop(&mut self) -> Option<Command> {
        self.pending.pop_front()
    }
}

// ── Level loop ───────────────────────────────────────────────────────────────

enum LevelEnd {
    Quit,
    LifeLost,
    Completed,
}

/// Play one life on the current level.
///
/// Key presses are queued as they arrive and the world consumes at most
/// one of them per tick. A quick double press (turn, then walk) survives;
/// a held key does not keep the player moving after release.
fn play_level<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    world: &mut World,
    session: &mut Session,
    rng: &mut StdRng,
    tick: Duration,
) -> anyhow::Result<LevelEnd> {
    let mut pending = InputQueue::new();
    let mut caption: Option<(Sound, u32)> = None;

    loop {
        let tick_start = Instant::now();

        // ── Drain pending input events (non-blocking) ─────────────────────────
        while let Ok(event) = rx.try_recv() {
            let Event::Key(key) = event else { continue };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match classify(key) {
                Key::Quit => return Ok(LevelEnd::Quit),
                Key::Command(command) => pending.push(command),
                Key::Other => {}
            }
        }

        let outcome = world.step(session, pending.pop(), rng);

        for sound in world.drain_sounds() {
            if matches!(sound, Sound::PlayerDie | Sound::FinishedLevel) {
                // Terminal bell stands in for the louder effects.
                out.write_all(b"\x07")?;
            }
            caption = Some((sound, CAPTION_TICKS));
        }
        caption = caption.and_then(|(sound, ticks)| ticks.checked_sub(1).map(|t| (sound, t)));

        display::render(out, world, session, caption.map(|(sound, _)| sound), None)?;

        match outcome {
            TickOutcome::Continue => {}
            TickOutcome::LifeLost => return Ok(LevelEnd::LifeLost),
            TickOutcome::LevelComplete => return Ok(LevelEnd::Completed),
        }

        let elapsed = tick_start.elapsed();
        if elapsed < tick {
            thread::sleep(tick - elapsed);
        }
    }
}

/// Show the final overlay and wait for any key.
fn show_final<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    world: &World,
    session: &Session,
    overlay: Overlay,
) -> anyhow::Result<()> {
    display::render(out, world, session, None, Some(overlay))?;
    while let Ok(event) = rx.recv() {
        if let Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            ..
        }) = event
        {
            break;
        }
    }
    Ok(())
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> anyhow::Result<()> {
    let mut rng = config.rng();
    let mut session = Session::new(config.start_level, config.lives);
    let mut last_world: Option<World> = None;

    loop {
        let map = match load_level(&config.levels_dir, session.level) {
            Ok(map) => map,
            Err(LevelError::NotFound { .. }) => {
                info!(score = session.score, "all levels cleared");
                if let Some(world) = &last_world {
                    show_final(out, rx, world, &session, Overlay::Victory)?;
                }
                return Ok(());
            }
            Err(err) => {
                error!(level = session.level, error = %err, "level integrity error");
                return Err(anyhow::Error::new(err)
                    .context(format!("level {} cannot be played", session.level)));
            }
        };

        let mut world = World::from_level(&map, &mut rng);
        let end = play_level(out, rx, &mut world, &mut session, &mut rng, config.tick())?;
        match end {
            LevelEnd::Quit => return Ok(()),
            LevelEnd::LifeLost => {
                if session.apply(TickOutcome::LifeLost) {
                    info!(score = session.score, "game over");
                    show_final(out, rx, &world, &session, Overlay::GameOver)?;
                    return Ok(());
                }
            }
            LevelEnd::Completed => {
                let _ = session.apply(TickOutcome::LevelComplete);
            }
        }
        last_world = Some(world);
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_tracing(config: &GameConfig) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = GameConfig::parse();
    init_tracing(&config)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

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

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

//! Emoji Tetris terminal runner (default binary).
//!
//! Wires crossterm input through the action dispatcher into a game session,
//! advances it with the fixed-step loop, and draws it with the framebuffer
//! renderer. Configuration comes from `EMOJI_TETRIS_*` environment variables
//! (see [`AppConfig`]).

use std::cell::RefCell;
use std::fs::File;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use emoji_tetris::core::{
    EventLog, FixedStepLoop, GameSession, LoopConfig, RenderSnapshot, SessionConfig,
    SkinCatalog,
};
use emoji_tetris::input::{handle_key_event, should_quit, ActionDispatcher, DispatcherConfig};
use emoji_tetris::settings::{
    HighScoreRecorder, Settings, SettingsStore, SkinManifest, SoundManifest,
};
use emoji_tetris::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use emoji_tetris::types::{ActionEdge, GameAction, GameStatus};
use emoji_tetris::AppConfig;

/// Held keys are released after this long without a repeat event.
const AUTO_RELEASE_MS: u32 = 150;

/// Redraw rate for paused/idle/game-over screens.
const STATIC_FRAME_MS: u64 = 250;

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        log::error!("exiting with error: {err:#}");
    }
    result
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_skins(config: &AppConfig) -> SkinCatalog {
    let Some(path) = &config.skins_manifest else {
        return SkinCatalog::builtin();
    };
    match SkinManifest::load(path) {
        Ok(manifest) => {
            let catalog = manifest.to_catalog();
            log::info!("loaded {} skins from {}", catalog.len(), path.display());
            catalog
        }
        Err(err) => {
            log::warn!("skin manifest unavailable: {err:#}");
            SkinCatalog::builtin()
        }
    }
}

fn load_sounds(config: &AppConfig) -> SoundManifest {
    let Some(path) = &config.sounds_manifest else {
        return SoundManifest::default();
    };
    SoundManifest::load(path).unwrap_or_else(|err| {
        log::warn!("sound manifest unavailable: {err:#}");
        SoundManifest::default()
    })
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

/// Hand sound cues to the host's audio layer. The terminal build has no
/// audio output, so cues with a matching sound are only logged.
fn play_cues(events: &mut EventLog, sounds: &SoundManifest, settings: &Settings) {
    for event in events.drain() {
        let Some(cue) = event.sound_cue() else {
            continue;
        };
        if let Some(sound) = sounds.get(cue.as_str()) {
            let gain = settings.effective_sound_volume(&sound.name) * sound.volume;
            log::debug!("cue {} -> {} at {gain:.2}", cue.as_str(), sound.filename);
        }
    }
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let store = SettingsStore::new(config.settings_path.clone());
    let settings = store.load();
    let sounds = load_sounds(config);

    let seed = config.seed.unwrap_or_else(clock_seed);
    let mut session = GameSession::new(
        SessionConfig {
            seed,
            high_score: settings.high_score,
        },
        load_skins(config),
    );
    let events = Rc::new(RefCell::new(EventLog::new()));
    session.add_observer(Box::new(events.clone()));
    let recorder = Rc::new(RefCell::new(HighScoreRecorder::new(
        store.clone(),
        settings.high_score,
    )));
    session.add_observer(Box::new(recorder.clone()));

    let auto_release_ms = if term.reports_key_release() {
        None
    } else {
        Some(AUTO_RELEASE_MS)
    };
    let mut dispatcher = ActionDispatcher::new(DispatcherConfig { auto_release_ms });
    let mut game_loop = FixedStepLoop::new(LoopConfig {
        constrained: config.low_power,
    });

    let frame_period = if config.low_power {
        Duration::from_millis(33)
    } else {
        Duration::from_millis(16)
    };

    let view = GameView::default();
    let mut throttle = RenderThrottle::new(STATIC_FRAME_MS);
    let mut snapshot = RenderSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut viewport = Viewport::new(0, 0);

    let started = Instant::now();
    let mut next_frame = Instant::now();

    loop {
        // Input until the next frame is due.
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            let now_ms = started.elapsed().as_millis() as u64;
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        recorder.borrow_mut().flush();
                        return Ok(());
                    }
                    if let Some((action, edge)) = handle_key_event(key) {
                        match edge {
                            ActionEdge::Press if session.status() == GameStatus::Idle => {
                                session.start();
                            }
                            ActionEdge::Press => {
                                dispatcher.key_down(action, now_ms, &mut session);
                                if action == GameAction::Restart {
                                    recorder.borrow_mut().flush();
                                    game_loop.reset();
                                }
                            }
                            ActionEdge::Release => {
                                dispatcher.release(action, now_ms, &mut session);
                            }
                        }
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
            continue;
        }

        next_frame = (next_frame + frame_period).max(Instant::now());
        let now = started.elapsed();
        let now_ms = now.as_millis() as u64;

        dispatcher.update(now_ms, &mut session);
        game_loop.frame(now.as_secs_f64() * 1000.0, &mut session);
        play_cues(&mut events.borrow_mut(), &sounds, &settings);

        session.snapshot_into(&mut snapshot);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let size = Viewport::new(w, h);
        if size != viewport {
            viewport = size;
            throttle.invalidate();
        }
        if throttle.should_render_snapshot(now_ms, &snapshot) {
            view.render_into(&snapshot, session.skins(), now_ms, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }
    }
}

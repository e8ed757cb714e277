use emoji_tetris::core::{GameSession, SessionConfig, SkinCatalog};
use emoji_tetris::term::{snapshot_fingerprint, RenderThrottle};
use emoji_tetris::types::GameAction;

#[test]
fn render_throttle_renders_first_frame() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
}

#[test]
fn render_throttle_static_throttles_when_unchanged() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
    assert!(!t.should_render(10, 1, true));
    assert!(!t.should_render(249, 1, true));
    assert!(t.should_render(250, 1, true));
}

#[test]
fn render_throttle_follows_session_state() {
    let mut session = GameSession::new(SessionConfig::default(), SkinCatalog::builtin());
    session.start();
    let mut t = RenderThrottle::new(250);

    // Playing: every frame renders.
    assert!(t.should_render_snapshot(0, &session.snapshot()));
    assert!(t.should_render_snapshot(16, &session.snapshot()));

    // Paused: the first paused frame differs, then it is throttled.
    session.apply_action(GameAction::Pause);
    assert!(t.should_render_snapshot(32, &session.snapshot()));
    assert!(!t.should_render_snapshot(48, &session.snapshot()));

    // Pausing does not touch the board, so only the status changes the fingerprint.
    let paused = session.snapshot();
    session.apply_action(GameAction::Pause);
    assert_ne!(snapshot_fingerprint(&paused), snapshot_fingerprint(&session.snapshot()));
}

//! Key mapping from terminal events to game actions.

use crate::types::{ActionEdge, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key code to a game action.
pub fn action_for_key(code: KeyCode) -> Option<GameAction> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameAction::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameAction::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameAction::MoveDown)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char(' ')
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameAction::Rotate),

        // Actions
        KeyCode::Enter => Some(GameAction::HardDrop),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(GameAction::SoftDropStart),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::Hold),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(GameAction::Pause),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Map keyboard input to a game action and its edge.
///
/// Terminal auto-repeat events count as presses.
pub fn handle_key_event(key: KeyEvent) -> Option<(GameAction, ActionEdge)> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    let action = action_for_key(key.code)?;
    let edge = match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => ActionEdge::Press,
        KeyEventKind::Release => ActionEdge::Release,
    };
    Some((action, edge))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> Option<(GameAction, ActionEdge)> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(press(KeyCode::Left), Some((GameAction::MoveLeft, ActionEdge::Press)));
        assert_eq!(press(KeyCode::Right), Some((GameAction::MoveRight, ActionEdge::Press)));
        assert_eq!(press(KeyCode::Down), Some((GameAction::MoveDown, ActionEdge::Press)));

        assert_eq!(action_for_key(KeyCode::Char('H')), Some(GameAction::MoveLeft));
        assert_eq!(action_for_key(KeyCode::Char('L')), Some(GameAction::MoveRight));
        assert_eq!(action_for_key(KeyCode::Char('J')), Some(GameAction::MoveDown));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(action_for_key(KeyCode::Up), Some(GameAction::Rotate));
        assert_eq!(action_for_key(KeyCode::Char(' ')), Some(GameAction::Rotate));
        assert_eq!(action_for_key(KeyCode::Char('W')), Some(GameAction::Rotate));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(action_for_key(KeyCode::Enter), Some(GameAction::HardDrop));
        assert_eq!(action_for_key(KeyCode::Char('c')), Some(GameAction::Hold));
        assert_eq!(action_for_key(KeyCode::Char('p')), Some(GameAction::Pause));
        assert_eq!(action_for_key(KeyCode::Esc), Some(GameAction::Pause));
        assert_eq!(action_for_key(KeyCode::Char('x')), Some(GameAction::SoftDropStart));
        assert_eq!(action_for_key(KeyCode::Char('r')), Some(GameAction::Restart));
        assert_eq!(action_for_key(KeyCode::Char('?')), None);
    }

    #[test]
    fn test_release_and_repeat_edges() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(
            handle_key_event(release),
            Some((GameAction::MoveLeft, ActionEdge::Release))
        );

        let repeat = KeyEvent {
            kind: KeyEventKind::Repeat,
            ..release
        };
        assert_eq!(
            handle_key_event(repeat),
            Some((GameAction::MoveLeft, ActionEdge::Press))
        );
    }

    #[test]
    fn test_ctrl_c_is_not_hold() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key), None);
        assert!(should_quit(key));
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}

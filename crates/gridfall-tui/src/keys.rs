use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use gridfall_engine::{Button, ButtonSnapshot};

/// Tracks which logical buttons are held, from key press/release events.
///
/// When the terminal reports key releases, a button stays down for as long
/// as its key is physically held. Terminals without the enhancement protocol
/// only report presses; until the first release is seen, each press counts
/// as held for exactly one tick so taps still register.
#[derive(Debug, Default)]
pub struct KeyTracker {
    snapshot: ButtonSnapshot,
    saw_release: bool,
}

impl KeyTracker {
    pub fn handle_key(&mut self, event: KeyEvent) {
        let Some(button) = map_key(event.code) else {
            return;
        };
        match event.kind {
            KeyEventKind::Press => self.snapshot.set_down(button, true),
            KeyEventKind::Release => {
                self.saw_release = true;
                self.snapshot.set_down(button, false);
            }
            KeyEventKind::Repeat => {}
        }
    }

    /// Button state for the next simulation tick.
    pub fn tick_snapshot(&mut self) -> ButtonSnapshot {
        let snapshot = self.snapshot;
        if !self.saw_release {
            self.snapshot = ButtonSnapshot::default();
        }
        snapshot
    }
}

fn map_key(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::Char('w') | KeyCode::Up => Some(Button::W),
        KeyCode::Char('a') | KeyCode::Left => Some(Button::A),
        KeyCode::Char('s') | KeyCode::Down => Some(Button::S),
        KeyCode::Char('d') | KeyCode::Right => Some(Button::D),
        KeyCode::Char('j') | KeyCode::Char('z') => Some(Button::J),
        KeyCode::Char('l') | KeyCode::Char('x') => Some(Button::L),
        KeyCode::Char('r') => Some(Button::R),
        KeyCode::Char(' ') => Some(Button::Space),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn test_release_aware_terminal_holds_buttons() {
        let mut tracker = KeyTracker::default();
        tracker.handle_key(key(KeyCode::Char('a'), KeyEventKind::Press));
        tracker.handle_key(key(KeyCode::Char('a'), KeyEventKind::Release));
        tracker.handle_key(key(KeyCode::Char('a'), KeyEventKind::Press));

        // A release has been seen, so the button stays down across ticks.
        assert!(tracker.tick_snapshot().is_down(Button::A));
        assert!(tracker.tick_snapshot().is_down(Button::A));
    }

    #[test]
    fn test_press_only_terminal_clears_each_tick() {
        let mut tracker = KeyTracker::default();
        tracker.handle_key(key(KeyCode::Char('w'), KeyEventKind::Press));

        assert!(tracker.tick_snapshot().is_down(Button::W));
        assert!(!tracker.tick_snapshot().is_down(Button::W));
    }

    #[test]
    fn test_arrow_keys_alias_movement() {
        let mut tracker = KeyTracker::default();
        tracker.handle_key(key(KeyCode::Left, KeyEventKind::Press));
        tracker.handle_key(key(KeyCode::Down, KeyEventKind::Press));

        let snapshot = tracker.tick_snapshot();
        assert!(snapshot.is_down(Button::A));
        assert!(snapshot.is_down(Button::S));
    }
}

//! Keyboard Mapping
//!
//! Maps key presses to control events. Frontends translate their native key
//! codes to a character before calling in, which keeps this module free of
//! any windowing dependency.

use super::actions::ControlEvent;

/// Map a pressed key to a control event.
///
/// - `R`: restart
/// - `P` / space: toggle pause
pub fn map_key_to_event(key: char, pressed: bool) -> Option<ControlEvent> {
    if !pressed {
        return None;
    }
    match key.to_ascii_lowercase() {
        'r' => Some(ControlEvent::Restart),
        'p' | ' ' => Some(ControlEvent::TogglePause),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key_to_event('R', true), Some(ControlEvent::Restart));
        assert_eq!(map_key_to_event('p', true), Some(ControlEvent::TogglePause));
        assert_eq!(map_key_to_event(' ', true), Some(ControlEvent::TogglePause));
        assert_eq!(map_key_to_event('r', false), None);
        assert_eq!(map_key_to_event('w', true), None);
    }
}

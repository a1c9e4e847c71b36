//! Scripted keyboard input for headless runs
//!
//! Key events are keyed by physics tick so a run is fully deterministic.

use hopper_game::InputHandler;
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// One key going down or up at a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptEvent {
    pub tick: u64,
    pub key: KeyCode,
    pub pressed: bool,
}

impl ScriptEvent {
    pub fn press(tick: u64, key: KeyCode) -> Self {
        Self {
            tick,
            key,
            pressed: true,
        }
    }

    pub fn release(tick: u64, key: KeyCode) -> Self {
        Self {
            tick,
            key,
            pressed: false,
        }
    }
}

/// Key events sorted by tick
#[derive(Debug, Clone)]
pub struct InputScript {
    events: Vec<ScriptEvent>,
}

impl InputScript {
    pub fn new(mut events: Vec<ScriptEvent>) -> Self {
        events.sort_by_key(|e| e.tick);
        Self { events }
    }

    /// Feed every event scheduled for `tick` into the handler
    pub fn apply(&self, tick: u64, handler: &mut InputHandler) -> usize {
        let start = self.events.partition_point(|e| e.tick < tick);
        let due = self.events[start..]
            .iter()
            .take_while(|e| e.tick == tick)
            .collect::<Vec<_>>();

        for event in &due {
            let state = if event.pressed {
                ElementState::Pressed
            } else {
                ElementState::Released
            };
            handler.handle_keyboard(PhysicalKey::Code(event.key), state);
        }
        due.len()
    }

    /// Tick of the last event
    pub fn last_tick(&self) -> u64 {
        self.events.last().map_or(0, |e| e.tick)
    }
}

impl Default for InputScript {
    /// Walk right, sprint, tap-hop, full jump, then turn around and stop
    fn default() -> Self {
        Self::new(vec![
            ScriptEvent::press(30, KeyCode::KeyD),
            ScriptEvent::press(90, KeyCode::ShiftLeft),
            ScriptEvent::press(150, KeyCode::Space),
            ScriptEvent::release(152, KeyCode::Space),
            ScriptEvent::press(210, KeyCode::Space),
            ScriptEvent::release(270, KeyCode::Space),
            ScriptEvent::release(300, KeyCode::ShiftLeft),
            ScriptEvent::release(330, KeyCode::KeyD),
            ScriptEvent::press(330, KeyCode::KeyA),
            ScriptEvent::release(450, KeyCode::KeyA),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hopper_game::InputAction;

    #[test]
    fn test_events_sorted_and_applied_by_tick() {
        let script = InputScript::new(vec![
            ScriptEvent::release(5, KeyCode::Space),
            ScriptEvent::press(2, KeyCode::Space),
        ]);
        let mut handler = InputHandler::new();

        assert_eq!(script.apply(1, &mut handler), 0);
        assert_eq!(script.apply(2, &mut handler), 1);
        assert!(handler.state.is_just_pressed(InputAction::Jump));

        handler.end_frame();
        assert_eq!(script.apply(5, &mut handler), 1);
        assert!(handler.state.is_just_released(InputAction::Jump));
        assert_eq!(script.last_tick(), 5);
    }

    #[test]
    fn test_default_script_turns_around() {
        let script = InputScript::default();
        let mut handler = InputHandler::new();
        for tick in 0..=330 {
            script.apply(tick, &mut handler);
            handler.end_frame();
        }
        assert!(handler.state.is_held(InputAction::MoveLeft));
        assert!(!handler.state.is_held(InputAction::MoveRight));
        assert!(!handler.state.is_held(InputAction::Sprint));
    }
}

use bevy::input::touch::TouchPhase;
use bevy::prelude::*;
use bevy::window::WindowEvent;

use crate::app::state::SceneState;
use crate::core::system::system_order::InputSamplingSet;
use crate::interaction::input::mailbox::{InputSource, PointerInput, PointerMailbox};

pub struct InputSamplingPlugin;

impl Plugin for InputSamplingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WindowEvent>().add_systems(
            Update,
            sample_pointer_events
                .in_set(InputSamplingSet)
                .run_if(in_state(SceneState::Mounted)),
        );
    }
}

/// Map a touch phase of the primary finger to a mailbox input.
pub fn touch_to_input(phase: TouchPhase, position: Vec2) -> PointerInput {
    match phase {
        TouchPhase::Started | TouchPhase::Moved => PointerInput::Moved {
            position,
            source: InputSource::Touch,
        },
        TouchPhase::Ended | TouchPhase::Canceled => PointerInput::TouchLifted,
    }
}

/// Fold this frame's window events into the mailbox in arrival order, so a
/// move after a cursor-leave in the same frame still wins. Only the first
/// finger down is followed; others are ignored until it lifts.
pub fn sample_pointer_events(
    mut mailbox: ResMut<PointerMailbox>,
    mut primary_touch: Local<Option<u64>>,
    mut events: EventReader<WindowEvent>,
) {
    fold_window_events(&mut mailbox, &mut primary_touch, events.read());
}

pub fn fold_window_events<'a>(
    mailbox: &mut PointerMailbox,
    primary_touch: &mut Option<u64>,
    events: impl IntoIterator<Item = &'a WindowEvent>,
) {
    for ev in events {
        let input = match ev {
            WindowEvent::CursorMoved(m) => PointerInput::Moved {
                position: m.position,
                source: InputSource::Mouse,
            },
            WindowEvent::CursorLeft(_) => PointerInput::CursorLeft,
            WindowEvent::TouchInput(touch) => {
                match *primary_touch {
                    None if touch.phase == TouchPhase::Started => *primary_touch = Some(touch.id),
                    Some(id) if id == touch.id => {}
                    _ => continue,
                }
                let input = touch_to_input(touch.phase, touch.position);
                if input == PointerInput::TouchLifted {
                    *primary_touch = None;
                }
                input
            }
            _ => continue,
        };
        mailbox.apply(input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::input::touch::TouchInput;
    use bevy::window::{CursorLeft, CursorMoved};
    use crate::interaction::input::mailbox::PointerSample;

    fn moved(x: f32, y: f32) -> WindowEvent {
        WindowEvent::CursorMoved(CursorMoved {
            window: Entity::PLACEHOLDER,
            position: Vec2::new(x, y),
            delta: None,
        })
    }

    fn left() -> WindowEvent {
        WindowEvent::CursorLeft(CursorLeft {
            window: Entity::PLACEHOLDER,
        })
    }

    fn touch(id: u64, phase: TouchPhase, x: f32) -> WindowEvent {
        WindowEvent::TouchInput(TouchInput {
            phase,
            position: Vec2::new(x, 0.0),
            window: Entity::PLACEHOLDER,
            force: None,
            id,
        })
    }

    #[test]
    fn reentry_after_leave_in_one_frame_keeps_the_move() {
        let mut mailbox = PointerMailbox::default();
        let mut primary = None;
        fold_window_events(&mut mailbox, &mut primary, &[moved(5.0, 5.0), left(), moved(40.0, 30.0)]);
        assert_eq!(
            mailbox.latest(),
            PointerSample::Screen {
                position: Vec2::new(40.0, 30.0),
                source: InputSource::Mouse
            }
        );
        fold_window_events(&mut mailbox, &mut primary, &[moved(1.0, 1.0), left()]);
        assert_eq!(mailbox.latest(), PointerSample::Absent);
    }

    #[test]
    fn second_finger_ignored_until_primary_lifts() {
        let mut mailbox = PointerMailbox::default();
        let mut primary = None;
        fold_window_events(
            &mut mailbox,
            &mut primary,
            &[
                touch(1, TouchPhase::Started, 10.0),
                touch(2, TouchPhase::Started, 99.0),
                touch(2, TouchPhase::Ended, 99.0),
            ],
        );
        assert_eq!(primary, Some(1));
        assert!(matches!(
            mailbox.latest(),
            PointerSample::Screen { position, .. } if position.x == 10.0
        ));
        fold_window_events(&mut mailbox, &mut primary, &[touch(1, TouchPhase::Canceled, 10.0)]);
        assert_eq!(primary, None);
        assert_eq!(mailbox.latest(), PointerSample::Absent);
        assert_eq!(mailbox.last_source(), InputSource::Touch);
    }
}

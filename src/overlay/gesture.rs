//! Touch gesture state machine.
//!
//! Only a sequence that is touched with exactly one finger draws. Any moment
//! with two or more fingers belongs to the platform (pinch, scroll) and the
//! machine steps aside: it neither suppresses default handling nor emits.
//! A second finger joining mid-stroke aborts the stroke without a
//! `stroke_finished_event`.

use crate::overlay::layout::LayoutRect;
use crate::overlay::messages::OutboundMessage;
use crate::overlay::viewport::to_normalized;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// An active touch in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    /// Every touch currently on the surface, primary first.
    pub touches: Vec<TouchPoint>,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, touches: Vec<TouchPoint>) -> Self {
        Self { phase, touches }
    }

    pub fn single(phase: TouchPhase, x: f64, y: f64) -> Self {
        Self::new(phase, vec![TouchPoint { x, y }])
    }

    fn single_touch(&self) -> Option<TouchPoint> {
        match self.touches.as_slice() {
            [touch] => Some(*touch),
            _ => None,
        }
    }

    fn is_multi_touch(&self) -> bool {
        self.touches.len() >= 2
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureOutcome {
    pub next: GestureState,
    /// Whether the platform's default handling of this touch must be
    /// suppressed.
    pub suppress_default: bool,
    pub message: Option<OutboundMessage>,
}

impl GestureOutcome {
    fn stay(state: GestureState) -> Self {
        Self {
            next: state,
            suppress_default: false,
            message: None,
        }
    }

    fn abort() -> Self {
        Self::stay(GestureState::Idle)
    }
}

/// One transition of the gesture machine. `surface` is the drawing surface's
/// current page box.
pub fn step(state: GestureState, event: &TouchEvent, surface: LayoutRect) -> GestureOutcome {
    match (state, event.phase) {
        (_, TouchPhase::Start) => start_stroke(state, event, surface),
        (GestureState::Drawing, TouchPhase::Move) => continue_stroke(event, surface),
        (GestureState::Idle, TouchPhase::Move) => GestureOutcome::stay(GestureState::Idle),
        (GestureState::Drawing, TouchPhase::End | TouchPhase::Cancel) => GestureOutcome {
            next: GestureState::Idle,
            suppress_default: false,
            message: Some(OutboundMessage::StrokeFinished),
        },
        (GestureState::Idle, TouchPhase::End | TouchPhase::Cancel) => {
            GestureOutcome::stay(GestureState::Idle)
        }
    }
}

fn start_stroke(state: GestureState, event: &TouchEvent, surface: LayoutRect) -> GestureOutcome {
    let Some(touch) = event.single_touch() else {
        if state == GestureState::Drawing && event.is_multi_touch() {
            tracing::debug!(touches = event.touches.len(), "stroke aborted by extra touch");
            return GestureOutcome::abort();
        }
        return GestureOutcome::stay(state);
    };

    match to_normalized(surface, (touch.x, touch.y)).in_range() {
        Some(point) => GestureOutcome {
            next: GestureState::Drawing,
            suppress_default: true,
            message: Some(OutboundMessage::stroke_point(point, true)),
        },
        None => {
            tracing::debug!(x = touch.x, y = touch.y, "stroke start outside surface dropped");
            GestureOutcome {
                next: GestureState::Idle,
                suppress_default: true,
                message: None,
            }
        }
    }
}

fn continue_stroke(event: &TouchEvent, surface: LayoutRect) -> GestureOutcome {
    let Some(touch) = event.single_touch() else {
        if event.is_multi_touch() {
            tracing::debug!(touches = event.touches.len(), "stroke aborted by extra touch");
            return GestureOutcome::abort();
        }
        return GestureOutcome::stay(GestureState::Drawing);
    };

    GestureOutcome {
        next: GestureState::Drawing,
        suppress_default: true,
        message: to_normalized(surface, (touch.x, touch.y))
            .in_range()
            .map(|point| OutboundMessage::stroke_point(point, false)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::messages::DrawEvent;

    const SURFACE: LayoutRect = LayoutRect::new(100.0, 50.0, 200.0, 100.0);

    fn two_fingers(phase: TouchPhase) -> TouchEvent {
        TouchEvent::new(
            phase,
            vec![
                TouchPoint { x: 150.0, y: 80.0 },
                TouchPoint { x: 250.0, y: 120.0 },
            ],
        )
    }

    #[test]
    fn single_touch_start_in_range_begins_stroke() {
        let outcome = step(
            GestureState::Idle,
            &TouchEvent::single(TouchPhase::Start, 200.0, 100.0),
            SURFACE,
        );
        assert_eq!(outcome.next, GestureState::Drawing);
        assert!(outcome.suppress_default);
        assert_eq!(
            outcome.message,
            Some(OutboundMessage::Draw(DrawEvent {
                x: 0.5,
                y: 0.5,
                new_stroke: true
            }))
        );
    }

    #[test]
    fn multi_touch_start_is_left_to_the_platform() {
        let outcome = step(GestureState::Idle, &two_fingers(TouchPhase::Start), SURFACE);
        assert_eq!(outcome, GestureOutcome::stay(GestureState::Idle));
    }

    #[test]
    fn start_outside_surface_never_begins_stroke() {
        let outcome = step(
            GestureState::Idle,
            &TouchEvent::single(TouchPhase::Start, 10.0, 10.0),
            SURFACE,
        );
        assert_eq!(outcome.next, GestureState::Idle);
        assert_eq!(outcome.message, None);
    }

    #[test]
    fn restart_outside_surface_while_drawing_drops_to_idle_without_finish() {
        let outcome = step(
            GestureState::Drawing,
            &TouchEvent::single(TouchPhase::Start, 10.0, 10.0),
            SURFACE,
        );
        assert_eq!(outcome.next, GestureState::Idle);
        assert!(outcome.suppress_default);
        assert_eq!(outcome.message, None);
    }

    #[test]
    fn move_outside_surface_keeps_drawing_silently() {
        let outcome = step(
            GestureState::Drawing,
            &TouchEvent::single(TouchPhase::Move, 400.0, 100.0),
            SURFACE,
        );
        assert_eq!(outcome.next, GestureState::Drawing);
        assert!(outcome.suppress_default);
        assert_eq!(outcome.message, None);
    }

    #[test]
    fn second_finger_mid_stroke_aborts_without_finish() {
        let outcome = step(GestureState::Drawing, &two_fingers(TouchPhase::Move), SURFACE);
        assert_eq!(outcome, GestureOutcome::abort());

        let outcome = step(GestureState::Drawing, &two_fingers(TouchPhase::Start), SURFACE);
        assert_eq!(outcome, GestureOutcome::abort());
    }

    #[test]
    fn end_and_cancel_finish_a_stroke() {
        for phase in [TouchPhase::End, TouchPhase::Cancel] {
            let outcome = step(GestureState::Drawing, &TouchEvent::new(phase, vec![]), SURFACE);
            assert_eq!(outcome.next, GestureState::Idle);
            assert_eq!(outcome.message, Some(OutboundMessage::StrokeFinished));
        }
    }

    #[test]
    fn idle_end_and_move_are_no_ops() {
        for phase in [TouchPhase::End, TouchPhase::Cancel] {
            let outcome = step(GestureState::Idle, &TouchEvent::new(phase, vec![]), SURFACE);
            assert_eq!(outcome, GestureOutcome::stay(GestureState::Idle));
        }
        let outcome = step(
            GestureState::Idle,
            &TouchEvent::single(TouchPhase::Move, 200.0, 100.0),
            SURFACE,
        );
        assert_eq!(outcome, GestureOutcome::stay(GestureState::Idle));
    }
}

use sketch_overlay::overlay::controls::{PersistenceMode, PersistenceToggle, Tool, ToolPalette};
use sketch_overlay::overlay::gesture::{GestureState, TouchEvent, TouchPhase, TouchPoint};
use sketch_overlay::overlay::messages::{DrawEvent, SettingsEvent};
use sketch_overlay::overlay::{
    DefaultAction, LayoutRect, OutboundMessage, OverlayController, OverlayEvent, StaticLayout,
};

type Controller = OverlayController<StaticLayout, Vec<OutboundMessage>>;

/// 800x450 video letterboxed inside a 800x600 container at page (0, 60).
fn controller_with(persistence: PersistenceMode) -> Controller {
    let layout = StaticLayout::new(
        LayoutRect::new(0.0, 135.0, 800.0, 450.0),
        LayoutRect::new(0.0, 60.0, 800.0, 600.0),
    );
    let mut controller = OverlayController::new(
        layout,
        Vec::new(),
        ToolPalette::default(),
        PersistenceToggle::new(persistence),
    );
    controller.start();
    controller
}

fn controller() -> Controller {
    controller_with(PersistenceMode::Permanent)
}

fn one_finger(phase: TouchPhase, x: f64, y: f64) -> OverlayEvent {
    OverlayEvent::Touch(TouchEvent::single(phase, x, y))
}

fn two_fingers(phase: TouchPhase) -> OverlayEvent {
    OverlayEvent::Touch(TouchEvent::new(
        phase,
        vec![
            TouchPoint { x: 200.0, y: 300.0 },
            TouchPoint { x: 500.0, y: 400.0 },
        ],
    ))
}

fn lift(phase: TouchPhase) -> OverlayEvent {
    OverlayEvent::Touch(TouchEvent::new(phase, Vec::new()))
}

#[test]
fn clean_stroke_emits_start_points_and_one_finish_in_order() {
    let mut controller = controller();
    let moves = [(200.0, 247.5), (400.0, 360.0), (600.0, 472.5)];

    controller.handle(one_finger(TouchPhase::Start, 80.0, 180.0));
    for (x, y) in moves {
        assert_eq!(
            controller.handle(one_finger(TouchPhase::Move, x, y)),
            DefaultAction::Suppress
        );
    }
    controller.handle(lift(TouchPhase::End));

    let mut expected = vec![OutboundMessage::Draw(DrawEvent {
        x: 0.1,
        y: 0.1,
        new_stroke: true,
    })];
    expected.extend(moves.iter().map(|&(x, y)| {
        OutboundMessage::Draw(DrawEvent {
            x: x / 800.0,
            y: (y - 135.0) / 450.0,
            new_stroke: false,
        })
    }));
    expected.push(OutboundMessage::StrokeFinished);

    assert_eq!(controller.transport(), &expected);
    assert_eq!(controller.gesture_state(), GestureState::Idle);
}

#[test]
fn two_finger_start_never_draws() {
    let mut controller = controller();

    assert_eq!(
        controller.handle(two_fingers(TouchPhase::Start)),
        DefaultAction::Allow
    );
    controller.handle(two_fingers(TouchPhase::Move));
    controller.handle(lift(TouchPhase::End));

    assert!(controller.transport().is_empty());
    assert_eq!(controller.gesture_state(), GestureState::Idle);
}

#[test]
fn second_finger_aborts_stroke_without_finish() {
    let mut controller = controller();

    controller.handle(one_finger(TouchPhase::Start, 400.0, 360.0));
    controller.handle(two_fingers(TouchPhase::Move));
    assert_eq!(controller.gesture_state(), GestureState::Idle);

    controller.handle(one_finger(TouchPhase::Move, 410.0, 370.0));
    controller.handle(lift(TouchPhase::End));

    assert_eq!(
        controller.transport(),
        &vec![OutboundMessage::Draw(DrawEvent {
            x: 0.5,
            y: 0.5,
            new_stroke: true,
        })]
    );
}

#[test]
fn cancel_finishes_like_end() {
    let mut controller = controller();

    controller.handle(one_finger(TouchPhase::Start, 400.0, 360.0));
    controller.handle(lift(TouchPhase::Cancel));

    assert_eq!(controller.gesture_state(), GestureState::Idle);
    assert_eq!(
        controller.transport().last(),
        Some(&OutboundMessage::StrokeFinished)
    );
}

#[test]
fn leaving_the_surface_pauses_points_but_keeps_the_stroke() {
    let mut controller = controller();

    controller.handle(one_finger(TouchPhase::Start, 400.0, 360.0));
    controller.handle(one_finger(TouchPhase::Move, 400.0, 100.0));
    controller.handle(one_finger(TouchPhase::Move, 400.0, 600.0));
    assert_eq!(controller.gesture_state(), GestureState::Drawing);
    controller.handle(one_finger(TouchPhase::Move, 400.0, 135.0));
    controller.handle(lift(TouchPhase::End));

    let sent = controller.transport();
    assert_eq!(sent.len(), 3);
    assert_eq!(
        sent[1],
        OutboundMessage::Draw(DrawEvent {
            x: 0.5,
            y: 0.0,
            new_stroke: false,
        })
    );
    assert_eq!(sent[2], OutboundMessage::StrokeFinished);
}

#[test]
fn touches_before_video_loads_are_dropped_until_resync() {
    let layout = StaticLayout::new(
        LayoutRect::new(0.0, 60.0, 0.0, 0.0),
        LayoutRect::new(0.0, 60.0, 800.0, 600.0),
    );
    let mut controller = OverlayController::new(
        layout,
        Vec::new(),
        ToolPalette::default(),
        PersistenceToggle::default(),
    );
    controller.start();

    controller.handle(one_finger(TouchPhase::Start, 10.0, 70.0));
    controller.handle(lift(TouchPhase::End));
    assert!(controller.transport().is_empty());

    controller
        .layout_mut()
        .set_video_rect(LayoutRect::new(0.0, 135.0, 800.0, 450.0));
    controller.handle(OverlayEvent::VideoLoaded);
    controller.handle(one_finger(TouchPhase::Start, 400.0, 360.0));

    assert_eq!(controller.transport().len(), 1);
}

#[test]
fn tool_selection_emits_each_choice_with_one_active_control() {
    let mut controller = controller();

    controller.select_tool(Tool::Pen);
    assert_eq!(controller.palette().active(), Some(Tool::Pen));
    controller.select_tool(Tool::Eraser);

    let active: Vec<Tool> = controller
        .palette()
        .controls()
        .iter()
        .filter(|control| control.active)
        .map(|control| control.tool)
        .collect();
    assert_eq!(active, vec![Tool::Eraser]);
    assert_eq!(
        controller.transport(),
        &vec![
            OutboundMessage::Settings(SettingsEvent::tool(Tool::Pen)),
            OutboundMessage::Settings(SettingsEvent::tool(Tool::Eraser)),
        ]
    );
}

#[test]
fn persistence_toggle_round_trips_from_either_start() {
    for (initial, first, second) in [
        (
            PersistenceMode::Permanent,
            PersistenceMode::Fade,
            PersistenceMode::Permanent,
        ),
        (
            PersistenceMode::Fade,
            PersistenceMode::Permanent,
            PersistenceMode::Fade,
        ),
    ] {
        let mut controller = controller_with(initial);
        controller.handle(OverlayEvent::PersistenceToggled);
        controller.handle(OverlayEvent::PersistenceToggled);

        assert_eq!(controller.persistence_mode(), initial);
        assert_eq!(
            controller.transport(),
            &vec![
                OutboundMessage::Settings(SettingsEvent::persistence(first)),
                OutboundMessage::Settings(SettingsEvent::persistence(second)),
            ]
        );
    }
}

#[test]
fn clear_emits_once_in_any_gesture_state() {
    let mut idle = controller();
    idle.handle(OverlayEvent::ClearClicked);
    assert_eq!(idle.transport(), &vec![OutboundMessage::Clear]);

    let mut drawing = controller();
    drawing.handle(one_finger(TouchPhase::Start, 400.0, 360.0));
    drawing.handle(OverlayEvent::ClearClicked);
    let clears = drawing
        .transport()
        .iter()
        .filter(|message| **message == OutboundMessage::Clear)
        .count();
    assert_eq!(clears, 1);
    assert_eq!(drawing.gesture_state(), GestureState::Drawing);
}

use crate::overlay::controls::{PersistenceMode, Tool};
use crate::overlay::gesture::TouchEvent;
use crate::overlay::viewport::NormalizedPoint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawEvent {
    pub x: f64,
    pub y: f64,
    pub new_stroke: bool,
}

impl DrawEvent {
    pub fn at(point: NormalizedPoint, new_stroke: bool) -> Self {
        Self {
            x: point.x,
            y: point.y,
            new_stroke,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SettingsEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<Tool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistence: Option<PersistenceMode>,
}

impl SettingsEvent {
    pub fn tool(tool: Tool) -> Self {
        Self {
            tool: Some(tool),
            persistence: None,
        }
    }

    pub fn persistence(mode: PersistenceMode) -> Self {
        Self {
            tool: None,
            persistence: Some(mode),
        }
    }
}

/// Messages sent from the overlay to the server.
///
/// On the wire each message is `{"event": <name>, "data": <payload>}`; the
/// payload is absent for messages that carry none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum OutboundMessage {
    #[serde(rename = "draw_event")]
    Draw(DrawEvent),
    #[serde(rename = "stroke_finished_event")]
    StrokeFinished,
    #[serde(rename = "settings_event")]
    Settings(SettingsEvent),
    #[serde(rename = "clear_event")]
    Clear,
}

impl OutboundMessage {
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Draw(_) => "draw_event",
            Self::StrokeFinished => "stroke_finished_event",
            Self::Settings(_) => "settings_event",
            Self::Clear => "clear_event",
        }
    }

    pub fn stroke_point(point: NormalizedPoint, new_stroke: bool) -> Self {
        Self::Draw(DrawEvent::at(point, new_stroke))
    }
}

/// Signals delivered to the overlay controller: transport, layout, touch and
/// control activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OverlayEvent {
    TransportConnected,
    VideoLoaded,
    WindowResized,
    Touch(TouchEvent),
    ToolClicked { control_id: String },
    PersistenceToggled,
    ClearClicked,
    Teardown,
}

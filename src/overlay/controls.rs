use crate::overlay::messages::{OutboundMessage, SettingsEvent};
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const TOOL_CONTROL_PREFIX: &str = "tool";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Pen,
    Highlighter,
    Pointer,
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Pen, Tool::Highlighter, Tool::Pointer, Tool::Eraser];

    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Highlighter => "highlighter",
            Tool::Pointer => "pointer",
            Tool::Eraser => "eraser",
        }
    }

    /// Resolves a control id of the form `tool-<name>`.
    pub fn from_control_id(control_id: &str) -> Option<Self> {
        let (prefix, name) = control_id.split_once('-')?;
        if prefix != TOOL_CONTROL_PREFIX {
            return None;
        }
        name.parse().ok()
    }

    pub fn control_id(self) -> String {
        format!("{TOOL_CONTROL_PREFIX}-{}", self.as_str())
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.as_str() == value)
            .ok_or_else(|| anyhow!("unknown drawing tool: {value}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceMode {
    #[default]
    Permanent,
    Fade,
}

impl PersistenceMode {
    pub fn from_fade_active(active: bool) -> Self {
        if active {
            Self::Fade
        } else {
            Self::Permanent
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Permanent => "permanent",
            Self::Fade => "fade",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolControl {
    pub tool: Tool,
    pub active: bool,
}

/// The tool selector controls. At most one control is active; once a tool has
/// been selected exactly one is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPalette {
    controls: Vec<ToolControl>,
}

impl ToolPalette {
    /// Builds one control per distinct tool, in order, with `initial` active
    /// when the palette carries it.
    pub fn new(tools: &[Tool], initial: Tool) -> Self {
        let mut controls: Vec<ToolControl> = Vec::with_capacity(tools.len());
        for &tool in tools {
            if controls.iter().any(|control| control.tool == tool) {
                continue;
            }
            controls.push(ToolControl {
                tool,
                active: tool == initial,
            });
        }
        Self { controls }
    }

    pub fn controls(&self) -> &[ToolControl] {
        &self.controls
    }

    pub fn active(&self) -> Option<Tool> {
        self.controls
            .iter()
            .find(|control| control.active)
            .map(|control| control.tool)
    }

    pub fn contains(&self, tool: Tool) -> bool {
        self.controls.iter().any(|control| control.tool == tool)
    }

    /// Marks `tool` as the only active control and returns the settings
    /// message announcing it. Reselecting the active tool announces it again.
    /// Returns `None` when no control carries `tool`.
    pub fn select(&mut self, tool: Tool) -> Option<OutboundMessage> {
        if !self.contains(tool) {
            return None;
        }
        for control in &mut self.controls {
            control.active = control.tool == tool;
        }
        Some(OutboundMessage::Settings(SettingsEvent::tool(tool)))
    }
}

impl Default for ToolPalette {
    fn default() -> Self {
        Self::new(&Tool::ALL, Tool::Pen)
    }
}

/// The fade toggle. Its active state is the only record of the persistence
/// mode on this side of the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PersistenceToggle {
    active: bool,
}

impl PersistenceToggle {
    pub fn new(mode: PersistenceMode) -> Self {
        Self {
            active: mode == PersistenceMode::Fade,
        }
    }

    pub fn is_active(self) -> bool {
        self.active
    }

    pub fn mode(self) -> PersistenceMode {
        PersistenceMode::from_fade_active(self.active)
    }

    pub fn toggle(&mut self) -> OutboundMessage {
        self.active = !self.active;
        OutboundMessage::Settings(SettingsEvent::persistence(self.mode()))
    }
}

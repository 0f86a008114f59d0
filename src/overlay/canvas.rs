//! Receiving side of the stroke protocol: the stroke list a screen overlay
//! paints, including fade-out of temporary strokes.

use crate::overlay::controls::{PersistenceMode, Tool};
use crate::overlay::messages::{DrawEvent, OutboundMessage, SettingsEvent};
use crate::settings::CanvasSettings;
use anyhow::{anyhow, Result};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    Over,
    /// Clears whatever lies underneath.
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: u32,
    pub blend: Blend,
}

impl StrokeStyle {
    pub fn for_tool(tool: Tool) -> Self {
        match tool {
            Tool::Pen => Self {
                color: Rgba::rgba(255, 0, 0, 255),
                width: 5,
                blend: Blend::Over,
            },
            Tool::Highlighter => Self {
                color: Rgba::rgba(255, 255, 0, 100),
                width: 25,
                blend: Blend::Over,
            },
            Tool::Pointer => Self {
                color: Rgba::rgba(255, 0, 0, 255),
                width: 15,
                blend: Blend::Over,
            },
            Tool::Eraser => Self {
                color: Rgba::default(),
                width: 25,
                blend: Blend::Clear,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<(i32, i32)>,
    pub style: StrokeStyle,
    pub opacity: f32,
    pub fades: bool,
    pub finished: bool,
}

impl Stroke {
    /// Style color with the current opacity applied to its alpha.
    pub fn effective_color(&self) -> Rgba {
        let alpha = f32::from(self.style.color.a) * self.opacity.clamp(0.0, 1.0);
        Rgba {
            a: alpha.round() as u8,
            ..self.style.color
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeCanvas {
    settings: CanvasSettings,
    tool: Tool,
    persistence: PersistenceMode,
    strokes: Vec<Stroke>,
}

impl StrokeCanvas {
    pub fn new(settings: CanvasSettings) -> Self {
        Self {
            settings,
            tool: Tool::Pen,
            persistence: PersistenceMode::Permanent,
            strokes: Vec::new(),
        }
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn persistence(&self) -> PersistenceMode {
        self.persistence
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Applies one protocol message and reports whether the visible strokes
    /// changed.
    pub fn apply(&mut self, message: &OutboundMessage) -> bool {
        match message {
            OutboundMessage::Draw(event) => self.apply_draw(*event),
            OutboundMessage::StrokeFinished => match self.open_stroke_mut() {
                Some(stroke) => {
                    stroke.finished = true;
                    false
                }
                None => false,
            },
            OutboundMessage::Settings(settings) => {
                self.apply_settings(*settings);
                false
            }
            OutboundMessage::Clear => {
                let changed = !self.strokes.is_empty();
                self.strokes.clear();
                changed
            }
        }
    }

    /// Advances every fading stroke by one step and drops the ones that are
    /// fully transparent.
    pub fn tick_fades(&mut self) -> bool {
        let step = self.settings.fade_step;
        let mut changed = false;
        for stroke in self.strokes.iter_mut().filter(|stroke| stroke.fades) {
            stroke.opacity -= step;
            changed = true;
        }
        self.strokes
            .retain(|stroke| !stroke.fades || stroke.opacity > 0.0);
        changed
    }

    fn apply_draw(&mut self, event: DrawEvent) -> bool {
        let point = self.to_pixels(event);
        if event.new_stroke {
            self.strokes.push(Stroke {
                points: vec![point],
                style: StrokeStyle::for_tool(self.tool),
                opacity: 1.0,
                fades: self.persistence == PersistenceMode::Fade || self.tool == Tool::Pointer,
                finished: false,
            });
            return true;
        }

        match self.open_stroke_mut() {
            Some(stroke) => {
                stroke.points.push(point);
                true
            }
            None => {
                tracing::debug!(?point, "stroke point without an open stroke dropped");
                false
            }
        }
    }

    fn apply_settings(&mut self, settings: SettingsEvent) {
        if let Some(tool) = settings.tool {
            self.tool = tool;
        }
        if let Some(persistence) = settings.persistence {
            self.persistence = persistence;
        }
        tracing::debug!(tool = %self.tool, persistence = self.persistence.as_str(), "canvas settings updated");
    }

    fn open_stroke_mut(&mut self) -> Option<&mut Stroke> {
        self.strokes.last_mut().filter(|stroke| !stroke.finished)
    }

    fn to_pixels(&self, event: DrawEvent) -> (i32, i32) {
        (
            (event.x * f64::from(self.settings.width)) as i32,
            (event.y * f64::from(self.settings.height)) as i32,
        )
    }
}

/// Applies incoming messages to `canvas` and ticks fades on the configured
/// interval until every sender has disconnected.
pub fn run_canvas_loop(
    messages: Receiver<OutboundMessage>,
    canvas: Arc<Mutex<StrokeCanvas>>,
) -> Result<()> {
    let interval = canvas
        .lock()
        .map_err(|_| anyhow!("stroke canvas lock poisoned"))?
        .settings()
        .fade_interval();
    let mut next_tick = Instant::now() + interval;

    loop {
        let timeout = next_tick.saturating_duration_since(Instant::now());
        match messages.recv_timeout(timeout) {
            Ok(message) => {
                canvas
                    .lock()
                    .map_err(|_| anyhow!("stroke canvas lock poisoned"))?
                    .apply(&message);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                tracing::debug!("canvas message channel closed");
                return Ok(());
            }
        }

        let now = Instant::now();
        if now >= next_tick {
            canvas
                .lock()
                .map_err(|_| anyhow!("stroke canvas lock poisoned"))?
                .tick_fades();
            next_tick = now + interval;
        }
    }
}

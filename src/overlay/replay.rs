use crate::overlay::controller::OverlayController;
use crate::overlay::layout::{LayoutRect, StaticLayout};
use crate::overlay::messages::OverlayEvent;
use crate::overlay::transport::Transport;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// One line of a replay script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplayLine {
    /// Moves the page boxes. The surface only follows once a resync
    /// trigger (resize, load, connect) is replayed.
    Layout {
        video: LayoutRect,
        container: LayoutRect,
    },
    Event {
        event: OverlayEvent,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    pub layouts: usize,
    pub events: usize,
}

pub fn parse_line(line: &str) -> Result<ReplayLine> {
    Ok(serde_json::from_str(line)?)
}

/// Feeds a JSON-lines script through `controller`. Blank lines are skipped.
pub fn run_replay<R, T>(
    input: R,
    controller: &mut OverlayController<StaticLayout, T>,
) -> Result<ReplaySummary>
where
    R: BufRead,
    T: Transport,
{
    let mut summary = ReplaySummary::default();
    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("read replay line {line_number}"))?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line).with_context(|| format!("parse replay line {line_number}"))? {
            ReplayLine::Layout { video, container } => {
                let layout = controller.layout_mut();
                layout.set_video_rect(video);
                layout.set_container_rect(container);
                summary.layouts += 1;
            }
            ReplayLine::Event { event } => {
                controller.handle(event);
                summary.events += 1;
            }
        }
    }
    Ok(summary)
}

use crate::overlay::controls::{PersistenceMode, Tool};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SETTINGS_FILE_NAME: &str = "overlay_settings.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CanvasSettings {
    #[serde(default = "default_canvas_width")]
    pub width: u32,
    #[serde(default = "default_canvas_height")]
    pub height: u32,
    /// Opacity removed from each fading stroke per tick.
    #[serde(default = "default_fade_step")]
    pub fade_step: f32,
    #[serde(default = "default_fade_interval_ms")]
    pub fade_interval_ms: u64,
}

impl CanvasSettings {
    pub fn fade_interval(&self) -> Duration {
        Duration::from_millis(self.fade_interval_ms.max(1))
    }
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            fade_step: default_fade_step(),
            fade_interval_ms: default_fade_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlaySettings {
    #[serde(default)]
    pub debug_logging: bool,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default = "default_tools")]
    pub tools: Vec<Tool>,
    #[serde(default = "default_initial_tool")]
    pub initial_tool: Tool,
    #[serde(default)]
    pub initial_persistence: PersistenceMode,
    #[serde(default)]
    pub canvas: CanvasSettings,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            tools: default_tools(),
            initial_tool: default_initial_tool(),
            initial_persistence: PersistenceMode::default(),
            canvas: CanvasSettings::default(),
        }
    }
}

impl OverlaySettings {
    /// Repairs combinations the controller cannot honour: an empty palette and
    /// an initial tool the palette does not offer.
    pub fn sanitize(&mut self) {
        if self.tools.is_empty() {
            self.tools = default_tools();
        }
        if !self.tools.contains(&self.initial_tool) {
            tracing::warn!(
                initial_tool = %self.initial_tool,
                "initial tool is not in the palette; using the first palette entry"
            );
            self.initial_tool = self.tools[0];
        }
        if !(self.canvas.fade_step.is_finite() && self.canvas.fade_step > 0.0) {
            self.canvas.fade_step = default_fade_step();
        }
    }
}

fn default_canvas_width() -> u32 {
    1920
}

fn default_canvas_height() -> u32 {
    1080
}

fn default_fade_step() -> f32 {
    0.015
}

fn default_fade_interval_ms() -> u64 {
    30
}

fn default_tools() -> Vec<Tool> {
    Tool::ALL.to_vec()
}

fn default_initial_tool() -> Tool {
    Tool::Pen
}

pub fn settings_path_from_exe_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(SETTINGS_FILE_NAME))
}

pub fn resolve_settings_path() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    settings_path_from_exe_path(&exe_path)
}

pub fn load() -> Result<OverlaySettings> {
    let path = resolve_settings_path()?;
    load_from_path(&path)
}

pub fn load_from_path(path: &Path) -> Result<OverlaySettings> {
    if !path.exists() {
        return Ok(OverlaySettings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read overlay settings file {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(OverlaySettings::default());
    }

    let mut loaded: OverlaySettings = serde_json::from_str(&content)
        .with_context(|| format!("deserialize overlay settings file {}", path.display()))?;
    loaded.sanitize();
    Ok(loaded)
}

pub fn save_to_path(path: &Path, settings: &OverlaySettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create overlay settings folder {}", parent.display()))?;
    }

    let mut sanitized = settings.clone();
    sanitized.sanitize();
    let json =
        serde_json::to_string_pretty(&sanitized).context("serialize overlay settings")?;
    std::fs::write(path, json)
        .with_context(|| format!("write overlay settings file {}", path.display()))
}

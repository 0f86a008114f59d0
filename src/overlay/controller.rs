use crate::overlay::controls::{PersistenceMode, PersistenceToggle, Tool, ToolPalette};
use crate::overlay::gesture::{self, GestureState, TouchEvent};
use crate::overlay::layout::{LayoutSource, ViewportFrame};
use crate::overlay::messages::{OutboundMessage, OverlayEvent};
use crate::overlay::transport::Transport;
use crate::overlay::viewport;
use crate::settings::OverlaySettings;
use std::sync::mpsc::{Receiver, TryRecvError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerLifecycle {
    Starting,
    Running,
    TornDown,
}

/// What the embedding UI must do with the platform's default handling of the
/// event it just delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAction {
    Allow,
    Suppress,
}

/// Owns every piece of overlay input state and is the only writer of it.
///
/// All mutation happens through `&mut self`, so whichever thread holds the
/// controller is the single actor that orders outbound messages.
#[derive(Debug)]
pub struct OverlayController<L, T> {
    layout: L,
    transport: T,
    gesture: GestureState,
    palette: ToolPalette,
    persistence: PersistenceToggle,
    lifecycle: ControllerLifecycle,
}

impl<L: LayoutSource, T: Transport> OverlayController<L, T> {
    pub fn new(
        layout: L,
        transport: T,
        palette: ToolPalette,
        persistence: PersistenceToggle,
    ) -> Self {
        Self {
            layout,
            transport,
            gesture: GestureState::Idle,
            palette,
            persistence,
            lifecycle: ControllerLifecycle::Starting,
        }
    }

    pub fn from_settings(layout: L, transport: T, settings: &OverlaySettings) -> Self {
        Self::new(
            layout,
            transport,
            ToolPalette::new(&settings.tools, settings.initial_tool),
            PersistenceToggle::new(settings.initial_persistence),
        )
    }

    pub fn lifecycle(&self) -> ControllerLifecycle {
        self.lifecycle
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture
    }

    pub fn palette(&self) -> &ToolPalette {
        &self.palette
    }

    pub fn persistence_mode(&self) -> PersistenceMode {
        self.persistence.mode()
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Starts the controller with an unconditional resync, since the relative
    /// order of transport connect and video load is not guaranteed.
    pub fn start(&mut self) {
        if self.lifecycle != ControllerLifecycle::Starting {
            return;
        }
        self.resync();
        self.lifecycle = ControllerLifecycle::Running;
        tracing::info!("overlay controller started");
    }

    /// Detaches the controller. Later events have no effect.
    pub fn teardown(&mut self) {
        if self.lifecycle == ControllerLifecycle::TornDown {
            return;
        }
        self.lifecycle = ControllerLifecycle::TornDown;
        self.gesture = GestureState::Idle;
        tracing::info!("overlay controller torn down");
    }

    pub fn resync(&mut self) -> ViewportFrame {
        viewport::resync(&mut self.layout)
    }

    fn is_torn_down(&self) -> bool {
        self.lifecycle == ControllerLifecycle::TornDown
    }

    pub fn handle(&mut self, event: OverlayEvent) -> DefaultAction {
        if self.is_torn_down() {
            tracing::debug!(?event, "event after teardown ignored");
            return DefaultAction::Allow;
        }

        match event {
            OverlayEvent::TransportConnected => {
                tracing::info!("transport connected");
                self.resync();
            }
            OverlayEvent::VideoLoaded | OverlayEvent::WindowResized => {
                self.resync();
            }
            OverlayEvent::Touch(touch) => return self.handle_touch(&touch),
            OverlayEvent::ToolClicked { control_id } => match Tool::from_control_id(&control_id) {
                Some(tool) => self.select_tool(tool),
                None => tracing::warn!(%control_id, "click on unknown tool control ignored"),
            },
            OverlayEvent::PersistenceToggled => self.toggle_persistence(),
            OverlayEvent::ClearClicked => self.clear(),
            OverlayEvent::Teardown => self.teardown(),
        }
        DefaultAction::Allow
    }

    pub fn handle_touch(&mut self, touch: &TouchEvent) -> DefaultAction {
        if self.is_torn_down() {
            return DefaultAction::Allow;
        }
        let surface = self.layout.surface_rect();
        let outcome = gesture::step(self.gesture, touch, surface);
        if outcome.next != self.gesture {
            tracing::debug!(from = ?self.gesture, to = ?outcome.next, "gesture transition");
        }
        self.gesture = outcome.next;
        if let Some(message) = outcome.message {
            self.send(message);
        }
        if outcome.suppress_default {
            DefaultAction::Suppress
        } else {
            DefaultAction::Allow
        }
    }

    pub fn select_tool(&mut self, tool: Tool) {
        if self.is_torn_down() {
            return;
        }
        match self.palette.select(tool) {
            Some(message) => self.send(message),
            None => tracing::warn!(%tool, "tool is not offered by the palette"),
        }
    }

    pub fn toggle_persistence(&mut self) {
        if self.is_torn_down() {
            return;
        }
        let message = self.persistence.toggle();
        self.send(message);
    }

    pub fn clear(&mut self) {
        if self.is_torn_down() {
            return;
        }
        self.send(OutboundMessage::Clear);
    }

    /// Handles every queued event without blocking. A disconnected queue
    /// tears the controller down.
    pub fn pump_events(&mut self, events: &Receiver<OverlayEvent>) {
        while !self.is_torn_down() {
            match events.try_recv() {
                Ok(event) => {
                    self.handle(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.teardown();
                    break;
                }
            }
        }
    }

    /// Blocks on the queue until teardown or until every sender is gone.
    pub fn run(&mut self, events: &Receiver<OverlayEvent>) {
        self.start();
        while !self.is_torn_down() {
            match events.recv() {
                Ok(event) => {
                    self.handle(event);
                }
                Err(_) => self.teardown(),
            }
        }
    }

    fn send(&mut self, message: OutboundMessage) {
        if let Err(err) = self.transport.emit(&message) {
            tracing::warn!(?err, event = message.event_name(), "outbound message dropped");
        }
    }
}

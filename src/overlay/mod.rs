pub mod canvas;
pub mod controller;
pub mod controls;
pub mod gesture;
pub mod layout;
pub mod messages;
pub mod replay;
pub mod transport;
pub mod viewport;

pub use controller::{ControllerLifecycle, DefaultAction, OverlayController};
pub use layout::{LayoutRect, LayoutSource, StaticLayout};
pub use messages::{OutboundMessage, OverlayEvent};
pub use transport::Transport;

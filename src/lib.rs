#![cfg_attr(not(feature = "std"), no_std)]

pub mod engine;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod node;
pub mod prelude;
pub mod protocol;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;

pub use engine::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use node::AgentNode;
pub use protocol::{Event, Message, TransportErrorKind};
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, line::LineTransport, FrameError, Transport};
#[cfg(feature = "std")]
pub use ui::{print_view, render_view};

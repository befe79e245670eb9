//! Commonly used types and utilities for ease of import.

pub use crate::{Agent, AgentState, AttackOutcome, Board, EndReason, Event, Message, ShipKind};

#[cfg(feature = "std")]
pub use crate::{print_view, AgentNode};

#[cfg(feature = "std")]
pub use crate::transport::{in_memory::InMemoryTransport, line::LineTransport, Transport};

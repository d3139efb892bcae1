//! Ticket domain: schema validation boundary and service surface

pub mod error;
pub mod schema;
pub mod service;

pub use error::TicketError;
pub use schema::{Risk, TicketDraft, TicketPatch};
pub use service::TicketService;

//! HTTP handlers and tool bindings connecting the agent to the outside world

pub mod chat_handler;
pub mod health_handler;
pub mod ticket_tools;

pub use chat_handler::{chat, AppState, ChatRequest, ChatResponse};
pub use health_handler::health;
pub use ticket_tools::TicketToolHandler;

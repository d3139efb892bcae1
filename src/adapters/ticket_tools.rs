//! Binds the ticket service and user-memory store as agent-callable tools
//!
//! Tool names, argument names, and JSON Schemas are part of the external
//! contract: the model constructs calls against them from natural
//! language. `user_id` and `thread_id` are never model-supplied; they are
//! filled in from the run context.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::domain::{RunContext, Tool, ToolPort};
use crate::persistence::MemoryRepository;
use crate::tickets::{Risk, TicketDraft, TicketError, TicketPatch, TicketService};

pub struct TicketToolHandler {
    service: TicketService,
    memories: Arc<dyn MemoryRepository>,
}

impl TicketToolHandler {
    pub fn new(service: TicketService, memories: Arc<dyn MemoryRepository>) -> Self {
        Self { service, memories }
    }

    async fn create_ticket(&self, args: &Value, ctx: &RunContext) -> anyhow::Result<Value> {
        let draft = TicketDraft {
            user_id: ctx.user_id.clone(),
            thread_id: ctx.thread_id.clone(),
            user_name: required_str(args, "user_name")?,
            subject: required_str(args, "subject")?,
            description: required_str(args, "description")?,
            risk: Risk::parse(&required_str(args, "risk")?)?,
        };

        let record = self.service.create_ticket(draft).await?;
        Ok(serde_json::to_value(record)?)
    }

    async fn get_ticket(&self, args: &Value) -> anyhow::Result<Value> {
        let unique_id = required_str(args, "unique_id")?;

        // A missing ticket is a normal conversational outcome, not an error
        match self.service.get_ticket(&unique_id).await? {
            Some(record) => Ok(serde_json::to_value(record)?),
            None => Ok(json!({ "found": false, "unique_id": unique_id })),
        }
    }

    async fn list_tickets_for_user(&self, ctx: &RunContext) -> anyhow::Result<Value> {
        let records = self.service.list_tickets_for_user(&ctx.user_id).await?;
        Ok(serde_json::to_value(records)?)
    }

    async fn edit_ticket(&self, args: &Value) -> anyhow::Result<Value> {
        let unique_id = required_str(args, "unique_id")?;

        let risk = match optional_str(args, "risk") {
            Some(s) => Some(Risk::parse(&s)?),
            None => None,
        };
        let patch = TicketPatch {
            user_name: optional_str(args, "user_name"),
            subject: optional_str(args, "subject"),
            description: optional_str(args, "description"),
            risk,
        };

        let record = self.service.edit_ticket(&unique_id, patch).await?;
        Ok(serde_json::to_value(record)?)
    }

    async fn delete_ticket(&self, args: &Value) -> anyhow::Result<Value> {
        let unique_id = required_str(args, "unique_id")?;
        let record = self.service.delete_ticket(&unique_id).await?;
        Ok(serde_json::to_value(record)?)
    }

    async fn remember(&self, args: &Value, ctx: &RunContext) -> anyhow::Result<Value> {
        let key = required_str(args, "key")?;
        let value = required_str(args, "value")?;
        self.memories.upsert(&ctx.user_id, &key, &value).await?;
        Ok(json!({ "remembered": true, "key": key }))
    }

    async fn recall(&self, ctx: &RunContext) -> anyhow::Result<Value> {
        let memories = self.memories.list_for_user(&ctx.user_id).await?;
        Ok(serde_json::to_value(memories)?)
    }
}

#[async_trait]
impl ToolPort for TicketToolHandler {
    async fn execute_tool(
        &self,
        name: &str,
        args: Value,
        ctx: &RunContext,
    ) -> anyhow::Result<Value> {
        match name {
            "create_ticket" => self.create_ticket(&args, ctx).await,
            "get_ticket" => self.get_ticket(&args).await,
            "list_tickets_for_user" => self.list_tickets_for_user(ctx).await,
            "edit_ticket" => self.edit_ticket(&args).await,
            "delete_ticket" => self.delete_ticket(&args).await,
            "remember" => self.remember(&args, ctx).await,
            "recall" => self.recall(ctx).await,
            other => Err(anyhow::anyhow!("Tool not found: {}", other)),
        }
    }

    fn list_tools(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: "create_ticket".to_string(),
                description: "Create and persist a new support ticket. Returns the ticket \
                              including the server-generated unique_id used for tracking."
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "user_name": { "type": "string", "description": "Display name of the requester" },
                        "subject": { "type": "string", "description": "Short summary of the issue" },
                        "description": { "type": "string", "description": "Full description of the issue" },
                        "risk": { "type": "string", "enum": ["low", "medium", "high"], "description": "Severity of the issue" }
                    },
                    "required": ["user_name", "subject", "description", "risk"]
                }),
            },
            Tool {
                name: "get_ticket".to_string(),
                description: "Retrieve a ticket by its tracking unique_id (UUIDv4). \
                              Returns {\"found\": false} if no such ticket exists."
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "unique_id": { "type": "string", "description": "Tracking UUID assigned at creation" }
                    },
                    "required": ["unique_id"]
                }),
            },
            Tool {
                name: "list_tickets_for_user".to_string(),
                description: "List all tickets created by the current user (possibly empty)."
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            },
            Tool {
                name: "edit_ticket".to_string(),
                description: "Update a ticket identified by unique_id. Only the supplied \
                              fields change; omitted fields keep their current values."
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "unique_id": { "type": "string", "description": "Tracking UUID of the ticket to edit" },
                        "user_name": { "type": "string" },
                        "subject": { "type": "string" },
                        "description": { "type": "string" },
                        "risk": { "type": "string", "enum": ["low", "medium", "high"] }
                    },
                    "required": ["unique_id"]
                }),
            },
            Tool {
                name: "delete_ticket".to_string(),
                description: "Permanently delete a ticket identified by unique_id. \
                              Returns the deleted ticket."
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "unique_id": { "type": "string", "description": "Tracking UUID of the ticket to delete" }
                    },
                    "required": ["unique_id"]
                }),
            },
            Tool {
                name: "remember".to_string(),
                description: "Store a long-term fact about the current user, e.g. their name."
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "key": { "type": "string", "description": "Short identifier for the fact, e.g. 'name'" },
                        "value": { "type": "string", "description": "The fact to remember" }
                    },
                    "required": ["key", "value"]
                }),
            },
            Tool {
                name: "recall".to_string(),
                description: "List all long-term facts stored about the current user."
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            },
        ]
    }
}

/// Extract a required string argument, rejecting absent or empty values
fn required_str(args: &Value, field: &str) -> Result<String, TicketError> {
    match args.get(field).and_then(|v| v.as_str()) {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        _ => Err(TicketError::SchemaValidation {
            field: field.to_string(),
            reason: "required string argument is missing or empty".to_string(),
        }),
    }
}

/// Extract an optional string argument; absent and null both mean "not supplied"
fn optional_str(args: &Value, field: &str) -> Option<String> {
    args.get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

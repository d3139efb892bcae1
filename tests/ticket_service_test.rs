//! End-to-end ticket lifecycle tests against a real (in-memory sqlite) database

use std::time::Duration;

use serde_json::json;

use triage::adapters::TicketToolHandler;
use triage::domain::{RunContext, ToolPort};
use triage::persistence::{ConnectionPool, Storage};
use triage::tickets::{Risk, TicketDraft, TicketError, TicketPatch, TicketService};

// One connection only: each pooled sqlite::memory: connection would
// otherwise get its own empty database.
async fn test_storage() -> Storage {
    let pool = ConnectionPool::connect("sqlite::memory:", 1, 5)
        .await
        .unwrap();
    let storage = Storage::from_pool(pool);
    storage.migrate().await.unwrap();
    storage
}

fn draft(user_id: &str, subject: &str, risk: Risk) -> TicketDraft {
    TicketDraft {
        user_id: user_id.to_string(),
        thread_id: "thread-1".to_string(),
        user_name: "Ana".to_string(),
        subject: subject.to_string(),
        description: "Cannot log in since this morning".to_string(),
        risk,
    }
}

#[tokio::test]
async fn create_then_get_returns_identical_ticket() {
    let storage = test_storage().await;
    let service = TicketService::new(storage.tickets());

    let created = service
        .create_ticket(draft("user-1", "Login issue", Risk::Medium))
        .await
        .unwrap();

    // Tracking id is a server-assigned UUIDv4
    let parsed = uuid::Uuid::parse_str(&created.unique_id).unwrap();
    assert_eq!(parsed.get_version(), Some(uuid::Version::Random));
    assert!(!created.created_at.is_empty());
    assert_eq!(created.created_at, created.updated_at);

    let fetched = service.get_ticket(&created.unique_id).await.unwrap();
    assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn get_unknown_id_returns_none_not_error() {
    let storage = test_storage().await;
    let service = TicketService::new(storage.tickets());

    let missing = service
        .get_ticket(&uuid::Uuid::new_v4().to_string())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn create_rejects_empty_fields_without_persisting() {
    let storage = test_storage().await;
    let service = TicketService::new(storage.tickets());

    let mut bad = draft("user-1", "", Risk::Low);
    bad.subject = "   ".to_string();
    let err = service.create_ticket(bad).await.unwrap_err();
    assert!(matches!(
        err,
        TicketError::SchemaValidation { ref field, .. } if field == "subject"
    ));

    let tickets = service.list_tickets_for_user("user-1").await.unwrap();
    assert!(tickets.is_empty());
}

#[tokio::test]
async fn invalid_risk_is_rejected_at_the_tool_boundary() {
    let storage = test_storage().await;
    let service = TicketService::new(storage.tickets());
    let handler = TicketToolHandler::new(
        TicketService::new(storage.tickets()),
        storage.memories(),
    );
    let ctx = RunContext {
        user_id: "user-1".to_string(),
        thread_id: "thread-1".to_string(),
    };

    let args = json!({
        "user_name": "Ana",
        "subject": "Login issue",
        "description": "Cannot log in",
        "risk": "urgent"
    });
    let err = handler
        .execute_tool("create_ticket", args, &ctx)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("risk"));

    // The failed call must leave no trace in the store
    let tickets = service.list_tickets_for_user("user-1").await.unwrap();
    assert!(tickets.is_empty());
}

#[tokio::test]
async fn edit_applies_only_supplied_fields() {
    let storage = test_storage().await;
    let service = TicketService::new(storage.tickets());

    let created = service
        .create_ticket(draft("user-1", "Login issue", Risk::Medium))
        .await
        .unwrap();

    // Timestamps are RFC 3339 strings; make sure updated_at can differ
    tokio::time::sleep(Duration::from_millis(20)).await;

    let patch = TicketPatch {
        user_name: None,
        subject: None,
        description: None,
        risk: Some(Risk::High),
    };
    let edited = service.edit_ticket(&created.unique_id, patch).await.unwrap();

    assert_eq!(edited.risk, Risk::High);
    assert_eq!(edited.subject, created.subject);
    assert_eq!(edited.description, created.description);
    assert_eq!(edited.user_name, created.user_name);
    assert_eq!(edited.unique_id, created.unique_id);
    assert_eq!(edited.created_at, created.created_at);
    assert_ne!(edited.updated_at, created.updated_at);
}

#[tokio::test]
async fn edit_unknown_id_is_not_found() {
    let storage = test_storage().await;
    let service = TicketService::new(storage.tickets());

    let patch = TicketPatch {
        user_name: None,
        subject: Some("New subject".to_string()),
        description: None,
        risk: None,
    };
    let err = service
        .edit_ticket(&uuid::Uuid::new_v4().to_string(), patch)
        .await
        .unwrap_err();
    assert!(matches!(err, TicketError::NotFound { .. }));
}

#[tokio::test]
async fn delete_returns_snapshot_and_removes_the_ticket() {
    let storage = test_storage().await;
    let service = TicketService::new(storage.tickets());

    let created = service
        .create_ticket(draft("user-1", "Login issue", Risk::Low))
        .await
        .unwrap();

    let deleted = service.delete_ticket(&created.unique_id).await.unwrap();
    assert_eq!(deleted, created);

    let gone = service.get_ticket(&created.unique_id).await.unwrap();
    assert!(gone.is_none());

    let err = service.delete_ticket(&created.unique_id).await.unwrap_err();
    assert!(matches!(err, TicketError::NotFound { .. }));
}

#[tokio::test]
async fn list_filters_by_user_in_creation_order() {
    let storage = test_storage().await;
    let service = TicketService::new(storage.tickets());

    let first = service
        .create_ticket(draft("user-1", "First", Risk::Low))
        .await
        .unwrap();
    service
        .create_ticket(draft("user-2", "Other user", Risk::High))
        .await
        .unwrap();
    let second = service
        .create_ticket(draft("user-1", "Second", Risk::Medium))
        .await
        .unwrap();

    let tickets = service.list_tickets_for_user("user-1").await.unwrap();
    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0], first);
    assert_eq!(tickets[1], second);

    let none = service.list_tickets_for_user("user-3").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn full_ticket_lifecycle_through_the_tool_handler() {
    let storage = test_storage().await;
    let handler = TicketToolHandler::new(
        TicketService::new(storage.tickets()),
        storage.memories(),
    );
    let ctx = RunContext {
        user_id: "user-ana".to_string(),
        thread_id: "thread-ana".to_string(),
    };

    let created = handler
        .execute_tool(
            "create_ticket",
            json!({
                "user_name": "Ana",
                "subject": "Login issue",
                "description": "Cannot log in since this morning",
                "risk": "medium"
            }),
            &ctx,
        )
        .await
        .unwrap();
    let unique_id = created["unique_id"].as_str().unwrap().to_string();
    assert_eq!(created["user_id"], "user-ana");
    assert_eq!(created["risk"], "medium");

    let edited = handler
        .execute_tool(
            "edit_ticket",
            json!({ "unique_id": unique_id, "risk": "high" }),
            &ctx,
        )
        .await
        .unwrap();
    assert_eq!(edited["risk"], "high");
    assert_eq!(edited["subject"], "Login issue");

    let listed = handler
        .execute_tool("list_tickets_for_user", json!({}), &ctx)
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let deleted = handler
        .execute_tool("delete_ticket", json!({ "unique_id": unique_id }), &ctx)
        .await
        .unwrap();
    assert_eq!(deleted["unique_id"], unique_id.as_str());

    let after = handler
        .execute_tool("get_ticket", json!({ "unique_id": unique_id }), &ctx)
        .await
        .unwrap();
    assert_eq!(after["found"], false);
}

#[tokio::test]
async fn memories_survive_upsert_and_are_scoped_per_user() {
    let storage = test_storage().await;
    let handler = TicketToolHandler::new(
        TicketService::new(storage.tickets()),
        storage.memories(),
    );
    let ana = RunContext {
        user_id: "user-ana".to_string(),
        thread_id: "t1".to_string(),
    };
    let bo = RunContext {
        user_id: "user-bo".to_string(),
        thread_id: "t2".to_string(),
    };

    handler
        .execute_tool("remember", json!({ "key": "name", "value": "Ana" }), &ana)
        .await
        .unwrap();
    handler
        .execute_tool(
            "remember",
            json!({ "key": "name", "value": "Ana Torres" }),
            &ana,
        )
        .await
        .unwrap();

    let recalled = handler.execute_tool("recall", json!({}), &ana).await.unwrap();
    let entries = recalled.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["key"], "name");
    assert_eq!(entries[0]["value"], "Ana Torres");

    let other = handler.execute_tool("recall", json!({}), &bo).await.unwrap();
    assert!(other.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_tool_name_is_an_error() {
    let storage = test_storage().await;
    let handler = TicketToolHandler::new(
        TicketService::new(storage.tickets()),
        storage.memories(),
    );
    let ctx = RunContext {
        user_id: "u".to_string(),
        thread_id: "t".to_string(),
    };

    let err = handler
        .execute_tool("escalate_ticket", json!({}), &ctx)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Tool not found"));
}

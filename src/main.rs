use clap::Parser;
use std::sync::Arc;
use std::time::Instant;

use triage::adapters::{AppState, TicketToolHandler};
use triage::agents::ReActAgent;
use triage::agents::llm::OpenAiProvider;
use triage::agents::memory::SqlxConversationStore;
use triage::cli::Cli;
use triage::config::Settings;
use triage::persistence::Storage;
use triage::tickets::TicketService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "triage=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    tracing::info!(
        host = %settings.server.host,
        port = settings.server.port,
        model = %settings.llm.model,
        "Starting triage"
    );

    let storage = Storage::connect(&settings.database).await?;
    let result = storage.migrate().await?;
    tracing::info!(
        applied = result.applied,
        skipped = result.skipped,
        "Database migrations complete"
    );

    let llm = Arc::new(OpenAiProvider::new(&settings.llm)?);
    let conversations = Arc::new(SqlxConversationStore::new(storage.pool().clone()));
    let tools = Arc::new(TicketToolHandler::new(
        TicketService::new(storage.tickets()),
        storage.memories(),
    ));
    let agent = Arc::new(ReActAgent::new(
        settings.agent.clone(),
        llm,
        conversations,
        tools,
    ));

    let state = AppState {
        agent,
        storage,
        started_at: Instant::now(),
    };
    let app = triage::create_app(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}

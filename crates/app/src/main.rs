use std::{net::SocketAddr, sync::Arc};

use advisor::{Assistant, DEFAULT_ENDPOINT, DEFAULT_MODEL, DisabledAssistant, GeminiClient};
use baas::{MemoryStore, Store, SupabaseClient, SupabaseStore};
use chrono_tz::Tz;
use server::ServerState;

mod settings;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "spendosense={level},server={level},baas={level},advisor={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let timezone: Tz = settings
        .app
        .timezone
        .parse()
        .map_err(|err| format!("invalid timezone {}: {err}", settings.app.timezone))?;

    let store = build_store(settings.supabase.as_ref())?;
    let assistant = build_assistant(settings.gemini.as_ref());

    let addr: SocketAddr = format!("{}:{}", settings.server.bind, settings.server.port).parse()?;
    server::run(ServerState::new(store, assistant, timezone), addr).await;

    Ok(())
}

fn build_store(config: Option<&settings::Supabase>) -> Result<Arc<dyn Store>, BoxError> {
    match config {
        Some(supabase) => {
            tracing::info!("Found supabase settings...");
            let client = SupabaseClient::new(&supabase.url, &supabase.anon_key)?;
            Ok(Arc::new(SupabaseStore::new(client)))
        }
        None => {
            tracing::warn!("no supabase settings, data is kept in memory");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

fn build_assistant(config: Option<&settings::Gemini>) -> Arc<dyn Assistant> {
    let Some(gemini) = config else {
        tracing::warn!("no gemini settings, chat answers with the fallback reply");
        return Arc::new(DisabledAssistant);
    };

    match GeminiClient::new(
        gemini.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT),
        &gemini.api_key,
        gemini.model.as_deref().unwrap_or(DEFAULT_MODEL),
    ) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            tracing::error!("failed to initialize gemini client: {err}");
            Arc::new(DisabledAssistant)
        }
    }
}

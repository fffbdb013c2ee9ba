use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use seo_scanner::{
    AppState,
    api::routes::create_router,
    config::Config,
    dictionary::PronunciationDictionary,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("seo_scanner=info".parse()?),
        )
        .init();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;

    // Without a dictionary every word goes through the heuristic counter
    let dictionary = match PronunciationDictionary::load(&config.dictionary_path) {
        Ok(dictionary) if dictionary.is_empty() => {
            warn!(path = %config.dictionary_path.display(), "pronunciation dictionary has no entries, using heuristic syllable counts");
            dictionary
        }
        Ok(dictionary) => {
            info!(entries = dictionary.len(), path = %config.dictionary_path.display(), "loaded pronunciation dictionary");
            dictionary
        }
        Err(err) => {
            warn!(error = %err, "pronunciation dictionary unavailable, using heuristic syllable counts");
            PronunciationDictionary::empty()
        }
    };

    let app_state = AppState::new(&config, Arc::new(dictionary))?;
    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    info!(%server_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

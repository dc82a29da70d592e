//! People API server: settings from env, store from settings, router from the library.
//!
//! Run from repo root: `cargo run -p people-server`
//! Without a database: `PEOPLE_STORE=memory cargo run -p people-server`

use people_api::{app, init_tracing, store, AppState, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    init_tracing(&settings)?;

    let store = store::connect(&settings).await?;
    let state = AppState::new(store);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("people api listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state, &settings))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
}

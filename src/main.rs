use camp_rs::config::Config;
use camp_rs::database::setup_database;
use camp_rs::google;
use camp_rs::router::create_router;
use camp_rs::storage::StorageClient;
use oauth2::{AuthUrl, TokenUrl, basic::BasicClient};
use tokio::{net::TcpListener, signal, task::AbortHandle};
use axum_login::tower_sessions::ExpiredDeletion;
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.rust_log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (db, pool) = setup_database(&config.database_url).await?;

    let session_store = PostgresStore::new(pool);
    session_store.migrate().await?;

    let deletion_task = tokio::task::spawn(
        session_store
            .clone()
            .continuously_delete_expired(tokio::time::Duration::from_secs(60)),
    );

    let auth_url = AuthUrl::new(google::AUTH_URL.to_string())?;
    let token_url = TokenUrl::new(google::TOKEN_URL.to_string())?;
    let client = BasicClient::new(config.client_id)
        .set_client_secret(config.client_secret)
        .set_auth_uri(auth_url)
        .set_token_uri(token_url)
        .set_redirect_uri(config.redirect_url);

    let storage = StorageClient::new(config.storage_url, config.storage_key);

    let app = create_router(db, client, storage, session_store).await?;

    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(deletion_task.abort_handle()))
        .await?;

    deletion_task.await??;

    Ok(())
}

async fn shutdown_signal(deletion_task_abort_handle: AbortHandle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { deletion_task_abort_handle.abort() },
        _ = terminate => { deletion_task_abort_handle.abort() },
    }
}

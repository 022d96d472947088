use anyhow::Context;
use seergate::config::Settings;
use seergate::{Ctx, routes};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .init();

    guard
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = init_tracing();

    let settings = Settings::load().context("failed to load configuration")?;
    let bind_address = settings.server.bind_address.clone();
    let port = settings.server.port;

    let ctx = Ctx::from_settings(settings);

    if let Some(jellyfin) = &ctx.jellyfin {
        match jellyfin.system_info().await {
            Ok(info) => info!(
                "Found Jellyfin server named '{}' on local address '{}'",
                info.server_name, info.local_address
            ),
            Err(err) => warn!("Jellyfin connectivity test failed: {err}"),
        }
    }

    let app = routes::mount()
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    let addr = format!("{bind_address}:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/*****************************************************************************************
 *
 *  stampd – Timestamp-as-a-Service
 *  -------------------------------
 *
 *  Records timestamps under sequential ids handed out by a shared
 *  key-value store. All durable state lives in the store; the service
 *  itself is a stateless request handler.
 *
 *****************************************************************************************/

mod app;
mod config;
mod errors;
mod routes;
mod services;
mod store;

use std::path::PathBuf;

use axum::serve;
use tokio::net::TcpListener;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::FmtSubscriber;

use crate::config::AppConfig;

#[tokio::main]
async fn main() {
    //
    // ────────────────────────────────────────────────────────
    //  Locate config.json (EXE folder or project root)
    // ────────────────────────────────────────────────────────
    //
    let config_path = find_config();

    let mut cfg = match &config_path {
        Some(path) => match AppConfig::load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };
    cfg.apply_env_overrides();

    //
    // ────────────────────────────────────────────────────────
    //  Configure logging
    // ────────────────────────────────────────────────────────
    //
    let level = match cfg.log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    match &config_path {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::warn!("No config.json found, using defaults"),
    }
    tracing::info!("Starting stampd…");
    tracing::info!("Configuration: {:?}", cfg);

    //
    // ────────────────────────────────────────────────────────
    //  Connect the key-value store (the only durable state)
    // ────────────────────────────────────────────────────────
    //
    let store = match store::connect(&cfg.store_url).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Cannot open store at {}: {e}", cfg.store_url);
            std::process::exit(1);
        }
    };

    //
    // ────────────────────────────────────────────────────────
    //  Build Axum app (display + timestamp + system routes)
    // ────────────────────────────────────────────────────────
    //
    let app = app::build_app(store, cfg.clone());

    //
    // ────────────────────────────────────────────────────────
    //  Bind server and start listening
    // ────────────────────────────────────────────────────────
    //
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    tracing::info!("Listening on http://{}", addr);

    serve(listener, app)
        .with_graceful_shutdown(shutdown())
        .await
        .expect("Server error");

    // The store handle drops here, closing the underlying connection.
    tracing::info!("Goodbye.");
}

/// config.json next to the executable, or one directory up (project root
/// during development). `build.rs` copies it beside the binary.
fn find_config() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;

    let candidate = exe_dir.join("config.json");
    if candidate.exists() {
        return Some(candidate);
    }

    let fallback = exe_dir.join("..").join("config.json");
    if fallback.exists() {
        return Some(fallback);
    }

    None
}

//
// ─────────────────────────────────────────────────────────────
//  Graceful shutdown handler
// ─────────────────────────────────────────────────────────────
//
async fn shutdown() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");

    tracing::warn!("CTRL+C received — shutting down…");
}

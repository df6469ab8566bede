// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::Result;
use futures::StreamExt;
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    runtime::{controller::Action, watcher::Config, Controller},
    Api, Client, ResourceExt,
};
use paddock::constants::{
    ERROR_REQUEUE_DURATION_SECS, METRICS_SERVER_PATH, RECONCILE_REQUEUE_DURATION_SECS,
    TOKIO_WORKER_THREADS,
};
use paddock::context::{Context, Settings};
use paddock::errors::{is_transient_error, status_reason_of};
use paddock::metrics;
use paddock::reconcilers::reconcile_namespace;
use paddock::registry::{run_refresh_loop, ClusterRegistry};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
struct ReconcileError(#[from] anyhow::Error);

fn main() -> Result<()> {
    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(TOKIO_WORKER_THREADS)
        .thread_name("paddock-controller")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    // Initialize logging with custom format
    // Format: timestamp file:line LEVEL message
    //
    // Respects RUST_LOG environment variable if set, otherwise defaults to INFO level
    // Example: RUST_LOG=debug cargo run
    //
    // Respects RUST_LOG_FORMAT environment variable for output format
    // Example: RUST_LOG_FORMAT=json cargo run
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    info!("Starting Paddock project assignment operator");

    let settings = Settings::from_env();
    debug!(?settings, "resolved runtime settings");

    // Initialize Kubernetes client against the management entry point
    debug!("Initializing Kubernetes client");
    let config = kube::Config::infer().await?;
    let client = Client::try_from(config.clone())?;
    debug!("Kubernetes client initialized successfully");

    let registry = Arc::new(ClusterRegistry::new(client.clone(), config));

    let ctx = Arc::new(Context {
        client: client.clone(),
        registry: Arc::clone(&registry),
        settings: settings.clone(),
    });

    // Root shutdown signal: flips on SIGINT and stops the background tasks
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for shutdown signal");
            return;
        }
        let _ = shutdown_tx.send(true);
    });

    info!("Starting namespace controller");

    // Run the controller, the registry refresh loop and the metrics server
    // concurrently. The refresh loop only returns on shutdown; the others
    // should never exit on their own.
    tokio::select! {
        result = run_namespace_controller(Arc::clone(&ctx)) => {
            error!("CRITICAL: Namespace controller exited unexpectedly: {:?}", result);
            result?;
            anyhow::bail!("Namespace controller exited unexpectedly without error")
        }
        result = serve_metrics(settings.metrics_addr) => {
            error!("CRITICAL: metrics server exited unexpectedly: {:?}", result);
            result?;
            anyhow::bail!("metrics server exited unexpectedly without error")
        }
        () = run_refresh_loop(registry, settings.registry_refresh_interval, shutdown_rx) => {
            info!("Shutdown signal received, exiting");
        }
    }

    Ok(())
}

/// Run the `Namespace` controller
async fn run_namespace_controller(ctx: Arc<Context>) -> Result<()> {
    let api = Api::<Namespace>::all(ctx.client.clone());

    Controller::new(api, Config::default())
        .run(reconcile_namespace_wrapper, error_policy, ctx)
        .for_each(|_| futures::future::ready(()))
        .await;

    Ok(())
}

/// Reconcile wrapper for `Namespace`
async fn reconcile_namespace_wrapper(
    namespace: Arc<Namespace>,
    ctx: Arc<Context>,
) -> Result<Action, ReconcileError> {
    let name = namespace.name_any();
    let started = Instant::now();

    match reconcile_namespace(&ctx, &name).await {
        Ok(outcome) => {
            metrics::record_reconciliation(outcome.metric_label(), started.elapsed());
            if !outcome.changed() {
                debug!(
                    namespace = %name,
                    outcome = outcome.metric_label(),
                    "reconciliation finished without changes"
                );
            }
            Ok(Action::requeue(Duration::from_secs(
                RECONCILE_REQUEUE_DURATION_SECS,
            )))
        }
        Err(e) => {
            metrics::record_reconciliation_error(started.elapsed(), status_reason_of(&e));
            if is_transient_error(&e) {
                warn!(namespace = %name, error = %e, "failed to reconcile namespace, will retry");
            } else {
                error!(namespace = %name, error = %e, "failed to reconcile namespace");
            }
            Err(e.into())
        }
    }
}

/// Error policy for the namespace controller
fn error_policy(_resource: Arc<Namespace>, _err: &ReconcileError, _ctx: Arc<Context>) -> Action {
    Action::requeue(Duration::from_secs(ERROR_REQUEUE_DURATION_SECS))
}

/// Serve Prometheus metrics over HTTP
async fn serve_metrics(addr: SocketAddr) -> Result<()> {
    let app = axum::Router::new().route(METRICS_SERVER_PATH, axum::routing::get(metrics_handler));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "serving Prometheus metrics");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn metrics_handler() -> (axum::http::StatusCode, String) {
    match metrics::gather_metrics() {
        Ok(body) => (axum::http::StatusCode::OK, body),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to encode metrics: {e}"),
        ),
    }
}

use backend::client::HttpBackend;
use clap::Parser;
use cli::Args;
use racers::models::RacerId;
use racers::tracker::RacerTracker;
use session::RaceSession;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

mod app_context;
mod backend;
mod cli;
mod health;
mod http;
mod logging;
mod map;
mod racers;
mod session;
mod storage;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(&args);

    let local_racer = RacerId::new(args.racer_id.clone());
    let backend = HttpBackend::new(args.backend_url.clone(), &args.race_id, local_racer.clone())
        .expect("Failed to configure the race backend client.");
    let session = RaceSession::new(
        backend,
        RacerTracker::new(local_racer),
        Duration::from_secs(args.poll_interval_secs),
    );
    let router = http::router::new(&args, session.app_context());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let session_task = tokio::spawn(session.run(shutdown_rx));

    let listener = TcpListener::bind(args.listen_address)
        .await
        .expect("Failed to bind the listen address.");
    tracing::info!(
        race_id = %args.race_id,
        listen_address = %args.listen_address,
        "Race tracker is up."
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
            }
            let _ = shutdown_tx.send(true);
        })
        .await
        .expect("HTTP server failed.");
    if let Err(e) = session_task.await {
        tracing::error!(error = %e, "Race session panicked.");
    }
}

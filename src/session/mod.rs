use crate::app_context::AppContext;
use crate::backend::{Backend, DestinationStore, Leaderboard, LocationFeed, LocationSink};
use crate::map::models::LatLng;
use crate::racers::events::TrackerEvent;
use crate::racers::models::RacerId;
use crate::racers::tracker::RacerTracker;
use crate::storage::tracker::TrackerStorage;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::time::{self, MissedTickBehavior};

pub mod consts;

/// Drives a tracker for one race: polls the backend on a fixed cadence, applies the destination
/// once it is published and reports the local racer's progress back.
pub struct RaceSession<B: Backend + 'static> {
    backend: Arc<B>,
    tracker: TrackerStorage,
    events: broadcast::Sender<TrackerEvent>,
    reports: mpsc::UnboundedReceiver<TrackerEvent>,
    local_racer: RacerId,
    poll_interval: Duration,
}

impl<B: Backend + 'static> RaceSession<B> {
    pub fn new(backend: B, mut tracker: RacerTracker, poll_interval: Duration) -> Self {
        let (events, _) = broadcast::channel(consts::EVENTS_CHANNEL_CAPACITY);
        let (reports_tx, reports) = mpsc::unbounded_channel();
        tracker.subscribe(events.clone());
        tracker.subscribe(reports_tx);
        let local_racer = tracker.local_racer().clone();
        Self {
            backend: Arc::new(backend),
            tracker: TrackerStorage::new(tracker),
            events,
            reports,
            local_racer,
            poll_interval,
        }
    }

    pub fn app_context(&self) -> AppContext {
        AppContext {
            tracker: self.tracker.clone(),
            events: self.events.clone(),
        }
    }

    /// Runs until `shutdown` changes or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let RaceSession {
            backend,
            tracker,
            reports,
            local_racer,
            poll_interval,
            ..
        } = self;
        tracing::info!(
            task = "race_session",
            local_racer = %local_racer,
            poll_interval_ms = poll_interval.as_millis() as u64,
            "Race session started."
        );
        let (reporter_stop, reporter_stop_rx) = oneshot::channel();
        let mut reporter = tokio::spawn(report_progress(
            backend.clone(),
            local_racer,
            reports,
            reporter_stop_rx,
        ));
        let (destination_tx, mut destination_rx) = mpsc::channel(1);
        let destination_fetch = tokio::spawn(fetch_destination(
            backend.clone(),
            poll_interval,
            destination_tx,
        ));
        let mut ticker = time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => poll_racers(backend.as_ref(), &tracker).await,
                Some(destination) = destination_rx.recv() => {
                    tracker.set_destination(destination).await;
                }
                _ = shutdown.changed() => break,
            }
        }
        destination_fetch.abort();
        let _ = reporter_stop.send(());
        match time::timeout(consts::REPORTER_GRACE_PERIOD, &mut reporter).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!(task = "race_session", error = %e, "Reporter panicked."),
            Err(_) => {
                tracing::warn!(
                    task = "race_session",
                    grace_period_ms = consts::REPORTER_GRACE_PERIOD.as_millis() as u64,
                    "Reporter did not finish in time, dropping pending reports."
                );
                reporter.abort();
            }
        }
        tracing::info!(task = "race_session", "Race session stopped.");
    }
}

/// One polling cycle. A failed fetch skips the cycle and leaves the tracker untouched.
pub(crate) async fn poll_racers<B: Backend>(backend: &B, tracker: &TrackerStorage) {
    match backend.fetch_racers().await {
        Ok(racers) => {
            tracing::debug!(task = "racers_poll", reported = racers.len());
            tracker.ingest(racers).await;
        }
        Err(e) => {
            tracing::warn!(task = "racers_poll", error = %e, "Skipping this polling cycle.");
        }
    }
}

/// Keeps asking for the destination until the backend publishes one.
pub(crate) async fn fetch_destination<D: DestinationStore>(
    backend: Arc<D>,
    retry_interval: Duration,
    destination_tx: mpsc::Sender<LatLng>,
) {
    loop {
        match backend.fetch_destination().await {
            Ok(Some(destination)) => {
                tracing::info!(
                    task = "destination_fetch",
                    lat = destination.lat,
                    lng = destination.lng,
                    "Race destination received."
                );
                let _ = destination_tx.send(destination).await;
                return;
            }
            Ok(None) => {
                tracing::debug!(task = "destination_fetch", "Destination not published yet.");
            }
            Err(e) => {
                tracing::warn!(task = "destination_fetch", error = %e, "Failed to fetch the destination.");
            }
        }
        time::sleep(retry_interval).await;
    }
}

/// Pushes every new position of the local racer to the backend and records the finish once the
/// tracker reports the arrival. Failures are logged and not retried.
///
/// Once `stop` fires, reports already queued are still sent before returning.
pub(crate) async fn report_progress<B: LocationSink + Leaderboard>(
    backend: Arc<B>,
    local_racer: RacerId,
    mut reports: mpsc::UnboundedReceiver<TrackerEvent>,
    mut stop: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            biased;
            event = reports.recv() => match event {
                Some(event) => report(backend.as_ref(), &local_racer, event).await,
                None => return,
            },
            _ = &mut stop => break,
        }
    }
    while let Ok(event) = reports.try_recv() {
        report(backend.as_ref(), &local_racer, event).await;
    }
}

async fn report<B: LocationSink + Leaderboard>(
    backend: &B,
    local_racer: &RacerId,
    event: TrackerEvent,
) {
    if let TrackerEvent::UserArrived {
        racer_id,
        timestamp,
    } = &event
    {
        match backend.record_finish(racer_id, *timestamp).await {
            Ok(()) => tracing::info!(
                task = "finish_recorded",
                racer_id = %racer_id,
                timestamp
            ),
            Err(e) => tracing::error!(
                task = "finish_recorded",
                racer_id = %racer_id,
                error = %e,
                "Failed to record the finish."
            ),
        }
        return;
    }
    match event.moved_racer() {
        Some((racer_id, location)) if racer_id == local_racer => {
            if let Err(e) = backend.push_location(location).await {
                tracing::warn!(task = "location_push", error = %e, "Failed to push location.");
            }
        }
        _ => {}
    }
}

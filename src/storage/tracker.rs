use crate::map::models::LatLng;
use crate::racers::models::{RacerId, RacerLocation, TrackedRacer};
use crate::racers::tracker::RacerTracker;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The race tracker, shared between the polling session (the only writer) and HTTP readers.
#[derive(Clone)]
pub struct TrackerStorage {
    tracker: Arc<RwLock<RacerTracker>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RaceSnapshot {
    pub local_racer: RacerId,
    pub racers: Vec<TrackedRacer>,
    pub destination: Option<LatLng>,
    pub arrived: bool,
}

impl TrackerStorage {
    pub fn new(tracker: RacerTracker) -> Self {
        Self {
            tracker: Arc::new(RwLock::new(tracker)),
        }
    }

    pub async fn ingest(&self, snapshots: Vec<RacerLocation>) {
        self.tracker.write().await.ingest(snapshots);
    }

    pub async fn set_destination(&self, destination: LatLng) {
        self.tracker.write().await.set_destination(destination);
    }

    pub async fn tracked_racers_count(&self) -> usize {
        self.tracker.read().await.racers().len()
    }

    pub async fn snapshot(&self) -> RaceSnapshot {
        let tracker = self.tracker.read().await;
        RaceSnapshot {
            local_racer: tracker.local_racer().clone(),
            racers: tracker.racers().into_iter().cloned().collect(),
            destination: tracker.destination(),
            arrived: tracker.has_arrived(),
        }
    }
}

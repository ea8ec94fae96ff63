//! The race backend, as seen by the tracker: where racer positions come from and where the local
//! racer's position and finish time go.

use crate::map::models::LatLng;
use crate::racers::models::{RacerId, RacerLocation};
use async_trait::async_trait;
use errors::BackendError;

pub mod client;
pub mod errors;
pub mod payloads;

#[async_trait]
pub trait LocationFeed: Send + Sync {
    /// Latest known position of every racer that reported since the last cycle.
    async fn fetch_racers(&self) -> Result<Vec<RacerLocation>, BackendError>;
}

#[async_trait]
pub trait DestinationStore: Send + Sync {
    /// `None` while the race destination has not been published.
    async fn fetch_destination(&self) -> Result<Option<LatLng>, BackendError>;
}

#[async_trait]
pub trait LocationSink: Send + Sync {
    async fn push_location(&self, location: LatLng) -> Result<(), BackendError>;
}

#[async_trait]
pub trait Leaderboard: Send + Sync {
    async fn record_finish(&self, racer_id: &RacerId, timestamp: u64) -> Result<(), BackendError>;
}

pub trait Backend: LocationFeed + DestinationStore + LocationSink + Leaderboard {}

impl<B> Backend for B where B: LocationFeed + DestinationStore + LocationSink + Leaderboard {}

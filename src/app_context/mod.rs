use crate::racers::events::TrackerEvent;
use crate::storage::tracker::TrackerStorage;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct AppContext {
    pub tracker: TrackerStorage,
    /// Tracker events, fanned out to connected renderers.
    pub events: broadcast::Sender<TrackerEvent>,
}

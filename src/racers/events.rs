use crate::map::models::{Bounds, LatLng};
use crate::racers::models::RacerId;

#[derive(Clone, Debug, PartialEq)]
pub enum TrackerEvent {
    RacerAdded {
        racer_id: RacerId,
        location: LatLng,
    },
    RacerMoved {
        racer_id: RacerId,
        from: LatLng,
        to: LatLng,
    },
    /// Emitted once per ingested batch with every tracked location, so that a renderer can fit
    /// its viewport.
    VisibilityShouldUpdate {
        locations: Vec<LatLng>,
        bounds: Option<Bounds>,
        /// `false` only for the first visibility update of a tracker.
        animated: bool,
    },
    UserArrived {
        racer_id: RacerId,
        /// Unix timestamp, in seconds.
        timestamp: u64,
    },
}

impl TrackerEvent {
    /// The racer whose position this event reports, if any.
    pub fn moved_racer(&self) -> Option<(&RacerId, LatLng)> {
        match self {
            TrackerEvent::RacerAdded { racer_id, location } => Some((racer_id, *location)),
            TrackerEvent::RacerMoved { racer_id, to, .. } => Some((racer_id, *to)),
            _ => None,
        }
    }
}

/// Something interested in what the tracker observes.
///
/// Listeners are called synchronously while the tracker is being mutated, so they must not block.
pub trait TrackerListener: Send + Sync {
    fn on_event(&self, event: &TrackerEvent);
}

impl TrackerListener for tokio::sync::broadcast::Sender<TrackerEvent> {
    fn on_event(&self, event: &TrackerEvent) {
        // Failing here only means nobody is subscribed right now.
        let _ = self.send(event.clone());
    }
}

impl TrackerListener for tokio::sync::mpsc::UnboundedSender<TrackerEvent> {
    fn on_event(&self, event: &TrackerEvent) {
        let _ = self.send(event.clone());
    }
}

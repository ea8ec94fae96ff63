use crate::map::consts::ARRIVAL_RADIUS_METERS;
use crate::map::models::{Bounds, LatLng};
use crate::racers::events::{TrackerEvent, TrackerListener};
use crate::racers::models::{RacerId, RacerLocation, TrackedRacer};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Last known positions of every racer of a race, plus arrival detection for the local racer.
///
/// The tracker has no clock and does no I/O: it only reacts to the batches handed to
/// [`RacerTracker::ingest`] and reports what changed to its listeners.
pub struct RacerTracker {
    local_racer: RacerId,
    racers: HashMap<RacerId, TrackedRacer>,
    destination: Option<LatLng>,
    arrived: bool,
    visibility_updated: bool,
    listeners: Vec<Box<dyn TrackerListener>>,
}

impl RacerTracker {
    pub fn new(local_racer: RacerId) -> Self {
        Self {
            local_racer,
            racers: HashMap::new(),
            destination: None,
            arrived: false,
            visibility_updated: false,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl TrackerListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn ingest<I>(&mut self, snapshots: I)
    where
        I: IntoIterator<Item = RacerLocation>,
    {
        for RacerLocation { racer_id, location } in snapshots {
            let event = match self.racers.entry(racer_id.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(TrackedRacer {
                        racer_id: racer_id.clone(),
                        location,
                    });
                    tracing::debug!(racer_id = %racer_id, "Started tracking a racer.");
                    TrackerEvent::RacerAdded {
                        racer_id: racer_id.clone(),
                        location,
                    }
                }
                Entry::Occupied(mut entry) => {
                    let tracked = entry.get_mut();
                    debug_assert_eq!(tracked.racer_id, racer_id);
                    let from = std::mem::replace(&mut tracked.location, location);
                    TrackerEvent::RacerMoved {
                        racer_id: racer_id.clone(),
                        from,
                        to: location,
                    }
                }
            };
            self.emit(event);
            if racer_id == self.local_racer {
                self.on_local_racer_moved(location);
            }
        }
        self.update_visibility();
    }

    /// Last write wins. Does not check arrival by itself; the next position of the local racer
    /// will.
    pub fn set_destination(&mut self, destination: LatLng) {
        if self.destination.is_some() {
            tracing::info!(
                task = "destination_changed",
                lat = destination.lat,
                lng = destination.lng,
            );
        }
        self.destination = Some(destination);
    }

    pub fn is_at_destination(&self, location: LatLng) -> bool {
        match self.destination {
            Some(destination) => location.distance_to(destination) < ARRIVAL_RADIUS_METERS,
            None => false,
        }
    }

    pub fn local_racer(&self) -> &RacerId {
        &self.local_racer
    }

    pub fn destination(&self) -> Option<LatLng> {
        self.destination
    }

    pub fn has_arrived(&self) -> bool {
        self.arrived
    }

    pub fn location_of(&self, racer_id: &RacerId) -> Option<LatLng> {
        self.racers.get(racer_id).map(|racer| racer.location)
    }

    /// Every tracked racer, ordered by id.
    pub fn racers(&self) -> Vec<&TrackedRacer> {
        let mut racers = self.racers.values().collect::<Vec<_>>();
        racers.sort_by(|a, b| a.racer_id.cmp(&b.racer_id));
        racers
    }

    fn on_local_racer_moved(&mut self, location: LatLng) {
        if self.arrived || !self.is_at_destination(location) {
            return;
        }
        self.arrived = true;
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        tracing::info!(
            task = "user_arrived",
            racer_id = %self.local_racer,
            timestamp,
        );
        self.emit(TrackerEvent::UserArrived {
            racer_id: self.local_racer.clone(),
            timestamp,
        });
    }

    fn update_visibility(&mut self) {
        let locations = self
            .racers()
            .into_iter()
            .map(|racer| racer.location)
            .collect::<Vec<_>>();
        let bounds = Bounds::enclosing(&locations);
        let animated = self.visibility_updated;
        self.visibility_updated = true;
        self.emit(TrackerEvent::VisibilityShouldUpdate {
            locations,
            bounds,
            animated,
        });
    }

    fn emit(&self, event: TrackerEvent) {
        for listener in self.listeners.iter() {
            listener.on_event(&event);
        }
    }
}

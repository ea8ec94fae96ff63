use crate::map::models::{Bounds, LatLng};
use crate::map::tests::{offset_north, vancouver};
use crate::racers::events::{TrackerEvent, TrackerListener};
use crate::racers::message_types::ServerSentSocketMessage;
use crate::racers::models::{RacerId, RacerLocation};
use crate::racers::tracker::RacerTracker;
use serde_json::json;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct RecordingListener {
    events: Arc<Mutex<Vec<TrackerEvent>>>,
}

impl RecordingListener {
    fn take(&self) -> Vec<TrackerEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl TrackerListener for RecordingListener {
    fn on_event(&self, event: &TrackerEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn me() -> RacerId {
    RacerId::new("me")
}

fn tracker() -> (RacerTracker, RecordingListener) {
    let mut tracker = RacerTracker::new(me());
    let listener = RecordingListener::default();
    tracker.subscribe(listener.clone());
    (tracker, listener)
}

fn arrivals(events: &[TrackerEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, TrackerEvent::UserArrived { .. }))
        .count()
}

fn visibility_updates(events: &[TrackerEvent]) -> Vec<&TrackerEvent> {
    events
        .iter()
        .filter(|event| matches!(event, TrackerEvent::VisibilityShouldUpdate { .. }))
        .collect()
}

#[test]
fn empty_ingest_only_updates_visibility() {
    let (mut tracker, listener) = tracker();

    for _ in 0..3 {
        tracker.ingest(vec![]);
        let events = listener.take();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            TrackerEvent::VisibilityShouldUpdate { locations, bounds: None, .. } if locations.is_empty()
        ));
    }
}

#[test]
fn first_sighting_adds_then_later_ones_move() {
    let (mut tracker, listener) = tracker();
    let first = vancouver();
    let second = offset_north(vancouver(), 20.0);

    tracker.ingest(vec![RacerLocation::new("a", first)]);
    let events = listener.take();
    assert_eq!(
        events[0],
        TrackerEvent::RacerAdded {
            racer_id: RacerId::new("a"),
            location: first,
        }
    );

    tracker.ingest(vec![RacerLocation::new("a", second)]);
    let events = listener.take();
    assert_eq!(
        events[0],
        TrackerEvent::RacerMoved {
            racer_id: RacerId::new("a"),
            from: first,
            to: second,
        }
    );
    assert!(!events
        .iter()
        .any(|event| matches!(event, TrackerEvent::RacerAdded { .. })));
    assert_eq!(tracker.location_of(&RacerId::new("a")), Some(second));
}

#[test]
fn visibility_is_updated_once_per_batch_after_racer_events() {
    let (mut tracker, listener) = tracker();

    tracker.ingest(vec![
        RacerLocation::new("a", vancouver()),
        RacerLocation::new("b", offset_north(vancouver(), 100.0)),
        RacerLocation::new("c", offset_north(vancouver(), 200.0)),
    ]);

    let events = listener.take();
    assert_eq!(events.len(), 4);
    assert_eq!(visibility_updates(&events).len(), 1);
    assert!(matches!(
        events.last(),
        Some(TrackerEvent::VisibilityShouldUpdate { .. })
    ));
}

#[test]
fn repeated_racer_in_one_batch_ends_at_its_last_location() {
    let (mut tracker, listener) = tracker();
    let last = offset_north(vancouver(), 40.0);

    tracker.ingest(vec![
        RacerLocation::new("a", vancouver()),
        RacerLocation::new("a", last),
    ]);

    let events = listener.take();
    assert!(matches!(events[0], TrackerEvent::RacerAdded { .. }));
    assert!(matches!(events[1], TrackerEvent::RacerMoved { to, .. } if to == last));
    assert_eq!(tracker.racers().len(), 1);
    assert_eq!(tracker.location_of(&RacerId::new("a")), Some(last));
}

#[test]
fn only_the_first_visibility_update_is_not_animated() {
    let (mut tracker, listener) = tracker();

    tracker.ingest(vec![]);
    tracker.ingest(vec![RacerLocation::new("a", vancouver())]);
    tracker.ingest(vec![]);

    let animated = visibility_updates(&listener.take())
        .into_iter()
        .map(|event| match event {
            TrackerEvent::VisibilityShouldUpdate { animated, .. } => *animated,
            _ => unreachable!(),
        })
        .collect::<Vec<_>>();
    assert_eq!(animated, vec![false, true, true]);
}

#[test]
fn arrival_is_reported_exactly_once() {
    let (mut tracker, listener) = tracker();
    let destination = vancouver();
    tracker.set_destination(destination);
    let near = offset_north(destination, 50.0);

    tracker.ingest(vec![RacerLocation::new("me", near)]);
    let events = listener.take();
    assert_eq!(arrivals(&events), 1);
    assert!(tracker.has_arrived());

    tracker.ingest(vec![RacerLocation::new("me", near)]);
    tracker.ingest(vec![RacerLocation::new("me", destination)]);
    assert_eq!(arrivals(&listener.take()), 0);
    assert!(tracker.has_arrived());
}

#[test]
fn arrival_event_names_the_local_racer() {
    let (mut tracker, listener) = tracker();
    tracker.set_destination(vancouver());

    tracker.ingest(vec![RacerLocation::new("me", vancouver())]);

    let events = listener.take();
    let arrival = events
        .iter()
        .find(|event| matches!(event, TrackerEvent::UserArrived { .. }))
        .unwrap();
    assert!(matches!(
        arrival,
        TrackerEvent::UserArrived { racer_id, timestamp } if *racer_id == me() && *timestamp > 0
    ));
    // Reported between the racer update and the visibility update.
    assert!(matches!(events[0], TrackerEvent::RacerAdded { .. }));
    assert!(matches!(events[1], TrackerEvent::UserArrived { .. }));
    assert!(matches!(events[2], TrackerEvent::VisibilityShouldUpdate { .. }));
}

#[test]
fn no_arrival_outside_the_radius() {
    let (mut tracker, listener) = tracker();
    tracker.set_destination(vancouver());
    let far = offset_north(vancouver(), 150.0);

    for _ in 0..5 {
        tracker.ingest(vec![RacerLocation::new("me", far)]);
    }

    assert_eq!(arrivals(&listener.take()), 0);
    assert!(!tracker.has_arrived());
}

#[test]
fn other_racers_at_the_destination_do_not_count() {
    let (mut tracker, listener) = tracker();
    tracker.set_destination(vancouver());

    tracker.ingest(vec![RacerLocation::new("rival", vancouver())]);

    assert_eq!(arrivals(&listener.take()), 0);
    assert!(!tracker.has_arrived());
}

#[test]
fn unset_destination_is_never_reached() {
    let (mut tracker, listener) = tracker();

    for location in [
        LatLng::new(0.0, 0.0),
        vancouver(),
        LatLng::new(-90.0, 180.0),
    ] {
        assert!(!tracker.is_at_destination(location));
    }
    tracker.ingest(vec![RacerLocation::new("me", LatLng::new(0.0, 0.0))]);
    assert_eq!(arrivals(&listener.take()), 0);
}

#[test]
fn arrival_radius_is_exclusive() {
    let (mut tracker, _listener) = tracker();
    tracker.set_destination(vancouver());

    assert!(tracker.is_at_destination(offset_north(vancouver(), 99.5)));
    assert!(!tracker.is_at_destination(offset_north(vancouver(), 100.5)));
}

#[test]
fn destination_is_last_write_wins() {
    let (mut tracker, listener) = tracker();
    tracker.set_destination(offset_north(vancouver(), 5_000.0));
    tracker.set_destination(vancouver());

    assert_eq!(tracker.destination(), Some(vancouver()));
    assert!(listener.take().is_empty());
    tracker.ingest(vec![RacerLocation::new("me", vancouver())]);
    assert_eq!(arrivals(&listener.take()), 1);
}

#[test]
fn late_destination_applies_to_later_updates() {
    let (mut tracker, listener) = tracker();
    tracker.ingest(vec![RacerLocation::new("me", vancouver())]);

    tracker.set_destination(vancouver());
    assert_eq!(arrivals(&listener.take()), 0);

    tracker.ingest(vec![RacerLocation::new("me", vancouver())]);
    assert_eq!(arrivals(&listener.take()), 1);
}

#[test]
fn racers_are_tracked_independently() {
    let (mut tracker, listener) = tracker();
    let b_location = offset_north(vancouver(), 500.0);
    tracker.ingest(vec![
        RacerLocation::new("a", vancouver()),
        RacerLocation::new("b", b_location),
    ]);
    listener.take();

    let a_moved = offset_north(vancouver(), 30.0);
    tracker.ingest(vec![RacerLocation::new("a", a_moved)]);

    assert_eq!(tracker.location_of(&RacerId::new("b")), Some(b_location));
    let events = listener.take();
    let visibility = visibility_updates(&events);
    assert_eq!(
        *visibility[0],
        TrackerEvent::VisibilityShouldUpdate {
            locations: vec![a_moved, b_location],
            bounds: Bounds::enclosing(&[a_moved, b_location]),
            animated: true,
        }
    );
}

#[test]
fn every_listener_hears_every_event() {
    let (mut tracker, first) = tracker();
    let second = RecordingListener::default();
    tracker.subscribe(second.clone());

    tracker.ingest(vec![RacerLocation::new("a", vancouver())]);

    let first = first.take();
    assert_eq!(first.len(), 2);
    assert_eq!(first, second.take());
}

#[test]
fn events_are_sent_to_renderers_as_tagged_json() {
    let message = ServerSentSocketMessage::from(TrackerEvent::RacerMoved {
        racer_id: RacerId::new("a"),
        from: LatLng::new(1.0, 2.0),
        to: LatLng::new(3.0, 4.0),
    });

    let value = serde_json::to_value(&message).unwrap();

    assert_eq!(value["type"], "RacerMoved");
    assert_eq!(
        value["payload"],
        json!({
            "racerId": "a",
            "from": {"lat": 1.0, "lng": 2.0},
            "to": {"lat": 3.0, "lng": 4.0},
        })
    );
}

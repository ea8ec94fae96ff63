use crate::map::models::{Bounds, LatLng};
use crate::racers::events::TrackerEvent;
use crate::racers::models::RacerId;
use serde::Serialize;
use serde_unit_struct::{Deserialize_unit_struct, Serialize_unit_struct};

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ServerSentSocketMessage {
    RacerAdded {
        r#type: RacerAdded,
        payload: RacerAddedPayload,
    },
    RacerMoved {
        r#type: RacerMoved,
        payload: RacerMovedPayload,
    },
    VisibilityShouldUpdate {
        r#type: VisibilityShouldUpdate,
        payload: VisibilityPayload,
    },
    UserArrived {
        r#type: UserArrived,
        payload: UserArrivedPayload,
    },
}

impl From<TrackerEvent> for ServerSentSocketMessage {
    fn from(event: TrackerEvent) -> Self {
        match event {
            TrackerEvent::RacerAdded { racer_id, location } => Self::RacerAdded {
                r#type: RacerAdded,
                payload: RacerAddedPayload { racer_id, location },
            },
            TrackerEvent::RacerMoved { racer_id, from, to } => Self::RacerMoved {
                r#type: RacerMoved,
                payload: RacerMovedPayload { racer_id, from, to },
            },
            TrackerEvent::VisibilityShouldUpdate {
                locations,
                bounds,
                animated,
            } => Self::VisibilityShouldUpdate {
                r#type: VisibilityShouldUpdate,
                payload: VisibilityPayload {
                    locations,
                    bounds,
                    animated,
                },
            },
            TrackerEvent::UserArrived {
                racer_id,
                timestamp,
            } => Self::UserArrived {
                r#type: UserArrived,
                payload: UserArrivedPayload {
                    racer_id,
                    timestamp,
                },
            },
        }
    }
}

#[derive(Debug, Serialize_unit_struct, Deserialize_unit_struct)]
pub struct RacerAdded;

#[derive(Debug, Serialize_unit_struct, Deserialize_unit_struct)]
pub struct RacerMoved;

#[derive(Debug, Serialize_unit_struct, Deserialize_unit_struct)]
pub struct VisibilityShouldUpdate;

#[derive(Debug, Serialize_unit_struct, Deserialize_unit_struct)]
pub struct UserArrived;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RacerAddedPayload {
    pub racer_id: RacerId,
    pub location: LatLng,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RacerMovedPayload {
    pub racer_id: RacerId,
    pub from: LatLng,
    pub to: LatLng,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityPayload {
    pub locations: Vec<LatLng>,
    pub bounds: Option<Bounds>,
    pub animated: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserArrivedPayload {
    pub racer_id: RacerId,
    pub timestamp: u64,
}

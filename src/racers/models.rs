use crate::map::models::LatLng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one race participant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RacerId(String);

impl RacerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for RacerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RacerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One reported observation of a racer, as delivered by the location feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RacerLocation {
    pub racer_id: RacerId,
    pub location: LatLng,
}

impl RacerLocation {
    pub fn new(racer_id: impl Into<RacerId>, location: LatLng) -> Self {
        Self {
            racer_id: racer_id.into(),
            location,
        }
    }
}

/// Last known position of a racer, as remembered by the tracker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedRacer {
    pub racer_id: RacerId,
    pub location: LatLng,
}

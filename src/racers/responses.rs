use crate::map::models::LatLng;
use crate::racers::models::{RacerId, TrackedRacer};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceStatusResponse {
    pub error: bool,
    pub local_racer: RacerId,
    /// Ordered by racer id.
    pub racers: Vec<TrackedRacer>,
    pub destination: Option<LatLng>,
    pub arrived: bool,
}

use crate::map::models::LatLng;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DestinationPayload {
    pub location: LatLng,
}

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance in meters.
    pub fn distance_to(&self, other: LatLng) -> f64 {
        crate::map::distance(*self, other)
    }
}

/// Smallest lat/lng box containing a set of points.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    pub fn enclosing<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a LatLng>,
    {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let bounds = points.fold(
            Bounds {
                south_west: first,
                north_east: first,
            },
            |mut bounds, point| {
                bounds.south_west.lat = bounds.south_west.lat.min(point.lat);
                bounds.south_west.lng = bounds.south_west.lng.min(point.lng);
                bounds.north_east.lat = bounds.north_east.lat.max(point.lat);
                bounds.north_east.lng = bounds.north_east.lng.max(point.lng);
                bounds
            },
        );
        Some(bounds)
    }
}

pub const EARTH_RADIUS: f64 = 6371e3;

/// How close (in meters) the local racer has to get to the destination to count as arrived.
/// Covers GPS imprecision plus a walkable buffer around the destination point.
pub const ARRIVAL_RADIUS_METERS: f64 = 100.0;

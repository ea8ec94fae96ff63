use crate::backend::errors::BackendError;
use crate::backend::payloads::DestinationPayload;
use crate::backend::{DestinationStore, Leaderboard, LocationFeed, LocationSink};
use crate::map::models::LatLng;
use crate::racers::models::{RacerId, RacerLocation};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

/// Talks to the race backend's JSON API under `{backend_url}/races/{race_id}/`.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    backend_url: Url,
    race_id: String,
    local_racer: RacerId,
}

impl HttpBackend {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(backend_url: Url, race_id: &str, local_racer: RacerId) -> Result<Self, BackendError> {
        if backend_url.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl);
        }
        Ok(Self {
            client: Client::new(),
            backend_url,
            race_id: race_id.to_string(),
            local_racer,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.backend_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl)?
            .pop_if_empty()
            .extend(["races", self.race_id.as_str()])
            .extend(segments);
        Ok(url)
    }

    fn ensure_success(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(BackendError::UnexpectedStatus(status))
        }
    }
}

#[async_trait]
impl LocationFeed for HttpBackend {
    async fn fetch_racers(&self) -> Result<Vec<RacerLocation>, BackendError> {
        let url = self.endpoint(&["racers.json"])?;
        let response = self
            .client
            .get(url)
            .timeout(Self::REQUEST_TIMEOUT)
            .send()
            .await?;
        // The backend answers `null` for a race nobody has reported in yet.
        let racers: Option<Vec<RacerLocation>> = Self::ensure_success(response)?.json().await?;
        Ok(racers.unwrap_or_default())
    }
}

#[async_trait]
impl DestinationStore for HttpBackend {
    async fn fetch_destination(&self) -> Result<Option<LatLng>, BackendError> {
        let url = self.endpoint(&["destination.json"])?;
        let response = self
            .client
            .get(url)
            .timeout(Self::REQUEST_TIMEOUT)
            .send()
            .await?;
        let destination: Option<DestinationPayload> =
            Self::ensure_success(response)?.json().await?;
        Ok(destination.map(|payload| payload.location))
    }
}

#[async_trait]
impl LocationSink for HttpBackend {
    async fn push_location(&self, location: LatLng) -> Result<(), BackendError> {
        let file_name = format!("{}.json", self.local_racer);
        let url = self.endpoint(&["locations", &file_name])?;
        let response = self
            .client
            .put(url)
            .timeout(Self::REQUEST_TIMEOUT)
            .json(&location)
            .send()
            .await?;
        Self::ensure_success(response)?;
        Ok(())
    }
}

#[async_trait]
impl Leaderboard for HttpBackend {
    async fn record_finish(&self, racer_id: &RacerId, timestamp: u64) -> Result<(), BackendError> {
        let file_name = format!("{racer_id}.json");
        let url = self.endpoint(&["leaderboard", &file_name])?;
        let response = self
            .client
            .put(url)
            .timeout(Self::REQUEST_TIMEOUT)
            .json(&timestamp)
            .send()
            .await?;
        Self::ensure_success(response)?;
        Ok(())
    }
}

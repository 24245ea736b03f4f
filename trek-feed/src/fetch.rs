use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::warn;
use trek_models::{
    Destination, DestinationId, Photo, PhotoId, Profile, Trip, TripId, UserId,
};
use trek_store::{
    DestinationReader, PhotoReader, ProfileReader, StoreResult, TripReader,
};

use crate::conf::ResolverConfig;
use crate::error::{FeedError, FeedResult};

/// Timeout and bounded-retry policy applied to every entity fetch.
#[derive(Clone, Debug)]
pub struct FetchPolicy {
    pub timeout: Duration,
    pub attempts: u32,
    pub backoff: Duration,
}

impl From<&ResolverConfig> for FetchPolicy {
    fn from(conf: &ResolverConfig) -> Self {
        Self {
            timeout: Duration::from_millis(conf.fetch_timeout_ms),
            attempts: conf.fetch_attempts.max(1),
            backoff: Duration::from_millis(conf.retry_backoff_ms),
        }
    }
}

/// Run one reader call under the fetch policy. Transient store failures and
/// timeouts are retried up to the configured attempts with linear backoff;
/// absence of an entity is not retried, it surfaces as `Ok(None)`.
async fn fetch_with_policy<T, F, Fut>(
    policy: &FetchPolicy,
    what: &'static str,
    op: F,
) -> FeedResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = StoreResult<T>>,
{
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match timeout(policy.timeout, op()).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(err)) if attempt < policy.attempts => {
                warn!(
                    "retrying {} fetch (attempt {}): {}",
                    what, attempt, err
                );
                sleep(policy.backoff * attempt).await;
            }
            Ok(Err(err)) => return Err(FeedError::Upstream(err)),
            Err(_) if attempt < policy.attempts => {
                warn!("{} fetch timed out (attempt {})", what, attempt);
                sleep(policy.backoff * attempt).await;
            }
            Err(_) => {
                return Err(FeedError::FetchTimeout(
                    policy.timeout.as_millis() as u64,
                ))
            }
        }
    }
}

/// Fetches the actor's profile for a resolution.
#[derive(Clone)]
pub struct ProfileFetch {
    reader: Arc<dyn ProfileReader>,
    policy: FetchPolicy,
}

impl ProfileFetch {
    pub fn new(reader: Arc<dyn ProfileReader>, policy: FetchPolicy) -> Self {
        Self { reader, policy }
    }

    pub async fn fetch(&self, id: UserId) -> FeedResult<Profile> {
        fetch_with_policy(&self.policy, "profile", || self.reader.profile(id))
            .await?
            .ok_or(FeedError::ProfileNotFound(id))
    }
}

/// Fetches a referenced destination.
#[derive(Clone)]
pub struct DestinationFetch {
    reader: Arc<dyn DestinationReader>,
    policy: FetchPolicy,
}

impl DestinationFetch {
    pub fn new(
        reader: Arc<dyn DestinationReader>,
        policy: FetchPolicy,
    ) -> Self {
        Self { reader, policy }
    }

    pub async fn fetch(&self, id: DestinationId) -> FeedResult<Destination> {
        fetch_with_policy(&self.policy, "destination", || {
            self.reader.destination(id)
        })
        .await?
        .ok_or(FeedError::DestinationNotFound(id))
    }
}

/// Fetches a referenced trip.
#[derive(Clone)]
pub struct TripFetch {
    reader: Arc<dyn TripReader>,
    policy: FetchPolicy,
}

impl TripFetch {
    pub fn new(reader: Arc<dyn TripReader>, policy: FetchPolicy) -> Self {
        Self { reader, policy }
    }

    pub async fn fetch(&self, id: TripId) -> FeedResult<Trip> {
        fetch_with_policy(&self.policy, "trip", || self.reader.trip(id))
            .await?
            .ok_or(FeedError::TripNotFound(id))
    }
}

/// Fetches one photo or a grouped batch of photos.
#[derive(Clone)]
pub struct PhotoFetch {
    reader: Arc<dyn PhotoReader>,
    policy: FetchPolicy,
}

impl PhotoFetch {
    pub fn new(reader: Arc<dyn PhotoReader>, policy: FetchPolicy) -> Self {
        Self { reader, policy }
    }

    pub async fn fetch(&self, id: PhotoId) -> FeedResult<Photo> {
        fetch_with_policy(&self.policy, "photo", || self.reader.photo(id))
            .await?
            .ok_or(FeedError::PhotoNotFound(id))
    }

    /// Missing ids are omitted from the result; the fetch only fails when
    /// none of the requested photos exist.
    pub async fn fetch_many(
        &self,
        ids: &[PhotoId],
    ) -> FeedResult<Vec<Photo>> {
        let photos = fetch_with_policy(&self.policy, "photos", || {
            self.reader.photos_by_ids(ids)
        })
        .await?;
        if photos.is_empty() && !ids.is_empty() {
            return Err(FeedError::PhotosNotFound(ids.to_vec()));
        }
        Ok(photos)
    }
}

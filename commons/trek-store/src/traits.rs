use async_trait::async_trait;
use trek_models::{
    Destination, DestinationId, Photo, PhotoId, Profile, Trip, TripId, UserId,
};

use crate::StoreResult;

/// Read access to user profiles.
#[async_trait]
pub trait ProfileReader: Send + Sync {
    async fn profile(&self, id: UserId) -> StoreResult<Option<Profile>>;
}

/// Read access to destinations.
#[async_trait]
pub trait DestinationReader: Send + Sync {
    async fn destination(
        &self,
        id: DestinationId,
    ) -> StoreResult<Option<Destination>>;
}

/// Read access to trips.
#[async_trait]
pub trait TripReader: Send + Sync {
    async fn trip(&self, id: TripId) -> StoreResult<Option<Trip>>;
}

/// Read access to photos.
#[async_trait]
pub trait PhotoReader: Send + Sync {
    async fn photo(&self, id: PhotoId) -> StoreResult<Option<Photo>>;

    /// Fetch a batch of photos. Returns one result per found id; missing
    /// ids are omitted, so the output may be shorter than the input.
    async fn photos_by_ids(
        &self,
        ids: &[PhotoId],
    ) -> StoreResult<Vec<Photo>>;
}

use std::sync::Arc;

use futures_util::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use trek_models::{
    DestinationId, EventKind, FeedEvent, RefId, ResponseItem,
};
use trek_store::{
    DestinationReader, PhotoReader, ProfileReader, TripReader,
};

use crate::conf::ResolverConfig;
use crate::error::{FeedError, FeedResult};
use crate::fetch::{
    DestinationFetch, FetchPolicy, PhotoFetch, ProfileFetch, TripFetch,
};
use crate::variants::{
    CoverPhoto, CreateDestination, CreateTrip, GalleryPhotos, LinkPhoto,
    LinkedPhotos, PrimaryPhoto, ProfilePhoto, TripUpdates, UpdateDestination,
    UpdateTrip, UploadedPhoto,
};

/// Maps each event kind to its resolution variant and runs it. Holds one
/// fetcher per entity store; every resolution borrows immutable snapshots
/// only, so resolutions share nothing and run freely in parallel.
pub struct FeedResolver {
    profiles: ProfileFetch,
    destinations: DestinationFetch,
    trips: TripFetch,
    photos: PhotoFetch,
}

impl FeedResolver {
    pub fn new(
        profiles: Arc<dyn ProfileReader>,
        destinations: Arc<dyn DestinationReader>,
        trips: Arc<dyn TripReader>,
        photos: Arc<dyn PhotoReader>,
        conf: &ResolverConfig,
    ) -> Self {
        let policy = FetchPolicy::from(conf);
        Self {
            profiles: ProfileFetch::new(profiles, policy.clone()),
            destinations: DestinationFetch::new(destinations, policy.clone()),
            trips: TripFetch::new(trips, policy.clone()),
            photos: PhotoFetch::new(photos, policy),
        }
    }

    /// Resolve one event into exactly one response item. Every failure
    /// aborts this resolution only; no partial item is ever produced.
    pub async fn resolve(
        &self,
        event: &FeedEvent,
    ) -> FeedResult<ResponseItem> {
        debug!("resolving {} event {}", event.kind.as_tag(), event.id);
        let mut item = match event.kind {
            EventKind::CreatedNewDestination => {
                CreateDestination {
                    actor: self.profiles.clone(),
                    destinations: self.destinations.clone(),
                    actor_id: event.actor_id,
                    dest_id: require_ref(event)?,
                }
                .resolve()
                .await?
            }
            EventKind::UpdatedExistingDestination => {
                UpdateDestination {
                    actor: self.profiles.clone(),
                    destinations: self.destinations.clone(),
                    actor_id: event.actor_id,
                    dest_id: require_ref(event)?,
                }
                .resolve()
                .await?
            }
            EventKind::LinkDestinationPhoto => {
                LinkPhoto {
                    actor: self.profiles.clone(),
                    destinations: self.destinations.clone(),
                    photos: self.photos.clone(),
                    actor_id: event.actor_id,
                    dest_id: require_dest(event)?,
                    photo_id: require_ref(event)?,
                }
                .resolve()
                .await?
            }
            EventKind::NewPrimaryDestinationPhoto => {
                PrimaryPhoto {
                    destinations: self.destinations.clone(),
                    photos: self.photos.clone(),
                    dest_id: require_dest(event)?,
                    photo_id: require_ref(event)?,
                }
                .resolve()
                .await?
            }
            EventKind::MultipleGalleryPhotos => {
                GalleryPhotos {
                    actor: self.profiles.clone(),
                    photos: self.photos.clone(),
                    actor_id: event.actor_id,
                    photo_ids: require_group(event)?,
                    event_ids: event.grouped_event_ids.clone(),
                }
                .resolve()
                .await?
            }
            EventKind::UploadedUserPhoto => {
                UploadedPhoto {
                    actor: self.profiles.clone(),
                    photos: self.photos.clone(),
                    actor_id: event.actor_id,
                    photo_id: require_ref(event)?,
                }
                .resolve()
                .await?
            }
            EventKind::NewProfilePhoto => {
                ProfilePhoto {
                    actor: self.profiles.clone(),
                    photos: self.photos.clone(),
                    actor_id: event.actor_id,
                    photo_id: require_ref(event)?,
                }
                .resolve()
                .await?
            }
            EventKind::NewProfileCoverPhoto => {
                CoverPhoto {
                    actor: self.profiles.clone(),
                    photos: self.photos.clone(),
                    actor_id: event.actor_id,
                    photo_id: require_ref(event)?,
                }
                .resolve()
                .await?
            }
            EventKind::CreatedNewTrip => {
                CreateTrip {
                    actor: self.profiles.clone(),
                    trips: self.trips.clone(),
                    actor_id: event.actor_id,
                    trip_id: require_ref(event)?,
                }
                .resolve()
                .await?
            }
            EventKind::UpdatedExistingTrip => {
                UpdateTrip {
                    actor: self.profiles.clone(),
                    trips: self.trips.clone(),
                    actor_id: event.actor_id,
                    trip_id: require_ref(event)?,
                }
                .resolve()
                .await?
            }
            EventKind::GroupedTripUpdates => {
                TripUpdates {
                    actor: self.profiles.clone(),
                    trips: self.trips.clone(),
                    actor_id: event.actor_id,
                    trip_id: require_ref(event)?,
                    new_dest_ids: require_group(event)?,
                    event_ids: event.grouped_event_ids.clone(),
                }
                .resolve()
                .await?
            }
            EventKind::MultipleDestinationPhotoLinks => {
                LinkedPhotos {
                    actor: self.profiles.clone(),
                    destinations: self.destinations.clone(),
                    photos: self.photos.clone(),
                    actor_id: event.actor_id,
                    dest_id: require_dest(event)?,
                    photo_ids: require_group(event)?,
                    event_ids: event.grouped_event_ids.clone(),
                }
                .resolve()
                .await?
            }
        };
        item.event_kind = Some(event.kind);
        item.created = Some(event.occurred_at);
        Ok(item)
    }

    /// Resolve a batch concurrently. Each event fails or succeeds on its
    /// own; one bad event never blocks its neighbours.
    pub async fn resolve_batch(
        &self,
        events: &[FeedEvent],
    ) -> Vec<FeedResult<ResponseItem>> {
        join_all(events.iter().map(|event| self.resolve(event))).await
    }

    /// Resolve one event, abandoning all in-flight fetches as soon as the
    /// caller fires the token.
    pub async fn resolve_with_cancel(
        &self,
        event: &FeedEvent,
        cancel: &CancellationToken,
    ) -> FeedResult<ResponseItem> {
        tokio::select! {
            _ = cancel.cancelled() => Err(FeedError::Cancelled),
            item = self.resolve(event) => item,
        }
    }
}

/// Parse a wire tag into the closed kind set. A tag outside the set is an
/// invalid event, not a panic.
pub fn kind_from_tag(tag: &str) -> FeedResult<EventKind> {
    EventKind::from_tag(tag).ok_or_else(|| {
        FeedError::invalid(format!("unknown event kind tag `{tag}`"))
    })
}

fn require_ref(event: &FeedEvent) -> FeedResult<RefId> {
    event.ref_id.ok_or_else(|| {
        FeedError::invalid(format!(
            "{} event {} has no reference id",
            event.kind.as_tag(),
            event.id
        ))
    })
}

fn require_dest(event: &FeedEvent) -> FeedResult<DestinationId> {
    event.dest_id.ok_or_else(|| {
        FeedError::invalid(format!(
            "{} event {} has no destination id",
            event.kind.as_tag(),
            event.id
        ))
    })
}

/// Grouped kinds must carry a non-empty reference collection; an empty one
/// is malformed and never reaches message construction.
fn require_group(event: &FeedEvent) -> FeedResult<Vec<RefId>> {
    match &event.grouped_ref_ids {
        Some(ids) if !ids.is_empty() => Ok(ids.clone()),
        _ => Err(FeedError::invalid(format!(
            "{} event {} has no grouped reference ids",
            event.kind.as_tag(),
            event.id
        ))),
    }
}

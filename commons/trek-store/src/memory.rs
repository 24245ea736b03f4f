use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use trek_models::{
    Destination, DestinationId, Photo, PhotoId, Profile, Trip, TripId, UserId,
};

use crate::traits::{
    DestinationReader, PhotoReader, ProfileReader, TripReader,
};
use crate::StoreResult;

/// In-memory implementation of all four entity readers, for tests and
/// development. Cloning shares the underlying maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: Arc<RwLock<HashMap<UserId, Profile>>>,
    destinations: Arc<RwLock<HashMap<DestinationId, Destination>>>,
    trips: Arc<RwLock<HashMap<TripId, Trip>>>,
    photos: Arc<RwLock<HashMap<PhotoId, Photo>>>,
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            profiles: Arc::clone(&self.profiles),
            destinations: Arc::clone(&self.destinations),
            trips: Arc::clone(&self.trips),
            photos: Arc::clone(&self.photos),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_profile(&self, profile: Profile) {
        self.profiles.write().await.insert(profile.user_id, profile);
    }

    pub async fn insert_destination(&self, destination: Destination) {
        self.destinations
            .write()
            .await
            .insert(destination.id, destination);
    }

    pub async fn insert_trip(&self, trip: Trip) {
        self.trips.write().await.insert(trip.id, trip);
    }

    pub async fn insert_photo(&self, photo: Photo) {
        self.photos.write().await.insert(photo.id, photo);
    }
}

#[async_trait]
impl ProfileReader for MemoryStore {
    async fn profile(&self, id: UserId) -> StoreResult<Option<Profile>> {
        Ok(self.profiles.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl DestinationReader for MemoryStore {
    async fn destination(
        &self,
        id: DestinationId,
    ) -> StoreResult<Option<Destination>> {
        Ok(self.destinations.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl TripReader for MemoryStore {
    async fn trip(&self, id: TripId) -> StoreResult<Option<Trip>> {
        Ok(self.trips.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl PhotoReader for MemoryStore {
    async fn photo(&self, id: PhotoId) -> StoreResult<Option<Photo>> {
        Ok(self.photos.read().await.get(&id).cloned())
    }

    async fn photos_by_ids(
        &self,
        ids: &[PhotoId],
    ) -> StoreResult<Vec<Photo>> {
        let photos = self.photos.read().await;
        Ok(ids.iter().filter_map(|id| photos.get(id).cloned()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(id: PhotoId) -> Photo {
        Photo {
            id,
            filename: format!("photo_{id}.jpg"),
            thumbnail_filename: None,
        }
    }

    #[tokio::test]
    async fn missing_entities_read_as_none() {
        let store = MemoryStore::new();
        assert!(store.profile(1).await.unwrap().is_none());
        assert!(store.destination(1).await.unwrap().is_none());
        assert!(store.trip(1).await.unwrap().is_none());
        assert!(store.photo(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn inserted_entities_read_back() {
        let store = MemoryStore::new();
        store
            .insert_profile(Profile {
                user_id: 7,
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                avatar_thumbnail: None,
            })
            .await;
        store.insert_photo(photo(3)).await;

        let profile = store.profile(7).await.unwrap().unwrap();
        assert_eq!(profile.display_name(), "Jane Doe");
        assert_eq!(store.photo(3).await.unwrap().unwrap().id, 3);
    }

    #[tokio::test]
    async fn photos_by_ids_omits_missing_ids() {
        let store = MemoryStore::new();
        store.insert_photo(photo(1)).await;
        store.insert_photo(photo(3)).await;

        let found = store.photos_by_ids(&[1, 2, 3, 4]).await.unwrap();
        let ids: Vec<PhotoId> = found.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn clones_share_the_same_maps() {
        let store = MemoryStore::new();
        let other = store.clone();
        other.insert_photo(photo(9)).await;
        assert!(store.photo(9).await.unwrap().is_some());
    }
}

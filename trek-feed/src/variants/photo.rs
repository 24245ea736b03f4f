use trek_models::{
    DestinationId, EventId, EventKind, Payload, PhotoId, ResponseItem, UserId,
};

use crate::error::FeedResult;
use crate::fetch::{DestinationFetch, PhotoFetch, ProfileFetch};
use crate::respond;
use crate::variants::plural_suffix;

/// A user linked one public photo to a public destination.
pub struct LinkPhoto {
    pub actor: ProfileFetch,
    pub destinations: DestinationFetch,
    pub photos: PhotoFetch,
    pub actor_id: UserId,
    pub dest_id: DestinationId,
    pub photo_id: PhotoId,
}

impl LinkPhoto {
    pub async fn resolve(self) -> FeedResult<ResponseItem> {
        let (profile, destination, photo) = tokio::try_join!(
            self.actor.fetch(self.actor_id),
            self.destinations.fetch(self.dest_id),
            self.photos.fetch(self.photo_id),
        )?;
        let message = format!(
            "{} just linked a photo to the destination {}!",
            profile.display_name(),
            destination.name
        );
        Ok(respond::actor_item(
            EventKind::LinkDestinationPhoto,
            message,
            &profile,
            Payload::Photo(photo),
            None,
        ))
    }
}

/// A destination got a new primary photo. No actor; the destination itself
/// is the subject.
pub struct PrimaryPhoto {
    pub destinations: DestinationFetch,
    pub photos: PhotoFetch,
    pub dest_id: DestinationId,
    pub photo_id: PhotoId,
}

impl PrimaryPhoto {
    pub async fn resolve(self) -> FeedResult<ResponseItem> {
        let (destination, photo) = tokio::try_join!(
            self.destinations.fetch(self.dest_id),
            self.photos.fetch(self.photo_id),
        )?;
        let message = format!(
            "The destination '{}' has a new primary photo",
            destination.name
        );
        Ok(respond::subject_item(
            EventKind::NewPrimaryDestinationPhoto,
            message,
            Payload::Photo(photo),
        ))
    }
}

/// A user uploaded a new public photo.
pub struct UploadedPhoto {
    pub actor: ProfileFetch,
    pub photos: PhotoFetch,
    pub actor_id: UserId,
    pub photo_id: PhotoId,
}

impl UploadedPhoto {
    pub async fn resolve(self) -> FeedResult<ResponseItem> {
        let (profile, photo) = tokio::try_join!(
            self.actor.fetch(self.actor_id),
            self.photos.fetch(self.photo_id),
        )?;
        let message =
            format!("{} has added a public photo", profile.display_name());
        Ok(respond::actor_item(
            EventKind::UploadedUserPhoto,
            message,
            &profile,
            Payload::Photo(photo),
            None,
        ))
    }
}

/// A user set a new profile picture.
pub struct ProfilePhoto {
    pub actor: ProfileFetch,
    pub photos: PhotoFetch,
    pub actor_id: UserId,
    pub photo_id: PhotoId,
}

impl ProfilePhoto {
    pub async fn resolve(self) -> FeedResult<ResponseItem> {
        let (profile, photo) = tokio::try_join!(
            self.actor.fetch(self.actor_id),
            self.photos.fetch(self.photo_id),
        )?;
        let message =
            format!("{} has a new profile picture", profile.display_name());
        Ok(respond::actor_item(
            EventKind::NewProfilePhoto,
            message,
            &profile,
            Payload::Photo(photo),
            None,
        ))
    }
}

/// A user set a new cover photo.
pub struct CoverPhoto {
    pub actor: ProfileFetch,
    pub photos: PhotoFetch,
    pub actor_id: UserId,
    pub photo_id: PhotoId,
}

impl CoverPhoto {
    pub async fn resolve(self) -> FeedResult<ResponseItem> {
        let (profile, photo) = tokio::try_join!(
            self.actor.fetch(self.actor_id),
            self.photos.fetch(self.photo_id),
        )?;
        let message = format!(
            "{} has updated their cover photo",
            profile.display_name()
        );
        Ok(respond::actor_item(
            EventKind::NewProfileCoverPhoto,
            message,
            &profile,
            Payload::Photo(photo),
            None,
        ))
    }
}

/// A grouped run of photo uploads by one user, rendered as a single
/// gallery item. The photo count in the message is the number of photos
/// still present in the store, not the number of ids in the group.
pub struct GalleryPhotos {
    pub actor: ProfileFetch,
    pub photos: PhotoFetch,
    pub actor_id: UserId,
    pub photo_ids: Vec<PhotoId>,
    pub event_ids: Option<Vec<EventId>>,
}

impl GalleryPhotos {
    pub async fn resolve(self) -> FeedResult<ResponseItem> {
        let (profile, photos) = tokio::try_join!(
            self.actor.fetch(self.actor_id),
            self.photos.fetch_many(&self.photo_ids),
        )?;
        let message = format!(
            "{} just added {} photo{}!",
            profile.display_name(),
            photos.len(),
            plural_suffix(photos.len())
        );
        let payload = Payload::ProfileGallery {
            profile: profile.clone(),
            photos,
        };
        Ok(respond::actor_item(
            EventKind::MultipleGalleryPhotos,
            message,
            &profile,
            payload,
            self.event_ids,
        ))
    }
}

/// A grouped run of photo links onto one destination.
pub struct LinkedPhotos {
    pub actor: ProfileFetch,
    pub destinations: DestinationFetch,
    pub photos: PhotoFetch,
    pub actor_id: UserId,
    pub dest_id: DestinationId,
    pub photo_ids: Vec<PhotoId>,
    pub event_ids: Option<Vec<EventId>>,
}

impl LinkedPhotos {
    pub async fn resolve(self) -> FeedResult<ResponseItem> {
        let (profile, destination, photos) = tokio::try_join!(
            self.actor.fetch(self.actor_id),
            self.destinations.fetch(self.dest_id),
            self.photos.fetch_many(&self.photo_ids),
        )?;
        let message = format!(
            "{} just linked {} photo{} to the destination {}!",
            profile.display_name(),
            photos.len(),
            plural_suffix(photos.len()),
            destination.name
        );
        let payload = Payload::DestinationGallery {
            destination,
            photos,
        };
        Ok(respond::actor_item(
            EventKind::MultipleDestinationPhotoLinks,
            message,
            &profile,
            payload,
            self.event_ids,
        ))
    }
}

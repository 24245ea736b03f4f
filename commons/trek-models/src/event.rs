use serde::{Deserialize, Serialize};

use crate::response::PayloadShape;
use crate::{DestinationId, EventId, RefId, UserId};

/// Closed set of feed event kinds. The wire tag is the SCREAMING_SNAKE name
/// stored by the event ingestion side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EventKind {
    #[serde(rename = "CREATED_NEW_DESTINATION")]
    CreatedNewDestination,
    #[serde(rename = "UPDATED_EXISTING_DESTINATION")]
    UpdatedExistingDestination,
    #[serde(rename = "LINK_DESTINATION_PHOTO")]
    LinkDestinationPhoto,
    #[serde(rename = "NEW_PRIMARY_DESTINATION_PHOTO")]
    NewPrimaryDestinationPhoto,
    #[serde(rename = "MULTIPLE_GALLERY_PHOTOS")]
    MultipleGalleryPhotos,
    #[serde(rename = "UPLOADED_USER_PHOTO")]
    UploadedUserPhoto,
    #[serde(rename = "NEW_PROFILE_PHOTO")]
    NewProfilePhoto,
    #[serde(rename = "NEW_PROFILE_COVER_PHOTO")]
    NewProfileCoverPhoto,
    #[serde(rename = "CREATED_NEW_TRIP")]
    CreatedNewTrip,
    #[serde(rename = "UPDATED_EXISTING_TRIP")]
    UpdatedExistingTrip,
    #[serde(rename = "GROUPED_TRIP_UPDATES")]
    GroupedTripUpdates,
    #[serde(rename = "MULTIPLE_DESTINATION_PHOTO_LINKS")]
    MultipleDestinationPhotoLinks,
}

impl EventKind {
    pub const ALL: [EventKind; 12] = [
        EventKind::CreatedNewDestination,
        EventKind::UpdatedExistingDestination,
        EventKind::LinkDestinationPhoto,
        EventKind::NewPrimaryDestinationPhoto,
        EventKind::MultipleGalleryPhotos,
        EventKind::UploadedUserPhoto,
        EventKind::NewProfilePhoto,
        EventKind::NewProfileCoverPhoto,
        EventKind::CreatedNewTrip,
        EventKind::UpdatedExistingTrip,
        EventKind::GroupedTripUpdates,
        EventKind::MultipleDestinationPhotoLinks,
    ];

    pub fn as_tag(&self) -> &'static str {
        match self {
            EventKind::CreatedNewDestination => "CREATED_NEW_DESTINATION",
            EventKind::UpdatedExistingDestination => {
                "UPDATED_EXISTING_DESTINATION"
            }
            EventKind::LinkDestinationPhoto => "LINK_DESTINATION_PHOTO",
            EventKind::NewPrimaryDestinationPhoto => {
                "NEW_PRIMARY_DESTINATION_PHOTO"
            }
            EventKind::MultipleGalleryPhotos => "MULTIPLE_GALLERY_PHOTOS",
            EventKind::UploadedUserPhoto => "UPLOADED_USER_PHOTO",
            EventKind::NewProfilePhoto => "NEW_PROFILE_PHOTO",
            EventKind::NewProfileCoverPhoto => "NEW_PROFILE_COVER_PHOTO",
            EventKind::CreatedNewTrip => "CREATED_NEW_TRIP",
            EventKind::UpdatedExistingTrip => "UPDATED_EXISTING_TRIP",
            EventKind::GroupedTripUpdates => "GROUPED_TRIP_UPDATES",
            EventKind::MultipleDestinationPhotoLinks => {
                "MULTIPLE_DESTINATION_PHOTO_LINKS"
            }
        }
    }

    /// Parse a wire tag. Returns `None` for tags outside the closed set;
    /// the resolver turns that into an invalid-event failure rather than
    /// panicking on an unhandled arm.
    pub fn from_tag(tag: &str) -> Option<EventKind> {
        EventKind::ALL.iter().copied().find(|k| k.as_tag() == tag)
    }

    /// Kinds that carry a group of reference ids instead of a single one.
    pub fn is_grouped(&self) -> bool {
        matches!(
            self,
            EventKind::MultipleGalleryPhotos
                | EventKind::GroupedTripUpdates
                | EventKind::MultipleDestinationPhotoLinks
        )
    }

    /// The grouped kind that a run of events of this kind collapses into.
    pub fn grouped_counterpart(&self) -> Option<EventKind> {
        match self {
            EventKind::UploadedUserPhoto => {
                Some(EventKind::MultipleGalleryPhotos)
            }
            EventKind::LinkDestinationPhoto => {
                Some(EventKind::MultipleDestinationPhotoLinks)
            }
            EventKind::UpdatedExistingTrip => {
                Some(EventKind::GroupedTripUpdates)
            }
            _ => None,
        }
    }

    /// The payload shape a resolved item of this kind must carry.
    pub fn payload_shape(&self) -> PayloadShape {
        match self {
            EventKind::CreatedNewDestination
            | EventKind::UpdatedExistingDestination => {
                PayloadShape::Destination
            }
            EventKind::LinkDestinationPhoto
            | EventKind::NewPrimaryDestinationPhoto
            | EventKind::UploadedUserPhoto
            | EventKind::NewProfilePhoto
            | EventKind::NewProfileCoverPhoto => PayloadShape::Photo,
            EventKind::CreatedNewTrip
            | EventKind::UpdatedExistingTrip
            | EventKind::GroupedTripUpdates => PayloadShape::Trip,
            EventKind::MultipleGalleryPhotos => PayloadShape::ProfileGallery,
            EventKind::MultipleDestinationPhotoLinks => {
                PayloadShape::DestinationGallery
            }
        }
    }
}

/// One record handed to the engine by the ingestion side. Constructed once,
/// never mutated after construction.
///
/// `ref_id` is the primary reference (photo, destination or trip id
/// depending on the kind); `dest_id` carries the target destination for the
/// photo-link kinds, which reference two entities at once. Grouped kinds
/// leave `ref_id` unused and carry their members in `grouped_ref_ids`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedEvent {
    pub id: EventId,
    pub kind: EventKind,
    pub actor_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<RefId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_id: Option<DestinationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouped_ref_ids: Option<Vec<RefId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouped_event_ids: Option<Vec<EventId>>,
    /// Milliseconds since the Unix epoch.
    pub occurred_at: i64,
}

impl FeedEvent {
    /// The id the grouping engine merges on: the destination for photo
    /// links, the trip for trip updates, nothing for plain photo uploads.
    pub fn group_target(&self) -> Option<RefId> {
        match self.kind {
            EventKind::LinkDestinationPhoto
            | EventKind::MultipleDestinationPhotoLinks => self.dest_id,
            EventKind::UpdatedExistingTrip | EventKind::GroupedTripUpdates => {
                self.ref_id
            }
            _ => None,
        }
    }

    /// The id this event contributes to a group it is merged into.
    pub fn group_member_ref(&self) -> Option<RefId> {
        match self.kind {
            // Trip updates group on the trip and collect the added
            // destinations, which ride in `dest_id`.
            EventKind::UpdatedExistingTrip => self.dest_id,
            _ => self.ref_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip_covers_all_kinds() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_tag(kind.as_tag()), Some(kind));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(EventKind::from_tag("DELETED_ACCOUNT"), None);
        assert_eq!(EventKind::from_tag(""), None);
    }

    #[test]
    fn grouped_counterparts_are_grouped_kinds() {
        for kind in EventKind::ALL {
            if let Some(grouped) = kind.grouped_counterpart() {
                assert!(grouped.is_grouped());
                assert!(!kind.is_grouped());
            }
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::entities::{Destination, Photo, Profile, Trip};
use crate::event::EventKind;
use crate::{EventId, UserId};

/// Discriminant of [`Payload`], used to check a resolved payload against
/// the shape its event kind declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Destination,
    Trip,
    Photo,
    ProfileGallery,
    DestinationGallery,
}

/// Entity data attached to a resolved feed item. Serialized untagged so the
/// caller sees the plain entity object, as the downstream API expects.
/// Variant order matters for deserialization: composite shapes first, then
/// the entities with the larger required field sets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Payload {
    ProfileGallery {
        profile: Profile,
        photos: Vec<Photo>,
    },
    DestinationGallery {
        destination: Destination,
        photos: Vec<Photo>,
    },
    Trip(Trip),
    Destination(Destination),
    Photo(Photo),
}

impl Payload {
    pub fn shape(&self) -> PayloadShape {
        match self {
            Payload::ProfileGallery { .. } => PayloadShape::ProfileGallery,
            Payload::DestinationGallery { .. } => {
                PayloadShape::DestinationGallery
            }
            Payload::Trip(_) => PayloadShape::Trip,
            Payload::Destination(_) => PayloadShape::Destination,
            Payload::Photo(_) => PayloadShape::Photo,
        }
    }
}

/// The rendered, caller-facing result of resolving one (possibly grouped)
/// event. Constructed once per successful resolution, never mutated.
///
/// Actor fields are present exactly when the kind fetches the actor's
/// profile; `grouped_event_ids` is carried only for grouped kinds so the
/// caller can acknowledge the underlying events. Optional fields are
/// omitted from JSON entirely, not serialized as null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseItem {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_avatar_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<UserId>,
    pub payload: Payload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouped_event_ids: Option<Vec<EventId>>,
    #[serde(
        rename = "eventType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub event_kind: Option<EventKind>,
    /// Creation time of the originating event, milliseconds since epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> Profile {
        Profile {
            user_id: 7,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            avatar_thumbnail: Some("thumb/jane.jpg".to_string()),
        }
    }

    #[test]
    fn response_item_round_trip_preserves_all_fields() {
        let item = ResponseItem {
            message: "Jane Doe just added 2 photos!".to_string(),
            actor_display_name: Some("Jane Doe".to_string()),
            actor_avatar_ref: Some("thumb/jane.jpg".to_string()),
            actor_id: Some(7),
            payload: Payload::ProfileGallery {
                profile: sample_profile(),
                photos: vec![
                    Photo {
                        id: 1,
                        filename: "a.jpg".to_string(),
                        thumbnail_filename: None,
                    },
                    Photo {
                        id: 2,
                        filename: "b.jpg".to_string(),
                        thumbnail_filename: Some("thumb/b.jpg".to_string()),
                    },
                ],
            },
            grouped_event_ids: Some(vec![11, 12]),
            event_kind: Some(EventKind::MultipleGalleryPhotos),
            created: Some(1_700_000_000_000),
        };

        let json = serde_json::to_string(&item).unwrap();
        let back: ResponseItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn ungrouped_item_omits_grouped_event_ids() {
        let item = ResponseItem {
            message: "The destination 'Fiordland' has a new primary photo"
                .to_string(),
            actor_display_name: None,
            actor_avatar_ref: None,
            actor_id: None,
            payload: Payload::Photo(Photo {
                id: 3,
                filename: "fiordland.jpg".to_string(),
                thumbnail_filename: None,
            }),
            grouped_event_ids: None,
            event_kind: None,
            created: None,
        };

        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("groupedEventIds"));
        assert!(!json.contains("actorDisplayName"));

        let back: ResponseItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.grouped_event_ids, None);
        assert_eq!(back, item);
    }

    #[test]
    fn payload_wire_names_are_camel_case() {
        let payload = Payload::DestinationGallery {
            destination: Destination {
                id: 5,
                name: "Fiordland".to_string(),
                country: Some("New Zealand".to_string()),
            },
            photos: vec![],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("destination").is_some());
        assert!(json.get("photos").is_some());

        let back: Payload = serde_json::from_value(json).unwrap();
        assert_eq!(back.shape(), PayloadShape::DestinationGallery);
    }
}

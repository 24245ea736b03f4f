//! Response item assembly. Pure construction only; anything that needs a
//! fetch happens in the variants.

use trek_models::{EventId, EventKind, Payload, Profile, ResponseItem};

/// Build the item for a kind that carries actor display data. A payload
/// shape that does not match the kind is programmer error in the variant,
/// not a runtime condition.
pub fn actor_item(
    kind: EventKind,
    message: String,
    profile: &Profile,
    payload: Payload,
    grouped_event_ids: Option<Vec<EventId>>,
) -> ResponseItem {
    debug_assert_eq!(
        kind.payload_shape(),
        payload.shape(),
        "payload shape mismatch for {:?}",
        kind
    );
    ResponseItem {
        message,
        actor_display_name: Some(profile.display_name()),
        actor_avatar_ref: profile.avatar_thumbnail.clone(),
        actor_id: Some(profile.user_id),
        payload,
        grouped_event_ids,
        event_kind: None,
        created: None,
    }
}

/// Build the item for a kind with no actor, e.g. a destination getting a
/// new primary photo.
pub fn subject_item(
    kind: EventKind,
    message: String,
    payload: Payload,
) -> ResponseItem {
    debug_assert_eq!(
        kind.payload_shape(),
        payload.shape(),
        "payload shape mismatch for {:?}",
        kind
    );
    ResponseItem {
        message,
        actor_display_name: None,
        actor_avatar_ref: None,
        actor_id: None,
        payload,
        grouped_event_ids: None,
        event_kind: None,
        created: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trek_models::Destination;

    #[test]
    fn actor_item_copies_display_data_from_profile() {
        let profile = Profile {
            user_id: 7,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            avatar_thumbnail: Some("thumb/jane.jpg".to_string()),
        };
        let item = actor_item(
            EventKind::CreatedNewDestination,
            "Jane Doe has created a new destination: 'Fiordland'".to_string(),
            &profile,
            Payload::Destination(Destination {
                id: 1,
                name: "Fiordland".to_string(),
                country: None,
            }),
            None,
        );
        assert_eq!(item.actor_display_name.as_deref(), Some("Jane Doe"));
        assert_eq!(item.actor_avatar_ref.as_deref(), Some("thumb/jane.jpg"));
        assert_eq!(item.actor_id, Some(7));
        assert_eq!(item.grouped_event_ids, None);
    }

    #[test]
    fn subject_item_has_no_actor_fields() {
        let item = subject_item(
            EventKind::CreatedNewDestination,
            "msg".to_string(),
            Payload::Destination(Destination {
                id: 1,
                name: "Fiordland".to_string(),
                country: None,
            }),
        );
        assert_eq!(item.actor_display_name, None);
        assert_eq!(item.actor_id, None);
    }
}

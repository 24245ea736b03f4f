use trek_models::{DestinationId, EventKind, Payload, ResponseItem, UserId};

use crate::error::FeedResult;
use crate::fetch::{DestinationFetch, ProfileFetch};
use crate::respond;

/// A user created a new public destination.
pub struct CreateDestination {
    pub actor: ProfileFetch,
    pub destinations: DestinationFetch,
    pub actor_id: UserId,
    pub dest_id: DestinationId,
}

impl CreateDestination {
    pub async fn resolve(self) -> FeedResult<ResponseItem> {
        let (profile, destination) = tokio::try_join!(
            self.actor.fetch(self.actor_id),
            self.destinations.fetch(self.dest_id),
        )?;
        let message = format!(
            "{} has created a new destination: '{}'",
            profile.display_name(),
            destination.name
        );
        Ok(respond::actor_item(
            EventKind::CreatedNewDestination,
            message,
            &profile,
            Payload::Destination(destination),
            None,
        ))
    }
}

/// A user updated an existing destination, or made a private one public.
pub struct UpdateDestination {
    pub actor: ProfileFetch,
    pub destinations: DestinationFetch,
    pub actor_id: UserId,
    pub dest_id: DestinationId,
}

impl UpdateDestination {
    pub async fn resolve(self) -> FeedResult<ResponseItem> {
        let (profile, destination) = tokio::try_join!(
            self.actor.fetch(self.actor_id),
            self.destinations.fetch(self.dest_id),
        )?;
        let message = format!(
            "{} has updated the destination '{}'",
            profile.display_name(),
            destination.name
        );
        Ok(respond::actor_item(
            EventKind::UpdatedExistingDestination,
            message,
            &profile,
            Payload::Destination(destination),
            None,
        ))
    }
}

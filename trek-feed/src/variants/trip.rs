use trek_models::{
    DestinationId, EventId, EventKind, Payload, ResponseItem, Trip, TripId,
    UserId,
};

use crate::error::{FeedError, FeedResult};
use crate::fetch::{ProfileFetch, TripFetch};
use crate::respond;
use crate::variants::plural_suffix;

/// Trip messages read the first and last stop of the itinerary, so a trip
/// with no destinations cannot be rendered.
fn endpoints(trip: &Trip) -> FeedResult<(&str, &str)> {
    let first = trip.destinations.first().ok_or_else(|| {
        FeedError::invalid(format!("trip {} has no destinations", trip.id))
    })?;
    // A one-destination trip begins and ends in the same place.
    let last = trip.destinations.last().unwrap_or(first);
    Ok((&first.name, &last.name))
}

/// A user created a new trip.
pub struct CreateTrip {
    pub actor: ProfileFetch,
    pub trips: TripFetch,
    pub actor_id: UserId,
    pub trip_id: TripId,
}

impl CreateTrip {
    pub async fn resolve(self) -> FeedResult<ResponseItem> {
        let (profile, trip) = tokio::try_join!(
            self.actor.fetch(self.actor_id),
            self.trips.fetch(self.trip_id),
        )?;
        let count = trip.destinations.len();
        let (first, last) = endpoints(&trip)?;
        let message = format!(
            "{} just created a new trip with {} destination{}! The trip begins in {} and ends in {}.",
            profile.display_name(),
            count,
            plural_suffix(count),
            first,
            last
        );
        Ok(respond::actor_item(
            EventKind::CreatedNewTrip,
            message,
            &profile,
            Payload::Trip(trip),
            None,
        ))
    }
}

/// A user updated an existing trip.
pub struct UpdateTrip {
    pub actor: ProfileFetch,
    pub trips: TripFetch,
    pub actor_id: UserId,
    pub trip_id: TripId,
}

impl UpdateTrip {
    pub async fn resolve(self) -> FeedResult<ResponseItem> {
        let (profile, trip) = tokio::try_join!(
            self.actor.fetch(self.actor_id),
            self.trips.fetch(self.trip_id),
        )?;
        let (first, last) = endpoints(&trip)?;
        let message = format!(
            "{} has updated their trip from {} to {}",
            profile.display_name(),
            first,
            last
        );
        Ok(respond::actor_item(
            EventKind::UpdatedExistingTrip,
            message,
            &profile,
            Payload::Trip(trip),
            None,
        ))
    }
}

/// A grouped run of updates to one trip, rendered as a single aggregate
/// item counting the distinct destinations just added.
pub struct TripUpdates {
    pub actor: ProfileFetch,
    pub trips: TripFetch,
    pub actor_id: UserId,
    pub trip_id: TripId,
    pub new_dest_ids: Vec<DestinationId>,
    pub event_ids: Option<Vec<EventId>>,
}

impl TripUpdates {
    pub async fn resolve(self) -> FeedResult<ResponseItem> {
        let (profile, trip) = tokio::try_join!(
            self.actor.fetch(self.actor_id),
            self.trips.fetch(self.trip_id),
        )?;
        if trip.destinations.is_empty() {
            return Err(FeedError::invalid(format!(
                "trip {} has no destinations",
                trip.id
            )));
        }
        // Count each added destination once, and only if it is still part
        // of the trip.
        let mut added: Vec<DestinationId> = Vec::new();
        for dest in &trip.destinations {
            if self.new_dest_ids.contains(&dest.id)
                && !added.contains(&dest.id)
            {
                added.push(dest.id);
            }
        }
        let message = format!(
            "{} added {} new destination{} to their trip!",
            profile.display_name(),
            added.len(),
            plural_suffix(added.len())
        );
        Ok(respond::actor_item(
            EventKind::GroupedTripUpdates,
            message,
            &profile,
            Payload::Trip(trip),
            self.event_ids,
        ))
    }
}

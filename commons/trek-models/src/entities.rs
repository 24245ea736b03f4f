use serde::{Deserialize, Serialize};

use crate::{DestinationId, PhotoId, TripId, UserId};

/// Read-only projection of a user profile, as served by the profile store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Thumbnail reference of the current profile photo, if one is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_thumbnail: Option<String>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: DestinationId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: PhotoId,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_filename: Option<String>,
}

/// A trip with its ordered destination sequence. Order is the itinerary
/// order, not insertion order in storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: TripId,
    pub user_id: UserId,
    pub destinations: Vec<Destination>,
}

use trek_models::{DestinationId, PhotoId, TripId, UserId};
use trek_store::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    #[error("No profile `{0}` in store")]
    ProfileNotFound(UserId),
    #[error("No destination `{0}` in store")]
    DestinationNotFound(DestinationId),
    #[error("No trip `{0}` in store")]
    TripNotFound(TripId),
    #[error("No photo `{0}` in store")]
    PhotoNotFound(PhotoId),
    #[error("No photos `{0:?}` in store")]
    PhotosNotFound(Vec<PhotoId>),
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
    #[error("Upstream failure: {0}")]
    Upstream(#[from] StoreError),
    #[error("Fetch timed out after {0} ms")]
    FetchTimeout(u64),
    #[error("Resolution cancelled")]
    Cancelled,
}

impl FeedError {
    pub fn invalid<T: ToString>(msg: T) -> Self {
        Self::InvalidEvent(msg.to_string())
    }

    /// A referenced entity does not exist in its store.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FeedError::ProfileNotFound(_)
                | FeedError::DestinationNotFound(_)
                | FeedError::TripNotFound(_)
                | FeedError::PhotoNotFound(_)
                | FeedError::PhotosNotFound(_)
        )
    }

    /// The event itself is malformed; retrying can never succeed.
    pub fn is_invalid(&self) -> bool {
        matches!(self, FeedError::InvalidEvent(_))
    }

    /// Transient upstream failure; the only class the fetch policy retries.
    pub fn is_transient(&self) -> bool {
        matches!(self, FeedError::Upstream(_) | FeedError::FetchTimeout(_))
    }
}

/// Result type for feed resolution operations.
pub type FeedResult<T> = Result<T, FeedError>;

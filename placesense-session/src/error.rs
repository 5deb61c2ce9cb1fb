//! Errors raised by the dashboard session.

use placesense_core::{PlaceId, ProviderError, RecommendationError};
use thiserror::Error;

use crate::{SessionConfigError, Slot};

/// Errors returned by [`Session`](crate::Session) operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The configuration was rejected.
    #[error("invalid session configuration")]
    Config(#[from] SessionConfigError),
    /// The mapping collaborator failed.
    #[error("mapping provider failed")]
    Provider(#[from] ProviderError),
    /// The slot holds no place.
    #[error("no place selected in the {0} slot")]
    EmptySlot(Slot),
    /// The focal place has no coordinates to search around.
    #[error("place {0} has no location")]
    MissingLocation(PlaceId),
    /// Both slots must hold a place before comparing.
    #[error("both slots must hold a place before comparing")]
    IncompleteSelection,
    /// The slot has no completed analysis yet.
    #[error("the {0} slot has no analysis to update")]
    NotAnalysed(Slot),
    /// A recommendation toggle was rejected.
    #[error(transparent)]
    Recommendation(#[from] RecommendationError),
}

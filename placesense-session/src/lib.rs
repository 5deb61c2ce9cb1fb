//! Dashboard session state for PlaceSense.
//!
//! A [`Session`] holds up to two selected places, tracks the analytics
//! request issued for each and derives what the dashboard shows once the
//! answers arrive. Requests are represented by tickets: when the user
//! changes a selection while a request is in flight, the late answer is
//! reported as [`Completion::Stale`] and dropped.
//!
//! Collaborators from `placesense-core` are injected per call, so the
//! session itself performs no I/O.

#![forbid(unsafe_code)]

mod config;
mod error;
mod session;
mod slot;

pub use config::{SessionConfig, SessionConfigError};
pub use error::SessionError;
pub use session::Session;
pub use slot::{
    AnalysisTicket, Audience, ComparisonState, ComparisonTicket, Completion, PlaceAnalysis, Slot,
    SlotState,
};

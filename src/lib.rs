//! StoryNest client library.
//!
//! The domain layer for a social story-sharing service: typed story and
//! user entities, session bootstrap, and a per-user favorites collection
//! kept consistent with the remote service by confirm-then-commit updates.

pub mod api;
pub mod config;
pub mod constants;
pub mod model;
pub mod session;

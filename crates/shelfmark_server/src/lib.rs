//! HTTP surface for the Shelfmark catalog.
//! Exposed as a library so integration tests can build the router directly.

pub mod app;
pub mod error;

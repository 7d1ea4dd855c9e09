//! Use-case services composed from storage and notification dispatch.

pub mod catalog_service;

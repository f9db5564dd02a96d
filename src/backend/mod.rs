//! Client for the app's own backend.

pub mod client;

pub use client::{BackendClient, AUTH_CHECK_PATH, PRODUCT_LIST_PATH};

//! Library exports for embedsession, shared between the binary and tests.

pub mod backend;
pub mod bridge;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod session;
pub mod startup;
pub mod state;
pub mod utils;

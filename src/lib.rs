//! Beadloom
//!
//! Turns raster images into printable bead pattern diagrams.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;

//! Runtime orchestration and lifecycle management.
//!
//! This module contains the infrastructure for managing the application's runtime environment,
//! including:
//!
//! - **Actor lifecycle management**: Starting, wiring, and shutting down actors
//! - **Observability setup**: Initializing tracing and logging
//!
//! # Main Components
//!
//! - [`Storefront`] - The composition root that spawns every actor and hands out clients
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod storefront;
pub mod tracing;

pub use storefront::*;
pub use tracing::*;

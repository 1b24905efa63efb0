//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate. Levels
//! come from `RUST_LOG`; the output is the compact format without module paths, since
//! every list event already carries a `list` field (`cart`, `wishlist`).
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle, saves, notices
//! RUST_LOG=info cargo run
//!
//! # Every request, snapshot and catalog call
//! RUST_LOG=debug cargo run
//!
//! # Only the list actors
//! RUST_LOG=meal_store::framework=debug cargo run
//! ```
//!
//! ## What a Session Looks Like
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Storefront started capacity=32
//! INFO Account created uid=6f1c...
//! INFO Attached list="cart" uid=6f1c... size=0
//! INFO Notice title=Added to cart! level=Info
//! INFO Saved list="cart" uid=6f1c... size=1
//! INFO Detached list="cart" uid=6f1c... dropped=1
//! ```
//!
//! Client methods are wrapped in `#[instrument]` spans, so with `debug` the request
//! shows up nested under the client call that sent it.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - events carry a `list` field instead
        .compact()
        .init();
}

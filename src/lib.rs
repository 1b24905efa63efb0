#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Meal Store
//!
//! > **The client-side state engine of a food-ordering storefront.**
//!
//! Browse meals from a public recipe API, keep a per-user cart and wishlist in sync
//! with a remote document store, sign users in and out, and list their past orders.
//! Every stateful piece is a Tokio actor that owns its state and processes one event
//! at a time.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One list actor, two lists
//! The cart and the wishlist are the same machine with different rules. The generic
//! [`ListActor<K>`](framework::ListActor) follows the signed-in identity, mirrors the
//! document `<collection>/<uid>` and writes the whole list back after every accepted
//! intent. A [`ListKind`](framework::ListKind) only decides how entries react to an
//! intent: the cart bumps quantities, the wishlist refuses duplicates.
//!
//! ### Rejections are not errors
//! Adding to a cart while signed out is an everyday event, not a failure. Such intents
//! come back as [`Outcome::Rejected`](framework::Outcome) and the user sees a
//! [`Notice`](notice::Notice). `Err` is reserved for broken plumbing and, for identity
//! operations, for failures the caller must handle.
//!
//! ### Last writer wins
//! Every snapshot of the remote document, including the echo of our own write and
//! writes from another session of the same user, replaces the local list wholesale.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: Separates the list *rules* from the *plumbing* (channels, identity
//!   tracking, subscriptions, write-back).
//! - **Key items**: [`ListKind`](framework::ListKind), [`ListActor`](framework::ListActor),
//!   [`ListClient`](framework::ListClient).
//!
//! ### 2. The Lists ([`cart_actor`], [`wishlist_actor`])
//! - **Role**: Concrete implementations of the `ListKind` trait.
//!
//! ### 3. The Session ([`session_actor`])
//! - **Role**: Sign-up, sign-in and sign-out against an
//!   [`IdentityBackend`](session_actor::IdentityBackend); the identity feed drives
//!   every list actor.
//!
//! ### 4. The Interface ([`clients`])
//! - **Role**: Domain-specific clients ([`CartClient`](clients::CartClient),
//!   [`WishlistClient`](clients::WishlistClient), [`SessionClient`](clients::SessionClient),
//!   [`OrderClient`](clients::OrderClient)) that hide message passing.
//!
//! ### 5. The Outside World ([`catalog`], [`store`])
//! - **Role**: The meal catalog over HTTP and the document store boundary, each
//!   behind a trait with an in-process or scripted implementation for tests.
//!
//! ### 6. The Orchestrator ([`lifecycle`])
//! - **Role**: [`Storefront`](lifecycle::Storefront) spawns the actors, wires them
//!   together and shuts them down.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo session with info logs
//! RUST_LOG=info cargo run
//!
//! # Run the tests
//! cargo test
//! ```

pub mod cart_actor;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod notice;
pub mod session_actor;
pub mod store;
pub mod views;
pub mod wishlist_actor;

//! Browser client for the leave-management platform.
//!
//! ARCHITECTURE
//! ============
//! - `state`: session identity in `localStorage` and the derived sign-in phase.
//! - `net`: the authenticated transport, login/profile/logout, and the
//!   absences and notifications calls.
//! - `util`: role-based access checks, navigation, alerts, cancellable
//!   scheduled work and the unread-notification badge.
//! - `web` (hydrate only): `wasm-bindgen` exports for page scripts.
//!
//! Every browser capability sits behind a small trait, so the logic builds
//! and tests natively; the `hydrate` feature supplies the DOM-backed
//! implementations.

pub mod config;
pub mod error;
pub mod net;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
pub mod web;

#[cfg(test)]
pub mod test_helpers;

//! Network layer.
//!
//! ARCHITECTURE
//! ============
//! `http` is the raw request seam. `transport` wraps it with bearer tokens
//! and the central 401 reaction. `auth` drives login/profile/logout, and
//! `api` carries the absences and notifications calls whose payloads are
//! decoded through `envelope` into the DTOs in `types`.

pub mod api;
pub mod auth;
pub mod envelope;
pub mod http;
pub mod transport;
pub mod types;

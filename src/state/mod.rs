//! Client-side identity state.
//!
//! DESIGN
//! ======
//! `storage` is the raw key-value seam, `session` maps the four identity
//! fields onto it, and `auth` derives the sign-in phase from both.

pub mod auth;
pub mod session;
pub mod storage;

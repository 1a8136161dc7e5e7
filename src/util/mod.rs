//! Browser-side helpers: access control, navigation, alerts, scheduled
//! tasks and the notification badge.

pub mod access;
pub mod alert;
pub mod badge;
pub mod navigation;
pub mod schedule;

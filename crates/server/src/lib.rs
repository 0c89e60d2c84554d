//! HTTP front end for a stanza search session.

pub mod api;
pub mod metrics;
pub mod state;

//! JSON envelopes returned by the API and read back by the dashboard client.

pub mod auth;
pub mod contact;

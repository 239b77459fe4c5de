//! Slate Sheets — Google service-account auth and spreadsheet publishing
//! for combined roster tables.

pub mod auth;
pub mod client;
pub mod models;
pub mod publisher;

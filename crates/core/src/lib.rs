//! Slate Core — roster models, the Transparent Classroom client, and the
//! join/sort combine step.

pub mod config;
pub mod connectors;
pub mod error;
pub mod models;
pub mod roster;

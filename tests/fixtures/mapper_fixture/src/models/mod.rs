//! Source records.

pub mod profile;
pub mod sample;
pub mod user;

//! Destination records.

use std::collections::HashMap;

/// Flattened view of a user and their profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDto {
    /// Identifier, widened from the stored value.
    pub id: i64,
    /// Display name.
    pub name: Option<String>,
    /// Contact address; empty when unknown.
    pub email: String,
    /// Scores, widened.
    pub scores: Vec<u32>,
    /// Ratio in double precision.
    pub ratio: Option<f64>,
    /// Whether the account is active.
    pub active: bool,
    /// Sum of user count and profile extra.
    pub total: i64,
    /// Nickname; empty when unset.
    pub nickname: String,
    /// Free-form metadata, filled by hand.
    pub meta: HashMap<String, String>,
}

/// Aggregated samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    /// Number of samples.
    pub count: Option<i64>,
    /// Sample values.
    pub samples: Vec<Option<f64>>,
}

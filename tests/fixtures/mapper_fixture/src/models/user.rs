//! Stored user record.

/// A stored user.
#[derive(Debug, Clone, Default)]
pub struct User {
    /// Identifier.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Contact address, if confirmed.
    pub email: Option<String>,
    /// Raw scores.
    pub scores: Vec<u8>,
    /// Optional ratio.
    pub ratio: Option<f32>,
    /// Activity flag as last seen by the user service.
    pub active: bool,
    /// Event count.
    pub count: i64,
}

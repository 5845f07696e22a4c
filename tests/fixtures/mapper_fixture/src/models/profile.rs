//! Stored profile record.

/// A stored profile.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    /// Contact address from the profile service.
    pub email: Option<String>,
    /// Extra events.
    pub extra: i64,
    /// Chosen nickname.
    pub nick: Option<String>,
    /// Activity flag as last seen by the profile service.
    pub active: bool,
}

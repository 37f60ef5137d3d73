use serde::Serialize;

/// Talk format applications are filed under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ActivityType {
    /// Identifier referenced by `applications.activity`
    pub activity: String,
    /// Human readable label
    pub description: String,
}

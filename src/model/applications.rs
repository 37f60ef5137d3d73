use chrono::{DateTime, Utc};

use serde::Serialize;

use uuid::Uuid;

use crate::domain::{ActivityId, ApplicationDescription, ApplicationName, ApplicationOutline};

/// New application request
#[derive(Debug)]
pub struct NewApplication {
    pub author: Uuid,
    pub activity: Option<ActivityId>,
    pub name: Option<ApplicationName>,
    pub description: Option<ApplicationDescription>,
    pub outline: Option<ApplicationOutline>,
    pub created_at: DateTime<Utc>,
    /// `None` for a draft, which is the only thing the API ever creates
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Full replacement of the editable fields of a draft
#[derive(Debug)]
pub struct ApplicationUpdate {
    pub id: Uuid,
    pub activity: Option<ActivityId>,
    pub name: Option<ApplicationName>,
    pub description: Option<ApplicationDescription>,
    pub outline: Option<ApplicationOutline>,
}

/// Stored application record
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub author: Uuid,
    pub activity: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub outline: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Submission timestamp.
    /// `None` while the application is a draft and can still be edited or deleted
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Application {
    pub fn is_draft(&self) -> bool {
        self.submitted_at.is_none()
    }

    /// Names of the fields that must be filled in before submission
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("activity", &self.activity),
            ("name", &self.name),
            ("outline", &self.outline),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, |s| s.trim().is_empty()))
        .map(|(field, _)| field)
        .collect()
    }
}

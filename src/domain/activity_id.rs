use std::fmt;
use std::str::FromStr;

use unicode_segmentation::UnicodeSegmentation;

const MAX_LEN: usize = 64;

/// Identifier of an activity type, e.g. `Report`
///
/// Only the shape is checked here; whether the activity type exists is up to
/// the `activity_types` table.
#[derive(Debug, PartialEq, Clone)]
pub struct ActivityId(String);

impl FromStr for ActivityId {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err("Activity cannot be empty".into());
        }
        if value.graphemes(true).count() > MAX_LEN {
            return Err("Activity too long".into());
        }
        if value.chars().any(char::is_control) {
            return Err("Activity contains invalid characters".into());
        }

        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for ActivityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

use std::fmt;
use std::str::FromStr;

use unicode_segmentation::UnicodeSegmentation;

/// Talk title, at most 100 graphemes
#[derive(Debug, PartialEq, Clone)]
pub struct ApplicationName(String);

/// Short abstract shown on the schedule, at most 300 graphemes
#[derive(Debug, PartialEq, Clone)]
pub struct ApplicationDescription(String);

/// Detailed plan of the talk, at most 1000 graphemes
#[derive(Debug, PartialEq, Clone)]
pub struct ApplicationOutline(String);

fn parse_bounded(value: &str, field: &str, max_len: usize) -> Result<String, String> {
    if value.graphemes(true).count() > max_len {
        return Err(format!("{} must be at most {} characters", field, max_len));
    }
    if value.chars().any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t')) {
        return Err(format!("{} contains invalid characters", field));
    }
    Ok(value.to_string())
}

macro_rules! bounded_text {
    ($ty:ident, $field:literal, $max_len:literal) => {
        impl $ty {
            pub const MAX_LEN: usize = $max_len;
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                parse_bounded(value, $field, Self::MAX_LEN).map(Self)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

bounded_text!(ApplicationName, "Name", 100);
bounded_text!(ApplicationDescription, "Description", 300);
bounded_text!(ApplicationOutline, "Outline", 1000);

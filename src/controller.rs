/// Activity type lookup
pub mod activities;
/// Application drafting and submission
pub mod applications;
/// Per-user views
pub mod users;

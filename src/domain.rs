mod activity_id;
mod proposal_text;

pub use activity_id::ActivityId;
pub use proposal_text::{ApplicationDescription, ApplicationName, ApplicationOutline};

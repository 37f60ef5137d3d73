mod activities;
mod applications;

pub use activities::ActivityType;
pub use applications::{Application, ApplicationUpdate, NewApplication};

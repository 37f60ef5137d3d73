mod activities;
mod applications;

pub use activities::ActivityRepo;
pub use applications::ApplicationRepo;

//! User profile model and its persistence

pub mod model;
pub mod repository;

pub use model::{parse_keyword_list, DreamJob, Profile, ResumeEntry, ResumeStatus};
pub use repository::{InMemoryProfileRepository, JsonFileProfileRepository, ProfileRepository, PROFILE_KEY};

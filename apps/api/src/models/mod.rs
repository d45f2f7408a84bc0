pub mod application;
pub mod candidate_match;
pub mod job;
pub mod resume;
pub mod user;

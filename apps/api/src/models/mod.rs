pub mod application;
pub mod document;
pub mod employer;
pub mod job;
pub mod user;

/// Integer identifier shared by every entity in the document.
pub type EntityId = i64;

//! Domain records exchanged with the catalog collaborator

pub mod account;
pub mod note;
pub mod stats;
pub mod university;

pub use account::Account;
pub use note::{FeaturedFilter, FileKind, Note, NoteFilters};
pub use stats::{PlatformStats, UniversityStats, UserStats};
pub use university::{Class, Stream, University};

//! Services Layer
//!
//! Business logic extracted from HTTP handlers.

pub mod book_copy_service;
pub mod catalog_service;
pub mod category_service;
pub mod id_remapper;

// Re-export for convenience
pub use book_copy_service::{
    BookCopy, CopySummary, copy_book_and_dependents, copy_book_and_dependents_within,
};
pub use id_remapper::{EntityKind, IdRemapper};

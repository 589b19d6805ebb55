//! Shared utilities

pub mod pagination;
pub mod url;

pub use pagination::Pagination;

//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&DbPool` as the first argument.

pub mod interval_repo;
pub mod user_repo;

pub use interval_repo::IntervalRepo;
pub use user_repo::UserRepo;

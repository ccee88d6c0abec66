//! Row models and input DTOs.

pub mod interval;
pub mod user;

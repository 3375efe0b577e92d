//! Row types and DTOs for each table.

pub mod category;
pub mod note;
pub mod scope;
pub mod session;
pub mod user;

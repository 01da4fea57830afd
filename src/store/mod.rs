//! Record stores backing the CRUD routes.

pub mod tasks;
pub mod users;

pub use tasks::SoftDelete;

//! Domain entities for the Users API.

pub mod user;

pub use user::User;

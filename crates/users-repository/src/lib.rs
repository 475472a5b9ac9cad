//! # Users Repository
//!
//! Durable user storage behind the [`UserRepository`] trait.
//!
//! ```text
//! UserCacheService
//!   ↓  Arc<dyn UserRepository>
//! MySqlUserRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```

pub mod mysql;
pub mod pool;
pub mod traits;

pub use mysql::*;
pub use pool::*;
pub use traits::*;

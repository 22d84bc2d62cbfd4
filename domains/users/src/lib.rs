//! Users domain: accounts, sign-up, login

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;

// Re-export repository types
pub use repository::{UserRepository, UsersRepositories};

// Re-export API types
pub use api::routes;
pub use api::UsersState;

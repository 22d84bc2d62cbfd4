//! Repository implementations for Users domain

pub mod users;

use sqlx::PgPool;

pub use users::UserRepository;

/// Combined repository access for the Users domain
#[derive(Clone)]
pub struct UsersRepositories {
    pub users: UserRepository,
}

impl UsersRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }
}

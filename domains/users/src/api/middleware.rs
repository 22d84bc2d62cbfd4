//! Users domain state and auth backend integration

use crate::UsersRepositories;
use axum::extract::FromRef;
use moveshare_auth::AuthBackend;

/// Application state for the Users domain
#[derive(Clone)]
pub struct UsersState {
    pub repos: UsersRepositories,
    pub auth: AuthBackend,
}

impl FromRef<UsersState> for AuthBackend {
    fn from_ref(state: &UsersState) -> Self {
        state.auth.clone()
    }
}

pub(crate) mod forms;

use crate::api::{ApiClient, ApiErrorKind, ApiResult};
use crate::models::User;
use crate::storage::{load_user_from_storage, save_user_to_storage};
use leptos::prelude::*;

pub(crate) use forms::{
    add_goal, remove_goal, total_minutes, Flash, NewTodoDraft, TaskListState, TodoDraft,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Last user returned by `GET /user` or onboarding.
    pub current_user: RwSignal<Option<User>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::load_from_storage()),
            current_user: RwSignal::new(load_user_from_storage()),
        }
    }

    /// Store the user and, when the backend just minted one, its session token.
    pub fn remember_user(&self, user: User) {
        if let Some(token) = user.session_token.clone() {
            let mut client = self.api_client.get_untracked();
            client.set_session_token(token);
            client.save_to_storage();
            self.api_client.set(client);
        }
        save_user_to_storage(&user);
        self.current_user.set(Some(user));
    }

    /// `GET /user`, which creates the anonymous account on first visit.
    /// A rejected token is dropped so the next call starts a fresh session.
    pub async fn ensure_session(&self) -> ApiResult<User> {
        let c = self.api_client.get_untracked();
        match c.get_current_user().await {
            Ok(user) => {
                self.remember_user(user.clone());
                Ok(user)
            }
            Err(e) => {
                if e.kind == ApiErrorKind::Unauthorized {
                    self.api_client.update(|c| c.forget_session());
                }
                Err(e)
            }
        }
    }
}

/// Where a user belongs in the first-run flow.
pub(crate) fn onboarding_route(user: &User) -> &'static str {
    if user.onboarding_completed {
        "/timeline"
    } else {
        "/welcome"
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

#[cfg(test)]
mod tests {
    use super::*;

    fn user(onboarding_completed: bool) -> User {
        User {
            id: 1,
            username: "user_abcd1234".to_string(),
            session_token: None,
            onboarding_completed,
            initial_goal: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_onboarding_route_sends_new_users_to_welcome() {
        assert_eq!(onboarding_route(&user(false)), "/welcome");
        assert_eq!(onboarding_route(&user(true)), "/timeline");
    }
}

use crate::models::User;
use serde::{Deserialize, Serialize};

pub(crate) const SESSION_TOKEN_KEY: &str = "cabbage_session_token";
pub(crate) const USER_KEY: &str = "cabbage_user";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_string_from_storage(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

pub(crate) fn save_string_to_storage(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(key, value);
    }
}

pub(crate) fn remove_from_storage(keys: &[&str]) {
    if let Some(storage) = local_storage() {
        for key in keys {
            let _ = storage.remove_item(key);
        }
    }
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let json = load_string_from_storage(key)?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        save_string_to_storage(key, &json);
    }
}

/// The session token is kept separately; never persist it inside the user blob.
pub(crate) fn save_user_to_storage(user: &User) {
    let mut user = user.clone();
    user.session_token = None;
    save_json_to_storage(USER_KEY, &user);
}

pub(crate) fn load_user_from_storage() -> Option<User> {
    load_json_from_storage::<User>(USER_KEY)
}

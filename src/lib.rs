mod api;
mod app;
mod components;
mod models;
mod pages;
mod state;
mod storage;
mod util;

pub use app::App;

use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::api::ApiClient;
    use crate::models::User;
    use crate::storage::{load_user_from_storage, save_user_to_storage};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_api_client_storage_roundtrip_token() {
        ApiClient::clear_storage();

        let mut c = ApiClient::load_from_storage();
        assert!(!c.has_session());

        c.set_session_token("t1".to_string());
        c.save_to_storage();

        let c2 = ApiClient::load_from_storage();
        assert_eq!(c2.session_token(), Some("t1"));

        ApiClient::clear_storage();
        let c3 = ApiClient::load_from_storage();
        assert!(c3.session_token().is_none());
    }

    #[wasm_bindgen_test]
    fn test_user_storage_roundtrip_drops_token() {
        let user = User {
            id: 1,
            username: "user_abcd1234".to_string(),
            session_token: Some("secret".to_string()),
            onboarding_completed: true,
            initial_goal: Some("Learn Rust".to_string()),
            created_at: "2026-10-18T08:00:00Z".to_string(),
            updated_at: "2026-10-18T08:00:00Z".to_string(),
        };
        save_user_to_storage(&user);

        let loaded = load_user_from_storage().expect("should load user from localStorage");
        assert_eq!(loaded.username, "user_abcd1234");
        assert_eq!(loaded.initial_goal.as_deref(), Some("Learn Rust"));
        assert!(loaded.session_token.is_none());

        ApiClient::clear_storage();
        assert!(load_user_from_storage().is_none());
    }

    #[wasm_bindgen_test]
    fn test_today_iso_local_shape() {
        let today = crate::util::today_iso_local();
        assert_eq!(today.len(), 10);
        assert_eq!(&today[4..5], "-");
        assert_eq!(&today[7..8], "-");
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}

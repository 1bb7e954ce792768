use crate::models::{
    DailyPlan, OnboardingRequest, OnboardingResponse, PlanRequest, PlanResponse, ProgressStats,
    ScheduleItemUpdate, TimelineItem, Todo, TodoInput, TodoItem, User, UserSettings,
};
use crate::storage::{
    load_string_from_storage, remove_from_storage, save_string_to_storage, SESSION_TOKEN_KEY,
    USER_KEY,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub(crate) const SESSION_HEADER: &str = "X-Session-Token";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,

    /// Raw response body of a non-2xx reply.
    pub body: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
            body: None,
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
            body: None,
        }
    }

    fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
            body: None,
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
            body: Some(body),
        }
    }

    /// Backend error bodies look like `{"message": "..."}` (Spring) or plain text (Go).
    /// Returns the `message` field when the HTTP body carried one.
    pub fn message_field(&self) -> Option<String> {
        let body = self.body.as_deref()?;
        let v: serde_json::Value = serde_json::from_str(body).ok()?;
        v.get("message")
            .and_then(|m| m.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:8080/api";

impl EnvConfig {
    pub fn new() -> Self {
        // We support BOTH `window.ENV.API_URL` (documented in index.html) and
        // `window.ENV.api_url` for compatibility.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    for key in ["API_URL", "api_url"] {
                        if let Ok(api_url) = js_sys::Reflect::get(&env, &key.into()) {
                            if let Some(url_str) = api_url.as_string() {
                                return Self::from_url(&url_str);
                            }
                        }
                    }
                }
            }
        }

        Self::from_url(DEFAULT_API_URL)
    }

    pub fn from_url(url: &str) -> Self {
        let url = url.trim().trim_end_matches('/');
        let api_url = if url.is_empty() { DEFAULT_API_URL } else { url };
        Self {
            api_url: api_url.to_string(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) session_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: EnvConfig::from_url(&base_url).api_url,
            session_token: None,
        }
    }

    pub fn load_from_storage() -> Self {
        let mut client = Self::new(EnvConfig::new().api_url);
        if let Some(token) =
            load_string_from_storage(SESSION_TOKEN_KEY).filter(|t| !t.trim().is_empty())
        {
            client.set_session_token(token);
        }
        client
    }

    pub fn save_to_storage(&self) {
        if let Some(token) = &self.session_token {
            save_string_to_storage(SESSION_TOKEN_KEY, token);
        }
    }

    pub fn clear_storage() {
        remove_from_storage(&[SESSION_TOKEN_KEY, USER_KEY]);
    }

    pub fn set_session_token(&mut self, token: String) {
        self.session_token = Some(token);
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    pub fn has_session(&self) -> bool {
        self.session_token.is_some()
    }

    pub fn forget_session(&mut self) {
        self.session_token = None;
        Self::clear_storage();
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_session(
        mut req: reqwest::RequestBuilder,
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        if let Some(token) = token {
            req = req.header(SESSION_HEADER, token);
        }
        // Cookie-based sessions need the browser to attach credentials cross-origin.
        #[cfg(target_arch = "wasm32")]
        {
            req = req.fetch_credentials_include();
        }
        req
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ApiResult<reqwest::Response> {
        let client = reqwest::Client::new();
        let mut req = client.request(method, self.url(path));
        req = Self::with_session(req, self.session_token());

        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            Ok(res)
        } else if res.status().as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Request failed"))
        }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ApiResult<T> {
        let res = self.send(method, path, body).await?;
        res.json().await.map_err(ApiError::parse)
    }

    /// For endpoints whose success body is empty or irrelevant.
    async fn request_empty(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ApiResult<()> {
        self.send(method, path, body).await.map(|_| ())
    }

    // ---- session / onboarding ----

    pub async fn get_current_user(&self) -> ApiResult<User> {
        self.request(Method::GET, "/user", None::<&()>).await
    }

    pub async fn complete_onboarding(
        &self,
        req: &OnboardingRequest,
    ) -> ApiResult<OnboardingResponse> {
        self.request(Method::POST, "/onboarding", Some(req)).await
    }

    // ---- todos, timeline schema ----

    pub async fn list_todos(&self) -> ApiResult<Vec<Todo>> {
        self.request(Method::GET, "/todos", None::<&()>).await
    }

    pub async fn create_todo(&self, todo: &TodoInput) -> ApiResult<Todo> {
        self.request(Method::POST, "/todos", Some(todo)).await
    }

    pub async fn update_todo(&self, id: i64, todo: &TodoInput) -> ApiResult<Todo> {
        self.request(Method::PUT, &format!("/todos/{id}"), Some(todo))
            .await
    }

    pub async fn delete_todo(&self, id: i64) -> ApiResult<()> {
        self.request_empty(Method::DELETE, &format!("/todos/{id}"), None::<&()>)
            .await
    }

    pub async fn plan_day(&self, todos: Vec<Todo>, start_time: &str) -> ApiResult<Vec<TimelineItem>> {
        let res: PlanResponse = self
            .request(
                Method::POST,
                "/plan",
                Some(&PlanRequest {
                    todos,
                    start_time: start_time.to_string(),
                }),
            )
            .await?;
        Ok(res.timeline)
    }

    // ---- todos, planner schema ----

    pub async fn list_todo_items(&self) -> ApiResult<Vec<TodoItem>> {
        self.request(Method::GET, "/todos", None::<&()>).await
    }

    pub async fn create_todo_item(&self, item: &TodoItem) -> ApiResult<TodoItem> {
        self.request(Method::POST, "/todos", Some(item)).await
    }

    pub async fn update_todo_item(&self, id: i64, item: &TodoItem) -> ApiResult<TodoItem> {
        self.request(Method::PUT, &format!("/todos/{id}"), Some(item))
            .await
    }

    pub async fn delete_todo_item(&self, id: i64) -> ApiResult<()> {
        self.delete_todo(id).await
    }

    pub async fn toggle_todo_item(&self, id: i64) -> ApiResult<TodoItem> {
        self.request(Method::PATCH, &format!("/todos/{id}/toggle"), None::<&()>)
            .await
    }

    // ---- settings ----

    pub async fn get_settings(&self) -> ApiResult<UserSettings> {
        self.request(Method::GET, "/settings", None::<&()>).await
    }

    pub async fn update_settings(&self, settings: &UserSettings) -> ApiResult<UserSettings> {
        self.request(Method::PUT, "/settings", Some(settings)).await
    }

    // ---- planner ----

    pub async fn generate_plan(&self) -> ApiResult<DailyPlan> {
        self.request(Method::POST, "/planner/generate", None::<&()>)
            .await
    }

    /// `None` when there is no plan for today. Any failure reads the same way.
    pub async fn get_today_plan(&self) -> Option<DailyPlan> {
        let res = self
            .send(Method::GET, "/planner/today", None::<&()>)
            .await
            .ok()?;
        let body = res.text().await.ok()?;
        Self::parse_today_plan(&body)
    }

    pub(crate) fn parse_today_plan(body: &str) -> Option<DailyPlan> {
        if body.trim().is_empty() {
            return None;
        }
        serde_json::from_str::<Option<DailyPlan>>(body).ok().flatten()
    }

    pub async fn update_schedule_item(
        &self,
        plan_id: i64,
        item_id: i64,
        completed: bool,
    ) -> ApiResult<()> {
        self.request_empty(
            Method::PATCH,
            &format!("/planner/{plan_id}/items/{item_id}"),
            Some(&ScheduleItemUpdate { completed }),
        )
        .await
    }

    // ---- progress ----

    pub async fn get_progress_stats(&self) -> ApiResult<ProgressStats> {
        self.request(Method::GET, "/progress/stats", None::<&()>)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_new_strips_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/api/".to_string());
        assert_eq!(client.base_url, "http://localhost:8080/api");
        assert!(client.session_token.is_none());
        assert_eq!(client.url("/todos/3/toggle"), "http://localhost:8080/api/todos/3/toggle");
    }

    #[test]
    fn test_env_config_falls_back_on_blank_url() {
        assert_eq!(EnvConfig::from_url("  ").api_url, DEFAULT_API_URL);
        assert_eq!(
            EnvConfig::from_url("https://cabbage.example/api").api_url,
            "https://cabbage.example/api"
        );
    }

    #[test]
    fn test_api_client_session_token() {
        let mut client = ApiClient::new("http://localhost:8080/api".to_string());
        assert!(!client.has_session());
        client.set_session_token("abc".to_string());
        assert!(client.has_session());
        assert_eq!(client.session_token(), Some("abc"));
    }

    #[test]
    fn test_parse_today_plan_treats_empty_and_null_as_none() {
        assert!(ApiClient::parse_today_plan("").is_none());
        assert!(ApiClient::parse_today_plan("null").is_none());
        assert!(ApiClient::parse_today_plan("<html>oops</html>").is_none());

        let plan = ApiClient::parse_today_plan(r#"{"id": 1, "date": "2026-10-18", "scheduleItems": []}"#)
            .expect("plan should parse");
        assert_eq!(plan.id, Some(1));
        assert!(plan.schedule_items.is_empty());
    }

    #[test]
    fn test_error_message_field_from_json_body() {
        let e = ApiError::http(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"message": "No todos to plan"}"#.to_string(),
            "Request failed",
        );
        assert_eq!(e.kind, ApiErrorKind::Http);
        assert_eq!(e.message_field().as_deref(), Some("No todos to plan"));
    }

    #[test]
    fn test_error_message_field_absent_for_plain_text() {
        let e = ApiError::http(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to generate todos\n".to_string(),
            "Request failed",
        );
        assert!(e.message_field().is_none());
        assert!(ApiError::unauthorized().message_field().is_none());
    }

    #[test]
    fn test_error_message_field_reads_raw_body() {
        // A body that itself contains "): " must not confuse the lookup.
        let body = r#"{"message": "Start time (09:00): invalid"}"#.to_string();
        let e = ApiError::http(reqwest::StatusCode::BAD_REQUEST, body.clone(), "Plan (step 2)");
        assert_eq!(e.body.as_deref(), Some(body.as_str()));
        assert_eq!(e.message_field().as_deref(), Some("Start time (09:00): invalid"));

        let e = ApiError::parse("expected value at line 1");
        assert!(e.body.is_none());
        assert!(e.message_field().is_none());
    }

    #[test]
    fn test_plan_request_serialization() {
        let req = PlanRequest {
            todos: vec![Todo {
                id: Some(1),
                title: "Read".to_string(),
                description: String::new(),
                duration: 45,
                priority: 4,
                created_at: None,
                updated_at: None,
            }],
            start_time: "09:00".to_string(),
        };
        let v = serde_json::to_value(req).unwrap();
        assert_eq!(v["start_time"], "09:00");
        assert_eq!(v["todos"][0]["duration"], 45);
        assert!(v["todos"][0].get("created_at").is_none());
    }

    #[test]
    fn test_schedule_item_update_body() {
        let v = serde_json::to_value(ScheduleItemUpdate { completed: true }).unwrap();
        assert_eq!(v, serde_json::json!({ "completed": true }));
    }
}

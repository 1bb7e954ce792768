use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumIter};

/// Anonymous account created by the backend on first `GET /user`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct User {
    pub id: i64,
    #[serde(default)]
    pub username: String,

    /// Only present on the response that created the account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,

    #[serde(default)]
    pub onboarding_completed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_goal: Option<String>,

    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Task as used by the timeline flow (`/todos` + `/plan`).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Todo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub description: String,

    /// Minutes.
    #[serde(default = "default_duration")]
    pub duration: u32,

    /// 1-5, 5 being highest.
    #[serde(default = "default_level", deserialize_with = "de_priority_level")]
    pub priority: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

pub(crate) const DEFAULT_DURATION_MIN: u32 = 30;
pub(crate) const DEFAULT_PRIORITY_LEVEL: u8 = 3;

/// Java backends emit `null` for empty text columns.
fn de_null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_MIN
}

fn default_level() -> u8 {
    DEFAULT_PRIORITY_LEVEL
}

/// Body for `POST /todos` and `PUT /todos/:id` in the timeline flow.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct TodoInput {
    pub title: String,
    pub description: String,
    pub duration: u32,
    pub priority: u8,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct TimelineItem {
    pub todo_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    pub duration: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct PlanRequest {
    pub todos: Vec<Todo>,
    pub start_time: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct PlanResponse {
    #[serde(default)]
    pub timeline: Vec<TimelineItem>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct OnboardingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub goal: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct OnboardingResponse {
    pub user: User,
    #[serde(default)]
    pub todos: Vec<Todo>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub wake_up_time: String,
    pub sleep_time: String,
    pub work_start_time: String,
    pub work_end_time: String,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub today_focus: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            id: None,
            wake_up_time: "07:00".to_string(),
            sleep_time: "23:00".to_string(),
            work_start_time: "09:00".to_string(),
            work_end_time: "17:00".to_string(),
            goals: vec![],
            today_focus: String::new(),
        }
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Map the 1-5 scale onto labels.
    pub fn from_level(level: i64) -> Self {
        match level {
            i64::MIN..=2 => Priority::Low,
            3 => Priority::Medium,
            _ => Priority::High,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Priority::Low => 2,
            Priority::Medium => 3,
            Priority::High => 5,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    pub fn text_class(self) -> &'static str {
        match self {
            Priority::High => "text-destructive",
            Priority::Medium => "text-primary",
            Priority::Low => "text-muted-foreground",
        }
    }
}

/// Either scale as seen on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum WirePriority {
    Level(i64),
    Label(String),
}

fn de_priority<'de, D: Deserializer<'de>>(d: D) -> Result<Priority, D::Error> {
    match WirePriority::deserialize(d)? {
        WirePriority::Level(n) => Ok(Priority::from_level(n)),
        WirePriority::Label(s) => Priority::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown priority `{s}`"))),
    }
}

fn de_priority_level<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
    match WirePriority::deserialize(d)? {
        WirePriority::Level(n) => Ok(n.clamp(1, 5) as u8),
        WirePriority::Label(s) => Priority::parse(&s)
            .map(Priority::level)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown priority `{s}`"))),
    }
}

/// Task as used by the planner screens.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TodoItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de_priority")]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScheduleItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub start_time: String,
    pub end_time: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub date: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DailyPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub date: String,
    #[serde(default)]
    pub schedule_items: Vec<ScheduleItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl DailyPlan {
    pub fn completed_count(&self) -> usize {
        self.schedule_items.iter().filter(|i| i.completed).count()
    }

    pub fn set_item_completed(&mut self, item_id: i64, completed: bool) -> bool {
        match self.schedule_items.iter_mut().find(|i| i.id == Some(item_id)) {
            Some(item) => {
                item.completed = completed;
                true
            }
            None => false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct ScheduleItemUpdate {
    pub completed: bool,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProgressStats {
    pub total_todos: u64,
    pub completed_todos: u64,
    pub completion_rate: u32,
    pub scheduled_items_completed: u32,
    pub total_scheduled_items: u32,
}

impl ProgressStats {
    pub fn remaining_todos(&self) -> u64 {
        self.total_todos.saturating_sub(self.completed_todos)
    }

    pub fn remaining_scheduled_items(&self) -> u32 {
        self.total_scheduled_items
            .saturating_sub(self.scheduled_items_completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_contract_deserialize() {
        // Fresh account: token present, no goal yet.
        let json = r#"{
            "id": 7,
            "username": "user_abcd1234",
            "session_token": "tok",
            "onboarding_completed": false,
            "created_at": "2026-10-18T08:00:00Z",
            "updated_at": "2026-10-18T08:00:00Z"
        }"#;
        let u: User = serde_json::from_str(json).expect("user should parse");
        assert_eq!(u.id, 7);
        assert_eq!(u.session_token.as_deref(), Some("tok"));
        assert!(!u.onboarding_completed);
        assert!(u.initial_goal.is_none());
    }

    #[test]
    fn test_todo_defaults_when_fields_missing() {
        let t: Todo = serde_json::from_str(r#"{"id": 1, "title": "Read"}"#).unwrap();
        assert_eq!(t.description, "");
        assert_eq!(t.duration, DEFAULT_DURATION_MIN);
        assert_eq!(t.priority, DEFAULT_PRIORITY_LEVEL);
    }

    #[test]
    fn test_todo_accepts_label_priority_and_clamps_levels() {
        let t: Todo = serde_json::from_str(r#"{"title": "a", "priority": "high"}"#).unwrap();
        assert_eq!(t.priority, 5);

        let t: Todo = serde_json::from_str(r#"{"title": "a", "priority": 9}"#).unwrap();
        assert_eq!(t.priority, 5);

        let t: Todo = serde_json::from_str(r#"{"title": "a", "priority": 0}"#).unwrap();
        assert_eq!(t.priority, 1);
    }

    #[test]
    fn test_todo_item_accepts_numeric_priority() {
        let low: TodoItem = serde_json::from_str(r#"{"title": "a", "priority": 1}"#).unwrap();
        let mid: TodoItem = serde_json::from_str(r#"{"title": "a", "priority": 3}"#).unwrap();
        let high: TodoItem = serde_json::from_str(r#"{"title": "a", "priority": 4}"#).unwrap();
        assert_eq!(low.priority, Priority::Low);
        assert_eq!(mid.priority, Priority::Medium);
        assert_eq!(high.priority, Priority::High);
    }

    #[test]
    fn test_todo_item_rejects_unknown_priority_label() {
        let res = serde_json::from_str::<TodoItem>(r#"{"title": "a", "priority": "urgent"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_todo_item_serializes_camel_case_and_skips_empty() {
        let item = TodoItem {
            id: None,
            title: "Ship".to_string(),
            description: None,
            priority: Priority::High,
            due_date: Some("2026-10-20".to_string()),
            completed: false,
            created_at: None,
        };
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(v["priority"], "high");
        assert_eq!(v["dueDate"], "2026-10-20");
        assert!(v.get("id").is_none());
        assert!(v.get("description").is_none());
    }

    #[test]
    fn test_settings_contract_and_defaults() {
        let json = r#"{
            "id": 1,
            "wakeUpTime": "06:30",
            "sleepTime": "22:30",
            "workStartTime": "08:00",
            "workEndTime": "16:00",
            "goals": ["Run"],
            "todayFocus": null
        }"#;
        let s: UserSettings = serde_json::from_str(json).unwrap();
        assert_eq!(s.id, Some(1));
        assert_eq!(s.goals, vec!["Run".to_string()]);
        assert_eq!(s.today_focus, "");

        let json = r#"{
            "wakeUpTime": "06:30",
            "sleepTime": "22:30",
            "workStartTime": "08:00",
            "workEndTime": "16:00"
        }"#;
        let s: UserSettings = serde_json::from_str(json).unwrap();
        assert!(s.goals.is_empty());
        assert_eq!(s.today_focus, "");

        let d = UserSettings::default();
        assert_eq!(d.wake_up_time, "07:00");
        assert_eq!(d.work_end_time, "17:00");
    }

    #[test]
    fn test_daily_plan_contract_deserialize() {
        let json = r#"{
            "id": 3,
            "date": "2026-10-18",
            "scheduleItems": [
                {"id": 1, "startTime": "09:00", "endTime": "10:00", "title": "Deep work", "completed": true, "date": "2026-10-18"},
                {"id": 2, "startTime": "10:00", "endTime": "10:30", "title": "Email", "completed": false, "date": "2026-10-18"}
            ],
            "createdAt": "2026-10-18T07:00:00"
        }"#;
        let plan: DailyPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.schedule_items.len(), 2);
        assert_eq!(plan.completed_count(), 1);
        assert_eq!(plan.schedule_items[0].start_time, "09:00");
    }

    #[test]
    fn test_daily_plan_set_item_completed() {
        let mut plan: DailyPlan = serde_json::from_str(
            r#"{"id": 1, "date": "2026-10-18", "scheduleItems": [
                {"id": 5, "startTime": "09:00", "endTime": "09:30", "title": "Walk"}
            ]}"#,
        )
        .unwrap();
        assert!(!plan.schedule_items[0].completed);
        assert!(plan.set_item_completed(5, true));
        assert_eq!(plan.completed_count(), 1);
        assert!(!plan.set_item_completed(6, true));
    }

    #[test]
    fn test_progress_stats_remaining_never_negative() {
        let s: ProgressStats = serde_json::from_str(
            r#"{"totalTodos": 2, "completedTodos": 3, "completionRate": 100,
                "scheduledItemsCompleted": 1, "totalScheduledItems": 4}"#,
        )
        .unwrap();
        assert_eq!(s.remaining_todos(), 0);
        assert_eq!(s.remaining_scheduled_items(), 3);
    }

    #[test]
    fn test_progress_stats_is_copy() {
        // Stat views read the same snapshot from several reactive closures.
        let s = ProgressStats {
            total_todos: 5,
            completed_todos: 2,
            completion_rate: 40,
            scheduled_items_completed: 1,
            total_scheduled_items: 3,
        };
        let first = move || s.remaining_todos();
        let second = move || s.remaining_scheduled_items();
        assert_eq!(first(), 3);
        assert_eq!(second(), 2);
        assert_eq!(s.completion_rate, 40);
    }

    #[test]
    fn test_onboarding_request_omits_blank_username() {
        let req = OnboardingRequest {
            username: None,
            goal: "Learn Rust".to_string(),
        };
        let v = serde_json::to_value(req).unwrap();
        assert!(v.get("username").is_none());
        assert_eq!(v["goal"], "Learn Rust");
    }

    #[test]
    fn test_plan_response_contract_deserialize() {
        let json = r#"{"timeline": [
            {"todo_id": 1, "title": "Read", "description": "", "start_time": "09:00", "end_time": "09:30", "duration": 30}
        ]}"#;
        let r: PlanResponse = serde_json::from_str(json).unwrap();
        assert_eq!(r.timeline.len(), 1);
        assert_eq!(r.timeline[0].end_time, "09:30");
    }
}

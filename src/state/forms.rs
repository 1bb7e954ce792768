//! UI-independent form and list state.
//!
//! Pages keep these in signals and call the helpers from event handlers, so the
//! interesting transitions are testable without a browser.

use crate::models::{
    Priority, Todo, TodoInput, TodoItem, DEFAULT_DURATION_MIN, DEFAULT_PRIORITY_LEVEL,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FlashKind {
    Success,
    Error,
}

/// Transient message shown after an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Flash {
    pub kind: FlashKind,
    pub text: String,
}

impl Flash {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == FlashKind::Success
    }

    pub fn text_class(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "text-primary",
            FlashKind::Error => "text-destructive",
        }
    }

    pub fn border_class(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "border-primary",
            FlashKind::Error => "border-destructive",
        }
    }
}

/// Planner task list, kept in server order.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct TaskListState {
    pub items: Vec<TodoItem>,
}

impl TaskListState {
    pub fn new(items: Vec<TodoItem>) -> Self {
        Self { items }
    }

    /// Replace the item with the same id, or append.
    pub fn upsert(&mut self, item: TodoItem) {
        let existing = item
            .id
            .and_then(|id| self.items.iter().position(|t| t.id == Some(id)));
        match existing {
            Some(idx) => self.items[idx] = item,
            None => self.items.push(item),
        }
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != Some(id));
        self.items.len() != before
    }

    pub fn set_completed(&mut self, id: i64, completed: bool) -> bool {
        match self.items.iter_mut().find(|t| t.id == Some(id)) {
            Some(t) => {
                t.completed = completed;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: i64) -> Option<&TodoItem> {
        self.items.iter().find(|t| t.id == Some(id))
    }
}

/// Add/edit form for planner tasks.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TodoDraft {
    pub editing_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: String,
    pub completed: bool,
}

impl TodoDraft {
    pub fn blank() -> Self {
        Self {
            editing_id: None,
            title: String::new(),
            description: String::new(),
            priority: Priority::Medium,
            due_date: String::new(),
            completed: false,
        }
    }

    pub fn from_item(item: &TodoItem) -> Self {
        Self {
            editing_id: item.id,
            title: item.title.clone(),
            description: item.description.clone().unwrap_or_default(),
            priority: item.priority,
            due_date: item.due_date.clone().unwrap_or_default(),
            completed: item.completed,
        }
    }

    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn into_item(self) -> TodoItem {
        let non_blank = |s: String| {
            let s = s.trim().to_string();
            (!s.is_empty()).then_some(s)
        };
        TodoItem {
            id: self.editing_id,
            title: self.title.trim().to_string(),
            description: non_blank(self.description),
            priority: self.priority,
            due_date: non_blank(self.due_date),
            completed: self.completed,
            created_at: None,
        }
    }
}

impl Default for TodoDraft {
    fn default() -> Self {
        Self::blank()
    }
}

/// Add form for timeline tasks.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct NewTodoDraft {
    pub title: String,
    pub description: String,
    pub duration: String,
    pub priority: u8,
}

impl NewTodoDraft {
    pub fn blank() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            duration: DEFAULT_DURATION_MIN.to_string(),
            priority: DEFAULT_PRIORITY_LEVEL,
        }
    }

    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone(),
            duration: todo.duration.to_string(),
            priority: todo.priority,
        }
    }

    /// `None` when the title is blank or the duration is not a positive number of minutes.
    pub fn to_input(&self) -> Option<TodoInput> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        let duration: u32 = self.duration.trim().parse().ok().filter(|d| *d > 0)?;
        Some(TodoInput {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            duration,
            priority: self.priority.clamp(1, 5),
        })
    }
}

impl Default for NewTodoDraft {
    fn default() -> Self {
        Self::blank()
    }
}

pub(crate) fn total_minutes(todos: &[Todo]) -> u32 {
    todos.iter().map(|t| t.duration).sum()
}

/// Trims `input`; blank input is ignored. Returns whether a goal was added.
pub(crate) fn add_goal(goals: &mut Vec<String>, input: &str) -> bool {
    let goal = input.trim();
    if goal.is_empty() {
        return false;
    }
    goals.push(goal.to_string());
    true
}

pub(crate) fn remove_goal(goals: &mut Vec<String>, index: usize) {
    if index < goals.len() {
        goals.remove(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, title: &str) -> TodoItem {
        TodoItem {
            id: Some(id),
            title: title.to_string(),
            description: None,
            priority: Priority::Medium,
            due_date: None,
            completed: false,
            created_at: None,
        }
    }

    #[test]
    fn test_submitting_form_clears_draft_and_appends() {
        let mut list = TaskListState::new(vec![item(1, "Existing")]);
        let mut draft = TodoDraft::blank();
        draft.title = "  Write report ".to_string();
        assert!(draft.is_submittable());

        let outgoing = draft.clone().into_item();
        assert_eq!(outgoing.title, "Write report");
        assert!(outgoing.id.is_none());

        // Backend echoes the saved item with an id.
        let saved = TodoItem {
            id: Some(2),
            ..outgoing
        };
        list.upsert(saved);
        draft = TodoDraft::blank();

        assert_eq!(draft, TodoDraft::blank());
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[1].title, "Write report");
    }

    #[test]
    fn test_blank_title_is_not_submittable() {
        let mut draft = TodoDraft::blank();
        draft.title = "   ".to_string();
        assert!(!draft.is_submittable());
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut list = TaskListState::new(vec![item(1, "a"), item(2, "b")]);
        list.upsert(item(1, "a2"));
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[0].title, "a2");
    }

    #[test]
    fn test_toggle_flips_completed() {
        let mut list = TaskListState::new(vec![item(1, "a")]);
        let current = list.get(1).map(|t| t.completed).unwrap();
        assert!(list.set_completed(1, !current));
        assert!(list.get(1).unwrap().completed);
        assert!(!list.set_completed(99, true));
    }

    #[test]
    fn test_remove() {
        let mut list = TaskListState::new(vec![item(1, "a"), item(2, "b")]);
        assert!(list.remove(1));
        assert!(!list.remove(1));
        assert_eq!(list.items.len(), 1);
    }

    #[test]
    fn test_edit_draft_round_trips_fields() {
        let mut src = item(5, "Gym");
        src.description = Some("legs".to_string());
        src.priority = Priority::High;
        src.due_date = Some("2026-10-20".to_string());
        let back = TodoDraft::from_item(&src).into_item();
        assert_eq!(back, src);
    }

    #[test]
    fn test_blank_optional_fields_are_dropped() {
        let mut draft = TodoDraft::blank();
        draft.title = "x".to_string();
        draft.description = "  ".to_string();
        let out = draft.into_item();
        assert!(out.description.is_none());
        assert!(out.due_date.is_none());
    }

    #[test]
    fn test_new_todo_draft_validation() {
        let mut d = NewTodoDraft::blank();
        assert!(d.to_input().is_none());

        d.title = "Read".to_string();
        let input = d.to_input().unwrap();
        assert_eq!(input.duration, 30);
        assert_eq!(input.priority, 3);

        d.duration = "0".to_string();
        assert!(d.to_input().is_none());
        d.duration = "abc".to_string();
        assert!(d.to_input().is_none());
    }

    #[test]
    fn test_new_todo_draft_from_todo() {
        let todo = Todo {
            id: Some(4),
            title: "Mock exam".to_string(),
            description: "Section B".to_string(),
            duration: 90,
            priority: 5,
            created_at: None,
            updated_at: None,
        };
        let d = NewTodoDraft::from_todo(&todo);
        assert_eq!(d.duration, "90");
        let input = d.to_input().unwrap();
        assert_eq!(input.title, "Mock exam");
        assert_eq!(input.priority, 5);
    }

    #[test]
    fn test_goals_trimmed_and_blank_ignored() {
        let mut goals = vec![];
        assert!(!add_goal(&mut goals, "   "));
        assert!(add_goal(&mut goals, "  Run 5k "));
        assert_eq!(goals, vec!["Run 5k".to_string()]);

        remove_goal(&mut goals, 3);
        assert_eq!(goals.len(), 1);
        remove_goal(&mut goals, 0);
        assert!(goals.is_empty());
    }

    #[test]
    fn test_flash_classes() {
        assert_eq!(Flash::success("ok").text_class(), "text-primary");
        assert_eq!(Flash::error("no").border_class(), "border-destructive");
        assert!(!Flash::error("no").is_success());
    }
}

use super::{user_message, ErrorAlert, PageHeader};
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardList,
    CardTitle, Input, Label, Spinner, Textarea, FIELD_CLASS,
};
use crate::models::{TimelineItem, Todo};
use crate::state::{onboarding_route, total_minutes, AppContext, NewTodoDraft};
use crate::util::{format_time_12h, is_hh_mm};
use icons::{Clock, Pencil, Plus, Sparkles, Trash2};
use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

const DEFAULT_START_TIME: &str = "09:00";

#[component]
pub fn TimelinePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let api_client = app_state.api_client;
    let current_user = app_state.current_user;
    let navigate = StoredValue::new(use_navigate());

    let todos: RwSignal<Vec<Todo>> = RwSignal::new(vec![]);
    let timeline: RwSignal<Vec<TimelineItem>> = RwSignal::new(vec![]);
    let loading: RwSignal<bool> = RwSignal::new(true);
    let planning: RwSignal<bool> = RwSignal::new(false);
    let saving: RwSignal<bool> = RwSignal::new(false);
    let error_msg: RwSignal<Option<String>> = RwSignal::new(None);

    // Add/edit form.
    let editing_id: RwSignal<Option<i64>> = RwSignal::new(None);
    let title: RwSignal<String> = RwSignal::new(String::new());
    let description: RwSignal<String> = RwSignal::new(String::new());
    let duration: RwSignal<String> = RwSignal::new(NewTodoDraft::blank().duration);
    let priority: RwSignal<u8> = RwSignal::new(NewTodoDraft::blank().priority);
    let start_time: RwSignal<String> = RwSignal::new(DEFAULT_START_TIME.to_string());

    let load_draft = move |d: NewTodoDraft| {
        title.set(d.title);
        description.set(d.description);
        duration.set(d.duration);
        priority.set(d.priority);
    };

    let reset_form = move || {
        editing_id.set(None);
        load_draft(NewTodoDraft::blank());
    };

    Effect::new(move |_| {
        let app_state = app_state.clone();
        if !api_client.with_untracked(|c| c.has_session()) {
            log!("[timeline] no stored session; the backend will create one");
        }
        spawn_local(async move {
            let user = match app_state.ensure_session().await {
                Ok(u) => u,
                Err(e) => {
                    error!("[timeline] failed to load user: {e}");
                    error_msg.set(Some(user_message(&e, "Failed to load your profile")));
                    loading.set(false);
                    return;
                }
            };
            let route = onboarding_route(&user);
            if route != "/timeline" {
                navigate.with_value(|nav| nav(route, Default::default()));
                return;
            }

            // Read after `ensure_session`, which may have stored a new token.
            let c = api_client.get_untracked();
            match c.list_todos().await {
                Ok(list) => todos.set(list),
                Err(e) => {
                    error!("[timeline] failed to load todos: {e}");
                    error_msg.set(Some(user_message(&e, "Failed to load tasks")));
                }
            }
            loading.set(false);
        });
    });

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let draft = NewTodoDraft {
            title: title.get_untracked(),
            description: description.get_untracked(),
            duration: duration.get_untracked(),
            priority: priority.get_untracked(),
        };
        let Some(input) = draft.to_input() else {
            error_msg.set(Some(
                "Please enter a title and a duration of at least one minute".to_string(),
            ));
            return;
        };

        let editing = editing_id.get_untracked();
        let c = api_client.get_untracked();
        saving.set(true);
        error_msg.set(None);
        spawn_local(async move {
            let res = match editing {
                Some(id) => c.update_todo(id, &input).await,
                None => c.create_todo(&input).await,
            };
            match res {
                Ok(todo) => {
                    todos.update(|t| {
                        let existing = todo.id.and_then(|id| t.iter().position(|x| x.id == Some(id)));
                        match existing {
                            Some(idx) => t[idx] = todo,
                            None => t.push(todo),
                        }
                    });
                    reset_form();
                }
                Err(e) => {
                    error!("[timeline] failed to save todo: {e}");
                    error_msg.set(Some(user_message(&e, "Failed to save task")));
                }
            }
            saving.set(false);
        });
    };

    let on_edit = Callback::new(move |todo: Todo| {
        editing_id.set(todo.id);
        load_draft(NewTodoDraft::from_todo(&todo));
    });

    let on_delete = Callback::new(move |id: i64| {
        let c = api_client.get_untracked();
        spawn_local(async move {
            match c.delete_todo(id).await {
                Ok(()) => {
                    todos.update(|t| t.retain(|todo| todo.id != Some(id)));
                    timeline.update(|items| items.retain(|i| i.todo_id != id));
                    if editing_id.get_untracked() == Some(id) {
                        reset_form();
                    }
                }
                Err(e) => {
                    error!("[timeline] failed to delete todo {id}: {e}");
                    error_msg.set(Some(user_message(&e, "Failed to delete task")));
                }
            }
        });
    });

    let on_plan = move |_| {
        if planning.get_untracked() {
            return;
        }
        let start = start_time.get_untracked();
        if !is_hh_mm(&start) {
            error_msg.set(Some("Start time must be in HH:MM format".to_string()));
            return;
        }
        let list = todos.get_untracked();
        if list.is_empty() {
            error_msg.set(Some("Add at least one task before planning".to_string()));
            return;
        }

        let c = api_client.get_untracked();
        planning.set(true);
        error_msg.set(None);
        spawn_local(async move {
            match c.plan_day(list, &start).await {
                Ok(items) => timeline.set(items),
                Err(e) => {
                    error!("[timeline] failed to plan day: {e}");
                    error_msg.set(Some(user_message(&e, "Failed to plan your day")));
                }
            }
            planning.set(false);
        });
    };

    let subtitle = Signal::derive(move || {
        current_user.with(|u| match u.as_ref().and_then(|u| u.initial_goal.clone()) {
            Some(goal) => format!("Working towards: {goal}"),
            None => "Your tasks, laid out on a timeline".to_string(),
        })
    });

    let on_priority_change = move |ev: web_sys::Event| {
        if let Ok(level) = event_target_value(&ev).parse::<u8>() {
            priority.set(level.clamp(1, 5));
        }
    };

    view! {
        <div class="space-y-6">
            <PageHeader title="Timeline" subtitle=subtitle />

            <ErrorAlert error=error_msg />

            <Card>
                <CardHeader>
                    <CardTitle>
                        {move || if editing_id.get().is_some() { "Edit Task" } else { "Add Task" }}
                    </CardTitle>
                </CardHeader>
                <CardContent>
                    <form class="space-y-4" on:submit=on_add>
                        <div class="space-y-2">
                            <Label html_for="todoTitle">"Title"</Label>
                            <Input id="todoTitle" bind_value=title required=true />
                        </div>
                        <div class="space-y-2">
                            <Label html_for="todoDescription">"Description"</Label>
                            <Textarea id="todoDescription" bind_value=description rows=2 />
                        </div>
                        <div class="grid grid-cols-2 gap-4">
                            <div class="space-y-2">
                                <Label html_for="todoDuration">"Duration (minutes)"</Label>
                                <Input
                                    id="todoDuration"
                                    r#type="number"
                                    min="1".to_string()
                                    bind_value=duration
                                />
                            </div>
                            <div class="space-y-2">
                                <Label html_for="todoPriority">"Priority"</Label>
                                <select
                                    id="todoPriority"
                                    class=format!("{FIELD_CLASS} flex h-9")
                                    prop:value=move || priority.get().to_string()
                                    on:change=on_priority_change
                                >
                                    {(1u8..=5)
                                        .map(|level| view! {
                                            <option value=level.to_string()>{level}</option>
                                        })
                                        .collect_view()}
                                </select>
                            </div>
                        </div>
                        <div class="flex gap-2">
                            <Button attr:disabled=move || saving.get()>
                                <Show when=move || saving.get() fallback=|| view! { <Plus /> }>
                                    <Spinner />
                                </Show>
                                {move || if editing_id.get().is_some() { "Update" } else { "Add" }}
                            </Button>
                            <Show when=move || editing_id.get().is_some() fallback=|| ().into_view()>
                                <button
                                    type="button"
                                    class="inline-flex h-9 items-center justify-center rounded-md border bg-background px-4 text-sm font-medium shadow-xs hover:bg-accent hover:text-accent-foreground"
                                    on:click=move |_| reset_form()
                                >
                                    "Cancel"
                                </button>
                            </Show>
                        </div>
                    </form>
                </CardContent>
            </Card>

            <Card>
                <CardHeader>
                    <CardTitle>"Tasks"</CardTitle>
                    <CardDescription>
                        {move || todos.with(|t| format!("{} tasks, {} minutes planned", t.len(), total_minutes(t)))}
                    </CardDescription>
                </CardHeader>
                <CardContent>
                    <Show
                        when=move || todos.with(|t| !t.is_empty())
                        fallback=move || view! {
                            <p class="text-center text-muted-foreground">
                                {move || if loading.get() { "Loading tasks..." } else { "No tasks yet" }}
                            </p>
                        }
                    >
                        <CardList>
                            {move || {
                                todos
                                    .get()
                                    .into_iter()
                                    .map(|todo| view! { <TodoRow todo=todo on_edit=on_edit on_delete=on_delete /> })
                                    .collect_view()
                            }}
                        </CardList>
                    </Show>
                </CardContent>
            </Card>

            <Card>
                <CardHeader>
                    <CardTitle>"Plan My Day"</CardTitle>
                    <CardDescription>"Lay your tasks out back to back from a start time"</CardDescription>
                </CardHeader>
                <CardContent class="space-y-4">
                    <div class="flex items-end gap-2">
                        <div class="space-y-2">
                            <Label html_for="startTime">"Start time"</Label>
                            <Input id="startTime" r#type="time" bind_value=start_time />
                        </div>
                        <Button attr:disabled=move || planning.get() on:click=on_plan>
                            <Show when=move || planning.get() fallback=|| view! { <Sparkles /> }>
                                <Spinner />
                            </Show>
                            {move || if planning.get() { "Planning..." } else { "Plan" }}
                        </Button>
                    </div>
                    <ol class="space-y-2">
                        {move || {
                            timeline
                                .get()
                                .into_iter()
                                .map(|item| view! { <TimelineRow item=item /> })
                                .collect_view()
                        }}
                    </ol>
                    {move || {
                        timeline.with(|items| {
                            (!items.is_empty()).then(|| {
                                let minutes: u32 = items.iter().map(|i| i.duration).sum();
                                view! {
                                    <p class="text-sm font-medium text-muted-foreground">
                                        {format!("Total planned: {minutes} minutes")}
                                    </p>
                                }
                            })
                        })
                    }}
                </CardContent>
            </Card>
        </div>
    }
}

#[component]
fn TodoRow(todo: Todo, on_edit: Callback<Todo>, on_delete: Callback<i64>) -> impl IntoView {
    let id = todo.id;
    let for_edit = todo.clone();
    view! {
        <li class="flex items-start justify-between gap-4 rounded-md border p-3">
            <div class="space-y-1">
                <h3 class="font-semibold">{todo.title}</h3>
                {(!todo.description.trim().is_empty()).then(|| view! {
                    <p class="text-sm text-muted-foreground">{todo.description.clone()}</p>
                })}
                <p class="text-xs text-muted-foreground">
                    {format!("{} min · priority {}", todo.duration, todo.priority)}
                </p>
            </div>
            <div class="flex items-center gap-1">
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    attr:title="Edit"
                    on:click=move |_| on_edit.run(for_edit.clone())
                >
                    <Pencil />
                </Button>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    attr:title="Delete"
                    on:click=move |_| {
                        if let Some(id) = id {
                            on_delete.run(id);
                        }
                    }
                >
                    <Trash2 />
                </Button>
            </div>
        </li>
    }
}

#[component]
fn TimelineRow(item: TimelineItem) -> impl IntoView {
    view! {
        <li class="flex items-start gap-3 rounded-md border p-3">
            <Clock class="mt-0.5 size-4 text-muted-foreground" />
            <div class="space-y-1">
                <div class="text-sm font-medium text-muted-foreground">
                    {format!(
                        "{} - {} ({} min)",
                        format_time_12h(&item.start_time),
                        format_time_12h(&item.end_time),
                        item.duration,
                    )}
                </div>
                <h3 class="font-semibold">{item.title}</h3>
                {(!item.description.trim().is_empty()).then(|| view! {
                    <p class="text-sm text-muted-foreground">{item.description.clone()}</p>
                })}
            </div>
        </li>
    }
}

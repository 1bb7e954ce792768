use super::{row_title_class, user_message, ErrorAlert, PageHeader};
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader, CardList, CardTitle,
    Checkbox, Input, Label, Spinner, Textarea, FIELD_CLASS,
};
use crate::models::{Priority, TodoItem};
use crate::state::{AppContext, TaskListState, TodoDraft};
use crate::util::format_long_date;
use icons::{Check, Pencil, Plus, Trash2, X};
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;
use strum::IntoEnumIterator;

#[component]
pub fn TasksPage() -> impl IntoView {
    let api_client = expect_context::<AppContext>().0.api_client;

    let tasks: RwSignal<TaskListState> = RwSignal::new(TaskListState::default());
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error_msg: RwSignal<Option<String>> = RwSignal::new(None);

    // Form state.
    let show_form: RwSignal<bool> = RwSignal::new(false);
    let editing_id: RwSignal<Option<i64>> = RwSignal::new(None);
    let editing_completed: RwSignal<bool> = RwSignal::new(false);
    let title: RwSignal<String> = RwSignal::new(String::new());
    let description: RwSignal<String> = RwSignal::new(String::new());
    let priority: RwSignal<Priority> = RwSignal::new(Priority::Medium);
    let due_date: RwSignal<String> = RwSignal::new(String::new());
    let saving: RwSignal<bool> = RwSignal::new(false);

    let load_draft = move |d: TodoDraft| {
        editing_id.set(d.editing_id);
        editing_completed.set(d.completed);
        title.set(d.title);
        description.set(d.description);
        priority.set(d.priority);
        due_date.set(d.due_date);
    };

    let current_draft = move || TodoDraft {
        editing_id: editing_id.get_untracked(),
        title: title.get_untracked(),
        description: description.get_untracked(),
        priority: priority.get_untracked(),
        due_date: due_date.get_untracked(),
        completed: editing_completed.get_untracked(),
    };

    let reset_form = move || {
        load_draft(TodoDraft::blank());
        show_form.set(false);
    };

    let load_tasks = move || {
        let c = api_client.get_untracked();
        loading.set(true);
        spawn_local(async move {
            match c.list_todo_items().await {
                Ok(items) => {
                    tasks.set(TaskListState::new(items));
                    error_msg.set(None);
                }
                Err(e) => {
                    error!("[tasks] failed to load todos: {e}");
                    error_msg.set(Some(user_message(&e, "Failed to load tasks")));
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        load_tasks();
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }

        let draft = current_draft();
        if !draft.is_submittable() {
            error_msg.set(Some("Title is required".to_string()));
            return;
        }
        let item = draft.into_item();
        let c = api_client.get_untracked();
        saving.set(true);
        error_msg.set(None);

        spawn_local(async move {
            let res = match item.id {
                Some(id) => c.update_todo_item(id, &item).await,
                None => c.create_todo_item(&item).await,
            };
            match res {
                Ok(saved) => {
                    tasks.update(|t| t.upsert(saved));
                    reset_form();
                    load_tasks();
                }
                Err(e) => {
                    error!("[tasks] failed to save todo: {e}");
                    error_msg.set(Some(user_message(&e, "Failed to save task")));
                }
            }
            saving.set(false);
        });
    };

    let on_toggle = Callback::new(move |id: i64| {
        let Some(was_completed) = tasks.with_untracked(|t| t.get(id).map(|i| i.completed)) else {
            return;
        };
        tasks.update(|t| {
            t.set_completed(id, !was_completed);
        });

        let c = api_client.get_untracked();
        spawn_local(async move {
            match c.toggle_todo_item(id).await {
                Ok(updated) => tasks.update(|t| t.upsert(updated)),
                Err(e) => {
                    error!("[tasks] failed to toggle todo {id}: {e}");
                    tasks.update(|t| {
                        t.set_completed(id, was_completed);
                    });
                    error_msg.set(Some(user_message(&e, "Failed to update task")));
                }
            }
        });
    });

    let on_delete = Callback::new(move |id: i64| {
        let confirmed = window()
            .confirm_with_message("Are you sure you want to delete this task?")
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let c = api_client.get_untracked();
        spawn_local(async move {
            match c.delete_todo_item(id).await {
                Ok(()) => {
                    tasks.update(|t| {
                        t.remove(id);
                    });
                    if editing_id.get_untracked() == Some(id) {
                        reset_form();
                    }
                }
                Err(e) => {
                    error!("[tasks] failed to delete todo {id}: {e}");
                    error_msg.set(Some(user_message(&e, "Failed to delete task")));
                }
            }
        });
    });

    let on_edit = Callback::new(move |item: TodoItem| {
        load_draft(TodoDraft::from_item(&item));
        show_form.set(true);
    });

    let on_toggle_form = move |_| {
        if show_form.get_untracked() {
            reset_form();
        } else {
            load_draft(TodoDraft::blank());
            show_form.set(true);
        }
    };

    let on_priority_change = move |ev: web_sys::Event| {
        if let Some(p) = Priority::parse(&event_target_value(&ev)) {
            priority.set(p);
        }
    };

    view! {
        <div class="space-y-6">
            <PageHeader title="TODO List" subtitle="Manage your tasks and priorities".to_string()>
                <Button on:click=on_toggle_form>
                    <Show when=move || show_form.get() fallback=|| view! { <Plus /> "Add Task" }>
                        <X />
                        "Cancel"
                    </Show>
                </Button>
            </PageHeader>

            <ErrorAlert error=error_msg />

            <Show when=move || show_form.get() fallback=|| ().into_view()>
                <Card>
                    <CardHeader>
                        <CardTitle>
                            {move || if editing_id.get().is_some() { "Edit Task" } else { "New Task" }}
                        </CardTitle>
                    </CardHeader>
                    <CardContent>
                        <form class="space-y-4" on:submit=on_submit>
                            <div class="space-y-2">
                                <Label html_for="title">"Title"</Label>
                                <Input id="title" bind_value=title required=true />
                            </div>
                            <div class="space-y-2">
                                <Label html_for="description">"Description"</Label>
                                <Textarea id="description" bind_value=description rows=3 />
                            </div>
                            <div class="grid grid-cols-2 gap-4">
                                <div class="space-y-2">
                                    <Label html_for="priority">"Priority"</Label>
                                    <select
                                        id="priority"
                                        class=format!("{FIELD_CLASS} flex h-9")
                                        prop:value=move || priority.get().to_string()
                                        on:change=on_priority_change
                                    >
                                        {Priority::iter()
                                            .map(|p| {
                                                let label = match p {
                                                    Priority::Low => "Low",
                                                    Priority::Medium => "Medium",
                                                    Priority::High => "High",
                                                };
                                                view! { <option value=p.to_string()>{label}</option> }
                                            })
                                            .collect_view()}
                                    </select>
                                </div>
                                <div class="space-y-2">
                                    <Label html_for="dueDate">"Due Date"</Label>
                                    <Input id="dueDate" r#type="date" bind_value=due_date />
                                </div>
                            </div>
                            <div class="flex gap-2">
                                <Button attr:disabled=move || saving.get()>
                                    <Show when=move || saving.get() fallback=|| view! { <Check /> }>
                                        <Spinner />
                                    </Show>
                                    {move || if editing_id.get().is_some() { "Update" } else { "Create" }}
                                </Button>
                                <button
                                    type="button"
                                    class="inline-flex h-9 items-center justify-center rounded-md border bg-background px-4 text-sm font-medium shadow-xs hover:bg-accent hover:text-accent-foreground"
                                    on:click=move |_| reset_form()
                                >
                                    "Cancel"
                                </button>
                            </div>
                        </form>
                    </CardContent>
                </Card>
            </Show>

            <Show
                when=move || tasks.with(|t| !t.items.is_empty())
                fallback=move || view! {
                    <Card>
                        <CardContent class="py-2">
                            <p class="text-center text-muted-foreground">
                                {move || if loading.get() {
                                    "Loading tasks..."
                                } else {
                                    "No tasks yet. Click \"Add Task\" to create your first one!"
                                }}
                            </p>
                        </CardContent>
                    </Card>
                }
            >
                <CardList>
                    {move || {
                        tasks
                            .get()
                            .items
                            .into_iter()
                            .map(|item| view! {
                                <TaskRow item=item on_toggle=on_toggle on_edit=on_edit on_delete=on_delete />
                            })
                            .collect_view()
                    }}
                </CardList>
            </Show>
        </div>
    }
}

#[component]
fn TaskRow(
    item: TodoItem,
    on_toggle: Callback<i64>,
    on_edit: Callback<TodoItem>,
    on_delete: Callback<i64>,
) -> impl IntoView {
    let id = item.id;
    let completed = item.completed;
    let title_class = row_title_class(completed);
    let priority_class = format!("text-xs font-medium {}", item.priority.text_class());
    let priority_label = item.priority.as_ref().to_uppercase();
    let card_class = if completed { "opacity-60" } else { "" };
    let for_edit = item.clone();

    view! {
        <li>
            <Card class=card_class>
                <CardContent>
                    <div class="flex items-start gap-4">
                        <Checkbox
                            class="mt-1"
                            checked=completed
                            aria_label=item.title.clone()
                            on_toggle=Callback::new(move |_| {
                                if let Some(id) = id {
                                    on_toggle.run(id);
                                }
                            })
                        />
                        <div class="flex-1 space-y-1">
                            <div class="flex items-center justify-between">
                                <h3 class=title_class>{item.title.clone()}</h3>
                                <div class="flex items-center gap-2">
                                    <span class=priority_class>{priority_label}</span>
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
                            </div>
                            {item.description.clone().filter(|d| !d.trim().is_empty()).map(|d| view! {
                                <p class="text-sm text-muted-foreground">{d}</p>
                            })}
                            {item.due_date.clone().filter(|d| !d.trim().is_empty()).map(|d| view! {
                                <p class="text-xs text-muted-foreground">{format!("Due: {}", format_long_date(&d))}</p>
                            })}
                        </div>
                    </div>
                </CardContent>
            </Card>
        </li>
    }
}

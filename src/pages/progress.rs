use super::PageHeader;
use crate::components::ui::{
    Card, CardContent, CardDescription, CardHeader, CardHeaderRow, CardTitle, Progress,
};
use crate::models::ProgressStats;
use crate::state::AppContext;
use crate::util::percent;
use icons::{Calendar, CircleCheck, ListTodo, TrendingUp};
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Debug, PartialEq)]
enum StatsState {
    Loading,
    Failed,
    Loaded(ProgressStats),
}

#[component]
pub fn ProgressPage() -> impl IntoView {
    let api_client = expect_context::<AppContext>().0.api_client;
    let state: RwSignal<StatsState> = RwSignal::new(StatsState::Loading);

    Effect::new(move |_| {
        let c = api_client.get_untracked();
        spawn_local(async move {
            match c.get_progress_stats().await {
                Ok(stats) => state.set(StatsState::Loaded(stats)),
                Err(e) => {
                    error!("[progress] failed to load stats: {e}");
                    state.set(StatsState::Failed);
                }
            }
        });
    });

    move || match state.get() {
        StatsState::Loading => view! {
            <PageHeader title="Progress Tracker" subtitle="Loading your progress...".to_string() />
        }
        .into_any(),
        StatsState::Failed => view! {
            <PageHeader title="Progress Tracker" subtitle="Failed to load progress data".to_string() />
        }
        .into_any(),
        StatsState::Loaded(stats) => view! { <StatsView stats=stats /> }.into_any(),
    }
}

#[component]
fn StatTile(
    #[prop(into)] title: String,
    #[prop(into)] value: String,
    #[prop(into)] caption: String,
    children: Children,
) -> impl IntoView {
    view! {
        <Card class="gap-2">
            <CardHeaderRow>
                <CardTitle class="text-sm font-medium">{title}</CardTitle>
                {children()}
            </CardHeaderRow>
            <CardContent>
                <div class="text-2xl font-bold">{value}</div>
                <p class="text-xs text-muted-foreground">{caption}</p>
            </CardContent>
        </Card>
    }
}

#[component]
fn SummaryRow(
    #[prop(into)] label: String,
    #[prop(into)] value: String,
    #[prop(into, optional)] value_class: String,
    #[prop(optional)] last: bool,
) -> impl IntoView {
    let row_class = if last {
        "flex items-center justify-between py-2"
    } else {
        "flex items-center justify-between py-2 border-b"
    };
    view! {
        <div class=row_class>
            <span class="text-sm">{label}</span>
            <span class=format!("font-medium {value_class}")>{value}</span>
        </div>
    }
}

#[component]
fn StatsView(stats: ProgressStats) -> impl IntoView {
    let schedule_pct = percent(
        stats.scheduled_items_completed as u64,
        stats.total_scheduled_items as u64,
    );

    view! {
        <div class="space-y-6">
            <PageHeader title="Progress Tracker" subtitle="Track your productivity and achievements".to_string() />

            <div class="grid gap-4 md:grid-cols-2 lg:grid-cols-4">
                <StatTile
                    title="Total Tasks"
                    value=stats.total_todos.to_string()
                    caption=format!("{} completed", stats.completed_todos)
                >
                    <ListTodo class="size-4 text-muted-foreground" />
                </StatTile>
                <StatTile
                    title="Completion Rate"
                    value=format!("{}%", stats.completion_rate)
                    caption="Overall task completion"
                >
                    <TrendingUp class="size-4 text-muted-foreground" />
                </StatTile>
                <StatTile
                    title="Today's Schedule"
                    value=stats.scheduled_items_completed.to_string()
                    caption=format!("of {} items completed", stats.total_scheduled_items)
                >
                    <Calendar class="size-4 text-muted-foreground" />
                </StatTile>
                <StatTile
                    title="Tasks Done"
                    value=stats.completed_todos.to_string()
                    caption="Tasks marked as complete"
                >
                    <CircleCheck class="size-4 text-muted-foreground" />
                </StatTile>
            </div>

            <Card>
                <CardHeader>
                    <CardTitle>"Task Completion Progress"</CardTitle>
                    <CardDescription>"Visual representation of your overall task progress"</CardDescription>
                </CardHeader>
                <CardContent class="space-y-4">
                    <div class="space-y-2">
                        <div class="flex items-center justify-between text-sm">
                            <span class="text-muted-foreground">"Overall Progress"</span>
                            <span class="font-medium">{format!("{}%", stats.completion_rate)}</span>
                        </div>
                        <Progress value=stats.completion_rate />
                    </div>
                    <div class="grid grid-cols-2 gap-4 pt-4">
                        <div class="space-y-1">
                            <p class="text-sm font-medium">"Completed Tasks"</p>
                            <p class="text-2xl font-bold text-primary">{stats.completed_todos}</p>
                        </div>
                        <div class="space-y-1">
                            <p class="text-sm font-medium">"Remaining Tasks"</p>
                            <p class="text-2xl font-bold text-muted-foreground">{stats.remaining_todos()}</p>
                        </div>
                    </div>
                </CardContent>
            </Card>

            {(stats.total_scheduled_items > 0).then(|| view! {
                <Card>
                    <CardHeader>
                        <CardTitle>"Today's Schedule Progress"</CardTitle>
                        <CardDescription>"How you're doing with today's AI-generated schedule"</CardDescription>
                    </CardHeader>
                    <CardContent class="space-y-4">
                        <div class="space-y-2">
                            <div class="flex items-center justify-between text-sm">
                                <span class="text-muted-foreground">"Schedule Completion"</span>
                                <span class="font-medium">{format!("{schedule_pct}%")}</span>
                            </div>
                            <Progress value=schedule_pct />
                        </div>
                        <div class="grid grid-cols-2 gap-4 pt-4">
                            <div class="space-y-1">
                                <p class="text-sm font-medium">"Completed Items"</p>
                                <p class="text-2xl font-bold text-primary">{stats.scheduled_items_completed}</p>
                            </div>
                            <div class="space-y-1">
                                <p class="text-sm font-medium">"Remaining Items"</p>
                                <p class="text-2xl font-bold text-muted-foreground">{stats.remaining_scheduled_items()}</p>
                            </div>
                        </div>
                    </CardContent>
                </Card>
            })}

            <Card>
                <CardHeader>
                    <CardTitle>"Daily Summary"</CardTitle>
                    <CardDescription>"Your productivity snapshot for today"</CardDescription>
                </CardHeader>
                <CardContent class="space-y-4">
                    <SummaryRow label="Total tasks in your list" value=stats.total_todos.to_string() />
                    <SummaryRow label="Tasks completed" value=stats.completed_todos.to_string() value_class="text-primary" />
                    <SummaryRow
                        label="Schedule items completed"
                        value=stats.scheduled_items_completed.to_string()
                        value_class="text-primary"
                    />
                    <SummaryRow
                        label="Overall completion rate"
                        value=format!("{}%", stats.completion_rate)
                        value_class="text-lg font-bold text-primary"
                        last=true
                    />
                </CardContent>
            </Card>
        </div>
    }
}

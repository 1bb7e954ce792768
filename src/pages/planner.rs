use super::{row_title_class, show_flash, user_message, FlashBanner, PageHeader};
use crate::components::ui::{
    Button, Card, CardContent, CardDescription, CardHeader, CardList, CardTitle, Checkbox, Spinner,
};
use crate::models::{DailyPlan, ScheduleItem};
use crate::state::{AppContext, Flash};
use crate::util::{format_long_date, format_time_12h, percent, today_iso_local};
use icons::{Calendar, CircleCheck, Clock, Sparkles};
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn PlannerPage() -> impl IntoView {
    let api_client = expect_context::<AppContext>().0.api_client;

    let plan: RwSignal<Option<DailyPlan>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);
    let flash: RwSignal<Option<Flash>> = RwSignal::new(None);

    let load_today = move || {
        let c = api_client.get_untracked();
        spawn_local(async move {
            plan.set(c.get_today_plan().await);
        });
    };

    Effect::new(move |_| {
        load_today();
    });

    let on_generate = move |_| {
        if loading.get_untracked() {
            return;
        }
        let c = api_client.get_untracked();
        loading.set(true);
        flash.set(None);

        spawn_local(async move {
            match c.generate_plan().await {
                Ok(p) => {
                    plan.set(Some(p));
                    show_flash(flash, Flash::success("Plan generated successfully!"));
                }
                Err(e) => {
                    error!("[planner] failed to generate plan: {e}");
                    let text = e
                        .message_field()
                        .unwrap_or_else(|| user_message(&e, "Failed to generate plan"));
                    show_flash(flash, Flash::error(text));
                }
            }
            loading.set(false);
        });
    };

    let toggle_item = move |item_id: i64, completed: bool| {
        let Some(plan_id) = plan.get_untracked().and_then(|p| p.id) else {
            return;
        };
        let c = api_client.get_untracked();

        spawn_local(async move {
            if let Err(e) = c.update_schedule_item(plan_id, item_id, !completed).await {
                error!("[planner] failed to update schedule item {item_id}: {e}");
                show_flash(flash, Flash::error(user_message(&e, "Failed to update schedule item")));
                return;
            }
            match c.get_today_plan().await {
                Some(p) => plan.set(Some(p)),
                // Reload failed; keep the local view consistent with what we sent.
                None => plan.update(|p| {
                    if let Some(p) = p {
                        p.set_item_completed(item_id, !completed);
                    }
                }),
            }
        });
    };

    let on_toggle = Callback::new(move |(item_id, completed): (i64, bool)| {
        toggle_item(item_id, completed)
    });

    let completion = move || {
        plan.with(|p| {
            p.as_ref()
                .map(|p| percent(p.completed_count() as u64, p.schedule_items.len() as u64))
                .unwrap_or(0)
        })
    };

    view! {
        <div class="space-y-6">
            <PageHeader
                title="AI Planner"
                subtitle="Let AI create your perfect daily schedule".to_string()
            >
                <Button attr:disabled=move || loading.get() on:click=on_generate>
                    <Show when=move || loading.get() fallback=|| view! { <Sparkles class="size-4" /> }>
                        <Spinner />
                    </Show>
                    {move || if loading.get() { "Generating..." } else { "Plan My Day" }}
                </Button>
            </PageHeader>

            <FlashBanner flash=flash />

            <Show
                when=move || plan.with(|p| p.is_some())
                fallback=|| view! {
                    <Card>
                        <CardContent class="py-6">
                            <div class="space-y-4 text-center">
                                <div class="mx-auto flex size-12 items-center justify-center rounded-full bg-primary/10">
                                    <Calendar class="size-6 text-primary" />
                                </div>
                                <div>
                                    <p class="text-xs text-muted-foreground">{format_long_date(&today_iso_local())}</p>
                                    <h3 class="text-lg font-semibold">"No Plan Yet"</h3>
                                    <p class="text-muted-foreground">
                                        "Click \"Plan My Day\" to generate your personalized schedule"
                                    </p>
                                </div>
                            </div>
                        </CardContent>
                    </Card>
                }
            >
                <Card>
                    <CardHeader class="flex-row items-center justify-between w-full">
                        <div class="space-y-1.5">
                            <CardTitle>"Today's Schedule"</CardTitle>
                            <CardDescription>
                                {move || plan.with(|p| p.as_ref().map(|p| format_long_date(&p.date)).unwrap_or_default())}
                            </CardDescription>
                        </div>
                        <div class="text-right">
                            <div class="text-2xl font-bold">{move || format!("{}%", completion())}</div>
                            <div class="text-xs text-muted-foreground">"Complete"</div>
                        </div>
                    </CardHeader>
                </Card>

                <CardList>
                    {move || {
                        plan.get()
                            .map(|p| p.schedule_items)
                            .unwrap_or_default()
                            .into_iter()
                            .map(|item| view! { <ScheduleRow item=item on_toggle=on_toggle /> })
                            .collect_view()
                    }}
                </CardList>
            </Show>
        </div>
    }
}

#[component]
fn ScheduleRow(item: ScheduleItem, on_toggle: Callback<(i64, bool)>) -> impl IntoView {
    let completed = item.completed;
    let id = item.id;

    let card_class = if completed { "opacity-60 bg-muted/50" } else { "" };
    let title_class = row_title_class(completed);

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
                                    on_toggle.run((id, completed));
                                }
                            })
                        />
                        <div class="flex-1 space-y-2">
                            <div class="flex items-center gap-2">
                                <Clock class="size-4 text-muted-foreground" />
                                <span class="text-sm font-medium text-muted-foreground">
                                    {format!("{} - {}", format_time_12h(&item.start_time), format_time_12h(&item.end_time))}
                                </span>
                            </div>
                            <h3 class=title_class>{item.title.clone()}</h3>
                            {item.description.clone().filter(|d| !d.trim().is_empty()).map(|d| view! {
                                <p class="text-sm text-muted-foreground">{d}</p>
                            })}
                        </div>
                        {completed.then(|| view! { <CircleCheck class="mt-1 size-5 text-primary" /> })}
                    </div>
                </CardContent>
            </Card>
        </li>
    }
}

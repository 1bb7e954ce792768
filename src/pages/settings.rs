use super::{show_flash, user_message, FlashBanner, PageHeader};
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
    Input, Label, Spinner, Textarea,
};
use crate::models::UserSettings;
use crate::state::{add_goal, remove_goal, AppContext, Flash};
use icons::{Plus, Save, X};
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
fn TimeField(
    #[prop(into)] id: String,
    #[prop(into)] label: String,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div class="space-y-2">
            <Label html_for=id.clone()>{label}</Label>
            <Input id=id r#type="time" bind_value=value />
        </div>
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let api_client = expect_context::<AppContext>().0.api_client;
    let defaults = UserSettings::default();

    let settings_id: RwSignal<Option<i64>> = RwSignal::new(None);
    let wake_up_time: RwSignal<String> = RwSignal::new(defaults.wake_up_time);
    let sleep_time: RwSignal<String> = RwSignal::new(defaults.sleep_time);
    let work_start_time: RwSignal<String> = RwSignal::new(defaults.work_start_time);
    let work_end_time: RwSignal<String> = RwSignal::new(defaults.work_end_time);
    let goals: RwSignal<Vec<String>> = RwSignal::new(defaults.goals);
    let today_focus: RwSignal<String> = RwSignal::new(defaults.today_focus);

    let new_goal: RwSignal<String> = RwSignal::new(String::new());
    let saving: RwSignal<bool> = RwSignal::new(false);
    let flash: RwSignal<Option<Flash>> = RwSignal::new(None);

    let apply = move |s: UserSettings| {
        settings_id.set(s.id);
        wake_up_time.set(s.wake_up_time);
        sleep_time.set(s.sleep_time);
        work_start_time.set(s.work_start_time);
        work_end_time.set(s.work_end_time);
        goals.set(s.goals);
        today_focus.set(s.today_focus);
    };

    Effect::new(move |_| {
        let c = api_client.get_untracked();
        spawn_local(async move {
            match c.get_settings().await {
                Ok(s) => apply(s),
                // Keep the defaults; the first save creates the record.
                Err(e) => error!("[settings] failed to load settings: {e}"),
            }
        });
    });

    let on_add_goal = Callback::new(move |_: ()| {
        let input = new_goal.get_untracked();
        let mut added = false;
        goals.update(|g| added = add_goal(g, &input));
        if added {
            new_goal.set(String::new());
        }
    });

    let on_save = move |_| {
        if saving.get_untracked() {
            return;
        }
        let settings = UserSettings {
            id: settings_id.get_untracked(),
            wake_up_time: wake_up_time.get_untracked(),
            sleep_time: sleep_time.get_untracked(),
            work_start_time: work_start_time.get_untracked(),
            work_end_time: work_end_time.get_untracked(),
            goals: goals.get_untracked(),
            today_focus: today_focus.get_untracked(),
        };
        let c = api_client.get_untracked();
        saving.set(true);
        flash.set(None);

        spawn_local(async move {
            match c.update_settings(&settings).await {
                Ok(saved) => {
                    apply(saved);
                    show_flash(flash, Flash::success("Settings saved successfully!"));
                }
                Err(e) => {
                    error!("[settings] failed to save settings: {e}");
                    show_flash(flash, Flash::error(user_message(&e, "Failed to save settings")));
                }
            }
            saving.set(false);
        });
    };

    view! {
        <div class="space-y-6">
            <PageHeader title="Settings" subtitle="Configure your daily routine and goals".to_string() />

            <FlashBanner flash=flash />

            <Card>
                <CardHeader>
                    <CardTitle>"Daily Routine"</CardTitle>
                    <CardDescription>"Set your typical wake up, sleep, and work hours"</CardDescription>
                </CardHeader>
                <CardContent>
                    <div class="grid grid-cols-2 gap-4">
                        <TimeField id="wakeUpTime" label="Wake Up Time" value=wake_up_time />
                        <TimeField id="sleepTime" label="Sleep Time" value=sleep_time />
                        <TimeField id="workStartTime" label="Work Start Time" value=work_start_time />
                        <TimeField id="workEndTime" label="Work End Time" value=work_end_time />
                    </div>
                </CardContent>
            </Card>

            <Card>
                <CardHeader>
                    <CardTitle>"Goals"</CardTitle>
                    <CardDescription>"What do you want to achieve? The AI will consider these when planning."</CardDescription>
                </CardHeader>
                <CardContent class="space-y-4">
                    <div class="flex gap-2">
                        <Input placeholder="Add a new goal..." bind_value=new_goal on_enter=on_add_goal />
                        <Button size=ButtonSize::Icon on:click=move |_| on_add_goal.run(())>
                            <Plus />
                        </Button>
                    </div>
                    <ul class="space-y-2">
                        {move || {
                            goals
                                .get()
                                .into_iter()
                                .enumerate()
                                .map(|(index, goal)| view! {
                                    <li class="flex items-center justify-between rounded-md border p-3">
                                        <span class="text-sm">{goal}</span>
                                        <Button
                                            variant=ButtonVariant::Ghost
                                            size=ButtonSize::Icon
                                            attr:title="Remove"
                                            on:click=move |_| goals.update(|g| remove_goal(g, index))
                                        >
                                            <X />
                                        </Button>
                                    </li>
                                })
                                .collect_view()
                        }}
                    </ul>
                    <Show when=move || goals.with(|g| g.is_empty()) fallback=|| ().into_view()>
                        <p class="text-center text-sm text-muted-foreground">"No goals added yet"</p>
                    </Show>
                </CardContent>
            </Card>

            <Card>
                <CardHeader>
                    <CardTitle>"Today's Focus"</CardTitle>
                    <CardDescription>"What's most important for you today?"</CardDescription>
                </CardHeader>
                <CardContent>
                    <Textarea
                        placeholder="e.g., Finish the project proposal, prepare for the meeting..."
                        bind_value=today_focus
                        rows=4
                    />
                </CardContent>
            </Card>

            <Button size=ButtonSize::Lg class="w-full" attr:disabled=move || saving.get() on:click=on_save>
                <Show when=move || saving.get() fallback=|| view! { <Save /> }>
                    <Spinner />
                </Show>
                {move || if saving.get() { "Saving..." } else { "Save Settings" }}
            </Button>
        </div>
    }
}

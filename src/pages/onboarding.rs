use super::{user_message, ErrorAlert};
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardFooter, CardHeader,
    CardTitle, Input, Label, Spinner,
};
use crate::models::OnboardingRequest;
use crate::state::{onboarding_route, AppContext};
use icons::Sparkles;
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

const EXAMPLE_GOALS: [&str; 6] = [
    "Pass the civil service exam",
    "Learn programming",
    "Prepare for grad school",
    "Improve my English",
    "Get fit",
    "Learn Japanese",
];

/// Builds the request body; `None` when the goal is blank.
fn onboarding_request(username: &str, goal: &str) -> Option<OnboardingRequest> {
    let goal = goal.trim();
    if goal.is_empty() {
        return None;
    }
    let username = username.trim();
    Some(OnboardingRequest {
        username: (!username.is_empty()).then(|| username.to_string()),
        goal: goal.to_string(),
    })
}

#[component]
pub fn OnboardingPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let api_client = app_state.api_client;
    let navigate = StoredValue::new(use_navigate());

    let username: RwSignal<String> = RwSignal::new(String::new());
    let goal: RwSignal<String> = RwSignal::new(String::new());
    let loading: RwSignal<bool> = RwSignal::new(false);
    let session_ready: RwSignal<bool> = RwSignal::new(false);
    let error_msg: RwSignal<Option<String>> = RwSignal::new(None);

    // `/onboarding` needs an account; a first visit may land here directly.
    Effect::new({
        let app_state = app_state.clone();
        move |_| {
            let app_state = app_state.clone();
            spawn_local(async move {
                match app_state.ensure_session().await {
                    Ok(user) => {
                        let route = onboarding_route(&user);
                        if route != "/welcome" {
                            navigate.with_value(|nav| nav(route, Default::default()));
                            return;
                        }
                        session_ready.set(true);
                    }
                    Err(e) => {
                        error!("[onboarding] failed to load user: {e}");
                        error_msg.set(Some(user_message(
                            &e,
                            "Cannot start a session right now, please reload the page",
                        )));
                    }
                }
            });
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() || !session_ready.get_untracked() {
            return;
        }
        let Some(req) = onboarding_request(&username.get_untracked(), &goal.get_untracked()) else {
            error_msg.set(Some("Please enter your goal".to_string()));
            return;
        };

        let c = api_client.get_untracked();
        let app_state = app_state.clone();
        loading.set(true);
        error_msg.set(None);

        spawn_local(async move {
            match c.complete_onboarding(&req).await {
                Ok(res) => {
                    app_state.remember_user(res.user);
                    navigate.with_value(|nav| nav("/timeline", Default::default()));
                }
                Err(e) => {
                    error!("[onboarding] failed to complete onboarding: {e}");
                    error_msg.set(Some(user_message(
                        &e,
                        "Failed to generate your plan, please try again",
                    )));
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="flex min-h-[80vh] items-center justify-center px-4">
            <Card class="w-full max-w-lg">
                <CardHeader class="text-center">
                    <div class="mx-auto flex size-12 items-center justify-center rounded-full bg-primary/10">
                        <Sparkles class="size-6 text-primary" />
                    </div>
                    <CardTitle class="text-2xl">"Welcome to Cabbage"</CardTitle>
                    <CardDescription>
                        "Tell us what you want to achieve and we'll draft your first tasks"
                    </CardDescription>
                </CardHeader>
                <CardContent class="space-y-4">
                    <ErrorAlert error=error_msg />
                    <form class="space-y-4" on:submit=on_submit>
                        <div class="space-y-2">
                            <Label html_for="nickname">"Nickname (optional)"</Label>
                            <Input
                                id="nickname"
                                placeholder="How should we call you?"
                                bind_value=username
                                disabled=loading
                            />
                        </div>
                        <div class="space-y-2">
                            <Label html_for="goal">"Your goal"</Label>
                            <Input
                                id="goal"
                                placeholder="e.g. Learn programming"
                                bind_value=goal
                                disabled=loading
                            />
                        </div>
                        <Button
                            class="w-full"
                            attr:disabled=move || {
                                loading.get() || !session_ready.get() || goal.with(|g| g.trim().is_empty())
                            }
                        >
                            <Show when=move || loading.get() fallback=|| view! { <Sparkles /> }>
                                <Spinner />
                            </Show>
                            {move || if loading.get() {
                                "Generating your personal plan..."
                            } else {
                                "Start planning"
                            }}
                        </Button>
                    </form>
                </CardContent>
                // Chips sit outside the form so clicking one never submits it.
                <CardFooter class="flex-col items-start gap-2">
                    <p class="text-xs text-muted-foreground">"Need inspiration?"</p>
                    <div class="flex flex-wrap gap-2">
                        {EXAMPLE_GOALS
                            .into_iter()
                            .map(|example| view! {
                                <Button
                                    variant=ButtonVariant::Chip
                                    size=ButtonSize::Sm
                                    on:click=move |_| goal.set(example.to_string())
                                >
                                    {example}
                                </Button>
                            })
                            .collect_view()}
                    </div>
                </CardFooter>
            </Card>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onboarding_request_requires_goal() {
        assert!(onboarding_request("alice", "   ").is_none());

        let req = onboarding_request("  ", "  Learn Rust ").expect("goal present");
        assert_eq!(req.goal, "Learn Rust");
        assert!(req.username.is_none());

        let req = onboarding_request(" alice ", "Get fit").expect("goal present");
        assert_eq!(req.username.as_deref(), Some("alice"));
    }
}

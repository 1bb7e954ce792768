mod onboarding;
mod planner;
mod progress;
mod settings;
mod tasks;
mod timeline;

pub use onboarding::OnboardingPage;
pub use planner::PlannerPage;
pub use progress::ProgressPage;
pub use settings::SettingsPage;
pub use tasks::TasksPage;
pub use timeline::TimelinePage;

use crate::api::{ApiError, ApiErrorKind};
use crate::components::ui::{Alert, AlertDescription, Card, CardContent};
use crate::state::Flash;
use leptos::prelude::*;
use std::time::Duration;

const FLASH_TTL: Duration = Duration::from_secs(3);

/// Short, user-facing text for a failed call.
pub(crate) fn user_message(e: &ApiError, fallback: &str) -> String {
    match e.kind {
        ApiErrorKind::Unauthorized => "Your session has expired. Reload the page to start a new one.".to_string(),
        ApiErrorKind::Network => "Cannot reach the server.".to_string(),
        ApiErrorKind::Http | ApiErrorKind::Parse => fallback.to_string(),
    }
}

/// Completed tasks and schedule items are struck through.
pub(crate) fn row_title_class(completed: bool) -> &'static str {
    if completed {
        "font-semibold line-through text-muted-foreground"
    } else {
        "font-semibold"
    }
}

/// Show `flash`; success messages clear themselves after a few seconds.
pub(crate) fn show_flash(slot: RwSignal<Option<Flash>>, flash: Flash) {
    let auto_clear = flash.is_success();
    slot.set(Some(flash.clone()));
    if auto_clear {
        leptos_dom::helpers::set_timeout(
            move || {
                // A newer message may have replaced this one.
                if slot.get_untracked().as_ref() == Some(&flash) {
                    slot.set(None);
                }
            },
            FLASH_TTL,
        );
    }
}

#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(into)] subtitle: Signal<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between gap-4">
            <div class="space-y-1">
                <h2 class="text-3xl font-bold tracking-tight">{title}</h2>
                <p class="text-muted-foreground">{move || subtitle.get()}</p>
            </div>
            {children.map(|c| c())}
        </div>
    }
}

#[component]
pub fn ErrorAlert(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ().into_view()>
            {move || {
                error.get().map(|e| view! {
                    <Alert class="border-destructive/30">
                        <AlertDescription class="text-destructive">{e}</AlertDescription>
                    </Alert>
                })
            }}
        </Show>
    }
}

#[component]
pub(crate) fn FlashBanner(flash: RwSignal<Option<Flash>>) -> impl IntoView {
    move || {
        flash.get().map(|f| view! {
            <Card class=f.border_class()>
                <CardContent>
                    <p class=f.text_class()>{f.text.clone()}</p>
                </CardContent>
            </Card>
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_by_kind() {
        let e = ApiError {
            kind: ApiErrorKind::Network,
            message: "error sending request".to_string(),
            body: None,
        };
        assert_eq!(user_message(&e, "Failed to load todos"), "Cannot reach the server.");

        let e = ApiError {
            kind: ApiErrorKind::Http,
            message: "Request failed (500): boom".to_string(),
            body: Some("boom".to_string()),
        };
        assert_eq!(user_message(&e, "Failed to load todos"), "Failed to load todos");
    }

    #[test]
    fn test_row_title_class_strikes_through_completed() {
        assert!(row_title_class(true).contains("line-through"));
        assert!(!row_title_class(false).contains("line-through"));
        assert!(row_title_class(false).contains("font-semibold"));
    }
}

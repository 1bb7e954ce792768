use crate::pages::{
    OnboardingPage, PlannerPage, ProgressPage, SettingsPage, TasksPage, TimelinePage,
};
use crate::state::{AppContext, AppState};
use icons::{Clock, ListTodo, Settings, Sparkles, TrendingUp};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_location;
use leptos_router::path;

const NAV_LINK_CLASS: &str =
    "inline-flex items-center gap-2 rounded-md px-3 py-2 text-sm font-medium transition-colors";

fn nav_link_class(active: bool) -> String {
    if active {
        format!("{NAV_LINK_CLASS} bg-primary text-primary-foreground")
    } else {
        format!("{NAV_LINK_CLASS} text-muted-foreground hover:bg-accent hover:text-accent-foreground")
    }
}

#[component]
fn NavLink(href: &'static str, #[prop(into)] label: String, children: Children) -> impl IntoView {
    let location = use_location();
    let class = move || nav_link_class(location.pathname.get() == href);

    view! {
        <a href=href class=class>
            {children()}
            <span class="hidden sm:inline">{label}</span>
        </a>
    }
}

#[component]
fn NavBar() -> impl IntoView {
    view! {
        <header class="border-b bg-background">
            <div class="mx-auto flex max-w-5xl items-center justify-between gap-4 px-4 py-3">
                <a href="/" class="flex items-center gap-2">
                    <div class="flex size-8 items-center justify-center rounded-md bg-primary text-primary-foreground">
                        <Sparkles class="size-4" />
                    </div>
                    <div class="leading-tight">
                        <div class="font-semibold">"Cabbage"</div>
                        <div class="text-xs text-muted-foreground">"AI Daily Planner"</div>
                    </div>
                </a>
                <nav class="flex items-center gap-1">
                    <NavLink href="/" label="Planner"><Sparkles class="size-4" /></NavLink>
                    <NavLink href="/todos" label="Tasks"><ListTodo class="size-4" /></NavLink>
                    <NavLink href="/timeline" label="Timeline"><Clock class="size-4" /></NavLink>
                    <NavLink href="/progress" label="Progress"><TrendingUp class="size-4" /></NavLink>
                    <NavLink href="/settings" label="Settings"><Settings class="size-4" /></NavLink>
                </nav>
            </div>
        </header>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    view! {
        <Router>
            <div class="min-h-screen bg-background text-foreground">
                <NavBar />
                <main class="mx-auto max-w-5xl px-4 py-8">
                    <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                        <Route path=path!("") view=PlannerPage />
                        <Route path=path!("todos") view=TasksPage />
                        <Route path=path!("progress") view=ProgressPage />
                        <Route path=path!("settings") view=SettingsPage />
                        <Route path=path!("welcome") view=OnboardingPage />
                        <Route path=path!("timeline") view=TimelinePage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

#[cfg(test)]
mod tests {
    use super::nav_link_class;

    #[test]
    fn test_nav_link_class_marks_active_route() {
        assert!(nav_link_class(true).contains("bg-primary"));
        assert!(!nav_link_class(false).contains("bg-primary"));
        assert!(nav_link_class(false).contains("text-muted-foreground"));
    }
}

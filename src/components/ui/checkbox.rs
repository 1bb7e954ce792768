use leptos::prelude::*;
use tw_merge::tw_merge;

/// Controlled checkbox: the parent owns `checked` and decides what a click does.
#[component]
pub fn Checkbox(
    #[prop(into)] checked: Signal<bool>,
    on_toggle: Callback<()>,
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] aria_label: String,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "size-4 shrink-0 cursor-pointer rounded-[4px] border border-input accent-primary",
        class
    );

    view! {
        <input
            data-name="Checkbox"
            type="checkbox"
            class=merged_class
            aria-label=aria_label
            prop:checked=move || checked.get()
            on:change=move |_| on_toggle.run(())
        />
    }
}

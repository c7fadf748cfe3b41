//! 同意チェックボックス

use faceguard_common::presenter::ConsentRow;
use faceguard_common::ConsentItem;
use leptos::prelude::*;

#[component]
pub fn ConsentGate<F>(
    items: &'static [ConsentItem],
    rows: Signal<Vec<ConsentRow>>,
    on_change: F,
) -> impl IntoView
where
    F: Fn(ConsentItem, bool) + 'static + Clone,
{
    let is_checked = move |item: ConsentItem| {
        rows.with(|rows| rows.iter().any(|row| row.item == item && row.checked))
    };

    view! {
        <div class="consent-box">
            {items
                .iter()
                .map(|&item| {
                    let on_change = on_change.clone();
                    view! {
                        <label class="consent-item">
                            <input
                                type="checkbox"
                                prop:checked=move || is_checked(item)
                                on:change=move |ev| on_change(item, event_target_checked(&ev))
                            />
                            <span>{item.statement()}</span>
                        </label>
                    }
                })
                .collect_view()}
        </div>
    }
}

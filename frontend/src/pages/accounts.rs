use futures::future::try_join;
use log::{error, info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::{AccountsSummary, AccountsTable, MonthlyHistoryChart};
use crate::context::AppContext;
use crate::error::LoadError;
use crate::export::download_csv;
use crate::models::{HistoryPoint, Snapshot};
use crate::pipeline::filter::fund_type_options;
use crate::pipeline::{
    canonicalize_funds, group_by_month, known_month_keys, snapshots_for_month, trend_text,
    FilterCriteria, FundTypeFilter, Summary, ALL_FUND_TYPES,
};
use crate::storage::{AccountsPreferences, PreferencesStore};
use crate::validation::validate_pin;

fn criteria_from(prefs: &AccountsPreferences) -> FilterCriteria {
    FilterCriteria {
        fund_type: FundTypeFilter::from_value(prefs.fund_type_filter.as_deref().unwrap_or("")),
        search_text: prefs.search_text.clone().unwrap_or_default(),
        min_amount: prefs.min_amount_filter.clone().unwrap_or_default(),
    }
}

fn save_preferences(store: &PreferencesStore, month: Option<&str>, criteria: &FilterCriteria) {
    store.save(&AccountsPreferences {
        selected_month_key: month.map(str::to_string),
        fund_type_filter: Some(criteria.fund_type.as_value().to_string()),
        search_text: Some(criteria.search_text.clone()),
        min_amount_filter: Some(criteria.min_amount.clone()),
    });
}

/// Keeps the remembered month if the data still has it, else the newest.
fn effective_month(month_keys: &[String], selected: Option<&str>) -> Option<String> {
    match selected {
        Some(month) if month_keys.iter().any(|k| k == month) => Some(month.to_string()),
        _ => month_keys.first().cloned(),
    }
}

#[function_component(AccountsPage)]
pub fn accounts_page() -> Html {
    let ctx = use_context::<AppContext>().unwrap_or_else(AppContext::from_browser);

    let snapshots = use_state(Vec::<Snapshot>::new);
    let history = use_state(Vec::<HistoryPoint>::new);
    let loading = use_state(|| true);
    let load_error = use_state(|| None::<LoadError>);

    let stored = {
        let preferences = ctx.preferences.clone();
        use_state(move || preferences.load().unwrap_or_default())
    };
    let selected_month = {
        let stored = stored.clone();
        use_state(move || stored.selected_month_key.clone())
    };
    let criteria = {
        let stored = stored.clone();
        use_state(move || criteria_from(&stored))
    };

    let pin = {
        let pins = ctx.pins.clone();
        use_state(move || pins.get().unwrap_or_default())
    };
    let has_valid_pin = {
        let pins = ctx.pins.clone();
        use_state(move || pins.get().is_some())
    };
    let pin_error = use_state(|| None::<String>);

    let has_client_token = ctx.config.has_client_token();
    let pin_ready = *has_valid_pin;

    {
        let snapshots = snapshots.clone();
        let history = history.clone();
        let loading = loading.clone();
        let load_error = load_error.clone();
        let pin = pin.clone();
        let has_valid_pin = has_valid_pin.clone();
        let pin_error = pin_error.clone();
        let ctx = ctx.clone();

        use_effect_with_deps(
            move |valid: &bool| {
                info!("accounts page load start (token configured: {})", has_client_token);
                if !has_client_token {
                    load_error.set(Some(LoadError::MissingToken));
                    loading.set(false);
                } else if !*valid {
                    loading.set(false);
                } else {
                    loading.set(true);
                    load_error.set(None);
                    spawn_local(async move {
                        info!("fetching CRM data using client token header");
                        let result =
                            try_join(ctx.client.fetch_snapshots(), ctx.client.fetch_history())
                                .await;
                        match result {
                            Ok((snapshot_list, history_list)) => {
                                info!(
                                    "CRM data loaded: {} snapshots, {} history points",
                                    snapshot_list.len(),
                                    history_list.len()
                                );
                                snapshots.set(snapshot_list);
                                history.set(history_list);
                            }
                            Err(err) => {
                                error!("error loading CRM data: {}", err);
                                match LoadError::from_api(err) {
                                    LoadError::PinRejected => {
                                        warn!("stored PIN rejected, clearing it");
                                        ctx.pins.clear();
                                        pin.set(String::new());
                                        has_valid_pin.set(false);
                                        pin_error.set(Some(LoadError::PinRejected.message().to_string()));
                                        load_error.set(None);
                                    }
                                    other => load_error.set(Some(other)),
                                }
                            }
                        }
                        loading.set(false);
                    });
                }
                || ()
            },
            pin_ready,
        );
    }

    // view pipeline: month -> filters -> merged funds
    let month_keys = known_month_keys(&snapshots);
    let month = effective_month(&month_keys, selected_month.as_deref());
    let month_rows = snapshots_for_month(&snapshots, month.as_deref());
    let type_options = fund_type_options(&month_rows);
    let visible = criteria.apply(&month_rows);
    let funds: Vec<_> = group_by_month(&visible)
        .values()
        .flat_map(|group| canonicalize_funds(group))
        .collect();
    let summary = Summary::compute(&visible, &funds);
    let trend = trend_text(&history, month.as_deref());

    let month_index = month
        .as_ref()
        .and_then(|m| month_keys.iter().position(|k| k == m));
    let can_go_prev = matches!(month_index, Some(i) if i + 1 < month_keys.len());
    let can_go_next = matches!(month_index, Some(i) if i > 0);

    let select_month = {
        let selected_month = selected_month.clone();
        let criteria = criteria.clone();
        let preferences = ctx.preferences.clone();
        move |key: Option<String>| {
            let selected_month = selected_month.clone();
            let criteria = criteria.clone();
            let preferences = preferences.clone();
            Callback::from(move |_: MouseEvent| {
                if let Some(key) = key.clone() {
                    save_preferences(&preferences, Some(key.as_str()), &criteria);
                    selected_month.set(Some(key));
                }
            })
        }
    };
    let on_prev_month = select_month(
        month_index
            .filter(|_| can_go_prev)
            .and_then(|i| month_keys.get(i + 1).cloned()),
    );
    let on_next_month = select_month(
        month_index
            .filter(|_| can_go_next)
            .and_then(|i| month_keys.get(i - 1).cloned()),
    );

    let update_criteria = {
        let criteria = criteria.clone();
        let preferences = ctx.preferences.clone();
        let month = month.clone();
        move |next: FilterCriteria| {
            save_preferences(&preferences, month.as_deref(), &next);
            criteria.set(next);
        }
    };

    let on_type_change = {
        let criteria = criteria.clone();
        let update = update_criteria.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            update(FilterCriteria {
                fund_type: FundTypeFilter::from_value(&select.value()),
                ..(*criteria).clone()
            });
        })
    };

    let on_search_input = {
        let criteria = criteria.clone();
        let update = update_criteria.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            update(FilterCriteria {
                search_text: input.value(),
                ..(*criteria).clone()
            });
        })
    };

    let on_min_amount_input = {
        let criteria = criteria.clone();
        let update = update_criteria.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            update(FilterCriteria {
                min_amount: input.value(),
                ..(*criteria).clone()
            });
        })
    };

    let on_clear_filters = {
        let update = update_criteria.clone();
        Callback::from(move |_: MouseEvent| update(FilterCriteria::default()))
    };

    let on_export = {
        let visible = visible.clone();
        let month = month.clone();
        Callback::from(move |_: MouseEvent| {
            if let Err(err) = download_csv(&visible, month.as_deref()) {
                error!("CSV export failed: {}", err);
            }
        })
    };

    let on_pin_input = {
        let pin = pin.clone();
        let pin_error = pin_error.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            pin.set(input.value());
            if pin_error.is_some() {
                pin_error.set(None);
            }
        })
    };

    let on_pin_submit = {
        let pin = pin.clone();
        let pin_error = pin_error.clone();
        let has_valid_pin = has_valid_pin.clone();
        let load_error = load_error.clone();
        let pins = ctx.pins.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match validate_pin(&pin) {
                Ok(value) => {
                    pins.set(&value);
                    has_valid_pin.set(true);
                    pin_error.set(None);
                    load_error.set(None);
                }
                Err(err) => pin_error.set(Some(err.to_string())),
            }
        })
    };

    let on_switch_pin = {
        let pin = pin.clone();
        let has_valid_pin = has_valid_pin.clone();
        let snapshots = snapshots.clone();
        let history = history.clone();
        let pins = ctx.pins.clone();
        Callback::from(move |_: MouseEvent| {
            pins.clear();
            pin.set(String::new());
            snapshots.set(Vec::new());
            history.set(Vec::new());
            has_valid_pin.set(false);
        })
    };

    let nothing_to_export = visible.is_empty();
    let error_message = (*load_error).as_ref().map(LoadError::message);
    let show_pin_form = !*loading && error_message.is_none() && has_client_token && !*has_valid_pin;
    let show_data = !*loading && error_message.is_none() && has_client_token && *has_valid_pin;

    html! {
        <div class="page-container">
            <h1 class="page-title">{"נתוני קופות"}</h1>

            if *loading {
                <p class="page-message">{"טוען נתונים..."}</p>
            }

            if let Some(message) = error_message.filter(|_| !*loading) {
                <p class="page-message page-message-error">{ message }</p>
            }

            if show_pin_form {
                <form class="pin-form" onsubmit={on_pin_submit}>
                    <label class="pin-form-label" for="pin-input">{"הקלד קוד גישה (6 ספרות)"}</label>
                    <input
                        id="pin-input"
                        type="password"
                        inputmode="numeric"
                        pattern="[0-9]*"
                        maxlength="6"
                        class="pin-form-input"
                        autocomplete="one-time-code"
                        value={(*pin).clone()}
                        oninput={on_pin_input}
                    />
                    if let Some(message) = &*pin_error {
                        <p class="pin-form-error">{ message.clone() }</p>
                    }
                    <div class="pin-form-actions">
                        <button type="submit" class="button-primary">{"אישור"}</button>
                    </div>
                </form>
            }

            if show_data {
                if let Some(current) = month.clone() {
                    <div class="accounts-month-selector">
                        <button type="button" onclick={on_prev_month} disabled={!can_go_prev}>{"חודש קודם"}</button>
                        <span class="accounts-month-current">{ current }</span>
                        <button type="button" onclick={on_next_month} disabled={!can_go_next}>{"חודש הבא"}</button>
                    </div>
                }

                <div class="accounts-filters">
                    <select class="accounts-filter-type" onchange={on_type_change}>
                        <option value={ALL_FUND_TYPES} selected={criteria.fund_type == FundTypeFilter::All}>{"כל סוגי הקופות"}</option>
                        { for type_options.iter().map(|kind| {
                            let selected = criteria.fund_type.as_value().to_lowercase() == kind.to_lowercase();
                            html! { <option key={kind.clone()} value={kind.clone()} selected={selected}>{ kind.clone() }</option> }
                        }) }
                    </select>
                    <input
                        type="search"
                        class="accounts-filter-search"
                        placeholder="חיפוש לפי שם, מספר או קוד קופה"
                        value={criteria.search_text.clone()}
                        oninput={on_search_input}
                    />
                    <input
                        type="text"
                        inputmode="decimal"
                        class="accounts-filter-min"
                        placeholder="סכום מינימלי"
                        value={criteria.min_amount.clone()}
                        oninput={on_min_amount_input}
                    />
                    if criteria.is_active() {
                        <button type="button" class="button-secondary" onclick={on_clear_filters}>{"נקה סינון"}</button>
                    }
                    <button type="button" class="button-secondary" onclick={on_export} disabled={nothing_to_export}>{"ייצוא ל-CSV"}</button>
                    <button type="button" class="button-link" onclick={on_switch_pin}>{"החלפת קוד גישה"}</button>
                </div>

                <AccountsSummary summary={summary} trend_text={trend} />
                <AccountsTable snapshots={visible} />
                <MonthlyHistoryChart points={(*history).clone()} />
            }
        </div>
    }
}

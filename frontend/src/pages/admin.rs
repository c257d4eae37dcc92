use log::{error, info};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::context::AppContext;
use crate::validation::{parse_client_id, validate_admin_pin, validate_token};

fn text_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

/// Staff screen for issuing or replacing a client's token and PIN.
#[function_component(ClientAccessAdminPage)]
pub fn client_access_admin_page() -> Html {
    let ctx = use_context::<AppContext>().unwrap_or_else(AppContext::from_browser);

    let client_id_text = use_state(String::new);
    let last_client_id = use_state(|| None::<u64>);
    let generated_token = use_state(|| None::<String>);
    let generated_pin = use_state(|| None::<String>);
    let manual_token = use_state(String::new);
    let manual_pin = use_state(String::new);
    let status_message = use_state(|| None::<String>);
    let error_message = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_reset = {
        let client = ctx.client.clone();
        let client_id_text = client_id_text.clone();
        let last_client_id = last_client_id.clone();
        let generated_token = generated_token.clone();
        let generated_pin = generated_pin.clone();
        let manual_token = manual_token.clone();
        let manual_pin = manual_pin.clone();
        let status_message = status_message.clone();
        let error_message = error_message.clone();
        let loading = loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            status_message.set(None);
            error_message.set(None);

            let client_id = match parse_client_id(&client_id_text) {
                Ok(id) => id,
                Err(err) => {
                    error_message.set(Some(err.to_string()));
                    return;
                }
            };

            loading.set(true);
            let client = client.clone();
            let last_client_id = last_client_id.clone();
            let generated_token = generated_token.clone();
            let generated_pin = generated_pin.clone();
            let manual_token = manual_token.clone();
            let manual_pin = manual_pin.clone();
            let status_message = status_message.clone();
            let error_message = error_message.clone();
            let loading = loading.clone();
            spawn_local(async move {
                match client.reset_credentials(client_id).await {
                    Ok(result) => {
                        last_client_id.set(u64::try_from(result.client_id).ok());
                        generated_token.set(Some(result.client_token.clone()));
                        generated_pin.set(Some(result.client_pin.clone()));
                        manual_token.set(result.client_token);
                        manual_pin.set(result.client_pin);
                        status_message.set(Some("נוצרו טוקן וקוד גישה חדשים ללקוח.".to_string()));
                    }
                    Err(err) => {
                        error!("credential reset for client {} failed: {}", client_id, err);
                        error_message.set(Some(
                            "אירעה שגיאה בעת יצירת טוקן/ססמה. בדוק את מספר הלקוח.".to_string(),
                        ));
                    }
                }
                loading.set(false);
            });
        })
    };

    let on_update_token = {
        let client = ctx.client.clone();
        let client_id_text = client_id_text.clone();
        let manual_token = manual_token.clone();
        let last_client_id = last_client_id.clone();
        let generated_token = generated_token.clone();
        let status_message = status_message.clone();
        let error_message = error_message.clone();
        let loading = loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            status_message.set(None);
            error_message.set(None);

            let validated = parse_client_id(&client_id_text)
                .and_then(|id| validate_token(&manual_token).map(|token| (id, token)));
            let (client_id, token) = match validated {
                Ok(pair) => pair,
                Err(err) => {
                    error_message.set(Some(err.to_string()));
                    return;
                }
            };

            loading.set(true);
            let client = client.clone();
            let last_client_id = last_client_id.clone();
            let generated_token = generated_token.clone();
            let status_message = status_message.clone();
            let error_message = error_message.clone();
            let loading = loading.clone();
            spawn_local(async move {
                match client.update_token(client_id, &token).await {
                    Ok(()) => {
                        info!("token updated for client {}", client_id);
                        last_client_id.set(Some(client_id));
                        generated_token.set(Some(token));
                        status_message.set(Some("הטוקן עודכן בהצלחה.".to_string()));
                    }
                    Err(err) => {
                        error!("token update for client {} failed: {}", client_id, err);
                        error_message.set(Some("אירעה שגיאה בעת עדכון הטוקן.".to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    let on_update_pin = {
        let client = ctx.client.clone();
        let client_id_text = client_id_text.clone();
        let manual_pin = manual_pin.clone();
        let last_client_id = last_client_id.clone();
        let generated_pin = generated_pin.clone();
        let status_message = status_message.clone();
        let error_message = error_message.clone();
        let loading = loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            status_message.set(None);
            error_message.set(None);

            let validated = parse_client_id(&client_id_text)
                .and_then(|id| validate_admin_pin(&manual_pin).map(|pin| (id, pin)));
            let (client_id, pin) = match validated {
                Ok(pair) => pair,
                Err(err) => {
                    error_message.set(Some(err.to_string()));
                    return;
                }
            };

            loading.set(true);
            let client = client.clone();
            let last_client_id = last_client_id.clone();
            let generated_pin = generated_pin.clone();
            let status_message = status_message.clone();
            let error_message = error_message.clone();
            let loading = loading.clone();
            spawn_local(async move {
                match client.update_pin(client_id, Some(&pin)).await {
                    Ok(()) => {
                        info!("PIN updated for client {}", client_id);
                        last_client_id.set(Some(client_id));
                        generated_pin.set(Some(pin));
                        status_message.set(Some("קוד הגישה עודכן בהצלחה.".to_string()));
                    }
                    Err(err) => {
                        error!("PIN update for client {} failed: {}", client_id, err);
                        error_message.set(Some("אירעה שגיאה בעת עדכון קוד הגישה.".to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    let client_link = (*generated_token)
        .as_ref()
        .filter(|_| last_client_id.is_some())
        .map(|token| ctx.config.client_link(token));
    let show_result = last_client_id.is_some() && (generated_token.is_some() || generated_pin.is_some());

    html! {
        <div class="page-container">
            <h1 class="page-title">{"ניהול גישה לאפליקציית לקוח"}</h1>

            if *loading {
                <p class="page-message">{"מבצע פעולה..."}</p>
            }
            if let Some(message) = (*error_message).clone().filter(|_| !*loading) {
                <p class="page-message page-message-error">{ message }</p>
            }
            if let Some(message) = (*status_message).clone().filter(|_| !*loading && error_message.is_none()) {
                <p class="page-message">{ message }</p>
            }

            <form class="admin-form" onsubmit={on_reset}>
                <h2 class="admin-form-title">{"יצירת טוקן וקוד גישה חדשים"}</h2>
                <label class="admin-form-label" for="client-id-input">{"מספר לקוח (כפי שמופיע במערכת BEN-ZVI)"}</label>
                <input
                    id="client-id-input"
                    type="number"
                    min="1"
                    class="admin-form-input"
                    value={(*client_id_text).clone()}
                    oninput={text_input(&client_id_text)}
                />
                <button type="submit" class="button-primary" disabled={*loading}>{"צור token + PIN חדשים"}</button>
            </form>

            <form class="admin-form" onsubmit={on_update_token}>
                <h2 class="admin-form-title">{"עדכון טוקן ידני"}</h2>
                <label class="admin-form-label" for="manual-token-input">{"טוקן חדש ללקוח"}</label>
                <input
                    id="manual-token-input"
                    type="text"
                    class="admin-form-input"
                    value={(*manual_token).clone()}
                    oninput={text_input(&manual_token)}
                />
                <button type="submit" class="button-secondary" disabled={*loading}>{"עדכן טוקן"}</button>
            </form>

            <form class="admin-form" onsubmit={on_update_pin}>
                <h2 class="admin-form-title">{"עדכון קוד גישה (PIN)"}</h2>
                <label class="admin-form-label" for="manual-pin-input">{"קוד גישה חדש (6 ספרות)"}</label>
                <input
                    id="manual-pin-input"
                    type="password"
                    inputmode="numeric"
                    pattern="[0-9]*"
                    maxlength="6"
                    class="admin-form-input"
                    value={(*manual_pin).clone()}
                    oninput={text_input(&manual_pin)}
                />
                <button type="submit" class="button-secondary" disabled={*loading}>{"עדכן קוד גישה"}</button>
            </form>

            if show_result {
                <div class="admin-result">
                    <h2 class="admin-form-title">{"פרטי גישה שנוצרו"}</h2>
                    <p>{ format!("מספר לקוח: {}", last_client_id.unwrap_or_default()) }</p>
                    if let Some(token) = (*generated_token).clone() {
                        <p>{ format!("Token: {}", token) }</p>
                    }
                    if let Some(pin) = (*generated_pin).clone() {
                        <p>{ format!("PIN: {}", pin) }</p>
                    }
                    if let Some(link) = client_link {
                        <p>
                            {"כתובת ללקוח: "}
                            <span class="admin-result-url">{ link }</span>
                        </p>
                    }
                </div>
            }
        </div>
    }
}

mod api;
mod components;
mod config;
mod context;
mod error;
mod export;
mod format;
mod models;
mod pages;
mod pipeline;
mod storage;
mod validation;

use yew::prelude::*;

use components::PageLayout;
use context::AppContext;
use pages::{AccountsPage, ClientAccessAdminPage};

#[function_component(App)]
fn app() -> Html {
    let ctx = use_state(AppContext::from_browser);

    let content = if ctx.config.admin_mode {
        html! { <ClientAccessAdminPage /> }
    } else {
        html! { <AccountsPage /> }
    };

    html! {
        <ContextProvider<AppContext> context={(*ctx).clone()}>
            <PageLayout>
                { content }
            </PageLayout>
        </ContextProvider<AppContext>>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("client portal starting");
    yew::Renderer::<App>::new().render();
}

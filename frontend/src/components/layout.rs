use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PageLayoutProps {
    pub children: Children,
}

#[function_component(PageLayout)]
pub fn page_layout(props: &PageLayoutProps) -> Html {
    html! {
        <div class="app-root" dir="rtl">
            <header class="app-header">
                <div class="app-header-title">{"אזור הלקוח - נתוני קופות"}</div>
            </header>
            <main class="app-main">
                { for props.children.iter() }
            </main>
            <footer class="app-footer">
                <span>{"Unified CRM"}</span>
            </footer>
        </div>
    }
}

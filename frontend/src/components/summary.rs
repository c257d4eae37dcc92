use yew::prelude::*;

use crate::format::format_currency;
use crate::pipeline::Summary;

#[derive(Properties, PartialEq)]
pub struct AccountsSummaryProps {
    pub summary: Summary,
    #[prop_or_default]
    pub trend_text: Option<String>,
}

#[function_component(AccountsSummary)]
pub fn accounts_summary(props: &AccountsSummaryProps) -> Html {
    let summary = &props.summary;

    html! {
        <div class="accounts-summary">
            <div>
                <div class="accounts-summary-label">{"סכום כולל בכל הקופות"}</div>
                <div class="accounts-summary-value">{ format_currency(Some(summary.total_amount)) }</div>
                if let Some(trend) = &props.trend_text {
                    <div class="accounts-summary-trend">{ trend.clone() }</div>
                }
            </div>
            <div class="accounts-summary-metrics">
                <div class="accounts-summary-metric">
                    <div class="accounts-summary-metric-label">{"מספר קופות"}</div>
                    <div class="accounts-summary-metric-value">{ summary.fund_count }</div>
                </div>
                if summary.average_amount > 0.0 {
                    <div class="accounts-summary-metric">
                        <div class="accounts-summary-metric-label">{"ממוצע לקופה"}</div>
                        <div class="accounts-summary-metric-value">
                            { format_currency(Some(summary.average_amount)) }
                        </div>
                    </div>
                }
            </div>
        </div>
    }
}

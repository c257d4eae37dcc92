use yew::prelude::*;

use crate::format::{format_currency, format_month_label};
use crate::models::HistoryPoint;
use crate::pipeline::build_history_chart;

#[derive(Properties, PartialEq)]
pub struct MonthlyHistoryChartProps {
    pub points: Vec<HistoryPoint>,
}

#[function_component(MonthlyHistoryChart)]
pub fn monthly_history_chart(props: &MonthlyHistoryChartProps) -> Html {
    if props.points.is_empty() {
        return html! { <p class="page-message">{"אין נתוני היסטוריה להצגה."}</p> };
    }

    let Some(chart) = build_history_chart(&props.points) else {
        return html! { <p class="page-message">{"אין נתוני היסטוריה חיוביים להצגה."}</p> };
    };

    html! {
        <div class="chart-container">
            <h2 class="chart-title">{"התפתחות סכום הקופות לפי חודשים"}</h2>
            <div class="chart-body">
                <div class="history-chart">
                    <svg viewBox="0 0 100 100" class="history-chart-svg" preserveAspectRatio="none">
                        <path d={chart.path.clone()} class="history-chart-line" />
                        { for chart.points.iter().enumerate().map(|(i, (x, y))| html! {
                            <circle key={i.to_string()} cx={x.to_string()} cy={y.to_string()} r="1.5" class="history-chart-point" />
                        }) }
                    </svg>
                    <div class="history-chart-labels">
                        { for chart.series.iter().map(|p| html! {
                            <div key={p.month.clone()} class="history-chart-label">
                                <span class="history-chart-label-month">{ format_month_label(&p.month) }</span>
                                <span class="history-chart-label-value">{ format_currency(p.amount) }</span>
                            </div>
                        }) }
                    </div>
                </div>
            </div>
        </div>
    }
}

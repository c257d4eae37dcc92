use std::collections::HashSet;
use yew::prelude::*;

use crate::format::{format_currency, format_date, month_key_label};
use crate::models::Snapshot;
use crate::pipeline::{
    canonicalize_funds, group_by_month, sort_rows, CanonicalFund, SortDirection, SortField,
    SortSpec,
};

#[derive(Properties, PartialEq)]
pub struct AccountsTableProps {
    pub snapshots: Vec<Snapshot>,
}

fn sort_indicator(spec: SortSpec, field: SortField) -> &'static str {
    if spec.field != field {
        return "";
    }
    match spec.direction {
        SortDirection::Asc => " ▲",
        SortDirection::Desc => " ▼",
    }
}

#[function_component(AccountsTable)]
pub fn accounts_table(props: &AccountsTableProps) -> Html {
    let sort = use_state(SortSpec::default);
    let expanded = use_state(HashSet::<String>::new);

    if props.snapshots.is_empty() {
        return html! {
            <p class="page-message">{"לא נמצאו נתוני קופות עבור לקוח זה."}</p>
        };
    }

    let on_sort = |field: SortField| {
        let sort = sort.clone();
        Callback::from(move |_: MouseEvent| sort.set(sort.toggle(field)))
    };

    let mut rows: Vec<Html> = Vec::new();
    for (month, group) in group_by_month(&props.snapshots).iter().rev() {
        let month_total: f64 = group.iter().map(Snapshot::amount_or_zero).sum();
        rows.push(html! {
            <tr key={format!("month-{}", month)} class="accounts-month-row">
                <td class="accounts-month-label" colspan="4">{ month_key_label(month) }</td>
                <td class="accounts-month-total">{ format_currency(Some(month_total)) }</td>
            </tr>
        });

        let funds = sort_rows(&canonicalize_funds(group), *sort);
        for fund in funds {
            let row_key = format!("{}-{}", month, fund.core_code);
            let is_open = expanded.contains(&row_key);
            rows.push(fund_row(&fund, &row_key, is_open, &expanded));
            if is_open {
                rows.extend(name_rows(&fund, &row_key));
            }
        }
    }

    html! {
        <div class="table-wrapper">
            <table class="accounts-table">
                <thead>
                    <tr>
                        <th class="sortable" onclick={on_sort(SortField::Date)}>
                            { format!("תאריך{}", sort_indicator(*sort, SortField::Date)) }
                        </th>
                        <th>{"סוג קופה"}</th>
                        <th>{"שם קופה"}</th>
                        <th>{"מספר קופה"}</th>
                        <th class="sortable" onclick={on_sort(SortField::Amount)}>
                            { format!("סכום{}", sort_indicator(*sort, SortField::Amount)) }
                        </th>
                    </tr>
                </thead>
                <tbody>
                    { for rows }
                </tbody>
            </table>
        </div>
    }
}

fn fund_row(
    fund: &CanonicalFund,
    row_key: &str,
    is_open: bool,
    expanded: &UseStateHandle<HashSet<String>>,
) -> Html {
    let toggle = if fund.is_merged() {
        let expanded = expanded.clone();
        let key = row_key.to_string();
        let onclick = Callback::from(move |_: MouseEvent| {
            let mut next = (*expanded).clone();
            if !next.remove(&key) {
                next.insert(key.clone());
            }
            expanded.set(next);
        });
        html! {
            <button type="button" class="accounts-expand" onclick={onclick}>
                { if is_open { "−" } else { "+" } }
            </button>
        }
    } else {
        html! {}
    };

    html! {
        <tr key={row_key.to_string()} class={classes!("accounts-fund-row", is_open.then_some("expanded"))}>
            <td>{ format_date(&fund.snapshot_date) }</td>
            <td>{ fund.fund_type.clone() }</td>
            <td>{ toggle }{ fund.name.clone() }</td>
            <td>{ fund.fund_number.clone() }</td>
            <td>{ format_currency(Some(fund.total_amount)) }</td>
        </tr>
    }
}

fn name_rows(fund: &CanonicalFund, row_key: &str) -> Vec<Html> {
    fund.all_names
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            html! {
                <tr key={format!("{}-name-{}", row_key, i)} class="accounts-name-row">
                    <td colspan="2"></td>
                    <td>{ entry.name.clone() }</td>
                    <td>{ fund.display_code.clone() }</td>
                    <td>{ format_currency(Some(entry.amount)) }</td>
                </tr>
            }
        })
        .collect()
}

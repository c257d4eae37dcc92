use crate::format::{format_currency, format_date};
use crate::models::Snapshot;

const BOM: &str = "\u{FEFF}";
const HEADER: [&str; 5] = ["תאריך", "סוג קופה", "שם קופה", "מספר קופה", "סכום"];

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn line<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|f| quote(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// CSV body for the visible rows, formatted like the table, with a BOM so
/// spreadsheet apps detect UTF-8. `None` when there is nothing to export.
pub fn build_csv(rows: &[Snapshot]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(line(HEADER));
    for row in rows {
        lines.push(line([
            format_date(row.date_str()),
            row.fund_type_str().to_string(),
            row.fund_name_str().to_string(),
            row.fund_number_str().to_string(),
            format_currency(row.amount),
        ]));
    }

    Some(format!("{}{}", BOM, lines.join("\r\n")))
}

pub fn export_file_name(month: Option<&str>) -> String {
    format!("kupot-{}.csv", month.unwrap_or("all"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::fixtures::snapshot;

    #[test]
    fn empty_rows_produce_no_file() {
        assert_eq!(build_csv(&[]), None);
    }

    #[test]
    fn rows_are_quoted_and_crlf_joined() {
        let mut row = snapshot(1, 1234.5, "2024-01-05", "A (1)", "Fund \"Gold\"");
        row.fund_type = Some("Pension".to_string());
        row.fund_number = None;
        let csv = build_csv(&[row]).unwrap();

        assert!(csv.starts_with('\u{FEFF}'));
        let body = csv.trim_start_matches('\u{FEFF}');
        let lines: Vec<&str> = body.split("\r\n").collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "\"תאריך\",\"סוג קופה\",\"שם קופה\",\"מספר קופה\",\"סכום\""
        );
        assert_eq!(
            lines[1],
            "\"5.1.2024\",\"Pension\",\"Fund \"\"Gold\"\"\",\"\",\"1,234.50 ₪\""
        );
    }

    #[test]
    fn file_name_uses_month() {
        assert_eq!(export_file_name(Some("2024-02")), "kupot-2024-02.csv");
        assert_eq!(export_file_name(None), "kupot-all.csv");
    }
}

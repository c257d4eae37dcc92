use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One fund balance observation as returned by the CRM.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: i64,
    #[serde(default)]
    pub client_id: Option<i64>,
    #[serde(default)]
    pub fund_code: Option<String>,
    #[serde(default)]
    pub fund_type: Option<String>,
    #[serde(default)]
    pub fund_name: Option<String>,
    #[serde(default)]
    pub fund_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub snapshot_date: Option<String>,
}

impl Snapshot {
    /// Amount with missing or non-finite values treated as zero.
    pub fn amount_or_zero(&self) -> f64 {
        amount_or_zero(self.amount)
    }

    pub fn date_str(&self) -> &str {
        self.snapshot_date.as_deref().unwrap_or("")
    }

    pub fn fund_code_str(&self) -> &str {
        self.fund_code.as_deref().unwrap_or("")
    }

    pub fn fund_type_str(&self) -> &str {
        self.fund_type.as_deref().unwrap_or("")
    }

    pub fn fund_name_str(&self) -> &str {
        self.fund_name.as_deref().unwrap_or("")
    }

    pub fn fund_number_str(&self) -> &str {
        self.fund_number.as_deref().unwrap_or("")
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.date_str())
    }
}

/// One month's aggregate in the history series.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct HistoryPoint {
    pub month: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Option<f64>,
}

pub fn amount_or_zero(amount: Option<f64>) -> f64 {
    match amount {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

// The CRM has been seen sending amounts as numbers, numeric strings and null.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Calendar month a snapshot belongs to.
///
/// Dates shorter than `YYYY-MM` fall into `Unknown`. Ordering follows plain
/// string comparison of [`MonthKey::as_str`], so `Unknown` compares as the
/// literal `"unknown"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MonthKey {
    Known(String),
    Unknown,
}

impl MonthKey {
    pub fn from_date(date: &str) -> Self {
        if date.chars().count() >= 7 {
            MonthKey::Known(date.chars().take(7).collect())
        } else {
            MonthKey::Unknown
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MonthKey::Known(key) => key,
            MonthKey::Unknown => "unknown",
        }
    }

    pub fn known(&self) -> Option<&str> {
        match self {
            MonthKey::Known(key) => Some(key),
            MonthKey::Unknown => None,
        }
    }
}

impl Ord for MonthKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str()
            .cmp(other.as_str())
            .then_with(|| match (self, other) {
                (MonthKey::Known(_), MonthKey::Unknown) => Ordering::Less,
                (MonthKey::Unknown, MonthKey::Known(_)) => Ordering::Greater,
                _ => Ordering::Equal,
            })
    }
}

impl PartialOrd for MonthKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials issued by the admin reset endpoint.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCredentials {
    pub client_id: i64,
    pub client_token: String,
    pub client_pin: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_accepts_sparse_crm_payload() {
        let raw = r#"[
            {"id": 1, "clientId": 7, "fundCode": "XYZ (123)", "fundType": "Pension",
             "fundName": "Growth", "fundNumber": "55", "amount": 1200.5,
             "snapshotDate": "2024-03-31"},
            {"id": 2, "amount": null},
            {"id": 3, "amount": "410.25", "snapshotDate": ""}
        ]"#;
        let list: Vec<Snapshot> = serde_json::from_str(raw).unwrap();

        assert_eq!(list.len(), 3);
        assert_eq!(list[0].fund_code_str(), "XYZ (123)");
        assert_eq!(list[0].amount_or_zero(), 1200.5);
        assert_eq!(list[1].amount, None);
        assert_eq!(list[1].amount_or_zero(), 0.0);
        assert_eq!(list[1].date_str(), "");
        assert_eq!(list[2].amount, Some(410.25));
    }

    #[test]
    fn month_key_uses_first_seven_characters() {
        assert_eq!(
            MonthKey::from_date("2024-01-05T00:00:00Z"),
            MonthKey::Known("2024-01".to_string())
        );
        assert_eq!(MonthKey::from_date("2024-1"), MonthKey::Unknown);
        assert_eq!(MonthKey::from_date(""), MonthKey::Unknown);
    }

    #[test]
    fn unknown_month_orders_as_plain_string() {
        let mut keys = vec![
            MonthKey::Known("2024-02".to_string()),
            MonthKey::Unknown,
            MonthKey::Known("2023-12".to_string()),
        ];
        keys.sort();
        keys.reverse();

        assert_eq!(keys[0], MonthKey::Unknown);
        assert_eq!(keys[1].as_str(), "2024-02");
        assert_eq!(keys[2].as_str(), "2023-12");
    }

    #[test]
    fn literal_unknown_month_does_not_collide() {
        let literal = MonthKey::Known("unknown".to_string());
        assert_ne!(literal, MonthKey::Unknown);
        assert_eq!(literal.as_str(), MonthKey::Unknown.as_str());
        assert!(literal < MonthKey::Unknown);
    }
}

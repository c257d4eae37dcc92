use crate::models::Snapshot;

/// Fund code used when a snapshot carries none.
pub const UNKNOWN_FUND_CODE: &str = "unknown";

/// One distinct fund name inside a merged row, with its summed amount.
#[derive(Clone, Debug, PartialEq)]
pub struct NameTotal {
    pub name: String,
    pub amount: f64,
}

/// All snapshots of one month that share a core fund code, merged into a
/// single display row.
#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalFund {
    pub core_code: String,
    pub display_code: String,
    /// Name of the largest constituent.
    pub name: String,
    pub total_amount: f64,
    pub fund_type: String,
    pub fund_number: String,
    pub snapshot_date: String,
    /// Distinct names, largest summed amount first.
    pub all_names: Vec<NameTotal>,
    pub snapshot_ids: Vec<i64>,
}

impl CanonicalFund {
    pub fn is_merged(&self) -> bool {
        self.snapshot_ids.len() > 1 || self.all_names.len() > 1
    }
}

/// Extracts the identifier funds are merged on: the first parenthesised run
/// of digits (`"XYZ (123)"` gives `"123"`), else the trimmed code, else
/// [`UNKNOWN_FUND_CODE`].
pub fn core_fund_code(raw: Option<&str>) -> String {
    let raw = raw.unwrap_or("");
    if let Some(digits) = parenthesized_digits(raw) {
        return digits.to_string();
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNKNOWN_FUND_CODE.to_string()
    } else {
        trimmed.to_string()
    }
}

fn parenthesized_digits(raw: &str) -> Option<&str> {
    let mut rest = raw;
    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        let len = after.bytes().take_while(u8::is_ascii_digit).count();
        if len > 0 && after[len..].starts_with(')') {
            return Some(&after[..len]);
        }
        rest = after;
    }
    None
}

/// Merges one month group into canonical rows, in order of first appearance
/// of each core code.
///
/// The sum of `total_amount` over the result equals the group's raw amount
/// sum with missing amounts counted as zero.
pub fn canonicalize_funds(snapshots: &[Snapshot]) -> Vec<CanonicalFund> {
    let mut buckets: Vec<(String, Vec<&Snapshot>)> = Vec::new();
    for snapshot in snapshots {
        let code = core_fund_code(snapshot.fund_code.as_deref());
        match buckets.iter_mut().find(|(c, _)| *c == code) {
            Some((_, members)) => members.push(snapshot),
            None => buckets.push((code, vec![snapshot])),
        }
    }

    buckets
        .into_iter()
        .filter_map(|(code, members)| merge_bucket(code, &members))
        .collect()
}

fn merge_bucket(core_code: String, members: &[&Snapshot]) -> Option<CanonicalFund> {
    let mut representative = *members.first()?;
    for &member in &members[1..] {
        if member.amount_or_zero() > representative.amount_or_zero() {
            representative = member;
        }
    }

    let total_amount: f64 = members.iter().map(|s| s.amount_or_zero()).sum();

    let mut all_names: Vec<NameTotal> = Vec::new();
    for member in members {
        let name = member.fund_name_str();
        match all_names.iter_mut().find(|n| n.name == name) {
            Some(entry) => entry.amount += member.amount_or_zero(),
            None => all_names.push(NameTotal {
                name: name.to_string(),
                amount: member.amount_or_zero(),
            }),
        }
    }
    // stable: equal totals keep first-seen order
    all_names.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let display_code = match representative.fund_code_str().trim() {
        "" => core_code.clone(),
        code => code.to_string(),
    };

    Some(CanonicalFund {
        core_code,
        display_code,
        name: representative.fund_name_str().to_string(),
        total_amount,
        fund_type: representative.fund_type_str().to_string(),
        fund_number: representative.fund_number_str().to_string(),
        snapshot_date: representative.date_str().to_string(),
        all_names,
        snapshot_ids: members.iter().map(|s| s.id).collect(),
    })
}

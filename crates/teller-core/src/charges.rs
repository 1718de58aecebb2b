//! Loan penalty charge shaping: extraction from the backend's varied
//! response envelopes, penalty filtering and ordering, and the selection
//! state behind the waive-penalties table.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::macros::format_description;
use time::{Date, Month};
use tracing::debug;

/// Charge time type id the backend uses for overdue installment charges.
const OVERDUE_CHARGE_TIME_TYPE_ID: i64 = 9;

/// Envelope keys the charges endpoint has been seen wrapping its list in.
const WRAPPER_KEYS: [&str; 4] = ["pageItems", "content", "charges", "data"];

/// Charge time type as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChargeTimeType {
    pub id: Option<i64>,
    pub code: Option<String>,
    pub value: Option<String>,
}

/// One loan charge row.
///
/// Boolean flags tolerate the backend's `"true"` strings; due dates arrive
/// either as `[year, month, day]` arrays or ISO strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Charge {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(deserialize_with = "flexible_bool")]
    pub penalty: bool,
    #[serde(deserialize_with = "flexible_bool")]
    pub waived: bool,
    #[serde(deserialize_with = "flexible_bool")]
    pub paid: bool,
    pub amount: Option<f64>,
    pub amount_outstanding: Option<f64>,
    #[serde(deserialize_with = "flexible_date")]
    pub due_date: Option<Date>,
    pub charge_time_type: Option<ChargeTimeType>,
}

impl Charge {
    /// Penalty flag, or an overdue charge time type by value, code, or id.
    pub fn is_penalty(&self) -> bool {
        if self.penalty {
            return true;
        }
        let Some(time_type) = &self.charge_time_type else {
            return false;
        };
        let mentions_overdue = |text: &Option<String>| {
            text.as_deref()
                .is_some_and(|t| t.to_lowercase().contains("overdue"))
        };
        mentions_overdue(&time_type.value)
            || mentions_overdue(&time_type.code)
            || time_type.id == Some(OVERDUE_CHARGE_TIME_TYPE_ID)
    }

    /// Amount still owed, falling back to the full amount when the backend
    /// omits the outstanding figure.
    pub fn outstanding(&self) -> f64 {
        self.amount_outstanding.or(self.amount).unwrap_or(0.0)
    }
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::String(text) => text.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

fn flexible_date<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_date))
}

fn parse_date(value: &Value) -> Option<Date> {
    match value {
        Value::Array(parts) => {
            let year = parts.first()?.as_i64()? as i32;
            let month = Month::try_from(parts.get(1)?.as_i64()? as u8).ok()?;
            let day = parts.get(2)?.as_i64()? as u8;
            Date::from_calendar_date(year, month, day).ok()
        }
        Value::String(text) => {
            Date::parse(text, format_description!("[year]-[month]-[day]")).ok()
        }
        _ => None,
    }
}

/// Pull the charge list out of whatever envelope the backend used. Entries
/// that fail to deserialize are dropped.
pub fn charges_from_response(response: &Value) -> Vec<Charge> {
    let items = response.as_array().or_else(|| {
        WRAPPER_KEYS
            .iter()
            .find_map(|key| response.get(*key).and_then(Value::as_array))
    });
    let Some(items) = items else {
        debug!("unrecognized charges response shape");
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect()
}

/// Penalty charges that are still actionable: not waived, not paid, with an
/// outstanding amount, ordered by installment due date. Undated charges
/// keep their relative order at the end.
pub fn filter_penalties(charges: &[Charge]) -> Vec<Charge> {
    let mut penalties: Vec<Charge> = charges
        .iter()
        .filter(|charge| {
            charge.is_penalty() && !charge.waived && !charge.paid && charge.outstanding() > 0.0
        })
        .cloned()
        .collect();
    penalties.sort_by(|a, b| match (a.due_date, b.due_date) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    penalties
}

/// Translation key (or raw text) for a penalty row. Known backend aliases
/// map to their canonical keys; existing `labels.*` keys pass through.
pub fn display_key(charge: &Charge) -> String {
    let raw = non_empty(charge.name.as_deref())
        .or_else(|| {
            non_empty(
                charge
                    .charge_time_type
                    .as_ref()
                    .and_then(|time_type| time_type.value.as_deref()),
            )
        })
        .unwrap_or("Overdue Fees");
    match raw.to_uppercase().as_str() {
        "MORA" | "OVERDUE" => "labels.inputs.Overdue".to_string(),
        "OVERDUE FEES" => "labels.inputs.Overdue Fees".to_string(),
        _ => raw.to_string(),
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Checkbox state for the waive-penalties table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PenaltySelection {
    selected: Vec<i64>,
    select_all: bool,
}

impl PenaltySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[i64] {
        &self.selected
    }

    pub fn select_all(&self) -> bool {
        self.select_all
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    /// Flip the select-all checkbox, selecting every penalty or none.
    pub fn toggle_all(&mut self, penalties: &[Charge]) {
        self.select_all = !self.select_all;
        self.selected = if self.select_all {
            penalties.iter().filter_map(|penalty| penalty.id).collect()
        } else {
            Vec::new()
        };
    }

    /// Flip one penalty and rederive the select-all checkbox state.
    pub fn toggle(&mut self, id: i64, penalties: &[Charge]) {
        match self.selected.iter().position(|&selected| selected == id) {
            Some(index) => {
                self.selected.remove(index);
            }
            None => self.selected.push(id),
        }
        self.select_all = !penalties.is_empty() && self.selected.len() == penalties.len();
    }
}

//! Data models for scenes and budget items

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the shooting schedule, describing a single filmed scene.
///
/// Everything besides `id` is an opaque string entered by the user; the
/// serialized field names match the `.filmproj` project format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scene {
    /// Unique identifier
    pub id: Uuid,
    /// Scene number as printed on the script ("12A")
    pub number: String,
    /// Slugline ("INT. OFFICE - DAY")
    pub heading: String,
    /// Shooting date
    pub date: String,
    /// Call time
    pub time: String,
    /// INT/EXT marker
    #[serde(rename = "type")]
    pub kind: String,
    /// Shooting location
    pub location: String,
    /// Script pages covered
    pub pages: String,
    /// Estimated shooting duration
    pub duration: String,
    /// Scheduling status label
    pub status: String,
    /// Cast required on set
    pub cast: String,
    /// Equipment required on set
    pub equipment: String,
}

/// Form payload for a new scene, before an identifier is assigned.
#[derive(Debug, Clone, Default)]
pub struct SceneDraft {
    pub number: String,
    pub heading: String,
    pub date: String,
    pub time: String,
    pub kind: String,
    pub location: String,
    pub pages: String,
    pub duration: String,
    pub status: String,
    pub cast: String,
    pub equipment: String,
}

impl Scene {
    /// Create a scene from a draft with a fresh identifier
    pub fn from_draft(draft: SceneDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: draft.number,
            heading: draft.heading,
            date: draft.date,
            time: draft.time,
            kind: draft.kind,
            location: draft.location,
            pages: draft.pages,
            duration: draft.duration,
            status: draft.status,
            cast: draft.cast,
            equipment: draft.equipment,
        }
    }

    /// Map the status label to its display style, case-insensitively.
    /// Labels outside the known set get no style (cosmetic, non-fatal).
    pub fn status_style(&self) -> Option<StatusStyle> {
        StatusStyle::for_label(&self.status)
    }
}

/// Display style for the recognized scheduling status labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusStyle {
    Confirmed,
    Pending,
    Standby,
    Canceled,
}

impl StatusStyle {
    /// Resolve a free-text status label to a style, case-insensitively
    pub fn for_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "confirmed" => Some(StatusStyle::Confirmed),
            "pending" => Some(StatusStyle::Pending),
            "standby" => Some(StatusStyle::Standby),
            "canceled" | "cancelled" => Some(StatusStyle::Canceled),
            _ => None,
        }
    }
}

/// One expense line of the production budget.
///
/// Items carry an explicit identifier so deletion is unambiguous even if
/// rows are ever reordered or filtered. Files written without ids still
/// deserialize; the id is defaulted to a fresh one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetItem {
    /// Unique identifier
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// What the money is for
    pub description: String,
    /// Expense category ("Camera", "Locations", ...)
    pub category: String,
    /// Cost in the project currency
    pub cost: f64,
}

impl BudgetItem {
    /// Create a budget item with a fresh identifier
    pub fn new(description: impl Into<String>, category: impl Into<String>, cost: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            category: category.into(),
            cost,
        }
    }
}

/// Supported display currencies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Inr,
    Gbp,
}

impl Currency {
    /// All currencies in selector order
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Inr, Currency::Gbp];

    /// ISO 4217 code, as persisted in the preference key
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Inr => "INR",
            Currency::Gbp => "GBP",
        }
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Inr => "₹",
            Currency::Gbp => "£",
        }
    }

    /// Parse a stored code string, case-insensitively
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            "INR" => Some(Currency::Inr),
            "GBP" => Some(Currency::Gbp),
            _ => None,
        }
    }

    /// Next currency in selector order, wrapping around
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Format an amount with symbol, thousands grouping, and two decimals
    pub fn format(&self, amount: f64) -> String {
        let negative = amount < 0.0;
        let cents = (amount.abs() * 100.0).round() as u64;
        let whole = cents / 100;
        let frac = cents % 100;

        let digits = whole.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if negative { "-" } else { "" };
        format!("{}{}{}.{:02}", sign, self.symbol(), grouped, frac)
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Server-assigned goal identifier. The resource hands these out as either
/// strings or numbers; both are held as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GoalId(String);

impl GoalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id percent-encoded for use as a single URL path segment or query value.
    pub fn path_segment(&self) -> Cow<'_, str> {
        urlencoding::encode(&self.0)
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for GoalId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Uint(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(value) => GoalId(value),
            Raw::Int(value) => GoalId(value.to_string()),
            Raw::Uint(value) => GoalId(value.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    pub category: String,
    pub target_amount: f64,
    pub saved_amount: f64,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
}

impl Goal {
    /// Percentage saved, floored and capped at 100.
    pub fn progress_percent(&self) -> u32 {
        if self.target_amount <= 0.0 {
            return 100;
        }
        let ratio = (self.saved_amount / self.target_amount * 100.0).floor();
        ratio.clamp(0.0, 100.0) as u32
    }

    pub fn is_complete(&self) -> bool {
        self.saved_amount >= self.target_amount
    }
}

/// Body of `POST /goals`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub target_amount: f64,
    pub saved_amount: f64,
    pub category: String,
    pub deadline: NaiveDate,
    pub created_at: NaiveDate,
}

/// Body of the deposit `PATCH`; only the saved amount travels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAmountPatch {
    pub saved_amount: f64,
}

/// Body of the edit `PATCH`. The saved amount is deliberately absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalEdit {
    pub name: String,
    pub target_amount: f64,
    pub category: String,
    pub deadline: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalForm {
    pub name: String,
    pub target_amount: String,
    pub category: String,
    pub deadline: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositForm {
    pub amount: String,
    /// Saved amount as it was rendered on the card.
    pub saved_amount: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub edit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    Overdue,
    UpcomingDeadline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineWarning {
    pub goal_id: GoalId,
    pub goal_name: String,
    pub deadline: NaiveDate,
    pub kind: WarningKind,
    pub days_left: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_goals: usize,
    pub total_saved: f64,
    pub goals_completed: usize,
    pub warnings: Vec<DeadlineWarning>,
}

impl Overview {
    pub fn total_saved_label(&self) -> String {
        format!("{:.2}", self.total_saved)
    }
}

use crate::errors::InputError;
use crate::models::{DepositForm, GoalEdit, GoalForm, NewGoal};
use chrono::NaiveDate;

/// Parses the shared create/edit form into typed fields.
pub fn parse_goal_form(form: &GoalForm) -> Result<GoalEdit, InputError> {
    let name = required("Name", &form.name)?;
    let category = required("Category", &form.category)?;
    let target_amount = parse_amount(&form.target_amount)
        .filter(|value| *value >= 0.0)
        .ok_or(InputError::Invalid {
            field: "Target amount",
            expected: "a non-negative number",
        })?;
    let deadline = NaiveDate::parse_from_str(form.deadline.trim(), "%Y-%m-%d").map_err(|_| {
        InputError::Invalid {
            field: "Deadline",
            expected: "a date (YYYY-MM-DD)",
        }
    })?;

    Ok(GoalEdit {
        name,
        target_amount,
        category,
        deadline,
    })
}

/// A new goal always starts with nothing saved.
pub fn new_goal(fields: GoalEdit, created_at: NaiveDate) -> NewGoal {
    NewGoal {
        name: fields.name,
        target_amount: fields.target_amount,
        saved_amount: 0.0,
        category: fields.category,
        deadline: fields.deadline,
        created_at,
    }
}

/// Returns the saved amount after the deposit is applied to the rendered snapshot.
pub fn parse_deposit(form: &DepositForm) -> Result<f64, InputError> {
    let amount = parse_amount(&form.amount)
        .filter(|value| *value > 0.0)
        .ok_or(InputError::InvalidDeposit)?;
    let current = parse_amount(&form.saved_amount).ok_or(InputError::Invalid {
        field: "Saved amount",
        expected: "a number",
    })?;

    let updated = current + amount;
    if !updated.is_finite() {
        return Err(InputError::InvalidDeposit);
    }
    Ok(updated)
}

fn required(field: &'static str, value: &str) -> Result<String, InputError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InputError::Missing { field });
    }
    Ok(trimmed.to_string())
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

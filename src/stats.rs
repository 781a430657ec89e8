use crate::models::{DeadlineWarning, Goal, Overview, WarningKind};
use chrono::{DateTime, Utc};

const UPCOMING_WINDOW_DAYS: f64 = 30.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

pub fn build_overview(goals: &[Goal]) -> Overview {
    build_overview_at(Utc::now(), goals)
}

pub fn build_overview_at(now: DateTime<Utc>, goals: &[Goal]) -> Overview {
    let total_saved: f64 = goals.iter().map(|goal| goal.saved_amount).sum();
    let goals_completed = goals.iter().filter(|goal| goal.is_complete()).count();
    let warnings = goals
        .iter()
        .filter_map(|goal| classify_deadline(now, goal))
        .collect();

    Overview {
        total_goals: goals.len(),
        total_saved,
        goals_completed,
        warnings,
    }
}

/// Completed goals are never warned about, whatever their deadline.
pub fn classify_deadline(now: DateTime<Utc>, goal: &Goal) -> Option<DeadlineWarning> {
    if goal.is_complete() {
        return None;
    }

    let days_left = days_until(now, goal);
    let (kind, message) = if days_left < 0.0 {
        (
            WarningKind::Overdue,
            format!(
                "Goal \"{}\" is Overdue! Deadline was {}.",
                goal.name, goal.deadline
            ),
        )
    } else if days_left <= UPCOMING_WINDOW_DAYS {
        (
            WarningKind::UpcomingDeadline,
            format!(
                "Goal \"{}\" deadline is within 30 days ({}).",
                goal.name, goal.deadline
            ),
        )
    } else {
        return None;
    };

    Some(DeadlineWarning {
        goal_id: goal.id.clone(),
        goal_name: goal.name.clone(),
        deadline: goal.deadline,
        kind,
        days_left,
        message,
    })
}

/// Fractional days from `now` to the start of the deadline day (UTC).
fn days_until(now: DateTime<Utc>, goal: &Goal) -> f64 {
    let deadline = goal.deadline.and_time(chrono::NaiveTime::MIN).and_utc();
    let delta = deadline - now;
    delta.num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY
}

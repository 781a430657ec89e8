use crate::models::{Goal, GoalId, Overview, WarningKind};
use std::fmt::Write;

/// Everything one render of the index page needs. Built fresh from a
/// just-fetched goal list; nothing here outlives the request.
pub struct PageView<'a> {
    pub goals: &'a [Goal],
    pub overview: &'a Overview,
    pub editing: Option<&'a GoalId>,
    pub alert: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardMode {
    Display,
    Editing,
}

impl PageView<'_> {
    pub fn mode_for(&self, goal: &Goal) -> CardMode {
        match self.editing {
            Some(id) if *id == goal.id => CardMode::Editing,
            _ => CardMode::Display,
        }
    }
}

pub fn render_index(view: &PageView<'_>) -> String {
    let mut content = String::new();

    if let Some(message) = view.alert {
        let _ = write!(
            content,
            r#"<div class="alert" role="alert">{}</div>"#,
            escape_html(message)
        );
    }

    content.push_str(NEW_GOAL_FORM);
    content.push_str(&render_overview(view.overview));

    content.push_str(r#"<section id="goals-list" class="goals">"#);
    if view.goals.is_empty() {
        content.push_str(r#"<p class="empty">No goals yet. Add one above.</p>"#);
    }
    for goal in view.goals {
        content.push_str(&render_goal_card(goal, view.mode_for(goal)));
    }
    content.push_str("</section>");

    layout("Smart Goal Planner", &content)
}

pub fn render_goal_card(goal: &Goal, mode: CardMode) -> String {
    match mode {
        CardMode::Display => render_display_card(goal),
        CardMode::Editing => render_edit_card(goal),
    }
}

fn render_display_card(goal: &Goal) -> String {
    let id = escape_html(goal.id.as_str());
    let segment = goal.id.path_segment();
    let progress = goal.progress_percent();
    format!(
        r#"<article class="goal-card" data-id="{id}">
  <h3>{name}</h3>
  <p>Category: {category}</p>
  <p>Target: ${target:.2}</p>
  <p>Saved: ${saved:.2}</p>
  <p>Deadline: {deadline}</p>
  <div class="progress-bar">
    <div class="progress-bar-inner" style="width: {progress}%">{progress}%</div>
  </div>
  <form class="deposit-form" method="post" action="/goals/{segment}/deposit">
    <input type="number" name="amount" step="0.01" min="0" placeholder="Deposit amount" required />
    <input type="hidden" name="savedAmount" value="{saved_raw}" />
    <button type="submit">Deposit</button>
  </form>
  <div class="card-actions">
    <a class="edit-btn" href="/?edit={segment}">Edit</a>
    <a class="delete-btn" href="/goals/{segment}/delete">Delete</a>
  </div>
</article>"#,
        name = escape_html(&goal.name),
        category = escape_html(&goal.category),
        target = goal.target_amount,
        saved = goal.saved_amount,
        saved_raw = goal.saved_amount,
        deadline = goal.deadline,
    )
}

fn render_edit_card(goal: &Goal) -> String {
    let id = escape_html(goal.id.as_str());
    let segment = goal.id.path_segment();
    format!(
        r#"<article class="goal-card editing" data-id="{id}">
  <form class="edit-goal-form" method="post" action="/goals/{segment}/edit">
    <input type="text" name="name" value="{name}" required />
    <input type="number" name="targetAmount" step="0.01" min="0" value="{target}" required />
    <input type="text" name="category" value="{category}" required />
    <input type="date" name="deadline" value="{deadline}" required />
    <button type="submit">Save</button>
    <a class="cancel-btn" href="/">Cancel</a>
  </form>
</article>"#,
        name = escape_html(&goal.name),
        category = escape_html(&goal.category),
        target = goal.target_amount,
        deadline = goal.deadline,
    )
}

pub fn render_overview(overview: &Overview) -> String {
    let mut warnings = String::new();
    for warning in &overview.warnings {
        let class = match warning.kind {
            WarningKind::Overdue => "warning overdue",
            WarningKind::UpcomingDeadline => "warning upcoming",
        };
        let _ = write!(
            warnings,
            r#"<p class="{class}">{}</p>"#,
            escape_html(&warning.message)
        );
    }

    format!(
        r#"<section class="overview">
  <div class="stat"><span class="label">Total goals</span><span id="total-goals" class="value">{total}</span></div>
  <div class="stat"><span class="label">Total saved</span><span id="total-saved" class="value">{saved}</span></div>
  <div class="stat"><span class="label">Completed</span><span id="goals-completed" class="value">{completed}</span></div>
  <div id="deadlines-warning" class="warnings">{warnings}</div>
</section>"#,
        total = overview.total_goals,
        saved = overview.total_saved_label(),
        completed = overview.goals_completed,
    )
}

/// The confirmation step in front of a delete.
pub fn render_delete_confirm(goal: &Goal) -> String {
    let segment = goal.id.path_segment();
    let content = format!(
        r#"<section class="confirm">
  <p>Delete goal "{name}"?</p>
  <form method="post" action="/goals/{segment}/delete">
    <button class="delete-btn" type="submit">Delete</button>
    <a class="cancel-btn" href="/">Cancel</a>
  </form>
</section>"#,
        name = escape_html(&goal.name),
    );
    layout("Delete goal", &content)
}

fn layout(title: &str, content: &str) -> String {
    LAYOUT_HTML
        .replace("{{TITLE}}", title)
        .replace("{{CONTENT}}", content)
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const NEW_GOAL_FORM: &str = r#"<form id="new-goal-form" class="new-goal" method="post" action="/goals">
  <input type="text" id="name" name="name" placeholder="Goal name" required />
  <input type="number" id="targetAmount" name="targetAmount" step="0.01" min="0" placeholder="Target amount" required />
  <input type="text" id="category" name="category" placeholder="Category" required />
  <input type="date" id="deadline" name="deadline" required />
  <button type="submit">Add goal</button>
</form>"#;

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg: #eef4ec;
      --ink: #22302a;
      --accent: #2f8f5b;
      --alert: #c8342b;
      --caution: #d9822b;
      --card: #ffffff;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: system-ui, sans-serif;
      padding: 24px 16px;
    }

    main {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
    }

    .new-goal,
    .overview,
    .goal-card,
    .confirm {
      background: var(--card);
      border-radius: 12px;
      border: 1px solid #d3e2d7;
      padding: 16px;
    }

    .new-goal {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    .overview {
      display: flex;
      flex-wrap: wrap;
      gap: 24px;
    }

    .stat .label {
      display: block;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
    }

    .warnings {
      flex-basis: 100%;
    }

    .warning.overdue {
      color: var(--alert);
    }

    .warning.upcoming {
      color: var(--caution);
    }

    .alert {
      background: var(--alert);
      color: #fff;
      border-radius: 14px;
      padding: 12px 16px;
    }

    .goals {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(260px, 1fr));
      gap: 18px;
    }

    .progress-bar {
      background: #dde8df;
      border-radius: 999px;
      overflow: hidden;
      margin: 12px 0;
    }

    .progress-bar-inner {
      background: var(--accent);
      color: #fff;
      font-size: 0.8rem;
      padding: 4px 8px;
      white-space: nowrap;
    }

    input,
    button {
      font: inherit;
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid #c5d6ca;
    }

    button {
      background: var(--accent);
      color: #fff;
      border: none;
      cursor: pointer;
    }

    .card-actions {
      display: flex;
      gap: 12px;
      margin-top: 10px;
    }

    .delete-btn {
      color: var(--alert);
    }

    button.delete-btn {
      background: var(--alert);
      color: #fff;
    }
  </style>
</head>
<body>
  <main>
    <h1>Smart Goal Planner</h1>
    {{CONTENT}}
  </main>
</body>
</html>
"#;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, Local, NaiveDate, Utc};
use goal_planner::errors::StoreError;
use goal_planner::models::{Goal, GoalEdit, GoalId, NewGoal};
use goal_planner::{router, AppState, GoalStore};
use http_body_util::BodyExt;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-memory goal resource that records every call it receives. Clones share state.
#[derive(Clone)]
struct RecordingStore {
    goals: Arc<Mutex<Vec<Goal>>>,
    calls: Arc<Mutex<Vec<String>>>,
    next_id: Arc<Mutex<u64>>,
}

impl RecordingStore {
    fn with_goals(goals: Vec<Goal>) -> Self {
        let next = goals.len() as u64 + 1;
        Self {
            goals: Arc::new(Mutex::new(goals)),
            calls: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(next)),
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn goal(&self, id: &str) -> Option<Goal> {
        self.goals
            .lock()
            .unwrap()
            .iter()
            .find(|goal| goal.id.as_str() == id)
            .cloned()
    }
}

#[async_trait]
impl GoalStore for RecordingStore {
    async fn list(&self) -> Result<Vec<Goal>, StoreError> {
        self.record("list");
        Ok(self.goals.lock().unwrap().clone())
    }

    async fn create(&self, goal: &NewGoal) -> Result<Goal, StoreError> {
        self.record("create");
        let mut next = self.next_id.lock().unwrap();
        let created = Goal {
            id: GoalId::new(next.to_string()),
            name: goal.name.clone(),
            category: goal.category.clone(),
            target_amount: goal.target_amount,
            saved_amount: goal.saved_amount,
            deadline: goal.deadline,
            created_at: Some(goal.created_at),
        };
        *next += 1;
        self.goals.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn deposit(&self, id: &GoalId, saved_amount: f64) -> Result<Goal, StoreError> {
        self.record(format!("deposit {id} {saved_amount}"));
        let mut goals = self.goals.lock().unwrap();
        let goal = goals.iter_mut().find(|goal| goal.id == *id).unwrap();
        goal.saved_amount = saved_amount;
        Ok(goal.clone())
    }

    async fn edit(&self, id: &GoalId, fields: &GoalEdit) -> Result<Goal, StoreError> {
        self.record(format!("edit {id}"));
        let mut goals = self.goals.lock().unwrap();
        let goal = goals.iter_mut().find(|goal| goal.id == *id).unwrap();
        goal.name = fields.name.clone();
        goal.category = fields.category.clone();
        goal.target_amount = fields.target_amount;
        goal.deadline = fields.deadline;
        Ok(goal.clone())
    }

    async fn delete(&self, id: &GoalId) -> Result<(), StoreError> {
        self.record(format!("delete {id}"));
        self.goals.lock().unwrap().retain(|goal| goal.id != *id);
        Ok(())
    }
}

fn goal(id: &str, target: f64, saved: f64, deadline: NaiveDate) -> Goal {
    Goal {
        id: GoalId::new(id),
        name: format!("Goal {id}"),
        category: "Savings".to_string(),
        target_amount: target,
        saved_amount: saved,
        deadline,
        created_at: Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn seeded() -> RecordingStore {
    RecordingStore::with_goals(vec![
        goal("1", 1000.0, 250.0, today() + Duration::days(90)),
        goal("2", 500.0, 100.0, today() + Duration::days(200)),
    ])
}

fn app(store: &RecordingStore) -> Router {
    router(AppState::new(store.clone()))
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn card_count(app: Router) -> usize {
    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_text(response).await.matches(r#"class="goal-card"#).count()
}

#[tokio::test]
async fn index_renders_every_goal_and_overview() {
    let store = seeded();
    let response = app(&store).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert_eq!(html.matches(r#"class="goal-card""#).count(), 2);
    assert!(html.contains(r#"<span id="total-goals" class="value">2</span>"#));
    assert!(html.contains(r#"<span id="total-saved" class="value">350.00</span>"#));
    assert!(html.contains(r#"style="width: 25%""#));
    assert_eq!(store.calls(), vec!["list"]);
}

#[tokio::test]
async fn create_redirects_and_next_render_shows_new_card() {
    let store = seeded();
    let deadline = today() + Duration::days(120);
    let response = app(&store)
        .oneshot(form_post(
            "/goals",
            &format!("name=Car&targetAmount=8000&category=Transport&deadline={deadline}"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let created = store.goal("3").expect("created goal");
    assert_eq!(created.saved_amount, 0.0);
    assert_eq!(created.created_at, Some(Utc::now().date_naive()));
    assert_eq!(card_count(app(&store)).await, 3);
}

#[tokio::test]
async fn create_with_non_numeric_target_is_rejected_before_the_store() {
    let store = seeded();
    let response = app(&store)
        .oneshot(form_post(
            "/goals",
            "name=Car&targetAmount=lots&category=Transport&deadline=2026-12-01",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Target amount must be a non-negative number."));
    assert!(!store.calls().iter().any(|call| call == "create"));
}

#[tokio::test]
async fn deposit_adds_to_rendered_snapshot() {
    let store = seeded();
    let response = app(&store)
        .oneshot(form_post("/goals/1/deposit", "amount=50.25&savedAmount=250"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.goal("1").unwrap().saved_amount, 300.25);
    assert_eq!(store.calls(), vec!["deposit 1 300.25"]);
}

#[tokio::test]
async fn invalid_deposit_never_reaches_the_store() {
    for amount in ["0", "-5", "abc", ""] {
        let store = seeded();
        let response = app(&store)
            .oneshot(form_post(
                "/goals/1/deposit",
                &format!("amount={amount}&savedAmount=250"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let html = body_text(response).await;
        assert!(html.contains(r#"role="alert""#));
        assert!(html.contains("Please enter a valid deposit amount."));
        assert_eq!(store.calls(), vec!["list"]);
        assert_eq!(store.goal("1").unwrap().saved_amount, 250.0);
    }
}

#[tokio::test]
async fn edit_mode_is_selected_by_query() {
    let store = seeded();
    let response = app(&store).oneshot(get("/?edit=2")).await.unwrap();
    let html = body_text(response).await;
    assert_eq!(html.matches("edit-goal-form").count(), 1);
    assert!(html.contains(r#"action="/goals/2/edit""#));
    assert!(html.contains(r#"action="/goals/1/deposit""#));
    assert!(!html.contains(r#"action="/goals/2/deposit""#));
}

#[tokio::test]
async fn save_edit_keeps_saved_amount() {
    let store = seeded();
    let response = app(&store)
        .oneshot(form_post(
            "/goals/2/edit",
            "name=Holiday&targetAmount=750&category=Travel&deadline=2027-05-01",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let edited = store.goal("2").unwrap();
    assert_eq!(edited.name, "Holiday");
    assert_eq!(edited.target_amount, 750.0);
    assert_eq!(edited.deadline, NaiveDate::from_ymd_opt(2027, 5, 1).unwrap());
    assert_eq!(edited.saved_amount, 100.0);
}

#[tokio::test]
async fn invalid_edit_keeps_the_card_in_edit_mode() {
    let store = seeded();
    let response = app(&store)
        .oneshot(form_post(
            "/goals/2/edit",
            "name=Holiday&targetAmount=750&category=Travel&deadline=soon",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains(r#"action="/goals/2/edit""#));
    assert!(!store.calls().iter().any(|call| call.starts_with("edit")));
}

#[tokio::test]
async fn cancel_renders_server_state_in_display_mode() {
    let store = seeded();
    let editing = body_text(app(&store).oneshot(get("/?edit=2")).await.unwrap()).await;
    assert!(editing.contains(r#"class="cancel-btn" href="/""#));

    let response = app(&store).oneshot(get("/")).await.unwrap();
    let html = body_text(response).await;
    assert!(!html.contains("edit-goal-form"));
    assert!(html.contains("<h3>Goal 2</h3>"));
    assert_eq!(store.calls(), vec!["list", "list"]);
}

#[tokio::test]
async fn delete_requires_confirmation_page_first() {
    let store = seeded();
    let response = app(&store).oneshot(get("/goals/1/delete")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(r#"Delete goal "Goal 1"?"#));
    assert!(store.goal("1").is_some());

    let response = app(&store)
        .oneshot(form_post("/goals/1/delete", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(store.goal("1").is_none());
    assert_eq!(card_count(app(&store)).await, 1);
}

#[tokio::test]
async fn delete_confirmation_for_unknown_goal_is_not_found() {
    let store = seeded();
    let response = app(&store).oneshot(get("/goals/99/delete")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn overview_api_reports_warnings() {
    let store = RecordingStore::with_goals(vec![
        goal("1", 1000.0, 1000.0, today() - Duration::days(1)),
        goal("2", 500.0, 100.0, today() + Duration::days(10)),
    ]);
    let response = app(&store).oneshot(get("/api/overview")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let overview: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(overview["totalGoals"], 2);
    assert_eq!(overview["totalSaved"], 1100.0);
    assert_eq!(overview["goalsCompleted"], 1);
    let warnings = overview["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["goalId"], "2");
    assert_eq!(warnings[0]["kind"], "upcomingDeadline");
}

#[tokio::test]
async fn goals_api_lists_current_set() {
    let store = seeded();
    let response = app(&store).oneshot(get("/api/goals")).await.unwrap();
    let goals: Vec<serde_json::Value> =
        serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(goals.len(), 2);
    assert_eq!(goals[0]["savedAmount"], 250.0);
}

#[tokio::test]
async fn percent_encoded_ids_reach_the_right_goal() {
    let store = RecordingStore::with_goals(vec![
        goal("a/b", 1000.0, 10.0, today() + Duration::days(90)),
        goal("a", 1000.0, 20.0, today() + Duration::days(90)),
    ]);

    let html = body_text(app(&store).oneshot(get("/")).await.unwrap()).await;
    assert!(html.contains(r#"action="/goals/a%2Fb/deposit""#));

    let response = app(&store)
        .oneshot(form_post("/goals/a%2Fb/deposit", "amount=5&savedAmount=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.goal("a/b").unwrap().saved_amount, 15.0);
    assert_eq!(store.goal("a").unwrap().saved_amount, 20.0);

    let response = app(&store)
        .oneshot(form_post("/goals/a%2Fb/delete", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(store.goal("a/b").is_none());
    assert!(store.goal("a").is_some());
}

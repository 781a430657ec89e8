use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/goals", post(handlers::create_goal))
        .route("/goals/:id/deposit", post(handlers::deposit))
        .route("/goals/:id/edit", post(handlers::edit_goal))
        .route(
            "/goals/:id/delete",
            get(handlers::confirm_delete).post(handlers::delete_goal),
        )
        .route("/api/goals", get(handlers::get_goals))
        .route("/api/overview", get(handlers::get_overview))
        .with_state(state)
}

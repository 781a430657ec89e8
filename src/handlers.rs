use crate::errors::{AppError, InputError, StoreError};
use crate::input::{new_goal, parse_deposit, parse_goal_form};
use crate::models::{DepositForm, Goal, GoalForm, GoalId, IndexQuery, Overview};
use crate::state::AppState;
use crate::stats::build_overview;
use crate::ui::{render_delete_confirm, render_index, PageView};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Utc;
use tracing::{error, info, warn};

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Response, AppError> {
    let editing = query.edit.map(GoalId::new);
    refresh_all(&state, editing.as_ref(), None).await
}

pub async fn get_goals(State(state): State<AppState>) -> Result<Json<Vec<Goal>>, AppError> {
    let goals = state.store.list().await.map_err(store_failure)?;
    Ok(Json(goals))
}

pub async fn get_overview(State(state): State<AppState>) -> Result<Json<Overview>, AppError> {
    let goals = state.store.list().await.map_err(store_failure)?;
    Ok(Json(build_overview(&goals)))
}

pub async fn create_goal(
    State(state): State<AppState>,
    Form(form): Form<GoalForm>,
) -> Result<Response, AppError> {
    let fields = match parse_goal_form(&form) {
        Ok(fields) => fields,
        Err(err) => return rejected(&state, err).await,
    };

    let created = state
        .store
        .create(&new_goal(fields, Utc::now().date_naive()))
        .await
        .map_err(store_failure)?;
    info!(id = %created.id, name = %created.name, "goal created");

    Ok(Redirect::to("/").into_response())
}

pub async fn deposit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DepositForm>,
) -> Result<Response, AppError> {
    let saved_amount = match parse_deposit(&form) {
        Ok(saved_amount) => saved_amount,
        Err(err) => return rejected(&state, err).await,
    };

    let id = GoalId::new(id);
    state
        .store
        .deposit(&id, saved_amount)
        .await
        .map_err(store_failure)?;
    info!(%id, saved_amount, "deposit recorded");

    Ok(Redirect::to("/").into_response())
}

pub async fn edit_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<GoalForm>,
) -> Result<Response, AppError> {
    let id = GoalId::new(id);
    let fields = match parse_goal_form(&form) {
        Ok(fields) => fields,
        Err(err) => return rejected_while_editing(&state, &id, err).await,
    };

    state.store.edit(&id, &fields).await.map_err(store_failure)?;
    info!(%id, "goal updated");

    Ok(Redirect::to("/").into_response())
}

pub async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = GoalId::new(id);
    let goals = state.store.list().await.map_err(store_failure)?;
    let goal = goals
        .iter()
        .find(|goal| goal.id == id)
        .ok_or_else(|| AppError::not_found(format!("goal {id} not found")))?;

    Ok(Html(render_delete_confirm(goal)))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = GoalId::new(id);
    state.store.delete(&id).await.map_err(store_failure)?;
    info!(%id, "goal deleted");

    Ok(Redirect::to("/"))
}

/// Fetches the whole goal set and renders every card plus the overview.
async fn refresh_all(
    state: &AppState,
    editing: Option<&GoalId>,
    alert: Option<&str>,
) -> Result<Response, AppError> {
    let goals = state.store.list().await.map_err(store_failure)?;
    let overview = build_overview(&goals);
    let html = render_index(&PageView {
        goals: &goals,
        overview: &overview,
        editing,
        alert,
    });

    let status = if alert.is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    Ok((status, Html(html)).into_response())
}

async fn rejected(state: &AppState, err: InputError) -> Result<Response, AppError> {
    warn!("rejected form input: {err}");
    refresh_all(state, None, Some(&err.to_string())).await
}

async fn rejected_while_editing(
    state: &AppState,
    id: &GoalId,
    err: InputError,
) -> Result<Response, AppError> {
    warn!(%id, "rejected edit: {err}");
    refresh_all(state, Some(id), Some(&err.to_string())).await
}

fn store_failure(err: StoreError) -> AppError {
    error!("goal store call failed: {err}");
    err.into()
}

use std::sync::Arc;

use axum::extract::{FromRef, Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use common_auth::{AuthContext, TokenVerifier};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::service::{AverageSummary, GradeRecord, GradeService, NewGrade};

#[derive(Clone)]
pub struct AppState {
    pub service: GradeService,
    pub verifier: Arc<TokenVerifier>,
}

impl FromRef<AppState> for Arc<TokenVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}

#[derive(Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct AddGradeResponse {
    pub message: &'static str,
    pub id: Uuid,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/grades", post(add_grade))
        .route("/grades/student/:student_id", get(get_student_grades))
        .route(
            "/grades/student/:student_id/average",
            get(get_student_average),
        )
        .with_state(state)
}

async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "grade service is online",
    })
}

async fn add_grade(
    State(state): State<AppState>,
    _auth: AuthContext,
    Json(grade): Json<NewGrade>,
) -> ApiResult<Json<AddGradeResponse>> {
    let id = state.service.add_grade(grade).await?;
    Ok(Json(AddGradeResponse {
        message: "grade recorded",
        id,
    }))
}

async fn get_student_grades(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(student_id): Path<String>,
) -> ApiResult<Json<Vec<GradeRecord>>> {
    let records = state.service.get_by_student(&student_id).await?;
    Ok(Json(records))
}

async fn get_student_average(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(student_id): Path<String>,
) -> ApiResult<Json<AverageSummary>> {
    let summary = state.service.calculate_average(&student_id).await?;
    Ok(Json(summary))
}

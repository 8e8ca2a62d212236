use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use paydesk_core::SessionUser;

use crate::dto::{SessionAccessResponse, SessionUserResponse, SetSessionUserRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn set_session_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<SetSessionUserRequest>,
) -> ApiResult<(StatusCode, Json<SessionUserResponse>)> {
    let user = SessionUser::new(payload.user_id, payload.display_name, payload.email);
    state.session.set_user(user.clone());
    Ok((StatusCode::CREATED, Json(SessionUserResponse::from(user))))
}

pub async fn clear_session_user_handler(State(state): State<AppState>) -> StatusCode {
    state.session.clear_user();
    StatusCode::NO_CONTENT
}

pub async fn session_access_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<SessionAccessResponse>> {
    let user = state.session.current_user();
    let access = state.session.access();
    Ok(Json(SessionAccessResponse::from_parts(user, access)))
}

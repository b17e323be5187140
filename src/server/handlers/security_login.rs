use crate::{error::Error as KeeperError, server::app_state::AppState};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

#[derive(Deserialize)]
pub struct LoginParams {
    pub login: String,
    pub password: String,
}

/// POST /api/users/login
pub async fn security_login(
    state: web::Data<AppState>,
    body_params: web::Json<LoginParams>,
) -> Result<HttpResponse, KeeperError> {
    let body_params = body_params.into_inner();
    let token = state
        .api
        .security()
        .login(&body_params.login, &body_params.password)
        .await
        .map_err(|err| {
            warn!("Failed to log in user: {err:?}");
            KeeperError::from(err)
        })?;

    Ok(HttpResponse::Ok().json(json!({ "token": token })))
}

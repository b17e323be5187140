use crate::{error::Error as KeeperError, server::app_state::AppState};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

#[derive(Deserialize)]
pub struct SignupParams {
    pub login: String,
    pub password: String,
}

/// POST /api/users/signup
pub async fn security_signup(
    state: web::Data<AppState>,
    body_params: web::Json<SignupParams>,
) -> Result<HttpResponse, KeeperError> {
    let body_params = body_params.into_inner();
    let user = state
        .api
        .security()
        .signup(&body_params.login, &body_params.password)
        .await
        .map_err(|err| {
            error!("Failed to sign up user: {err:?}");
            KeeperError::from(err)
        })?;

    Ok(HttpResponse::Created().json(json!({ "id": user.id })))
}

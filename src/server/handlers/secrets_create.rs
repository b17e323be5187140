use crate::{
    error::Error as KeeperError, secrets::SecretCreateParams, server::app_state::AppState,
    users::User,
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::error;

/// POST /api/secrets
pub async fn secrets_create(
    state: web::Data<AppState>,
    user: User,
    body_params: web::Json<SecretCreateParams>,
) -> Result<HttpResponse, KeeperError> {
    let secret = state
        .api
        .secrets(&user)
        .create_secret(body_params.into_inner())
        .await
        .map_err(|err| {
            error!(user.id = %user.id, "Failed to create secret: {err:?}");
            KeeperError::from(err)
        })?;

    Ok(HttpResponse::Created().json(json!({ "id": secret.id })))
}

use crate::{error::Error as KeeperError, server::app_state::AppState, users::User};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::error;

#[derive(Deserialize)]
pub struct SecretsGetParams {
    pub name: Option<String>,
}

/// GET /api/secrets
pub async fn secrets_get(
    state: web::Data<AppState>,
    user: User,
    query_params: web::Query<SecretsGetParams>,
) -> Result<HttpResponse, KeeperError> {
    if query_params
        .name
        .as_deref()
        .is_some_and(|name| name.trim().is_empty())
    {
        return Err(KeeperError::validation("Secret name cannot be empty."));
    }

    let secrets = state
        .api
        .secrets(&user)
        .get_secrets(query_params.name.as_deref())
        .await
        .map_err(|err| {
            error!(user.id = %user.id, "Failed to retrieve secrets: {err:?}");
            KeeperError::from(err)
        })?;

    Ok(HttpResponse::Ok().json(secrets))
}

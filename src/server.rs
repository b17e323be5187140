mod app_state;
mod extractors;
mod handlers;

use crate::{api::Api, config::Config, database::Database, server::app_state::AppState};
use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// Registers Keeper API routes.
fn configure_routes(config: &mut web::ServiceConfig) {
    config.service(
        web::scope("/api")
            .service(
                web::scope("/users")
                    .route("/signup", web::post().to(handlers::security_signup))
                    .route("/login", web::post().to(handlers::security_login)),
            )
            .service(
                web::scope("/secrets")
                    .route("", web::get().to(handlers::secrets_get))
                    .route("", web::post().to(handlers::secrets_create)),
            ),
    );
}

#[actix_web::main]
pub async fn run(config: Config, http_port: u16) -> Result<(), anyhow::Error> {
    let db = Database::open_with_config(&config.db).await?;
    info!(
        "Keeper binary secrets are stored at {}",
        config.storage.root.display()
    );

    let state = web::Data::new(AppState::new(Api::new(&config, db)?));

    let http_server_url = format!("0.0.0.0:{http_port}");
    let http_server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(state.clone())
            .configure(configure_routes)
    });

    let http_server = http_server
        .bind(&http_server_url)
        .with_context(|| format!("Failed to bind to {}.", &http_server_url))?;

    info!("Keeper API server is available at http://{http_server_url}");

    http_server
        .run()
        .await
        .with_context(|| "Failed to run Keeper API server.")
}

#[cfg(test)]
mod tests {
    use super::{app_state::AppState, configure_routes};
    use crate::tests::{mock_api, mock_config};
    use actix_web::{App, http::StatusCode, test, web};
    use insta::assert_json_snapshot;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn can_store_and_retrieve_secrets() -> anyhow::Result<()> {
        let storage = tempfile::tempdir()?;
        let state = web::Data::new(AppState::new(mock_api(storage.path()).await?));
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/users/signup")
                .set_json(json!({ "login": "dev@keeper.dev", "password": "pass" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(response).await;
        assert_json_snapshot!(body, @r###"
        {
          "id": 1
        }
        "###);

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/users/login")
                .set_json(json!({ "login": "dev@keeper.dev", "password": "pass" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        let token = body["token"].as_str().unwrap_or_default().to_string();
        assert!(!token.is_empty());

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/secrets")
                .insert_header(("authorization", token.clone()))
                .set_json(json!({
                    "type": "password",
                    "name": "email",
                    "notes": "work",
                    "password": { "username": "a", "password": "p@ss", "url": "https://x" }
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/secrets")
                .insert_header(("authorization", format!("Bearer {token}")))
                .set_json(json!({
                    "type": "binary",
                    "name": "backup",
                    "metaData": { "kind": "archive" },
                    "binary": { "name": "backup.tar", "content": "AQID" }
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/secrets?name=email")
                .insert_header(("authorization", token.clone()))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_json_snapshot!(body, {
            "[].createdAt" => "[TIMESTAMP]",
            "[].updatedAt" => "[TIMESTAMP]",
        }, @r###"
        [
          {
            "createdAt": "[TIMESTAMP]",
            "data": {
              "metaData": {},
              "notes": "work",
              "password": "p@ss",
              "url": "https://x",
              "username": "a"
            },
            "id": 1,
            "name": "email",
            "type": "password",
            "updatedAt": "[TIMESTAMP]"
          }
        ]
        "###);

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/secrets")
                .insert_header(("authorization", token))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_json_snapshot!(body[1], {
            ".createdAt" => "[TIMESTAMP]",
            ".updatedAt" => "[TIMESTAMP]",
        }, @r###"
        {
          "createdAt": "[TIMESTAMP]",
          "data": {
            "content": "AQID",
            "metaData": {
              "kind": "archive"
            },
            "name": "backup.tar",
            "notes": ""
          },
          "id": 2,
          "name": "backup",
          "type": "binary",
          "updatedAt": "[TIMESTAMP]"
        }
        "###);

        Ok(())
    }

    #[actix_web::test]
    async fn maps_errors_to_status_codes() -> anyhow::Result<()> {
        let storage = tempfile::tempdir()?;
        let state = web::Data::new(AppState::new(mock_api(storage.path()).await?));
        let user = state.api.security().signup("dev@keeper.dev", "pass").await?;
        let token = state.api.tokens.issue(user.id)?;
        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/secrets").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, json!({ "message": "Unauthorized" }));

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/users/login")
                .set_json(json!({ "login": "dev@keeper.dev", "password": "wrong" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, json!({ "message": "Unauthorized" }));

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/users/signup")
                .set_json(json!({ "login": "DEV@keeper.dev", "password": "pass" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(
            body,
            json!({ "message": "The login is already registered." })
        );

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/secrets")
                .insert_header(("authorization", token.clone()))
                .set_json(json!({ "type": "otp", "name": "code" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, json!({ "message": "Unknown secret type `otp`." }));

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/secrets?name=")
                .insert_header(("authorization", token.clone()))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, json!({ "message": "Secret name cannot be empty." }));

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/secrets?name=missing")
                .insert_header(("authorization", token))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, json!({ "message": "Secret not found." }));

        Ok(())
    }

    #[actix_web::test]
    async fn rejects_tokens_signed_with_other_key() -> anyhow::Result<()> {
        let storage = tempfile::tempdir()?;
        let state = web::Data::new(AppState::new(mock_api(storage.path()).await?));
        let user = state.api.security().signup("dev@keeper.dev", "pass").await?;

        let mut other_config = mock_config(storage.path());
        other_config.security.jwt_secret = Some("other-secret".to_string());
        let other_api = crate::api::Api::new(&other_config, crate::tests::mock_db().await?)?;
        let forged_token = other_api.tokens.issue(user.id)?;

        let app = test::init_service(App::new().app_data(state).configure(configure_routes)).await;
        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/secrets")
                .insert_header(("authorization", forged_token))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }
}

//! Account endpoint integration tests
//!
//! - POST /sign-up - Register a new user
//! - POST /login - Exchange credentials for an access token
//! - GET /v1/account - Get current user profile

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::common::{assertions, parse_body, request, unique_suffix, TestApp};

mod test_sign_up {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_sign_up_creates_user_without_exposing_hash() {
        let app = TestApp::new().await.unwrap();
        let suffix = unique_suffix();

        let response = app
            .test_router()
            .oneshot(request(
                Method::POST,
                "/sign-up",
                None,
                Some(json!({
                    "email": format!("New_{suffix}@MoveShare.test"),
                    "username": format!("new_{suffix}"),
                    "password": "secret123"
                })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = parse_body(response).await;
        assert_eq!(
            body["email"],
            format!("new_{suffix}@moveshare.test").as_str()
        );
        assert!(body["id"].as_i64().is_some());
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_duplicate_sign_up_conflicts() {
        let app = TestApp::new().await.unwrap();
        let existing = app.create_test_user().await.unwrap();

        let response = app
            .test_router()
            .oneshot(request(
                Method::POST,
                "/sign-up",
                None,
                Some(json!({
                    "email": existing.user.email,
                    "username": format!("other_{}", unique_suffix()),
                    "password": "secret123"
                })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assertions::assert_error_code(&parse_body(response).await, "CONFLICT");
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_short_password_is_rejected() {
        let app = TestApp::new().await.unwrap();
        let suffix = unique_suffix();

        let response = app
            .test_router()
            .oneshot(request(
                Method::POST,
                "/sign-up",
                None,
                Some(json!({
                    "email": format!("short_{suffix}@moveshare.test"),
                    "username": format!("short_{suffix}"),
                    "password": "abc"
                })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

mod test_login {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_login_token_opens_account() {
        let app = TestApp::new().await.unwrap();
        let fixture = app.create_test_user().await.unwrap();

        let response = app
            .test_router()
            .oneshot(request(
                Method::POST,
                "/login",
                None,
                Some(json!({
                    "email": fixture.user.email,
                    "password": fixture.password
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_body(response).await;
        assert_eq!(body["token_type"], "Bearer");
        let token = body["access_token"].as_str().unwrap().to_string();

        let response = app
            .test_router()
            .oneshot(request(Method::GET, "/v1/account", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let profile = parse_body(response).await;
        assert_eq!(profile["id"], fixture.user.id);
        assert_eq!(profile["username"], fixture.user.username.as_str());
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_wrong_password_is_unauthorized() {
        let app = TestApp::new().await.unwrap();
        let fixture = app.create_test_user().await.unwrap();

        let response = app
            .test_router()
            .oneshot(request(
                Method::POST,
                "/login",
                None,
                Some(json!({
                    "email": fixture.user.email,
                    "password": "not the password"
                })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assertions::assert_error_code(&parse_body(response).await, "AUTHENTICATION_ERROR");
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_expired_token_is_rejected() {
        use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

        let app = TestApp::new().await.unwrap();
        let fixture = app.create_test_user().await.unwrap();
        let now = chrono::Utc::now().timestamp() as u64;

        let claims = json!({
            "sub": fixture.user.id.to_string(),
            "email": fixture.user.email,
            "iss": "moveshare-test",
            "aud": "moveshare",
            "iat": now - 7200,
            "exp": now - 3600,
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(app.config.jwt_secret.as_bytes()),
        )
        .unwrap();

        let response = app
            .test_router()
            .oneshot(request(Method::GET, "/v1/account", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

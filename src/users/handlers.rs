use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    db::AppState,
    users::{
        dto::{CreateUserRequest, MessageResponse, UserProfile},
        extractors::BasicCredentials,
        repo::User,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(create_user))
        .route("/getuser", get(get_user))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), (StatusCode, String)> {
    // Any body that fails to parse as the expected shape is a 400, including
    // the well-formed-but-wrong-type cases axum would otherwise answer 422.
    let Json(payload) = payload.map_err(|e| {
        warn!(error = %e, "invalid create-user body");
        (StatusCode::BAD_REQUEST, "Invalid request body".to_string())
    })?;

    if let Err(e) = User::insert(&state.db, &payload.username, &payload.password, payload.age).await
    {
        error!(error = %e, "create user failed");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to create user".into(),
        ));
    }

    info!(username = %payload.username, "user created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created successfully".into(),
        }),
    ))
}

#[instrument(skip(state, creds))]
pub async fn get_user(
    State(state): State<AppState>,
    creds: BasicCredentials,
) -> Result<Json<UserProfile>, (StatusCode, String)> {
    // Unknown username, wrong password and query failure all collapse into
    // the same response so the caller cannot tell which field was wrong.
    match User::find_by_credentials(&state.db, &creds.username, &creds.password).await {
        Ok(Some(user)) => Ok(Json(UserProfile {
            username: user.username,
            age: user.age,
        })),
        Ok(None) => {
            warn!(username = %creds.username, "no matching credentials");
            Err((
                StatusCode::UNAUTHORIZED,
                "User not found or incorrect credentials".into(),
            ))
        }
        Err(e) => {
            error!(error = %e, "credential lookup failed");
            Err((
                StatusCode::UNAUTHORIZED,
                "User not found or incorrect credentials".into(),
            ))
        }
    }
}

#[cfg(test)]
mod router_tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::{app::build_app, db::AppState};

    // None of these requests reach the database; rejections fire before the
    // first pool checkout, so the lazy fake pool is never connected.

    #[tokio::test]
    async fn welcome_route_responds() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = res.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Welcome to the userbase API server!");
    }

    #[tokio::test]
    async fn create_user_rejects_get() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/user")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn get_user_rejects_post() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/getuser")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn create_user_rejects_malformed_json() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/user")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_user_rejects_wrong_shape() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/user")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"username":"johndoe","password":"password123","age":"thirty"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_user_rejects_missing_content_type() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/user")
                    .body(Body::from(
                        r#"{"username":"johndoe","password":"password123","age":30}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_user_requires_auth_header() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/getuser")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn get_user_rejects_unparseable_auth_header() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/getuser")
                    .header(header::AUTHORIZATION, "Basic !!!not-base64!!!")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn get_user_rejects_bearer_scheme() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/getuser")
                    .header(header::AUTHORIZATION, "Bearer some-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}

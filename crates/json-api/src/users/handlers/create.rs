//! Create User Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use shopfront_app::domain::users::models::{NewUser, UserRole, UserUuid};

use crate::{
    extensions::*,
    state::State,
    users::{UserResponse, errors::into_status_error, models::CreateUserRequest},
};

/// Create User Handler
#[endpoint(
    tags("users"),
    summary = "Create User",
    responses(
        (status_code = StatusCode::CREATED, description = "User created"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let role = request
        .role
        .map(|role| role.to_uppercase().parse::<UserRole>())
        .transpose()
        .or_400("role must be one of RETAIL, WHOLESALE, ADMIN")?
        .unwrap_or_default();

    let user = state
        .app
        .users
        .create_user(NewUser {
            uuid: request.uuid.map_or_else(UserUuid::new, UserUuid::from_uuid),
            name: request.name,
            email: request.email,
            role,
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/users/{}", user.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shopfront_app::domain::users::{MockUsersService, UsersServiceError, models::User};

    use crate::test_helpers::{make_user, users_service};

    use super::*;

    fn make_service(repo: MockUsersService) -> Service {
        users_service(repo, Router::with_path("users").post(handler))
    }

    fn created(new: NewUser) -> User {
        User {
            name: new.name,
            email: new.email,
            role: new.role,
            ..make_user(new.uuid)
        }
    }

    #[tokio::test]
    async fn test_create_user_success() -> TestResult {
        let mut repo = MockUsersService::new();

        repo.expect_create_user()
            .once()
            .withf(|user| {
                user.name == "Naledi"
                    && user.email == "naledi@example.com"
                    && user.role == UserRole::Wholesale
            })
            .return_once(|user| Ok(created(user)));

        let mut res = TestClient::post("http://example.com/users")
            .json(&json!({ "name": "Naledi", "email": "naledi@example.com", "role": "wholesale" }))
            .send(&make_service(repo))
            .await;

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.role, "WHOLESALE");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_defaults_to_retail() {
        let mut repo = MockUsersService::new();

        repo.expect_create_user()
            .once()
            .withf(|user| user.role == UserRole::Retail)
            .return_once(|user| Ok(created(user)));

        let res = TestClient::post("http://example.com/users")
            .json(&json!({ "name": "Naledi", "email": "naledi@example.com" }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
    }

    #[tokio::test]
    async fn test_create_user_unknown_role_returns_400() {
        let res = TestClient::post("http://example.com/users")
            .json(&json!({ "name": "Naledi", "email": "naledi@example.com", "role": "VIP" }))
            .send(&make_service(MockUsersService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email_returns_409() {
        let mut repo = MockUsersService::new();

        repo.expect_create_user()
            .once()
            .return_once(|_| Err(UsersServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/users")
            .json(&json!({ "name": "Naledi", "email": "naledi@example.com" }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }
}

//! User Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    users::{UserResponse, errors::into_status_error},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    /// The list of users
    pub users: Vec<UserResponse>,
}

/// User Index Handler
///
/// With `email`, returns at most the one user registered under that address (case-insensitive).
#[endpoint(
    tags("users"),
    summary = "List Users",
    responses(
        (status_code = StatusCode::OK, description = "Users"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    email: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<UsersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let users = match email.into_inner() {
        Some(email) => state
            .app
            .users
            .find_by_email(&email)
            .await
            .map_err(into_status_error)?
            .into_iter()
            .collect(),
        None => state
            .app
            .users
            .list_users()
            .await
            .map_err(into_status_error)?,
    };

    Ok(Json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shopfront_app::domain::users::{MockUsersService, models::UserUuid};

    use crate::test_helpers::{make_user, users_service};

    use super::*;

    fn make_service(repo: MockUsersService) -> Service {
        users_service(repo, Router::with_path("users").get(handler))
    }

    #[tokio::test]
    async fn test_list_users_returns_all() -> TestResult {
        let mut repo = MockUsersService::new();

        repo.expect_list_users()
            .once()
            .return_once(|| Ok(vec![make_user(UserUuid::new()), make_user(UserUuid::new())]));

        let response: UsersResponse = TestClient::get("http://example.com/users")
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        assert_eq!(response.users.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_users_by_email_returns_match() -> TestResult {
        let uuid = UserUuid::new();

        let mut repo = MockUsersService::new();

        repo.expect_find_by_email()
            .once()
            .withf(|email| email == "thabo@example.com")
            .return_once(move |_| Ok(Some(make_user(uuid))));

        let response: UsersResponse =
            TestClient::get("http://example.com/users?email=thabo@example.com")
                .send(&make_service(repo))
                .await
                .take_json()
                .await?;

        let uuids: Vec<_> = response.users.iter().map(|user| user.uuid).collect();

        assert_eq!(uuids, vec![uuid.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_users_by_unknown_email_is_empty() -> TestResult {
        let mut repo = MockUsersService::new();

        repo.expect_find_by_email().once().return_once(|_| Ok(None));

        let response: UsersResponse =
            TestClient::get("http://example.com/users?email=nobody@example.com")
                .send(&make_service(repo))
                .await
                .take_json()
                .await?;

        assert!(response.users.is_empty());

        Ok(())
    }
}

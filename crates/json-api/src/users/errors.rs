//! User Errors

use salvo::http::StatusError;
use tracing::error;

use shopfront_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("A user with this email already exists")
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::InvalidReference => {
            StatusError::bad_request().brief("User has existing orders")
        }
        UsersServiceError::Invalid(reason) => StatusError::bad_request().brief(reason),
        UsersServiceError::MissingRequiredData | UsersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid user payload")
        }
        UsersServiceError::Sql(source) => {
            error!("user storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn maps_each_error_to_a_status() {
        let cases = [
            (UsersServiceError::AlreadyExists, StatusCode::CONFLICT),
            (UsersServiceError::NotFound, StatusCode::NOT_FOUND),
            (UsersServiceError::InvalidReference, StatusCode::BAD_REQUEST),
            (UsersServiceError::Invalid("email is required"), StatusCode::BAD_REQUEST),
            (UsersServiceError::InvalidData, StatusCode::BAD_REQUEST),
        ];

        for (error, expected) in cases {
            assert_eq!(into_status_error(error).code, expected);
        }
    }
}

//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use crate::observability::REQUEST_ID_DEPOT_KEY;

/// Typed access to values the middleware stack leaves in the depot.
pub(crate) trait DepotExt {
    /// Injected state, or a bare 500 when the injection hoop is missing.
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Request id assigned by the request logging hoop, `-` outside of it.
    fn request_id(&self) -> &str;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_missing| StatusError::internal_server_error())
    }

    fn request_id(&self) -> &str {
        self.get::<String>(REQUEST_ID_DEPOT_KEY)
            .map_or("-", String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_state_is_a_500() {
        let depot = Depot::new();

        let error = depot.obtain_or_500::<String>().err();

        assert_eq!(
            error.map(|e| e.code),
            Some(salvo::http::StatusCode::INTERNAL_SERVER_ERROR)
        );
    }

    #[test]
    fn request_id_falls_back_to_dash() {
        let mut depot = Depot::new();

        assert_eq!(depot.request_id(), "-");

        depot.insert(REQUEST_ID_DEPOT_KEY, "req-1".to_string());

        assert_eq!(depot.request_id(), "req-1");
    }
}

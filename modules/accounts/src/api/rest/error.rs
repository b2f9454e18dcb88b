use eventhost_api::Problem;
use http::StatusCode;

use crate::domain::DomainError;

/// Convert domain errors to HTTP Problem responses
pub fn domain_error_to_problem(err: DomainError) -> Problem {
    match err {
        DomainError::InvalidCredentials => Problem::unauthorized("Invalid email or password"),
        DomainError::InvalidSession => Problem::unauthorized("Session is invalid or expired"),
        DomainError::Unauthorized => Problem::unauthorized("Unauthorized"),
        DomainError::InvalidRole(role) => Problem::new(
            StatusCode::BAD_REQUEST,
            "Invalid Role",
            format!("Invalid role '{role}'"),
        ),
        DomainError::Validation { field, message } => {
            Problem::bad_request(format!("{field}: {message}"))
        }
        DomainError::ServiceUnavailable(_) => Problem::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Service Unavailable",
            "Authentication service unavailable",
        ),
        DomainError::Persistence(_) => Problem::internal("Failed to set role"),
        DomainError::Internal(_) => Problem::internal("Internal error"),
    }
}

/// Implement Into<Problem> for `DomainError` so `?` works in handlers
impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(e)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        let cases = [
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                DomainError::InvalidRole("root".to_owned()),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::validation("userId", "must not be empty"),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::Persistence("down".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainError::ServiceUnavailable("down".to_owned()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(Problem::from(err).status, status);
        }
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let problem = Problem::from(DomainError::Persistence("db at 10.0.0.5 refused".to_owned()));
        assert!(!problem.detail.contains("10.0.0.5"));
    }
}

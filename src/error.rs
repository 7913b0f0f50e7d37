//! Handler error type and its JSON rendering

use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::store::StoreError;

/// Body of every non-2xx response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

/// Outcomes that are not a 200. Not-found branches are expected results and
/// are not logged; store failures are.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Route not found")]
    RouteNotFound,

    #[error("City not found")]
    CityNotFound,

    #[error("Invalid city name")]
    InvalidCity(#[source] PathRejection),

    #[error("Error fetching weather data")]
    FetchAll(#[source] StoreError),

    #[error("Error fetching weather data for the city")]
    FetchCity {
        city: String,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::RouteNotFound | ApiError::CityNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidCity(_) => StatusCode::BAD_REQUEST,
            ApiError::FetchAll(_) | ApiError::FetchCity { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing message; never includes driver details
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::RouteNotFound => "Route not found",
            ApiError::CityNotFound => "City not found",
            ApiError::InvalidCity(_) => "Invalid city name",
            ApiError::FetchAll(_) => "Error fetching weather data",
            ApiError::FetchCity { .. } => "Error fetching weather data for the city",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::FetchAll(e) => error!(error = %e, "Error fetching weather data"),
            ApiError::FetchCity { city, source } => {
                error!(city = %city, error = %source, "Error fetching weather data for city")
            }
            ApiError::InvalidCity(rejection) => {
                debug!(error = %rejection, "Rejected city path")
            }
            ApiError::RouteNotFound | ApiError::CityNotFound => {}
        }

        (
            self.status(),
            Json(ErrorBody {
                error: self.message(),
            }),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_variants_are_distinct() {
        assert_eq!(ApiError::RouteNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::CityNotFound.status(), StatusCode::NOT_FOUND);
        assert_ne!(
            ApiError::RouteNotFound.message(),
            ApiError::CityNotFound.message()
        );
    }

    #[test]
    fn test_store_failures_hide_driver_details() {
        let err = ApiError::FetchCity {
            city: "Paris".to_string(),
            source: StoreError::Unavailable("socket closed".to_string()),
        };

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Error fetching weather data for the city");
        assert!(!err.message().contains("socket"));
    }

    #[test]
    fn test_display_matches_message() {
        let err = ApiError::FetchAll(StoreError::Unavailable("down".to_string()));
        assert_eq!(err.to_string(), err.message());
    }
}

//! HTTP routes
//!
//! | Method | Path          | Handler                   |
//! |--------|---------------|---------------------------|
//! | GET    | `/api`        | all records               |
//! | GET    | `/api/`       | lookup with an empty city |
//! | GET    | `/api/*city`  | lookup by decoded city    |
//!
//! Anything else, including `HEAD` and other methods on these paths, is a
//! "Route not found" 404. A city that does not decode to UTF-8 is a JSON 400.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::cors::with_cors;
use crate::error::{ApiError, ApiResult};
use crate::record::WeatherRecord;
use crate::store::WeatherStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WeatherStore>,
}

/// Build the application router over `store`
pub fn router(store: Arc<dyn WeatherStore>) -> Router {
    let state = AppState { store };

    let app = Router::new()
        .route(
            "/api",
            get(list_weather)
                .head(route_not_found)
                .fallback(route_not_found),
        )
        .route(
            "/api/",
            get(empty_city_weather)
                .head(route_not_found)
                .fallback(route_not_found),
        )
        .route(
            "/api/*city",
            get(city_weather)
                .head(route_not_found)
                .fallback(route_not_found),
        )
        .fallback(route_not_found)
        .with_state(state);

    with_cors(app).layer(TraceLayer::new_for_http())
}

async fn list_weather(State(state): State<AppState>) -> ApiResult<Json<Vec<WeatherRecord>>> {
    let records = state.store.find_all().await.map_err(ApiError::FetchAll)?;
    debug!(count = records.len(), "Fetched weather data");
    Ok(Json(records))
}

async fn city_weather(
    State(state): State<AppState>,
    city: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<WeatherRecord>> {
    let Path(city) = city.map_err(ApiError::InvalidCity)?;
    lookup_city(&state, city).await
}

async fn empty_city_weather(State(state): State<AppState>) -> ApiResult<Json<WeatherRecord>> {
    lookup_city(&state, String::new()).await
}

async fn lookup_city(state: &AppState, city: String) -> ApiResult<Json<WeatherRecord>> {
    match state.store.find_by_city(&city).await {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err(ApiError::CityNotFound),
        Err(source) => Err(ApiError::FetchCity { city, source }),
    }
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

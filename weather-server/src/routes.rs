use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use weather_core::{Detail, ErrorPayload, ForecastService, QueryParams};

#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<ForecastService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather/london/{date}/{time}", get(forecast))
        .route("/weather/london/{date}/{time}/{detail}", get(forecast_detail))
        .fallback(not_found)
        .with_state(state)
}

async fn forecast(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Response {
    let (date, time) = match path {
        Ok(Path(params)) => params,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "decoding forecast path lossily");
            (lossy_segment(&uri, 2), lossy_segment(&uri, 3))
        }
    };
    respond(&state, date, time, None).await
}

async fn forecast_detail(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<(String, String, String)>, PathRejection>,
) -> Response {
    let (date, time, detail) = match path {
        Ok(Path(params)) => params,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "decoding forecast path lossily");
            (
                lossy_segment(&uri, 2),
                lossy_segment(&uri, 3),
                lossy_segment(&uri, 4),
            )
        }
    };

    match Detail::try_from(detail.as_str()) {
        Ok(detail) => respond(&state, date, time, Some(detail)).await,
        Err(err) => {
            tracing::debug!(error = %err, "rejected forecast detail");
            not_found().await
        }
    }
}

/// Percent-decode one path segment, replacing invalid UTF-8 with U+FFFD.
fn lossy_segment(uri: &Uri, index: usize) -> String {
    uri.path()
        .trim_start_matches('/')
        .split('/')
        .nth(index)
        .map(|segment| {
            let bytes = urlencoding::decode_binary(segment.as_bytes());
            String::from_utf8_lossy(&bytes).into_owned()
        })
        .unwrap_or_default()
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorPayload::new("Not Found"))).into_response()
}

// Every query that gets this far is answered with 200; errors travel in the body.
async fn respond(state: &AppState, date: String, time: String, detail: Option<Detail>) -> Response {
    tracing::info!("Incoming request for date {date}, time {time}");

    let params = QueryParams { date, time, detail };
    let payload = state.service.query(&params).await;

    (StatusCode::OK, Json(payload)).into_response()
}

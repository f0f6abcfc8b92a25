//! HTTP server exposing the query preprocessing pipeline: `POST /query`,
//! `GET /health`, `GET /metrics`.

pub mod http;
pub mod metrics;
pub mod state;

pub use http::create_router;
pub use metrics::init_metrics;
pub use state::AppState;

use thiserror::Error;

/// Server-level errors. Wraps `qprep_pipeline::PipelineError` for every
/// fault the pipeline itself can raise and adds the request-shape faults
/// that only make sense at the HTTP boundary.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("request body must not be empty")]
    EmptyRequest,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Pipeline(#[from] qprep_pipeline::PipelineError),
}

impl From<&ServerError> for axum::http::StatusCode {
    fn from(err: &ServerError) -> Self {
        match err {
            ServerError::EmptyRequest => axum::http::StatusCode::BAD_REQUEST,
            ServerError::InvalidRequest(_) => axum::http::StatusCode::BAD_REQUEST,
            ServerError::Pipeline(qprep_pipeline::PipelineError::EmptyInput) => {
                axum::http::StatusCode::BAD_REQUEST
            }
            ServerError::Pipeline(qprep_pipeline::PipelineError::UnsupportedTargetLanguage(_)) => {
                axum::http::StatusCode::UNPROCESSABLE_ENTITY
            }
            ServerError::Pipeline(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

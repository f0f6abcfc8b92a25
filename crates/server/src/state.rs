//! Application state shared across every request handler.

use std::sync::Arc;

use qprep_config::Settings;
use qprep_pipeline::{AppState as PipelineState, Pipeline, PipelineError};

/// Shared server state: the pipeline singleton plus the settings used to
/// build it, kept around for health reporting and CORS configuration.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, PipelineError> {
        let settings = Arc::new(settings);
        let pipeline_state = PipelineState::build(&settings)?;
        Ok(Self {
            pipeline: Arc::new(Pipeline::new(pipeline_state)),
            settings,
        })
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("empty input")]
    EmptyInput,

    #[error("unsupported target language: {0}")]
    UnsupportedTargetLanguage(String),

    #[error(transparent)]
    Core(#[from] qprep_core::CoreError),

    #[error(transparent)]
    TextProcessing(#[from] qprep_text_processing::TextProcessingError),

    #[error(transparent)]
    Rag(#[from] qprep_rag::RagError),
}

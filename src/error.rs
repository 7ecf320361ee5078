use std::fmt;

use indicatif::style::TemplateError;
use swirl_fluids::ParamsError;
use swirl_io::{decode::DecodingError, encode::EncodingError};
use thiserror::Error;

#[derive(Error)]
pub enum AppError {
    #[error("invalid fluid parameters: {0}")]
    Params(#[from] ParamsError),
    #[error("failed to write recording: {0}")]
    Encoding(#[from] EncodingError),
    #[error("failed to read recording: {0}")]
    Decoding(#[from] DecodingError),
    #[error("invalid run settings: {0}")]
    Settings(String),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

// `main` reports errors with `Debug`, so show the readable message there too.
impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

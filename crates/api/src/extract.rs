//! Request extractors whose rejections use the response envelope.
//!
//! Axum's stock `Json` and `Query` reject with plain-text bodies. These
//! wrappers convert the rejection into [`AppError`] so malformed input gets
//! the same `{success: false, ...}` shape as every other failure.

use axum::extract::{FromRequest, FromRequestParts};
use greenhomes_core::validation::FieldErrors;
use validator::Validate;

use crate::error::AppError;

/// JSON body extractor.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Run the derived `validator` rules of `input`, collecting failures per field.
pub fn derived_errors<T: Validate>(input: &T) -> FieldErrors {
    match input.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => errors.into(),
    }
}

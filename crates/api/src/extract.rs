//! Body and query extractors that reject with the JSON error shape.
//!
//! Plain `Json` and `Query` answer bad input with a text body; these wrap
//! them so the client sees `VALIDATION_ERROR` with the offending field.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON body extractor.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Query string extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);

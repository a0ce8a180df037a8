//! Request extractors that reject with the API error envelope.
//!
//! Plain `axum::Json` and `Query` answer malformed input with a plain-text body
//! (and 422 for a well-formed body of the wrong shape). These wrappers turn every
//! rejection into [`Error::BadRequest`], so clients always get
//! `{ "success": false, "error": ... }` with status 400.

use crate::errors::Error;
use axum::extract::{
    FromRequest, FromRequestParts,
    rejection::{JsonRejection, QueryRejection},
};

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

/// Query string
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct ApiQuery<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest {
            message: rejection.body_text(),
        }
    }
}

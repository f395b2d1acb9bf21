//! Action failures and their HTTP mapping

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use thiserror::Error;

use crate::http::{self, Format, NotAcceptable};
use crate::logger;
use crate::store::StoreError;
use crate::view::ViewError;

#[derive(Debug, Error)]
pub enum ActionError {
    /// A path id names no record, or the record is outside its parent
    #[error("Couldn't find {resource} with id={id}")]
    NotFound { resource: &'static str, id: String },

    #[error(transparent)]
    NotAcceptable(#[from] NotAcceptable),

    #[error(transparent)]
    Render(#[from] ViewError),
}

impl From<StoreError> for ActionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SynsetNotFound(id) => Self::NotFound {
                resource: "Synset",
                id: id.to_string(),
            },
            StoreError::DefinitionNotFound { id, .. } => Self::NotFound {
                resource: "Definition",
                id: id.to_string(),
            },
        }
    }
}

impl ActionError {
    /// Convert into the error response
    ///
    /// `format` is the negotiated format, if any, so 404 bodies match the request.
    pub fn into_response(self, format: Option<Format>) -> Response<Full<Bytes>> {
        match self {
            Self::NotFound { .. } => {
                logger::log_not_found(&self.to_string());
                http::build_404_response(format)
            }
            Self::NotAcceptable(ref err) => {
                logger::log_warning(&err.to_string());
                http::build_406_response()
            }
            Self::Render(ref err) => {
                logger::log_error(&format!("Failed to render definition: {err}"));
                http::build_500_response()
            }
        }
    }
}

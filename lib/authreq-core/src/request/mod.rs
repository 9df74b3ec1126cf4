//! Request preparation: the base request seam and its authenticated decorator.
//!
//! - [`PrepareRequest`] - what a base request must provide (method, URL, body)
//! - [`BaseRequest`] - a minimal implementation merging parameters into the URL or a form body
//! - [`AuthenticatedRequest`] - wraps any [`PrepareRequest`] and adds the access token to its URL
//!
//! Nothing here sends a request: [`PrepareRequest::build_request`] only assembles a
//! [`reqwest::Request`] for the caller to execute.

use headers::{ContentType, HeaderMapExt};
use http::Method;
use url::Url;

use crate::RequestError;

mod authenticated;
pub use self::authenticated::AuthenticatedRequest;

mod base;
pub use self::base::BaseRequest;

/// An encoded request body with its content type.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    /// Content type sent with the body.
    pub content_type: ContentType,
    /// Encoded bytes.
    pub data: Vec<u8>,
}

impl RequestBody {
    /// Form-encodes the given pairs as `application/x-www-form-urlencoded`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::QuerySerializationError`] if the pairs cannot be encoded.
    pub fn form<K, V>(pairs: &[(K, V)]) -> Result<Self, RequestError>
    where
        K: serde::Serialize,
        V: serde::Serialize,
    {
        let data = serde_urlencoded::to_string(pairs)?.into_bytes();
        Ok(Self {
            content_type: ContentType::form_url_encoded(),
            data,
        })
    }
}

/// A request that can produce its final URL, and optionally a body.
///
/// Implemented by [`BaseRequest`] and by [`AuthenticatedRequest`], which decorates
/// another implementation. Implement it to plug an existing request pipeline in.
pub trait PrepareRequest {
    /// HTTP method of the request.
    fn method(&self) -> &Method;

    /// Prepares the URL the request is sent to.
    ///
    /// # Errors
    ///
    /// Implementation specific; failures are returned unchanged by decorators.
    fn prepare_url(&self) -> Result<Url, RequestError>;

    /// Prepares the request body, if the request has one.
    ///
    /// # Errors
    ///
    /// Implementation specific.
    fn prepare_body(&self) -> Result<Option<RequestBody>, RequestError> {
        Ok(None)
    }

    /// Assembles a [`reqwest::Request`] from the prepared URL and body, without sending it.
    ///
    /// # Errors
    ///
    /// Returns any error from [`prepare_url`](Self::prepare_url) or
    /// [`prepare_body`](Self::prepare_body).
    fn build_request(&self) -> Result<reqwest::Request, RequestError> {
        let url = self.prepare_url()?;
        let mut request = reqwest::Request::new(self.method().clone(), url);

        if let Some(body) = self.prepare_body()? {
            request.headers_mut().typed_insert(body.content_type);
            *request.body_mut() = Some(reqwest::Body::from(body.data));
        }

        Ok(request)
    }
}

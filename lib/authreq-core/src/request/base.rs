use http::Method;
use indexmap::IndexMap;
use tracing::debug;
use url::Url;

use super::{PrepareRequest, RequestBody};
use crate::{Account, RequestError};

/// Methods whose parameters travel in the URL query rather than in a form body.
const QUERY_METHODS: [Method; 4] = [Method::GET, Method::HEAD, Method::DELETE, Method::OPTIONS];

/// An unauthenticated request: method, URL, parameters and the account it is made for.
///
/// Parameters are merged into the URL query for `GET`, `HEAD`, `DELETE` and
/// `OPTIONS`, and form-encoded into the body for every other method.
/// The account is carried along but never used to sign anything; see
/// [`AuthenticatedRequest`](super::AuthenticatedRequest) for that.
///
/// # Example
///
/// ```rust
/// use authreq_core::{BaseRequest, PrepareRequest};
/// use http::Method;
/// use url::Url;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let request = BaseRequest::new(Method::GET, Url::parse("https://api.example.com/items")?)
///     .with_parameter("page", "2");
///
/// assert_eq!(request.prepare_url()?.as_str(), "https://api.example.com/items?page=2");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BaseRequest {
    method: Method,
    url: Url,
    parameters: IndexMap<String, String>,
    account: Option<Account>,
}

impl BaseRequest {
    /// Creates a request without parameters or account.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            parameters: IndexMap::new(),
            account: None,
        }
    }

    /// Adds a parameter, replacing any previous value with the same name.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Adds all the given parameters.
    #[must_use]
    pub fn with_parameters<I, K, V>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.parameters.extend(
            parameters
                .into_iter()
                .map(|(name, value)| (name.into(), value.into())),
        );
        self
    }

    /// Sets the account the request is made for.
    #[must_use]
    pub fn with_account(mut self, account: impl Into<Option<Account>>) -> Self {
        self.account = account.into();
        self
    }

    /// The URL before any parameter is merged in.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The request parameters, in insertion order.
    pub fn parameters(&self) -> &IndexMap<String, String> {
        &self.parameters
    }

    /// The account the request is made for.
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    fn parameters_in_query(&self) -> bool {
        QUERY_METHODS.contains(&self.method)
    }
}

impl PrepareRequest for BaseRequest {
    fn method(&self) -> &Method {
        &self.method
    }

    fn prepare_url(&self) -> Result<Url, RequestError> {
        let mut url = self.url.clone();
        if self.parameters_in_query() && !self.parameters.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.parameters);
            debug!(method = %self.method, count = self.parameters.len(), "parameters merged into query");
        }
        Ok(url)
    }

    fn prepare_body(&self) -> Result<Option<RequestBody>, RequestError> {
        if self.parameters_in_query() || self.parameters.is_empty() {
            return Ok(None);
        }
        let pairs: Vec<_> = self.parameters.iter().collect();
        RequestBody::form(&pairs).map(Some)
    }
}

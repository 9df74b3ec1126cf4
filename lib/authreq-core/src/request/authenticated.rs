use http::Method;
use tracing::debug;
use url::Url;

use super::{BaseRequest, PrepareRequest, RequestBody};
use crate::inject::{DEFAULT_ACCESS_TOKEN_PARAMETER, authenticated_url, authorization_header};
use crate::{Account, AuthenticationError, RequestError};

/// A request whose final URL carries the account's access token.
///
/// The base request prepares its URL first (merging parameters and so on), then the
/// access token is appended as a query parameter named
/// [`access_token_parameter_name`](Self::access_token_parameter_name).
///
/// # Example
///
/// ```rust
/// use authreq_core::{Account, AuthenticatedRequest, PrepareRequest};
/// use http::Method;
/// use url::Url;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let account = Account::with_access_token("abc123");
/// let url = Url::parse("https://api.example.com/data")?;
///
/// let mut request = AuthenticatedRequest::new(Method::GET, url, [("x", "1")], Some(account));
/// assert_eq!(
///     request.prepare_url()?.as_str(),
///     "https://api.example.com/data?x=1&access_token=abc123"
/// );
///
/// // Some providers expect another parameter name
/// request.access_token_parameter_name = "oauth_token".to_string();
/// assert_eq!(
///     request.prepare_url()?.as_str(),
///     "https://api.example.com/data?x=1&oauth_token=abc123"
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedRequest<B = BaseRequest> {
    base: B,
    account: Option<Account>,
    /// Name of the query parameter carrying the token, `access_token` by default.
    pub access_token_parameter_name: String,
}

impl AuthenticatedRequest<BaseRequest> {
    /// Creates an authenticated request over a [`BaseRequest`].
    ///
    /// Method, URL, parameters and account are handed to the base request as-is;
    /// the account is also kept to inject its token.
    pub fn new<I, K, V>(
        method: Method,
        url: Url,
        parameters: I,
        account: impl Into<Option<Account>>,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let account = account.into();
        let base = BaseRequest::new(method, url)
            .with_parameters(parameters)
            .with_account(account.clone());
        Self::from_base(base, account)
    }
}

impl<B> AuthenticatedRequest<B> {
    /// Decorates an existing base request.
    pub fn from_base(base: B, account: impl Into<Option<Account>>) -> Self {
        Self {
            base,
            account: account.into(),
            access_token_parameter_name: DEFAULT_ACCESS_TOKEN_PARAMETER.to_string(),
        }
    }

    /// Sets the name of the query parameter carrying the token.
    #[must_use]
    pub fn with_access_token_parameter_name(mut self, name: impl Into<String>) -> Self {
        self.access_token_parameter_name = name.into();
        self
    }

    /// The decorated request.
    pub fn base(&self) -> &B {
        &self.base
    }

    /// The account whose token is injected.
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Returns the `Authorization` header value (`Bearer <token>`) for this request's account.
    ///
    /// # Errors
    ///
    /// Fails like [`authorization_header`].
    pub fn authorization_header(&self) -> Result<String, AuthenticationError> {
        authorization_header(self.account())
    }
}

impl<B: PrepareRequest> PrepareRequest for AuthenticatedRequest<B> {
    fn method(&self) -> &Method {
        self.base.method()
    }

    fn prepare_url(&self) -> Result<Url, RequestError> {
        let unauthenticated = self.base.prepare_url()?;
        debug!(method = %self.method(), "preparing authenticated URL");

        let url = authenticated_url(
            self.account(),
            Some(&unauthenticated),
            Some(self.access_token_parameter_name.as_str()),
        )?;
        Ok(url)
    }

    fn prepare_body(&self) -> Result<Option<RequestBody>, RequestError> {
        self.base.prepare_body()
    }
}

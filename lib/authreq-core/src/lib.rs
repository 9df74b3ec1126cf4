//! # Authreq Core
//!
//! Authenticate HTTP requests with a previously obtained OAuth2 access token.
//!
//! The token is taken from an account's `access_token` property and embedded either:
//! - as a URL query parameter, with [`authenticated_url`] (parameter name configurable,
//!   `access_token` by default), or
//! - as an `Authorization: Bearer <token>` header value, with [`authorization_header`].
//!
//! Both are pure functions. [`AuthenticatedRequest`] composes the URL variant with a
//! base request: the base request prepares its URL first, then the token is appended.
//!
//! Acquiring, refreshing and storing tokens, as well as sending the request, are left
//! to the caller. An absent account or a missing token fails immediately with an
//! [`AuthenticationError`].
//!
//! ## Quick Start
//!
//! ```rust
//! use authreq_core::{Account, authenticated_url, authorization_header};
//! use url::Url;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let account = Account::with_access_token("abc123");
//!
//! let url = Url::parse("https://api.example.com/data?x=1")?;
//! let url = authenticated_url(Some(&account), Some(&url), Some("oauth_token"))?;
//! assert_eq!(url.as_str(), "https://api.example.com/data?x=1&oauth_token=abc123");
//!
//! let header = authorization_header(Some(&account))?;
//! assert_eq!(header, "Bearer abc123");
//! # Ok(())
//! # }
//! ```
//!
//! ## Authenticated requests
//!
//! ```rust
//! use authreq_core::{Account, AuthenticatedRequest, PrepareRequest};
//! use http::Method;
//! use url::Url;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let account = Account::with_access_token("abc123");
//! let request = AuthenticatedRequest::new(
//!     Method::GET,
//!     Url::parse("https://api.example.com/items")?,
//!     [("page", "2")],
//!     account,
//! );
//!
//! // Assembled, not sent
//! let request = request.build_request()?;
//! assert_eq!(
//!     request.url().as_str(),
//!     "https://api.example.com/items?page=2&access_token=abc123"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Credentials
//!
//! Any type implementing [`Credential`] can provide the token: [`Account`], but also
//! `HashMap<String, String>`, `BTreeMap<String, String>` or `IndexMap<String, String>`.
//! [`Account::from_token_response`] builds an account from a token endpoint response.

mod credential;
pub use self::credential::{ACCESS_TOKEN_PROPERTY, Account, Credential, Secret};

mod error;
pub use self::error::{AuthenticationError, RequestError};

pub mod inject;
pub use self::inject::{
    DEFAULT_ACCESS_TOKEN_PARAMETER, authenticated_url, authorization_header,
    authorization_header_value,
};

mod request;
pub use self::request::{AuthenticatedRequest, BaseRequest, PrepareRequest, RequestBody};

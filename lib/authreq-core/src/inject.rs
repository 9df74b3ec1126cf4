//! Embedding a bearer access token into a URL or an `Authorization` header.
//!
//! Both operations are pure: they only read the credential and the URL, and
//! always return fresh values.
//!
//! # Known edge case
//!
//! Whether a URL already has a query is decided by looking for a literal `?`
//! anywhere in its textual form. A URL whose fragment contains a `?`
//! (`https://host/path#section?x`) is treated as having a query, and the token
//! parameter lands after the `#`. This matches what providers have been
//! relying on and is only reported with a warning.

use http::HeaderValue;
use http::header::{AUTHORIZATION, HeaderName};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tracing::{debug, warn};
use url::Url;

use crate::AuthenticationError;
use crate::credential::{ACCESS_TOKEN_PROPERTY, Credential};

/// Query parameter name used when none is configured.
pub const DEFAULT_ACCESS_TOKEN_PARAMETER: &str = "access_token";

/// Bytes that `Url::parse` would percent-encode or strip in a query or fragment.
const REWRITTEN_BY_URL_PARSER: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'\'')
    .add(b'`');

/// Returns a copy of `unauthenticated_url` carrying the account's access token
/// as a query parameter.
///
/// The parameter is appended as `?<name>=<token>`, or `&<name>=<token>` when the
/// URL text already contains a `?`. `parameter_name` defaults to
/// [`DEFAULT_ACCESS_TOKEN_PARAMETER`]. The token is inserted verbatim: no
/// percent-encoding is applied, and existing parameters with the same name are
/// left in place.
///
/// # Errors
///
/// Checked in this order:
/// - [`AuthenticationError::InvalidArgument`] if `credential` is `None` (`account`)
/// - [`AuthenticationError::InvalidCredential`] if it has no `access_token` property
/// - [`AuthenticationError::InvalidArgument`] if `unauthenticated_url` is `None`
/// - [`AuthenticationError::InvalidParameterName`] or
///   [`AuthenticationError::InvalidAccessToken`] if the name or the token contains
///   bytes the URL parser would rewrite
///
/// # Examples
///
/// ```rust
/// use authreq_core::{Account, authenticated_url};
/// use url::Url;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let account = Account::with_access_token("abc123");
///
/// let url = Url::parse("https://api.example.com/data")?;
/// let url = authenticated_url(Some(&account), Some(&url), None)?;
/// assert_eq!(url.as_str(), "https://api.example.com/data?access_token=abc123");
///
/// let url = Url::parse("https://api.example.com/data?x=1")?;
/// let url = authenticated_url(Some(&account), Some(&url), Some("oauth_token"))?;
/// assert_eq!(url.as_str(), "https://api.example.com/data?x=1&oauth_token=abc123");
/// # Ok(())
/// # }
/// ```
pub fn authenticated_url<C>(
    credential: Option<&C>,
    unauthenticated_url: Option<&Url>,
    parameter_name: Option<&str>,
) -> Result<Url, AuthenticationError>
where
    C: Credential + ?Sized,
{
    let token = access_token(credential)?;
    let url = unauthenticated_url.ok_or(AuthenticationError::InvalidArgument {
        name: "unauthenticated_url",
    })?;
    let parameter_name = parameter_name.unwrap_or(DEFAULT_ACCESS_TOKEN_PARAMETER);

    check_parameter_name(parameter_name)?;
    if rewritten_by_url_parser(token) {
        return Err(AuthenticationError::InvalidAccessToken {
            message: "contains characters that would be percent-encoded in a URL".to_string(),
        });
    }

    let text = url.as_str();
    if url.fragment().is_some() {
        warn!(
            parameter = parameter_name,
            "URL has a fragment, the access token is appended after it"
        );
    }
    let separator = if text.contains('?') { '&' } else { '?' };
    let authenticated = format!("{text}{separator}{parameter_name}={token}");

    debug!(
        host = url.host_str(),
        path = url.path(),
        parameter = parameter_name,
        "access token added to URL"
    );
    let result = Url::parse(&authenticated)?;
    Ok(result)
}

/// Returns the `Authorization` header value for the account: `Bearer <token>`.
///
/// # Errors
///
/// - [`AuthenticationError::InvalidArgument`] if `credential` is `None`
/// - [`AuthenticationError::InvalidCredential`] if it has no `access_token` property
///
/// # Examples
///
/// ```rust
/// use authreq_core::{Account, authorization_header};
///
/// let account = Account::with_access_token("abc123");
/// assert_eq!(authorization_header(Some(&account)).as_deref(), Ok("Bearer abc123"));
/// ```
pub fn authorization_header<C>(credential: Option<&C>) -> Result<String, AuthenticationError>
where
    C: Credential + ?Sized,
{
    let token = access_token(credential)?;
    Ok(format!("Bearer {token}"))
}

/// Returns the typed `Authorization` header for the account, ready to insert in a
/// header map.
///
/// The value is flagged as sensitive so that HTTP stacks skip it when logging.
///
/// # Errors
///
/// Same as [`authorization_header`], plus [`AuthenticationError::InvalidAccessToken`]
/// when the token contains bytes that are not allowed in a header value.
pub fn authorization_header_value<C>(
    credential: Option<&C>,
) -> Result<(HeaderName, HeaderValue), AuthenticationError>
where
    C: Credential + ?Sized,
{
    let header = authorization_header(credential)?;
    let mut value = HeaderValue::from_str(&header).map_err(|err| {
        AuthenticationError::InvalidAccessToken {
            message: err.to_string(),
        }
    })?;
    value.set_sensitive(true);

    debug!(header = %AUTHORIZATION, "bearer header prepared");
    Ok((AUTHORIZATION, value))
}

fn access_token<C>(credential: Option<&C>) -> Result<&str, AuthenticationError>
where
    C: Credential + ?Sized,
{
    let credential = credential.ok_or(AuthenticationError::InvalidArgument { name: "account" })?;
    credential
        .property(ACCESS_TOKEN_PROPERTY)
        .ok_or(AuthenticationError::InvalidCredential {
            property: ACCESS_TOKEN_PROPERTY,
        })
}

fn check_parameter_name(name: &str) -> Result<(), AuthenticationError> {
    let invalid = |message: &str| AuthenticationError::InvalidParameterName {
        name: name.to_string(),
        message: message.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if rewritten_by_url_parser(name) {
        return Err(invalid("contains characters that would be percent-encoded"));
    }
    Ok(())
}

// The first chunk is the whole input only when nothing gets encoded
fn rewritten_by_url_parser(value: &str) -> bool {
    utf8_percent_encode(value, REWRITTEN_BY_URL_PARSER)
        .next()
        .is_some_and(|first| first != value)
}

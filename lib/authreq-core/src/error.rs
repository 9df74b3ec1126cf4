/// Errors raised while embedding an access token into a request.
///
/// Every variant describes a precondition that failed before any output was produced:
/// no partial URL or header is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum AuthenticationError {
    /// A required input was absent.
    ///
    /// For the account this means the request was never authenticated.
    #[display("Missing required argument '{name}'")]
    #[from(skip)]
    InvalidArgument {
        /// Name of the missing argument (`account` or `unauthenticated_url`).
        name: &'static str,
    },

    /// The account exists but does not carry the property holding the token.
    #[display("Account is missing required property '{property}'")]
    #[from(skip)]
    InvalidCredential {
        /// Name of the missing property.
        property: &'static str,
    },

    /// The access token cannot be embedded verbatim.
    #[display("Access token cannot be embedded: {message}")]
    #[from(skip)]
    InvalidAccessToken {
        /// Description of the offending content, never the token itself.
        message: String,
    },

    /// The access-token query parameter name is unusable.
    #[display("Invalid access token parameter name '{name}': {message}")]
    #[from(skip)]
    InvalidParameterName {
        /// The rejected parameter name.
        name: String,
        /// Why the name was rejected.
        message: String,
    },

    /// A token endpoint response could not be read as an account.
    #[display("Invalid token response: {message}")]
    #[from(skip)]
    InvalidTokenResponse {
        /// Description of the unexpected shape.
        message: String,
    },

    /// The authenticated URL could not be parsed back.
    UrlError(url::ParseError),
}

impl AuthenticationError {
    /// Returns `true` when the failure means no account was supplied at all.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::InvalidArgument { name } if *name == "account")
    }
}

/// Errors that can occur while preparing a request.
///
/// Failures of the authentication step are wrapped unchanged in
/// [`RequestError::Authentication`].
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum RequestError {
    /// The access token could not be embedded.
    Authentication(AuthenticationError),

    /// URL parsing error while preparing the request URL.
    UrlError(url::ParseError),

    /// Form parameters could not be encoded.
    QuerySerializationError(serde_urlencoded::ser::Error),

    /// Failure reported by a base request implementation outside this crate.
    #[display("Base request failed: {message}")]
    #[from(skip)]
    Custom {
        /// Description of the failure.
        message: String,
    },
}

impl RequestError {
    /// Wraps an opaque failure of a base request implementation.
    pub fn custom(message: impl std::fmt::Display) -> Self {
        Self::Custom {
            message: message.to_string(),
        }
    }
}

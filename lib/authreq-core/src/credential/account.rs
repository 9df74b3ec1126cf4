use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ACCESS_TOKEN_PROPERTY, Credential, Secret};
use crate::AuthenticationError;

/// An authenticated account: the string properties returned by an OAuth2 flow.
///
/// Properties keep their insertion order and their values are held as [`Secret`]s.
/// The account serializes as a flat JSON object of strings.
///
/// # Examples
///
/// ```rust
/// use authreq_core::{Account, Credential};
///
/// let account = Account::with_access_token("abc123")
///     .with_property("token_type", "bearer");
///
/// assert_eq!(account.access_token(), Some("abc123"));
/// assert!(account.has_property("token_type"));
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Account {
    properties: IndexMap<String, Secret>,
}

impl Account {
    /// Creates an account with no properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an account holding only an access token.
    pub fn with_access_token(token: impl Into<Secret>) -> Self {
        Self::new().with_property(ACCESS_TOKEN_PROPERTY, token)
    }

    /// Sets a property, replacing any previous value.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Secret>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a property and returns the previous value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Secret>) -> Option<Secret> {
        self.properties.insert(name.into(), value.into())
    }

    /// Removes a property and returns its value, if any.
    pub fn remove(&mut self, name: &str) -> Option<Secret> {
        self.properties.shift_remove(name)
    }

    /// Returns the bearer token, if the account carries one.
    pub fn access_token(&self) -> Option<&str> {
        self.property(ACCESS_TOKEN_PROPERTY)
    }

    /// Iterates over the property names in insertion order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties.keys().map(String::as_str)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Checks whether the account has no property at all.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Builds an account from a token endpoint response.
    ///
    /// The response is serialized to JSON first, so any serializable token response
    /// works, e.g. `oauth2::basic::BasicTokenResponse` or a raw `serde_json::Value`.
    /// Values are converted as described on the `TryFrom<serde_json::Value>` implementation.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError::InvalidTokenResponse`] if the response does not
    /// serialize to a JSON object.
    pub fn from_token_response<T: Serialize>(response: &T) -> Result<Self, AuthenticationError> {
        let value = serde_json::to_value(response).map_err(|err| {
            AuthenticationError::InvalidTokenResponse {
                message: err.to_string(),
            }
        })?;
        Self::try_from(value)
    }
}

/// Converts a token endpoint response (RFC 6749 §5.1) into an account.
///
/// - strings are kept as-is
/// - numbers and booleans are stringified (`expires_in: 3600` becomes `"3600"`)
/// - `null` values are skipped
/// - arrays are joined with a space, as scope lists are
/// - nested objects are kept as compact JSON
impl TryFrom<Value> for Account {
    type Error = AuthenticationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(AuthenticationError::InvalidTokenResponse {
                    message: format!("expected a JSON object, got {}", json_kind(&other)),
                });
            }
        };

        let mut account = Self::new();
        for (name, value) in fields {
            if let Some(value) = property_value(value) {
                account.insert(name, value);
            }
        }
        Ok(account)
    }
}

fn property_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Array(items) => {
            let items: Vec<_> = items.into_iter().filter_map(property_value).collect();
            Some(items.join(" "))
        }
        object @ Value::Object(_) => Some(object.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Credential for Account {
    fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(Secret::expose)
    }
}

impl<K, V> FromIterator<(K, V)> for Account
where
    K: Into<String>,
    V: Into<Secret>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let properties = iter
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        Self { properties }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use oauth2::basic::{BasicTokenResponse, BasicTokenType};
    use oauth2::{AccessToken, EmptyExtraTokenFields, RefreshToken, StandardTokenResponse};
    use serde_json::json;

    use super::*;

    #[test]
    fn should_build_account_with_properties() {
        let account = Account::with_access_token("abc123").with_property("token_type", "bearer");

        assert_eq!(account.access_token(), Some("abc123"));
        assert_eq!(account.property("token_type"), Some("bearer"));
        assert_eq!(account.len(), 2);
        assert_eq!(
            account.property_names().collect::<Vec<_>>(),
            ["access_token", "token_type"]
        );
    }

    #[test]
    fn should_replace_and_remove_properties() {
        let mut account = Account::with_access_token("old");

        let previous = account.insert("access_token", "new");
        assert_eq!(previous.as_ref().map(Secret::expose), Some("old"));
        assert_eq!(account.access_token(), Some("new"));

        let removed = account.remove("access_token");
        assert_eq!(removed.as_ref().map(Secret::expose), Some("new"));
        assert!(account.is_empty());
        assert!(!account.has_property("access_token"));
    }

    #[test]
    fn should_not_leak_values_in_debug() {
        let account = Account::with_access_token("abc123-very-secret");
        let debug = format!("{account:?}");

        insta::assert_snapshot!(debug, @r#"Account { properties: ["access_token"], .. }"#);
    }

    #[test]
    fn should_round_trip_through_json() {
        let account: Account = [("access_token", "abc123"), ("scope", "read")]
            .into_iter()
            .collect();

        let json = serde_json::to_string(&account).expect("serialize account");
        insta::assert_snapshot!(json, @r#"{"access_token":"abc123","scope":"read"}"#);

        let back: Account = serde_json::from_str(&json).expect("deserialize account");
        assert_eq!(back, account);
    }

    #[test]
    fn should_convert_token_response_json() {
        let response = json!({
            "access_token": "abc123",
            "token_type": "Bearer",
            "expires_in": 3600,
            "refresh_token": null,
            "scope": ["read", "write"],
            "id_token_claims": { "sub": "42" },
            "mfa": true,
        });

        let account = Account::try_from(response).expect("object response");

        assert_eq!(account.access_token(), Some("abc123"));
        assert_eq!(account.property("expires_in"), Some("3600"));
        assert_eq!(account.property("scope"), Some("read write"));
        assert_eq!(account.property("id_token_claims"), Some(r#"{"sub":"42"}"#));
        assert_eq!(account.property("mfa"), Some("true"));
        assert!(!account.has_property("refresh_token"));
    }

    #[test]
    fn should_reject_non_object_token_response() {
        let error = Account::try_from(json!("abc123")).expect_err("string is not an account");

        insta::assert_snapshot!(error, @"Invalid token response: expected a JSON object, got a string");
    }

    #[test]
    fn should_convert_oauth2_token_response() {
        let mut response: BasicTokenResponse = StandardTokenResponse::new(
            AccessToken::new("abc123".to_string()),
            BasicTokenType::Bearer,
            EmptyExtraTokenFields {},
        );
        response.set_refresh_token(Some(RefreshToken::new("refresh-me".to_string())));

        let account = Account::from_token_response(&response).expect("token response");

        assert_eq!(account.access_token(), Some("abc123"));
        assert!(
            account
                .property("token_type")
                .is_some_and(|token_type| token_type.eq_ignore_ascii_case("bearer"))
        );
        assert_eq!(account.property("refresh_token"), Some("refresh-me"));
    }
}

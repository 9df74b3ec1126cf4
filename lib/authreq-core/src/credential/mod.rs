//! Read access to the properties of an authenticated account.
//!
//! The token injector only needs two capabilities from a credential: a presence
//! check and an indexed read. They are expressed by the [`Credential`] trait so
//! that any property store can be used, from the bundled [`Account`] to a plain
//! `HashMap<String, String>`.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;

mod account;
pub use self::account::Account;

mod secret;
pub use self::secret::Secret;

/// Name of the property holding the bearer token.
pub const ACCESS_TOKEN_PROPERTY: &str = "access_token";

/// Property-mapping view of an authenticated account.
///
/// Implementations are only ever read.
pub trait Credential {
    /// Returns the value of the named property, if present.
    fn property(&self, name: &str) -> Option<&str>;

    /// Checks whether the named property is present.
    fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }
}

impl<T: Credential + ?Sized> Credential for &T {
    fn property(&self, name: &str) -> Option<&str> {
        (**self).property(name)
    }

    fn has_property(&self, name: &str) -> bool {
        (**self).has_property(name)
    }
}

impl<S: BuildHasher> Credential for HashMap<String, String, S> {
    fn property(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Credential for BTreeMap<String, String> {
    fn property(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<S: BuildHasher> Credential for IndexMap<String, String, S> {
    fn property(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

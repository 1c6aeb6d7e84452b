//! Wrapper types for DID URLs according to the [DID Spec](https://www.w3.org/TR/did-core/#did-syntax)

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::parse_did_url;
use crate::error::DidError;

/// A DID URL, based on the did specification, [DID URL Syntax](https://www.w3.org/TR/did-core/#did-url-syntax)
///
/// The path, query and fragment components are stored as the raw substrings
/// from the input, so a parsed DID URL re-serializes to exactly the string it
/// was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DidUrl {
    pub did: Did,
    pub path: Option<String>,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

/// The `did` part of a DID URL: `scheme:method:method-specific-id`
///
/// The scheme is the constant `did` in practice, but it is carried as data so
/// a registry may key resolvers under other prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Did {
    pub scheme: String,
    pub method: String,
    pub id: String,
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.scheme, self.method, self.id)
    }
}

impl DidUrl {
    /// Parses a Decentralized Identifier (DID) URL string.
    ///
    /// At a minimum the input must carry a scheme, a method and a
    /// method-specific id; path, query and fragment are optional.
    ///
    /// # Examples
    /// ```
    /// use lib_didresolver::types::DidUrl;
    ///
    /// let did_url = DidUrl::parse("did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK").unwrap();
    /// assert_eq!(did_url.method(), "key");
    /// ```
    ///
    /// # Errors
    /// Returns a [`DidError`] if the input does not match the DID URL grammar.
    pub fn parse<S: AsRef<str>>(input: S) -> Result<Self, DidError> {
        parse_did_url(input.as_ref()).map_err(DidError::Parse)
    }

    /// The scheme prefix of this DID URL (`did` for the identifiers this
    /// library resolves)
    pub fn scheme(&self) -> &str {
        &self.did.scheme
    }

    /// The method of this DID URL, which selects the resolution strategy
    ///
    /// # Examples
    /// ```
    /// use lib_didresolver::types::DidUrl;
    ///
    /// let did_url = DidUrl::parse("did:example:123#key-1").unwrap();
    /// assert_eq!(did_url.method(), "example");
    /// ```
    pub fn method(&self) -> &str {
        &self.did.method
    }

    /// The opaque method-specific id of this DID URL
    pub fn id(&self) -> &str {
        &self.did.id
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// The raw query component, exactly as it appeared in the input
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Splits the raw query component into key/value pairs on demand
    ///
    /// # Examples
    /// ```
    /// use lib_didresolver::types::DidUrl;
    ///
    /// let did_url = DidUrl::parse("did:example:123?versionId=1&service=agent").unwrap();
    /// assert_eq!(
    ///     did_url.query_pairs(),
    ///     vec![
    ///         ("versionId".to_string(), "1".to_string()),
    ///         ("service".to_string(), "agent".to_string())
    ///     ]
    /// );
    /// ```
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .unwrap_or("")
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect()
    }

    /// Returns this DID URL's fragment identifier, if any.
    ///
    /// In a DID URL, a fragment references a component within the resolved
    /// document, such as a particular verification method or service endpoint.
    ///
    /// # Examples
    /// ```
    /// use lib_didresolver::types::DidUrl;
    ///
    /// let did_url = DidUrl::parse("did:example:123#delegate-0").unwrap();
    /// assert_eq!(did_url.fragment(), Some("delegate-0"));
    /// ```
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Immutable copy constructor to set or clear the fragment
    ///
    /// # Examples
    /// ```rust
    /// use lib_didresolver::types::DidUrl;
    /// let did_url = DidUrl::parse("did:example:123").unwrap();
    /// let did_url = did_url.with_fragment(Some("controller"));
    /// assert_eq!(did_url.fragment(), Some("controller"));
    /// ```
    pub fn with_fragment(&self, fragment: Option<&str>) -> Self {
        let mut minion = self.clone();
        minion.fragment = fragment.map(str::to_string);
        minion
    }

    /// Immutable copy constructor to set or clear the path
    pub fn with_path(&self, path: Option<&str>) -> Self {
        let mut minion = self.clone();
        minion.path = path.map(str::to_string);
        minion
    }
}

impl From<Did> for DidUrl {
    fn from(did: Did) -> Self {
        Self {
            did,
            path: None,
            query: None,
            fragment: None,
        }
    }
}

impl fmt::Display for DidUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.did)?;
        if let Some(path) = &self.path {
            write!(f, "{}", path)?;
        }
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

impl Serialize for DidUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DidUrl {
    fn deserialize<D>(deserializer: D) -> Result<DidUrl, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DidUrl::parse(s).map_err(serde::de::Error::custom)
    }
}

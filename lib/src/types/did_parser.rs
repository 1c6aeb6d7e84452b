//! Parsing Expression Grammar (PEG) rules for the generic
//! [DID URL syntax](https://www.w3.org/TR/did-core/#did-url-syntax)

use crate::types::{Did, DidUrl};

pub use did_url_parser::did as parse_did;
pub use did_url_parser::did_url as parse_did_url;

peg::parser! {
    grammar did_url_parser() for str {
        /// parses a full [DID-URL](https://www.w3.org/TR/did-core/#did-url-syntax):
        /// `scheme:method:method-specific-id[/path][?query][#fragment]`
        ///
        /// The path, query and fragment components are kept as the raw
        /// substrings so the parsed value re-serializes byte for byte.
        pub rule did_url() -> DidUrl
            = did:did() path:path()? query:query()? fragment:fragment()? {
                DidUrl { did, path, query, fragment }
            }

        /// parses the `did` part of a [DID-URL](https://www.w3.org/TR/did-core/#did-syntax)
        ///
        /// # Example
        /// ```rust
        /// use lib_didresolver::types::{parse_did, Did};
        /// let parsed = parse_did("did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK").unwrap();
        /// assert_eq!(parsed.scheme, "did");
        /// assert_eq!(parsed.method, "key");
        /// assert_eq!(parsed.id, "z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK");
        /// ```
        pub rule did() -> Did
            = scheme:scheme() ":" method:method() ":" id:method_specific_id() {
                Did { scheme, method, id }
            }

        rule scheme() -> String
            = s:$(['a'..='z']+) { s.to_string() }
            / expected!("a lowercase-alpha scheme")

        rule method() -> String
            = m:$(['a'..='z' | '0'..='9']+) { m.to_string() }
            / expected!("a method name of lowercase letters and digits")

        // method-specific-id = *( *idchar ":" ) 1*idchar
        rule method_specific_id() -> String
            = id:$((idchar()* ":")* idchar()+) { id.to_string() }
            / expected!("a method-specific id")

        rule idchar()
            = ['a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_'] / pct_encoded()

        rule pct_encoded()
            = "%" hex_digit() hex_digit()

        rule hex_digit()
            = ['0'..='9' | 'a'..='f' | 'A'..='F']

        // path-abempty from RFC 3986
        rule path() -> String
            = p:$(("/" pchar()*)+) { p.to_string() }

        rule pchar()
            = unreserved() / pct_encoded() / sub_delims() / [':' | '@']

        rule unreserved()
            = ['a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '.' | '_' | '~']

        rule sub_delims()
            = ['!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=']

        rule query() -> String
            = "?" q:$((pchar() / ['/' | '?'])*) { q.to_string() }

        rule fragment() -> String
            = "#" f:$((pchar() / ['/' | '?'])*) { f.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_did_parser() {
        let parsed = parse_did("did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK").unwrap();
        assert_eq!(
            parsed,
            Did {
                scheme: "did".to_string(),
                method: "key".to_string(),
                id: "z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK".to_string(),
            }
        );

        // colons are allowed inside the method-specific id
        let parsed = parse_did("did:web:example.com:user:alice").unwrap();
        assert_eq!(parsed.method, "web");
        assert_eq!(parsed.id, "example.com:user:alice");
    }

    #[test]
    fn test_missing_method_fails() {
        assert!(parse_did_url("did:").is_err());
        assert!(parse_did_url("did").is_err());
        assert!(parse_did_url("did:key:").is_err());
        assert!(parse_did_url("").is_err());
    }

    #[test]
    fn test_id_must_end_with_idchar() {
        assert!(parse_did("did:web:example.com:").is_err());
    }

    #[test]
    fn test_url_components() {
        let parsed =
            parse_did_url("did:example:123/some/path?service=agent&versionId=1#key-1").unwrap();
        assert_eq!(parsed.path.as_deref(), Some("/some/path"));
        assert_eq!(parsed.query.as_deref(), Some("service=agent&versionId=1"));
        assert_eq!(parsed.fragment.as_deref(), Some("key-1"));
    }

    #[test]
    fn test_percent_encoded_id() {
        let parsed = parse_did("did:example:alice%20smith").unwrap();
        assert_eq!(parsed.id, "alice%20smith");

        // a stray percent sign is not a valid idchar
        assert!(parse_did("did:example:alice%2").is_err());
    }
}

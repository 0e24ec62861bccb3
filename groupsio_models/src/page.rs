use serde::{
    de::{Deserializer, Error as DeError, Visitor},
    Deserialize, Serialize, Serializer,
};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// One fetch's worth of a paginated list plus its continuation metadata.
///
/// `next_page_token` is meaningful only while `has_more` is true.
#[derive(Clone, Debug, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page_token: Option<PageToken>,
}

/// Server-issued continuation cursor.
///
/// The server emits it as either a JSON number or a string; it is stored
/// and forwarded verbatim, never interpreted.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PageToken(String);

impl PageToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PageToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for PageToken {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for PageToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct TokenVisitor;

impl Visitor<'_> for TokenVisitor {
    type Value = PageToken;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        f.write_str("a continuation token")
    }

    fn visit_u64<E: DeError>(self, v: u64) -> Result<Self::Value, E> {
        Ok(PageToken(v.to_string()))
    }

    fn visit_i64<E: DeError>(self, v: i64) -> Result<Self::Value, E> {
        Ok(PageToken(v.to_string()))
    }

    fn visit_str<E: DeError>(self, v: &str) -> Result<Self::Value, E> {
        Ok(PageToken(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for PageToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TokenVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
    }

    #[test]
    fn page_with_numeric_token() {
        let page = serde_json::from_str::<Page<Item>>(
            r#"{"data": [{"name": "a"}], "has_more": true, "next_page_token": 20}"#,
        )
        .unwrap();
        assert!(page.has_more);
        assert_eq!(page.next_page_token, Some(PageToken::from(20_u64)));
        assert_eq!(page.next_page_token.unwrap().as_str(), "20");
    }

    #[test]
    fn page_with_string_token() {
        let page = serde_json::from_str::<Page<Item>>(
            r#"{"data": [], "has_more": true, "next_page_token": "opaque-cursor"}"#,
        )
        .unwrap();
        assert_eq!(page.next_page_token, Some(PageToken::from("opaque-cursor")));
    }

    #[test]
    fn last_page_omits_token() {
        let page =
            serde_json::from_str::<Page<Item>>(r#"{"data": [{"name": "z"}]}"#).unwrap();
        assert!(!page.has_more);
        assert_eq!(page.next_page_token, None);
        assert_eq!(page.data.len(), 1);
    }

    #[test]
    fn token_forwarded_verbatim() {
        let token = PageToken::from("AbC=123");
        assert_eq!(token.to_string(), "AbC=123");
    }
}

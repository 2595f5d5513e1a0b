//! Match tokens.
//!
//! A group is a list of tokens. On disk every token is a plain string; in
//! memory it is tagged so id and name comparisons cannot be confused.

use crate::item::{BankItem, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The literal that matches every item.
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatchToken {
    Wildcard,
    ById(ItemId),
    /// Display name as written by the user (trimmed, original casing).
    ByName(String),
}

impl MatchToken {
    /// Classify a raw token. Only the canonical decimal form of an id becomes
    /// `ById`; `"007"` or `"+7"` stay names because they never equal an id's
    /// decimal string.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed == WILDCARD {
            return Self::Wildcard;
        }
        match trimmed.parse::<ItemId>() {
            Ok(id) if id.to_string() == trimmed => Self::ById(id),
            _ => Self::ByName(trimmed.to_string()),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// True if this token names the item, by id or by display name.
    /// The wildcard names nothing in particular and returns false.
    pub fn refers_to(&self, item: &BankItem) -> bool {
        match self {
            Self::Wildcard => false,
            Self::ById(id) => *id == item.id || names_equal(&id.to_string(), &item.display_name),
            Self::ByName(name) => names_equal(name, &item.display_name),
        }
    }

    /// True if the token is exactly the id form of `id`.
    pub fn is_id(&self, id: ItemId) -> bool {
        matches!(self, Self::ById(own) if *own == id)
    }
}

fn names_equal(token: &str, display_name: &str) -> bool {
    token.trim().to_lowercase() == display_name.trim().to_lowercase()
}

impl From<String> for MatchToken {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for MatchToken {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<MatchToken> for String {
    fn from(token: MatchToken) -> Self {
        token.to_string()
    }
}

impl fmt::Display for MatchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str(WILDCARD),
            Self::ById(id) => write!(f, "{}", id),
            Self::ByName(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> BankItem {
        BankItem::new(512, "Apple")
    }

    #[test]
    fn test_parse_classifies_tokens() {
        assert_eq!(MatchToken::parse("*"), MatchToken::Wildcard);
        assert_eq!(MatchToken::parse(" * "), MatchToken::Wildcard);
        assert_eq!(MatchToken::parse("512"), MatchToken::ById(512));
        assert_eq!(MatchToken::parse(" 512 "), MatchToken::ById(512));
        assert_eq!(MatchToken::parse("Bread"), MatchToken::ByName("Bread".to_string()));
        assert_eq!(MatchToken::parse("0512"), MatchToken::ByName("0512".to_string()));
        assert_eq!(MatchToken::parse("-3"), MatchToken::ByName("-3".to_string()));
    }

    #[test]
    fn test_names_compare_case_insensitively() {
        assert!(MatchToken::parse("apple").refers_to(&apple()));
        assert!(MatchToken::parse("  APPLE ").refers_to(&apple()));
        assert!(!MatchToken::parse("apples").refers_to(&apple()));
    }

    #[test]
    fn test_ids_compare_exactly() {
        assert!(MatchToken::parse("512").refers_to(&apple()));
        assert!(!MatchToken::parse("51").refers_to(&apple()));
        assert!(!MatchToken::parse("0512").refers_to(&apple()));
    }

    #[test]
    fn test_numeric_display_name_matches_id_token() {
        let odd = BankItem::new(9, "512");
        assert!(MatchToken::parse("512").refers_to(&odd));
    }

    #[test]
    fn test_wildcard_refers_to_nothing() {
        assert!(!MatchToken::Wildcard.refers_to(&apple()));
    }

    #[test]
    fn test_serializes_as_plain_strings() {
        let tokens = vec![
            MatchToken::Wildcard,
            MatchToken::ById(512),
            MatchToken::ByName("Bread".to_string()),
        ];
        let json = serde_json::to_string(&tokens).unwrap();
        assert_eq!(json, r#"["*","512","Bread"]"#);

        let back: Vec<MatchToken> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tokens);
    }

    #[test]
    fn test_non_string_token_is_rejected() {
        let result: Result<Vec<MatchToken>, _> = serde_json::from_str("[512]");
        assert!(result.is_err());
    }
}

//! Group membership tests.
//!
//! Provides the `ItemMatcher` trait and the matchers the filter engine uses
//! to decide whether a bank item belongs to a group.

use crate::item::BankItem;
use crate::token::MatchToken;

/// Trait for deciding whether a bank item belongs to some set.
pub trait ItemMatcher {
    /// Returns true if the item is a member.
    fn matches(&self, item: &BankItem) -> bool;
}

/// Membership in a single group's token list.
///
/// Matches when the list holds the wildcard, the item's id, or the item's
/// display name (case-insensitive). An empty list matches nothing.
#[derive(Debug, Clone, Copy)]
pub struct GroupQuery<'a> {
    tokens: &'a [MatchToken],
}

impl<'a> GroupQuery<'a> {
    pub fn new(tokens: &'a [MatchToken]) -> Self {
        Self { tokens }
    }

    /// A list holding `*` is a pure wildcard; any other tokens in it are redundant.
    pub fn is_wildcard(&self) -> bool {
        self.tokens.iter().any(MatchToken::is_wildcard)
    }

    /// Match only on explicit id/name tokens, ignoring a wildcard.
    ///
    /// This is how another group "claims" an item away from the catch-all view.
    pub fn claims(&self, item: &BankItem) -> bool {
        self.tokens.iter().any(|token| token.refers_to(item))
    }
}

impl ItemMatcher for GroupQuery<'_> {
    fn matches(&self, item: &BankItem) -> bool {
        self.is_wildcard() || self.claims(item)
    }
}

/// Pure membership test of `item` against `tokens`.
pub fn matches(tokens: &[MatchToken], item: &BankItem) -> bool {
    GroupQuery::new(tokens).matches(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<MatchToken> {
        raw.iter().map(|t| MatchToken::parse(t)).collect()
    }

    #[test]
    fn test_empty_list_matches_nothing() {
        let item = BankItem::new(1, "Logs");
        assert!(!matches(&[], &item));
    }

    #[test]
    fn test_wildcard_matches_everything() {
        let list = tokens(&["*"]);
        assert!(matches(&list, &BankItem::new(1, "Logs")));
        assert!(matches(&list, &BankItem::new(2, "Item 2")));
    }

    #[test]
    fn test_matches_by_id_or_name() {
        let list = tokens(&["bread", "512"]);
        assert!(matches(&list, &BankItem::new(512, "Apple")));
        assert!(matches(&list, &BankItem::new(3, "Bread")));
        assert!(matches(&list, &BankItem::new(3, " BREAD ")));
        assert!(!matches(&list, &BankItem::new(4, "Cheese")));
    }

    #[test]
    fn test_claims_ignores_wildcard() {
        let list = tokens(&["*", "Bread"]);
        let query = GroupQuery::new(&list);
        assert!(query.is_wildcard());
        assert!(query.claims(&BankItem::new(3, "bread")));
        assert!(!query.claims(&BankItem::new(4, "Cheese")));
        assert!(query.matches(&BankItem::new(4, "Cheese")));
    }

    #[test]
    fn test_matches_is_pure() {
        let list = tokens(&["512"]);
        let item = BankItem::new(512, "Apple");
        let first = matches(&list, &item);
        let second = matches(&list, &item);
        assert_eq!(first, second);
        assert_eq!(list, tokens(&["512"]));
    }
}

//! Tag Collection
//!
//! An insertion-ordered, duplicate-free and bounded set of [`Token`]s.

use std::num::NonZeroUsize;

use smallvec::SmallVec;

use crate::{errors::TagError, tags::token::Token};

/// Ordered collection of unique tokens with a capacity limit.
///
/// Invariants: no two tokens are equal, `len() <= limit()` and no token is
/// empty (guaranteed by [`Token`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCollection {
    tags: SmallVec<[Token; 5]>,
    limit: NonZeroUsize,
}

impl TagCollection {
    /// Create an empty collection accepting at most `limit` tags.
    pub fn new(limit: NonZeroUsize) -> Self {
        Self {
            tags: SmallVec::new(),
            limit,
        }
    }

    /// Maximum number of tags this collection accepts.
    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Number of tags currently stored.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if this collection is empty.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Check if another distinct tag would be rejected for capacity.
    pub fn is_full(&self) -> bool {
        self.tags.len() >= self.limit.get()
    }

    /// Check if this collection contains `tag` (exact match).
    pub fn contains(&self, tag: &str) -> bool {
        self.position(tag).is_some()
    }

    /// Tokens in insertion order.
    pub fn as_slice(&self) -> &[Token] {
        &self.tags
    }

    /// Iterate over the tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(Token::as_str)
    }

    /// Copy the tags out as owned strings.
    pub fn to_strs(&self) -> SmallVec<[String; 5]> {
        self.iter().map(ToString::to_string).collect()
    }

    /// Append `token` unless it is already present or the collection is full.
    ///
    /// The duplicate check runs first, so re-adding an existing tag to a full
    /// collection reports [`TagError::DuplicateTag`].
    ///
    /// # Errors
    ///
    /// Returns [`TagError::DuplicateTag`] or [`TagError::LimitExceeded`]; the
    /// collection is unchanged in both cases.
    pub fn try_add(&mut self, token: Token) -> Result<(), TagError> {
        if self.contains(&token) {
            return Err(TagError::DuplicateTag(token.into_string()));
        }

        if self.is_full() {
            return Err(TagError::LimitExceeded {
                limit: self.limit.get(),
            });
        }

        self.tags.push(token);

        Ok(())
    }

    /// Remove `tag` if present, returning whether anything was removed.
    pub fn remove(&mut self, tag: &str) -> bool {
        match self.position(tag) {
            Some(pos) => {
                self.tags.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove every tag.
    pub fn clear(&mut self) {
        self.tags.clear();
    }

    fn position(&self, tag: &str) -> Option<usize> {
        self.tags.iter().position(|existing| existing.as_str() == tag)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn collection(
        limit: usize,
        tags: &[&str],
    ) -> Result<TagCollection, Box<dyn std::error::Error>> {
        let limit = NonZeroUsize::new(limit).ok_or("limit must be non-zero")?;
        let mut collection = TagCollection::new(limit);

        for tag in tags {
            let token = Token::parse(tag).ok_or("fixture tags must not be blank")?;
            collection.try_add(token)?;
        }

        Ok(collection)
    }

    fn token(raw: &str) -> Result<Token, &'static str> {
        Token::parse(raw).ok_or("fixture tags must not be blank")
    }

    #[test]
    fn tag_collection_preserves_insertion_order() -> TestResult {
        let tags = collection(5, &["zebra", "apple", "banana"])?;

        assert_eq!(tags.to_strs().as_slice(), ["zebra", "apple", "banana"]);

        Ok(())
    }

    #[test]
    fn tag_collection_contains_works() -> TestResult {
        let tags = collection(5, &["food", "fruit", "red"])?;

        assert!(tags.contains("food"));
        assert!(tags.contains("fruit"));
        assert!(tags.contains("red"));
        assert!(!tags.contains("vegetable"));
        assert!(!tags.contains("Food"));

        Ok(())
    }

    #[test]
    fn tag_collection_rejects_duplicates() -> TestResult {
        let mut tags = collection(5, &["a", "b", "c"])?;

        let result = tags.try_add(token("b")?);

        assert_eq!(result, Err(TagError::DuplicateTag("b".to_string())));
        assert_eq!(tags.len(), 3);

        Ok(())
    }

    #[test]
    fn tag_collection_rejects_beyond_limit() -> TestResult {
        let mut tags = collection(5, &["a", "b", "c", "d", "e"])?;

        assert!(tags.is_full());

        let result = tags.try_add(token("f")?);

        assert_eq!(result, Err(TagError::LimitExceeded { limit: 5 }));
        assert_eq!(tags.to_strs().as_slice(), ["a", "b", "c", "d", "e"]);

        Ok(())
    }

    #[test]
    fn tag_collection_reports_duplicate_before_limit() -> TestResult {
        let mut tags = collection(2, &["a", "b"])?;

        let result = tags.try_add(token("a")?);

        assert_eq!(result, Err(TagError::DuplicateTag("a".to_string())));

        Ok(())
    }

    #[test]
    fn tag_collection_add_remove_works() -> TestResult {
        let mut tags = collection(5, &["food", "fruit"])?;

        assert_eq!(tags.len(), 2);
        assert!(!tags.contains("red"));
        assert!(!tags.is_empty());

        tags.try_add(token("red")?)?;
        assert_eq!(tags.len(), 3);
        assert!(tags.contains("red"));

        assert!(tags.remove("fruit"));
        assert_eq!(tags.to_strs().as_slice(), ["food", "red"]);

        Ok(())
    }

    #[test]
    fn tag_collection_remove_missing_is_noop() -> TestResult {
        let mut tags = collection(5, &["a"])?;

        assert!(!tags.remove("b"));
        assert_eq!(tags.to_strs().as_slice(), ["a"]);

        Ok(())
    }

    #[test]
    fn tag_collection_clear_empties() -> TestResult {
        let mut tags = collection(3, &["a", "b", "c"])?;

        tags.clear();

        assert!(tags.is_empty());
        assert!(!tags.is_full());
        assert_eq!(tags.limit(), 3);

        Ok(())
    }
}

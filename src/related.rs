//! Related post selection.
//!
//! Candidates are scored by overlap with the current post:
//!
//! | Match | Points |
//! |-------|--------|
//! | shared tag | 10 |
//! | shared category | 5 |
//!
//! Tag and category comparison ignores case. Ties (including the all-zero
//! case where nothing overlaps) are broken by a hash of the candidate id
//! mixed with the current post's id. The order is therefore stable across
//! builds yet differs from post to post, so every page doesn't recommend the
//! same three articles.

use std::cmp::Reverse;
use std::collections::HashSet;

/// Related posts shown when no limit is configured.
pub const DEFAULT_LIMIT: usize = 3;

const TAG_WEIGHT: usize = 10;
const CATEGORY_WEIGHT: usize = 5;

/// Anything that can be matched by id, tags and categories.
pub trait Taxonomy {
    fn id(&self) -> &str;
    fn tags(&self) -> &[String];
    fn categories(&self) -> &[String];
}

/// djb2 over UTF-16 code units with 32-bit wrapping arithmetic.
pub fn hash_id(id: &str) -> u32 {
    id.encode_utf16()
        .fold(5381u32, |hash, unit| hash.wrapping_mul(33) ^ u32::from(unit))
}

/// Count items of `candidate` present in `current`, ignoring case.
///
/// Duplicates within `candidate` are counted each time they appear.
pub fn count_shared(current: &[String], candidate: &[String]) -> usize {
    let lookup: HashSet<String> = current.iter().map(|s| s.to_lowercase()).collect();
    candidate
        .iter()
        .filter(|item| lookup.contains(&item.to_lowercase()))
        .count()
}

/// Relevance of `candidate` to `current`.
pub fn score<T: Taxonomy>(current: &T, candidate: &T) -> usize {
    count_shared(current.tags(), candidate.tags()) * TAG_WEIGHT
        + count_shared(current.categories(), candidate.categories()) * CATEGORY_WEIGHT
}

/// Up to `limit` posts related to `current`, best match first.
///
/// `current` is excluded by id. The tie-break key is the XOR of both id
/// hashes read as a signed 32-bit integer, ascending.
pub fn related_posts<'a, T: Taxonomy>(current: &T, all: &'a [T], limit: usize) -> Vec<&'a T> {
    let current_hash = hash_id(current.id());

    let mut scored: Vec<(usize, i32, &'a T)> = all
        .iter()
        .filter(|post| post.id() != current.id())
        .map(|post| {
            let tie_break = (hash_id(post.id()) ^ current_hash) as i32;
            (score(current, post), tie_break, post)
        })
        .collect();

    scored.sort_by_key(|&(score, tie_break, _)| (Reverse(score), tie_break));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, _, post)| post)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        id: String,
        tags: Vec<String>,
        categories: Vec<String>,
    }

    impl Taxonomy for Item {
        fn id(&self) -> &str {
            &self.id
        }
        fn tags(&self) -> &[String] {
            &self.tags
        }
        fn categories(&self) -> &[String] {
            &self.categories
        }
    }

    fn item(id: &str, tags: &[&str], categories: &[&str]) -> Item {
        Item {
            id: id.to_string(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            categories: categories.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn ids(posts: &[&Item]) -> Vec<String> {
        posts.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn djb2_known_values() {
        assert_eq!(hash_id(""), 5381);
        // 5381 * 33 ^ 'a'(97)
        assert_eq!(hash_id("a"), (5381u32 * 33) ^ 97);
    }

    #[test]
    fn djb2_wraps_on_long_input() {
        let long = "x".repeat(500);
        // Must not overflow-panic in debug builds
        let _ = hash_id(&long);
    }

    #[test]
    fn djb2_uses_utf16_units() {
        // U+1F600 is a surrogate pair in UTF-16
        let expected = [0xD83Du32, 0xDE00]
            .iter()
            .fold(5381u32, |h, &u| h.wrapping_mul(33) ^ u);
        assert_eq!(hash_id("\u{1F600}"), expected);
    }

    #[test]
    fn shared_counts_ignore_case() {
        let current = vec!["Rust".to_string(), "web".to_string()];
        let candidate = vec!["rust".to_string(), "WEB".to_string(), "go".to_string()];
        assert_eq!(count_shared(&current, &candidate), 2);
    }

    #[test]
    fn shared_counts_candidate_duplicates() {
        let current = vec!["seo".to_string()];
        let candidate = vec!["seo".to_string(), "SEO".to_string()];
        assert_eq!(count_shared(&current, &candidate), 2);
    }

    #[test]
    fn tags_outweigh_categories() {
        let current = item("current", &["a", "b"], &["x"]);
        let by_tag = item("by-tag", &["a"], &[]);
        let by_category = item("by-category", &[], &["x"]);
        assert_eq!(score(&current, &by_tag), 10);
        assert_eq!(score(&current, &by_category), 5);
    }

    #[test]
    fn excludes_current_post() {
        let posts = vec![item("a", &["t"], &[]), item("b", &["t"], &[])];
        let related = related_posts(&posts[0], &posts, 3);
        assert_eq!(ids(&related), vec!["b"]);
    }

    #[test]
    fn empty_when_only_current() {
        let posts = vec![item("a", &["t"], &[])];
        assert!(related_posts(&posts[0], &posts, 3).is_empty());
    }

    #[test]
    fn sorted_by_score_descending() {
        let posts = vec![
            item("current", &["rust", "web"], &["engineering"]),
            item("one-tag", &["rust"], &[]),
            item("category-only", &[], &["Engineering"]),
            item("two-tags", &["web", "rust"], &[]),
            item("nothing", &["cooking"], &[]),
        ];
        let related = related_posts(&posts[0], &posts, 3);
        assert_eq!(ids(&related), vec!["two-tags", "one-tag", "category-only"]);
    }

    #[test]
    fn respects_limit() {
        let posts: Vec<Item> = (0..10).map(|i| item(&format!("p{i}"), &["t"], &[])).collect();
        assert_eq!(related_posts(&posts[0], &posts, 3).len(), 3);
        assert_eq!(related_posts(&posts[0], &posts, 20).len(), 9);
    }

    #[test]
    fn ties_break_by_signed_hash() {
        let posts = vec![
            item("current", &[], &[]),
            item("alpha", &[], &[]),
            item("beta", &[], &[]),
            item("gamma", &[], &[]),
            item("delta", &[], &[]),
        ];
        let related = related_posts(&posts[0], &posts, 4);

        let current_hash = hash_id("current");
        let mut expected: Vec<&str> = vec!["alpha", "beta", "gamma", "delta"];
        expected.sort_by_key(|id| (hash_id(id) ^ current_hash) as i32);

        assert_eq!(ids(&related), expected);
    }

    #[test]
    fn selection_is_deterministic() {
        let posts: Vec<Item> = (0..8).map(|i| item(&format!("post-{i}"), &[], &[])).collect();
        let first = ids(&related_posts(&posts[3], &posts, 3));
        let second = ids(&related_posts(&posts[3], &posts, 3));
        assert_eq!(first, second);
    }

    #[test]
    fn fallback_order_depends_on_current_post() {
        let posts: Vec<Item> = (0..12).map(|i| item(&format!("post-{i}"), &[], &[])).collect();
        let from_first = ids(&related_posts(&posts[0], &posts, 11));
        let from_last = ids(&related_posts(&posts[11], &posts, 11));
        assert_ne!(from_first, from_last);
    }
}

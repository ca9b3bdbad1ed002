//! Reading time estimates for blog posts.
//!
//! Only prose counts. Code, MDX module syntax, markup and frontmatter are
//! stripped first, in this order:
//!
//! 1. fenced code blocks (```` ``` ... ``` ````)
//! 2. inline code (`` `...` ``)
//! 3. `import` lines
//! 4. `export` lines
//! 5. HTML/JSX tags, including self-closing ones
//! 6. HTML comments
//! 7. a frontmatter block (`--- ... ---`)
//!
//! The remainder is split on whitespace and divided by the reading speed,
//! rounding up, with a floor of one minute.

use regex::Regex;
use std::sync::LazyLock;

/// Average adult reading speed in words per minute.
pub const WORDS_PER_MINUTE: usize = 238;

struct StripPatterns {
    fenced_code: Regex,
    inline_code: Regex,
    import_line: Regex,
    export_line: Regex,
    tag: Regex,
    comment: Regex,
    frontmatter: Regex,
}

static PATTERNS: LazyLock<StripPatterns> = LazyLock::new(|| StripPatterns {
    fenced_code: Regex::new(r"(?s)```.*?```").expect("valid pattern"),
    inline_code: Regex::new(r"`[^`]+`").expect("valid pattern"),
    import_line: Regex::new(r"(?m)^import\s+.*$").expect("valid pattern"),
    export_line: Regex::new(r"(?m)^export\s+.*$").expect("valid pattern"),
    tag: Regex::new(r"<[^>]+>").expect("valid pattern"),
    comment: Regex::new(r"(?s)<!--.*?-->").expect("valid pattern"),
    frontmatter: Regex::new(r"(?ms)^---.*?---").expect("valid pattern"),
});

/// Remove code, MDX module lines, markup and frontmatter, leaving prose.
pub fn strip_markup(content: &str) -> String {
    let p = &*PATTERNS;
    let cleaned = p.fenced_code.replace_all(content, "");
    let cleaned = p.inline_code.replace_all(&cleaned, "");
    let cleaned = p.import_line.replace_all(&cleaned, "");
    let cleaned = p.export_line.replace_all(&cleaned, "");
    let cleaned = p.tag.replace_all(&cleaned, "");
    let cleaned = p.comment.replace_all(&cleaned, "");
    let cleaned = p.frontmatter.replacen(&cleaned, 1, "");
    cleaned.into_owned()
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated minutes to read `content` at `words_per_minute`. Never below 1.
pub fn reading_time_at(content: &str, words_per_minute: usize) -> usize {
    let words = count_words(&strip_markup(content));
    words.div_ceil(words_per_minute.max(1)).max(1)
}

/// Estimated minutes to read `content` at [`WORDS_PER_MINUTE`].
pub fn reading_time(content: &str) -> usize {
    reading_time_at(content, WORDS_PER_MINUTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn empty_content_is_one_minute() {
        assert_eq!(reading_time(""), 1);
        assert_eq!(reading_time("   \n\t "), 1);
    }

    #[test]
    fn rounds_up_partial_minutes() {
        assert_eq!(reading_time(&words(238)), 1);
        assert_eq!(reading_time(&words(239)), 2);
        assert_eq!(reading_time(&words(476)), 2);
        assert_eq!(reading_time(&words(477)), 3);
    }

    #[test]
    fn custom_reading_speed() {
        assert_eq!(reading_time_at(&words(100), 50), 2);
        assert_eq!(reading_time_at(&words(101), 50), 3);
    }

    #[test]
    fn zero_speed_does_not_divide_by_zero() {
        assert_eq!(reading_time_at(&words(3), 0), 3);
    }

    #[test]
    fn fenced_code_is_not_counted() {
        let content = format!("intro words\n\n```rust\n{}\n```\n\nouter", words(1000));
        assert_eq!(count_words(&strip_markup(&content)), 3);
        assert_eq!(reading_time(&content), 1);
    }

    #[test]
    fn inline_code_removed() {
        assert_eq!(strip_markup("call `foo bar baz` now").split_whitespace().count(), 2);
    }

    #[test]
    fn import_and_export_lines_removed() {
        let content = "import Chart from '../Chart.astro';\nexport const meta = { a: 1 };\nHello there";
        assert_eq!(strip_markup(content).trim(), "Hello there");
    }

    #[test]
    fn import_only_at_line_start() {
        let content = "It is important to import goods";
        assert_eq!(count_words(&strip_markup(content)), 6);
    }

    #[test]
    fn tags_and_components_removed() {
        let content = "<Callout type=\"info\">Read this</Callout> and <br/> more";
        assert_eq!(strip_markup(content), "Read this and  more");
    }

    #[test]
    fn comments_removed() {
        let content = "before <!-- hidden words here --> after";
        assert_eq!(count_words(&strip_markup(content)), 2);
    }

    #[test]
    fn frontmatter_removed() {
        let content = "---\ntitle: Hello world\ntags: [a, b]\n---\nBody text";
        assert_eq!(strip_markup(content).trim(), "Body text");
    }

    #[test]
    fn multiline_comment_removed() {
        let content = "one <!--\nmany\nhidden\nlines\n--> two";
        assert_eq!(count_words(&strip_markup(content)), 2);
    }
}

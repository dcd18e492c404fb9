//! Tweet text normalization.
//!
//! Two variants share the same patterns:
//!
//! - [`normalize`] deletes URLs and `@`-mentions and collapses whitespace. Its
//!   output feeds both tokenizers and the readability statistics.
//! - [`mark_social_objects`] replaces URLs, mentions and hashtags with the
//!   sentinel markers [`URL_MARKER`], [`MENTION_MARKER`] and
//!   [`HASHTAG_MARKER`] so they can be counted.
//!
//! Both are pure and total.
//!
//! # Examples
//!
//! ```
//! use tweetsieve::normalize::{count_social_objects, normalize};
//!
//! assert_eq!(normalize("hey   @bob look http://t.co/x"), "hey look ");
//!
//! let counts = count_social_objects("check http://a.co @bob #x #y");
//! assert_eq!((counts.urls, counts.mentions, counts.hashtags), (1, 1, 2));
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Marker substituted for every URL in the counting variant.
pub const URL_MARKER: &str = "URLHERE";

/// Marker substituted for every `@`-mention in the counting variant.
pub const MENTION_MARKER: &str = "MENTIONHERE";

/// Marker substituted for every hashtag in the counting variant.
pub const HASHTAG_MARKER: &str = "HASHTAGHERE";

static SPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

// `[$-_@.&+]` is a character range from `$` to `_`, which already covers
// digits, upper-case letters and most URL punctuation.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\(\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+")
        .expect("URL pattern is valid")
});

static MENTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[\w\-]+").expect("mention pattern is valid"));

static HASHTAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[\w\-]+").expect("hashtag pattern is valid"));

/// Collapse whitespace runs and delete URLs and mentions.
///
/// Deleting a mention can splice two fragments into a new URL (or the other
/// way round), so deletion repeats until nothing matches. The result is a
/// fixed point: `normalize(normalize(t)) == normalize(t)`.
pub fn normalize(text: &str) -> String {
    let mut current = SPACE_PATTERN.replace_all(text, " ").into_owned();
    loop {
        let without_urls = URL_PATTERN.replace_all(&current, "");
        let without_mentions = MENTION_PATTERN.replace_all(&without_urls, "");
        let collapsed = SPACE_PATTERN.replace_all(&without_mentions, " ").into_owned();
        if collapsed == current {
            return collapsed;
        }
        current = collapsed;
    }
}

/// Replace URLs, mentions and hashtags with their sentinel markers.
pub fn mark_social_objects(text: &str) -> String {
    let parsed = SPACE_PATTERN.replace_all(text, " ");
    let parsed = URL_PATTERN.replace_all(&parsed, URL_MARKER);
    let parsed = MENTION_PATTERN.replace_all(&parsed, MENTION_MARKER);
    HASHTAG_PATTERN
        .replace_all(&parsed, HASHTAG_MARKER)
        .into_owned()
}

/// Social-media object counts of one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialObjectCounts {
    pub urls: usize,
    pub mentions: usize,
    pub hashtags: usize,
}

/// Count URLs, mentions and hashtags by counting markers in the marked text.
///
/// Markers already present in the raw text are counted as well.
pub fn count_social_objects(text: &str) -> SocialObjectCounts {
    let marked = mark_social_objects(text);
    SocialObjectCounts {
        urls: marked.matches(URL_MARKER).count(),
        mentions: marked.matches(MENTION_MARKER).count(),
        hashtags: marked.matches(HASHTAG_MARKER).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("a \t\n  b"), "a b");
    }

    #[test]
    fn test_normalize_removes_urls_and_mentions() {
        assert_eq!(
            normalize("@user_1 read https://example.com/a?b=c now"),
            " read now"
        );
        assert_eq!(normalize("hi @some-one!"), "hi !");
    }

    #[test]
    fn test_normalize_keeps_hashtags() {
        assert_eq!(normalize("so #blessed today"), "so #blessed today");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "   ",
            "plain text",
            "a http://x.co b",
            "http@bob://t.co/abc spliced",
            "RT @a: @b http://c.d/e #f  ",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "input {sample:?}");
        }
    }

    #[test]
    fn test_mark_social_objects() {
        assert_eq!(
            mark_social_objects("check http://a.co @bob #x"),
            "check URLHERE MENTIONHERE HASHTAGHERE"
        );
    }

    #[test]
    fn test_count_social_objects() {
        let counts = count_social_objects("check http://a.co @bob #x #y");
        assert_eq!(counts.urls, 1);
        assert_eq!(counts.mentions, 1);
        assert_eq!(counts.hashtags, 2);

        assert_eq!(count_social_objects(""), SocialObjectCounts::default());
    }
}

use super::CharFilter;
use crate::normalize::normalize;

/// Char filter wrapping [`normalize`]: deletes URLs and mentions and collapses
/// whitespace. Hashtags pass through; the `#` is stripped later by the
/// letter-only filters.
#[derive(Clone, Copy, Debug, Default)]
pub struct TweetNormalizeCharFilter;

impl TweetNormalizeCharFilter {
    /// Create a new tweet normalizing char filter.
    pub fn new() -> Self {
        TweetNormalizeCharFilter
    }
}

impl CharFilter for TweetNormalizeCharFilter {
    fn filter(&self, input: &str) -> String {
        normalize(input)
    }

    fn name(&self) -> &'static str {
        "tweet_normalize"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tweet_normalize_filter() {
        let filter = TweetNormalizeCharFilter::new();
        assert_eq!(filter.filter("@a  so   #tired http://x.io"), " so #tired ");
        assert_eq!(filter.name(), "tweet_normalize");
    }
}

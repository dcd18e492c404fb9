//! Part-of-speech tagging with Penn Treebank tags.
//!
//! [`RuleBasedTagger`] is a small lexicon-and-rules tagger: closed-class
//! words and frequent open-class words come from a lexicon, unknown words are
//! tagged by suffix, and a left-to-right pass of contextual rewrites fixes the
//! most frequent verb/noun confusions.
//!
//! # Examples
//!
//! ```
//! use tweetsieve::linguistics::tagger::{PosTagger, RuleBasedTagger, tags_to_string};
//!
//! let tagger = RuleBasedTagger::new();
//! let tokens: Vec<String> = ["you", "will", "regret", "this"].map(String::from).to_vec();
//! let tags = tagger.tag_sequence(&tokens).unwrap();
//!
//! assert_eq!(tags_to_string(&tags), "PRP MD VB DT");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TweetsieveError};

/// Penn Treebank part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PennTag {
    CoordinatingConjunction,
    Cardinal,
    Determiner,
    Existential,
    Preposition,
    Adjective,
    ComparativeAdjective,
    SuperlativeAdjective,
    Modal,
    Noun,
    PluralNoun,
    ProperNoun,
    Predeterminer,
    PossessiveEnding,
    Pronoun,
    PossessivePronoun,
    Adverb,
    ComparativeAdverb,
    Particle,
    To,
    Interjection,
    Verb,
    PastVerb,
    Gerund,
    PastParticiple,
    PresentVerb,
    ThirdPersonVerb,
    WhDeterminer,
    WhPronoun,
    WhAdverb,
    SentenceEnd,
    Comma,
    Colon,
}

impl PennTag {
    /// All tags, in declaration order.
    pub const ALL: [PennTag; 33] = [
        PennTag::CoordinatingConjunction,
        PennTag::Cardinal,
        PennTag::Determiner,
        PennTag::Existential,
        PennTag::Preposition,
        PennTag::Adjective,
        PennTag::ComparativeAdjective,
        PennTag::SuperlativeAdjective,
        PennTag::Modal,
        PennTag::Noun,
        PennTag::PluralNoun,
        PennTag::ProperNoun,
        PennTag::Predeterminer,
        PennTag::PossessiveEnding,
        PennTag::Pronoun,
        PennTag::PossessivePronoun,
        PennTag::Adverb,
        PennTag::ComparativeAdverb,
        PennTag::Particle,
        PennTag::To,
        PennTag::Interjection,
        PennTag::Verb,
        PennTag::PastVerb,
        PennTag::Gerund,
        PennTag::PastParticiple,
        PennTag::PresentVerb,
        PennTag::ThirdPersonVerb,
        PennTag::WhDeterminer,
        PennTag::WhPronoun,
        PennTag::WhAdverb,
        PennTag::SentenceEnd,
        PennTag::Comma,
        PennTag::Colon,
    ];

    /// The Penn Treebank spelling of this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            PennTag::CoordinatingConjunction => "CC",
            PennTag::Cardinal => "CD",
            PennTag::Determiner => "DT",
            PennTag::Existential => "EX",
            PennTag::Preposition => "IN",
            PennTag::Adjective => "JJ",
            PennTag::ComparativeAdjective => "JJR",
            PennTag::SuperlativeAdjective => "JJS",
            PennTag::Modal => "MD",
            PennTag::Noun => "NN",
            PennTag::PluralNoun => "NNS",
            PennTag::ProperNoun => "NNP",
            PennTag::Predeterminer => "PDT",
            PennTag::PossessiveEnding => "POS",
            PennTag::Pronoun => "PRP",
            PennTag::PossessivePronoun => "PRP$",
            PennTag::Adverb => "RB",
            PennTag::ComparativeAdverb => "RBR",
            PennTag::Particle => "RP",
            PennTag::To => "TO",
            PennTag::Interjection => "UH",
            PennTag::Verb => "VB",
            PennTag::PastVerb => "VBD",
            PennTag::Gerund => "VBG",
            PennTag::PastParticiple => "VBN",
            PennTag::PresentVerb => "VBP",
            PennTag::ThirdPersonVerb => "VBZ",
            PennTag::WhDeterminer => "WDT",
            PennTag::WhPronoun => "WP",
            PennTag::WhAdverb => "WRB",
            PennTag::SentenceEnd => ".",
            PennTag::Comma => ",",
            PennTag::Colon => ":",
        }
    }
}

impl fmt::Display for PennTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PennTag {
    type Err = TweetsieveError;

    fn from_str(s: &str) -> Result<Self> {
        PennTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| TweetsieveError::analysis(format!("Unknown Penn Treebank tag: {s}")))
    }
}

/// Join tags with single spaces, the form the POS vectorizer consumes.
pub fn tags_to_string(tags: &[PennTag]) -> String {
    tags.iter()
        .map(PennTag::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trait for part-of-speech taggers.
pub trait PosTagger: Send + Sync {
    /// Tag a token sequence. The output has exactly one tag per token, in
    /// token order.
    fn tag_sequence(&self, tokens: &[String]) -> Result<Vec<PennTag>>;

    /// Get the name of this tagger.
    fn name(&self) -> &'static str;
}

static LEXICON: LazyLock<AHashMap<&'static str, PennTag>> = LazyLock::new(|| {
    let entries: &[(PennTag, &[&str])] = &[
        (PennTag::Determiner, &[
            "the", "a", "an", "this", "that", "these", "those", "every", "each", "some", "any",
            "no", "another", "all", "either", "neither",
        ]),
        (PennTag::Pronoun, &[
            "i", "me", "you", "he", "him", "she", "her", "it", "we", "us", "they", "them", "u",
            "ya", "myself", "yourself", "himself", "herself", "itself", "ourselves", "themselves",
            "somebody", "someone", "everybody", "everyone", "nobody", "anyone",
        ]),
        (PennTag::PossessivePronoun, &["my", "your", "his", "its", "our", "their", "ur"]),
        (PennTag::Preposition, &[
            "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
            "through", "during", "before", "after", "above", "below", "from", "over", "under",
            "like", "than", "because", "if", "while", "until", "since", "as", "though",
            "although", "without", "around", "near", "cause", "cuz",
        ]),
        (PennTag::Particle, &["up", "down", "out", "off"]),
        (PennTag::CoordinatingConjunction, &["and", "or", "but", "nor", "plus", "n"]),
        (PennTag::To, &["to"]),
        (PennTag::Modal, &[
            "can", "could", "will", "would", "shall", "should", "may", "might", "must", "ll",
        ]),
        (PennTag::Verb, &["be"]),
        (PennTag::ThirdPersonVerb, &["is", "has", "does", "s", "gets", "goes", "says"]),
        (PennTag::PresentVerb, &[
            "am", "are", "do", "have", "re", "m", "ve", "hate", "love", "know", "want", "need",
            "think", "get", "go", "see", "say", "make", "take", "come", "give", "look", "feel",
            "tell", "let", "keep", "suck", "kill", "shut", "stop", "wanna", "gotta",
        ]),
        (PennTag::PastVerb, &[
            "was", "were", "did", "had", "said", "got", "went", "made", "came", "saw", "told",
            "thought", "knew", "gave", "took", "left", "felt",
        ]),
        (PennTag::PastParticiple, &["been", "done", "gone", "seen", "known", "given", "taken"]),
        (PennTag::Gerund, &["being", "having", "doing", "going", "gonna"]),
        (PennTag::Noun, &[
            "nothing", "something", "anything", "everything", "thing", "morning", "evening",
            "king", "ring", "news", "mess", "ass",
        ]),
        (PennTag::Adverb, &[
            "not", "t", "never", "very", "so", "too", "just", "really", "now", "then", "here",
            "there", "always", "also", "still", "even", "only", "again", "already", "ever",
            "well", "back", "yet", "soon", "together",
        ]),
        (PennTag::WhAdverb, &["how", "why", "when", "where"]),
        (PennTag::WhPronoun, &["who", "what", "whom"]),
        (PennTag::WhDeterminer, &["which", "whatever"]),
        (PennTag::Interjection, &[
            "lol", "lmao", "lmfao", "omg", "oh", "yes", "yeah", "hey", "hi", "haha", "wow", "ok",
            "okay", "please", "yo", "ugh", "smh", "damn",
        ]),
        (PennTag::Adjective, &[
            "good", "bad", "great", "new", "old", "big", "little", "stupid", "dumb", "ugly",
            "fat", "black", "white", "gay", "real", "fake", "crazy", "hot", "pretty", "dirty",
            "funny", "nice", "happy", "sad", "mad", "sorry", "ghetto", "ratchet", "other",
            "same", "own", "many", "much", "few",
        ]),
        (PennTag::ComparativeAdjective, &["better", "worse", "more", "less"]),
        (PennTag::SuperlativeAdjective, &["best", "worst", "most", "least"]),
        (PennTag::Cardinal, &[
            "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
            "hundred", "thousand", "million",
        ]),
        (PennTag::PluralNoun, &["people", "men", "women", "children", "folks"]),
    ];

    entries
        .iter()
        .flat_map(|(tag, words)| words.iter().map(move |word| (*word, *tag)))
        .collect()
});

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ish", "ical"];

const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "we", "they", "u", "ya"];
const THIRD_PERSON_PRONOUNS: &[&str] = &["he", "she", "it"];
const HAVE_FORMS: &[&str] = &["have", "has", "had", "ve", "having"];

/// Lexicon and rule based tagger.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedTagger;

impl RuleBasedTagger {
    /// Create a new rule based tagger.
    pub fn new() -> Self {
        RuleBasedTagger
    }

    /// Word part of a token: the token without surrounding `.,!?`.
    fn word_part(token: &str) -> &str {
        token.trim_matches(|c| matches!(c, '.' | ',' | '!' | '?'))
    }

    /// Tag a single token without context.
    fn initial_tag(token: &str) -> PennTag {
        let word = Self::word_part(token);
        if word.is_empty() {
            return if token.contains(['.', '!', '?']) {
                PennTag::SentenceEnd
            } else if token.contains(',') {
                PennTag::Comma
            } else {
                PennTag::Colon
            };
        }

        let lowered = word.to_lowercase();
        if let Some(tag) = LEXICON.get(lowered.as_str()) {
            return *tag;
        }
        if lowered.chars().all(|c| c.is_ascii_digit()) {
            return PennTag::Cardinal;
        }

        Self::suffix_tag(&lowered)
    }

    fn suffix_tag(word: &str) -> PennTag {
        let len = word.len();
        if len >= 5 && word.ends_with("ing") {
            PennTag::Gerund
        } else if len >= 4 && word.ends_with("ed") {
            PennTag::PastVerb
        } else if len >= 4 && word.ends_with("ly") {
            PennTag::Adverb
        } else if len >= 5 && word.ends_with("est") {
            PennTag::SuperlativeAdjective
        } else if len >= 5 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            PennTag::Adjective
        } else if len >= 4
            && word.ends_with('s')
            && !["ss", "us", "is"].iter().any(|s| word.ends_with(s))
        {
            PennTag::PluralNoun
        } else {
            PennTag::Noun
        }
    }

    /// Rewrite a tag given the previous token and its (already rewritten) tag.
    fn contextual_tag(previous_word: &str, previous: PennTag, current: PennTag) -> PennTag {
        match (previous, current) {
            (PennTag::Modal, PennTag::Noun | PennTag::PresentVerb) => PennTag::Verb,
            (PennTag::To, PennTag::PresentVerb) => PennTag::Verb,
            (PennTag::Pronoun, PennTag::Noun) if SUBJECT_PRONOUNS.contains(&previous_word) => {
                PennTag::PresentVerb
            }
            (PennTag::Pronoun, PennTag::PluralNoun)
                if THIRD_PERSON_PRONOUNS.contains(&previous_word) =>
            {
                PennTag::ThirdPersonVerb
            }
            (_, PennTag::PastVerb) if HAVE_FORMS.contains(&previous_word) => {
                PennTag::PastParticiple
            }
            (
                PennTag::Determiner | PennTag::PossessivePronoun | PennTag::Adjective,
                PennTag::PresentVerb | PennTag::Verb,
            ) => PennTag::Noun,
            _ => current,
        }
    }
}

impl PosTagger for RuleBasedTagger {
    fn tag_sequence(&self, tokens: &[String]) -> Result<Vec<PennTag>> {
        let mut tags: Vec<PennTag> = tokens.iter().map(|t| Self::initial_tag(t)).collect();

        for i in 1..tags.len() {
            let previous_word = Self::word_part(&tokens[i - 1]).to_lowercase();
            tags[i] = Self::contextual_tag(&previous_word, tags[i - 1], tags[i]);
        }

        Ok(tags)
    }

    fn name(&self) -> &'static str {
        "rule_based"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(text: &str) -> String {
        let tokens: Vec<String> = text.split_whitespace().map(String::from).collect();
        let tags = RuleBasedTagger::new().tag_sequence(&tokens).unwrap();
        assert_eq!(tags.len(), tokens.len());
        tags_to_string(&tags)
    }

    #[test]
    fn test_lexicon_and_suffixes() {
        assert_eq!(tag("the trash bitches are ugly!"), "DT NN NNS VBP JJ");
        assert_eq!(tag("quickly running jumped"), "RB VBG VBD");
        assert_eq!(tag("hopeless dumbest"), "JJ JJS");
    }

    #[test]
    fn test_contextual_rules() {
        assert_eq!(tag("you will regret it."), "PRP MD VB PRP");
        assert_eq!(tag("he hates women"), "PRP VBZ NNS");
        assert_eq!(tag("i trash them"), "PRP VBP PRP");
        assert_eq!(tag("to go"), "TO VB");
        assert_eq!(tag("have talked"), "VBP VBN");
        assert_eq!(tag("the hate"), "DT NN");
    }

    #[test]
    fn test_punctuation_tokens() {
        assert_eq!(tag("lol !! ,"), "UH . ,");
    }

    #[test]
    fn test_empty_sequence() {
        assert!(RuleBasedTagger::new().tag_sequence(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_tag_round_trip_through_str() {
        for tag in PennTag::ALL {
            assert_eq!(tag.as_str().parse::<PennTag>().unwrap(), tag);
        }
        assert!("XYZ".parse::<PennTag>().is_err());
        assert_eq!(PennTag::PossessivePronoun.to_string(), "PRP$");
    }
}

//! Class labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TweetsieveError};

/// Number of classes.
pub const NUM_CLASSES: usize = 3;

/// The class of a post.
///
/// Discriminants are the integer codes used in labeled datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    HateSpeech = 0,
    Offensive = 1,
    Neither = 2,
}

impl Label {
    /// All labels in code order.
    pub const ALL: [Label; NUM_CLASSES] = [Label::HateSpeech, Label::Offensive, Label::Neither];

    /// Integer code of this label.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label for an integer code.
    pub fn from_index(index: usize) -> Result<Self> {
        Label::ALL.get(index).copied().ok_or_else(|| {
            TweetsieveError::invalid_argument(format!("label code must be 0, 1 or 2, got {index}"))
        })
    }

    /// Display name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Label::HateSpeech => "Hate",
            Label::Offensive => "Offensive",
            Label::Neither => "Neither",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Label {
    type Err = TweetsieveError;

    /// Accepts the integer code or the name, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(code) = s.parse::<usize>() {
            return Label::from_index(code);
        }
        match s.to_lowercase().as_str() {
            "hate" | "hate_speech" | "hatespeech" => Ok(Label::HateSpeech),
            "offensive" => Ok(Label::Offensive),
            "neither" => Ok(Label::Neither),
            _ => Err(TweetsieveError::invalid_argument(format!(
                "unknown label '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        for (i, label) in Label::ALL.iter().enumerate() {
            assert_eq!(label.index(), i);
            assert_eq!(Label::from_index(i).unwrap(), *label);
        }
        assert!(Label::from_index(3).is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!("1".parse::<Label>().unwrap(), Label::Offensive);
        assert_eq!(" Hate ".parse::<Label>().unwrap(), Label::HateSpeech);
        assert_eq!("neither".parse::<Label>().unwrap(), Label::Neither);
        assert!("-1".parse::<Label>().is_err());
        assert!("spam".parse::<Label>().is_err());
    }

    #[test]
    fn test_display_names() {
        let names: Vec<String> = Label::ALL.iter().map(|l| l.to_string()).collect();
        assert_eq!(names, ["Hate", "Offensive", "Neither"]);
    }
}

//! Languages and the script names TreeTagger installs for them.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language with a TreeTagger parameter file and wrapper scripts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Bulgarian,
    Dutch,
    English,
    Estonian,
    Finnish,
    French,
    Galician,
    German,
    Italian,
    Polish,
    Russian,
    Slovak,
    Slovak2,
    Spanish,
}

impl Language {
    pub const ALL: [Language; 14] = [
        Language::Bulgarian,
        Language::Dutch,
        Language::English,
        Language::Estonian,
        Language::Finnish,
        Language::French,
        Language::Galician,
        Language::German,
        Language::Italian,
        Language::Polish,
        Language::Russian,
        Language::Slovak,
        Language::Slovak2,
        Language::Spanish,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Language::Bulgarian => "bulgarian",
            Language::Dutch => "dutch",
            Language::English => "english",
            Language::Estonian => "estonian",
            Language::Finnish => "finnish",
            Language::French => "french",
            Language::Galician => "galician",
            Language::German => "german",
            Language::Italian => "italian",
            Language::Polish => "polish",
            Language::Russian => "russian",
            Language::Slovak => "slovak",
            Language::Slovak2 => "slovak2",
            Language::Spanish => "spanish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|language| language.name() == wanted)
            .ok_or_else(|| Error::UnsupportedLanguage(s.to_string()))
    }
}

/// Which of the two TreeTagger wrapper scripts to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Tokenizes raw text and prints `surface<TAB>tag<TAB>lemma` lines.
    Tagger,
    /// Same as the tagger, with `<XC>` / `</XC>` chunk markers interleaved.
    Chunker,
}

/// The script a given tool/language pair resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySpec {
    pub tool: Tool,
    pub language: Language,
    pub program_name: String,
}

impl BinarySpec {
    /// Script name for the platform this crate was built for.
    pub fn new(tool: Tool, language: Language) -> Self {
        Self::for_platform(tool, language, cfg!(windows))
    }

    /// Windows installs ship `tag-<lang>` / `chunk-<lang>` batch files; everything else
    /// ships `tree-tagger-<lang>` / `tagger-chunker-<lang>` shell scripts.
    pub fn for_platform(tool: Tool, language: Language, windows: bool) -> Self {
        let prefix = match (tool, windows) {
            (Tool::Tagger, true) => "tag",
            (Tool::Chunker, true) => "chunk",
            (Tool::Tagger, false) => "tree-tagger",
            (Tool::Chunker, false) => "tagger-chunker",
        };
        Self {
            tool,
            language,
            program_name: format!("{prefix}-{language}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_language_names() {
        for language in Language::ALL {
            assert_eq!(language.name().parse::<Language>().unwrap(), language);
        }
        assert_eq!(" German ".parse::<Language>().unwrap(), Language::German);
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        match "klingon".parse::<Language>() {
            Err(Error::UnsupportedLanguage(name)) => assert_eq!(name, "klingon"),
            other => panic!("Expected UnsupportedLanguage, got {other:?}"),
        }
    }

    #[rstest]
    #[case(Tool::Tagger, false, "tree-tagger-english")]
    #[case(Tool::Chunker, false, "tagger-chunker-english")]
    #[case(Tool::Tagger, true, "tag-english")]
    #[case(Tool::Chunker, true, "chunk-english")]
    fn test_program_names(#[case] tool: Tool, #[case] windows: bool, #[case] expected: &str) {
        let spec = BinarySpec::for_platform(tool, Language::English, windows);
        assert_eq!(spec.program_name, expected);
    }

    #[test]
    fn test_slovak2_keeps_its_suffix() {
        let spec = BinarySpec::for_platform(Tool::Chunker, Language::Slovak2, false);
        assert_eq!(spec.program_name, "tagger-chunker-slovak2");
    }
}

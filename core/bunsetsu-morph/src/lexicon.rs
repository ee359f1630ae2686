use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use bunsetsu_protocol::{Lexicon, LexiconEntry, Morpheme, PartOfSpeech, PosDetail};
use log::{debug, trace};

use crate::{Analyzer, AnalyzerError};

/// Character classes used to group unknown words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Kanji,
    Hiragana,
    Katakana,
    Alnum,
    Space,
    Symbol,
}

fn classify(c: char) -> CharClass {
    match c {
        '\u{3005}' | '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}' | '\u{F900}'..='\u{FAFF}' => {
            CharClass::Kanji
        }
        '\u{3041}'..='\u{309F}' => CharClass::Hiragana,
        '\u{30A0}'..='\u{30FF}' | '\u{FF66}'..='\u{FF9F}' => CharClass::Katakana,
        '\u{FF10}'..='\u{FF19}' | '\u{FF21}'..='\u{FF3A}' | '\u{FF41}'..='\u{FF5A}' => CharClass::Alnum,
        c if c.is_whitespace() => CharClass::Space,
        c if c.is_alphanumeric() => CharClass::Alnum,
        _ => CharClass::Symbol,
    }
}

fn symbol_detail(c: char) -> PosDetail {
    match c {
        '。' | '．' | '.' | '！' | '？' | '!' | '?' => PosDetail::Period,
        '、' | '，' | ',' => PosDetail::Comma,
        _ => PosDetail::Other,
    }
}

/// Longest-match analyzer over an in-memory lexicon.
///
/// Starts uninitialized; `tokenize` fails with `NotInitialized` until a lexicon is loaded.
#[derive(Debug, Default)]
pub struct LexiconAnalyzer {
    state: Option<Loaded>,
}

#[derive(Debug)]
struct Loaded {
    entries: BTreeMap<String, LexiconEntry>,
    max_chars: usize,
}

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self { state: None }
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        let mut analyzer = Self::new();
        analyzer.initialize(lexicon);
        analyzer
    }

    /// Loads a lexicon compiled to an rkyv archive, validating the bytes first.
    pub fn from_archive(bytes: &[u8]) -> Result<Self, AnalyzerError> {
        // Archives read from disk carry no alignment guarantee.
        let mut aligned = rkyv::AlignedVec::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);
        let lexicon = rkyv::from_bytes::<Lexicon>(&aligned)
            .map_err(|e| AnalyzerError::InvalidLexicon(format!("{:?}", e)))?;
        Ok(Self::with_lexicon(lexicon))
    }

    /// One-time initialization. Calling it again replaces the loaded lexicon.
    pub fn initialize(&mut self, lexicon: Lexicon) {
        let mut entries = BTreeMap::new();
        let mut max_chars = 0;
        for entry in lexicon.entries {
            if entry.surface.is_empty() {
                continue;
            }
            max_chars = max_chars.max(entry.surface.chars().count());
            // First entry for a surface wins.
            entries.entry(entry.surface.clone()).or_insert(entry);
        }
        debug!(
            "lexicon v{} loaded: {} surfaces, longest {} chars",
            lexicon.version,
            entries.len(),
            max_chars
        );
        self.state = Some(Loaded { entries, max_chars });
    }

    fn loaded(&self) -> Result<&Loaded, AnalyzerError> {
        self.state.as_ref().ok_or(AnalyzerError::NotInitialized)
    }
}

impl Loaded {
    /// Longest lexicon entry starting at byte offset `start`.
    fn longest_match(&self, text: &str, start: usize) -> Option<(usize, &LexiconEntry)> {
        let rest = &text[start..];
        let boundaries: Vec<usize> = rest
            .char_indices()
            .skip(1)
            .map(|(i, _)| i)
            .chain(core::iter::once(rest.len()))
            .take(self.max_chars)
            .collect();

        boundaries
            .iter()
            .rev()
            .find_map(|&end| self.entries.get(&rest[..end]).map(|entry| (end, entry)))
    }
}

/// Unknown run starting at `start`: same-class characters grouped together,
/// hiragana and symbols one character at a time.
fn unknown_run(text: &str, start: usize) -> (usize, Option<Morpheme>) {
    let rest = &text[start..];
    let mut chars = rest.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return (0, None),
    };
    let class = classify(first);

    match class {
        CharClass::Space => (first.len_utf8(), None),
        CharClass::Symbol => {
            let surface = String::from(&rest[..first.len_utf8()]);
            let morpheme = Morpheme::new(surface, PartOfSpeech::Symbol).with_detail(symbol_detail(first));
            (first.len_utf8(), Some(morpheme))
        }
        CharClass::Hiragana => {
            let surface = String::from(&rest[..first.len_utf8()]);
            (first.len_utf8(), Some(Morpheme::new(surface, PartOfSpeech::Other)))
        }
        CharClass::Kanji | CharClass::Katakana | CharClass::Alnum => {
            let len = rest
                .char_indices()
                .find(|&(_, c)| classify(c) != class)
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            let morpheme = Morpheme::new(String::from(&rest[..len]), PartOfSpeech::Noun)
                .with_detail(PosDetail::General);
            (len, Some(morpheme))
        }
    }
}

impl Analyzer for LexiconAnalyzer {
    fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    fn tokenize(&self, text: &str) -> Result<Vec<Morpheme>, AnalyzerError> {
        let loaded = self.loaded()?;
        let mut morphemes = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            if let Some((len, entry)) = loaded.longest_match(text, pos) {
                trace!("lexicon match {:?} at {}", entry.surface, pos);
                morphemes.push(entry.to_morpheme());
                pos += len;
                continue;
            }

            let (len, unknown) = unknown_run(text, pos);
            if let Some(morpheme) = unknown {
                trace!("unknown {:?} at {}", morpheme.surface, pos);
                morphemes.push(morpheme);
            }
            pos += len;
        }

        Ok(morphemes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(surface: &str, pos: PartOfSpeech, base: &str) -> LexiconEntry {
        LexiconEntry {
            surface: surface.into(),
            pos,
            detail: PosDetail::Other,
            base_form: base.into(),
        }
    }

    fn sample_lexicon() -> Lexicon {
        Lexicon {
            version: 1,
            entries: vec![
                entry("太郎", PartOfSpeech::Noun, ""),
                entry("花子", PartOfSpeech::Noun, ""),
                entry("プレゼント", PartOfSpeech::Noun, ""),
                entry("は", PartOfSpeech::Particle, ""),
                entry("に", PartOfSpeech::Particle, ""),
                entry("を", PartOfSpeech::Particle, ""),
                entry("あげ", PartOfSpeech::Verb, "あげる"),
                entry("あげた", PartOfSpeech::Verb, "あげる"),
                entry("。", PartOfSpeech::Symbol, ""),
            ],
        }
    }

    #[test]
    fn test_not_initialized() {
        let analyzer = LexiconAnalyzer::new();
        assert!(!analyzer.is_ready());
        assert_eq!(analyzer.tokenize("太郎"), Err(AnalyzerError::NotInitialized));
    }

    #[test]
    fn test_longest_match() {
        let analyzer = LexiconAnalyzer::with_lexicon(sample_lexicon());
        let tokens = analyzer.tokenize("太郎は花子にプレゼントをあげた。").unwrap();
        let surfaces: Vec<&str> = tokens.iter().map(|t| t.surface.as_str()).collect();

        assert_eq!(surfaces, ["太郎", "は", "花子", "に", "プレゼント", "を", "あげた", "。"]);
        assert_eq!(tokens[6].base_form, "あげる");
        // Empty base form falls back to the surface
        assert_eq!(tokens[0].base_form, "太郎");
    }

    #[test]
    fn test_unknown_grouping() {
        let analyzer = LexiconAnalyzer::with_lexicon(sample_lexicon());
        let tokens = analyzer.tokenize("東京タワーは ABC、").unwrap();
        let surfaces: Vec<&str> = tokens.iter().map(|t| t.surface.as_str()).collect();

        assert_eq!(surfaces, ["東京", "タワー", "は", "ABC", "、"]);
        assert_eq!(tokens[0].pos, PartOfSpeech::Noun);
        assert_eq!(tokens[4].pos, PartOfSpeech::Symbol);
        assert_eq!(tokens[4].detail, PosDetail::Comma);
    }

    #[test]
    fn test_archive_loading() {
        let bytes = rkyv::to_bytes::<_, 1024>(&sample_lexicon()).unwrap();
        let analyzer = LexiconAnalyzer::from_archive(&bytes).unwrap();
        assert!(analyzer.is_ready());
        assert_eq!(analyzer.tokenize("花子").unwrap().len(), 1);

        assert!(matches!(
            LexiconAnalyzer::from_archive(&[1, 2, 3]),
            Err(AnalyzerError::InvalidLexicon(_))
        ));
    }

    proptest! {
        #[test]
        fn test_tokens_cover_non_space_input(text in "[太郎花子はにを。 あいう]{0,24}") {
            let analyzer = LexiconAnalyzer::with_lexicon(sample_lexicon());
            let tokens = analyzer.tokenize(&text).unwrap();
            let joined: String = tokens.iter().map(|t| t.surface.as_str()).collect();
            let expected: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            prop_assert_eq!(joined, expected);
        }
    }
}

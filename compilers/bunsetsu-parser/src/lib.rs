pub mod error;
pub mod estimate;
pub mod mecab;
pub mod segment;

use bunsetsu_morph::Analyzer;
use bunsetsu_protocol::{Analysis, Morpheme};
use log::debug;

pub use error::{MecabError, ParseError};
pub use estimate::{estimate, explain, find_target, label, RuleKind, RULES};
pub use mecab::parse_mecab;
pub use segment::{segment, select_head};

/// Morpheme stream -> bunsetsu -> dependencies. Pure; empty input gives an empty analysis.
pub fn analyze(morphemes: &[Morpheme]) -> Analysis {
    let bunsetsu = segment(morphemes);
    let dependencies = estimate(&bunsetsu);
    debug!(
        "{} morphemes -> {} bunsetsu, {} dependencies",
        morphemes.len(),
        bunsetsu.len(),
        dependencies.len()
    );
    Analysis { bunsetsu, dependencies }
}

/// Analyzes one sentence of MeCab output.
pub fn analyze_mecab(input: &str) -> Result<Analysis, ParseError> {
    let morphemes = parse_mecab(input)?;
    Ok(analyze(&morphemes))
}

/// Text entry point. Owns its analyzer; holds no state between calls.
pub struct Parser<A> {
    analyzer: A,
}

impl<A: Analyzer> Parser<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    /// Access for deferred initialization of the analyzer.
    pub fn analyzer_mut(&mut self) -> &mut A {
        &mut self.analyzer
    }

    pub fn is_ready(&self) -> bool {
        self.analyzer.is_ready()
    }

    /// Tokenizes `text` and analyzes it.
    ///
    /// Fails with [`ParseError::NotInitialized`] if the analyzer is not ready yet;
    /// the analyzer is not invoked in that case.
    pub fn parse(&self, text: &str) -> Result<Analysis, ParseError> {
        if !self.analyzer.is_ready() {
            return Err(ParseError::NotInitialized);
        }
        let morphemes = self.analyzer.tokenize(text)?;
        Ok(analyze(&morphemes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bunsetsu_morph::{AnalyzerError, LexiconAnalyzer};
    use bunsetsu_protocol::{Lexicon, LexiconEntry, PartOfSpeech, PosDetail};
    use proptest::prelude::*;
    use std::cell::Cell;

    struct CountingAnalyzer {
        ready: bool,
        calls: Cell<usize>,
    }

    impl Analyzer for CountingAnalyzer {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn tokenize(&self, text: &str) -> Result<Vec<Morpheme>, AnalyzerError> {
            self.calls.set(self.calls.get() + 1);
            Ok(vec![Morpheme::new(text, PartOfSpeech::Noun)])
        }
    }

    fn lexicon() -> Lexicon {
        let entry = |surface: &str, pos, detail, base: &str| LexiconEntry {
            surface: surface.into(),
            pos,
            detail,
            base_form: base.into(),
        };
        Lexicon {
            version: 1,
            entries: vec![
                entry("太郎", PartOfSpeech::Noun, PosDetail::ProperNoun, ""),
                entry("花子", PartOfSpeech::Noun, PosDetail::ProperNoun, ""),
                entry("プレゼント", PartOfSpeech::Noun, PosDetail::General, ""),
                entry("は", PartOfSpeech::Particle, PosDetail::BindingParticle, ""),
                entry("に", PartOfSpeech::Particle, PosDetail::CaseParticle, ""),
                entry("を", PartOfSpeech::Particle, PosDetail::CaseParticle, ""),
                entry("あげた", PartOfSpeech::Verb, PosDetail::Independent, "あげる"),
                entry("。", PartOfSpeech::Symbol, PosDetail::Period, ""),
            ],
        }
    }

    #[test]
    fn test_parse_before_initialize() {
        let analyzer = CountingAnalyzer { ready: false, calls: Cell::new(0) };
        let parser = Parser::new(&analyzer);

        assert!(matches!(parser.parse("太郎"), Err(ParseError::NotInitialized)));
        assert_eq!(analyzer.calls.get(), 0);
    }

    #[test]
    fn test_deferred_initialization() {
        let mut parser = Parser::new(LexiconAnalyzer::new());
        assert!(matches!(parser.parse("太郎は"), Err(ParseError::NotInitialized)));

        parser.analyzer_mut().initialize(lexicon());
        let analysis = parser.parse("太郎は花子にプレゼントをあげた。").unwrap();

        let surfaces: Vec<&str> = analysis.bunsetsu.iter().map(|b| b.surface.as_str()).collect();
        assert_eq!(surfaces, ["太郎は", "花子に", "プレゼントを", "あげた。"]);

        let edges: Vec<(usize, usize, &str)> = analysis
            .dependencies
            .iter()
            .map(|d| (d.from.index(), d.to.index(), d.label.as_str()))
            .collect();
        assert_eq!(edges, [(0, 3, "は"), (1, 3, "に"), (2, 3, "を")]);
    }

    #[test]
    fn test_empty_text() {
        let parser = Parser::new(LexiconAnalyzer::with_lexicon(lexicon()));
        let analysis = parser.parse("").unwrap();
        assert!(analysis.is_empty());
        assert!(analysis.dependencies.is_empty());
    }

    #[test]
    fn test_analyze_mecab() {
        let input = "猫\t名詞,一般,*,*,*,*,猫\nが\t助詞,格助詞,一般,*,*,*,が\n鳴い\t動詞,自立,*,*,五段・カ行イ音便,連用タ接続,鳴く\nた\t助動詞,*,*,*,特殊・タ,基本形,た\nEOS\n";
        let analysis = analyze_mecab(input).unwrap();

        assert_eq!(analysis.bunsetsu.len(), 2);
        assert_eq!(analysis.dependencies[0].label, "が");
        assert_eq!(analysis.dependencies[0].to.index(), 1);

        assert!(matches!(analyze_mecab("broken"), Err(ParseError::Mecab(_))));
    }

    fn any_pos() -> impl Strategy<Value = PartOfSpeech> {
        prop::sample::select(vec![
            PartOfSpeech::Noun,
            PartOfSpeech::Verb,
            PartOfSpeech::Adjective,
            PartOfSpeech::Adverb,
            PartOfSpeech::Adnominal,
            PartOfSpeech::Interjection,
            PartOfSpeech::Particle,
            PartOfSpeech::AuxiliaryVerb,
            PartOfSpeech::Conjunction,
            PartOfSpeech::Symbol,
            PartOfSpeech::Prefix,
            PartOfSpeech::Other,
        ])
    }

    fn any_morpheme() -> impl Strategy<Value = Morpheme> {
        let surfaces = prop::sample::select(vec![
            "は", "が", "の", "で", "て", "を", "に", "ながら", "た", "本", "見", "。", "とても",
        ]);
        let details = prop::sample::select(vec![PosDetail::Independent, PosDetail::Dependent, PosDetail::General]);
        (surfaces, any_pos(), details)
            .prop_map(|(surface, pos, detail)| Morpheme::new(surface, pos).with_detail(detail))
    }

    proptest! {
        #[test]
        fn test_bunsetsu_cover_input(morphemes in prop::collection::vec(any_morpheme(), 0..40)) {
            let analysis = analyze(&morphemes);
            let rebuilt: Vec<Morpheme> = analysis.morphemes().cloned().collect();
            prop_assert_eq!(rebuilt, morphemes.clone());
            prop_assert_eq!(analysis.bunsetsu.is_empty(), morphemes.is_empty());
            for b in &analysis.bunsetsu {
                prop_assert!(!b.tokens.is_empty());
                prop_assert!(b.head < b.tokens.len());
            }
        }

        #[test]
        fn test_edges_in_range(morphemes in prop::collection::vec(any_morpheme(), 0..40)) {
            let analysis = analyze(&morphemes);
            let n = analysis.bunsetsu.len();
            prop_assert_eq!(analysis.dependencies.len(), n.saturating_sub(1));
            for (i, edge) in analysis.dependencies.iter().enumerate() {
                prop_assert_eq!(edge.from.index(), i);
                prop_assert!(edge.to.index() < n);
                prop_assert!(edge.to.index() > i);
            }
        }

        #[test]
        fn test_deterministic(morphemes in prop::collection::vec(any_morpheme(), 0..40)) {
            prop_assert_eq!(analyze(&morphemes), analyze(&morphemes));
        }
    }
}

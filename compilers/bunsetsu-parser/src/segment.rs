use bunsetsu_protocol::{Bunsetsu, BunsetsuId, Morpheme, PartOfSpeech};
use log::trace;

/// Groups a flat morpheme stream into bunsetsu.
///
/// A run closes after:
/// 1. the last morpheme of the stream,
/// 2. a symbol (punctuation),
/// 3. a function word (particle, auxiliary verb, conjunction) that is followed by a content word.
///
/// Every morpheme lands in exactly one bunsetsu, in input order. Empty input gives an empty list.
pub fn segment(morphemes: &[Morpheme]) -> Vec<Bunsetsu> {
    let mut bunsetsu = Vec::new();
    let mut run: Vec<Morpheme> = Vec::new();

    for (i, morpheme) in morphemes.iter().enumerate() {
        run.push(morpheme.clone());

        let next = morphemes.get(i + 1);
        if closes_run(morpheme, next) {
            let head = select_head(&run);
            let id = BunsetsuId::from(bunsetsu.len());
            let unit = Bunsetsu::new(id, std::mem::take(&mut run), head);
            trace!("bunsetsu {} = {:?} (head {})", id, unit.surface, head);
            bunsetsu.push(unit);
        }
    }

    bunsetsu
}

/// Index of the head morpheme: verb > adjective > noun > anything else.
/// Ties keep the earliest morpheme, so a run with none of the three falls back to its first morpheme.
pub fn select_head(run: &[Morpheme]) -> usize {
    let mut best = 0;
    for (i, morpheme) in run.iter().enumerate().skip(1) {
        if morpheme.pos.head_priority() > run[best].pos.head_priority() {
            best = i;
        }
    }
    best
}

fn closes_run(current: &Morpheme, next: Option<&Morpheme>) -> bool {
    let Some(next) = next else {
        return true;
    };

    if current.pos == PartOfSpeech::Symbol {
        return true;
    }

    current.pos.is_function_word() && next.pos.is_content_word()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bunsetsu_protocol::PartOfSpeech::*;

    fn m(surface: &str, pos: PartOfSpeech) -> Morpheme {
        Morpheme::new(surface, pos)
    }

    fn surfaces(bunsetsu: &[Bunsetsu]) -> Vec<&str> {
        bunsetsu.iter().map(|b| b.surface.as_str()).collect()
    }

    #[test]
    fn test_simple_sentence() {
        // 太郎は花子にプレゼントをあげた。
        let morphemes = vec![
            m("太郎", Noun),
            m("は", Particle),
            m("花子", Noun),
            m("に", Particle),
            m("プレゼント", Noun),
            m("を", Particle),
            m("あげた", Verb),
            m("。", Symbol),
        ];

        let bunsetsu = segment(&morphemes);

        assert_eq!(surfaces(&bunsetsu), ["太郎は", "花子に", "プレゼントを", "あげた。"]);
        for (i, b) in bunsetsu.iter().enumerate() {
            assert_eq!(b.id.index(), i);
        }
        assert_eq!(bunsetsu[3].head_morpheme().surface, "あげた");
    }

    #[test]
    fn test_empty_input() {
        assert!(segment(&[]).is_empty());
    }

    #[test]
    fn test_function_word_chain_stays_together() {
        // 食べ/させ/られ/た: auxiliaries followed by auxiliaries never split
        let morphemes = vec![
            m("食べ", Verb),
            m("させ", AuxiliaryVerb),
            m("られ", AuxiliaryVerb),
            m("た", AuxiliaryVerb),
        ];

        let bunsetsu = segment(&morphemes);
        assert_eq!(surfaces(&bunsetsu), ["食べさせられた"]);
    }

    #[test]
    fn test_symbol_closes_mid_stream() {
        let morphemes = vec![m("はい", Interjection), m("、", Symbol), m("そう", Adverb), m("です", AuxiliaryVerb)];

        let bunsetsu = segment(&morphemes);
        assert_eq!(surfaces(&bunsetsu), ["はい、", "そうです"]);
    }

    #[test]
    fn test_stream_ending_in_function_word() {
        let morphemes = vec![m("本", Noun), m("を", Particle)];

        let bunsetsu = segment(&morphemes);
        assert_eq!(surfaces(&bunsetsu), ["本を"]);
    }

    #[test]
    fn test_content_words_do_not_split() {
        // Content followed by content stays in one run until a function word closes it.
        let morphemes = vec![m("日本", Noun), m("語", Noun), m("を", Particle), m("話す", Verb)];

        let bunsetsu = segment(&morphemes);
        assert_eq!(surfaces(&bunsetsu), ["日本語を", "話す"]);
    }

    #[test]
    fn test_head_prefers_verb_regardless_of_order() {
        assert_eq!(select_head(&[m("勉強", Noun), m("し", Verb)]), 1);
        assert_eq!(select_head(&[m("し", Verb), m("勉強", Noun)]), 0);
        assert_eq!(select_head(&[m("高", Adjective), m("さ", Noun)]), 0);
    }

    #[test]
    fn test_head_ties_keep_first() {
        assert_eq!(select_head(&[m("東京", Noun), m("駅", Noun)]), 0);
    }

    #[test]
    fn test_head_defaults_to_first() {
        assert_eq!(select_head(&[m("は", Particle), m("も", Particle)]), 0);
        assert_eq!(select_head(&[m("お", Prefix), m("ね", Particle)]), 0);
    }
}

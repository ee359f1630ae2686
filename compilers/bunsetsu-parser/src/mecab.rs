use nom::{
    bytes::complete::{take_till, take_till1},
    character::complete::char,
    combinator::all_consuming,
    multi::separated_list1,
    sequence::separated_pair,
    IResult,
};
use bunsetsu_protocol::{Morpheme, PartOfSpeech, PosDetail};

use crate::error::MecabError;

/// Marks the end of one sentence in MeCab output.
const EOS: &str = "EOS";

/// Feature column holding the dictionary base form (IPADIC layout).
const BASE_FORM_COLUMN: usize = 6;

/// `surface<TAB>feature,feature,...`
fn mecab_line(input: &str) -> IResult<&str, (&str, Vec<&str>)> {
    separated_pair(
        take_till1(|c| c == '\t'),
        char('\t'),
        separated_list1(char(','), take_till(|c| c == ',')),
    )(input)
}

fn to_morpheme(surface: &str, features: &[&str]) -> Morpheme {
    let pos = features.first().map_or(PartOfSpeech::Other, |tag| PartOfSpeech::from_tag(tag));
    let detail = features.get(1).map_or(PosDetail::Other, |tag| PosDetail::from_tag(tag));
    let base_form = match features.get(BASE_FORM_COLUMN) {
        Some(&base) if !base.is_empty() && base != "*" => base,
        _ => surface,
    };

    Morpheme::new(surface, pos)
        .with_detail(detail)
        .with_base_form(base_form)
}

/// Reads the morphemes of one sentence from MeCab (IPADIC) output.
///
/// Blank lines are skipped; anything after the first `EOS` is ignored.
pub fn parse_mecab(input: &str) -> Result<Vec<Morpheme>, MecabError> {
    let mut morphemes = Vec::new();

    for (n, raw) in input.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        if line == EOS {
            break;
        }

        match all_consuming(mecab_line)(line) {
            Ok((_, (surface, features))) => morphemes.push(to_morpheme(surface, &features)),
            Err(_) => {
                return Err(MecabError::Malformed {
                    line: n + 1,
                    content: line.to_string(),
                })
            }
        }
    }

    Ok(morphemes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "太郎\t名詞,固有名詞,人名,名,*,*,太郎,タロウ,タロー
は\t助詞,係助詞,*,*,*,*,は,ハ,ワ
本\t名詞,一般,*,*,*,*,本,ホン,ホン
を\t助詞,格助詞,一般,*,*,*,を,ヲ,ヲ
読ん\t動詞,自立,*,*,五段・マ行,連用タ接続,読む,ヨン,ヨン
だ\t助動詞,*,*,*,特殊・タ,基本形,だ,ダ,ダ
。\t記号,句点,*,*,*,*,。,。,。
EOS
";

    #[test]
    fn test_parse_sample() {
        let morphemes = parse_mecab(SAMPLE).unwrap();

        assert_eq!(morphemes.len(), 7);
        assert_eq!(morphemes[0].pos, PartOfSpeech::Noun);
        assert_eq!(morphemes[0].detail, PosDetail::ProperNoun);
        assert_eq!(morphemes[4].surface, "読ん");
        assert_eq!(morphemes[4].detail, PosDetail::Independent);
        assert_eq!(morphemes[4].base_form, "読む");
        assert_eq!(morphemes[6].pos, PartOfSpeech::Symbol);
        assert_eq!(morphemes[6].detail, PosDetail::Period);
    }

    #[test]
    fn test_stops_at_first_eos() {
        let input = "雨\t名詞,一般,*,*,*,*,雨\nEOS\n雪\t名詞,一般,*,*,*,*,雪\nEOS\n";
        let morphemes = parse_mecab(input).unwrap();
        assert_eq!(morphemes.len(), 1);
        assert_eq!(morphemes[0].surface, "雨");
    }

    #[test]
    fn test_unknown_word_short_features() {
        // Unknown words carry fewer columns; the base form falls back to the surface.
        let morphemes = parse_mecab("ググる\t動詞,*,*\r\n\nEOS").unwrap();
        assert_eq!(morphemes[0].pos, PartOfSpeech::Verb);
        assert_eq!(morphemes[0].detail, PosDetail::Other);
        assert_eq!(morphemes[0].base_form, "ググる");
    }

    #[test]
    fn test_malformed_line() {
        let err = parse_mecab("太郎\t名詞,固有名詞\nno tab here\nEOS").unwrap_err();
        assert_eq!(
            err,
            MecabError::Malformed {
                line: 2,
                content: "no tab here".to_string()
            }
        );
    }
}

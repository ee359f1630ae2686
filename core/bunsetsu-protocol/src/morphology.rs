use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

/// Top-level part-of-speech tag (IPADIC tagset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum PartOfSpeech {
    #[cfg_attr(feature = "serde", serde(rename = "名詞"))]
    Noun = 0,
    #[cfg_attr(feature = "serde", serde(rename = "動詞"))]
    Verb = 1,
    #[cfg_attr(feature = "serde", serde(rename = "形容詞"))]
    Adjective = 2,
    #[cfg_attr(feature = "serde", serde(rename = "副詞"))]
    Adverb = 3,
    /// Pre-noun adjectival (連体詞), e.g. この, 大きな.
    #[cfg_attr(feature = "serde", serde(rename = "連体詞"))]
    Adnominal = 4,
    #[cfg_attr(feature = "serde", serde(rename = "感動詞"))]
    Interjection = 5,
    #[cfg_attr(feature = "serde", serde(rename = "助詞"))]
    Particle = 6,
    #[cfg_attr(feature = "serde", serde(rename = "助動詞"))]
    AuxiliaryVerb = 7,
    #[cfg_attr(feature = "serde", serde(rename = "接続詞"))]
    Conjunction = 8,
    /// Symbols and punctuation (記号).
    #[cfg_attr(feature = "serde", serde(rename = "記号"))]
    Symbol = 9,
    #[cfg_attr(feature = "serde", serde(rename = "接頭詞"))]
    Prefix = 10,
    #[cfg_attr(feature = "serde", serde(rename = "フィラー"))]
    Filler = 11,
    #[cfg_attr(feature = "serde", serde(rename = "その他", other))]
    Other = 12,
}

impl PartOfSpeech {
    /// Maps an IPADIC tag onto the enumeration. Unknown tags become `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "名詞" => Self::Noun,
            "動詞" => Self::Verb,
            "形容詞" => Self::Adjective,
            "副詞" => Self::Adverb,
            "連体詞" => Self::Adnominal,
            "感動詞" => Self::Interjection,
            "助詞" => Self::Particle,
            "助動詞" => Self::AuxiliaryVerb,
            "接続詞" => Self::Conjunction,
            "記号" => Self::Symbol,
            "接頭詞" => Self::Prefix,
            "フィラー" => Self::Filler,
            _ => Self::Other,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Noun => "名詞",
            Self::Verb => "動詞",
            Self::Adjective => "形容詞",
            Self::Adverb => "副詞",
            Self::Adnominal => "連体詞",
            Self::Interjection => "感動詞",
            Self::Particle => "助詞",
            Self::AuxiliaryVerb => "助動詞",
            Self::Conjunction => "接続詞",
            Self::Symbol => "記号",
            Self::Prefix => "接頭詞",
            Self::Filler => "フィラー",
            Self::Other => "その他",
        }
    }

    /// Open-class words that start a new bunsetsu after a function word.
    pub fn is_content_word(self) -> bool {
        match self {
            Self::Noun
            | Self::Verb
            | Self::Adjective
            | Self::Adverb
            | Self::Adnominal
            | Self::Interjection => true,
            Self::Particle
            | Self::AuxiliaryVerb
            | Self::Conjunction
            | Self::Symbol
            | Self::Prefix
            | Self::Filler
            | Self::Other => false,
        }
    }

    /// Closed-class words that end a bunsetsu.
    pub fn is_function_word(self) -> bool {
        match self {
            Self::Particle | Self::AuxiliaryVerb | Self::Conjunction => true,
            Self::Noun
            | Self::Verb
            | Self::Adjective
            | Self::Adverb
            | Self::Adnominal
            | Self::Interjection
            | Self::Symbol
            | Self::Prefix
            | Self::Filler
            | Self::Other => false,
        }
    }

    /// Score used when choosing the head morpheme of a bunsetsu.
    pub fn head_priority(self) -> u8 {
        match self {
            Self::Verb => 3,
            Self::Adjective => 2,
            Self::Noun => 1,
            _ => 0,
        }
    }

    pub fn mask(self) -> PosMask {
        match self {
            Self::Noun => PosMask::NOUN,
            Self::Verb => PosMask::VERB,
            Self::Adjective => PosMask::ADJECTIVE,
            Self::Adverb => PosMask::ADVERB,
            Self::Adnominal => PosMask::ADNOMINAL,
            Self::Interjection => PosMask::INTERJECTION,
            Self::Particle => PosMask::PARTICLE,
            Self::AuxiliaryVerb => PosMask::AUXILIARY_VERB,
            Self::Conjunction => PosMask::CONJUNCTION,
            Self::Symbol => PosMask::SYMBOL,
            Self::Prefix => PosMask::PREFIX,
            Self::Filler => PosMask::FILLER,
            Self::Other => PosMask::OTHER,
        }
    }
}

impl core::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.tag())
    }
}

/// First sub-category of an IPADIC feature (`pos_detail_1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum PosDetail {
    #[cfg_attr(feature = "serde", serde(rename = "一般"))]
    General = 0,
    /// Independent (自立) verbs and adjectives.
    #[cfg_attr(feature = "serde", serde(rename = "自立"))]
    Independent = 1,
    #[cfg_attr(feature = "serde", serde(rename = "非自立"))]
    Dependent = 2,
    #[cfg_attr(feature = "serde", serde(rename = "接尾"))]
    Suffix = 3,
    #[cfg_attr(feature = "serde", serde(rename = "固有名詞"))]
    ProperNoun = 4,
    #[cfg_attr(feature = "serde", serde(rename = "代名詞"))]
    Pronoun = 5,
    #[cfg_attr(feature = "serde", serde(rename = "数"))]
    Numeral = 6,
    #[cfg_attr(feature = "serde", serde(rename = "サ変接続"))]
    SahenConnection = 7,
    #[cfg_attr(feature = "serde", serde(rename = "形容動詞語幹"))]
    AdjectivalStem = 8,
    #[cfg_attr(feature = "serde", serde(rename = "副詞可能"))]
    AdverbPossible = 9,
    #[cfg_attr(feature = "serde", serde(rename = "格助詞"))]
    CaseParticle = 10,
    #[cfg_attr(feature = "serde", serde(rename = "係助詞"))]
    BindingParticle = 11,
    #[cfg_attr(feature = "serde", serde(rename = "接続助詞"))]
    ConjunctiveParticle = 12,
    #[cfg_attr(feature = "serde", serde(rename = "連体化"))]
    AdnominalParticle = 13,
    #[cfg_attr(feature = "serde", serde(rename = "副助詞"))]
    AdverbialParticle = 14,
    #[cfg_attr(feature = "serde", serde(rename = "終助詞"))]
    FinalParticle = 15,
    #[cfg_attr(feature = "serde", serde(rename = "句点"))]
    Period = 16,
    #[cfg_attr(feature = "serde", serde(rename = "読点"))]
    Comma = 17,
    #[cfg_attr(feature = "serde", serde(rename = "*", other))]
    Other = 18,
}

impl PosDetail {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "一般" => Self::General,
            "自立" => Self::Independent,
            "非自立" => Self::Dependent,
            "接尾" => Self::Suffix,
            "固有名詞" => Self::ProperNoun,
            "代名詞" => Self::Pronoun,
            "数" => Self::Numeral,
            "サ変接続" => Self::SahenConnection,
            "形容動詞語幹" => Self::AdjectivalStem,
            "副詞可能" => Self::AdverbPossible,
            "格助詞" => Self::CaseParticle,
            "係助詞" => Self::BindingParticle,
            "接続助詞" => Self::ConjunctiveParticle,
            "連体化" => Self::AdnominalParticle,
            "副助詞" => Self::AdverbialParticle,
            "終助詞" => Self::FinalParticle,
            "句点" => Self::Period,
            "読点" => Self::Comma,
            _ => Self::Other,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::General => "一般",
            Self::Independent => "自立",
            Self::Dependent => "非自立",
            Self::Suffix => "接尾",
            Self::ProperNoun => "固有名詞",
            Self::Pronoun => "代名詞",
            Self::Numeral => "数",
            Self::SahenConnection => "サ変接続",
            Self::AdjectivalStem => "形容動詞語幹",
            Self::AdverbPossible => "副詞可能",
            Self::CaseParticle => "格助詞",
            Self::BindingParticle => "係助詞",
            Self::ConjunctiveParticle => "接続助詞",
            Self::AdnominalParticle => "連体化",
            Self::AdverbialParticle => "副助詞",
            Self::FinalParticle => "終助詞",
            Self::Period => "句点",
            Self::Comma => "読点",
            Self::Other => "*",
        }
    }
}

impl Default for PosDetail {
    fn default() -> Self {
        Self::Other
    }
}

impl core::fmt::Display for PosDetail {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.tag())
    }
}

bitflags! {
    /// A set of parts of speech, used when searching for a governing bunsetsu.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct PosMask: u16 {
        const NOUN = 1;
        const VERB = 2;
        const ADJECTIVE = 4;
        const ADVERB = 8;
        const ADNOMINAL = 16;
        const INTERJECTION = 32;
        const PARTICLE = 64;
        const AUXILIARY_VERB = 128;
        const CONJUNCTION = 256;
        const SYMBOL = 512;
        const PREFIX = 1024;
        const FILLER = 2048;
        const OTHER = 4096;

        // Predicates (用言)
        const PREDICATE = Self::VERB.bits() | Self::ADJECTIVE.bits();
        const NOMINAL_OR_VERB = Self::NOUN.bits() | Self::VERB.bits();
    }
}

impl PosMask {
    pub fn matches(self, pos: PartOfSpeech) -> bool {
        self.intersects(pos.mask())
    }
}

use rkyv::{Archive, Deserialize, Serialize};
use crate::ids::BunsetsuId;
use crate::morphology::{PartOfSpeech, PosDetail};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One morpheme as produced by the morphological analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Morpheme {
    pub surface: String,
    pub pos: PartOfSpeech,
    #[cfg_attr(feature = "serde", serde(default))]
    pub detail: PosDetail,
    /// Dictionary citation form.
    pub base_form: String,
}

impl Morpheme {
    /// A morpheme whose base form is its surface and whose detail is unknown.
    pub fn new(surface: impl Into<String>, pos: PartOfSpeech) -> Self {
        let surface = surface.into();
        Self {
            base_form: surface.clone(),
            surface,
            pos,
            detail: PosDetail::Other,
        }
    }

    pub fn with_detail(mut self, detail: PosDetail) -> Self {
        self.detail = detail;
        self
    }

    pub fn with_base_form(mut self, base_form: impl Into<String>) -> Self {
        self.base_form = base_form.into();
        self
    }
}

/// A contiguous run of morphemes forming one phrase unit.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Bunsetsu {
    pub id: BunsetsuId,
    pub tokens: Vec<Morpheme>,
    pub surface: String,
    /// Index of the head morpheme within `tokens`.
    pub head: usize,
}

impl Bunsetsu {
    /// Builds a bunsetsu from a non-empty run. `surface` is the concatenation of the token surfaces.
    pub fn new(id: BunsetsuId, tokens: Vec<Morpheme>, head: usize) -> Self {
        debug_assert!(!tokens.is_empty(), "bunsetsu must hold at least one morpheme");
        debug_assert!(head < tokens.len(), "head index out of range");
        let surface = tokens.iter().map(|t| t.surface.as_str()).collect();
        Self { id, tokens, surface, head }
    }

    pub fn head_morpheme(&self) -> &Morpheme {
        &self.tokens[self.head]
    }

    pub fn head_pos(&self) -> PartOfSpeech {
        self.head_morpheme().pos
    }

    pub fn last_morpheme(&self) -> &Morpheme {
        // Non-empty by construction.
        &self.tokens[self.tokens.len() - 1]
    }
}

/// `from` depends on (is governed by) `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct DependencyEdge {
    pub from: BunsetsuId,
    pub to: BunsetsuId,
    /// Surface of the trailing particle of `from`, or empty.
    pub label: String,
}

/// Result of one parse: the bunsetsu list and one edge per non-final bunsetsu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Analysis {
    pub bunsetsu: Vec<Bunsetsu>,
    pub dependencies: Vec<DependencyEdge>,
}

impl Analysis {
    pub fn is_empty(&self) -> bool {
        self.bunsetsu.is_empty()
    }

    /// The morpheme stream the analysis was built from, in order.
    pub fn morphemes(&self) -> impl Iterator<Item = &Morpheme> + '_ {
        self.bunsetsu.iter().flat_map(|b| b.tokens.iter())
    }

    pub fn get(&self, id: BunsetsuId) -> Option<&Bunsetsu> {
        self.bunsetsu.get(id.index())
    }
}

/// A dictionary headword for the bundled analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct LexiconEntry {
    pub surface: String,
    pub pos: PartOfSpeech,
    #[cfg_attr(feature = "serde", serde(default))]
    pub detail: PosDetail,
    /// Defaults to the surface when empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_form: String,
}

impl LexiconEntry {
    pub fn to_morpheme(&self) -> Morpheme {
        let base_form = if self.base_form.is_empty() {
            self.surface.clone()
        } else {
            self.base_form.clone()
        };
        Morpheme {
            surface: self.surface.clone(),
            pos: self.pos,
            detail: self.detail,
            base_form,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub version: u32,
    pub entries: Vec<LexiconEntry>,
}

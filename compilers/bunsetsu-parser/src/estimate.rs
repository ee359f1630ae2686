use bunsetsu_protocol::{Bunsetsu, BunsetsuId, DependencyEdge, PartOfSpeech, PosDetail, PosMask};
use log::trace;

/// Conjunctive particles that link a clause to a following governing clause.
pub const CLAUSE_LINKING_PARTICLES: &[&str] = &[
    "て", "で", "ば", "と", "ても", "でも", "から", "ので", "のに", "けど", "が",
];

/// Base forms of auxiliary verbs that close a clause.
pub const CLAUSE_LINKING_AUXILIARIES: &[&str] = &["た", "だ", "です", "ます"];

/// Core case-marking particles.
pub const CASE_PARTICLES: &[&str] = &["は", "が", "を", "に", "へ", "で", "から", "まで", "より", "と"];

/// Nominal-linking particle (possessive/attributive).
pub const POSSESSIVE_PARTICLE: &str = "の";

/// Final characters of continuative verb endings (て, で, たり, ながら).
pub const CONTINUATIVE_CHARS: &[char] = &['て', 'で', 'た', 'り', 'な', 'が', 'ら'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Ends in a conjunctive particle or a clause-closing auxiliary.
    ClauseConnector,
    /// Ends in a case particle.
    CaseParticle,
    /// Ends in の.
    Possessive,
    /// Headed by an adverb.
    Adverb,
    /// Headed by a pre-noun adjectival.
    Adnominal,
    /// Noun head without a trailing particle.
    BareNoun,
    /// Verb head in a non-terminal form.
    NonFinalVerb,
    /// Attach to the next bunsetsu.
    Adjacent,
}

/// One target-resolution rule. A rule fires when `applies` holds and `resolve` yields a target.
pub struct Rule {
    pub kind: RuleKind,
    pub applies: fn(&Bunsetsu) -> bool,
    pub resolve: fn(&[Bunsetsu], usize) -> Option<usize>,
}

/// Target rules in priority order. The first rule that fires wins.
pub const RULES: &[Rule] = &[
    Rule {
        kind: RuleKind::ClauseConnector,
        applies: is_clause_connector,
        resolve: predicate_or_last,
    },
    Rule {
        kind: RuleKind::CaseParticle,
        applies: ends_in_case_particle,
        resolve: verb_or_last,
    },
    Rule {
        kind: RuleKind::Possessive,
        applies: ends_in_possessive,
        resolve: noun_or_next,
    },
    Rule {
        kind: RuleKind::Adverb,
        applies: |b| b.head_pos() == PartOfSpeech::Adverb,
        resolve: predicate_or_last,
    },
    Rule {
        kind: RuleKind::Adnominal,
        applies: |b| b.head_pos() == PartOfSpeech::Adnominal,
        resolve: noun_or_next,
    },
    Rule {
        kind: RuleKind::BareNoun,
        applies: |b| b.head_pos() == PartOfSpeech::Noun && b.last_morpheme().pos != PartOfSpeech::Particle,
        // No fallback of its own: falls through to the later rules.
        resolve: |bunsetsu, i| nearest_following(bunsetsu, i, PosMask::NOMINAL_OR_VERB),
    },
    Rule {
        kind: RuleKind::NonFinalVerb,
        applies: is_non_final_verb,
        resolve: predicate_or_last,
    },
    Rule {
        kind: RuleKind::Adjacent,
        applies: |_| true,
        resolve: |_, i| Some(i + 1),
    },
];

/// Assigns every non-final bunsetsu exactly one governing bunsetsu.
///
/// Produces `max(0, n - 1)` edges with `from` = 0, 1, ..., n - 2 in order.
pub fn estimate(bunsetsu: &[Bunsetsu]) -> Vec<DependencyEdge> {
    (0..bunsetsu.len().saturating_sub(1))
        .map(|i| DependencyEdge {
            from: BunsetsuId::from(i),
            to: BunsetsuId::from(resolve(bunsetsu, i).1),
            label: particle_label(&bunsetsu[i]),
        })
        .collect()
}

/// Index of the bunsetsu that `bunsetsu[i]` depends on; `None` for the last bunsetsu
/// or an index out of range.
pub fn find_target(bunsetsu: &[Bunsetsu], i: usize) -> Option<usize> {
    has_target(bunsetsu, i).then(|| resolve(bunsetsu, i).1)
}

/// Which rule decides the target of `bunsetsu[i]`.
pub fn explain(bunsetsu: &[Bunsetsu], i: usize) -> Option<RuleKind> {
    has_target(bunsetsu, i).then(|| resolve(bunsetsu, i).0)
}

/// Surface of the trailing particle of `bunsetsu[i]`, or an empty label.
/// The target does not influence the label.
pub fn label(bunsetsu: &[Bunsetsu], i: usize, _target: usize) -> Option<String> {
    bunsetsu.get(i).map(particle_label)
}

fn has_target(bunsetsu: &[Bunsetsu], i: usize) -> bool {
    i.checked_add(1).is_some_and(|next| next < bunsetsu.len())
}

fn particle_label(b: &Bunsetsu) -> String {
    let last = b.last_morpheme();
    if last.pos == PartOfSpeech::Particle {
        last.surface.clone()
    } else {
        String::new()
    }
}

fn resolve(bunsetsu: &[Bunsetsu], i: usize) -> (RuleKind, usize) {
    debug_assert!(i + 1 < bunsetsu.len(), "the last bunsetsu has no target");
    let source = &bunsetsu[i];

    let (kind, target) = RULES
        .iter()
        .filter(|rule| (rule.applies)(source))
        .find_map(|rule| (rule.resolve)(bunsetsu, i).map(|target| (rule.kind, target)))
        .unwrap_or((RuleKind::Adjacent, i + 1));

    trace!("{} {:?} -> {} via {:?}", i, source.surface, target, kind);
    (kind, target)
}

// --- Predicates ---

fn is_clause_connector(b: &Bunsetsu) -> bool {
    let last = b.last_morpheme();
    match last.pos {
        PartOfSpeech::Particle => CLAUSE_LINKING_PARTICLES.contains(&last.surface.as_str()),
        PartOfSpeech::AuxiliaryVerb => CLAUSE_LINKING_AUXILIARIES.contains(&last.base_form.as_str()),
        _ => false,
    }
}

fn ends_in_case_particle(b: &Bunsetsu) -> bool {
    let last = b.last_morpheme();
    last.pos == PartOfSpeech::Particle && CASE_PARTICLES.contains(&last.surface.as_str())
}

fn ends_in_possessive(b: &Bunsetsu) -> bool {
    let last = b.last_morpheme();
    last.pos == PartOfSpeech::Particle && last.surface == POSSESSIVE_PARTICLE
}

fn is_non_final_verb(b: &Bunsetsu) -> bool {
    let head = b.head_morpheme();
    if head.pos != PartOfSpeech::Verb {
        return false;
    }
    head.detail != PosDetail::Independent || ends_continuative(&b.last_morpheme().surface)
}

fn ends_continuative(surface: &str) -> bool {
    surface
        .chars()
        .next_back()
        .is_some_and(|c| CONTINUATIVE_CHARS.contains(&c))
}

// --- Resolvers ---

fn nearest_following(bunsetsu: &[Bunsetsu], i: usize, mask: PosMask) -> Option<usize> {
    (i + 1..bunsetsu.len()).find(|&j| mask.matches(bunsetsu[j].head_pos()))
}

fn predicate_or_last(bunsetsu: &[Bunsetsu], i: usize) -> Option<usize> {
    Some(nearest_following(bunsetsu, i, PosMask::PREDICATE).unwrap_or(bunsetsu.len() - 1))
}

fn verb_or_last(bunsetsu: &[Bunsetsu], i: usize) -> Option<usize> {
    Some(nearest_following(bunsetsu, i, PosMask::VERB).unwrap_or(bunsetsu.len() - 1))
}

// Falls back to the adjacent bunsetsu, unlike the verb and predicate searches.
fn noun_or_next(bunsetsu: &[Bunsetsu], i: usize) -> Option<usize> {
    Some(nearest_following(bunsetsu, i, PosMask::NOUN).unwrap_or(i + 1))
}

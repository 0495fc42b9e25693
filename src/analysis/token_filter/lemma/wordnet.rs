//! WordNet-style noun lemmatizer.
//!
//! A dictionary-free rendition of the WordNet morphy algorithm restricted to
//! nouns: an irregular-plural exception table is consulted first, then a set
//! of nouns that look plural but are not, then ordered suffix detachment
//! rules. Unmatched words pass through unchanged.
//!
//! Every output of the algorithm is a fixed point, so lemmatization is
//! idempotent. The suffix rules are guarded accordingly: no rule produces a
//! word that another rule (or the same rule) would rewrite again.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::Lemmatizer;

/// Identifier recorded in model artifacts for this algorithm.
pub const WORDNET_LEMMATIZER_NAME: &str = "wordnet-en-noun/1";

/// Irregular plural forms, from the WordNet noun exception list.
///
/// Only forms likely to appear in news text are carried; the full WordNet
/// list runs to several thousand entries, almost all of them rare.
const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("alumni", "alumnus"),
    ("analyses", "analysis"),
    ("appendices", "appendix"),
    ("bacteria", "bacterium"),
    ("bases", "base"),
    ("bonuses", "bonus"),
    ("buses", "bus"),
    ("businessmen", "businessman"),
    ("calves", "calf"),
    ("campuses", "campus"),
    ("canoes", "canoe"),
    ("censuses", "census"),
    ("chairmen", "chairman"),
    ("children", "child"),
    ("congressmen", "congressman"),
    ("cookies", "cookie"),
    ("countrymen", "countryman"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("curricula", "curriculum"),
    ("diagnoses", "diagnosis"),
    ("dice", "die"),
    ("elves", "elf"),
    ("emphases", "emphasis"),
    ("feet", "foot"),
    ("firemen", "fireman"),
    ("fishermen", "fisherman"),
    ("freshmen", "freshman"),
    ("fungi", "fungus"),
    ("geese", "goose"),
    ("gentlemen", "gentleman"),
    ("gunmen", "gunman"),
    ("halves", "half"),
    ("hooves", "hoof"),
    ("hypotheses", "hypothesis"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lice", "louse"),
    ("lives", "life"),
    ("loaves", "loaf"),
    ("matrices", "matrix"),
    ("memoranda", "memorandum"),
    ("men", "man"),
    ("mice", "mouse"),
    ("movies", "movie"),
    ("oases", "oasis"),
    ("oxen", "ox"),
    ("parentheses", "parenthesis"),
    ("people", "person"),
    ("phenomena", "phenomenon"),
    ("policemen", "policeman"),
    ("rookies", "rookie"),
    ("scarves", "scarf"),
    ("selfies", "selfie"),
    ("selves", "self"),
    ("servicemen", "serviceman"),
    ("shelves", "shelf"),
    ("shoes", "shoe"),
    ("spokesmen", "spokesman"),
    ("statuses", "status"),
    ("stimuli", "stimulus"),
    ("surpluses", "surplus"),
    ("syllabi", "syllabus"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("thieves", "thief"),
    ("viruses", "virus"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
    ("zombies", "zombie"),
];

/// Nouns that end in `s` (or look plural) but are already in dictionary form.
const INVARIANT_NOUNS: &[&str] = &[
    "athletics",
    "atlas",
    "bias",
    "canvas",
    "chaos",
    "clothes",
    "data",
    "diabetes",
    "economics",
    "ethics",
    "gymnastics",
    "headquarters",
    "kudos",
    "lens",
    "mathematics",
    "means",
    "measles",
    "media",
    "news",
    "pants",
    "physics",
    "politics",
    "rabies",
    "scissors",
    "series",
    "species",
    "statistics",
    "summons",
    "trousers",
    "whereabouts",
];

/// Suffix detachment rules, tried in order: (suffix, replacement, min chars).
///
/// The min-chars guard keeps short words like "ties" and "goes" on the plain
/// `-s` rule below instead.
const SUFFIX_RULES: &[(&str, &str, usize)] = &[
    ("sses", "ss", 5),
    ("ies", "y", 5),
    ("ches", "ch", 5),
    ("shes", "sh", 5),
    ("xes", "x", 5),
    ("zes", "z", 5),
    ("oes", "o", 5),
];

static NOUN_EXCEPTION_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| NOUN_EXCEPTIONS.iter().copied().collect());

static INVARIANT_NOUN_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| INVARIANT_NOUNS.iter().copied().collect());

/// A WordNet-style lemmatizer for English nouns.
///
/// # Examples
///
/// ```
/// use verifact::analysis::token_filter::lemma::{Lemmatizer, WordnetLemmatizer};
///
/// let lemmatizer = WordnetLemmatizer::new();
/// assert_eq!(lemmatizer.lemma("stories"), "story");
/// assert_eq!(lemmatizer.lemma("children"), "child");
/// assert_eq!(lemmatizer.lemma("news"), "news");
/// ```
#[derive(Clone, Debug, Default)]
pub struct WordnetLemmatizer;

impl WordnetLemmatizer {
    /// Create a new WordNet-style noun lemmatizer.
    pub fn new() -> Self {
        WordnetLemmatizer
    }

    fn apply_suffix_rules(word: &str) -> Option<String> {
        let chars = word.chars().count();

        for &(suffix, replacement, min_chars) in SUFFIX_RULES {
            if chars >= min_chars {
                if let Some(stem) = word.strip_suffix(suffix) {
                    return Some(format!("{stem}{replacement}"));
                }
            }
        }

        // Plain -s detachment. Words ending in "ss", "us" or "is" are left
        // alone ("class", "virus", "crisis"), as are words of three
        // characters or fewer ("gas", "its").
        if chars > 3
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
            && let Some(stem) = word.strip_suffix('s')
        {
            return Some(stem.to_string());
        }

        None
    }
}

impl Lemmatizer for WordnetLemmatizer {
    fn lemma(&self, word: &str) -> String {
        if let Some(&base) = NOUN_EXCEPTION_MAP.get(word) {
            return base.to_string();
        }

        if INVARIANT_NOUN_SET.contains(word) {
            return word.to_string();
        }

        match Self::apply_suffix_rules(word) {
            Some(base) => base,
            None => word.to_string(),
        }
    }

    fn name(&self) -> &'static str {
        WORDNET_LEMMATIZER_NAME
    }
}

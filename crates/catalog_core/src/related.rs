//! Maps free-text story search terms onto the era/category vocabularies.

const ERAS: [&str; 6] = ["Sporting", "United", "Madrid", "Juventus", "Portugal", "Al-Nassr"];

const CATEGORIES: [&str; 6] = [
    "jerseys",
    "boots",
    "memorabilia",
    "collectibles",
    "signed_items",
    "cards",
];

const ERA_SYNONYMS: &[(&str, &str)] = &[
    ("lisbon", "Sporting"),
    ("manchester", "United"),
    ("ferguson", "United"),
    ("trafford", "United"),
    ("real", "Madrid"),
    ("bernabeu", "Madrid"),
    ("galactico", "Madrid"),
    ("juve", "Juventus"),
    ("turin", "Juventus"),
    ("selecao", "Portugal"),
    ("euro", "Portugal"),
    ("nassr", "Al-Nassr"),
    ("saudi", "Al-Nassr"),
    ("riyadh", "Al-Nassr"),
];

const CATEGORY_SYNONYMS: &[(&str, &str)] = &[
    ("shirt", "jerseys"),
    ("jersey", "jerseys"),
    ("kit", "jerseys"),
    ("boot", "boots"),
    ("cleats", "boots"),
    ("signed", "signed_items"),
    ("autograph", "signed_items"),
    ("card", "cards"),
    ("collectible", "collectibles"),
];

/// Filter dimensions recognised in a set of search terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedFilter {
    pub era: Option<String>,
    pub category: Option<String>,
}

impl RelatedFilter {
    pub fn is_empty(&self) -> bool {
        self.era.is_none() && self.category.is_none()
    }
}

/// Resolves comma/whitespace separated terms; the first term matching a
/// dimension decides it.
pub fn resolve_related(terms: &str) -> RelatedFilter {
    let mut related = RelatedFilter::default();
    for term in terms
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
    {
        if related.era.is_none() {
            related.era = match_term(&term, &ERAS, ERA_SYNONYMS);
        }
        if related.category.is_none() {
            related.category = match_term(&term, &CATEGORIES, CATEGORY_SYNONYMS);
        }
        if related.era.is_some() && related.category.is_some() {
            break;
        }
    }
    related
}

fn match_term(term: &str, vocabulary: &[&str], synonyms: &[(&str, &str)]) -> Option<String> {
    vocabulary
        .iter()
        .find(|word| word.eq_ignore_ascii_case(term))
        .or_else(|| {
            synonyms
                .iter()
                .find(|(synonym, _)| *synonym == term)
                .map(|(_, target)| target)
        })
        .map(|word| (*word).to_string())
}

//! Skill, experience and education extraction from free text.

use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use crate::skills::{skills_by_category, SYNONYMS};

/// Minimum fuzzy score (0..=100) for a word to count as a skill mention.
pub const FUZZY_THRESHOLD: f64 = 80.0;

// ============================================================================
// Skills
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillMatches {
    pub exact_matches: Vec<String>,
    pub fuzzy_matches: Vec<String>,
    pub by_category: BTreeMap<String, Vec<String>>,
}

impl SkillMatches {
    /// Exact and fuzzy matches together.
    pub fn all(&self) -> BTreeSet<String> {
        self.exact_matches
            .iter()
            .chain(self.fuzzy_matches.iter())
            .cloned()
            .collect()
    }
}

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\w+\b").expect("valid word pattern"))
}

/// Length of the longest common subsequence of two char slices.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diag = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diag + 1
            } else {
                above.max(row[j])
            };
            diag = above;
        }
    }
    row[b.len()]
}

/// Indel similarity of two strings on a 0..=100 scale.
///
/// Only insertions and deletions count, so a substitution costs two edits:
/// `(la + lb - indel) / (la + lb)`, which equals `2 * lcs / (la + lb)`.
pub fn fuzzy_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    (2 * lcs_len(&a, &b)) as f64 / total as f64 * 100.0
}

/// Best-scoring candidate for `word`; the first one wins ties.
fn best_match<'a>(word: &str, candidates: &[&'a str]) -> Option<(&'a str, f64)> {
    candidates.iter().fold(None, |best, candidate| {
        let score = fuzzy_ratio(word, candidate);
        match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((*candidate, score)),
        }
    })
}

/// Find known skills in `text`.
///
/// A skill matches exactly when its name occurs anywhere in the lowercased
/// text. Each remaining word longer than two characters is then compared
/// against the skills not yet found, and synonyms credit their canonical
/// skill.
pub fn extract_skills(text: &str, skill_list: &[&str], threshold: f64) -> SkillMatches {
    use rayon::prelude::*;

    let text_lower = text.to_lowercase();
    let mut found = SkillMatches::default();

    for skill in skill_list {
        if text_lower.contains(&skill.to_lowercase()) {
            found.exact_matches.push(skill.to_string());
        }
    }

    let remaining: Vec<&str> = skill_list
        .iter()
        .copied()
        .filter(|skill| !found.exact_matches.iter().any(|m| m == skill))
        .collect();

    let words: Vec<&str> = word_re()
        .find_iter(&text_lower)
        .map(|m| m.as_str())
        .filter(|word| word.chars().count() > 2)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let fuzzy: BTreeSet<String> = words
        .par_iter()
        .filter_map(|word| best_match(word, &remaining))
        .filter(|(_, score)| *score >= threshold)
        .map(|(skill, _)| skill.to_string())
        .collect();
    found.fuzzy_matches = fuzzy.into_iter().collect();

    for (skill, synonyms) in SYNONYMS {
        let known = found.exact_matches.iter().any(|m| m == skill)
            || found.fuzzy_matches.iter().any(|m| m == skill);
        if !known && synonyms.iter().any(|syn| text_lower.contains(syn)) {
            found.exact_matches.push(skill.to_string());
        }
    }

    let all_found = found.all();
    for (category, category_skills) in skills_by_category() {
        let in_category: Vec<String> = all_found
            .iter()
            .filter(|skill| category_skills.contains(&skill.as_str()))
            .cloned()
            .collect();
        if !in_category.is_empty() {
            found.by_category.insert(category.to_string(), in_category);
        }
    }

    found
}

// ============================================================================
// Experience
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Entry,
    Mid,
    Senior,
    Executive,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Entry => "entry",
            Level::Mid => "mid",
            Level::Senior => "senior",
            Level::Executive => "executive",
        }
    }
}

const LEVEL_KEYWORDS: [(Level, &[&str]); 4] = [
    (
        Level::Entry,
        &["entry level", "junior", "graduate", "fresher", "trainee", "intern"],
    ),
    (
        Level::Mid,
        &["mid level", "intermediate", "experienced", "specialist"],
    ),
    (
        Level::Senior,
        &["senior", "lead", "principal", "staff", "expert"],
    ),
    (
        Level::Executive,
        &[
            "director", "manager", "head", "chief", "vp", "vice president", "ceo", "cto", "cfo",
        ],
    ),
];

const YEARS_PATTERNS: [&str; 6] = [
    r"(\d+)\+?\s*years?\s*(?:of\s*)?experience",
    r"(\d+)\+?\s*yrs?\s*(?:of\s*)?experience",
    r"experience.*?(\d+)\+?\s*years?",
    r"(\d+)\+?\s*years?\s*in",
    r"over\s*(\d+)\s*years?",
    r"more\s*than\s*(\d+)\s*years?",
];

fn years_res() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        YEARS_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("valid years pattern"))
            .collect()
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceProfile {
    /// Every year count mentioned, pattern by pattern.
    pub years_mentioned: Vec<u32>,
    pub max_years: u32,
    pub average_years: f64,
    pub levels_detected: Vec<Level>,
    pub inferred_level: Level,
}

pub fn infer_level_from_years(years: u32) -> Level {
    match years {
        0..=2 => Level::Entry,
        3..=5 => Level::Mid,
        6..=10 => Level::Senior,
        _ => Level::Executive,
    }
}

pub fn extract_experience_level(text: &str) -> ExperienceProfile {
    let text_lower = text.to_lowercase();

    let years_mentioned: Vec<u32> = years_res()
        .iter()
        .flat_map(|re| {
            re.captures_iter(&text_lower)
                .filter_map(|caps| caps[1].parse::<u32>().ok())
                .collect::<Vec<_>>()
        })
        .collect();

    let levels_detected: Vec<Level> = LEVEL_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| text_lower.contains(k)))
        .map(|(level, _)| *level)
        .collect();

    let max_years = years_mentioned.iter().copied().max().unwrap_or(0);
    let average_years = if years_mentioned.is_empty() {
        0.0
    } else {
        let total: f64 = years_mentioned.iter().map(|&y| f64::from(y)).sum();
        round_to(total / years_mentioned.len() as f64, 1)
    };

    ExperienceProfile {
        years_mentioned,
        max_years,
        average_years,
        levels_detected,
        inferred_level: infer_level_from_years(max_years),
    }
}

// ============================================================================
// Education
// ============================================================================

const DEGREES: [(&str, &[&str]); 4] = [
    ("phd", &["ph.d", "phd", "doctorate", "doctoral"]),
    (
        "masters",
        &["master", "msc", "m.sc", "ma", "m.a", "mba", "m.b.a", "mtech", "m.tech"],
    ),
    (
        "bachelors",
        &["bachelor", "bsc", "b.sc", "ba", "b.a", "btech", "b.tech", "be", "b.e"],
    ),
    ("associates", &["associate", "diploma", "certification"]),
];

const INSTITUTION_PATTERNS: [&str; 4] = [
    r"university of \w+",
    r"\w+ university",
    r"\w+ college",
    r"\w+ institute",
];

fn institution_res() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        INSTITUTION_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("valid institution pattern"))
            .collect()
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EducationInfo {
    pub degrees: Vec<String>,
    pub institutions: Vec<String>,
}

pub fn extract_education(text: &str) -> EducationInfo {
    let text_lower = text.to_lowercase();

    let degrees = DEGREES
        .iter()
        .filter(|(_, variations)| variations.iter().any(|v| text_lower.contains(v)))
        .map(|(degree, _)| degree.to_string())
        .collect();

    let institutions: BTreeSet<String> = institution_res()
        .iter()
        .flat_map(|re| {
            re.find_iter(&text_lower)
                .map(|m| m.as_str().to_string())
                .collect::<Vec<_>>()
        })
        .collect();

    EducationInfo {
        degrees,
        institutions: institutions.into_iter().collect(),
    }
}

/// Round to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

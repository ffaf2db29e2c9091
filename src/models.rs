//! Data models for match reports.
//!
//! Everything here serializes to the JSON returned by `/api/analyze` and is
//! what the results page renders from.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::extractor::{EducationInfo, ExperienceProfile, SkillMatches};
use crate::preprocess::Sections;

// ============================================================================
// Scores
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionScore {
    /// Similarity of the two sections, 0..=100.
    pub score: f64,
    pub weight: f64,
    /// `score / 100 * weight`
    pub weighted_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentScores {
    pub semantic_similarity: f64,
    pub skill_match: f64,
    pub experience_match: f64,
    pub section_scores: BTreeMap<String, SectionScore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperienceMatch {
    pub years_match_score: f64,
    pub level_match_score: f64,
    pub resume_experience: ExperienceProfile,
    pub jd_requirements: ExperienceProfile,
    pub overall_experience_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeywordDensity {
    pub count: usize,
    /// Occurrences per hundred words, two decimals.
    pub density: f64,
}

// ============================================================================
// Suggestions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    CriticalSkills,
    AdditionalSkills,
    Experience,
    Keywords,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

// ============================================================================
// Report
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct EducationComparison {
    pub resume: EducationInfo,
    pub jd: EducationInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub overall_match_score: f64,
    pub component_scores: ComponentScores,
    pub resume_skills: SkillMatches,
    pub jd_skills: SkillMatches,
    pub common_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub experience_analysis: ExperienceMatch,
    pub education_info: EducationComparison,
    pub keyword_density: BTreeMap<String, KeywordDensity>,
    pub improvement_suggestions: Vec<Suggestion>,
    pub resume_sections: Sections,
}

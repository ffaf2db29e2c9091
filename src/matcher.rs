//! Resume vs. job description scoring.

use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::extractor::{
    extract_education, extract_experience_level, extract_skills, round_to, ExperienceProfile,
    SkillMatches, FUZZY_THRESHOLD,
};
use crate::models::{
    ComponentScores, EducationComparison, ExperienceMatch, KeywordDensity, MatchReport, Priority,
    SectionScore, Suggestion, SuggestionKind,
};
use crate::preprocess::{extract_sections, Section, Sections};
use crate::similarity::compute_similarity;

pub const SIMILARITY_WEIGHT: f64 = 0.25;
pub const SKILL_WEIGHT: f64 = 0.35;
pub const EXPERIENCE_WEIGHT: f64 = 0.25;

/// Section weights. They sum to one, so the section term adds at most 1.0.
pub const SECTION_WEIGHTS: [(Section, f64); 5] = [
    (Section::Skills, 0.35),
    (Section::Experience, 0.30),
    (Section::Education, 0.15),
    (Section::Projects, 0.10),
    (Section::Certifications, 0.10),
];

/// Missing skills containing one of these are flagged as critical.
const CRITICAL_KEYWORDS: [&str; 6] = ["python", "java", "sql", "aws", "react", "machine learning"];

const MAX_LISTED_SKILLS: usize = 5;
const MAX_DENSITY_KEYWORDS: usize = 10;

/// How often each keyword occurs as a whole word, per hundred words.
pub fn calculate_keyword_density(text: &str, keywords: &[String]) -> BTreeMap<String, KeywordDensity> {
    let text_lower = text.to_lowercase();
    let word_count = text_lower.split_whitespace().count();

    keywords
        .iter()
        .map(|keyword| {
            let pattern = format!(r"\b{}\b", regex::escape(&keyword.to_lowercase()));
            let count = Regex::new(&pattern)
                .map(|re| re.find_iter(&text_lower).count())
                .unwrap_or(0);
            let density = if word_count > 0 {
                round_to(count as f64 / word_count as f64 * 100.0, 2)
            } else {
                0.0
            };
            (keyword.clone(), KeywordDensity { count, density })
        })
        .collect()
}

/// Similarity of each weighted section. A section missing from either side
/// scores 0.
pub fn calculate_section_scores(resume: &Sections, jd: &Sections) -> BTreeMap<String, SectionScore> {
    SECTION_WEIGHTS
        .iter()
        .map(|(section, weight)| {
            let (left, right) = (resume.get(*section), jd.get(*section));
            let score = if left.is_empty() || right.is_empty() {
                0.0
            } else {
                compute_similarity(left, right).clamp(0.0, 100.0)
            };
            (
                section.as_str().to_string(),
                SectionScore {
                    score,
                    weight: *weight,
                    weighted_score: score / 100.0 * weight,
                },
            )
        })
        .collect()
}

fn years_match_score(resume_years: u32, jd_years: u32) -> f64 {
    let (have, want) = (f64::from(resume_years), f64::from(jd_years));
    if jd_years == 0 || resume_years >= jd_years {
        100.0
    } else if have >= want * 0.7 {
        80.0
    } else if have >= want * 0.5 {
        60.0
    } else {
        40.0
    }
}

pub fn analyze_experience_match(resume_exp: &ExperienceProfile, jd_text: &str) -> ExperienceMatch {
    let jd_exp = extract_experience_level(jd_text);

    let years_match = years_match_score(resume_exp.max_years, jd_exp.max_years);

    let jd_levels: HashSet<_> = jd_exp.levels_detected.iter().collect();
    let level_match = if jd_levels.is_empty() {
        100.0
    } else {
        let common = resume_exp
            .levels_detected
            .iter()
            .filter(|level| jd_levels.contains(level))
            .count();
        common as f64 / jd_levels.len() as f64 * 100.0
    };

    ExperienceMatch {
        years_match_score: years_match,
        level_match_score: level_match,
        resume_experience: resume_exp.clone(),
        jd_requirements: jd_exp,
        overall_experience_score: (years_match + level_match) / 2.0,
    }
}

pub fn generate_improvement_suggestions(
    resume_skills: &SkillMatches,
    jd_skills: &SkillMatches,
    experience: &ExperienceMatch,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let resume_all = resume_skills.all();
    let jd_all = jd_skills.all();

    let (critical, nice_to_have): (Vec<&String>, Vec<&String>) = jd_all
        .difference(&resume_all)
        .partition(|skill| CRITICAL_KEYWORDS.iter().any(|k| skill.contains(k)));

    if !critical.is_empty() {
        suggestions.push(Suggestion {
            kind: SuggestionKind::CriticalSkills,
            title: "Critical Skills Missing".to_string(),
            description: format!(
                "Add these important skills to your resume: {}",
                join_first(&critical, MAX_LISTED_SKILLS)
            ),
            priority: Priority::High,
        });
    }

    if !nice_to_have.is_empty() {
        suggestions.push(Suggestion {
            kind: SuggestionKind::AdditionalSkills,
            title: "Additional Skills to Consider".to_string(),
            description: format!(
                "Consider highlighting these skills if you have them: {}",
                join_first(&nice_to_have, MAX_LISTED_SKILLS)
            ),
            priority: Priority::Medium,
        });
    }

    if experience.overall_experience_score < 80.0 && experience.years_match_score < 80.0 {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Experience,
            title: "Experience Level".to_string(),
            description: "Highlight relevant experience more prominently or consider gaining more experience in the required areas".to_string(),
            priority: Priority::High,
        });
    }

    if (resume_all.len() as f64) < jd_all.len() as f64 * 0.5 {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Keywords,
            title: "Keyword Optimization".to_string(),
            description: "Include more relevant keywords from the job description in your resume"
                .to_string(),
            priority: Priority::Medium,
        });
    }

    suggestions
}

fn join_first(items: &[&String], max: usize) -> String {
    items
        .iter()
        .take(max)
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Score a normalized resume against a normalized job description.
///
/// The section term is added on top of the three weighted components, so
/// the total is clamped to 100.
pub fn match_resume(resume_text: &str, jd_text: &str, skills: &[&str]) -> MatchReport {
    let resume_sections = extract_sections(resume_text);
    let jd_sections = extract_sections(jd_text);

    let similarity = compute_similarity(resume_text, jd_text);

    let resume_skills = extract_skills(resume_text, skills, FUZZY_THRESHOLD);
    let jd_skills = extract_skills(jd_text, skills, FUZZY_THRESHOLD);
    let resume_all = resume_skills.all();
    let jd_all = jd_skills.all();

    let common: BTreeSet<String> = resume_all.intersection(&jd_all).cloned().collect();
    let missing: Vec<String> = jd_all.difference(&resume_all).cloned().collect();
    let skill_match = if jd_all.is_empty() {
        100.0
    } else {
        common.len() as f64 / jd_all.len() as f64 * 100.0
    };

    let resume_experience = extract_experience_level(resume_text);
    let experience = analyze_experience_match(&resume_experience, jd_text);

    let section_scores = calculate_section_scores(&resume_sections, &jd_sections);
    let section_sum: f64 = section_scores.values().map(|s| s.weighted_score).sum();

    let final_score = (similarity / 100.0 * SIMILARITY_WEIGHT
        + skill_match / 100.0 * SKILL_WEIGHT
        + experience.overall_experience_score / 100.0 * EXPERIENCE_WEIGHT
        + section_sum)
        * 100.0;

    let improvement_suggestions =
        generate_improvement_suggestions(&resume_skills, &jd_skills, &experience);

    let jd_keywords: Vec<String> = jd_all.iter().take(MAX_DENSITY_KEYWORDS).cloned().collect();
    let keyword_density = calculate_keyword_density(resume_text, &jd_keywords);

    MatchReport {
        overall_match_score: round_to(final_score.clamp(0.0, 100.0), 2),
        component_scores: ComponentScores {
            semantic_similarity: round_to(similarity, 2),
            skill_match: round_to(skill_match, 2),
            experience_match: round_to(experience.overall_experience_score, 2),
            section_scores,
        },
        education_info: EducationComparison {
            resume: extract_education(resume_text),
            jd: extract_education(jd_text),
        },
        resume_skills,
        jd_skills,
        common_skills: common.into_iter().collect(),
        missing_skills: missing,
        experience_analysis: experience,
        keyword_density,
        improvement_suggestions,
        resume_sections,
    }
}

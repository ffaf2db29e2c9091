//! Text cleanup and resume section detection.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Minimum distance, in characters, from a section heading to the next heading.
const MIN_SECTION_LEN: usize = 50;

// ============================================================================
// Cleaning
// ============================================================================

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

fn special_chars_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s\-.,()]").expect("valid special char pattern"))
}

/// Collapse whitespace and blank out everything except word characters and
/// basic punctuation.
pub fn clean_text(text: &str) -> String {
    let text = whitespace_re().replace_all(text, " ");
    let text = special_chars_re().replace_all(&text, " ");
    let text = whitespace_re().replace_all(&text, " ");
    text.trim().to_string()
}

/// Cleaned, lowercased text. Both documents go through this before matching.
pub fn normalize(text: &str) -> String {
    clean_text(text).to_lowercase()
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Contact => "contact",
            Section::Summary => "summary",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Certifications => "certifications",
        }
    }
}

/// Heading patterns in lookup order. `Contact` has none and stays empty.
const HEADINGS: [(Section, &str); 6] = [
    (
        Section::Experience,
        r"(?i)(experience|work experience|employment|career|professional experience)",
    ),
    (
        Section::Education,
        r"(?i)(education|academic|degree|university|college|school)",
    ),
    (
        Section::Skills,
        r"(?i)(skills|technical skills|competencies|expertise|technologies)",
    ),
    (Section::Projects, r"(?i)(projects|personal projects|work projects)"),
    (Section::Certifications, r"(?i)(certifications|certificates|licenses)"),
    (Section::Summary, r"(?i)(summary|objective|profile|about)"),
];

fn heading_res() -> &'static [(Section, Regex)] {
    static RES: OnceLock<Vec<(Section, Regex)>> = OnceLock::new();
    RES.get_or_init(|| {
        HEADINGS
            .iter()
            .map(|(section, pattern)| {
                (*section, Regex::new(pattern).expect("valid heading pattern"))
            })
            .collect()
    })
}

/// Text of each resume section, empty when no heading was found.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sections {
    pub contact: String,
    pub summary: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub projects: String,
    pub certifications: String,
}

impl Sections {
    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Contact => &self.contact,
            Section::Summary => &self.summary,
            Section::Experience => &self.experience,
            Section::Education => &self.education,
            Section::Skills => &self.skills,
            Section::Projects => &self.projects,
            Section::Certifications => &self.certifications,
        }
    }

    fn slot(&mut self, section: Section) -> &mut String {
        match section {
            Section::Contact => &mut self.contact,
            Section::Summary => &mut self.summary,
            Section::Experience => &mut self.experience,
            Section::Education => &mut self.education,
            Section::Skills => &mut self.skills,
            Section::Projects => &mut self.projects,
            Section::Certifications => &mut self.certifications,
        }
    }
}

/// Split text into sections by their first heading match.
///
/// A section starts at its heading and runs to the earliest match of any
/// other heading found at least 50 characters further on, or to the end.
pub fn extract_sections(text: &str) -> Sections {
    let mut sections = Sections::default();
    let headings = heading_res();

    for (section, re) in headings {
        let Some(found) = re.find(text) else {
            continue;
        };
        let start = found.start();
        let search_from = text[start..]
            .char_indices()
            .nth(MIN_SECTION_LEN)
            .map_or(text.len(), |(offset, _)| start + offset);

        let end = headings
            .iter()
            .filter(|(other, _)| other != section)
            .filter_map(|(_, other_re)| other_re.find_at(text, search_from))
            .map(|m| m.start())
            .min()
            .unwrap_or(text.len());

        *sections.slot(*section) = text[start..end].trim().to_string();
    }

    sections
}

//! Results page for a finished analysis.

use serde_json::json;

use crate::models::MatchReport;

use super::components::{base_html, format_list, format_percentage, html_escape};

const LISTED_SKILLS: usize = 5;

fn score_class(score: f64) -> &'static str {
    if score >= 70.0 {
        "score-good"
    } else if score >= 50.0 {
        "score-fair"
    } else {
        "score-poor"
    }
}

/// A labelled bar that starts empty; the page script animates it to `value`.
fn score_bar(id: &str, label: &str, value: f64) -> String {
    format!(
        r#"<div class="mb-3">
            <div class="d-flex justify-content-between"><span>{label}</span><span>{pct}</span></div>
            <div class="progress">
                <div id="{id}" class="progress-bar" role="progressbar" style="width: 0%" data-target="{value}">0</div>
            </div>
        </div>"#,
        label = html_escape(label),
        pct = format_percentage(value),
        id = id,
        value = value,
    )
}

fn skill_badges(skills: &[String], class: &str) -> String {
    if skills.is_empty() {
        return r#"<span class="text-muted">None</span>"#.to_string();
    }
    let mut html: String = format_list(skills, LISTED_SKILLS)
        .iter()
        .map(|s| format!(r#"<span class="badge {} skill-badge">{}</span>"#, class, html_escape(s)))
        .collect();
    if skills.len() > LISTED_SKILLS {
        html.push_str(&format!(
            r#"<span class="text-muted small ms-1">+{} more</span>"#,
            skills.len() - LISTED_SKILLS
        ));
    }
    html
}

pub fn render_results(report: &MatchReport) -> String {
    let scores = &report.component_scores;

    let mut bars = vec![
        score_bar("bar-similarity", "Text Similarity", scores.semantic_similarity),
        score_bar("bar-skills", "Skill Match", scores.skill_match),
        score_bar("bar-experience", "Experience Match", scores.experience_match),
    ];
    for (name, section) in &scores.section_scores {
        bars.push(score_bar(
            &format!("bar-section-{}", name),
            &format!("{} section", name),
            section.score,
        ));
    }
    let bar_targets: Vec<_> = std::iter::once(("bar-similarity", scores.semantic_similarity))
        .chain([
            ("bar-skills", scores.skill_match),
            ("bar-experience", scores.experience_match),
        ])
        .map(|(id, v)| json!([id, v]))
        .chain(
            scores
                .section_scores
                .iter()
                .map(|(name, s)| json!([format!("bar-section-{}", name), s.score])),
        )
        .collect();

    let suggestions: String = if report.improvement_suggestions.is_empty() {
        r#"<p class="text-muted">Your resume already covers this role well.</p>"#.to_string()
    } else {
        report
            .improvement_suggestions
            .iter()
            .map(|s| {
                format!(
                    r#"<div class="suggestion priority-{priority}">
                        <h6>{title} <span class="badge bg-secondary">{priority}</span></h6>
                        <p class="mb-0">{description}</p>
                    </div>"#,
                    priority = s.priority.as_str(),
                    title = html_escape(&s.title),
                    description = html_escape(&s.description),
                )
            })
            .collect()
    };

    let chart_data: serde_json::Map<String, serde_json::Value> = report
        .resume_skills
        .by_category
        .iter()
        .map(|(category, skills)| (category.clone(), json!(skills.len())))
        .collect();

    let experience = &report.experience_analysis;
    let education = &report.education_info;

    let content = format!(
        r##"
    <div class="container py-4">
        <nav class="nav nav-pills mb-4">
            <a class="nav-link" href="#overview">Overview</a>
            <a class="nav-link" href="#skills">Skills</a>
            <a class="nav-link" href="#experience">Experience</a>
            <a class="nav-link" href="#suggestions">Suggestions</a>
            <a class="nav-link ms-auto" href="/"><i class="fas fa-redo me-1"></i>New analysis</a>
        </nav>

        <div id="overview" class="card shadow-sm mb-4 animate-on-scroll">
            <div class="card-body row align-items-center">
                <div class="col-md-4 text-center">
                    <div class="score-circle {score_class}">{overall}</div>
                    <p class="mt-2 text-muted">Overall match</p>
                </div>
                <div class="col-md-8">
                    {bars}
                </div>
            </div>
        </div>

        <div id="skills" class="card shadow-sm mb-4 animate-on-scroll">
            <div class="card-body">
                <h5>Skills</h5>
                <p class="mb-1">Matched</p>
                <div class="mb-3">{common}</div>
                <p class="mb-1">Missing</p>
                <div class="mb-3">{missing}</div>
                <button type="button" class="btn btn-sm btn-outline-primary" data-bs-toggle="tooltip"
                        title="Copy the missing skills list" data-copy="{missing_text}"
                        onclick="window.ResumeMatcherApp &amp;&amp; ResumeMatcherApp.copyToClipboard(this.dataset.copy)">
                    <i class="fas fa-copy me-1"></i>Copy missing skills
                </button>
                <canvas id="skillsChart" class="d-none"></canvas>
            </div>
        </div>

        <div id="experience" class="card shadow-sm mb-4 animate-on-scroll">
            <div class="card-body">
                <h5>Experience &amp; Education</h5>
                <ul class="mb-0">
                    <li>Resume: {resume_years} years, level <strong>{resume_level}</strong></li>
                    <li>Role asks for: {jd_years} years, level <strong>{jd_level}</strong></li>
                    <li>Degrees on resume: {degrees}</li>
                    <li>Degrees in role: {jd_degrees}</li>
                </ul>
            </div>
        </div>

        <div id="suggestions" class="card shadow-sm mb-4 animate-on-scroll">
            <div class="card-body">
                <h5>Suggestions</h5>
                {suggestions}
            </div>
        </div>
    </div>

    <script>
    document.addEventListener('resume-matcher:ready', () => {{
        const bars = {bar_targets};
        for (const [id, value] of bars) {{
            ResumeMatcherApp.animateProgressBar(id, value);
        }}
        ResumeMatcherApp.createSkillsChart('skillsChart', {chart_data});
    }});
    </script>
    "##,
        score_class = score_class(report.overall_match_score),
        overall = format_percentage(report.overall_match_score),
        bars = bars.join("\n"),
        common = skill_badges(&report.common_skills, "bg-success"),
        missing = skill_badges(&report.missing_skills, "bg-danger"),
        missing_text = html_escape(&report.missing_skills.join(", ")),
        resume_years = experience.resume_experience.max_years,
        resume_level = experience.resume_experience.inferred_level.as_str(),
        jd_years = experience.jd_requirements.max_years,
        jd_level = experience.jd_requirements.inferred_level.as_str(),
        degrees = html_escape(&list_or_none(&education.resume.degrees)),
        jd_degrees = html_escape(&list_or_none(&education.jd.degrees)),
        suggestions = suggestions,
        bar_targets = serde_json::Value::Array(bar_targets),
        chart_data = serde_json::Value::Object(chart_data),
    );

    base_html("Results", &content, None)
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

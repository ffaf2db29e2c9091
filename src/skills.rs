//! Built-in skills database.
//!
//! Skills are lowercase phrases grouped by category. A few appear in more
//! than one category (`swift`, `kotlin`, `java`); [`all_skills`] lists each
//! once.

use std::collections::HashSet;

pub const TECHNICAL_SKILLS: &[(&str, &[&str])] = &[
    (
        "programming_languages",
        &[
            "python", "java", "javascript", "typescript", "c++", "c#", "php", "ruby", "go",
            "rust", "swift", "kotlin", "scala", "matlab", "perl", "shell", "bash", "powershell",
            "sql", "plsql", "nosql", "html", "css", "sass", "scss", "less",
        ],
    ),
    (
        "web_frameworks",
        &[
            "react", "angular", "vue", "svelte", "next.js", "nuxt.js", "gatsby", "django",
            "flask", "fastapi", "express", "node.js", "spring", "spring boot", "laravel",
            "symfony", "rails", "asp.net", "blazor",
        ],
    ),
    (
        "databases",
        &[
            "mysql", "postgresql", "sqlite", "mongodb", "redis", "elasticsearch", "cassandra",
            "dynamodb", "oracle", "sql server", "mariadb", "neo4j", "influxdb", "couchdb",
            "firebase",
        ],
    ),
    (
        "cloud_platforms",
        &[
            "aws", "azure", "gcp", "google cloud", "heroku", "vercel", "netlify",
            "digitalocean", "linode", "ibm cloud", "oracle cloud",
        ],
    ),
    (
        "devops_tools",
        &[
            "docker", "kubernetes", "jenkins", "gitlab ci", "github actions", "terraform",
            "ansible", "puppet", "chef", "vagrant", "nginx", "apache", "prometheus", "grafana",
            "elk stack", "splunk",
        ],
    ),
    (
        "ml_ai",
        &[
            "machine learning", "deep learning", "neural networks", "tensorflow", "pytorch",
            "keras", "scikit-learn", "pandas", "numpy", "opencv", "nlp", "computer vision",
            "reinforcement learning", "transformers", "bert", "gpt", "langchain",
            "hugging face",
        ],
    ),
    (
        "data_science",
        &[
            "data analysis", "data visualization", "statistics", "tableau", "power bi",
            "jupyter", "spark", "hadoop", "kafka", "airflow", "dbt", "snowflake", "databricks",
        ],
    ),
    (
        "mobile_development",
        &[
            "ios", "android", "react native", "flutter", "xamarin", "ionic", "swift",
            "objective-c", "kotlin", "java",
        ],
    ),
    (
        "testing",
        &[
            "unit testing", "integration testing", "selenium", "cypress", "jest", "pytest",
            "junit", "testng", "postman", "api testing",
        ],
    ),
    (
        "version_control",
        &["git", "github", "gitlab", "bitbucket", "svn", "mercurial"],
    ),
];

pub const SOFT_SKILLS: &[&str] = &[
    "leadership", "communication", "teamwork", "problem solving", "analytical thinking",
    "creativity", "adaptability", "time management", "project management",
    "critical thinking", "collaboration", "presentation skills", "mentoring", "coaching",
    "negotiation", "customer service", "attention to detail", "multitasking",
    "decision making", "strategic thinking", "innovation", "emotional intelligence",
    "conflict resolution",
];

pub const CERTIFICATIONS: &[&str] = &[
    "aws certified", "azure certified", "google cloud certified", "pmp", "scrum master",
    "product owner", "cissp", "cisa", "ceh", "comptia", "cisco certified",
    "oracle certified", "microsoft certified", "salesforce certified",
    "kubernetes certified",
];

/// Canonical skill -> alternative spellings that also count as a mention.
pub const SYNONYMS: &[(&str, &[&str])] = &[
    ("javascript", &["js", "node.js", "nodejs"]),
    ("python", &["py"]),
    ("machine learning", &["ml", "artificial intelligence", "ai"]),
    ("deep learning", &["dl", "neural networks", "nn"]),
    ("natural language processing", &["nlp"]),
    ("computer vision", &["cv", "image processing"]),
    ("user interface", &["ui"]),
    ("user experience", &["ux"]),
    ("application programming interface", &["api"]),
    ("structured query language", &["sql"]),
    ("cascading style sheets", &["css"]),
    ("hypertext markup language", &["html"]),
    ("amazon web services", &["aws"]),
    ("google cloud platform", &["gcp", "google cloud"]),
    ("microsoft azure", &["azure"]),
    ("continuous integration", &["ci"]),
    ("continuous deployment", &["cd"]),
    ("test driven development", &["tdd"]),
    ("object oriented programming", &["oop"]),
    ("representational state transfer", &["rest", "restful"]),
    ("graphql", &["graph ql"]),
    ("kubernetes", &["k8s"]),
    ("elasticsearch", &["elastic search"]),
];

/// Every category including soft skills and certifications, in display order.
pub fn skills_by_category() -> Vec<(&'static str, &'static [&'static str])> {
    let mut categories = TECHNICAL_SKILLS.to_vec();
    categories.push(("soft_skills", SOFT_SKILLS));
    categories.push(("certifications", CERTIFICATIONS));
    categories
}

/// Flat list of every known skill, each listed once.
pub fn all_skills() -> Vec<&'static str> {
    let mut seen = HashSet::new();
    skills_by_category()
        .into_iter()
        .flat_map(|(_, skills)| skills.iter().copied())
        .filter(|skill| seen.insert(*skill))
        .collect()
}

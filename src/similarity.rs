//! Lexical similarity between a resume and a job description.
//!
//! Both texts are vectorized with TF-IDF over unigrams and bigrams (English
//! stop words removed) and compared by cosine similarity.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::extractor::round_to;

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "almost", "also", "am", "among",
    "an", "and", "any", "are", "around", "as", "at", "be", "became", "because", "been",
    "before", "being", "below", "between", "both", "but", "by", "can", "cannot", "could", "did",
    "do", "does", "doing", "done", "down", "during", "each", "either", "else", "etc", "even",
    "ever", "every", "few", "for", "from", "further", "had", "has", "have", "having", "he",
    "her", "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "ie",
    "if", "in", "into", "is", "it", "its", "itself", "just", "least", "less", "many", "may",
    "me", "might", "more", "most", "much", "must", "my", "myself", "neither", "no", "nor",
    "not", "now", "of", "off", "often", "on", "once", "one", "only", "or", "other", "others",
    "otherwise", "our", "ours", "ourselves", "out", "over", "own", "per", "perhaps", "please",
    "rather", "same", "several", "she", "should", "since", "so", "some", "still", "such",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "therefore", "these", "they", "this", "those", "though", "through", "thus", "to", "too",
    "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were", "what",
    "whatever", "when", "where", "whether", "which", "while", "who", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("valid token pattern"))
}

/// Unigram and bigram counts of a text. Bigrams are formed after stop
/// word removal.
pub fn term_counts(text: &str) -> HashMap<String, usize> {
    let lower = text.to_lowercase();
    let tokens: Vec<&str> = token_re()
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !stop_words().contains(t))
        .collect();

    let mut counts = HashMap::new();
    for token in &tokens {
        *counts.entry(token.to_string()).or_insert(0) += 1;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_insert(0) += 1;
    }
    counts
}

/// L2-normalized TF-IDF vectors for a set of documents, using smoothed
/// IDF: `ln((1 + n) / (1 + df)) + 1`.
fn tfidf_vectors(docs: &[HashMap<String, usize>]) -> Vec<HashMap<&str, f64>> {
    let n = docs.len() as f64;
    let mut df: HashMap<&str, usize> = HashMap::new();
    for doc in docs {
        for term in doc.keys() {
            *df.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    docs.iter()
        .map(|doc| {
            let mut vector: HashMap<&str, f64> = doc
                .iter()
                .map(|(term, &count)| {
                    let idf = ((1.0 + n) / (1.0 + df[term.as_str()] as f64)).ln() + 1.0;
                    (term.as_str(), count as f64 * idf)
                })
                .collect();
            let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                vector.values_mut().for_each(|w| *w /= norm);
            }
            vector
        })
        .collect()
}

/// Cosine similarity of two texts on a 0..=100 scale, rounded to two
/// decimals. Blank input scores 0.
pub fn compute_similarity(a: &str, b: &str) -> f64 {
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.0;
    }

    let docs = [term_counts(a), term_counts(b)];
    let vectors = tfidf_vectors(&docs);
    let (left, right) = (&vectors[0], &vectors[1]);

    let dot: f64 = left
        .iter()
        .filter_map(|(term, w)| right.get(term).map(|v| w * v))
        .sum();

    round_to((dot * 100.0).clamp(0.0, 100.0), 2)
}

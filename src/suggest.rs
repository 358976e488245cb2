use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const MAX_RECENT: usize = 50;
pub const MAX_DISTANCE: usize = 2;
pub const MIN_QUERY_LEN: usize = 3;

const COMMON_TERMS: &[&str] = &[
    "developer",
    "engineer",
    "software",
    "frontend",
    "backend",
    "fullstack",
    "python",
    "java",
    "javascript",
    "typescript",
    "react",
    "golang",
    "rust",
    "devops",
    "cloud",
    "data",
    "analyst",
    "designer",
    "product",
    "manager",
    "marketing",
    "sales",
    "support",
    "writer",
    "copywriter",
    "accountant",
    "finance",
    "recruiter",
    "security",
    "mobile",
    "android",
    "ios",
    "consultant",
    "remote",
];

/// "Did you mean" over recent successful queries followed by a fixed term
/// list. Recent queries win ties because they are scanned first.
#[derive(Debug, Default)]
pub struct SuggestionEngine {
    recent: Mutex<VecDeque<String>>,
}

impl SuggestionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn recent_guard(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.recent.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record_success(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        let mut recent = self.recent_guard();
        if recent.iter().any(|q| q == query) {
            return;
        }
        recent.push_back(query.to_string());
        while recent.len() > MAX_RECENT {
            recent.pop_front();
        }
    }

    pub fn recent(&self) -> Vec<String> {
        self.recent_guard().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.recent_guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent_guard().is_empty()
    }

    pub fn suggest(&self, query: Option<&str>, result_count: usize) -> Option<String> {
        if result_count > 0 {
            return None;
        }
        let query = query?;
        if query.chars().count() < MIN_QUERY_LEN {
            return None;
        }

        let recent = self.recent();
        let candidates = recent
            .iter()
            .map(String::as_str)
            .chain(COMMON_TERMS.iter().copied());
        closest(query, candidates).map(str::to_string)
    }
}

/// First candidate within `MAX_DISTANCE` with the strictly smallest distance.
fn closest<'a>(query: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let query = query.to_lowercase();
    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        let dist = strsim::levenshtein(&query, &candidate.to_lowercase());
        if dist > MAX_DISTANCE {
            continue;
        }
        if best.is_none_or(|(_, best_dist)| dist < best_dist) {
            best = Some((candidate, dist));
        }
    }
    best.map(|(candidate, _)| candidate)
}

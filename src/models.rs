use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which search field a term belongs to. Each kind has its own generic-term
/// set and its own normalization rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Query,
    Location,
    Industry,
}

impl FieldKind {
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Query => "query",
            FieldKind::Location => "location",
            FieldKind::Industry => "industry",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: i64,
    pub url: String,
    pub slug: String,
    pub title: String,
    pub company_name: String,
    pub company_logo: String,
    pub industries: Vec<String>,
    pub job_types: Vec<String>,
    pub geo: String,
    pub level: String,
    pub excerpt: String,
    pub description: String,
    pub pub_date: String,
    pub salary_min: i64, // 0 = unknown
    pub salary_max: i64, // 0 = unknown
    pub salary_currency: String,
    pub rating: u8, // 0-5
    pub comment: Option<String>,
}

impl JobRecord {
    pub const MAX_RATING: u8 = 5;

    pub fn with_rating(&self, rating: u8) -> Self {
        Self {
            rating: rating.min(Self::MAX_RATING),
            ..self.clone()
        }
    }

    pub fn with_comment(&self, comment: Option<String>) -> Self {
        Self {
            comment,
            ..self.clone()
        }
    }

    pub fn published(&self) -> Option<NaiveDateTime> {
        let raw = self.pub_date.trim();
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
    }

    pub fn salary_range(&self) -> Option<String> {
        let currency = if self.salary_currency.is_empty() {
            String::new()
        } else {
            format!(" {}", self.salary_currency)
        };
        match (self.salary_min, self.salary_max) {
            (0, 0) => None,
            (min, 0) => Some(format!("{}+{}", min, currency)),
            (0, max) => Some(format!("up to {}{}", max, currency)),
            (min, max) => Some(format!("{}-{}{}", min, max, currency)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub count: Option<i64>,
    pub location: Option<String>,
    pub industry: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizationNote {
    QueryDefaulted,
    CountDefaulted,
    GenericOmitted(FieldKind),
    Unrecognized { kind: FieldKind, term: String },
    AllGeneric,
}

impl fmt::Display for NormalizationNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationNote::QueryDefaulted => f.write_str("query defaulted to all"),
            NormalizationNote::CountDefaulted => f.write_str("count defaulted"),
            NormalizationNote::GenericOmitted(kind) => write!(f, "{} omitted: generic", kind),
            NormalizationNote::Unrecognized { kind, term } => {
                write!(f, "{} dropped: unrecognized '{}'", kind, term)
            }
            NormalizationNote::AllGeneric => f.write_str("All search parameters were generic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    pub query: String,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub count: u32,
    pub notes: Vec<NormalizationNote>,
}

impl NormalizedRequest {
    pub fn warning(&self) -> Option<String> {
        self.notes
            .iter()
            .find(|note| matches!(note, NormalizationNote::AllGeneric))
            .map(|note| note.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub jobs: Vec<JobRecord>,
    pub warning: Option<String>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

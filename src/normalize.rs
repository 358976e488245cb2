use once_cell::sync::Lazy;
use regex::Regex;

use crate::generic::{ALL_QUERY, is_generic};
use crate::models::{FieldKind, NormalizationNote, NormalizedRequest, SearchRequest};
use crate::vocabulary::{Lookup, Vocabulary};

pub const DEFAULT_COUNT: u32 = 5;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
enum FilterOutcome {
    Resolved(String),
    Generic,
    Unrecognized(String),
}

pub fn normalize(request: &SearchRequest, vocabulary: &Vocabulary) -> NormalizedRequest {
    let mut notes = Vec::new();

    let (query, query_generic) = normalize_query(request.query.as_deref());
    if query_generic {
        notes.push(NormalizationNote::QueryDefaulted);
    }

    let count = match request.count {
        Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => {
            notes.push(NormalizationNote::CountDefaulted);
            DEFAULT_COUNT
        }
    };

    let location = normalize_filter(FieldKind::Location, request.location.as_deref(), vocabulary);
    let industry = normalize_filter(FieldKind::Industry, request.industry.as_deref(), vocabulary);

    let all_generic = query_generic
        && location == FilterOutcome::Generic
        && industry == FilterOutcome::Generic;

    let location = into_code(FieldKind::Location, location, &mut notes);
    let industry = into_code(FieldKind::Industry, industry, &mut notes);

    if all_generic {
        notes.push(NormalizationNote::AllGeneric);
    }

    NormalizedRequest {
        query,
        location,
        industry,
        count,
        notes,
    }
}

fn normalize_query(query: Option<&str>) -> (String, bool) {
    match query.map(str::trim) {
        None | Some("") => (ALL_QUERY.to_string(), true),
        Some(q) if is_generic(FieldKind::Query, q) => (ALL_QUERY.to_string(), true),
        Some(q) => (WHITESPACE_RUN.replace_all(q, "+").into_owned(), false),
    }
}

fn normalize_filter(kind: FieldKind, term: Option<&str>, vocabulary: &Vocabulary) -> FilterOutcome {
    let term = match term.map(str::trim) {
        None | Some("") => return FilterOutcome::Generic,
        Some(t) => t,
    };
    if is_generic(kind, term) {
        return FilterOutcome::Generic;
    }
    match vocabulary.resolve(kind, term) {
        Lookup::Found(code) => FilterOutcome::Resolved(code.to_string()),
        Lookup::NotFound => FilterOutcome::Unrecognized(term.to_string()),
    }
}

fn into_code(
    kind: FieldKind,
    outcome: FilterOutcome,
    notes: &mut Vec<NormalizationNote>,
) -> Option<String> {
    match outcome {
        FilterOutcome::Resolved(code) => Some(code),
        FilterOutcome::Generic => {
            notes.push(NormalizationNote::GenericOmitted(kind));
            None
        }
        FilterOutcome::Unrecognized(term) => {
            tracing::debug!("Dropping unrecognized {kind} '{term}'");
            notes.push(NormalizationNote::Unrecognized { kind, term });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::VocabularyMap;

    fn fixture() -> Vocabulary {
        Vocabulary::new(
            VocabularyMap::from_reader("term,code\naustria,austria\n".as_bytes()).unwrap(),
            VocabularyMap::from_reader("term,code\ndevops & sysadmin,admin\n".as_bytes()).unwrap(),
        )
    }

    #[test]
    fn test_query_passthrough_and_whitespace() {
        let vocab = fixture();
        assert_eq!(normalize(&SearchRequest::new("python"), &vocab).query, "python");
        assert_eq!(
            normalize(&SearchRequest::new("  Data   Science\tLead "), &vocab).query,
            "Data+Science+Lead"
        );
    }

    #[test]
    fn test_query_defaults_to_all() {
        let vocab = fixture();
        for q in ["", "   ", "all", "ANY", "all jobs"] {
            let req = normalize(&SearchRequest::new(q), &vocab);
            assert_eq!(req.query, "all", "query {q:?}");
            assert!(req.notes.contains(&NormalizationNote::QueryDefaulted));
        }
        assert_eq!(normalize(&SearchRequest::default(), &vocab).query, "all");
    }

    #[test]
    fn test_count_defaults() {
        let vocab = fixture();
        assert_eq!(normalize(&SearchRequest::new("rust"), &vocab).count, 5);
        assert_eq!(normalize(&SearchRequest::new("rust").count(0), &vocab).count, 5);
        assert_eq!(normalize(&SearchRequest::new("rust").count(-3), &vocab).count, 5);
        assert_eq!(normalize(&SearchRequest::new("rust").count(20), &vocab).count, 20);
    }

    #[test]
    fn test_filters_resolved() {
        let req = normalize(
            &SearchRequest::new("python")
                .location("Austria")
                .industry("DevOps & Sysadmin"),
            &fixture(),
        );
        assert_eq!(req.location.as_deref(), Some("austria"));
        assert_eq!(req.industry.as_deref(), Some("admin"));
        assert!(req.notes.is_empty());
        assert_eq!(req.warning(), None);
    }

    #[test]
    fn test_unrecognized_filters_dropped_with_note() {
        let req = normalize(
            &SearchRequest::new("python").location("atlantis").industry("piracy"),
            &fixture(),
        );
        assert_eq!(req.location, None);
        assert_eq!(req.industry, None);
        assert!(req.notes.contains(&NormalizationNote::Unrecognized {
            kind: FieldKind::Location,
            term: "atlantis".to_string(),
        }));
        assert!(req.notes.contains(&NormalizationNote::Unrecognized {
            kind: FieldKind::Industry,
            term: "piracy".to_string(),
        }));
        assert_eq!(req.warning(), None);
    }

    #[test]
    fn test_all_generic_warning() {
        let req = normalize(
            &SearchRequest::new("all").location("anywhere").industry("any"),
            &fixture(),
        );
        assert_eq!(req.location, None);
        assert_eq!(req.industry, None);
        assert_eq!(req.warning().as_deref(), Some("All search parameters were generic"));
    }

    #[test]
    fn test_generic_query_with_unrecognized_filter_is_not_all_generic() {
        let req = normalize(
            &SearchRequest::new("all").location("atlantis").industry("any"),
            &fixture(),
        );
        assert_eq!(req.warning(), None);
    }

    #[test]
    fn test_absent_filters_count_as_generic() {
        let req = normalize(&SearchRequest::default(), &fixture());
        assert!(req.notes.contains(&NormalizationNote::GenericOmitted(FieldKind::Location)));
        assert!(req.warning().is_some());
    }
}

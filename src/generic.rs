use crate::models::FieldKind;

pub const ALL_QUERY: &str = "all";

const GENERIC_QUERY: &[&str] = &["any", "all", "all jobs", "any job", "anything", "everything", "*"];

const GENERIC_LOCATION: &[&str] = &[
    "any",
    "all",
    "anywhere",
    "everywhere",
    "worldwide",
    "any location",
    "all locations",
    "*",
];

const GENERIC_INDUSTRY: &[&str] = &[
    "any",
    "all",
    "anywhere",
    "any industry",
    "all industries",
    "*",
];

fn generic_terms(kind: FieldKind) -> &'static [&'static str] {
    match kind {
        FieldKind::Query => GENERIC_QUERY,
        FieldKind::Location => GENERIC_LOCATION,
        FieldKind::Industry => GENERIC_INDUSTRY,
    }
}

pub fn is_generic(kind: FieldKind, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    generic_terms(kind).contains(&term.as_str())
}

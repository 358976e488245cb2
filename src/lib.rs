//! Remote job feed search: request normalization against filter
//! vocabularies, a single-round-trip feed client, entity decoding of feed
//! text, and "did you mean" suggestions for queries that found nothing.

pub mod client;
pub mod config;
pub mod entities;
pub mod error;
pub mod generic;
pub mod models;
pub mod normalize;
pub mod session;
pub mod suggest;
pub mod vocabulary;

pub use client::{JobSearchClient, Transport};
pub use config::ClientConfig;
pub use entities::decode;
pub use models::{FieldKind, JobRecord, NormalizedRequest, SearchRequest, SearchResult};
pub use session::SearchSession;
pub use suggest::SuggestionEngine;
pub use vocabulary::{Lookup, Vocabulary, VocabularyMap};

use std::sync::Arc;

use crate::client::JobSearchClient;
use crate::config::ClientConfig;
use crate::entities;
use crate::error::FetchError;
use crate::models::{SearchRequest, SearchResult};
use crate::suggest::SuggestionEngine;
use crate::vocabulary::Vocabulary;

/// The synchronous surface a front end talks to: search, remember what
/// worked, suggest corrections, and clean stored text.
pub struct SearchSession {
    client: JobSearchClient,
    suggestions: SuggestionEngine,
}

impl SearchSession {
    pub fn new(config: ClientConfig, vocabulary: Arc<Vocabulary>) -> Result<Self, FetchError> {
        Ok(Self::with_client(JobSearchClient::new(config, vocabulary)?))
    }

    pub fn with_client(client: JobSearchClient) -> Self {
        Self {
            client,
            suggestions: SuggestionEngine::new(),
        }
    }

    pub fn client(&self) -> &JobSearchClient {
        &self.client
    }

    pub fn suggestions(&self) -> &SuggestionEngine {
        &self.suggestions
    }

    pub fn search(
        &self,
        query: Option<&str>,
        count: Option<i64>,
        location: Option<&str>,
        industry: Option<&str>,
    ) -> SearchResult {
        let request = SearchRequest {
            query: query.map(String::from),
            count,
            location: location.map(String::from),
            industry: industry.map(String::from),
        };
        self.client.search(&request)
    }

    pub fn record_successful_query(&self, query: &str) {
        self.suggestions.record_success(query);
    }

    pub fn suggest(&self, query: Option<&str>, result_count: usize) -> Option<String> {
        self.suggestions.suggest(query, result_count)
    }

    pub fn did_you_mean(&self, query: Option<&str>, result_count: usize) -> Option<String> {
        self.suggest(query, result_count)
            .map(|s| format!("Did you mean '{}'?", s))
    }

    pub fn decode(&self, text: Option<&str>) -> Option<String> {
        entities::decode_opt(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{HttpResponse, Transport};

    struct FixedTransport(&'static str);

    impl Transport for FixedTransport {
        fn get(&self, _url: &str) -> Result<HttpResponse, FetchError> {
            Ok(HttpResponse {
                status: 200,
                body: self.0.to_string(),
            })
        }
    }

    fn session(body: &'static str) -> SearchSession {
        let client = JobSearchClient::with_transport(
            ClientConfig::default(),
            Arc::new(Vocabulary::bundled()),
            Box::new(FixedTransport(body)),
        );
        SearchSession::with_client(client)
    }

    #[test]
    fn test_search_then_suggest_flow() {
        let s = session(r#"{"jobs":[{"id":1,"jobTitle":"Python Dev"}]}"#);
        let result = s.search(Some("python"), Some(5), Some("austria"), None);
        assert_eq!(result.jobs.len(), 1);
        s.record_successful_query("python");

        let empty = session(r#"{"jobs":[]}"#);
        let miss = empty.search(Some("ython"), None, None, None);
        assert!(miss.is_empty());
        assert_eq!(s.suggest(Some("ython"), miss.jobs.len()), Some("python".to_string()));
        assert_eq!(
            s.did_you_mean(Some("ython"), 0).as_deref(),
            Some("Did you mean 'python'?")
        );
        assert_eq!(s.suggestions().recent(), vec!["python".to_string()]);
    }

    #[test]
    fn test_fresh_session_suggests_from_common_terms() {
        let s = session(r#"{"jobs":[]}"#);
        let miss = s.search(Some("enginer"), None, None, None);
        assert!(miss.is_empty());
        assert!(s.suggestions().is_empty());
        assert_eq!(
            s.did_you_mean(Some("enginer"), miss.jobs.len()).as_deref(),
            Some("Did you mean 'engineer'?")
        );
        assert_eq!(s.did_you_mean(Some("kubernets"), 0), None);
    }

    #[test]
    fn test_decode_surface() {
        let s = session("{}");
        assert_eq!(s.decode(None), None);
        assert_eq!(s.decode(Some("")), Some(String::new()));
        assert_eq!(s.decode(Some("&amp;amp;")), Some("&".to_string()));
    }
}

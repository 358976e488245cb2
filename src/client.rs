use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, InvalidHeaderValue, USER_AGENT};
use serde_json::Value;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::entities::decode;
use crate::error::FetchError;
use crate::models::{JobRecord, NormalizedRequest, SearchRequest, SearchResult};
use crate::normalize::normalize;
use crate::vocabulary::Vocabulary;

pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// One blocking GET. Implementations must not retry.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

// Unreserved characters plus '+', which already stands for a space in the tag.
const TAG_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'+');

pub fn request_headers(config: &ClientConfig) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let headers = request_headers(config)
            .map_err(|e| FetchError::Transport(format!("invalid user agent: {e}")))?;
        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

pub struct JobSearchClient {
    config: ClientConfig,
    vocabulary: Arc<Vocabulary>,
    transport: Box<dyn Transport>,
}

impl JobSearchClient {
    pub fn new(config: ClientConfig, vocabulary: Arc<Vocabulary>) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, vocabulary, Box::new(transport)))
    }

    pub fn with_transport(
        config: ClientConfig,
        vocabulary: Arc<Vocabulary>,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            config,
            vocabulary,
            transport,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn prepare(&self, request: &SearchRequest) -> (NormalizedRequest, String) {
        let normalized = normalize(request, &self.vocabulary);
        let url = build_url(&self.config.feed_url(), &normalized);
        (normalized, url)
    }

    /// Never fails: transport and parse problems come back as the warning.
    pub fn search(&self, request: &SearchRequest) -> SearchResult {
        let (normalized, url) = self.prepare(request);
        for note in &normalized.notes {
            tracing::debug!("Normalized: {note}");
        }
        tracing::debug!("Fetching {url}");

        let mut warnings: Vec<String> = normalized.warning().into_iter().collect();
        let jobs = match self.fetch(&url) {
            Ok((jobs, skipped)) => {
                if skipped > 0 {
                    warnings.push(format!("Skipped {skipped} job(s) missing an id or title"));
                }
                jobs
            }
            Err(e) => {
                tracing::warn!("Job search failed: {e}");
                warnings.push(e.to_string());
                Vec::new()
            }
        };

        SearchResult {
            jobs,
            warning: (!warnings.is_empty()).then(|| warnings.join("; ")),
        }
    }

    fn fetch(&self, url: &str) -> Result<(Vec<JobRecord>, usize), FetchError> {
        let response = self.transport.get(url)?;
        if !(200..300).contains(&response.status) {
            return Err(FetchError::Status(response.status));
        }
        if response.body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }
        parse_payload(&response.body)
    }
}

/// Parameter order is fixed: count, geo, industry, tag.
pub fn build_url(feed_url: &str, request: &NormalizedRequest) -> String {
    let mut params = vec![format!("count={}", request.count)];
    if let Some(geo) = &request.location {
        params.push(format!("geo={geo}"));
    }
    if let Some(industry) = &request.industry {
        params.push(format!("industry={industry}"));
    }
    params.push(format!(
        "tag={}",
        utf8_percent_encode(&request.query, TAG_ENCODE_SET)
    ));
    format!("{}?{}", feed_url, params.join("&"))
}

// Records plus the number of entries skipped for lacking an id or title.
pub fn parse_payload(body: &str) -> Result<(Vec<JobRecord>, usize), FetchError> {
    let payload: Value = serde_json::from_str(body)?;
    let Value::Object(fields) = payload else {
        return Err(FetchError::Malformed("expected a JSON object".to_string()));
    };
    let raw_jobs = match fields.get("jobs") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(_) => return Err(FetchError::Malformed("'jobs' is not an array".to_string())),
    };
    let total = raw_jobs.len();
    let jobs: Vec<JobRecord> = raw_jobs.iter().filter_map(parse_job).collect();
    let skipped = total - jobs.len();
    Ok((jobs, skipped))
}

fn parse_job(raw: &Value) -> Option<JobRecord> {
    let id = number(raw.get("id")?)?;
    let title = text(raw, "jobTitle");
    if title.trim().is_empty() {
        return None;
    }

    Some(JobRecord {
        id,
        url: plain(raw, "url"),
        slug: plain(raw, "jobSlug"),
        title,
        company_name: text(raw, "companyName"),
        company_logo: plain(raw, "companyLogo"),
        industries: tags(raw, "jobIndustry"),
        job_types: tags(raw, "jobType"),
        geo: text(raw, "jobGeo"),
        level: text(raw, "jobLevel"),
        excerpt: text(raw, "jobExcerpt"),
        description: text(raw, "jobDescription"),
        pub_date: plain(raw, "pubDate"),
        salary_min: raw.get("annualSalaryMin").and_then(number).unwrap_or(0),
        salary_max: raw.get("annualSalaryMax").and_then(number).unwrap_or(0),
        salary_currency: plain(raw, "salaryCurrency"),
        rating: 0,
        comment: None,
    })
}

// Integers may arrive as numbers, floats, or numeric strings.
fn number(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let digits: String = s.trim().chars().filter(|c| *c != ',').collect();
            digits
                .parse::<i64>()
                .ok()
                .or_else(|| digits.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

fn plain(raw: &Value, key: &str) -> String {
    match raw.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn text(raw: &Value, key: &str) -> String {
    decode(&plain(raw, key))
}

fn tags(raw: &Value, key: &str) -> Vec<String> {
    match raw.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(decode)
            .filter(|t| !t.is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![decode(s)],
        _ => Vec::new(),
    }
}

use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::VocabularyError;
use crate::models::FieldKind;

const BUNDLED_LOCATIONS: &str = include_str!("../config/locations.csv");
const BUNDLED_INDUSTRIES: &str = include_str!("../config/industries.csv");

pub const LOCATIONS_FILE: &str = "locations.csv";
pub const INDUSTRIES_FILE: &str = "industries.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a str),
    NotFound,
}

impl<'a> Lookup<'a> {
    pub fn code(self) -> Option<&'a str> {
        match self {
            Lookup::Found(code) => Some(code),
            Lookup::NotFound => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VocabularyMap {
    entries: HashMap<String, String>,
}

impl VocabularyMap {
    /// Parse `term,code` rows after a header line. Rows missing either side
    /// are skipped; the first occurrence of a term wins.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, VocabularyError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut entries = HashMap::new();
        for record in rdr.records() {
            let record = record?;
            let (Some(term), Some(code)) = (record.get(0), record.get(1)) else {
                continue;
            };
            if term.is_empty() || code.is_empty() {
                continue;
            }
            entries
                .entry(term.to_lowercase())
                .or_insert_with(|| code.to_string());
        }
        Ok(Self { entries })
    }

    pub fn from_path(path: &Path) -> Result<Self, VocabularyError> {
        let file = File::open(path).map_err(|source| VocabularyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn load_or_empty(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("{e}; continuing without this filter vocabulary");
                Self::default()
            }
        }
    }

    pub fn lookup(&self, term: &str) -> Lookup<'_> {
        match self.entries.get(&term.trim().to_lowercase()) {
            Some(code) => Lookup::Found(code),
            None => Lookup::NotFound,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<_> = self
            .entries
            .iter()
            .map(|(term, code)| (term.as_str(), code.as_str()))
            .collect();
        out.sort();
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    locations: VocabularyMap,
    industries: VocabularyMap,
}

impl Vocabulary {
    pub fn new(locations: VocabularyMap, industries: VocabularyMap) -> Self {
        Self {
            locations,
            industries,
        }
    }

    pub fn bundled() -> Self {
        Self::new(
            parse_bundled(BUNDLED_LOCATIONS),
            parse_bundled(BUNDLED_INDUSTRIES),
        )
    }

    /// Explicit path first, then the per-user config directory, then the
    /// bundled table. An explicit path that fails to load leaves that table
    /// empty rather than silently substituting another one.
    pub fn load(locations: Option<&Path>, industries: Option<&Path>) -> Self {
        let vocab = Self::new(
            load_table(locations, LOCATIONS_FILE, BUNDLED_LOCATIONS),
            load_table(industries, INDUSTRIES_FILE, BUNDLED_INDUSTRIES),
        );
        tracing::info!(
            "Loaded vocabularies: {} locations, {} industries",
            vocab.locations.len(),
            vocab.industries.len()
        );
        vocab
    }

    pub fn table(&self, kind: FieldKind) -> Option<&VocabularyMap> {
        match kind {
            FieldKind::Location => Some(&self.locations),
            FieldKind::Industry => Some(&self.industries),
            FieldKind::Query => None,
        }
    }

    pub fn resolve(&self, kind: FieldKind, term: &str) -> Lookup<'_> {
        match self.table(kind) {
            Some(table) => table.lookup(term),
            None => Lookup::NotFound,
        }
    }
}

pub fn user_config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "jobfeed").map(|dirs| dirs.config_dir().to_path_buf())
}

fn load_table(explicit: Option<&Path>, file_name: &str, bundled: &str) -> VocabularyMap {
    if let Some(path) = explicit {
        return VocabularyMap::load_or_empty(path);
    }
    if let Some(path) = user_config_dir().map(|dir| dir.join(file_name))
        && path.is_file()
    {
        tracing::debug!("Using vocabulary from {}", path.display());
        return VocabularyMap::load_or_empty(&path);
    }
    parse_bundled(bundled)
}

fn parse_bundled(data: &str) -> VocabularyMap {
    VocabularyMap::from_reader(data.as_bytes()).unwrap_or_else(|e| {
        tracing::warn!("Bundled vocabulary unreadable: {e}");
        VocabularyMap::default()
    })
}

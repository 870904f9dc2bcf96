use serde::{Deserialize, Serialize};

/// One row per document, as returned by `/fetch_results/{project}`. The
/// backend spells the field names with spaces; keywords arrive as
/// `[word, distance]` pairs with distance in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "Document Name")]
    pub document_name: String,
    #[serde(rename = "Keywords", default)]
    pub keywords: Vec<(String, f64)>,
}

impl MatchResult {
    pub fn match_count(&self) -> usize {
        self.keywords.len()
    }

    /// Flattened keyword list used by the local text filter.
    pub fn keyword_words(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|(word, _)| word.as_str())
    }
}

/// Fixed three-band legend for the distance score. Lower distance means a
/// stronger match in this system's convention. The boundaries are cosmetic
/// only and must not be read as a scoring contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceBand {
    Strong,
    Moderate,
    Weak,
    Unbanded,
}

impl DistanceBand {
    pub fn from_distance(distance: f64) -> Self {
        if (0.20..0.50).contains(&distance) {
            DistanceBand::Strong
        } else if (0.50..0.80).contains(&distance) {
            DistanceBand::Moderate
        } else if (0.80..1.0).contains(&distance) {
            DistanceBand::Weak
        } else {
            DistanceBand::Unbanded
        }
    }

    /// CSS color the webview uses for the legend.
    pub fn color(self) -> &'static str {
        match self {
            DistanceBand::Strong => "#52c41a",
            DistanceBand::Moderate => "#faad14",
            DistanceBand::Weak => "#ff4d4f",
            DistanceBand::Unbanded => "#d9d9d9",
        }
    }
}

/// Per-file scan status from `/status_data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStatus {
    pub file_name: String,
    #[serde(default)]
    pub scanned: bool,
    #[serde(default)]
    pub scanned_time: Option<String>,
}

impl FileStatus {
    /// Backend timestamps arrive as naive `YYYY-MM-DD HH:MM:SS` strings;
    /// anything else renders unparsed.
    pub fn scanned_at(&self) -> Option<chrono::NaiveDateTime> {
        self.scanned_time
            .as_deref()
            .and_then(|raw| chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok())
    }
}

/// Client-side merge of one match row and one status row, keyed by
/// filename. Either half may be missing: the two fetches are independent
/// and the backend state can move between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOverview {
    pub file_name: String,
    pub keywords: Vec<(String, f64)>,
    pub scanned: bool,
    pub scanned_time: Option<String>,
}

/// One text split of a document, from `/fetch_docresults/{filename}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocChunk {
    pub text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub page: Option<u32>,
}

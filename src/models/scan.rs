use serde::{Deserialize, Serialize};

/// Server-side recall/precision knob. The client only forwards the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    Focused,
    #[default]
    Balanced,
    Broad,
}

impl SearchScope {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchScope::Focused => "focused",
            SearchScope::Balanced => "balanced",
            SearchScope::Broad => "broad",
        }
    }
}

/// Which documents a scan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentSelection {
    #[default]
    All,
    OnlyUnscanned,
}

/// Working set of search terms for one project's next scan. Transient:
/// created when the new-scan view mounts, discarded on navigation away.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanDraft {
    pub keywords: Vec<String>,
    pub synonyms: Vec<String>,
    pub scope: SearchScope,
    pub selection: DocumentSelection,
}

impl ScanDraft {
    /// Appends a keyword. Empty input and exact duplicates are rejected
    /// silently; returns whether the list changed.
    pub fn add_keyword(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() || self.keywords.iter().any(|k| k == keyword) {
            return false;
        }
        self.keywords.push(keyword.to_string());
        true
    }

    /// Removes the first exact match; no-op if absent.
    pub fn remove_keyword(&mut self, keyword: &str) {
        if let Some(pos) = self.keywords.iter().position(|k| k == keyword) {
            self.keywords.remove(pos);
        }
    }

    /// Removing a synonym only touches the synonym list, even when the same
    /// value also appears among the keywords.
    pub fn remove_synonym(&mut self, synonym: &str) {
        if let Some(pos) = self.synonyms.iter().position(|s| s == synonym) {
            self.synonyms.remove(pos);
        }
    }

    /// Replaces the synonym list wholesale with a fresh generation.
    pub fn replace_synonyms(&mut self, synonyms: Vec<String>) {
        self.synonyms = synonyms;
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.synonyms.is_empty()
    }

    /// Ordered union submitted to the backend: keywords first, then any
    /// synonyms not already present verbatim.
    pub fn combined_terms(&self) -> Vec<String> {
        let mut terms = self.keywords.clone();
        for syn in &self.synonyms {
            if !terms.iter().any(|t| t == syn) {
                terms.push(syn.clone());
            }
        }
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_keyword_rejects_empty_and_duplicates() {
        let mut draft = ScanDraft::default();
        assert!(!draft.add_keyword(""));
        assert!(!draft.add_keyword("   "));
        assert!(draft.add_keyword("invoice"));
        assert!(!draft.add_keyword("invoice"));
        assert_eq!(draft.keywords, vec!["invoice"]);
    }

    #[test]
    fn add_keyword_is_case_sensitive() {
        let mut draft = ScanDraft::default();
        assert!(draft.add_keyword("Invoice"));
        assert!(draft.add_keyword("invoice"));
        assert_eq!(draft.keywords.len(), 2);
    }

    #[test]
    fn remove_keyword_absent_is_noop() {
        let mut draft = ScanDraft::default();
        draft.add_keyword("invoice");
        draft.remove_keyword("contract");
        assert_eq!(draft.keywords.len(), 1);
        draft.remove_keyword("invoice");
        assert!(draft.keywords.is_empty());
    }

    #[test]
    fn remove_synonym_leaves_keywords_alone() {
        let mut draft = ScanDraft::default();
        draft.add_keyword("machine");
        draft.replace_synonyms(vec!["machine".to_string(), "apparaat".to_string()]);
        draft.remove_synonym("machine");
        assert_eq!(draft.keywords, vec!["machine"]);
        assert_eq!(draft.synonyms, vec!["apparaat"]);
    }

    #[test]
    fn combined_terms_is_ordered_union() {
        let mut draft = ScanDraft::default();
        draft.add_keyword("machine");
        draft.add_keyword("contract");
        draft.replace_synonyms(vec!["apparaat".to_string(), "machine".to_string()]);
        assert_eq!(draft.combined_terms(), vec!["machine", "contract", "apparaat"]);
    }

    #[test]
    fn scope_defaults_to_balanced() {
        assert_eq!(ScanDraft::default().scope, SearchScope::Balanced);
        assert_eq!(SearchScope::default().as_str(), "balanced");
    }
}

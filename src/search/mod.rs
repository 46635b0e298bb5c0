use serde::{Deserialize, Serialize};

/// One row of the predictions table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRow {
    pub url: String,
    pub prediction: String,
    #[serde(default)]
    pub legitimate_suggestion: Option<String>,
}

/// Case-insensitive substring filter over URL and suggestion text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilter {
    term: String,
}

impl SearchFilter {
    pub fn new(term: &str) -> Self {
        Self {
            term: term.to_lowercase(),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn matches(&self, row: &PredictionRow) -> bool {
        if self.term.is_empty() {
            return true;
        }
        let url = row.url.to_lowercase();
        let suggestion = row
            .legitimate_suggestion
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();
        url.contains(&self.term) || suggestion.contains(&self.term)
    }

    /// Visibility of each row, in input order.
    pub fn apply(&self, rows: &[PredictionRow]) -> Vec<bool> {
        rows.iter().map(|r| self.matches(r)).collect()
    }

    pub fn visible<'a>(&self, rows: &'a [PredictionRow]) -> Vec<&'a PredictionRow> {
        rows.iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(url: &str, suggestion: Option<&str>) -> PredictionRow {
        PredictionRow {
            url: url.to_string(),
            prediction: String::new(),
            legitimate_suggestion: suggestion.map(str::to_string),
        }
    }

    #[test]
    fn matches_url_or_suggestion_case_insensitively() {
        let rows = vec![
            row("http://PayPa1-login.example", None),
            row("http://secure-bank.test", Some("https://MyBank.com")),
            row("https://news.site", None),
        ];
        assert_eq!(SearchFilter::new("paypa1").apply(&rows), vec![true, false, false]);
        assert_eq!(SearchFilter::new("MYBANK").apply(&rows), vec![false, true, false]);
    }

    #[test]
    fn empty_term_shows_everything() {
        let rows = vec![row("a", None), row("b", Some("c"))];
        assert_eq!(SearchFilter::new("").visible(&rows).len(), 2);
    }

    #[test]
    fn no_match_hides_all() {
        let rows = vec![row("a.test", None)];
        assert!(SearchFilter::new("zzz").visible(&rows).is_empty());
    }
}

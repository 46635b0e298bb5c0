use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

pub const SAFE_MESSAGE: &str = "It is safe to go.";
pub const PHISHING_MESSAGE: &str = "The website is detected as phishing and not safe to go.";

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("mapping file not found: {path}")]
    NotFound { path: String },

    #[error("failed to read mapping file: {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed mapping line {line}: expected 'phishing_url,legitimate_url'")]
    Malformed { line: usize },
}

/// Known phishing URLs mapped to the legitimate site they imitate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuggestionMap {
    entries: HashMap<String, String>,
}

impl SuggestionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, phishing: impl Into<String>, legitimate: impl Into<String>) {
        self.entries.insert(phishing.into(), legitimate.into());
    }

    /// Parse `phishing,legitimate` pairs. Tabs also separate; blank lines and
    /// `#` comments are skipped.
    pub fn parse(contents: &str) -> Result<Self, SuggestError> {
        let mut map = Self::new();
        for (i, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (phishing, legitimate) = line
                .split_once(',')
                .or_else(|| line.split_once('\t'))
                .ok_or(SuggestError::Malformed { line: i + 1 })?;
            let (phishing, legitimate) = (phishing.trim(), legitimate.trim());
            if phishing.is_empty() || legitimate.is_empty() {
                return Err(SuggestError::Malformed { line: i + 1 });
            }
            map.insert(phishing, legitimate);
        }
        Ok(map)
    }

    pub fn load(path: &Path, allow_missing: bool) -> Result<Self, SuggestError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let map = Self::parse(&contents)?;
                log::info!("loaded {} suggestion(s) from {}", map.len(), path.display());
                Ok(map)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                log::warn!("mapping file '{}' was not found", path.display());
                Ok(Self::new())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SuggestError::NotFound {
                path: path.display().to_string(),
            }),
            Err(source) => Err(SuggestError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    pub fn lookup(&self, url: &str) -> Option<&str> {
        self.entries.get(url).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The server-side prediction text shown above the verdict.
pub fn prediction_message(is_phishing: bool, suggestion: Option<&str>) -> String {
    let mut out = if is_phishing {
        PHISHING_MESSAGE.to_string()
    } else {
        SAFE_MESSAGE.to_string()
    };
    if let Some(s) = suggestion {
        out.push_str(&format!("\nYou might want to visit the legitimate site: {s}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_pairs_and_skips_comments() {
        let map = SuggestionMap::parse(
            "# phishing,legit\nhttp://paypa1.com, https://paypal.com\n\nhttp://g00gle.com\thttps://google.com\n",
        )
        .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.lookup("http://paypa1.com"), Some("https://paypal.com"));
        assert_eq!(map.lookup("http://g00gle.com"), Some("https://google.com"));
        assert_eq!(map.lookup("http://other.com"), None);
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let err = SuggestionMap::parse("a,b\njust-one-column\n").unwrap_err();
        assert!(matches!(err, SuggestError::Malformed { line: 2 }));
    }

    #[test]
    fn missing_file_is_empty_when_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        assert!(SuggestionMap::load(&path, true).unwrap().is_empty());
        assert!(matches!(
            SuggestionMap::load(&path, false),
            Err(SuggestError::NotFound { .. })
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "http://bad.test,https://good.test").unwrap();
        let map = SuggestionMap::load(f.path(), false).unwrap();
        assert_eq!(map.lookup("http://bad.test"), Some("https://good.test"));
    }

    #[test]
    fn message_appends_suggestion() {
        assert_eq!(prediction_message(false, None), SAFE_MESSAGE);
        let msg = prediction_message(true, Some("https://good.test"));
        assert!(msg.starts_with(PHISHING_MESSAGE));
        assert!(msg.ends_with("legitimate site: https://good.test"));
    }
}

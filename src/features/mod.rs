//! URL feature vector fed to the phishing model.
//!
//! Only the lexical checks are computed. Slots that would need WHOIS, DNS,
//! page content or ranking data are always 0.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

pub const FEATURE_COUNT: usize = 30;

pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "using_ip",
    "long_url",
    "short_url",
    "symbol_at",
    "redirecting_double_slash",
    "prefix_suffix_hyphen",
    "sub_domains",
    "https",
    "domain_registration_length",
    "favicon",
    "non_standard_port",
    "https_in_domain",
    "request_url",
    "anchor_url",
    "links_in_script_tags",
    "server_form_handler",
    "info_email",
    "abnormal_url",
    "website_forwarding",
    "status_bar_customization",
    "disable_right_click",
    "using_popup_window",
    "iframe_redirection",
    "age_of_domain",
    "dns_recording",
    "website_traffic",
    "page_rank",
    "google_index",
    "links_pointing_to_page",
    "stats_report",
];

const LONG_URL_CHARS: usize = 75;
const SHORT_URL_CHARS: usize = 20;
const MAX_HOST_LABELS: usize = 3;

static IPV4_RE: OnceLock<Regex> = OnceLock::new();
static URL_PARTS_RE: OnceLock<Regex> = OnceLock::new();

fn ipv4_re() -> &'static Regex {
    IPV4_RE.get_or_init(|| {
        Regex::new(r"(\d{1,3}\.){3}\d{1,3}")
            .unwrap_or_else(|e| panic!("invalid ipv4 pattern: {e}"))
    })
}

fn url_parts_re() -> &'static Regex {
    URL_PARTS_RE.get_or_init(|| {
        Regex::new(r"^(?:([A-Za-z][A-Za-z0-9+.-]*):)?(?://([^/?#]*))?")
            .unwrap_or_else(|e| panic!("invalid url parts pattern: {e}"))
    })
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeatureVector {
    values: [i8; FEATURE_COUNT],
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ParsedParts {
    scheme: String,
    netloc: String,
}

/// Split off the scheme and the raw authority text. The host is not
/// normalised: IDNA labels, spaces and other characters a strict URL parser
/// would reject or rewrite are kept as typed.
fn parse_parts(url: &str) -> ParsedParts {
    let url = url.trim();
    let Some(caps) = url_parts_re().captures(url) else {
        return ParsedParts::default();
    };
    ParsedParts {
        scheme: caps
            .get(1)
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default(),
        netloc: caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default(),
    }
}

fn flag(b: bool) -> i8 {
    i8::from(b)
}

impl FeatureVector {
    pub fn extract(url: &str) -> Self {
        let parts = parse_parts(url);
        let lower = url.to_lowercase();
        let len = url.chars().count();

        let mut values = [0i8; FEATURE_COUNT];
        values[0] = flag(ipv4_re().is_match(url));
        values[1] = flag(len > LONG_URL_CHARS);
        values[2] = flag(len < SHORT_URL_CHARS);
        values[3] = flag(url.contains('@'));
        values[4] = flag(url.matches("//").count() > 1);
        values[5] = flag(parts.netloc.contains('-'));
        values[6] = flag(parts.netloc.split('.').count() > MAX_HOST_LABELS);
        values[7] = flag(parts.scheme == "https");
        values[11] = flag(parts.netloc.to_lowercase().contains("https"));
        values[16] = flag(lower.contains("mailto:"));

        log::debug!("extracted features for {url}: {:?}", values);
        Self { values }
    }

    pub fn values(&self) -> &[i8; FEATURE_COUNT] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<i8> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }

    /// Names of the features that fired, in vector order.
    pub fn active(&self) -> Vec<&'static str> {
        FEATURE_NAMES
            .iter()
            .zip(self.values.iter())
            .filter(|(_, v)| **v != 0)
            .map(|(n, _)| *n)
            .collect()
    }
}

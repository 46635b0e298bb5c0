use std::sync::OnceLock;

use regex::Regex;

static URL_INPUT_RE: OnceLock<Regex> = OnceLock::new();

fn url_input_re() -> &'static Regex {
    URL_INPUT_RE.get_or_init(|| {
        Regex::new(r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,6})([/A-Za-z0-9_ .-]*)*/?$")
            .unwrap_or_else(|e| panic!("invalid url input pattern: {e}"))
    })
}

/// Styling state of a URL input field while the user types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputState {
    Neutral,
    Valid,
    Invalid,
}

impl InputState {
    pub fn border_color(self) -> &'static str {
        match self {
            InputState::Neutral => "",
            InputState::Valid => "#10b981",
            InputState::Invalid => "#ef4444",
        }
    }

    pub fn box_shadow(self) -> &'static str {
        match self {
            InputState::Neutral => "",
            InputState::Valid => "0 0 0 3px rgba(16, 185, 129, 0.1)",
            InputState::Invalid => "0 0 0 3px rgba(239, 68, 68, 0.1)",
        }
    }
}

pub fn is_plausible_url(value: &str) -> bool {
    url_input_re().is_match(value.trim())
}

/// Classify the current contents of a URL field. Blank input resets styling.
pub fn validate_url_input(value: &str) -> InputState {
    let value = value.trim();
    if value.is_empty() {
        return InputState::Neutral;
    }
    if is_plausible_url(value) {
        InputState::Valid
    } else {
        InputState::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_url_shapes() {
        assert_eq!(validate_url_input("https://example.com"), InputState::Valid);
        assert_eq!(validate_url_input("example.co.uk/login"), InputState::Valid);
        assert_eq!(validate_url_input("  http://sub.site.org/a/b.html "), InputState::Valid);
    }

    #[test]
    fn rejects_non_urls() {
        assert_eq!(validate_url_input("not a url"), InputState::Invalid);
        assert_eq!(validate_url_input("ftp://example.com"), InputState::Invalid);
        assert_eq!(validate_url_input("https://EXAMPLE.COM"), InputState::Invalid);
    }

    #[test]
    fn blank_input_is_neutral() {
        assert_eq!(validate_url_input("   "), InputState::Neutral);
        assert_eq!(InputState::Neutral.border_color(), "");
        assert_eq!(InputState::Invalid.border_color(), "#ef4444");
    }

    #[test]
    fn character_classes_are_ascii_only() {
        assert_eq!(validate_url_input("example.com/café"), InputState::Invalid);
        assert_eq!(validate_url_input("bücher.example.com"), InputState::Invalid);
        assert_eq!(validate_url_input("host\u{0663}.example.com"), InputState::Invalid);
        assert_eq!(validate_url_input("example.com/some path_1"), InputState::Valid);
    }
}

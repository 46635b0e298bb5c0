pub mod report;

use serde::Serialize;

use crate::classifier::Verdict;
use crate::features::FeatureVector;
use crate::payload::ResultPayload;
use crate::render::VerdictView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

/// One classified result, ready for any output format.
#[derive(Clone, Debug, Serialize)]
pub struct OutputRecord {
    pub payload: ResultPayload,
    pub verdict: Option<Verdict>,
    pub view: Option<VerdictView>,
    pub features: Vec<&'static str>,
}

pub fn build_record(
    payload: ResultPayload,
    verdict: Option<Verdict>,
    features: Option<&FeatureVector>,
) -> OutputRecord {
    OutputRecord {
        view: verdict.as_ref().map(VerdictView::from_verdict),
        verdict,
        features: features.map(|f| f.active()).unwrap_or_default(),
        payload,
    }
}

pub fn render_text(record: &OutputRecord) -> Vec<u8> {
    let mut out = String::new();
    if !record.payload.url.is_empty() {
        out.push_str(&format!("url: {}\n", record.payload.url));
    }
    match (&record.verdict, &record.view) {
        (Some(verdict), Some(view)) => {
            out.push_str(&format!("verdict: {}\n", verdict.label()));
            out.push_str(&format!("headline: {}\n", view.headline));
            out.push_str(&format!("confidence: {}\n", view.confidence_label));
        }
        _ => out.push_str("verdict: none\n"),
    }
    if !record.payload.prediction.is_empty() {
        out.push_str(&format!("prediction: {}\n", record.payload.prediction));
    }
    if !record.features.is_empty() {
        out.push_str(&format!("features: {}\n", record.features.join(",")));
    }
    out.into_bytes()
}

pub fn render_json(record: &OutputRecord) -> Vec<u8> {
    serde_json::to_vec_pretty(record).unwrap_or_else(|_| b"{}\n".to_vec())
}

pub fn render_html(record: &OutputRecord) -> Vec<u8> {
    report::render_html(record)
}

pub fn render(record: &OutputRecord, format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(record),
        OutputFormat::Json => render_json(record),
        OutputFormat::Html => render_html(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    #[test]
    fn format_parse_and_infer() {
        assert_eq!(OutputFormat::parse(" HTML "), Some(OutputFormat::Html));
        assert_eq!(OutputFormat::parse("xml"), None);
        assert_eq!(infer_format_from_path("out/result.JSON"), Some(OutputFormat::Json));
        assert_eq!(infer_format_from_path("result"), None);
    }

    #[test]
    fn text_output_lists_verdict() {
        let payload = ResultPayload::new("http://x.test", 0.3);
        let verdict = classify(0.3).ok();
        let record = build_record(payload, verdict, None);
        let text = String::from_utf8(render_text(&record)).unwrap();
        assert!(text.contains("verdict: unsafe"));
        assert!(text.contains("confidence: 70% Risk Level"));
    }

    #[test]
    fn json_output_carries_view() {
        let record = build_record(ResultPayload::new("u", 0.9), classify(0.9).ok(), None);
        let v: serde_json::Value = serde_json::from_slice(&render_json(&record)).unwrap();
        assert_eq!(v["verdict"]["confidence_percent"], 90);
        assert_eq!(v["view"]["headline"], "This Website is Safe");
    }

    #[test]
    fn missing_verdict_renders_none() {
        let record = build_record(ResultPayload::default(), None, None);
        let text = String::from_utf8(render_text(&record)).unwrap();
        assert!(text.contains("verdict: none"));
    }
}

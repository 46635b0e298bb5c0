use super::OutputRecord;
use crate::payload::DATA_BLOCK_ID;
use crate::search::{PredictionRow, SearchFilter};

fn json_for_script_tag(value: &str) -> String {
    value.replace("</", "<\\/")
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Result page. Server-side it is already rendered in its final state; the
/// payload is also embedded as JSON for client code that wants to re-run the
/// staged reveal.
pub fn render_html(record: &OutputRecord) -> Vec<u8> {
    let json = json_for_script_tag(&record.payload.to_json());

    let (indicator, icon, headline, label, bar_class, bar_width) = match record.view.as_ref() {
        Some(v) => (
            v.indicator_class,
            v.icon_class,
            v.headline,
            v.confidence_label.as_str(),
            v.bar_class,
            v.bar_width.as_str(),
        ),
        None => (
            "result-indicator",
            "fas fa-question-circle result-icon",
            "No prediction available",
            "",
            "confidence-fill",
            "0%",
        ),
    };

    let url = escape_html(&record.payload.url);
    let prediction = escape_html(&record.payload.prediction).replace('\n', "<br/>");
    let suggestion = record
        .payload
        .legitimate_suggestion
        .as_deref()
        .map(|s| {
            let s = escape_html(s);
            format!(r#"<p class="suggestion">Legitimate site: <a class="suggestion-link" href="{s}">{s}</a></p>"#)
        })
        .unwrap_or_default();

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Phishlens Result</title>
  <style>
    body {{ font-family: 'Inter', sans-serif; background: #0a0e27; color: #e2e8f0; }}
    .result-safe {{ border-color: #10b981; }}
    .result-unsafe {{ border-color: #ef4444; }}
    .confidence-bar {{ background: rgba(255, 255, 255, 0.1); border-radius: 9999px; height: 0.75rem; }}
    .confidence-fill {{ height: 100%; border-radius: 9999px; transition: width 0.6s; }}
    .confidence-safe {{ background: #10b981; }}
    .confidence-unsafe {{ background: #ef4444; }}
  </style>
</head>
<body>
  <script type="application/json" id="{DATA_BLOCK_ID}">{json}</script>
  <main class="result-page">
    <p class="url-link">{url}</p>
    <div id="resultIndicator" class="{indicator}">
      <i id="resultIcon" class="{icon}"></i>
      <h1 id="resultText">{headline}</h1>
      <p id="confidenceText">{label}</p>
      <div class="confidence-bar">
        <div id="confidenceBar" class="{bar_class}" style="width: {bar_width}"></div>
      </div>
    </div>
    <p class="prediction">{prediction}</p>
    {suggestion}
  </main>
</body>
</html>
"####
    );
    html.into_bytes()
}

/// Predictions table with rows hidden according to `filter`.
pub fn render_predictions_html(rows: &[PredictionRow], filter: &SearchFilter) -> Vec<u8> {
    let mut body = String::new();
    for (row, visible) in rows.iter().zip(filter.apply(rows)) {
        let style = if visible { "" } else { r#" style="display: none""# };
        let suggestion = row
            .legitimate_suggestion
            .as_deref()
            .map(|s| format!(r#"<a class="suggestion-link" href="{0}">{0}</a>"#, escape_html(s)))
            .unwrap_or_default();
        body.push_str(&format!(
            "      <tr class=\"prediction-row\"{style}><td class=\"url-link\">{}</td><td>{}</td><td>{suggestion}</td></tr>\n",
            escape_html(&row.url),
            escape_html(&row.prediction),
        ));
    }

    let term = escape_html(filter.term());
    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <title>Phishlens Predictions</title>
</head>
<body>
  <input id="searchInput" type="text" value="{term}"/>
  <table>
    <thead><tr><th>URL</th><th>Prediction</th><th>Legitimate suggestion</th></tr></thead>
    <tbody>
{body}    </tbody>
  </table>
</body>
</html>
"####
    );
    html.into_bytes()
}

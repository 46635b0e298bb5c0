//! Data handed to the dashboard chart widgets.
//!
//! The series are fixed placeholder figures, not live statistics.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Doughnut,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<u32>,
    pub colors: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

pub fn threat_chart() -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Line,
        labels: strings(&["Jan", "Feb", "Mar", "Apr", "May", "Jun"]),
        datasets: vec![
            Dataset {
                label: Some("Threats Detected".to_string()),
                data: vec![12, 19, 3, 5, 2, 3],
                colors: strings(&["#ef4444"]),
            },
            Dataset {
                label: Some("Safe URLs".to_string()),
                data: vec![45, 52, 38, 42, 48, 55],
                colors: strings(&["#10b981"]),
            },
        ],
    }
}

pub fn category_chart() -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Doughnut,
        labels: strings(&["Safe", "Suspicious", "Malicious"]),
        datasets: vec![Dataset {
            label: None,
            data: vec![75, 20, 5],
            colors: strings(&["#10b981", "#f59e0b", "#ef4444"]),
        }],
    }
}

/// Builds each named chart at most once.
#[derive(Clone, Debug, Default)]
pub struct ChartRegistry {
    charts: BTreeMap<&'static str, ChartSpec>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the dashboard charts that are not built yet. Returns how many
    /// were created by this call.
    pub fn init(&mut self) -> usize {
        let mut created = 0;
        if !self.charts.contains_key("threat") {
            self.charts.insert("threat", threat_chart());
            created += 1;
        }
        if !self.charts.contains_key("category") {
            self.charts.insert("category", category_chart());
            created += 1;
        }
        created
    }

    pub fn get(&self, name: &str) -> Option<&ChartSpec> {
        self.charts.get(name)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.charts).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_lengths_match_labels() {
        for chart in [threat_chart(), category_chart()] {
            for ds in &chart.datasets {
                assert_eq!(ds.data.len(), chart.labels.len());
            }
        }
    }

    #[test]
    fn registry_builds_once() {
        let mut reg = ChartRegistry::new();
        assert_eq!(reg.init(), 2);
        assert_eq!(reg.init(), 0);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get("category").unwrap().kind, ChartKind::Doughnut);
    }

    #[test]
    fn serializes_kind_lowercase() {
        let json = serde_json::to_string(&threat_chart()).unwrap();
        assert!(json.contains(r#""kind":"line""#));
        assert!(json.contains("Threats Detected"));
    }
}

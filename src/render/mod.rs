use std::time::Duration;

use colored::Colorize;
use serde::Serialize;

use crate::classifier::Verdict;

pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_BAR_DELAY: Duration = Duration::from_millis(500);

/// Everything a result page shows for one verdict.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerdictView {
    pub indicator_class: &'static str,
    pub icon_class: &'static str,
    pub headline: &'static str,
    pub confidence_label: String,
    pub bar_class: &'static str,
    pub bar_width: String,
}

impl VerdictView {
    pub fn from_verdict(verdict: &Verdict) -> Self {
        let n = verdict.confidence_percent;
        if verdict.is_safe {
            Self {
                indicator_class: "result-indicator result-safe",
                icon_class: "fas fa-shield-check result-icon",
                headline: "This Website is Safe",
                confidence_label: format!("{n}% Confidence"),
                bar_class: "confidence-fill confidence-safe",
                bar_width: format!("{n}%"),
            }
        } else {
            Self {
                indicator_class: "result-indicator result-unsafe",
                icon_class: "fas fa-exclamation-triangle result-icon",
                headline: "This Website May Be Unsafe",
                confidence_label: format!("{n}% Risk Level"),
                bar_class: "confidence-fill confidence-unsafe",
                bar_width: format!("{n}%"),
            }
        }
    }
}

/// Handles a UI layer exposes for the result widgets.
///
/// Every method defaults to a no-op, so an implementation that lacks a given
/// element simply does not override it.
pub trait RenderTargets {
    fn set_indicator_class(&mut self, _class: &str) {}
    fn set_icon_class(&mut self, _class: &str) {}
    fn set_headline(&mut self, _text: &str) {}
    fn set_confidence_label(&mut self, _text: &str) {}
    fn set_bar_class(&mut self, _class: &str) {}
    fn set_bar_width(&mut self, _width: &str) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    pub reveal_delay: Duration,
    pub bar_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            reveal_delay: DEFAULT_REVEAL_DELAY,
            bar_delay: DEFAULT_BAR_DELAY,
        }
    }
}

impl Pacing {
    pub fn immediate() -> Self {
        Self {
            reveal_delay: Duration::ZERO,
            bar_delay: Duration::ZERO,
        }
    }
}

fn apply_classification<T: RenderTargets + ?Sized>(view: &VerdictView, targets: &mut T) {
    targets.set_indicator_class(view.indicator_class);
    targets.set_icon_class(view.icon_class);
    targets.set_headline(view.headline);
    targets.set_confidence_label(&view.confidence_label);
    targets.set_bar_class(view.bar_class);
}

/// Apply the full view in one step.
pub fn apply<T: RenderTargets + ?Sized>(verdict: &Verdict, targets: &mut T) -> VerdictView {
    let view = VerdictView::from_verdict(verdict);
    apply_classification(&view, targets);
    targets.set_bar_width(&view.bar_width);
    view
}

/// Apply the view in two stages: classification after `reveal_delay`, then
/// the bar fill after a further `bar_delay`.
pub async fn reveal<T: RenderTargets + ?Sized>(
    verdict: &Verdict,
    targets: &mut T,
    pacing: Pacing,
) -> VerdictView {
    let view = VerdictView::from_verdict(verdict);

    tokio::time::sleep(pacing.reveal_delay).await;
    apply_classification(&view, targets);
    log::debug!("revealed verdict headline: {}", view.headline);

    tokio::time::sleep(pacing.bar_delay).await;
    targets.set_bar_width(&view.bar_width);
    log::debug!("filled confidence bar to {}", view.bar_width);

    view
}

/// Writes the result widgets to stdout as they are updated.
#[derive(Debug, Default)]
pub struct TerminalTargets {
    safe: Option<bool>,
}

impl RenderTargets for TerminalTargets {
    fn set_indicator_class(&mut self, class: &str) {
        self.safe = Some(class.ends_with("result-safe"));
    }

    fn set_headline(&mut self, text: &str) {
        let line = match self.safe {
            Some(true) => text.bold().green(),
            Some(false) => text.bold().red(),
            None => text.bold().white(),
        };
        println!("{}{}{} {}", "[".bold().white(), "RES".bold().cyan(), "]".bold().white(), line);
    }

    fn set_confidence_label(&mut self, text: &str) {
        println!(":: {:<10}: {}", "Verdict", text);
    }

    fn set_bar_width(&mut self, width: &str) {
        let filled = width
            .trim_end_matches('%')
            .parse::<usize>()
            .unwrap_or(0)
            .min(100)
            / 5;
        let bar = format!("{}{}", "#".repeat(filled), ".".repeat(20 - filled));
        let bar = match self.safe {
            Some(true) => bar.green(),
            Some(false) => bar.red(),
            None => bar.normal(),
        };
        println!(":: {:<10}: [{}] {}", "Bar", bar, width);
    }
}

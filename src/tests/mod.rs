use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::classifier::{classify, Verdict};
use crate::render::{self, Pacing, RenderTargets};

#[derive(Default)]
struct Widgets {
    indicator: String,
    icon: String,
    headline: String,
    label: String,
    bar_class: String,
    bar_width: String,
}

impl RenderTargets for Widgets {
    fn set_indicator_class(&mut self, class: &str) {
        self.indicator = class.to_string();
    }
    fn set_icon_class(&mut self, class: &str) {
        self.icon = class.to_string();
    }
    fn set_headline(&mut self, text: &str) {
        self.headline = text.to_string();
    }
    fn set_confidence_label(&mut self, text: &str) {
        self.label = text.to_string();
    }
    fn set_bar_class(&mut self, class: &str) {
        self.bar_class = class.to_string();
    }
    fn set_bar_width(&mut self, width: &str) {
        self.bar_width = width.to_string();
    }
}

/// Widgets shared with a spawned reveal so intermediate states can be read.
struct Shared(Arc<Mutex<Widgets>>);

impl RenderTargets for Shared {
    fn set_indicator_class(&mut self, class: &str) {
        if let Ok(mut w) = self.0.lock() {
            w.set_indicator_class(class);
        }
    }
    fn set_icon_class(&mut self, class: &str) {
        if let Ok(mut w) = self.0.lock() {
            w.set_icon_class(class);
        }
    }
    fn set_headline(&mut self, text: &str) {
        if let Ok(mut w) = self.0.lock() {
            w.set_headline(text);
        }
    }
    fn set_confidence_label(&mut self, text: &str) {
        if let Ok(mut w) = self.0.lock() {
            w.set_confidence_label(text);
        }
    }
    fn set_bar_class(&mut self, class: &str) {
        if let Ok(mut w) = self.0.lock() {
            w.set_bar_class(class);
        }
    }
    fn set_bar_width(&mut self, width: &str) {
        if let Ok(mut w) = self.0.lock() {
            w.set_bar_width(width);
        }
    }
}

#[test]
fn classify_table() {
    let cases = [
        (1.0, true, 100),
        (0.0, false, 100),
        (0.5, true, 50),
        (0.499999, false, 50),
        (0.75, true, 75),
        (0.25, false, 75),
    ];
    for (score, is_safe, confidence_percent) in cases {
        assert_eq!(
            classify(score).unwrap(),
            Verdict {
                is_safe,
                confidence_percent
            },
            "score {score}"
        );
    }
}

#[test]
fn classify_is_idempotent() {
    for score in [0.0, 0.13, 0.5, 0.77, 1.0, 3.5, -2.0] {
        assert_eq!(classify(score).unwrap(), classify(score).unwrap());
    }
}

#[test]
fn unsafe_verdict_renders_risk_widgets() {
    let mut w = Widgets::default();
    render::apply(&classify(0.25).unwrap(), &mut w);
    assert_eq!(w.indicator, "result-indicator result-unsafe");
    assert_eq!(w.icon, "fas fa-exclamation-triangle result-icon");
    assert_eq!(w.headline, "This Website May Be Unsafe");
    assert_eq!(w.label, "75% Risk Level");
    assert_eq!(w.bar_class, "confidence-fill confidence-unsafe");
    assert_eq!(w.bar_width, "75%");
}

#[tokio::test(start_paused = true)]
async fn staged_reveal_holds_bar_until_second_stage() {
    let verdict = classify(0.91).unwrap();
    let widgets = Arc::new(Mutex::new(Widgets::default()));
    let pacing = Pacing {
        reveal_delay: Duration::from_millis(1000),
        bar_delay: Duration::from_millis(500),
    };

    let handle = tokio::spawn({
        let widgets = Arc::clone(&widgets);
        async move {
            let mut targets = Shared(widgets);
            render::reveal(&verdict, &mut targets, pacing).await;
        }
    });

    tokio::time::sleep(Duration::from_millis(900)).await;
    assert!(widgets.lock().unwrap().headline.is_empty());

    tokio::time::sleep(Duration::from_millis(300)).await;
    {
        let w = widgets.lock().unwrap();
        assert_eq!(w.headline, "This Website is Safe");
        assert_eq!(w.label, "91% Confidence");
        assert_eq!(w.bar_class, "confidence-fill confidence-safe");
        assert!(w.bar_width.is_empty());
    }

    tokio::time::sleep(Duration::from_millis(800)).await;
    handle.await.unwrap();
    assert_eq!(widgets.lock().unwrap().bar_width, "91%");
}

#[test]
fn payload_to_page_to_html_and_back() {
    let payload = crate::payload::ResultPayload::new("http://login-verify.test", 0.04);
    let page = crate::app::Page::assemble(
        payload,
        &crate::suggest::SuggestionMap::new(),
        &crate::app::PageSettings {
            include_features: true,
            ..Default::default()
        },
    )
    .unwrap();
    let record = page.record();
    let html = String::from_utf8(crate::output::render_html(&record)).unwrap();
    let back = crate::payload::ResultPayload::from_html(&html).unwrap();
    assert_eq!(back.url, "http://login-verify.test");
    assert_eq!(back.verdict().unwrap().unwrap().confidence_percent, 96);
    assert!(record.features.contains(&"prefix_suffix_hyphen"));
}

#[test]
fn carousel_and_submit_are_independent() {
    let mut page = crate::app::Page::assemble(
        crate::payload::ResultPayload::default(),
        &crate::suggest::SuggestionMap::new(),
        &crate::app::PageSettings::default(),
    )
    .unwrap();
    page.carousel.pause();
    page.submit.submit();
    assert!(!page.carousel.tick());
    assert!(page.submit.is_disabled());
    page.carousel.resume();
    assert!(page.carousel.tick());
    assert!(page.submit.is_busy());
}

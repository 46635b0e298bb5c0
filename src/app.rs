use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{error::ErrorKind, CommandFactory, Parser};
use colored::Colorize;
use env_logger::Env;

use crate::carousel::Carousel;
use crate::charts::ChartRegistry;
use crate::classifier::{classify, ClassifyError, Verdict};
use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::features::FeatureVector;
use crate::output::{self, report, OutputFormat};
use crate::payload::ResultPayload;
use crate::render::{self, Pacing, TerminalTargets, VerdictView};
use crate::search::{PredictionRow, SearchFilter};
use crate::submit::SubmitControl;
use crate::suggest::{self, SuggestionMap};
use crate::validate::{self, InputState};

const HERO_SLIDES: usize = 3;
const SUBMIT_LABEL: &str = "Check URL";

fn print_banner(no_color: bool) {
    const BANNER: &str = r#"
           __    _      __    __
    ____  / /_  (_)____/ /_  / /__  ____  _____
   / __ \/ __ \/ / ___/ __ \/ / _ \/ __ \/ ___/
  / /_/ / / / / (__  ) / / / /  __/ / / (__  )
 / .___/_/ /_/_/____/_/ /_/_/\___/_/ /_/____/
/_/
       v0.1.0 - phishing prediction verdicts
    "#;
    if no_color {
        print!("{}", BANNER);
    } else {
        print!("{}", BANNER.cyan());
    }
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn render_custom_help() -> String {
    let cmd = CliArgs::command();
    let mut out = String::new();

    out.push_str(cmd.get_name());
    if let Some(version) = cmd.get_version() {
        out.push(' ');
        out.push_str(version);
    }
    out.push('\n');

    if let Some(about) = cmd.get_about() {
        out.push_str(&about.to_string());
        out.push('\n');
    }

    if let Some(long_about) = cmd.get_long_about() {
        out.push('\n');
        out.push_str(&long_about.to_string());
        out.push('\n');
    }

    out.push('\n');
    out.push_str("Usage: ");
    out.push_str(cmd.get_name());
    out.push_str(" [OPTIONS]\n\n");

    let mut sections: Vec<(String, Vec<&clap::Arg>)> = Vec::new();
    let mut section_idx: HashMap<String, usize> = HashMap::new();

    for arg in cmd.get_arguments() {
        if arg.is_hide_set() {
            continue;
        }
        let heading = arg.get_help_heading().unwrap_or("Options").to_string();
        let idx = match section_idx.get(&heading).copied() {
            Some(i) => i,
            None => {
                sections.push((heading.clone(), Vec::new()));
                let i = sections.len() - 1;
                section_idx.insert(heading, i);
                i
            }
        };
        sections[idx].1.push(arg);
    }

    for (heading, args) in sections {
        out.push_str(&heading);
        out.push_str(":\n");

        for arg in args {
            let mut parts: Vec<String> = Vec::new();
            if let Some(short) = arg.get_short() {
                parts.push(format!("-{short}"));
            }
            if let Some(long) = arg.get_long() {
                parts.push(format!("--{long}"));
            }
            if let Some(aliases) = arg.get_visible_aliases() {
                for alias in aliases {
                    let rendered = format!("--{alias}");
                    if !parts.iter().any(|p| p == &rendered) {
                        parts.push(rendered);
                    }
                }
            }

            let mut flags = parts.join(", ");
            if arg.get_action().takes_values() {
                let value_name = arg
                    .get_value_names()
                    .and_then(|names| names.first())
                    .map(|name| name.as_str())
                    .unwrap_or("VALUE");
                flags.push_str(&format!(" <{value_name}>"));
            }

            out.push_str("  ");
            out.push_str(&flags);
            out.push('\n');

            if let Some(help) = arg.get_help() {
                let help = help.to_string();
                if !help.trim().is_empty() {
                    out.push_str("          ");
                    out.push_str(help.trim());
                    out.push('\n');
                }
            }
            out.push('\n');
        }
    }

    out
}

fn format_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[derive(Clone, Debug)]
pub enum PredictionSource {
    Score(f64),
    PayloadFile(PathBuf),
    None,
}

#[derive(Clone, Debug)]
struct RunConfig {
    source: PredictionSource,
    url: Option<String>,
    mapping_path: Option<PathBuf>,
    mapping_optional: bool,
    output: Option<String>,
    output_format: OutputFormat,
    include_features: bool,
    reveal: bool,
    pacing: Pacing,
    carousel_interval: Duration,
    swipe_threshold: f64,
    submit_reset: Duration,
    rows_path: Option<PathBuf>,
    search: String,
    no_color: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let source = match (args.score, args.payload.as_deref()) {
        (Some(score), _) => PredictionSource::Score(score),
        (None, Some(path)) => PredictionSource::PayloadFile(config::expand_tilde(path)),
        (None, None) => PredictionSource::None,
    };

    let output = args.output.or(cfg.output);
    let output_format = match args.format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw)
            .ok_or_else(|| format!("invalid output format '{raw}', expected text, json or html"))?,
        None => output
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };

    let mapping_path = args
        .mapping
        .or(cfg.mapping)
        .map(|p| config::expand_tilde(&p));
    let mapping_optional = cfg.mapping_optional.unwrap_or(true);

    let pacing = Pacing {
        reveal_delay: Duration::from_millis(
            args.reveal_delay
                .or(cfg.reveal_delay_ms)
                .unwrap_or(render::DEFAULT_REVEAL_DELAY.as_millis() as u64),
        ),
        bar_delay: Duration::from_millis(
            args.bar_delay
                .or(cfg.bar_delay_ms)
                .unwrap_or(render::DEFAULT_BAR_DELAY.as_millis() as u64),
        ),
    };

    let swipe_threshold = cfg
        .swipe_threshold_px
        .unwrap_or(crate::carousel::DEFAULT_SWIPE_THRESHOLD_PX);
    if !swipe_threshold.is_finite() || swipe_threshold < 0.0 {
        return Err(format!(
            "invalid swipe_threshold_px {swipe_threshold}, expected a non-negative number"
        ));
    }

    Ok(RunConfig {
        source,
        url: args.url,
        mapping_path,
        mapping_optional,
        output,
        output_format,
        include_features: args.features || cfg.features.unwrap_or(false),
        reveal: args.reveal,
        pacing,
        carousel_interval: cfg
            .carousel_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(crate::carousel::DEFAULT_AUTOPLAY_INTERVAL),
        swipe_threshold,
        submit_reset: cfg
            .submit_reset_ms
            .map(Duration::from_millis)
            .unwrap_or(crate::submit::DEFAULT_RESET_TIMEOUT),
        rows_path: args.rows.map(|p| config::expand_tilde(&p)),
        search: args.search.unwrap_or_default(),
        no_color,
    })
}

/// The result page's independent widgets, built explicitly.
#[derive(Debug)]
pub struct Page {
    pub payload: ResultPayload,
    pub verdict: Option<Verdict>,
    pub view: Option<VerdictView>,
    pub features: Option<FeatureVector>,
    pub carousel: Carousel,
    pub submit: SubmitControl,
    pub charts: ChartRegistry,
}

#[derive(Clone, Debug)]
pub struct PageSettings {
    pub carousel_interval: Duration,
    pub swipe_threshold: f64,
    pub submit_reset: Duration,
    pub include_features: bool,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            carousel_interval: crate::carousel::DEFAULT_AUTOPLAY_INTERVAL,
            swipe_threshold: crate::carousel::DEFAULT_SWIPE_THRESHOLD_PX,
            submit_reset: crate::submit::DEFAULT_RESET_TIMEOUT,
            include_features: false,
        }
    }
}

impl Page {
    /// Classify the payload and construct each widget. A payload without a
    /// score produces a page with no verdict.
    pub fn assemble(
        payload: ResultPayload,
        suggestions: &SuggestionMap,
        settings: &PageSettings,
    ) -> Result<Self, ClassifyError> {
        let verdict = payload.verdict().transpose()?;
        Ok(Self::build(payload, verdict, suggestions, settings))
    }

    /// Like [`Page::assemble`], but classifies an explicit score as given.
    /// The payload's no-result sentinel does not apply here.
    pub fn assemble_with_score(
        payload: ResultPayload,
        score: f64,
        suggestions: &SuggestionMap,
        settings: &PageSettings,
    ) -> Result<Self, ClassifyError> {
        let verdict = classify(score)?;
        Ok(Self::build(payload, Some(verdict), suggestions, settings))
    }

    fn build(
        mut payload: ResultPayload,
        verdict: Option<Verdict>,
        suggestions: &SuggestionMap,
        settings: &PageSettings,
    ) -> Self {
        if payload.legitimate_suggestion.is_none() {
            payload.legitimate_suggestion = suggestions.lookup(&payload.url).map(str::to_string);
        }
        if payload.prediction.is_empty() {
            if let Some(v) = verdict.as_ref() {
                payload.prediction = suggest::prediction_message(
                    !v.is_safe,
                    payload.legitimate_suggestion.as_deref(),
                );
            }
        }

        let features = if settings.include_features && !payload.url.is_empty() {
            Some(FeatureVector::extract(&payload.url))
        } else {
            None
        };

        let mut charts = ChartRegistry::new();
        charts.init();

        Self {
            view: verdict.as_ref().map(VerdictView::from_verdict),
            verdict,
            features,
            carousel: Carousel::new(HERO_SLIDES)
                .with_interval(settings.carousel_interval)
                .with_swipe_threshold(settings.swipe_threshold),
            submit: SubmitControl::new(SUBMIT_LABEL).with_reset_timeout(settings.submit_reset),
            charts,
            payload,
        }
    }

    pub fn record(&self) -> output::OutputRecord {
        output::build_record(self.payload.clone(), self.verdict, self.features.as_ref())
    }
}

fn load_payload(run: &RunConfig) -> Result<ResultPayload, String> {
    let mut payload = match &run.source {
        PredictionSource::Score(score) => ResultPayload {
            score: Some(*score),
            ..ResultPayload::default()
        },
        PredictionSource::PayloadFile(path) => {
            let is_page = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| matches!(e.to_lowercase().as_str(), "html" | "htm"))
                .unwrap_or(false);
            let parsed = if is_page {
                let raw = std::fs::read_to_string(path)
                    .map_err(|e| format!("failed to read page '{}': {e}", path.display()))?;
                ResultPayload::from_html(&raw)
            } else {
                ResultPayload::from_file(path)
            };
            parsed.map_err(|e| e.to_string())?
        }
        PredictionSource::None => ResultPayload::default(),
    };
    if let Some(url) = run.url.as_ref() {
        payload.url = url.trim().to_string();
        if validate::validate_url_input(&payload.url) == InputState::Invalid {
            log::warn!("'{}' does not look like a URL", payload.url);
        }
    }
    Ok(payload)
}

/// `rows.json` becomes `rows.table.html`; the rows file itself is never
/// the target, even when it already ends in `.html`.
fn table_output_path(rows_path: &Path) -> PathBuf {
    rows_path.with_extension("table.html")
}

async fn write_output(path: &str, bytes: Vec<u8>) -> Result<(), String> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| format!("failed to write output '{path}': {e}"))
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner(run.no_color);

    let suggestions = match run.mapping_path.as_ref() {
        Some(path) => SuggestionMap::load(path, run.mapping_optional).map_err(|e| e.to_string())?,
        None => SuggestionMap::new(),
    };

    let payload = load_payload(&run)?;
    let settings = PageSettings {
        carousel_interval: run.carousel_interval,
        swipe_threshold: run.swipe_threshold,
        submit_reset: run.submit_reset,
        include_features: run.include_features,
    };
    let mut page = match run.source {
        PredictionSource::Score(score) => {
            Page::assemble_with_score(payload, score, &suggestions, &settings)
        }
        _ => Page::assemble(payload, &suggestions, &settings),
    }
    .map_err(|e| e.to_string())?;

    if !page.payload.url.is_empty() {
        format_kv_line("URL", &page.payload.url);
    }
    format_kv_line("Format", &format!("{:?}", run.output_format).to_lowercase());
    format_kv_line("Features", format_bool(run.include_features));
    format_kv_line(
        "Pacing",
        &format!(
            "{}ms / {}ms",
            run.pacing.reveal_delay.as_millis(),
            run.pacing.bar_delay.as_millis()
        ),
    );
    println!();

    match page.verdict {
        Some(verdict) if run.reveal => {
            let reset_after = page.submit.submit();
            log::debug!("submit control '{}' until reset in {:?}", page.submit.label(), reset_after);
            println!(
                "{}{}{} {}",
                "[".bold().white(),
                "INF".bold().blue(),
                "]".bold().white(),
                page.submit.label()
            );
            let mut targets = TerminalTargets::default();
            render::reveal(&verdict, &mut targets, run.pacing).await;
            page.submit.reset();
        }
        Some(verdict) => {
            let mut targets = TerminalTargets::default();
            render::apply(&verdict, &mut targets);
        }
        None => {
            println!(
                "{}{}{} {}",
                "[".bold().white(),
                "WRN".bold().yellow(),
                "]".bold().white(),
                "no prediction score available, nothing to display"
            );
        }
    }

    if !page.payload.prediction.is_empty() {
        println!();
        for line in page.payload.prediction.lines() {
            format_kv_line("Prediction", line);
        }
    }
    if let Some(features) = page.features.as_ref() {
        let active = features.active();
        let shown = if active.is_empty() {
            "none".to_string()
        } else {
            active.join(",")
        };
        format_kv_line("Features", &shown);
    }

    let record = page.record();
    if let Some(path) = run.output.as_deref() {
        write_output(path, output::render(&record, run.output_format)).await?;
        log::info!("wrote {:?} output to {path}", run.output_format);
    } else if run.output_format != OutputFormat::Text {
        let bytes = output::render(&record, run.output_format);
        println!();
        println!("{}", String::from_utf8_lossy(&bytes));
    }

    if let Some(rows_path) = run.rows_path.as_ref() {
        let raw = tokio::fs::read_to_string(rows_path)
            .await
            .map_err(|e| format!("failed to read rows '{}': {e}", rows_path.display()))?;
        let rows: Vec<PredictionRow> = serde_json::from_str(&raw)
            .map_err(|e| format!("failed to parse rows '{}': {e}", rows_path.display()))?;
        let filter = SearchFilter::new(&run.search);
        let visible = filter.visible(&rows).len();
        format_kv_line("Rows", &format!("{visible}/{} shown", rows.len()));
        let table_path = table_output_path(rows_path);
        let table_path = table_path.to_string_lossy().to_string();
        write_output(&table_path, report::render_predictions_html(&rows, &filter)).await?;
        log::info!("wrote predictions table to {table_path}");
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .try_init();
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{}", render_custom_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    init_logging(args.verbose);

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    let cfg = match user_config_path.as_ref() {
        Some(path) => {
            if args.init_config {
                config::ensure_default_config_file(path)?;
            }
            config::load_config(path, false)?
        }
        None => match config::default_config_path() {
            Some(path) => {
                if args.init_config {
                    config::ensure_default_config_file(&path)?;
                }
                config::load_config(&path, true)?
            }
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;
    log::debug!("run config: {:?}", run);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))?;
    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn format_inferred_from_output_path() {
        let args = CliArgs::parse_from(["phishlens", "-s", "0.3", "-o", "result.html"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert_eq!(run.output_format, OutputFormat::Html);
    }

    #[test]
    fn cli_overrides_config_pacing() {
        let args = CliArgs::parse_from(["phishlens", "-s", "0.3", "--reveal-delay", "5"]);
        let cfg = ConfigFile {
            reveal_delay_ms: Some(900),
            bar_delay_ms: Some(20),
            ..ConfigFile::default()
        };
        let run = build_run_config(args, cfg).unwrap();
        assert_eq!(run.pacing.reveal_delay, Duration::from_millis(5));
        assert_eq!(run.pacing.bar_delay, Duration::from_millis(20));
    }

    #[test]
    fn color_flag_overrides_config() {
        let args = CliArgs::parse_from(["phishlens", "--color"]);
        let cfg = ConfigFile {
            no_color: Some(true),
            ..ConfigFile::default()
        };
        assert!(!build_run_config(args, cfg).unwrap().no_color);
    }

    #[test]
    fn rejects_negative_swipe_threshold() {
        let args = CliArgs::parse_from(["phishlens"]);
        let cfg = ConfigFile {
            swipe_threshold_px: Some(-1.0),
            ..ConfigFile::default()
        };
        assert!(build_run_config(args, cfg).is_err());
    }

    #[test]
    fn help_lists_sections() {
        let help = render_custom_help();
        assert!(help.contains("Input:"));
        assert!(help.contains("--score"));
    }

    #[test]
    fn page_fills_prediction_and_suggestion() {
        let mut map = SuggestionMap::new();
        map.insert("http://paypa1.test", "https://paypal.com");
        let payload = ResultPayload::new("http://paypa1.test", 0.1);
        let page = Page::assemble(payload, &map, &PageSettings::default()).unwrap();
        let verdict = page.verdict.unwrap();
        assert!(!verdict.is_safe);
        assert_eq!(verdict.confidence_percent, 90);
        assert_eq!(
            page.payload.legitimate_suggestion.as_deref(),
            Some("https://paypal.com")
        );
        assert!(page.payload.prediction.starts_with(suggest::PHISHING_MESSAGE));
        assert_eq!(page.charts.len(), 2);
        assert!(page.features.is_none());
    }

    #[test]
    fn explicit_minus_one_score_is_classified() {
        let payload = ResultPayload {
            score: Some(-1.0),
            ..ResultPayload::default()
        };
        let page = Page::assemble_with_score(
            payload.clone(),
            -1.0,
            &SuggestionMap::new(),
            &PageSettings::default(),
        )
        .unwrap();
        let verdict = page.verdict.unwrap();
        assert!(!verdict.is_safe);
        assert_eq!(verdict.confidence_percent, 100);

        let page = Page::assemble(payload, &SuggestionMap::new(), &PageSettings::default()).unwrap();
        assert!(page.verdict.is_none());
    }

    #[test]
    fn explicit_score_rejects_nan() {
        let err = Page::assemble_with_score(
            ResultPayload::default(),
            f64::NAN,
            &SuggestionMap::new(),
            &PageSettings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ClassifyError::InvalidScoreKind { .. }));
    }

    #[test]
    fn predictions_table_never_overwrites_rows_file() {
        assert_eq!(
            table_output_path(Path::new("out/rows.json")),
            PathBuf::from("out/rows.table.html")
        );
        let rows = Path::new("rows.html");
        assert_ne!(table_output_path(rows), rows);
        assert_eq!(table_output_path(rows), PathBuf::from("rows.table.html"));
    }

    #[test]
    fn page_without_score_has_no_verdict() {
        let page = Page::assemble(
            ResultPayload::default(),
            &SuggestionMap::new(),
            &PageSettings::default(),
        )
        .unwrap();
        assert!(page.verdict.is_none());
        assert!(page.view.is_none());
        assert!(page.payload.prediction.is_empty());
    }
}

use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "phishlens",
    version,
    about = "phishing prediction verdicts and result pages",
    long_about = "Phishlens turns a phishing model's prediction score into a safe/unsafe verdict with a confidence percentage, and renders the result the way the web UI shows it.\n\nExamples:\n  phishlens -s 0.82\n  phishlens -u http://paypa1-login.test -s 0.12 -m ./mapping.csv\n  phishlens -p ./prediction.json -o ./result.html\n\nTip: Use --config to persist pacing and output settings."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 's',
        long = "sc",
        visible_alias = "score",
        value_name = "SCORE",
        allow_negative_numbers = true,
        help_heading = "Input",
        help = "Prediction score (probability the URL is safe, 0-1)."
    )]
    pub score: Option<f64>,

    #[arg(
        short = 'p',
        long = "pl",
        visible_alias = "payload",
        value_name = "FILE",
        help_heading = "Input",
        help = "Read the prediction from a JSON payload or a rendered result page."
    )]
    pub payload: Option<String>,

    #[arg(
        short = 'u',
        long = "u",
        visible_alias = "url",
        value_name = "URL",
        help_heading = "Input",
        help = "URL the prediction belongs to."
    )]
    pub url: Option<String>,

    #[arg(
        short = 'm',
        long = "map",
        visible_alias = "mapping",
        value_name = "FILE",
        help_heading = "Input",
        help = "Phishing to legitimate URL mapping (one 'phishing,legitimate' pair per line)."
    )]
    pub mapping: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.phishlens/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "ic",
        visible_alias = "init-config",
        help_heading = "Input",
        help = "Write a default config file if none exists, then continue."
    )]
    pub init_config: bool,

    #[arg(
        short = 'o',
        long = "o",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the result to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'F',
        long = "of",
        visible_alias = "format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format: text, json or html (inferred from --output when omitted)."
    )]
    pub format: Option<String>,

    #[arg(
        short = 'f',
        long = "ft",
        visible_alias = "features",
        help_heading = "Output",
        help = "Include the URL feature vector."
    )]
    pub features: bool,

    #[arg(
        short = 'r',
        long = "rv",
        visible_alias = "reveal",
        help_heading = "Display",
        help = "Reveal the verdict in the terminal with the page's staged pacing."
    )]
    pub reveal: bool,

    #[arg(
        long = "rd",
        visible_alias = "reveal-delay",
        value_name = "MS",
        help_heading = "Display",
        help = "Delay before the verdict is shown."
    )]
    pub reveal_delay: Option<u64>,

    #[arg(
        long = "bd",
        visible_alias = "bar-delay",
        value_name = "MS",
        help_heading = "Display",
        help = "Further delay before the confidence bar fills."
    )]
    pub bar_delay: Option<u64>,

    #[arg(
        long = "sr",
        visible_alias = "search",
        value_name = "TERM",
        help_heading = "Display",
        help = "Filter the predictions table (case-insensitive) when writing a predictions page."
    )]
    pub search: Option<String>,

    #[arg(
        long = "rows",
        value_name = "FILE",
        help_heading = "Display",
        help = "JSON array of prediction rows to render as a searchable table."
    )]
    pub rows: Option<String>,
}

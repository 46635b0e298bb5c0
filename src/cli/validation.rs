use crate::cli::args::CliArgs;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if args.score.is_some() && args.payload.is_some() {
        return Err("use either --score or --payload, not both".to_string());
    }
    if let Some(score) = args.score {
        if !score.is_finite() {
            return Err(format!("invalid --score '{score}', expected a finite number"));
        }
    }
    if let Some(raw) = args.format.as_deref() {
        crate::output::OutputFormat::parse(raw)
            .ok_or_else(|| format!("invalid --format '{raw}', expected text, json or html"))?;
    }
    if args.search.is_some() && args.rows.is_none() {
        return Err("--search requires --rows".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn rejects_score_and_payload_together() {
        let args = CliArgs::parse_from(["phishlens", "-s", "0.5", "-p", "x.json"]);
        assert!(validate(&args).is_err());
    }

    #[test]
    fn rejects_unknown_format() {
        let args = CliArgs::parse_from(["phishlens", "-s", "0.5", "--format", "xml"]);
        assert!(validate(&args).unwrap_err().contains("--format"));
    }

    #[test]
    fn rejects_nan_score() {
        let args = CliArgs::parse_from(["phishlens", "--score", "NaN"]);
        assert!(validate(&args).is_err());
    }

    #[test]
    fn accepts_negative_out_of_range_score() {
        let args = CliArgs::parse_from(["phishlens", "--score", "-0.2"]);
        assert!(validate(&args).is_ok());
    }
}

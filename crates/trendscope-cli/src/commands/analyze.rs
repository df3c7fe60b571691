//! Analyze command - full dataset analysis with report output.

use std::path::{Path, PathBuf};

use colored::{ColoredString, Colorize};
use trendscope::{AnalysisReport, DatasetInsights, EngineConfig, RiskLevel, TrendDirection, Trendscope};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    json_output: bool,
    file_name: Option<String>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => EngineConfig::from_file(&path)?,
        None => EngineConfig::default(),
    };
    let engine = Trendscope::with_config(config);

    if !json_output {
        println!(
            "{} {}",
            "Analyzing".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let (mut input, source) = super::load(&file)?;
    if let Some(name) = file_name {
        input.file_name = Some(name);
    }
    let insights = engine.analyze_input(&input)?;
    let report = AnalysisReport { source, insights };

    if let Some(ref path) = output {
        save_report(&report, path)?;
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summary(&report.insights, verbose);

    if let Some(path) = output {
        println!();
        println!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}

fn save_report(report: &AnalysisReport, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    Ok(())
}

fn print_summary(insights: &DatasetInsights, verbose: bool) {
    println!();
    println!(
        "Domain: {}   Rows: {}   Columns: {}",
        insights.domain_type.to_string().white().bold(),
        insights.row_count,
        insights.column_count
    );
    println!(
        "Business health: {}   Confidence: {:.0}%   Completeness: {:.0}%",
        percent(insights.business_health.score),
        insights.confidence_level * 100.0,
        insights.data_quality.completeness * 100.0
    );
    println!(
        "Overall trend: {} ({})",
        direction(insights.overall_trend.direction),
        insights.overall_trend.pattern
    );

    if !insights.key_columns.is_empty() {
        println!();
        println!("{}", "Key columns:".yellow().bold());
        for col in &insights.key_columns {
            println!(
                "  {:24} {:18} health {:>4}  {:8} {}",
                col.name,
                direction(col.trend.direction),
                format!("{:.0}%", col.health_score * 100.0),
                risk(col.risk_level),
                col.criticality
            );
            if verbose {
                println!(
                    "  {:24} slope {:.3}, change {:.1}%, volatility {:.3}, {} outliers, areas: {}",
                    "",
                    col.trend.slope,
                    col.trend.change_rate,
                    col.trend.volatility,
                    col.trend.outliers.len(),
                    col.impact_area.join(", ")
                );
            }
        }
    }

    let health = &insights.business_health;
    print_list("Critical issues:", &health.critical_issues, |s| s.red());
    print_list("Opportunities:", &health.opportunities, |s| s.green());
    print_list("Recommendations:", &health.recommendations, |s| s.normal());

    if !insights.summary.is_empty() {
        println!();
        for line in &insights.summary {
            println!("{}", line);
        }
    }
}

fn print_list(title: &str, items: &[String], style: impl Fn(&str) -> ColoredString) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{}", title.yellow().bold());
    for item in items {
        println!("  - {}", style(item));
    }
}

fn percent(score: f64) -> ColoredString {
    let text = format!("{:.0}%", score * 100.0);
    if score >= 0.6 {
        text.green().bold()
    } else if score >= 0.3 {
        text.yellow().bold()
    } else {
        text.red().bold()
    }
}

pub(crate) fn direction(direction: TrendDirection) -> ColoredString {
    let label = direction.to_string();
    match direction {
        TrendDirection::Increasing => label.green(),
        TrendDirection::Decreasing => label.red(),
        TrendDirection::Volatile => label.yellow(),
        TrendDirection::Stable => label.blue(),
        TrendDirection::InsufficientData => label.dimmed(),
    }
}

fn risk(level: RiskLevel) -> ColoredString {
    let label = level.to_string();
    match level {
        RiskLevel::Critical => label.red().bold(),
        RiskLevel::Warning => label.yellow(),
        RiskLevel::Good => label.green(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_run_writes_report() {
        let mut data = tempfile::NamedTempFile::with_suffix(".csv").unwrap();
        data.write_all(b"month,revenue\n2024-01,100\n2024-02,110\n2024-03,120\n2024-04,130\n")
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.json");

        run(
            data.path().to_path_buf(),
            Some(out.clone()),
            None,
            true,
            Some("sales_report.csv".to_string()),
            false,
        )
        .unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(report["insights"]["domainType"], "sales");
        assert_eq!(report["source"]["rowCount"], 4);
    }

    #[test]
    fn test_run_rejects_bad_config() {
        let mut data = tempfile::NamedTempFile::with_suffix(".csv").unwrap();
        data.write_all(b"a\n1\n2\n3\n").unwrap();
        let mut config = tempfile::NamedTempFile::with_suffix(".json").unwrap();
        config.write_all(br#"{"trend": {"weak_correlation": 4.0}}"#).unwrap();

        let result = run(
            data.path().to_path_buf(),
            None,
            Some(config.path().to_path_buf()),
            true,
            None,
            false,
        );
        assert!(result.is_err());
    }
}

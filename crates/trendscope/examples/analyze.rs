//! Example: Analyze a tabular data file with Trendscope.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>
//!
//! Example:
//!   cargo run --example analyze -- monthly_sales.csv

use std::env;
use std::path::Path;

use trendscope::{RiskLevel, Trendscope};

fn main() -> trendscope::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example analyze -- monthly_sales.csv");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Trendscope Analysis: {}", file_path);
    println!("{}", separator);
    println!();

    let report = Trendscope::new().analyze_file(path)?;
    let insights = &report.insights;

    println!("Source:");
    println!("  Format: {}", report.source.format);
    println!("  Rows: {}", report.source.row_count);
    println!("  Columns: {}", report.source.column_count);
    println!("  Hash: {}", report.source.hash);
    println!();

    println!("Dataset:");
    println!("  Domain: {} ({})", insights.domain_type, insights.domain_type.focus());
    println!("  Business health: {:.0}%", insights.business_health.score * 100.0);
    println!("  Confidence: {:.0}%", insights.confidence_level * 100.0);
    println!(
        "  Overall trend: {} / {}",
        insights.overall_trend.direction, insights.overall_trend.pattern
    );
    println!();

    println!("{}", "-".repeat(80));
    println!(
        "{:<24} {:<18} {:>8} {:>10} {:<10}",
        "Column", "Direction", "Health", "Change %", "Risk"
    );
    println!("{}", "-".repeat(80));
    for col in &insights.key_columns {
        let marker = if col.risk_level == RiskLevel::Critical { " !" } else { "" };
        println!(
            "{:<24} {:<18} {:>7.0}% {:>10.1} {:<10}{}",
            col.name,
            col.trend.direction.to_string(),
            col.health_score * 100.0,
            col.trend.change_rate,
            col.risk_level.to_string(),
            marker
        );
    }
    println!();

    if !insights.business_health.recommendations.is_empty() {
        println!("Recommendations:");
        for (i, rec) in insights.business_health.recommendations.iter().enumerate() {
            println!("  {}. {}", i + 1, rec);
        }
        println!();
    }

    for line in &insights.summary {
        println!("{}", line);
    }

    Ok(())
}

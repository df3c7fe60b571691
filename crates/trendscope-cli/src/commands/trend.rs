//! Trend command - trend analysis of a single column.

use std::path::PathBuf;

use colored::Colorize;
use trendscope::{Column, DatasetInput, Trendscope};

pub fn run(file: PathBuf, column: String, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (input, _) = super::load(&file)?;
    let target = find_column(&input, &column)?;

    let trend = Trendscope::new().analyze_trend(target);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&trend)?);
        return Ok(());
    }

    println!(
        "{} {} ({})",
        "Trend for".cyan().bold(),
        target.name.white().bold(),
        target.kind
    );
    println!();
    println!("  Direction:    {}", super::analyze::direction(trend.direction));
    println!("  Pattern:      {}", trend.pattern);
    println!("  Slope:        {:.4}", trend.slope);
    println!("  Correlation:  {:.3}", trend.correlation);
    println!("  Confidence:   {:.0}%", trend.confidence * 100.0);
    println!("  Change:       {:.1}%", trend.change_rate);
    println!("  Volatility:   {:.4}", trend.volatility);
    println!(
        "  Seasonal:     {}",
        if trend.seasonality { "yes" } else { "no" }
    );
    if trend.outliers.is_empty() {
        println!("  Outliers:     none");
    } else {
        let rows: Vec<String> = trend.outliers.iter().map(|i| i.to_string()).collect();
        println!("  Outliers:     rows {}", rows.join(", ").yellow());
    }

    Ok(())
}

fn find_column<'a>(input: &'a DatasetInput, name: &str) -> Result<&'a Column, String> {
    input.columns.iter().find(|c| c.name == name).ok_or_else(|| {
        format!(
            "Column '{}' not found. Available columns: {}",
            name,
            input.column_names().join(", ")
        )
    })
}

//! Domain command - business domain detection.

use std::path::PathBuf;

use colored::Colorize;
use trendscope::Trendscope;

pub fn run(file: PathBuf, show_scores: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (input, _) = super::load(&file)?;
    let engine = Trendscope::new();

    let names = input.column_names();
    let file_name = input.file_name.as_deref();
    let domain = engine.detect_domain(&names, file_name);

    println!(
        "{} {} ({})",
        "Domain:".cyan().bold(),
        domain.to_string().white().bold(),
        domain.focus()
    );

    if show_scores {
        println!();
        for (candidate, score) in engine.domain_scores(&names, file_name) {
            let line = format!("  {:12} {:>4}", candidate.to_string(), score);
            if candidate == domain {
                println!("{}", line.green().bold());
            } else {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

use std::env;
use std::path::PathBuf;

use modelfaker_rules::{ValidationReport, validate_rules};
use serde_json::Value;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("missing rules path")?;
    let contents = std::fs::read_to_string(&path)?;
    let rules_json: Value = serde_json::from_str(&contents)?;

    let validated = match validate_rules(&rules_json) {
        Ok(validated) => validated,
        Err(report) => {
            eprintln!("rule validation failed");
            print_report(&report);
            std::process::exit(1);
        }
    };

    if validated.warnings.is_empty() {
        println!("rules validated successfully");
    } else {
        eprintln!("rules validated with warnings:");
        print_report(&ValidationReport {
            errors: Vec::new(),
            warnings: validated.warnings,
        });
    }

    Ok(())
}

fn print_report(report: &ValidationReport) {
    for issue in report.errors.iter().chain(&report.warnings) {
        eprintln!("{:?} {} {}: {}", issue.severity, issue.code, issue.path, issue.message);
        if let Some(hint) = &issue.hint {
            eprintln!("  hint: {hint}");
        }
    }
}

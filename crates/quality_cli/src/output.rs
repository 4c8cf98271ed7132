use colored::*;
use quality_core::{CrossReferenceReport, Severity, TableReport, ValidationSummary};

pub fn print_table_report(name: &str, report: &TableReport, format: &str) {
    match format {
        "json" => print_json(report),
        _ => print_text_table_report(name, report),
    }
}

fn print_text_table_report(name: &str, report: &TableReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", format!("  TABLE REPORT: {name}").bold());
    println!("{}", "═".repeat(60));

    if report.has_errors() {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    }

    println!("\n{}", "Summary:".bold());
    println!("  Total records:   {}", report.total_records);
    println!("  Valid records:   {}", report.valid_records);
    println!("  Invalid records: {}", report.invalid_records);
    println!(
        "  Quality score:   {:.2}%",
        report.data_quality_score * 100.0
    );

    if !report.validation_errors.is_empty() {
        println!("\n{}", "Row errors:".red().bold());
        for issue in &report.validation_errors {
            println!(
                "  row {}: [{}] {}",
                issue.row_index,
                issue.error_type,
                issue.error_message.clone().red()
            );
        }
    }

    if !report.table_issues.is_empty() {
        println!("\n{}", "Table issues:".bold());
        for violation in &report.table_issues {
            let line = format!("  [{}] {}", violation.kind.as_str(), violation.message);
            match violation.severity {
                Severity::Error => println!("{}", line.red()),
                Severity::Warning => println!("{}", line.yellow()),
            }
        }
    }

    println!("{}", "═".repeat(60));
}

pub fn print_summary(summary: &ValidationSummary) {
    println!("\n{}", "Overall:".bold());
    println!("  Tables:          {}", summary.table_count);
    println!("  Total records:   {}", summary.total_records);
    println!("  Valid records:   {}", summary.total_valid_records);
    println!("  Invalid records: {}", summary.total_invalid_records);
    println!(
        "  Quality score:   {:.2}%",
        summary.overall_quality_score * 100.0
    );
}

pub fn print_cross_references(report: &CrossReferenceReport) {
    println!("\n{}", "Cross references:".bold());
    if !report.has_orphans() {
        println!("{} {}", "✓".green().bold(), "No orphaned records".green());
        return;
    }

    for issue in &report.cross_reference_issues {
        println!(
            "{} [{}] {}",
            "✗".red().bold(),
            issue.issue_type,
            issue.message.clone().red()
        );
    }
    for (relationship, keys) in &report.orphaned_records {
        let joined: Vec<&str> = keys.iter().map(String::as_str).collect();
        println!("    {}: {}", relationship, joined.join(", "));
    }
}

fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize report: {e}"),
    }
}

pub fn print_json_report(value: &impl serde::Serialize) {
    print_json(value);
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

//! Shared output formatting for check results.

use anyhow::Result;
use comment_checker_core::{DiagnosticReport, LintResult, Severity};
use comment_checker_hcl::HclDocuments;
use miette::{NamedSource, Report};

use crate::OutputFormat;

/// Print check results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat, documents: &HclDocuments) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result, documents),
    }
    Ok(())
}

fn severity_indicator(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn print_text(result: &LintResult) {
    for diagnostic in &result.diagnostics {
        println!(
            "{} {} at {}",
            diagnostic.code, diagnostic.rule, diagnostic.range
        );
        println!(
            "  {}: {}",
            severity_indicator(diagnostic.severity),
            diagnostic.message
        );
        if let Some(suggestion) = &diagnostic.suggestion {
            println!("  = help: {}", suggestion.message);
        }
        if let Some(link) = &diagnostic.link {
            println!("  = see: {link}");
        }
        println!();
    }
    print_summary(result);
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for diagnostic in &result.diagnostics {
        println!("{diagnostic}");
    }
}

fn print_pretty(result: &LintResult, documents: &HclDocuments) {
    for diagnostic in &result.diagnostics {
        let report = Report::new(DiagnosticReport::from(diagnostic));
        let report = match documents.document(&diagnostic.range.filename) {
            Some(document) => report.with_source_code(NamedSource::new(
                document.name(),
                String::from_utf8_lossy(document.bytes()).into_owned(),
            )),
            None => report,
        };
        println!("{report:?}");
    }
    print_summary(result);
}

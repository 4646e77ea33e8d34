//! List rules command implementation.

use comment_checker_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!(
        "{:<8} {:<28} {:<9} Description",
        "Code", "Name", "Severity"
    );
    println!("{}", "-".repeat(90));

    for rule in all_rules() {
        println!(
            "{:<8} {:<28} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
        if let Some(link) = rule.link() {
            println!("{:<8} {:<28} {:<9} see: {}", "", "", "", link);
        }
    }

    println!("\nRules are off until enabled in comment-checker.toml, e.g.:");
    println!("  [rules.module-attribute-comments]");
    println!("  enabled = true");
    println!("  attribute_names = [\"instance_type\"]");
    println!("\nUse --rules to run specific rules, e.g.:");
    println!("  comment-checker check --rules CC001");
}

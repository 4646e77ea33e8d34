//! Check command implementation.

use anyhow::{Context, Result};
use comment_checker_core::{CheckerConfig, Config};
use comment_checker_hcl::HclDocuments;
use comment_checker_rules::{all_rules, checker_from_config};
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
///
/// Returns `true` when diagnostics at or above the configured threshold
/// were reported.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<bool> {
    let mut config = source.load()?;
    config.checker.exclude.extend(exclude);

    if let Some(filter) = rules_filter {
        let names: Vec<&str> = filter.split(',').map(str::trim).collect();
        enable_only(&mut config, &names);
    }

    let root = if config.checker.root.is_absolute() {
        config.checker.root.clone()
    } else {
        path.join(&config.checker.root)
    };
    let threshold = config.fail_threshold();
    let checker_config = config.checker.clone();
    let checker = checker_from_config(config).context("Invalid rule configuration")?;

    let files = discover_files(&root, &checker_config)?;
    let mut documents = HclDocuments::new();
    documents
        .load_files(&root, &files)
        .context("Failed to load sources")?;

    tracing::info!(
        "Checking {} file(s) under {} with {} rule(s)",
        files.len(),
        root.display(),
        checker.rule_count()
    );
    tracing::debug!("Rules: {}", checker.rule_names().join(", "));

    let mut result = checker.run(&documents).context("Check failed")?;
    result.files_checked = documents.len();

    super::output::print(&result, format, &documents)?;

    Ok(result.has_diagnostics_at(threshold))
}

/// Enables exactly the rules named in `names` (rule names or codes),
/// regardless of their `enabled` setting.
fn enable_only(config: &mut Config, names: &[&str]) {
    let rules = all_rules();
    for rule in &rules {
        let wanted = names.iter().any(|n| *n == rule.name() || *n == rule.code());
        config
            .rules
            .entry(rule.name().to_string())
            .or_default()
            .enabled = Some(wanted);
    }

    for name in names {
        if !rules.iter().any(|r| *name == r.name() || *name == r.code()) {
            tracing::warn!("Unknown rule: {}", name);
        }
    }
}

/// Finds files with a configured extension under `root`, honoring
/// `.gitignore` and exclude patterns. Sorted for a stable diagnostic order.
fn discover_files(root: &Path, checker: &CheckerConfig) -> Result<Vec<PathBuf>> {
    let excludes = checker
        .exclude
        .iter()
        .map(|p| glob::Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
        .collect::<Result<Vec<_>>>()?;

    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(checker.respect_gitignore)
        .require_git(false);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let matches_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| checker.extensions.iter().any(|e| e == ext));
        if !matches_extension {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if excludes.iter().any(|p| p.matches_path(relative)) {
            tracing::debug!("Excluded {}", relative.display());
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn discovers_configured_extensions_and_skips_excluded() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "main.tf", "");
        write(tmp.path(), "modules/vpc/main.tf", "");
        write(tmp.path(), "README.md", "");
        write(tmp.path(), ".terraform/modules/x/main.tf", "");

        let files = discover_files(tmp.path(), &CheckerConfig::default()).unwrap();
        assert_eq!(
            names(tmp.path(), &files),
            vec!["main.tf", "modules/vpc/main.tf"]
        );
    }

    #[test]
    fn extra_extensions_are_picked_up() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "main.tf", "");
        write(tmp.path(), "terragrunt.hcl", "");

        let checker = CheckerConfig {
            extensions: vec!["tf".to_string(), "hcl".to_string()],
            ..CheckerConfig::default()
        };
        let files = discover_files(tmp.path(), &checker).unwrap();
        assert_eq!(names(tmp.path(), &files), vec!["main.tf", "terragrunt.hcl"]);
    }

    #[test]
    fn invalid_exclude_pattern_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let checker = CheckerConfig {
            exclude: vec!["[".to_string()],
            ..CheckerConfig::default()
        };
        assert!(discover_files(tmp.path(), &checker).is_err());
    }

    #[test]
    fn rule_filter_enables_named_rules() {
        let config = Config::parse(
            "[rules.module-attribute-comments]\nattribute_names = [\"count\"]\n",
        )
        .unwrap();
        assert!(!config.is_rule_enabled("module-attribute-comments", false));

        let mut by_code = config.clone();
        enable_only(&mut by_code, &["CC001"]);
        assert!(by_code.is_rule_enabled("module-attribute-comments", false));

        let mut unknown = config;
        enable_only(&mut unknown, &["unknown"]);
        assert!(!unknown.is_rule_enabled("module-attribute-comments", true));
    }

    #[test]
    fn contradictory_rule_options_fail_before_loading_sources() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "comment-checker.toml",
            "[rules.module-attribute-comments]\nenabled = true\nattribute_names = [\"a\"]\n\n[[rules.module-attribute-comments.attribute]]\nname = \"b\"\n",
        );
        write(tmp.path(), "main.tf", "module \"m\" {\n");

        let source = ConfigSource::Project(tmp.path().join("comment-checker.toml"));
        let err = run(tmp.path(), OutputFormat::Compact, None, Vec::new(), &source).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid rule configuration"));
    }

    #[test]
    fn check_reports_failure_for_uncommented_attribute() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "comment-checker.toml",
            "[rules.module-attribute-comments]\nenabled = true\nattribute_names = [\"count\"]\n",
        );
        write(tmp.path(), "main.tf", "module \"m\" {\n  count = 2\n}\n");

        let source = ConfigSource::Project(tmp.path().join("comment-checker.toml"));
        let failed = run(tmp.path(), OutputFormat::Compact, None, Vec::new(), &source).unwrap();
        assert!(failed);
    }

    #[test]
    fn check_passes_when_attribute_is_commented() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "comment-checker.toml",
            "[rules.module-attribute-comments]\nenabled = true\nattribute_names = [\"count\"]\n",
        );
        write(
            tmp.path(),
            "main.tf",
            "module \"m\" {\n  # two replicas for failover\n  count = 2\n}\n",
        );

        let source = ConfigSource::Project(tmp.path().join("comment-checker.toml"));
        let failed = run(tmp.path(), OutputFormat::Compact, None, Vec::new(), &source).unwrap();
        assert!(!failed);
    }

    #[test]
    fn warnings_do_not_fail_by_default() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "comment-checker.toml",
            "[rules.module-attribute-comments]\nenabled = true\nseverity = \"warning\"\nattribute_names = [\"count\"]\n",
        );
        write(tmp.path(), "main.tf", "module \"m\" {\n  count = 2\n}\n");

        let source = ConfigSource::Project(tmp.path().join("comment-checker.toml"));
        let failed = run(tmp.path(), OutputFormat::Compact, None, Vec::new(), &source).unwrap();
        assert!(!failed);
    }

    #[test]
    fn unparsable_source_is_an_error() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "main.tf", "module \"m\" {\n");

        let err = run(
            tmp.path(),
            OutputFormat::Compact,
            None,
            Vec::new(),
            &ConfigSource::Default,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("main.tf"));
    }
}

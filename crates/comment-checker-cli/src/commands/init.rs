//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# comment-checker configuration

[checker]
# File extensions to check
extensions = ["tf"]

# Glob patterns to exclude, relative to the checked directory
exclude = [
    "**/.terraform/**",
]

# Respect .gitignore files
respect_gitignore = true

# Exit with status 1 when a diagnostic at or above this severity is reported
# fail_on = "error"

# Require a comment on the line directly above selected module arguments.
[rules.module-attribute-comments]
enabled = true
# severity = "warning"  # Override default severity
# block_type = "module"

# Either list names sharing one message:
attribute_names = ["instance_type"]
message = "Explain why the module default is overridden."

# or give each attribute its own message:
# [[rules.module-attribute-comments.attribute]]
# name = "instance_type"
# message = "Must explain override."
"#;

/// Name of the config file written by `init`.
const CONFIG_FILE: &str = "comment-checker.toml";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to list the attributes that need comments");
    println!("  2. Run: comment-checker check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

use anyhow::Result;
use colored::Colorize;
use std::collections::HashSet;
use std::path::Path;

/// Checks a config file for keys codetext does not understand
pub struct ConfigValidator {
    /// Set of valid configuration fields
    known_fields: HashSet<&'static str>,
    /// Sections that may appear as tables
    known_sections: HashSet<&'static str>,
}

impl ConfigValidator {
    /// Create a new validator with known configuration fields
    #[must_use]
    pub fn new() -> Self {
        let known_fields = HashSet::from(["exclude.paths", "walk.follow_symlinks", "output.separator"]);
        let known_sections = HashSet::from(["exclude", "walk", "output"]);

        Self {
            known_fields,
            known_sections,
        }
    }

    /// Validate a config file and print a warning block for unknown fields.
    /// Unknown fields are ignored by the parser, so they never fail a run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub fn validate_config_file(&self, config_path: &Path) -> Result<()> {
        if !config_path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(config_path)?;
        let parsed: toml::Value = toml::from_str(&content)?;

        let unknown = self.unknown_fields(&parsed);
        if !unknown.is_empty() {
            eprintln!("{}", "Configuration warnings:".yellow().bold());
            for field in &unknown {
                eprintln!("  Unknown configuration field: {}", field.yellow());
            }
            eprintln!();
        }

        Ok(())
    }

    /// Dotted paths of every unknown field in `value`
    #[must_use]
    pub fn unknown_fields(&self, value: &toml::Value) -> Vec<String> {
        let mut unknown = Vec::new();
        self.check_table(value, "", &mut unknown);
        unknown
    }

    /// Recursively checks a TOML table against the known fields
    ///
    /// # Arguments
    ///
    /// * `table` - The TOML value to validate (expected to be a table)
    /// * `prefix` - The current path prefix (e.g., "exclude")
    /// * `unknown` - Vector to collect unknown field paths
    fn check_table(&self, table: &toml::Value, prefix: &str, unknown: &mut Vec<String>) {
        let toml::Value::Table(map) = table else {
            return;
        };

        for (key, value) in map {
            let full_key = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };

            if self.known_fields.contains(full_key.as_str()) {
                continue;
            }

            if matches!(value, toml::Value::Table(_))
                && self.known_sections.contains(full_key.as_str())
            {
                self.check_table(value, &full_key, unknown);
            } else {
                unknown.push(full_key);
            }
        }
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

use std::path::Path;

use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level rules
// ---------------------------------------------------------------------------

/// Scheme rules: cleanup terms, exclusion keywords and the variant ladder.
///
/// Built once at startup and passed by reference into every stage. All terms
/// and keywords are stored uppercased, so matching against uppercased names is
/// case-insensitive no matter how the rule file spells them.
///
/// Every section is required and unknown keys are rejected, so a misspelled
/// section fails to load instead of silently disabling its rules. Empty lists
/// written out explicitly are valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
    base_scheme_remove_terms: Vec<String>,
    exclusion_rules: ExclusionRules,
    selection_rules: SelectionRules,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExclusionRules {
    pub contains_any: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionRules {
    /// Most-preferred rung first. Each rung is a conjunction of keywords.
    pub priority_ladder: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesFormat {
    Toml,
    Json,
}

impl RulesFormat {
    /// `.json` files are JSON; everything else is read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl RuleSet {
    pub fn new(
        remove_terms: Vec<String>,
        contains_any: Vec<String>,
        priority_ladder: Vec<Vec<String>>,
    ) -> Result<Self, ReconError> {
        Self {
            base_scheme_remove_terms: remove_terms,
            exclusion_rules: ExclusionRules { contains_any },
            selection_rules: SelectionRules { priority_ladder },
        }
        .finish()
    }

    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let rules: RuleSet =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        rules.finish()
    }

    pub fn from_json(input: &str) -> Result<Self, ReconError> {
        let rules: RuleSet =
            serde_json::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        rules.finish()
    }

    pub fn parse(input: &str, format: RulesFormat) -> Result<Self, ReconError> {
        match format {
            RulesFormat::Toml => Self::from_toml(input),
            RulesFormat::Json => Self::from_json(input),
        }
    }

    /// Read and parse a rule file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self, ReconError> {
        let input = std::fs::read_to_string(path).map_err(|e| {
            ReconError::Io(format!("cannot read rules {}: {e}", path.display()))
        })?;
        let rules = Self::parse(&input, RulesFormat::from_path(path))?;
        log::info!(
            "loaded rules from {}: {} remove terms, {} exclusion keywords, {} ladder rungs",
            path.display(),
            rules.base_scheme_remove_terms.len(),
            rules.exclusion_rules.contains_any.len(),
            rules.selection_rules.priority_ladder.len(),
        );
        Ok(rules)
    }

    fn finish(mut self) -> Result<Self, ReconError> {
        self.validate()?;
        for term in &mut self.base_scheme_remove_terms {
            *term = term.to_uppercase();
        }
        for keyword in &mut self.exclusion_rules.contains_any {
            *keyword = keyword.to_uppercase();
        }
        for rung in &mut self.selection_rules.priority_ladder {
            for keyword in rung.iter_mut() {
                *keyword = keyword.to_uppercase();
            }
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        for (i, term) in self.base_scheme_remove_terms.iter().enumerate() {
            if term.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "base_scheme_remove_terms[{i}] is blank"
                )));
            }
        }

        for (i, keyword) in self.exclusion_rules.contains_any.iter().enumerate() {
            if keyword.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "exclusion_rules.contains_any[{i}] is blank"
                )));
            }
        }

        for (i, rung) in self.selection_rules.priority_ladder.iter().enumerate() {
            // An empty conjunction would match every record.
            if rung.is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "selection_rules.priority_ladder[{i}] has no keywords"
                )));
            }
            if let Some(j) = rung.iter().position(|k| k.trim().is_empty()) {
                return Err(ReconError::ConfigValidation(format!(
                    "selection_rules.priority_ladder[{i}][{j}] is blank"
                )));
            }
        }

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn remove_terms(&self) -> &[String] {
        &self.base_scheme_remove_terms
    }

    pub fn exclusion_keywords(&self) -> &[String] {
        &self.exclusion_rules.contains_any
    }

    pub fn priority_ladder(&self) -> &[Vec<String>] {
        &self.selection_rules.priority_ladder
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

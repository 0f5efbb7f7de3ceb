use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::codon::GeneticCodes;
use crate::translator::fix::FixKind;

pub const DEFAULT_TRANSLATION_TABLE: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TranslatorConfig {
    pub fix_mode: bool,
    pub default_translation_table: u8,
    pub disabled_fixes: Vec<FixKind>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            fix_mode: false,
            default_translation_table: DEFAULT_TRANSLATION_TABLE,
            disabled_fixes: Vec::new(),
        }
    }
}

impl TranslatorConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate(&GeneticCodes::ncbi())?;
        Ok(config)
    }

    /// Check the default table against the registry the translator will use.
    pub fn validate(&self, codes: &GeneticCodes) -> Result<()> {
        if codes.get(self.default_translation_table).is_err() {
            let known: Vec<String> = codes.numbers().map(|n| n.to_string()).collect();
            bail!(
                "invalid default translation table {}: expected one of {}",
                self.default_translation_table,
                known.join(", ")
            );
        }
        Ok(())
    }

    /// Whether `fix` may mutate features under this configuration.
    #[must_use]
    pub fn fix_enabled(&self, fix: FixKind) -> bool {
        self.fix_mode && !self.disabled_fixes.contains(&fix)
    }
}

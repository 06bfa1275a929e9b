use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::filters::{FilterChain, FilterMode, FilterSyntax, NameFilter};

/// One configured filter as written in a config file or on the command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub filter: String,
    #[serde(default)]
    pub syntax: FilterSyntax,
    #[serde(default)]
    pub mode: FilterMode,
}

impl FilterSpec {
    pub fn include(filter: impl Into<String>, syntax: FilterSyntax) -> Self {
        Self {
            filter: filter.into(),
            syntax,
            mode: FilterMode::Include,
        }
    }

    pub fn exclude(filter: impl Into<String>, syntax: FilterSyntax) -> Self {
        Self {
            filter: filter.into(),
            syntax,
            mode: FilterMode::Exclude,
        }
    }

    pub fn compile(&self) -> Result<NameFilter, FilterError> {
        Ok(NameFilter::new(&self.syntax, &self.filter)?.with_mode(self.mode))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
}

impl FilterConfig {
    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FilterError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn push(&mut self, spec: FilterSpec) {
        self.filters.push(spec);
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Compile every configured filter into a chain requiring all of them
    pub fn build(&self) -> Result<FilterChain, FilterError> {
        let mut chain = FilterChain::new();
        for spec in &self.filters {
            chain.push(spec.compile()?);
        }

        tracing::info!(filters_count = chain.len(), "Built test filter chain");
        Ok(chain)
    }
}

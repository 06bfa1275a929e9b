pub mod compiled;
pub mod name_filter;
pub mod syntax;

use serde::{Deserialize, Serialize};

use crate::tree::TestNode;

pub use compiled::{CompiledFilter, DataSetRange};
pub use name_filter::NameFilter;
pub use syntax::{FilterSyntax, PrepareFilter};

/// Per-node decision called by the tree traversal
pub trait NodeFilter: Send + Sync {
    fn accept(&self, node: &TestNode) -> bool;
}

/// Whether matching cases are kept or dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    Include,
    Exclude,
}

/// Several filters that must all accept a node
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn NodeFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, filter: impl NodeFilter + 'static) {
        self.filters.push(Box::new(filter));
    }

    pub fn with(mut self, filter: impl NodeFilter + 'static) -> Self {
        self.push(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters_count", &self.filters.len())
            .finish()
    }
}

impl NodeFilter for FilterChain {
    fn accept(&self, node: &TestNode) -> bool {
        self.filters.iter().all(|filter| filter.accept(node))
    }
}

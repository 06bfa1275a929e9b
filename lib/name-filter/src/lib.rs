pub mod config;
pub mod error;
pub mod filters;
pub mod traverse;
pub mod tree;

pub use config::{FilterConfig, FilterSpec};
pub use error::FilterError;
pub use filters::{
    CompiledFilter, DataSetRange, FilterChain, FilterMode, FilterSyntax, NameFilter, NodeFilter,
    PrepareFilter,
};
pub use traverse::{accepted_cases, filter_tree};
pub use tree::{DataSet, TestCase, TestNode, TestSuite};

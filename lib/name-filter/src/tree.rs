//! Test tree consumed by the filters.
//!
//! Suites group other nodes, cases are the executable leaves. Anything the
//! runner does not model as a case (placeholders for skipped files, warnings,
//! etc.) is carried as [`TestNode::Other`] and never passes a name filter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Data set a parameterized case was invoked with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataSet {
    Index(u64),
    Named(String),
}

impl fmt::Display for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSet::Index(index) => write!(f, " with data set #{}", index),
            DataSet::Named(key) => write!(f, " with data set \"{}\"", key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Fully qualified name of the type declaring the test
    pub type_name: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_set: Option<DataSet>,
}

impl TestCase {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            data_set: None,
        }
    }

    pub fn with_data_set(mut self, data_set: DataSet) -> Self {
        self.data_set = Some(data_set);
        self
    }

    /// Name followed by the rendered data set, e.g. `testAdd with data set #2`
    pub fn name_with_data_set(&self) -> String {
        match &self.data_set {
            Some(data_set) => format!("{}{}", self.name, data_set),
            None => self.name.clone(),
        }
    }

    /// `<type_name>::<name_with_data_set>`, the string name filters match against
    pub fn full_name(&self) -> String {
        format!("{}::{}", self.type_name, self.name_with_data_set())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestSuite {
    pub name: String,
    #[serde(default)]
    pub tests: Vec<TestNode>,
}

impl TestSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: Vec::new(),
        }
    }

    pub fn with(mut self, node: impl Into<TestNode>) -> Self {
        self.tests.push(node.into());
        self
    }

    /// Number of cases anywhere below this suite
    pub fn count(&self) -> usize {
        self.tests.iter().map(TestNode::count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TestNode {
    Suite(TestSuite),
    Case(TestCase),
    Other { name: String },
}

impl TestNode {
    pub fn count(&self) -> usize {
        match self {
            TestNode::Suite(suite) => suite.count(),
            TestNode::Case(_) => 1,
            TestNode::Other { .. } => 0,
        }
    }
}

impl From<TestSuite> for TestNode {
    fn from(suite: TestSuite) -> Self {
        TestNode::Suite(suite)
    }
}

impl From<TestCase> for TestNode {
    fn from(case: TestCase) -> Self {
        TestNode::Case(case)
    }
}

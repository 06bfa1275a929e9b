//! Tree walk applying a [`NodeFilter`] to every node.

use crate::filters::NodeFilter;
use crate::tree::{TestNode, TestSuite};

/// Copy of `root` holding only the nodes the filter accepts.
///
/// Suites are descended into and dropped once nothing below them survives.
/// The root suite itself is always returned, possibly empty.
pub fn filter_tree<F>(root: &TestSuite, filter: &F) -> TestSuite
where
    F: NodeFilter + ?Sized,
{
    let filtered = filter_suite(root, filter);
    tracing::debug!(
        suite = %root.name,
        total = root.count(),
        selected = filtered.count(),
        "Filtered test tree"
    );
    filtered
}

/// Full names of the accepted cases in tree order
pub fn accepted_cases<F>(root: &TestSuite, filter: &F) -> Vec<String>
where
    F: NodeFilter + ?Sized,
{
    let mut names = Vec::new();
    collect_cases(&filter_suite(root, filter), &mut names);
    names
}

fn filter_suite<F>(suite: &TestSuite, filter: &F) -> TestSuite
where
    F: NodeFilter + ?Sized,
{
    TestSuite {
        name: suite.name.clone(),
        tests: suite
            .tests
            .iter()
            .filter_map(|node| filter_node(node, filter))
            .collect(),
    }
}

fn filter_node<F>(node: &TestNode, filter: &F) -> Option<TestNode>
where
    F: NodeFilter + ?Sized,
{
    if !filter.accept(node) {
        return None;
    }

    match node {
        TestNode::Suite(suite) => {
            let pruned = filter_suite(suite, filter);
            (!pruned.is_empty()).then_some(TestNode::Suite(pruned))
        }
        other => Some(other.clone()),
    }
}

fn collect_cases(suite: &TestSuite, names: &mut Vec<String>) {
    for node in &suite.tests {
        match node {
            TestNode::Suite(inner) => collect_cases(inner, names),
            TestNode::Case(case) => names.push(case.full_name()),
            TestNode::Other { .. } => {}
        }
    }
}

#![warn(rust_2018_idioms)]

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use clap::Parser;
use name_filter::{
    accepted_cases, filter_tree, FilterChain, FilterConfig, FilterSpec, TestNode, TestSuite,
};

use crate::args::Args;

mod args;
mod setup;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = setup::setup_logger()?;

    let chain = build_config(&args)?.build()?;
    let tree = parse_tree(&read_input(&args.tree)?)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_output(&mut out, &tree, &chain, args.json)
}

/// Filters from `--config` first, then `--filter` and `--exclude-filter`
/// read with `--syntax`
fn build_config(args: &Args) -> Result<FilterConfig> {
    let mut config = match &args.config {
        Some(path) => FilterConfig::from_file(path)?,
        None => FilterConfig::default(),
    };
    for filter in &args.filters {
        config.push(FilterSpec::include(filter, args.syntax));
    }
    for filter in &args.exclude_filters {
        config.push(FilterSpec::exclude(filter, args.syntax));
    }
    Ok(config)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

/// Parse the tree, wrapping a lone non-suite node in an anonymous root suite
fn parse_tree(content: &str) -> Result<TestSuite> {
    let root = match serde_json::from_str::<TestNode>(content)? {
        TestNode::Suite(suite) => suite,
        node => TestSuite::default().with(node),
    };
    tracing::debug!(suite = %root.name, tests = root.count(), "Loaded test tree");
    Ok(root)
}

fn write_output(
    out: &mut impl Write,
    tree: &TestSuite,
    chain: &FilterChain,
    json: bool,
) -> Result<()> {
    if json {
        let filtered = TestNode::Suite(filter_tree(tree, chain));
        serde_json::to_writer_pretty(&mut *out, &filtered)?;
        writeln!(out)?;
    } else {
        for name in accepted_cases(tree, chain) {
            writeln!(out, "{}", name)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use name_filter::{FilterMode, FilterSyntax};
    use serde_json::json;

    const TREE: &str = r#"{
        "kind": "suite",
        "name": "unit",
        "tests": [
            {"kind": "suite", "name": "FooTest", "tests": [
                {"kind": "case", "type_name": "FooTest", "name": "testA"},
                {"kind": "case", "type_name": "FooTest", "name": "testB", "data_set": 1},
                {"kind": "case", "type_name": "FooTest", "name": "testB", "data_set": 2}
            ]},
            {"kind": "suite", "name": "BarTest", "tests": [
                {"kind": "case", "type_name": "BarTest", "name": "testC"}
            ]}
        ]
    }"#;

    fn _make_args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("tf").chain(argv.iter().copied()))
            .expect("arguments should parse")
    }

    fn _run(args: &Args, tree: &str) -> String {
        let chain = build_config(args).unwrap().build().unwrap();
        let tree = parse_tree(tree).unwrap();
        let mut out = Vec::new();
        write_output(&mut out, &tree, &chain, args.json).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_build_config_merges_file_and_cli_filters() {
        // arrange
        let config_file = tempfile::NamedTempFile::new().unwrap();
        fs::write(config_file.path(), r#"{"filters": [{"filter": "FooTest"}]}"#).unwrap();
        let path = config_file.path().to_str().unwrap();
        let args = _make_args(&["--config", path, "-f", "testB", "-e", "testB#2"]);

        // act
        let config = build_config(&args).unwrap();

        // assert
        assert_eq!(
            config.filters,
            vec![
                FilterSpec::include("FooTest", FilterSyntax::Pattern),
                FilterSpec::include("testB", FilterSyntax::Pattern),
                FilterSpec::exclude("testB#2", FilterSyntax::Pattern),
            ]
        );
        assert_eq!(_run(&args, TREE), "FooTest::testB with data set #1\n");
    }

    #[test]
    fn test_syntax_applies_to_cli_filters() {
        let args = _make_args(&[
            "--syntax",
            "exact",
            "-f",
            "FooTest::testB",
            "-e",
            "FooTest::testB#1",
        ]);

        let config = build_config(&args).unwrap();

        assert!(config.filters.iter().all(|f| f.syntax == FilterSyntax::ExactName));
        assert_eq!(config.filters[1].mode, FilterMode::Exclude);
        assert_eq!(_run(&args, TREE), "FooTest::testB with data set #2\n");
    }

    #[test]
    fn test_no_filters_lists_every_case() {
        let args = _make_args(&[]);

        assert_eq!(
            _run(&args, TREE),
            "FooTest::testA\nFooTest::testB with data set #1\nFooTest::testB with data set #2\nBarTest::testC\n"
        );
    }

    #[test]
    fn test_parse_tree_wraps_lone_case() {
        let tree = parse_tree(r#"{"kind": "case", "type_name": "FooTest", "name": "testA"}"#)
            .unwrap();

        assert_eq!(tree.name, "");
        assert_eq!(tree.count(), 1);
        assert!(matches!(&tree.tests[0], TestNode::Case(case) if case.name == "testA"));
    }

    #[test]
    fn test_parse_tree_rejects_invalid_json() {
        assert!(parse_tree("not json").is_err());
    }

    #[test]
    fn test_json_output_prunes_empty_suites() {
        // arrange
        let args = _make_args(&["--json", "-f", "BarTest"]);

        // act
        let output: serde_json::Value = serde_json::from_str(&_run(&args, TREE)).unwrap();

        // assert
        assert_eq!(
            output,
            json!({
                "kind": "suite",
                "name": "unit",
                "tests": [
                    {"kind": "suite", "name": "BarTest", "tests": [
                        {"kind": "case", "type_name": "BarTest", "name": "testC"}
                    ]}
                ]
            })
        );
    }
}

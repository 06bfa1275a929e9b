use std::path::PathBuf;

use clap::Parser;
use name_filter::FilterSyntax;

/// Filter a JSON test tree by test name and data set.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// JSON file with the test tree, `-` reads stdin.
    #[arg(default_value = "-")]
    pub tree: PathBuf,

    /// Keep only tests matching the filter.
    /// Supports `name#N`, `name#N-M` and `name@key` data set shorthands.
    #[arg(short = 'f', long = "filter", env = "TEST_FILTER")]
    pub filters: Vec<String>,

    /// Drop tests matching the filter.
    #[arg(short = 'e', long = "exclude-filter")]
    pub exclude_filters: Vec<String>,

    /// How filters given on the command line are read: pattern, substring or exact.
    #[arg(short = 's', long, default_value_t = FilterSyntax::Pattern)]
    pub syntax: FilterSyntax,

    /// JSON file with additional filters.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Print the filtered tree as JSON instead of test names.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

use regex::{Captures, Regex};

use super::compiled::CompiledFilter;
use super::syntax::PrepareFilter;
use super::{FilterMode, NodeFilter};
use crate::error::FilterError;
use crate::tree::{TestCase, TestNode};

/// Name/data set filter over a test tree.
///
/// Suites always pass so that the traversal can descend into them, unknown
/// node kinds never pass, and cases pass when their full name
/// (`Type::name with data set ...`) matches the pattern and, if a data set
/// range is configured, the pattern's last capture group falls inside it.
///
/// A pattern the regex engine refuses never matches; it is not an error.
#[derive(Debug, Clone)]
pub struct NameFilter {
    compiled: CompiledFilter,
    regex: Option<Regex>,
    mode: FilterMode,
}

impl NameFilter {
    /// Prepare `raw` with the given syntax and build an including filter
    pub fn new(syntax: &impl PrepareFilter, raw: &str) -> Result<Self, FilterError> {
        Ok(Self::from_compiled(syntax.prepare(raw)?))
    }

    pub fn from_compiled(compiled: CompiledFilter) -> Self {
        let regex = match Regex::new(compiled.pattern()) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(
                    pattern = %compiled.pattern(),
                    error = %e,
                    "Failed to compile name filter pattern, no test will match"
                );
                None
            }
        };

        Self {
            compiled,
            regex,
            mode: FilterMode::Include,
        }
    }

    /// Exclude mode inverts the verdict for cases that the pattern can be
    /// checked against. Suites still pass, and unknown nodes and cases under
    /// an unusable pattern are still rejected.
    pub fn with_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn compiled(&self) -> &CompiledFilter {
        &self.compiled
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Whether the case is selected by the pattern and data set range,
    /// regardless of the filter mode
    pub fn matches(&self, case: &TestCase) -> bool {
        let Some(regex) = &self.regex else {
            return false;
        };

        let name = case.full_name();
        let Some(caps) = regex.captures(&name) else {
            return false;
        };

        match self.compiled.data_set_range() {
            None => true,
            Some(range) => range.contains(lenient_integer(last_group(&caps))),
        }
    }
}

impl NodeFilter for NameFilter {
    fn accept(&self, node: &TestNode) -> bool {
        match node {
            TestNode::Suite(_) => true,
            // An unusable pattern rejects every case in both modes
            TestNode::Case(_) if self.regex.is_none() => false,
            TestNode::Case(case) => match self.mode {
                FilterMode::Include => self.matches(case),
                FilterMode::Exclude => !self.matches(case),
            },
            TestNode::Other { .. } => false,
        }
    }
}

/// Text of the highest-numbered group that took part in the match, empty when
/// only the whole match did
fn last_group<'h>(caps: &Captures<'h>) -> &'h str {
    caps.iter()
        .skip(1)
        .flatten()
        .last()
        .map_or("", |m| m.as_str())
}

/// Loose integer reading of captured text: optional sign and leading digits,
/// anything unparsable is 0. Out of range values saturate.
// NOTE: a non-numeric capture reads as 0, so ranges starting at 0 also select
// cases whose captured data set is a name.
fn lenient_integer(text: &str) -> i64 {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(byte - b'0');
        value = match value
            .checked_mul(10)
            .and_then(|v| if negative { v.checked_sub(digit) } else { v.checked_add(digit) })
        {
            Some(v) => v,
            None => return if negative { i64::MIN } else { i64::MAX },
        };
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::syntax::FilterSyntax;
    use crate::tree::{DataSet, TestSuite};

    const FOO_BAR: &str = r"^FooTest::testBar(?: with data set #(\d+))?$";

    fn _case(data_set: Option<u64>) -> TestNode {
        let mut case = TestCase::new("FooTest", "testBar");
        case.data_set = data_set.map(DataSet::Index);
        TestNode::Case(case)
    }

    fn _ranged(minimum: i64, maximum: i64) -> NameFilter {
        NameFilter::from_compiled(
            CompiledFilter::with_data_set_range(FOO_BAR, minimum, maximum).unwrap(),
        )
    }

    #[test]
    fn test_suite_always_accepted() {
        // arrange
        let filter = NameFilter::from_compiled(CompiledFilter::new("^nothing$").unwrap());
        let suite = TestNode::Suite(TestSuite::new("all"));

        // act && assert
        assert!(filter.accept(&suite));
        assert!(filter.clone().with_mode(FilterMode::Exclude).accept(&suite));
    }

    #[test]
    fn test_other_node_never_accepted() {
        let filter = NameFilter::from_compiled(CompiledFilter::new(".*").unwrap());
        let other = TestNode::Other {
            name: "FooTest::testBar".into(),
        };

        assert!(!filter.accept(&other));
        assert!(!filter.with_mode(FilterMode::Exclude).accept(&other));
    }

    #[test]
    fn test_case_matching_without_range() {
        let filter = NameFilter::from_compiled(CompiledFilter::new(FOO_BAR).unwrap());

        assert!(filter.accept(&_case(None)));
        assert!(filter.accept(&_case(Some(7))));
    }

    #[test]
    fn test_case_not_matching() {
        let filter = NameFilter::from_compiled(CompiledFilter::new("^BazTest::").unwrap());
        assert!(!filter.accept(&_case(None)));
        assert!(!_ranged(0, 100).accept(&TestNode::Case(TestCase::new("BazTest", "testBar"))));
    }

    #[test]
    fn test_range_without_data_set_counts_as_zero() {
        // arrange
        let filter = _ranged(1, 3);

        // act && assert
        assert!(!filter.accept(&_case(None)));
        assert!(_ranged(0, 3).accept(&_case(None)));
    }

    #[test]
    fn test_range_inside() {
        assert!(_ranged(1, 3).accept(&_case(Some(2))));
        assert!(_ranged(1, 3).accept(&_case(Some(1))));
        assert!(_ranged(1, 3).accept(&_case(Some(3))));
    }

    #[test]
    fn test_range_outside() {
        assert!(!_ranged(1, 3).accept(&_case(Some(5))));
        assert!(!_ranged(1, 3).accept(&_case(Some(0))));
    }

    #[test]
    fn test_non_numeric_capture_compares_as_zero() {
        // arrange
        let filter = NameFilter::from_compiled(
            CompiledFilter::with_data_set_range(r#"with data set "(\w+)"$"#, 0, 0).unwrap(),
        );
        let case = TestNode::Case(
            TestCase::new("FooTest", "testBar").with_data_set(DataSet::Named("empty".into())),
        );

        // act && assert
        assert!(filter.accept(&case));
        assert!(!_ranged(1, 3).accept(&case));
    }

    #[test]
    fn test_invalid_pattern_never_matches() {
        // arrange
        let filter = NameFilter::from_compiled(CompiledFilter::new("(unclosed").unwrap());

        // act && assert
        assert!(!filter.accept(&_case(None)));
        assert!(!filter.accept(&_case(Some(1))));
        assert!(filter.accept(&TestNode::Suite(TestSuite::new("all"))));
    }

    #[test]
    fn test_invalid_pattern_rejects_cases_in_exclude_mode() {
        // arrange
        let filter = NameFilter::from_compiled(CompiledFilter::new("(unclosed").unwrap())
            .with_mode(FilterMode::Exclude);

        // act && assert
        assert!(!filter.accept(&_case(None)));
        assert!(!filter.accept(&_case(Some(1))));
        assert!(filter.accept(&TestNode::Suite(TestSuite::new("all"))));
    }

    #[test]
    fn test_overflowing_range_shorthand_selects_data_set() {
        let filter =
            NameFilter::new(&FilterSyntax::Pattern, "testBar#1-99999999999999999999").unwrap();

        assert!(filter.accept(&_case(Some(2))));
        assert!(!filter.accept(&_case(Some(0))));
    }

    #[test]
    fn test_exclude_mode_inverts_cases_only() {
        let filter = NameFilter::new(&FilterSyntax::Pattern, "testBar#2")
            .unwrap()
            .with_mode(FilterMode::Exclude);

        assert!(!filter.accept(&_case(Some(2))));
        assert!(filter.accept(&_case(Some(3))));
    }

    #[test]
    fn test_accept_is_idempotent() {
        let filter = _ranged(1, 3);
        let node = _case(Some(2));

        let first = filter.accept(&node);
        for _ in 0..3 {
            assert_eq!(filter.accept(&node), first);
        }
    }

    #[test]
    fn test_lenient_integer() {
        assert_eq!(lenient_integer("3"), 3);
        assert_eq!(lenient_integer(" 42 "), 42);
        assert_eq!(lenient_integer("-7"), -7);
        assert_eq!(lenient_integer("12abc"), 12);
        assert_eq!(lenient_integer("abc"), 0);
        assert_eq!(lenient_integer(""), 0);
        assert_eq!(lenient_integer("99999999999999999999"), i64::MAX);
    }
}

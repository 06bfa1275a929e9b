use crate::error::FilterError;

/// Inclusive bounds on the data set index captured by a filter pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSetRange {
    minimum: i64,
    maximum: i64,
}

impl DataSetRange {
    pub fn new(minimum: i64, maximum: i64) -> Result<Self, FilterError> {
        if minimum > maximum {
            return Err(FilterError::InvalidDataSetRange { minimum, maximum });
        }
        Ok(Self { minimum, maximum })
    }

    pub fn minimum(&self) -> i64 {
        self.minimum
    }

    pub fn maximum(&self) -> i64 {
        self.maximum
    }

    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        self.minimum <= value && value <= self.maximum
    }
}

/// Output of a filter syntax: the regex to match full test names against and
/// an optional range applied to the pattern's last capture group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFilter {
    pattern: String,
    data_set_range: Option<DataSetRange>,
}

impl CompiledFilter {
    pub fn new(pattern: impl Into<String>) -> Result<Self, FilterError> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(FilterError::EmptyPattern);
        }
        Ok(Self {
            pattern,
            data_set_range: None,
        })
    }

    pub fn with_data_set_range(
        pattern: impl Into<String>,
        minimum: i64,
        maximum: i64,
    ) -> Result<Self, FilterError> {
        let mut filter = Self::new(pattern)?;
        filter.data_set_range = Some(DataSetRange::new(minimum, maximum)?);
        Ok(filter)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn data_set_range(&self) -> Option<DataSetRange> {
        self.data_set_range
    }
}

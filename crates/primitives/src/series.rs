//! Annual fiscal series.

use serde::{Deserialize, Serialize};

use crate::SeriesError;

/// One fiscal year of a financial series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiscalEntry {
    /// Calendar year of the fiscal year end.
    pub year: i32,
    /// Reported value, `None` when the provider has no figure.
    pub value: Option<f64>,
}

impl FiscalEntry {
    /// Create a new entry.
    #[must_use]
    pub const fn new(year: i32, value: Option<f64>) -> Self {
        Self { year, value }
    }
}

/// Ordered annual series, one entry per fiscal year end.
///
/// Years are strictly increasing. Absent values are kept in place rather than
/// back-filled; consumers decide whether to skip them or treat them as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FiscalEntry>", into = "Vec<FiscalEntry>")]
pub struct FiscalSeries {
    entries: Vec<FiscalEntry>,
}

impl FiscalSeries {
    /// Create a series from entries.
    ///
    /// # Errors
    /// Returns `SeriesError::NonMonotonic` if years are not strictly increasing.
    pub fn new(entries: Vec<FiscalEntry>) -> Result<Self, SeriesError> {
        for pair in entries.windows(2) {
            if pair[1].year <= pair[0].year {
                let (previous, year) = (pair[0].year, pair[1].year);
                return Err(SeriesError::NonMonotonic { previous, year });
            }
        }
        Ok(Self { entries })
    }

    /// Create a series from `(year, value)` pairs.
    ///
    /// # Errors
    /// Returns `SeriesError::NonMonotonic` if years are not strictly increasing.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, SeriesError>
    where
        I: IntoIterator<Item = (i32, Option<f64>)>,
    {
        Self::new(pairs.into_iter().map(|(year, value)| FiscalEntry::new(year, value)).collect())
    }

    /// Create a series from parallel year and value slices.
    ///
    /// # Errors
    /// Returns `SeriesError::LengthMismatch` if the slices differ in length,
    /// or `SeriesError::NonMonotonic` if years are not strictly increasing.
    pub fn from_years(years: &[i32], values: &[Option<f64>]) -> Result<Self, SeriesError> {
        if years.len() != values.len() {
            return Err(SeriesError::LengthMismatch { years: years.len(), values: values.len() });
        }
        Self::from_pairs(years.iter().copied().zip(values.iter().copied()))
    }

    /// All entries, in year order.
    #[must_use]
    pub const fn entries(&self) -> &[FiscalEntry] {
        self.entries.as_slice()
    }

    /// Number of entries, absent ones included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First listed year, whether or not its value is present.
    #[must_use]
    pub fn first_year(&self) -> Option<i32> {
        self.entries.first().map(|e| e.year)
    }

    /// Last listed year.
    #[must_use]
    pub fn last_year(&self) -> Option<i32> {
        self.entries.last().map(|e| e.year)
    }

    /// Iterate over years.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.iter().map(|e| e.year)
    }

    /// Iterate over values, absent ones included.
    pub fn values(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.entries.iter().map(|e| e.value)
    }

    /// Iterate over `(year, value)` pairs whose value is present.
    pub fn present(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.entries.iter().filter_map(|e| e.value.map(|v| (e.year, v)))
    }

    /// Number of present values.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.entries.iter().filter(|e| e.value.is_some()).count()
    }

    /// Value for a specific year, `None` if the year is missing or absent.
    #[must_use]
    pub fn get(&self, year: i32) -> Option<f64> {
        self.entries
            .binary_search_by_key(&year, |e| e.year)
            .ok()
            .and_then(|i| self.entries[i].value)
    }
}

impl TryFrom<Vec<FiscalEntry>> for FiscalSeries {
    type Error = SeriesError;

    fn try_from(entries: Vec<FiscalEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<FiscalSeries> for Vec<FiscalEntry> {
    fn from(series: FiscalSeries) -> Self {
        series.entries
    }
}

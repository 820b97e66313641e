//! Data Processor Module
//! Filtering and per-year aggregation over the loaded table.

use super::model::{Dataset, Observation, YearMax, COL_ITEM, COL_VALUE, COL_YEAR};
use crate::config::{ITEM_LCU, ITEM_SLC};
use polars::prelude::*;
use thiserror::Error;

/// Year window shown by the animated chart.
pub const ANIMATION_YEARS: (i64, i64) = (1985, 2024);

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Views the four figures are built from.
#[derive(Debug, Clone)]
pub struct DerivedViews {
    pub all: Vec<Observation>,
    pub lcu_max_per_year: Vec<YearMax>,
    pub slc_max_per_year: Vec<YearMax>,
    pub in_animation_window: Vec<Observation>,
    pub slc: Vec<Observation>,
}

/// Pure transformations; none of them touch the input dataset.
pub struct DataProcessor;

impl DataProcessor {
    /// Rows whose `Item` equals `item`.
    pub fn filter_by_item(dataset: &Dataset, item: &str) -> Result<Dataset, ProcessorError> {
        let filtered = dataset
            .frame()
            .clone()
            .lazy()
            .filter(col(COL_ITEM).eq(lit(item)))
            .collect()?;
        Ok(Dataset::from_normalized(filtered))
    }

    /// Rows with `lo <= Year <= hi`.
    pub fn filter_by_year_range(
        dataset: &Dataset,
        lo: i64,
        hi: i64,
    ) -> Result<Dataset, ProcessorError> {
        let filtered = dataset
            .frame()
            .clone()
            .lazy()
            .filter(col(COL_YEAR).gt_eq(lit(lo)).and(col(COL_YEAR).lt_eq(lit(hi))))
            .collect()?;
        Ok(Dataset::from_normalized(filtered))
    }

    /// One row per distinct year holding the largest value, ascending by year.
    pub fn max_value_per_year(subset: &Dataset) -> Result<Vec<YearMax>, ProcessorError> {
        let grouped = subset
            .frame()
            .clone()
            .lazy()
            .filter(col(COL_YEAR).is_not_null().and(col(COL_VALUE).is_not_null()))
            .group_by([col(COL_YEAR)])
            .agg([col(COL_VALUE).max()])
            .sort([COL_YEAR], SortMultipleOptions::default())
            .collect()?;

        let years = grouped.column(COL_YEAR)?.i64()?;
        let values = grouped.column(COL_VALUE)?.f64()?;

        Ok(years
            .into_iter()
            .zip(values)
            .filter_map(|(year, value)| Some(YearMax { year: year?, value: value? }))
            .collect())
    }

    /// Compute every view the dashboard needs.
    pub fn derive_views(dataset: &Dataset) -> Result<DerivedViews, ProcessorError> {
        let lcu = Self::filter_by_item(dataset, ITEM_LCU)?;
        let slc = Self::filter_by_item(dataset, ITEM_SLC)?;
        let (lo, hi) = ANIMATION_YEARS;
        let windowed = Self::filter_by_year_range(dataset, lo, hi)?;

        log::debug!(
            "Derived views: {} LCU rows, {} SLC rows, {} rows in {lo}-{hi}",
            lcu.len(),
            slc.len(),
            windowed.len()
        );

        Ok(DerivedViews {
            all: dataset.observations()?,
            lcu_max_per_year: Self::max_value_per_year(&lcu)?,
            slc_max_per_year: Self::max_value_per_year(&slc)?,
            in_animation_window: windowed.observations()?,
            slc: slc.observations()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dataset() -> Dataset {
        let df = df!(
            "Year" => [1984i64, 1985, 1985, 2000, 2000, 2024, 2025, 2021],
            "Value" => [6.5, 16.4, 18.1, 1507.5, 1507.5, 15000.0, 89500.0, 3500.0],
            "Item" => [
                ITEM_LCU, ITEM_LCU, ITEM_LCU, ITEM_LCU, ITEM_LCU, ITEM_LCU, ITEM_LCU, ITEM_SLC
            ],
            "Item Code" => ["5540", "5540", "5540", "5540", "5540", "5540", "5540", "5541"],
            "Currency" => ["Lebanese Pound"; 8]
        )
        .unwrap();
        Dataset::from_frame(df).unwrap()
    }

    #[test]
    fn test_filter_by_item() {
        let dataset = sample_dataset();
        let slc = DataProcessor::filter_by_item(&dataset, ITEM_SLC).unwrap();
        assert_eq!(slc.len(), 1);
        assert!(slc.observations().unwrap().iter().all(|o| o.item == ITEM_SLC));
        // Source untouched
        assert_eq!(dataset.len(), 8);
    }

    #[test]
    fn test_filter_by_item_is_idempotent() {
        let dataset = sample_dataset();
        let once = DataProcessor::filter_by_item(&dataset, ITEM_LCU).unwrap();
        let twice = DataProcessor::filter_by_item(&once, ITEM_LCU).unwrap();
        assert_eq!(once.observations().unwrap(), twice.observations().unwrap());
    }

    #[test]
    fn test_filter_by_unknown_item_is_empty() {
        let dataset = sample_dataset();
        let none = DataProcessor::filter_by_item(&dataset, "Special drawing rights").unwrap();
        assert!(none.is_empty());
        assert!(DataProcessor::max_value_per_year(&none).unwrap().is_empty());
    }

    #[test]
    fn test_filter_by_year_range_includes_bounds() {
        let dataset = sample_dataset();
        let windowed = DataProcessor::filter_by_year_range(&dataset, 1985, 2024).unwrap();
        let years: Vec<i64> = windowed.observations().unwrap().iter().map(|o| o.year).collect();

        assert_eq!(years, vec![1985, 1985, 2000, 2000, 2024, 2021]);
        assert!(years.iter().all(|y| (1985..=2024).contains(y)));
    }

    #[test]
    fn test_max_value_per_year() {
        let dataset = sample_dataset();
        let lcu = DataProcessor::filter_by_item(&dataset, ITEM_LCU).unwrap();
        let maxima = DataProcessor::max_value_per_year(&lcu).unwrap();

        let years: Vec<i64> = maxima.iter().map(|m| m.year).collect();
        assert_eq!(years, vec![1984, 1985, 2000, 2024, 2025]);

        for m in &maxima {
            let expected = lcu
                .observations()
                .unwrap()
                .iter()
                .filter(|o| o.year == m.year)
                .map(|o| o.value)
                .fold(f64::MIN, f64::max);
            assert_eq!(m.value, expected);
        }
        assert_eq!(maxima[1], YearMax { year: 1985, value: 18.1 });
    }

    #[test]
    fn test_max_value_per_year_single_row() {
        let df = df!(
            "Year" => [2000i64],
            "Value" => [1500.0],
            "Item" => [ITEM_LCU],
            "Item Code" => ["5540"],
            "Currency" => ["Lebanese Pound"]
        )
        .unwrap();
        let dataset = Dataset::from_frame(df).unwrap();
        let lcu = DataProcessor::filter_by_item(&dataset, ITEM_LCU).unwrap();

        let maxima = DataProcessor::max_value_per_year(&lcu).unwrap();
        assert_eq!(maxima, vec![YearMax { year: 2000, value: 1500.0 }]);
    }

    #[test]
    fn test_derive_views() {
        let views = DataProcessor::derive_views(&sample_dataset()).unwrap();
        assert_eq!(views.all.len(), 8);
        assert_eq!(views.lcu_max_per_year.len(), 5);
        assert_eq!(views.slc_max_per_year, vec![YearMax { year: 2021, value: 3500.0 }]);
        assert_eq!(views.in_animation_window.len(), 6);
        assert_eq!(views.slc.len(), 1);
    }
}

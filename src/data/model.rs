//! Data Model Module
//! Typed rows and the immutable table they are projected from.

use polars::prelude::*;

pub const COL_YEAR: &str = "Year";
pub const COL_VALUE: &str = "Value";
pub const COL_ITEM: &str = "Item";
pub const COL_ITEM_CODE: &str = "Item Code";
pub const COL_CURRENCY: &str = "Currency";

/// Columns every source table must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = [COL_YEAR, COL_VALUE, COL_ITEM, COL_ITEM_CODE, COL_CURRENCY];

/// One exchange rate observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub year: i64,
    pub value: f64,
    pub item: String,
    pub item_code: String,
    pub currency: String,
}

/// Maximum rate observed within one year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearMax {
    pub year: i64,
    pub value: f64,
}

/// Loaded exchange rate table.
///
/// Holds exactly the required columns with normalized dtypes
/// (`Year: i64`, `Value: f64`, the rest strings). Never mutated after
/// construction; every filter produces a new `Dataset`.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
}

impl Dataset {
    /// Normalize a raw frame. Extra columns are dropped and the required ones cast.
    pub fn from_frame(df: DataFrame) -> PolarsResult<Self> {
        let df = df
            .lazy()
            .select([
                col(COL_YEAR).cast(DataType::Int64),
                col(COL_VALUE).cast(DataType::Float64),
                col(COL_ITEM).cast(DataType::String),
                col(COL_ITEM_CODE).cast(DataType::String),
                col(COL_CURRENCY).cast(DataType::String),
            ])
            .collect()?;

        Ok(Self { df })
    }

    /// Wrap a frame that already went through [`Dataset::from_frame`].
    pub(crate) fn from_normalized(df: DataFrame) -> Self {
        Self { df }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Project rows into typed observations, in table order.
    ///
    /// Rows without a year or value are skipped.
    pub fn observations(&self) -> PolarsResult<Vec<Observation>> {
        let years = self.df.column(COL_YEAR)?.i64()?;
        let values = self.df.column(COL_VALUE)?.f64()?;
        let items = self.df.column(COL_ITEM)?.str()?;
        let codes = self.df.column(COL_ITEM_CODE)?.str()?;
        let currencies = self.df.column(COL_CURRENCY)?.str()?;

        let rows = years
            .into_iter()
            .zip(values)
            .zip(items)
            .zip(codes)
            .zip(currencies)
            .filter_map(|((((year, value), item), code), currency)| {
                Some(Observation {
                    year: year?,
                    value: value?,
                    item: item.unwrap_or_default().to_string(),
                    item_code: code.unwrap_or_default().to_string(),
                    currency: currency.unwrap_or_default().to_string(),
                })
            })
            .collect();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_frame_normalizes_columns() {
        let df = df!(
            "Area" => ["Lebanon", "Lebanon"],
            "Year" => [1990i32, 1991],
            "Value" => [695i64, 928],
            "Item" => ["Local currency units per USD", "Local currency units per USD"],
            "Item Code" => [5540i64, 5540],
            "Currency" => ["Lebanese Pound", "Lebanese Pound"]
        )
        .unwrap();

        let dataset = Dataset::from_frame(df).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.frame().width(), 5);
        assert_eq!(dataset.frame().column("Year").unwrap().dtype(), &DataType::Int64);
        assert_eq!(dataset.frame().column("Value").unwrap().dtype(), &DataType::Float64);
        assert_eq!(dataset.frame().column("Item Code").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_observations_skip_missing_values() {
        let df = df!(
            "Year" => [Some(2000i64), Some(2001), None],
            "Value" => [Some(1507.5), None, Some(1.0)],
            "Item" => ["Local currency units per USD"; 3],
            "Item Code" => ["5540"; 3],
            "Currency" => ["Lebanese Pound"; 3]
        )
        .unwrap();

        let rows = Dataset::from_frame(df).unwrap().observations().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, 2000);
        assert_eq!(rows[0].value, 1507.5);
        assert_eq!(rows[0].item_code, "5540");
    }

    #[test]
    fn test_empty_dataset() {
        let df = df!(
            "Year" => Vec::<i64>::new(),
            "Value" => Vec::<f64>::new(),
            "Item" => Vec::<String>::new(),
            "Item Code" => Vec::<String>::new(),
            "Currency" => Vec::<String>::new()
        )
        .unwrap();

        let dataset = Dataset::from_frame(df).unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.observations().unwrap().is_empty());
    }
}

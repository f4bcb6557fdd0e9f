//! Columnar data for plots.
//!
//! Columns keep the order they were added in, so a spiral frame always lists
//! `i, t, x, y, r, px, py`.

/// A value in a data frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// A numeric value.
    Number(f32),
    /// A text value.
    Text(String),
    /// A missing value.
    Null,
}

impl DataValue {
    /// Get as f32, or None if not a number.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            DataValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<f32> for DataValue {
    fn from(v: f32) -> Self {
        DataValue::Number(v)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

#[derive(Debug, Clone)]
struct Column {
    name: String,
    values: Vec<DataValue>,
}

/// A simple columnar data frame.
#[derive(Debug, Clone, Default)]
pub struct DataFrame {
    columns: Vec<Column>,
    n_rows: usize,
}

/// Read-only view of one row, handed to [`DataFrame::mutate`].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    frame: &'a DataFrame,
    index: usize,
}

impl Row<'_> {
    /// Row number.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Numeric value of `column`, NaN when the column is missing or the
    /// cell is not a number.
    #[must_use]
    pub fn f32(&self, column: &str) -> f32 {
        self.frame
            .get(column)
            .and_then(|values| values.get(self.index))
            .and_then(DataValue::as_f32)
            .unwrap_or(f32::NAN)
    }
}

impl DataFrame {
    /// Create a new empty data frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from x and y arrays, truncated to the shorter one.
    #[must_use]
    pub fn from_xy(x: &[f32], y: &[f32]) -> Self {
        let n = x.len().min(y.len());
        let mut df = Self::new();
        df.add_column_f32("x", &x[..n]);
        df.add_column_f32("y", &y[..n]);
        df
    }

    fn insert(&mut self, name: &str, values: Vec<DataValue>) {
        self.n_rows = self.n_rows.max(values.len());
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(column) => column.values = values,
            None => self.columns.push(Column { name: name.to_string(), values }),
        }
    }

    /// Add a numeric column, replacing any column of the same name in place.
    pub fn add_column_f32(&mut self, name: &str, data: &[f32]) {
        self.insert(name, data.iter().map(|&v| DataValue::Number(v)).collect());
    }

    /// Add a text column.
    pub fn add_column_str(&mut self, name: &str, data: &[&str]) {
        self.insert(name, data.iter().map(|&s| DataValue::Text(s.to_string())).collect());
    }

    /// Derive a numeric column from every row.
    ///
    /// ```
    /// use phyllo_viz::grammar::DataFrame;
    ///
    /// let mut df = DataFrame::from_xy(&[1.0, 2.0], &[3.0, 4.0]);
    /// df.mutate("xy", |row| row.f32("x") * row.f32("y"));
    /// assert_eq!(df.get_f32("xy").unwrap(), vec![3.0, 8.0]);
    /// ```
    pub fn mutate<F>(&mut self, name: &str, f: F)
    where
        F: Fn(&Row<'_>) -> f32,
    {
        let values: Vec<DataValue> = (0..self.n_rows)
            .map(|index| DataValue::Number(f(&Row { frame: self, index })))
            .collect();
        self.insert(name, values);
    }

    /// Get a column as f32 values, skipping non-numeric cells.
    #[must_use]
    pub fn get_f32(&self, name: &str) -> Option<Vec<f32>> {
        self.get(name).map(|col| col.iter().filter_map(DataValue::as_f32).collect())
    }

    /// Get a column as f32 values, one per row; non-numeric cells are NaN.
    #[must_use]
    pub fn values_f32(&self, name: &str) -> Option<Vec<f32>> {
        self.get(name)
            .map(|col| col.iter().map(|v| v.as_f32().unwrap_or(f32::NAN)).collect())
    }

    /// Get a column.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[DataValue]> {
        self.columns.iter().find(|c| c.name == name).map(|c| c.values.as_slice())
    }

    /// Get number of rows.
    #[must_use]
    pub fn nrow(&self) -> usize {
        self.n_rows
    }

    /// Get number of columns.
    #[must_use]
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Column names in insertion order.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataframe_from_xy() {
        let df = DataFrame::from_xy(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);
        assert_eq!(df.nrow(), 3);
        assert_eq!(df.ncol(), 2);
        assert!(df.has_column("x"));
        assert!(df.has_column("y"));
    }

    #[test]
    fn test_dataframe_from_xy_unequal() {
        let df = DataFrame::from_xy(&[1.0, 2.0, 3.0], &[4.0, 5.0]);
        assert_eq!(df.get_f32("x").unwrap().len(), 2);
        assert_eq!(df.get_f32("y").unwrap().len(), 2);
    }

    #[test]
    fn test_columns_keep_insertion_order() {
        let mut df = DataFrame::new();
        for name in ["t", "b", "a", "z"] {
            df.add_column_f32(name, &[0.0]);
        }
        assert_eq!(df.columns(), vec!["t", "b", "a", "z"]);
    }

    #[test]
    fn test_replacing_column_keeps_position() {
        let mut df = DataFrame::from_xy(&[1.0], &[2.0]);
        df.add_column_f32("x", &[9.0]);
        assert_eq!(df.columns(), vec!["x", "y"]);
        assert_eq!(df.get_f32("x").unwrap(), vec![9.0]);
    }

    #[test]
    fn test_mutate_derives_column() {
        let mut df = DataFrame::from_xy(&[1.0, -2.0], &[0.5, 4.0]);
        df.add_column_f32("t", &[2.0, 3.0]);
        df.mutate("px", |row| row.f32("x") * row.f32("t"));
        assert_eq!(df.get_f32("px").unwrap(), vec![2.0, -6.0]);
    }

    #[test]
    fn test_mutate_missing_column_is_nan() {
        let mut df = DataFrame::from_xy(&[1.0], &[1.0]);
        df.mutate("bad", |row| row.f32("nope"));
        assert!(df.get_f32("bad").unwrap()[0].is_nan());
    }

    #[test]
    fn test_text_column_skipped_by_get_f32() {
        let mut df = DataFrame::new();
        df.add_column_str("names", &["a", "b"]);
        assert_eq!(df.nrow(), 2);
        assert!(df.get_f32("names").unwrap().is_empty());
        assert!(df.values_f32("names").unwrap().iter().all(|v| v.is_nan()));
        assert_eq!(df.get("names").unwrap()[1].as_str(), Some("b"));
    }

    #[test]
    fn test_data_value_conversions() {
        let num: DataValue = 42.0f32.into();
        assert_eq!(num.as_f32(), Some(42.0));
        assert_eq!(num.as_str(), None);

        let text: DataValue = String::from("hello").into();
        assert_eq!(text.as_str(), Some("hello"));
        assert_eq!(DataValue::Null.as_f32(), None);
    }

    #[test]
    fn test_dataframe_empty() {
        let df = DataFrame::new();
        assert_eq!(df.nrow(), 0);
        assert_eq!(df.ncol(), 0);
        assert!(df.get("missing").is_none());
    }
}

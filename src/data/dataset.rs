use std::{io::Read, path::Path};

use crate::foundation::{
    core::{Year, YearRange},
    error::{SceneError, SceneResult},
};

/// Header of the column holding the observation year.
pub const YEAR_COLUMN: &str = "Year";

/// Handle to one series column of a [`Dataset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SeriesId(pub(crate) usize);

impl SeriesId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One observation year. Values follow the owning dataset's series order.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub year: Year,
    values: Vec<f64>,
}

impl Row {
    pub fn value(&self, id: SeriesId) -> f64 {
        self.values[id.0]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Validated, immutable table of yearly rates.
///
/// Invariants (checked on load):
/// - at least one series and at least one row
/// - years are unique; rows are stored in ascending year order
/// - every value is finite
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    series: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset from already-typed rows, enforcing the same invariants as CSV loading.
    pub fn new(series: Vec<String>, rows: Vec<(Year, Vec<f64>)>) -> SceneResult<Self> {
        if series.is_empty() {
            return Err(SceneError::validation("dataset has no series columns"));
        }
        for (i, key) in series.iter().enumerate() {
            if key.is_empty() {
                return Err(SceneError::validation("series keys must be non-empty"));
            }
            if series[..i].contains(key) {
                return Err(SceneError::validation(format!("duplicate series \"{key}\"")));
            }
        }
        if rows.is_empty() {
            return Err(SceneError::validation("dataset has no rows"));
        }

        let mut out = Vec::with_capacity(rows.len());
        for (year, values) in rows {
            if values.len() != series.len() {
                return Err(SceneError::validation(format!(
                    "year {year}: expected {} values, got {}",
                    series.len(),
                    values.len()
                )));
            }
            if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
                return Err(SceneError::validation(format!(
                    "year {year}: value for \"{}\" is not a finite number",
                    series[pos]
                )));
            }
            out.push(Row { year, values });
        }

        out.sort_by_key(|r| r.year);
        if let Some(w) = out.windows(2).find(|w| w[0].year == w[1].year) {
            return Err(SceneError::validation(format!(
                "duplicate year {}",
                w[0].year
            )));
        }

        Ok(Self { series, rows: out })
    }

    /// Load a CSV file. IO and CSV syntax problems are load errors; bad cells are validation
    /// errors.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn from_path(path: &Path) -> SceneResult<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| SceneError::load(format!("open '{}': {e}", path.display())))?;
        let ds = Self::from_reader(std::io::BufReader::new(file))?;
        tracing::info!(
            series = ds.series.len(),
            rows = ds.rows.len(),
            "loaded dataset"
        );
        Ok(ds)
    }

    pub fn from_csv_str(text: &str) -> SceneResult<Self> {
        Self::from_reader(text.as_bytes())
    }

    pub fn from_reader<R: Read>(reader: R) -> SceneResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| SceneError::load(format!("read csv header: {e}")))?
            .clone();

        let mut year_col = None;
        let mut series_cols = Vec::new();
        for (i, name) in headers.iter().enumerate() {
            let name = name.trim_start_matches('\u{feff}');
            if name.eq_ignore_ascii_case(YEAR_COLUMN) {
                if year_col.is_some() {
                    return Err(SceneError::validation("csv header repeats the Year column"));
                }
                year_col = Some(i);
            } else if name.is_empty() {
                tracing::warn!(column = i, "ignoring csv column with empty header");
            } else {
                series_cols.push((i, name.to_string()));
            }
        }
        let year_col = year_col.ok_or_else(|| {
            SceneError::validation(format!("csv header has no \"{YEAR_COLUMN}\" column"))
        })?;

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| SceneError::load(format!("read csv record: {e}")))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            if record.len() > headers.len() {
                return Err(SceneError::validation(format!(
                    "line {line}: {} cells for {} header columns",
                    record.len(),
                    headers.len()
                )));
            }

            let raw_year = cell(&record, year_col, YEAR_COLUMN, line)?;
            let year = parse_year(raw_year).ok_or_else(|| {
                SceneError::validation(format!("line {line}: year \"{raw_year}\" is not an integer"))
            })?;

            let mut values = Vec::with_capacity(series_cols.len());
            for (col, name) in &series_cols {
                let raw = cell(&record, *col, name, line)?;
                let v = raw.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(|| {
                    SceneError::validation(format!(
                        "line {line}: \"{name}\" value \"{raw}\" is not a finite number"
                    ))
                })?;
                values.push(v);
            }
            rows.push((Year(year), values));
        }

        let series = series_cols.into_iter().map(|(_, name)| name).collect();
        Self::new(series, rows)
    }

    /// Series keys in column order.
    pub fn series(&self) -> &[String] {
        &self.series
    }

    pub fn series_id(&self, key: &str) -> SceneResult<SeriesId> {
        self.series
            .iter()
            .position(|s| s == key)
            .map(SeriesId)
            .ok_or_else(|| SceneError::validation(format!("unknown series \"{key}\"")))
    }

    pub fn series_ids(&self) -> impl Iterator<Item = SeriesId> + '_ {
        (0..self.series.len()).map(SeriesId)
    }

    pub fn series_key(&self, id: SeriesId) -> &str {
        &self.series[id.0]
    }

    /// Rows in ascending year order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_for(&self, year: Year) -> Option<&Row> {
        self.rows
            .binary_search_by_key(&year, |r| r.year)
            .ok()
            .map(|i| &self.rows[i])
    }

    pub fn year_range(&self) -> YearRange {
        // Non-empty by construction.
        YearRange {
            start: self.rows[0].year,
            end: self.rows[self.rows.len() - 1].year,
        }
    }

    /// Rows with `year <= bound`.
    ///
    /// Rows are sorted, so this is always a prefix: a smaller bound yields a sub-slice of a larger
    /// one, and the max year yields every row.
    pub fn through_year(&self, bound: Year) -> &[Row] {
        let n = self.rows.partition_point(|r| r.year <= bound);
        &self.rows[..n]
    }
}

/// Integer year; integral decimals such as `2007.0` are accepted too.
fn parse_year(raw: &str) -> Option<i32> {
    if let Ok(y) = raw.parse::<i32>() {
        return Some(y);
    }
    let v = raw.parse::<f64>().ok()?;
    let in_range = v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX);
    (v.fract() == 0.0 && in_range).then_some(v as i32)
}

fn cell<'r>(
    record: &'r csv::StringRecord,
    col: usize,
    name: &str,
    line: u64,
) -> SceneResult<&'r str> {
    match record.get(col) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(SceneError::validation(format!(
            "line {line}: missing value for \"{name}\""
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/dataset.rs"]
mod tests;

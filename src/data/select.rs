//! Pure selections over row slices. No rendering state is involved, so everything here is testable
//! on plain data. Ties always resolve to the earliest row.
use crate::{
    data::dataset::{Row, SeriesId},
    foundation::core::{Year, YearRange},
};

/// A single (year, value) observation of one series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub year: Year,
    pub value: f64,
}

/// The year at which two series are closest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gap {
    pub year: Year,
    pub primary: f64,
    pub baseline: f64,
    /// `|primary - baseline|`
    pub diff: f64,
}

impl Gap {
    pub fn midpoint(&self) -> f64 {
        (self.primary + self.baseline) / 2.0
    }
}

fn extreme_by(rows: &[Row], id: SeriesId, better: impl Fn(f64, f64) -> bool) -> Option<Point> {
    let (first, rest) = rows.split_first()?;
    let mut best = Point {
        year: first.year,
        value: first.value(id),
    };
    for row in rest {
        let v = row.value(id);
        if better(v, best.value) {
            best = Point {
                year: row.year,
                value: v,
            };
        }
    }
    Some(best)
}

pub fn max_point(rows: &[Row], id: SeriesId) -> Option<Point> {
    extreme_by(rows, id, |v, best| v > best)
}

pub fn min_point(rows: &[Row], id: SeriesId) -> Option<Point> {
    extreme_by(rows, id, |v, best| v < best)
}

/// Row minimizing `|primary - baseline|`.
pub fn min_difference(rows: &[Row], primary: SeriesId, baseline: SeriesId) -> Option<Gap> {
    rows.iter()
        .map(|row| {
            let p = row.value(primary);
            let b = row.value(baseline);
            Gap {
                year: row.year,
                primary: p,
                baseline: b,
                diff: (p - b).abs(),
            }
        })
        .fold(None, |best: Option<Gap>, g| match best {
            Some(b) if b.diff <= g.diff => Some(b),
            _ => Some(g),
        })
}

/// Series values in row order.
pub fn points(rows: &[Row], id: SeriesId) -> Vec<Point> {
    rows.iter()
        .map(|r| Point {
            year: r.year,
            value: r.value(id),
        })
        .collect()
}

/// Largest value of any of `ids` over `rows`.
pub fn value_ceiling(rows: &[Row], ids: &[SeriesId]) -> Option<f64> {
    rows.iter()
        .flat_map(|r| ids.iter().map(move |&id| r.value(id)))
        .reduce(f64::max)
}

pub fn year_extent(rows: &[Row]) -> Option<YearRange> {
    let start = rows.iter().map(|r| r.year).min()?;
    let end = rows.iter().map(|r| r.year).max()?;
    Some(YearRange { start, end })
}

#[cfg(test)]
#[path = "../../tests/unit/data/select.rs"]
mod tests;

use crate::{
    data::dataset::{Dataset, Row, SeriesId},
    foundation::core::{Year, YearRange},
};

/// Checkbox and slider state of the interactive scene.
///
/// Built fresh whenever the interactive scene is entered; nothing carries over from a previous
/// visit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    enabled: Vec<bool>,
    year_bound: Year,
    extent: YearRange,
}

impl FilterState {
    /// Every series enabled, slider at the last year.
    pub fn new(dataset: &Dataset) -> Self {
        let extent = dataset.year_range();
        Self {
            enabled: vec![true; dataset.series().len()],
            year_bound: extent.end,
            extent,
        }
    }

    pub fn is_enabled(&self, id: SeriesId) -> bool {
        self.enabled[id.index()]
    }

    pub fn set_enabled(&mut self, id: SeriesId, on: bool) {
        self.enabled[id.index()] = on;
    }

    /// Flip a checkbox; returns the new state.
    pub fn toggle(&mut self, id: SeriesId) -> bool {
        let slot = &mut self.enabled[id.index()];
        *slot = !*slot;
        *slot
    }

    pub fn enabled_series(&self) -> impl Iterator<Item = SeriesId> + '_ {
        self.enabled
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| SeriesId(i))
    }

    pub fn year_bound(&self) -> Year {
        self.year_bound
    }

    pub fn extent(&self) -> YearRange {
        self.extent
    }

    /// Move the slider. Values outside the observed years are clamped, like a range input does.
    pub fn set_year_bound(&mut self, year: Year) -> Year {
        let clamped = self.extent.clamp(year);
        if !self.extent.contains(year) {
            tracing::warn!(requested = year.0, clamped = clamped.0, "year bound clamped");
        }
        self.year_bound = clamped;
        clamped
    }

    /// Rows visible under the current slider value.
    pub fn visible_rows<'d>(&self, dataset: &'d Dataset) -> &'d [Row] {
        dataset.through_year(self.year_bound)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/filter.rs"]
mod tests;

use crate::{
    config::ChartConfig,
    data::dataset::Dataset,
    foundation::{
        core::Year,
        error::{SceneError, SceneResult},
    },
    render::{
        chart::{build_controls, build_interactive, build_static},
        page::{Navigation, RenderedScene},
    },
    scene::{
        filter::FilterState,
        registry::{SceneDescriptor, SceneKind, SceneRegistry},
    },
};

/// Application state: the loaded data, the scene list and where the viewer is.
///
/// Every mutating call returns a complete [`RenderedScene`]; nothing is patched incrementally.
#[derive(Clone, Debug)]
pub struct SceneController {
    registry: SceneRegistry,
    dataset: Dataset,
    config: ChartConfig,
    index: usize,
    /// `Some` exactly while the interactive scene is current.
    filter: Option<FilterState>,
}

impl SceneController {
    pub fn new(
        registry: SceneRegistry,
        dataset: Dataset,
        config: ChartConfig,
    ) -> SceneResult<Self> {
        config.validate()?;
        registry.check_against(&dataset)?;

        let mut ctl = Self {
            registry,
            dataset,
            config,
            index: 0,
            filter: None,
        };
        ctl.enter(0);
        Ok(ctl)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn scene(&self) -> &SceneDescriptor {
        self.registry.at(self.index)
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filter(&self) -> Option<&FilterState> {
        self.filter.as_ref()
    }

    pub fn navigation(&self) -> Navigation {
        Navigation::at(self.index, self.registry.len())
    }

    /// Render the current scene from scratch.
    #[tracing::instrument(skip(self), fields(scene = %self.scene().kind))]
    pub fn render(&self) -> SceneResult<RenderedScene> {
        let scene = self.scene().clone();
        let (chart, controls) = match &self.filter {
            Some(filter) => {
                let chart = build_interactive(&self.dataset, filter, &self.config)?;
                let controls = build_controls(&self.dataset, filter, &chart);
                (chart, Some(controls))
            }
            None => (build_static(&self.dataset, &scene, &self.config)?, None),
        };

        Ok(RenderedScene {
            index: self.index,
            scene,
            navigation: self.navigation(),
            chart,
            controls,
        })
    }

    /// Next scene. Past the last scene this wraps to the first.
    pub fn advance(&mut self) -> SceneResult<RenderedScene> {
        self.enter((self.index + 1) % self.registry.len());
        self.render()
    }

    /// Previous scene; `None` (and no change) on the first scene.
    pub fn retreat(&mut self) -> SceneResult<Option<RenderedScene>> {
        if self.index == 0 {
            tracing::debug!("retreat at first scene ignored");
            return Ok(None);
        }
        self.enter(self.index - 1);
        self.render().map(Some)
    }

    /// Back to the first scene.
    pub fn replay(&mut self) -> SceneResult<RenderedScene> {
        self.enter(0);
        self.render()
    }

    pub fn jump_to(&mut self, kind: SceneKind) -> SceneResult<RenderedScene> {
        let index = self.registry.position(kind).ok_or_else(|| {
            SceneError::navigation(format!("scene \"{kind}\" is not registered"))
        })?;
        self.enter(index);
        self.render()
    }

    pub fn toggle_series(&mut self, key: &str) -> SceneResult<RenderedScene> {
        let id = self.dataset.series_id(key)?;
        let on = self.filter_mut()?.toggle(id);
        tracing::debug!(series = key, on, "series toggled");
        self.render()
    }

    pub fn set_series(&mut self, key: &str, on: bool) -> SceneResult<RenderedScene> {
        let id = self.dataset.series_id(key)?;
        self.filter_mut()?.set_enabled(id, on);
        self.render()
    }

    /// Move the year slider; out-of-range years are clamped.
    pub fn set_year_bound(&mut self, year: Year) -> SceneResult<RenderedScene> {
        let applied = self.filter_mut()?.set_year_bound(year);
        tracing::debug!(year = applied.0, "year bound set");
        self.render()
    }

    fn filter_mut(&mut self) -> SceneResult<&mut FilterState> {
        let kind = self.scene().kind;
        self.filter.as_mut().ok_or_else(|| {
            SceneError::navigation(format!(
                "scene \"{kind}\" has no filters; switch to the interactive scene first"
            ))
        })
    }

    /// Make `index` current. Entering the interactive scene always starts from a fresh filter.
    fn enter(&mut self, index: usize) {
        self.index = index.min(self.registry.len() - 1);
        self.filter = match self.scene().kind {
            SceneKind::Interactive => Some(FilterState::new(&self.dataset)),
            _ => None,
        };
        tracing::debug!(index = self.index, scene = %self.scene().kind, "entered scene");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/controller.rs"]
mod tests;

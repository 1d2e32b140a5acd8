use std::{fmt, str::FromStr};

use crate::{
    data::dataset::Dataset,
    foundation::error::{SceneError, SceneResult},
};

/// Which visualization a scene shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    /// Trend of the primary series with highest/lowest callouts.
    Overall,
    /// Primary vs baseline with the smallest-gap callouts and a legend.
    Comparison,
    /// Every series with checkbox and year-slider filters.
    Interactive,
}

impl SceneKind {
    pub fn id(self) -> &'static str {
        match self {
            Self::Overall => "overall",
            Self::Comparison => "comparison",
            Self::Interactive => "interactive",
        }
    }

    /// Static scenes are fully determined by the dataset.
    pub fn is_static(self) -> bool {
        !matches!(self, Self::Interactive)
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SceneKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overall" => Ok(Self::Overall),
            "comparison" => Ok(Self::Comparison),
            "interactive" => Ok(Self::Interactive),
            other => Err(SceneError::navigation(format!("unknown scene \"{other}\""))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SourceLink {
    pub label: String,
    pub href: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneDescriptor {
    pub kind: SceneKind,
    pub title: String,
    pub narrative: String,
    /// Series the scene is centered on. Required for static scenes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    /// Series the primary is measured against. Required for static scenes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceLink>,
}

const CDC_WONDER: &str = "https://wonder.cdc.gov/lbd-current.html";

/// Ordered, immutable list of scenes.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct SceneRegistry {
    scenes: Vec<SceneDescriptor>,
}

impl SceneRegistry {
    pub fn new(scenes: Vec<SceneDescriptor>) -> SceneResult<Self> {
        if scenes.is_empty() {
            return Err(SceneError::validation("scene registry is empty"));
        }
        for (i, scene) in scenes.iter().enumerate() {
            if scenes[..i].iter().any(|s| s.kind == scene.kind) {
                return Err(SceneError::validation(format!(
                    "scene \"{}\" is registered twice",
                    scene.kind
                )));
            }
            if scene.kind.is_static() && (scene.primary.is_none() || scene.baseline.is_none()) {
                return Err(SceneError::validation(format!(
                    "scene \"{}\" needs a primary and a baseline series",
                    scene.kind
                )));
            }
        }
        Ok(Self { scenes })
    }

    /// The three-step infant death rate story.
    pub fn standard() -> Self {
        let title = "Annual Infant Death Rates in the United States";
        let scenes = vec![
            SceneDescriptor {
                kind: SceneKind::Overall,
                title: title.to_string(),
                narrative: "The line chart displays data on live births and infant (age under 365 \
                    days) death rates (per 1000 births) to maternal residents of the United States \
                    2007 to 2019. The graph shows a consistent decline in infant death rates over \
                    the years except a small increase from 2014 to 2015. The highest value is 6.75 \
                    in 2007, the earliest year in data, and the lowest value is 5.58, the latest \
                    year in data, confirming the trend."
                    .to_string(),
                primary: Some("Total".to_string()),
                baseline: Some("Total".to_string()),
                source: Some(SourceLink {
                    label: "CDC".to_string(),
                    href: CDC_WONDER.to_string(),
                }),
            },
            SceneDescriptor {
                kind: SceneKind::Comparison,
                title: title.to_string(),
                narrative: "The line chart displays data on live births and infant death rates in \
                    the United States in comparison to death rates from infants from Black mothers \
                    in the United States. Although the infant death rates for Black mothers have \
                    been decreasing as well, you can see the large gap in numbers between the two \
                    groups. Even at the year with the smallest difference between values, the \
                    infant death rate for Black mothers is about 80% higher."
                    .to_string(),
                primary: Some("Black".to_string()),
                baseline: Some("Total".to_string()),
                source: None,
            },
            SceneDescriptor {
                kind: SceneKind::Interactive,
                title: "Annual Infant Death Rates in the United States by Race".to_string(),
                narrative: "Interactively explore the infant death rate trends across different \
                    races to conduct further analysis. Hover over a data point to get the exact \
                    infant death rate value."
                    .to_string(),
                primary: None,
                baseline: None,
                source: None,
            },
        ];

        Self { scenes }
    }

    /// Check that every series a scene names exists in `dataset`.
    pub fn check_against(&self, dataset: &Dataset) -> SceneResult<()> {
        for scene in &self.scenes {
            for key in scene.primary.iter().chain(scene.baseline.iter()) {
                dataset.series_id(key).map_err(|_| {
                    SceneError::validation(format!(
                        "scene \"{}\" references series \"{key}\" which the dataset lacks",
                        scene.kind
                    ))
                })?;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Panics if `index >= len()`.
    pub fn at(&self, index: usize) -> &SceneDescriptor {
        &self.scenes[index]
    }

    pub fn get(&self, index: usize) -> Option<&SceneDescriptor> {
        self.scenes.get(index)
    }

    pub fn position(&self, kind: SceneKind) -> Option<usize> {
        self.scenes.iter().position(|s| s.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneDescriptor> {
        self.scenes.iter()
    }
}

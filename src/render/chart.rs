//! Chart model for a scene.
//!
//! Building a [`Chart`] is pure: lines, markers, callouts, guide lines and the legend are
//! computed from the dataset and scene up front. [`Chart::to_svg`] draws that model with
//! `plotters`, so tests can assert on what a scene shows without parsing markup.
use std::ops::Range;

use plotters::{
    coord::{Shift, ranged1d::Ranged, types::RangedCoordi32},
    prelude::*,
    style::{FontDesc, FontFamily, FontStyle},
};
use plotters_backend::text_anchor::{HPos, Pos, VPos};

use crate::{
    config::ChartConfig,
    data::{
        dataset::{Dataset, Row, SeriesId},
        select::{self, Point},
    },
    foundation::{
        core::{Rgb8, Year, YearRange},
        error::{SceneError, SceneResult},
    },
    render::markup::{El, XmlWriter},
    scene::{
        filter::FilterState,
        registry::{SceneDescriptor, SceneKind},
    },
};

pub const X_LABEL: &str = "Year";
pub const Y_LABEL: &str = "Infant death rate";

const AXIS_TICKS: usize = 10;
const GUIDE_COLOR: Rgb8 = Rgb8::GRAY;
/// Dash and gap length of guide lines, in pixels.
const DASH: i32 = 4;

/// Data-space extent shared by every scene: years across the full extent, rates from zero to
/// the largest value of any series so lines stay comparable between scenes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub years: YearRange,
    pub ceiling: f64,
}

impl Frame {
    fn of(dataset: &Dataset) -> SceneResult<Self> {
        let rows = dataset.rows();
        let years =
            select::year_extent(rows).ok_or_else(|| SceneError::validation("dataset has no rows"))?;
        let all: Vec<SeriesId> = dataset.series_ids().collect();
        let ceiling = select::value_ceiling(rows, &all)
            .ok_or_else(|| SceneError::validation("dataset has no values"))?;
        Ok(Self { years, ceiling })
    }

    /// x axis range; a single year is widened by one on each side.
    pub fn x_range(&self) -> Range<i32> {
        let YearRange { start, end } = self.years;
        if start == end {
            start.0 - 1..end.0 + 1
        } else {
            start.0..end.0
        }
    }

    /// y axis range from zero; an all-zero dataset still gets a unit axis.
    pub fn y_range(&self) -> Range<f64> {
        if self.ceiling > 0.0 {
            0.0..self.ceiling
        } else {
            0.0..1.0
        }
    }
}

/// One series drawn as a polyline in year order.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesLine {
    pub key: String,
    pub color: Rgb8,
    pub points: Vec<Point>,
}

/// A data point marker carrying a hover tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub key: String,
    pub color: Rgb8,
    pub point: Point,
}

impl Marker {
    pub fn tooltip(&self) -> String {
        format!("{}: {}", self.key, self.point.value)
    }
}

/// Titled label anchored at a data point, drawn `dx`/`dy` pixels away with a connector.
#[derive(Clone, Debug, PartialEq)]
pub struct Callout {
    pub title: String,
    pub label: String,
    pub anchor: Point,
    pub dx: f64,
    pub dy: f64,
}

/// Dashed vertical connector between two values of the same year.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuideLine {
    pub year: Year,
    pub from: f64,
    pub to: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub key: String,
    pub color: Rgb8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    pub kind: SceneKind,
    pub frame: Frame,
    pub lines: Vec<SeriesLine>,
    pub markers: Vec<Marker>,
    pub guides: Vec<GuideLine>,
    pub callouts: Vec<Callout>,
    pub legend: Vec<LegendEntry>,
    config: ChartConfig,
}

/// Checkbox markup state for one series.
#[derive(Clone, Debug, PartialEq)]
pub struct Checkbox {
    pub key: String,
    pub color: Rgb8,
    pub checked: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Slider {
    pub min: Year,
    pub max: Year,
    pub value: Year,
    pub ticks: Vec<i32>,
}

/// Filter widgets of the interactive scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Controls {
    pub checkboxes: Vec<Checkbox>,
    pub slider: Slider,
}

fn series_line(dataset: &Dataset, rows: &[Row], id: SeriesId, cfg: &ChartConfig) -> SeriesLine {
    let key = dataset.series_key(id);
    SeriesLine {
        key: key.to_string(),
        color: cfg.palette.color_for(key),
        points: select::points(rows, id),
    }
}

fn value_at(dataset: &Dataset, year: Year, id: SeriesId) -> SceneResult<f64> {
    dataset
        .row_for(year)
        .map(|r| r.value(id))
        .ok_or_else(|| SceneError::validation(format!("no row for year {year}")))
}

/// Two decimals, halves rounded away from zero.
pub fn fixed2(v: f64) -> String {
    format!("{:.2}", (v * 100.0).round() / 100.0)
}

/// Chart of an `overall` or `comparison` scene.
#[tracing::instrument(skip_all, fields(scene = %scene.kind))]
pub fn build_static(
    dataset: &Dataset,
    scene: &SceneDescriptor,
    cfg: &ChartConfig,
) -> SceneResult<Chart> {
    if !scene.kind.is_static() {
        return Err(SceneError::validation(format!(
            "scene \"{}\" is not a static chart",
            scene.kind
        )));
    }
    let primary_key = scene.primary.as_deref().ok_or_else(|| {
        SceneError::validation(format!("scene \"{}\" has no primary series", scene.kind))
    })?;
    let baseline_key = scene.baseline.as_deref().ok_or_else(|| {
        SceneError::validation(format!("scene \"{}\" has no baseline series", scene.kind))
    })?;
    let primary = dataset.series_id(primary_key)?;
    let baseline = dataset.series_id(baseline_key)?;

    let rows = dataset.rows();
    let no_rows = || SceneError::validation("dataset has no rows");

    let mut chart = Chart {
        kind: scene.kind,
        frame: Frame::of(dataset)?,
        lines: vec![series_line(dataset, rows, primary, cfg)],
        markers: Vec::new(),
        guides: Vec::new(),
        callouts: Vec::new(),
        legend: Vec::new(),
        config: cfg.clone(),
    };

    if scene.kind == SceneKind::Overall {
        let hi = select::max_point(rows, primary).ok_or_else(no_rows)?;
        let lo = select::min_point(rows, primary).ok_or_else(no_rows)?;

        for (p, title, dx, dy) in [
            (hi, "Highest Point in US", 100.0, -50.0),
            (lo, "Lowest Point in US", -80.0, 70.0),
        ] {
            chart.guides.push(GuideLine {
                year: p.year,
                from: p.value,
                to: value_at(dataset, p.year, baseline)?,
            });
            chart.callouts.push(Callout {
                title: title.to_string(),
                label: format!("Value: {}", p.value),
                anchor: p,
                dx,
                dy,
            });
        }
    } else {
        if baseline != primary {
            chart.lines.push(series_line(dataset, rows, baseline, cfg));
        }

        let gap = select::min_difference(rows, primary, baseline).ok_or_else(no_rows)?;
        chart.guides.push(GuideLine {
            year: gap.year,
            from: gap.primary,
            to: gap.baseline,
        });
        chart.callouts.extend([
            Callout {
                title: "Smallest Difference".to_string(),
                label: format!("Difference: {}", fixed2(gap.diff)),
                anchor: Point {
                    year: gap.year,
                    value: gap.midpoint(),
                },
                dx: -120.0,
                dy: -5.0,
            },
            Callout {
                title: format!("Infant death rates ({baseline_key})"),
                label: format!("Value: {}", gap.baseline),
                anchor: Point {
                    year: gap.year,
                    value: gap.baseline,
                },
                dx: -100.0,
                dy: 30.0,
            },
            Callout {
                title: format!("Infant death rates ({primary_key})"),
                label: format!("Value: {}", gap.primary),
                anchor: Point {
                    year: gap.year,
                    value: gap.primary,
                },
                dx: -280.0,
                dy: -30.0,
            },
        ]);

        for key in [primary_key, baseline_key] {
            if chart.legend.iter().all(|e| e.key != key) {
                chart.legend.push(LegendEntry {
                    key: key.to_string(),
                    color: cfg.palette.color_for(key),
                });
            }
        }
    }

    tracing::debug!(
        lines = chart.lines.len(),
        callouts = chart.callouts.len(),
        "built static chart"
    );
    Ok(chart)
}

/// Chart of the interactive scene under `filter`: one line plus markers per enabled series over
/// the rows up to the slider year. The frame ignores the filter.
#[tracing::instrument(skip_all, fields(bound = filter.year_bound().0))]
pub fn build_interactive(
    dataset: &Dataset,
    filter: &FilterState,
    cfg: &ChartConfig,
) -> SceneResult<Chart> {
    let frame = Frame::of(dataset)?;
    let rows = filter.visible_rows(dataset);

    let mut lines = Vec::new();
    let mut markers = Vec::new();
    for id in filter.enabled_series() {
        let line = series_line(dataset, rows, id, cfg);
        markers.extend(line.points.iter().map(|&point| Marker {
            key: line.key.clone(),
            color: line.color,
            point,
        }));
        lines.push(line);
    }

    tracing::debug!(
        lines = lines.len(),
        rows = rows.len(),
        "built interactive chart"
    );
    Ok(Chart {
        kind: SceneKind::Interactive,
        frame,
        lines,
        markers,
        guides: Vec::new(),
        callouts: Vec::new(),
        legend: Vec::new(),
        config: cfg.clone(),
    })
}

/// Checkbox and slider state for the interactive scene. Slider tick marks are the year axis key
/// points for one tick per row at most.
pub fn build_controls(dataset: &Dataset, filter: &FilterState, chart: &Chart) -> Controls {
    let checkboxes = dataset
        .series_ids()
        .map(|id| {
            let key = dataset.series_key(id);
            Checkbox {
                key: key.to_string(),
                color: chart.config.palette.color_for(key),
                checked: filter.is_enabled(id),
            }
        })
        .collect();

    let extent = filter.extent();
    let ticks = if extent.start == extent.end {
        vec![extent.start.0]
    } else {
        RangedCoordi32::from(extent.start.0..extent.end.0).key_points(dataset.rows().len())
    };

    Controls {
        checkboxes,
        slider: Slider {
            min: extent.start,
            max: extent.end,
            value: filter.year_bound(),
            ticks,
        },
    }
}

/// Pixel position of a marker plus its tooltip text.
#[derive(Clone, Debug, PartialEq)]
struct HoverTarget {
    key: String,
    at: (i32, i32),
    text: String,
}

fn draw_err(e: impl std::fmt::Display) -> SceneError {
    SceneError::render(format!("draw chart: {e}"))
}

fn color(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

fn px(v: f64) -> u32 {
    v.round().max(0.0) as u32
}

fn offset(v: f64) -> i32 {
    v.round() as i32
}

/// Dash segments covering `0..len` (either sign), as `(start, end)` offsets.
fn dashes(len: i32) -> Vec<(i32, i32)> {
    let sign = len.signum();
    let len = len.abs();
    (0..len)
        .step_by((2 * DASH) as usize)
        .map(|s| (sign * s, sign * (s + DASH).min(len)))
        .collect()
}

impl Chart {
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn line(&self, key: &str) -> Option<&SeriesLine> {
        self.lines.iter().find(|l| l.key == key)
    }

    /// Standalone SVG document.
    pub fn to_svg(&self) -> SceneResult<String> {
        let cfg = &self.config;
        let size = (px(cfg.canvas.width), px(cfg.svg_height()));
        let mut svg = String::new();
        let hover = {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            let hover = self.draw(&root)?;
            root.present().map_err(draw_err)?;
            hover
        };
        Ok(with_tooltips(svg, &hover))
    }

    fn draw(&self, root: &DrawingArea<SVGBackend<'_>, Shift>) -> SceneResult<Vec<HoverTarget>> {
        let cfg = &self.config;
        let stroke = px(cfg.stroke_width).max(1);
        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(root)
            .margin_top(px(cfg.margin.top))
            .margin_right(px(cfg.margin.right))
            .x_label_area_size(px(cfg.margin.bottom + cfg.axis_label_band))
            .y_label_area_size(px(cfg.margin.left))
            .build_cartesian_2d(self.frame.x_range(), self.frame.y_range())
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(AXIS_TICKS)
            .y_labels(AXIS_TICKS)
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .draw()
            .map_err(draw_err)?;

        for line in self.lines.iter().filter(|l| !l.points.is_empty()) {
            let series = chart
                .draw_series(LineSeries::new(
                    line.points.iter().map(|p| (p.year.0, p.value)),
                    color(line.color).stroke_width(stroke),
                ))
                .map_err(draw_err)?;
            if let Some(entry) = self.legend.iter().find(|e| e.key == line.key) {
                let swatch = color(entry.color);
                series.label(entry.key.as_str()).legend(move |(x, y)| {
                    Rectangle::new([(x, y - 6), (x + 12, y + 6)], swatch.filled())
                });
            }
        }

        let radius = px(cfg.marker_radius);
        chart
            .draw_series(self.markers.iter().map(|m| {
                Circle::new(
                    (m.point.year.0, m.point.value),
                    radius,
                    color(m.color).filled(),
                )
            }))
            .map_err(draw_err)?;

        if !self.legend.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(draw_err)?;
        }

        // Guides and callouts are placed in pixel space on the root area.
        let guide = color(GUIDE_COLOR).stroke_width(stroke);
        for g in &self.guides {
            let (x, y1) = chart.backend_coord(&(g.year.0, g.from));
            let (_, y2) = chart.backend_coord(&(g.year.0, g.to));
            for (a, b) in dashes(y2 - y1) {
                root.draw(&PathElement::new(vec![(x, y1 + a), (x, y1 + b)], guide))
                    .map_err(draw_err)?;
            }
        }

        let title_style = TextStyle::from(FontDesc::new(
            FontFamily::SansSerif,
            11.0,
            FontStyle::Bold,
        ))
        .pos(Pos::new(HPos::Center, VPos::Bottom));
        let label_style = TextStyle::from(FontDesc::new(
            FontFamily::SansSerif,
            10.0,
            FontStyle::Normal,
        ))
        .pos(Pos::new(HPos::Center, VPos::Bottom));
        for c in &self.callouts {
            let (ax, ay) = chart.backend_coord(&(c.anchor.year.0, c.anchor.value));
            let (tx, ty) = (ax + offset(c.dx), ay + offset(c.dy));
            root.draw(&PathElement::new(
                vec![(ax, ay), (tx, ty)],
                color(GUIDE_COLOR),
            ))
            .map_err(draw_err)?;
            root.draw(&Text::new(c.title.as_str(), (tx, ty - 16), title_style.clone()))
                .map_err(draw_err)?;
            root.draw(&Text::new(c.label.as_str(), (tx, ty - 3), label_style.clone()))
                .map_err(draw_err)?;
        }

        Ok(self
            .markers
            .iter()
            .map(|m| HoverTarget {
                key: m.key.clone(),
                at: chart.backend_coord(&(m.point.year.0, m.point.value)),
                text: m.tooltip(),
            })
            .collect())
    }
}

/// Append an invisible hover layer carrying one `<title>` per marker before `</svg>`.
fn with_tooltips(mut svg: String, hover: &[HoverTarget]) -> String {
    let Some(end) = svg.rfind("</svg>") else {
        return svg;
    };
    if hover.is_empty() {
        return svg;
    }

    let mut w = XmlWriter::new();
    w.open(El::new("g").attr("class", "tooltips"));
    for h in hover {
        w.open(
            El::new("circle")
                .attr("class", format!("marker series-{}", h.key))
                .at("cx", f64::from(h.at.0))
                .at("cy", f64::from(h.at.1))
                .at("r", 6.0)
                .attr("fill", "#000000")
                .attr("fill-opacity", 0),
        );
        w.text(El::new("title"), &h.text);
        w.close();
    }
    svg.insert_str(end, &w.finish());
    svg
}

#[cfg(test)]
#[path = "../../tests/unit/render/chart.rs"]
mod tests;

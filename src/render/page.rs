//! A rendered scene and its HTML page.
use crate::{
    foundation::error::SceneResult,
    render::{
        chart::{Chart, Controls},
        markup::{El, XmlWriter, num},
    },
    scene::registry::SceneDescriptor,
};

const STYLE: &str = "body{font-family:sans-serif;margin:24px;color:#222}\
.title{font-size:22px;font-weight:bold;margin-bottom:8px}\
.paragraph{max-width:800px;line-height:1.4;margin-bottom:12px}\
.arrows{margin:8px 0}.arrow{font-size:24px;margin-right:16px;text-decoration:none}\
.hidden{visibility:hidden}\
.filter-container label{margin-right:12px;display:inline-flex;align-items:center}\
.color-box{width:12px;height:12px;margin:0 4px;display:inline-block}\
.slider-labels{display:flex;justify-content:space-between}";

/// Which navigation affordances the page shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub previous: bool,
    pub next: bool,
    pub replay: bool,
}

impl Navigation {
    pub fn at(index: usize, count: usize) -> Self {
        let last = count.saturating_sub(1);
        Self {
            previous: index > 0,
            next: index < last,
            replay: index == last,
        }
    }
}

/// Link targets for the navigation arrows. Arrows without a target render as inert anchors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageLinks {
    pub previous: Option<String>,
    pub next: Option<String>,
    pub replay: Option<String>,
}

/// Output of one render pass. Replaces whatever was shown before.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedScene {
    pub index: usize,
    pub scene: SceneDescriptor,
    pub navigation: Navigation,
    pub chart: Chart,
    /// Present only for the interactive scene.
    pub controls: Option<Controls>,
}

impl RenderedScene {
    pub fn to_svg(&self) -> SceneResult<String> {
        self.chart.to_svg()
    }

    pub fn to_html(&self, links: &PageLinks) -> SceneResult<String> {
        let svg = self.chart.to_svg()?;
        let mut w = XmlWriter::new();
        w.raw("<!DOCTYPE html>");
        w.open(El::new("html").attr("lang", "en"));

        w.open(El::new("head"));
        w.leaf(El::new("meta").attr("charset", "utf-8"));
        w.text(El::new("title"), &self.scene.title);
        w.text(El::new("style"), STYLE);
        w.close();

        w.open(El::new("body"));
        w.open(
            El::new("div")
                .attr("id", "scene")
                .attr("data-scene", self.scene.kind.id()),
        );
        w.open(El::new("div").attr("class", "content"));
        w.text(El::new("div").attr("class", "title"), &self.scene.title);
        self.write_narrative(&mut w);
        w.close();

        self.write_arrows(&mut w, links);

        if let Some(controls) = &self.controls {
            write_checkboxes(&mut w, controls);
        }
        w.open(El::new("div").attr("class", "chart"));
        let start = svg.find("<svg").unwrap_or(0);
        w.raw(svg[start..].trim_end());
        w.close();
        if let Some(controls) = &self.controls {
            write_slider(&mut w, controls, self.chart.config().plot_width());
        }

        w.close();
        w.close();
        w.close();
        Ok(w.finish())
    }

    fn write_narrative(&self, w: &mut XmlWriter) {
        w.open(El::new("div").attr("class", "paragraph"));
        w.text(El::new("span"), &self.scene.narrative);
        if let Some(src) = &self.scene.source {
            w.raw("Source:");
            w.text(
                El::new("a")
                    .attr("href", &src.href)
                    .attr("target", "_blank"),
                &src.label,
            );
        }
        w.close();
    }

    fn write_arrows(&self, w: &mut XmlWriter, links: &PageLinks) {
        let nav = self.navigation;
        w.open(El::new("div").attr("class", "arrows"));
        for (class, shown, href, glyph) in [
            ("left", nav.previous, &links.previous, "\u{2190}"),
            ("right", nav.next, &links.next, "\u{2192}"),
            ("replay", nav.replay, &links.replay, "\u{21ba}"),
        ] {
            let class = if shown {
                format!("arrow {class}")
            } else {
                format!("arrow {class} hidden")
            };
            let mut el = El::new("a").attr("class", class);
            if let Some(href) = href {
                el = el.attr("href", href);
            }
            w.text(el, glyph);
        }
        w.close();
    }
}

fn write_checkboxes(w: &mut XmlWriter, controls: &Controls) {
    w.open(El::new("div").attr("class", "filter-container"));
    for cb in &controls.checkboxes {
        w.open(El::new("label"));
        w.leaf(
            El::new("input")
                .attr("type", "checkbox")
                .attr("id", &cb.key)
                .flag("checked", cb.checked),
        );
        w.leaf(
            El::new("div")
                .attr("class", "color-box")
                .attr("style", format!("background-color:{}", cb.color.to_hex())),
        );
        w.text(El::new("span"), &cb.key);
        w.close();
    }
    w.close();
}

fn write_slider(w: &mut XmlWriter, controls: &Controls, width: f64) {
    let s = &controls.slider;
    w.open(El::new("div").attr("class", "slider-container"));
    w.leaf(
        El::new("input")
            .attr("type", "range")
            .attr("min", s.min)
            .attr("max", s.max)
            .attr("value", s.value)
            .attr("step", 1)
            .attr("list", "tickmarks")
            .attr("style", format!("width:{}px", num(width))),
    );
    w.open(El::new("datalist").attr("id", "tickmarks"));
    for t in &s.ticks {
        w.leaf(El::new("option").attr("value", t));
    }
    w.close();
    w.open(El::new("div").attr("class", "slider-labels"));
    w.text(El::new("span").attr("class", "min-label"), &s.min.to_string());
    w.text(El::new("span").attr("class", "max-label"), &s.max.to_string());
    w.close();
    w.close();
}

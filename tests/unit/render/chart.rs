use super::*;
use crate::scene::registry::SceneRegistry;

const CSV: &str = include_str!("../../../data/dataset.csv");

fn dataset() -> Dataset {
    Dataset::from_csv_str(CSV).unwrap()
}

fn scene(kind: SceneKind) -> SceneDescriptor {
    let reg = SceneRegistry::standard();
    reg.get(reg.position(kind).unwrap()).unwrap().clone()
}

#[test]
fn overall_scene_marks_the_extremes_of_total() {
    let ds = dataset();
    let chart = build_static(&ds, &scene(SceneKind::Overall), &ChartConfig::default()).unwrap();

    assert_eq!(chart.lines.len(), 1);
    assert_eq!(chart.lines[0].key, "Total");
    assert_eq!(chart.lines[0].color, Rgb8::STEELBLUE);
    assert_eq!(chart.lines[0].points.len(), 13);

    let hi = &chart.callouts[0];
    assert_eq!(hi.title, "Highest Point in US");
    assert_eq!(hi.label, "Value: 6.75");
    assert_eq!(hi.anchor.year, Year(2007));
    assert_eq!((hi.dx, hi.dy), (100.0, -50.0));

    let lo = &chart.callouts[1];
    assert_eq!(lo.title, "Lowest Point in US");
    assert_eq!(lo.label, "Value: 5.58");
    assert_eq!(lo.anchor.year, Year(2019));
    assert_eq!((lo.dx, lo.dy), (-80.0, 70.0));

    // Primary and baseline are both Total, so the guides collapse to a point.
    assert_eq!(chart.guides.len(), 2);
    assert!(chart.guides.iter().all(|g| g.from == g.to));
    assert!(chart.legend.is_empty());
}

#[test]
fn frame_covers_every_series() {
    let ds = dataset();
    let chart = build_static(&ds, &scene(SceneKind::Overall), &ChartConfig::default()).unwrap();
    assert_eq!(chart.frame.x_range(), 2007..2019);
    assert_eq!(chart.frame.y_range(), 0.0..13.31);
}

#[test]
fn degenerate_frames_still_have_extent() {
    let ds = Dataset::from_csv_str("Year,Total\n2007,0\n").unwrap();
    let filter = FilterState::new(&ds);
    let chart = build_interactive(&ds, &filter, &ChartConfig::default()).unwrap();
    assert_eq!(chart.frame.x_range(), 2006..2008);
    assert_eq!(chart.frame.y_range(), 0.0..1.0);
    assert!(chart.to_svg().unwrap().contains("<title>Total: 0</title>"));
}

#[test]
fn comparison_scene_marks_the_smallest_gap() {
    let ds = dataset();
    let chart =
        build_static(&ds, &scene(SceneKind::Comparison), &ChartConfig::default()).unwrap();

    let keys: Vec<_> = chart.lines.iter().map(|l| l.key.as_str()).collect();
    assert_eq!(keys, ["Black", "Total"]);
    assert_eq!(chart.line("Black").unwrap().color, Rgb8::RED);

    let labels: Vec<_> = chart
        .callouts
        .iter()
        .map(|c| (c.title.as_str(), c.label.as_str(), c.anchor.year))
        .collect();
    assert_eq!(
        labels,
        [
            ("Smallest Difference", "Difference: 4.63", Year(2014)),
            ("Infant death rates (Total)", "Value: 5.82", Year(2014)),
            ("Infant death rates (Black)", "Value: 10.45", Year(2014)),
        ]
    );
    assert!((chart.callouts[0].anchor.value - 8.135).abs() < 1e-9);

    assert_eq!(
        chart.guides,
        [GuideLine {
            year: Year(2014),
            from: 10.45,
            to: 5.82
        }]
    );
    assert_eq!(
        chart.legend,
        [
            LegendEntry {
                key: "Black".into(),
                color: Rgb8::RED
            },
            LegendEntry {
                key: "Total".into(),
                color: Rgb8::STEELBLUE
            },
        ]
    );
}

#[test]
fn interactive_scene_has_no_static_chart() {
    let ds = dataset();
    let err = build_static(&ds, &scene(SceneKind::Interactive), &ChartConfig::default())
        .unwrap_err();
    assert!(matches!(err, SceneError::Validation(_)));
}

#[test]
fn interactive_initial_view_shows_everything() {
    let ds = dataset();
    let filter = FilterState::new(&ds);
    let chart = build_interactive(&ds, &filter, &ChartConfig::default()).unwrap();

    let keys: Vec<_> = chart.lines.iter().map(|l| l.key.as_str()).collect();
    assert_eq!(keys, ["Total", "White", "Black", "Native", "Asian"]);
    assert_eq!(chart.markers.len(), 5 * 13);
    assert!(chart.callouts.is_empty());
}

#[test]
fn slider_at_2010_limits_checked_series() {
    let ds = dataset();
    let mut filter = FilterState::new(&ds);
    filter.set_enabled(ds.series_id("White").unwrap(), false);
    filter.set_year_bound(Year(2010));

    let chart = build_interactive(&ds, &filter, &ChartConfig::default()).unwrap();
    assert!(chart.line("White").is_none());
    assert!(chart.markers.iter().all(|m| m.key != "White"));
    assert_eq!(chart.lines.len(), 4);
    for line in &chart.lines {
        let years: Vec<_> = line.points.iter().map(|p| p.year.0).collect();
        assert_eq!(years, [2007, 2008, 2009, 2010]);
    }
    assert_eq!(chart.markers.len(), 16);

    // Filtering never rescales.
    assert_eq!(chart.frame.y_range(), 0.0..13.31);
    assert_eq!(chart.frame.x_range(), 2007..2019);
}

#[test]
fn toggling_off_and_on_redraws_the_same_line() {
    let ds = dataset();
    let cfg = ChartConfig::default();
    let black = ds.series_id("Black").unwrap();
    let mut filter = FilterState::new(&ds);

    let before = build_interactive(&ds, &filter, &cfg).unwrap();
    filter.toggle(black);
    let hidden = build_interactive(&ds, &filter, &cfg).unwrap();
    filter.toggle(black);
    let after = build_interactive(&ds, &filter, &cfg).unwrap();

    assert!(hidden.line("Black").is_none());
    assert_eq!(before, after);
    assert_eq!(before.to_svg().unwrap(), after.to_svg().unwrap());
}

#[test]
fn markers_carry_tooltips() {
    let ds = dataset();
    let filter = FilterState::new(&ds);
    let chart = build_interactive(&ds, &filter, &ChartConfig::default()).unwrap();
    assert_eq!(chart.markers[0].tooltip(), "Total: 6.75");

    let svg = chart.to_svg().unwrap();
    assert!(svg.contains("<title>Total: 6.75</title>"));
    assert_eq!(svg.matches("<title>").count(), 5 * 13);
    assert!(svg.contains("<title>Asian: 3.44</title>"));
}

#[test]
fn controls_mirror_the_filter() {
    let ds = dataset();
    let mut filter = FilterState::new(&ds);
    filter.toggle(ds.series_id("Native").unwrap());
    filter.set_year_bound(Year(2012));
    let chart = build_interactive(&ds, &filter, &ChartConfig::default()).unwrap();

    let controls = build_controls(&ds, &filter, &chart);
    let boxes: Vec<_> = controls
        .checkboxes
        .iter()
        .map(|c| (c.key.as_str(), c.checked))
        .collect();
    assert_eq!(
        boxes,
        [
            ("Total", true),
            ("White", true),
            ("Black", true),
            ("Native", false),
            ("Asian", true),
        ]
    );
    assert_eq!(controls.checkboxes[4].color, Rgb8::ORANGE);
    assert_eq!(controls.slider.min, Year(2007));
    assert_eq!(controls.slider.max, Year(2019));
    assert_eq!(controls.slider.value, Year(2012));
    assert_eq!(controls.slider.ticks, (2007..=2019).collect::<Vec<_>>());
}

#[test]
fn svg_carries_annotations_and_axis_labels() {
    let ds = dataset();
    let svg = build_static(&ds, &scene(SceneKind::Overall), &ChartConfig::default())
        .unwrap()
        .to_svg()
        .unwrap();
    assert!(svg.contains("width=\"800\""));
    assert!(svg.contains("height=\"440\""));
    assert!(svg.contains(">Highest Point in US</text>"));
    assert!(svg.contains(">Value: 6.75</text>"));
    assert!(svg.contains(">Year</text>"));
    assert!(svg.contains(">Infant death rate</text>"));
    assert!(svg.contains(">2010</text>"));
    // Static scenes have no hover layer.
    assert!(!svg.contains("class=\"tooltips\""));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn lines_use_series_colors() {
    let ds = dataset();
    let svg = build_static(&ds, &scene(SceneKind::Comparison), &ChartConfig::default())
        .unwrap()
        .to_svg()
        .unwrap()
        .to_ascii_lowercase();
    assert!(svg.contains("#4682b4"));
    assert!(svg.contains("#ff0000"));
    assert!(svg.contains(">black</text>"));
    assert!(svg.contains(">difference: 4.63</text>"));
}

#[test]
fn guide_dashes_cover_the_span() {
    assert!(dashes(0).is_empty());
    assert_eq!(dashes(10), [(0, 4), (8, 10)]);
    assert_eq!(dashes(-9), [(0, -4), (-8, -9)]);
}

#[test]
fn difference_rounds_halves_away_from_zero() {
    assert_eq!(fixed2(0.125), "0.13");
    assert_eq!(fixed2(4.63), "4.63");
    assert_eq!(fixed2(2.0), "2.00");

    let ds = Dataset::from_csv_str("Year,Total,Black\n2007,1.0,1.125\n2008,1.0,2.0\n").unwrap();
    let chart =
        build_static(&ds, &scene(SceneKind::Comparison), &ChartConfig::default()).unwrap();
    assert_eq!(chart.callouts[0].label, "Difference: 0.13");
    assert_eq!(chart.callouts[0].anchor.year, Year(2007));
}

use super::*;
use crate::data::dataset::Dataset;

fn fixture() -> Dataset {
    Dataset::from_csv_str(
        "\
Year,Total,Black
2007,6.75,13.31
2008,6.61,12.67
2009,6.39,12.40
2010,6.15,11.46
2014,5.82,10.45
2015,5.90,11.34
2019,5.58,10.62
",
    )
    .unwrap()
}

#[test]
fn extrema_of_total() {
    let ds = fixture();
    let total = ds.series_id("Total").unwrap();

    let hi = max_point(ds.rows(), total).unwrap();
    assert_eq!(hi.year, Year(2007));
    assert_eq!(hi.value, 6.75);

    let lo = min_point(ds.rows(), total).unwrap();
    assert_eq!(lo.year, Year(2019));
    assert_eq!(lo.value, 5.58);
}

#[test]
fn extrema_bound_every_value() {
    let ds = fixture();
    for id in ds.series_ids() {
        let hi = max_point(ds.rows(), id).unwrap().value;
        let lo = min_point(ds.rows(), id).unwrap().value;
        for row in ds.rows() {
            assert!(lo <= row.value(id) && row.value(id) <= hi);
        }
    }
}

#[test]
fn ties_pick_the_earliest_row() {
    let ds = Dataset::from_csv_str("Year,A,B\n2000,3,1\n2001,5,1\n2002,5,4\n2003,3,4\n").unwrap();
    let a = ds.series_id("A").unwrap();
    let b = ds.series_id("B").unwrap();

    assert_eq!(max_point(ds.rows(), a).unwrap().year, Year(2001));
    assert_eq!(min_point(ds.rows(), a).unwrap().year, Year(2000));
    assert_eq!(min_point(ds.rows(), b).unwrap().year, Year(2000));

    // |A-B| = 2, 4, 1, 1
    let gap = min_difference(ds.rows(), a, b).unwrap();
    assert_eq!(gap.year, Year(2002));
    assert_eq!(gap.diff, 1.0);
}

#[test]
fn smallest_gap_between_black_and_total() {
    let ds = fixture();
    let black = ds.series_id("Black").unwrap();
    let total = ds.series_id("Total").unwrap();

    let gap = min_difference(ds.rows(), black, total).unwrap();
    assert_eq!(gap.year, Year(2014));
    assert_eq!(gap.primary, 10.45);
    assert_eq!(gap.baseline, 5.82);
    assert!((gap.diff - 4.63).abs() < 1e-9);
    assert!((gap.midpoint() - 8.135).abs() < 1e-9);
}

#[test]
fn empty_slices_select_nothing() {
    let ds = fixture();
    let total = ds.series_id("Total").unwrap();
    let none = &ds.rows()[..0];
    assert!(max_point(none, total).is_none());
    assert!(min_point(none, total).is_none());
    assert!(min_difference(none, total, total).is_none());
    assert!(value_ceiling(none, &[total]).is_none());
    assert!(year_extent(none).is_none());
}

#[test]
fn ceiling_spans_all_requested_series() {
    let ds = fixture();
    let total = ds.series_id("Total").unwrap();
    let black = ds.series_id("Black").unwrap();
    assert_eq!(value_ceiling(ds.rows(), &[total]), Some(6.75));
    assert_eq!(value_ceiling(ds.rows(), &[total, black]), Some(13.31));
}

#[test]
fn points_follow_row_order() {
    let ds = fixture();
    let total = ds.series_id("Total").unwrap();
    let pts = points(ds.through_year(Year(2009)), total);
    let years: Vec<_> = pts.iter().map(|p| p.year.0).collect();
    assert_eq!(years, [2007, 2008, 2009]);
    assert_eq!(
        year_extent(ds.rows()),
        Some(YearRange {
            start: Year(2007),
            end: Year(2019)
        })
    );
}

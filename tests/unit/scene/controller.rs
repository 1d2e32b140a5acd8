use super::*;

const CSV: &str = include_str!("../../../data/dataset.csv");

fn controller() -> SceneController {
    SceneController::new(
        SceneRegistry::standard(),
        Dataset::from_csv_str(CSV).unwrap(),
        ChartConfig::default(),
    )
    .unwrap()
}

#[test]
fn starts_on_the_first_scene() {
    let ctl = controller();
    assert_eq!(ctl.index(), 0);
    assert!(ctl.filter().is_none());

    let shown = ctl.render().unwrap();
    assert_eq!(shown.scene.kind, SceneKind::Overall);
    assert!(!shown.navigation.previous);
    assert!(shown.navigation.next);
    assert!(!shown.navigation.replay);
    assert!(shown.controls.is_none());
}

#[test]
fn previous_on_first_scene_is_a_no_op() {
    let mut ctl = controller();
    assert!(ctl.retreat().unwrap().is_none());
    assert_eq!(ctl.index(), 0);
}

#[test]
fn walks_forward_and_wraps() {
    let mut ctl = controller();
    assert_eq!(ctl.advance().unwrap().scene.kind, SceneKind::Comparison);

    let last = ctl.advance().unwrap();
    assert_eq!(last.scene.kind, SceneKind::Interactive);
    assert!(!last.navigation.next);
    assert!(last.navigation.replay);
    assert!(last.controls.is_some());

    let wrapped = ctl.advance().unwrap();
    assert_eq!(wrapped.index, 0);
    assert!(ctl.filter().is_none());
}

#[test]
fn replay_from_last_scene_lands_on_first() {
    let mut ctl = controller();
    ctl.jump_to(SceneKind::Interactive).unwrap();
    assert_eq!(ctl.replay().unwrap().index, 0);
}

#[test]
fn retreat_steps_back() {
    let mut ctl = controller();
    ctl.jump_to(SceneKind::Interactive).unwrap();
    let shown = ctl.retreat().unwrap().unwrap();
    assert_eq!(shown.scene.kind, SceneKind::Comparison);
    assert_eq!(shown.chart.callouts.len(), 3);
}

#[test]
fn filters_only_exist_on_the_interactive_scene() {
    let mut ctl = controller();
    assert!(matches!(
        ctl.toggle_series("Total"),
        Err(SceneError::Navigation(_))
    ));
    assert!(matches!(
        ctl.set_year_bound(Year(2010)),
        Err(SceneError::Navigation(_))
    ));
}

#[test]
fn slider_at_2010_shows_only_early_rows_of_checked_series() {
    let mut ctl = controller();
    ctl.jump_to(SceneKind::Interactive).unwrap();
    ctl.toggle_series("Asian").unwrap();
    let shown = ctl.set_year_bound(Year(2010)).unwrap();

    assert!(shown.chart.line("Asian").is_none());
    for line in &shown.chart.lines {
        assert!(line.points.iter().all(|p| p.year <= Year(2010)));
        assert_eq!(line.points.len(), 4);
    }
    let controls = shown.controls.unwrap();
    assert_eq!(controls.slider.value, Year(2010));
    assert!(!controls.checkboxes.iter().find(|c| c.key == "Asian").unwrap().checked);
}

#[test]
fn filter_resets_when_the_scene_is_re_entered() {
    let mut ctl = controller();
    ctl.jump_to(SceneKind::Interactive).unwrap();
    ctl.toggle_series("Black").unwrap();
    ctl.set_year_bound(Year(2009)).unwrap();

    ctl.retreat().unwrap();
    let shown = ctl.advance().unwrap();
    assert_eq!(shown.chart.lines.len(), 5);
    assert_eq!(ctl.filter().unwrap().year_bound(), Year(2019));
}

#[test]
fn unknown_series_is_rejected() {
    let mut ctl = controller();
    ctl.jump_to(SceneKind::Interactive).unwrap();
    assert!(matches!(
        ctl.toggle_series("Martian"),
        Err(SceneError::Validation(_))
    ));
}

#[test]
fn set_series_is_idempotent() {
    let mut ctl = controller();
    let initial = ctl.jump_to(SceneKind::Interactive).unwrap();
    ctl.set_series("White", false).unwrap();
    ctl.set_series("White", false).unwrap();
    let restored = ctl.set_series("White", true).unwrap();
    assert_eq!(initial, restored);
}

#[test]
fn registry_must_match_dataset() {
    let ds = Dataset::from_csv_str("Year,Total\n2007,6.75\n").unwrap();
    let err =
        SceneController::new(SceneRegistry::standard(), ds, ChartConfig::default()).unwrap_err();
    assert!(matches!(err, SceneError::Validation(_)));
}

#[test]
fn jump_to_unregistered_scene_fails() {
    let reg = SceneRegistry::new(vec![SceneRegistry::standard().at(0).clone()]).unwrap();
    let mut ctl =
        SceneController::new(reg, Dataset::from_csv_str(CSV).unwrap(), ChartConfig::default())
            .unwrap();
    assert!(matches!(
        ctl.jump_to(SceneKind::Interactive),
        Err(SceneError::Navigation(_))
    ));
    // One-scene deck: next wraps onto itself.
    assert_eq!(ctl.advance().unwrap().index, 0);
}

// File: crates/chart-core/tests/widget.rs
// Purpose: End-to-end widget behaviour: mounting, domains, empty state, redraws and brushing.

use std::cell::RefCell;
use std::rc::Rc;

use chart_core::{
    AreaChart, ChartConfig, ChartError, Curve, Document, DrawState, RawRecord, RenderError,
    SurveyTime, ValidationError,
};

fn day(d: u32) -> SurveyTime {
    SurveyTime::from_ymd(2024, 1, d).unwrap()
}

fn records(days: &[u32]) -> Vec<RawRecord> {
    days.iter().map(|&d| RawRecord::new(day(d))).collect()
}

fn mounted(days: &[u32]) -> (Document, AreaChart) {
    let mut doc = Document::with_mount_points(["area-chart"]);
    let chart = AreaChart::new(&mut doc, "area-chart", records(days)).expect("mount");
    (doc, chart)
}

#[test]
fn unknown_mount_point_is_render_error() {
    let mut doc = Document::with_mount_points(["area-chart"]);
    let err = AreaChart::new(&mut doc, "missing", records(&[1])).unwrap_err();
    assert!(matches!(err, ChartError::Render(RenderError::MountPointNotFound(ref id)) if id == "missing"));
    // Nothing was appended to the existing mount point.
    let mount = doc.mount("area-chart").unwrap();
    assert!(doc.children(mount).is_empty());
}

#[test]
fn invalid_json_records_are_validation_errors() {
    let mut doc = Document::with_mount_points(["area-chart"]);
    let err = AreaChart::from_json(&mut doc, "area-chart", r#"[{"survey": "2024-01-01"}, {"other": 1}]"#)
        .unwrap_err();
    assert!(matches!(err, ChartError::Validation(ValidationError::MissingSurvey { index: 1 })));

    let chart = AreaChart::from_json(&mut doc, "area-chart", r#"[{"survey": "2024-01-01"}]"#).unwrap();
    assert_eq!(chart.display_data().len(), 1);
}

#[test]
fn domains_follow_aggregate_extent() {
    let (_doc, chart) = mounted(&[3, 1, 1, 7, 7, 7]);
    let f = chart.frame();
    assert_eq!(f.x_domain, (day(1), day(7)));
    assert_eq!(f.y_domain, (0.0, 3.0));
    assert_eq!(chart.x_scale().domain, (day(1), day(7)));
    assert_eq!(chart.y_scale().domain, (0.0, 3.0));
    assert_eq!(f.state, DrawState::Rendered { points: 3 });
}

#[test]
fn two_day_scenario_draws_expected_area() {
    let (doc, chart) = mounted(&[1, 1, 2]);
    let f = chart.frame();
    assert_eq!(f.area.to_svg(), "M0,0L600,90L600,180L0,180Z");

    let mount = doc.mount("area-chart").unwrap();
    let path = doc.select_class(mount, "area").unwrap();
    assert_eq!(doc.attr(path, "d"), Some("M0,0L600,90L600,180L0,180Z"));
    assert_eq!(doc.attr(path, "fill"), Some("url(#area-gradient)"));

    // One day over six ticks -> three-hour ticks.
    assert_eq!(f.x_ticks.len(), 9);
    assert_eq!(f.x_ticks[0].label, "2024");
    assert_eq!(f.x_ticks[1].label, "03 AM");
    assert_eq!(f.x_ticks[8].label, "Tue 02");
    assert_eq!(f.y_ticks.len(), 11);
    assert_eq!(f.y_ticks.last().map(|t| t.label.as_str()), Some("2.0"));

    let x_axis = doc.select_class(mount, "x-axis").unwrap();
    let labels: Vec<&str> = doc
        .select_all_tag(x_axis, "text")
        .into_iter()
        .filter_map(|n| doc.text(n))
        .collect();
    assert_eq!(labels.first(), Some(&"2024"));
    assert_eq!(labels.last(), Some(&"Tue 02"));
}

#[test]
fn surface_layout_and_layer_order() {
    let (doc, chart) = mounted(&[1, 2]);
    let mount = doc.mount("area-chart").unwrap();
    let svg = doc.children(mount)[0];
    assert_eq!(doc.tag(svg), "svg");
    assert_eq!(doc.attr(svg, "width"), Some("670"));
    assert_eq!(doc.attr(svg, "height"), Some("230"));

    let g = doc.children(svg)[0];
    assert_eq!(doc.attr(g, "transform"), Some("translate(50,20)"));
    let layers: Vec<String> = doc
        .children(g)
        .iter()
        .map(|&n| doc.attr(n, "class").unwrap_or(doc.tag(n)).to_string())
        .collect();
    assert_eq!(layers, vec!["defs", "y-axis axis", "x-axis axis", "area", "x brush"]);

    let x_axis = doc.select_class(g, "x-axis").unwrap();
    assert_eq!(doc.attr(x_axis, "transform"), Some("translate(0,180)"));
    assert!(chart.to_svg(&doc).starts_with("<svg width=\"670\" height=\"230\">"));
    assert!(chart.to_svg_file(&doc).starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"670\""));
}

#[test]
fn empty_input_renders_explicit_empty_state() {
    let (doc, chart) = mounted(&[]);
    let f = chart.frame();
    assert_eq!(f.state, DrawState::Empty);
    assert!(f.area.is_empty());
    assert_eq!(f.y_domain, (0.0, 1.0));
    assert_eq!(f.x_domain, (SurveyTime::from_millis(0), SurveyTime::from_millis(86_400_000)));

    let mount = doc.mount("area-chart").unwrap();
    let path = doc.select_class(mount, "area").unwrap();
    assert_eq!(doc.attr(path, "d"), Some(""));
    // Axes still render against the fallback domains.
    assert!(!f.y_ticks.is_empty());
}

#[test]
fn single_date_is_centered() {
    let (_doc, chart) = mounted(&[5, 5, 5, 5]);
    let f = chart.frame();
    assert_eq!(chart.display_data().len(), 1);
    assert_eq!(chart.display_data()[0].count, 4);
    assert_eq!(f.x_domain, (day(5), day(5)));
    assert_eq!(f.area.to_svg(), "M300,0L300,180Z");
    assert!(f.x_ticks.is_empty());
}

#[test]
fn redraws_replace_rather_than_accumulate() {
    let (mut doc, mut chart) = mounted(&[1, 2, 3]);
    let before = chart.to_svg(&doc);
    chart.wrangle_data(&mut doc);
    chart.wrangle_data(&mut doc);
    assert_eq!(chart.to_svg(&doc), before);

    let mount = doc.mount("area-chart").unwrap();
    assert_eq!(doc.select_all_tag(mount, "linearGradient").len(), 1);
    assert_eq!(doc.select_all_class(mount, "area").len(), 1);
}

#[test]
fn set_data_recomputes_everything() {
    let (mut doc, mut chart) = mounted(&[1, 2]);
    let frame = chart.set_data(&mut doc, records(&[10, 10, 10, 20])).clone();
    assert_eq!(frame.x_domain, (day(10), day(20)));
    assert_eq!(frame.y_domain, (0.0, 3.0));
    assert_eq!(chart.data().len(), 4);

    let frame = chart.set_data(&mut doc, Vec::new()).clone();
    assert_eq!(frame.state, DrawState::Empty);
}

#[test]
fn brush_reports_dates_without_filtering() {
    let (mut doc, mut chart) = mounted(&[1, 1, 2, 3]);
    let seen: Rc<RefCell<Vec<(SurveyTime, SurveyTime)>>> = Rc::default();
    let sink = Rc::clone(&seen);
    chart.on_range_select(move |a, b| sink.borrow_mut().push((a, b)));

    let display_before = chart.display_data().to_vec();
    let range = chart.brush_move(&mut doc, Some((300.0, 600.0)));
    assert_eq!(range, Some((day(2), day(3))));
    assert_eq!(*seen.borrow(), vec![(day(2), day(3))]);
    assert_eq!(chart.frame().brush, Some((300.0, 600.0)));
    assert_eq!(chart.display_data(), display_before.as_slice());

    assert_eq!(chart.brush_move(&mut doc, None), None);
    assert_eq!(chart.frame().brush, None);
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn default_brush_hook_is_inert() {
    let (mut doc, mut chart) = mounted(&[1, 3]);
    let range = chart.brush_move(&mut doc, Some((0.0, 300.0)));
    assert_eq!(range, Some((day(1), day(2))));
    assert_eq!(chart.display_data().len(), 2);
}

#[test]
fn custom_config_changes_layout() {
    let mut doc = Document::with_mount_points(["c"]);
    let config = ChartConfig { width: 300, height: 100, curve: Curve::Linear, ..ChartConfig::default() };
    let chart = AreaChart::with_config(&mut doc, "c", records(&[1, 1, 2, 3]), config).unwrap();
    assert_eq!(chart.frame().area.to_svg(), "M0,0L150,50L300,50L300,100L150,100L0,100Z");
    assert_eq!((chart.frame().outer_width, chart.frame().outer_height), (370, 150));
    assert_eq!(chart.mount_id(), "c");
    assert_eq!(chart.config().curve, Curve::Linear);
    assert_eq!(chart.config().outer_width(), 370);
}

#[test]
fn epoch_millis_at_i64_limits_draw_without_overflow() {
    let mut doc = Document::with_mount_points(["area-chart"]);
    let wide = format!(r#"[{{"survey": {}}}, {{"survey": {}}}]"#, i64::MIN, i64::MAX);
    let chart = AreaChart::from_json(&mut doc, "area-chart", &wide).expect("mount");
    let f = chart.frame();
    assert_eq!(f.state, DrawState::Rendered { points: 2 });
    assert_eq!(f.x_domain, (SurveyTime::from_millis(i64::MIN), SurveyTime::from_millis(i64::MAX)));
    assert!(f.x_ticks.is_empty());

    let mut doc = Document::with_mount_points(["area-chart"]);
    let narrow = format!(r#"[{{"survey": {}}}, {{"survey": {}}}]"#, i64::MAX - 5, i64::MAX);
    let chart = AreaChart::from_json(&mut doc, "area-chart", &narrow).expect("mount");
    let ticks = &chart.frame().x_ticks;
    assert_eq!(ticks.len(), 6);
    assert_eq!(ticks.last().map(|t| t.label.clone()), Some(i64::MAX.to_string()));
}

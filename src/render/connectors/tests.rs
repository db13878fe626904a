// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;

use super::{draw_connectors, pair_connectors, pair_count, plan_connectors, Overlay};
use crate::layout::{
    build_rows, layout_columns, LayoutOptions, MeasuredSpans, RowLayout, SpanMeasure, Unmounted,
    Viewport,
};
use crate::model::fixtures::{self, repeated};
use crate::model::{AnnotatedDocument, Category, DocumentId, Point, Rect, Side, SpanRef};

fn terminal_layout(rows: &RowLayout) -> crate::layout::ColumnsLayout {
    layout_columns(rows, LayoutOptions::default(), Viewport::new(90, 40))
}

fn one_block_pair(
    category: Category,
    left_count: usize,
    right_count: usize,
) -> (AnnotatedDocument, AnnotatedDocument) {
    let left = AnnotatedDocument::new(
        DocumentId::new("left").expect("id"),
        vec![repeated(category, left_count)],
    );
    let right = AnnotatedDocument::new(
        DocumentId::new("right").expect("id"),
        vec![repeated(category, right_count)],
    );
    (left, right)
}

#[rstest]
#[case(0, 0)]
#[case(0, 3)]
#[case(1, 1)]
#[case(2, 1)]
#[case(1, 4)]
#[case(3, 3)]
fn connector_count_is_the_shorter_side(#[case] left_count: usize, #[case] right_count: usize) {
    let (left, right) = one_block_pair(Category::Weakness, left_count, right_count);
    let rows = build_rows(&left, &right);

    let pairs = pair_connectors(&rows);
    assert_eq!(pairs.len(), left_count.min(right_count));
    assert_eq!(pair_count(&rows.rows()[0], Category::Weakness), pairs.len());
    for (k, pair) in pairs.iter().enumerate() {
        assert_eq!(pair.left(), SpanRef::new(0, Side::Left, k));
        assert_eq!(pair.right(), SpanRef::new(0, Side::Right, k));
    }
}

#[test]
fn pairs_never_cross_categories_or_rows() {
    let (left, right) = fixtures::mixed_pair();
    let rows = build_rows(&left, &right);

    let pairs = pair_connectors(&rows);
    assert_eq!(pairs.len(), 4);
    for pair in &pairs {
        assert_eq!(pair.left().row(), pair.right().row());
        let l = rows.span(pair.left()).expect("left span");
        let r = rows.span(pair.right()).expect("right span");
        assert_eq!(l.category(), pair.category());
        assert_eq!(r.category(), pair.category());
    }
}

#[test]
fn pairs_follow_category_order_within_a_row() {
    let (left, right) = fixtures::mixed_pair();
    let rows = build_rows(&left, &right);

    let categories = pair_connectors(&rows)
        .iter()
        .map(|pair| (pair.left().row(), pair.category()))
        .collect::<Vec<_>>();
    assert_eq!(
        categories,
        vec![
            (0, Category::Method),
            (0, Category::Ethics),
            (1, Category::Evaluation),
            (1, Category::Application),
        ]
    );
}

#[test]
fn kth_occurrence_pairs_with_kth_even_when_other_categories_interleave() {
    let (left, right) = fixtures::mixed_pair();
    let rows = build_rows(&left, &right);

    let method = pair_connectors(&rows)
        .into_iter()
        .find(|pair| pair.category() == Category::Method)
        .expect("method pair");
    // Left row 0 is Method, Ethics, Method; the first Method is span 0.
    assert_eq!(method.left(), SpanRef::new(0, Side::Left, 0));
    assert_eq!(method.right(), SpanRef::new(0, Side::Right, 0));
    assert_eq!(pair_count(&rows.rows()[0], Category::Method), 1);
}

#[test]
fn scenario_a_draws_one_strength_connector_in_the_first_row() {
    let (left, right) = fixtures::scenario_a();
    let rows = build_rows(&left, &right);
    let layout = terminal_layout(&rows);
    let mut overlay = Overlay::new();

    let drawn = draw_connectors(Some(&rows), true, &layout, &mut overlay);

    assert_eq!(drawn, 1);
    let path = &overlay.paths()[0];
    assert_eq!(path.category(), Category::Strength);
    assert_eq!(path.pair().left(), SpanRef::new(0, Side::Left, 0));
    assert_eq!(path.pair().right(), SpanRef::new(0, Side::Right, 0));
}

#[test]
fn scenario_b_draws_nothing() {
    let (left, right) = fixtures::scenario_b();
    let rows = build_rows(&left, &right);
    let layout = terminal_layout(&rows);
    let mut overlay = Overlay::new();

    assert_eq!(draw_connectors(Some(&rows), true, &layout, &mut overlay), 0);
    assert!(overlay.is_empty());
}

#[test]
fn scenario_c_links_first_example_only() {
    let (left, right) = fixtures::scenario_c();
    let rows = build_rows(&left, &right);
    let layout = terminal_layout(&rows);
    let mut overlay = Overlay::new();

    assert_eq!(draw_connectors(Some(&rows), true, &layout, &mut overlay), 1);
    let path = &overlay.paths()[0];
    assert_eq!(path.pair().left(), SpanRef::new(0, Side::Left, 0));
    assert_eq!(path.pair().right(), SpanRef::new(0, Side::Right, 0));
    assert_eq!(path.category(), Category::Example);
}

#[test]
fn scenario_d_redraw_tracks_new_geometry_without_changing_pairs() {
    let (left, right) = fixtures::mixed_pair();
    let rows = build_rows(&left, &right);
    let mut overlay = Overlay::new();

    let wide = layout_columns(&rows, LayoutOptions::default(), Viewport::new(120, 40));
    draw_connectors(Some(&rows), true, &wide, &mut overlay);
    let before = overlay.clone();

    let narrow = layout_columns(
        &rows,
        LayoutOptions::default().fit_width(40),
        Viewport::new(40, 40),
    );
    draw_connectors(Some(&rows), true, &narrow, &mut overlay);

    assert_eq!(overlay.len(), before.len());
    for (a, b) in before.paths().iter().zip(overlay.paths()) {
        assert_eq!(a.pair(), b.pair());
    }
    assert_ne!(before.paths()[0].to(), overlay.paths()[0].to());
}

#[test]
fn endpoints_are_edge_midpoints_relative_to_overlay() {
    let (left, right) = fixtures::scenario_a();
    let rows = build_rows(&left, &right);
    let measure = MeasuredSpans::new(Rect::new(100.0, 50.0, 500.0, 400.0))
        .with_span(SpanRef::new(0, Side::Left, 0), Rect::new(120.0, 60.0, 80.0, 20.0))
        .with_span(SpanRef::new(0, Side::Right, 0), Rect::new(400.0, 100.0, 60.0, 20.0));
    let mut overlay = Overlay::new();

    draw_connectors(Some(&rows), true, &measure, &mut overlay);

    let path = &overlay.paths()[0];
    assert_eq!(path.from(), Point::new(100.0, 20.0));
    assert_eq!(path.to(), Point::new(300.0, 60.0));
    assert_eq!(path.mid_x(), 200.0);
    assert_eq!(path.control_points(), (Point::new(200.0, 20.0), Point::new(200.0, 60.0)));
    assert_eq!(path.path_d(), "M 100 20 C 200 20, 200 60, 300 60");
    assert_eq!(overlay.bounds(), Some(Rect::new(100.0, 50.0, 500.0, 400.0)));
}

#[test]
fn curve_passes_through_its_midpoint_and_endpoints() {
    let (left, right) = fixtures::scenario_a();
    let rows = build_rows(&left, &right);
    let measure = MeasuredSpans::new(Rect::ZERO)
        .with_span(SpanRef::new(0, Side::Left, 0), Rect::new(0.0, 0.0, 10.0, 4.0))
        .with_span(SpanRef::new(0, Side::Right, 0), Rect::new(30.0, 8.0, 10.0, 4.0));
    let (_, paths) = plan_connectors(&rows, &measure).expect("overlay");
    let path = &paths[0];

    assert_eq!(path.point_at(0.0), path.from());
    assert_eq!(path.point_at(1.0), path.to());
    // Symmetric S-curve: halfway sits exactly between the endpoints.
    assert_eq!(path.point_at(0.5), Point::new(20.0, 6.0));
}

#[test]
fn fractional_coordinates_are_rounded_in_path_data() {
    let (left, right) = fixtures::scenario_a();
    let rows = build_rows(&left, &right);
    let measure = MeasuredSpans::new(Rect::ZERO)
        .with_span(SpanRef::new(0, Side::Left, 0), Rect::new(0.0, 0.0, 10.1, 1.0 / 3.0))
        .with_span(SpanRef::new(0, Side::Right, 0), Rect::new(20.0, 1.0, 4.0, 1.0));
    let (_, paths) = plan_connectors(&rows, &measure).expect("overlay");

    assert_eq!(paths[0].path_d(), "M 10.1 0.17 C 15.05 0.17, 15.05 1.5, 20 1.5");
}

#[test]
fn disabled_connectors_clear_the_overlay() {
    let (left, right) = fixtures::mixed_pair();
    let rows = build_rows(&left, &right);
    let layout = terminal_layout(&rows);
    let mut overlay = Overlay::new();

    assert_eq!(draw_connectors(Some(&rows), true, &layout, &mut overlay), 4);
    assert_eq!(draw_connectors(Some(&rows), false, &layout, &mut overlay), 0);
    assert!(overlay.is_empty());
    assert_eq!(overlay.bounds(), None);
}

#[test]
fn drawing_twice_replaces_instead_of_accumulating() {
    let (left, right) = fixtures::mixed_pair();
    let rows = build_rows(&left, &right);
    let layout = terminal_layout(&rows);
    let mut overlay = Overlay::new();

    draw_connectors(Some(&rows), true, &layout, &mut overlay);
    let first = overlay.clone();
    draw_connectors(Some(&rows), true, &layout, &mut overlay);

    assert_eq!(overlay, first);
}

#[test]
fn missing_rows_or_overlay_surface_is_a_silent_no_op() {
    let (left, right) = fixtures::scenario_a();
    let rows = build_rows(&left, &right);
    let layout = terminal_layout(&rows);
    let mut overlay = Overlay::new();

    draw_connectors(Some(&rows), true, &layout, &mut overlay);
    assert_eq!(overlay.len(), 1);

    assert_eq!(draw_connectors(None, true, &layout, &mut overlay), 0);
    assert!(overlay.is_empty());

    assert_eq!(draw_connectors(Some(&rows), true, &Unmounted, &mut overlay), 0);
    assert!(overlay.is_empty());
    assert!(plan_connectors(&rows, &MeasuredSpans::without_overlay()).is_none());
}

#[test]
fn unmeasured_spans_fall_back_to_zero_rect() {
    let (left, right) = fixtures::scenario_a();
    let rows = build_rows(&left, &right);
    let measure = MeasuredSpans::new(Rect::new(5.0, 5.0, 100.0, 100.0))
        .with_span(SpanRef::new(0, Side::Right, 0), Rect::new(50.0, 10.0, 10.0, 2.0));
    let mut overlay = Overlay::new();

    assert_eq!(draw_connectors(Some(&rows), true, &measure, &mut overlay), 1);
    assert_eq!(overlay.paths()[0].from(), Point::new(-5.0, -5.0));
    assert_eq!(overlay.paths()[0].to(), Point::new(45.0, 6.0));
}

#[test]
fn connectors_run_from_left_column_edge_into_right_column() {
    let (left, right) = fixtures::mixed_pair();
    let rows = build_rows(&left, &right);
    let layout = terminal_layout(&rows);
    let gutter_start = layout.options().column_width as f64;
    let right_x = layout.options().column_x(Side::Right) as f64;

    let (_, paths) = plan_connectors(&rows, &layout).expect("overlay");
    for path in &paths {
        assert!(path.from().x <= gutter_start, "{:?}", path.from());
        assert!(path.to().x >= right_x, "{:?}", path.to());
        let left = layout.measure_span(path.pair().left()).expect("left");
        assert_eq!(path.from().y, left.middle_y() - layout.container_rect().top);
    }
}

#[test]
fn svg_lists_one_path_per_connector_with_category_class() {
    let (left, right) = fixtures::scenario_a();
    let rows = build_rows(&left, &right);
    let measure = MeasuredSpans::new(Rect::new(100.0, 50.0, 500.0, 400.0))
        .with_span(SpanRef::new(0, Side::Left, 0), Rect::new(120.0, 60.0, 80.0, 20.0))
        .with_span(SpanRef::new(0, Side::Right, 0), Rect::new(400.0, 100.0, 60.0, 20.0));
    let mut overlay = Overlay::new();
    draw_connectors(Some(&rows), true, &measure, &mut overlay);

    assert_eq!(
        overlay.to_svg(),
        concat!(
            r#"<svg class="sbs-overlay" width="500" height="400" aria-hidden="true">"#,
            r#"<path class="sbs-path strength" data-left="r0:left:s0" data-right="r0:right:s0" "#,
            r#"d="M 100 20 C 200 20, 200 60, 300 60"/>"#,
            "</svg>",
        )
    );

    overlay.clear();
    assert_eq!(
        overlay.to_svg(),
        r#"<svg class="sbs-overlay" width="0" height="0" aria-hidden="true"></svg>"#
    );
}

//! End-to-end tests driving charts through a surface and the mock backend.

use std::sync::Arc;

use graph_renderer::*;
use graph_renderer_host::*;
use parking_lot::Mutex;

// ============================================================================
// Helpers
// ============================================================================

const FRAME_MS: f64 = 16.0;
const RATIO: f32 = 2.0;

type Surface = ChartSurface<BarChart<&'static str>, MockBackend>;
type Recorder = Arc<Mutex<RecordingListener<&'static str>>>;

fn entities() -> Vec<ChartEntity<&'static str>> {
    vec![
        ChartEntity::new("a", 10.0),
        ChartEntity::new("b", 30.0),
        ChartEntity::new("c", 3.0),
        ChartEntity::new("d", 0.0),
        ChartEntity::new("e", 18.0),
    ]
}

fn options() -> BarChartOptions {
    BarChartOptions::default()
        .with_layout(
            BarChartLayout::default()
                .with_entity(BarLayoutConfig::default().with_gap(10.0).with_min_size(5.0, 1.0)),
        )
        .with_max_entities(8)
}

/// A 250x250 CSS canvas at a pixel ratio of 2, attached to `backend`.
fn surface_with(backend: MockBackend) -> Surface {
    let chart = BarChart::new(&entities(), 500.0, 500.0, options()).unwrap();
    let mut surface = ChartSurface::new(chart, backend, RATIO);
    surface.attach().unwrap();
    surface
}

fn recorder(surface: &mut Surface) -> Recorder {
    let recorder: Recorder = Arc::new(Mutex::new(RecordingListener::default()));
    surface.set_listener(recorder.clone());
    recorder
}

/// Run frames until nothing animates. Returns the next timestamp.
fn settle(surface: &mut Surface, start: f64) -> f64 {
    let mut now = start;
    let mut frames = 0;
    while surface.frame(now).unwrap().is_animating() {
        now += FRAME_MS;
        frames += 1;
        assert!(frames < 1000, "surface never settled");
    }
    now + FRAME_MS
}

/// Center of bar `index` in CSS pixels.
fn css_center(surface: &Surface, index: usize) -> (f64, f64) {
    let center = surface.chart().entity_rect_at(index).unwrap().center() / RATIO;
    (center.x as f64, center.y as f64)
}

// ============================================================================
// Attach and draw
// ============================================================================

#[test]
fn test_frame_before_attach_fails() {
    let chart = BarChart::new(&entities(), 500.0, 500.0, options()).unwrap();
    let mock = MockBackend::new();
    let mut surface = ChartSurface::new(chart, mock.clone(), RATIO);

    assert_eq!(surface.frame(0.0), Err(HostError::NotAttached));
    assert_eq!(mock.count_uploads(), 0);
    assert_eq!(mock.count_draws(), 0);
}

#[test]
fn test_attach_allocates_once() {
    let mock = MockBackend::new();
    let mut surface = surface_with(mock.clone());

    assert_eq!(
        surface.attach(),
        Err(HostError::Chart(ChartError::AlreadyBound))
    );
    assert_eq!(mock.count_allocations(), 1);

    let allocated = mock.allocated().unwrap();
    assert_eq!(allocated.entity_positions, 8 * VERTICES_PER_QUAD * 2);
    assert_eq!(allocated.entity_colors, 8 * VERTICES_PER_QUAD * 4);
}

#[test]
fn test_first_frame_uploads_and_draws() {
    let mock = MockBackend::new();
    let mut surface = surface_with(mock.clone());

    let outcome = surface.frame(0.0).unwrap();
    assert_eq!(outcome, FrameOutcome::Rendered { animating: true });

    let chart = surface.chart();
    assert_eq!(mock.last_draw(DrawGroup::Entities), Some(5 * VERTICES_PER_QUAD));
    assert_eq!(
        mock.last_draw(DrawGroup::General),
        Some(chart.general_vertex_positions().len() / 2)
    );
    assert_eq!(mock.last_draw(DrawGroup::Lines), None);
    assert_eq!(mock.last_corner_radius(), Some(chart.corner_radius()));
    assert_eq!(
        mock.uploaded_floats(BufferKind::EntityPositions),
        chart.entity_vertex_positions()
    );
    assert_eq!(
        mock.uploaded_floats(BufferKind::EntityRelative),
        chart.relative_positions()
    );
}

#[test]
fn test_settled_surface_is_idle() {
    let mock = MockBackend::new();
    let mut surface = surface_with(mock.clone());
    let now = settle(&mut surface, 0.0);

    mock.clear_calls();
    assert_eq!(surface.frame(now).unwrap(), FrameOutcome::Idle);
    assert_eq!(surface.frame(now + FRAME_MS).unwrap(), FrameOutcome::Idle);
    assert!(mock.calls().is_empty());
}

#[test]
fn test_overflowing_buffer_skips_draw() {
    let mock = MockBackend::new().with_limit(BufferKind::EntityPositions, 12);
    let mut surface = surface_with(mock.clone());

    let outcome = surface.frame(0.0).unwrap();
    match outcome {
        FrameOutcome::Skipped { animating, reason } => {
            assert!(animating);
            assert_eq!(
                reason,
                HostError::BufferOverflow {
                    kind: BufferKind::EntityPositions,
                    len: 5 * VERTICES_PER_QUAD * 2,
                    capacity: 12,
                }
            );
        }
        other => panic!("expected a skipped frame, got {:?}", other),
    }
    assert_eq!(mock.count_uploads(), 0);
    assert_eq!(mock.count_draws(), 0);
}

// ============================================================================
// Input and sizing
// ============================================================================

#[test]
fn test_resize_takes_css_pixels() {
    let mut surface = surface_with(MockBackend::new());
    surface.resize(300.0, 200.0).unwrap();
    assert_eq!(surface.chart().size(), Vec2::new(600.0, 400.0));
    assert_eq!(surface.css_size(), Vec2::new(300.0, 200.0));
    assert!(surface.chart().is_layout_dirty());

    let err = surface.resize(0.25, 100.0).unwrap_err();
    assert!(matches!(
        err,
        HostError::Chart(ChartError::InvalidDimensions { .. })
    ));
    assert_eq!(surface.chart().size(), Vec2::new(600.0, 400.0));
}

#[test]
fn test_pixel_ratio_change_keeps_css_size() {
    let mut surface = surface_with(MockBackend::new());
    surface.set_device_pixel_ratio(1.0).unwrap();
    assert_eq!(surface.chart().size(), Vec2::new(250.0, 250.0));
    assert_eq!(surface.css_size(), Vec2::new(250.0, 250.0));
}

#[test]
fn test_invalid_pixel_ratio_falls_back_to_one() {
    let chart = BarChart::new(&entities(), 500.0, 500.0, options()).unwrap();
    let surface = ChartSurface::new(chart, MockBackend::new(), f32::NAN);
    assert_eq!(surface.device_pixel_ratio(), 1.0);
}

#[test]
fn test_pointer_scaled_to_device_pixels() {
    let mut surface = surface_with(MockBackend::new());
    let now = settle(&mut surface, 0.0);

    let (x, y) = css_center(&surface, 1);
    surface.pointer_move(x, y);
    let state = surface.pointer().state();
    assert_eq!(state.x, x * 2.0);
    assert_eq!(state.y, y * 2.0);

    assert!(surface.frame(now).unwrap().is_animating());
    assert_eq!(surface.chart().hovered_index(), Some(1));
}

#[test]
fn test_rejected_data_update_reports_chart_error() {
    let mut surface = surface_with(MockBackend::new());
    let too_many: Vec<_> = (0..9).map(|_| ChartEntity::new("x", 1.0)).collect();
    assert_eq!(
        surface.update_data(&too_many, 0.0),
        Err(HostError::Chart(ChartError::CapacityExceeded {
            requested: 9,
            capacity: 8,
        }))
    );
    assert_eq!(surface.chart().entities().len(), 5);
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn test_layout_notifications_in_css_pixels() {
    let mut surface = surface_with(MockBackend::new());
    let recorder = recorder(&mut surface);
    let now = settle(&mut surface, 0.0);

    {
        let recorded = recorder.lock();
        // Only the first frame recomputed the layout.
        assert_eq!(recorded.labels.len(), 1);
        assert_eq!(recorded.value_axis.len(), 1);

        let labels = &recorded.labels[0];
        assert_eq!(labels.len(), 5);
        let device = surface.chart().label_slot_at(1).unwrap();
        assert_eq!(labels[1].label, "b");
        assert_eq!(labels[1].slot.x, device.x / RATIO);
        assert_eq!(labels[1].slot.width, device.width / RATIO);

        let axis = &recorded.value_axis[0];
        assert_eq!(axis.len(), surface.chart().scale_line_count());
        assert_eq!(axis[0].value, 0.0);
        let device = surface.chart().value_axis_label_at(0).unwrap();
        assert_eq!(axis[0].y, device.y / RATIO);
    }

    surface.resize(300.0, 250.0).unwrap();
    settle(&mut surface, now);
    assert_eq!(recorder.lock().labels.len(), 2);
}

#[test]
fn test_hover_notifications() {
    let mut surface = surface_with(MockBackend::new());
    let recorder = recorder(&mut surface);
    let now = settle(&mut surface, 0.0);

    let (x, y) = css_center(&surface, 1);
    surface.pointer_move(x, y);
    let now = settle(&mut surface, now);

    {
        let recorded = recorder.lock();
        assert_eq!(recorded.hovers.len(), 1);
        let hover = recorded.hovers[0].as_ref().unwrap();
        assert_eq!(hover.index, 1);
        assert_eq!(hover.label, "b");
        assert_eq!(hover.value, 30.0);
        let rest = surface.chart().entity_rect_at(1).unwrap().scaled_down(RATIO);
        assert_eq!(hover.rect, rest);
    }

    // Moving within the same bar sends nothing new.
    surface.pointer_move(x + 1.0, y);
    let now = settle(&mut surface, now);
    assert_eq!(recorder.lock().hovers.len(), 1);

    surface.pointer_leave();
    settle(&mut surface, now);
    let recorded = recorder.lock();
    assert_eq!(recorded.hovers.len(), 2);
    assert!(recorded.hovers[1].is_none());
}

#[test]
fn test_click_selects_and_empty_click_clears() {
    let mut surface = surface_with(MockBackend::new());
    let recorder = recorder(&mut surface);
    let now = settle(&mut surface, 0.0);

    let (x, y) = css_center(&surface, 1);
    surface.pointer_down(x, y);
    surface.pointer_up();
    let now = settle(&mut surface, now);

    assert_eq!(surface.chart().selected_index(), Some(1));
    {
        let recorded = recorder.lock();
        assert_eq!(recorded.selections.len(), 1);
        let selection = recorded.selections[0].as_ref().unwrap();
        assert_eq!(selection.index, 1);
        assert_eq!(selection.label, "b");
        assert_eq!(selection.value, 30.0);
    }

    // Above bar "d" (value 0) is empty plot space.
    let (x, _) = css_center(&surface, 3);
    surface.pointer_down(x, 2.0);
    surface.pointer_up();
    settle(&mut surface, now);

    assert_eq!(surface.chart().selected_index(), None);
    let recorded = recorder.lock();
    assert_eq!(recorded.selections.len(), 2);
    assert!(recorded.selections[1].is_none());
}

// ============================================================================
// Line charts
// ============================================================================

#[test]
fn test_line_chart_draws_segments() {
    let data: Vec<_> = [4.0, 8.0, 2.0]
        .iter()
        .map(|v| ChartEntity::new(*v as u32, *v))
        .collect();
    let chart = LineChart::new(&data, 300.0, 200.0, LineChartOptions::default()).unwrap();
    let mock = MockBackend::new();
    let mut surface = ChartSurface::new(chart, mock.clone(), 1.0);
    surface.attach().unwrap();
    surface.frame(0.0).unwrap();

    let vertices = surface.chart().line_vertex_positions().len() / 2;
    assert_eq!(vertices, 2 * VERTICES_PER_QUAD);
    assert_eq!(mock.last_draw(DrawGroup::Lines), Some(vertices));
    assert_eq!(mock.last_draw(DrawGroup::Entities), Some(3 * VERTICES_PER_QUAD));
    assert_eq!(
        mock.uploaded_floats(BufferKind::LineColors).len(),
        2 * VERTICES_PER_QUAD * 4
    );
}

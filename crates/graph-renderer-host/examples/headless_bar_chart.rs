//! Headless bar chart: drives a chart through the mock backend and prints
//! what a real host would draw and show.
//!
//! Run with `RUST_LOG=debug` for the engine's logs.

use graph_renderer::{BarChart, BarChartOptions, ChartEngine, ChartEntity};
use graph_renderer_host::{
    ChartListener, ChartSurface, HoverInfo, LabelLayout, MockBackend, SelectionInfo, logging,
};

struct PrintListener;

impl ChartListener<&'static str> for PrintListener {
    fn on_selection_change(&mut self, selection: Option<&SelectionInfo<&'static str>>) {
        match selection {
            Some(info) => tracing::info!("Selected {} = {}", info.label, info.value),
            None => tracing::info!("Selection cleared"),
        }
    }

    fn on_hover(&mut self, hover: Option<&HoverInfo<&'static str>>) {
        if let Some(info) = hover {
            tracing::info!(
                "Tooltip for {} at ({:.1}, {:.1})",
                info.label,
                info.rect.x,
                info.rect.y
            );
        }
    }

    fn on_labels_layout(&mut self, labels: &[LabelLayout<&'static str>]) {
        for layout in labels {
            tracing::info!("Label {} at x={:.1}", layout.label, layout.slot.x);
        }
    }
}

type Surface = ChartSurface<BarChart<&'static str>, MockBackend>;

/// Run frames until the chart stops animating. Returns the frame count.
fn run_until_idle(surface: &mut Surface, now: &mut f64) -> usize {
    let mut frames = 0;
    loop {
        match surface.frame(*now) {
            Ok(outcome) if outcome.is_animating() => frames += 1,
            Ok(_) => break,
            Err(err) => {
                tracing::error!("Frame failed: {}", err);
                break;
            }
        }
        *now += 16.0;
    }
    frames
}

fn main() {
    logging::init();

    let data = [
        ChartEntity::new("mon", 12.0),
        ChartEntity::new("tue", 30.0),
        ChartEntity::new("wed", 7.0),
        ChartEntity::new("thu", 21.0),
        ChartEntity::new("fri", 16.0),
    ];

    let ratio = 2.0;
    let (css_width, css_height) = (400.0, 300.0);
    let chart = match BarChart::new(
        &data,
        css_width * ratio,
        css_height * ratio,
        BarChartOptions::default(),
    ) {
        Ok(chart) => chart,
        Err(err) => {
            tracing::error!("Failed to create chart: {}", err);
            return;
        }
    };

    let mock = MockBackend::new();
    let mut surface = ChartSurface::new(chart, mock.clone(), ratio);
    surface.set_listener(PrintListener);
    if let Err(err) = surface.attach() {
        tracing::error!("Failed to attach: {}", err);
        return;
    }

    let mut now = 0.0;
    let frames = run_until_idle(&mut surface, &mut now);
    tracing::info!("Grow-in took {} frames", frames);

    // Hover and click the tallest bar.
    if let Some(rect) = surface.chart().entity_rect_at(1) {
        let center = rect.center() / ratio;
        surface.pointer_move(center.x as f64, center.y as f64);
        surface.pointer_down(center.x as f64, center.y as f64);
        surface.pointer_up();
    }
    run_until_idle(&mut surface, &mut now);

    let updated = [
        ChartEntity::new("mon", 12.0),
        ChartEntity::new("tue", 8.0),
        ChartEntity::new("wed", 40.0),
        ChartEntity::new("thu", 21.0),
        ChartEntity::new("fri", 16.0),
        ChartEntity::new("sat", 25.0),
    ];
    if let Err(err) = surface.update_data(&updated, now) {
        tracing::error!("Update rejected: {}", err);
    }
    let frames = run_until_idle(&mut surface, &mut now);
    tracing::info!("Update took {} frames", frames);

    tracing::info!(
        "Backend saw {} uploads and {} draws",
        mock.count_uploads(),
        mock.count_draws()
    );
}

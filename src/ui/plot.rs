use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{Corner, Legend, Line, Plot, PlotPoint, PlotPoints, Polygon, Text};

use sa3_radar::chart::{geometry, ChartSpec};
use sa3_radar::color::Rgb8;

const PLOT_HEIGHT: f32 = 460.0;
/// Axis labels sit just outside the outer ring.
const LABEL_RADIUS: f64 = 1.08;

fn color32(rgb: Rgb8) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

// ---------------------------------------------------------------------------
// Radar plot (central panel)
// ---------------------------------------------------------------------------

/// Render the radar chart: polar grid, axis labels, one filled polygon per
/// region.
pub fn radar_plot(ui: &mut Ui, chart: &ChartSpec) {
    ui.label(RichText::new(&chart.title).strong().size(16.0));

    let radial = chart.radial_axis;
    let n = chart.axis_count();
    let grid = ui.visuals().weak_text_color();

    let mut plot = Plot::new("radar_plot")
        .height(PLOT_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.6)
        .include_x(1.6)
        .include_y(-1.2)
        .include_y(1.2);
    if chart.show_legend {
        plot = plot.legend(Legend::default().position(Corner::RightTop));
    }

    plot.show(ui, |plot_ui| {
        for level in chart.ring_levels() {
            let ring: PlotPoints = geometry::ring(level, &radial).into_iter().collect();
            plot_ui.line(Line::new(ring).color(grid).width(0.5));
        }
        for axis in 0..n {
            let spoke: PlotPoints = vec![[0.0, 0.0], geometry::spoke_end(axis, n)]
                .into_iter()
                .collect();
            plot_ui.line(Line::new(spoke).color(grid).width(0.5));
        }

        if radial.visible {
            for level in chart.ring_levels() {
                let r = geometry::radius(level, &radial);
                plot_ui.text(
                    Text::new(PlotPoint::new(r, 0.0), format!("{level}"))
                        .color(grid)
                        .anchor(Align2::LEFT_BOTTOM),
                );
            }
        }

        for (axis, label) in chart.axes.iter().enumerate() {
            let [x, y] = geometry::spoke_end(axis, n);
            let anchor = if x > 0.3 {
                Align2::LEFT_CENTER
            } else if x < -0.3 {
                Align2::RIGHT_CENTER
            } else if y > 0.0 {
                Align2::CENTER_BOTTOM
            } else {
                Align2::CENTER_TOP
            };
            plot_ui.text(
                Text::new(PlotPoint::new(x * LABEL_RADIUS, y * LABEL_RADIUS), *label)
                    .anchor(anchor),
            );
        }

        for trace in &chart.traces {
            let color = color32(trace.color);
            let outline: PlotPoints = trace.outline(&radial).into_iter().collect();
            let fill = if trace.fill {
                color.gamma_multiply(0.35)
            } else {
                Color32::TRANSPARENT
            };
            plot_ui.polygon(
                Polygon::new(outline)
                    .name(&trace.name)
                    .stroke(Stroke::new(2.0, color))
                    .fill_color(fill),
            );
        }
    });
}

use anyhow::{Context, Result};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Polygon,
    Rgb,
};

use crate::chart::{geometry, ChartSpec};
use crate::color::{lighten, Rgb8};

// A4 landscape, millimetres.
const PAGE_W: f32 = 297.0;
const PAGE_H: f32 = 210.0;
const CENTRE: (f32, f32) = (125.0, 98.0);
const RADIUS: f32 = 68.0;
const LEGEND_X: f32 = 228.0;
const LEGEND_TOP: f32 = 170.0;
const LEGEND_BOTTOM: f32 = 12.0;
const LEGEND_RIGHT: f32 = PAGE_W - 8.0;

const TITLE_PT: f32 = 18.0;
const LABEL_PT: f32 = 9.0;
const TICK_PT: f32 = 7.0;

const GRID: Rgb8 = [200, 200, 200];
const INK: Rgb8 = [40, 40, 40];

/// Render the chart onto a single vector PDF page.
pub fn encode(chart: &ChartSpec) -> Result<Vec<u8>> {
    let (doc, page, layer) =
        PdfDocument::new(chart.title.as_str(), Mm(PAGE_W), Mm(PAGE_H), "chart");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .context("loading Helvetica")?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .context("loading Helvetica Bold")?;
    let layer = doc.get_page(page).get_layer(layer);

    set_fill(&layer, INK);
    layer.use_text(&chart.title, TITLE_PT, Mm(15.0), Mm(PAGE_H - 18.0), &bold);

    draw_grid(&layer, chart, &font);
    draw_traces(&layer, chart);
    if chart.show_legend {
        draw_legend(&layer, chart, &font);
    }

    doc.save_to_bytes().context("serializing PDF")
}

fn to_page(p: [f64; 2]) -> Point {
    Point::new(
        Mm(CENTRE.0 + p[0] as f32 * RADIUS),
        Mm(CENTRE.1 + p[1] as f32 * RADIUS),
    )
}

fn rgb(c: Rgb8) -> Color {
    Color::Rgb(Rgb::new(
        c[0] as f32 / 255.0,
        c[1] as f32 / 255.0,
        c[2] as f32 / 255.0,
        None,
    ))
}

fn set_fill(layer: &PdfLayerReference, c: Rgb8) {
    layer.set_fill_color(rgb(c));
}

fn set_stroke(layer: &PdfLayerReference, c: Rgb8, thickness: f32) {
    layer.set_outline_color(rgb(c));
    layer.set_outline_thickness(thickness);
}

fn polyline(points: &[[f64; 2]]) -> Line {
    Line {
        points: points.iter().map(|&p| (to_page(p), false)).collect(),
        is_closed: false,
    }
}

/// Rough Helvetica advance width, enough to centre short labels.
fn text_width_mm(text: &str, pt: f32) -> f32 {
    text.chars().count() as f32 * pt * 0.5 * 0.3528
}

fn draw_grid(layer: &PdfLayerReference, chart: &ChartSpec, font: &IndirectFontRef) {
    let radial = &chart.radial_axis;
    let n = chart.axis_count();

    set_stroke(layer, GRID, 0.5);
    for level in chart.ring_levels() {
        layer.add_line(polyline(&geometry::ring(level, radial)));
    }
    for axis in 0..n {
        layer.add_line(polyline(&[[0.0, 0.0], geometry::spoke_end(axis, n)]));
    }

    set_fill(layer, INK);
    if radial.visible {
        for level in chart.ring_levels() {
            let r = geometry::radius(level, radial) as f32 * RADIUS;
            layer.use_text(
                format!("{level}"),
                TICK_PT,
                Mm(CENTRE.0 + r + 1.0),
                Mm(CENTRE.1 + 1.0),
                font,
            );
        }
    }

    for (axis, label) in chart.axes.iter().enumerate() {
        let angle = geometry::axis_angle(axis, n);
        let (cos, sin) = (angle.cos() as f32, angle.sin() as f32);
        let x = CENTRE.0 + cos * (RADIUS + 5.0);
        let y = CENTRE.1 + sin * (RADIUS + 5.0) - LABEL_PT * 0.3528 / 2.0;
        let width = text_width_mm(label, LABEL_PT);
        let x = if cos > 0.3 {
            x
        } else if cos < -0.3 {
            x - width
        } else {
            x - width / 2.0
        };
        layer.use_text(*label, LABEL_PT, Mm(x), Mm(y), font);
    }
}

fn draw_traces(layer: &PdfLayerReference, chart: &ChartSpec) {
    for trace in &chart.traces {
        let ring: Vec<(Point, bool)> = trace
            .outline(&chart.radial_axis)
            .into_iter()
            .map(|p| (to_page(p), false))
            .collect();
        set_stroke(layer, trace.color, 1.2);
        let mode = if trace.fill {
            set_fill(layer, lighten(trace.color, 0.55));
            PaintMode::FillStroke
        } else {
            PaintMode::Stroke
        };
        layer.add_polygon(Polygon {
            rings: vec![ring],
            mode,
            winding_order: WindingOrder::NonZero,
        });
    }
}

const SWATCH: f32 = 4.0;
const LEGEND_STEP: f32 = 7.0;

/// Row spacing and label size for `n` legend entries. Both shrink so the
/// last entry stays above the bottom margin.
fn legend_metrics(n: usize) -> (f32, f32) {
    if n <= 1 {
        return (LEGEND_STEP, LABEL_PT);
    }
    let step = LEGEND_STEP.min((LEGEND_TOP - LEGEND_BOTTOM) / (n - 1) as f32);
    let pt = LABEL_PT.min(step / 0.3528 * 0.9).max(3.0);
    (step, pt)
}

/// Cut `name` so it fits in `max_mm` at `pt`, marking the cut with "...".
fn fit_label(name: &str, pt: f32, max_mm: f32) -> String {
    if text_width_mm(name, pt) <= max_mm {
        return name.to_string();
    }
    let mut label = name.to_string();
    while !label.is_empty() && text_width_mm(&format!("{label}..."), pt) > max_mm {
        label.pop();
    }
    format!("{}...", label.trim_end())
}

fn draw_legend(layer: &PdfLayerReference, chart: &ChartSpec, font: &IndirectFontRef) {
    let (step, pt) = legend_metrics(chart.traces.len());
    let swatch = SWATCH.min(step * 0.7);
    let text_x = LEGEND_X + swatch + 2.0;

    for (i, trace) in chart.traces.iter().enumerate() {
        let y = LEGEND_TOP - i as f32 * step;
        let square = vec![
            (Point::new(Mm(LEGEND_X), Mm(y)), false),
            (Point::new(Mm(LEGEND_X + swatch), Mm(y)), false),
            (Point::new(Mm(LEGEND_X + swatch), Mm(y + swatch)), false),
            (Point::new(Mm(LEGEND_X), Mm(y + swatch)), false),
        ];
        set_fill(layer, lighten(trace.color, 0.55));
        set_stroke(layer, trace.color, 0.8);
        layer.add_polygon(Polygon {
            rings: vec![square],
            mode: PaintMode::FillStroke,
            winding_order: WindingOrder::NonZero,
        });

        set_fill(layer, INK);
        layer.use_text(
            fit_label(&trace.name, pt, LEGEND_RIGHT - text_x),
            pt,
            Mm(text_x),
            Mm(y + 0.5),
            font,
        );
    }
}

use std::f32::consts::TAU;

use eframe::egui::{self, Align2, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, PlotUi};

use data_studio::color::ChartPalette;
use data_studio::data::shaper::{PieSlice, ShapedView};
use data_studio::state::{AppState, ChartKind};

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Charts section (central panel)
// ---------------------------------------------------------------------------

/// Render the chart header, tab strip and the selected chart.
pub fn charts_section(ui: &mut Ui, state: &mut AppState) {
    let view = &state.view;

    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Visualizations");
        if !view.is_empty() {
            ui.label(RichText::new(count_label(view.numeric_columns.len(), "numeric")).weak());
            ui.label(
                RichText::new(count_label(view.categorical_columns.len(), "categorical")).weak(),
            );
        }
    });

    if view.is_empty() {
        ui.label("No data to visualize. Upload a file to generate charts.");
        return;
    }
    if view.numeric_columns.is_empty() {
        ui.label("No numeric data found for visualization.");
        return;
    }

    let pie_available = !view.pie.is_empty();
    let mut selected = state.chart;
    ui.horizontal(|ui: &mut Ui| {
        for kind in ChartKind::ALL {
            let enabled = kind != ChartKind::Pie || pie_available;
            let tab = egui::SelectableLabel::new(selected == kind, kind.label());
            if ui.add_enabled(enabled, tab).clicked() {
                selected = kind;
            }
        }
    });
    state.select_chart(selected);

    let palette = ChartPalette::default();
    let view = &state.view;
    match state.chart {
        ChartKind::Bar => bar_chart(ui, view, &palette),
        ChartKind::Line => line_chart(ui, view, &palette),
        ChartKind::Pie => pie_chart(ui, &view.pie, &palette),
    }
}

fn count_label(n: usize, kind: &str) -> String {
    let suffix = if n == 1 { "" } else { "s" };
    format!("{n} {kind} column{suffix}")
}

/// X-axis labels of the chart rows, one per row.
fn x_labels(view: &ShapedView) -> Vec<String> {
    view.chart_rows.iter().map(|r| r.label(&view.x_key)).collect()
}

/// Show a plot with category labels on integer x positions.
fn show_category_plot(
    ui: &mut Ui,
    id: &str,
    view: &ShapedView,
    add_items: impl FnOnce(&mut PlotUi),
) {
    let labels = x_labels(view);
    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label(view.x_key.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .x_axis_formatter(move |mark, _range| {
            let pos = mark.value.round();
            if (mark.value - pos).abs() > f64::EPSILON || pos < 0.0 {
                return String::new();
            }
            labels.get(pos as usize).cloned().unwrap_or_default()
        })
        .show(ui, add_items);
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, view: &ShapedView, palette: &ChartPalette) {
    let n_series = view.series.len().max(1) as f64;
    let group_width = 0.8;
    let bar_width = group_width / n_series;
    let labels = x_labels(view);

    show_category_plot(ui, "bar_chart", view, |plot_ui| {
        for (s, col) in view.series.iter().enumerate() {
            // Bars of one row sit side by side around its x position.
            let offset = (s as f64 - (n_series - 1.0) / 2.0) * bar_width;
            let bars: Vec<Bar> = view
                .chart_rows
                .iter()
                .enumerate()
                .filter_map(|(i, row)| {
                    let value = row.value(col)?;
                    Some(
                        Bar::new(i as f64 + offset, value)
                            .width(bar_width)
                            .name(&labels[i]),
                    )
                })
                .collect();

            plot_ui.bar_chart(BarChart::new(bars).name(col).color(palette.color(s)));
        }
    });
}

// ---------------------------------------------------------------------------
// Line chart
// ---------------------------------------------------------------------------

fn line_chart(ui: &mut Ui, view: &ShapedView, palette: &ChartPalette) {
    show_category_plot(ui, "line_chart", view, |plot_ui| {
        for (s, col) in view.series.iter().enumerate() {
            let points: PlotPoints = view
                .chart_rows
                .iter()
                .enumerate()
                .filter_map(|(i, row)| Some([i as f64, row.value(col)?]))
                .collect();

            let line = Line::new(points)
                .name(col)
                .color(palette.color(s))
                .width(2.0);

            plot_ui.line(line);
        }
    });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Share of the whole for each slice. Negative totals get no area; an
/// all-zero pie yields all zeros.
fn slice_fractions(slices: &[PieSlice]) -> Vec<f64> {
    let sum: f64 = slices.iter().map(|s| s.total.max(0.0)).sum();
    if sum <= 0.0 {
        return vec![0.0; slices.len()];
    }
    slices.iter().map(|s| s.total.max(0.0) / sum).collect()
}

/// Category shown for a slice; blank categories get a placeholder.
fn slice_name(slice: &PieSlice) -> &str {
    if slice.category.is_empty() {
        "(empty)"
    } else {
        &slice.category
    }
}

fn slice_label(slice: &PieSlice, fraction: f64) -> String {
    format!("{} {:.0}%", slice_name(slice), fraction * 100.0)
}

fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + radius * egui::vec2(angle.cos(), angle.sin())
}

fn pie_chart(ui: &mut Ui, slices: &[PieSlice], palette: &ChartPalette) {
    let fractions = slice_fractions(slices);
    if fractions.iter().all(|&f| f == 0.0) {
        ui.label("Nothing to chart: every category total is zero or negative.");
        return;
    }

    let (response, painter) = ui.allocate_painter(
        egui::vec2(ui.available_width(), CHART_HEIGHT),
        Sense::hover(),
    );
    let rect = response.rect;
    let center = rect.center();
    let radius = (rect.height() / 2.0 - 40.0).max(20.0);
    let text_color = ui.visuals().text_color();

    let hover_angle = response.hover_pos().and_then(|p| {
        let d = p - center;
        (d.length() <= radius).then(|| (d.y.atan2(d.x) + TAU / 4.0).rem_euclid(TAU))
    });
    let mut hovered = None;

    // Start at 12 o'clock, go clockwise.
    let mut start = -TAU / 4.0;
    for (i, (slice, &fraction)) in slices.iter().zip(&fractions).enumerate() {
        if fraction == 0.0 {
            continue;
        }
        let sweep = fraction as f32 * TAU;
        let color = palette.color(i);

        let steps = ((sweep / TAU) * 90.0).ceil().max(1.0) as usize;
        let arc: Vec<Pos2> = (0..=steps)
            .map(|k| polar(center, radius, start + sweep * k as f32 / steps as f32))
            .collect();
        for pair in arc.windows(2) {
            painter.add(Shape::convex_polygon(
                vec![center, pair[0], pair[1]],
                color,
                Stroke::NONE,
            ));
        }

        let mid = start + sweep / 2.0;
        let anchor = if mid.cos() >= 0.0 {
            Align2::LEFT_CENTER
        } else {
            Align2::RIGHT_CENTER
        };
        painter.text(
            polar(center, radius + 12.0, mid),
            anchor,
            slice_label(slice, fraction),
            FontId::proportional(12.0),
            text_color,
        );

        let rel_start = start + TAU / 4.0;
        if let Some(a) = hover_angle {
            if a >= rel_start && a < rel_start + sweep {
                hovered = Some(i);
            }
        }
        start += sweep;
    }

    if let Some(i) = hovered {
        let slice = &slices[i];
        response.on_hover_text_at_pointer(format!("{}: {}", slice_name(slice), slice.total));
    }
}

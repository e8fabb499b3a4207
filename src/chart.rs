//! Line and bar charts of the tracked series, drawn directly with the `egui` painter

use egui::{
    Align2, Color32, CornerRadius, FontId, Mesh, Pos2, Rect, Response, RichText, Sense, Shape,
    Stroke, Ui, Vec2, pos2, vec2,
};

use crate::{
    dataset::Dataset,
    palette::{TRACKED_KEYS, TrackedKey, with_alpha},
    summary::NOT_AVAILABLE,
};

/// Height of the plot including axis labels
pub const CHART_HEIGHT: f32 = 500.0;
/// Room for the value labels left of the plot
const MARGIN_LEFT: f32 = 50.0;
const MARGIN_RIGHT: f32 = 30.0;
const MARGIN_TOP: f32 = 20.0;
/// Room for the category labels below the plot
const MARGIN_BOTTOM: f32 = 30.0;
/// Roughly how many value ticks to aim for
const TARGET_TICKS: f64 = 5.0;
/// Upper bound on drawn value ticks
const MAX_TICKS: f64 = TARGET_TICKS * 3.0;
/// Points sampled along each curved segment between two categories
const CURVE_SAMPLES: usize = 16;

const GRID_COLOR: Color32 = Color32::from_rgb(240, 240, 240);
const AXIS_COLOR: Color32 = Color32::from_rgb(238, 238, 238);
const AXIS_TEXT_COLOR: Color32 = Color32::from_rgb(102, 102, 102);
const HOVER_BAND_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 10);

const LINE_WIDTH: f32 = 3.0;
const DOT_RADIUS: f32 = 6.0;
const ACTIVE_DOT_RADIUS: f32 = 8.0;
const DOT_OUTLINE: f32 = 2.0;
/// Opacity of the gradient under a line at its top
const AREA_TOP_ALPHA: f32 = 0.2;
const BAR_ALPHA: f32 = 0.8;
/// Share of a category band covered by its group of bars
const BAR_GROUP_FILL: f32 = 0.8;
const BAR_RADIUS: u8 = 4;

/// How the dataset is drawn. Switching never touches the data.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    #[default]
    Line,
    Bar,
}

impl ChartMode {
    pub const ALL: [Self; 2] = [Self::Line, Self::Bar];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "Line Chart",
            Self::Bar => "Bar Chart",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Line => "📈",
            Self::Bar => "📊",
        }
    }
}

/// Value (y) axis domain, widened to round tick steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAxis {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ValueAxis {
    /// Fits an axis around `values`. Zero is always inside the domain.
    pub fn fit(values: impl IntoIterator<Item = f64>) -> Self {
        let (min, mut max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if max - min <= f64::EPSILON {
            // nothing to spread out, show a unit range
            max = min + 1.0;
        }
        let span = max - min;
        if span.is_finite() {
            let step = nice_step(span / TARGET_TICKS);
            let nice_min = (min / step).floor() * step;
            let nice_max = (max / step).ceil() * step;
            if step.is_finite() && step > 0.0 && nice_min.is_finite() && nice_max.is_finite() {
                return Self {
                    min: nice_min,
                    max: nice_max,
                    step,
                };
            }
        }
        // rounding out would leave the f64 range, keep the raw extent
        Self {
            min,
            max,
            step: max / TARGET_TICKS - min / TARGET_TICKS,
        }
    }

    pub fn ticks(&self) -> Vec<f64> {
        let n = (self.max / self.step - self.min / self.step)
            .round()
            .clamp(0.0, MAX_TICKS) as usize;
        (0..=n).map(|i| self.min + i as f64 * self.step).collect()
    }

    /// Position of `value` within the domain, 0 at `min` and 1 at `max`
    pub fn normalize(&self, value: f64) -> f32 {
        // scaled so the differences cannot overflow
        let scale = self.min.abs().max(self.max.abs());
        let (value, min, max) = (value / scale, self.min / scale, self.max / scale);
        ((value - min) / (max - min)) as f32
    }

    pub fn format_tick(&self, value: f64) -> String {
        if self.step >= 1.0 {
            format!("{:.0}", value)
        } else {
            let decimals = (-self.step.log10()).ceil() as usize;
            format!("{:.*}", decimals, value)
        }
    }
}

/// Rounds `raw` up to 1, 2 or 5 times a power of ten
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10_f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Maps categories and values onto the plot area
#[derive(Debug, Clone, Copy)]
pub struct PlotLayout {
    pub rect: Rect,
    pub n_categories: usize,
    pub axis: ValueAxis,
}

impl PlotLayout {
    /// Width of the band each category owns
    pub fn band_width(&self) -> f32 {
        self.rect.width() / self.n_categories.max(1) as f32
    }

    pub fn band_left(&self, idx: usize) -> f32 {
        self.rect.left() + idx as f32 * self.band_width()
    }

    pub fn category_center(&self, idx: usize) -> f32 {
        self.band_left(idx) + self.band_width() / 2.0
    }

    /// Category whose band contains `x`
    pub fn category_at(&self, x: f32) -> Option<usize> {
        if self.n_categories == 0 || x < self.rect.left() || x > self.rect.right() {
            return None;
        }
        let idx = ((x - self.rect.left()) / self.band_width()) as usize;
        Some(idx.min(self.n_categories - 1))
    }

    pub fn y_for(&self, value: f64) -> f32 {
        self.rect.bottom() - self.axis.normalize(value) * self.rect.height()
    }
}

/// One tracked key with its numeric values, one per record
struct Series {
    key: &'static TrackedKey,
    values: Vec<Option<f64>>,
}

/// Renders a `[Dataset]` in the given `[ChartMode]`
pub struct ChartView<'a> {
    dataset: &'a Dataset,
    mode: ChartMode,
}

impl<'a> ChartView<'a> {
    pub fn new(dataset: &'a Dataset, mode: ChartMode) -> Self {
        Self { dataset, mode }
    }

    pub fn show(&self, ui: &mut Ui) {
        let categories = self.dataset.categories();
        let series: Vec<Series> = TRACKED_KEYS
            .iter()
            .map(|key| Series {
                key,
                values: self.dataset.series(key.name),
            })
            .collect();
        let axis = ValueAxis::fit(series.iter().flat_map(|s| s.values.iter().flatten().copied()));

        let size = vec2(ui.available_width(), CHART_HEIGHT);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let outer = response.rect;
        let layout = PlotLayout {
            rect: Rect::from_min_max(
                pos2(outer.left() + MARGIN_LEFT, outer.top() + MARGIN_TOP),
                pos2(outer.right() - MARGIN_RIGHT, outer.bottom() - MARGIN_BOTTOM),
            ),
            n_categories: categories.len(),
            axis,
        };
        let hovered = response
            .hover_pos()
            .filter(|pos| layout.rect.contains(*pos))
            .and_then(|pos| layout.category_at(pos.x));

        draw_grid(&painter, &layout, &categories);
        match self.mode {
            ChartMode::Line => draw_lines(&painter, &layout, &series, hovered),
            ChartMode::Bar => draw_bars(&painter, &layout, &series, hovered),
        }

        if let Some(idx) = hovered {
            show_tooltip(response, &categories[idx], &series, idx);
        }
        show_legend(ui);
    }
}

fn draw_grid(painter: &egui::Painter, layout: &PlotLayout, categories: &[String]) {
    let rect = layout.rect;
    let grid = Stroke::new(1.0, GRID_COLOR);
    let font = FontId::proportional(12.0);

    for tick in layout.axis.ticks() {
        let y = layout.y_for(tick);
        painter.extend(Shape::dashed_line(
            &[pos2(rect.left(), y), pos2(rect.right(), y)],
            grid,
            3.0,
            3.0,
        ));
        painter.text(
            pos2(rect.left() - 8.0, y),
            Align2::RIGHT_CENTER,
            layout.axis.format_tick(tick),
            font.clone(),
            AXIS_TEXT_COLOR,
        );
    }
    for (idx, label) in categories.iter().enumerate() {
        let x = layout.category_center(idx);
        painter.extend(Shape::dashed_line(
            &[pos2(x, rect.top()), pos2(x, rect.bottom())],
            grid,
            3.0,
            3.0,
        ));
        painter.text(
            pos2(x, rect.bottom() + 8.0),
            Align2::CENTER_TOP,
            label,
            font.clone(),
            AXIS_TEXT_COLOR,
        );
    }

    let axis = Stroke::new(1.0, AXIS_COLOR);
    painter.line_segment([rect.left_bottom(), rect.right_bottom()], axis);
    painter.line_segment([rect.left_top(), rect.left_bottom()], axis);
}

fn draw_lines(
    painter: &egui::Painter,
    layout: &PlotLayout,
    series: &[Series],
    hovered: Option<usize>,
) {
    if let Some(idx) = hovered {
        let x = layout.category_center(idx);
        painter.line_segment(
            [pos2(x, layout.rect.top()), pos2(x, layout.rect.bottom())],
            Stroke::new(1.0, AXIS_TEXT_COLOR),
        );
    }

    for s in series {
        let points: Vec<Option<Pos2>> = s
            .values
            .iter()
            .enumerate()
            .map(|(idx, v)| v.map(|v| pos2(layout.category_center(idx), layout.y_for(v))))
            .collect();
        let [top, bottom] = s.key.gradient();

        // absent values break the line into runs
        for run in points.split(|p| p.is_none()) {
            let run: Vec<Pos2> = run.iter().flatten().copied().collect();
            if run.len() < 2 {
                continue;
            }
            let curve = monotone_curve(&run);
            painter.add(area_mesh(
                &curve,
                layout.rect.bottom(),
                with_alpha(top, AREA_TOP_ALPHA),
                with_alpha(bottom, 0.0),
            ));
            painter.add(Shape::line(curve, Stroke::new(LINE_WIDTH, s.key.main)));
        }

        for (idx, point) in points.iter().enumerate() {
            if let Some(point) = point {
                let radius = if hovered == Some(idx) {
                    ACTIVE_DOT_RADIUS
                } else {
                    DOT_RADIUS
                };
                painter.circle(
                    *point,
                    radius,
                    s.key.main,
                    Stroke::new(DOT_OUTLINE, Color32::WHITE),
                );
            }
        }
    }
}

/// Smooths `points` (ordered by x) into monotone cubic segments.
///
/// Tangents are limited so a segment never swings above or below the two points it joins, which
/// keeps a run of rising values rising. Two points stay a straight line.
fn monotone_curve(points: &[Pos2]) -> Vec<Pos2> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let secant = |i: usize| {
        let (a, b) = (points[i], points[i + 1]);
        if b.x == a.x { 0.0 } else { (b.y - a.y) / (b.x - a.x) }
    };
    let sign = |v: f32| if v < 0.0 { -1.0 } else { 1.0 };

    let mut tangents = vec![0.0_f32; n];
    for i in 1..n - 1 {
        let h0 = points[i].x - points[i - 1].x;
        let h1 = points[i + 1].x - points[i].x;
        let (s0, s1) = (secant(i - 1), secant(i));
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
        tangents[i] = if t.is_finite() { t } else { 0.0 };
    }
    tangents[0] = (3.0 * secant(0) - tangents[1]) / 2.0;
    tangents[n - 1] = (3.0 * secant(n - 2) - tangents[n - 2]) / 2.0;

    let mut curve = Vec::with_capacity((n - 1) * CURVE_SAMPLES + 1);
    curve.push(points[0]);
    for i in 0..n - 1 {
        let (p0, p3) = (points[i], points[i + 1]);
        let dx = (p3.x - p0.x) / 3.0;
        let p1 = pos2(p0.x + dx, p0.y + dx * tangents[i]);
        let p2 = pos2(p3.x - dx, p3.y - dx * tangents[i + 1]);
        for k in 1..=CURVE_SAMPLES {
            let t = k as f32 / CURVE_SAMPLES as f32;
            let u = 1.0 - t;
            let point = p0.to_vec2() * (u * u * u)
                + p1.to_vec2() * (3.0 * u * u * t)
                + p2.to_vec2() * (3.0 * u * t * t)
                + p3.to_vec2() * (t * t * t);
            curve.push(point.to_pos2());
        }
    }
    curve
}

/// Vertical gradient filling the area between a polyline and `baseline`
fn area_mesh(points: &[Pos2], baseline: f32, top: Color32, bottom: Color32) -> Shape {
    let mut mesh = Mesh::default();
    for pair in points.windows(2) {
        let base = mesh.vertices.len() as u32;
        mesh.colored_vertex(pair[0], top);
        mesh.colored_vertex(pair[1], top);
        mesh.colored_vertex(pos2(pair[0].x, baseline), bottom);
        mesh.colored_vertex(pos2(pair[1].x, baseline), bottom);
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base + 1, base + 3, base + 2);
    }
    Shape::mesh(mesh)
}

fn draw_bars(
    painter: &egui::Painter,
    layout: &PlotLayout,
    series: &[Series],
    hovered: Option<usize>,
) {
    let band = layout.band_width();
    if let Some(idx) = hovered {
        let left = layout.band_left(idx);
        painter.rect_filled(
            Rect::from_min_max(
                pos2(left, layout.rect.top()),
                pos2(left + band, layout.rect.bottom()),
            ),
            0.0,
            HOVER_BAND_COLOR,
        );
    }

    let bar_width = band * BAR_GROUP_FILL / series.len().max(1) as f32;
    let baseline = layout.y_for(0.0);
    for (key_idx, s) in series.iter().enumerate() {
        let fill = with_alpha(s.key.main, BAR_ALPHA);
        for (idx, value) in s.values.iter().enumerate() {
            let Some(value) = value else {
                continue;
            };
            let left =
                layout.band_left(idx) + band * (1.0 - BAR_GROUP_FILL) / 2.0 + key_idx as f32 * bar_width;
            let top = layout.y_for(*value);
            let rect = Rect::from_two_pos(pos2(left + 1.0, top), pos2(left + bar_width - 1.0, baseline));
            // round the end away from the baseline
            let radius = if *value >= 0.0 {
                CornerRadius {
                    nw: BAR_RADIUS,
                    ne: BAR_RADIUS,
                    sw: 0,
                    se: 0,
                }
            } else {
                CornerRadius {
                    nw: 0,
                    ne: 0,
                    sw: BAR_RADIUS,
                    se: BAR_RADIUS,
                }
            };
            painter.rect_filled(rect, radius, fill);
        }
    }
}

fn show_tooltip(response: Response, category: &str, series: &[Series], idx: usize) {
    response.on_hover_ui_at_pointer(|ui| {
        ui.label(RichText::new(category).strong());
        for s in series {
            let value = match s.values.get(idx).copied().flatten() {
                Some(v) => format!("{:.2}", v),
                None => NOT_AVAILABLE.to_string(),
            };
            ui.horizontal(|ui| {
                ui.colored_label(s.key.main, s.key.name);
                ui.add_space(16.0);
                ui.colored_label(s.key.main, RichText::new(value).strong());
            });
        }
    });
}

fn show_legend(ui: &mut Ui) {
    ui.horizontal(|ui| {
        for key in TRACKED_KEYS.iter() {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
            ui.painter().circle_filled(rect.center(), 6.0, key.main);
            ui.label(RichText::new(key.name).strong());
            ui.add_space(16.0);
        }
    });
}

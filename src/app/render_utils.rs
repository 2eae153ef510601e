use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2, pos2, vec2};

pub(super) const LIGHT_BLUE: Color32 = Color32::from_rgb(173, 216, 230);
pub(super) const PALE_VIOLET_RED: Color32 = Color32::from_rgb(219, 112, 147);
pub(super) const NON_UI_GREY: Color32 = Color32::from_rgb(128, 128, 128);

const MOVER_COLORS: [Color32; 10] = [
    Color32::from_rgb(31, 119, 180),
    Color32::from_rgb(255, 127, 14),
    Color32::from_rgb(44, 160, 44),
    Color32::from_rgb(214, 39, 40),
    Color32::from_rgb(148, 103, 189),
    Color32::from_rgb(140, 86, 75),
    Color32::from_rgb(227, 119, 194),
    Color32::from_rgb(127, 127, 127),
    Color32::from_rgb(188, 189, 34),
    Color32::from_rgb(23, 190, 207),
];

const CURVE_SEGMENTS: usize = 18;

pub(super) fn mover_color(index: Option<usize>) -> Color32 {
    index.map_or(Color32::from_gray(200), |index| {
        MOVER_COLORS[index % MOVER_COLORS.len()]
    })
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (56.0 * zoom.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.center() + pan;

    let mut x = origin.x.rem_euclid(step);
    while x < rect.right() {
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70)),
        );
        x += step;
    }

    let mut y = origin.y.rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70)),
        );
        y += step;
    }
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

pub(super) fn trim_segment(start: Pos2, end: Pos2, radius: f32) -> Option<(Pos2, Pos2)> {
    let delta = end - start;
    let length = delta.length();
    if length <= radius * 2.0 {
        return None;
    }
    let direction = delta / length;
    Some((start + direction * radius, end - direction * radius))
}

pub(super) fn diagonal_points(start: Pos2, end: Pos2) -> Vec<Pos2> {
    let middle = (start.y + end.y) * 0.5;
    let controls = [start, pos2(start.x, middle), pos2(end.x, middle), end];
    (0..=CURVE_SEGMENTS)
        .map(|step| {
            let t = step as f32 / CURVE_SEGMENTS as f32;
            let u = 1.0 - t;
            let weights = [u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t];
            let mut point = Vec2::ZERO;
            for (control, weight) in controls.iter().zip(weights) {
                point += control.to_vec2() * weight;
            }
            point.to_pos2()
        })
        .collect()
}

/// Circular arc whose radius equals the chord length. Opposite moves between
/// the same pair of states bow to opposite sides.
pub(super) fn arc_points(start: Pos2, end: Pos2) -> Vec<Pos2> {
    let chord = end - start;
    let length = chord.length();
    if length <= f32::EPSILON {
        return vec![start, end];
    }

    let normal = vec2(-chord.y, chord.x) / length;
    let half = length * 0.5;
    let offset = (length * length - half * half).sqrt();
    let center = start + chord * 0.5 + normal * offset;

    let start_angle = (start - center).angle();
    let mut sweep = (end - center).angle() - start_angle;
    while sweep > std::f32::consts::PI {
        sweep -= std::f32::consts::TAU;
    }
    while sweep < -std::f32::consts::PI {
        sweep += std::f32::consts::TAU;
    }

    (0..=CURVE_SEGMENTS)
        .map(|step| {
            let angle = start_angle + sweep * (step as f32 / CURVE_SEGMENTS as f32);
            center + Vec2::angled(angle) * length
        })
        .collect()
}

pub(super) fn arrow_head(tip: Pos2, direction: Vec2, size: f32) -> Vec<Pos2> {
    let direction = direction.normalized();
    let normal = vec2(-direction.y, direction.x);
    let base = tip - direction * size;
    vec![tip, base + normal * (size * 0.5), base - normal * (size * 0.5)]
}

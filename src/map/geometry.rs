use crate::braille::BrailleCanvas;
use glam::DVec2;

/// A closed ring of projected points (first point may or may not repeat)
pub type Ring = Vec<DVec2>;

/// Rings of one polygon: exterior first, then holes
pub type Polygon = Vec<Ring>;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a ring outline, skipping segments that touch NaN points
pub fn draw_ring(canvas: &mut BrailleCanvas, ring: &[DVec2]) {
    for pair in ring.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if !(a.is_finite() && b.is_finite()) {
            continue;
        }
        draw_line(canvas, a.x as i32, a.y as i32, b.x as i32, b.y as i32);
    }
}

/// Fill a polygon with the even-odd rule, sampling each pixel row at its
/// vertical centre. Holes come out empty; edges touching NaN points are
/// skipped.
pub fn fill_polygon(canvas: &mut BrailleCanvas, polygon: &[Ring]) {
    let Some((min, max)) = bounds(polygon.iter().flatten().copied()) else {
        return;
    };

    let y_start = min.y.floor().max(0.0) as i32;
    let y_end = max.y.ceil().min(canvas.pixel_height() as f64) as i32;
    let mut crossings: Vec<f64> = Vec::new();

    for y in y_start..y_end {
        let sample = y as f64 + 0.5;
        crossings.clear();

        for ring in polygon {
            for_each_edge(ring, |a, b| {
                if !(a.is_finite() && b.is_finite()) {
                    return;
                }
                if (a.y <= sample) != (b.y <= sample) {
                    crossings.push(a.x + (sample - a.y) / (b.y - a.y) * (b.x - a.x));
                }
            });
        }

        crossings.sort_by(f64::total_cmp);
        for span in crossings.chunks_exact(2) {
            let x_start = span[0].round() as i32;
            let x_end = span[1].round() as i32;
            for x in x_start..x_end.max(x_start + 1) {
                canvas.set_pixel_signed(x, y);
            }
        }
    }
}

/// Even-odd point-in-polygon over every ring of the polygon
pub fn polygon_contains(polygon: &[Ring], p: DVec2) -> bool {
    let mut inside = false;
    for ring in polygon {
        for_each_edge(ring, |a, b| {
            if (a.y > p.y) != (b.y > p.y) && p.x < a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x) {
                inside = !inside;
            }
        });
    }
    inside
}

/// Area-weighted planar centroid of a set of polygons.
///
/// Exteriors add and holes subtract regardless of winding. Falls back to
/// the mean vertex when the total area is zero. Any NaN vertex makes the
/// whole centroid NaN, which is how out-of-projection counties show up.
pub fn centroid(polygons: &[Polygon]) -> DVec2 {
    let mut area = 0.0;
    let mut moment = DVec2::ZERO;
    let mut vertex_sum = DVec2::ZERO;
    let mut vertex_count = 0usize;

    for polygon in polygons {
        for (ring_idx, ring) in polygon.iter().enumerate() {
            if ring.iter().any(|p| !p.is_finite()) {
                return DVec2::NAN;
            }

            let (ring_area, ring_moment) = ring_area_moment(ring);
            // Exterior counts positive, holes negative
            let sign = if (ring_area >= 0.0) == (ring_idx == 0) { 1.0 } else { -1.0 };
            area += sign * ring_area;
            moment += sign * ring_moment;

            vertex_sum += ring.iter().copied().sum::<DVec2>();
            vertex_count += ring.len();
        }
    }

    if area.abs() > f64::EPSILON {
        moment / (3.0 * area)
    } else if vertex_count > 0 {
        vertex_sum / vertex_count as f64
    } else {
        DVec2::NAN
    }
}

/// Twice the signed area of a ring and its first moment (shoelace)
fn ring_area_moment(ring: &[DVec2]) -> (f64, DVec2) {
    let mut area = 0.0;
    let mut moment = DVec2::ZERO;
    for_each_edge(ring, |a, b| {
        let cross = a.x * b.y - b.x * a.y;
        area += cross;
        moment += (a + b) * cross;
    });
    (area, moment)
}

/// Visit every edge of a ring, closing it if the last point isn't the first
fn for_each_edge(ring: &[DVec2], mut f: impl FnMut(DVec2, DVec2)) {
    let n = ring.len();
    if n < 2 {
        return;
    }
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if a != b {
            f(a, b);
        }
    }
}

/// Min/max corners of finite points, `None` if there are none
pub fn bounds(points: impl Iterator<Item = DVec2>) -> Option<(DVec2, DVec2)> {
    points
        .filter(|p| p.is_finite())
        .fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((min, max)) => Some((min.min(p), max.max(p))),
        })
}

use super::Surface;

/// Sample the mirrored zig-zag waveform into a polyline.
///
/// Each band is a quadratic Bézier from the centre line to the centre line
/// with its control point pushed up or down (alternating) by the band's
/// amplitude. Returns `1 + levels.len() * segments` points starting at the
/// left edge.
pub fn waveform_points(
    levels: &[f64],
    surface: Surface,
    amplitude_scale: f64,
    segments: usize,
) -> Vec<(f64, f64)> {
    let segments = segments.max(1);
    let center = surface.height / 2.0;
    let mut points = Vec::with_capacity(1 + levels.len() * segments);
    points.push((0.0, center));
    if levels.is_empty() {
        return points;
    }

    let band_width = surface.width / levels.len() as f64;
    let mut direction = 1.0;

    for (i, level) in levels.iter().enumerate() {
        let x0 = i as f64 * band_width;
        let x1 = x0 + band_width;
        let cx = x0 + band_width / 2.0;
        let cy = center + level * amplitude_scale * direction;

        for s in 1..=segments {
            let t = s as f64 / segments as f64;
            let u = 1.0 - t;
            let x = u * u * x0 + 2.0 * u * t * cx + t * t * x1;
            let y = u * u * center + 2.0 * u * t * cy + t * t * center;
            points.push((x, y));
        }

        direction = -direction;
    }

    points
}

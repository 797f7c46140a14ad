/// Centre frequency of `band` on a logarithmic scale from `min_hz` towards `max_hz`.
///
/// `band == bands` lands exactly on `max_hz`; the last drawn band sits one
/// step below it.
pub fn band_frequency(band: usize, bands: usize, min_hz: f64, max_hz: f64) -> f64 {
    let log_min = min_hz.ln();
    let log_max = max_hz.ln();
    let step = (log_max - log_min) / bands as f64;
    (log_min + step * band as f64).exp()
}

/// Analyser bin holding `freq`, clamped to the last bin.
pub fn band_bin(freq: f64, sample_rate: u32, bin_count: usize) -> usize {
    if bin_count == 0 {
        return 0;
    }
    let nyquist = f64::from(sample_rate) / 2.0;
    let index = (freq / nyquist * bin_count as f64).floor().max(0.0) as usize;
    index.min(bin_count - 1)
}

/// Normalised, boosted target level of one band.
///
/// Higher bands get up to 2.5x the base sensitivity.
pub fn band_level(magnitude: u8, band: usize, bands: usize, sensitivity: f64) -> f64 {
    let raw = f64::from(magnitude) / 255.0;
    let boost = 1.0 + (band as f64 / bands as f64) * 1.5;
    (raw * sensitivity * boost).min(1.0)
}

/// One step of the per-band low-pass: move `rate` of the way towards `target`.
pub fn smooth_toward(previous: f64, target: f64, rate: f64) -> f64 {
    previous + (target - previous) * rate
}

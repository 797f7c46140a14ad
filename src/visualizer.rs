//! Frequency-domain waveform visualizer.
//!
//! Every tick the visualizer reads a byte spectrum from its
//! [`FrequencySource`], folds it into a fixed number of log-spaced bands,
//! smooths each band over time and exposes the result as a mirrored
//! zig-zag curve for the UI to draw.

mod analyser;
mod bands;
mod curve;

pub use analyser::{Analyser, magnitude_to_byte};
pub use bands::{band_bin, band_frequency, band_level, smooth_toward};
pub use curve::waveform_points;

use crate::config::VisualizerSettings;

/// Live spectrum provider.
pub trait FrequencySource {
    fn sample_rate(&self) -> u32;
    /// Number of magnitude bins produced per read.
    fn bin_count(&self) -> usize;
    /// Fill `out` with the current magnitudes scaled to `0..=255`.
    fn byte_frequency_data(&mut self, out: &mut [u8]);
}

/// Size of the drawing surface in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

pub struct Visualizer {
    settings: VisualizerSettings,
    source: Option<Box<dyn FrequencySource>>,
    spectrum: Vec<u8>,
    smoothed: Vec<f64>,
    surface: Surface,
    running: bool,
}

impl Visualizer {
    pub fn new(settings: VisualizerSettings) -> Self {
        let bands = settings.bands;
        let height = settings.height * 2.0;
        Self {
            settings,
            source: None,
            spectrum: Vec::new(),
            smoothed: vec![0.0; bands],
            surface: Surface { width: 0.0, height },
            running: false,
        }
    }

    #[cfg(test)]
    pub fn is_initialized(&self) -> bool {
        self.source.is_some()
    }

    /// Attach the spectrum source on first use. Later calls are no-ops.
    ///
    /// Returns `true` when this call performed the setup.
    pub fn ensure_initialized<F>(&mut self, make_source: F) -> bool
    where
        F: FnOnce() -> Box<dyn FrequencySource>,
    {
        if self.source.is_some() {
            return false;
        }
        let source = make_source();
        self.spectrum = vec![0; source.bin_count()];
        self.source = Some(source);
        tracing::debug!(bands = self.settings.bands, "visualizer initialized");
        true
    }

    /// Begin the per-frame loop. Has no effect before initialization.
    pub fn start(&mut self) -> bool {
        if self.source.is_none() {
            return false;
        }
        self.running = true;
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Track the container: width follows it, height stays at twice the curve height.
    pub fn resize(&mut self, container_width: f64) {
        self.surface = Surface {
            width: container_width.max(0.0),
            height: self.settings.height * 2.0,
        };
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Smoothed band levels of the latest tick.
    #[cfg(test)]
    pub fn frame(&self) -> &[f64] {
        &self.smoothed
    }

    /// Advance one animation frame. Returns `false` when nothing ran.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let Some(source) = self.source.as_mut() else {
            return false;
        };

        let bin_count = source.bin_count();
        if bin_count == 0 {
            return false;
        }
        self.spectrum.resize(bin_count, 0);
        source.byte_frequency_data(&mut self.spectrum);
        let sample_rate = source.sample_rate();

        let s = &self.settings;
        for (i, level) in self.smoothed.iter_mut().enumerate() {
            let freq = band_frequency(i, s.bands, s.min_freq_hz, s.max_freq_hz);
            let bin = band_bin(freq, sample_rate, bin_count);
            let target = band_level(self.spectrum[bin], i, s.bands, s.sensitivity);
            *level = smooth_toward(*level, target, s.smoothing);
        }
        true
    }

    /// Polyline of the current curve, `segments` samples per band.
    pub fn curve(&self, segments: usize) -> Vec<(f64, f64)> {
        waveform_points(&self.smoothed, self.surface, self.settings.height, segments)
    }
}

//! Byte spectrum of the live tap, in the manner of a Web Audio `AnalyserNode`.

use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::{Fft, FftPlanner, num_complex::Complex};

use crate::audio::SharedTap;
use crate::config::VisualizerSettings;

use super::FrequencySource;

pub struct Analyser {
    tap: SharedTap,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    samples: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    time_smoothing: f32,
    min_decibels: f32,
    max_decibels: f32,
}

fn blackman(len: usize) -> Vec<f32> {
    let n = len as f32;
    (0..len)
        .map(|i| {
            let x = i as f32 / n;
            0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
        })
        .collect()
}

/// Map a linear magnitude onto `0..=255` across `[min_db, max_db]`.
pub fn magnitude_to_byte(magnitude: f32, min_db: f32, max_db: f32) -> u8 {
    let db = 20.0 * magnitude.log10();
    let scaled = (db - min_db) / (max_db - min_db) * 255.0;
    scaled.clamp(0.0, 255.0) as u8
}

impl Analyser {
    pub fn new(tap: SharedTap, settings: &VisualizerSettings) -> Self {
        let fft_size = settings.fft_size;
        let fft = FftPlanner::<f32>::new().plan_fft_forward(fft_size);
        Self {
            tap,
            fft,
            window: blackman(fft_size),
            samples: vec![0.0; fft_size],
            buffer: vec![Complex::new(0.0, 0.0); fft_size],
            smoothed: vec![0.0; fft_size / 2],
            time_smoothing: settings.time_smoothing as f32,
            min_decibels: settings.min_decibels as f32,
            max_decibels: settings.max_decibels as f32,
        }
    }

    pub fn fft_size(&self) -> usize {
        self.window.len()
    }
}

impl FrequencySource for Analyser {
    fn sample_rate(&self) -> u32 {
        self.tap.lock().map(|t| t.sample_rate()).unwrap_or(44_100)
    }

    fn bin_count(&self) -> usize {
        self.smoothed.len()
    }

    fn byte_frequency_data(&mut self, out: &mut [u8]) {
        match self.tap.lock() {
            Ok(tap) => tap.copy_latest(&mut self.samples),
            Err(_) => self.samples.fill(0.0),
        }

        for ((dst, s), w) in self
            .buffer
            .iter_mut()
            .zip(self.samples.iter())
            .zip(self.window.iter())
        {
            *dst = Complex::new(s * w, 0.0);
        }
        self.fft.process(&mut self.buffer);

        let n = self.fft_size() as f32;
        let tau = self.time_smoothing;
        for (k, smoothed) in self.smoothed.iter_mut().enumerate() {
            let magnitude = self.buffer[k].norm() / n;
            *smoothed = tau * *smoothed + (1.0 - tau) * magnitude;
        }

        for (dst, m) in out.iter_mut().zip(self.smoothed.iter()) {
            *dst = magnitude_to_byte(*m, self.min_decibels, self.max_decibels);
        }
    }
}

//! Copies what the mixer plays into a shared buffer for the analyser.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rodio::Source;

/// Most recent mono samples of the playing track.
#[derive(Debug)]
pub struct TapBuffer {
    samples: VecDeque<f32>,
    capacity: usize,
    sample_rate: u32,
}

pub type SharedTap = Arc<Mutex<TapBuffer>>;

impl TapBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            sample_rate: 44_100,
        }
    }

    pub fn shared(capacity: usize) -> SharedTap {
        Arc::new(Mutex::new(Self::new(capacity)))
    }

    pub fn push(&mut self, sample: f32) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn set_sample_rate(&mut self, rate: u32) {
        self.sample_rate = rate;
    }

    /// Copy the newest `out.len()` samples into `out`, zero-filling the front
    /// when fewer are buffered.
    pub fn copy_latest(&self, out: &mut [f32]) {
        let have = self.samples.len().min(out.len());
        let pad = out.len() - have;
        out[..pad].fill(0.0);
        let skip = self.samples.len() - have;
        for (dst, src) in out[pad..].iter_mut().zip(self.samples.iter().skip(skip)) {
            *dst = *src;
        }
    }
}

/// Source wrapper that mixes each frame down to mono and pushes it to a `SharedTap`.
pub struct TappedSource<S> {
    inner: S,
    tap: SharedTap,
    frame_sum: f32,
    frame_pos: u16,
}

impl<S> TappedSource<S>
where
    S: Source<Item = f32>,
{
    pub fn new(source: S, tap: SharedTap) -> Self {
        if let Ok(mut t) = tap.lock() {
            t.set_sample_rate(source.sample_rate());
        }
        TappedSource {
            inner: source,
            tap,
            frame_sum: 0.0,
            frame_pos: 0,
        }
    }
}

impl<S> Iterator for TappedSource<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = self.inner.next()?;
        let channels = self.inner.channels().max(1);
        self.frame_sum += sample;
        self.frame_pos += 1;
        if self.frame_pos >= channels {
            let mono = self.frame_sum / channels as f32;
            self.frame_sum = 0.0;
            self.frame_pos = 0;
            // Never block the mixer thread; a dropped sample is invisible on screen.
            if let Ok(mut tap) = self.tap.try_lock() {
                tap.push(mono);
            }
        }
        Some(sample)
    }
}

impl<S> Source for TappedSource<S>
where
    S: Source<Item = f32>,
{
    fn current_span_len(&self) -> Option<usize> {
        self.inner.current_span_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), rodio::source::SeekError> {
        let result = self.inner.try_seek(pos);
        if result.is_ok() {
            self.frame_sum = 0.0;
            self.frame_pos = 0;
            if let Ok(mut tap) = self.tap.try_lock() {
                tap.clear();
            }
        }
        result
    }
}

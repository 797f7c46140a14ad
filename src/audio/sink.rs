//! Opening a `MediaRef` as a tapped rodio source on a fresh, paused `Sink`.

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use anyhow::Context;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::playlist::MediaRef;

use super::tap::{SharedTap, TappedSource};

/// A paused sink holding `media`, and the length the decoder reports.
pub(super) fn create_sink(
    stream: &OutputStream,
    media: &MediaRef,
    tap: SharedTap,
) -> anyhow::Result<(Sink, Option<Duration>)> {
    let source = open_source(media, tap)?;
    let duration = source.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    sink.pause();
    sink.append(source);
    Ok((sink, duration))
}

fn open_source(
    media: &MediaRef,
    tap: SharedTap,
) -> anyhow::Result<TappedSource<Decoder<BufReader<File>>>> {
    let path = media.path();
    let reader = media
        .open()
        .with_context(|| format!("failed to open {}", path.display()))?;
    let decoder =
        Decoder::new(reader).with_context(|| format!("failed to decode {}", path.display()))?;
    Ok(TappedSource::new(decoder, tap))
}

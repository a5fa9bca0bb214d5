//! Opening and decoding files into `rodio` sinks.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::PlaybackError;

fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>, PlaybackError> {
    let file = File::open(path).map_err(|source| PlaybackError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Check that `path` opens and decodes, and work out its length.
///
/// The tag reader is asked first since many mp3 decoders can't report a
/// total duration without scanning the whole file.
pub(super) fn probe(path: &Path) -> Result<Option<Duration>, PlaybackError> {
    let decoder = open_decoder(path)?;

    let duration = lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
        .or_else(|| decoder.total_duration());
    Ok(duration)
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<Sink, PlaybackError> {
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = open_decoder(path)?.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}

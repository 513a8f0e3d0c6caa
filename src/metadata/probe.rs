//! Duration probes per container type.
//!
//! WAV durations come from the header (`frames / sample_rate`) via `hound`;
//! MP3 and AIFF go through `lofty`'s stream properties.

use std::path::Path;
use std::time::Duration;

use lofty::file::AudioFile as _;

use crate::error::{Result, ShelfError};
use crate::library::AudioKind;

pub fn probe_duration(path: &Path, kind: AudioKind) -> Result<Duration> {
    match kind {
        AudioKind::Wav => probe_wav(path),
        AudioKind::Mp3 | AudioKind::Aiff => probe_tagged(path),
    }
}

fn decode_error(path: &Path, reason: impl ToString) -> ShelfError {
    ShelfError::Decode {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn probe_wav(path: &Path) -> Result<Duration> {
    let reader = hound::WavReader::open(path).map_err(|e| decode_error(path, e))?;
    let rate = reader.spec().sample_rate;
    if rate == 0 {
        return Err(decode_error(path, "sample rate is zero"));
    }
    let frames = reader.duration();
    Ok(Duration::from_secs_f64(f64::from(frames) / f64::from(rate)))
}

fn probe_tagged(path: &Path) -> Result<Duration> {
    let tagged = lofty::read_from_path(path).map_err(|e| decode_error(path, e))?;
    Ok(tagged.properties().duration())
}

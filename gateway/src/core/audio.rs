//! Whole-file audio loading.
//!
//! Uploaded recordings arrive as WAV containers of arbitrary PCM layout. The
//! recognizer expects linear 16-bit mono PCM, so the entire file is decoded
//! into an [`AudioData`] buffer before the network call. The sample rate is
//! carried through unchanged.

use std::io::Read;
use std::path::Path;

use hound::{SampleFormat, WavReader};
use thiserror::Error;

/// Bytes per sample of the normalized buffer.
pub const SAMPLE_WIDTH: u16 = 2;

/// Errors raised while decoding an uploaded recording.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to decode WAV audio: {0}")]
    Decode(#[from] hound::Error),

    #[error("unsupported WAV layout: {0}")]
    UnsupportedFormat(String),

    #[error("audio file contains no samples")]
    Empty,
}

/// In-memory audio ready for recognition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioData {
    /// Signed 16-bit little-endian mono PCM.
    pub frame_data: Vec<u8>,
    /// Sample rate in Hz, as read from the WAV header.
    pub sample_rate: u32,
    /// Bytes per sample, always [`SAMPLE_WIDTH`].
    pub sample_width: u16,
}

impl AudioData {
    /// Decode a WAV file from disk.
    pub fn from_wav_file(path: &Path) -> Result<Self, AudioError> {
        let reader = WavReader::open(path)?;
        Self::from_wav_reader(reader)
    }

    /// Decode WAV data from any reader.
    pub fn from_wav<R: Read>(source: R) -> Result<Self, AudioError> {
        let reader = WavReader::new(source)?;
        Self::from_wav_reader(reader)
    }

    fn from_wav_reader<R: Read>(mut reader: WavReader<R>) -> Result<Self, AudioError> {
        let spec = reader.spec();
        if spec.channels == 0 {
            return Err(AudioError::UnsupportedFormat("zero channels".to_string()));
        }

        let samples: Vec<i16> = match spec.sample_format {
            SampleFormat::Int => {
                let bits = spec.bits_per_sample;
                if bits == 0 || bits > 32 {
                    return Err(AudioError::UnsupportedFormat(format!(
                        "{bits}-bit integer samples"
                    )));
                }
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| int_to_i16(v, bits)))
                    .collect::<Result<_, _>>()?
            }
            SampleFormat::Float => reader
                .samples::<f32>()
                .map(|s| s.map(float_to_i16))
                .collect::<Result<_, _>>()?,
        };

        let mono = downmix(&samples, spec.channels as usize);
        if mono.is_empty() {
            return Err(AudioError::Empty);
        }

        let mut frame_data = Vec::with_capacity(mono.len() * SAMPLE_WIDTH as usize);
        for sample in mono {
            frame_data.extend_from_slice(&sample.to_le_bytes());
        }

        Ok(Self {
            frame_data,
            sample_rate: spec.sample_rate,
            sample_width: SAMPLE_WIDTH,
        })
    }

    /// Number of mono frames in the buffer.
    pub fn frame_count(&self) -> usize {
        self.frame_data.len() / self.sample_width as usize
    }

    /// Duration of the buffer in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.sample_rate as f64
    }
}

fn int_to_i16(sample: i32, bits: u16) -> i16 {
    if bits > 16 {
        (sample >> (bits - 16)) as i16
    } else {
        (sample << (16 - bits)) as i16
    }
}

fn float_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// Average interleaved channels into a single channel. Trailing partial frames are dropped.
fn downmix(samples: &[i16], channels: usize) -> Vec<i16> {
    if channels == 1 {
        return samples.to_vec();
    }
    samples
        .chunks_exact(channels)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| i32::from(s)).sum();
            (sum / channels as i32) as i16
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use std::io::Cursor;

    fn wav_bytes<F>(spec: WavSpec, write: F) -> Vec<u8>
    where
        F: FnOnce(&mut WavWriter<&mut Cursor<Vec<u8>>>),
    {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            write(&mut writer);
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    fn pcm16(data: &AudioData) -> Vec<i16> {
        data.frame_data
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]))
            .collect()
    }

    #[test]
    fn test_mono_16bit_passthrough() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let bytes = wav_bytes(spec, |w| {
            for s in [0i16, 1000, -1000, i16::MAX, i16::MIN] {
                w.write_sample(s).unwrap();
            }
        });

        let audio = AudioData::from_wav(Cursor::new(bytes)).unwrap();
        assert_eq!(audio.sample_rate, 16000);
        assert_eq!(audio.sample_width, 2);
        assert_eq!(pcm16(&audio), vec![0, 1000, -1000, i16::MAX, i16::MIN]);
    }

    #[test]
    fn test_stereo_is_averaged() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let bytes = wav_bytes(spec, |w| {
            for s in [100i16, 300, -200, -400] {
                w.write_sample(s).unwrap();
            }
        });

        let audio = AudioData::from_wav(Cursor::new(bytes)).unwrap();
        assert_eq!(audio.sample_rate, 44100);
        assert_eq!(pcm16(&audio), vec![200, -300]);
    }

    #[test]
    fn test_8bit_is_widened() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 8,
            sample_format: SampleFormat::Int,
        };
        let bytes = wav_bytes(spec, |w| {
            w.write_sample(64i8).unwrap();
            w.write_sample(-64i8).unwrap();
        });

        let audio = AudioData::from_wav(Cursor::new(bytes)).unwrap();
        assert_eq!(pcm16(&audio), vec![64 << 8, -64 << 8]);
    }

    #[test]
    fn test_24bit_is_narrowed() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 24,
            sample_format: SampleFormat::Int,
        };
        let bytes = wav_bytes(spec, |w| {
            w.write_sample(0x12_3400i32).unwrap();
        });

        let audio = AudioData::from_wav(Cursor::new(bytes)).unwrap();
        assert_eq!(pcm16(&audio), vec![0x1234]);
    }

    #[test]
    fn test_float_samples_are_scaled() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let bytes = wav_bytes(spec, |w| {
            w.write_sample(1.0f32).unwrap();
            w.write_sample(-2.0f32).unwrap();
            w.write_sample(0.0f32).unwrap();
        });

        let audio = AudioData::from_wav(Cursor::new(bytes)).unwrap();
        assert_eq!(pcm16(&audio), vec![i16::MAX, -i16::MAX, 0]);
    }

    #[test]
    fn test_empty_wav_is_rejected() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let bytes = wav_bytes(spec, |_| {});

        let result = AudioData::from_wav(Cursor::new(bytes));
        assert!(matches!(result, Err(AudioError::Empty)));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let result = AudioData::from_wav(Cursor::new(b"definitely not a wav".to_vec()));
        assert!(matches!(result, Err(AudioError::Decode(_))));
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AudioData::from_wav_file(&dir.path().join("absent.wav"));
        assert!(matches!(
            result,
            Err(AudioError::Decode(hound::Error::IoError(_)))
        ));
    }

    #[test]
    fn test_duration() {
        let audio = AudioData {
            frame_data: vec![0u8; 32000],
            sample_rate: 16000,
            sample_width: 2,
        };
        assert_eq!(audio.frame_count(), 16000);
        assert!((audio.duration_secs() - 1.0).abs() < f64::EPSILON);
    }
}

use std::path::Path;

use super::frame::StereoFrame;
use crate::errors::AssetError;

#[derive(Clone, Debug, Default)]
pub struct SampleBuffer {
    pub data: Vec<StereoFrame>, // decoded audio at the output rate
}

impl SampleBuffer {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    // Load a WAV file from disk, converted to stereo f32 at `target_rate`
    pub fn load_wav(path: &Path, target_rate: u32) -> Result<Self, AssetError> {
        if !path.is_file() {
            return Err(AssetError::Missing(path.to_path_buf()));
        }
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        let file_rate = spec.sample_rate;
        let file_channels = spec.channels as usize;
        if file_channels == 0 || file_rate == 0 {
            return Err(AssetError::UnsupportedFormat(format!(
                "{} channels at {} Hz",
                file_channels, file_rate
            )));
        }

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader // float, just pass it through
                .samples::<f32>()
                .collect::<Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => { // int, scale into -1.0..1.0
                let max = (1i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|x| x as f32 / max))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        let mut frames: Vec<StereoFrame> = if file_channels == 1 {
            samples.into_iter().map(StereoFrame::mono).collect()
        } else {
            // anything past the first two channels is dropped
            samples
                .chunks_exact(file_channels)
                .map(|c| StereoFrame { left: c[0], right: c[1] })
                .collect()
        };

        if file_rate != target_rate {
            frames = resample_linear(&frames, file_rate, target_rate);
        }

        Ok(Self { data: frames })
    }
}

fn resample_linear(frames: &[StereoFrame], source_rate: u32, target_rate: u32) -> Vec<StereoFrame> {
    if source_rate == target_rate {
        return frames.to_vec();
    }
    let ratio = target_rate as f64 / source_rate as f64;
    let out_len = (frames.len() as f64 * ratio).ceil() as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        // fractional position in the source buffer
        let src_pos = i as f64 / ratio;
        let idx = src_pos.floor() as usize;
        let frac = (src_pos - idx as f64) as f32;
        if idx >= frames.len().saturating_sub(1) {
            out.push(frames.last().copied().unwrap_or_default());
        } else {
            out.push(StereoFrame::lerp(frames[idx], frames[idx + 1], frac));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, channels: u16, rate: u32, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for s in samples {
            writer.write_sample(*s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn mono_wav_is_duplicated_to_both_sides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sound1.wav");
        write_wav(&path, 1, 44100, &[0, 16384, -16384, 0]);

        let buf = SampleBuffer::load_wav(&path, 44100).unwrap();
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.data[1].left, 0.5);
        assert_eq!(buf.data[1].right, 0.5);
        assert_eq!(buf.data[2].left, -0.5);
    }

    #[test]
    fn stereo_wav_keeps_channels_apart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loop1.wav");
        write_wav(&path, 2, 44100, &[16384, -16384, 0, 8192]);

        let buf = SampleBuffer::load_wav(&path, 44100).unwrap();
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.data[0], StereoFrame { left: 0.5, right: -0.5 });
        assert_eq!(buf.data[1], StereoFrame { left: 0.0, right: 0.25 });
    }

    #[test]
    fn rate_mismatch_is_resampled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sound2.wav");
        write_wav(&path, 1, 22050, &[0; 100]);

        let buf = SampleBuffer::load_wav(&path, 44100).unwrap();
        assert_eq!(buf.len(), 200);
    }

    #[test]
    fn missing_file_is_reported_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = SampleBuffer::load_wav(&dir.path().join("loop9.wav"), 44100).unwrap_err();
        assert!(err.is_missing());
    }

    #[test]
    fn garbage_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sound3.wav");
        std::fs::write(&path, b"definitely not a riff header").unwrap();
        let err = SampleBuffer::load_wav(&path, 44100).unwrap_err();
        assert!(matches!(err, AssetError::Wav(_)));
    }

    #[test]
    fn linear_resample_interpolates_between_frames() {
        let frames = [StereoFrame::mono(0.0), StereoFrame::mono(1.0)];
        let out = resample_linear(&frames, 1, 2);
        assert_eq!(out.len(), 4);
        assert_eq!(out[1], StereoFrame::mono(0.5));
        // past the last source frame, hold it
        assert_eq!(out[3], StereoFrame::mono(1.0));
    }
}

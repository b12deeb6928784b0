/// Canonical speech audio: mono f32 samples at 16 kHz. The normalizer is the
/// only producer; trimming and transcription require this shape.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAudio {
    samples: Vec<f32>,
}

impl NormalizedAudio {
    pub const SAMPLE_RATE_HZ: u32 = 16_000;
    pub const CHANNEL_COUNT: u16 = 1;
    pub const BITS_PER_SAMPLE: u16 = 16;

    pub fn from_samples(samples: Vec<f32>) -> Self {
        Self { samples }
    }

    pub fn empty() -> Self {
        Self { samples: Vec::new() }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / Self::SAMPLE_RATE_HZ as f64
    }

    /// Serialize to a PCM16 WAV container. An empty buffer yields a valid
    /// WAV file with a zero-length data chunk.
    pub fn to_wav_bytes(&self) -> Vec<u8> {
        let data_size = (self.samples.len() * 2) as u32;
        let byte_rate = Self::SAMPLE_RATE_HZ * 2;

        let mut wav = Vec::with_capacity(44 + data_size as usize);
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36 + data_size).to_le_bytes());
        wav.extend_from_slice(b"WAVE");
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&Self::CHANNEL_COUNT.to_le_bytes());
        wav.extend_from_slice(&Self::SAMPLE_RATE_HZ.to_le_bytes());
        wav.extend_from_slice(&byte_rate.to_le_bytes());
        wav.extend_from_slice(&2u16.to_le_bytes()); // block align
        wav.extend_from_slice(&Self::BITS_PER_SAMPLE.to_le_bytes());
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&data_size.to_le_bytes());
        for &sample in &self.samples {
            wav.extend_from_slice(&pcm16(sample).to_le_bytes());
        }
        wav
    }
}

fn pcm16(sample: f32) -> i16 {
    (sample * 32768.0).round().clamp(-32768.0, 32767.0) as i16
}

use std::io::Cursor;

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioNormalizer, NormalizeError};
use crate::domain::NormalizedAudio;

/// Decodes any supported container/codec to PCM, downmixes to mono and
/// resamples to 16 kHz. Already-conforming input passes through each step
/// unchanged.
pub struct SymphoniaNormalizer;

struct DecodedPcm {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioNormalizer for SymphoniaNormalizer {
    fn normalize(
        &self,
        bytes: &[u8],
        declared_format: &str,
    ) -> Result<NormalizedAudio, NormalizeError> {
        let decoded = decode_to_mono_pcm(bytes, declared_format)?;

        let samples = if decoded.sample_rate == NormalizedAudio::SAMPLE_RATE_HZ {
            decoded.samples
        } else {
            tracing::debug!(
                from_hz = decoded.sample_rate,
                to_hz = NormalizedAudio::SAMPLE_RATE_HZ,
                "Resampling audio"
            );
            resample(
                &decoded.samples,
                decoded.sample_rate,
                NormalizedAudio::SAMPLE_RATE_HZ,
            )?
        };

        tracing::debug!(
            samples = samples.len(),
            duration_secs = samples.len() as f32 / NormalizedAudio::SAMPLE_RATE_HZ as f32,
            "Audio normalized to 16kHz mono PCM"
        );

        Ok(NormalizedAudio::from_samples(samples))
    }
}

fn decode_to_mono_pcm(bytes: &[u8], declared_format: &str) -> Result<DecodedPcm, NormalizeError> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());
    let mut hint = Hint::new();
    if !declared_format.is_empty() {
        hint.with_extension(declared_format);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| match e {
            SymphoniaError::Unsupported(what) => NormalizeError::UnsupportedFormat(what.to_string()),
            other => decode_error("probe", other),
        })?;

    let mut format = probed.format;
    let track = format.default_track().ok_or_else(|| NormalizeError::Decode {
        step: "probe",
        detail: "no audio track found".to_string(),
    })?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let sample_rate = codec_params.sample_rate.ok_or_else(|| NormalizeError::Decode {
        step: "probe",
        detail: "unknown sample rate".to_string(),
    })?;
    let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1);

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| match e {
            SymphoniaError::Unsupported(what) => NormalizeError::UnsupportedFormat(what.to_string()),
            other => decode_error("codec", other),
        })?;

    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(decode_error("read", e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                tracing::warn!(error = %e, "Skipping corrupt audio frame");
                continue;
            }
            Err(e) => return Err(decode_error("decode", e)),
        };

        let spec = *decoded.spec();
        let frames = decoded.frames();
        if frames == 0 {
            continue;
        }

        let mut buffer = SampleBuffer::<f32>::new(frames as u64, spec);
        buffer.copy_interleaved_ref(decoded);

        // Downmix to mono by averaging the channels of each frame.
        if channels > 1 {
            for frame in buffer.samples().chunks(channels) {
                samples.push(frame.iter().sum::<f32>() / channels as f32);
            }
        } else {
            samples.extend_from_slice(buffer.samples());
        }
    }

    if samples.is_empty() {
        return Err(NormalizeError::Decode {
            step: "decode",
            detail: "no audio samples decoded".to_string(),
        });
    }

    Ok(DecodedPcm {
        samples,
        sample_rate,
    })
}

fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, NormalizeError> {
    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = to_rate as f64 / from_rate as f64;
    let chunk_size = 1024;

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, chunk_size, 1)
        .map_err(|e| decode_error("resample", e))?;

    let expected_len = (samples.len() as f64 * ratio) as usize;
    let mut output = Vec::with_capacity(expected_len + chunk_size);

    for chunk in samples.chunks(chunk_size) {
        let input = if chunk.len() < chunk_size {
            let mut padded = chunk.to_vec();
            padded.resize(chunk_size, 0.0);
            padded
        } else {
            chunk.to_vec()
        };

        let result = resampler
            .process(&[input], None)
            .map_err(|e| decode_error("resample", e))?;

        if let Some(channel) = result.first() {
            output.extend_from_slice(channel);
        }
    }

    // The last chunk was zero-padded; trim back to the expected length.
    output.truncate(expected_len);

    Ok(output)
}

fn decode_error(step: &'static str, error: impl std::fmt::Display) -> NormalizeError {
    NormalizeError::Decode {
        step,
        detail: error.to_string(),
    }
}

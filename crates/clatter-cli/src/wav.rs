//! PCM16 mono WAV output. `clatter` itself never touches `hound`;
//! encoding the engine's `Samples` into a file is entirely the CLI's job,
//! keeping the library free of a hard dependency on any particular output
//! sink.

use std::path::Path;

use clatter::Samples;

pub fn write_pcm16(path: &Path, samples: &Samples) -> anyhow::Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: clatter::config::SR,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    let bytes = samples.to_pcm16_bytes();
    for chunk in bytes.chunks_exact(2) {
        let sample = i16::from_le_bytes([chunk[0], chunk[1]]);
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

pub fn write_pcm16_chunks(path: &Path, chunks: &[Samples]) -> anyhow::Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: clatter::config::SR,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for samples in chunks {
        let bytes = samples.to_pcm16_bytes();
        for chunk in bytes.chunks_exact(2) {
            let sample = i16::from_le_bytes([chunk[0], chunk[1]]);
            writer.write_sample(sample)?;
        }
    }
    writer.finalize()?;
    Ok(())
}

//! WAV file sink
//!
//! Renders playback into a canonical 44-byte-header RIFF/WAVE file instead
//! of a sound card. Silences are written as zero samples so the file keeps
//! the exact Morse timing.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use log::{debug, info};

use super::{AudioSink, PcmFormat};
use crate::errors::AudioError;

// WAVE format code for integer PCM
const WAVE_FORMAT_PCM: u16 = 1;

/// Size of the RIFF header written before the samples
pub const HEADER_LEN: u32 = 44;

/// Sink that writes PCM into a WAV file
#[derive(Debug)]
pub struct WavSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    data_len: u32,
}

impl WavSink {
    /// Create a sink that will write to `path` when opened
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            writer: None,
            data_len: 0,
        }
    }

    /// Bytes of sample data written since the last open
    pub fn data_len(&self) -> u32 {
        self.data_len
    }

    fn write_header<W: Write>(writer: &mut W, format: PcmFormat, data_len: u32) -> std::io::Result<()> {
        let block_align = format.channels * (format.bits_per_sample / 8);

        writer.write_all(b"RIFF")?;
        writer.write_all(&(HEADER_LEN - 8 + data_len).to_le_bytes())?;
        writer.write_all(b"WAVE")?;

        writer.write_all(b"fmt ")?;
        writer.write_all(&16u32.to_le_bytes())?;
        writer.write_all(&WAVE_FORMAT_PCM.to_le_bytes())?;
        writer.write_all(&format.channels.to_le_bytes())?;
        writer.write_all(&format.sample_rate.to_le_bytes())?;
        writer.write_all(&format.byte_rate().to_le_bytes())?;
        writer.write_all(&block_align.to_le_bytes())?;
        writer.write_all(&format.bits_per_sample.to_le_bytes())?;

        writer.write_all(b"data")?;
        writer.write_all(&data_len.to_le_bytes())?;
        Ok(())
    }
}

impl AudioSink for WavSink {
    fn open(&mut self, format: PcmFormat) -> Result<(), AudioError> {
        if format.bits_per_sample != 16 {
            return Err(AudioError::Format(format!(
                "WAV sink only writes 16-bit PCM, got {} bits",
                format.bits_per_sample
            )));
        }

        let file = File::create(&self.path).map_err(|e| {
            AudioError::Unavailable(format!("cannot create {}: {}", self.path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);

        // Sizes are patched on close
        Self::write_header(&mut writer, format, 0)?;

        debug!("Opened WAV output {:?} ({} Hz)", self.path, format.sample_rate);
        self.writer = Some(writer);
        self.data_len = 0;
        Ok(())
    }

    fn play_pcm(&mut self, pcm: &[u8]) -> Result<(), AudioError> {
        let writer = self.writer
            .as_mut()
            .ok_or_else(|| AudioError::Device("WAV sink is not open".to_string()))?;
        writer.write_all(pcm)?;
        self.data_len = self.data_len.saturating_add(pcm.len() as u32);
        Ok(())
    }

    fn close(&mut self) -> Result<(), AudioError> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };

        writer.seek(SeekFrom::Start(4))?;
        writer.write_all(&(HEADER_LEN - 8 + self.data_len).to_le_bytes())?;
        writer.seek(SeekFrom::Start(u64::from(HEADER_LEN) - 4))?;
        writer.write_all(&self.data_len.to_le_bytes())?;
        writer.flush()?;

        info!("Wrote {} bytes of audio to {:?}", self.data_len, self.path);
        Ok(())
    }

    fn renders_silence(&self) -> bool {
        true
    }
}

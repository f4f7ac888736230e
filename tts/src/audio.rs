//! PCM frames and the byte-to-frame reassembly buffer.

use std::time::Duration;
use tracing::warn;

/// Output sample rate of the synthesizer.
pub const SAMPLE_RATE: u32 = 44_100;
/// Output channel count of the synthesizer.
pub const NUM_CHANNELS: u32 = 1;

const BYTES_PER_SAMPLE: usize = 2;

/// Interleaved signed 16-bit PCM audio.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioFrame {
    pub data: Vec<i16>,
    pub sample_rate: u32,
    pub num_channels: u32,
    pub samples_per_channel: u32,
}

impl AudioFrame {
    /// Decode little-endian PCM. `bytes` must hold whole samples for every channel.
    pub fn from_le_bytes(bytes: &[u8], sample_rate: u32, num_channels: u32) -> Self {
        let data: Vec<i16> = bytes
            .chunks_exact(BYTES_PER_SAMPLE)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();
        let samples_per_channel = (data.len() / num_channels.max(1) as usize) as u32;
        Self {
            data,
            sample_rate,
            num_channels,
            samples_per_channel,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_nanos(
            self.samples_per_channel as u64 * 1_000_000_000 / self.sample_rate.max(1) as u64,
        )
    }
}

/// Accumulates raw PCM bytes and cuts them into fixed-size [`AudioFrame`]s.
///
/// Bytes that do not yet fill a frame are retained until the next
/// [`write`](Self::write) or until [`flush`](Self::flush).
pub struct AudioByteStream {
    sample_rate: u32,
    num_channels: u32,
    bytes_per_frame: usize,
    buf: Vec<u8>,
}

impl AudioByteStream {
    /// Create a buffer yielding 100 ms frames.
    pub fn new(sample_rate: u32, num_channels: u32) -> Self {
        Self::with_samples_per_channel(sample_rate, num_channels, sample_rate / 10)
    }

    pub fn with_samples_per_channel(
        sample_rate: u32,
        num_channels: u32,
        samples_per_channel: u32,
    ) -> Self {
        Self {
            sample_rate,
            num_channels,
            bytes_per_frame: BYTES_PER_SAMPLE
                * num_channels.max(1) as usize
                * samples_per_channel.max(1) as usize,
            buf: Vec::new(),
        }
    }

    pub fn bytes_per_frame(&self) -> usize {
        self.bytes_per_frame
    }

    /// Append `data` and return every frame that is now complete.
    pub fn write(&mut self, data: &[u8]) -> Vec<AudioFrame> {
        self.buf.extend_from_slice(data);
        let mut frames = Vec::new();
        let mut start = 0;
        while self.buf.len() - start >= self.bytes_per_frame {
            let end = start + self.bytes_per_frame;
            frames.push(self.frame(&self.buf[start..end]));
            start = end;
        }
        self.buf.drain(..start);
        frames
    }

    /// Emit the retained bytes as a short final frame.
    ///
    /// Nothing is emitted when the buffer is empty. A trailing partial sample
    /// cannot be decoded and is dropped.
    pub fn flush(&mut self) -> Vec<AudioFrame> {
        if self.buf.is_empty() {
            return Vec::new();
        }
        let chunk = std::mem::take(&mut self.buf);
        if chunk.len() % (BYTES_PER_SAMPLE * self.num_channels.max(1) as usize) != 0 {
            warn!(len = chunk.len(), "incomplete sample during flush, dropping");
            return Vec::new();
        }
        vec![self.frame(&chunk)]
    }

    fn frame(&self, bytes: &[u8]) -> AudioFrame {
        AudioFrame::from_le_bytes(bytes, self.sample_rate, self.num_channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retains_partial_frame_until_flush() {
        let mut bstream = AudioByteStream::with_samples_per_channel(16_000, 1, 4);
        assert!(bstream.write(&[0; 6]).is_empty());
        let frames = bstream.write(&[1, 0, 2, 0, 3, 0]);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, vec![0, 0, 0, 1]);
        let tail = bstream.flush();
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].data, vec![2, 3]);
        assert_eq!(tail[0].samples_per_channel, 2);
        assert!(bstream.flush().is_empty());
    }

    #[test]
    fn large_block_splits_into_ordered_frames() {
        let mut bstream = AudioByteStream::with_samples_per_channel(16_000, 1, 2);
        let bytes: Vec<u8> = (0..21i16).flat_map(i16::to_le_bytes).collect();
        let frames = bstream.write(&bytes);
        assert_eq!(frames.len(), 10);
        assert_eq!(frames[0].data, vec![0, 1]);
        assert_eq!(frames[9].data, vec![18, 19]);
        let tail = bstream.flush();
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].data, vec![20]);
    }

    #[test]
    fn torn_sample_is_dropped() {
        let mut bstream = AudioByteStream::with_samples_per_channel(16_000, 1, 4);
        bstream.write(&[1, 0, 2]);
        assert!(bstream.flush().is_empty());
    }

    #[test]
    fn default_frame_is_100ms() {
        let bstream = AudioByteStream::new(SAMPLE_RATE, NUM_CHANNELS);
        assert_eq!(bstream.bytes_per_frame(), 8_820);
        let frame = AudioFrame::from_le_bytes(&[0; 8_820], SAMPLE_RATE, NUM_CHANNELS);
        assert_eq!(frame.duration(), Duration::from_millis(100));
    }
}

//! Owned channel buffers for kernel input and output.
//!
//! Each [`ChannelBuffers`] holds a set of equal-length sample buffers, one
//! per channel. The slice views passed to [`Kernel::compute`] are built
//! once, before warmup, so the timed loop never allocates.
//!
//! [`Kernel::compute`]: crate::Kernel::compute

use crate::error::Error;
use crate::kernel::Sample;

/// Maximum number of channels per direction.
pub const MAX_CHANNELS: usize = 256;

/// A set of equal-length per-channel sample buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelBuffers {
    frames: usize,
    data: Vec<Vec<Sample>>,
}

impl ChannelBuffers {
    /// Allocate `channels` zeroed buffers of `frames` samples each.
    ///
    /// # Errors
    ///
    /// [`Error::TooManyChannels`] above [`MAX_CHANNELS`],
    /// [`Error::InvalidBlockSize`] if `frames` is zero, and
    /// [`Error::Allocation`] if the buffers cannot be reserved.
    pub fn silence(channels: usize, frames: usize) -> Result<Self, Error> {
        Self::alloc("output", channels, frames)
    }

    /// Allocate `channels` buffers holding a unit impulse: the first frame
    /// is `1.0`, the rest are zero.
    ///
    /// # Errors
    ///
    /// Same as [`silence`](Self::silence).
    pub fn impulse(channels: usize, frames: usize) -> Result<Self, Error> {
        let mut buffers = Self::alloc("input", channels, frames)?;
        for channel in &mut buffers.data {
            channel[0] = 1.0;
        }
        Ok(buffers)
    }

    fn alloc(direction: &'static str, channels: usize, frames: usize) -> Result<Self, Error> {
        if channels > MAX_CHANNELS {
            return Err(Error::TooManyChannels {
                direction,
                count: channels,
                limit: MAX_CHANNELS,
            });
        }
        if frames == 0 {
            return Err(Error::InvalidBlockSize);
        }
        let mut data = Vec::with_capacity(channels);
        for _ in 0..channels {
            let mut channel = Vec::new();
            channel
                .try_reserve_exact(frames)
                .map_err(|_| Error::Allocation {
                    what: "frames per channel",
                    count: frames,
                })?;
            channel.resize(frames, 0.0);
            data.push(channel);
        }
        Ok(Self { frames, data })
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.data.len()
    }

    /// Length of every channel, in frames.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Borrow one channel, if it exists.
    pub fn channel(&self, index: usize) -> Option<&[Sample]> {
        self.data.get(index).map(Vec::as_slice)
    }

    /// Shared views of all channels, in order.
    pub fn as_slices(&self) -> Vec<&[Sample]> {
        self.data.iter().map(Vec::as_slice).collect()
    }

    /// Mutable views of all channels, in order.
    pub fn as_mut_slices(&mut self) -> Vec<&mut [Sample]> {
        self.data.iter_mut().map(Vec::as_mut_slice).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_layout() {
        let b = ChannelBuffers::impulse(2, 4).unwrap();
        assert_eq!(b.channels(), 2);
        assert_eq!(b.frames(), 4);
        for ch in b.as_slices() {
            assert_eq!(ch, &[1.0, 0.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn silence_is_zeroed() {
        let b = ChannelBuffers::silence(3, 8).unwrap();
        assert!(b.as_slices().iter().all(|ch| ch.iter().all(|&s| s == 0.0)));
        assert!(b.channel(3).is_none());
    }

    #[test]
    fn zero_channels_allowed() {
        let b = ChannelBuffers::impulse(0, 16).unwrap();
        assert_eq!(b.channels(), 0);
        assert!(b.as_slices().is_empty());
    }

    #[test]
    fn channel_limit() {
        assert!(ChannelBuffers::silence(MAX_CHANNELS, 1).is_ok());
        assert_eq!(
            ChannelBuffers::silence(MAX_CHANNELS + 1, 1),
            Err(Error::TooManyChannels {
                direction: "output",
                count: MAX_CHANNELS + 1,
                limit: MAX_CHANNELS,
            })
        );
    }

    #[test]
    fn zero_frames_rejected() {
        assert_eq!(ChannelBuffers::impulse(1, 0), Err(Error::InvalidBlockSize));
    }

    #[test]
    fn oversized_block_reported() {
        assert_eq!(
            ChannelBuffers::silence(1, usize::MAX),
            Err(Error::Allocation {
                what: "frames per channel",
                count: usize::MAX,
            })
        );
    }

    #[test]
    fn mut_slices_write_through() {
        let mut b = ChannelBuffers::silence(2, 2).unwrap();
        {
            let mut views = b.as_mut_slices();
            views[1][1] = 0.5;
        }
        assert_eq!(b.channel(1), Some(&[0.0, 0.5][..]));
    }
}

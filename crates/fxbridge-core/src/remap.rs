//! Channel remap transforms for interleaved stereo buffers.
//!
//! A filter owns two independent remaps: one applied to the input right
//! before the engine call, one applied to the output right after it. That
//! allows, for example, feeding the engine a mono-from-left signal while
//! swapping the channels of what comes back.
//!
//! Remaps are only meaningful for exactly two interleaved channels. Callers
//! check the channel count; [`ChannelRemap::apply`] itself just walks sample
//! pairs and leaves a trailing odd sample untouched.

use crate::error::Error;
use std::fmt;

/// In-place transform over `[L0, R0, L1, R1, ...]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelRemap {
    /// Leave the buffer unchanged (flag 0).
    #[default]
    Identity,
    /// Swap left and right samples pairwise (flag 1).
    Swap,
    /// Overwrite every right sample with its left sample (flag 2).
    FillRightFromLeft,
    /// Overwrite every left sample with its right sample (flag 3).
    FillLeftFromRight,
}

impl ChannelRemap {
    /// All remaps in flag order.
    pub const ALL: [ChannelRemap; 4] = [
        ChannelRemap::Identity,
        ChannelRemap::Swap,
        ChannelRemap::FillRightFromLeft,
        ChannelRemap::FillLeftFromRight,
    ];

    /// Numeric flag used by host option strings.
    pub fn flag(self) -> i32 {
        match self {
            ChannelRemap::Identity => 0,
            ChannelRemap::Swap => 1,
            ChannelRemap::FillRightFromLeft => 2,
            ChannelRemap::FillLeftFromRight => 3,
        }
    }

    /// Whether applying this remap can change a buffer.
    pub fn is_identity(self) -> bool {
        self == ChannelRemap::Identity
    }

    /// Apply the transform in place to an interleaved stereo buffer.
    ///
    /// # Example
    /// ```rust
    /// use fxbridge_core::ChannelRemap;
    ///
    /// let mut buf = [1i16, 2, 3, 4];
    /// ChannelRemap::Swap.apply(&mut buf);
    /// assert_eq!(buf, [2, 1, 4, 3]);
    /// ```
    pub fn apply<T: Copy>(self, interleaved: &mut [T]) {
        match self {
            ChannelRemap::Identity => {}
            ChannelRemap::Swap => {
                for pair in interleaved.chunks_exact_mut(2) {
                    pair.swap(0, 1);
                }
            }
            ChannelRemap::FillRightFromLeft => {
                for pair in interleaved.chunks_exact_mut(2) {
                    pair[1] = pair[0];
                }
            }
            ChannelRemap::FillLeftFromRight => {
                for pair in interleaved.chunks_exact_mut(2) {
                    pair[0] = pair[1];
                }
            }
        }
    }
}

impl TryFrom<i32> for ChannelRemap {
    type Error = Error;

    fn try_from(flag: i32) -> Result<Self, Self::Error> {
        match flag {
            0 => Ok(ChannelRemap::Identity),
            1 => Ok(ChannelRemap::Swap),
            2 => Ok(ChannelRemap::FillRightFromLeft),
            3 => Ok(ChannelRemap::FillLeftFromRight),
            other => Err(Error::InvalidRemap(other)),
        }
    }
}

impl fmt::Display for ChannelRemap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelRemap::Identity => "identity",
            ChannelRemap::Swap => "swap",
            ChannelRemap::FillRightFromLeft => "fill-right-from-left",
            ChannelRemap::FillLeftFromRight => "fill-left-from-right",
        };
        f.write_str(name)
    }
}

//! fxbridge Core - types shared between filters and effect engines
//!
//! This crate holds the pieces of the adaptation layer that do not depend on
//! any particular engine or host pipeline.
//!
//! # Core Abstractions
//!
//! ## Streams
//!
//! - [`StreamFormat`] - Channel count + sample rate; identity of a bound engine
//! - [`AudioFrame`] - Interleaved 16-bit PCM frame with a presentation timestamp
//!
//! ## Engines
//!
//! - [`EffectEngine`] - Handle-based capability trait every engine family implements
//! - [`EngineConfig`] - Record passed to `create`
//! - [`EngineBuffer`] - Engine output in its native [`SampleForm`]
//! - [`EffectParams`] - Static per-family parameters
//!
//! ## Sample Handling
//!
//! - [`convert`] - Fixed-point ↔ 16-bit PCM bridge with pinned rounding
//! - [`ChannelRemap`] - Swap/fill transforms for interleaved stereo
//!
//! ## Sessions
//!
//! - [`SessionIdAllocator`] - Atomic allocator of collision-free id triples
//!
//! # Example
//!
//! ```rust
//! use fxbridge_core::{AudioFrame, ChannelRemap, SessionIdAllocator};
//!
//! let mut frame = AudioFrame::new(2, 16000, vec![1, 2, 3, 4]).unwrap();
//! ChannelRemap::Swap.apply(frame.samples_mut());
//! assert_eq!(frame.samples(), &[2, 1, 4, 3]);
//!
//! let allocator = SessionIdAllocator::new();
//! let ids = allocator.allocate();
//! assert_eq!(ids.receive_id, ids.send_id + 1);
//! ```

pub mod convert;
pub mod engine;
pub mod error;
pub mod format;
pub mod frame;
pub mod params;
pub mod remap;
pub mod session;

pub use convert::SampleForm;
pub use engine::{EffectEngine, EngineBuffer, EngineConfig};
pub use error::{EngineError, Error, Result};
pub use format::StreamFormat;
pub use frame::AudioFrame;
pub use params::{
    EQ_BANDS, EffectParams, ReverbSettings, SuppressionLevel, TunerSettings, reverb_pattern,
};
pub use remap::ChannelRemap;
pub use session::{SessionIdAllocator, SessionIds};

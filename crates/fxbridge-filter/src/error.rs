//! Error type for the filter layer.

use fxbridge_core::{EngineError, StreamFormat};
use std::collections::TryReserveError;
use thiserror::Error;

/// Errors surfaced by [`EffectFilter`](crate::EffectFilter) operations.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The engine returned no handle for the requested format.
    ///
    /// The frame is dropped and the filter stays unbound; the next frame
    /// attempts creation again.
    #[error("failed to create {engine} engine for {format}")]
    EngineInit {
        /// Engine family name.
        engine: &'static str,
        /// Format the engine was asked to bind to.
        format: StreamFormat,
    },

    /// The output buffer could not be reserved.
    #[error("failed to allocate output buffer: {0}")]
    Allocation(#[from] TryReserveError),

    /// A live control request arrived while no engine is bound.
    #[error("no engine instance is bound")]
    NotBound,

    /// An equalizer update payload could not be parsed.
    #[error("malformed equalizer update {input:?}: {reason}")]
    MalformedUpdate {
        /// Raw payload.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A host command this filter does not handle.
    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    /// The engine failed while processing.
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// The input frame was invalid.
    #[error("invalid frame: {0}")]
    Frame(#[from] fxbridge_core::Error),
}

/// Convenience result type for filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;

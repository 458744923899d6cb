//! Error types for the barrelcad kernel facade.

use barrelcad_kernel_lathe::LatheError;
use barrelcad_kernel_profile::ProfileError;
use thiserror::Error;

/// Errors raised while validating or evaluating a barrel.
#[derive(Debug, Clone, Error)]
pub enum KernelError {
    /// A dimension is not a positive finite number.
    #[error("{field} must be a positive number, got {value}")]
    InvalidDimension {
        /// Offending field.
        field: &'static str,
        /// Supplied value.
        value: f64,
    },

    /// A taper is negative or longer than the barrel.
    #[error("{field} must lie within [0, {length}], got {value}")]
    TaperOutOfRange {
        /// Offending field.
        field: &'static str,
        /// Supplied value.
        value: f64,
        /// Barrel length.
        length: f64,
    },

    /// A bore depth is negative or deeper than the barrel.
    #[error("{field} must lie within [0, {length}], got {value}")]
    BoreOutOfRange {
        /// Offending field.
        field: &'static str,
        /// Supplied value.
        value: f64,
        /// Barrel length.
        length: f64,
    },

    /// The two bores together are deeper than the barrel is long.
    #[error("bores of {front} + {rear} mm exceed the barrel length {length} mm")]
    BoresExceedLength {
        /// Front bore depth.
        front: f64,
        /// Rear bore depth.
        rear: f64,
        /// Barrel length.
        length: f64,
    },

    /// Material density is negative or not finite.
    #[error("material density must be a non-negative number, got {0}")]
    InvalidDensity(f64),

    /// A cut zone has out-of-range bounds or pattern properties.
    #[error("cut '{id}': {reason}")]
    InvalidCut {
        /// Cut identifier.
        id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// No cut zone has the given identifier.
    #[error("no cut with id '{0}'")]
    UnknownCut(String),

    /// Two cut zones share an identifier.
    #[error("duplicate cut id '{0}'")]
    DuplicateCutId(String),

    /// Two profile cut zones overlap axially.
    #[error("cuts '{first}' and '{second}' overlap")]
    OverlappingCuts {
        /// Earlier cut.
        first: String,
        /// Later cut.
        second: String,
    },

    /// Kernel configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Profile construction failed.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Mesh construction failed.
    #[error(transparent)]
    Lathe(#[from] LatheError),
}

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, KernelError>;

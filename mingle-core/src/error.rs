//! Error types for the mingle core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error raised while validating a generator configuration.
///
/// Every variant is fatal: validation runs before any sampling so a rejected
/// configuration never produces partial output.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Residency cannot be drawn without at least one place.
    #[error("generation requires at least one place when people are present")]
    NoPlaces,
    /// The pairwise `knows` relation needs at least two people.
    #[error("population must contain at least two people (got {got})")]
    PopulationTooSmall {
        /// Population size supplied by the caller.
        got: usize,
    },
    /// A floating-point parameter was NaN or infinite.
    #[error("parameter `{parameter}` must be finite")]
    NonFiniteParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
    },
    /// The places-lived standard deviation was negative.
    #[error("places-lived standard deviation must be non-negative (got {got})")]
    NegativeStandardDeviation {
        /// Value supplied by the caller.
        got: f64,
    },
    /// The local-likes variance was negative.
    #[error("local-likes variance must be non-negative (got {got})")]
    NegativeVariance {
        /// Value supplied by the caller.
        got: f64,
    },
    /// The target ratio fell outside the unit interval.
    #[error("target ratio must lie in [0, 1] (got {got})")]
    TargetRatioOutOfRange {
        /// Value supplied by the caller.
        got: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`ConfigError`] variants.
    enum ConfigErrorCode for ConfigError {
        /// Residency cannot be drawn without at least one place.
        NoPlaces => NoPlaces => "MINGLE_CONFIG_NO_PLACES",
        /// The pairwise `knows` relation needs at least two people.
        PopulationTooSmall => PopulationTooSmall { .. } => "MINGLE_CONFIG_POPULATION_TOO_SMALL",
        /// A floating-point parameter was NaN or infinite.
        NonFiniteParameter => NonFiniteParameter { .. } => "MINGLE_CONFIG_NON_FINITE_PARAMETER",
        /// The places-lived standard deviation was negative.
        NegativeStandardDeviation => NegativeStandardDeviation { .. } =>
            "MINGLE_CONFIG_NEGATIVE_STANDARD_DEVIATION",
        /// The local-likes variance was negative.
        NegativeVariance => NegativeVariance { .. } => "MINGLE_CONFIG_NEGATIVE_VARIANCE",
        /// The target ratio fell outside the unit interval.
        TargetRatioOutOfRange => TargetRatioOutOfRange { .. } =>
            "MINGLE_CONFIG_TARGET_RATIO_OUT_OF_RANGE",
    }
}

/// An error raised while generating or serializing a dataset.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The configuration was rejected before generation started.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Writing an output file failed.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Serializing the metadata record failed.
    #[error("failed to serialize run metadata: {source}")]
    Metadata {
        /// Error raised by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

define_error_codes! {
    /// Stable codes describing [`DatasetError`] variants.
    enum DatasetErrorCode for DatasetError {
        /// The configuration was rejected before generation started.
        Config => Config { .. } => "MINGLE_DATASET_CONFIG",
        /// Writing an output file failed.
        Io => Io { .. } => "MINGLE_DATASET_IO",
        /// Serializing the metadata record failed.
        Metadata => Metadata { .. } => "MINGLE_DATASET_METADATA",
    }
}

impl DatasetError {
    /// Retrieve the inner [`ConfigErrorCode`] when the error originated in
    /// configuration validation.
    pub const fn config_code(&self) -> Option<ConfigErrorCode> {
        match self {
            Self::Config(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, DatasetError>;

//! Error types.
//!
//! All variants carry only fixed-size data so the enums stay `Copy` and
//! work without `alloc`. Errors only arise while building scripts, targets
//! and configuration; servicing the running sequencer cannot fail.

/// Script construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScriptError {
    /// No cues provided.
    Empty,

    /// Script capacity exceeded.
    CapacityExceeded,

    /// A defcon cue addresses an LED that does not exist.
    DefconIndexOutOfRange(usize),
}

impl core::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ScriptError::Empty => write!(f, "script must have at least one cue"),
            ScriptError::CapacityExceeded => write!(f, "script capacity exceeded"),
            ScriptError::DefconIndexOutOfRange(index) => {
                write!(f, "defcon LED {} does not exist", index)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ScriptError {}

/// Codebreak target validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodebreakError {
    /// The code has more characters than the display has digits.
    CodeTooLong { len: usize, max: usize },

    /// The solve order is empty.
    EmptyOrder,

    /// A solve position lies outside the display.
    PositionOutOfRange(usize),

    /// A solve position appears twice.
    DuplicatePosition(usize),
}

impl core::fmt::Display for CodebreakError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CodebreakError::CodeTooLong { len, max } => {
                write!(f, "code has {} characters, display holds {}", len, max)
            }
            CodebreakError::EmptyOrder => write!(f, "solve order must not be empty"),
            CodebreakError::PositionOutOfRange(pos) => {
                write!(f, "solve position {} is outside the display", pos)
            }
            CodebreakError::DuplicatePosition(pos) => {
                write!(f, "solve position {} appears more than once", pos)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CodebreakError {}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Timezone offset outside -12..=14 hours.
    TimezoneOutOfRange(i8),

    /// Debounce interval of zero.
    ZeroDebounce,

    /// Solve interval bounds are zero or inverted.
    InvalidSolveInterval { min_ms: u32, max_ms: u32 },

    /// Solve interval multiplier is not a positive finite number.
    InvalidSolveMultiplier,

    /// Scaled solve interval exceeds the limit.
    SolveIntervalTooLong { max_ms: u32 },

    /// Marquee step of zero.
    ZeroMarqueeStep,

    /// Marquee message does not fit a script.
    MessageTooLong { len: usize, max: usize },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::TimezoneOutOfRange(hours) => {
                write!(f, "timezone offset {}h outside -12..=14", hours)
            }
            ConfigError::ZeroDebounce => write!(f, "debounce interval must be non-zero"),
            ConfigError::InvalidSolveInterval { min_ms, max_ms } => {
                write!(f, "invalid solve interval {}..={} ms", min_ms, max_ms)
            }
            ConfigError::InvalidSolveMultiplier => {
                write!(f, "solve interval multiplier must be positive and finite")
            }
            ConfigError::SolveIntervalTooLong { max_ms } => {
                write!(f, "scaled solve interval exceeds {} ms", max_ms)
            }
            ConfigError::ZeroMarqueeStep => write!(f, "marquee step must be non-zero"),
            ConfigError::MessageTooLong { len, max } => {
                write!(f, "marquee message has {} characters, limit is {}", len, max)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Top-level error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    Config(ConfigError),
    Script(ScriptError),
    Codebreak(CodebreakError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(err) => write!(f, "config error: {}", err),
            Error::Script(err) => write!(f, "script error: {}", err),
            Error::Codebreak(err) => write!(f, "codebreak error: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<ScriptError> for Error {
    fn from(err: ScriptError) -> Self {
        Error::Script(err)
    }
}

impl From<CodebreakError> for Error {
    fn from(err: CodebreakError) -> Self {
        Error::Codebreak(err)
    }
}

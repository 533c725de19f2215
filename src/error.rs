//! Error module for the Rusty STTC library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
///
/// The raw kernel ([`crate::sttc::compute_sttc`]) never fails: these errors are only produced by the
/// checked layer ([`crate::sttc::Sttc`], [`crate::spike_train`]) and by file input.
#[derive(Debug, PartialEq)]
pub enum SttcError {
    /// Error for an invalid coincidence tolerance, e.g., negative or NaN.
    InvalidTolerance(String),
    /// Error for an invalid recording window, e.g., end not after start.
    InvalidWindow(String),
    /// Error for invalid spike times, e.g., NaN or infinite values.
    InvalidSpikeTimes(String),
    /// Error for spike times which are not in ascending order.
    UnsortedSpikeTimes { t1: f64, t2: f64 },
    /// Error for a spike time lying outside the recording window.
    OutOfWindow { time: f64, start: f64, end: f64 },
    /// Error for invalid parameters
    InvalidParameter(String),
    /// Error for I/O operations.
    IOError(String),
    /// Error while decoding an input file.
    ParseError(String),
}

impl fmt::Display for SttcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SttcError::InvalidTolerance(e) => write!(f, "Invalid tolerance: {}", e),
            SttcError::InvalidWindow(e) => write!(f, "Invalid recording window: {}", e),
            SttcError::InvalidSpikeTimes(e) => write!(f, "Invalid spike times: {}", e),
            SttcError::UnsortedSpikeTimes { t1, t2 } => {
                write!(f, "Spike times are not sorted: {} comes before {}", t1, t2)
            }
            SttcError::OutOfWindow { time, start, end } => write!(
                f,
                "Spike time {} lies outside the recording window [{}, {}]",
                time, start, end
            ),
            SttcError::InvalidParameter(e) => write!(f, "Invalid parameters: {}", e),
            SttcError::IOError(e) => write!(f, "I/O error: {}", e),
            SttcError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl Error for SttcError {}

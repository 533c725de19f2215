//! Reading and writing a pair of spike trains, with their recording window, as JSON.
//!
//! The expected layout is
//!
//! ```json
//! {
//!     "window": { "start": 0.0, "end": 1.0 },
//!     "dt": 0.05,
//!     "train_a": [0.1, 0.2, 0.3],
//!     "train_b": [0.11, 0.21, 0.31]
//! }
//! ```
//!
//! where `dt` is optional. Spike times are sorted on load.
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SttcError;
use crate::spike_train::{RecordingWindow, SpikeTrain};
use crate::sttc::Sttc;

/// A pair of spike trains recorded over a common window.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PairInput {
    /// The recording window.
    pub window: RecordingWindow,
    /// The coincidence tolerance, if stored alongside the spike trains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt: Option<f64>,
    /// The spike train of the first electrode.
    pub train_a: SpikeTrain,
    /// The spike train of the second electrode.
    pub train_b: SpikeTrain,
}

impl PairInput {
    /// Save the pair to a JSON file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), SttcError> {
        let file = File::create(path).map_err(|e| SttcError::IOError(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| SttcError::IOError(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| SttcError::IOError(e.to_string()))
    }

    /// Load a pair from a JSON file, validating the window and sorting the spike times.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<PairInput, SttcError> {
        let file = File::open(path).map_err(|e| SttcError::IOError(e.to_string()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| SttcError::ParseError(e.to_string()))
    }

    /// Build the STTC measure for this pair, with optional overrides of the stored parameters.
    ///
    /// A given `dt` takes precedence over the stored one, and each given bound replaces the stored one.
    /// Returns an error if no tolerance is available at all or if the resulting window is invalid.
    pub fn resolve(
        &self,
        dt: Option<f64>,
        start: Option<f64>,
        end: Option<f64>,
    ) -> Result<Sttc, SttcError> {
        let window = match (start, end) {
            (None, None) => self.window,
            (start, end) => RecordingWindow::new(
                start.unwrap_or(self.window.start()),
                end.unwrap_or(self.window.end()),
            )?,
        };
        let dt = dt.or(self.dt).ok_or_else(|| {
            SttcError::InvalidParameter(
                "no tolerance given, either pass --dt or store dt in the input file".to_string(),
            )
        })?;

        Sttc::new(dt, window)
    }
}

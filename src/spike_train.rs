//! Module implementing the spike trains and recording windows fed to the STTC.
//!
//! Both types validate their content on construction, so that a [`SpikeTrain`] is always sorted
//! and finite and a [`RecordingWindow`] always has positive duration.
use itertools::Itertools;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Poisson;
use serde::{Deserialize, Serialize};

use crate::error::SttcError;

/// Raw window bounds, as found in input files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct WindowBounds {
    start: f64,
    end: f64,
}

/// The observation interval [start, end] of a recording, in seconds.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds", into = "WindowBounds")]
pub struct RecordingWindow {
    start: f64,
    end: f64,
}

impl RecordingWindow {
    /// Create a recording window from its bounds.
    /// The function returns an error if a bound is not finite or if the window is empty.
    pub fn new(start: f64, end: f64) -> Result<Self, SttcError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(SttcError::InvalidWindow(format!(
                "the bounds must be finite, got [{}, {}]",
                start, end
            )));
        }
        if end <= start {
            return Err(SttcError::InvalidWindow(format!(
                "the end ({}) must come after the start ({})",
                end, start
            )));
        }
        Ok(RecordingWindow { start, end })
    }

    /// Returns the start of the recording.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Returns the end of the recording.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns the length of the recording.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Returns whether the time lies in the window, bounds included.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }
}

impl TryFrom<WindowBounds> for RecordingWindow {
    type Error = SttcError;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        RecordingWindow::new(bounds.start, bounds.end)
    }
}

impl From<RecordingWindow> for WindowBounds {
    fn from(window: RecordingWindow) -> Self {
        WindowBounds {
            start: window.start,
            end: window.end,
        }
    }
}

/// Represents the (ascending) spike times recorded on a single electrode.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct SpikeTrain {
    times: Vec<f64>,
}

impl SpikeTrain {
    /// Create a spike train from the provided spike times.
    /// If necessary, the times are sorted.
    /// The function returns an error for non-finite times.
    pub fn build(times: &[f64]) -> Result<Self, SttcError> {
        if let Some(t) = times.iter().find(|t| !t.is_finite()) {
            return Err(SttcError::InvalidSpikeTimes(format!(
                "{} is not a finite time",
                t
            )));
        }

        let mut times = times.to_vec();
        times.sort_by(|t1, t2| {
            t1.partial_cmp(t2)
                .unwrap_or_else(|| panic!("Comparison failed: NaN values should have been caught earlier"))
        });

        Ok(SpikeTrain { times })
    }

    /// Create a spike train from times which are expected to be sorted already.
    /// Unlike [`SpikeTrain::build`], the times are never reordered: the first pair out of order is reported.
    pub fn from_sorted(times: Vec<f64>) -> Result<Self, SttcError> {
        if let Some(t) = times.iter().find(|t| !t.is_finite()) {
            return Err(SttcError::InvalidSpikeTimes(format!(
                "{} is not a finite time",
                t
            )));
        }

        if let Some((&t1, &t2)) = times.iter().tuple_windows().find(|(t1, t2)| t1 > t2) {
            return Err(SttcError::UnsortedSpikeTimes { t1, t2 });
        }

        Ok(SpikeTrain { times })
    }

    /// Samples a homogeneous Poisson spike train with the given firing rate (in Hz) over the window.
    ///
    /// # Parameters
    /// - `firing_rate`: The expected number of spikes per second.
    /// - `window`: The recording window to fill.
    /// - `rng`: A mutable reference to a random number generator implementing the `Rng` trait.
    pub fn rand<R: Rng>(
        firing_rate: f64,
        window: &RecordingWindow,
        rng: &mut R,
    ) -> Result<Self, SttcError> {
        if !firing_rate.is_finite() || firing_rate < 0.0 {
            return Err(SttcError::InvalidParameter(format!(
                "the firing rate must be a non-negative number, got {}",
                firing_rate
            )));
        }

        if firing_rate == 0.0 {
            return Ok(SpikeTrain::default());
        }

        let expected_num_spikes = firing_rate * window.duration();
        if !expected_num_spikes.is_finite() {
            return Err(SttcError::InvalidParameter(format!(
                "the expected number of spikes overflows, got {} Hz over {} s",
                firing_rate,
                window.duration()
            )));
        }

        // Draw the number of spikes first, then place them uniformly over the window
        let num_spikes_dist = Poisson::new(expected_num_spikes)
            .map_err(|e| SttcError::InvalidParameter(e.to_string()))?;
        let num_spikes: f64 = num_spikes_dist.sample(rng);

        let uniform = Uniform::new_inclusive(window.start(), window.end());
        let mut times: Vec<f64> = (0..num_spikes as usize)
            .map(|_| uniform.sample(rng))
            .collect();
        times.sort_by(|t1, t2| t1.total_cmp(t2));

        Ok(SpikeTrain { times })
    }

    /// Returns the spike times, in ascending order.
    pub fn times(&self) -> &[f64] {
        &self.times[..]
    }

    /// Returns the number of spikes.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns whether the electrode never fired.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

impl TryFrom<Vec<f64>> for SpikeTrain {
    type Error = SttcError;

    fn try_from(times: Vec<f64>) -> Result<Self, Self::Error> {
        SpikeTrain::build(&times)
    }
}

impl From<SpikeTrain> for Vec<f64> {
    fn from(spike_train: SpikeTrain) -> Self {
        spike_train.times
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    const SEED: u64 = 42;

    #[test]
    fn test_recording_window_new() {
        let window = RecordingWindow::new(1.0, 11.0).unwrap();
        assert_eq!(window.start(), 1.0);
        assert_eq!(window.end(), 11.0);
        assert_eq!(window.duration(), 10.0);

        assert!(window.contains(1.0));
        assert!(window.contains(11.0));
        assert!(!window.contains(0.5));
        assert!(!window.contains(11.5));

        // Test empty and inverted windows
        assert!(matches!(
            RecordingWindow::new(1.0, 1.0),
            Err(SttcError::InvalidWindow(_))
        ));
        assert!(matches!(
            RecordingWindow::new(2.0, 1.0),
            Err(SttcError::InvalidWindow(_))
        ));

        // Test non-finite bounds
        assert!(matches!(
            RecordingWindow::new(0.0, f64::INFINITY),
            Err(SttcError::InvalidWindow(_))
        ));
        assert!(matches!(
            RecordingWindow::new(f64::NAN, 1.0),
            Err(SttcError::InvalidWindow(_))
        ));
    }

    #[test]
    fn test_spike_train_build() {
        // Test valid spike trains with unsorted times
        let spike_train = SpikeTrain::build(&[0.0, 2.0, 5.0]).unwrap();
        assert_eq!(spike_train.times(), &[0.0, 2.0, 5.0]);

        let spike_train = SpikeTrain::build(&[0.0, 5.0, 2.0]).unwrap();
        assert_eq!(spike_train.times(), &[0.0, 2.0, 5.0]);

        // Test coincident spikes, which are allowed
        let spike_train = SpikeTrain::build(&[1.0, 1.0]).unwrap();
        assert_eq!(spike_train.len(), 2);

        // Test empty spike train
        let spike_train = SpikeTrain::build(&[]).unwrap();
        assert_eq!(spike_train.times(), &[] as &[f64]);
        assert!(spike_train.is_empty());

        // Test invalid spike train (NaN values)
        assert!(matches!(
            SpikeTrain::build(&[0.0, 5.0, f64::NAN]),
            Err(SttcError::InvalidSpikeTimes(_))
        ));
    }

    #[test]
    fn test_spike_train_from_sorted() {
        let spike_train = SpikeTrain::from_sorted(vec![0.5, 0.5, 3.0]).unwrap();
        assert_eq!(spike_train.times(), &[0.5, 0.5, 3.0]);

        assert_eq!(
            SpikeTrain::from_sorted(vec![0.5, 3.0, 2.0, 4.0]),
            Err(SttcError::UnsortedSpikeTimes { t1: 3.0, t2: 2.0 })
        );

        assert!(matches!(
            SpikeTrain::from_sorted(vec![0.5, f64::INFINITY]),
            Err(SttcError::InvalidSpikeTimes(_))
        ));
    }

    #[test]
    fn test_spike_train_rand() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let window = RecordingWindow::new(5.0, 105.0).unwrap();

        // Test invalid parameters
        assert!(matches!(
            SpikeTrain::rand(-1.0, &window, &mut rng),
            Err(SttcError::InvalidParameter(_))
        ));
        assert!(matches!(
            SpikeTrain::rand(f64::NAN, &window, &mut rng),
            Err(SttcError::InvalidParameter(_))
        ));

        // Test silent electrode
        assert!(SpikeTrain::rand(0.0, &window, &mut rng).unwrap().is_empty());

        // Test sorted times inside the window, with roughly the expected number of spikes
        let spike_train = SpikeTrain::rand(10.0, &window, &mut rng).unwrap();
        assert!(spike_train.times().windows(2).all(|ts| ts[0] <= ts[1]));
        assert!(spike_train.times().iter().all(|t| window.contains(*t)));
        assert!(spike_train.len() > 800 && spike_train.len() < 1200);
    }

    #[test]
    fn test_spike_train_rand_large_offset() {
        let mut rng = StdRng::seed_from_u64(SEED);

        // Around 1e16 consecutive floats are 2.0 apart, far more than the mean inter-spike interval
        let window = RecordingWindow::new(1e16, 1e16 + 64.0).unwrap();
        let spike_train = SpikeTrain::rand(10.0, &window, &mut rng).unwrap();
        assert!(spike_train.len() > 500 && spike_train.len() < 800);
        assert!(spike_train.times().windows(2).all(|ts| ts[0] <= ts[1]));
        assert!(spike_train.times().iter().all(|t| window.contains(*t)));

        // A high rate over a short window with a large offset
        let window = RecordingWindow::new(1e9, 1e9 + 1.0).unwrap();
        let spike_train = SpikeTrain::rand(1e5, &window, &mut rng).unwrap();
        assert!(spike_train.len() > 98_000 && spike_train.len() < 102_000);
        assert!(spike_train.times().iter().all(|t| window.contains(*t)));

        // Overflowing expected number of spikes
        let window = RecordingWindow::new(0.0, 1e300).unwrap();
        assert!(matches!(
            SpikeTrain::rand(1e10, &window, &mut rng),
            Err(SttcError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_serde() {
        let spike_train: SpikeTrain = serde_json::from_str("[3.0, 1.0, 2.0]").unwrap();
        assert_eq!(spike_train.times(), &[1.0, 2.0, 3.0]);
        assert_eq!(serde_json::to_string(&spike_train).unwrap(), "[1.0,2.0,3.0]");

        let window: RecordingWindow = serde_json::from_str(r#"{"start": 0.0, "end": 2.5}"#).unwrap();
        assert_eq!(window, RecordingWindow::new(0.0, 2.5).unwrap());
        assert!(serde_json::from_str::<RecordingWindow>(r#"{"start": 3.0, "end": 2.5}"#).is_err());
    }
}

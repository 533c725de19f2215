//! Spike Time Tiling Coefficient (STTC) between two spike trains.
//!
//! The coefficient combines, for a pair of electrodes A and B recorded over the same window,
//! - the fractions `TA`, `TB` of the recording covered by the tiles `[t - dt, t + dt]` around the spikes of each train,
//! - the fractions `PA`, `PB` of spikes of each train with at least one spike of the other train within `dt`,
//!
//! into `0.5 (PA - TB) / (1 - TB PA) + 0.5 (PB - TA) / (1 - TA PB)`.
//!
//! Two entry points are provided: [`compute_sttc`], the unchecked kernel operating on plain slices, and [`Sttc`],
//! which validates its parameters and inputs before delegating to the kernel.
//!
//! # Examples
//!
//! ```
//! use approx::assert_relative_eq;
//! use rusty_sttc::spike_train::{RecordingWindow, SpikeTrain};
//! use rusty_sttc::sttc::Sttc;
//!
//! let window = RecordingWindow::new(0.0, 1.0).unwrap();
//! let sttc = Sttc::new(0.05, window).unwrap();
//!
//! let spike_train_a = SpikeTrain::build(&[0.1, 0.2, 0.3]).unwrap();
//! let spike_train_b = SpikeTrain::build(&[0.11, 0.21, 0.31]).unwrap();
//!
//! let coefficient = sttc.measure(&spike_train_a, &spike_train_b).unwrap();
//! assert_relative_eq!(coefficient, 1.0, epsilon = 1e-12);
//! ```
use itertools::Itertools;

use crate::error::SttcError;
use crate::spike_train::{RecordingWindow, SpikeTrain};

/// Removes the part of the tile around the first spike lying before the start of the recording.
fn clip_start(tiled: f64, first: f64, dt: f64, start: f64) -> f64 {
    tiled - start + first - dt
}

/// Removes the part of the tile around the last spike lying after the end of the recording.
fn clip_end(tiled: f64, last: f64, dt: f64, end: f64) -> f64 {
    tiled - last - dt + end
}

/// Total duration covered by the union of the tiles `[t - dt, t + dt]` around the spikes, clipped to `[start, end]`.
///
/// The times must be sorted. No clamping is applied to the result.
///
/// A single spike only gets one of its two boundary corrections (the start one first), whereas longer trains get both.
/// With a tile wider than the window, a single spike can thus cover more than the recording itself.
pub(crate) fn tiled_duration(times: &[f64], dt: f64, start: f64, end: f64) -> f64 {
    let tiled = 2.0 * times.len() as f64 * dt;

    match times {
        [] => 0.0,
        [only] => {
            if only - start < dt {
                clip_start(tiled, *only, dt, start)
            } else if only + dt > end {
                clip_end(tiled, *only, dt, end)
            } else {
                tiled
            }
        }
        [first, .., last] => {
            // Subtract the overlap between consecutive tiles
            let mut tiled = times
                .iter()
                .tuple_windows()
                .map(|(t1, t2)| t2 - t1)
                .filter(|gap| *gap < 2.0 * dt)
                .fold(tiled, |tiled, gap| tiled - 2.0 * dt + gap);

            // Within-train overlaps are accounted for, only the outermost tiles can cross the boundaries
            if first - start < dt {
                tiled = clip_start(tiled, *first, dt, start);
            }
            if end - last < dt {
                tiled = clip_end(tiled, *last, dt, end);
            }
            tiled
        }
    }
}

/// Number of spikes in `times_a` with at least one spike of `times_b` within `dt`.
///
/// Both trains must be sorted: the cursor into `times_b` only moves forward, so the sweep is linear in the total number of spikes.
/// A spike of `times_b` can be matched by several spikes of `times_a`.
pub(crate) fn tolerance_match_count(times_a: &[f64], times_b: &[f64], dt: f64) -> usize {
    let mut count = 0;
    let mut j = 0;

    for &time_a in times_a {
        while let Some(&time_b) = times_b.get(j) {
            if (time_a - time_b).abs() <= dt {
                count += 1;
                break;
            } else if time_b > time_a {
                break;
            }
            j += 1;
        }
    }

    count
}

/// Computes the STTC between the first `n1` spikes of `times_a` and the first `n2` spikes of `times_b`.
///
/// # Arguments
///
/// * `n1`, `n2` - The number of spikes to consider in each train. Extra times are ignored, and counts larger than the slices are clamped to their length.
/// * `dt` - The coincidence tolerance, in seconds.
/// * `window_start`, `window_end` - The bounds of the recording.
/// * `times_a`, `times_b` - The spike times, in ascending order.
///
/// # Returns
///
/// The coefficient, or NaN if either train is empty.
/// Nothing is validated: unsorted trains, an inverted window or a negative tolerance give unspecified values,
/// and a zero denominator in the final formula propagates as infinity or NaN.
pub fn compute_sttc(
    n1: usize,
    n2: usize,
    dt: f64,
    window_start: f64,
    window_end: f64,
    times_a: &[f64],
    times_b: &[f64],
) -> f64 {
    let times_a = &times_a[..n1.min(times_a.len())];
    let times_b = &times_b[..n2.min(times_b.len())];

    if times_a.is_empty() || times_b.is_empty() {
        return f64::NAN;
    }

    let duration = window_end - window_start;

    let ta = tiled_duration(times_a, dt, window_start, window_end) / duration;
    let tb = tiled_duration(times_b, dt, window_start, window_end) / duration;
    let pa = tolerance_match_count(times_a, times_b, dt) as f64 / times_a.len() as f64;
    let pb = tolerance_match_count(times_b, times_a, dt) as f64 / times_b.len() as f64;
    log::trace!("TA = {}, TB = {}, PA = {}, PB = {}", ta, tb, pa, pb);

    0.5 * (pa - tb) / (1.0 - tb * pa) + 0.5 * (pb - ta) / (1.0 - ta * pb)
}

/// A checked STTC measure for a fixed tolerance and recording window.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Sttc {
    /// The coincidence tolerance.
    dt: f64,
    /// The recording window shared by all spike trains.
    window: RecordingWindow,
}

impl Sttc {
    /// Create a new `Sttc` measure with the given tolerance and recording window.
    /// Returns an error if the tolerance is negative or not finite.
    pub fn new(dt: f64, window: RecordingWindow) -> Result<Self, SttcError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SttcError::InvalidTolerance(format!(
                "dt must be a non-negative number, got {}",
                dt
            )));
        }
        Ok(Sttc { dt, window })
    }

    /// Returns the coincidence tolerance.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the recording window.
    pub fn window(&self) -> &RecordingWindow {
        &self.window
    }

    /// Calculate the STTC between two spike trains.
    ///
    /// Returns an error if a spike lies outside the recording window.
    /// An empty train is not an error: the coefficient is then NaN.
    pub fn measure(
        &self,
        spike_train_a: &SpikeTrain,
        spike_train_b: &SpikeTrain,
    ) -> Result<f64, SttcError> {
        for spike_train in [spike_train_a, spike_train_b] {
            if let Some(&time) = spike_train
                .times()
                .iter()
                .find(|time| !self.window.contains(**time))
            {
                return Err(SttcError::OutOfWindow {
                    time,
                    start: self.window.start(),
                    end: self.window.end(),
                });
            }
        }

        let coefficient = compute_sttc(
            spike_train_a.len(),
            spike_train_b.len(),
            self.dt,
            self.window.start(),
            self.window.end(),
            spike_train_a.times(),
            spike_train_b.times(),
        );
        log::debug!(
            "STTC between {} and {} spikes (dt = {}): {}",
            spike_train_a.len(),
            spike_train_b.len(),
            self.dt,
            coefficient
        );

        Ok(coefficient)
    }
}

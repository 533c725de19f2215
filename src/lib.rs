//! This crate computes the Spike Time Tiling Coefficient (STTC) between pairs of spike trains.
//!
//! The STTC measures the correlation between the firing of two electrodes recorded over a common window,
//! independently of their firing rates and of the duration of the recording. It lies in [-1, 1] and is NaN
//! when one of the trains is empty.
//!
//! # Computing the STTC
//!
//! ## From Plain Slices
//!
//! ```rust
//! use rusty_sttc::compute_sttc;
//!
//! let times_a = [0.2, 0.6];
//! let times_b = [0.22, 0.8];
//!
//! // Coincidence tolerance of 50 ms over a 1 s recording
//! let coefficient = compute_sttc(times_a.len(), times_b.len(), 0.05, 0.0, 1.0, &times_a, &times_b);
//! assert!((coefficient - 1.0 / 3.0).abs() < 1e-12);
//!
//! // An empty train gives NaN
//! assert!(compute_sttc(0, times_b.len(), 0.05, 0.0, 1.0, &[], &times_b).is_nan());
//! ```
//!
//! ## With Validated Inputs
//!
//! ```rust
//! use rusty_sttc::spike_train::{RecordingWindow, SpikeTrain};
//! use rusty_sttc::sttc::Sttc;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! // Sample two independent Poisson spike trains over 100 s
//! let mut rng = StdRng::seed_from_u64(42);
//! let window = RecordingWindow::new(0.0, 100.0).unwrap();
//! let spike_train_a = SpikeTrain::rand(5.0, &window, &mut rng).unwrap();
//! let spike_train_b = SpikeTrain::rand(5.0, &window, &mut rng).unwrap();
//!
//! let sttc = Sttc::new(0.01, window).unwrap();
//! let coefficient = sttc.measure(&spike_train_a, &spike_train_b).unwrap();
//! assert!(coefficient.abs() < 0.2);
//! ```

pub mod error;
pub mod io;
pub mod spike_train;
pub mod sttc;

pub use sttc::{compute_sttc, Sttc};

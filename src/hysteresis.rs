//! Zero-crossing cycle counter with a fixed hysteresis dead band
//!
//! A sample has to leave the band `[-threshold, threshold]` before it can move
//! the counter into a signed state. Only direct Positive <-> Negative reversals
//! count as flips; samples inside the band never change the state. One cycle
//! is two flips.

/// Where a sample (or the counter) sits relative to the dead band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Inside `[-threshold, threshold]`, or no excursion seen yet
    Neutral,
    /// Above `+threshold`
    Positive,
    /// Below `-threshold`
    Negative,
}

impl Zone {
    /// Classify a single sample against the threshold
    pub fn classify(sample: f64, threshold: f64) -> Self {
        if sample > threshold {
            Zone::Positive
        } else if sample < -threshold {
            Zone::Negative
        } else {
            Zone::Neutral
        }
    }

    fn is_reversal_of(self, previous: Zone) -> bool {
        matches!(
            (previous, self),
            (Zone::Positive, Zone::Negative) | (Zone::Negative, Zone::Positive)
        )
    }
}

/// Incremental hysteresis counter for one channel
///
/// Feed samples in order with [`push`](Self::push), then read
/// [`cycles`](Self::cycles). A fresh counter is needed for every channel.
#[derive(Debug, Clone)]
pub struct HysteresisCounter {
    threshold: f64,
    state: Zone,
    flips: u64,
}

impl HysteresisCounter {
    /// Create a counter in the `Neutral` state with no flips recorded
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            state: Zone::Neutral,
            flips: 0,
        }
    }

    /// Feed one sample into the state machine
    pub fn push(&mut self, sample: f64) {
        let zone = Zone::classify(sample, self.threshold);

        // Dead-band samples leave the state untouched
        if zone == Zone::Neutral || zone == self.state {
            return;
        }

        if zone.is_reversal_of(self.state) {
            self.flips += 1;
        }
        self.state = zone;
    }

    /// Feed every sample of a slice in order
    pub fn extend(&mut self, samples: &[f64]) {
        for &sample in samples {
            self.push(sample);
        }
    }

    /// Current state of the machine
    pub fn state(&self) -> Zone {
        self.state
    }

    /// Number of direct sign reversals seen so far
    pub fn flips(&self) -> u64 {
        self.flips
    }

    /// Completed cycles (`flips / 2`)
    pub fn cycles(&self) -> u64 {
        self.flips / 2
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Count cycles in `samples` using a fresh counter
///
/// Total over any finite input: an empty slice or a signal that never leaves
/// the dead band yields 0. A threshold of 0 degenerates to plain sign
/// crossings.
pub fn count_cycles(samples: &[f64], threshold: f64) -> u64 {
    let mut counter = HysteresisCounter::new(threshold);
    counter.extend(samples);
    counter.cycles()
}

use std::collections::VecDeque;

use log::debug;

use crate::dynamics::state::State;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Retention policy
// ---------------------------------------------------------------------------

/// Which integrated states the store keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Retention {
    /// Keep everything. Memory grows by one state per step for the whole run.
    #[default]
    Unbounded,
    /// Ring buffer holding the most recent `K` states.
    Window(usize),
    /// Hold at most `K` states spread over the whole run. Each time the store
    /// fills, every other state is dropped and the sampling stride doubles.
    /// The most recent state is always retained.
    Decimate(usize),
}

impl Retention {
    pub fn validate(&self) -> Result<()> {
        match *self {
            Retention::Unbounded => Ok(()),
            Retention::Window(k) if k < 1 => Err(Error::RetentionTooSmall { min: 1, got: k }),
            Retention::Decimate(k) if k < 2 => Err(Error::RetentionTooSmall { min: 2, got: k }),
            _ => Ok(()),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        match *self {
            Retention::Unbounded => None,
            Retention::Window(k) | Retention::Decimate(k) => Some(k),
        }
    }
}

// ---------------------------------------------------------------------------
// Render cursor
// ---------------------------------------------------------------------------

/// Position in the append stream, counted over every state ever appended
/// (including ones the retention policy has since dropped).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor(u64);

impl Cursor {
    pub fn position(&self) -> u64 {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Trajectory store
// ---------------------------------------------------------------------------

/// Ordered history of integrated states, oldest first.
#[derive(Debug, Clone)]
pub struct Trajectory {
    // (sequence number, state); sequence numbers strictly increase
    points: VecDeque<(u64, State)>,
    retention: Retention,
    appended: u64,
    dropped: u64,
    stride: u64,
}

impl Trajectory {
    pub fn new(retention: Retention) -> Self {
        let points = match retention.capacity() {
            Some(k) => VecDeque::with_capacity(k.min(1 << 20)),
            None => VecDeque::new(),
        };
        Self {
            points,
            retention,
            appended: 0,
            dropped: 0,
            stride: 1,
        }
    }

    /// Append a state, applying the retention policy.
    pub fn push(&mut self, state: State) {
        let seq = self.appended;
        self.appended += 1;

        match self.retention {
            Retention::Unbounded => self.points.push_back((seq, state)),
            Retention::Window(k) => {
                if self.points.len() >= k.max(1) {
                    if self.dropped == 0 {
                        debug!("trajectory window full at {} states, evicting oldest", k);
                    }
                    self.points.pop_front();
                    self.dropped += 1;
                }
                self.points.push_back((seq, state));
            }
            Retention::Decimate(k) => {
                // An off-stride tail was only kept because it was the newest.
                if let Some(&(last, _)) = self.points.back() {
                    if last % self.stride != 0 {
                        self.points.pop_back();
                        self.dropped += 1;
                    }
                }
                self.points.push_back((seq, state));
                while self.points.len() > k.max(2) {
                    self.decimate();
                }
            }
        }
    }

    fn decimate(&mut self) {
        let before = self.points.len();
        let keep_every = self.stride * 2;
        let newest = self.points.back().map(|&(seq, _)| seq);
        self.points
            .retain(|&(seq, _)| seq % keep_every == 0 || Some(seq) == newest);
        self.stride = keep_every;
        self.dropped += (before - self.points.len()) as u64;
        debug!(
            "trajectory decimated {} -> {} states, stride now {}",
            before,
            self.points.len(),
            self.stride
        );
    }

    /// Number of states currently held.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of states ever appended.
    pub fn total_appended(&self) -> u64 {
        self.appended
    }

    /// Number of states the retention policy has discarded.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Sampling stride of the retained history (1 unless decimated).
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Read-only view of every retained state, oldest first.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot { points: &self.points }
    }

    /// Cursor pointing past the newest state.
    pub fn cursor(&self) -> Cursor {
        Cursor(self.appended)
    }

    /// Retained states appended at or after `cursor`, and the cursor to
    /// pass next time.
    pub fn points_since(
        &self,
        cursor: Cursor,
    ) -> (impl DoubleEndedIterator<Item = &State> + ExactSizeIterator + '_, Cursor) {
        let start = self.points.partition_point(|&(seq, _)| seq < cursor.0);
        (self.points.range(start..).map(|(_, s)| s), self.cursor())
    }
}

impl Default for Trajectory {
    fn default() -> Self {
        Trajectory::new(Retention::Unbounded)
    }
}

// ---------------------------------------------------------------------------
// Snapshot view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    points: &'a VecDeque<(u64, State)>,
}

impl<'a> Snapshot<'a> {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a State> {
        self.points.get(index).map(|(_, s)| s)
    }

    pub fn first(&self) -> Option<&'a State> {
        self.points.front().map(|(_, s)| s)
    }

    pub fn last(&self) -> Option<&'a State> {
        self.points.back().map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a State> + ExactSizeIterator + 'a {
        self.points.iter().map(|(_, s)| s)
    }

    /// States paired with their step number (1-based: the first integrated
    /// state is step 1).
    pub fn iter_indexed(&self) -> impl DoubleEndedIterator<Item = (u64, &'a State)> + ExactSizeIterator + 'a {
        self.points.iter().map(|(seq, s)| (seq + 1, s))
    }

    pub fn to_vec(&self) -> Vec<State> {
        self.iter().copied().collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

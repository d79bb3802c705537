use std::collections::VecDeque;

use serde::Serialize;

/// Default history capacity.
pub const DEFAULT_MAX_DATA_POINTS: usize = 50;

/// One timestamped reading. `time` is wall-clock milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

impl Sample {
    pub const fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }

    pub fn is_finite(&self) -> bool {
        self.time.is_finite() && self.value.is_finite()
    }
}

/// Anything placed on the time axis.
pub trait Timed {
    fn time(&self) -> f64;
}

impl Timed for Sample {
    fn time(&self) -> f64 {
        self.time
    }
}

/// A sample as held by a [`SampleBuffer`], tagged with its push order.
///
/// `seq` is unique for the lifetime of the buffer, so two samples sharing a
/// timestamp can still be told apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BufferedSample {
    pub seq: u64,
    pub sample: Sample,
}

impl Timed for BufferedSample {
    fn time(&self) -> f64 {
        self.sample.time
    }
}

/// Bounded oldest-first history of samples.
///
/// Pushing into a full buffer evicts the oldest sample.
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    entries: VecDeque<BufferedSample>,
    capacity: usize,
    next_seq: u64,
}

impl SampleBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_seq: 0,
        }
    }

    /// Sequence number the next pushed sample will get.
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Append `sample`, returning the evicted oldest entry if the buffer was full.
    pub fn push(&mut self, sample: Sample) -> Option<BufferedSample> {
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(BufferedSample {
            seq: self.next_seq,
            sample,
        });
        self.next_seq += 1;
        evicted
    }

    /// Change the capacity, evicting the oldest entries that no longer fit.
    pub fn set_capacity(&mut self, capacity: usize) -> Vec<BufferedSample> {
        self.capacity = capacity.max(1);
        let excess = self.entries.len().saturating_sub(self.capacity);
        self.entries.drain(..excess).collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.entries.back().map(|e| &e.sample)
    }

    pub fn oldest(&self) -> Option<&Sample> {
        self.entries.front().map(|e| &e.sample)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Sample> + ExactSizeIterator {
        self.entries.iter().map(|e| &e.sample)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.sample.value)
    }

    /// Snapshot for one frame's worth of reading.
    pub fn to_vec(&self) -> Vec<Sample> {
        self.iter().copied().collect()
    }

    /// Like [`SampleBuffer::to_vec`], keeping the sequence tags.
    pub fn entries(&self) -> Vec<BufferedSample> {
        self.entries.iter().copied().collect()
    }

    /// Drop every sample. Sequence numbers keep counting up.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DATA_POINTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_evicts_oldest_when_full() {
        let mut buf = SampleBuffer::new(2);
        assert_eq!(buf.push(Sample::new(0.0, 1.0)), None);
        assert_eq!(buf.push(Sample::new(1.0, 2.0)), None);
        assert_eq!(
            buf.push(Sample::new(2.0, 3.0)),
            Some(BufferedSample {
                seq: 0,
                sample: Sample::new(0.0, 1.0),
            })
        );
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.oldest(), Some(&Sample::new(1.0, 2.0)));
        assert_eq!(buf.latest(), Some(&Sample::new(2.0, 3.0)));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut buf = SampleBuffer::new(0);
        assert_eq!(buf.capacity(), 1);
        buf.push(Sample::new(0.0, 0.0));
        buf.push(Sample::new(1.0, 0.0));
        assert_eq!(buf.to_vec(), vec![Sample::new(1.0, 0.0)]);
    }

    #[test]
    fn shrinking_capacity_drops_oldest() {
        let mut buf = SampleBuffer::new(4);
        for i in 0..4 {
            buf.push(Sample::new(i as f64, 0.0));
        }
        let dropped = buf.set_capacity(1);
        assert_eq!(dropped.len(), 3);
        assert_eq!(buf.latest().map(|s| s.time), Some(3.0));
    }

    #[test]
    fn equal_timestamps_get_distinct_sequence_numbers() {
        let mut buf = SampleBuffer::new(4);
        buf.push(Sample::new(5.0, 1.0));
        buf.push(Sample::new(5.0, 2.0));
        buf.clear();
        assert_eq!(buf.next_seq(), 2);
        buf.push(Sample::new(5.0, 3.0));
        let seqs: Vec<u64> = buf.entries().iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![2]);
    }
}

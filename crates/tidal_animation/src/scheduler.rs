//! Tween scheduler
//!
//! Owns every active tween and advances them once per frame. The host drives
//! the frame loop: it calls [`TweenEngine::advance`] with the frame timestamp
//! while [`TweenEngine::is_running`] is true and may idle otherwise.

use std::sync::{Arc, Mutex};

use indexmap::IndexMap;

use crate::tween::Tween;

/// What one frame pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Tweens advanced this frame (delay elapsed).
    pub updated: usize,
    /// Tweens still inside their delay.
    pub pending: usize,
    /// Tweens that finished (and were removed) this frame.
    pub completed: usize,
}

enum QueuedOp {
    Add(String, Tween),
    Remove(String),
}

/// Deferred mutation handle for a [`TweenEngine`].
///
/// Callbacks run while the engine is iterating, so they cannot borrow it.
/// Requests made through a queue are applied after the current pass and take
/// effect from the next frame on.
#[derive(Clone, Default)]
pub struct TweenQueue {
    ops: Arc<Mutex<Vec<QueuedOp>>>,
}

impl TweenQueue {
    pub fn add(&self, id: impl Into<String>, tween: Tween) {
        self.push(QueuedOp::Add(id.into(), tween));
    }

    pub fn remove(&self, id: impl Into<String>) {
        self.push(QueuedOp::Remove(id.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().map(|ops| ops.is_empty()).unwrap_or(true)
    }

    fn push(&self, op: QueuedOp) {
        match self.ops.lock() {
            Ok(mut ops) => ops.push(op),
            Err(poisoned) => poisoned.into_inner().push(op),
        }
    }

    fn drain(&self) -> Vec<QueuedOp> {
        match self.ops.lock() {
            Ok(mut ops) => std::mem::take(&mut *ops),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

/// The scheduler that ticks all active tweens.
#[derive(Default)]
pub struct TweenEngine {
    tweens: IndexMap<String, Tween>,
    queue: TweenQueue,
    running: bool,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the tween stored under `id`.
    ///
    /// A replaced tween is dropped without its completion callback.
    pub fn add(&mut self, id: impl Into<String>, tween: Tween) {
        let id = id.into();
        if self.tweens.insert(id.clone(), tween).is_some() {
            tracing::trace!("tween {id} replaced");
        }
        self.set_running(true);
    }

    /// Cancel a tween. Its completion callback never fires.
    pub fn remove(&mut self, id: &str) -> bool {
        let removed = self.tweens.shift_remove(id).is_some();
        if self.tweens.is_empty() {
            self.set_running(false);
        }
        removed
    }

    /// Cancel every tween.
    pub fn clear(&mut self) {
        self.tweens.clear();
        self.set_running(false);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tweens.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Tween> {
        self.tweens.get(id)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Whether the host should keep delivering frames.
    pub fn is_running(&self) -> bool {
        self.running || !self.queue.is_empty()
    }

    /// Handle for mutations requested from inside callbacks.
    pub fn queue(&self) -> TweenQueue {
        self.queue.clone()
    }

    /// Advance every active tween to `now`.
    ///
    /// Update callbacks run during the pass. Finished tweens are removed
    /// after the pass and only then are their completion callbacks invoked,
    /// so callbacks never observe a half-advanced set.
    pub fn advance(&mut self, now: f64) -> FrameStats {
        let mut stats = FrameStats::default();
        let mut finished = Vec::new();

        for (id, tween) in self.tweens.iter_mut() {
            let Some(progress) = tween.progress_at(now) else {
                stats.pending += 1;
                continue;
            };
            if let Some(on_update) = tween.on_update.as_mut() {
                let eased = tween.easing.apply(progress);
                let value = crate::TweenValue::lerp(&tween.from, &tween.to, eased);
                on_update(&value, progress);
            }
            stats.updated += 1;
            if progress >= 1.0 {
                finished.push(id.clone());
            }
        }

        let mut completions = Vec::with_capacity(finished.len());
        for id in &finished {
            if let Some(mut tween) = self.tweens.shift_remove(id) {
                if let Some(on_complete) = tween.on_complete.take() {
                    completions.push(on_complete);
                }
            }
        }
        stats.completed = finished.len();
        for on_complete in completions {
            on_complete();
        }

        self.apply_queued();
        if self.tweens.is_empty() {
            self.set_running(false);
        }

        tracing::trace!(
            updated = stats.updated,
            pending = stats.pending,
            completed = stats.completed,
            "tween frame"
        );
        stats
    }

    fn apply_queued(&mut self) {
        for op in self.queue.drain() {
            match op {
                QueuedOp::Add(id, tween) => self.add(id, tween),
                QueuedOp::Remove(id) => {
                    self.remove(&id);
                }
            }
        }
    }

    fn set_running(&mut self, running: bool) {
        if self.running != running {
            self.running = running;
            if running {
                tracing::debug!("tween scheduling started");
            } else {
                tracing::debug!("tween scheduling stopped");
            }
        }
    }
}

use std::collections::{HashSet, VecDeque};

use crate::world::chunk_coord::ChunkCoord;

/// FIFO of chunks waiting for deferred generation. Submission is deduplicated
/// so a chunk that drifts in and out of view while pending is queued once.
#[derive(Debug, Default)]
pub struct GenQueue {
    pending: VecDeque<ChunkCoord>,
    queued: HashSet<ChunkCoord>,
}

impl GenQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues `coord` unless it is already pending. Returns whether the
    /// submission was accepted.
    pub fn submit(&mut self, coord: ChunkCoord) -> bool {
        if !self.queued.insert(coord) {
            return false;
        }
        self.pending.push_back(coord);
        true
    }

    pub fn pop(&mut self) -> Option<ChunkCoord> {
        let coord = self.pending.pop_front()?;
        self.queued.remove(&coord);
        Some(coord)
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.queued.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = GenQueue::new();
        queue.submit(ChunkCoord::new(0, 0));
        queue.submit(ChunkCoord::new(1, 0));
        queue.submit(ChunkCoord::new(0, 1));

        assert_eq!(queue.pop(), Some(ChunkCoord::new(0, 0)));
        assert_eq!(queue.pop(), Some(ChunkCoord::new(1, 0)));
        assert_eq!(queue.pop(), Some(ChunkCoord::new(0, 1)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_duplicate_submission_rejected() {
        let mut queue = GenQueue::new();
        assert!(queue.submit(ChunkCoord::new(2, 2)));
        assert!(!queue.submit(ChunkCoord::new(2, 2)));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_resubmission_allowed_after_pop() {
        let mut queue = GenQueue::new();
        queue.submit(ChunkCoord::new(3, -1));
        queue.pop();
        assert!(!queue.contains(ChunkCoord::new(3, -1)));
        assert!(queue.submit(ChunkCoord::new(3, -1)));
    }
}

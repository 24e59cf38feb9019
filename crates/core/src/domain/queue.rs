// Bounded Queue - synchronized circular buffer
//
// Single lock over the ring state plus two condvars. Waiters re-check
// their predicate in a loop after every wake, so spurious wakeups and
// lost-wakeup races cannot violate the occupancy invariant.

use std::sync::{Condvar, Mutex, MutexGuard};

use crate::error::{AppError, Result};

/// Upper bound on queue capacity. Mirrors the positive range of a 32-bit
/// counter so `len`/`capacity` arithmetic stays well inside any platform's
/// representable range.
pub const MAX_QUEUE_CAPACITY: usize = i32::MAX as usize;

/// Ring state, only ever touched under the queue lock.
struct Ring<T> {
    slots: Vec<Option<T>>,
    /// Next read position (mod capacity)
    head: usize,
    /// Next write position (mod capacity)
    tail: usize,
    /// Occupied slots, 0 <= len <= capacity
    len: usize,
}

/// Fixed-capacity FIFO queue with blocking insert/remove.
///
/// Safe to share between any number of producer and consumer threads
/// (behind an `Arc`). Insertion order equals removal order across all
/// producers combined; `push` blocks while full and `pop` blocks while
/// empty, without busy-waiting.
pub struct BoundedQueue<T> {
    ring: Mutex<Ring<T>>,
    not_full: Condvar,
    not_empty: Condvar,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// Create a queue with room for `capacity` items.
    ///
    /// # Errors
    /// `AppError::InvalidCapacity` for 0 or anything above
    /// [`MAX_QUEUE_CAPACITY`], checked before any storage is allocated.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 || capacity > MAX_QUEUE_CAPACITY {
            return Err(AppError::InvalidCapacity(capacity));
        }

        let mut slots = Vec::new();
        slots.resize_with(capacity, || None);

        Ok(Self {
            ring: Mutex::new(Ring {
                slots,
                head: 0,
                tail: 0,
                len: 0,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Occupied slots at the instant of the call.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.len == 0)
    }

    /// Insert `item` at the tail, blocking while the queue is full.
    ///
    /// Wakes exactly one thread waiting on "queue not empty". The item is
    /// never dropped or reordered: removal order equals insertion order.
    ///
    /// # Errors
    /// `AppError::InvalidState` if the queue lock was poisoned by a
    /// panicked worker.
    pub fn push(&self, item: T) -> Result<()> {
        let mut ring = self.lock()?;
        while ring.len == self.capacity {
            ring = self.not_full.wait(ring).map_err(|_| poisoned())?;
        }
        debug_assert!(ring.len < self.capacity);

        let tail = ring.tail;
        ring.slots[tail] = Some(item);
        ring.tail = (tail + 1) % self.capacity;
        ring.len += 1;

        self.not_empty.notify_one();
        Ok(())
    }

    /// Remove and return the item at the head, blocking while the queue
    /// is empty.
    ///
    /// Wakes exactly one thread waiting on "queue not full". The queue
    /// retains no reference to the returned item.
    ///
    /// # Errors
    /// `AppError::InvalidState` if the queue lock was poisoned.
    pub fn pop(&self) -> Result<T> {
        let mut ring = self.lock()?;
        while ring.len == 0 {
            ring = self.not_empty.wait(ring).map_err(|_| poisoned())?;
        }
        debug_assert!(ring.len > 0);

        let head = ring.head;
        let item = ring.slots[head]
            .take()
            .ok_or_else(|| AppError::InvalidState("occupied slot held no item".to_string()))?;
        ring.head = (head + 1) % self.capacity;
        ring.len -= 1;

        self.not_full.notify_one();
        Ok(item)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Ring<T>>> {
        self.ring.lock().map_err(|_| poisoned())
    }
}

fn poisoned() -> AppError {
    AppError::InvalidState("queue lock poisoned by a panicked worker".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_zero_capacity_rejected() {
        let err = BoundedQueue::<u32>::new(0).err().unwrap();
        assert!(matches!(err, AppError::InvalidCapacity(0)));
    }

    #[test]
    fn test_oversized_capacity_rejected() {
        let err = BoundedQueue::<u32>::new(MAX_QUEUE_CAPACITY + 1).err().unwrap();
        assert!(matches!(err, AppError::InvalidCapacity(_)));
    }

    #[test]
    fn test_fifo_order_single_thread() {
        let q = BoundedQueue::new(10).unwrap();
        for i in 0..10 {
            q.push(i).unwrap();
        }
        for i in 0..10 {
            assert_eq!(q.pop().unwrap(), i);
        }
        assert!(q.is_empty().unwrap());
    }

    #[test]
    fn test_wraparound_across_boundary() {
        let q = BoundedQueue::new(3).unwrap();
        q.push(1).unwrap();
        q.push(2).unwrap();
        assert_eq!(q.pop().unwrap(), 1);
        // tail wraps past the end of the slot array here
        q.push(3).unwrap();
        q.push(4).unwrap();
        assert_eq!(q.len().unwrap(), 3);
        assert_eq!(q.pop().unwrap(), 2);
        assert_eq!(q.pop().unwrap(), 3);
        assert_eq!(q.pop().unwrap(), 4);
    }

    #[test]
    fn test_len_tracks_occupancy() {
        let q = BoundedQueue::new(4).unwrap();
        assert_eq!(q.len().unwrap(), 0);
        q.push('a').unwrap();
        q.push('b').unwrap();
        assert_eq!(q.len().unwrap(), 2);
        q.pop().unwrap();
        assert_eq!(q.len().unwrap(), 1);
        assert_eq!(q.capacity(), 4);
    }

    #[test]
    fn test_push_blocks_until_space() {
        let q = Arc::new(BoundedQueue::new(1).unwrap());
        q.push(1).unwrap();

        let (tx, rx) = mpsc::channel();
        let q2 = Arc::clone(&q);
        let pusher = thread::spawn(move || {
            q2.push(2).unwrap();
            tx.send(()).unwrap();
        });

        // Full queue: the second push must still be parked.
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        assert_eq!(q.pop().unwrap(), 1);
        rx.recv_timeout(Duration::from_secs(5))
            .expect("push should complete once space exists");
        assert_eq!(q.pop().unwrap(), 2);
        pusher.join().unwrap();
    }

    #[test]
    fn test_pop_blocks_until_item() {
        let q = Arc::new(BoundedQueue::new(4).unwrap());

        let (tx, rx) = mpsc::channel();
        let q2 = Arc::clone(&q);
        let popper = thread::spawn(move || {
            let item = q2.pop().unwrap();
            tx.send(item).unwrap();
        });

        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        q.push(42).unwrap();
        assert_eq!(
            rx.recv_timeout(Duration::from_secs(5))
                .expect("pop should complete once an item exists"),
            42
        );
        popper.join().unwrap();
    }

    #[test]
    fn test_no_loss_or_duplication_under_contention() {
        const PRODUCERS: usize = 4;
        const CONSUMERS: usize = 4;
        const PER_PRODUCER: usize = 250;
        const TOTAL: usize = PRODUCERS * PER_PRODUCER;

        let q = Arc::new(BoundedQueue::new(8).unwrap());
        let (tx, rx) = mpsc::channel();

        let producers: Vec<_> = (0..PRODUCERS)
            .map(|p| {
                let q = Arc::clone(&q);
                thread::spawn(move || {
                    for i in 0..PER_PRODUCER {
                        q.push(p * PER_PRODUCER + i).unwrap();
                    }
                })
            })
            .collect();

        let consumers: Vec<_> = (0..CONSUMERS)
            .map(|_| {
                let q = Arc::clone(&q);
                let tx = tx.clone();
                thread::spawn(move || {
                    for _ in 0..TOTAL / CONSUMERS {
                        tx.send(q.pop().unwrap()).unwrap();
                    }
                })
            })
            .collect();
        drop(tx);

        let mut seen: Vec<usize> = rx.iter().collect();
        for h in producers.into_iter().chain(consumers) {
            h.join().unwrap();
        }

        seen.sort_unstable();
        let expected: Vec<usize> = (0..TOTAL).collect();
        assert_eq!(seen, expected, "every item exactly once");
        assert!(q.is_empty().unwrap());
    }

    #[test]
    fn test_per_producer_order_preserved() {
        const PRODUCERS: usize = 3;
        const PER_PRODUCER: usize = 200;

        let q = Arc::new(BoundedQueue::new(2).unwrap());

        let handles: Vec<_> = (0..PRODUCERS)
            .map(|p| {
                let q = Arc::clone(&q);
                thread::spawn(move || {
                    for seq in 0..PER_PRODUCER {
                        q.push((p, seq)).unwrap();
                    }
                })
            })
            .collect();

        let mut drained = Vec::with_capacity(PRODUCERS * PER_PRODUCER);
        for _ in 0..PRODUCERS * PER_PRODUCER {
            drained.push(q.pop().unwrap());
        }
        for h in handles {
            h.join().unwrap();
        }

        // Global FIFO implies each producer's items come out in the order
        // that producer pushed them.
        for p in 0..PRODUCERS {
            let seqs: Vec<usize> = drained
                .iter()
                .filter(|(owner, _)| *owner == p)
                .map(|(_, seq)| *seq)
                .collect();
            let expected: Vec<usize> = (0..PER_PRODUCER).collect();
            assert_eq!(seqs, expected, "producer {} order broken", p);
        }
    }
}

use crate::error::AppError;

use super::{QueueMode, QueueStrategy, empty_slots, slot_ref, take_slot};

/// Fixed-size queue with a movable front and no wraparound.
///
/// Elements occupy `[front, rear)` with `rear == front + count`. When `rear`
/// reaches the end of the buffer while slots before `front` are free, the
/// elements are shifted back to slot 0 before the next insertion.
pub struct FixedMovableQueue<T> {
    slots: Vec<Option<T>>,
    count: usize,
    front: usize,
    rear: usize,
}

impl<T> FixedMovableQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: empty_slots(capacity),
            count: 0,
            front: 0,
            rear: 0,
        }
    }

    fn compact_if_needed(&mut self) {
        if self.rear != self.slots.len() || self.front == 0 {
            return;
        }
        // slots before front are vacant, so rotating brings them to the tail
        self.slots[..self.rear].rotate_left(self.front);
        log::debug!(
            "compacted {} elements; front {} -> 0, rear {} -> {}",
            self.count,
            self.front,
            self.rear,
            self.count
        );
        self.front = 0;
        self.rear = self.count;
    }
}

impl<T> QueueStrategy<T> for FixedMovableQueue<T> {
    fn mode(&self) -> QueueMode {
        QueueMode::FixedMovable
    }

    fn enqueue(&mut self, value: T) -> Result<(), AppError> {
        if self.count == self.slots.len() {
            return Err(AppError::queue_full(QueueMode::FixedMovable));
        }
        self.compact_if_needed();
        if self.rear == self.slots.len() {
            unreachable!(
                "no room after compaction: front={}, rear={}, count={}",
                self.front, self.rear, self.count
            );
        }
        self.slots[self.rear] = Some(value);
        self.rear += 1;
        self.count += 1;
        Ok(())
    }

    fn dequeue(&mut self) -> Result<T, AppError> {
        if self.count == 0 {
            return Err(AppError::queue_empty(QueueMode::FixedMovable));
        }
        let value = take_slot(&mut self.slots, self.front);
        self.front += 1;
        self.count -= 1;
        if self.count == 0 {
            self.front = 0;
            self.rear = 0;
        }
        Ok(value)
    }

    fn front(&self) -> Result<&T, AppError> {
        if self.count == 0 {
            return Err(AppError::queue_empty(QueueMode::FixedMovable));
        }
        Ok(slot_ref(&self.slots, self.front))
    }

    fn len(&self) -> usize {
        self.count
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn front_index(&self) -> usize {
        self.front
    }

    fn rear_index(&self) -> usize {
        self.rear
    }

    fn get(&self, position: usize) -> Option<&T> {
        if position >= self.count {
            return None;
        }
        self.slots[self.front + position].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, values: &[i64]) -> FixedMovableQueue<i64> {
        let mut queue = FixedMovableQueue::new(capacity);
        for value in values {
            queue.enqueue(*value).unwrap();
        }
        queue
    }

    #[test]
    fn test_dequeue_moves_front() {
        let mut queue = filled(4, &[1, 2, 3]);
        assert_eq!(queue.dequeue().unwrap(), 1);
        assert_eq!((queue.front, queue.rear, queue.count), (1, 3, 2));
        assert_eq!(queue.slots, vec![None, Some(2), Some(3), None]);
    }

    #[test]
    fn test_compaction_deferred_until_needed() {
        let mut queue = filled(5, &[1, 2, 3]);
        queue.dequeue().unwrap();
        queue.dequeue().unwrap();
        for value in [4, 5, 6] {
            queue.enqueue(value).unwrap();
        }
        // rear hit the end but nothing moved yet
        assert_eq!((queue.front, queue.rear), (2, 5));
        assert_eq!(queue.slots[..2], [None, None]);

        queue.enqueue(7).unwrap();
        assert_eq!((queue.front, queue.rear, queue.count), (0, 5, 5));
        assert_eq!(
            queue.slots,
            vec![Some(3), Some(4), Some(5), Some(6), Some(7)]
        );
    }

    #[test]
    fn test_compaction_keeps_order_and_count() {
        let mut queue = filled(4, &[1, 2, 3, 4]);
        queue.dequeue().unwrap();
        queue.compact_if_needed();
        assert_eq!((queue.front, queue.rear, queue.count), (0, 3, 3));
        let order: Vec<i64> = (0..queue.len()).map(|i| *queue.get(i).unwrap()).collect();
        assert_eq!(order, vec![2, 3, 4]);
        queue.enqueue(5).unwrap();
        assert_eq!(queue.rear, 4);
    }

    #[test]
    fn test_drain_resets_indices() {
        let mut queue = filled(3, &[1, 2]);
        queue.dequeue().unwrap();
        queue.dequeue().unwrap();
        assert_eq!((queue.front, queue.rear), (0, 0));
        queue.enqueue(9).unwrap();
        assert_eq!(queue.slots[0], Some(9));
    }

    #[test]
    fn test_full_check_precedes_compaction() {
        let mut queue = filled(2, &[1, 2]);
        assert!(queue.enqueue(3).is_err());
        assert_eq!((queue.front, queue.rear, queue.count), (0, 2, 2));
    }
}

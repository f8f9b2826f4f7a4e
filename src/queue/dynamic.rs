use crate::error::AppError;

use super::{QueueMode, QueueStrategy, empty_slots, slot_ref, take_slot};

/// Growable circular queue.
///
/// Elements occupy `logical_to_physical(0..count)`. Capacity doubles (from a
/// minimum of one slot) whenever an insertion finds the buffer full, and never
/// shrinks.
pub struct DynamicQueue<T> {
    slots: Vec<Option<T>>,
    count: usize,
    front: usize,
}

impl<T> DynamicQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: empty_slots(capacity),
            count: 0,
            front: 0,
        }
    }

    /// Physical slot of the element `position` steps behind the front.
    ///
    /// Only meaningful while the capacity is non-zero.
    pub fn logical_to_physical(&self, position: usize) -> usize {
        (self.front + position) % self.slots.len()
    }

    fn grow_if_needed(&mut self) {
        let capacity = self.slots.len();
        if self.count < capacity {
            return;
        }
        let new_capacity = if capacity == 0 { 1 } else { capacity * 2 };
        let mut grown = Vec::with_capacity(new_capacity);
        for position in 0..self.count {
            let index = self.logical_to_physical(position);
            grown.push(Some(take_slot(&mut self.slots, index)));
        }
        grown.resize_with(new_capacity, || None);
        self.slots = grown;
        self.front = 0;
        log::debug!("grew capacity {} -> {}", capacity, new_capacity);
    }
}

impl<T> QueueStrategy<T> for DynamicQueue<T> {
    fn mode(&self) -> QueueMode {
        QueueMode::Dynamic
    }

    fn enqueue(&mut self, value: T) -> Result<(), AppError> {
        self.grow_if_needed();
        let rear = self.logical_to_physical(self.count);
        self.slots[rear] = Some(value);
        self.count += 1;
        Ok(())
    }

    fn dequeue(&mut self) -> Result<T, AppError> {
        if self.count == 0 {
            return Err(AppError::queue_empty(QueueMode::Dynamic));
        }
        let value = take_slot(&mut self.slots, self.front);
        self.front = self.logical_to_physical(1);
        self.count -= 1;
        Ok(value)
    }

    fn front(&self) -> Result<&T, AppError> {
        if self.count == 0 {
            return Err(AppError::queue_empty(QueueMode::Dynamic));
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
        if self.slots.is_empty() {
            return 0;
        }
        self.logical_to_physical(self.count)
    }

    fn get(&self, position: usize) -> Option<&T> {
        if position >= self.count {
            return None;
        }
        self.slots[self.logical_to_physical(position)].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_to_physical_wraps() {
        let mut queue: DynamicQueue<i64> = DynamicQueue::new(4);
        queue.front = 3;
        assert_eq!(queue.logical_to_physical(0), 3);
        assert_eq!(queue.logical_to_physical(1), 0);
        assert_eq!(queue.logical_to_physical(2), 1);
        assert_eq!(queue.logical_to_physical(4), 3);
    }

    #[test]
    fn test_grow_from_zero() {
        let mut queue = DynamicQueue::new(0);
        assert_eq!(queue.rear_index(), 0);
        queue.enqueue(1).unwrap();
        assert_eq!(queue.capacity(), 1);
        queue.enqueue(2).unwrap();
        assert_eq!(queue.capacity(), 2);
        queue.enqueue(3).unwrap();
        assert_eq!(queue.capacity(), 4);
    }

    #[test]
    fn test_grow_relinearizes_wrapped_elements() {
        let mut queue = DynamicQueue::new(4);
        for value in [1, 2, 3, 4] {
            queue.enqueue(value).unwrap();
        }
        queue.dequeue().unwrap();
        queue.dequeue().unwrap();
        queue.enqueue(5).unwrap();
        queue.enqueue(6).unwrap();
        // wrapped: 5 and 6 sit in front of 3 and 4
        assert_eq!(queue.slots, vec![Some(5), Some(6), Some(3), Some(4)]);
        assert_eq!(queue.front, 2);

        queue.enqueue(7).unwrap();
        assert_eq!(queue.capacity(), 8);
        assert_eq!(queue.front, 0);
        assert_eq!(
            queue.slots[..5],
            [Some(3), Some(4), Some(5), Some(6), Some(7)]
        );
        assert!(queue.slots[5..].iter().all(Option::is_none));
    }

    #[test]
    fn test_drain_keeps_capacity() {
        let mut queue = DynamicQueue::new(2);
        for value in 0..5 {
            queue.enqueue(value).unwrap();
        }
        while queue.dequeue().is_ok() {}
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.capacity(), 8);
    }
}

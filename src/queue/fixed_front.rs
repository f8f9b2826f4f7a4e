use crate::error::AppError;

use super::{QueueMode, QueueStrategy, empty_slots, slot_ref, take_slot};

/// Fixed-size queue whose front always sits at slot 0.
///
/// Elements occupy `[0, count)`; dequeue shifts the remainder one slot left.
pub struct FixedFrontQueue<T> {
    slots: Vec<Option<T>>,
    count: usize,
}

impl<T> FixedFrontQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: empty_slots(capacity),
            count: 0,
        }
    }
}

impl<T> QueueStrategy<T> for FixedFrontQueue<T> {
    fn mode(&self) -> QueueMode {
        QueueMode::FixedFront
    }

    fn enqueue(&mut self, value: T) -> Result<(), AppError> {
        if self.count == self.slots.len() {
            return Err(AppError::queue_full(QueueMode::FixedFront));
        }
        self.slots[self.count] = Some(value);
        self.count += 1;
        Ok(())
    }

    fn dequeue(&mut self) -> Result<T, AppError> {
        if self.count == 0 {
            return Err(AppError::queue_empty(QueueMode::FixedFront));
        }
        let value = take_slot(&mut self.slots, 0);
        // the emptied head moves behind the last element
        self.slots[..self.count].rotate_left(1);
        self.count -= 1;
        Ok(value)
    }

    fn front(&self) -> Result<&T, AppError> {
        if self.count == 0 {
            return Err(AppError::queue_empty(QueueMode::FixedFront));
        }
        Ok(slot_ref(&self.slots, 0))
    }

    fn len(&self) -> usize {
        self.count
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn front_index(&self) -> usize {
        0
    }

    fn rear_index(&self) -> usize {
        self.count
    }

    fn get(&self, position: usize) -> Option<&T> {
        if position >= self.count {
            return None;
        }
        self.slots[position].as_ref()
    }
}

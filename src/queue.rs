mod dynamic;
mod fixed_front;
mod fixed_movable;

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Deserialize;

use crate::error::{AppError, ErrorType};

pub use dynamic::DynamicQueue;
pub use fixed_front::FixedFrontQueue;
pub use fixed_movable::FixedMovableQueue;

/// Queue strategy, fixed for the lifetime of a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum QueueMode {
    /// Fixed capacity, front pinned at slot 0; dequeue shifts the rest.
    FixedFront = 1,
    /// Fixed capacity, movable front without wraparound; compacts on demand.
    FixedMovable = 2,
    /// Circular buffer that doubles when full.
    Dynamic = 3,
}

impl QueueMode {
    pub fn name(&self) -> &'static str {
        match self {
            QueueMode::FixedFront => "FixedFront",
            QueueMode::FixedMovable => "FixedMovable",
            QueueMode::Dynamic => "Dynamic",
        }
    }

    pub fn from_number(number: u8) -> Result<Self, AppError> {
        QueueMode::try_from(number)
            .map_err(|e| AppError::new(ErrorType::UnknownMode, e.to_string()))
    }

    pub fn from_name(name: &str) -> Result<Self, AppError> {
        return match name.trim() {
            "fixed_front" | "FixedFront" => Ok(QueueMode::FixedFront),
            "fixed_movable" | "FixedMovable" => Ok(QueueMode::FixedMovable),
            "dynamic" | "Dynamic" => Ok(QueueMode::Dynamic),
            other => Err(AppError::new(
                ErrorType::UnknownMode,
                format!("unknown queue mode '{}'", other),
            )),
        };
    }
}

impl fmt::Display for QueueMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModeRepr {
    Number(u8),
    Name(String),
}

// Scenario files may name the mode or use its number.
impl<'de> Deserialize<'de> for QueueMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mode = match ModeRepr::deserialize(deserializer)? {
            ModeRepr::Number(number) => QueueMode::from_number(number),
            ModeRepr::Name(name) => QueueMode::from_name(&name),
        };
        mode.map_err(serde::de::Error::custom)
    }
}

/// Operations every queue strategy provides.
///
/// Failed operations leave the strategy untouched.
pub trait QueueStrategy<T> {
    fn mode(&self) -> QueueMode;
    fn enqueue(&mut self, value: T) -> Result<(), AppError>;
    fn dequeue(&mut self) -> Result<T, AppError>;
    fn front(&self) -> Result<&T, AppError>;
    fn len(&self) -> usize;
    fn capacity(&self) -> usize;
    fn front_index(&self) -> usize;
    fn rear_index(&self) -> usize;

    /// Element at logical position `position`, 0 being the front.
    fn get(&self, position: usize) -> Option<&T>;
}

enum Strategy<T> {
    FixedFront(FixedFrontQueue<T>),
    FixedMovable(FixedMovableQueue<T>),
    Dynamic(DynamicQueue<T>),
}

/// FIFO queue running one of the three [`QueueMode`] strategies.
pub struct MultiModeQueue<T> {
    strategy: Strategy<T>,
}

impl<T> MultiModeQueue<T> {
    pub fn new(mode: QueueMode, initial_capacity: usize) -> Self {
        let strategy = match mode {
            QueueMode::FixedFront => Strategy::FixedFront(FixedFrontQueue::new(initial_capacity)),
            QueueMode::FixedMovable => {
                Strategy::FixedMovable(FixedMovableQueue::new(initial_capacity))
            }
            QueueMode::Dynamic => Strategy::Dynamic(DynamicQueue::new(initial_capacity)),
        };
        Self { strategy }
    }

    fn strategy(&self) -> &dyn QueueStrategy<T> {
        match &self.strategy {
            Strategy::FixedFront(queue) => queue,
            Strategy::FixedMovable(queue) => queue,
            Strategy::Dynamic(queue) => queue,
        }
    }

    fn strategy_mut(&mut self) -> &mut dyn QueueStrategy<T> {
        match &mut self.strategy {
            Strategy::FixedFront(queue) => queue,
            Strategy::FixedMovable(queue) => queue,
            Strategy::Dynamic(queue) => queue,
        }
    }

    pub fn mode(&self) -> QueueMode {
        self.strategy().mode()
    }

    pub fn enqueue(&mut self, value: T) -> Result<(), AppError> {
        let result = self.strategy_mut().enqueue(value);
        if let Err(e) = &result {
            log::warn!("enqueue rejected: {}", e);
        }
        result
    }

    pub fn dequeue(&mut self) -> Result<T, AppError> {
        self.strategy_mut().dequeue()
    }

    pub fn front(&self) -> Result<&T, AppError> {
        self.strategy().front()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn size(&self) -> usize {
        self.strategy().len()
    }

    pub fn capacity(&self) -> usize {
        self.strategy().capacity()
    }

    /// Dynamic queues grow instead of filling up, so they are never full.
    pub fn is_full(&self) -> bool {
        match self.mode() {
            QueueMode::Dynamic => false,
            _ => self.size() == self.capacity(),
        }
    }

    pub fn front_index(&self) -> usize {
        self.strategy().front_index()
    }

    pub fn rear_index(&self) -> usize {
        self.strategy().rear_index()
    }

    /// Iterates the stored elements from front to rear.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let strategy = self.strategy();
        (0..strategy.len()).filter_map(move |position| strategy.get(position))
    }
}

impl<T: fmt::Display> MultiModeQueue<T> {
    /// Renders the logical sequence, e.g. `[3, 4, 5]`.
    pub fn render_sequence(&self) -> String {
        let items = self
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{}]", items)
    }
}

// Diagnostic dump; the layout is not a stable contract.
impl<T: fmt::Display> fmt::Display for MultiModeQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} (mode={}, n={}, cap={}, f={}, r={})",
            self.render_sequence(),
            self.mode(),
            self.size(),
            self.capacity(),
            self.front_index(),
            self.rear_index()
        )
    }
}

fn empty_slots<T>(capacity: usize) -> Vec<Option<T>> {
    (0..capacity).map(|_| None).collect()
}

fn take_slot<T>(slots: &mut [Option<T>], index: usize) -> T {
    match slots[index].take() {
        Some(value) => value,
        None => unreachable!("slot {} lies in the valid range but holds no element", index),
    }
}

fn slot_ref<T>(slots: &[Option<T>], index: usize) -> &T {
    match &slots[index] {
        Some(value) => value,
        None => unreachable!("slot {} lies in the valid range but holds no element", index),
    }
}

use std::{
    fmt::Debug,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use uuid::Uuid;

/// Source of identifiers for fabricated comments.
pub trait IdGenerator: Debug + Send + Sync {
    fn next_id(&self) -> i64;
}

#[derive(Clone, Debug, PartialEq)]
pub enum IdStrategy {
    Random,
    Sequential { first_id: i64 },
}

impl IdStrategy {
    pub fn generator(&self) -> Arc<dyn IdGenerator> {
        match self {
            IdStrategy::Random => Arc::new(RandomIds),
            IdStrategy::Sequential { first_id } => {
                Arc::new(SequentialIds::new(*first_id))
            }
        }
    }
}

/// Non-negative ids taken from the low bits of a v4 uuid.
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> i64 {
        ((Uuid::new_v4().as_u128() as u64) >> 1) as i64
    }
}

/// Counts up from `first_id`. After `i64::MAX` it restarts at 0 so ids stay
/// non-negative.
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicI64,
}

impl SequentialIds {
    pub fn new(first_id: i64) -> Self {
        Self {
            next: AtomicI64::new(first_id),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> i64 {
        self.next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| {
                Some(id.checked_add(1).unwrap_or(0))
            })
            .unwrap_or_else(|id| id)
    }
}

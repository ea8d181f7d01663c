//! Settled-operation records.

/// How a tracked operation settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    Fulfilled,
    Rejected,
}

/// One settled operation: its name and a copy of what it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord<T, E> {
    pub name: String,
    pub outcome: Result<T, E>,
}

impl<T, E> OperationRecord<T, E> {
    pub fn status(&self) -> OperationStatus {
        match self.outcome {
            Ok(_) => OperationStatus::Fulfilled,
            Err(_) => OperationStatus::Rejected,
        }
    }

    pub fn is_fulfilled(&self) -> bool {
        self.outcome.is_ok()
    }
}

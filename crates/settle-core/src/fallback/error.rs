use thiserror::Error;

/// Primary and fallback both failed.
///
/// Both reasons are kept, primary first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("primary failed: {primary}; fallback failed: {fallback}")]
pub struct BothFailed<E> {
    pub primary: E,
    pub fallback: E,
}

use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

/// Cooperative cancellation for in-flight builds (watch-mode supersession).
/// Observed between module tasks and before any cache commit, so a cancelled
/// build never persists partial entries.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn cancel(&self) {
    self.0.store(true, Ordering::Release);
  }

  pub fn is_cancelled(&self) -> bool {
    self.0.load(Ordering::Acquire)
  }
}

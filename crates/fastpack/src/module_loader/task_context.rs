use std::sync::Arc;

use tokio::sync::{mpsc::Sender, Semaphore};

use fastpack_cache::BuildCache;
use fastpack_common::CancelToken;

use crate::{
  module_loader::ModuleLoaderMsg,
  transforms::TransformRegistry,
  types::{SharedCollaborators, SharedFileSystem, SharedOptions},
  utils::rule_matcher::RuleMatcher,
};

/// Shared state every module task needs. Cloned into spawned tasks as one
/// `Arc`; the semaphore bounds concurrent work to the configured worker
/// count.
pub struct TaskContext {
  pub fs: SharedFileSystem,
  pub options: SharedOptions,
  pub registry: Arc<TransformRegistry>,
  pub collaborators: SharedCollaborators,
  pub cache: Arc<BuildCache>,
  pub cancel: CancelToken,
  pub matcher: RuleMatcher,
  pub permits: Semaphore,
  pub tx: Sender<ModuleLoaderMsg>,
}

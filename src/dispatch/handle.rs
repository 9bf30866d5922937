use crate::core::types::BackendId;
use crate::error::{CardboardError, Result};
use tokio::task::JoinHandle;

/// Independently awaitable reference to one in-flight backend operation.
///
/// The underlying task is already running when the handle is returned;
/// dropping the handle detaches the task rather than cancelling it. Each
/// handle resolves on its own — a sibling handle failing in the same fan-out
/// has no effect on this one.
pub struct OperationHandle<T> {
    backend: BackendId,
    task: JoinHandle<Result<T>>,
}

impl<T> OperationHandle<T> {
    pub(crate) fn new(backend: BackendId, task: JoinHandle<Result<T>>) -> Self {
        Self { backend, task }
    }

    /// The backend this operation was issued against.
    pub fn backend(&self) -> &BackendId {
        &self.backend
    }

    /// Wait for the operation to complete.
    pub async fn wait(self) -> Result<T> {
        match self.task.await {
            Ok(result) => result,
            Err(err) => Err(CardboardError::TaskFailed {
                backend: self.backend,
                reason: err.to_string(),
            }),
        }
    }
}

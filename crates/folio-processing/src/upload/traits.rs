use super::types::UploadProgress;

/// Receives progress notifications while an upload runs.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, progress: UploadProgress);
}

impl<F> ProgressObserver for F
where
    F: Fn(UploadProgress) + Send + Sync,
{
    fn on_progress(&self, progress: UploadProgress) {
        self(progress)
    }
}

//! The recognition backend seam.

use glossa_types::{RecognitionConfig, RecognitionOutcome, RecognitionRequest, Result};

/// One expensive recognizer instance owned by a pool slot.
///
/// A backend is only ever touched by the thread currently holding its slot,
/// so it needs `Send` but not `Sync`. Calls block the caller.
pub trait RecognitionBackend: Send {
    /// Load the vocabulary, grammar and language model for `config`.
    ///
    /// Called only when the slot's current configuration differs from the
    /// request's. After an error the slot is treated as unconfigured.
    fn configure(&mut self, config: &RecognitionConfig) -> Result<()>;

    /// Recognize the request's audio with the current configuration.
    fn recognize_batch(&mut self, request: &RecognitionRequest) -> Result<RecognitionOutcome>;
}

impl<B: RecognitionBackend + ?Sized> RecognitionBackend for Box<B> {
    fn configure(&mut self, config: &RecognitionConfig) -> Result<()> {
        (**self).configure(config)
    }

    fn recognize_batch(&mut self, request: &RecognitionRequest) -> Result<RecognitionOutcome> {
        (**self).recognize_batch(request)
    }
}

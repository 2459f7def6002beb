use std::sync::{Arc, Mutex, PoisonError};

use crate::SemanticError;

/// Observable state of a lazily loaded model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    /// Nothing has tried to load the model yet (or it was reset).
    Uninitialized,
    /// The model is loaded and shared by every caller.
    Ready,
    /// The last load failed; calls fail fast until reset.
    Failed(String),
}

enum LoadState<T> {
    Uninitialized,
    Ready(Arc<T>),
    Failed(String),
}

/// Load-once slot for an expensive model handle.
///
/// The first caller runs the loader while holding the lock, so concurrent first calls
/// block and then observe the same instance. A failed load is remembered: later calls
/// return [`SemanticError::ProviderUnavailable`] without retrying until [`reset`](Self::reset).
pub(crate) struct ModelCell<T> {
    state: Mutex<LoadState<T>>,
}

impl<T> ModelCell<T> {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(LoadState::Uninitialized),
        }
    }

    pub(crate) fn get_or_load<F>(&self, load: F) -> Result<Arc<T>, SemanticError>
    where
        F: FnOnce() -> Result<T, SemanticError>,
    {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match &*state {
            LoadState::Ready(handle) => return Ok(Arc::clone(handle)),
            LoadState::Failed(reason) => {
                return Err(SemanticError::ProviderUnavailable(reason.clone()))
            }
            LoadState::Uninitialized => {}
        }

        match load() {
            Ok(value) => {
                let handle = Arc::new(value);
                *state = LoadState::Ready(Arc::clone(&handle));
                Ok(handle)
            }
            Err(err) => {
                let reason = err.to_string();
                *state = LoadState::Failed(reason.clone());
                Err(SemanticError::ProviderUnavailable(reason))
            }
        }
    }

    /// Forget the loaded handle or the remembered failure; the next call loads again.
    pub(crate) fn reset(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = LoadState::Uninitialized;
    }

    pub(crate) fn status(&self) -> ProviderStatus {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match &*state {
            LoadState::Uninitialized => ProviderStatus::Uninitialized,
            LoadState::Ready(_) => ProviderStatus::Ready,
            LoadState::Failed(reason) => ProviderStatus::Failed(reason.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn loads_once_and_shares_handle() {
        let cell = ModelCell::new();
        let loads = AtomicUsize::new(0);
        let load = || {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok(42u32)
        };

        let a = cell.get_or_load(load).unwrap();
        let b = cell
            .get_or_load(|| -> Result<u32, SemanticError> { panic!("must not reload") })
            .unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(cell.status(), ProviderStatus::Ready);
    }

    #[test]
    fn failure_is_sticky_until_reset() {
        let cell: ModelCell<u32> = ModelCell::new();
        let err = cell
            .get_or_load(|| Err(SemanticError::ModelNotFound("model.onnx".into())))
            .unwrap_err();
        assert!(matches!(err, SemanticError::ProviderUnavailable(ref r) if r.contains("model.onnx")));

        let attempts = AtomicUsize::new(0);
        let err = cell
            .get_or_load(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                Ok(1)
            })
            .unwrap_err();
        assert!(matches!(err, SemanticError::ProviderUnavailable(_)));
        assert_eq!(attempts.load(Ordering::SeqCst), 0);
        assert!(matches!(cell.status(), ProviderStatus::Failed(_)));

        cell.reset();
        assert_eq!(cell.status(), ProviderStatus::Uninitialized);
        assert_eq!(*cell.get_or_load(|| Ok(7)).unwrap(), 7);
    }

    #[test]
    fn concurrent_first_calls_load_once() {
        let cell = Arc::new(ModelCell::new());
        let loads = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cell = Arc::clone(&cell);
                let loads = Arc::clone(&loads);
                thread::spawn(move || {
                    cell.get_or_load(|| {
                        loads.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(std::time::Duration::from_millis(20));
                        Ok(String::from("model"))
                    })
                    .unwrap()
                })
            })
            .collect();

        let results: Vec<Arc<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        for r in &results[1..] {
            assert!(Arc::ptr_eq(&results[0], r));
        }
    }
}

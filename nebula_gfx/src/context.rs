//! Owned backend lifecycle and backend factory registry
//!
//! Backend implementations register a named factory here; the engine's
//! top-level context then owns the backend instance directly instead of
//! reaching through a process-wide static. At most one backend instance
//! exists at a time: creating a second [`Context`] before the first is
//! dropped fails, and dropping a context clears the guard so a new create
//! succeeds cleanly.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};

use crate::backend::{Backend, Init};
use crate::error::{GfxError, GfxResult};
use crate::{gfx_info, gfx_warn};

/// Backend factory function type
type BackendFactory = Box<dyn Fn(&Init) -> GfxResult<Box<dyn Backend>> + Send + Sync>;

/// Registry of named backend factories
pub struct BackendRegistry {
    factories: HashMap<&'static str, BackendFactory>,
}

impl BackendRegistry {
    fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a factory under a backend name (e.g. "vulkan")
    pub fn register<F>(&mut self, name: &'static str, factory: F)
    where
        F: Fn(&Init) -> GfxResult<Box<dyn Backend>> + Send + Sync + 'static,
    {
        if self.factories.insert(name, Box::new(factory)).is_some() {
            gfx_warn!("nebula::Context", "backend '{}' registered twice; replacing", name);
        }
    }

    /// Names of all registered backends
    pub fn names(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    fn create(&self, name: &str, init: &Init) -> GfxResult<Box<dyn Backend>> {
        self.factories
            .get(name)
            .ok_or_else(|| {
                GfxError::InitializationFailed(format!("backend '{}' not registered", name))
            })?(init)
    }
}

static BACKEND_REGISTRY: OnceLock<Mutex<BackendRegistry>> = OnceLock::new();

/// The global backend factory registry
pub fn backend_registry() -> &'static Mutex<BackendRegistry> {
    BACKEND_REGISTRY.get_or_init(|| Mutex::new(BackendRegistry::new()))
}

/// Register a backend factory in the global registry
pub fn register_backend<F>(name: &'static str, factory: F)
where
    F: Fn(&Init) -> GfxResult<Box<dyn Backend>> + Send + Sync + 'static,
{
    if let Ok(mut registry) = backend_registry().lock() {
        registry.register(name, factory);
    }
}

/// Guard enforcing the one-backend-at-a-time contract
static BACKEND_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Owns the single live backend instance.
///
/// The context is the explicit replacement for a static backend pointer:
/// the engine's top level holds it and passes `&mut dyn Backend` down to
/// whoever submits work. Dropping the context destroys the backend and
/// allows a new one to be created.
pub struct Context {
    backend: Box<dyn Backend>,
}

impl Context {
    /// Create the backend named `backend_name` with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `InitializationFailed` when another context is still alive,
    /// when the name is not registered, or when the factory itself fails.
    pub fn new(backend_name: &str, init: &Init) -> GfxResult<Self> {
        if BACKEND_ACTIVE.swap(true, Ordering::SeqCst) {
            return Err(GfxError::InitializationFailed(
                "a backend instance already exists; drop the previous Context first".to_string(),
            ));
        }

        let registry = backend_registry().lock().map_err(|_| {
            BACKEND_ACTIVE.store(false, Ordering::SeqCst);
            GfxError::InitializationFailed("backend registry lock poisoned".to_string())
        })?;

        match registry.create(backend_name, init) {
            Ok(backend) => {
                gfx_info!(
                    "nebula::Context",
                    "created '{}' backend ({:?})",
                    backend.name(),
                    backend.kind()
                );
                Ok(Self { backend })
            }
            Err(err) => {
                BACKEND_ACTIVE.store(false, Ordering::SeqCst);
                Err(err)
            }
        }
    }

    /// Wrap an already constructed backend (tests, embedders).
    ///
    /// Subject to the same one-instance-at-a-time rule as [`Context::new`].
    pub fn from_backend(backend: Box<dyn Backend>) -> GfxResult<Self> {
        if BACKEND_ACTIVE.swap(true, Ordering::SeqCst) {
            return Err(GfxError::InitializationFailed(
                "a backend instance already exists; drop the previous Context first".to_string(),
            ));
        }
        Ok(Self { backend })
    }

    /// The owned backend
    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// The owned backend, mutably
    pub fn backend_mut(&mut self) -> &mut dyn Backend {
        self.backend.as_mut()
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        gfx_info!("nebula::Context", "destroying '{}' backend", self.backend.name());
        BACKEND_ACTIVE.store(false, Ordering::SeqCst);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

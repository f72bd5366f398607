use super::*;
use crate::backend::mock_backend::MockBackend;
use crate::backend::{Backend, Init};
use crate::error::GfxError;
use serial_test::serial;

// The one-instance guard and the factory registry are process-global, so
// every test here runs serialized.

#[test]
#[serial]
fn test_from_backend_then_drop_releases_guard() {
    let ctx = Context::from_backend(Box::new(MockBackend::new())).unwrap();
    assert_eq!(ctx.backend().name(), "Mock");
    drop(ctx);

    // Guard released: a second lifecycle succeeds
    let ctx = Context::from_backend(Box::new(MockBackend::new())).unwrap();
    drop(ctx);
}

#[test]
#[serial]
fn test_second_context_while_alive_is_rejected() {
    let ctx = Context::from_backend(Box::new(MockBackend::new())).unwrap();

    let second = Context::from_backend(Box::new(MockBackend::new()));
    assert!(matches!(second, Err(GfxError::InitializationFailed(_))));

    drop(ctx);
}

#[test]
#[serial]
fn test_unknown_backend_name_fails_and_releases_guard() {
    let result = Context::new("no-such-backend", &Init::default());
    assert!(matches!(result, Err(GfxError::InitializationFailed(_))));

    // Failure must not leave the guard set
    let ctx = Context::from_backend(Box::new(MockBackend::new())).unwrap();
    drop(ctx);
}

#[test]
#[serial]
fn test_registered_factory_is_used() {
    register_backend("mock-for-context-test", |_init| {
        Ok(Box::new(MockBackend::new()) as Box<dyn Backend>)
    });

    let ctx = Context::new("mock-for-context-test", &Init::default()).unwrap();
    assert_eq!(ctx.backend().name(), "Mock");
    drop(ctx);
}

#[test]
#[serial]
fn test_registry_lists_registered_names() {
    register_backend("mock-listed", |_init| {
        Ok(Box::new(MockBackend::new()) as Box<dyn Backend>)
    });
    let names = backend_registry().lock().unwrap().names();
    assert!(names.contains(&"mock-listed"));
}

#[test]
#[serial]
fn test_backend_mut_reaches_owned_instance() {
    let mut ctx = Context::from_backend(Box::new(MockBackend::new())).unwrap();
    ctx.backend_mut().set_marker("frame start");
    assert!(!ctx.backend().is_device_removed());
    drop(ctx);
}

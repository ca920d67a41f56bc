use std::fs;
use std::path::Path;
use std::sync::Once;

static LOGGING_INIT: Once = Once::new();

/// Installs a test-writer tracing subscriber once per test binary.
///
/// Integration tests call this; unit tests that assert on logs use
/// `tracing_test::traced_test` instead, which installs its own subscriber.
pub fn setup_test_logging() {
    LOGGING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Creates `root/rel` with `content`, including missing parent directories.
///
/// Panics on failure; meant for building test fixtures.
pub fn create_file(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create {parent:?}: {e}"));
    }
    fs::write(&path, content).unwrap_or_else(|e| panic!("write {path:?}: {e}"));
}

/// Returns true when the current process runs as root (UID 0).
/// We use this to skip permission-sensitive tests in Docker/act.
#[cfg(any(test, doctest))]
#[inline]
pub fn running_as_root() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid has no preconditions and cannot fail.
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}

#![allow(dead_code)]

use cmdtree_core::{
    CommandDispatcher, CommandRegistry, CommandSource, CompileContext, PermissionProvider,
    RegistrationEnvironment, RegistrationReport,
};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// An invocation source acting for an optional principal.
#[derive(Debug, Clone, Default)]
pub struct TestSource {
    pub principal: Option<String>,
    pub level: u32,
}

impl TestSource {
    pub fn anonymous() -> TestSource {
        TestSource::default()
    }

    pub fn named(principal: &str) -> TestSource {
        TestSource {
            principal: Some(principal.to_string()),
            level: 0,
        }
    }

    pub fn with_level(mut self, level: u32) -> TestSource {
        self.level = level;
        self
    }
}

impl CommandSource for TestSource {
    type Principal = String;

    fn principal(&self) -> Option<String> {
        self.principal.clone()
    }
}

/// Grants exactly the listed `(principal, permission)` pairs.
pub fn grants(entries: &[(&str, &str)]) -> impl PermissionProvider<String> + 'static {
    let entries: Vec<(String, String)> = entries
        .iter()
        .map(|(principal, permission)| (principal.to_string(), permission.to_string()))
        .collect();
    move |principal: &String, permission: &str| {
        entries
            .iter()
            .any(|(p, perm)| p == principal && perm == permission)
    }
}

pub fn registry() -> CommandRegistry<TestSource> {
    CommandRegistry::new(Default::default())
}

/// Registers everything in `registry` with a fresh dispatcher.
pub fn dispatch(
    registry: CommandRegistry<TestSource>,
    permissions: impl PermissionProvider<String> + 'static,
) -> (CommandDispatcher<TestSource>, RegistrationReport) {
    let mut dispatcher = CommandDispatcher::new(RegistrationEnvironment::Dedicated);
    let context: CompileContext<TestSource> = CompileContext::new(permissions);
    let report = registry.register_all(&mut dispatcher, RegistrationEnvironment::All, &context);
    (dispatcher, report)
}

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` with warnings and errors captured, returning its result and
/// the captured log lines.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .with_max_level(Level::WARN)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let lines = capture.contents().lines().map(str::to_string).collect();
    (result, lines)
}

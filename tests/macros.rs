use modlog::{InMemoryOutputter, Severity, WriterOutputter};
use std::io::Write;
use std::sync::{Arc, Mutex};

static TEST_LOGGER_GUARD: Mutex<()> = Mutex::new(());

mod quiet {
    #[inline(never)]
    pub fn chatter() {
        modlog::info!("quiet module says {}", "hi");
        modlog::error!("quiet module failed");
        std::hint::black_box(());
    }
}

mod loud {
    #[inline(never)]
    pub fn chatter() {
        modlog::debug!("loud module detail {}", 42);
        std::hint::black_box(());
    }
}

fn capture() -> Arc<InMemoryOutputter> {
    let memory = Arc::new(InMemoryOutputter::new());
    modlog::set_outputter(memory.clone());
    memory
}

fn restore() {
    modlog::set_default_threshold(Severity::Warn);
    modlog::set_outputter(Arc::new(WriterOutputter::stderr()));
}

#[test]
fn macros_filter_by_calling_module() {
    let _guard = TEST_LOGGER_GUARD.lock().unwrap();
    let memory = capture();
    modlog::set_default_threshold(Severity::Info);
    modlog::set_module_threshold("macros::quiet", Severity::Error);
    modlog::set_module_threshold("macros::loud", Severity::Debug);

    quiet::chatter();
    loud::chatter();

    let logs = memory.drain_logs();
    assert_eq!(
        logs,
        "error: quiet module failed\ndebug: loud module detail 42"
    );
    restore();
}

#[test]
fn every_level_macro() {
    let _guard = TEST_LOGGER_GUARD.lock().unwrap();
    let memory = capture();
    modlog::set_default_threshold(Severity::Debug);

    modlog::debug!("d");
    modlog::info!("i");
    modlog::printf!("p {}", 1);
    modlog::warn!("w");
    modlog::error!("e");
    modlog::log!(Severity::Fatal, "f");

    assert_eq!(
        memory.drain_logs(),
        "debug: d\ninfo: i\ninfo: p 1\nwarning: w\nerror: e\nfatal: f"
    );
    restore();
}

#[test]
fn log_panic_panics_after_logging() {
    let _guard = TEST_LOGGER_GUARD.lock().unwrap();
    let memory = capture();
    let result = std::panic::catch_unwind(|| {
        modlog::log_panic!("cannot continue: {}", "corrupt index");
    });
    assert!(result.is_err());
    assert_eq!(memory.drain_logs(), "panic: cannot continue: corrupt index");
    restore();
}

#[test]
fn global_writer() {
    let _guard = TEST_LOGGER_GUARD.lock().unwrap();
    let memory = capture();
    modlog::set_default_threshold(Severity::Info);
    let mut writer = modlog::writer();
    writeln!(writer, "from a writer").unwrap();
    assert_eq!(memory.drain_logs(), "info: from a writer");
    restore();
}

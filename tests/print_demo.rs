//! Prints a short walk-through to stderr.  Run with `--nocapture` to watch it.

use modlog::Severity;

mod foo {
    #[inline(never)]
    pub fn log() {
        modlog::info!("hello from foo");
        modlog::warn!("warning from foo");
    }

    #[inline(never)]
    pub fn standard_log() {
        use std::io::Write;
        let mut writer = modlog::writer();
        let _ = writer.write(b"foo wrote through an io::Write\n");
    }
}

#[test]
fn print_demo() {
    modlog::printf!("hello world (hidden at the default warning threshold)");
    modlog::set_default_threshold(Severity::Debug);
    modlog::printf!("hello world");

    modlog::set_default_threshold(Severity::Warn);
    foo::log();

    modlog::set_default_threshold(Severity::Debug);
    foo::log();

    // foo is already cached at debug from the call above
    modlog::set_module_threshold("print_demo::foo", Severity::Panic);
    foo::log();

    modlog::standard_logger().clear_cache();
    foo::log();

    // functions at the root of the test binary are attributed to their directory
    modlog::set_module_threshold("tests", Severity::Panic);
    modlog::printf!("hidden: the test's own directory is now silenced");

    foo::standard_log();
}

//! Tests for verbose output and the file sink.

use logger::{enable_verbose, error, info, verbose, warn};

#[cfg(feature = "verbose")]
#[test]
fn verbose_respects_runtime_flag() {
    use logger::{disable_verbose, is_verbose_enabled};

    disable_verbose();
    assert!(!is_verbose_enabled());
    verbose!("This should not appear");

    enable_verbose();
    assert!(is_verbose_enabled());
    verbose!("This should appear: verbose test {}", 42);
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_captures_tagged_messages() {
    use logger::{close_file_logging, init_file_logging, set_level, Level};
    use std::fs;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let log_path = dir.path().join("gradebook.log");

    set_level(Level::Info);
    assert!(init_file_logging(&log_path));

    info!("Grade added for 1002 in OOP101");
    warn!("Student 1002 is already enrolled in OOP101");
    error!("Test error message");

    enable_verbose();
    verbose!("This verbose message should NOT be in the file");

    close_file_logging();

    let contents = fs::read_to_string(&log_path).expect("Failed to read log file");
    assert!(contents.contains("[INFO] Grade added for 1002 in OOP101"));
    assert!(contents.contains("[WARN] Student 1002 is already enrolled in OOP101"));
    assert!(contents.contains("[ERROR] Test error message"));
    assert!(!contents.contains("verbose message"));
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_fails_for_missing_directory() {
    use logger::init_file_logging;
    use std::path::Path;

    assert!(!init_file_logging(Path::new(
        "/definitely/not/a/real/dir/gradebook.log"
    )));
}

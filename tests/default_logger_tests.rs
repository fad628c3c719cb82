use rotolog::{Flags, Level, Value};
use std::io::{self, Write};
use std::process::Command;
use std::sync::{Arc, Mutex, MutexGuard};

// The default logger is shared by every test in this binary.
static DEFAULT_LOCK: Mutex<()> = Mutex::new(());

fn lock_default() -> MutexGuard<'static, ()> {
    DEFAULT_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_default() -> SharedBuf {
    let buf = SharedBuf::default();
    rotolog::set_output(buf.clone());
    rotolog::set_flags(Flags::NONE);
    rotolog::set_level(Level::Debug);
    buf
}

#[test]
fn test_free_functions_use_default_logger() {
    let _guard = lock_default();
    let buf = capture_default();

    rotolog::debug("test debug", &[]);
    rotolog::info("test info, %d/%f/%s", &[Value::Int(0), Value::Float(1.456), Value::Str("s")]);
    rotolog::warnln(&[Value::Str("warn "), Value::Bool(true)]);
    rotolog::error("test error, %v", &[Value::Uint(7)]);
    rotolog::errorln(&[]);

    assert_eq!(
        buf.contents(),
        "[DEBUG] test debug\n\
         [INFO ] test info, 0/1.456000/s\n\
         [WARN ] warn true\n\
         [ERROR] test error, 7\n\
         [ERROR] \n"
    );
}

#[test]
fn test_macros_use_default_logger() {
    let _guard = lock_default();
    let buf = capture_default();
    let name = String::from("db");

    rotolog::info!("connected to %s in %.1fms", name, 2.5);
    rotolog::infoln!("plain ", name);
    rotolog::debugln!();

    assert_eq!(
        buf.contents(),
        "[INFO ] connected to db in 2.5ms\n[INFO ] plain db\n[DEBUG] \n"
    );
}

#[test]
fn test_level_change_is_seen_by_other_threads() {
    let _guard = lock_default();
    let buf = capture_default();

    std::thread::spawn(|| rotolog::set_level(Level::Error))
        .join()
        .unwrap();
    assert_eq!(rotolog::logger().level(), Level::Error);

    rotolog::warn!("dropped");
    std::thread::spawn(|| rotolog::error!("kept"))
        .join()
        .unwrap();

    assert_eq!(buf.contents(), "[ERROR] kept\n");
}

#[test]
fn test_default_logger_rotates() {
    let _guard = lock_default();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log/max_file_size.log");

    rotolog::set_log_file(&path).unwrap();
    rotolog::set_flags(Flags::NONE);
    rotolog::set_level(Level::Debug);
    rotolog::set_max_size(1024);
    rotolog::logger().set_file_prefix("default");

    for i in 0..1024 {
        rotolog::info!("Test max file size, line:%d", i);
    }

    let logger = rotolog::logger();
    assert!(logger.rotations() >= 1);
    assert!(logger.current_size() <= 1024);
    assert_ne!(logger.path(), Some(path.clone()));

    rotolog::set_max_size(100 * 1024 * 1024);
    rotolog::set_output(io::sink());
}

#[test]
fn test_set_log_file_failure_keeps_previous_target() {
    let _guard = lock_default();
    let buf = capture_default();
    let dir = tempfile::tempdir().unwrap();

    assert!(rotolog::set_log_file(dir.path()).is_err());
    rotolog::info!("still captured");

    assert_eq!(buf.contents(), "[INFO ] still captured\n");
}

#[test]
fn test_init_applies_config() {
    let _guard = lock_default();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("init.log");

    rotolog::builder()
        .with_level(Level::Warn)
        .with_flags(Flags::NONE)
        .with_file(&path)
        .with_max_size(4096)
        .init()
        .unwrap();

    rotolog::info!("skipped");
    rotolog::warn!("written");
    assert_eq!(rotolog::logger().max_size(), 4096);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[WARN ] written\n");

    rotolog::set_max_size(100 * 1024 * 1024);
    rotolog::set_output(io::sink());
}

const PANIC_CHILD_ENV: &str = "ROTOLOG_PANIC_CHILD_LOG";

#[test]
fn test_panic_exits_with_status_one() {
    if let Some(path) = std::env::var_os(PANIC_CHILD_ENV) {
        rotolog::set_log_file(&path).unwrap();
        rotolog::set_flags(Flags::NONE);
        rotolog::fatal!("fatal %s", "problem");
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("panic.log");
    let status = Command::new(std::env::current_exe().unwrap())
        .args(["test_panic_exits_with_status_one", "--exact", "--nocapture"])
        .env(PANIC_CHILD_ENV, &path)
        .status()
        .expect("spawn child test process");

    assert_eq!(status.code(), Some(1));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "[PANIC] fatal problem\n"
    );
}

use parking_lot::Mutex;
/// Log bridge for xibao
///
/// Routes every `log::info!()` etc. to stderr and mirrors it to
/// /tmp/xibao_debug.log on Unix/macOS, or %TEMP%\xibao_debug.log on Windows.
///
/// Level precedence:
/// 1. `--log-level` on the command line
/// 2. `RUST_LOG` (a bare level such as `debug`)
/// 3. `log_level` in the config file, applied once the config is loaded
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};
use xibao_config::LogLevel;

/// Global log bridge
struct LogBridge {
    file: Mutex<Option<File>>,
    /// Set when the CLI or RUST_LOG chose the level
    explicit: AtomicBool,
}

impl LogBridge {
    fn new() -> Self {
        LogBridge {
            file: Mutex::new(None),
            explicit: AtomicBool::new(false),
        }
    }

    fn open_file(&self) {
        let log_path = log_path();
        match OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&log_path)
        {
            Ok(mut f) => {
                let _ = writeln!(
                    f,
                    "{}\nxibao session started at {} (level={})\n{}",
                    "=".repeat(80),
                    get_timestamp(),
                    log::max_level(),
                    "=".repeat(80)
                );
                *self.file.lock() = Some(f);
            }
            // Stderr still works without the mirror
            Err(e) => eprintln!("xibao: cannot open {}: {}", log_path.display(), e),
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        let _ = std::io::stderr().write_all(line.as_bytes());
        if let Some(ref mut file) = *self.file.lock() {
            let _ = file.write_all(line.as_bytes());
        }
    }

    fn flush(&self) {
        if let Some(ref mut file) = *self.file.lock() {
            let _ = file.flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

fn get_bridge() -> &'static LogBridge {
    BRIDGE.get_or_init(LogBridge::new)
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Path of the mirrored log file.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    let log_path = PathBuf::from("/tmp/xibao_debug.log");
    #[cfg(not(unix))]
    let log_path = std::env::temp_dir().join("xibao_debug.log");
    log_path
}

/// `RUST_LOG` as a single level, if it is one.
fn env_level() -> Option<LevelFilter> {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|val| val.trim().parse::<LevelFilter>().ok())
}

/// Effective level: CLI, then environment, then config.
pub fn resolve_level(
    cli: Option<LevelFilter>,
    env: Option<LevelFilter>,
    config: LogLevel,
) -> LevelFilter {
    cli.or(env).unwrap_or_else(|| config.to_level_filter())
}

/// Install the bridge as the global logger.
///
/// Call once, before anything logs. Later calls only adjust the level.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let bridge = get_bridge();
    let env = env_level();
    bridge
        .explicit
        .store(cli_level.or(env).is_some(), Ordering::Relaxed);

    let level = resolve_level(cli_level, env, LogLevel::Off);
    let installed = log::set_logger(bridge).is_ok();
    log::set_max_level(level);
    if installed && level != LevelFilter::Off {
        bridge.open_file();
    }
}

/// Apply the config file's level unless the CLI or `RUST_LOG` already chose one.
pub fn apply_config_level(level: LogLevel) {
    let bridge = get_bridge();
    if bridge.explicit.load(Ordering::Relaxed) {
        return;
    }
    let filter = level.to_level_filter();
    let was_off = log::max_level() == LevelFilter::Off;
    log::set_max_level(filter);
    if was_off && filter != LevelFilter::Off && bridge.file.lock().is_none() {
        bridge.open_file();
    }
}

//! Default logging setup for the aigsat crates
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(missing_docs)]

use std::{
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex, Once,
    },
};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct MemoryAmount(usize);

impl fmt::Display for MemoryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 1000 {
            write!(f, "{:5}B", self.0)
        } else if self.0 < 1000 << 10 {
            write!(f, "{:5.1}K", self.0 as f64 / (1u64 << 10) as f64)
        } else if self.0 < 1000 << 20 {
            write!(f, "{:5.1}M", self.0 as f64 / (1u64 << 20) as f64)
        } else {
            write!(f, "{:5.1}G", self.0 as f64 / (1u64 << 30) as f64)
        }
    }
}

/// Peak resident set size of the current process.
fn peak_rss() -> MemoryAmount {
    #[cfg(all(unix, not(miri)))]
    {
        // SAFETY: rusage is plain old data so all zeros is valid
        let mut rusage: libc::rusage = unsafe { std::mem::zeroed() };
        // SAFETY: getrusage only writes to the passed pointer, which is valid for writes
        if unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut rusage) } < 0 {
            return MemoryAmount(0);
        }
        // linux reports KiB, macos reports bytes
        let scale = if cfg!(target_os = "macos") { 1 } else { 1024 };
        MemoryAmount(rusage.ru_maxrss.max(0) as usize * scale)
    }
    #[cfg(not(all(unix, not(miri))))]
    {
        MemoryAmount(0)
    }
}

const TIMESTAMP_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::BrightBlack)));

const MEMORY_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue)));
const MEMORY_NEW_PEAK_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red)));

const TARGET_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Magenta)));

fn builder(default_filter: &str) -> env_logger::Builder {
    env_logger::Builder::from_env(
        env_logger::Env::new()
            .filter_or("AIGSAT_LOG", default_filter)
            .write_style("AIGSAT_LOG_STYLE"),
    )
}

/// Perform the default logging setup used by binaries built on the aigsat crates.
///
/// The filter is read from `AIGSAT_LOG` (defaulting to `info`) and the color choice from
/// `AIGSAT_LOG_STYLE`. A header line with the target is printed whenever the target changes.
pub fn setup() {
    let start_time = std::time::Instant::now();
    let peak = AtomicUsize::new(peak_rss().0);
    let last_target = Mutex::new(String::new());

    builder("info")
        .format(move |buf, record| {
            use std::io::Write;

            let timestamp = start_time.elapsed();
            let level = record.level();
            let target = record.target();

            let max = peak_rss();
            let new_peak = peak.fetch_max(max.0, Ordering::Relaxed) < max.0;
            let memory_style = if new_peak {
                MEMORY_NEW_PEAK_STYLE
            } else {
                MEMORY_STYLE
            };

            let mut last_target = last_target.lock().unwrap_or_else(|err| err.into_inner());
            if target != *last_target {
                last_target.clear();
                last_target.push_str(target);

                writeln!(
                    buf,
                    "{} {} {}",
                    format_args!("{style}{timestamp:>9.2?}{style:#}", style = TIMESTAMP_STYLE),
                    format_args!("{style}{max}{style:#}", style = memory_style),
                    format_args!("{style}{target}{style:#}", style = TARGET_STYLE)
                )?;
            }
            writeln!(
                buf,
                "{} {} {} {}",
                format_args!("{style}{timestamp:>9.2?}{style:#}", style = TIMESTAMP_STYLE),
                format_args!("{style}{max}{style:#}", style = memory_style),
                format_args!(
                    "{style}{level}{style:#}",
                    style = buf.default_level_style(level),
                ),
                record.args(),
            )
        })
        .init();
}

/// Logging setup for unit and integration tests.
///
/// Output goes through the test harness capture, so it only shows up for failing tests or with
/// `--nocapture`. `AIGSAT_LOG` still overrides the given default filter. Only the first call in a
/// process has an effect.
pub fn test_setup(default_filter: &str) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = builder(default_filter).is_test(true).try_init();
    });
}

//! Logging setup shared by the binary and the tests.
//!
//! Lines look like `INFO    1234 [entities/l1sap] l1sap_bs.rs:88: message`, where the
//! number is the `fn_num` field of the event, when it has one.

use core::fmt;
use std::fs::OpenOptions;
use std::sync::Once;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt as tracingfmt, EnvFilter};

/// Logs a warning instead of panicking when `cond` does not hold
#[macro_export]
macro_rules! assert_warn {
    ($cond:expr, $($arg:tt)+) => {{
        if !$cond {
            tracing::warn!(
                target: module_path!(),
                "assertion `{}` failed: {} at {}:{}",
                stringify!($cond),
                format_args!($($arg)+),
                file!(),
                line!(),
            );
        }
    }};
}

/// Width of the location prefix, messages start in the same column
const LOCATION_WIDTH: usize = 70;

/// Field shown in the prefix instead of the message
const FN_FIELD: &str = "fn_num";

struct AlignedFormatter;

#[derive(Default)]
struct FnVisitor {
    fn_num: Option<String>,
}

impl tracing::field::Visit for FnVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == FN_FIELD {
            self.fn_num = Some(format!("{:?}", value));
        }
    }
}

/// Shortens a source path, `crates/gsm-entities/src/l1sched/tx.rs` becomes `[entities/l1sched] tx.rs`
fn short_location(file_path: &str) -> String {
    let Some(src_idx) = file_path.find("/src/") else {
        return file_path.to_string();
    };
    let (before, after) = (&file_path[..src_idx], &file_path[src_idx + 5..]);
    let krate = match before.rfind("gsm-") {
        Some(i) => &before[i + 4..],
        None => before.rsplit('/').next().unwrap_or(before),
    };
    match after.split_once('/') {
        Some((module, rest)) => {
            let file = rest.rsplit('/').next().unwrap_or(rest);
            format!("[{}/{}] {}", krate, module, file)
        }
        None => format!("[{}] {}", krate, after),
    }
}

/// Removes `fn_num=... ` from formatted fields
fn strip_fn_field(message: &mut String) {
    let key = format!("{}=", FN_FIELD);
    let Some(start) = message.find(&key) else {
        return;
    };
    match message[start..].find(' ') {
        Some(len) => message.replace_range(start..start + len + 1, ""),
        None => message.truncate(start),
    }
}

fn level_color(level: &tracing::Level) -> &'static str {
    match *level {
        tracing::Level::ERROR => "\x1b[31m",
        tracing::Level::WARN => "\x1b[33m",
        tracing::Level::INFO => "\x1b[32m",
        tracing::Level::DEBUG => "\x1b[34m",
        tracing::Level::TRACE => "\x1b[35m",
    }
}

impl<S, N> FormatEvent<S, N> for AlignedFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        let mut visitor = FnVisitor::default();
        event.record(&mut visitor);

        let (color, reset) = if writer.has_ansi_escapes() {
            (level_color(metadata.level()), "\x1b[0m")
        } else {
            ("", "")
        };
        let location = format!(
            "{}{:<5}{} {:>7} {}:{}:",
            color,
            metadata.level(),
            reset,
            visitor.fn_num.as_deref().unwrap_or(""),
            short_location(metadata.file().unwrap_or("unknown")),
            metadata.line().unwrap_or(0)
        );

        let mut message = String::new();
        ctx.field_format().format_fields(format::Writer::new(&mut message), event)?;
        if visitor.fn_num.is_some() {
            strip_fn_field(&mut message);
        }

        // Primitives crossing a SAP start with an arrow, keep their payload aligned
        let width = if message.starts_with("->") || message.starts_with("<-") {
            LOCATION_WIDTH - 3
        } else {
            LOCATION_WIDTH
        };
        writeln!(writer, "{:<width$} {}", location, message, width = width)
    }
}

static INIT_LOG: Once = Once::new();

fn with_directives(mut filter: EnvFilter, directives: &[&str]) -> EnvFilter {
    for d in directives {
        match d.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("ignoring log directive {}: {}", d, e),
        }
    }
    filter
}

/// Trace everything to stdout, for tests
pub fn setup_logging_verbose() {
    setup_logging(EnvFilter::new("trace"), None);
}

/// Logs to stdout and, when given, at debug level to `verbose_logfile`.
/// The returned guard must be kept alive for the file log to be written.
pub fn setup_logging_default(verbose_logfile: Option<String>) -> Option<WorkerGuard> {
    let logfile = verbose_logfile.map(|file| (file, EnvFilter::new("debug")));
    setup_logging(get_default_stdout_filter(), logfile)
}

/// RUST_LOG if set, otherwise info with the per-frame chatter of the lower layers hidden
pub fn get_default_stdout_filter() -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    with_directives(EnvFilter::new("info"), &[
        "gsm_entities::messagerouter=warn",
        "gsm_entities::phy::components=warn",
        "gsm_entities::l1sched=info",
        "gsm_entities::l1sap=debug",
        "gsm_entities::rsl=debug",
    ])
}

fn setup_logging(stdout_filter: EnvFilter, logfile: Option<(String, EnvFilter)>) -> Option<WorkerGuard> {
    let logfile = logfile.and_then(|(path, filter)| {
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(f) => Some((f, filter)),
            Err(e) => {
                eprintln!("cannot open log file {}: {}", path, e);
                None
            }
        }
    });

    let Some((file, file_filter)) = logfile else {
        INIT_LOG.call_once(|| {
            let stdout_layer = tracingfmt::layer().event_format(AlignedFormatter).with_filter(stdout_filter);
            tracing_subscriber::registry().with(stdout_layer).init();
        });
        return None;
    };

    let (file_writer, guard) = tracing_appender::non_blocking(file);
    INIT_LOG.call_once(|| {
        let file_layer = tracingfmt::layer()
            .event_format(AlignedFormatter)
            .with_writer(file_writer)
            .with_ansi(false)
            .with_filter(file_filter);
        let stdout_layer = tracingfmt::layer().event_format(AlignedFormatter).with_filter(stdout_filter);
        tracing_subscriber::registry().with(file_layer).with(stdout_layer).init();
    });
    Some(guard)
}

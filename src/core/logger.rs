//! Main logger implementation
//!
//! A [`Logger`] turns semantic logging calls into entries, filters them against
//! each registered output, and queues one write per accepted (entry, output)
//! pair. Writes are drained by a single flush cycle at a time; where that cycle
//! runs depends on the configured [`FlushMode`].

use super::{
    config::{ConfigOverrides, DropHook, ErrorHook, FlushMode, LoggerConfig, QueueLimit},
    error::{LoggerError, Result},
    log_arg::{LogArg, LogArgs},
    log_entry::LogEntry,
    log_level::{LogLevel, LogType},
    metrics::LoggerMetrics,
    output::Output,
    queue::{Enqueued, PendingWrite, QueuedWrite, WriteOp, WriteQueue},
    writer::LogWriter,
};
use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};
use std::thread;
use std::time::{Duration, Instant};

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// This timeout is used when the last logger handle is dropped without an
/// explicit shutdown. For custom timeout control, use [`Logger::shutdown`].
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// How long [`Logger::flush`] waits for a background cycle to drain the queue
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

thread_local! {
    /// Address of the `Shared` whose cycle is draining on this thread, or 0
    static RUNNING_CYCLE: Cell<usize> = Cell::new(0);
}

/// Marks the current thread as the consumer of one logger's cycle
struct CycleOwner {
    previous: usize,
}

impl CycleOwner {
    fn enter(shared: &Shared) -> Self {
        let previous = RUNNING_CYCLE.with(|owner| owner.replace(shared.address()));
        Self { previous }
    }
}

impl Drop for CycleOwner {
    fn drop(&mut self) {
        RUNNING_CYCLE.with(|owner| owner.set(self.previous));
    }
}

/// Dispatch core handle.
///
/// Cloning is cheap. [`Logger::scoped`] derives a logger that shares the same
/// outputs, queue and flush state but tags its entries with a scope label.
#[derive(Clone)]
pub struct Logger {
    shared: Arc<Shared>,
    scope: Option<String>,
}

/// State shared by a logger and every scoped logger derived from it
struct Shared {
    config: LoggerConfig,
    outputs: RwLock<Vec<Arc<Output>>>,
    queue: WriteQueue,
    /// Serializes consumers so at most one cycle drains at a time
    cycle: Mutex<()>,
    metrics: LoggerMetrics,
    on_error: Option<ErrorHook>,
    on_drop: Option<DropHook>,
    scheduler: Scheduler,
}

enum Scheduler {
    Worker(Worker),
    Manual,
    #[cfg(feature = "tokio-runtime")]
    Tokio(tokio::runtime::Handle),
}

/// Dedicated consumer thread, woken once per requested cycle
struct Worker {
    wake: Mutex<Option<Sender<()>>>,
    handle: Mutex<Option<thread::JoinHandle<()>>>,
}

impl Worker {
    fn spawn(shared: Weak<Shared>) -> std::io::Result<Self> {
        let (wake, receiver) = bounded::<()>(1);

        let handle = thread::Builder::new()
            .name("logora-flush".to_string())
            .spawn(move || {
                for () in receiver.iter() {
                    match shared.upgrade() {
                        Some(shared) => shared.run_cycle(),
                        None => break,
                    }
                }
            })?;

        Ok(Self {
            wake: Mutex::new(Some(wake)),
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Signal the consumer. `false` if it is gone and the caller must drain.
    fn wake(&self) -> bool {
        match self.wake.lock().as_ref() {
            Some(sender) => match sender.try_send(()) {
                Ok(()) | Err(TrySendError::Full(())) => true,
                Err(TrySendError::Disconnected(())) => false,
            },
            None => false,
        }
    }

    /// Close the wake channel and wait for the thread to exit
    fn stop(&self, timeout: Duration) -> bool {
        drop(self.wake.lock().take());

        let Some(handle) = self.handle.lock().take() else {
            return true;
        };

        // The last handle can be released by the worker itself mid-cycle
        if handle.thread().id() == thread::current().id() {
            return true;
        }

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!(
                        "[LOGGER ERROR] Flush worker panicked during shutdown: {}",
                        panic_message(e.as_ref())
                    );
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Flush worker did not finish within {:?} timeout. \
                     Some logs may be lost.",
                    timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(5));
        }
    }
}

impl Shared {
    /// Idle -> Active, then hand the cycle to the scheduler
    fn request_flush(self: &Arc<Self>) {
        if !self.queue.try_activate() {
            return;
        }

        match &self.scheduler {
            Scheduler::Worker(worker) => {
                if !worker.wake() {
                    self.run_cycle();
                }
            }
            Scheduler::Manual => {}
            #[cfg(feature = "tokio-runtime")]
            Scheduler::Tokio(handle) => {
                let shared = Arc::clone(self);
                handle.spawn(async move { shared.run_cycle() });
            }
        }
    }

    /// Drain the queue in FIFO order, re-checking it after every write
    fn run_cycle(&self) {
        let _running = self.cycle.lock();
        let _owner = CycleOwner::enter(self);
        self.metrics.record_flush_cycle();

        while let Some(write) = self.queue.pop_or_idle() {
            self.execute(write);
        }
    }

    fn address(&self) -> usize {
        self as *const Self as usize
    }

    /// Whether this thread is inside one of this logger's cycles, e.g. in a hook
    fn in_cycle(&self) -> bool {
        RUNNING_CYCLE.with(|owner| owner.get() == self.address())
    }

    /// Run one write, containing any error or panic it raises
    fn execute(&self, write: PendingWrite) {
        let PendingWrite { output, op, scope } = write;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut writer = output.writer().lock();
            render(&mut **writer, &op)
        }));

        let error = match outcome {
            Ok(Ok(())) => {
                self.metrics.record_written();
                return;
            }
            Ok(Err(e)) => e,
            Err(panic_info) => {
                LoggerError::writer_panic(output.name(), panic_message(panic_info.as_ref()))
            }
        };

        self.metrics.record_write_failure();

        if let Some(ref on_error) = self.on_error {
            let fallback = LogEntry::flush_error(&error, scope);
            on_error(&error, &fallback);
        }
    }

    fn flush_writers(&self) -> Result<()> {
        let outputs = self.outputs.read().clone();
        for output in outputs {
            panic::catch_unwind(AssertUnwindSafe(|| output.writer().lock().flush())).map_err(
                |panic_info| {
                    LoggerError::writer_panic(output.name(), panic_message(panic_info.as_ref()))
                },
            )??;
        }
        Ok(())
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        // No handle is left to enqueue, so whatever remains is drained here
        for write in self.queue.take_all() {
            self.execute(write);
        }

        if let Err(e) = self.flush_writers() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }

        if let Scheduler::Worker(ref worker) = self.scheduler {
            worker.stop(DEFAULT_SHUTDOWN_TIMEOUT);
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped writes (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

fn render(writer: &mut dyn LogWriter, op: &WriteOp) -> Result<()> {
    match op {
        WriteOp::Entry(entry) if entry.log_type == LogType::Raw => {
            writer.print(&entry.message, &entry.args)
        }
        WriteOp::Entry(entry) => writer.log(entry),
        WriteOp::Title(title) => writer.title(title),
        WriteOp::Blank(count) => writer.empty(*count),
        WriteOp::Clear => writer.clear(),
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Logger {
    /// Logger with default configuration and no outputs
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Logger with the given configuration and no outputs
    #[must_use]
    pub fn with_config(config: LoggerConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use logora::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .level(LogLevel::Debug)
    ///     .queue_limit(QueueLimit::Bounded(500))
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn info(&self, message: impl Into<String>, args: impl Into<LogArgs>) {
        self.dispatch(LogType::Info, message.into(), args.into().into_vec());
    }

    pub fn warning(&self, message: impl Into<String>, args: impl Into<LogArgs>) {
        self.dispatch(LogType::Warning, message.into(), args.into().into_vec());
    }

    /// Errors reach every output: no level is stricter than Error
    pub fn error(&self, message: impl Into<String>, args: impl Into<LogArgs>) {
        self.dispatch(LogType::Error, message.into(), args.into().into_vec());
    }

    pub fn success(&self, message: impl Into<String>, args: impl Into<LogArgs>) {
        self.dispatch(LogType::Success, message.into(), args.into().into_vec());
    }

    pub fn debug(&self, message: impl Into<String>, args: impl Into<LogArgs>) {
        self.dispatch(LogType::Debug, message.into(), args.into().into_vec());
    }

    /// Always shown: delivered to every output regardless of its level
    pub fn highlight(&self, message: impl Into<String>, args: impl Into<LogArgs>) {
        self.dispatch(LogType::Highlight, message.into(), args.into().into_vec());
    }

    /// Raw passthrough to every output, without level, timestamp or scope
    pub fn print(&self, message: impl Into<String>, args: impl Into<LogArgs>) {
        self.dispatch(LogType::Raw, message.into(), args.into().into_vec());
    }

    pub fn log(&self, log_type: LogType, message: impl Into<String>, args: impl Into<LogArgs>) {
        self.dispatch(log_type, message.into(), args.into().into_vec());
    }

    /// Log by numeric type code. Unknown codes are printed raw.
    pub fn log_code(&self, code: u32, message: impl Into<String>, args: impl Into<LogArgs>) {
        let log_type = LogType::from_code(code).unwrap_or(LogType::Raw);
        self.dispatch(log_type, message.into(), args.into().into_vec());
    }

    /// Section title on every output
    pub fn title(&self, title: impl Into<String>) {
        let title = title.into();
        self.broadcast(|| WriteOp::Title(title.clone()));
    }

    /// `count` blank lines on every output
    pub fn empty(&self, count: usize) {
        self.broadcast(|| WriteOp::Blank(count));
    }

    /// A single blank line on every output
    pub fn empty_line(&self) {
        self.empty(1);
    }

    /// Clear every output surface
    pub fn clear(&self) {
        self.broadcast(|| WriteOp::Clear);
    }

    /// Derive a logger that tags its entries with `label`.
    ///
    /// The derived logger shares outputs, queue and flush state with `self`,
    /// so outputs added through either are visible to both.
    #[must_use]
    pub fn scoped(&self, label: impl Into<String>) -> Logger {
        Logger {
            shared: Arc::clone(&self.shared),
            scope: Some(label.into()),
        }
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn add_output(&self, output: Output) {
        self.shared.outputs.write().push(Arc::new(output));
    }

    /// Register a writer under `name` using the logger's default level
    pub fn add_writer<W: LogWriter + 'static>(&self, name: impl Into<String>, writer: W) {
        self.add_output(Output::new(name, writer));
    }

    /// Names of the registered outputs, in registration order
    pub fn outputs(&self) -> Vec<String> {
        self.shared
            .outputs
            .read()
            .iter()
            .map(|o| o.name().to_string())
            .collect()
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.shared.config
    }

    /// Get the logger metrics, shared with all scoped loggers
    ///
    /// # Example
    ///
    /// ```
    /// use logora::Logger;
    ///
    /// let logger = Logger::new();
    /// logger.info("hello", ());
    ///
    /// let metrics = logger.metrics();
    /// println!("Dropped: {}", metrics.dropped_count());
    /// println!("Drop rate: {:.2}%", metrics.drop_rate());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    /// Number of writes dropped because the queue was full
    pub fn dropped_count(&self) -> u64 {
        self.shared.metrics.dropped_count()
    }

    /// Snapshot of the writes still waiting in the queue
    pub fn pending(&self) -> Vec<QueuedWrite> {
        self.shared.queue.snapshot()
    }

    pub fn pending_len(&self) -> usize {
        self.shared.queue.len()
    }

    /// Whether a flush cycle is scheduled or running
    pub fn is_flushing(&self) -> bool {
        self.shared.queue.is_active()
    }

    /// Deliver everything queued so far, then flush every writer's sink.
    ///
    /// In [`FlushMode::Manual`] this runs the pending cycle on the calling
    /// thread. Otherwise it waits up to [`DEFAULT_FLUSH_TIMEOUT`] for the
    /// background cycle to go idle.
    pub fn flush(&self) -> Result<()> {
        if !self.drain(DEFAULT_FLUSH_TIMEOUT) {
            return Err(LoggerError::FlushTimeout(DEFAULT_FLUSH_TIMEOUT));
        }
        self.shared.flush_writers()
    }

    /// Gracefully stop background flushing with a custom timeout
    ///
    /// Pending writes are drained first. Writes logged afterwards are
    /// delivered on the calling thread.
    ///
    /// **Note**: When the last handle is dropped without calling `shutdown()`,
    /// [`DEFAULT_SHUTDOWN_TIMEOUT`] is used.
    ///
    /// # Returns
    ///
    /// `true` if shutdown completed successfully within timeout, `false` otherwise
    ///
    /// # Example
    ///
    /// ```no_run
    /// use logora::Logger;
    /// use std::time::Duration;
    ///
    /// let logger = Logger::new();
    /// logger.info("Important message", ());
    ///
    /// if !logger.shutdown(Duration::from_secs(10)) {
    ///     eprintln!("Warning: Logger shutdown timed out");
    /// }
    /// ```
    pub fn shutdown(&self, timeout: Duration) -> bool {
        let drained = self.drain(timeout);

        if let Scheduler::Worker(ref worker) = self.shared.scheduler {
            if !worker.stop(timeout) {
                return false;
            }
        }

        if !drained {
            eprintln!(
                "[LOGGER WARNING] {} writes still pending after {:?}",
                self.shared.queue.len(),
                timeout
            );
            return false;
        }

        if let Err(e) = self.shared.flush_writers() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
            return false;
        }

        true
    }

    /// Wait until the queue is idle.
    ///
    /// Called from inside a running cycle (a hook), this returns at once: the
    /// enclosing cycle keeps draining after the hook returns. Tokio cycles are
    /// drained on the caller, which on a current-thread runtime is the only
    /// thread able to run the spawned task.
    fn drain(&self, timeout: Duration) -> bool {
        if self.shared.in_cycle() {
            return true;
        }

        match self.shared.scheduler {
            Scheduler::Worker(_) => self.shared.queue.wait_idle(timeout),
            _ => {
                if self.shared.queue.is_active() {
                    self.shared.run_cycle();
                }
                true
            }
        }
    }

    fn dispatch(&self, log_type: LogType, message: String, args: Vec<LogArg>) {
        let entry = Arc::new(LogEntry::new(log_type, message, args).with_scope(self.scope.clone()));
        self.shared.metrics.record_entry();

        let default_level = self.shared.config.level;
        let severity = entry.severity();
        let outputs = self.shared.outputs.read().clone();

        for output in outputs
            .iter()
            .filter(|o| severity.map_or(true, |s| o.accepts(s, default_level)))
        {
            self.enqueue(output, WriteOp::Entry(Arc::clone(&entry)));
        }

        self.shared.request_flush();
    }

    fn broadcast(&self, op: impl Fn() -> WriteOp) {
        let outputs = self.shared.outputs.read().clone();
        for output in &outputs {
            self.enqueue(output, op());
        }
        self.shared.request_flush();
    }

    fn enqueue(&self, output: &Arc<Output>, op: WriteOp) {
        let write = PendingWrite {
            output: Arc::clone(output),
            op,
            scope: self.scope.clone(),
        };

        match self.shared.queue.push(write) {
            Enqueued::Accepted => {
                self.shared.metrics.record_enqueued();
            }
            Enqueued::Rejected(write) => {
                self.shared.metrics.record_dropped();
                if let (WriteOp::Entry(entry), Some(on_drop)) = (&write.op, &self.shared.on_drop) {
                    on_drop(entry);
                }
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("scope", &self.scope)
            .field("config", &self.shared.config)
            .field("outputs", &self.outputs())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use logora::prelude::*;
/// use logora::writers::MemoryWriter;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .output(Output::new("memory", MemoryWriter::new()).with_level(LogLevel::Warning))
///     .queue_limit(QueueLimit::Bounded(1000))
///     .on_drop(|entry| eprintln!("dropped: {}", entry.message))
///     .build();
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    outputs: Vec<Output>,
    on_error: Option<ErrorHook>,
    on_drop: Option<DropHook>,
    #[cfg(feature = "tokio-runtime")]
    runtime: Option<tokio::runtime::Handle>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            outputs: Vec::new(),
            on_error: None,
            on_drop: None,
            #[cfg(feature = "tokio-runtime")]
            runtime: None,
        }
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Apply a partial configuration over the current one
    #[must_use = "builder methods return a new value"]
    pub fn overrides(mut self, overrides: &ConfigOverrides) -> Self {
        self.config = self.config.merge(overrides);
        self
    }

    /// Level for outputs that do not set their own
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn queue_limit(mut self, limit: QueueLimit) -> Self {
        self.config.queue_limit = limit;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn flush_mode(mut self, mode: FlushMode) -> Self {
        self.config.flush_mode = mode;
        self
    }

    /// Add an output
    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, output: Output) -> Self {
        self.outputs.push(output);
        self
    }

    /// Add a writer under `name` with the default level
    #[must_use = "builder methods return a new value"]
    pub fn writer<W: LogWriter + 'static>(self, name: impl Into<String>, writer: W) -> Self {
        self.output(Output::new(name, writer))
    }

    /// Set the hook called when a writer fails during a flush
    ///
    /// The hook receives the error and an Error-type entry whose message is
    /// `"flush error"` and whose single argument describes the failure.
    #[must_use = "builder methods return a new value"]
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&LoggerError, &LogEntry) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Set the hook called with each entry dropped on queue overflow
    #[must_use = "builder methods return a new value"]
    pub fn on_drop<F>(mut self, hook: F) -> Self
    where
        F: Fn(&LogEntry) + Send + Sync + 'static,
    {
        self.on_drop = Some(Arc::new(hook));
        self
    }

    /// Run flush cycles as tasks on a tokio runtime instead of a worker thread
    #[cfg(feature = "tokio-runtime")]
    #[must_use = "builder methods return a new value"]
    pub fn tokio_runtime(mut self, handle: tokio::runtime::Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let LoggerBuilder {
            config,
            outputs,
            on_error,
            on_drop,
            #[cfg(feature = "tokio-runtime")]
            runtime,
        } = self;

        let shared = Arc::new_cyclic(|weak| {
            #[cfg(feature = "tokio-runtime")]
            let scheduler = match runtime {
                Some(handle) => Scheduler::Tokio(handle),
                None => scheduler_for(config.flush_mode, weak),
            };
            #[cfg(not(feature = "tokio-runtime"))]
            let scheduler = scheduler_for(config.flush_mode, weak);

            Shared {
                queue: WriteQueue::new(config.queue_limit.capacity()),
                outputs: RwLock::new(outputs.into_iter().map(Arc::new).collect()),
                cycle: Mutex::new(()),
                metrics: LoggerMetrics::new(),
                on_error,
                on_drop,
                scheduler,
                config,
            }
        });

        Logger {
            shared,
            scope: None,
        }
    }
}

fn scheduler_for(mode: FlushMode, shared: &Weak<Shared>) -> Scheduler {
    match mode {
        FlushMode::Manual => Scheduler::Manual,
        FlushMode::Worker => match Worker::spawn(shared.clone()) {
            Ok(worker) => Scheduler::Worker(worker),
            Err(e) => {
                eprintln!(
                    "[LOGGER ERROR] Failed to spawn flush worker: {}. Falling back to manual flushing.",
                    e
                );
                Scheduler::Manual
            }
        },
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

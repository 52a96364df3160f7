//! Logging macros taking a template and any mix of argument types.
//!
//! Each argument is converted with `LogArg::from`, so strings, integers,
//! floats, booleans and options can be passed side by side.
//!
//! # Examples
//!
//! ```
//! use logora::prelude::*;
//! use logora::info;
//!
//! let logger = Logger::new();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With positional arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {0}", port);
//!
//! // Mixed argument types
//! let user_id = 42;
//! let action = "login";
//! info!(logger, "User {0} performed action: {1} ({2})", user_id, action, true);
//! ```

/// Collect heterogeneous values into a `Vec<LogArg>`.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_args {
    ($($arg:expr),* $(,)?) => {{
        let args: ::std::vec::Vec<$crate::LogArg> = ::std::vec![$($crate::LogArg::from($arg)),*];
        args
    }};
}

/// Log a message of the given type.
///
/// # Examples
///
/// ```
/// # use logora::prelude::*;
/// # let logger = Logger::new();
/// use logora::log;
/// log!(logger, LogType::Info, "Simple message");
/// log!(logger, LogType::Error, "Error code: {0}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $log_type:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($log_type, $message, $crate::__log_args!($($arg),*))
    };
}

/// Log a debug message.
///
/// # Examples
///
/// ```
/// # use logora::prelude::*;
/// # let logger = Logger::new();
/// use logora::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {0}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $logger.debug($message, $crate::__log_args!($($arg),*))
    };
}

/// Log an info message.
///
/// # Examples
///
/// ```
/// # use logora::prelude::*;
/// # let logger = Logger::new();
/// use logora::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {0} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $logger.info($message, $crate::__log_args!($($arg),*))
    };
}

/// Log a success message.
#[macro_export]
macro_rules! success {
    ($logger:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $logger.success($message, $crate::__log_args!($($arg),*))
    };
}

/// Log a warning message.
///
/// # Examples
///
/// ```
/// # use logora::prelude::*;
/// # let logger = Logger::new();
/// use logora::warning;
/// warning!(logger, "Low disk space");
/// warning!(logger, "Retry attempt {0} of {1}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $logger.warning($message, $crate::__log_args!($($arg),*))
    };
}

/// Log an error message.
///
/// # Examples
///
/// ```
/// # use logora::prelude::*;
/// # let logger = Logger::new();
/// use logora::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {0}, message: {1}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $logger.error($message, $crate::__log_args!($($arg),*))
    };
}

/// Log a highlighted message, shown on every output regardless of level.
#[macro_export]
macro_rules! highlight {
    ($logger:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $logger.highlight($message, $crate::__log_args!($($arg),*))
    };
}

/// Print a raw message to every output.
#[macro_export]
macro_rules! raw {
    ($logger:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $logger.print($message, $crate::__log_args!($($arg),*))
    };
}

//! Logging macros.
//!
//! Each macro takes a printf-style template followed by its arguments (the
//! `…ln` forms take only arguments and concatenate them). Arguments may be any
//! [`ToValue`](crate::ToValue) type. By default records go to the process-wide
//! logger; prefix the arguments with `logger: <expr>,` to target another one.
//!
//! ```rust
//! use rotolog::{Logger, info, warnln};
//!
//! let logger = Logger::new(std::io::sink());
//! let retries = 3;
//! info!(logger: &logger, "connected after %d retries", retries);
//! warnln!(logger: logger, "slow response: ", 1.5, "s");
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __log_template {
    ($logger:expr, $method:ident, $template:expr $(, $arg:expr)*) => {
        $logger.$method($template, &[$($crate::ToValue::to_value(&$arg)),*])
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_concat {
    ($logger:expr, $method:ident $(, $arg:expr)*) => {
        $logger.$method(&[$($crate::ToValue::to_value(&$arg)),*])
    };
}

/// Log a DEBUG record from a template.
#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_template!($logger, debug, $template $(, $arg)*)
    };
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_template!($crate::logger(), debug, $template $(, $arg)*)
    };
}

/// Log a DEBUG record by concatenating the arguments.
#[macro_export]
macro_rules! debugln {
    (logger: $logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_concat!($logger, debugln $(, $arg)*)
    };
    ($($arg:expr),* $(,)?) => {
        $crate::__log_concat!($crate::logger(), debugln $(, $arg)*)
    };
}

/// Log an INFO record from a template.
#[macro_export]
macro_rules! info {
    (logger: $logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_template!($logger, info, $template $(, $arg)*)
    };
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_template!($crate::logger(), info, $template $(, $arg)*)
    };
}

/// Log an INFO record by concatenating the arguments.
#[macro_export]
macro_rules! infoln {
    (logger: $logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_concat!($logger, infoln $(, $arg)*)
    };
    ($($arg:expr),* $(,)?) => {
        $crate::__log_concat!($crate::logger(), infoln $(, $arg)*)
    };
}

/// Log a WARNING record from a template.
#[macro_export]
macro_rules! warn {
    (logger: $logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_template!($logger, warn, $template $(, $arg)*)
    };
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_template!($crate::logger(), warn, $template $(, $arg)*)
    };
}

/// Log a WARNING record by concatenating the arguments.
#[macro_export]
macro_rules! warnln {
    (logger: $logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_concat!($logger, warnln $(, $arg)*)
    };
    ($($arg:expr),* $(,)?) => {
        $crate::__log_concat!($crate::logger(), warnln $(, $arg)*)
    };
}

/// Log an ERROR record from a template.
#[macro_export]
macro_rules! error {
    (logger: $logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_template!($logger, error, $template $(, $arg)*)
    };
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_template!($crate::logger(), error, $template $(, $arg)*)
    };
}

/// Log an ERROR record by concatenating the arguments.
#[macro_export]
macro_rules! errorln {
    (logger: $logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_concat!($logger, errorln $(, $arg)*)
    };
    ($($arg:expr),* $(,)?) => {
        $crate::__log_concat!($crate::logger(), errorln $(, $arg)*)
    };
}

/// Log a PANIC record from a template, then exit the process with status 1.
#[macro_export]
macro_rules! fatal {
    (logger: $logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_template!($logger, panic, $template $(, $arg)*)
    };
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_template!($crate::logger(), panic, $template $(, $arg)*)
    };
}

/// Log a PANIC record by concatenating the arguments, then exit with status 1.
#[macro_export]
macro_rules! fatalln {
    (logger: $logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_concat!($logger, panicln $(, $arg)*)
    };
    ($($arg:expr),* $(,)?) => {
        $crate::__log_concat!($crate::logger(), panicln $(, $arg)*)
    };
}

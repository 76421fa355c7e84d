// Decoder tracing. Forwards to `log` with the `debug` feature, compiles to nothing otherwise.

#[cfg(feature = "debug")]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

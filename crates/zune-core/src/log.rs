/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Logging shims
//!
//! With the `log` feature enabled these are the `log` crate macros,
//! otherwise they type check their arguments and expand to nothing.
//!
//! Decoders use three levels
//! - `trace` for header fields and per frame progress
//! - `warn` for corruption that was recovered from
//! - `error` for frames that had to be abandoned

#[cfg(feature = "log")]
pub use log::{error, trace, warn};

// #[macro_export] puts macros at the crate root, the re-export below
// gives them a path under `zune_core::log`
#[cfg(not(feature = "log"))]
pub use crate::{__error as error, __trace as trace, __warn as warn};

#[cfg(not(feature = "log"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __discard_log {
    ($($arg:tt)+) => {{
        let _ = format_args!($($arg)+);
    }};
}

#[cfg(not(feature = "log"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __error {
    ($($arg:tt)+) => {
        $crate::__discard_log!($($arg)+)
    };
}

#[cfg(not(feature = "log"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __warn {
    ($($arg:tt)+) => {
        $crate::__discard_log!($($arg)+)
    };
}

#[cfg(not(feature = "log"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __trace {
    ($($arg:tt)+) => {
        $crate::__discard_log!($($arg)+)
    };
}

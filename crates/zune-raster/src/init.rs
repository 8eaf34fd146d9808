/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Process wide initialisation state
//!
//! One flag says whether the decoding core has been set up, a counter
//! records how many times that happened.
//! [`RasterStream::decode_frame`](crate::RasterStream::decode_frame)
//! calls [`ensure_initialized`] itself, callers only need [`shutdown`]
//! if they want to tear the state down, e.g between tests.
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use zune_core::log::trace;

static INITIALIZED: AtomicBool = AtomicBool::new(false);
static GENERATION: AtomicUsize = AtomicUsize::new(0);

/// Initialise the decoding core if it is not already initialised.
///
/// Idempotent, returns the current initialisation generation
pub fn ensure_initialized() -> usize {
    if INITIALIZED
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_ok()
    {
        let generation = GENERATION.fetch_add(1, Ordering::AcqRel) + 1;
        trace!("Raster core initialised, generation {generation}");
        return generation;
    }
    GENERATION.load(Ordering::Acquire)
}

/// Tear down the initialisation state.
///
/// A later [`ensure_initialized`] starts a new generation.
/// Returns whether the core was initialised before the call
pub fn shutdown() -> bool {
    let was_initialized = INITIALIZED.swap(false, Ordering::AcqRel);
    if was_initialized {
        trace!("Raster core shut down");
    }
    was_initialized
}

/// Whether the core is currently initialised
pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::Acquire)
}

/// How many times the core has been initialised
pub fn init_generation() -> usize {
    GENERATION.load(Ordering::Acquire)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_shutdown_cycle() {
        let first = ensure_initialized();
        assert!(is_initialized());
        assert!(first >= 1);
        assert!(init_generation() >= first);

        shutdown();
        let second = ensure_initialized();
        assert!(second > first);
        assert!(is_initialized());
    }
}

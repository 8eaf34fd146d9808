/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Core routines shared by the raster coders
//!
//! This crate provides a set of core routines shared
//! by the decoders under the `zune` umbrella
//!
//! It currently contains
//!
//! - A bytestream reader with endian aware reads and EOF tolerant variants
//! - Colorspace and bit depth information shared by images
//! - Image decoder options
//! - Logging shims that forward to the `log` crate when enabled
//!
//! This library is `#[no_std]` with `alloc` feature needed for defining `Vec`
//! which we need for storing decoded  bytes.
//!
//!
//! # Features
//!  - `std`: Implements the byte source trait for `std::io::Cursor` and `BufReader`
//!
//!  - `log`: Routes `zune_core::log` macros to the `log` crate
//!
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
//!
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod bit_depth;
pub mod bytestream;
pub mod colorspace;
pub mod log;
pub mod options;
pub mod serde;

/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader
//! with endian aware reads.
//!
//! Every raster decoder pulls its bytes through [`ZReader`], which wraps
//! anything implementing [`ZByteReaderTrait`]. In memory buffers should use
//! [`ZCursor`], with the `std` feature `std::io::Cursor` and `BufReader` work too.
pub use reader::zcursor::ZCursor;
pub use reader::{ZByteIoError, ZReader, ZSeekFrom};
pub use traits::ZByteReaderTrait;

mod reader;
mod traits;

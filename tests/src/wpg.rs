/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::{BufReader, Cursor};

use zune_core::bytestream::{ZByteReaderTrait, ZCursor};
use zune_core::options::DecoderOptions;
use zune_raster::init::{ensure_initialized, init_generation, is_initialized, shutdown};
use zune_wpg::{probe_wpg, FrameStatus, WpgDecoder, WpgFrame};

use crate::{hash, load_manifest, JsonStatus, TestEntry};

fn status_of(frame: &WpgFrame) -> JsonStatus {
    match frame.status() {
        FrameStatus::Complete => JsonStatus::Complete,
        FrameStatus::Partial { .. } => JsonStatus::Partial,
        FrameStatus::Aborted(_) => JsonStatus::Aborted
    }
}

/// Hash of every frame's quantum samples, little endian
fn frames_hash(frames: &[WpgFrame]) -> u128 {
    let bytes = frames
        .iter()
        .flat_map(|frame| frame.pixels().iter().flat_map(|x| x.to_le_bytes()))
        .collect::<Vec<u8>>();
    hash(&bytes)
}

fn decode_frames<T: ZByteReaderTrait>(source: T) -> Vec<WpgFrame> {
    WpgDecoder::new_with_options(source, DecoderOptions::new_safe())
        .decode()
        .unwrap()
}

/// Collect every mismatch of one entry
fn check_entry(entry: &TestEntry) -> Vec<String> {
    let mut errors = vec![];
    let bytes = entry.bytes();

    if !probe_wpg(&bytes) {
        errors.push("probe rejected the file".to_string());
    }

    let mut decoder = WpgDecoder::new(ZCursor::new(&bytes));
    let frames = match decoder.decode() {
        Ok(frames) => frames,
        Err(err) => {
            errors.push(format!("decode failed: {err:?}"));
            return errors;
        }
    };

    if frames.len() != entry.frames {
        errors.push(format!("expected {} frames, found {}", entry.frames, frames.len()));
    }
    if decoder.embedded_blobs().len() != entry.embedded {
        errors.push(format!(
            "expected {} embedded blobs, found {}",
            entry.embedded,
            decoder.embedded_blobs().len()
        ));
    }
    let first = &frames[0];

    if first.dimensions() != (entry.width, entry.height) {
        errors.push(format!(
            "expected {}x{}, found {:?}",
            entry.width,
            entry.height,
            first.dimensions()
        ));
    }
    if first.colorspace() != entry.colorspace.to_colorspace() {
        errors.push(format!(
            "expected {:?}, found {:?}",
            entry.colorspace,
            first.colorspace()
        ));
    }
    if status_of(first) != entry.status {
        errors.push(format!("expected {:?}, found {:?}", entry.status, first.status()));
    }
    if first.to_u8() != entry.pixels {
        errors.push(format!(
            "pixels differ\nExpected {:?}\nFound    {:?}",
            entry.pixels,
            first.to_u8()
        ));
    }

    // the same file through the std readers must decode identically
    let expected = frames_hash(&frames);
    let from_cursor = frames_hash(&decode_frames(Cursor::new(bytes.clone())));
    let from_buf_reader = frames_hash(&decode_frames(BufReader::new(Cursor::new(bytes))));

    if from_cursor != expected || from_buf_reader != expected {
        errors.push(format!(
            "reader mismatch, ZCursor {expected}, Cursor {from_cursor}, BufReader {from_buf_reader}"
        ));
    }
    errors
}

#[test]
fn test_wpg() {
    let entries = load_manifest("wpg.json");
    let mut failed = Vec::new();

    for entry in &entries {
        let errors = check_entry(entry);
        if !errors.is_empty() {
            eprintln!("{}:\n  {}\nConfig:{:#?}\n", entry.name, errors.join("\n  "), entry);
            failed.push(entry.name.clone());
        }
    }
    if !failed.is_empty() {
        panic!("Errors found during test decoding\n {:#?}", failed);
    }
}

#[test]
fn headers_without_decoding() {
    let entries = load_manifest("wpg.json");

    for entry in &entries {
        let bytes = entry.bytes();
        let mut decoder = WpgDecoder::new(ZCursor::new(&bytes));
        decoder.decode_headers().unwrap();

        assert_eq!(
            decoder.dimensions(),
            Some((entry.width, entry.height)),
            "{}",
            entry.name
        );
        assert_eq!(
            decoder.colorspace(),
            Some(entry.colorspace.to_colorspace()),
            "{}",
            entry.name
        );
    }
}

#[test]
fn strict_mode_rejects_partial_files() {
    let entries = load_manifest("wpg.json");

    for entry in entries.iter().filter(|e| e.status == JsonStatus::Partial) {
        let bytes = entry.bytes();
        let result =
            WpgDecoder::new_with_options(ZCursor::new(&bytes), DecoderOptions::new_strict())
                .decode();
        assert!(result.is_err(), "{} decoded in strict mode", entry.name);
    }
}

#[test]
fn library_init_is_reentrant() {
    let first = ensure_initialized();
    assert!(is_initialized());
    // idempotent while initialized
    assert_eq!(ensure_initialized(), first);

    shutdown();
    // decoding initializes again
    let entries = load_manifest("wpg.json");
    let bytes = entries[0].bytes();
    WpgDecoder::new(ZCursor::new(&bytes)).decode().unwrap();

    assert!(is_initialized());
    assert!(init_generation() > first);
}

#[test]
fn image_description_serializes() {
    let entries = load_manifest("wpg.json");
    let bytes = entries[0].bytes();

    let mut decoder = WpgDecoder::new(ZCursor::new(&bytes));
    decoder.decode_headers().unwrap();

    let summary = serde_json::json!({
        "colorspace": decoder.colorspace(),
        "depth": decoder.depth()
    });
    assert_eq!(summary.to_string(), r#"{"colorspace":"Luma","depth":16}"#);
}

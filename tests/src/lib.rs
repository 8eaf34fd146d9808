/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(unused_imports, unused)]

use std::fs::read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use xxhash_rust::xxh3::xxh3_128;
use zune_core::colorspace::ColorSpace;

mod wpg;

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonColorspace {
    RGB,
    RGBA,
    Luma,
    LumaA
}

impl JsonColorspace {
    pub fn to_colorspace(self) -> ColorSpace {
        match self {
            Self::RGB => ColorSpace::RGB,
            Self::RGBA => ColorSpace::RGBA,
            Self::Luma => ColorSpace::Luma,
            Self::LumaA => ColorSpace::LumaA
        }
    }
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JsonStatus {
    Complete,
    Partial,
    Aborted
}

/// A synthetic file and what decoding it must produce
#[derive(Clone, Deserialize, Debug)]
pub struct TestEntry {
    pub name:       String,
    /// The whole file, hex encoded
    pub hex:        String,
    pub frames:     usize,
    pub width:      usize,
    pub height:     usize,
    pub colorspace: JsonColorspace,
    pub status:     JsonStatus,
    /// First frame scaled to eight bits
    pub pixels:     Vec<u8>,
    #[serde(default)]
    pub embedded:   usize,
    pub comment:    Option<String>
}

impl TestEntry {
    pub fn bytes(&self) -> Vec<u8> {
        decode_hex(&self.hex)
    }
}

pub fn manifest_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join(name)
}

pub fn load_manifest(name: &str) -> Vec<TestEntry> {
    let json_file = read(manifest_path(name)).unwrap();
    serde_json::from_slice(&json_file).unwrap()
}

fn decode_hex(hex: &str) -> Vec<u8> {
    assert_eq!(hex.len() % 2, 0, "odd hex length");
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
        .collect()
}

fn hash(contents: &[u8]) -> u128 {
    xxh3_128(contents)
}

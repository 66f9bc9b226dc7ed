// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words keyprobe

//! Library surface for the `keyprobe` binary: the clap CLI definition lives
//! here so it can be exercised by tests without spawning the binary.

#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

pub mod clap_config;

pub use clap_config::*;

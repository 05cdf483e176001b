// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Core runtime support for bare-metal SiFive targets.
//!
//! The runtime crate holds the code shared by the chip crates and the C
//! library shim: the standard error enum, the compile-time configuration
//! object, the diagnostic trace facility, and MMIO helpers.

#![no_std]

#[macro_use]
pub mod debug;
pub mod utilities;

mod config;
mod errorcode;

pub use crate::errorcode::{errno, ErrorCode};

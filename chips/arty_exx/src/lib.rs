// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Chip support for the SiFive E31 and E51 Core Complex evaluation images on
//! the Digilent Arty FPGA board.

#![no_std]
#![crate_name = "arty_exx"]
#![crate_type = "rlib"]

#[cfg(not(any(feature = "sifive_e31arty", feature = "sifive_e51arty")))]
compile_error!("Unsupported device: enable the `sifive_e31arty` or `sifive_e51arty` feature.");

mod config;

pub mod device;
pub mod trace;
pub mod uart;

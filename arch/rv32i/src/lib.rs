// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Support for the 32-bit RISC-V architecture.

#![no_std]
#![crate_name = "rv32i"]
#![crate_type = "rlib"]

pub mod support;

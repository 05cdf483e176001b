// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Implementations for generic SiFive MCU peripherals.

#![no_std]
#![crate_name = "sifive"]
#![crate_type = "rlib"]

pub mod uart;

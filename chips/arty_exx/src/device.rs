// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Properties of the selected Arty evaluation image.

/// Static description of one evaluation image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Device {
    pub name: &'static str,
    /// Nominal core clock of the FPGA bitstream. Boards that measure the
    /// running frequency should pass the measured value instead.
    pub core_frequency_hz: u32,
}

pub const E31_ARTY: Device = Device {
    name: "SiFive E31 Arty",
    core_frequency_hz: 65_000_000,
};

pub const E51_ARTY: Device = Device {
    name: "SiFive E51 Arty",
    core_frequency_hz: 65_000_000,
};

/// The device this crate was built for.
#[cfg(feature = "sifive_e31arty")]
pub const DEVICE: Device = E31_ARTY;

/// The device this crate was built for.
#[cfg(all(feature = "sifive_e51arty", not(feature = "sifive_e31arty")))]
pub const DEVICE: Device = E51_ARTY;

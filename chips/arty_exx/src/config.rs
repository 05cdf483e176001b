// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Compile-time configuration for the Arty chip crate.

pub(crate) struct Config {
    /// Whether UART0 carries the trace output.
    pub(crate) trace_uart0: bool,
}

/// The only place in this crate where Cargo features other than the device
/// selection are consulted.
pub(crate) const CONFIG: Config = Config {
    trace_uart0: !cfg!(feature = "no_trace_uart0"),
};

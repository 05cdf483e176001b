// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Data structure for storing compile-time configuration options in the
//! runtime.
//!
//! Options are collected in a `const` object rather than spread over
//! `#[cfg(...)]` attributes, so every code path is type-checked whether or
//! not the option is enabled. The compiler folds the constant and removes
//! the disabled path from the binary.

/// Data structure holding compile-time configuration options.
pub(crate) struct Config {
    /// Whether `trace!` output reaches the registered trace writer.
    ///
    /// If disabled, trace lines are formatted nowhere and the trace writer is
    /// never called, which removes the formatting machinery from size
    /// constrained release builds.
    pub(crate) trace: bool,
}

/// A unique instance of `Config` where compile-time configuration options are
/// defined. This is the only location in the runtime crate where Cargo
/// features are consulted.
pub(crate) const CONFIG: Config = Config {
    trace: !cfg!(feature = "no_trace"),
};

// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Compile-time configuration for the newlib shim.

pub(crate) struct Config {
    /// Whether `Diagnostics::from_config` installs a breakpoint hook that
    /// traps on every unsupported call.
    ///
    /// Only honoured in debug builds, so a stray feature flag cannot leave
    /// `ebreak`s in a release image.
    pub(crate) debug_syscalls_brk: bool,
}

pub(crate) const CONFIG: Config = Config {
    debug_syscalls_brk: cfg!(debug_assertions) && cfg!(feature = "debug_syscalls_brk"),
};

// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Selection of the [`Syscalls`] implementation the C symbols dispatch to.

use core::cell::Cell;

use runtime::debug::GlobalTrace;

use crate::diagnostics::Diagnostics;
use crate::syscalls::{DefaultSyscalls, Syscalls};

/// An installable implementation with a fallback for when none is installed.
pub struct SyscallTable {
    installed: Cell<Option<&'static dyn Syscalls>>,
    fallback: &'static dyn Syscalls,
}

// Only touched from the single hardware thread of control; see `install`.
unsafe impl Sync for SyscallTable {}

impl SyscallTable {
    pub const fn new(fallback: &'static dyn Syscalls) -> SyscallTable {
        SyscallTable {
            installed: Cell::new(None),
            fallback,
        }
    }

    /// Route every later [`SyscallTable::get`] to `table`.
    ///
    /// # Safety
    ///
    /// Must not race with `get`: call it during board setup, before
    /// interrupts are enabled.
    pub unsafe fn install(&self, table: &'static dyn Syscalls) {
        self.installed.set(Some(table));
    }

    pub fn get(&self) -> &'static dyn Syscalls {
        self.installed.get().unwrap_or(self.fallback)
    }
}

struct Fallback(DefaultSyscalls<'static>);

// Holds only shared references to stateless values.
unsafe impl Sync for Fallback {}

static FALLBACK: Fallback = Fallback(DefaultSyscalls::new(Diagnostics::from_config(
    &GlobalTrace,
)));

/// The table behind the exported C symbols. Until something is installed it
/// answers with the defaults, tracing to the global trace output.
pub static SYSCALLS: SyscallTable = SyscallTable::new(&FALLBACK.0);

// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Reporting of unsupported calls.
//!
//! Every default operation that fails reports through a [`Diagnostics`]: it
//! optionally hits a breakpoint hook, so a debugger stops at the offending
//! call site, and then writes a trace line naming the operation.

use core::fmt;

use runtime::debug::Trace;
use runtime::ErrorCode;

use crate::config::CONFIG;
use crate::syscall::{SyscallId, SyscallSet};

/// Called with the operation about to fail.
pub type BreakpointHook = fn(SyscallId);

/// Trap into the debugger, whatever the operation.
pub fn debugger_breakpoint(_id: SyscallId) {
    rv32i::support::breakpoint();
}

pub struct Diagnostics<'a> {
    trace: &'a dyn Trace,
    breakpoint: Option<BreakpointHook>,
    break_on: SyscallSet,
}

impl<'a> Diagnostics<'a> {
    /// Trace to `trace`, without any breakpoint hook.
    pub const fn new(trace: &'a dyn Trace) -> Diagnostics<'a> {
        Diagnostics {
            trace,
            breakpoint: None,
            break_on: SyscallSet::EMPTY,
        }
    }

    /// Trace to `trace`, and trap on every unsupported call if the build
    /// enables `debug_syscalls_brk`.
    pub const fn from_config(trace: &'a dyn Trace) -> Diagnostics<'a> {
        let diagnostics = Diagnostics::new(trace);
        if CONFIG.debug_syscalls_brk {
            diagnostics.with_breakpoint(debugger_breakpoint, SyscallSet::ALL)
        } else {
            diagnostics
        }
    }

    /// Call `hook` before failing any operation in `ops`.
    pub const fn with_breakpoint(self, hook: BreakpointHook, ops: SyscallSet) -> Diagnostics<'a> {
        Diagnostics {
            trace: self.trace,
            breakpoint: Some(hook),
            break_on: ops,
        }
    }

    /// Operations the breakpoint hook applies to.
    pub fn breakpoints(&self) -> SyscallSet {
        match self.breakpoint {
            Some(_) => self.break_on,
            None => SyscallSet::EMPTY,
        }
    }

    pub fn breakpoint(&self, id: SyscallId) {
        if self.break_on.contains(id) {
            if let Some(hook) = self.breakpoint {
                hook(id);
            }
        }
    }

    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.trace.trace_line(args);
    }

    /// Report `id` as not implemented and fail with `NOSUPPORT`.
    pub fn unsupported<T>(&self, id: SyscallId) -> Result<T, ErrorCode> {
        self.breakpoint(id);
        self.trace(format_args!("{}() ENOSYS", id.symbol()));
        Err(ErrorCode::NOSUPPORT)
    }
}

impl fmt::Debug for Diagnostics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("breakpoints", &self.breakpoints())
            .finish()
    }
}

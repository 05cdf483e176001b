// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Support for diagnostic trace output.
//!
//! Trace lines are formatted with `core::fmt` and pushed synchronously into a
//! byte sink implementing [`IoWrite`], normally a polled UART. Each line is
//! terminated with a single `"\n"`; translating that into `"\r\n"` is the
//! output device's job.
//!
//! Usage
//! -----
//!
//! ```rust,ignore
//! # use runtime::trace;
//! // Once, during board setup:
//! unsafe { runtime::debug::set_trace_writer(uart_writer) };
//!
//! trace!("_open() ENOSYS");
//! trace!("divisor = {}", div);
//! ```
//!
//! Code that wants its diagnostics to be injectable, and testable without a
//! global, takes a `&dyn Trace` instead of calling `trace!` directly.
//! [`GlobalTrace`] forwards such a sink to the global trace output.

use core::cell::{RefCell, UnsafeCell};
use core::fmt::{self, Write};

use crate::config::CONFIG;

/// A byte-oriented output device.
pub trait IoWrite {
    /// Write `buf`, blocking until every byte has been accepted. Returns the
    /// number of bytes consumed from `buf`.
    fn write(&mut self, buf: &[u8]) -> usize;
}

/// A destination for formatted diagnostic lines.
pub trait Trace {
    /// Emit `args` as one line. The implementation appends the terminator.
    fn trace_line(&self, args: fmt::Arguments<'_>);
}

/// Adapts an [`IoWrite`] into a `core::fmt::Write`.
pub struct TraceWriter<'a, W: IoWrite + ?Sized> {
    inner: &'a mut W,
}

impl<'a, W: IoWrite + ?Sized> TraceWriter<'a, W> {
    pub fn new(inner: &'a mut W) -> Self {
        TraceWriter { inner }
    }
}

impl<W: IoWrite + ?Sized> Write for TraceWriter<'_, W> {
    /// Fails once the device stops accepting bytes, which ends formatting.
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.inner.write(s.as_bytes()) < s.len() {
            return Err(fmt::Error);
        }
        Ok(())
    }
}

/// Format `args` into `writer` followed by a newline.
///
/// A line the writer stops accepting is abandoned, terminator included.
pub fn write_line<W: IoWrite + ?Sized>(writer: &mut W, args: fmt::Arguments<'_>) {
    let mut out = TraceWriter::new(writer);
    if out.write_fmt(args).is_ok() {
        let _ = out.write_str("\n");
    }
}

/// Lines are dropped while the sink is already borrowed, which only happens if
/// a trace line is emitted from inside the sink itself.
impl<W: IoWrite> Trace for RefCell<W> {
    fn trace_line(&self, args: fmt::Arguments<'_>) {
        if let Ok(mut writer) = self.try_borrow_mut() {
            write_line(&mut *writer, args);
        }
    }
}

struct TraceOutput(UnsafeCell<Option<&'static mut dyn IoWrite>>);

// The trace output is only ever touched from the single hardware thread of
// control; see `set_trace_writer`.
unsafe impl Sync for TraceOutput {}

static TRACE_OUTPUT: TraceOutput = TraceOutput(UnsafeCell::new(None));

/// Register `writer` as the global trace output, replacing any previous one.
///
/// # Safety
///
/// Must not race with `begin_trace_fmt`: call it during board setup, before
/// interrupts that might trace are enabled.
pub unsafe fn set_trace_writer(writer: &'static mut dyn IoWrite) {
    unsafe {
        *TRACE_OUTPUT.0.get() = Some(writer);
    }
}

/// Write one formatted line to the global trace output.
///
/// Lines emitted before a writer is registered are discarded.
pub fn begin_trace_fmt(args: fmt::Arguments<'_>) {
    if !CONFIG.trace {
        return;
    }
    // Safety: single thread of control, and `set_trace_writer` is not called
    // concurrently.
    let output = unsafe { &mut *TRACE_OUTPUT.0.get() };
    if let Some(writer) = output.as_deref_mut() {
        write_line(writer, args);
    }
}

/// [`Trace`] sink that forwards to the global trace output.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalTrace;

impl Trace for GlobalTrace {
    fn trace_line(&self, args: fmt::Arguments<'_>) {
        begin_trace_fmt(args);
    }
}

/// In-kernel style `printf()` for diagnostics.
///
/// Writes one line to the global trace output. Does nothing until a trace
/// writer has been registered.
#[macro_export]
macro_rules! trace {
    () => ({
        $crate::trace!("")
    });
    ($($arg:tt)+) => ({
        $crate::debug::begin_trace_fmt(format_args!($($arg)+))
    });
}

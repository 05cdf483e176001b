// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Trace output on UART0.
//!
//! ```rust,ignore
//! unsafe { arty_exx::trace::initialize(arty_exx::device::DEVICE.core_frequency_hz) };
//! runtime::trace!("hello from {}", arty_exx::device::DEVICE.name);
//! ```

use core::ptr::addr_of_mut;

use runtime::debug::IoWrite;
use runtime::ErrorCode;
use sifive::uart::Uart;

use crate::config::CONFIG;
use crate::uart::UART0_BASE;

struct Writer {
    core_frequency: u32,
}

static mut WRITER: Writer = Writer { core_frequency: 0 };

impl Writer {
    fn uart(&self) -> Uart {
        Uart::new(UART0_BASE, self.core_frequency)
    }
}

impl IoWrite for Writer {
    fn write(&mut self, buf: &[u8]) -> usize {
        self.uart().write_partial(buf).0
    }
}

/// Bring up UART0 at the trace baud rate and make it the global trace output.
///
/// Returns `false`, leaving UART0 untouched, when the build disables the
/// UART0 trace output.
///
/// # Safety
///
/// Call once during board setup, before anything traces and before
/// interrupts are enabled.
pub unsafe fn initialize(core_frequency_hz: u32) -> bool {
    if !CONFIG.trace_uart0 {
        return false;
    }

    // Safety: single thread of control during setup; nothing else holds a
    // reference to `WRITER` yet.
    let writer = unsafe { &mut *addr_of_mut!(WRITER) };
    writer.core_frequency = core_frequency_hz;
    writer.uart().initialize();

    unsafe { runtime::debug::set_trace_writer(writer) };
    true
}

/// Wait until UART0 has pushed out every queued trace byte.
pub fn flush() -> Result<(), ErrorCode> {
    if !CONFIG.trace_uart0 {
        return Ok(());
    }
    // Draining does not touch the divisor, so the clock is irrelevant here.
    Uart::new(UART0_BASE, 0).flush()
}

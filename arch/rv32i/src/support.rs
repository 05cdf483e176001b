// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Core low-level operations.
//!
//! On anything other than a bare-metal RISC-V target these fall back to
//! portable equivalents so that code calling them can be unit tested on the
//! host.

#[cfg(all(target_arch = "riscv32", target_os = "none"))]
#[inline(always)]
/// NOP instruction
pub fn nop() {
    use core::arch::asm;
    unsafe {
        asm!("nop", options(nomem, nostack, preserves_flags));
    }
}

#[cfg(not(all(target_arch = "riscv32", target_os = "none")))]
#[inline(always)]
/// NOP instruction
pub fn nop() {
    core::hint::spin_loop();
}

#[cfg(all(target_arch = "riscv32", target_os = "none"))]
#[inline(always)]
/// EBREAK instruction
///
/// Traps into an attached debugger. Without a debugger the trap goes to the
/// machine-mode exception handler.
pub fn breakpoint() {
    use core::arch::asm;
    unsafe {
        asm!("ebreak", options(nomem, nostack));
    }
}

#[cfg(not(all(target_arch = "riscv32", target_os = "none")))]
#[inline(always)]
/// EBREAK instruction; does nothing off target.
pub fn breakpoint() {}

/// Spin for `iterations` NOPs.
///
/// The loop counter goes through `black_box`, so the compiler keeps every
/// iteration and the delay scales with the core clock.
#[inline(never)]
pub fn spin_delay(iterations: u32) {
    let mut i = 0;
    while core::hint::black_box(i) < iterations {
        nop();
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{breakpoint, spin_delay};

    #[test]
    fn host_fallbacks_return() {
        breakpoint();
        spin_delay(0);
        spin_delay(10_000);
    }
}

// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Polled transmit driver for the SiFive UART.
//!
//! This is the output path of the diagnostic trace facility: bytes are pushed
//! one at a time into the transmit FIFO, spinning on the FIFO-full flag, and
//! every `\n` is preceded by a `\r`. Nothing is interrupt driven, so the
//! driver works before (and without) any interrupt setup.
//!
//! Every wait on the hardware is bounded by a poll budget. When the budget is
//! exhausted the operation gives up with `ErrorCode::TIMEOUT` instead of
//! hanging the single thread of control on a stuck status flag.
//!
//! ```rust,ignore
//! let uart = sifive::uart::Uart::new(arty_exx::uart::UART0_BASE, 65_000_000);
//! uart.initialize();
//! uart.write(b"hello\n")?;
//! ```

use core::cell::Cell;
use core::ops::Deref;

use runtime::debug::IoWrite;
use runtime::utilities::registers::interfaces::{ReadWriteable, Readable, Writeable};
use runtime::utilities::registers::{register_bitfields, register_structs, ReadOnly, ReadWrite};
use runtime::utilities::StaticRef;
use runtime::ErrorCode;

/// Baud rate of the trace output.
pub const TRACE_BAUD_RATE: u32 = 115_200;

/// Iterations to spin after enabling the transmitter. Switching the TX pin to
/// its I/O function can glitch the line; this lets the receiver on the other
/// end time out and resynchronize to the real start of the stream.
pub const RESYNC_DELAY_ITERATIONS: u32 = 10_000;

/// Default number of status polls a single wait may spend.
///
/// At 115200 baud one character takes about 87 us, so even at several
/// hundred MHz this leaves a wide margin over a full FIFO drain.
pub const DEFAULT_POLL_BUDGET: u32 = 1_000_000;

register_structs! {
    pub UartRegisters {
        /// Transmit Data Register
        (0x00 => txdata: ReadWrite<u32, txdata::Register>),
        // rxdata
        (0x04 => _reserved0),
        /// Transmit Control Register
        (0x08 => txctrl: ReadWrite<u32, txctrl::Register>),
        // rxctrl, ie
        (0x0c => _reserved1),
        /// Interrupt Pending Register
        (0x14 => ip: ReadOnly<u32, interrupt::Register>),
        /// Baud Rate Divisor Register
        (0x18 => div: ReadWrite<u32, div::Register>),
        (0x1c => @END),
    }
}

register_bitfields![u32,
    txdata [
        full OFFSET(31) NUMBITS(1) [],
        data OFFSET(0) NUMBITS(8) []
    ],
    txctrl [
        txcnt OFFSET(16) NUMBITS(3) [],
        nstop OFFSET(1) NUMBITS(1) [
            OneStopBit = 0,
            TwoStopBits = 1
        ],
        txen OFFSET(0) NUMBITS(1) []
    ],
    interrupt [
        rxwm OFFSET(1) NUMBITS(1) [],
        txwm OFFSET(0) NUMBITS(1) []
    ],
    div [
        div OFFSET(0) NUMBITS(16) []
    ]
];

/// Register-level operations used by the polled transmit path.
///
/// Implemented for the memory mapped [`UartRegisters`]. Keeping the driver
/// logic behind this trait lets it run against a model of the hardware.
pub trait TxPort {
    /// Whether the transmit FIFO cannot accept another byte.
    fn tx_full(&self) -> bool;

    /// Push one byte into the transmit FIFO.
    fn tx_push(&self, byte: u8);

    fn divisor(&self) -> u32;

    fn set_divisor(&self, divisor: u32);

    /// Set the transmit enable bit, leaving the rest of `txctrl` untouched.
    fn enable_tx(&self);

    fn tx_enabled(&self) -> bool;

    /// Current transmit watermark level (`txctrl.txcnt`).
    fn tx_watermark(&self) -> u32;

    fn set_tx_watermark(&self, level: u32);

    /// Whether the transmit FIFO holds fewer entries than the watermark level.
    fn tx_watermark_pending(&self) -> bool;
}

impl TxPort for UartRegisters {
    fn tx_full(&self) -> bool {
        self.txdata.is_set(txdata::full)
    }

    fn tx_push(&self, byte: u8) {
        self.txdata.write(txdata::data.val(byte as u32));
    }

    fn divisor(&self) -> u32 {
        self.div.read(div::div)
    }

    fn set_divisor(&self, divisor: u32) {
        self.div.write(div::div.val(divisor));
    }

    fn enable_tx(&self) {
        self.txctrl.modify(txctrl::txen::SET);
    }

    fn tx_enabled(&self) -> bool {
        self.txctrl.is_set(txctrl::txen)
    }

    fn tx_watermark(&self) -> u32 {
        self.txctrl.read(txctrl::txcnt)
    }

    fn set_tx_watermark(&self, level: u32) {
        self.txctrl.modify(txctrl::txcnt.val(level));
    }

    fn tx_watermark_pending(&self) -> bool {
        self.ip.is_set(interrupt::txwm)
    }
}

/// Divisor for `baud_rate` given the core clock.
///
/// The Arty designs clock the peripheral bus at half the core clock, and the
/// UART divides the bus clock by `div + 1`.
pub const fn baud_divisor(core_frequency: u32, baud_rate: u32) -> u32 {
    (core_frequency / 2 / baud_rate).saturating_sub(1)
}

pub struct Uart<R = StaticRef<UartRegisters>> {
    registers: R,
    core_frequency: u32,
    poll_budget: Cell<u32>,
}

impl Uart {
    pub const fn new(base: StaticRef<UartRegisters>, core_frequency: u32) -> Uart {
        Uart::with_port(base, core_frequency)
    }
}

impl<R> Uart<R> {
    /// Build a driver over any handle that dereferences to a [`TxPort`].
    pub const fn with_port(registers: R, core_frequency: u32) -> Uart<R> {
        Uart {
            registers,
            core_frequency,
            poll_budget: Cell::new(DEFAULT_POLL_BUDGET),
        }
    }

    /// Limit every subsequent hardware wait to `polls` extra status reads.
    pub fn set_poll_budget(&self, polls: u32) {
        self.poll_budget.set(polls);
    }
}

impl<R: Deref> Uart<R>
where
    R::Target: TxPort,
{
    /// Program the baud rate divisor for [`TRACE_BAUD_RATE`], enable the
    /// transmitter, and wait for the line to settle.
    pub fn initialize(&self) {
        let regs = &*self.registers;

        regs.set_divisor(baud_divisor(self.core_frequency, TRACE_BAUD_RATE));
        regs.enable_tx();

        rv32i::support::spin_delay(RESYNC_DELAY_ITERATIONS);
    }

    fn wait_tx_ready(&self) -> Result<(), ErrorCode> {
        let regs = &*self.registers;
        let mut polls = self.poll_budget.get();

        while regs.tx_full() {
            if polls == 0 {
                return Err(ErrorCode::TIMEOUT);
            }
            polls -= 1;
        }
        Ok(())
    }

    fn put(&self, byte: u8) -> Result<(), ErrorCode> {
        self.wait_tx_ready()?;
        self.registers.tx_push(byte);
        Ok(())
    }

    /// Transmit `buf`, inserting `\r` before every `\n`.
    ///
    /// Returns `buf.len()` once every byte is in the FIFO, or
    /// `ErrorCode::TIMEOUT` if the FIFO stays full for longer than the poll
    /// budget.
    pub fn write(&self, buf: &[u8]) -> Result<usize, ErrorCode> {
        let (queued, result) = self.write_partial(buf);
        result.map(|()| queued)
    }

    /// Like [`Uart::write`], but also reports how many bytes of `buf` made
    /// it into the FIFO before a timeout.
    ///
    /// A `\n` counts only once both it and its `\r` are queued.
    pub fn write_partial(&self, buf: &[u8]) -> (usize, Result<(), ErrorCode>) {
        for (queued, &byte) in buf.iter().enumerate() {
            let result = if byte == b'\n' {
                self.put(b'\r').and_then(|()| self.put(byte))
            } else {
                self.put(byte)
            };
            if let Err(error) = result {
                return (queued, Err(error));
            }
        }
        (buf.len(), Ok(()))
    }

    /// Entry point for callers holding a raw buffer.
    ///
    /// A null `buf` or zero `len` is accepted and transmits nothing.
    ///
    /// # Safety
    ///
    /// If `buf` is non-null it must be valid for reads of `len` bytes.
    pub unsafe fn write_raw(&self, buf: *const u8, len: usize) -> Result<usize, ErrorCode> {
        if buf.is_null() || len == 0 {
            return Ok(0);
        }
        self.write(unsafe { core::slice::from_raw_parts(buf, len) })
    }

    /// Block until the transmit FIFO is empty.
    ///
    /// Uses the transmit watermark: with `txcnt = 1` the watermark is pending
    /// exactly when the FIFO holds no entries. The caller's `txcnt` is
    /// restored afterwards. The byte in the shift register may still be on
    /// the wire when this returns.
    pub fn flush(&self) -> Result<(), ErrorCode> {
        let regs = &*self.registers;
        let previous = regs.tx_watermark();
        regs.set_tx_watermark(1);

        let mut polls = self.poll_budget.get();
        let result = loop {
            if regs.tx_watermark_pending() {
                break Ok(());
            }
            if polls == 0 {
                break Err(ErrorCode::TIMEOUT);
            }
            polls -= 1;
        };

        regs.set_tx_watermark(previous);
        result
    }
}

impl<R: Deref> IoWrite for Uart<R>
where
    R::Target: TxPort,
{
    fn write(&mut self, buf: &[u8]) -> usize {
        self.write_partial(buf).0
    }
}

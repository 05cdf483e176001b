// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! OS interface for newlib on a system without an operating system.
//!
//! newlib reaches the outside world through a fixed set of functions
//! (`_open`, `_write`, `_isatty`, ...). This crate provides all of them with
//! the behavior of a bare-metal image: apart from standard output and
//! standard error answering as a character device, every call fails with
//! `ENOSYS` and leaves a line on the trace output.
//!
//! The operations are the methods of [`Syscalls`]. A board that can do more,
//! say write standard output to a UART, implements `Syscalls` on its own type,
//! overrides the methods it supports, and registers it with
//! `ffi::install`. The C symbols themselves are only exported with the
//! `newlib` feature.

#![no_std]
#![crate_name = "capsules_newlib"]
#![crate_type = "rlib"]

mod config;

pub mod abi;
pub mod diagnostics;
#[cfg(all(feature = "newlib", not(feature = "semihosting_syscalls")))]
pub mod ffi;
pub mod syscall;
pub mod syscalls;
pub mod table;
pub mod types;

pub use crate::diagnostics::Diagnostics;
pub use crate::syscalls::{DefaultSyscalls, Syscalls};

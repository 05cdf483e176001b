// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! The OS interface newlib expects, with defaults for a system that has no
//! operating system.
//!
//! Every operation has a default. Apart from a few exceptions, the default
//! does no argument checking, reports the call through
//! [`Diagnostics::unsupported`], and fails with `ErrorCode::NOSUPPORT`
//! (`ENOSYS` at the C boundary). The exceptions:
//!
//! - `isatty` answers `true` for standard output and standard error and
//!   `false` for everything else. It never fails.
//! - `fstat` reports a character device for a terminal descriptor.
//! - `lseek` on a terminal descriptor succeeds with offset 0.
//! - `getpid` is always 1.
//!
//! Providing a real operation means implementing [`Syscalls`] on your own
//! type and overriding only that method; everything else keeps its default.
//!
//! ```rust,ignore
//! struct Console<'a> {
//!     diagnostics: Diagnostics<'a>,
//!     uart: &'a sifive::uart::Uart,
//! }
//!
//! impl Syscalls for Console<'_> {
//!     fn diagnostics(&self) -> &Diagnostics<'_> {
//!         &self.diagnostics
//!     }
//!
//!     fn write(&self, fd: Fd, buf: &[u8]) -> Result<usize, ErrorCode> {
//!         if fd.is_terminal() {
//!             self.uart.write(buf)
//!         } else {
//!             self.diagnostics.unsupported(SyscallId::Write)
//!         }
//!     }
//! }
//! ```

use core::convert::Infallible;
use core::ffi::CStr;

use runtime::ErrorCode;

use crate::diagnostics::Diagnostics;
use crate::syscall::SyscallId;
use crate::types::{
    CStrList, Clock, Fd, FileMode, Gid, Mode, Offset, Pid, Stat, Timeval, Tms, Uid, Whence,
};

/// Process id reported by `getpid`.
pub const PID: Pid = 1;

pub trait Syscalls {
    /// Where the defaults report unsupported calls.
    fn diagnostics(&self) -> &Diagnostics<'_>;

    fn chown(&self, _path: &CStr, _owner: Uid, _group: Gid) -> Result<(), ErrorCode> {
        self.diagnostics().unsupported(SyscallId::Chown)
    }

    fn close(&self, _fd: Fd) -> Result<(), ErrorCode> {
        self.diagnostics().unsupported(SyscallId::Close)
    }

    /// Only ever returns on failure.
    fn execve(
        &self,
        _name: &CStr,
        _argv: CStrList<'_>,
        _envp: CStrList<'_>,
    ) -> Result<Infallible, ErrorCode> {
        self.diagnostics().unsupported(SyscallId::Execve)
    }

    fn fork(&self) -> Result<Pid, ErrorCode> {
        self.diagnostics().unsupported(SyscallId::Fork)
    }

    fn fstat(&self, fd: Fd, st: &mut Stat) -> Result<(), ErrorCode> {
        if self.isatty(fd) {
            st.mode = FileMode::CHARACTER_DEVICE;
            return Ok(());
        }
        self.diagnostics().unsupported(SyscallId::Fstat)
    }

    fn getpid(&self) -> Pid {
        PID
    }

    fn gettimeofday(&self, _tv: &mut Timeval) -> Result<(), ErrorCode> {
        self.diagnostics().unsupported(SyscallId::Gettimeofday)
    }

    fn isatty(&self, fd: Fd) -> bool {
        if fd.is_terminal() {
            return true;
        }
        let diagnostics = self.diagnostics();
        diagnostics.breakpoint(SyscallId::Isatty);
        diagnostics.trace(format_args!("{}() false", SyscallId::Isatty.symbol()));
        false
    }

    fn kill(&self, _pid: Pid, _sig: i32) -> Result<(), ErrorCode> {
        self.diagnostics().unsupported(SyscallId::Kill)
    }

    fn link(&self, _existing: &CStr, _new: &CStr) -> Result<(), ErrorCode> {
        self.diagnostics().unsupported(SyscallId::Link)
    }

    /// Seeking a character device is a no-op that lands on offset 0.
    fn lseek(&self, fd: Fd, _offset: Offset, _whence: Whence) -> Result<Offset, ErrorCode> {
        if self.isatty(fd) {
            return Ok(0);
        }
        self.diagnostics().unsupported(SyscallId::Lseek)
    }

    fn open(&self, _path: &CStr, _flags: i32, _mode: Mode) -> Result<Fd, ErrorCode> {
        self.diagnostics().unsupported(SyscallId::Open)
    }

    fn openat(&self, _dirfd: Fd, _path: &CStr, _flags: i32, _mode: Mode) -> Result<Fd, ErrorCode> {
        self.diagnostics().unsupported(SyscallId::Openat)
    }

    fn read(&self, _fd: Fd, _buf: &mut [u8]) -> Result<usize, ErrorCode> {
        self.diagnostics().unsupported(SyscallId::Read)
    }

    fn readlink(&self, _path: &CStr, _buf: &mut [u8]) -> Result<usize, ErrorCode> {
        self.diagnostics().unsupported(SyscallId::Readlink)
    }

    fn stat(&self, _path: &CStr, _st: &mut Stat) -> Result<(), ErrorCode> {
        self.diagnostics().unsupported(SyscallId::Stat)
    }

    fn symlink(&self, _existing: &CStr, _new: &CStr) -> Result<(), ErrorCode> {
        self.diagnostics().unsupported(SyscallId::Symlink)
    }

    fn times(&self, _buf: &mut Tms) -> Result<Clock, ErrorCode> {
        self.diagnostics().unsupported(SyscallId::Times)
    }

    fn unlink(&self, _name: &CStr) -> Result<(), ErrorCode> {
        self.diagnostics().unsupported(SyscallId::Unlink)
    }

    fn wait(&self, _status: &mut i32) -> Result<Pid, ErrorCode> {
        self.diagnostics().unsupported(SyscallId::Wait)
    }

    fn write(&self, _fd: Fd, _buf: &[u8]) -> Result<usize, ErrorCode> {
        self.diagnostics().unsupported(SyscallId::Write)
    }
}

/// The stock OS interface: nothing but the defaults.
#[derive(Debug)]
pub struct DefaultSyscalls<'a> {
    diagnostics: Diagnostics<'a>,
}

impl<'a> DefaultSyscalls<'a> {
    pub const fn new(diagnostics: Diagnostics<'a>) -> DefaultSyscalls<'a> {
        DefaultSyscalls { diagnostics }
    }
}

impl Syscalls for DefaultSyscalls<'_> {
    fn diagnostics(&self) -> &Diagnostics<'_> {
        &self.diagnostics
    }
}

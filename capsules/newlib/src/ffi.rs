// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! The `_open`, `_write`, ... symbols newlib links against.
//!
//! Every export forwards to the table registered with [`install`], or to the
//! defaults tracing to the global trace output when nothing was registered
//! (see [`crate::table::SYSCALLS`]). Errors are stored in newlib's reentrant
//! `errno`.
//!
//! ```rust,ignore
//! static CONSOLE: Console = Console::new(/* ... */);
//!
//! // During board setup, before anything calls into the C library:
//! unsafe { capsules_newlib::ffi::install(&CONSOLE) };
//! ```

use core::ffi::{c_char, c_int, c_long, c_void};
use core::ptr::{addr_of_mut, null_mut};

use crate::abi::{self, Errno};
use crate::syscalls::Syscalls;
use crate::table::SYSCALLS;
use crate::types::{Clock, Gid, Mode, Pid, Timeval, Tms, Uid};

extern "C" {
    fn __errno() -> *mut c_int;
}

struct NewlibErrno;

impl Errno for NewlibErrno {
    fn set_errno(&self, value: c_int) {
        unsafe { *__errno() = value };
    }
}

/// Leading fields of newlib's `struct stat`. Only `st_mode` is ever written;
/// the rest of the caller's structure is left alone.
#[repr(C)]
pub struct NewlibStat {
    pub st_dev: i16,
    pub st_ino: u16,
    pub st_mode: Mode,
}

unsafe fn st_mode(st: *mut NewlibStat) -> *mut Mode {
    if st.is_null() {
        null_mut()
    } else {
        unsafe { addr_of_mut!((*st).st_mode) }
    }
}

/// Route every export through `table` from now on.
///
/// # Safety
///
/// Must not race with a call into any export: call it during board setup,
/// before interrupts are enabled.
pub unsafe fn install(table: &'static dyn Syscalls) {
    unsafe { SYSCALLS.install(table) };
}

fn syscalls() -> &'static dyn Syscalls {
    SYSCALLS.get()
}

#[no_mangle]
pub unsafe extern "C" fn _chown(path: *const c_char, owner: Uid, group: Gid) -> c_int {
    unsafe { abi::chown(syscalls(), &NewlibErrno, path, owner, group) }
}

#[no_mangle]
pub extern "C" fn _close(fildes: c_int) -> c_int {
    abi::close(syscalls(), &NewlibErrno, fildes)
}

#[no_mangle]
pub unsafe extern "C" fn _execve(
    name: *const c_char,
    argv: *const *const c_char,
    envp: *const *const c_char,
) -> c_int {
    unsafe { abi::execve(syscalls(), &NewlibErrno, name, argv, envp) }
}

#[no_mangle]
pub extern "C" fn _fork() -> Pid {
    abi::fork(syscalls(), &NewlibErrno)
}

#[no_mangle]
pub unsafe extern "C" fn _fstat(fildes: c_int, st: *mut NewlibStat) -> c_int {
    unsafe { abi::fstat(syscalls(), &NewlibErrno, fildes, st_mode(st)) }
}

#[no_mangle]
pub extern "C" fn _getpid() -> Pid {
    abi::getpid(syscalls())
}

#[no_mangle]
pub unsafe extern "C" fn _gettimeofday(tv: *mut Timeval, _tz: *mut c_void) -> c_int {
    unsafe { abi::gettimeofday(syscalls(), &NewlibErrno, tv) }
}

#[no_mangle]
pub extern "C" fn _isatty(fildes: c_int) -> c_int {
    abi::isatty(syscalls(), fildes)
}

#[no_mangle]
pub extern "C" fn _kill(pid: Pid, sig: c_int) -> c_int {
    abi::kill(syscalls(), &NewlibErrno, pid, sig)
}

#[no_mangle]
pub unsafe extern "C" fn _link(existing: *const c_char, new: *const c_char) -> c_int {
    unsafe { abi::link(syscalls(), &NewlibErrno, existing, new) }
}

#[no_mangle]
pub extern "C" fn _lseek(fildes: c_int, ptr: c_int, dir: c_int) -> c_long {
    abi::lseek(syscalls(), &NewlibErrno, fildes, ptr, dir)
}

#[no_mangle]
pub unsafe extern "C" fn _open(file: *const c_char, flags: c_int, mode: Mode) -> c_int {
    unsafe { abi::open(syscalls(), &NewlibErrno, file, flags, mode) }
}

#[no_mangle]
pub unsafe extern "C" fn _openat(
    dirfd: c_int,
    file: *const c_char,
    flags: c_int,
    mode: Mode,
) -> c_int {
    unsafe { abi::openat(syscalls(), &NewlibErrno, dirfd, file, flags, mode) }
}

#[no_mangle]
pub unsafe extern "C" fn _read(fildes: c_int, ptr: *mut c_void, len: usize) -> isize {
    unsafe { abi::read(syscalls(), &NewlibErrno, fildes, ptr, len) }
}

#[no_mangle]
pub unsafe extern "C" fn _readlink(path: *const c_char, buf: *mut c_char, bufsize: usize) -> c_int {
    unsafe { abi::readlink(syscalls(), &NewlibErrno, path, buf, bufsize) }
}

#[no_mangle]
pub unsafe extern "C" fn _stat(file: *const c_char, st: *mut NewlibStat) -> c_int {
    unsafe { abi::stat(syscalls(), &NewlibErrno, file, st_mode(st)) }
}

#[no_mangle]
pub unsafe extern "C" fn _symlink(existing: *const c_char, new: *const c_char) -> c_int {
    unsafe { abi::symlink(syscalls(), &NewlibErrno, existing, new) }
}

#[no_mangle]
pub unsafe extern "C" fn _times(buf: *mut Tms) -> Clock {
    unsafe { abi::times(syscalls(), &NewlibErrno, buf) }
}

#[no_mangle]
pub unsafe extern "C" fn _unlink(name: *const c_char) -> c_int {
    unsafe { abi::unlink(syscalls(), &NewlibErrno, name) }
}

#[no_mangle]
pub unsafe extern "C" fn _wait(status: *mut c_int) -> Pid {
    unsafe { abi::wait(syscalls(), &NewlibErrno, status) }
}

#[no_mangle]
pub unsafe extern "C" fn _write(fildes: c_int, ptr: *const c_void, len: usize) -> isize {
    unsafe { abi::write(syscalls(), &NewlibErrno, fildes, ptr, len) }
}

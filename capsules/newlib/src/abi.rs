// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! C calling convention for the OS interface.
//!
//! Each function here takes the raw arguments newlib passes, hands them to a
//! [`Syscalls`] implementation, and folds the `Result` back into the C
//! convention: the documented failure value (`-1`, or `(clock_t)-1` for
//! `times`) with the error stored through an [`Errno`]. Successful calls leave
//! `errno` alone.
//!
//! Null pointers are tolerated: a null path reads as the empty string, a null
//! buffer as an empty one, and results meant for a null out-pointer are
//! dropped.
//!
//! The exported `#[no_mangle]` symbols live in [`crate::ffi`]; keeping the
//! conversions here lets them be exercised against any `Errno` and any
//! `Syscalls`.

use core::ffi::{c_char, c_int, c_long, c_void, CStr};

use runtime::ErrorCode;

use crate::syscalls::Syscalls;
use crate::types::{CStrList, Clock, Fd, Gid, Mode, Pid, Stat, Timeval, Tms, Uid, Whence};

/// Where a failed call stores its error number.
pub trait Errno {
    fn set_errno(&self, value: c_int);
}

/// Returned by `times` on failure.
pub const CLOCK_FAILED: Clock = Clock::MAX;

fn check<T>(errno: &dyn Errno, result: Result<T, ErrorCode>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errno.set_errno(error.errno());
            None
        }
    }
}

fn status(errno: &dyn Errno, result: Result<(), ErrorCode>) -> c_int {
    check(errno, result).map_or(-1, |()| 0)
}

fn count<T: TryFrom<usize>>(result: Result<usize, ErrorCode>) -> Result<T, ErrorCode> {
    result.and_then(|n| T::try_from(n).map_err(|_| ErrorCode::SIZE))
}

unsafe fn path<'a>(ptr: *const c_char) -> &'a CStr {
    if ptr.is_null() {
        c""
    } else {
        unsafe { CStr::from_ptr(ptr) }
    }
}

unsafe fn bytes<'a>(ptr: *const c_void, len: usize) -> &'a [u8] {
    if ptr.is_null() || len == 0 {
        &[]
    } else {
        unsafe { core::slice::from_raw_parts(ptr.cast(), len) }
    }
}

unsafe fn bytes_mut<'a>(ptr: *mut c_void, len: usize) -> &'a mut [u8] {
    if ptr.is_null() || len == 0 {
        &mut []
    } else {
        unsafe { core::slice::from_raw_parts_mut(ptr.cast(), len) }
    }
}

unsafe fn store<T>(ptr: *mut T, value: T) {
    if !ptr.is_null() {
        unsafe { ptr.write(value) };
    }
}

// Safety for every function below: each non-null pointer argument must be
// valid for the access newlib's prototype of the same call implies. Strings
// are NUL terminated, `buf`/`len` pairs describe one allocation, and string
// arrays are NULL terminated.

/// # Safety
///
/// See the module level safety note.
pub unsafe fn chown(
    sys: &dyn Syscalls,
    errno: &dyn Errno,
    file: *const c_char,
    owner: Uid,
    group: Gid,
) -> c_int {
    status(errno, sys.chown(unsafe { path(file) }, owner, group))
}

pub fn close(sys: &dyn Syscalls, errno: &dyn Errno, fd: c_int) -> c_int {
    status(errno, sys.close(Fd(fd)))
}

/// # Safety
///
/// See the module level safety note.
pub unsafe fn execve(
    sys: &dyn Syscalls,
    errno: &dyn Errno,
    name: *const c_char,
    argv: *const *const c_char,
    envp: *const *const c_char,
) -> c_int {
    let (argv, envp) = unsafe { (CStrList::from_raw(argv), CStrList::from_raw(envp)) };
    match sys.execve(unsafe { path(name) }, argv, envp) {
        Ok(never) => match never {},
        Err(error) => {
            errno.set_errno(error.errno());
            -1
        }
    }
}

pub fn fork(sys: &dyn Syscalls, errno: &dyn Errno) -> Pid {
    check(errno, sys.fork()).unwrap_or(-1)
}

/// Only `st_mode` is written, and only on success. `st_mode` points at that
/// field of the caller's `struct stat`.
///
/// # Safety
///
/// See the module level safety note.
pub unsafe fn fstat(sys: &dyn Syscalls, errno: &dyn Errno, fd: c_int, st_mode: *mut Mode) -> c_int {
    let mut st = Stat::default();
    match check(errno, sys.fstat(Fd(fd), &mut st)) {
        Some(()) => {
            unsafe { store(st_mode, st.mode.0) };
            0
        }
        None => -1,
    }
}

pub fn getpid(sys: &dyn Syscalls) -> Pid {
    sys.getpid()
}

/// The time zone argument is obsolete and ignored.
///
/// # Safety
///
/// See the module level safety note.
pub unsafe fn gettimeofday(sys: &dyn Syscalls, errno: &dyn Errno, tv: *mut Timeval) -> c_int {
    let mut now = Timeval::default();
    match check(errno, sys.gettimeofday(&mut now)) {
        Some(()) => {
            unsafe { store(tv, now) };
            0
        }
        None => -1,
    }
}

pub fn isatty(sys: &dyn Syscalls, fd: c_int) -> c_int {
    c_int::from(sys.isatty(Fd(fd)))
}

pub fn kill(sys: &dyn Syscalls, errno: &dyn Errno, pid: Pid, sig: c_int) -> c_int {
    status(errno, sys.kill(pid, sig))
}

/// # Safety
///
/// See the module level safety note.
pub unsafe fn link(
    sys: &dyn Syscalls,
    errno: &dyn Errno,
    existing: *const c_char,
    new: *const c_char,
) -> c_int {
    status(errno, sys.link(unsafe { path(existing) }, unsafe { path(new) }))
}

/// An offset that does not fit `off_t` fails with `ErrorCode::SIZE`.
pub fn lseek(
    sys: &dyn Syscalls,
    errno: &dyn Errno,
    fd: c_int,
    offset: c_int,
    whence: c_int,
) -> c_long {
    let result = sys
        .lseek(Fd(fd), offset.into(), Whence::from(whence))
        .and_then(|off| c_long::try_from(off).map_err(|_| ErrorCode::SIZE));
    check(errno, result).unwrap_or(-1)
}

/// # Safety
///
/// See the module level safety note.
pub unsafe fn open(
    sys: &dyn Syscalls,
    errno: &dyn Errno,
    file: *const c_char,
    flags: c_int,
    mode: Mode,
) -> c_int {
    check(errno, sys.open(unsafe { path(file) }, flags, mode)).map_or(-1, |fd| fd.0)
}

/// # Safety
///
/// See the module level safety note.
pub unsafe fn openat(
    sys: &dyn Syscalls,
    errno: &dyn Errno,
    dirfd: c_int,
    file: *const c_char,
    flags: c_int,
    mode: Mode,
) -> c_int {
    check(
        errno,
        sys.openat(Fd(dirfd), unsafe { path(file) }, flags, mode),
    )
    .map_or(-1, |fd| fd.0)
}

/// # Safety
///
/// See the module level safety note.
pub unsafe fn read(
    sys: &dyn Syscalls,
    errno: &dyn Errno,
    fd: c_int,
    buf: *mut c_void,
    len: usize,
) -> isize {
    let result = sys.read(Fd(fd), unsafe { bytes_mut(buf, len) });
    check(errno, count(result)).unwrap_or(-1)
}

/// # Safety
///
/// See the module level safety note.
pub unsafe fn readlink(
    sys: &dyn Syscalls,
    errno: &dyn Errno,
    file: *const c_char,
    buf: *mut c_char,
    bufsize: usize,
) -> c_int {
    let result = sys.readlink(unsafe { path(file) }, unsafe {
        bytes_mut(buf.cast(), bufsize)
    });
    check(errno, count(result)).unwrap_or(-1)
}

/// Like [`fstat`], only `st_mode` is written.
///
/// # Safety
///
/// See the module level safety note.
pub unsafe fn stat(
    sys: &dyn Syscalls,
    errno: &dyn Errno,
    file: *const c_char,
    st_mode: *mut Mode,
) -> c_int {
    let mut st = Stat::default();
    match check(errno, sys.stat(unsafe { path(file) }, &mut st)) {
        Some(()) => {
            unsafe { store(st_mode, st.mode.0) };
            0
        }
        None => -1,
    }
}

/// # Safety
///
/// See the module level safety note.
pub unsafe fn symlink(
    sys: &dyn Syscalls,
    errno: &dyn Errno,
    existing: *const c_char,
    new: *const c_char,
) -> c_int {
    status(errno, sys.symlink(unsafe { path(existing) }, unsafe { path(new) }))
}

/// # Safety
///
/// See the module level safety note.
pub unsafe fn times(sys: &dyn Syscalls, errno: &dyn Errno, buf: *mut Tms) -> Clock {
    let mut tms = Tms::default();
    match check(errno, sys.times(&mut tms)) {
        Some(elapsed) => {
            unsafe { store(buf, tms) };
            elapsed
        }
        None => CLOCK_FAILED,
    }
}

/// # Safety
///
/// See the module level safety note.
pub unsafe fn unlink(sys: &dyn Syscalls, errno: &dyn Errno, name: *const c_char) -> c_int {
    status(errno, sys.unlink(unsafe { path(name) }))
}

/// # Safety
///
/// See the module level safety note.
pub unsafe fn wait(sys: &dyn Syscalls, errno: &dyn Errno, status: *mut c_int) -> Pid {
    let mut exit_status = 0;
    match check(errno, sys.wait(&mut exit_status)) {
        Some(pid) => {
            unsafe { store(status, exit_status) };
            pid
        }
        None => -1,
    }
}

/// # Safety
///
/// See the module level safety note.
pub unsafe fn write(
    sys: &dyn Syscalls,
    errno: &dyn Errno,
    fd: c_int,
    buf: *const c_void,
    len: usize,
) -> isize {
    let result = sys.write(Fd(fd), unsafe { bytes(buf, len) });
    check(errno, count(result)).unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::syscalls::DefaultSyscalls;
    use crate::types::FileMode;
    use core::cell::{Cell, RefCell};
    use core::ptr::{null, null_mut};
    use runtime::debug::IoWrite;
    use runtime::errno::{EFBIG, ENOSYS};
    use std::string::String;
    use std::vec::Vec;

    #[derive(Default)]
    struct Lines(Vec<u8>);

    impl IoWrite for Lines {
        fn write(&mut self, buf: &[u8]) -> usize {
            self.0.extend_from_slice(buf);
            buf.len()
        }
    }

    /// `errno` as a plain cell; `None` until something stores to it.
    #[derive(Default)]
    struct TestErrno(Cell<Option<c_int>>);

    impl Errno for TestErrno {
        fn set_errno(&self, value: c_int) {
            self.0.set(Some(value));
        }
    }

    fn text(sink: &RefCell<Lines>) -> String {
        String::from_utf8(sink.borrow().0.clone()).unwrap()
    }

    #[test]
    fn unsupported_calls_return_minus_one_with_enosys() {
        let sink = RefCell::new(Lines::default());
        let sys = DefaultSyscalls::new(Diagnostics::new(&sink));
        let file = c"/tmp/x".as_ptr();
        let mut buf = [0u8; 4];
        let mut mode: Mode = 0o777;
        let mut status_out: c_int = 5;

        let returned: [(&str, i64); 18] = unsafe {
            [
                ("chown", chown(&sys, &TestErrno::default(), file, 0, 0).into()),
                ("close", close(&sys, &TestErrno::default(), 3).into()),
                ("execve", execve(&sys, &TestErrno::default(), file, null(), null()).into()),
                ("fork", fork(&sys, &TestErrno::default()).into()),
                ("fstat", fstat(&sys, &TestErrno::default(), 0, &mut mode).into()),
                ("gettimeofday", gettimeofday(&sys, &TestErrno::default(), null_mut()).into()),
                ("kill", kill(&sys, &TestErrno::default(), 1, 9).into()),
                ("link", link(&sys, &TestErrno::default(), file, file).into()),
                ("lseek", lseek(&sys, &TestErrno::default(), 0, 10, 0).into()),
                ("open", open(&sys, &TestErrno::default(), file, 0, 0).into()),
                ("openat", openat(&sys, &TestErrno::default(), -100, file, 0, 0).into()),
                (
                    "read",
                    (read(&sys, &TestErrno::default(), 0, buf.as_mut_ptr().cast(), 4) as i64),
                ),
                (
                    "readlink",
                    readlink(&sys, &TestErrno::default(), file, buf.as_mut_ptr().cast(), 4).into(),
                ),
                ("stat", stat(&sys, &TestErrno::default(), file, &mut mode).into()),
                ("symlink", symlink(&sys, &TestErrno::default(), file, file).into()),
                ("unlink", unlink(&sys, &TestErrno::default(), file).into()),
                ("wait", wait(&sys, &TestErrno::default(), &mut status_out).into()),
                (
                    "write",
                    (write(&sys, &TestErrno::default(), 5, buf.as_ptr().cast(), 4) as i64),
                ),
            ]
        };
        for (name, value) in returned {
            assert_eq!(value, -1, "{}", name);
        }
        assert_eq!(mode, 0o777);
        assert_eq!(status_out, 5);
    }

    #[test]
    fn failure_stores_enosys() {
        let sink = RefCell::new(Lines::default());
        let sys = DefaultSyscalls::new(Diagnostics::new(&sink));

        let errno = TestErrno::default();
        assert_eq!(close(&sys, &errno, 1), -1);
        assert_eq!(errno.0.get(), Some(ENOSYS));

        let errno = TestErrno::default();
        assert_eq!(unsafe { open(&sys, &errno, c"a".as_ptr(), 0, 0) }, -1);
        assert_eq!(errno.0.get(), Some(88));

        assert_eq!(text(&sink), "_close() ENOSYS\n_open() ENOSYS\n");
    }

    #[test]
    fn times_fails_with_all_ones() {
        let sink = RefCell::new(Lines::default());
        let sys = DefaultSyscalls::new(Diagnostics::new(&sink));
        let errno = TestErrno::default();
        let mut tms = Tms {
            tms_utime: 7,
            ..Tms::default()
        };

        assert_eq!(unsafe { times(&sys, &errno, &mut tms) }, Clock::MAX);
        assert_eq!(errno.0.get(), Some(ENOSYS));
        assert_eq!(tms.tms_utime, 7);
        assert_eq!(text(&sink), "_times() ENOSYS\n");
    }

    #[test]
    fn terminal_paths_leave_errno_alone() {
        let sink = RefCell::new(Lines::default());
        let sys = DefaultSyscalls::new(Diagnostics::new(&sink));
        let errno = TestErrno::default();

        assert_eq!(isatty(&sys, 1), 1);
        assert_eq!(isatty(&sys, 2), 1);
        assert_eq!(getpid(&sys), 1);
        assert_eq!(lseek(&sys, &errno, 1, 1234, 2), 0);

        let mut mode: Mode = 0;
        assert_eq!(unsafe { fstat(&sys, &errno, 2, &mut mode) }, 0);
        assert_eq!(FileMode(mode), FileMode::CHARACTER_DEVICE);

        assert_eq!(errno.0.get(), None);
        assert_eq!(text(&sink), "");
    }

    #[test]
    fn isatty_false_does_not_touch_errno() {
        let sink = RefCell::new(Lines::default());
        let sys = DefaultSyscalls::new(Diagnostics::new(&sink));

        assert_eq!(isatty(&sys, 0), 0);
        assert_eq!(isatty(&sys, -3), 0);
        assert_eq!(text(&sink), "_isatty() false\n_isatty() false\n");
    }

    #[test]
    fn null_pointers_are_tolerated() {
        let sink = RefCell::new(Lines::default());
        let sys = DefaultSyscalls::new(Diagnostics::new(&sink));
        let errno = TestErrno::default();

        assert_eq!(unsafe { fstat(&sys, &errno, 1, null_mut()) }, 0);
        assert_eq!(unsafe { open(&sys, &errno, null(), 0, 0) }, -1);
        assert_eq!(unsafe { write(&sys, &errno, 1, null(), 10) }, -1);
        assert_eq!(unsafe { read(&sys, &errno, 0, null_mut(), 10) }, -1);
        assert_eq!(unsafe { wait(&sys, &errno, null_mut()) }, -1);
        assert_eq!(unsafe { times(&sys, &errno, null_mut()) }, CLOCK_FAILED);
    }

    /// A table with working `write`, `wait`, `lseek` and `times`.
    struct Working<'a> {
        diagnostics: Diagnostics<'a>,
        written: RefCell<Vec<u8>>,
    }

    impl Syscalls for Working<'_> {
        fn diagnostics(&self) -> &Diagnostics<'_> {
            &self.diagnostics
        }

        fn write(&self, _fd: Fd, buf: &[u8]) -> Result<usize, ErrorCode> {
            self.written.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn wait(&self, status: &mut i32) -> Result<Pid, ErrorCode> {
            *status = 3;
            Ok(42)
        }

        fn lseek(&self, _fd: Fd, offset: i64, _whence: Whence) -> Result<i64, ErrorCode> {
            Ok(offset * 0x1_0000_0000)
        }

        fn times(&self, buf: &mut Tms) -> Result<Clock, ErrorCode> {
            buf.tms_utime = 10;
            Ok(99)
        }
    }

    #[test]
    fn successful_results_come_back_unchanged() {
        let sink = RefCell::new(Lines::default());
        let sys = Working {
            diagnostics: Diagnostics::new(&sink),
            written: RefCell::new(Vec::new()),
        };
        let errno = TestErrno::default();

        let msg = b"hello";
        assert_eq!(unsafe { write(&sys, &errno, 1, msg.as_ptr().cast(), 5) }, 5);
        assert_eq!(&*sys.written.borrow(), b"hello");
        assert_eq!(unsafe { write(&sys, &errno, 1, msg.as_ptr().cast(), 0) }, 0);

        let mut st = 0;
        assert_eq!(unsafe { wait(&sys, &errno, &mut st) }, 42);
        assert_eq!(st, 3);

        let mut tms = Tms::default();
        assert_eq!(unsafe { times(&sys, &errno, &mut tms) }, 99);
        assert_eq!(tms.tms_utime, 10);

        assert_eq!(lseek(&sys, &errno, 4, 0, 0), 0);
        assert_eq!(errno.0.get(), None);
    }

    #[test]
    fn oversized_offset_fails_with_efbig() {
        let sink = RefCell::new(Lines::default());
        let sys = Working {
            diagnostics: Diagnostics::new(&sink),
            written: RefCell::new(Vec::new()),
        };
        let errno = TestErrno::default();

        // `long` is 32 bits on the target but may be 64 bits on the host.
        if core::mem::size_of::<c_long>() == 4 {
            assert_eq!(lseek(&sys, &errno, 4, 1, 0), -1);
            assert_eq!(errno.0.get(), Some(EFBIG));
        } else {
            assert_eq!(lseek(&sys, &errno, 4, 1, 0), 0x1_0000_0000);
            assert_eq!(errno.0.get(), None);
        }
    }
}

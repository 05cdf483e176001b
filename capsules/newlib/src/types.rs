// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Argument and result types of the OS interface.
//!
//! Integer widths follow newlib's defaults for 32-bit RISC-V.

use core::ffi::{c_char, c_long, c_ulong, CStr};
use core::marker::PhantomData;

pub type Pid = i32;
pub type Uid = u16;
pub type Gid = u16;
pub type Mode = u32;
pub type Offset = i64;
pub type Clock = c_ulong;

/// A file descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fd(pub i32);

impl Fd {
    pub const STDIN: Fd = Fd(0);
    pub const STDOUT: Fd = Fd(1);
    pub const STDERR: Fd = Fd(2);

    /// Whether this descriptor names the character device standard output
    /// and standard error are attached to. Standard input is not a terminal
    /// here: nothing can be read from the trace output.
    pub const fn is_terminal(self) -> bool {
        self.0 == Fd::STDOUT.0 || self.0 == Fd::STDERR.0
    }
}

/// File type and permission bits, as in `st_mode`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileMode(pub Mode);

impl FileMode {
    /// `S_IFMT`
    pub const TYPE_MASK: Mode = 0o170000;
    /// `S_IFCHR`
    pub const CHARACTER_DEVICE: FileMode = FileMode(0o020000);

    pub const fn file_type(self) -> Mode {
        self.0 & FileMode::TYPE_MASK
    }

    pub const fn is_character_device(self) -> bool {
        self.file_type() == FileMode::CHARACTER_DEVICE.0
    }
}

/// The part of `struct stat` the shim reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stat {
    pub mode: FileMode,
}

/// Origin of an `lseek`.
///
/// Unknown values are carried through rather than rejected, so an
/// implementation decides for itself how to treat them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Whence {
    Set,
    Current,
    End,
    Other(i32),
}

impl From<i32> for Whence {
    fn from(value: i32) -> Whence {
        match value {
            0 => Whence::Set,
            1 => Whence::Current,
            2 => Whence::End,
            other => Whence::Other(other),
        }
    }
}

/// `struct timeval`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timeval {
    pub tv_sec: i64,
    pub tv_usec: c_long,
}

/// `struct tms`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tms {
    pub tms_utime: Clock,
    pub tms_stime: Clock,
    pub tms_cutime: Clock,
    pub tms_cstime: Clock,
}

/// A NULL-terminated array of C strings, as passed for `argv` and `envp`.
#[derive(Clone, Copy, Debug)]
pub struct CStrList<'a> {
    ptr: *const *const c_char,
    _strings: PhantomData<&'a CStr>,
}

impl<'a> CStrList<'a> {
    pub const fn empty() -> CStrList<'a> {
        CStrList {
            ptr: core::ptr::null(),
            _strings: PhantomData,
        }
    }

    /// # Safety
    ///
    /// `ptr` is either null or points to an array of pointers ending with a
    /// null entry, and every entry before it is a valid C string. All of it
    /// stays alive and unmodified for `'a`.
    pub const unsafe fn from_raw(ptr: *const *const c_char) -> CStrList<'a> {
        CStrList {
            ptr,
            _strings: PhantomData,
        }
    }

    pub fn iter(&self) -> CStrListIter<'a> {
        CStrListIter {
            next: self.ptr,
            _strings: PhantomData,
        }
    }
}

pub struct CStrListIter<'a> {
    next: *const *const c_char,
    _strings: PhantomData<&'a CStr>,
}

impl<'a> Iterator for CStrListIter<'a> {
    type Item = &'a CStr;

    fn next(&mut self) -> Option<&'a CStr> {
        if self.next.is_null() {
            return None;
        }
        // Safety: guaranteed by the caller of `CStrList::from_raw`.
        let entry = unsafe { *self.next };
        if entry.is_null() {
            self.next = core::ptr::null();
            return None;
        }
        self.next = unsafe { self.next.add(1) };
        Some(unsafe { CStr::from_ptr(entry) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_stdout_and_stderr_are_terminals() {
        assert!(Fd::STDOUT.is_terminal());
        assert!(Fd::STDERR.is_terminal());
        assert!(!Fd::STDIN.is_terminal());
        for fd in [-1, -2, 3, 4, 100, i32::MAX, i32::MIN] {
            assert!(!Fd(fd).is_terminal(), "fd {}", fd);
        }
    }

    #[test]
    fn character_device_mode() {
        assert!(FileMode::CHARACTER_DEVICE.is_character_device());
        assert!(FileMode(0o020644).is_character_device());
        assert!(!FileMode(0o100644).is_character_device());
        assert!(!FileMode::default().is_character_device());
    }

    #[test]
    fn whence_keeps_unknown_values() {
        assert_eq!(Whence::from(0), Whence::Set);
        assert_eq!(Whence::from(1), Whence::Current);
        assert_eq!(Whence::from(2), Whence::End);
        assert_eq!(Whence::from(7), Whence::Other(7));
        assert_eq!(Whence::from(-1), Whence::Other(-1));
    }

    #[test]
    fn cstr_list_walks_until_null() {
        let a = c"prog";
        let b = c"-v";
        let raw = [a.as_ptr(), b.as_ptr(), core::ptr::null()];
        let list = unsafe { CStrList::from_raw(raw.as_ptr()) };

        let mut it = list.iter();
        assert_eq!(it.next(), Some(a));
        assert_eq!(it.next(), Some(b));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
        assert_eq!(list.iter().count(), 2);
    }

    #[test]
    fn null_cstr_list_is_empty() {
        assert_eq!(CStrList::empty().iter().count(), 0);
        let list = unsafe { CStrList::from_raw(core::ptr::null()) };
        assert_eq!(list.iter().count(), 0);
    }
}

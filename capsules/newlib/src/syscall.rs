// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Identifiers for the operations of the newlib OS interface.

/// One operation of the OS interface, named after the C symbol newlib calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SyscallId {
    Chown,
    Close,
    Execve,
    Fork,
    Fstat,
    Getpid,
    Gettimeofday,
    Isatty,
    Kill,
    Link,
    Lseek,
    Open,
    Openat,
    Read,
    Readlink,
    Stat,
    Symlink,
    Times,
    Unlink,
    Wait,
    Write,
}

impl SyscallId {
    pub const ALL: [SyscallId; 21] = [
        SyscallId::Chown,
        SyscallId::Close,
        SyscallId::Execve,
        SyscallId::Fork,
        SyscallId::Fstat,
        SyscallId::Getpid,
        SyscallId::Gettimeofday,
        SyscallId::Isatty,
        SyscallId::Kill,
        SyscallId::Link,
        SyscallId::Lseek,
        SyscallId::Open,
        SyscallId::Openat,
        SyscallId::Read,
        SyscallId::Readlink,
        SyscallId::Stat,
        SyscallId::Symlink,
        SyscallId::Times,
        SyscallId::Unlink,
        SyscallId::Wait,
        SyscallId::Write,
    ];

    /// The C symbol newlib resolves this operation to.
    pub const fn symbol(self) -> &'static str {
        match self {
            SyscallId::Chown => "_chown",
            SyscallId::Close => "_close",
            SyscallId::Execve => "_execve",
            SyscallId::Fork => "_fork",
            SyscallId::Fstat => "_fstat",
            SyscallId::Getpid => "_getpid",
            SyscallId::Gettimeofday => "_gettimeofday",
            SyscallId::Isatty => "_isatty",
            SyscallId::Kill => "_kill",
            SyscallId::Link => "_link",
            SyscallId::Lseek => "_lseek",
            SyscallId::Open => "_open",
            SyscallId::Openat => "_openat",
            SyscallId::Read => "_read",
            SyscallId::Readlink => "_readlink",
            SyscallId::Stat => "_stat",
            SyscallId::Symlink => "_symlink",
            SyscallId::Times => "_times",
            SyscallId::Unlink => "_unlink",
            SyscallId::Wait => "_wait",
            SyscallId::Write => "_write",
        }
    }

    const fn bit(self) -> u32 {
        1 << (self as u8)
    }
}

/// A set of [`SyscallId`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyscallSet(u32);

impl SyscallSet {
    pub const EMPTY: SyscallSet = SyscallSet(0);
    pub const ALL: SyscallSet = SyscallSet((1 << SyscallId::ALL.len()) - 1);

    pub const fn with(self, id: SyscallId) -> SyscallSet {
        SyscallSet(self.0 | id.bit())
    }

    pub const fn without(self, id: SyscallId) -> SyscallSet {
        SyscallSet(self.0 & !id.bit())
    }

    pub const fn contains(self, id: SyscallId) -> bool {
        self.0 & id.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

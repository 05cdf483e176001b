// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Standard error enum for invoking operations

/// Standard errors.
///
/// Operations report failure as `Err(ErrorCode)` and never through a hidden
/// global. Translation into the C library's `errno` happens only at the C
/// boundary, with [`ErrorCode::errno`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum ErrorCode {
    /// Generic failure condition
    FAIL = 1,
    /// Underlying system is busy; retry
    BUSY = 2,
    /// An invalid parameter was passed
    INVAL = 6,
    /// Parameter passed was too large
    SIZE = 7,
    /// Memory required not available
    NOMEM = 9,
    /// Operation or command is unsupported
    NOSUPPORT = 10,
    /// Device does not exist
    NODEVICE = 11,
    /// Hardware did not become ready within the allowed number of polls
    TIMEOUT = 14,
}

/// `errno` values used by newlib (`sys/errno.h`).
pub mod errno {
    pub const EIO: i32 = 5;
    pub const ENOMEM: i32 = 12;
    pub const EBUSY: i32 = 16;
    pub const ENODEV: i32 = 19;
    pub const EINVAL: i32 = 22;
    pub const EFBIG: i32 = 27;
    pub const ENOSYS: i32 = 88;
    pub const ETIMEDOUT: i32 = 116;
}

impl ErrorCode {
    /// The newlib `errno` value reported to C callers for this error.
    pub const fn errno(self) -> i32 {
        match self {
            ErrorCode::FAIL => errno::EIO,
            ErrorCode::BUSY => errno::EBUSY,
            ErrorCode::INVAL => errno::EINVAL,
            ErrorCode::SIZE => errno::EFBIG,
            ErrorCode::NOMEM => errno::ENOMEM,
            ErrorCode::NOSUPPORT => errno::ENOSYS,
            ErrorCode::NODEVICE => errno::ENODEV,
            ErrorCode::TIMEOUT => errno::ETIMEDOUT,
        }
    }
}

impl From<ErrorCode> for usize {
    fn from(err: ErrorCode) -> usize {
        err as usize
    }
}

#[cfg(test)]
mod tests {
    use super::{errno, ErrorCode};

    #[test]
    fn unsupported_maps_to_enosys() {
        assert_eq!(ErrorCode::NOSUPPORT.errno(), errno::ENOSYS);
        assert_eq!(ErrorCode::NOSUPPORT.errno(), 88);
    }

    #[test]
    fn timeout_maps_to_etimedout() {
        assert_eq!(ErrorCode::TIMEOUT.errno(), errno::ETIMEDOUT);
    }

    #[test]
    fn errno_values_are_distinct() {
        let all = [
            ErrorCode::FAIL,
            ErrorCode::BUSY,
            ErrorCode::INVAL,
            ErrorCode::SIZE,
            ErrorCode::NOMEM,
            ErrorCode::NOSUPPORT,
            ErrorCode::NODEVICE,
            ErrorCode::TIMEOUT,
        ];
        for (i, a) in all.iter().enumerate() {
            assert!(a.errno() > 0);
            for b in &all[i + 1..] {
                assert_ne!(a.errno(), b.errno());
            }
        }
    }

    #[test]
    fn usize_conversion_uses_discriminant() {
        assert_eq!(usize::from(ErrorCode::NOSUPPORT), 10);
        assert_eq!(usize::from(ErrorCode::TIMEOUT), 14);
    }
}

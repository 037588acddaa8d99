//! Heap accounting for [`crate::Profiled`]. Real numbers need the `alloc-track` feature, which
//! installs an instrumented global allocator; without it every report is zero.

/// Heap activity observed while a region was open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocReport {
    /// Number of allocation calls.
    pub allocations: usize,
    /// Bytes handed out, including growth from reallocations.
    pub bytes_allocated: usize,
    /// Bytes returned.
    pub bytes_freed: usize,
}

impl AllocReport {
    /// Bytes still held when the region closed (negative when more was freed than allocated).
    pub fn net_bytes(&self) -> i64 {
        self.bytes_allocated as i64 - self.bytes_freed as i64
    }
}

#[cfg(feature = "alloc-track")]
mod imp {
    use stats_alloc::{INSTRUMENTED_SYSTEM, Region, StatsAlloc};
    use std::alloc::System;

    use super::AllocReport;

    #[global_allocator]
    static GLOBAL: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

    pub(crate) const ENABLED: bool = true;

    pub(crate) struct AllocRegion {
        region: Region<'static, System>,
    }

    impl AllocRegion {
        pub(crate) fn start() -> Self {
            Self {
                region: Region::new(GLOBAL),
            }
        }

        pub(crate) fn finish(&self) -> AllocReport {
            let s = self.region.change();
            let grown = s.bytes_reallocated.max(0).unsigned_abs();
            let shrunk = s.bytes_reallocated.min(0).unsigned_abs();
            AllocReport {
                allocations: s.allocations + s.reallocations,
                bytes_allocated: s.bytes_allocated + grown,
                bytes_freed: s.bytes_deallocated + shrunk,
            }
        }
    }
}

#[cfg(not(feature = "alloc-track"))]
mod imp {
    use super::AllocReport;

    pub(crate) const ENABLED: bool = false;

    pub(crate) struct AllocRegion;

    impl AllocRegion {
        pub(crate) fn start() -> Self {
            Self
        }

        pub(crate) fn finish(&self) -> AllocReport {
            AllocReport::default()
        }
    }
}

pub(crate) use imp::{AllocRegion, ENABLED};

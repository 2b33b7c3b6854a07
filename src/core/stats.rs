//! Process-wide counters for texture filtering.
//!
//! Lookups only bump relaxed atomics, which keeps them lock-free.

// std
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

// see stats.h

pub static N_EWA_LOOKUPS: AtomicU64 = AtomicU64::new(0);
pub static N_TRILERP_LOOKUPS: AtomicU64 = AtomicU64::new(0);
/// Bytes, summed over all pyramids built so far.
pub static MIPMAP_MEMORY: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct MipMapStats {
    pub ewa_lookups: u64,
    pub trilinear_lookups: u64,
    pub mipmap_memory: u64,
}

pub fn report() -> MipMapStats {
    MipMapStats {
        ewa_lookups: N_EWA_LOOKUPS.load(Ordering::Relaxed),
        trilinear_lookups: N_TRILERP_LOOKUPS.load(Ordering::Relaxed),
        mipmap_memory: MIPMAP_MEMORY.load(Ordering::Relaxed),
    }
}

impl fmt::Display for MipMapStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Statistics:")?;
        writeln!(f, "  Memory")?;
        writeln!(
            f,
            "    Texture MIP maps                  {:.2} MiB",
            self.mipmap_memory as f64 / (1024.0 * 1024.0)
        )?;
        writeln!(f, "  Texture")?;
        writeln!(f, "    EWA lookups                       {}", self.ewa_lookups)?;
        write!(
            f,
            "    Trilinear lookups                 {}",
            self.trilinear_lookups
        )
    }
}

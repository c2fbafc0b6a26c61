//! Shared fixtures for the integration test categories

use cell_admission::{CapacityLedger, Generation, SpectrumAllocator};

/// Bulk source mixing generations, comments and bad lines
pub const MIXED_SOURCE: &str = "\
# CellTower bulk load
# gen service freq
2 1 1800
2 2 1800
7 3 2800
5 4 1810

2 3 2000
2 x 2000
7 3 2800
2 4 1850
2 1 2600
";

pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn allocator(generation: Generation, capacity: i64) -> SpectrumAllocator {
    SpectrumAllocator::new(generation, CapacityLedger::new(capacity))
}

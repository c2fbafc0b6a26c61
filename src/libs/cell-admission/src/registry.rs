//! Allocator Registry
//!
//! Owns one allocator (and its dedicated ledger) per generation for the life
//! of a session. Allocators are created on first use.

use std::collections::BTreeMap;

use crate::allocator::SpectrumAllocator;
use crate::ledger::{CapacityLedger, DEFAULT_LEDGER_CAPACITY};
use crate::profile::Generation;

#[derive(Debug, Clone)]
pub struct AllocatorRegistry {
    allocators: BTreeMap<Generation, SpectrumAllocator>,
    ledger_capacity: i64,
}

impl AllocatorRegistry {
    /// Registry whose new allocators get ledgers of `ledger_capacity`
    pub fn new(ledger_capacity: i64) -> Self {
        Self {
            allocators: BTreeMap::new(),
            ledger_capacity,
        }
    }

    pub fn ledger_capacity(&self) -> i64 {
        self.ledger_capacity
    }

    pub fn get_or_create(&mut self, generation: Generation) -> &mut SpectrumAllocator {
        let capacity = self.ledger_capacity;
        self.allocators.entry(generation).or_insert_with(|| {
            log::info!("Creating {generation} allocator (ledger capacity {capacity})");
            SpectrumAllocator::new(generation, CapacityLedger::new(capacity))
        })
    }

    pub fn get(&self, generation: Generation) -> Option<&SpectrumAllocator> {
        self.allocators.get(&generation)
    }

    pub fn get_mut(&mut self, generation: Generation) -> Option<&mut SpectrumAllocator> {
        self.allocators.get_mut(&generation)
    }

    pub fn contains(&self, generation: Generation) -> bool {
        self.allocators.contains_key(&generation)
    }

    pub fn len(&self) -> usize {
        self.allocators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocators.is_empty()
    }

    /// Allocators in generation order
    pub fn iter(&self) -> impl Iterator<Item = (Generation, &SpectrumAllocator)> {
        self.allocators.iter().map(|(generation, alloc)| (*generation, alloc))
    }
}

impl Default for AllocatorRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_LEDGER_CAPACITY)
    }
}

//! Capacity Ledger
//!
//! Aggregate message budget shared by every user of one allocator.
//! The ledger only ever grows: there is no deregistration, so capacity
//! consumed by a user stays consumed after that user is removed. Only
//! [`CapacityLedger::reset`] gives the budget back.

/// Maximum number of registrations a ledger will record
pub const MAX_REGISTRATIONS: usize = 10_000;

/// Default message budget of a ledger
pub const DEFAULT_LEDGER_CAPACITY: i64 = 100;

/// Message budget tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityLedger {
    max_capacity: i64,
    current_load: i64,
    registered_ids: Vec<u32>,
}

impl CapacityLedger {
    pub fn new(max_capacity: i64) -> Self {
        Self {
            max_capacity,
            current_load: 0,
            registered_ids: Vec::new(),
        }
    }

    /// Whether `cost` more messages fit in the remaining budget
    pub fn can_register(&self, cost: u32) -> bool {
        self.current_load + i64::from(cost) <= self.max_capacity
    }

    /// Whether a registration of `cost` would succeed
    pub fn has_room(&self, cost: u32) -> bool {
        self.can_register(cost) && self.registered_ids.len() < MAX_REGISTRATIONS
    }

    /// Record `id` and charge `cost` against the budget
    pub fn register_user(&mut self, id: u32, cost: u32) -> bool {
        if !self.has_room(cost) {
            return false;
        }
        self.registered_ids.push(id);
        self.current_load += i64::from(cost);
        true
    }

    pub fn reset(&mut self) {
        self.current_load = 0;
        self.registered_ids.clear();
        log::info!("Ledger reset (capacity={})", self.max_capacity);
    }

    /// Reset, then register ids 1.. at `nominal_cost` until the budget or
    /// `max_users` runs out. Returns the number of users supported.
    pub fn simulate(&mut self, nominal_cost: u32, max_users: u64) -> u32 {
        self.reset();
        let mut supported = 0u32;
        while u64::from(supported) < max_users {
            if !self.register_user(supported + 1, nominal_cost) {
                break;
            }
            supported += 1;
        }
        log::debug!(
            "Ledger simulation: {supported} users at {nominal_cost} msgs (load {}/{})",
            self.current_load,
            self.max_capacity
        );
        supported
    }

    pub fn max_capacity(&self) -> i64 {
        self.max_capacity
    }

    pub fn current_load(&self) -> i64 {
        self.current_load
    }

    pub fn remaining(&self) -> i64 {
        self.max_capacity - self.current_load
    }

    pub fn registered_count(&self) -> usize {
        self.registered_ids.len()
    }

    pub fn registered_ids(&self) -> &[u32] {
        &self.registered_ids
    }
}

impl Default for CapacityLedger {
    fn default() -> Self {
        Self::new(DEFAULT_LEDGER_CAPACITY)
    }
}

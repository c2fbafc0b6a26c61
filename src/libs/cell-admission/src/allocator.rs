//! Spectrum Allocator
//!
//! Per-generation admission control. The allocator owns the frequency slot
//! table derived from a [`GenerationProfile`], the list of connected
//! [`UserRecord`]s, and the [`CapacityLedger`] it was bound to at
//! construction.
//!
//! Admission order for `add_user`:
//! 1. the frequency must match a slot exactly
//! 2. the slot must be below its population cap
//! 3. the message cost is looked up in the generation's cost table
//! 4. the ledger must have room for that cost
//!
//! Every check runs before any state changes, so a rejected request leaves
//! slots, records and ledger untouched.

use serde::Serialize;
use thiserror::Error;

use crate::error::Result;
use crate::ledger::CapacityLedger;
use crate::profile::{Generation, GenerationProfile, ServiceType};
use crate::user::UserRecord;

/// Maximum number of records an allocator holds
pub const MAX_RECORDS: usize = 10_000;

/// Maximum number of entries returned by a per-frequency query
pub const USERS_ON_FREQUENCY_LIMIT: usize = 100;

/// One frequency channel with its own population cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrequencySlot {
    pub frequency_mhz: u32,
    pub current_users: u32,
    pub max_users: u32,
}

impl FrequencySlot {
    pub fn new(frequency_mhz: u32, max_users: u32) -> Self {
        Self {
            frequency_mhz,
            current_users: 0,
            max_users,
        }
    }

    pub fn is_full(&self) -> bool {
        self.current_users >= self.max_users
    }

    pub fn free(&self) -> u32 {
        self.max_users.saturating_sub(self.current_users)
    }
}

/// Result of an admission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Admitted; carries the new record
    Added(UserRecord),
    /// No slot uses this frequency
    InvalidFrequency {
        frequency_mhz: u32,
        generation: Generation,
    },
    /// Slot population cap reached
    SlotFull {
        frequency_mhz: u32,
        generation: Generation,
        max_users: u32,
    },
    /// Ledger budget cannot absorb the message cost
    CoreRejected {
        frequency_mhz: u32,
        generation: Generation,
        cost: u32,
        load: i64,
        capacity: i64,
    },
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added(_))
    }

    pub fn record(&self) -> Option<&UserRecord> {
        match self {
            AddOutcome::Added(record) => Some(record),
            _ => None,
        }
    }

    pub fn into_result(self) -> std::result::Result<UserRecord, AdmissionError> {
        match self {
            AddOutcome::Added(record) => Ok(record),
            AddOutcome::InvalidFrequency { frequency_mhz, generation } => {
                Err(AdmissionError::InvalidFrequency { frequency_mhz, generation })
            }
            AddOutcome::SlotFull { frequency_mhz, generation, max_users } => {
                Err(AdmissionError::SlotFull { frequency_mhz, generation, max_users })
            }
            AddOutcome::CoreRejected {
                frequency_mhz,
                generation,
                cost,
                load,
                capacity,
            } => Err(AdmissionError::CoreRejected {
                frequency_mhz,
                generation,
                cost,
                load,
                capacity,
            }),
        }
    }
}

/// Rejected admission, for callers that propagate with `?`
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("frequency {frequency_mhz} MHz is not valid for {generation} generation")]
    InvalidFrequency {
        frequency_mhz: u32,
        generation: Generation,
    },
    #[error("frequency {frequency_mhz} MHz on {generation} is full ({max_users} users)")]
    SlotFull {
        frequency_mhz: u32,
        generation: Generation,
        max_users: u32,
    },
    #[error("{generation} core rejected {cost} msgs on {frequency_mhz} MHz (load {load}/{capacity})")]
    CoreRejected {
        frequency_mhz: u32,
        generation: Generation,
        cost: u32,
        load: i64,
        capacity: i64,
    },
}

/// Slot table, user list and ledger of one generation
#[derive(Debug, Clone)]
pub struct SpectrumAllocator {
    profile: &'static GenerationProfile,
    slots: Vec<FrequencySlot>,
    records: Vec<UserRecord>,
    ledger: CapacityLedger,
}

impl SpectrumAllocator {
    /// Build the slot table for `generation` and bind `ledger` to it
    pub fn new(generation: Generation, ledger: CapacityLedger) -> Self {
        let profile = generation.profile();
        let slots: Vec<FrequencySlot> = profile
            .slots
            .frequencies()
            .map(|freq| FrequencySlot::new(freq, profile.slots.max_users))
            .collect();
        debug_assert!(profile.slots.total_capacity() <= MAX_RECORDS as u64);

        log::info!(
            "{} allocator ready: {} slots x {} users, ledger capacity {}",
            profile.name,
            slots.len(),
            profile.slots.max_users,
            ledger.max_capacity()
        );

        Self {
            profile,
            slots,
            records: Vec::new(),
            ledger,
        }
    }

    /// Construct from a numeric generation code (2..=7)
    pub fn for_code(code: u8, ledger: CapacityLedger) -> Result<Self> {
        Ok(Self::new(Generation::from_code(code)?, ledger))
    }

    pub fn generation(&self) -> Generation {
        self.profile.generation
    }

    pub fn profile(&self) -> &'static GenerationProfile {
        self.profile
    }

    pub fn ledger(&self) -> &CapacityLedger {
        &self.ledger
    }

    pub fn slots(&self) -> &[FrequencySlot] {
        &self.slots
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn user_count(&self) -> usize {
        self.records.len()
    }

    /// Exact match against the slot table
    pub fn is_valid_frequency(&self, frequency_mhz: u32) -> bool {
        self.slot_index(frequency_mhz).is_some()
    }

    pub fn slot(&self, frequency_mhz: u32) -> Option<&FrequencySlot> {
        self.slot_index(frequency_mhz).map(|idx| &self.slots[idx])
    }

    fn slot_index(&self, frequency_mhz: u32) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.frequency_mhz == frequency_mhz)
    }

    /// Admit a new user of `service` on `frequency_mhz`
    pub fn add_user(&mut self, service: ServiceType, frequency_mhz: u32) -> AddOutcome {
        let generation = self.generation();

        let Some(slot_idx) = self.slot_index(frequency_mhz) else {
            log::warn!("Frequency {frequency_mhz} MHz is not valid for {generation} generation");
            return AddOutcome::InvalidFrequency { frequency_mhz, generation };
        };

        let slot = self.slots[slot_idx];
        if slot.is_full() || self.records.len() >= MAX_RECORDS {
            log::warn!(
                "Frequency {frequency_mhz} MHz on {generation} is full ({}/{})",
                slot.current_users,
                slot.max_users
            );
            return AddOutcome::SlotFull {
                frequency_mhz,
                generation,
                max_users: slot.max_users,
            };
        }

        let cost = self.profile.message_cost(service);
        if !self.ledger.has_room(cost) {
            log::warn!(
                "{generation} core rejected {service} user on {frequency_mhz} MHz: \
                 {cost} msgs over budget (load {}/{})",
                self.ledger.current_load(),
                self.ledger.max_capacity()
            );
            return AddOutcome::CoreRejected {
                frequency_mhz,
                generation,
                cost,
                load: self.ledger.current_load(),
                capacity: self.ledger.max_capacity(),
            };
        }

        let id = self.records.len() as u32 + 1;
        let registered = self.ledger.register_user(id, cost);
        debug_assert!(registered);

        let record = UserRecord::new(id, frequency_mhz, cost, service);
        self.records.push(record);
        self.slots[slot_idx].current_users += 1;

        log::debug!(
            "[{}] admitted on {generation} {frequency_mhz} MHz: {service}, {cost} msgs (load {}/{})",
            record.label(),
            self.ledger.current_load(),
            self.ledger.max_capacity()
        );
        AddOutcome::Added(record)
    }

    /// Remove the user at 1-based position `id`; later users shift down by one.
    ///
    /// The ledger keeps the removed user's cost: capacity consumed by an
    /// admission is not returned until [`SpectrumAllocator::reset`].
    /// Out-of-range ids are ignored.
    pub fn remove_user(&mut self, id: u32) -> Option<UserRecord> {
        if id == 0 || id as usize > self.records.len() {
            log::debug!("Remove ignored: no user U{id} ({} users)", self.records.len());
            return None;
        }

        let removed = self.records.remove(id as usize - 1);
        if let Some(idx) = self.slot_index(removed.frequency_mhz()) {
            let slot = &mut self.slots[idx];
            slot.current_users = slot.current_users.saturating_sub(1);
        }

        for (pos, record) in self.records.iter_mut().enumerate().skip(id as usize - 1) {
            record.set_id(pos as u32 + 1);
        }

        log::debug!(
            "[{}] removed from {} {} MHz ({} users remain)",
            removed.label(),
            self.generation(),
            removed.frequency_mhz(),
            self.records.len()
        );
        Some(removed)
    }

    /// Drop every user and give the ledger budget back
    pub fn reset(&mut self) {
        self.records.clear();
        for slot in &mut self.slots {
            slot.current_users = 0;
        }
        self.ledger.reset();
        log::info!("{} allocator reset", self.profile.name);
    }

    pub fn max_users_by_spectrum(&self) -> u64 {
        self.profile.max_users_by_spectrum()
    }

    /// Ledgers of the bound capacity needed to carry a full spectrum at the
    /// nominal per-user load. Non-positive capacity yields 1.
    pub fn cores_needed_for_full(&self) -> u64 {
        let capacity = self.ledger.max_capacity();
        if capacity <= 0 {
            return 1;
        }
        let full_load = self.max_users_by_spectrum() * u64::from(self.profile.messages_per_user);
        full_load.div_ceil(capacity as u64)
    }

    /// Users the bound ledger capacity supports at the nominal per-user
    /// load. Runs on a scratch ledger; the allocator is not touched.
    pub fn simulate_saturation(&self) -> u32 {
        let mut scratch = CapacityLedger::new(self.ledger.max_capacity());
        scratch.simulate(self.profile.messages_per_user, self.max_users_by_spectrum())
    }

    /// Users on `frequency_mhz` in id order, at most [`USERS_ON_FREQUENCY_LIMIT`]
    pub fn users_on_frequency(&self, frequency_mhz: u32) -> Vec<UserRecord> {
        self.records
            .iter()
            .filter(|record| record.frequency_mhz() == frequency_mhz)
            .take(USERS_ON_FREQUENCY_LIMIT)
            .copied()
            .collect()
    }

    /// Leading users, bounded by the first slot's capacity
    pub fn first_channel_users(&self) -> &[UserRecord] {
        let cap = self.slots.first().map_or(0, |slot| slot.max_users as usize);
        &self.records[..self.records.len().min(cap)]
    }
}

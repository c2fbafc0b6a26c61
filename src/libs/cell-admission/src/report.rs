//! Query Reports
//!
//! Structured views over an allocator for the presentation layer.

use serde::Serialize;

use crate::allocator::{FrequencySlot, SpectrumAllocator};
use crate::profile::ServiceType;

/// Occupancy of one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotStatus {
    pub frequency_mhz: u32,
    pub used: u32,
    pub max: u32,
    /// Integer percentage; `None` for a zero-capacity slot
    pub percent_full: Option<u32>,
}

impl From<&FrequencySlot> for SlotStatus {
    fn from(slot: &FrequencySlot) -> Self {
        let percent_full = (slot.max_users > 0)
            .then(|| (u64::from(slot.current_users) * 100 / u64::from(slot.max_users)) as u32);
        Self {
            frequency_mhz: slot.frequency_mhz,
            used: slot.current_users,
            max: slot.max_users,
            percent_full,
        }
    }
}

/// One user in a per-frequency listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserListing {
    pub id: u32,
    pub cost: u32,
    pub service: ServiceType,
    pub service_label: &'static str,
}

/// Aggregate view of one generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkStats {
    pub tech_name: &'static str,
    pub protocol: &'static str,
    pub total_spectrum_mhz: u32,
    pub max_users_by_spectrum: u64,
    pub current_users: usize,
    pub cores_needed_for_full: u64,
    pub ledger_load: i64,
    pub ledger_capacity: i64,
}

impl SpectrumAllocator {
    pub fn spectrum_status(&self) -> Vec<SlotStatus> {
        self.slots().iter().map(SlotStatus::from).collect()
    }

    /// Slots that can still take a user
    pub fn available_slots(&self) -> Vec<SlotStatus> {
        self.slots()
            .iter()
            .filter(|slot| !slot.is_full())
            .map(SlotStatus::from)
            .collect()
    }

    pub fn user_listing(&self, frequency_mhz: u32) -> Vec<UserListing> {
        self.users_on_frequency(frequency_mhz)
            .iter()
            .map(|record| UserListing {
                id: record.id(),
                cost: record.message_cost(),
                service: record.service_type(),
                service_label: record.service_type().label(),
            })
            .collect()
    }

    pub fn network_stats(&self) -> NetworkStats {
        let profile = self.profile();
        NetworkStats {
            tech_name: profile.name,
            protocol: profile.protocol,
            total_spectrum_mhz: profile.total_spectrum_mhz(),
            max_users_by_spectrum: self.max_users_by_spectrum(),
            current_users: self.user_count(),
            cores_needed_for_full: self.cores_needed_for_full(),
            ledger_load: self.ledger().current_load(),
            ledger_capacity: self.ledger().max_capacity(),
        }
    }
}

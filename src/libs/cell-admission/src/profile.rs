//! Generation Profiles
//!
//! Fixed radio profiles for the six supported technology generations.
//! Each profile carries its spectrum geometry, the slot layout used by the
//! allocator, and the per-service message cost table.

use std::fmt;

use serde::Serialize;

use crate::error::{CellError, Result};

/// Technology generation, keyed by its selection code (2..=7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum Generation {
    /// 2G (TDMA)
    G2 = 2,
    /// 3G (CDMA)
    G3 = 3,
    /// 3.5G (HSPA)
    G35 = 4,
    /// 4G (OFDM)
    G4 = 5,
    /// 4G+ (LTE-Advanced)
    G4Plus = 6,
    /// 5G (Massive MIMO)
    G5 = 7,
}

impl Generation {
    /// All generations in code order
    pub const ALL: [Generation; 6] = [
        Generation::G2,
        Generation::G3,
        Generation::G35,
        Generation::G4,
        Generation::G4Plus,
        Generation::G5,
    ];

    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            2 => Ok(Generation::G2),
            3 => Ok(Generation::G3),
            4 => Ok(Generation::G35),
            5 => Ok(Generation::G4),
            6 => Ok(Generation::G4Plus),
            7 => Ok(Generation::G5),
            _ => Err(CellError::UnknownGeneration(code)),
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Profile for this generation
    pub fn profile(self) -> &'static GenerationProfile {
        &PROFILES[(self.code() - 2) as usize]
    }

    pub fn name(self) -> &'static str {
        self.profile().name
    }
}

impl TryFrom<u8> for Generation {
    type Error = CellError;

    fn try_from(code: u8) -> Result<Self> {
        Generation::from_code(code)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Traffic classification of a connected device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum ServiceType {
    Voice = 1,
    Sms = 2,
    Data = 3,
    VoiceData = 4,
}

impl ServiceType {
    pub const ALL: [ServiceType; 4] = [
        ServiceType::Voice,
        ServiceType::Sms,
        ServiceType::Data,
        ServiceType::VoiceData,
    ];

    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(ServiceType::Voice),
            2 => Ok(ServiceType::Sms),
            3 => Ok(ServiceType::Data),
            4 => Ok(ServiceType::VoiceData),
            _ => Err(CellError::UnknownServiceType(code)),
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Display label used in user listings
    pub fn label(self) -> &'static str {
        match self {
            ServiceType::Voice => "Voice",
            ServiceType::Sms => "SMS",
            ServiceType::Data => "Data",
            ServiceType::VoiceData => "Voice+Data",
        }
    }
}

impl TryFrom<u8> for ServiceType {
    type Error = CellError;

    fn try_from(code: u8) -> Result<Self> {
        ServiceType::from_code(code)
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Message cost per service type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostTable {
    pub voice: u32,
    pub sms: u32,
    pub data: u32,
    pub voice_data: u32,
}

impl CostTable {
    /// Same cost for every service type
    pub const fn flat(cost: u32) -> Self {
        Self {
            voice: cost,
            sms: cost,
            data: cost,
            voice_data: cost,
        }
    }

    pub fn cost(&self, service: ServiceType) -> u32 {
        match service {
            ServiceType::Voice => self.voice,
            ServiceType::Sms => self.sms,
            ServiceType::Data => self.data,
            ServiceType::VoiceData => self.voice_data,
        }
    }
}

/// Frequency slot layout: `count` slots starting at `base_mhz`, `step_mhz` apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    pub base_mhz: u32,
    pub step_mhz: u32,
    pub count: usize,
    pub max_users: u32,
}

impl SlotLayout {
    /// Frequencies of every slot in layout order
    pub fn frequencies(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.count as u32).map(move |i| self.base_mhz + i * self.step_mhz)
    }

    pub fn total_capacity(&self) -> u64 {
        self.count as u64 * u64::from(self.max_users)
    }
}

/// Immutable description of one technology generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationProfile {
    pub generation: Generation,
    pub name: &'static str,
    pub protocol: &'static str,
    /// Total spectrum width in kHz
    pub total_spectrum_khz: u32,
    /// Channel bandwidth in kHz
    pub channel_bandwidth_khz: u32,
    pub users_per_channel: u32,
    /// Nominal message load per user, used for capacity planning
    pub messages_per_user: u32,
    pub antenna_factor: u32,
    pub mimo_enabled: bool,
    pub slots: SlotLayout,
    pub costs: CostTable,
}

impl GenerationProfile {
    pub fn channel_count(&self) -> u32 {
        if self.channel_bandwidth_khz == 0 {
            return 0;
        }
        self.total_spectrum_khz / self.channel_bandwidth_khz
    }

    /// Spatial reuse multiplier (antenna factor when MIMO is on)
    pub fn reuse_factor(&self) -> u32 {
        if self.mimo_enabled {
            self.antenna_factor
        } else {
            1
        }
    }

    /// channels * users-per-channel * reuse
    pub fn max_users_by_spectrum(&self) -> u64 {
        u64::from(self.channel_count())
            * u64::from(self.users_per_channel)
            * u64::from(self.reuse_factor())
    }

    pub fn message_cost(&self, service: ServiceType) -> u32 {
        self.costs.cost(service)
    }

    /// Total spectrum rounded down to whole MHz
    pub fn total_spectrum_mhz(&self) -> u32 {
        self.total_spectrum_khz / 1000
    }
}

/// Profiles indexed by `code - 2`
pub static PROFILES: [GenerationProfile; 6] = [
    GenerationProfile {
        generation: Generation::G2,
        name: "2G",
        protocol: "TDMA (Time Division Multiple Access)",
        total_spectrum_khz: 1_000,
        channel_bandwidth_khz: 200,
        users_per_channel: 16,
        messages_per_user: 15,
        antenna_factor: 1,
        mimo_enabled: false,
        slots: SlotLayout {
            base_mhz: 1800,
            step_mhz: 200,
            count: 5,
            max_users: 16,
        },
        costs: CostTable {
            voice: 15,
            sms: 2,
            data: 5,
            voice_data: 20,
        },
    },
    GenerationProfile {
        generation: Generation::G3,
        name: "3G",
        protocol: "CDMA (Code Division Multiple Access)",
        total_spectrum_khz: 1_000,
        channel_bandwidth_khz: 200,
        users_per_channel: 32,
        messages_per_user: 10,
        antenna_factor: 1,
        mimo_enabled: false,
        slots: SlotLayout {
            base_mhz: 1800,
            step_mhz: 200,
            count: 5,
            max_users: 32,
        },
        costs: CostTable::flat(10),
    },
    GenerationProfile {
        generation: Generation::G35,
        name: "3.5G",
        protocol: "HSPA (High-Speed Packet Access)",
        total_spectrum_khz: 1_000,
        channel_bandwidth_khz: 200,
        users_per_channel: 64,
        messages_per_user: 8,
        antenna_factor: 1,
        mimo_enabled: false,
        slots: SlotLayout {
            base_mhz: 1800,
            step_mhz: 200,
            count: 5,
            max_users: 64,
        },
        costs: CostTable::flat(8),
    },
    // 100 channels of 10 kHz; every 10th is exposed as a slot carrying 10 subchannels
    GenerationProfile {
        generation: Generation::G4,
        name: "4G",
        protocol: "OFDM (Orthogonal Frequency Division Multiplexing)",
        total_spectrum_khz: 1_000,
        channel_bandwidth_khz: 10,
        users_per_channel: 30,
        messages_per_user: 10,
        antenna_factor: 4,
        mimo_enabled: true,
        slots: SlotLayout {
            base_mhz: 1800,
            step_mhz: 10,
            count: 10,
            max_users: 120,
        },
        costs: CostTable {
            voice: 15,
            sms: 2,
            data: 25,
            voice_data: 40,
        },
    },
    GenerationProfile {
        generation: Generation::G4Plus,
        name: "4G+",
        protocol: "LTE-Advanced (Carrier Aggregation + OFDM)",
        total_spectrum_khz: 1_000,
        channel_bandwidth_khz: 10,
        users_per_channel: 40,
        messages_per_user: 8,
        antenna_factor: 4,
        mimo_enabled: true,
        slots: SlotLayout {
            base_mhz: 1800,
            step_mhz: 10,
            count: 10,
            max_users: 160,
        },
        costs: CostTable {
            voice: 12,
            sms: 2,
            data: 20,
            voice_data: 32,
        },
    },
    GenerationProfile {
        generation: Generation::G5,
        name: "5G",
        protocol: "OFDM + Massive MIMO",
        total_spectrum_khz: 11_000,
        channel_bandwidth_khz: 1_000,
        users_per_channel: 30,
        messages_per_user: 10,
        antenna_factor: 16,
        mimo_enabled: true,
        slots: SlotLayout {
            base_mhz: 1800,
            step_mhz: 1000,
            count: 11,
            max_users: 480,
        },
        costs: CostTable {
            voice: 10,
            sms: 2,
            data: 25,
            voice_data: 15,
        },
    },
];

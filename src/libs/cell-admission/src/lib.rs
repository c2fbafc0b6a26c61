//! Cell Tower Admission Engine
//!
//! Admission control and spectrum-slot allocation for a simulated base
//! station across six fixed technology generations (2G through 5G).
//!
//! - [`profile`]: generation profiles, slot layouts and message cost tables
//! - [`ledger`]: aggregate message budget
//! - [`allocator`]: per-generation slot table, admission and removal
//! - [`user`]: connected-device records and their canonical line format
//! - [`registry`]: one allocator per generation for a session
//! - [`bulk`]: line-oriented bulk load with verbatim rewrite
//! - [`report`]: structured query outputs
//!
//! The engine is single-threaded. An allocator and its ledger form one unit
//! of mutable state; hosts that share one across threads must lock it.

pub mod allocator;
pub mod bulk;
pub mod config;
pub mod error;
pub mod ledger;
pub mod profile;
pub mod registry;
pub mod report;
pub mod user;


pub use allocator::{
    AddOutcome, AdmissionError, FrequencySlot, SpectrumAllocator, MAX_RECORDS,
    USERS_ON_FREQUENCY_LIMIT,
};
pub use bulk::{parse_line, BulkEntry, BulkLoadReport, BulkSource, LineKind, RejectedLine};
pub use config::{ConfigError, SimulatorConfig, DEFAULT_BULK_LOAD_PATH};
pub use error::{CellError, RecordField, RecordParseError, Result};
pub use ledger::{CapacityLedger, DEFAULT_LEDGER_CAPACITY, MAX_REGISTRATIONS};
pub use profile::{CostTable, Generation, GenerationProfile, ServiceType, SlotLayout, PROFILES};
pub use registry::AllocatorRegistry;
pub use report::{NetworkStats, SlotStatus, UserListing};
pub use user::UserRecord;

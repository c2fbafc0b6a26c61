//! Admission Integration Tests
//!
//! Admission order (frequency -> slot cap -> ledger), ledger exhaustion and
//! removal renumbering across generations.

use cell_admission::{AddOutcome, AdmissionError, Generation, ServiceType};
use crate::common::{allocator, init_test_logging};

#[test]
fn test_2g_voice_exhausts_ledger_before_slot() {
    init_test_logging();
    let mut alloc = allocator(Generation::G2, 100);

    let mut loads = Vec::new();
    for _ in 0..6 {
        assert!(alloc.add_user(ServiceType::Voice, 1800).is_added());
        loads.push(alloc.ledger().current_load());
    }
    assert_eq!(loads, vec![15, 30, 45, 60, 75, 90]);

    // 90 + 15 = 105 > 100
    assert_eq!(
        alloc.add_user(ServiceType::Voice, 1800),
        AddOutcome::CoreRejected {
            frequency_mhz: 1800,
            generation: Generation::G2,
            cost: 15,
            load: 90,
            capacity: 100,
        }
    );
    let slot = alloc.slot(1800).unwrap();
    assert_eq!(slot.current_users, 6);
    assert_eq!(slot.max_users, 16);
    assert_eq!(alloc.ledger().current_load(), 90);

    // Cheaper services still fit the remaining budget
    assert!(alloc.add_user(ServiceType::Data, 1800).is_added());
    assert!(alloc.add_user(ServiceType::Sms, 1800).is_added());
    assert_eq!(alloc.ledger().current_load(), 97);
}

#[test]
fn test_5g_data_exhausts_ledger() {
    init_test_logging();
    let mut alloc = allocator(Generation::G5, 50);

    let first = alloc.add_user(ServiceType::Data, 2800);
    assert_eq!(first.record().unwrap().message_cost(), 25);
    assert!(alloc.add_user(ServiceType::Data, 2800).is_added());
    assert_eq!(alloc.ledger().current_load(), 50);

    let err = alloc.add_user(ServiceType::Data, 2800).into_result().unwrap_err();
    assert!(matches!(err, AdmissionError::CoreRejected { cost: 25, load: 50, capacity: 50, .. }));
    assert_eq!(alloc.user_count(), 2);
}

#[test]
fn test_invalid_frequency_reports_context() {
    let mut alloc = allocator(Generation::G4Plus, 100);
    let outcome = alloc.add_user(ServiceType::Voice, 2800);
    assert_eq!(
        outcome,
        AddOutcome::InvalidFrequency {
            frequency_mhz: 2800,
            generation: Generation::G4Plus,
        }
    );
    assert_eq!(
        outcome.into_result().unwrap_err().to_string(),
        "frequency 2800 MHz is not valid for 4G+ generation"
    );
}

#[test]
fn test_slot_full_regardless_of_ledger() {
    for generation in Generation::ALL {
        let mut alloc = allocator(generation, i64::MAX / 2);
        let slot = alloc.slots()[0];
        for _ in 0..slot.max_users {
            assert!(alloc.add_user(ServiceType::Sms, slot.frequency_mhz).is_added());
        }
        for _ in 0..3 {
            assert_eq!(
                alloc.add_user(ServiceType::Sms, slot.frequency_mhz),
                AddOutcome::SlotFull {
                    frequency_mhz: slot.frequency_mhz,
                    generation,
                    max_users: slot.max_users,
                }
            );
        }
    }
}

#[test]
fn test_remove_renumbers_then_out_of_range_is_noop() {
    init_test_logging();
    let mut alloc = allocator(Generation::G3, 100);
    alloc.add_user(ServiceType::Voice, 1800);
    alloc.add_user(ServiceType::Sms, 2000);
    alloc.add_user(ServiceType::Data, 2200);
    let ids: Vec<u32> = alloc.records().iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    alloc.remove_user(1);
    let remaining: Vec<(u32, u32)> = alloc
        .records()
        .iter()
        .map(|r| (r.id(), r.frequency_mhz()))
        .collect();
    assert_eq!(remaining, vec![(1, 2000), (2, 2200)]);

    let before = alloc.records().to_vec();
    assert!(alloc.remove_user(3).is_none());
    assert_eq!(alloc.records(), &before[..]);
}

#[test]
fn test_removal_does_not_refund_ledger() {
    let mut alloc = allocator(Generation::G5, 50);
    alloc.add_user(ServiceType::Data, 1800);
    alloc.add_user(ServiceType::Data, 2800);
    alloc.remove_user(1);
    alloc.remove_user(1);
    assert_eq!(alloc.user_count(), 0);
    assert!(alloc.slots().iter().all(|s| s.current_users == 0));

    // Capacity consumed by removed users stays consumed
    assert_eq!(alloc.ledger().current_load(), 50);
    assert_eq!(alloc.ledger().registered_count(), 2);
    assert!(matches!(alloc.add_user(ServiceType::Sms, 1800), AddOutcome::CoreRejected { .. }));

    alloc.reset();
    assert!(alloc.add_user(ServiceType::Data, 1800).is_added());
}

#[test]
fn test_generation_cost_tables_drive_admission() {
    let expected = [
        (Generation::G2, [15, 2, 5, 20]),
        (Generation::G3, [10, 10, 10, 10]),
        (Generation::G35, [8, 8, 8, 8]),
        (Generation::G4, [15, 2, 25, 40]),
        (Generation::G4Plus, [12, 2, 20, 32]),
        (Generation::G5, [10, 2, 25, 15]),
    ];
    for (generation, costs) in expected {
        let mut alloc = allocator(generation, 1_000);
        let freq = alloc.slots()[0].frequency_mhz;
        for (service, cost) in ServiceType::ALL.iter().zip(costs) {
            let outcome = alloc.add_user(*service, freq);
            assert_eq!(outcome.record().unwrap().message_cost(), cost, "{generation} {service}");
        }
        assert_eq!(alloc.ledger().current_load(), costs.iter().map(|c| i64::from(*c)).sum::<i64>());
    }
}

#[test]
fn test_network_stats_per_generation() {
    let expected = [
        (Generation::G2, 1, 80, 12),
        (Generation::G3, 1, 160, 16),
        (Generation::G35, 1, 320, 26),
        (Generation::G4, 1, 12_000, 1_200),
        (Generation::G4Plus, 1, 16_000, 1_280),
        (Generation::G5, 11, 5_280, 528),
    ];
    for (generation, spectrum, max_users, cores) in expected {
        let stats = allocator(generation, 100).network_stats();
        assert_eq!(stats.total_spectrum_mhz, spectrum, "{generation}");
        assert_eq!(stats.max_users_by_spectrum, max_users, "{generation}");
        assert_eq!(stats.cores_needed_for_full, cores, "{generation}");
        assert_eq!(stats.current_users, 0);
    }
}

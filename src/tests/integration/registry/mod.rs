//! Registry Integration Tests
//!
//! One allocator and one dedicated ledger per generation, kept for the
//! life of the session.

use cell_admission::{AllocatorRegistry, BulkSource, Generation, ServiceType};
use crate::common::{init_test_logging, MIXED_SOURCE};

#[test]
fn test_switching_generations_keeps_state() {
    init_test_logging();
    let mut registry = AllocatorRegistry::new(100);

    registry.get_or_create(Generation::G2).add_user(ServiceType::Voice, 1800);
    registry.get_or_create(Generation::G5).add_user(ServiceType::Data, 2800);
    registry.get_or_create(Generation::G2).add_user(ServiceType::Sms, 2000);

    let g2 = registry.get(Generation::G2).unwrap();
    assert_eq!(g2.user_count(), 2);
    assert_eq!(g2.ledger().current_load(), 17);

    let g5 = registry.get(Generation::G5).unwrap();
    assert_eq!(g5.user_count(), 1);
    assert_eq!(g5.ledger().current_load(), 25);
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_every_generation_loads_independently() {
    let mut registry = AllocatorRegistry::new(1_000);
    for generation in Generation::ALL {
        let mut source = BulkSource::parse(MIXED_SOURCE);
        source.load_into(registry.get_or_create(generation));
    }
    assert_eq!(registry.len(), Generation::ALL.len());

    let counts: Vec<(Generation, usize)> = registry
        .iter()
        .map(|(generation, alloc)| (generation, alloc.user_count()))
        .collect();
    assert_eq!(
        counts,
        vec![
            (Generation::G2, 4),
            (Generation::G3, 0),
            (Generation::G35, 0),
            (Generation::G4, 1),
            (Generation::G4Plus, 0),
            (Generation::G5, 2),
        ]
    );
}

//! Bulk Load Integration Tests
//!
//! File-mode flow: load one generation from a mixed source, remove users,
//! and rewrite the source keeping every foreign line intact.

use cell_admission::{AddOutcome, BulkSource, Generation, ServiceType};
use crate::common::{allocator, init_test_logging, MIXED_SOURCE};

#[test]
fn test_load_2g_from_mixed_source() {
    init_test_logging();
    let mut source = BulkSource::parse(MIXED_SOURCE);
    let mut alloc = allocator(Generation::G2, 100);

    let report = source.load_into(&mut alloc);
    assert_eq!(report.admitted, 4);
    assert_eq!(report.other_generation, 3);
    assert_eq!(report.comments, 3);
    assert_eq!(report.malformed, vec![9]);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].line_no, 11);
    assert_eq!(
        report.rejected[0].outcome,
        AddOutcome::InvalidFrequency {
            frequency_mhz: 1850,
            generation: Generation::G2,
        }
    );

    let summary: Vec<(u32, u32, ServiceType)> = alloc
        .records()
        .iter()
        .map(|r| (r.frequency_mhz(), r.message_cost(), r.service_type()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (1800, 15, ServiceType::Voice),
            (1800, 2, ServiceType::Sms),
            (2000, 5, ServiceType::Data),
            (2600, 15, ServiceType::Voice),
        ]
    );
    assert_eq!(alloc.ledger().current_load(), 37);
}

#[test]
fn test_load_5g_ledger_limit() {
    let mut source = BulkSource::parse(MIXED_SOURCE);
    let mut alloc = allocator(Generation::G5, 25);

    let report = source.load_into(&mut alloc);
    assert_eq!(report.admitted, 1);
    assert_eq!(report.rejected.len(), 1);
    assert!(matches!(report.rejected[0].outcome, AddOutcome::CoreRejected { .. }));
    assert_eq!(report.other_generation, 6);
}

#[test]
fn test_remove_rewrites_only_active_generation_line() {
    init_test_logging();
    let mut source = BulkSource::parse(MIXED_SOURCE);
    let mut alloc = allocator(Generation::G2, 100);
    source.load_into(&mut alloc);

    // U3 came from "2 3 2000"
    assert!(source.remove_user(&mut alloc, 3));
    let text = String::from_utf8(source.render()).unwrap();
    assert!(!text.contains("2 3 2000\n"));
    assert_eq!(text, MIXED_SOURCE.replace("2 3 2000\n", ""));

    // Foreign, malformed and rejected lines survive untouched
    for kept in ["7 3 2800\n", "5 4 1810\n", "2 x 2000\n", "2 4 1850\n", "# gen service freq\n"] {
        assert!(text.contains(kept), "{kept:?} lost");
    }

    // Renumbered: U3 is now the 2600 MHz user
    assert_eq!(alloc.records()[2].frequency_mhz(), 2600);
    assert!(source.remove_user(&mut alloc, 3));
    assert!(!String::from_utf8(source.render()).unwrap().contains("2 1 2600"));
    assert_eq!(alloc.user_count(), 2);

    assert!(!source.remove_user(&mut alloc, 3));
}

#[test]
fn test_reloading_rewritten_source_matches_allocator() {
    let mut source = BulkSource::parse(MIXED_SOURCE);
    let mut alloc = allocator(Generation::G2, 100);
    source.load_into(&mut alloc);
    source.remove_user(&mut alloc, 1);

    let mut reloaded = BulkSource::parse(&source.render());
    let mut fresh = allocator(Generation::G2, 100);
    reloaded.load_into(&mut fresh);

    assert_eq!(fresh.records(), alloc.records());
    assert_eq!(fresh.slots(), alloc.slots());
    // The first allocator still carries the removed user's cost
    assert_eq!(alloc.ledger().current_load(), 37);
    assert_eq!(fresh.ledger().current_load(), 22);
}

#[test]
fn test_empty_source() {
    let mut source = BulkSource::parse("");
    let mut alloc = allocator(Generation::G4, 100);
    let report = source.load_into(&mut alloc);
    assert_eq!(report.admitted, 0);
    assert_eq!(source.line_count(), 0);
    assert!(source.render().is_empty());
}

#[test]
fn test_latin1_comment_does_not_abort_load() {
    init_test_logging();
    let bytes = b"2 1 1800\n# caf\xe9 note\n2 2 2000\n7 3 2800\n";
    let mut source = BulkSource::parse(bytes);
    let mut alloc = allocator(Generation::G2, 100);

    let report = source.load_into(&mut alloc);
    assert_eq!(report.admitted, 2);
    assert_eq!(report.comments, 1);
    assert_eq!(report.other_generation, 1);
    assert!(report.malformed.is_empty());

    assert!(source.remove_user(&mut alloc, 1));
    assert_eq!(source.render(), b"# caf\xe9 note\n2 2 2000\n7 3 2800\n");
    assert_eq!(alloc.records()[0].frequency_mhz(), 2000);
}

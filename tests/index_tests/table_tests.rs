//! HashIndex Tests
//!
//! Tests verify:
//! - Capacity validation
//! - Double-hashing placement
//! - Duplicate rejection, including at the resize threshold
//! - Tombstone handling on remove, lookup and reinsert
//! - Proactive doubling and the half-load bound
//! - Dump format

use semdb::index::{HashIndex, Slot};
use semdb::{Handle, StoreError};

// =============================================================================
// Helper Functions
// =============================================================================

fn handle_for(key: u32) -> Handle {
    Handle::new(key as usize, key as usize)
}

fn index_with(capacity: usize, keys: &[u32]) -> HashIndex {
    let mut index = HashIndex::new(capacity).unwrap();
    for &key in keys {
        assert!(index.insert(key, handle_for(key)), "insert {}", key);
    }
    index
}

fn full_slots(index: &HashIndex) -> usize {
    index
        .iter()
        .filter(|(_, slot)| matches!(slot, Slot::Full { .. }))
        .count()
}

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn test_new_index_is_empty() {
    let index = HashIndex::new(8).unwrap();

    assert_eq!(index.capacity(), 8);
    assert_eq!(index.len(), 0);
    assert!(index.is_empty());
    assert_eq!(index.iter().count(), 0);
}

#[test]
fn test_capacity_must_be_power_of_two() {
    for capacity in [0, 1, 3, 6, 12, 100] {
        let result = HashIndex::new(capacity);
        assert!(
            matches!(result, Err(StoreError::InvalidCapacity { requested, .. }) if requested == capacity),
            "capacity {}",
            capacity
        );
    }
    assert!(HashIndex::new(2).is_ok());
    assert!(HashIndex::new(1024).is_ok());
}

// =============================================================================
// Insert / Lookup Tests
// =============================================================================

#[test]
fn test_insert_and_get() {
    let index = index_with(16, &[0, 3, 8, 11]);

    for key in [0, 3, 8, 11] {
        assert_eq!(index.get(key), Some(handle_for(key)));
    }
    assert_eq!(index.get(21), None);
    assert_eq!(index.get(40), None);
}

#[test]
fn test_collisions_follow_probe_step() {
    // 16, 32 and 48 all hash home to 0; steps are 3, 5 and 7
    let index = index_with(16, &[0, 16, 32, 48]);

    assert_eq!(index.index_of(0), Some(0));
    assert_eq!(index.index_of(16), Some(3));
    assert_eq!(index.index_of(32), Some(5));
    assert_eq!(index.index_of(48), Some(7));
    assert_eq!(index.capacity(), 16);
}

#[test]
fn test_probe_skips_occupied_slots() {
    // 16 probes 0 -> 3 -> 6
    let index = index_with(16, &[0, 3, 16]);

    assert_eq!(index.index_of(3), Some(3));
    assert_eq!(index.index_of(16), Some(6));
    assert_eq!(index.index_of(99), None);
}

#[test]
fn test_fourth_insert_into_eight_slots_resizes_first() {
    let mut index = index_with(8, &[0, 3, 8]);

    // 8 probes 0 -> 3 -> 6
    assert_eq!(index.index_of(8), Some(6));
    assert_eq!(index.capacity(), 8);

    assert!(index.insert(11, handle_for(11)));

    assert_eq!(index.capacity(), 16);
    assert_eq!(index.len(), 4);
    assert_eq!(index.index_of(0), Some(0));
    assert_eq!(index.index_of(3), Some(3));
    assert_eq!(index.index_of(8), Some(8));
    assert_eq!(index.index_of(11), Some(11));
}

#[test]
fn test_duplicate_insert_rejected() {
    let mut index = index_with(16, &[5]);

    assert!(!index.insert(5, Handle::new(99, 99)));
    assert_eq!(index.len(), 1);
    assert_eq!(index.get(5), Some(handle_for(5)));
}

#[test]
fn test_duplicate_at_threshold_does_not_resize() {
    let mut index = index_with(8, &[1, 2, 3]);
    assert_eq!(index.capacity(), 8);

    assert!(!index.insert(1, handle_for(1)));
    assert_eq!(index.capacity(), 8);
    assert_eq!(index.len(), 3);

    assert!(index.insert(4, handle_for(4)));
    assert_eq!(index.capacity(), 16);
    assert_eq!(index.len(), 4);
}

#[test]
fn test_load_stays_below_half() {
    let mut index = HashIndex::new(2).unwrap();

    for key in 0..200u32 {
        assert!(index.insert(key * 7, handle_for(key)));
        assert!(index.len() * 2 < index.capacity(), "after key {}", key);
        assert_eq!(index.len(), full_slots(&index));
    }

    for key in 0..200u32 {
        assert_eq!(index.get(key * 7), Some(handle_for(key)));
    }
}

// =============================================================================
// Remove / Tombstone Tests
// =============================================================================

#[test]
fn test_remove_leaves_tombstone() {
    let mut index = index_with(16, &[0, 16]);

    assert!(index.remove(0));

    assert_eq!(index.len(), 1);
    assert_eq!(index.iter().next(), Some((0, &Slot::Tombstone)));
    assert_eq!(index.get(0), None);
    assert_eq!(index.index_of(0), None);
}

#[test]
fn test_remove_absent_key_is_noop() {
    let mut index = index_with(16, &[1, 2]);

    assert!(!index.remove(3));
    assert_eq!(index.len(), 2);

    assert!(index.remove(1));
    assert!(!index.remove(1));
    assert_eq!(index.len(), 1);
}

#[test]
fn test_lookup_probes_past_tombstone() {
    let mut index = index_with(16, &[0, 16]);

    index.remove(0);

    assert_eq!(index.index_of(16), Some(3));
    assert_eq!(index.get(16), Some(handle_for(16)));
}

#[test]
fn test_insert_reuses_first_tombstone() {
    let mut index = index_with(16, &[0, 16]);
    index.remove(0);

    // 32 probes 0 (tombstone) -> 5 (empty)
    assert!(index.insert(32, handle_for(32)));

    assert_eq!(index.index_of(32), Some(0));
    assert_eq!(index.len(), 2);
}

#[test]
fn test_duplicate_found_past_tombstone() {
    let mut index = index_with(16, &[0, 16]);
    index.remove(0);

    // The tombstone at 0 would be the insertion point, but 16 lives at 3
    assert!(!index.insert(16, Handle::new(1, 1)));

    assert_eq!(index.len(), 1);
    assert_eq!(index.get(16), Some(handle_for(16)));
    assert_eq!(index.iter().next(), Some((0, &Slot::Tombstone)));
}

#[test]
fn test_resize_drops_tombstones() {
    let mut index = index_with(8, &[1, 2]);
    index.remove(1);
    index.insert(3, handle_for(3));
    index.insert(4, handle_for(4));
    assert_eq!(index.capacity(), 8);
    assert!(index.iter().any(|(_, slot)| *slot == Slot::Tombstone));

    index.insert(5, handle_for(5));

    assert_eq!(index.capacity(), 16);
    assert_eq!(index.len(), 4);
    assert!(index.iter().all(|(_, slot)| *slot != Slot::Tombstone));
    for key in [2, 3, 4, 5] {
        assert_eq!(index.get(key), Some(handle_for(key)));
    }
    assert_eq!(index.get(1), None);
}

#[test]
fn test_all_tombstones_still_terminates() {
    let mut index = HashIndex::new(4).unwrap();
    for key in 0..4 {
        assert!(index.insert(key, handle_for(key)));
        assert!(index.remove(key));
    }
    assert_eq!(index.iter().count(), 4);
    assert_eq!(index.capacity(), 4);

    assert_eq!(index.get(7), None);
    assert!(!index.remove(7));

    // Home slot of 7 is 3, a tombstone
    assert!(index.insert(7, handle_for(7)));
    assert_eq!(index.index_of(7), Some(3));
}

#[test]
fn test_explicit_resize_preserves_entries() {
    let mut index = index_with(16, &[0, 16, 32]);

    index.resize();

    assert_eq!(index.capacity(), 32);
    assert_eq!(index.len(), 3);
    assert_eq!(index.index_of(0), Some(0));
    assert_eq!(index.index_of(16), Some(16));
    // 32 homes to 0 in 32 slots, step 3
    assert_eq!(index.index_of(32), Some(3));
}

// =============================================================================
// Dump Tests
// =============================================================================

#[test]
fn test_dump_format() {
    let mut index = index_with(16, &[0, 16, 9]);
    index.remove(0);

    assert_eq!(
        index.to_string(),
        "0: TOMBSTONE\n3: 16\n9: 9\ntotal records: 2\n"
    );
}

#[test]
fn test_dump_empty() {
    let index = HashIndex::new(4).unwrap();
    assert_eq!(index.to_string(), "total records: 0\n");
}

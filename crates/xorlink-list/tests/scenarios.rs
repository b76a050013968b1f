//! Integration tests: end-to-end list scenarios, teardown accounting and
//! allocation-failure behaviour.

use xorlink_arena::Arena;
use xorlink_list::{ListError, XorList};
use xorlink_test_utils::{checked_arena, failing_arena, init_tracing, DropTally};

fn checked<T>() -> XorList<T> {
    XorList::with_arena(checked_arena())
}

// ── Reference scenarios ─────────────────────────────────────────────

#[test]
fn push_all_delete_and_pop_from_both_ends() {
    init_tracing();
    let mut list = checked();
    list.push_all([1, 2, 3, 4, 5]);
    assert_eq!(list.size(), 5);
    assert_eq!(list.first(), Some(&1));
    assert_eq!(list.last(), Some(&5));

    assert_eq!(list.delete(2), Some(3));
    assert_eq!(list.to_vec(), vec![1, 2, 4, 5]);

    assert_eq!(list.pop_left(), Some(1));
    assert_eq!(list.to_vec(), vec![2, 4, 5]);

    assert_eq!(list.pop_right(), Some(5));
    assert_eq!(list.to_vec(), vec![2, 4]);
}

#[test]
fn push_front_then_pop_right_returns_insertion_order() {
    let mut list = checked();
    list.push_front(1);
    list.push_front(2);
    list.push_front(3);
    assert_eq!(list.to_vec(), vec![3, 2, 1]);
    assert_eq!(list.pop_right(), Some(1));
    assert_eq!(list.pop_right(), Some(2));
    assert_eq!(list.pop_right(), Some(3));
    assert_eq!(list.pop_right(), None);
}

#[test]
fn free_twice_is_harmless() {
    let mut list = checked();
    list.push_all(0..10);
    list.free();
    assert_eq!(list.size(), 0);
    assert!(list.is_empty());
    list.free();
    assert_eq!(list.size(), 0);
    assert_eq!(list.arena().stats().live_blocks, 0);
}

#[test]
fn popping_empty_yields_default_and_keeps_size_zero() {
    let mut list: XorList<u64> = checked();
    assert_eq!(list.pop_left().unwrap_or_default(), 0);
    assert_eq!(list.pop_right().unwrap_or_default(), 0);
    assert_eq!(list.get(0), 0);
    assert_eq!(list.size(), 0);
}

// ── Ownership and teardown ──────────────────────────────────────────

#[test]
fn every_node_block_is_released() {
    let mut list = checked();
    list.push_all(0..100);
    list.delete_by(|v| v % 3 == 0);
    list.shrink(20);
    list.delete(-1);
    let stats = list.arena().stats();
    assert_eq!(stats.live_blocks, list.size());
    assert_eq!(stats.total_allocations, 100);
    assert_eq!(stats.total_frees, 100 - list.size() as u64);
    assert_eq!(
        stats.live_bytes,
        list.size() * XorList::<i32>::node_footprint()
    );
    list.free();
    assert_eq!(list.arena().stats().live_blocks, 0);
}

#[test]
fn payloads_are_dropped_exactly_once() {
    let tally = DropTally::new();
    let mut list = checked();
    for id in 0..8 {
        list.push(tally.spawn(id));
    }

    let popped = list.pop_left();
    assert_eq!(tally.dropped(), 0);
    drop(popped);
    assert_eq!(tally.dropped(), 1);

    assert_eq!(list.delete_by(|c| c.id % 2 == 1), 4);
    assert_eq!(tally.dropped(), 5);

    list.shrink(1);
    assert_eq!(tally.dropped(), 7);

    drop(list);
    assert_eq!(tally.dropped(), 8);
}

#[test]
fn drop_without_free_releases_nodes() {
    let tally = DropTally::new();
    {
        let mut list = checked();
        list.push_all((0..5).map(|id| tally.spawn(id)));
    }
    assert_eq!(tally.dropped(), 5);
}

#[test]
fn into_iter_leftovers_are_dropped() {
    let tally = DropTally::new();
    let mut list = checked();
    list.push_all((0..4).map(|id| tally.spawn(id)));
    let mut it = list.into_iter();
    let first = it.next().unwrap();
    assert_eq!(first.id, 0);
    drop(it);
    assert_eq!(tally.dropped(), 3);
    drop(first);
    assert_eq!(tally.dropped(), 4);
}

#[test]
fn list_survives_being_moved() {
    let mut list = checked();
    list.push_all(["x".to_string(), "y".to_string()]);
    let boxed = Box::new(list);
    let mut list = *boxed;
    list.push("z".to_string());
    assert_eq!(list.to_vec(), vec!["x", "y", "z"]);
}

#[test]
fn list_can_cross_threads() {
    let mut list: XorList<String> = XorList::new();
    list.push_all(["a", "b", "c"].map(String::from));
    let handle = std::thread::spawn(move || {
        list.push("d".to_string());
        list.to_vec()
    });
    assert_eq!(handle.join().unwrap(), vec!["a", "b", "c", "d"]);
}

// ── Join / merge / filter ───────────────────────────────────────────

#[test]
fn join_keeps_operand_independently_owned() {
    let mut a = checked();
    let mut b = checked();
    a.push_all([1, 2]);
    b.push_all([3, 4]);
    a.join(&b);
    b.free();
    assert_eq!(a.to_vec(), vec![1, 2, 3, 4]);
    assert_eq!(b.arena().stats().live_blocks, 0);
    assert_eq!(a.arena().stats().live_blocks, 4);
}

#[test]
fn merge_and_filter_allocate_in_fresh_arenas() {
    let mut a = checked();
    a.push_all(1..=6);
    let mut b = checked();
    b.push_all(7..=9);

    let merged = a.merge(&b);
    let odd = merged.filter(|v| v % 2 == 1);
    assert_eq!(merged.to_vec(), (1..=9).collect::<Vec<_>>());
    assert_eq!(odd.to_vec(), vec![1, 3, 5, 7, 9]);
    assert_eq!(merged.arena().stats().live_blocks, 9);
    assert_eq!(odd.arena().stats().live_blocks, 5);
    assert_eq!(a.arena().stats().live_blocks, 6);
    assert!(merged.arena().config().track_blocks);
}

// ── Allocation failure ──────────────────────────────────────────────

#[test]
fn try_push_hands_value_back_when_exhausted() {
    init_tracing();
    let (arena, source) = failing_arena(2);
    let mut list = XorList::with_arena(arena);
    list.try_push(1).unwrap();
    list.try_push_front(0).unwrap();

    let err = list.try_push(2).unwrap_err();
    assert!(matches!(err, ListError::AllocationFailed { .. }));
    assert_eq!(err.into_value(), 2);
    assert_eq!(list.to_vec(), vec![0, 1]);
    assert_eq!(list.arena().stats().failed_allocations, 1);

    source.refill(1);
    let handle = list.try_insert(2).unwrap();
    assert_eq!(list.handle_of(-1), Some(handle));
    assert_eq!(list.to_vec(), vec![0, 1, 2]);
}

#[test]
fn try_insert_front_on_empty_exhausted_list_leaves_it_empty() {
    let (arena, _source) = failing_arena(0);
    let mut list: XorList<String, _> = XorList::with_arena(arena);
    let err = list.try_insert_front("lost".to_string()).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!(
            "node allocation failed: requested {} bytes",
            XorList::<String>::node_footprint()
        )
    );
    assert!(list.is_empty());
    assert_eq!(list.first(), None);
}

#[test]
fn clone_shares_failing_budget() {
    let (arena, source) = failing_arena(4);
    let mut list = XorList::with_arena(arena);
    list.push_all([1, 2]);
    let mut copy = list.clone();
    assert_eq!(source.remaining(), 0);
    assert_eq!(copy.to_vec(), vec![1, 2]);
    assert_eq!(copy.try_push(9).unwrap_err().into_value(), 9);
    assert!(list.try_push_front(0).is_err());
    assert_eq!(copy, list);
}

#[test]
fn default_arena_list_matches_checked_list() {
    let mut plain: XorList<i32> = XorList::with_arena(Arena::new());
    let mut strict = checked();
    for i in 0..16 {
        if i % 3 == 0 {
            plain.push_front(i);
            strict.push_front(i);
        } else {
            plain.push(i);
            strict.push(i);
        }
    }
    plain.delete(4);
    strict.delete(4);
    assert_eq!(plain, strict);
}

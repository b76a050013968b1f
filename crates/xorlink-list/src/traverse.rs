//! XOR neighbour reconstruction.
//!
//! The only code that interprets link words. A node stores
//! `prev ^ next`; knowing either neighbour recovers the other, so a walk
//! carries the node it came from and XORs it out at every step.

use xorlink_arena::Address;

use crate::node::NodeRef;

/// A node together with its forward-oriented neighbours.
///
/// `prev` is nearer the head, `next` nearer the tail; either may be null.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Position {
    pub(crate) prev: Address,
    pub(crate) cur: Address,
    pub(crate) next: Address,
}

/// The neighbour of `cur` that is not `from`.
///
/// # Safety
///
/// `cur` must be a live node and `from` one of its neighbours (null at an
/// end).
#[inline]
pub(crate) unsafe fn step<T>(from: Address, cur: Address) -> Address {
    // SAFETY: forwarded caller contract.
    unsafe { NodeRef::<T>::link(cur) ^ from }
}

/// Walk `hops` nodes away from the end node `start`.
///
/// Returns `(behind, at)`: the node reached and the one it was entered
/// from. Starting at `head` walks towards the tail; starting at `tail` walks
/// towards the head.
///
/// # Safety
///
/// `start` must be an end node of a well-formed list with more than `hops`
/// nodes.
unsafe fn walk<T>(start: Address, hops: usize) -> (Address, Address) {
    let (mut behind, mut at) = (Address::NULL, start);
    for _ in 0..hops {
        // SAFETY: fewer than `hops` steps stay inside the list.
        let ahead = unsafe { step::<T>(behind, at) };
        behind = at;
        at = ahead;
    }
    (behind, at)
}

/// Find the node at absolute position `index`, walking from whichever end
/// is nearer.
///
/// # Safety
///
/// `head`/`tail` must delimit a well-formed list of `size` nodes and
/// `index < size`.
pub(crate) unsafe fn locate<T>(head: Address, tail: Address, size: usize, index: usize) -> Position {
    debug_assert!(index < size);
    let from_tail = size - 1 - index;
    if index <= from_tail {
        // SAFETY: `index < size`.
        let (prev, cur) = unsafe { walk::<T>(head, index) };
        Position {
            prev,
            cur,
            // SAFETY: `cur` is live and `prev` its head-side neighbour.
            next: unsafe { step::<T>(prev, cur) },
        }
    } else {
        // SAFETY: `from_tail < size`.
        let (next, cur) = unsafe { walk::<T>(tail, from_tail) };
        Position {
            // SAFETY: `cur` is live and `next` its tail-side neighbour.
            prev: unsafe { step::<T>(next, cur) },
            cur,
            next,
        }
    }
}

/// Scan forward from `head` for the node at address `target`.
///
/// Only compares addresses, so `target` need not be live.
///
/// # Safety
///
/// `head` must start a well-formed, null-terminated list.
pub(crate) unsafe fn seek<T>(head: Address, target: Address) -> Option<Position> {
    let (mut prev, mut cur) = (Address::NULL, head);
    while !cur.is_null() {
        // SAFETY: `cur` is a live node reached by a forward walk.
        let next = unsafe { step::<T>(prev, cur) };
        if cur == target {
            return Some(Position { prev, cur, next });
        }
        prev = cur;
        cur = next;
    }
    None
}

/// Resolve a possibly negative index against `size`.
///
/// Negative indices count from the end (`-1` is the last element).
/// Returns `None` when the result falls outside `0..size`.
pub(crate) fn resolve(index: isize, size: usize) -> Option<usize> {
    let absolute = if index < 0 {
        size.checked_sub(index.unsigned_abs())?
    } else {
        index as usize
    };
    (absolute < size).then_some(absolute)
}

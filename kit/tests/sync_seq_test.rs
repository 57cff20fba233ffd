//! Tests for the synchronous sequence handle.
//!
//! Sources are instrumented with a shared pull counter so the tests can
//! check not only what a pipeline yields but how far it drove its source.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use seqkit::{Error, Seq, ascending, descending, wrap};

/// Wraps `items` so that every pull from the source bumps `pulls`.
fn counted<T: 'static>(items: Vec<T>, pulls: &Rc<Cell<usize>>) -> Seq<'static, T> {
    let pulls = Rc::clone(pulls);
    wrap(items.into_iter().inspect(move |_| pulls.set(pulls.get() + 1)))
}

/// Infinite ascending source with a pull counter.
fn counted_ascending(pulls: &Rc<Cell<usize>>) -> Seq<'static, i64> {
    let pulls = Rc::clone(pulls);
    ascending().tap(move |_| pulls.set(pulls.get() + 1))
}

// ============================================
// Construction and collect
// ============================================

#[test]
fn test_collect_preserves_order() {
    assert_eq!(wrap(vec![3, 1, 2]).collect(), vec![3, 1, 2]);
}

#[test]
fn test_collect_empty() {
    assert!(wrap(Vec::<u8>::new()).collect().is_empty());
}

#[test]
fn test_wrap_accepts_any_iterable() {
    assert_eq!(wrap([1, 2]).collect(), vec![1, 2]);
    assert_eq!(wrap(1..=3).collect(), vec![1, 2, 3]);
    assert_eq!(wrap("ab".chars()).collect(), vec!['a', 'b']);
    assert_eq!(Seq::new(vec!["x"]).collect(), vec!["x"]);
}

#[test]
fn test_seq_wraps_seq() {
    let inner = wrap([1, 2, 3]).map(|n| n * 10);
    assert_eq!(wrap(inner).collect(), vec![10, 20, 30]);
}

// ============================================
// Laziness
// ============================================

#[test]
fn test_intermediates_pull_nothing() {
    let pulls = Rc::new(Cell::new(0));
    let other = Rc::new(Cell::new(0));
    let calls = Rc::new(Cell::new(0));

    let c1 = Rc::clone(&calls);
    let c2 = Rc::clone(&calls);
    let c3 = Rc::clone(&calls);
    let c4 = Rc::clone(&calls);
    let c5 = Rc::clone(&calls);
    let seq = counted(vec![1, 2, 3, 4], &pulls)
        .map(move |n| {
            c1.set(c1.get() + 1);
            n + 1
        })
        .filter(move |_| {
            c2.set(c2.get() + 1);
            true
        })
        .tap(move |_| c3.set(c3.get() + 1))
        .skip(1)
        .take(3)
        .map(|n| vec![n])
        .flatten()
        .flat_map(move |n| {
            c4.set(c4.get() + 1);
            [n]
        })
        .intersperse(0)
        .enumerate()
        .zip(counted("abcdefghij".chars().collect(), &other))
        .zip_with(counted((10..20).collect(), &other), move |pair, n| {
            c5.set(c5.get() + 1);
            (pair, n)
        })
        .repeat();

    assert_eq!(pulls.get(), 0);
    assert_eq!(other.get(), 0);
    assert_eq!(calls.get(), 0);

    let out = seq.take(3).collect();
    assert_eq!(
        out,
        vec![(((3, 0), 'a'), 10), (((0, 1), 'b'), 11), (((4, 2), 'c'), 12)]
    );
    assert_eq!(pulls.get(), 3);
    assert_eq!(other.get(), 6);
}

#[test]
fn test_flat_map_callback_runs_only_when_pulled() {
    let calls = Rc::new(Cell::new(0));
    let c = Rc::clone(&calls);
    let seq = wrap([1, 2, 3]).flat_map(move |n| {
        c.set(c.get() + 1);
        vec![n; 2]
    });
    assert_eq!(calls.get(), 0);

    assert_eq!(seq.take(3).collect(), vec![1, 1, 2]);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_tap_runs_once_per_pulled_element() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    let out = wrap([1, 2, 3, 4])
        .tap(move |n| s.borrow_mut().push(*n))
        .take(2)
        .collect();

    assert_eq!(out, vec![1, 2]);
    assert_eq!(*seen.borrow(), vec![1, 2]);
}

// ============================================
// take / skip
// ============================================

#[test_case::test_case(vec![1, 2, 3], 0, vec![]; "zero takes nothing")]
#[test_case::test_case(vec![1, 2, 3], 2, vec![1, 2]; "prefix")]
#[test_case::test_case(vec![1, 2, 3], 3, vec![1, 2, 3]; "exact length")]
#[test_case::test_case(vec![1, 2, 3], 10, vec![1, 2, 3]; "longer than source")]
#[test_case::test_case(vec![], 4, vec![]; "empty source")]
fn test_take_length(source: Vec<i32>, n: usize, expected: Vec<i32>) {
    assert_eq!(wrap(source).take(n).collect(), expected);
}

#[test]
fn test_take_never_over_pulls_infinite_source() {
    let pulls = Rc::new(Cell::new(0));
    let out = counted_ascending(&pulls).take(5).collect();
    assert_eq!(out, vec![1, 2, 3, 4, 5]);
    assert_eq!(pulls.get(), 5);
}

#[test]
fn test_take_zero_pulls_nothing() {
    let pulls = Rc::new(Cell::new(0));
    assert!(counted_ascending(&pulls).take(0).collect().is_empty());
    assert_eq!(pulls.get(), 0);
}

#[test_case::test_case(vec![1, 2, 3, 4], 0, vec![1, 2, 3, 4]; "zero skips nothing")]
#[test_case::test_case(vec![1, 2, 3, 4], 1, vec![2, 3, 4]; "drop head")]
#[test_case::test_case(vec![1, 2, 3, 4], 4, vec![]; "drop all")]
#[test_case::test_case(vec![1, 2], 5, vec![]; "fewer than n")]
fn test_skip_length(source: Vec<i32>, n: usize, expected: Vec<i32>) {
    assert_eq!(wrap(source).skip(n).collect(), expected);
}

#[test]
fn test_skip_then_take_on_infinite_source() {
    assert_eq!(ascending().skip(10).take(3).collect(), vec![11, 12, 13]);
}

// ============================================
// map / filter
// ============================================

#[test]
fn test_map_preserves_order_and_count() {
    assert_eq!(
        wrap(["a", "bb", "ccc"]).map(str::len).collect(),
        vec![1, 2, 3]
    );
}

#[test]
fn test_map_calls_once_per_element() {
    let calls = Rc::new(Cell::new(0));
    let c = Rc::clone(&calls);
    let total = wrap(1..=4)
        .map(move |n| {
            c.set(c.get() + 1);
            n * 2
        })
        .sum();
    assert_eq!(total, 20);
    assert_eq!(calls.get(), 4);
}

#[test]
fn test_filter_keeps_matching() {
    assert_eq!(
        wrap(1..=10).filter(|n| n % 3 == 0).collect(),
        vec![3, 6, 9]
    );
}

#[test]
fn test_filter_pulls_until_match() {
    let pulls = Rc::new(Cell::new(0));
    let first_big = counted(vec![1, 2, 30, 4, 50], &pulls)
        .filter(|n| *n > 10)
        .first();
    assert_eq!(first_big, Some(30));
    assert_eq!(pulls.get(), 3);
}

// ============================================
// flatten / flat_map
// ============================================

#[test]
fn test_flatten_raw_sequences() {
    let nested = vec![vec![1, 2, 3], vec![4, 5, 6]];
    assert_eq!(wrap(nested).flatten().collect(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_flatten_wrapped_sequences() {
    let nested = vec![wrap(vec![1, 2, 3]), wrap(vec![4, 5, 6])];
    assert_eq!(wrap(nested).flatten().collect(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_flatten_skips_empty_inners() {
    let nested = vec![vec![], vec![1], vec![], vec![2, 3], vec![]];
    assert_eq!(wrap(nested).flatten().collect(), vec![1, 2, 3]);
}

#[test]
fn test_flatten_drains_inner_before_next_outer() {
    let outer_pulls = Rc::new(Cell::new(0));
    let nested = counted(vec![vec![1, 2, 3], vec![4]], &outer_pulls);
    let out = nested.flatten().take(3).collect();
    assert_eq!(out, vec![1, 2, 3]);
    assert_eq!(outer_pulls.get(), 1);
}

#[test]
fn test_flat_map_returns_handles() {
    let out = wrap(1..=3usize)
        .flat_map(|n| ascending().take(n))
        .collect();
    assert_eq!(out, vec![1, 1, 2, 1, 2, 3]);
}

// ============================================
// repeat
// ============================================

#[test]
fn test_repeat_cycles_finite_source() {
    assert_eq!(
        wrap([1, 2, 3]).repeat().take(10).collect(),
        vec![1, 2, 3, 1, 2, 3, 1, 2, 3, 1]
    );
}

#[test_case::test_case(0; "zero")]
#[test_case::test_case(2; "partial first pass")]
#[test_case::test_case(4; "exact length")]
#[test_case::test_case(9; "two cycles and a remainder")]
#[test_case::test_case(12; "three full cycles")]
fn test_repeat_take_k(k: usize) {
    let source = vec!['a', 'b', 'c', 'd'];
    let expected: Vec<char> = source.iter().copied().cycle().take(k).collect();
    assert_eq!(wrap(source).repeat().take(k).collect(), expected);
}

#[test]
fn test_repeat_pulls_source_once() {
    let pulls = Rc::new(Cell::new(0));
    let out = counted(vec![1, 2], &pulls).repeat().take(9).collect();
    assert_eq!(out, vec![1, 2, 1, 2, 1, 2, 1, 2, 1]);
    // `inspect` sees elements only, not the end of the first pass
    assert_eq!(pulls.get(), 2);
}

#[test]
fn test_repeat_empty_is_empty() {
    assert!(wrap(Vec::<i32>::new()).repeat().collect().is_empty());
}

// ============================================
// zip / zip_with
// ============================================

#[test]
fn test_zip_stops_at_shorter() {
    let out = wrap([1, 2, 3]).zip(wrap(["a", "b", "c", "d", "e"])).collect();
    assert_eq!(out, vec![(1, "a"), (2, "b"), (3, "c")]);
}

#[test]
fn test_zip_with_infinite_side() {
    let out = wrap(["x", "y"]).zip(ascending()).collect();
    assert_eq!(out, vec![("x", 1), ("y", 2)]);
}

#[test]
fn test_zip_does_not_pull_other_when_self_ends() {
    let pulls = Rc::new(Cell::new(0));
    let out = wrap([1, 2]).zip(counted(vec![10, 20, 30], &pulls)).collect();
    assert_eq!(out, vec![(1, 10), (2, 20)]);
    assert_eq!(pulls.get(), 2);
}

#[test]
fn test_zip_with_combines() {
    let out = ascending()
        .zip_with(descending(), |a, b| a + b)
        .take(4)
        .collect();
    assert_eq!(out, vec![0, 0, 0, 0]);
}

// ============================================
// intersperse / enumerate
// ============================================

#[test_case::test_case(vec![], vec![]; "empty")]
#[test_case::test_case(vec![1], vec![1]; "single")]
#[test_case::test_case(vec![1, 2], vec![1, 0, 2]; "pair")]
#[test_case::test_case(vec![1, 2, 3], vec![1, 0, 2, 0, 3]; "triple")]
fn test_intersperse(source: Vec<i32>, expected: Vec<i32>) {
    assert_eq!(wrap(source).intersperse(0).collect(), expected);
}

#[test]
fn test_enumerate_pairs_element_then_index() {
    let out = wrap(["a", "b", "c"]).enumerate().collect();
    assert_eq!(out, vec![("a", 0), ("b", 1), ("c", 2)]);
}

#[test]
fn test_enumerate_counts_outputs_after_filter() {
    let out = wrap(1..=6).filter(|n| n % 2 == 0).enumerate().collect();
    assert_eq!(out, vec![(2, 0), (4, 1), (6, 2)]);
}

// ============================================
// Terminal operations
// ============================================

#[test]
fn test_nth() {
    assert_eq!(wrap([10, 20, 30]).nth(0), Some(10));
    assert_eq!(wrap([10, 20, 30]).nth(2), Some(30));
    assert_eq!(wrap([10, 20, 30]).nth(3), None);
    assert_eq!(wrap(Vec::<i32>::new()).nth(0), None);
}

#[test]
fn test_nth_does_not_materialize_rest() {
    let pulls = Rc::new(Cell::new(0));
    assert_eq!(counted_ascending(&pulls).nth(4), Some(5));
    assert_eq!(pulls.get(), 5);
}

#[test]
fn test_first_pulls_at_most_one() {
    let pulls = Rc::new(Cell::new(0));
    assert_eq!(counted(vec![7, 8, 9], &pulls).first(), Some(7));
    assert_eq!(pulls.get(), 1);
    assert_eq!(wrap(Vec::<i32>::new()).first(), None);
}

#[test]
fn test_any_short_circuits() {
    let pulls = Rc::new(Cell::new(0));
    assert!(counted(vec![3, 4, 5, 6, 7], &pulls).any(|n| n % 2 == 0));
    assert_eq!(pulls.get(), 2);
}

#[test]
fn test_any_none_match_drains() {
    let pulls = Rc::new(Cell::new(0));
    assert!(!counted(vec![1, 3, 5], &pulls).any(|n| n % 2 == 0));
    assert_eq!(pulls.get(), 3);
}

#[test]
fn test_all_short_circuits() {
    let pulls = Rc::new(Cell::new(0));
    assert!(!counted(vec![2, 4, 5, 6, 8], &pulls).all(|n| n % 2 == 0));
    assert_eq!(pulls.get(), 3);
}

#[test]
fn test_all_every_match_drains() {
    let pulls = Rc::new(Cell::new(0));
    assert!(counted(vec![2, 4, 6], &pulls).all(|n| n % 2 == 0));
    assert_eq!(pulls.get(), 3);
}

#[test]
fn test_any_all_on_empty() {
    assert!(!wrap(Vec::<i32>::new()).any(|_| true));
    assert!(wrap(Vec::<i32>::new()).all(|_| false));
}

#[test]
fn test_fold_left_to_right() {
    let out = wrap(["a", "b", "c"]).fold(String::new(), |mut acc, s| {
        acc.push_str(s);
        acc
    });
    assert_eq!(out, "abc");
}

#[test]
fn test_sum_and_count() {
    assert_eq!(wrap([1, 2, 3]).sum(), 6);
    assert_eq!(wrap(Vec::<i32>::new()).sum(), 0);
    assert_eq!(wrap([1, 2, 3]).count(), 3);
    assert_eq!(wrap(Vec::<i32>::new()).count(), 0);
}

#[test]
fn test_for_each_visits_in_order() {
    let mut seen = Vec::new();
    wrap([3, 2, 1]).for_each(|n| seen.push(n));
    assert_eq!(seen, vec![3, 2, 1]);
}

// ============================================
// Fallible pipelines
// ============================================

#[test]
fn test_try_collect_ok() {
    let parsed = wrap(["1", "2", "3"]).map(|s| s.parse::<i32>()).try_collect();
    assert_eq!(parsed, Ok(vec![1, 2, 3]));
}

#[test]
fn test_try_collect_stops_at_first_err() {
    let pulls = Rc::new(Cell::new(0));
    let result = counted(vec![Ok(1), Err("bad"), Ok(3), Err("worse")], &pulls).try_collect();
    assert_eq!(result, Err(Error::Element { index: 1, error: "bad" }));
    assert_eq!(pulls.get(), 2);
}

#[test]
fn test_try_for_each_stops_at_first_err() {
    let mut seen = Vec::new();
    let result = wrap([1, 2, 3, 4]).try_for_each(|n| {
        if n == 3 {
            return Err(format!("rejected {n}"));
        }
        seen.push(n);
        Ok(())
    });
    assert_eq!(seen, vec![1, 2]);
    let err = result.unwrap_err();
    assert_eq!(err.index(), 2);
    assert_eq!(err.to_string(), "element 2 failed: rejected 3");
}

// ============================================
// Shared sources
// ============================================

#[test]
fn test_borrowed_source_is_a_shared_cursor() {
    let mut source = vec![1, 2, 3, 4, 5].into_iter();
    assert_eq!(wrap(source.by_ref()).take(2).collect(), vec![1, 2]);
    assert_eq!(wrap(source.by_ref()).first(), Some(3));
    assert_eq!(wrap(source).collect(), vec![4, 5]);
}

#[test]
#[should_panic(expected = "boom")]
fn test_callback_panic_propagates() {
    wrap([1, 2, 3])
        .map(|n| if n == 2 { panic!("boom") } else { n })
        .collect();
}

use super::*;
use crossbeam::scope;
use proptest::prelude::*;

fn array_of(values: &[i32]) -> DynamicArray {
    DynamicArray::from_slice(values).unwrap()
}

#[test]
fn test_new_has_default_capacity() {
    let v = DynamicArray::new().unwrap();
    assert_eq!(v.len(), 0);
    assert_eq!(v.capacity(), INIT_CAPACITY);
    assert!(v.is_empty());
    assert!(!v.is_full());
}

#[test]
fn test_basic_push_pop() {
    let mut v = DynamicArray::new().unwrap();
    v.push_back(1).unwrap();
    v.push_back(2).unwrap();
    v.push_back(3).unwrap();
    assert_eq!(v.len(), 3);
    assert_eq!(v[0], 1);
    assert_eq!(v[1], 2);
    assert_eq!(v[2], 3);
    assert_eq!(v.pop(), Ok(3));
    assert_eq!(v.pop(), Ok(2));
    assert_eq!(v.pop(), Ok(1));
    assert_eq!(v.pop(), Err(ArrayError::Empty));
}

#[test]
fn test_pop_returns_last_element_not_slot_past_it() {
    // erase 末尾元素后，len 之后的槽位里还留着旧值 99
    let mut v = array_of(&[7, 8, 99]);
    v.resize(3).unwrap();
    v.erase(2).unwrap();
    assert_eq!(v.pop(), Ok(8));
    assert_eq!(v.as_slice(), &[7]);
}

#[test]
fn test_growth_doubles_capacity() {
    let mut v = DynamicArray::new().unwrap();
    let mut seen = vec![v.capacity()];
    for i in 0..17 {
        v.push_back(i).unwrap();
        if *seen.last().unwrap() != v.capacity() {
            seen.push(v.capacity());
        }
    }
    assert_eq!(seen, vec![4, 8, 16, 32]);
}

#[test]
fn test_get_set_checked() {
    let mut v = array_of(&[1, 2, 3]);
    assert_eq!(v.get(2), Ok(3));
    assert_eq!(
        v.get(3),
        Err(ArrayError::IndexOutOfRange { index: 3, len: 3 })
    );
    v.set(0, 10).unwrap();
    assert_eq!(v.get(0), Ok(10));
    assert_eq!(
        v.set(5, 1),
        Err(ArrayError::IndexOutOfRange { index: 5, len: 3 })
    );
}

#[test]
fn test_get_set_unchecked() {
    let mut v = array_of(&[4, 5]);
    unsafe {
        v.set_unchecked(1, 50);
        assert_eq!(v.get_unchecked(1), 50);
    }
}

#[test]
fn test_erase_then_insert_scenario() {
    let mut v = array_of(&[1, 2, 3]);
    assert_eq!(v.erase(1), Ok(2));
    assert_eq!(v.as_slice(), &[1, 3]);
    v.insert(1, 9).unwrap();
    assert_eq!(v.as_slice(), &[1, 9, 3]);
}

#[test]
fn test_insert_at_front_and_when_full() {
    let mut v = array_of(&[1, 2, 3, 4]);
    assert!(v.is_full());
    v.insert(0, 0).unwrap();
    assert_eq!(v.as_slice(), &[0, 1, 2, 3, 4]);
    assert_eq!(v.capacity(), 8);
}

#[test]
fn test_insert_at_len_appends() {
    let mut v = array_of(&[1, 2]);
    v.insert(2, 3).unwrap();
    assert_eq!(v.as_slice(), &[1, 2, 3]);

    let mut empty = DynamicArray::new().unwrap();
    empty.insert(0, 42).unwrap();
    assert_eq!(empty.as_slice(), &[42]);
}

#[test]
fn test_out_of_bounds_insert() {
    let mut v = DynamicArray::new().unwrap();
    assert_eq!(
        v.insert(1, 10),
        Err(ArrayError::IndexOutOfRange { index: 1, len: 0 })
    );
    assert!(v.is_empty());
}

#[test]
fn test_out_of_bounds_erase() {
    let mut v = DynamicArray::new().unwrap();
    assert_eq!(
        v.erase(0),
        Err(ArrayError::IndexOutOfRange { index: 0, len: 0 })
    );
}

#[test]
fn test_remove_first_occurrence() {
    let mut v = array_of(&[3, 1, 3, 2]);
    assert_eq!(v.remove(3), Some(0));
    assert_eq!(v.as_slice(), &[1, 3, 2]);
    assert_eq!(v.remove(7), None);
    assert_eq!(v.as_slice(), &[1, 3, 2]);
}

#[test]
fn test_lsearch() {
    let v = array_of(&[5, 6, 5]);
    assert_eq!(v.lsearch(5), Some(0));
    assert_eq!(v.lsearch(6), Some(1));
    assert_eq!(v.lsearch(-1), None);
}

#[test]
fn test_bsearch_large_sequence() {
    let mut v = DynamicArray::new().unwrap();
    for i in 0..100_000 {
        v.push_back(i).unwrap();
    }
    assert_eq!(v.bsearch(255), Some(255));
    assert_eq!(v.bsearch(0), Some(0));
    assert_eq!(v.bsearch(99_999), Some(99_999));
    assert_eq!(v.bsearch(100_000), None);
    assert_eq!(v.bsearch(-1), None);
}

#[test]
fn test_bsearch_empty() {
    let v = DynamicArray::new().unwrap();
    assert_eq!(v.bsearch(1), None);
}

#[test]
fn test_sort_both_directions() {
    let mut v = array_of(&[5, 3, 1, 4]);
    v.sort(SortOrder::Ascending);
    assert_eq!(v.as_slice(), &[1, 3, 4, 5]);
    v.sort(SortOrder::Descending);
    assert_eq!(v.as_slice(), &[5, 4, 3, 1]);
    v.sort(true.into());
    assert_eq!(v.as_slice(), &[1, 3, 4, 5]);
}

#[test]
fn test_reverse() {
    let mut v = array_of(&[1, 2, 3, 4, 5]);
    v.reverse();
    assert_eq!(v.as_slice(), &[5, 4, 3, 2, 1]);
}

#[test]
fn test_concat() {
    let mut dest = array_of(&[1, 2]);
    let src = array_of(&[3, 4, 5]);
    dest.concat(&src).unwrap();
    assert_eq!(dest.as_slice(), &[1, 2, 3, 4, 5]);
    assert_eq!(src.as_slice(), &[3, 4, 5]);
    assert_eq!(dest.capacity(), 8);
}

#[test]
fn test_equals_ignores_capacity() {
    let a = array_of(&[1, 2, 3]);
    let mut b = DynamicArray::with_capacity(64).unwrap();
    for i in 1..=3 {
        b.push_back(i).unwrap();
    }
    assert!(a.equals(&b));
    assert_eq!(a, b);
    b.push_back(4).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_display() {
    assert_eq!(DynamicArray::new().unwrap().to_string(), "[]");
    assert_eq!(array_of(&[1, -2, 3]).to_string(), "[1, -2, 3]");
}

#[test]
fn test_resize_truncates() {
    let mut v = array_of(&[1, 2, 3, 4, 5, 6]);
    v.resize(3).unwrap();
    assert_eq!(v.capacity(), 3);
    assert_eq!(v.as_slice(), &[1, 2, 3]);
    v.resize(10).unwrap();
    assert_eq!(v.capacity(), 10);
    assert_eq!(v.as_slice(), &[1, 2, 3]);
}

#[test]
fn test_grow_and_shrink() {
    let mut v = DynamicArray::with_capacity(2).unwrap();
    assert_eq!(v.capacity(), 2);
    v.push_back(1).unwrap();
    v.push_back(2).unwrap();
    v.push_back(3).unwrap();
    assert_eq!(v.capacity(), 4);
    v.shrink_to_fit().unwrap();
    assert_eq!(v.capacity(), 3);
    v.pop().unwrap();
    v.pop().unwrap();
    v.pop().unwrap();
    v.shrink_to_fit().unwrap();
    assert_eq!(v.capacity(), 0);
    v.push_back(7).unwrap();
    assert_eq!(v.capacity(), INIT_CAPACITY);
    assert_eq!(v.as_slice(), &[7]);
}

#[test]
fn test_clear_small_keeps_capacity() {
    let mut v = DynamicArray::with_capacity(32).unwrap();
    for i in 0..4 {
        v.push_back(i).unwrap();
    }
    v.clear().unwrap();
    assert!(v.is_empty());
    assert_eq!(v.capacity(), 32);
}

#[test]
fn test_clear_large_resets_capacity() {
    let mut v = DynamicArray::new().unwrap();
    for i in 0..100 {
        v.push_back(i).unwrap();
    }
    v.clear().unwrap();
    assert!(v.is_empty());
    assert_eq!(v.capacity(), INIT_CAPACITY);
}

#[test]
fn test_try_reserve() {
    let mut v = DynamicArray::new().unwrap();
    assert!(v.try_reserve(10).is_ok());
    assert!(v.capacity() >= 10);
    assert_eq!(v.try_reserve(usize::MAX), Err(ArrayError::CapacityOverflow));
}

#[test]
fn test_huge_resize_fails_cleanly() {
    let mut v = array_of(&[1, 2]);
    assert!(v.resize(usize::MAX).is_err());
    assert_eq!(v.as_slice(), &[1, 2]);
    assert_eq!(v.capacity(), INIT_CAPACITY);
}

#[test]
fn test_clone_is_deep() {
    let a = array_of(&[1, 2, 3]);
    let mut b = a.clone();
    b.set(0, 100).unwrap();
    assert_eq!(a.as_slice(), &[1, 2, 3]);
    assert_eq!(b.as_slice(), &[100, 2, 3]);
}

#[test]
fn test_iterators() {
    let mut v = array_of(&[10, 20, 30]);

    let mut sum = 0;
    for &x in &v {
        sum += x;
    }
    assert_eq!(sum, 60);

    for x in &mut v {
        *x += 1;
    }
    assert_eq!(v[0], 11);

    let collected: Vec<i32> = v.into_iter().collect();
    assert_eq!(collected, vec![11, 21, 31]);
}

#[test]
fn test_shared_read_across_threads() {
    let v = array_of(&(0..100).collect::<Vec<_>>());

    scope(|s| {
        s.spawn(|_| assert_eq!(v.lsearch(42), Some(42)));
        s.spawn(|_| assert_eq!(v.bsearch(99), Some(99)));
    })
    .unwrap();
}

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Pop,
    Insert(usize, i32),
    Erase(usize),
    Resize(usize),
    ShrinkToFit,
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::Push),
        1 => Just(Op::Pop),
        2 => (0usize..40, any::<i32>()).prop_map(|(p, v)| Op::Insert(p, v)),
        1 => (0usize..40).prop_map(Op::Erase),
        1 => (0usize..40).prop_map(Op::Resize),
        1 => Just(Op::ShrinkToFit),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn prop_matches_vec_model_and_len_le_capacity(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut v = DynamicArray::new().unwrap();
        let mut model: Vec<i32> = Vec::new();

        for op in ops {
            match op {
                Op::Push(x) => {
                    v.push_back(x).unwrap();
                    model.push(x);
                }
                Op::Pop => {
                    prop_assert_eq!(v.pop().ok(), model.pop());
                }
                Op::Insert(p, x) => {
                    let res = v.insert(p, x);
                    if p <= model.len() {
                        prop_assert!(res.is_ok());
                        model.insert(p, x);
                    } else {
                        prop_assert!(res.is_err());
                    }
                }
                Op::Erase(p) => {
                    let res = v.erase(p);
                    if p < model.len() {
                        prop_assert_eq!(res, Ok(model.remove(p)));
                    } else {
                        prop_assert!(res.is_err());
                    }
                }
                Op::Resize(n) => {
                    v.resize(n).unwrap();
                    model.truncate(n);
                    prop_assert_eq!(v.capacity(), n);
                }
                Op::ShrinkToFit => {
                    v.shrink_to_fit().unwrap();
                    prop_assert_eq!(v.capacity(), v.len());
                }
                Op::Clear => {
                    v.clear().unwrap();
                    model.clear();
                }
            }
            prop_assert!(v.len() <= v.capacity());
            prop_assert_eq!(v.as_slice(), model.as_slice());
        }
    }

    #[test]
    fn prop_push_pop_duality(values in prop::collection::vec(any::<i32>(), 1..50), x in any::<i32>()) {
        let mut v = DynamicArray::from_slice(&values).unwrap();
        v.push_back(x).unwrap();
        prop_assert_eq!(v.pop(), Ok(x));
        prop_assert_eq!(v.as_slice(), values.as_slice());
    }

    #[test]
    fn prop_insert_erase_duality(values in prop::collection::vec(any::<i32>(), 1..50), pos in any::<prop::sample::Index>(), x in any::<i32>()) {
        let original = DynamicArray::from_slice(&values).unwrap();
        let mut v = original.clone();
        let pos = pos.index(values.len() + 1);
        v.insert(pos, x).unwrap();
        prop_assert_eq!(v.erase(pos), Ok(x));
        prop_assert_eq!(v, original);
    }

    #[test]
    fn prop_sort_orders_and_keeps_multiset(values in prop::collection::vec(any::<i32>(), 0..60)) {
        let mut expected = values.clone();
        expected.sort();

        let mut v = DynamicArray::from_slice(&values).unwrap();
        v.sort(SortOrder::Ascending);
        prop_assert_eq!(v.as_slice(), expected.as_slice());

        v.sort(SortOrder::Descending);
        expected.reverse();
        prop_assert_eq!(v.as_slice(), expected.as_slice());
    }

    #[test]
    fn prop_reverse_involution(values in prop::collection::vec(any::<i32>(), 0..60)) {
        let original = DynamicArray::from_slice(&values).unwrap();
        let mut v = original.clone();
        v.reverse();
        v.reverse();
        prop_assert_eq!(v, original);
    }

    #[test]
    fn prop_searches_agree(values in prop::collection::vec(-20i32..20, 0..60), needle in -25i32..25) {
        let mut v = DynamicArray::from_slice(&values).unwrap();
        v.sort(SortOrder::Ascending);
        match v.bsearch(needle) {
            Some(i) => {
                prop_assert_eq!(v.get(i), Ok(needle));
            }
            None => {
                prop_assert!(!values.contains(&needle));
            }
        }
        prop_assert_eq!(v.bsearch(needle).is_some(), v.lsearch(needle).is_some());
    }

    #[test]
    fn prop_concat_appends_in_order(a in prop::collection::vec(any::<i32>(), 0..40), b in prop::collection::vec(any::<i32>(), 0..40)) {
        let mut dest = DynamicArray::from_slice(&a).unwrap();
        let src = DynamicArray::from_slice(&b).unwrap();
        dest.concat(&src).unwrap();

        prop_assert_eq!(dest.len(), a.len() + b.len());
        prop_assert_eq!(&dest[..a.len()], a.as_slice());
        prop_assert_eq!(&dest[a.len()..], b.as_slice());
        prop_assert_eq!(src.as_slice(), b.as_slice());
    }
}

#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::RecencyList;

// Fuzz arbitrary operation sequences on RecencyList
//
// Ids handed out by push_back are kept (including stale ones) and replayed
// against remove and move_to_back.
fuzz_target!(|data: &[u8]| {
    let mut list: RecencyList<u8> = RecencyList::new();
    let mut ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let arg = pair[1];
        match pair[0] % 6 {
            0 => {
                let id = list.push_back(arg);
                ids.push(id);
                assert_eq!(list.back(), Some(&arg));
            },
            1 => {
                let old_len = list.len();
                if list.pop_front().is_some() {
                    assert_eq!(list.len(), old_len - 1);
                }
            },
            2 => {
                if !ids.is_empty() {
                    let id = ids[usize::from(arg) % ids.len()];
                    let live = list.contains(id);
                    assert_eq!(list.remove(id).is_some(), live);
                    assert!(!list.contains(id));
                }
            },
            3 => {
                if !ids.is_empty() {
                    let id = ids[usize::from(arg) % ids.len()];
                    let live = list.contains(id);
                    assert_eq!(list.move_to_back(id), live);
                    if live {
                        assert_eq!(list.back_id(), Some(id));
                    }
                }
            },
            4 => {
                assert_eq!(list.iter().count(), list.len());
            },
            5 => {
                list.clear();
                ids.clear();
                assert!(list.is_empty());
            },
            _ => unreachable!(),
        }

        if let Err(err) = list.check_invariants() {
            panic!("recency list corrupted: {err}");
        }
    }
});

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use hatetris::core::{CoreState, Rules, Well, WellState};
use hatetris::types::Move;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn non_locking_moves_and_collision_checks_are_allocation_free() {
    let rules = Rules::classic();
    let mut rows = vec![0u32; 20];
    rows[19] = 0b1011111111;
    let state = WellState {
        core: CoreState::new(Well::from_rows(rows)),
        piece: Some(rules.spawn(6)),
    };

    let mut last = state.clone();
    let allocs = with_alloc_counting(|| {
        for mv in [Move::Left, Move::Right, Move::Down, Move::Up, Move::Down] {
            last = rules.apply_move(&last, mv);
        }
    });

    assert_eq!(allocs, 0);
    assert!(last.piece.is_some());
    assert!(last.core.well.shares_rows(&state.core.well));

    // collision checks alone
    let well = rules.empty_well();
    let piece = rules.spawn(3);

    let mut hits = 0;
    let allocs = with_alloc_counting(|| {
        for mv in Move::ALL {
            if rules.try_move(&well, &piece, mv).is_some() {
                hits += 1;
            }
        }
    });

    assert_eq!(allocs, 0);
    // I at spawn cannot rotate above the top edge
    assert_eq!(hits, 3);
}

//! Enumerator behavior over whole games: determinism and cache
//! transparency.

use std::collections::HashSet;

use projectl::{Enumerator, GameState};

fn splitmix(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Two identically seeded games enumerate identically at every step.
#[test]
fn test_enumeration_is_deterministic() {
    let mut a = GameState::new(3, 7);
    let mut b = GameState::new(3, 7);
    let mut enum_a = Enumerator::new();
    let mut enum_b = Enumerator::new();

    let mut picker = 99u64;
    for _ in 0..80 {
        let candidates_a = enum_a.enumerate(&a);
        let candidates_b = enum_b.enumerate(&b);
        assert_eq!(candidates_a, candidates_b);
        if candidates_a.is_empty() {
            break;
        }
        let index = (splitmix(&mut picker) as usize) % candidates_a.len();
        let (action, _) = candidates_a[index].clone();
        a.step(&action).unwrap();
        b.step(&action).unwrap();
    }
}

/// A warm enumerator reports exactly what a fresh one reports, at every
/// state of a long playout. The memo tables are a pure speedup.
#[test]
fn test_warm_cache_is_transparent() {
    let mut state = GameState::new(2, 1234);
    let mut warm = Enumerator::new();

    let mut picker = 5u64;
    for _ in 0..60 {
        let warm_candidates = warm.enumerate(&state);
        let fresh_candidates = Enumerator::new().enumerate(&state);
        assert_eq!(warm_candidates, fresh_candidates);
        if warm_candidates.is_empty() {
            break;
        }
        let index = (splitmix(&mut picker) as usize) % warm_candidates.len();
        let (action, _) = warm_candidates[index].clone();
        state.step(&action).unwrap();
    }
}

/// No action is ever reported twice for one state.
#[test]
fn test_candidates_are_distinct() {
    let mut state = GameState::new(2, 77);
    let mut enumerator = Enumerator::new();

    let mut picker = 3u64;
    for _ in 0..60 {
        let candidates = enumerator.enumerate(&state);
        if candidates.is_empty() {
            break;
        }
        let mut seen = HashSet::new();
        for (action, _) in &candidates {
            assert!(seen.insert(action.clone()), "duplicate candidate {action}");
        }
        let index = (splitmix(&mut picker) as usize) % candidates.len();
        let (action, _) = candidates[index].clone();
        state.step(&action).unwrap();
    }
}

use etabot::sampler::{sample_line, UnsolicitedSampler};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

#[test]
fn test_never_returns_first_or_last_line() {
    let blob = "prompt echo\nline1\nline2\ntrailing";
    let mut rng = StdRng::seed_from_u64(1);
    let mut seen = HashSet::new();
    for _ in 0..500 {
        let line = sample_line(blob, false, &mut rng);
        assert!(line == "line1" || line == "line2", "got {line:?}");
        seen.insert(line);
    }
    assert_eq!(seen.len(), 2);
}

#[test]
fn test_single_line_fallback() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(sample_line("only line", false, &mut rng), "only line");
}

#[test]
fn test_keep_whole_preserves_lines() {
    let blob = "once upon a time\nthere was a frat\n\nthe end";
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(sample_line(blob, true, &mut rng), blob);
}

#[test]
fn test_same_seed_same_line() {
    let blob = "a\nb\nc\nd\ne\nf";
    let first = sample_line(blob, false, &mut StdRng::seed_from_u64(99));
    let second = sample_line(blob, false, &mut StdRng::seed_from_u64(99));
    assert_eq!(first, second);
}

#[test]
fn test_unsolicited_rate_over_ten_thousand_trials() {
    let sampler = UnsolicitedSampler::default();
    assert_eq!(sampler.chance_percent(), 10);
    let mut rng = StdRng::seed_from_u64(31337);
    let hits = (0..10_000).filter(|_| sampler.should_reply(&mut rng)).count();
    assert!((800..=1200).contains(&hits), "hit rate {hits}/10000");
}

#[test]
fn test_full_chance_always_fires() {
    let sampler = UnsolicitedSampler::new(100);
    let mut rng = StdRng::seed_from_u64(8);
    assert!((0..1000).all(|_| sampler.should_reply(&mut rng)));
}

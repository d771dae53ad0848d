//! Fixed text corpus for synthetic analyze traffic
//!
//! Fifteen pre-authored sentences spanning clearly positive, clearly
//! negative and neutral/ambiguous sentiment, so a run exercises the model's
//! decision boundary rather than one easy region.

/// The fixed sample corpus; one entry is chosen uniformly per iteration
pub const SAMPLE_TEXTS: [&str; 15] = [
    "I absolutely love this product! It's amazing!",
    "This is the worst experience I've ever had.",
    "The service was okay, nothing special.",
    "Fantastic quality and great customer support!",
    "Terrible product, complete waste of money.",
    "It's fine, meets my basic requirements.",
    "Outstanding innovation, highly recommended!",
    "Poor quality control, very disappointed.",
    "Average performance, could be improved.",
    "Incredible breakthrough in AI technology!",
    "Hate everything about this service.",
    "Love the user interface and features.",
    "Neutral opinion, works as expected.",
    "Exceptional value for money spent.",
    "Buggy software, needs major fixes.",
];

/// Pick one corpus text uniformly at random
pub fn sample(rng: &mut fastrand::Rng) -> &'static str {
    SAMPLE_TEXTS[rng.usize(..SAMPLE_TEXTS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_has_fifteen_texts() {
        assert_eq!(SAMPLE_TEXTS.len(), 15);
        assert!(SAMPLE_TEXTS.iter().all(|t| !t.trim().is_empty()));
    }

    #[test]
    fn test_sample_always_from_corpus() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..200 {
            let text = sample(&mut rng);
            assert!(SAMPLE_TEXTS.contains(&text));
        }
    }

    #[test]
    fn test_sample_covers_corpus_eventually() {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(sample(&mut rng));
        }
        assert_eq!(seen.len(), SAMPLE_TEXTS.len());
    }
}

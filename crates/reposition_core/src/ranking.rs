use std::cmp::Ordering;

/// A candidate paired with its score while it is being ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<T> {
    pub candidate: T,
    pub score: f64,
}

impl<T> ScoredCandidate<T> {
    pub fn new(candidate: T, score: f64) -> Self {
        Self { candidate, score }
    }
}

/// Descending by score; NaN sorts after every number.
fn by_score_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Sort by `(score desc, key asc)` and keep the first `n`.
pub fn rank_top_n<T, F>(
    mut candidates: Vec<ScoredCandidate<T>>,
    n: usize,
    key: F,
) -> Vec<ScoredCandidate<T>>
where
    F: Fn(&T) -> &str,
{
    let nan_scores = candidates.iter().filter(|c| c.score.is_nan()).count();
    if nan_scores > 0 {
        tracing::warn!(nan_scores, "NaN scores ranked last");
    }
    candidates.sort_by(|a, b| {
        by_score_desc(a.score, b.score).then_with(|| key(&a.candidate).cmp(key(&b.candidate)))
    });
    candidates.truncate(n);
    candidates
}

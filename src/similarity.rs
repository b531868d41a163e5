//! Cosine similarity between embedding vectors.

/// Cosine similarity of `a` and `b`, accumulated in `f64`.
///
/// Returns `0.0` when the lengths differ, when either slice is empty, or when
/// either vector has zero magnitude. Never fails.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f64, 0.0f64, 0.0f64), |(dot, na, nb), (&av, &bv)| {
                let av = f64::from(av);
                let bv = f64::from(bv);
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        // Rounding can push |cos| a hair past 1 for near-parallel inputs.
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}

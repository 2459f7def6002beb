/// Scales `v` to unit Euclidean length in place. Zero vectors are left untouched.
pub(crate) fn l2_normalize_in_place(v: &mut [f32]) {
    let norm_sq: f32 = v.iter().map(|x| x * x).sum();
    if norm_sq > 0.0 {
        let inv_norm = norm_sq.sqrt().recip();
        for x in v.iter_mut() {
            *x *= inv_norm;
        }
    }
}

/// Attention-masked mean pooling over a flattened `[batch, seq_len, hidden]` tensor.
///
/// Padding positions (mask `0`) are excluded. A row whose mask is entirely zero pools to
/// the zero vector, which the caller rejects as degenerate.
pub(crate) fn mean_pool(
    hidden: &[f32],
    attention_mask: &[i64],
    batch: usize,
    seq_len: usize,
    hidden_dim: usize,
) -> Vec<Vec<f32>> {
    let mut pooled = Vec::with_capacity(batch);
    for b in 0..batch {
        let mut sum = vec![0.0f32; hidden_dim];
        let mut count = 0usize;
        for t in 0..seq_len {
            if attention_mask[b * seq_len + t] == 0 {
                continue;
            }
            let base = (b * seq_len + t) * hidden_dim;
            for (acc, &value) in sum.iter_mut().zip(&hidden[base..base + hidden_dim]) {
                *acc += value;
            }
            count += 1;
        }
        if count > 0 {
            let inv = (count as f32).recip();
            for acc in &mut sum {
                *acc *= inv;
            }
        }
        pooled.push(sum);
    }
    pooled
}

/// An L2-normalized dense vector produced by the Embedding Generator.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    /// Wrap a vector that is already L2-normalized.
    ///
    /// Debug builds assert normalization so a misbehaving embedding model
    /// is caught close to the source rather than surfacing as a subtly
    /// wrong vector-search ranking.
    pub fn new(values: Vec<f32>) -> Self {
        debug_assert!(
            values.is_empty() || {
                let norm: f32 = values.iter().map(|v| v * v).sum::<f32>().sqrt();
                (norm - 1.0).abs() < 1e-3
            },
            "embedding is not L2-normalized"
        );
        Self(values)
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_normalized_vector() {
        let e = Embedding::new(vec![0.6, 0.8]);
        assert_eq!(e.dim(), 2);
    }

    #[test]
    #[should_panic(expected = "L2-normalized")]
    fn rejects_unnormalized_vector_in_debug() {
        let _ = Embedding::new(vec![1.0, 1.0, 1.0]);
    }
}

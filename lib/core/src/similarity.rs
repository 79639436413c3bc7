// All-pairs cosine similarity over a TF-IDF space
use crate::vector::SparseVector;
use rayon::prelude::*;

/// Dense, row-major N x N similarity matrix.
///
/// Row and column `i` belong to snapshot position `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    data: Vec<f32>,
}

impl SimilarityMatrix {
    /// Pairwise cosine of l2-normalized vectors (a plain dot product).
    /// Scores are clamped to [0, 1]; rows are computed in parallel.
    pub fn from_vectors(vectors: &[SparseVector]) -> Self {
        let size = vectors.len();
        let mut data = vec![0.0f32; size * size];
        if size == 0 {
            return Self { size, data };
        }

        data.par_chunks_mut(size)
            .enumerate()
            .for_each(|(i, row)| {
                let vi = &vectors[i];
                if vi.is_empty() {
                    return;
                }
                for (j, cell) in row.iter_mut().enumerate() {
                    // upper and lower halves share one evaluation order so the matrix is exactly symmetric
                    let (a, b) = if i <= j { (vi, &vectors[j]) } else { (&vectors[j], vi) };
                    *cell = a.dot(b).clamp(0.0, 1.0);
                }
            });

        Self { size, data }
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.size && j < self.size {
            Some(self.data[i * self.size + j])
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i < self.size {
            Some(&self.data[i * self.size..(i + 1) * self.size])
        } else {
            None
        }
    }

    /// Largest absolute difference against another matrix of the same size
    #[must_use]
    pub fn max_abs_diff(&self, other: &SimilarityMatrix) -> Option<f32> {
        if self.size != other.size {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f32::max),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfidf::TfIdfModel;

    #[test]
    fn test_matrix_properties() {
        let model = TfIdfModel::fit_transform(&["mouse", "mouse pad", "keyboard", ""]);
        let m = SimilarityMatrix::from_vectors(model.vectors());
        assert_eq!(m.size(), 4);

        for i in 0..4 {
            for j in 0..4 {
                let v = m.get(i, j).unwrap();
                assert!((0.0..=1.0).contains(&v));
                assert_eq!(v, m.get(j, i).unwrap());
            }
        }
        assert!((m.get(0, 0).unwrap() - 1.0).abs() < 1e-6);
        assert!(m.get(0, 1).unwrap() > 0.0);
        assert_eq!(m.get(0, 2).unwrap(), 0.0);
        // empty label has no self-similarity
        assert_eq!(m.get(3, 3).unwrap(), 0.0);
        assert!(m.get(4, 0).is_none());
    }

    #[test]
    fn test_empty_matrix() {
        let m = SimilarityMatrix::from_vectors(&[]);
        assert!(m.is_empty());
        assert!(m.row(0).is_none());
    }
}

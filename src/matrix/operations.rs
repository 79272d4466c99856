//! Операции над матрицами

use super::types::MatrixType;
use crate::error::{BenchError, Result};
use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Инициализирует пару квадратных матриц `size x size` в плоском виде
pub fn initialize_matrices<R: Rng + ?Sized>(
    matrix_type: MatrixType,
    size: usize,
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>) {
    fill_pair(matrix_type, size * size, 1.0, rng)
}

/// Инициализирует пару векторов длины `len`; случайные значения в [0, 100)
pub fn initialize_vectors<R: Rng + ?Sized>(
    matrix_type: MatrixType,
    len: usize,
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>) {
    fill_pair(matrix_type, len, 100.0, rng)
}

fn fill_pair<R: Rng + ?Sized>(
    matrix_type: MatrixType,
    len: usize,
    scale: f64,
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>) {
    match matrix_type {
        MatrixType::OnesAndTwos => (vec![1.0; len], vec![2.0; len]),
        MatrixType::ThreesAndFours => (vec![3.0; len], vec![4.0; len]),
        MatrixType::Random => {
            let dist = Uniform::new(0.0, scale);
            let a = (0..len).map(|_| dist.sample(rng)).collect();
            let b = (0..len).map(|_| dist.sample(rng)).collect();
            (a, b)
        }
    }
}

fn to_array(rows: &[Vec<f64>], name: &str) -> Result<Array2<f64>> {
    let cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != cols) {
        return Err(BenchError::ShapeMismatch(format!("matrix {name} is ragged")));
    }
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((rows.len(), cols), flat)
        .map_err(|e| BenchError::ShapeMismatch(format!("matrix {name}: {e}")))
}

/// Эталонное произведение `a * b` на CPU через ndarray
pub fn reference_multiply(a: &[Vec<f64>], b: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let a = to_array(a, "A")?;
    let b = to_array(b, "B")?;
    if a.ncols() != b.nrows() {
        return Err(BenchError::ShapeMismatch(format!(
            "{}x{} * {}x{}",
            a.nrows(),
            a.ncols(),
            b.nrows(),
            b.ncols()
        )));
    }
    let c = a.dot(&b);
    Ok(c.outer_iter().map(|row| row.to_vec()).collect())
}

/// Итог сравнения двух результатов
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultComparison {
    /// Число элементов, отличающихся больше чем на epsilon
    pub mismatches: usize,
    /// Максимальная разница среди таких элементов
    pub max_diff: f64,
}

impl ResultComparison {
    pub fn matches(&self) -> bool {
        self.mismatches == 0
    }
}

/// Сравнивает результаты поэлементно. Лишние элементы более длинного среза
/// считаются расхождениями.
pub fn compare_results(lhs: &[f64], rhs: &[f64], epsilon: f64) -> ResultComparison {
    let mut max_diff = 0.0f64;
    let mut mismatches = lhs.len().abs_diff(rhs.len());

    for (x, y) in lhs.iter().zip(rhs) {
        let diff = (x - y).abs();
        if diff > epsilon || diff.is_nan() {
            mismatches += 1;
            max_diff = max_diff.max(diff);
        }
    }

    ResultComparison { mismatches, max_diff }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn constant_matrices() {
        let mut rng = StdRng::seed_from_u64(1);
        let (a, b) = initialize_matrices(MatrixType::ThreesAndFours, 3, &mut rng);
        assert_eq!(a, vec![3.0; 9]);
        assert_eq!(b, vec![4.0; 9]);
    }

    #[test]
    fn random_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let (a, b) = initialize_matrices(MatrixType::Random, 16, &mut rng);
        assert_eq!(a.len(), 256);
        assert!(a.iter().chain(&b).all(|v| (0.0..1.0).contains(v)));

        let (a, b) = initialize_vectors(MatrixType::Random, 1000, &mut rng);
        assert_eq!(b.len(), 1000);
        assert!(a.iter().chain(&b).all(|v| (0.0..100.0).contains(v)));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let first = initialize_vectors(MatrixType::Random, 32, &mut StdRng::seed_from_u64(42));
        let second = initialize_vectors(MatrixType::Random, 32, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn reference_product() {
        let a = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let b = vec![vec![5.0, 6.0], vec![7.0, 8.0]];
        let c = reference_multiply(&a, &b).unwrap();
        assert_eq!(c, vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
    }

    #[test]
    fn reference_rejects_bad_shapes() {
        let a = vec![vec![1.0, 2.0, 3.0]];
        let b = vec![vec![1.0], vec![2.0]];
        assert!(matches!(reference_multiply(&a, &b), Err(BenchError::ShapeMismatch(_))));

        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(reference_multiply(&ragged, &b).is_err());
    }

    #[test]
    fn comparison_counts() {
        let cmp = compare_results(&[1.0, 2.0, 3.0], &[1.0, 2.5, 3.0], 1e-9);
        assert_eq!(cmp.mismatches, 1);
        assert!((cmp.max_diff - 0.5).abs() < 1e-12);
        assert!(!cmp.matches());

        let cmp = compare_results(&[1.0, 2.0], &[1.0, 2.0, 3.0], 1e-9);
        assert_eq!(cmp.mismatches, 1);

        assert!(compare_results(&[0.1], &[0.1 + 1e-12], 1e-9).matches());
    }
}

//! Модуль для работы с матрицами
//!
//! Предоставляет:
//! - Типы матриц
//! - Разбиение плоского массива на строки
//! - Генерацию входных данных и эталонное умножение
//! - Ядра для матричного умножения и сложения векторов

mod types;
pub mod chunk;
pub mod operations;
pub mod kernels;

pub use types::MatrixType;
pub use chunk::{flatten, split_array};
pub use operations::{
    compare_results, initialize_matrices, initialize_vectors, reference_multiply, ResultComparison,
};
pub use kernels::{MATRIX_MULTIPLY, VECTOR_ADD};

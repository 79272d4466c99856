//! Ядра для матричных операций
//!
//! Каждое ядро описано дважды: функцией для режима "cpu" и исходником
//! OpenCL C для режима "gpu". Обе версии считают один элемент выхода.

use crate::compute::{ArgKind, KernelArg, KernelFunction, Thread};

/// Умножение матриц: `out[y][x] = sum_i A[y][i] * B[i][x]`
pub static MATRIX_MULTIPLY: KernelFunction = KernelFunction {
    name: "matrix_multiply",
    params: &[ArgKind::Matrix, ArgKind::Matrix],
    square: true,
    body: matrix_multiply_body,
    opencl_source: MATRIX_MULTIPLY_SOURCE,
};

/// Поэлементное сложение векторов: `out[x] = a[x] + b[x]`
pub static VECTOR_ADD: KernelFunction = KernelFunction {
    name: "vector_add",
    params: &[ArgKind::Vector, ArgKind::Vector],
    square: false,
    body: vector_add_body,
    opencl_source: VECTOR_ADD_SOURCE,
};

// Выход за границы даёт NaN, а не панику
fn matrix_multiply_body(thread: &Thread, args: &[KernelArg<'_>]) -> f64 {
    let (a, b) = (args[0].matrix(), args[1].matrix());
    let Some(row) = a.get(thread.y) else {
        return f64::NAN;
    };
    row.iter()
        .enumerate()
        .map(|(i, value)| {
            let other = b.get(i).and_then(|r| r.get(thread.x)).copied();
            value * other.unwrap_or(f64::NAN)
        })
        .sum()
}

fn vector_add_body(thread: &Thread, args: &[KernelArg<'_>]) -> f64 {
    let (a, b) = (args[0].vector(), args[1].vector());
    match (a.get(thread.x), b.get(thread.x)) {
        (Some(x), Some(y)) => x + y,
        _ => f64::NAN,
    }
}

/// Аргументы: входы, выход, ширина и высота выхода.
/// Матрицы квадратные, внутренняя размерность равна ширине.
pub const MATRIX_MULTIPLY_SOURCE: &str = r#"
#pragma OPENCL EXTENSION cl_khr_fp64 : enable

__kernel void matrix_multiply(
    __global const double* a,
    __global const double* b,
    __global double* out,
    const int width,
    const int height
) {
    const int x = get_global_id(0);
    const int y = get_global_id(1);
    if (x >= width || y >= height) return;

    double sum = 0.0;
    for (int i = 0; i < width; i++) {
        sum = fma(a[y * width + i], b[i * width + x], sum);
    }
    out[y * width + x] = sum;
}
"#;

pub const VECTOR_ADD_SOURCE: &str = r#"
#pragma OPENCL EXTENSION cl_khr_fp64 : enable

__kernel void vector_add(
    __global const double* a,
    __global const double* b,
    __global double* out,
    const int width,
    const int height
) {
    const int x = get_global_id(0);
    if (x >= width) return;
    out[x] = a[x] + b[x];
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_body_single_element() {
        let a = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let b = vec![vec![5.0, 6.0], vec![7.0, 8.0]];
        let args = [KernelArg::Matrix(&a), KernelArg::Matrix(&b)];
        assert_eq!((MATRIX_MULTIPLY.body)(&Thread { x: 1, y: 0 }, &args), 22.0);
        assert_eq!((MATRIX_MULTIPLY.body)(&Thread { x: 0, y: 1 }, &args), 43.0);
    }

    #[test]
    fn out_of_range_is_nan() {
        let a = vec![1.0];
        let b = vec![2.0];
        let args = [KernelArg::Vector(&a), KernelArg::Vector(&b)];
        assert_eq!((VECTOR_ADD.body)(&Thread { x: 0, y: 0 }, &args), 3.0);
        assert!((VECTOR_ADD.body)(&Thread { x: 5, y: 0 }, &args).is_nan());
    }

    #[test]
    fn sources_name_their_entry_points() {
        assert!(MATRIX_MULTIPLY.opencl_source.contains("__kernel void matrix_multiply("));
        assert!(VECTOR_ADD.opencl_source.contains("__kernel void vector_add("));
    }
}

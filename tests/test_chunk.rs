//! Интеграционные тесты разбиения плоского массива на строки

use gpu_bench::matrix::{flatten, split_array};
use gpu_bench::BenchError;

#[test]
fn five_by_two() {
    let rows = split_array(&[1, 2, 3, 4, 5], 2).unwrap();
    assert_eq!(rows, vec![vec![1, 2], vec![3, 4], vec![5]]);
}

#[test]
fn square_matrix_layout() {
    // 3×3 по строкам:
    //  [0, 1, 2]
    //  [3, 4, 5]
    //  [6, 7, 8]
    let flat: Vec<f64> = (0..9).map(f64::from).collect();
    let rows = split_array(&flat, 3).unwrap();
    assert_eq!(rows[1], vec![3.0, 4.0, 5.0]);
    assert_eq!(rows[2][0], 6.0);
}

#[test]
fn round_trip_for_all_parts() {
    let data: Vec<i64> = (0..101).map(|v| v * 7 - 300).collect();
    for part in 1..=120 {
        let rows = split_array(&data, part).unwrap();
        assert_eq!(rows.len(), data.len().div_ceil(part));
        assert_eq!(flatten(&rows), data, "part={part}");
    }
}

#[test]
fn zero_part_is_invalid_argument() {
    match split_array(&[1.0, 2.0], 0) {
        Err(BenchError::InvalidChunkSize(0)) => {}
        other => panic!("unexpected {other:?}"),
    }
}

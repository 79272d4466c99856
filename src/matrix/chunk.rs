//! Разбиение плоского массива на строки фиксированной длины

use crate::error::{BenchError, Result};

/// Делит `array` на подряд идущие чанки длиной `part`.
///
/// Последний чанк короче, если длина не кратна `part`. `part == 0` отклоняется.
pub fn split_array<T: Clone>(array: &[T], part: usize) -> Result<Vec<Vec<T>>> {
    if part == 0 {
        return Err(BenchError::InvalidChunkSize(part));
    }
    Ok(array.chunks(part).map(<[T]>::to_vec).collect())
}

/// Склеивает строки обратно в плоский массив
pub fn flatten<T: Clone>(rows: &[Vec<T>]) -> Vec<T> {
    rows.iter().flatten().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uneven_split() {
        let rows = split_array(&[1, 2, 3, 4, 5], 2).unwrap();
        assert_eq!(rows, vec![vec![1, 2], vec![3, 4], vec![5]]);
    }

    #[test]
    fn even_split() {
        let data: Vec<u32> = (0..12).collect();
        let rows = split_array(&data, 4).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.len() == 4));
        assert_eq!(rows[2], vec![8, 9, 10, 11]);
    }

    #[test]
    fn zero_part_rejected() {
        let err = split_array(&[1, 2, 3], 0).unwrap_err();
        assert!(matches!(err, BenchError::InvalidChunkSize(0)));
    }

    #[test]
    fn empty_input() {
        let rows = split_array::<f64>(&[], 3).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn part_larger_than_input() {
        let rows = split_array(&["a", "b"], 10).unwrap();
        assert_eq!(rows, vec![vec!["a", "b"]]);
    }

    #[test]
    fn chunk_count_and_lengths() {
        for len in 0..40usize {
            let data: Vec<usize> = (0..len).collect();
            for part in 1..=9 {
                let rows = split_array(&data, part).unwrap();
                assert_eq!(rows.len(), len.div_ceil(part), "len={len} part={part}");
                if let Some((last, full)) = rows.split_last() {
                    assert!(full.iter().all(|row| row.len() == part));
                    assert!(!last.is_empty() && last.len() <= part);
                }
                assert_eq!(flatten(&rows), data);
            }
        }
    }
}

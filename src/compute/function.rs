//! Описание ядра и его аргументов

use std::fmt;

/// Индекс вычисляемого элемента выхода
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Thread {
    pub x: usize,
    pub y: usize,
}

/// Вид аргумента ядра
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Vector,
    Matrix,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgKind::Vector => f.write_str("vector"),
            ArgKind::Matrix => f.write_str("matrix"),
        }
    }
}

/// Аргумент ядра: плоский вектор или матрица по строкам
#[derive(Debug, Clone, Copy)]
pub enum KernelArg<'a> {
    Vector(&'a [f64]),
    Matrix(&'a [Vec<f64>]),
}

impl<'a> KernelArg<'a> {
    pub fn kind(&self) -> ArgKind {
        match self {
            KernelArg::Vector(_) => ArgKind::Vector,
            KernelArg::Matrix(_) => ArgKind::Matrix,
        }
    }

    /// Пустой срез, если аргумент не вектор
    pub fn vector(&self) -> &'a [f64] {
        match *self {
            KernelArg::Vector(values) => values,
            KernelArg::Matrix(_) => &[],
        }
    }

    /// Пустой срез, если аргумент не матрица
    pub fn matrix(&self) -> &'a [Vec<f64>] {
        match *self {
            KernelArg::Matrix(rows) => rows,
            KernelArg::Vector(_) => &[],
        }
    }

    /// Построчная развёртка для передачи в буфер устройства
    pub fn to_flat(&self) -> Vec<f64> {
        match self {
            KernelArg::Vector(values) => values.to_vec(),
            KernelArg::Matrix(rows) => crate::matrix::flatten(rows),
        }
    }
}

/// Ядро: функция одного элемента для CPU и исходник OpenCL C для GPU.
///
/// OpenCL-функция `name` принимает буферы входов в порядке `params`, затем
/// буфер выхода, затем `int width` и `int height`.
#[derive(Clone, Copy)]
pub struct KernelFunction {
    pub name: &'static str,
    pub params: &'static [ArgKind],
    /// Выход квадратный; внутренняя размерность матриц равна ширине
    pub square: bool,
    pub body: fn(&Thread, &[KernelArg<'_>]) -> f64,
    pub opencl_source: &'static str,
}

impl fmt::Debug for KernelFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KernelFunction")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

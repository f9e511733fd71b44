//! Proximal operator of the sorted-L1 (OSCAR/SLOPE) penalty.
//!
//! For `y` sorted in non-increasing order and a non-increasing, non-negative
//! weight vector `lambda`, [`prox_sorted_l1`] computes
//! \\(\arg\min_x \frac12\|x-y\|^2 + \sum_i \lambda_i |x|_{(i)}\\)
//! in a single pass, pooling adjacent positions into blocks of equal value
//! and clipping negative block values to zero.
//!
//! ```
//! use ndarray::array;
//! use proxsl1::prox_sorted_l1;
//!
//! let y = array![3., 1., 1.];
//! let lambda = array![2., 1., 0.];
//! let x = prox_sorted_l1(&y.view(), &lambda.view(), None).unwrap();
//! assert_eq!(x, array![1., 0.5, 0.5]);
//! ```

mod prox_error;
mod prox_sorted_l1;
mod evaluator;
pub mod validate;
pub mod penalty;

pub use crate::prox_error::{ProxError, ProxErrorKind};
pub use crate::prox_sorted_l1::{pool_blocks, prox_sorted_l1, Block};
pub use crate::evaluator::{ProxInfo, ProxParam, ProxSortedL1};

#[cfg(feature = "python")]
use ndarray::Array1;
#[cfg(feature = "python")]
use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
#[cfg(feature = "python")]
use pyo3::{
    exceptions::{PyMemoryError, PyValueError},
    prelude::*,
};

#[cfg(feature = "python")]
fn to_py_error(e: ProxError) -> PyErr {
    match e.kind() {
        ProxErrorKind::ResourceExhausted => PyMemoryError::new_err(e.to_string()),
        ProxErrorKind::InvalidArgument => PyValueError::new_err(e.to_string()),
    }
}

/// Proximal operator of the sorted-L1 penalty.
///
/// Parameters
/// ==========
/// y: ndarray of float
///     Input values sorted in non-increasing order.
/// lam: ndarray of float
///     Non-increasing, non-negative weights of the same length as `y`.
/// order: ndarray of int, optional
///     0-based original position of each sorted value.
///     When given, the result is returned in original order.
/// strict: bool
///     Verify sortedness, weights and permutation before evaluating.
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(signature = (y, lam, order=None, strict=false))]
fn _prox_sorted_l1<'py>(
    py: Python<'py>,
    y: PyReadonlyArray1<'py, f64>,
    lam: PyReadonlyArray1<'py, f64>,
    order: Option<PyReadonlyArray1<'py, i64>>,
    strict: bool,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let order = match order {
        Some(o) => Some(
            o.as_array().iter().enumerate()
                .map(|(i, &v)| usize::try_from(v).map_err(|_| {
                    PyValueError::new_err(format!("`order[{}]` = {} is negative", i, v))
                }))
                .collect::<PyResult<Array1<usize>>>()?
        ),
        None => None,
    };
    let order = order.as_ref().map(Array1::view);

    let par = if strict { ProxParam::strict() } else { ProxParam::default() };
    let x = ProxSortedL1::new()
        .par(|p| *p = par)
        .evaluate(&y.as_array(), &lam.as_array(), order.as_ref())
        .map_err(to_py_error)?;

    Ok(x.into_pyarray_bound(py))
}

/// Sorted-L1 penalty: sum of `lam` times the magnitudes of `x` sorted in non-increasing order.
#[cfg(feature = "python")]
#[pyfunction]
fn _sorted_l1_norm<'py>(
    x: PyReadonlyArray1<'py, f64>,
    lam: PyReadonlyArray1<'py, f64>,
) -> PyResult<f64> {
    penalty::sorted_l1_norm(&x.as_array(), &lam.as_array()).map_err(to_py_error)
}

/// Sorted-L1 proximal operator
#[cfg(feature = "python")]
#[pymodule]
#[pyo3(name="_impl")]
fn proxsl1(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(_prox_sorted_l1, m)?)?;
    m.add_function(wrap_pyfunction!(_sorted_l1_norm, m)?)?;
    Ok(())
}

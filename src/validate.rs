//! Precondition checks on the arguments of the sorted-L1 prox.
//!
//! The kernel itself only needs matching lengths and in-range permutation
//! entries to stay memory safe; [`crate::ProxSortedL1`] always runs those two.
//! The remaining checks are opt-in through [`crate::ProxParam`].

use ndarray::*;
use num_traits::Float;

use crate::prox_error::ProxError;
use crate::prox_sorted_l1::try_vec;


/// Checks that argument `name` has length `got` equal to `expected`.
pub fn check_length(name: &'static str, expected: usize, got: usize) -> Result<(), ProxError>
{
    if expected != got {
        log::error!("`{}` has length {}, expected {}", name, got, expected);
        return Err(ProxError::MismatchedLengths { name, expected, got });
    }
    Ok(())
}

/// Position of the first NaN or, failing that, of the first strict increase.
fn first_unordered<F: Float>(v: &ArrayView1<'_, F>) -> Option<usize>
{
    v.iter().position(|e| e.is_nan()).or_else(|| {
        v.iter().zip(v.iter().skip(1))
            .position(|(a, b)| a < b)
            .map(|p| p + 1)
    })
}

/// Checks that `y` and `lambda` are both non-increasing.
///
/// NaN is unordered, so an entry that is NaN fails the check at its own index.
pub fn check_sorted<F: Float>(
    y: &ArrayView1<'_, F>,
    lambda: &ArrayView1<'_, F>,
) -> Result<(), ProxError>
{
    if let Some(index) = first_unordered(y) {
        log::error!("`y` is unordered at index {}", index);
        return Err(ProxError::UnsortedInput { index });
    }
    if let Some(index) = first_unordered(lambda) {
        log::error!("`lambda` is unordered at index {}", index);
        return Err(ProxError::UnsortedWeights { index });
    }
    Ok(())
}

/// Checks that every entry of `lambda` is finite and non-negative.
pub fn check_weights<F: Float>(lambda: &ArrayView1<'_, F>) -> Result<(), ProxError>
{
    for (index, &l) in lambda.iter().enumerate() {
        if !l.is_finite() {
            log::error!("`lambda` is not finite at index {}", index);
            return Err(ProxError::NonFiniteWeight { index });
        }
        if l < F::zero() {
            log::error!("`lambda` is negative at index {}", index);
            return Err(ProxError::NegativeWeight { index });
        }
    }
    Ok(())
}

/// Checks that every entry of `order` is less than `n`.
pub fn check_range(order: &ArrayView1<'_, usize>, n: usize) -> Result<(), ProxError>
{
    match order.iter().position(|&v| v >= n) {
        Some(index) => {
            let value = order[index];
            log::error!("`order[{}]` = {} is out of range", index, value);
            Err(ProxError::PermutationOutOfRange { index, value })
        },
        None => Ok(()),
    }
}

/// Checks that `order` is a bijection on `0..order.len()`.
pub fn check_permutation(order: &ArrayView1<'_, usize>) -> Result<(), ProxError>
{
    let n = order.len();
    check_range(order, n)?;

    let mut seen = try_vec::<bool>(n)?;
    seen.resize(n, false);

    for (index, &value) in order.iter().enumerate() {
        if seen[value] {
            log::error!("`order[{}]` = {} is a duplicate", index, value);
            return Err(ProxError::DuplicatePermutation { index, value });
        }
        seen[value] = true;
    }
    Ok(())
}

//

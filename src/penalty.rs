use core::cmp::Ordering;
use ndarray::*;
use num_traits::Float;

use crate::prox_error::ProxError;
use crate::prox_sorted_l1::try_vec;
use crate::validate::check_length;


/// Sorted-L1 penalty \\(J_\lambda(x) = \sum_i \lambda_i |x|_{(i)}\\),
/// where \\(|x|_{(1)} \ge |x|_{(2)} \ge \cdots\\) are the magnitudes of `x` in non-increasing order.
pub fn sorted_l1_norm<F: Float>(
    x: &ArrayView1<'_, F>,
    lambda: &ArrayView1<'_, F>,
) -> Result<F, ProxError>
{
    check_length("lambda", x.len(), lambda.len())?;

    let mut mag = try_vec::<F>(x.len())?;
    mag.extend(x.iter().map(|e| e.abs()));
    mag.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    Ok(mag.iter().zip(lambda.iter())
        .fold(F::zero(), |acc, (&m, &l)| acc + l * m))
}

/// Objective minimized by the prox: \\(\frac12\|x-y\|^2 + J_\lambda(x)\\).
pub fn prox_objective<F: Float>(
    x: &ArrayView1<'_, F>,
    y: &ArrayView1<'_, F>,
    lambda: &ArrayView1<'_, F>,
) -> Result<F, ProxError>
{
    check_length("y", x.len(), y.len())?;

    let dist_sq = x.iter().zip(y.iter())
        .fold(F::zero(), |acc, (&a, &b)| acc + (a - b) * (a - b));
    let two = F::one() + F::one();

    Ok(dist_sq / two + sorted_l1_norm(x, lambda)?)
}

//

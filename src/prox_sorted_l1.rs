use core::ops::RangeInclusive;
use ndarray::*;
use num_traits::Float;

use crate::evaluator::ProxSortedL1;
use crate::prox_error::ProxError;
use crate::validate::check_length;


/// Contiguous run of sorted positions that share one output value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block<F> {
    /// First position, inclusive.
    pub start: usize,
    /// Last position, inclusive.
    pub end: usize,
    /// Sum of `y[i] - lambda[i]` over the block.
    pub sum: F,
    /// `sum / len()`, before clipping.
    pub mean: F,
}

impl<F: Float> Block<F> {
    fn singleton(i: usize, s: F) -> Self {
        Block { start: i, end: i, sum: s, mean: s }
    }

    /// Number of positions in the block.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Positions covered by the block.
    pub fn range(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// Output value of every position in the block: the mean clipped at zero.
    pub fn value(&self) -> F {
        if self.mean < F::zero() { F::zero() } else { self.mean }
    }

    /// Extends this block by the adjacent block `top` that follows it.
    fn absorb(&mut self, top: &Block<F>) {
        self.end = top.end;
        self.sum = self.sum + top.sum;
        self.mean = self.sum / len_as(self.len());
    }
}

#[inline]
fn len_as<F: Float>(len: usize) -> F {
    // every usize is in range of a float, at worst rounded
    F::from(len).unwrap_or_else(F::infinity)
}

/// Allocates an empty vector able to hold `len` elements without reallocating.
pub(crate) fn try_vec<T>(len: usize) -> Result<Vec<T>, ProxError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| {
        log::error!("failed to allocate {} working elements", len);
        ProxError::ResourceExhausted { len }
    })?;
    Ok(v)
}

/// Single pass over `y - lambda` maintaining a stack of blocks with decreasing means.
///
/// Returns the blocks ordered by start position and the number of merges performed.
/// Lengths of `y` and `lambda` must already be checked equal.
pub(crate) fn pool<F: Float>(
    y: &ArrayView1<'_, F>,
    lambda: &ArrayView1<'_, F>,
) -> Result<(Vec<Block<F>>, usize), ProxError>
{
    let mut stack = try_vec::<Block<F>>(y.len())?;
    let mut merges = 0;

    for (i, (&yi, &li)) in y.iter().zip(lambda.iter()).enumerate() {
        stack.push(Block::singleton(i, yi - li));

        while let [.., prev, top] = stack[..] {
            // a NaN mean never merges
            if !(prev.mean <= top.mean) {
                break;
            }
            stack.pop();
            if let Some(last) = stack.last_mut() {
                last.absorb(&top);
                log::trace!("merged into block [{}, {}]", last.start, last.end);
            }
            merges += 1;
        }
    }

    Ok((stack, merges))
}

/// Pools the sorted input into blocks.
///
/// Returns the block stack left after the single pass, ordered by start position,
/// with strictly decreasing pre-clip means.
/// * `y` is the input sorted in non-increasing order.
/// * `lambda` is the non-increasing, non-negative weight vector of the same length.
pub fn pool_blocks<F: Float>(
    y: &ArrayView1<'_, F>,
    lambda: &ArrayView1<'_, F>,
) -> Result<Vec<Block<F>>, ProxError>
{
    check_length("lambda", y.len(), lambda.len())?;
    pool(y, lambda).map(|(blocks, _)| blocks)
}

/// Writes the clipped value of each block into `x`.
///
/// Without `order`, block positions are written directly.
/// With `order`, position `i` is written to `x[order[i]]`.
/// Every index must already be known to be in range of `x`.
pub(crate) fn materialize<F: Float>(
    blocks: &[Block<F>],
    order: Option<&ArrayView1<'_, usize>>,
    x: &mut ArrayViewMut1<'_, F>,
)
{
    match order {
        None => {
            for b in blocks {
                x.slice_mut(s![b.start..=b.end]).fill(b.value());
            }
        },
        Some(order) => {
            for b in blocks {
                let d = b.value();
                for &j in order.slice(s![b.start..=b.end]) {
                    x[j] = d;
                }
            }
        },
    }
}

/// Proximal operator of the sorted-L1 penalty.
///
/// Returns \\(\arg\min_x \frac12\|x-y\|^2 + \sum_i \lambda_i |x|_{(i)}\\) for `y` sorted in
/// non-increasing order, with the default [`crate::ProxParam`].
/// * `y` is the sorted input.
/// * `lambda` is the non-increasing, non-negative weight vector.
/// * `order`, if given, maps each sorted position to its original position;
///   the output is then in original order.
pub fn prox_sorted_l1<F: Float>(
    y: &ArrayView1<'_, F>,
    lambda: &ArrayView1<'_, F>,
    order: Option<&ArrayView1<'_, usize>>,
) -> Result<Array1<F>, ProxError>
{
    ProxSortedL1::new().evaluate(y, lambda, order)
}

//

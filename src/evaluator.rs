use ndarray::*;
use num_traits::Float;

use crate::prox_error::ProxError;
use crate::prox_sorted_l1::{materialize, pool, try_vec, Block};
use crate::validate::{check_length, check_permutation, check_range, check_sorted, check_weights};


/// Evaluator parameters.
///
/// All checks are off by default: unsorted input, negative weights and
/// non-bijective permutations then give a meaningless but safe result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProxParam
{
    /// Reject `y` or `lambda` that is not non-increasing.
    pub check_sorted: bool,
    /// Reject `lambda` with a negative or non-finite entry.
    pub check_weights: bool,
    /// Reject `order` that is not a bijection on `0..n`.
    pub check_permutation: bool,
}

impl ProxParam
{
    /// Parameters with every check enabled.
    pub fn strict() -> Self
    {
        ProxParam {
            check_sorted: true,
            check_weights: true,
            check_permutation: true,
        }
    }
}

/// Statistics of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxInfo
{
    /// Input length.
    pub n: usize,
    /// Number of blocks in the output.
    pub n_blocks: usize,
    /// Number of merges performed during pooling.
    pub n_merges: usize,
}

/// Sorted-L1 prox evaluator.
///
/// Holds only parameters, so one instance may serve any number of calls,
/// also concurrently; each call owns its working memory.
#[derive(Debug, Clone, Default)]
pub struct ProxSortedL1
{
    /// Parameters.
    pub par: ProxParam,
}

impl ProxSortedL1
{
    /// Creates an instance with default [`ProxParam`].
    pub fn new() -> Self
    {
        ProxSortedL1 {
            par: ProxParam::default(),
        }
    }

    /// Changes evaluator parameters.
    ///
    /// Returns [`ProxSortedL1`] with its parameters changed.
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut ProxParam)
    {
        f(&mut self.par);
        self
    }

    fn check<F: Float>(
        &self,
        y: &ArrayView1<'_, F>,
        lambda: &ArrayView1<'_, F>,
        order: Option<&ArrayView1<'_, usize>>,
    ) -> Result<(), ProxError>
    {
        let n = y.len();
        check_length("lambda", n, lambda.len())?;
        if let Some(order) = order {
            check_length("order", n, order.len())?;
            check_range(order, n)?;
        }

        if self.par.check_sorted {
            check_sorted(y, lambda)?;
        }
        if self.par.check_weights {
            check_weights(lambda)?;
        }
        if self.par.check_permutation {
            if let Some(order) = order {
                check_permutation(order)?;
            }
        }
        Ok(())
    }

    /// Pools the sorted input into blocks, after the enabled checks.
    ///
    /// Returns the blocks ordered by start position, means before clipping.
    pub fn blocks<F: Float>(
        &self,
        y: &ArrayView1<'_, F>,
        lambda: &ArrayView1<'_, F>,
    ) -> Result<Vec<Block<F>>, ProxError>
    {
        self.check(y, lambda, None)?;
        pool(y, lambda).map(|(blocks, _)| blocks)
    }

    /// Evaluates the prox into a caller-supplied buffer.
    ///
    /// Returns [`ProxInfo`] on success. On error `x` is left untouched.
    /// * `y` is the input sorted in non-increasing order.
    /// * `lambda` is the non-increasing, non-negative weight vector of the same length.
    /// * `order`, if given, maps sorted position `i` to original position `order[i]`
    ///   and `x` is filled in original order.
    /// * `x` receives the output; its length must equal that of `y`.
    pub fn evaluate_into<F: Float>(
        &self,
        y: &ArrayView1<'_, F>,
        lambda: &ArrayView1<'_, F>,
        order: Option<&ArrayView1<'_, usize>>,
        x: &mut ArrayViewMut1<'_, F>,
    ) -> Result<ProxInfo, ProxError>
    {
        let n = y.len();
        check_length("x", n, x.len())?;
        self.check(y, lambda, order)?;

        let (blocks, n_merges) = pool(y, lambda)?;
        materialize(&blocks, order, x);

        let info = ProxInfo {
            n,
            n_blocks: blocks.len(),
            n_merges,
        };
        log::debug!("prox_sorted_l1: n {} blocks {} merges {} scattered {}",
            info.n, info.n_blocks, info.n_merges, order.is_some());
        Ok(info)
    }

    /// Evaluates the prox into a newly allocated vector.
    ///
    /// Same as [`ProxSortedL1::evaluate_into`], returning the output instead of [`ProxInfo`].
    pub fn evaluate<F: Float>(
        &self,
        y: &ArrayView1<'_, F>,
        lambda: &ArrayView1<'_, F>,
        order: Option<&ArrayView1<'_, usize>>,
    ) -> Result<Array1<F>, ProxError>
    {
        let mut buf = try_vec::<F>(y.len())?;
        buf.resize(y.len(), F::zero());
        let mut x = Array1::from_vec(buf);

        self.evaluate_into(y, lambda, order, &mut x.view_mut())?;
        Ok(x)
    }
}

//

#[cfg(test)]
mod tests
{
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn test_par()
    {
        let e = ProxSortedL1::new().par(|p| {
            p.check_sorted = true;
        });
        assert!(e.par.check_sorted);
        assert!(!e.par.check_weights);
        assert!(!e.par.check_permutation);

        let e = ProxSortedL1::new().par(|p| *p = ProxParam::strict());
        assert_eq!(e.par, ProxParam::strict());
    }

    #[test]
    fn test_info()
    {
        let _ = env_logger::builder().is_test(true).try_init();

        let y = array![3., 1., 1.];
        let lambda = array![2., 1., 0.];
        let mut x = Array1::<f64>::zeros(3);
        let info = ProxSortedL1::new()
            .evaluate_into(&y.view(), &lambda.view(), None, &mut x.view_mut())
            .unwrap();

        assert_eq!(info, ProxInfo { n: 3, n_blocks: 2, n_merges: 1 });
        assert_float_eq!(x.as_slice().unwrap(), [1., 0.5, 0.5].as_ref(), abs_all <= 1e-15);
    }

    #[test]
    fn test_untouched_on_error()
    {
        let _ = env_logger::builder().is_test(true).try_init();

        let y = array![3., 1., 1.];
        let lambda = array![2., 1., 0.];
        let order = array![0_usize, 5, 1];
        let mut x = Array1::from_elem(3, -7.);
        let err = ProxSortedL1::new()
            .evaluate_into(&y.view(), &lambda.view(), Some(&order.view()), &mut x.view_mut())
            .unwrap_err();

        assert_eq!(err, ProxError::PermutationOutOfRange { index: 1, value: 5 });
        assert!(x.iter().all(|&e| e == -7.));
    }

    #[test]
    fn test_strict_rejects()
    {
        let _ = env_logger::builder().is_test(true).try_init();

        let strict = ProxSortedL1::new().par(|p| *p = ProxParam::strict());
        let lax = ProxSortedL1::new();

        let y = array![1., 3.];
        let lambda = array![0., 0.];
        assert_eq!(strict.evaluate(&y.view(), &lambda.view(), None).unwrap_err(),
            ProxError::UnsortedInput { index: 1 });
        assert!(lax.evaluate(&y.view(), &lambda.view(), None).is_ok());

        let y = array![3., 1.];
        let lambda = array![1., -1.];
        assert_eq!(strict.evaluate(&y.view(), &lambda.view(), None).unwrap_err(),
            ProxError::NegativeWeight { index: 1 });

        let lambda = array![1., 0.];
        let order = array![1_usize, 1];
        assert_eq!(strict.evaluate(&y.view(), &lambda.view(), Some(&order.view())).unwrap_err(),
            ProxError::DuplicatePermutation { index: 1, value: 1 });
        assert!(lax.evaluate(&y.view(), &lambda.view(), Some(&order.view())).is_ok());
    }

    #[test]
    fn test_exhausted_before_write()
    {
        let _ = env_logger::builder().is_test(true).try_init();

        // stride-0 views of a huge length own no memory
        let len = usize::MAX / 2;
        let one = array![1.];
        let y = one.broadcast(len).unwrap();
        let lambda = one.broadcast(len).unwrap();
        let e = ProxSortedL1::new();

        assert_eq!(e.evaluate(&y, &lambda, None).unwrap_err(), ProxError::ResourceExhausted { len });
        assert_eq!(e.blocks(&y, &lambda).unwrap_err(), ProxError::ResourceExhausted { len });
    }

    #[test]
    fn test_strict_rejects_nan_input()
    {
        let _ = env_logger::builder().is_test(true).try_init();

        let y = array![3., f64::NAN, 1.];
        let lambda = array![1., 0.5, 0.];
        let strict = ProxSortedL1::new().par(|p| *p = ProxParam::strict());
        assert_eq!(strict.evaluate(&y.view(), &lambda.view(), None).unwrap_err(),
            ProxError::UnsortedInput { index: 1 });
    }

    #[test]
    fn test_length_mismatch()
    {
        let y = array![3., 1., 1.];
        let lambda = array![2., 1.];
        let err = ProxSortedL1::new().evaluate(&y.view(), &lambda.view(), None).unwrap_err();
        assert_eq!(err, ProxError::MismatchedLengths { name: "lambda", expected: 3, got: 2 });

        let lambda = array![2., 1., 0.];
        let mut x = Array1::<f64>::zeros(4);
        let err = ProxSortedL1::new()
            .evaluate_into(&y.view(), &lambda.view(), None, &mut x.view_mut())
            .unwrap_err();
        assert_eq!(err, ProxError::MismatchedLengths { name: "x", expected: 3, got: 4 });
    }
}

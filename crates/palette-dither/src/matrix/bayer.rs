//! Bayer index matrices.
//!
//! `I(2) = [[0, 2], [3, 1]]` and each doubling replaces every entry `S`
//! with the block `[[4S, 4S + 2], [4S + 3, 4S + 1]]`. Unrolling that
//! recursion gives a direct formula: bit `b` of the row and column picks
//! a base entry that lands in base-4 digit `L - 1 - b` of the result,
//! where `L = log2(n)`. The transposed variant uses the transposed base
//! `[[0, 3], [2, 1]]`.

use super::{MatrixError, MatrixOrder, ThresholdMatrix};

/// Largest supported Bayer order.
pub const BAYER_MAX_ORDER: usize = 256;

const BASE: [[u32; 2]; 2] = [[0, 2], [3, 1]];
const BASE_TRANSPOSED: [[u32; 2]; 2] = [[0, 3], [2, 1]];

fn unsupported(order: usize) -> MatrixError {
    MatrixError::UnsupportedOrder {
        kind: "bayer",
        order: MatrixOrder::Square(order),
        supported: format!("powers of two from 2 to {BAYER_MAX_ORDER}"),
    }
}

/// Bayer index matrix `I(order)`, row-major.
///
/// The result is a permutation of `0..order²`.
///
/// # Errors
///
/// [`MatrixError::UnsupportedOrder`] unless `order` is a power of two in
/// `2..=256`.
pub fn bayer_index(order: usize, transposed: bool) -> Result<Vec<u32>, MatrixError> {
    if !order.is_power_of_two() || !(2..=BAYER_MAX_ORDER).contains(&order) {
        return Err(unsupported(order));
    }
    let base = if transposed { BASE_TRANSPOSED } else { BASE };
    let levels = order.trailing_zeros();

    let mut ranks = Vec::with_capacity(order * order);
    for row in 0..order {
        for col in 0..order {
            let mut value = 0u32;
            for bit in 0..levels {
                let digit = base[(row >> bit) & 1][(col >> bit) & 1];
                value |= digit << (2 * (levels - 1 - bit));
            }
            ranks.push(value);
        }
    }
    Ok(ranks)
}

impl ThresholdMatrix {
    /// Bayer threshold matrix `B(n) = (1 + I(n)) / (1 + n²)`.
    ///
    /// # Example
    ///
    /// ```
    /// use palette_dither::ThresholdMatrix;
    ///
    /// let b = ThresholdMatrix::bayer(2).unwrap();
    /// assert_eq!(b.factor_row(0), vec![1.0 / 5.0, 3.0 / 5.0]);
    /// assert_eq!(b.factor_row(1), vec![4.0 / 5.0, 2.0 / 5.0]);
    /// ```
    pub fn bayer(order: usize) -> Result<Self, MatrixError> {
        let ranks = bayer_index(order, false)?;
        let cells = (order * order) as f64;
        tracing::debug!(order, "Built Bayer threshold matrix");
        Ok(Self::from_ranks(order, order, ranks, 1.0, cells + 1.0))
    }

    /// Transposed Bayer ranks divided by `n²`, the per-pixel switch used
    /// by mixing-plan dithering.
    pub fn bayer_mixing(order: usize) -> Result<Self, MatrixError> {
        let ranks = bayer_index(order, true)?;
        let cells = (order * order) as f64;
        tracing::debug!(order, "Built transposed Bayer matrix");
        Ok(Self::from_ranks(order, order, ranks, 0.0, cells))
    }
}

//! Cluster-dot threshold tables.
//!
//! Ranks grow outward from the cell center so that dots clump together,
//! which suits printers and other media that smear isolated pixels.

use super::{MatrixError, MatrixOrder, ThresholdMatrix};

/// Orders with a cluster-dot table.
pub const CLUSTER_DOT_ORDERS: [MatrixOrder; 3] = [
    MatrixOrder::Square(4),
    MatrixOrder::Square(8),
    MatrixOrder::Rect {
        width: 5,
        height: 3,
    },
];

/// ```text
/// 12  5  6 13
///  4  0  1  7
/// 11  3  2  8
/// 15 10  9 14
/// ```
const CLUSTER_4: [u32; 16] = [12, 5, 6, 13, 4, 0, 1, 7, 11, 3, 2, 8, 15, 10, 9, 14];

/// Two interleaved 4x4 dots, one growing from dark and one from light.
#[rustfmt::skip]
const CLUSTER_8: [u32; 64] = [
    24, 10, 12, 26, 35, 47, 49, 37,
     8,  0,  2, 14, 45, 59, 61, 51,
    22,  6,  4, 16, 43, 57, 63, 53,
    30, 20, 18, 28, 33, 41, 55, 39,
    34, 46, 48, 36, 25, 11, 13, 27,
    44, 58, 60, 50,  9,  1,  3, 15,
    42, 56, 62, 52, 23,  7,  5, 17,
    32, 40, 54, 38, 31, 21, 19, 29,
];

/// Five columns by three rows; the dot grows along the middle column.
///
/// ```text
///  9  3  0  6 12
/// 10  4  1  7 13
/// 11  5  2  8 14
/// ```
const CLUSTER_5X3: [u32; 15] = [9, 3, 0, 6, 12, 10, 4, 1, 7, 13, 11, 5, 2, 8, 14];

impl ThresholdMatrix {
    /// Cluster-dot matrix, factor `rank / cells`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::UnsupportedOrder`] for anything but `4`, `8` and `5x3`.
    pub fn cluster_dot(order: MatrixOrder) -> Result<Self, MatrixError> {
        let (width, height, ranks): (usize, usize, &[u32]) =
            match (order.width(), order.height()) {
                (4, 4) => (4, 4, &CLUSTER_4),
                (8, 8) => (8, 8, &CLUSTER_8),
                (5, 3) => (5, 3, &CLUSTER_5X3),
                _ => {
                    let supported: Vec<String> =
                        CLUSTER_DOT_ORDERS.iter().map(|o| o.to_string()).collect();
                    return Err(MatrixError::UnsupportedOrder {
                        kind: "cluster-dot",
                        order,
                        supported: supported.join(", "),
                    });
                }
            };
        let cells = ranks.len() as f64;
        tracing::debug!(%order, "Built cluster-dot threshold matrix");
        Ok(Self::from_ranks(width, height, ranks.to_vec(), 0.0, cells))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_permutations() {
        for order in CLUSTER_DOT_ORDERS {
            let m = ThresholdMatrix::cluster_dot(order).unwrap();
            let mut ranks = m.ranks().to_vec();
            ranks.sort_unstable();
            let expected: Vec<u32> = (0..m.cells() as u32).collect();
            assert_eq!(ranks, expected, "cluster-dot {order} is not a permutation");
        }
    }

    #[test]
    fn test_factors_in_unit_interval() {
        for order in CLUSTER_DOT_ORDERS {
            let m = ThresholdMatrix::cluster_dot(order).unwrap();
            for y in 0..m.height() {
                for f in m.factor_row(y) {
                    assert!((0.0..1.0).contains(&f), "{order} factor {f}");
                }
            }
        }
    }

    #[test]
    fn test_rectangular_indexing() {
        let m = ThresholdMatrix::cluster_dot("5x3".parse().unwrap()).unwrap();
        assert_eq!((m.width(), m.height()), (5, 3));
        assert_eq!(m.rank(2, 0), 0);
        assert_eq!(m.rank(4, 2), 14);
        // tiles every 5 columns and 3 rows
        assert_eq!(m.rank(7, 3), 0);
        assert_eq!(m.fraction(0, 0), (9, 15));
    }

    #[test]
    fn test_unsupported_orders_name_the_supported_ones() {
        let err = ThresholdMatrix::cluster_dot(MatrixOrder::Square(16)).unwrap_err();
        assert_eq!(
            err,
            MatrixError::UnsupportedOrder {
                kind: "cluster-dot",
                order: MatrixOrder::Square(16),
                supported: "4, 8, 5x3".to_string(),
            }
        );
        assert!(ThresholdMatrix::cluster_dot(MatrixOrder::Rect {
            width: 3,
            height: 5
        })
        .is_err());
    }
}

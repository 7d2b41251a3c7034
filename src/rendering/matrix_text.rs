//! Plain-text rendering of threshold matrices for the `matrix` command.

use palette_dither::ThresholdMatrix;

/// One line per matrix row, cells as `rank/divisor` fractions or, with
/// `decimal`, as factors with four decimals. Columns are right-aligned.
pub fn format_matrix(matrix: &ThresholdMatrix, decimal: bool) -> String {
    let rows: Vec<Vec<String>> = (0..matrix.height())
        .map(|y| {
            if decimal {
                matrix
                    .factor_row(y)
                    .iter()
                    .map(|f| format!("{f:.4}"))
                    .collect()
            } else {
                (0..matrix.width())
                    .map(|x| {
                        let (num, den) = matrix.fraction(x, y);
                        format!("{num}/{den}")
                    })
                    .collect()
            }
        })
        .collect();

    let cell_width = rows
        .iter()
        .flatten()
        .map(String::len)
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for row in &rows {
        let line: Vec<String> = row.iter().map(|c| format!("{c:>cell_width$}")).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

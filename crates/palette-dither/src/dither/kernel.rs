//! Error diffusion kernel definitions.
//!
//! Each kernel lists the neighbors that receive a share of the
//! quantization error. Weights are integers over a common divisor and
//! every kernel sums to its divisor, so all of the error is propagated.

use std::fmt;
use std::str::FromStr;

use crate::api::DitherError;

/// An error diffusion kernel.
///
/// Offsets only reach pixels that have not been visited yet in a
/// left-to-right, top-to-bottom scan: `dy >= 0`, and `dx > 0` on the
/// current row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    /// (dx, dy, weight) entries.
    pub entries: &'static [(i32, i32, u8)],

    /// Each neighbor receives `error * weight / divisor`.
    pub divisor: u8,
}

impl Kernel {
    /// Entries with weights divided by the divisor.
    pub fn normalized(&self) -> impl Iterator<Item = (i32, i32, f64)> + '_ {
        let divisor = self.divisor as f64;
        self.entries
            .iter()
            .map(move |&(dx, dy, w)| (dx, dy, w as f64 / divisor))
    }

    /// Sum of the normalized weights.
    pub fn total(&self) -> f64 {
        self.normalized().map(|(_, _, w)| w).sum()
    }
}

/// Floyd-Steinberg kernel.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)],
    divisor: 16,
};

/// Atkinson kernel.
///
/// Six equal shares. The classic form divides by 8 and drops a quarter
/// of the error; here the shares are sixths so the full error is kept.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),
        (2, 0, 1),
        (-1, 1, 1),
        (0, 1, 1),
        (1, 1, 1),
        (0, 2, 1),
    ],
    divisor: 6,
};

/// Jarvis-Judice-Ninke kernel.
///
/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1
/// ```
pub const JARVIS_JUDICE_NINKE: Kernel = Kernel {
    entries: &[
        (1, 0, 7),
        (2, 0, 5),
        (-2, 1, 3),
        (-1, 1, 5),
        (0, 1, 7),
        (1, 1, 5),
        (2, 1, 3),
        (-2, 2, 1),
        (-1, 2, 3),
        (0, 2, 5),
        (1, 2, 3),
        (2, 2, 1),
    ],
    divisor: 48,
};

/// Stucki kernel.
///
/// ```text
///            X   8   4
///    2   4   8   4   2
///    1   2   4   2   1
/// ```
pub const STUCKI: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
        (-2, 2, 1),
        (-1, 2, 2),
        (0, 2, 4),
        (1, 2, 2),
        (2, 2, 1),
    ],
    divisor: 42,
};

/// Burkes kernel.
///
/// ```text
///            X   8   4
///    2   4   8   4   2
/// ```
pub const BURKES: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
    ],
    divisor: 32,
};

/// Sierra (three-row) kernel.
///
/// ```text
///            X   5   3
///    2   4   5   4   2
///        2   3   2
/// ```
pub const SIERRA3: Kernel = Kernel {
    entries: &[
        (1, 0, 5),
        (2, 0, 3),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 5),
        (1, 1, 4),
        (2, 1, 2),
        (-1, 2, 2),
        (0, 2, 3),
        (1, 2, 2),
    ],
    divisor: 32,
};

/// Sierra two-row kernel.
///
/// ```text
///            X   4   3
///    1   2   3   2   1
/// ```
pub const SIERRA2: Kernel = Kernel {
    entries: &[
        (1, 0, 4),
        (2, 0, 3),
        (-2, 1, 1),
        (-1, 1, 2),
        (0, 1, 3),
        (1, 1, 2),
        (2, 1, 1),
    ],
    divisor: 16,
};

/// Sierra-2-4A ("Sierra Lite") kernel.
///
/// ```text
///        X   2
///    1   1
/// ```
pub const SIERRA_2_4A: Kernel = Kernel {
    entries: &[(1, 0, 2), (-1, 1, 1), (0, 1, 1)],
    divisor: 4,
};

/// Stevenson-Arce kernel, designed for hexagonal grids.
///
/// ```text
///                    X       32
///    12      26      30      16
///        12      26      12
///     5      12      12       5
/// ```
pub const STEVENSON_ARCE: Kernel = Kernel {
    entries: &[
        (2, 0, 32),
        (-3, 1, 12),
        (-1, 1, 26),
        (1, 1, 30),
        (3, 1, 16),
        (-2, 2, 12),
        (0, 2, 26),
        (2, 2, 12),
        (-3, 3, 5),
        (-1, 3, 12),
        (1, 3, 12),
        (3, 3, 5),
    ],
    divisor: 200,
};

/// Named error diffusion kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiffusionKernel {
    /// [`FLOYD_STEINBERG`]
    #[default]
    FloydSteinberg,
    /// [`ATKINSON`]
    Atkinson,
    /// [`JARVIS_JUDICE_NINKE`]
    JarvisJudiceNinke,
    /// [`STUCKI`]
    Stucki,
    /// [`BURKES`]
    Burkes,
    /// [`SIERRA3`]
    Sierra3,
    /// [`SIERRA2`]
    Sierra2,
    /// [`SIERRA_2_4A`]
    Sierra24A,
    /// [`STEVENSON_ARCE`]
    StevensonArce,
}

impl DiffusionKernel {
    /// Every kernel, in display order.
    pub const ALL: [DiffusionKernel; 9] = [
        Self::FloydSteinberg,
        Self::Atkinson,
        Self::JarvisJudiceNinke,
        Self::Stucki,
        Self::Burkes,
        Self::Sierra3,
        Self::Sierra2,
        Self::Sierra24A,
        Self::StevensonArce,
    ];

    /// The weight table.
    pub fn kernel(&self) -> &'static Kernel {
        match self {
            Self::FloydSteinberg => &FLOYD_STEINBERG,
            Self::Atkinson => &ATKINSON,
            Self::JarvisJudiceNinke => &JARVIS_JUDICE_NINKE,
            Self::Stucki => &STUCKI,
            Self::Burkes => &BURKES,
            Self::Sierra3 => &SIERRA3,
            Self::Sierra2 => &SIERRA2,
            Self::Sierra24A => &SIERRA_2_4A,
            Self::StevensonArce => &STEVENSON_ARCE,
        }
    }

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::FloydSteinberg => "floyd-steinberg",
            Self::Atkinson => "atkinson",
            Self::JarvisJudiceNinke => "jarvis-judice-ninke",
            Self::Stucki => "stucki",
            Self::Burkes => "burkes",
            Self::Sierra3 => "sierra3",
            Self::Sierra2 => "sierra2",
            Self::Sierra24A => "sierra-2-4a",
            Self::StevensonArce => "stevenson-arce",
        }
    }
}

impl fmt::Display for DiffusionKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DiffusionKernel {
    type Err = DitherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| DitherError::UnknownKernel(s.to_string()))
    }
}

//! Site percolation on an N×N square lattice.
//!
//! Sites are addressed by 1-based `(row, col)` pairs. Each site starts
//! blocked and may be opened once. The lattice percolates when an open
//! path joins the top row to the bottom row; a site is *full* when an
//! open path joins it to the top row.
//!
//! # Algorithm
//!
//! Cells map to disjoint-set indices `1..=N²`; index `0` is a virtual
//! top node and `N² + 1` a virtual bottom node. Opening a site unions it
//! with its open orthogonal neighbours, so both queries reduce to a
//! single `connected` check.
//!
//! Two independent [`UnionFind`] forests are kept:
//!
//! - `through`: top row wired to the virtual top, bottom row wired to the
//!   virtual bottom. Answers [`Lattice::percolates`].
//! - `from_top`: only the virtual top is wired. Answers
//!   [`Lattice::is_full`].
//!
//! With a single forest, once the system percolates every open site
//! touching the bottom row would share a root with the virtual top and
//! be reported full even with no path of its own to the top (backwash).
//! The bottom virtual node never exists in `from_top`, so that cannot
//! happen there.
//!
//! Reference: Sedgewick & Wayne (2011), *Algorithms*, 4th ed., §1.5.

use std::fmt;

use crate::collections::UnionFind;
use crate::error::{Error, Result};

/// Disjoint-set index of the virtual top node.
const VIRTUAL_TOP: usize = 0;

/// Number of forest slots for an `n`×`n` grid: N² cells plus the two
/// virtual nodes.
///
/// # Errors
/// [`Error::InvalidGridSize`] if `n == 0` or `n² + 2` overflows `usize`.
pub(crate) fn slot_count(n: usize) -> Result<usize> {
    if n == 0 {
        return Err(Error::InvalidGridSize { n });
    }
    n.checked_mul(n)
        .and_then(|cells| cells.checked_add(2))
        .ok_or(Error::InvalidGridSize { n })
}

/// An N×N grid of blocked/open sites with incremental connectivity.
///
/// # Examples
/// ```
/// use u_percolation::Lattice;
///
/// let mut lattice = Lattice::new(2).unwrap();
/// lattice.open(1, 1).unwrap();
/// assert!(lattice.is_full(1, 1).unwrap());
/// assert!(!lattice.percolates());
///
/// lattice.open(2, 1).unwrap();
/// assert!(lattice.percolates());
/// ```
#[derive(Debug, Clone)]
pub struct Lattice {
    n: usize,
    /// Open flags, indexed like the disjoint-set forests (slots 0 and
    /// N²+1 are unused).
    open: Vec<bool>,
    open_count: usize,
    through: UnionFind,
    from_top: UnionFind,
}

impl Lattice {
    /// Creates an `n`-by-`n` lattice with every site blocked.
    ///
    /// # Errors
    /// [`Error::InvalidGridSize`] if `n == 0` or `n² + 2` overflows `usize`.
    pub fn new(n: usize) -> Result<Self> {
        let slots = slot_count(n)?;
        Ok(Self {
            n,
            open: vec![false; slots],
            open_count: 0,
            through: UnionFind::new(slots),
            from_top: UnionFind::new(slots),
        })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Number of sites opened so far.
    pub fn open_sites(&self) -> usize {
        self.open_count
    }

    /// Fraction of all N² sites that are open.
    pub fn open_fraction(&self) -> f64 {
        self.open_count as f64 / (self.n * self.n) as f64
    }

    /// Opens the site at `(row, col)` if it is not open already.
    ///
    /// Unions the site with every open orthogonal neighbour in both
    /// forests. A top-row site is also joined to the virtual top in both;
    /// a bottom-row site is joined to the virtual bottom in the
    /// percolation forest only.
    ///
    /// # Errors
    /// [`Error::SiteOutOfRange`] if either coordinate is outside `[1, n]`.
    /// The lattice is unchanged on error.
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        self.validate(row, col)?;

        let site = self.index(row, col);
        if self.open[site] {
            return Ok(());
        }
        self.open[site] = true;
        self.open_count += 1;

        if row == 1 {
            self.join(site, VIRTUAL_TOP);
        } else {
            self.join_if_open(site, self.index(row - 1, col));
        }

        if row == self.n {
            let bottom = self.virtual_bottom();
            self.through.union(site, bottom);
        } else {
            self.join_if_open(site, self.index(row + 1, col));
        }

        if col > 1 {
            self.join_if_open(site, self.index(row, col - 1));
        }
        if col < self.n {
            self.join_if_open(site, self.index(row, col + 1));
        }

        Ok(())
    }

    /// Returns whether the site at `(row, col)` is open.
    ///
    /// # Errors
    /// [`Error::SiteOutOfRange`] if either coordinate is outside `[1, n]`.
    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        self.validate(row, col)?;
        Ok(self.open[self.index(row, col)])
    }

    /// Returns whether the site at `(row, col)` is connected to the top
    /// row through open sites.
    ///
    /// Takes `&mut self` because the lookup compresses paths in the
    /// underlying forest; no observable state changes.
    ///
    /// # Errors
    /// [`Error::SiteOutOfRange`] if either coordinate is outside `[1, n]`.
    pub fn is_full(&mut self, row: usize, col: usize) -> Result<bool> {
        self.validate(row, col)?;
        let site = self.index(row, col);
        Ok(self.from_top.connected(site, VIRTUAL_TOP))
    }

    /// Returns whether an open path joins the top row to the bottom row.
    ///
    /// Monotonic: once `true`, further opens keep it `true`.
    pub fn percolates(&mut self) -> bool {
        let bottom = self.virtual_bottom();
        self.through.connected(VIRTUAL_TOP, bottom)
    }

    /// Maps 1-based `(row, col)` to a forest index in `1..=N²`.
    fn index(&self, row: usize, col: usize) -> usize {
        (row - 1) * self.n + col
    }

    fn virtual_bottom(&self) -> usize {
        self.n * self.n + 1
    }

    fn validate(&self, row: usize, col: usize) -> Result<()> {
        let in_range = |v: usize| (1..=self.n).contains(&v);
        if in_range(row) && in_range(col) {
            Ok(())
        } else {
            Err(Error::SiteOutOfRange { row, col, n: self.n })
        }
    }

    fn join(&mut self, a: usize, b: usize) {
        self.through.union(a, b);
        self.from_top.union(a, b);
    }

    fn join_if_open(&mut self, site: usize, neighbour: usize) {
        if self.open[neighbour] {
            self.join(site, neighbour);
        }
    }
}

/// Renders the grid one row per line: `#` blocked, `.` open, `o` full.
impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut from_top = self.from_top.clone();
        for row in 1..=self.n {
            for col in 1..=self.n {
                let site = self.index(row, col);
                let glyph = if !self.open[site] {
                    '#'
                } else if from_top.connected(site, VIRTUAL_TOP) {
                    'o'
                } else {
                    '.'
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

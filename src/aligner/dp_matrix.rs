//! Observer that captures the cost matrix of a debug alignment run.
//!
//! Nothing in the engine depends on this; it exists for tracing. With
//! banding, cells outside the band are never computed and stay absent.

use std::fmt;

use ndarray::Array2;

/// Sparse `(m + 1) × (n + 1)` matrix of costs recorded during
/// [`locate()`](crate::Aligner::locate), labeled with the two sequences.
#[derive(Debug, Clone)]
pub struct DpMatrix {
    reference: String,
    query: String,
    cells: Array2<Option<usize>>,
}

impl DpMatrix {
    /// An empty matrix for an alignment of `reference` against `query`.
    pub fn new(reference: &str, query: &str) -> Self {
        Self {
            cells: Array2::from_elem((reference.len() + 1, query.len() + 1), None),
            reference: reference.to_string(),
            query: query.to_string(),
        }
    }

    /// Record the cost of the cell at reference position `i`, query
    /// position `j`.
    pub fn set_entry(&mut self, i: usize, j: usize, cost: usize) {
        self.cells[[i, j]] = Some(cost);
    }

    /// The recorded cost at `(i, j)`, or [`None`] if the engine never
    /// computed that cell.
    pub fn get(&self, i: usize, j: usize) -> Option<usize> {
        self.cells[[i, j]]
    }
}

impl fmt::Display for DpMatrix {
    /// Render a table with rows labeled by reference characters and
    /// columns by query characters; absent cells are blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = self.query.chars().map(|c| format!("{c:>2}")).collect();
        let mut lines = vec![format!("     {}", header.join(" "))];
        for (c, row) in " "
            .chars()
            .chain(self.reference.chars())
            .zip(self.cells.outer_iter())
        {
            let cells: Vec<String> = row
                .iter()
                .map(|v| match v {
                    Some(cost) => format!("{cost:2}"),
                    None => "  ".to_string(),
                })
                .collect();
            lines.push(format!("{c} {}", cells.join(" ")));
        }
        write!(f, "{}", lines.join("\n"))
    }
}

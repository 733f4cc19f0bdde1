use std::collections::HashSet;

use ndarray::Array2;

const NEIGHBORS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Segmentation result: one u32 label per pixel, 0 for background.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMask {
    pub labels: Array2<u32>,
}

impl LabelMask {
    pub fn new(labels: Array2<u32>) -> Self {
        Self { labels }
    }

    pub fn dims(&self) -> (usize, usize) {
        self.labels.dim()
    }

    /// Number of distinct objects, regardless of gaps in the numbering.
    pub fn cell_count(&self) -> usize {
        self.labels
            .iter()
            .filter(|label| **label != 0)
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn max_label(&self) -> u32 {
        self.labels.iter().copied().max().unwrap_or(0)
    }

    /// Boundary pixels: labeled pixels with a 4-neighbor carrying a
    /// different label. Out-of-bounds neighbors count as background, so
    /// objects touching the image border are outlined there too.
    pub fn outlines(&self) -> OutlineMap {
        let (height, width) = self.dims();
        let mut boundary = Array2::from_elem((height, width), false);
        for y in 0..height {
            for x in 0..width {
                let label = self.labels[[y, x]];
                if label == 0 {
                    continue;
                }
                boundary[[y, x]] = NEIGHBORS.into_iter().any(|(dy, dx)| {
                    let ny = y as isize + dy;
                    let nx = x as isize + dx;
                    if ny < 0 || nx < 0 || ny >= height as isize || nx >= width as isize {
                        return true;
                    }
                    self.labels[[ny as usize, nx as usize]] != label
                });
            }
        }
        OutlineMap { boundary }
    }
}

/// Boundary map derived from a [`LabelMask`]; not independently mutable.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineMap {
    boundary: Array2<bool>,
}

impl OutlineMap {
    pub fn dims(&self) -> (usize, usize) {
        self.boundary.dim()
    }

    pub fn is_boundary(&self, y: usize, x: usize) -> bool {
        self.boundary[[y, x]]
    }

    pub fn as_array(&self) -> &Array2<bool> {
        &self.boundary
    }
}

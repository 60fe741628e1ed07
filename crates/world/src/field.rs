use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use voxwalk_common::Aabb;
use voxwalk_kernel::CollisionQuery;

/// A 2D cell coordinate in the XZ plane (Y is not partitioned).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub x: i32,
    pub z: i32,
}

impl CellCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// Errors from building a cube field.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f32),
    #[error("box {index} has non-finite corners")]
    NonFiniteBox { index: usize },
}

/// Serializable description of a field: cell size plus a list of boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default)]
    pub boxes: Vec<Aabb>,
}

fn default_cell_size() -> f32 {
    8.0
}

/// Static cubes bucketed into XZ cells.
///
/// A box is listed in every cell its XZ footprint touches, so a query only
/// has to look at the cells under the query volume.
#[derive(Debug, Clone)]
pub struct CubeField {
    cell_size: f32,
    boxes: Vec<Aabb>,
    cells: HashMap<CellCoord, Vec<usize>>,
}

impl CubeField {
    pub fn new(cell_size: f32) -> Result<Self, FieldError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(FieldError::InvalidCellSize(cell_size));
        }
        Ok(Self {
            cell_size,
            boxes: Vec::new(),
            cells: HashMap::new(),
        })
    }

    pub fn from_spec(spec: &FieldSpec) -> Result<Self, FieldError> {
        let mut field = Self::new(spec.cell_size)?;
        for (index, b) in spec.boxes.iter().enumerate() {
            if !b.min.is_finite() || !b.max.is_finite() {
                return Err(FieldError::NonFiniteBox { index });
            }
            field.add_box(Aabb::new(b.min, b.max));
        }
        tracing::debug!(
            boxes = field.len(),
            cells = field.cell_count(),
            "built cube field"
        );
        Ok(field)
    }

    /// The sandbox layout: `rows` x `cols` cubes of edge `size`, `spacing`
    /// apart center to center, centered on the origin, resting on y = 0.
    pub fn grid(rows: u32, cols: u32, spacing: f32, size: f32) -> Result<Self, FieldError> {
        Self::grid_on(rows, cols, spacing, size, 0.0)
    }

    /// Like [`CubeField::grid`] with the cube bottoms at `base_y`.
    pub fn grid_on(
        rows: u32,
        cols: u32,
        spacing: f32,
        size: f32,
        base_y: f32,
    ) -> Result<Self, FieldError> {
        let mut field = Self::new(spacing.max(size).max(1.0) * 2.0)?;
        let x0 = -(cols.saturating_sub(1) as f32) * spacing * 0.5;
        let z0 = -(rows.saturating_sub(1) as f32) * spacing * 0.5;
        for r in 0..rows {
            for c in 0..cols {
                let center = Vec3::new(
                    x0 + c as f32 * spacing,
                    base_y + size * 0.5,
                    z0 + r as f32 * spacing,
                );
                field.add_cube(center, size);
            }
        }
        Ok(field)
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Add a box. Returns its index.
    pub fn add_box(&mut self, b: Aabb) -> usize {
        let index = self.boxes.len();
        self.boxes.push(b);
        let (lo, hi) = self.cell_span(&b);
        for x in lo.x..=hi.x {
            for z in lo.z..=hi.z {
                self.cells.entry(CellCoord::new(x, z)).or_default().push(index);
            }
        }
        index
    }

    /// Add a cube with edge length `size` centered on `center`.
    pub fn add_cube(&mut self, center: Vec3, size: f32) -> usize {
        self.add_box(Aabb::from_center(center, Vec3::splat(size * 0.5)))
    }

    /// Convert a world position to a cell coordinate.
    pub fn position_to_cell(&self, pos: Vec3) -> CellCoord {
        CellCoord {
            x: (pos.x / self.cell_size).floor() as i32,
            z: (pos.z / self.cell_size).floor() as i32,
        }
    }

    fn cell_span(&self, b: &Aabb) -> (CellCoord, CellCoord) {
        (self.position_to_cell(b.min), self.position_to_cell(b.max))
    }

    /// Indices of every box overlapping `volume`, sorted, without duplicates.
    pub fn overlapping(&self, volume: &Aabb) -> Vec<usize> {
        let mut hits = Vec::new();
        self.for_each_candidate(volume, |i| {
            if self.boxes[i].intersects(volume) {
                hits.push(i);
            }
            false
        });
        hits.sort_unstable();
        hits.dedup();
        hits
    }

    /// Visit candidate box indices under `volume` until `f` returns true.
    fn for_each_candidate(&self, volume: &Aabb, mut f: impl FnMut(usize) -> bool) -> bool {
        let (lo, hi) = self.cell_span(volume);
        for x in lo.x..=hi.x {
            for z in lo.z..=hi.z {
                let Some(indices) = self.cells.get(&CellCoord::new(x, z)) else {
                    continue;
                };
                for &i in indices {
                    if f(i) {
                        return true;
                    }
                }
            }
        }
        false
    }

    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Number of non-empty cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Total number of box placements across all cells.
    pub fn total_placements(&self) -> usize {
        self.cells.values().map(|v| v.len()).sum()
    }

    pub fn to_spec(&self) -> FieldSpec {
        FieldSpec {
            cell_size: self.cell_size,
            boxes: self.boxes.clone(),
        }
    }
}

impl CollisionQuery for CubeField {
    fn is_blocked(&self, volume: &Aabb) -> bool {
        self.for_each_candidate(volume, |i| self.boxes[i].intersects(volume))
    }
}

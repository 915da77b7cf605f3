/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for efficient neighbor lookups.
 * It divides the world into a grid of cells no smaller than the detection radius,
 * so every neighbor of a boid lies in the 3x3 block of cells around it and a query
 * only scans those cells instead of the whole flock.
 *
 * The grid is derived state: it is cleared and rebuilt from the boid positions
 * every tick (O(n)) and keeps its own copy of those positions, so queries always
 * see the start-of-tick snapshot.
 *
 * Optimized for performance by:
 * - Using squared distances for the exact radius filter
 * - Reusing cell buckets between rebuilds to avoid reallocations
 * - Using integer arithmetic for cell coordinates
 */

use tracing::debug;

use crate::boid::Boid;
use crate::bounds::WorldBounds;
use crate::error::SimError;
use crate::vector::Vector2;

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    bounds: WorldBounds,
    cell_size: f32,
    cols: usize,
    rows: usize,
    detection_radius: f32,
    detection_radius_sq: f32,
    cells: Vec<Vec<usize>>,
    positions: Vec<Vector2>,
}

fn check_radius(what: &str, value: f32) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidValue(format!(
            "{what} must be finite and positive (was {value})"
        )))
    }
}

impl SpatialGrid {
    /// Grid whose cells are exactly `detection_radius` wide.
    pub fn new(bounds: WorldBounds, detection_radius: f32) -> Result<Self, SimError> {
        Self::with_cell_size(bounds, detection_radius, detection_radius)
    }

    /// Grid with an explicit cell size. `detection_radius` may not exceed `cell_size`.
    pub fn with_cell_size(
        bounds: WorldBounds,
        cell_size: f32,
        detection_radius: f32,
    ) -> Result<Self, SimError> {
        check_radius("cell size", cell_size)?;
        check_radius("detection radius", detection_radius)?;
        if detection_radius > cell_size {
            return Err(SimError::InvalidValue(format!(
                "detection radius {detection_radius} exceeds cell size {cell_size}"
            )));
        }

        let mut grid = Self {
            bounds,
            cell_size,
            cols: 0,
            rows: 0,
            detection_radius,
            detection_radius_sq: detection_radius * detection_radius,
            cells: Vec::new(),
            positions: Vec::new(),
        };
        grid.allocate_cells();
        Ok(grid)
    }

    fn allocate_cells(&mut self) {
        self.cols = ((self.bounds.width / self.cell_size).ceil() as usize).max(1);
        self.rows = ((self.bounds.height / self.cell_size).ceil() as usize).max(1);
        self.cells = vec![Vec::new(); self.cols * self.rows];
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn detection_radius(&self) -> f32 {
        self.detection_radius
    }

    /// Number of (columns, rows).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Number of boids bucketed by the last rebuild.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Update the neighbor radius. A radius larger than the current cell size grows
    /// the cells to match and re-buckets the last snapshot.
    pub fn set_detection_radius(&mut self, radius: f32) -> Result<(), SimError> {
        check_radius("detection radius", radius)?;
        self.detection_radius = radius;
        self.detection_radius_sq = radius * radius;

        if radius > self.cell_size {
            debug!(
                old_cell_size = self.cell_size,
                new_cell_size = radius,
                "growing spatial grid cells to detection radius"
            );
            self.cell_size = radius;
            self.allocate_cells();
            self.rebucket();
        }
        Ok(())
    }

    /// Cell coordinates of a world position.
    #[inline]
    pub fn cell_of(&self, position: Vector2) -> (usize, usize) {
        let cx = (position.x / self.cell_size).floor() as i64;
        let cy = (position.y / self.cell_size).floor() as i64;
        (
            cx.rem_euclid(self.cols as i64) as usize,
            cy.rem_euclid(self.rows as i64) as usize,
        )
    }

    // Clear the grid
    fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    fn rebucket(&mut self) {
        self.clear();
        for i in 0..self.positions.len() {
            let (cx, cy) = self.cell_of(self.positions[i]);
            self.cells[cy * self.cols + cx].push(i);
        }
    }

    /// Clear every cell and re-bucket all boids by their current position.
    pub fn rebuild(&mut self, boids: &[Boid]) {
        self.positions.clear();
        self.positions.extend(boids.iter().map(|boid| boid.position));
        self.rebucket();
    }

    /// Collect into `out` every other boid within the detection radius of boid `index`.
    /// `out` is cleared first. Indices refer to the slice given to the last rebuild.
    pub fn neighbors_into(&self, index: usize, out: &mut Vec<usize>) {
        out.clear();
        let Some(&position) = self.positions.get(index) else {
            return;
        };

        let (cx, cy) = self.cell_of(position);
        let (cx, cy) = (cx as isize, cy as isize);

        // Check the cell and its neighbors (3x3 block, clamped at the grid edges)
        for check_y in (cy - 1)..=(cy + 1) {
            if check_y < 0 || check_y >= self.rows as isize {
                continue;
            }
            let row_start = check_y as usize * self.cols;

            for check_x in (cx - 1)..=(cx + 1) {
                if check_x < 0 || check_x >= self.cols as isize {
                    continue;
                }

                for &other in &self.cells[row_start + check_x as usize] {
                    if other != index
                        && position.distance_squared_to(self.positions[other])
                            <= self.detection_radius_sq
                    {
                        out.push(other);
                    }
                }
            }
        }
    }

    /// Allocating form of [`SpatialGrid::neighbors_into`].
    pub fn neighbors_of(&self, index: usize) -> Vec<usize> {
        let mut out = Vec::new();
        self.neighbors_into(index, &mut out);
        out
    }

    /// O(n) reference scan over the same snapshot, without the grid.
    pub fn brute_force_neighbors(&self, index: usize) -> Vec<usize> {
        let Some(&position) = self.positions.get(index) else {
            return Vec::new();
        };
        self.positions
            .iter()
            .enumerate()
            .filter(|&(other, &p)| {
                other != index && position.distance_squared_to(p) <= self.detection_radius_sq
            })
            .map(|(other, _)| other)
            .collect()
    }
}

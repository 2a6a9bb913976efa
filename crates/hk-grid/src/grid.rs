//! Uniform grid rebuilt from scratch every tick.
//!
//! # Data layout
//!
//! Cells are stored in **Compressed Sparse Row (CSR)** form.  For the flat
//! cell index `c = cy * dim + cx`, the agents in that cell occupy:
//!
//! ```text
//! entries[ cell_start[c] .. cell_start[c + 1] ]
//! ```
//!
//! A rebuild is a counting sort: one pass to count agents per cell, a prefix
//! sum, one pass to scatter.  O(N + cells), no per-cell allocation, and every
//! bucket lists its agents in ascending `AgentId` order, so neighbour scans
//! are deterministic.
//!
//! Agents move every tick, so the grid is never updated incrementally.

use hk_core::{AgentId, MAX_GRID_CELLS, Vec2};

use crate::{GridError, GridResult};

/// Square grid of `dim × dim` cells covering `[-field/2, field/2]²`.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    field_size:  f32,
    half_extent: f32,
    cell_size:   f32,
    dim:         usize,

    /// CSR row pointer.  Length = `dim * dim + 1`.
    cell_start: Vec<u32>,

    /// Agent ids grouped by cell.  Length = agent count after a rebuild.
    entries: Vec<AgentId>,

    /// Flat cell index of each agent as of the last rebuild.
    agent_cell: Vec<u32>,

    /// Scatter cursor reused across rebuilds.
    cursor: Vec<u32>,
}

impl SpatialGrid {
    /// Create an empty grid.  `dim = ceil(field_size / cell_size)`, at least 1,
    /// with at most [`MAX_GRID_CELLS`] cells in total.
    pub fn new(field_size: f32, cell_size: f32) -> GridResult<Self> {
        let valid = field_size.is_finite()
            && cell_size.is_finite()
            && field_size > 0.0
            && cell_size > 0.0;
        let dim = (field_size / cell_size).ceil();
        if !valid || dim > u32::MAX as f32 {
            return Err(GridError::InvalidDimensions { field_size, cell_size });
        }
        let dim = (dim as usize).max(1);
        let cells = dim
            .checked_mul(dim)
            .filter(|&cells| cells <= MAX_GRID_CELLS)
            .ok_or(GridError::InvalidDimensions { field_size, cell_size })?;

        Ok(Self {
            field_size,
            half_extent: field_size * 0.5,
            cell_size,
            dim,
            cell_start: vec![0; cells + 1],
            entries: Vec::new(),
            agent_cell: Vec::new(),
            cursor: vec![0; cells],
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    /// Cells per side.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.dim * self.dim
    }

    /// Number of agents indexed by the last rebuild.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ── Cell lookup ───────────────────────────────────────────────────────

    /// Cell column/row covering `p`.  Points outside the field land in the
    /// nearest edge cell.
    #[inline]
    pub fn cell_coords(&self, p: Vec2) -> (usize, usize) {
        (self.axis_cell(p.x), self.axis_cell(p.y))
    }

    #[inline]
    fn axis_cell(&self, v: f32) -> usize {
        let scaled = ((v + self.half_extent) / self.field_size * self.dim as f32).floor();
        // NaN and negatives both fall to 0 through the saturating cast.
        (scaled as i64).clamp(0, self.dim as i64 - 1) as usize
    }

    #[inline]
    fn flat(&self, cx: usize, cy: usize) -> usize {
        cy * self.dim + cx
    }

    /// Agents in cell `(cx, cy)` as of the last rebuild.
    ///
    /// # Panics
    /// Panics if either coordinate is `>= dim`.
    #[inline]
    pub fn cell(&self, cx: usize, cy: usize) -> &[AgentId] {
        assert!(cx < self.dim && cy < self.dim, "cell ({cx}, {cy}) outside {0}x{0} grid", self.dim);
        let c = self.flat(cx, cy);
        &self.entries[self.cell_start[c] as usize..self.cell_start[c + 1] as usize]
    }

    /// Cell `agent` was filed under by the last rebuild.
    #[inline]
    pub fn cell_of(&self, agent: AgentId) -> (usize, usize) {
        let c = self.agent_cell[agent.index()] as usize;
        (c % self.dim, c / self.dim)
    }

    // ── Rebuild ───────────────────────────────────────────────────────────

    /// Re-bucket every agent from its current position.
    ///
    /// Afterwards each index in `0..positions.len()` appears in exactly one
    /// cell: the one covering its position.
    pub fn rebuild(&mut self, positions: &[Vec2]) {
        let cells = self.cell_count();

        self.cell_start.iter_mut().for_each(|c| *c = 0);
        self.agent_cell.clear();
        self.agent_cell.reserve(positions.len());

        // ① count
        for &p in positions {
            let (cx, cy) = self.cell_coords(p);
            let c = self.flat(cx, cy);
            self.agent_cell.push(c as u32);
            self.cell_start[c + 1] += 1;
        }

        // ② prefix sum
        for c in 0..cells {
            self.cell_start[c + 1] += self.cell_start[c];
        }

        // ③ scatter
        self.cursor.copy_from_slice(&self.cell_start[..cells]);
        self.entries.clear();
        self.entries.resize(positions.len(), AgentId::INVALID);
        for (i, &c) in self.agent_cell.iter().enumerate() {
            let slot = &mut self.cursor[c as usize];
            self.entries[*slot as usize] = AgentId(i as u32);
            *slot += 1;
        }
    }

    // ── Neighbour queries ─────────────────────────────────────────────────

    /// Visit every agent in the 3×3 block of cells centred on the cell
    /// covering `p`.  Cells past the grid edge are skipped; there is no
    /// wraparound.  The caller filters by distance and excludes itself.
    ///
    /// The block reaches at least one full cell in every direction.  With the
    /// crowd's `gap / 2` cells, neighbours between 1.5 and 2 cells away may
    /// be missed.
    #[inline]
    pub fn for_each_nearby(&self, p: Vec2, mut visit: impl FnMut(AgentId)) {
        let (cx, cy) = self.cell_coords(p);
        let x0 = cx.saturating_sub(1);
        let y0 = cy.saturating_sub(1);
        let x1 = (cx + 1).min(self.dim - 1);
        let y1 = (cy + 1).min(self.dim - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let c = self.flat(x, y);
                let bucket = &self.entries[self.cell_start[c] as usize..self.cell_start[c + 1] as usize];
                for &agent in bucket {
                    visit(agent);
                }
            }
        }
    }

    /// Collecting variant of [`for_each_nearby`](Self::for_each_nearby),
    /// reusing `out` to avoid per-query allocation.
    pub fn nearby_into(&self, p: Vec2, out: &mut Vec<AgentId>) {
        out.clear();
        self.for_each_nearby(p, |a| out.push(a));
    }
}

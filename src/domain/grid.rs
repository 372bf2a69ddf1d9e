// Dashlet grid - non-overlapping placement of dashlets on one tab
use super::dashlet::{canonical_sort, DashletConfig, GridPosition};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid position {0} is already occupied")]
    Occupied(GridPosition),
    #[error("no dashlet at grid position {0}")]
    NotFound(GridPosition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    /// Columns scanned when looking for a free slot
    pub columns: u32,
    /// First column/row index (the grid widget counts from 1)
    pub origin: u32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self { columns: 3, origin: 1 }
    }
}

#[derive(Debug, Clone)]
pub struct DashletGrid {
    dashboard: String,
    geometry: GridGeometry,
    dashlets: Vec<DashletConfig>,
}

impl DashletGrid {
    pub fn new(dashboard: impl Into<String>, geometry: GridGeometry) -> Self {
        Self {
            dashboard: dashboard.into(),
            geometry,
            dashlets: Vec::new(),
        }
    }

    pub fn dashboard(&self) -> &str {
        &self.dashboard
    }

    pub fn len(&self) -> usize {
        self.dashlets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dashlets.is_empty()
    }

    pub fn get(&self, position: GridPosition) -> Option<&DashletConfig> {
        self.dashlets.iter().find(|d| d.position() == position)
    }

    pub fn is_occupied(&self, position: GridPosition) -> bool {
        self.get(position).is_some()
    }

    /// Insert a dashlet at its stored position
    pub fn insert_at(&mut self, dashlet: DashletConfig) -> Result<(), GridError> {
        let position = dashlet.position();
        if self.is_occupied(position) {
            return Err(GridError::Occupied(position));
        }
        self.dashlets.push(dashlet);
        Ok(())
    }

    /// Insert a dashlet at the first free slot, scanning row by row
    pub fn add(&mut self, mut dashlet: DashletConfig) -> GridPosition {
        let position = self.next_free_position();
        dashlet.set_position(position);
        self.dashlets.push(dashlet);
        position
    }

    pub fn next_free_position(&self) -> GridPosition {
        let origin = self.geometry.origin;
        let columns = self.geometry.columns.max(1);
        let mut row = origin;
        loop {
            for col in origin..=origin.saturating_add(columns - 1) {
                let candidate = GridPosition::new(col, row);
                if !self.is_occupied(candidate) {
                    return candidate;
                }
            }
            row = row.saturating_add(1);
        }
    }

    pub fn remove_at(&mut self, position: GridPosition) -> Result<DashletConfig, GridError> {
        let index = self.index_of(position)?;
        Ok(self.dashlets.remove(index))
    }

    /// Move a dashlet; an occupant of the target slot takes the vacated one
    pub fn move_to(&mut self, from: GridPosition, to: GridPosition) -> Result<(), GridError> {
        let index = self.index_of(from)?;
        if from == to {
            return Ok(());
        }
        if let Ok(other) = self.index_of(to) {
            self.dashlets[other].set_position(from);
        }
        self.dashlets[index].set_position(to);
        Ok(())
    }

    pub fn set_visible(&mut self, position: GridPosition, show: bool) -> Result<(), GridError> {
        let index = self.index_of(position)?;
        self.dashlets[index].show = show;
        Ok(())
    }

    /// Records for persistence: stamped with this tab's id, canonically ordered
    pub fn serialize(&self) -> Vec<DashletConfig> {
        let mut records: Vec<DashletConfig> = self
            .dashlets
            .iter()
            .cloned()
            .map(|mut d| {
                d.dashboard = self.dashboard.clone();
                d
            })
            .collect();
        canonical_sort(&mut records);
        records
    }

    fn index_of(&self, position: GridPosition) -> Result<usize, GridError> {
        self.dashlets
            .iter()
            .position(|d| d.position() == position)
            .ok_or(GridError::NotFound(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> DashletGrid {
        DashletGrid::new("t1", GridGeometry { columns: 2, origin: 1 })
    }

    fn dashlet_at(id: &str, col: u32, row: u32) -> DashletConfig {
        let mut dashlet = DashletConfig::measurement("t1", "Host", id);
        dashlet.set_position(GridPosition::new(col, row));
        dashlet
    }

    #[test]
    fn test_insert_rejects_overlap() {
        let mut grid = grid();
        grid.insert_at(dashlet_at("cpu", 1, 1)).unwrap();
        let err = grid.insert_at(dashlet_at("mem", 1, 1)).unwrap_err();
        assert_eq!(err, GridError::Occupied(GridPosition::new(1, 1)));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_add_fills_rows_before_wrapping() {
        let mut grid = grid();
        grid.insert_at(dashlet_at("cpu", 1, 1)).unwrap();
        assert_eq!(grid.add(dashlet_at("mem", 0, 0)), GridPosition::new(2, 1));
        assert_eq!(grid.add(dashlet_at("gc", 0, 0)), GridPosition::new(1, 2));
    }

    #[test]
    fn test_add_reuses_gap() {
        let mut grid = grid();
        grid.insert_at(dashlet_at("cpu", 2, 1)).unwrap();
        grid.insert_at(dashlet_at("mem", 1, 2)).unwrap();
        assert_eq!(grid.add(dashlet_at("gc", 0, 0)), GridPosition::new(1, 1));
    }

    #[test]
    fn test_next_free_position_with_extreme_geometry() {
        let mut grid = DashletGrid::new("t1", GridGeometry { columns: u32::MAX, origin: u32::MAX - 1 });
        assert_eq!(grid.add(dashlet_at("cpu", 0, 0)), GridPosition::new(u32::MAX - 1, u32::MAX - 1));
        assert_eq!(grid.next_free_position(), GridPosition::new(u32::MAX, u32::MAX - 1));
    }

    #[test]
    fn test_move_swaps_with_occupant() {
        let mut grid = grid();
        grid.insert_at(dashlet_at("cpu", 1, 1)).unwrap();
        grid.insert_at(dashlet_at("mem", 2, 1)).unwrap();

        grid.move_to(GridPosition::new(1, 1), GridPosition::new(2, 1)).unwrap();

        assert_eq!(grid.get(GridPosition::new(2, 1)).unwrap().id, "cpu");
        assert_eq!(grid.get(GridPosition::new(1, 1)).unwrap().id, "mem");
    }

    #[test]
    fn test_move_into_empty_slot() {
        let mut grid = grid();
        grid.insert_at(dashlet_at("cpu", 1, 1)).unwrap();
        grid.move_to(GridPosition::new(1, 1), GridPosition::new(2, 3)).unwrap();
        assert!(!grid.is_occupied(GridPosition::new(1, 1)));
        assert_eq!(grid.get(GridPosition::new(2, 3)).unwrap().id, "cpu");
    }

    #[test]
    fn test_remove_missing_position() {
        let mut grid = grid();
        let err = grid.remove_at(GridPosition::new(1, 1)).unwrap_err();
        assert_eq!(err, GridError::NotFound(GridPosition::new(1, 1)));
    }

    #[test]
    fn test_serialize_is_sorted_and_stamped() {
        let mut grid = grid();
        let mut foreign = dashlet_at("gc", 1, 2);
        foreign.dashboard = "other".to_string();
        grid.insert_at(foreign).unwrap();
        grid.insert_at(dashlet_at("mem", 2, 1)).unwrap();
        grid.insert_at(dashlet_at("cpu", 1, 1)).unwrap();

        let records = grid.serialize();
        let ids: Vec<_> = records.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["cpu", "mem", "gc"]);
        assert!(records.iter().all(|d| d.dashboard == "t1"));
    }
}

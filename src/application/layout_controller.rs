// Dashboard layout controller - per-tab grid state, edit mode and persistence
use crate::application::dashboard_backend::DashboardBackend;
use crate::domain::dashlet::GridPosition;
use crate::domain::edit_form::{EditForm, EditFormUpdate, UNIT_TEST_OVERVIEW_GROUP};
use crate::domain::grid::{DashletGrid, GridError, GridGeometry};
use crate::domain::render::DashletView;
use futures::future::join_all;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("unknown dashboard tab '{0}'")]
    UnknownTab(String),
    #[error("dashboard tab '{0}' is not in edit mode")]
    NotEditing(String),
    #[error("no measure selected in measure group '{0}'")]
    IncompleteForm(String),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("backend request failed: {0:#}")]
    Backend(#[from] anyhow::Error),
}

pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    View,
    Edit,
}

#[derive(Debug, Clone)]
pub struct TabState {
    pub grid: DashletGrid,
    pub mode: Mode,
    pub form: EditForm,
    pub measures: BTreeMap<String, String>,
    pub load_error: Option<String>,
}

impl TabState {
    fn new(tab: &str, geometry: GridGeometry) -> Self {
        Self {
            grid: DashletGrid::new(tab, geometry),
            mode: Mode::View,
            form: EditForm {
                measure_group: UNIT_TEST_OVERVIEW_GROUP.to_string(),
                ..Default::default()
            },
            measures: BTreeMap::new(),
            load_error: None,
        }
    }
}

/// What the rendering surface needs to draw one tab
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabView {
    pub tab: String,
    pub mode: Mode,
    pub controls_visible: bool,
    pub load_error: Option<String>,
    pub form: Option<EditForm>,
    pub measures: BTreeMap<String, String>,
    pub dashlets: Vec<DashletView>,
}

pub struct DashboardLayoutController {
    backend: Arc<dyn DashboardBackend>,
    geometry: GridGeometry,
    tabs: HashMap<String, TabState>,
}

impl DashboardLayoutController {
    pub fn new(backend: Arc<dyn DashboardBackend>, geometry: GridGeometry) -> Self {
        Self {
            backend,
            geometry,
            tabs: HashMap::new(),
        }
    }

    /// Load every tab; tabs load concurrently, each one loads before it is placed
    pub async fn initialize(&mut self, tabs: &[String]) {
        let states = join_all(tabs.iter().map(|tab| self.load_tab(tab))).await;
        for state in states {
            self.tabs.insert(state.grid.dashboard().to_string(), state);
        }
        tracing::info!("Initialized {} dashboard tabs", self.tabs.len());
    }

    async fn load_tab(&self, tab: &str) -> TabState {
        let mut state = TabState::new(tab, self.geometry);

        match self.backend.get_dashboard_configuration(tab).await {
            Ok(records) => {
                for record in records.into_iter().filter(|r| r.belongs_to(tab)) {
                    // Stored collisions move the later dashlet to the next free slot
                    if let Err(e) = state.grid.insert_at(record.clone()) {
                        let id = record.id.clone();
                        let placed = state.grid.add(record);
                        tracing::warn!("Dashlet {} on tab {}: {}, placed at {}", id, tab, e, placed);
                    }
                }
                if state.grid.is_empty() {
                    tracing::debug!("No dashlets configured for tab {}", tab);
                } else {
                    tracing::debug!("Loaded {} dashlets for tab {}", state.grid.len(), tab);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to load configuration for tab {}: {:#}", tab, e);
                state.load_error = Some(format!("{:#}", e));
            }
        }

        state
    }

    async fn reload(&mut self, tab: &str) {
        let state = self.load_tab(tab).await;
        self.tabs.insert(tab.to_string(), state);
    }

    pub fn tab(&self, tab: &str) -> LayoutResult<&TabState> {
        self.tabs
            .get(tab)
            .ok_or_else(|| LayoutError::UnknownTab(tab.to_string()))
    }

    fn editing(&self, tab: &str) -> LayoutResult<&TabState> {
        let state = self.tab(tab)?;
        if state.mode != Mode::Edit {
            return Err(LayoutError::NotEditing(tab.to_string()));
        }
        Ok(state)
    }

    fn editing_mut(&mut self, tab: &str) -> LayoutResult<&mut TabState> {
        let state = self
            .tabs
            .get_mut(tab)
            .ok_or_else(|| LayoutError::UnknownTab(tab.to_string()))?;
        if state.mode != Mode::Edit {
            return Err(LayoutError::NotEditing(tab.to_string()));
        }
        Ok(state)
    }

    pub fn view(&self, tab: &str) -> LayoutResult<TabView> {
        let state = self.tab(tab)?;
        let editing = state.mode == Mode::Edit;
        Ok(TabView {
            tab: tab.to_string(),
            mode: state.mode,
            controls_visible: editing,
            load_error: state.load_error.clone(),
            form: editing.then(|| state.form.clone()),
            measures: if editing {
                state.measures.clone()
            } else {
                BTreeMap::new()
            },
            dashlets: state
                .grid
                .serialize()
                .iter()
                .map(DashletView::from_config)
                .collect(),
        })
    }

    pub async fn enter_edit(&mut self, tab: &str) -> LayoutResult<()> {
        let state = self
            .tabs
            .get_mut(tab)
            .ok_or_else(|| LayoutError::UnknownTab(tab.to_string()))?;
        state.mode = Mode::Edit;
        tracing::debug!("Tab {} entered edit mode", tab);
        self.refresh_measures(tab).await
    }

    /// Repopulate the measure selector for the selected group
    async fn refresh_measures(&mut self, tab: &str) -> LayoutResult<()> {
        let form = self.editing(tab)?.form.clone();
        let measures = if form.is_unit_test_overview() {
            BTreeMap::new()
        } else {
            self.backend
                .get_available_measures(tab, &form.measure_group)
                .await?
        };

        let first = measures.keys().next().cloned();
        let state = self.editing_mut(tab)?;
        state.measures = measures;
        state.form.measure = None;

        match first {
            Some(measure) => self.select_measure(tab, &measure).await,
            None => Ok(()),
        }
    }

    pub async fn select_measure_group(&mut self, tab: &str, group: &str) -> LayoutResult<()> {
        self.editing_mut(tab)?.form.select_group(group);
        self.refresh_measures(tab).await
    }

    /// Select a measure and resolve its default aggregation
    pub async fn select_measure(&mut self, tab: &str, measure: &str) -> LayoutResult<()> {
        let form = self.editing(tab)?.form.clone();
        let aggregation = if form.is_unit_test_overview() {
            String::new()
        } else {
            self.backend
                .get_aggregation_from_measure(tab, &form.measure_group, measure)
                .await?
        };

        let form = &mut self.editing_mut(tab)?.form;
        form.measure = Some(measure.to_string());
        form.aggregation = aggregation.trim().to_string();
        Ok(())
    }

    /// Apply a form update as a whole; when a lookup fails the form is left as it was
    pub async fn update_form(&mut self, tab: &str, update: EditFormUpdate) -> LayoutResult<()> {
        let state = self.editing(tab)?;
        let snapshot = (state.form.clone(), state.measures.clone());

        if let Err(e) = self.apply_selection(tab, &update).await {
            let state = self.editing_mut(tab)?;
            (state.form, state.measures) = snapshot;
            return Err(e);
        }

        // Plain fields go last so they win over what the group switch cleared
        let form = &mut self.editing_mut(tab)?.form;
        if let Some(custom_name) = update.custom_name {
            form.custom_name = custom_name;
        }
        if let Some(custom_build_count) = update.custom_build_count {
            form.custom_build_count = custom_build_count;
        }
        if let Some(aggregation) = update.aggregation {
            form.aggregation = aggregation;
        }
        Ok(())
    }

    async fn apply_selection(&mut self, tab: &str, update: &EditFormUpdate) -> LayoutResult<()> {
        if let Some(group) = &update.measure_group {
            if *group != self.editing(tab)?.form.measure_group {
                self.select_measure_group(tab, group).await?;
            }
        }
        if let Some(measure) = &update.measure {
            self.select_measure(tab, measure).await?;
        }
        Ok(())
    }

    pub fn add_widget(&mut self, tab: &str) -> LayoutResult<GridPosition> {
        let state = self.editing_mut(tab)?;
        let dashlet = state
            .form
            .to_dashlet(tab)
            .ok_or_else(|| LayoutError::IncompleteForm(state.form.measure_group.clone()))?;
        let position = state.grid.add(dashlet);
        tracing::debug!("Added dashlet to tab {} at {}", tab, position);
        Ok(position)
    }

    pub fn remove_widget(&mut self, tab: &str, position: GridPosition) -> LayoutResult<()> {
        let removed = self.editing_mut(tab)?.grid.remove_at(position)?;
        tracing::debug!("Removed dashlet {} from tab {} at {}", removed.id, tab, position);
        Ok(())
    }

    pub fn move_widget(
        &mut self,
        tab: &str,
        from: GridPosition,
        to: GridPosition,
    ) -> LayoutResult<()> {
        Ok(self.editing_mut(tab)?.grid.move_to(from, to)?)
    }

    pub fn set_visibility(
        &mut self,
        tab: &str,
        position: GridPosition,
        show: bool,
    ) -> LayoutResult<()> {
        Ok(self.editing_mut(tab)?.grid.set_visible(position, show)?)
    }

    /// Drop all local edits by reloading the tab from the backend
    pub async fn cancel_edit(&mut self, tab: &str) -> LayoutResult<()> {
        self.tab(tab)?;
        self.reload(tab).await;
        tracing::debug!("Tab {} edit cancelled", tab);
        Ok(())
    }

    /// Persist the grid; on failure the tab stays in edit mode with its edits intact
    pub async fn save(&mut self, tab: &str) -> LayoutResult<()> {
        let records = self.editing(tab)?.grid.serialize();

        if let Err(e) = self
            .backend
            .set_dashboard_configuration(tab, &records)
            .await
        {
            tracing::error!("Failed to save configuration for tab {}: {:#}", tab, e);
            return Err(e.into());
        }

        tracing::info!("Saved {} dashlets for tab {}", records.len(), tab);
        self.reload(tab).await;
        Ok(())
    }
}

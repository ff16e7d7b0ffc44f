use crate::braille::BrailleCanvas;
use crate::engine::SelectionResult;
use crate::map::geometry::{draw_ring, fill_polygon};
use crate::map::projected::ProjectedMap;
use crate::region::RegionId;

/// Display settings for map layers
#[derive(Clone)]
pub struct DisplaySettings {
    pub show_counties: bool,
    pub show_states: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_counties: true,
            show_states: true,
        }
    }
}

/// Rendered layers, drawn back to front with their own colors
pub struct MapLayers {
    pub counties: BrailleCanvas,
    pub states: BrailleCanvas,
    pub selected: BrailleCanvas,
    pub hovered: BrailleCanvas,
}

impl MapLayers {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            counties: BrailleCanvas::new(cols, rows),
            states: BrailleCanvas::new(cols, rows),
            selected: BrailleCanvas::new(cols, rows),
            hovered: BrailleCanvas::new(cols, rows),
        }
    }
}

/// Draws county outlines, state outlines and the current selection
#[derive(Default)]
pub struct MapRenderer {
    pub settings: DisplaySettings,
}

impl MapRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render all layers onto canvases of `cols` x `rows` characters
    pub fn render(
        &self,
        map: &ProjectedMap,
        selection: &SelectionResult,
        hovered: Option<&RegionId>,
        cols: usize,
        rows: usize,
    ) -> MapLayers {
        let mut layers = MapLayers::new(cols, rows);

        if self.settings.show_counties {
            for county in map.counties() {
                for ring in county.polygons.iter().flatten() {
                    draw_ring(&mut layers.counties, ring);
                }
            }
        }

        if self.settings.show_states {
            for ring in map.states() {
                draw_ring(&mut layers.states, ring);
            }
        }

        for id in &selection.selected {
            if Some(id) == hovered {
                continue;
            }
            if let Some(county) = map.county(id) {
                for polygon in &county.polygons {
                    fill_polygon(&mut layers.selected, polygon);
                }
            }
        }

        if let Some(county) = hovered.and_then(|id| map.county(id)) {
            for polygon in &county.polygons {
                fill_polygon(&mut layers.hovered, polygon);
            }
        }

        layers
    }

    /// Toggle county outlines
    pub fn toggle_counties(&mut self) {
        self.settings.show_counties = !self.settings.show_counties;
    }

    /// Toggle state outlines
    pub fn toggle_states(&mut self) {
        self.settings.show_states = !self.settings.show_states;
    }
}

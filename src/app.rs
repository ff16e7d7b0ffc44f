use crate::data::Dataset;
use crate::engine::{SelectionEngine, SelectionResult};
use crate::format::thousands;
use crate::map::{MapRenderer, ProjectedMap, Viewport};
use crate::region::{ReferencePoint, Region, RegionId};
use glam::DVec2;
use tracing::{debug, warn};

/// Terminal rows taken by the map border and the two status lines
const CHROME_ROWS: usize = 4;
/// Terminal columns taken by the map border
const CHROME_COLS: usize = 2;

/// Application state
pub struct App {
    pub dataset: Dataset,
    pub map: ProjectedMap,
    pub map_renderer: MapRenderer,
    pub should_quit: bool,
    /// Index into `dataset.cities` of the active reference city
    city_idx: usize,
    /// County under the mouse, only set when it has population data
    hovered: Option<RegionId>,
    selection: SelectionResult,
    /// Current mouse position for cursor marker
    pub mouse_pos: Option<(u16, u16)>,
}

impl App {
    pub fn new(dataset: Dataset, initial_city: &str, width: usize, height: usize) -> Self {
        let city_idx = dataset.cities.iter().position(|c| c.name == initial_city).unwrap_or_else(|| {
            warn!(city = initial_city, "initial city not found, using the first city");
            0
        });
        let map = ProjectedMap::build(&dataset.shapes, Self::viewport_for(width, height));

        Self {
            dataset,
            map,
            map_renderer: MapRenderer::new(),
            should_quit: false,
            city_idx,
            hovered: None,
            selection: SelectionResult::empty(),
            mouse_pos: None,
        }
    }

    /// Canvas size left for the map inside a terminal of `width` x `height`
    fn viewport_for(width: usize, height: usize) -> Viewport {
        let cols = width.saturating_sub(CHROME_COLS);
        let rows = height.saturating_sub(CHROME_ROWS);
        Viewport::from_cells(cols as u16, rows as u16)
    }

    /// Rebuild the projection for a new terminal size. Centroids from the
    /// old size are discarded with the old map.
    pub fn resize(&mut self, width: usize, height: usize) {
        let viewport = Self::viewport_for(width, height);
        if viewport == self.map.viewport() {
            return;
        }
        debug!(width = viewport.width, height = viewport.height, "rebuilding projection");
        self.map = ProjectedMap::build(&self.dataset.shapes, viewport);
        // The same cell now covers a different spot on the rescaled map
        if let Some((col, row)) = self.mouse_pos {
            self.hovered = self.county_at_cell(col, row).filter(|id| self.dataset.catalog.get(id).is_some());
        }
        self.refresh_selection();
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn city(&self) -> Option<&ReferencePoint> {
        self.dataset.cities.get(self.city_idx)
    }

    pub fn next_city(&mut self) {
        if !self.dataset.cities.is_empty() {
            self.city_idx = (self.city_idx + 1) % self.dataset.cities.len();
            self.on_city_changed();
        }
    }

    pub fn prev_city(&mut self) {
        let n = self.dataset.cities.len();
        if n > 0 {
            self.city_idx = (self.city_idx + n - 1) % n;
            self.on_city_changed();
        }
    }

    fn on_city_changed(&mut self) {
        self.selection = SelectionResult::empty();
        self.refresh_selection();
    }

    /// Track the mouse and hover whatever county sits under it
    pub fn set_mouse_pos(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
        let county = self.county_at_cell(col, row);
        self.hover(county);
    }

    /// Hover a county (or nothing). Counties without population data are
    /// treated like empty map space.
    pub fn hover(&mut self, county: Option<RegionId>) {
        let county = county.filter(|id| self.dataset.catalog.get(id).is_some());
        if county == self.hovered {
            return;
        }
        self.hovered = county;
        self.refresh_selection();
    }

    /// Recompute the selection for the current hover and city
    fn refresh_selection(&mut self) {
        let selection = match (self.hovered, self.city()) {
            (Some(anchor), Some(city)) => {
                SelectionEngine::new(&self.dataset.catalog, &self.map).select(&anchor, city.population)
            }
            _ => SelectionResult::empty(),
        };
        self.selection = selection;
    }

    /// Convert terminal cell to the braille pixel at its centre and find the
    /// county there. Accounts for the 1-cell map border.
    fn county_at_cell(&self, col: u16, row: u16) -> Option<RegionId> {
        let (px, py) = cell_to_pixel(col, row)?;
        self.map.county_at(DVec2::new(px, py))
    }

    pub fn hovered(&self) -> Option<&RegionId> {
        self.hovered.as_ref()
    }

    pub fn hovered_region(&self) -> Option<&Region> {
        self.hovered.as_ref().and_then(|id| self.dataset.catalog.get(id))
    }

    pub fn selection(&self) -> &SelectionResult {
        &self.selection
    }

    /// First status line: the active city and, while hovering, the total
    /// population of the highlighted counties
    pub fn city_info(&self) -> String {
        let Some(city) = self.city() else {
            return "No reference cities loaded".to_string();
        };

        if self.selection.is_empty() {
            return format!(
                "{} population: {}, the colored counties contain the same number",
                city.name,
                thousands(city.population)
            );
        }

        let mut info = format!(
            "{} population: {} | Selected counties population: {} ({} counties)",
            city.name,
            thousands(city.population),
            thousands(self.selection.achieved_total),
            self.selection.len()
        );
        let shortfall = self.selection.shortfall(city.population);
        if shortfall > 0 {
            info.push_str(&format!(" short by {}", thousands(shortfall)));
        }
        info
    }

    /// Tooltip text for the hovered county
    pub fn tooltip(&self) -> Option<String> {
        self.hovered_region().map(|region| {
            format!(
                "{}, {} | Population: {}",
                region.name,
                region.parent_name,
                thousands(region.population)
            )
        })
    }

    /// Get mouse position in character coordinates inside the map border
    pub fn mouse_cell(&self) -> Option<(u16, u16)> {
        self.mouse_pos
            .filter(|&(col, row)| col >= 1 && row >= 1)
            .map(|(col, row)| (col - 1, row - 1))
    }
}

/// Centre pixel of a terminal cell inside the bordered map area
fn cell_to_pixel(col: u16, row: u16) -> Option<(f64, f64)> {
    if col == 0 || row == 0 {
        return None;
    }
    let px = (col - 1) as f64 * 2.0 + 1.0;
    let py = (row - 1) as f64 * 4.0 + 2.0;
    Some((px, py))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapShapes;
    use crate::region::{Region, RegionCatalog};

    fn id(code: &str) -> RegionId {
        RegionId::normalize(code).unwrap()
    }

    /// Three side-by-side 2°x2° counties in Kansas plus one without data
    fn dataset() -> Dataset {
        let mut shapes = MapShapes::new();
        for (i, code) in ["20001", "20003", "20005", "20007"].iter().enumerate() {
            let lon = -101.0 + 2.0 * i as f64;
            shapes.add_county(
                id(code),
                vec![vec![vec![(lon, 37.0), (lon + 2.0, 37.0), (lon + 2.0, 39.0), (lon, 39.0), (lon, 37.0)]]],
            );
        }

        let catalog: RegionCatalog = [("20001", 100), ("20003", 50), ("20005", 200)]
            .iter()
            .map(|&(code, population)| Region {
                id: id(code),
                population,
                name: format!("County {code}"),
                parent_name: "Kansas".to_string(),
            })
            .collect();

        let cities = vec![
            ReferencePoint {
                name: "Smallville".to_string(),
                country: "USA".to_string(),
                population: 120,
            },
            ReferencePoint {
                name: "Bigtown".to_string(),
                country: "USA".to_string(),
                population: 10_000,
            },
        ];

        Dataset { catalog, cities, shapes }
    }

    #[test]
    fn test_initial_city_fallback() {
        let app = App::new(dataset(), "Atlantis", 120, 40);
        assert_eq!(app.city().unwrap().name, "Smallville");
        let app = App::new(dataset(), "Bigtown", 120, 40);
        assert_eq!(app.city().unwrap().name, "Bigtown");
    }

    #[test]
    fn test_hover_selects_nearest() {
        let mut app = App::new(dataset(), "Smallville", 120, 40);
        app.hover(Some(id("20001")));
        assert_eq!(app.selection().selected, vec![id("20001"), id("20003")]);
        assert_eq!(app.selection().achieved_total, 150);
        assert!(app.tooltip().unwrap().contains("County 20001, Kansas"));
    }

    #[test]
    fn test_hover_without_data_clears() {
        let mut app = App::new(dataset(), "Smallville", 120, 40);
        app.hover(Some(id("20001")));
        app.hover(Some(id("20007")));
        assert!(app.hovered().is_none());
        assert!(app.selection().is_empty());
        assert!(app.tooltip().is_none());
    }

    #[test]
    fn test_city_change_recomputes() {
        let mut app = App::new(dataset(), "Smallville", 120, 40);
        app.hover(Some(id("20003")));
        app.next_city();
        assert_eq!(app.city().unwrap().name, "Bigtown");
        assert_eq!(app.selection().achieved_total, 350);
        assert!(app.city_info().contains("short by 9,650"));
        app.next_city();
        assert_eq!(app.city().unwrap().name, "Smallville");
        app.prev_city();
        assert_eq!(app.city().unwrap().name, "Bigtown");
    }

    #[test]
    fn test_resize_keeps_selection() {
        let mut app = App::new(dataset(), "Smallville", 120, 40);
        app.hover(Some(id("20005")));
        let before = app.selection().clone();
        app.resize(200, 60);
        assert_eq!(app.map.viewport(), Viewport::from_cells(198, 56));
        assert_eq!(app.selection(), &before);
    }

    #[test]
    fn test_mouse_over_map_hovers_county() {
        let mut app = App::new(dataset(), "Smallville", 120, 40);
        let centroid = app.map.county(&id("20003")).unwrap().centroid;
        let col = (centroid.x / 2.0) as u16 + 1;
        let row = (centroid.y / 4.0) as u16 + 1;
        app.set_mouse_pos(col, row);
        assert_eq!(app.hovered(), Some(&id("20003")));
        app.set_mouse_pos(0, 0);
        assert!(app.hovered().is_none());
    }

    #[test]
    fn test_resize_rehovers_under_mouse() {
        let mut app = App::new(dataset(), "Smallville", 120, 40);
        let centroid = app.map.county(&id("20003")).unwrap().centroid;
        let col = (centroid.x / 2.0) as u16 + 1;
        let row = (centroid.y / 4.0) as u16 + 1;
        app.set_mouse_pos(col, row);
        assert_eq!(app.hovered(), Some(&id("20003")));

        app.resize(200, 60);
        let under_mouse = app.county_at_cell(col, row).filter(|id| app.dataset.catalog.get(id).is_some());
        assert_eq!(app.hovered(), under_mouse.as_ref());
        assert_ne!(app.hovered(), Some(&id("20003")));
        if app.hovered().is_none() {
            assert!(app.selection().is_empty());
            assert!(app.tooltip().is_none());
        }
    }

    #[test]
    fn test_city_info_idle() {
        let app = App::new(dataset(), "Smallville", 120, 40);
        assert_eq!(
            app.city_info(),
            "Smallville population: 120, the colored counties contain the same number"
        );
    }
}

use crate::config::Config;
use crate::map::{LonLatPolygon, LonLatRing, MapShapes};
use crate::region::{AreaCode, PopulationRecord, ReferencePoint, RegionCatalog, RegionId};
use anyhow::{ensure, Context, Result};
use geojson::feature::Id;
use geojson::{Feature, GeoJson, Geometry, JsonValue, Position, Value};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Properties consulted, in order, when a county feature has no `id`
const ID_PROPERTIES: [&str; 4] = ["GEOID", "geoid", "fips", "FIPS"];

/// Everything the map needs, loaded once at startup
pub struct Dataset {
    pub catalog: RegionCatalog,
    pub cities: Vec<ReferencePoint>,
    pub shapes: MapShapes,
}

/// Load all datasets named by the config. Populations, cities and county
/// geometry are required; state outlines are optional.
pub fn load_dataset(config: &Config) -> Result<Dataset> {
    let catalog = load_populations(&config.populations_path())?;
    let cities = load_cities(&config.cities_path())?;
    ensure!(!cities.is_empty(), "no reference cities in {}", config.cities_path().display());

    let mut shapes = MapShapes::new();
    load_counties(&mut shapes, &config.counties_path())?;
    ensure!(shapes.has_data(), "no county geometry in {}", config.counties_path().display());

    let states_path = config.states_path();
    if states_path.exists() {
        if let Err(e) = load_states(&mut shapes, &states_path) {
            warn!(path = %states_path.display(), error = %e, "failed to load state outlines");
        }
    }

    info!(
        regions = catalog.len(),
        cities = cities.len(),
        counties = shapes.counties.len(),
        states = shapes.states.len(),
        "datasets loaded"
    );

    Ok(Dataset { catalog, cities, shapes })
}

/// Load the county population table into a catalog
pub fn load_populations(path: &Path) -> Result<RegionCatalog> {
    let mut bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let records: Vec<PopulationRecord> =
        simd_json::serde::from_slice(&mut bytes).with_context(|| format!("parsing {}", path.display()))?;
    Ok(RegionCatalog::from_records(records))
}

/// Load reference cities; cities without a positive population are dropped
pub fn load_cities(path: &Path) -> Result<Vec<ReferencePoint>> {
    let mut bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let cities: Vec<ReferencePoint> =
        simd_json::serde::from_slice(&mut bytes).with_context(|| format!("parsing {}", path.display()))?;

    Ok(cities
        .into_iter()
        .filter(|city| {
            if city.population == 0 {
                warn!(city = %city.name, "skipping city without population");
            }
            city.population > 0
        })
        .collect())
}

/// Load county polygons keyed by area code. Returns the number of features
/// that were added.
pub fn load_counties(shapes: &mut MapShapes, path: &Path) -> Result<usize> {
    let geojson = read_geojson(path)?;
    let mut added = 0;

    for feature in features(&geojson) {
        let Some(id) = feature_region_id(feature) else {
            warn!(id = ?feature.id, "skipping county feature without a usable id");
            continue;
        };

        let mut polygons = Vec::new();
        if let Some(ref geometry) = feature.geometry {
            collect_polygons(geometry, &mut polygons);
        }
        if polygons.is_empty() {
            continue;
        }

        shapes.add_county(id, polygons);
        added += 1;
    }

    Ok(added)
}

/// Load state outlines (every ring of every polygon)
pub fn load_states(shapes: &mut MapShapes, path: &Path) -> Result<()> {
    let geojson = read_geojson(path)?;
    let mut polygons = Vec::new();
    for feature in features(&geojson) {
        if let Some(ref geometry) = feature.geometry {
            collect_polygons(geometry, &mut polygons);
        }
    }
    for ring in polygons.into_iter().flatten() {
        shapes.add_state(ring);
    }
    Ok(())
}

fn read_geojson(path: &Path) -> Result<GeoJson> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    content.parse().with_context(|| format!("parsing {}", path.display()))
}

fn features(geojson: &GeoJson) -> Vec<&Feature> {
    match geojson {
        GeoJson::FeatureCollection(fc) => fc.features.iter().collect(),
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(_) => Vec::new(),
    }
}

/// Area code from the feature id, falling back to well-known properties
fn feature_region_id(feature: &Feature) -> Option<RegionId> {
    let from_id = match &feature.id {
        Some(Id::String(s)) => Some(AreaCode::Text(s.clone())),
        Some(Id::Number(n)) => n.as_u64().map(AreaCode::Number),
        None => None,
    };

    from_id
        .or_else(|| {
            ID_PROPERTIES
                .iter()
                .find_map(|key| feature.property(key).and_then(area_code_from_json))
        })
        .and_then(|code| RegionId::normalize(code))
}

fn area_code_from_json(value: &JsonValue) -> Option<AreaCode> {
    match value {
        JsonValue::String(s) => Some(AreaCode::Text(s.clone())),
        JsonValue::Number(n) => n.as_u64().map(AreaCode::Number),
        _ => None,
    }
}

fn collect_polygons(geometry: &Geometry, out: &mut Vec<LonLatPolygon>) {
    match &geometry.value {
        Value::Polygon(rings) => out.push(rings.iter().map(|ring| to_ring(ring)).collect()),
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                out.push(rings.iter().map(|ring| to_ring(ring)).collect());
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                collect_polygons(g, out);
            }
        }
        _ => {}
    }
}

fn to_ring(coords: &[Position]) -> LonLatRing {
    coords.iter().filter(|c| c.len() >= 2).map(|c| (c[0], c[1])).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    /// Write `content` to a unique file in the system temp dir
    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("county-footprint-{}-{}", std::process::id(), name));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_populations_mixed_codes() {
        let path = temp_file(
            "pops.json",
            r#"[
                {"fips": "01001", "county_name": "Autauga County", "state_name": "Alabama", "population": 58239},
                {"fips": 6037, "county_name": "Los Angeles County", "state_name": "California", "population": 9829544},
                {"fips": "1003", "county_name": "Baldwin County", "state_name": "Alabama"}
            ]"#,
        );
        let catalog = load_populations(&path).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.lookup("06037").unwrap().population, 9_829_544);
        assert_eq!(catalog.lookup("01003").unwrap().population, 0);
    }

    #[test]
    fn test_load_populations_null_and_negative() {
        let path = temp_file(
            "pops-placeholders.json",
            r#"[
                {"fips": "48301", "county_name": "Loving County", "state_name": "Texas", "population": null},
                {"fips": 15005, "county_name": "Kalawao County", "state_name": "Hawaii", "population": -666666666},
                {"fips": "48269", "county_name": "King County", "state_name": "Texas", "population": 265}
            ]"#,
        );
        let catalog = load_populations(&path).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.lookup("48301").unwrap().population, 0);
        assert_eq!(catalog.lookup(15005u64).unwrap().population, 0);
        assert_eq!(catalog.lookup("48269").unwrap().population, 265);
    }

    #[test]
    fn test_load_cities_drops_empty_population() {
        let path = temp_file(
            "cities.json",
            r#"[
                {"name": "Tokyo", "country": "Japan", "population": 37435191},
                {"name": "Ghost Town", "country": "USA", "population": 0}
            ]"#,
        );
        let cities = load_cities(&path).unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "Tokyo");
    }

    #[test]
    fn test_load_counties_ids_and_geometry() {
        let path = temp_file(
            "counties.geojson",
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "id": "1001", "properties": {},
                 "geometry": {"type": "Polygon", "coordinates": [[[-86.9, 32.3], [-86.4, 32.3], [-86.4, 32.7], [-86.9, 32.3]]]}},
                {"type": "Feature", "id": 6037, "properties": {},
                 "geometry": {"type": "MultiPolygon", "coordinates": [
                    [[[-118.9, 34.0], [-117.6, 34.0], [-117.6, 34.8], [-118.9, 34.0]]],
                    [[[-118.6, 33.3], [-118.3, 33.3], [-118.3, 33.5], [-118.6, 33.3]]]
                 ]}},
                {"type": "Feature", "properties": {"GEOID": "36061"},
                 "geometry": {"type": "Polygon", "coordinates": [[[-74.0, 40.7], [-73.9, 40.7], [-73.9, 40.8], [-74.0, 40.7]]]}},
                {"type": "Feature", "properties": {"name": "no id"},
                 "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}}
            ]}"#,
        );
        let mut shapes = MapShapes::new();
        let added = load_counties(&mut shapes, &path).unwrap();

        assert_eq!(added, 3);
        let ids: Vec<&str> = shapes.counties.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["01001", "06037", "36061"]);
        assert_eq!(shapes.counties[1].polygons.len(), 2);
        assert_eq!(shapes.counties[0].polygons[0][0].len(), 4);
    }

    #[test]
    fn test_load_states_outlines() {
        let path = temp_file(
            "states.geojson",
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "id": "01", "properties": {},
                 "geometry": {"type": "Polygon", "coordinates": [[[-88.0, 30.0], [-85.0, 30.0], [-85.0, 35.0], [-88.0, 30.0]]]}}
            ]}"#,
        );
        let mut shapes = MapShapes::new();
        load_states(&mut shapes, &path).unwrap();
        assert_eq!(shapes.states.len(), 1);
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = load_populations(Path::new("/nonexistent/pops.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/pops.json"));
    }
}

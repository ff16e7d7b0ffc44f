mod geometry;
mod projected;
mod projection;
mod renderer;
mod shapes;
mod spatial;

pub use geometry::{Polygon, Ring};
pub use projected::{ProjectedCounty, ProjectedMap};
pub use projection::{AlbersUsa, Viewport};
pub use renderer::{DisplaySettings, MapLayers, MapRenderer};
pub use shapes::{CountyShape, LonLatPolygon, LonLatRing, MapShapes};

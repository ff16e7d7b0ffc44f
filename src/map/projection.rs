use glam::DVec2;

/// Pixel size of the braille canvas the map is drawn on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Viewport for a terminal area in character cells.
    /// Braille gives 2x4 resolution per character.
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Self::new(cols as usize * 2, rows as usize * 4)
    }

    /// Check if a projected point is on the canvas
    #[cfg(test)]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x < self.width as f64 && p.y < self.height as f64
    }
}

/// Longitude/latitude box of the contiguous United States. Anything outside
/// it (Alaska, Hawaii, territories) has no place on the map.
const LOWER_48_LON: (f64, f64) = (-125.5, -66.0);
const LOWER_48_LAT: (f64, f64) = (24.0, 50.0);

/// Albers equal-area conic tuned for the contiguous US: standard parallels
/// 29.5°N and 45.5°N, central meridian 96°W.
#[derive(Clone, Debug)]
pub struct AlbersUsa {
    n: f64,
    c: f64,
    r0: f64,
    scale: f64,
    translate: DVec2,
    /// Raw projected position of the map centre, mapped onto `translate`
    center: DVec2,
}

impl AlbersUsa {
    const PARALLELS: (f64, f64) = (29.5, 45.5);
    const ROTATE_LON: f64 = 96.0;
    const CENTER: (f64, f64) = (-0.6, 38.7);

    /// Fit the projection to a viewport: scale 1.25 × width, limited so the
    /// map still fits vertically, centred on the canvas.
    pub fn fit(viewport: Viewport) -> Self {
        let w = viewport.width as f64;
        let h = viewport.height as f64;
        let scale = (w * 1.25).min(h * 2.0);
        Self::new(scale, DVec2::new(w / 2.0, h / 2.0))
    }

    pub fn new(scale: f64, translate: DVec2) -> Self {
        let phi0 = Self::PARALLELS.0.to_radians();
        let phi1 = Self::PARALLELS.1.to_radians();
        let sy0 = phi0.sin();
        let n = (sy0 + phi1.sin()) / 2.0;
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        let r0 = c.sqrt() / n;

        let mut projection = Self {
            n,
            c,
            r0,
            scale,
            translate,
            center: DVec2::ZERO,
        };
        projection.center = projection.raw(Self::CENTER.0, Self::CENTER.1);
        projection
    }

    /// Conic equal-area in unit-sphere coordinates, y pointing north.
    /// `lon` is relative to the central meridian.
    fn raw(&self, lon: f64, lat: f64) -> DVec2 {
        let lambda = lon.to_radians() * self.n;
        let r = (self.c - 2.0 * self.n * lat.to_radians().sin()).sqrt() / self.n;
        DVec2::new(r * lambda.sin(), self.r0 - r * lambda.cos())
    }

    /// Project lon/lat degrees to canvas pixels (y down).
    /// Points outside the contiguous US come back as NaN.
    pub fn project(&self, lon: f64, lat: f64) -> DVec2 {
        if !(LOWER_48_LON.0..=LOWER_48_LON.1).contains(&lon) || !(LOWER_48_LAT.0..=LOWER_48_LAT.1).contains(&lat) {
            return DVec2::NAN;
        }

        let p = self.raw(lon + Self::ROTATE_LON, lat);
        DVec2::new(
            self.translate.x + (p.x - self.center.x) * self.scale,
            self.translate.y - (p.y - self.center.y) * self.scale,
        )
    }

    #[cfg(test)]
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

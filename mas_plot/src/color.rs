/// An RGBA color with every channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.r, self.g, self.b, self.a)
    }

    pub fn to_hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

// Control points of the spectral gradient (black, purple, blue, green,
// yellow, red, grey), evenly spaced over [0, 1].
const SPECTRAL: [(f64, f64, f64); 21] = [
    (0.0, 0.0, 0.0),
    (0.4667, 0.0, 0.5333),
    (0.5333, 0.0, 0.6),
    (0.0, 0.0, 0.6667),
    (0.0, 0.0, 0.8667),
    (0.0, 0.4667, 0.8667),
    (0.0, 0.6, 0.8667),
    (0.0, 0.6667, 0.6667),
    (0.0, 0.6667, 0.5333),
    (0.0, 0.6, 0.0),
    (0.0, 0.7333, 0.0),
    (0.0, 0.8667, 0.0),
    (0.0, 1.0, 0.0),
    (0.7333, 1.0, 0.0),
    (0.9333, 0.9333, 0.0),
    (1.0, 0.8, 0.0),
    (1.0, 0.6, 0.0),
    (1.0, 0.0, 0.0),
    (0.8667, 0.0, 0.0),
    (0.8, 0.0, 0.0),
    (0.8, 0.8, 0.8),
];

/// Samples the spectral gradient at `x`, clamped to [0, 1].
pub fn spectral(x: f64) -> Rgba {
    let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
    let segments = (SPECTRAL.len() - 1) as f64;
    let scaled = x * segments;
    let lo = (scaled.floor() as usize).min(SPECTRAL.len() - 2);
    let t = scaled - lo as f64;
    let (r0, g0, b0) = SPECTRAL[lo];
    let (r1, g1, b1) = SPECTRAL[lo + 1];
    let lerp = |a: f64, b: f64| a + (b - a) * t;
    Rgba {
        r: lerp(r0, r1),
        g: lerp(g0, g1),
        b: lerp(b0, b1),
        a: 1.0,
    }
}

/// Color of the configuration at `index` out of `count`. The gradient is
/// normalized over [-1, count] so that neither end (black and grey) is ever
/// used. Depends only on `index` and `count`.
pub fn configuration_color(index: usize, count: usize) -> Rgba {
    let vmin = -1.0;
    let vmax = count as f64;
    spectral((index as f64 - vmin) / (vmax - vmin))
}

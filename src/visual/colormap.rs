//! Colour palettes for the spectrogram mesh.

use std::fmt;
use std::str::FromStr;

/// Selectable palettes. Exactly one is active in a view at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Colormap {
    /// Blue→cyan→yellow→red rainbow.
    #[default]
    Jet,
    /// Viridis perceptually uniform map.
    Viridis,
    /// Plasma perceptually uniform map.
    Plasma,
    /// Inferno perceptually uniform map.
    Inferno,
    /// Magma perceptually uniform map.
    Magma,
    /// White→black greyscale.
    Greys,
}

/// Channel breakpoints `(position, intensity)` of the jet palette.
const JET_RED: [(f32, f32); 5] = [(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)];
const JET_GREEN: [(f32, f32); 6] = [
    (0.0, 0.0),
    (0.125, 0.0),
    (0.375, 1.0),
    (0.64, 1.0),
    (0.91, 0.0),
    (1.0, 0.0),
];
const JET_BLUE: [(f32, f32); 5] = [(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)];

impl Colormap {
    /// Every palette in menu order.
    pub const ALL: [Colormap; 6] = [
        Colormap::Jet,
        Colormap::Viridis,
        Colormap::Plasma,
        Colormap::Inferno,
        Colormap::Magma,
        Colormap::Greys,
    ];

    /// Menu label.
    pub fn name(&self) -> &'static str {
        match self {
            Colormap::Jet => "jet",
            Colormap::Viridis => "viridis",
            Colormap::Plasma => "plasma",
            Colormap::Inferno => "inferno",
            Colormap::Magma => "magma",
            Colormap::Greys => "Greys",
        }
    }

    /// Map a value in `[0, 1]` onto an RGB8 colour. Out-of-range input is clamped.
    pub fn map_color_u8(&self, t: f32) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let gradient = match self {
            Colormap::Jet => {
                return [
                    channel_u8(&JET_RED, t),
                    channel_u8(&JET_GREEN, t),
                    channel_u8(&JET_BLUE, t),
                ]
            }
            Colormap::Viridis => colorous::VIRIDIS,
            Colormap::Plasma => colorous::PLASMA,
            Colormap::Inferno => colorous::INFERNO,
            Colormap::Magma => colorous::MAGMA,
            Colormap::Greys => colorous::GREYS,
        };
        let c = gradient.eval_continuous(t as f64);
        [c.r, c.g, c.b]
    }
}

fn channel_u8(stops: &[(f32, f32)], t: f32) -> u8 {
    let (start, end) = stops
        .windows(2)
        .find(|w| t >= w[0].0 && t <= w[1].0)
        .map(|w| (w[0], w[1]))
        .unwrap_or((stops[stops.len() - 2], stops[stops.len() - 1]));
    let local = (t - start.0) / (end.0 - start.0);
    let v = start.1 + (end.1 - start.1) * local;
    (v * 255.0).round() as u8
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a palette name is not one of [`Colormap::ALL`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownColormap(pub String);

impl fmt::Display for UnknownColormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown colour map `{}`", self.0)
    }
}

impl std::error::Error for UnknownColormap {}

impl FromStr for Colormap {
    type Err = UnknownColormap;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colormap::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownColormap(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("greys".parse::<Colormap>().unwrap(), Colormap::Greys);
        assert_eq!("Greys".parse::<Colormap>().unwrap(), Colormap::Greys);
        assert_eq!(" VIRIDIS ".parse::<Colormap>().unwrap(), Colormap::Viridis);
        assert!("hot".parse::<Colormap>().is_err());
    }

    #[test]
    fn every_name_round_trips() {
        for c in Colormap::ALL {
            assert_eq!(c.name().parse::<Colormap>().unwrap(), c);
        }
    }

    #[test]
    fn jet_endpoints() {
        assert_eq!(Colormap::Jet.map_color_u8(0.0), [0, 0, 128]);
        assert_eq!(Colormap::Jet.map_color_u8(1.0), [128, 0, 0]);
        // Mid-range is green dominated.
        let mid = Colormap::Jet.map_color_u8(0.5);
        assert_eq!(mid[1], 255);
    }

    #[test]
    fn greys_runs_white_to_black() {
        let lo = Colormap::Greys.map_color_u8(0.0);
        let hi = Colormap::Greys.map_color_u8(1.0);
        assert!(lo.iter().all(|&c| c > 240));
        assert!(hi.iter().all(|&c| c < 20));
    }

    #[test]
    fn out_of_range_values_clamp() {
        for c in Colormap::ALL {
            assert_eq!(c.map_color_u8(-3.0), c.map_color_u8(0.0));
            assert_eq!(c.map_color_u8(7.0), c.map_color_u8(1.0));
            assert_eq!(c.map_color_u8(f32::NAN), c.map_color_u8(0.0));
        }
    }
}

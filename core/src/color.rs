//! RGB colors and their validation.

use palette::Srgb;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use crate::errors::{BlocksError, BlocksResult};

/// 24-bit RGB color.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

/// Black; the default color of new grids.
pub const BLACK: Rgb = Rgb::new(0, 0, 0);
/// White; the color of gridlines.
pub const WHITE: Rgb = Rgb::new(255, 255, 255);

impl Rgb {
    /// Constructs a color from its channels.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Constructs a color from integer channels, checking that each is in
    /// the range 0-255.
    pub fn from_ints(red: i64, green: i64, blue: i64) -> BlocksResult<Self> {
        Ok(Self {
            red: channel("red", red)?,
            green: channel("green", green)?,
            blue: channel("blue", blue)?,
        })
    }

    /// Parses a CSS color, such as `"teal"`, `"#ff8000"`, or
    /// `"rgb(1, 2, 3)"`. The alpha channel is ignored.
    pub fn from_css(s: &str) -> BlocksResult<Self> {
        let c: css_color_parser::Color = s
            .trim()
            .parse()
            .map_err(|_| BlocksError::BadCssColor(s.to_owned()))?;
        Ok(Self::new(c.r, c.g, c.b))
    }

    /// Returns the channels as a tuple.
    pub fn to_tuple(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Returns the HSL lightness of the color, from 0.0 (black) to 1.0
    /// (white).
    pub fn lightness(self) -> f32 {
        let rgb = Srgb::<u8>::from(self).into_format::<f32>();
        let max = rgb.red.max(rgb.green).max(rgb.blue);
        let min = rgb.red.min(rgb.green).min(rgb.blue);
        (max + min) / 2.0
    }
}

/// Checks that an integer channel fits in a byte.
fn channel(name: &'static str, value: i64) -> BlocksResult<u8> {
    u8::try_from(value).map_err(|_| BlocksError::ChannelOutOfRange {
        channel: name,
        value,
    })
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

impl FromStr for Rgb {
    type Err = BlocksError;

    /// Parses either three whitespace-separated integers, as in the text
    /// format, or any CSS color.
    fn from_str(s: &str) -> BlocksResult<Self> {
        let words: Vec<&str> = s.split_whitespace().collect();
        match words.iter().map(|w| w.parse::<i64>()).collect::<Result<Vec<_>, _>>() {
            Ok(ints) if !ints.is_empty() => Self::try_from(&ints[..]),
            _ => Self::from_css(s),
        }
    }
}

impl From<Srgb<u8>> for Rgb {
    fn from(c: Srgb<u8>) -> Self {
        Self::new(c.red, c.green, c.blue)
    }
}
impl From<Rgb> for Srgb<u8> {
    fn from(c: Rgb) -> Self {
        Srgb::new(c.red, c.green, c.blue)
    }
}
impl From<(u8, u8, u8)> for Rgb {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

impl TryFrom<&[i64]> for Rgb {
    type Error = BlocksError;

    /// Converts a plain sequence of channels, which must have exactly three
    /// elements in the range 0-255.
    fn try_from(channels: &[i64]) -> BlocksResult<Self> {
        match *channels {
            [r, g, b] => Self::from_ints(r, g, b),
            _ => Err(BlocksError::BadColorArity(channels.len())),
        }
    }
}
impl TryFrom<Vec<i64>> for Rgb {
    type Error = BlocksError;

    fn try_from(channels: Vec<i64>) -> BlocksResult<Self> {
        Self::try_from(&channels[..])
    }
}
impl TryFrom<(i64, i64, i64)> for Rgb {
    type Error = BlocksError;

    fn try_from((r, g, b): (i64, i64, i64)) -> BlocksResult<Self> {
        Self::from_ints(r, g, b)
    }
}
impl TryFrom<&str> for Rgb {
    type Error = BlocksError;

    fn try_from(s: &str) -> BlocksResult<Self> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_rgb_from_ints() {
        assert_eq!(Ok(Rgb::new(1, 2, 3)), Rgb::from_ints(1, 2, 3));
        assert_eq!(Ok(Rgb::new(0, 255, 0)), Rgb::try_from((0_i64, 255, 0)));

        let err = Rgb::from_ints(1, 256, 3).unwrap_err();
        assert_eq!(
            BlocksError::ChannelOutOfRange {
                channel: "green",
                value: 256,
            },
            err,
        );
        assert_eq!(ErrorKind::Validation, err.kind());
        assert!(Rgb::from_ints(-1, 0, 0).is_err());
    }

    #[test]
    fn test_rgb_arity() {
        assert_eq!(Ok(Rgb::new(4, 5, 6)), Rgb::try_from(&[4_i64, 5, 6][..]));
        let bads: [Vec<i64>; 4] = [vec![], vec![1], vec![1, 2], vec![1, 2, 3, 4]];
        for bad in &bads {
            assert_eq!(
                Err(BlocksError::BadColorArity(bad.len())),
                Rgb::try_from(bad.clone()),
            );
        }
    }

    #[test]
    fn test_rgb_parse() {
        assert_eq!(Ok(Rgb::new(1, 2, 3)), "1 2 3".parse());
        assert_eq!(Ok(Rgb::new(255, 0, 0)), "red".parse());
        assert_eq!(Ok(Rgb::new(0, 128, 128)), Rgb::from_css("teal"));
        assert_eq!(Ok(Rgb::new(255, 128, 0)), Rgb::from_css("#ff8000"));
        assert_eq!(Ok(Rgb::new(1, 2, 3)), Rgb::from_css("rgb(1, 2, 3)"));
        assert_eq!(Err(BlocksError::BadColorArity(4)), "1 2 3 4".parse::<Rgb>());
        assert_eq!(ErrorKind::Validation, "nope".parse::<Rgb>().unwrap_err().kind());
    }

    #[test]
    fn test_rgb_palette_round_trip() {
        let c = Rgb::new(12, 34, 56);
        let srgb: Srgb<u8> = c.into();
        assert_eq!(c, Rgb::from(srgb));
    }

    #[test]
    fn test_rgb_lightness() {
        assert_eq!(0.0, BLACK.lightness());
        assert_eq!(1.0, WHITE.lightness());
        assert!((Rgb::new(255, 0, 0).lightness() - 0.5).abs() < 1e-6);
        assert_eq!("rgb(1, 2, 3)", Rgb::new(1, 2, 3).to_string());
    }
}

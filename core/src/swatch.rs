//! Payload of the blocks in a `Grid`.

use std::convert::TryFrom;
use std::fmt;

use crate::attrs::{AttrValue, Attributes};
use crate::color::{Rgb, BLACK};
use crate::config::DEFAULT_BLOCK_SIZE;
use crate::errors::{BlocksError, BlocksResult};
use crate::item::Item;

/// Colored square: an RGB color and an edge length in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Swatch {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Edge length, in pixels.
    pub size: usize,
}
impl Default for Swatch {
    fn default() -> Self {
        Self::new(BLACK, DEFAULT_BLOCK_SIZE)
    }
}
impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}px)", self.rgb(), self.size)
    }
}

impl Swatch {
    /// Constructs a swatch.
    pub fn new(rgb: Rgb, size: usize) -> Self {
        Self {
            red: rgb.red,
            green: rgb.green,
            blue: rgb.blue,
            size,
        }
    }

    /// Returns the color.
    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.red, self.green, self.blue)
    }
    /// Sets the color.
    pub fn set_rgb(&mut self, rgb: impl Into<Rgb>) {
        let rgb = rgb.into();
        self.red = rgb.red;
        self.green = rgb.green;
        self.blue = rgb.blue;
    }
    /// Sets the color from a value that might not be a valid color. On error,
    /// the color is unchanged.
    pub fn try_set_rgb<C>(&mut self, color: C) -> BlocksResult<()>
    where
        Rgb: TryFrom<C>,
        BlocksError: From<<Rgb as TryFrom<C>>::Error>,
    {
        self.set_rgb(Rgb::try_from(color)?);
        Ok(())
    }
    /// Returns the HSL lightness of the color, from 0.0 to 1.0.
    pub fn lightness(&self) -> f32 {
        self.rgb().lightness()
    }
}

impl Attributes for Swatch {
    fn get_attr(&self, name: &str) -> BlocksResult<AttrValue> {
        match name {
            "red" => Ok(self.red.into()),
            "green" => Ok(self.green.into()),
            "blue" => Ok(self.blue.into()),
            "size" => Ok(self.size.into()),
            "rgb" => Ok(self.rgb().to_string().into()),
            _ => Err(BlocksError::UnknownAttribute(name.to_owned())),
        }
    }

    fn set_attr(&mut self, name: &str, value: AttrValue) -> BlocksResult<()> {
        match name {
            "red" => self.red = channel_attr("red", &value)?,
            "green" => self.green = channel_attr("green", &value)?,
            "blue" => self.blue = channel_attr("blue", &value)?,
            "size" => match value.expect_int(name)? {
                n if n > 0 => self.size = n as usize,
                _ => return Err(BlocksError::ZeroBlockSize),
            },
            "rgb" => match value {
                AttrValue::Str(s) => self.try_set_rgb(s.as_str())?,
                _ => {
                    return Err(BlocksError::WrongAttributeType {
                        name: name.to_owned(),
                        expected: "a color string",
                    })
                }
            },
            _ => return Err(BlocksError::UnknownAttribute(name.to_owned())),
        }
        Ok(())
    }
}

fn channel_attr(name: &'static str, value: &AttrValue) -> BlocksResult<u8> {
    let value = value.expect_int(name)?;
    u8::try_from(value).map_err(|_| BlocksError::ChannelOutOfRange {
        channel: name,
        value,
    })
}

/// Cell of a `Grid`.
pub type Block = Item<Swatch>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_swatch_rgb() {
        let mut s = Swatch::default();
        assert_eq!(BLACK, s.rgb());
        assert_eq!(DEFAULT_BLOCK_SIZE, s.size);

        s.set_rgb((1, 2, 3));
        assert_eq!((1, 2, 3), (s.red, s.green, s.blue));

        assert!(s.try_set_rgb(vec![4_i64, 5, 6, 7]).is_err());
        assert_eq!(Rgb::new(1, 2, 3), s.rgb());
        s.try_set_rgb("#040506").unwrap();
        assert_eq!(Rgb::new(4, 5, 6), s.rgb());
    }

    #[test]
    fn test_block_attrs() {
        let mut b = Block::new(&[3, 4], true, Swatch::default());
        b.set_attr("red", AttrValue::Int(200)).unwrap();
        assert_eq!(200, b.red);
        assert_eq!(Ok(AttrValue::Int(200)), b.get_attr("red"));

        let err = b.set_attr("green", AttrValue::Int(300)).unwrap_err();
        assert_eq!(ErrorKind::Validation, err.kind());
        assert_eq!(0, b.green);

        assert!(b.set_attr("size", AttrValue::Int(0)).is_err());
        b.set_attr("size", AttrValue::Int(7)).unwrap();
        assert_eq!(7, b.size);

        b.set_attr("rgb", "navy".into()).unwrap();
        assert_eq!(Rgb::new(0, 0, 128), b.rgb());

        let err = b.set_attr("row", AttrValue::Int(0)).unwrap_err();
        assert_eq!(BlocksError::ReadOnlyAttribute("row".to_owned()), err);
        assert_eq!(Some(3), b.row());
    }
}

//! Color themes for the device screen

use crate::{
    codec::{Decode, Encode, Reader, Writer},
    object::serde_projection,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// A 24-bit color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Render as `#RRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Decode for Rgb {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        let [r, g, b] = reader.read_bytes()?;
        Ok(Self { r, g, b })
    }
}

impl Encode for Rgb {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_bytes(&[self.r, self.g, self.b])
    }
}

/// The colors of every element on the screen, in file order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub background: Rgb,
    pub text_empty: Rgb,
    pub text_info: Rgb,
    pub text_default: Rgb,
    pub text_value: Rgb,
    pub text_title: Rgb,
    pub play_marker: Rgb,
    pub cursor: Rgb,
    pub selection: Rgb,
    pub scope_slider: Rgb,
    pub meter_low: Rgb,
    pub meter_mid: Rgb,
    pub meter_peak: Rgb,
}

impl Theme {
    /// The size of a theme in a file
    pub const LEN: u64 = 13 * 3;

    /// Every color, paired with its name
    pub fn colors(&self) -> [(&'static str, Rgb); 13] {
        [
            ("background", self.background),
            ("text empty", self.text_empty),
            ("text info", self.text_info),
            ("text default", self.text_default),
            ("text value", self.text_value),
            ("text title", self.text_title),
            ("play marker", self.play_marker),
            ("cursor", self.cursor),
            ("selection", self.selection),
            ("scope slider", self.scope_slider),
            ("meter low", self.meter_low),
            ("meter mid", self.meter_mid),
            ("meter peak", self.meter_peak),
        ]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgb::new(0x00, 0x00, 0x00),
            text_empty: Rgb::new(0x1E, 0x1E, 0x28),
            text_info: Rgb::new(0x60, 0x60, 0x8E),
            text_default: Rgb::new(0x8C, 0x8C, 0xBA),
            text_value: Rgb::new(0xFA, 0xFA, 0xFA),
            text_title: Rgb::new(0x32, 0xEC, 0xFF),
            play_marker: Rgb::new(0xFF, 0x30, 0x70),
            cursor: Rgb::new(0x32, 0xEC, 0xFF),
            selection: Rgb::new(0xFF, 0x00, 0xD2),
            scope_slider: Rgb::new(0x32, 0xEC, 0xFF),
            meter_low: Rgb::new(0x00, 0xFF, 0x50),
            meter_mid: Rgb::new(0xFF, 0xE0, 0x00),
            meter_peak: Rgb::new(0xFF, 0x30, 0x70),
        }
    }
}

impl Decode for Theme {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            background: reader.decode()?,
            text_empty: reader.decode()?,
            text_info: reader.decode()?,
            text_default: reader.decode()?,
            text_value: reader.decode()?,
            text_title: reader.decode()?,
            play_marker: reader.decode()?,
            cursor: reader.decode()?,
            selection: reader.decode()?,
            scope_slider: reader.decode()?,
            meter_low: reader.decode()?,
            meter_mid: reader.decode()?,
            meter_peak: reader.decode()?,
        })
    }
}

impl Encode for Theme {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        self.colors()
            .iter()
            .try_for_each(|(_, color)| color.encode(writer))
    }
}

serde_projection!(
    Theme,
    [
        "background",
        "textEmpty",
        "textInfo",
        "textDefault",
        "textValue",
        "textTitle",
        "playMarker",
        "cursor",
        "selection",
        "scopeSlider",
        "meterLow",
        "meterMid",
        "meterPeak",
    ]
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{object::Projection, version::Version};

    #[test]
    fn hex() {
        assert_eq!(Rgb::new(0x32, 0xEC, 0xFF).to_hex(), "#32ECFF");
    }

    #[test]
    fn file_order() {
        let theme = Theme {
            text_info: Rgb::new(1, 2, 3),
            meter_peak: Rgb::new(4, 5, 6),
            ..Default::default()
        };

        let mut bytes = Vec::new();
        theme
            .encode(&mut Writer::new(&mut bytes, Version::LATEST, 0))
            .unwrap();

        assert_eq!(bytes.len() as u64, Theme::LEN);
        assert_eq!(&bytes[6..9], &[1, 2, 3]);
        assert_eq!(&bytes[36..39], &[4, 5, 6]);
    }

    #[test]
    fn object_keys() {
        let theme = Theme::default();
        let object = theme.to_object();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();

        assert_eq!(keys, theme.object_properties());
        assert_eq!(Theme::from_object(&object, Version::LATEST).unwrap(), theme);
    }
}

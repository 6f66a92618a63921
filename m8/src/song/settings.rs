//! The song-wide MIDI, mixer and effects settings

use crate::codec::{Decode, Encode, Reader, Writer};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// How the song talks to external MIDI gear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidiSettings {
    pub receive_sync: bool,
    pub receive_transport: u8,
    pub send_sync: bool,
    pub send_transport: u8,
    pub record_note_channel: u8,
    pub record_note_velocity: bool,
    pub record_note_delay_kill_commands: u8,
    pub control_map_channel: u8,
    pub song_row_cue_channel: u8,
    pub track_input_channel: [u8; 8],
    pub track_input_instrument: [u8; 8],
    pub track_input_program_change: bool,
    pub track_input_mode: u8,
}

impl MidiSettings {
    pub const TRANSPORT_MODES: [&'static str; 4] = ["OFF", "PATTERN", "SONG", "SONGROW"];
    pub const TRACK_INPUT_MODES: [&'static str; 3] = ["MONO", "LEGATO", "POLY"];

    /// The channel value meaning "all channels"
    pub const ALL_CHANNELS: u8 = 0x10;
}

impl Default for MidiSettings {
    fn default() -> Self {
        let mut track_input_channel = [0; 8];
        for (track, channel) in track_input_channel.iter_mut().enumerate() {
            *channel = track as u8 + 1;
        }

        Self {
            receive_sync: false,
            receive_transport: 0,
            send_sync: false,
            send_transport: 0,
            record_note_channel: 0,
            record_note_velocity: true,
            record_note_delay_kill_commands: 0,
            control_map_channel: Self::ALL_CHANNELS,
            song_row_cue_channel: 0x0B,
            track_input_channel,
            track_input_instrument: [0; 8],
            track_input_program_change: true,
            track_input_mode: 0,
        }
    }
}

impl Decode for MidiSettings {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            receive_sync: reader.read_bool()?,
            receive_transport: reader.read_u8()?,
            send_sync: reader.read_bool()?,
            send_transport: reader.read_u8()?,
            record_note_channel: reader.read_u8()?,
            record_note_velocity: reader.read_bool()?,
            record_note_delay_kill_commands: reader.read_u8()?,
            control_map_channel: reader.read_u8()?,
            song_row_cue_channel: reader.read_u8()?,
            track_input_channel: reader.read_bytes()?,
            track_input_instrument: reader.read_bytes()?,
            track_input_program_change: reader.read_bool()?,
            track_input_mode: reader.read_u8()?,
        })
    }
}

impl Encode for MidiSettings {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_bool(self.receive_sync)?;
        writer.write_u8(self.receive_transport)?;
        writer.write_bool(self.send_sync)?;
        writer.write_u8(self.send_transport)?;
        writer.write_u8(self.record_note_channel)?;
        writer.write_bool(self.record_note_velocity)?;
        writer.write_u8(self.record_note_delay_kill_commands)?;
        writer.write_u8(self.control_map_channel)?;
        writer.write_u8(self.song_row_cue_channel)?;
        writer.write_bytes(&self.track_input_channel)?;
        writer.write_bytes(&self.track_input_instrument)?;
        writer.write_bool(self.track_input_program_change)?;
        writer.write_u8(self.track_input_mode)
    }
}

/// Levels and sends of the song mixer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixerSettings {
    pub master_volume: u8,
    pub master_limit: u8,
    pub track_volume: [u8; 8],
    pub chorus_volume: u8,
    pub delay_volume: u8,
    pub reverb_volume: u8,
    pub analog_input_volume: [u8; 2],
    pub usb_input_volume: u8,
    pub analog_input_chorus: [u8; 2],
    pub analog_input_delay: [u8; 2],
    pub analog_input_reverb: [u8; 2],
    pub usb_input_chorus: u8,
    pub usb_input_delay: u8,
    pub usb_input_reverb: u8,
    pub dj_filter: u8,
    pub dj_peak: u8,
}

impl MixerSettings {
    // Bytes after the settings that the firmware reserves
    const RESERVED_LEN: usize = 5;
}

impl Default for MixerSettings {
    fn default() -> Self {
        Self {
            master_volume: 0xE0,
            master_limit: 0,
            track_volume: [0xE0; 8],
            chorus_volume: 0xE0,
            delay_volume: 0xE0,
            reverb_volume: 0xE0,
            analog_input_volume: [0x00; 2],
            usb_input_volume: 0,
            analog_input_chorus: [0; 2],
            analog_input_delay: [0; 2],
            analog_input_reverb: [0; 2],
            usb_input_chorus: 0,
            usb_input_delay: 0,
            usb_input_reverb: 0,
            dj_filter: 0x80,
            dj_peak: 0,
        }
    }
}

impl Decode for MixerSettings {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        let settings = Self {
            master_volume: reader.read_u8()?,
            master_limit: reader.read_u8()?,
            track_volume: reader.read_bytes()?,
            chorus_volume: reader.read_u8()?,
            delay_volume: reader.read_u8()?,
            reverb_volume: reader.read_u8()?,
            analog_input_volume: reader.read_bytes()?,
            usb_input_volume: reader.read_u8()?,
            analog_input_chorus: reader.read_bytes()?,
            analog_input_delay: reader.read_bytes()?,
            analog_input_reverb: reader.read_bytes()?,
            usb_input_chorus: reader.read_u8()?,
            usb_input_delay: reader.read_u8()?,
            usb_input_reverb: reader.read_u8()?,
            dj_filter: reader.read_u8()?,
            dj_peak: reader.read_u8()?,
        };

        reader.skip(Self::RESERVED_LEN as u64)?;

        Ok(settings)
    }
}

impl Encode for MixerSettings {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_u8(self.master_volume)?;
        writer.write_u8(self.master_limit)?;
        writer.write_bytes(&self.track_volume)?;
        writer.write_bytes(&[self.chorus_volume, self.delay_volume, self.reverb_volume])?;
        writer.write_bytes(&self.analog_input_volume)?;
        writer.write_u8(self.usb_input_volume)?;
        writer.write_bytes(&self.analog_input_chorus)?;
        writer.write_bytes(&self.analog_input_delay)?;
        writer.write_bytes(&self.analog_input_reverb)?;
        writer.write_bytes(&[
            self.usb_input_chorus,
            self.usb_input_delay,
            self.usb_input_reverb,
        ])?;
        writer.write_u8(self.dj_filter)?;
        writer.write_u8(self.dj_peak)?;
        writer.write_bytes(&[0; Self::RESERVED_LEN])
    }
}

/// The parameters of the send effects: chorus, delay and reverb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectsSettings {
    pub chorus_mod_depth: u8,
    pub chorus_mod_freq: u8,
    pub chorus_reverb_send: u8,

    pub delay_filter: [u8; 2],
    pub delay_time_l: u8,
    pub delay_time_r: u8,
    pub delay_feedback: u8,
    pub delay_width: u8,
    pub delay_reverb_send: u8,

    pub reverb_filter: [u8; 2],
    pub reverb_size: u8,
    pub reverb_damping: u8,
    pub reverb_mod_depth: u8,
    pub reverb_mod_freq: u8,
    pub reverb_width: u8,
}

impl Default for EffectsSettings {
    fn default() -> Self {
        Self {
            chorus_mod_depth: 0x40,
            chorus_mod_freq: 0x80,
            chorus_reverb_send: 0,
            delay_filter: [0x00, 0xFF],
            delay_time_l: 0x30,
            delay_time_r: 0x30,
            delay_feedback: 0x80,
            delay_width: 0xFF,
            delay_reverb_send: 0,
            reverb_filter: [0x00, 0xFF],
            reverb_size: 0xFF,
            reverb_damping: 0xC0,
            reverb_mod_depth: 0x10,
            reverb_mod_freq: 0xFF,
            reverb_width: 0xFF,
        }
    }
}

impl Decode for EffectsSettings {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        let chorus_mod_depth = reader.read_u8()?;
        let chorus_mod_freq = reader.read_u8()?;
        let chorus_reverb_send = reader.read_u8()?;
        reader.skip(3)?;

        let delay_filter = reader.read_bytes()?;
        let delay_time_l = reader.read_u8()?;
        let delay_time_r = reader.read_u8()?;
        let delay_feedback = reader.read_u8()?;
        let delay_width = reader.read_u8()?;
        let delay_reverb_send = reader.read_u8()?;
        reader.skip(1)?;

        Ok(Self {
            chorus_mod_depth,
            chorus_mod_freq,
            chorus_reverb_send,
            delay_filter,
            delay_time_l,
            delay_time_r,
            delay_feedback,
            delay_width,
            delay_reverb_send,
            reverb_filter: reader.read_bytes()?,
            reverb_size: reader.read_u8()?,
            reverb_damping: reader.read_u8()?,
            reverb_mod_depth: reader.read_u8()?,
            reverb_mod_freq: reader.read_u8()?,
            reverb_width: reader.read_u8()?,
        })
    }
}

impl Encode for EffectsSettings {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_bytes(&[
            self.chorus_mod_depth,
            self.chorus_mod_freq,
            self.chorus_reverb_send,
        ])?;
        writer.write_bytes(&[0; 3])?;

        writer.write_bytes(&self.delay_filter)?;
        writer.write_bytes(&[
            self.delay_time_l,
            self.delay_time_r,
            self.delay_feedback,
            self.delay_width,
            self.delay_reverb_send,
        ])?;
        writer.write_u8(0)?;

        writer.write_bytes(&self.reverb_filter)?;
        writer.write_bytes(&[
            self.reverb_size,
            self.reverb_damping,
            self.reverb_mod_depth,
            self.reverb_mod_freq,
            self.reverb_width,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;
    use std::io::Cursor;

    fn encoded_len<T>(value: &T) -> usize
    where
        T: Encode,
    {
        let mut bytes = Vec::new();
        value
            .encode(&mut Writer::new(&mut bytes, Version::LATEST, 0))
            .unwrap();
        bytes.len()
    }

    #[test]
    fn block_sizes() {
        assert_eq!(encoded_len(&MidiSettings::default()), 27);
        assert_eq!(encoded_len(&MixerSettings::default()), 32);
        assert_eq!(encoded_len(&EffectsSettings::default()), 21);
    }

    #[test]
    fn unused_effects_bytes_are_skipped() {
        let mut bytes = vec![0xAA; 21];
        bytes[0] = 1;
        bytes[6] = 2;
        bytes[20] = 3;

        let settings =
            EffectsSettings::decode(&mut Reader::new(Cursor::new(bytes), Version::LATEST, 0))
                .unwrap();
        assert_eq!(settings.chorus_mod_depth, 1);
        assert_eq!(settings.delay_filter, [2, 0xAA]);
        assert_eq!(settings.reverb_width, 3);
    }
}

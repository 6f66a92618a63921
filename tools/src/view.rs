//! The `view` subcommand

use crate::utils::{check_range, load};
use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use m8::{
    display::{hex, hex_or_empty, NOTE_NAMES},
    file::{Body, FileKind, M8File},
    instrument::{Instrument, InstrumentParams},
    scale::Scale,
    song::{Song, Table},
    theme::Theme,
};
use std::{fmt::Write, path::PathBuf};

/// Arguments for the `view` subcommand
#[derive(Args)]
#[clap(author, version, about = "Print parts of an M8 file as plain text", long_about = None)]
pub struct ViewArgs {
    #[clap(subcommand)]
    what: View,
}

#[derive(Subcommand)]
enum View {
    /// A page of sixteen song rows
    Song {
        path: PathBuf,

        /// The first row to show (0-255)
        #[clap(short, long, default_value_t = 0)]
        start: u16,
    },

    /// A chain of a song (0-254)
    Chain { path: PathBuf, index: u16 },

    /// A phrase of a song (0-254)
    Phrase { path: PathBuf, index: u16 },

    /// A table of a song (0-255), or the table of an instrument file
    Table { path: PathBuf, index: Option<u16> },

    /// An instrument of a song (0-127), or an instrument file
    Instrument { path: PathBuf, index: Option<u16> },

    /// A scale of a song (0-15), or a scale file
    Scale { path: PathBuf, index: Option<u16> },

    /// A theme file
    Theme { path: PathBuf },
}

// The number of song rows shown at once
const PAGE: usize = 16;

/// Print parts of an M8 file as plain text
pub fn view(args: ViewArgs) -> Result<()> {
    let text = match args.what {
        View::Song { path, start } => {
            check_range("song row", start, 255)?;
            song_rows(expect_song(&load(&path)?, "song")?, start)?
        }
        View::Chain { path, index } => {
            check_range("chain", index, 254)?;
            chain(expect_song(&load(&path)?, "chain")?, index as usize)?
        }
        View::Phrase { path, index } => {
            check_range("phrase", index, 254)?;
            phrase(expect_song(&load(&path)?, "phrase")?, index as usize)?
        }
        View::Table { path, index } => {
            let index = index.unwrap_or(0);
            check_range("table", index, 255)?;

            match load(&path)?.body() {
                Body::Song(song) => song_table(song, index as usize)?,
                Body::Instrument(instrument) => instrument_table(instrument)?,
                body => bail!(wrong_kind(body.kind(), "table")),
            }
        }
        View::Instrument { path, index } => {
            let index = index.unwrap_or(0);
            check_range("instrument", index, 127)?;

            match load(&path)?.body() {
                Body::Song(song) => instrument(&song.instruments()[index as usize])?,
                Body::Instrument(instrument_file) => instrument(instrument_file)?,
                body => bail!(wrong_kind(body.kind(), "instrument")),
            }
        }
        View::Scale { path, index } => {
            let index = index.unwrap_or(0);
            check_range("scale", index, 15)?;

            match load(&path)?.body() {
                Body::Song(song) => scale(&song.scales()[index as usize])?,
                Body::Scale(scale_file) => scale(scale_file)?,
                body => bail!(wrong_kind(body.kind(), "scale")),
            }
        }
        View::Theme { path } => match load(&path)?.body() {
            Body::Theme(theme_file) => theme(theme_file)?,
            body => bail!(wrong_kind(body.kind(), "theme")),
        },
    };

    print!("{text}");
    Ok(())
}

fn expect_song<'a>(file: &'a M8File, view: &str) -> Result<&'a Song> {
    match file.body() {
        Body::Song(song) => Ok(song),
        body => bail!(wrong_kind(body.kind(), view)),
    }
}

fn wrong_kind(kind: FileKind, view: &str) -> String {
    format!("This is a {kind} file, which has no {view} to view")
}

fn song_rows(song: &Song, start: u16) -> Result<String> {
    // Always show a full page
    let start = usize::from(start).min(Song::ROW_COUNT - PAGE);

    let mut text = String::new();
    writeln!(
        text,
        "SONG {:<12} {} BPM  KEY {}",
        song.name.as_str(),
        song.tempo,
        song.key_to_str()
    )?;
    writeln!(text, "   1  2  3  4  5  6  7  8")?;

    for (index, row) in song.rows().iter().enumerate().skip(start).take(PAGE) {
        let tracks: Vec<String> = row.tracks.iter().map(|chain| hex_or_empty(*chain)).collect();
        writeln!(text, "{index:02X} {}", tracks.join(" "))?;
    }

    Ok(text)
}

fn chain(song: &Song, index: usize) -> Result<String> {
    let mut text = String::new();
    writeln!(text, "CHAIN {index:02X}")?;
    writeln!(text, "  P  T")?;

    for (step, chain_step) in song.chains()[index].steps.iter().enumerate() {
        writeln!(
            text,
            "{step:X} {} {}",
            chain_step.phrase_to_str(),
            chain_step.transpose_to_str()
        )?;
    }

    Ok(text)
}

fn phrase(song: &Song, index: usize) -> Result<String> {
    let mut text = String::new();
    writeln!(text, "PHRASE {index:02X}")?;
    writeln!(text, "  N   V  I  FX1    FX2    FX3")?;

    for (step, phrase_step) in song.phrases()[index].steps.iter().enumerate() {
        let fx: Vec<String> = (0..3)
            .map(|slot| song.fx_to_str(index as u8, step, slot, None))
            .collect();

        writeln!(
            text,
            "{step:X} {} {} {} {}",
            phrase_step.note_to_str(),
            phrase_step.volume_to_str(),
            phrase_step.instrument_to_str(),
            fx.join(" ")
        )?;
    }

    Ok(text)
}

fn song_table(song: &Song, index: usize) -> Result<String> {
    table(&song.tables()[index], index, |step, slot| {
        song.table_fx_to_str(index as u8, step, slot)
    })
}

fn instrument_table(instrument: &Instrument) -> Result<String> {
    let kind = instrument.kind();
    let table_data = instrument.table.clone().unwrap_or_default();

    table(&table_data, 0, |step, slot| {
        table_data.steps[step].fx[slot].to_str(Some(kind))
    })
}

fn table<F>(table: &Table, index: usize, fx_to_str: F) -> Result<String>
where
    F: Fn(usize, usize) -> String,
{
    let mut text = String::new();
    writeln!(text, "TABLE {index:02X}")?;
    writeln!(text, "  N  V  FX1    FX2    FX3")?;

    for (step, table_step) in table.steps.iter().enumerate() {
        let fx: Vec<String> = (0..3).map(|slot| fx_to_str(step, slot)).collect();

        writeln!(
            text,
            "{step:X} {} {} {}",
            hex(table_step.transpose),
            table_step.volume_to_str(),
            fx.join(" ")
        )?;
    }

    Ok(text)
}

fn on_off(value: bool) -> &'static str {
    if value {
        "ON"
    } else {
        "OFF"
    }
}

fn instrument(instrument: &Instrument) -> Result<String> {
    let kind = instrument.kind();
    let version = instrument.version();

    let mut text = String::new();
    writeln!(text, "{:<10}{}", "NAME", instrument.name)?;
    writeln!(text, "{:<10}{}", "TYPE", kind.kind_to_str())?;
    writeln!(text, "{:<10}{}", "TRANSP.", on_off(instrument.transpose))?;
    writeln!(text, "{:<10}{}", "TBL. TIC", hex(instrument.table_tick))?;
    writeln!(text, "{:<10}{}", "VOLUME", hex(instrument.volume))?;
    writeln!(text, "{:<10}{}", "PITCH", hex(instrument.pitch))?;
    writeln!(text, "{:<10}{}", "FINE", hex(instrument.fine_tune))?;
    writeln!(text)?;

    match instrument.params() {
        InstrumentParams::WavSynth(params) => {
            writeln!(text, "{:<10}{}", "SHAPE", params.shape_to_str())?;
            writeln!(text, "{:<10}{}", "SIZE", hex(params.size))?;
            writeln!(text, "{:<10}{}", "MULT", hex(params.mult))?;
            writeln!(text, "{:<10}{}", "WARP", hex(params.warp))?;
            writeln!(text, "{:<10}{}", "MIRROR", hex(params.mirror))?;
        }
        InstrumentParams::MacroSynth(params) => {
            writeln!(text, "{:<10}{}", "SHAPE", params.shape_to_str(version))?;
            writeln!(text, "{:<10}{}", "TIMBRE", hex(params.timbre))?;
            writeln!(text, "{:<10}{}", "COLOR", hex(params.color))?;
            writeln!(text, "{:<10}{}", "DEGRADE", hex(params.degrade))?;
            writeln!(text, "{:<10}{}", "REDUX", hex(params.redux))?;
        }
        InstrumentParams::Sampler(params) => {
            writeln!(text, "{:<10}{}", "SAMPLE", params.sample_path_to_str())?;
            writeln!(text, "{:<10}{}", "PLAY", params.play_mode_to_str())?;
            writeln!(text, "{:<10}{}", "SLICE", hex(params.slice))?;
            writeln!(text, "{:<10}{}", "START", hex(params.start))?;
            writeln!(text, "{:<10}{}", "LOOP ST", hex(params.loop_start))?;
            writeln!(text, "{:<10}{}", "LENGTH", hex(params.length))?;
            writeln!(text, "{:<10}{}", "DEGRADE", hex(params.degrade))?;
        }
        InstrumentParams::FmSynth(params) => {
            writeln!(text, "{:<10}{}", "ALGO", params.algo_to_str())?;

            for (label, operator) in ["A", "B", "C", "D"].iter().zip(&params.operators) {
                writeln!(
                    text,
                    "{label}  {:<5} RATIO {:02}.{:02} LEV/FB {}/{} MOD {} {}",
                    operator.shape_to_str(version),
                    operator.ratio,
                    operator.ratio_fine,
                    hex(operator.level),
                    hex(operator.feedback),
                    operator.mod_a_to_str(),
                    operator.mod_b_to_str()
                )?;
            }

            writeln!(
                text,
                "{:<10}{} {} {} {}",
                "MOD",
                hex(params.mod1),
                hex(params.mod2),
                hex(params.mod3),
                hex(params.mod4)
            )?;
        }
        InstrumentParams::MidiOut(params) => {
            writeln!(text, "{:<10}{}", "PORT", params.port_to_str(version))?;
            writeln!(text, "{:<10}{}", "CHANNEL", params.channel_to_str())?;
            writeln!(text, "{:<10}{}", "BANK", hex_or_empty(params.bank_select))?;
            writeln!(text, "{:<10}{}", "PROGRAM", hex_or_empty(params.program_change))?;

            for (index, cc) in params.custom_cc.iter().enumerate() {
                writeln!(
                    text,
                    "CC{}       {} {}",
                    (b'A' + index as u8) as char,
                    hex_or_empty(cc.number),
                    hex_or_empty(cc.default_value)
                )?;
            }
        }
        InstrumentParams::None => {}
        InstrumentParams::Unknown(bytes) => {
            writeln!(text, "{:<10}{} raw bytes", "PARAMS", bytes.len())?;
        }
    }

    if !kind.is_inert() {
        let filter = &instrument.filter;
        let mixer = &instrument.mixer;

        writeln!(text)?;
        writeln!(text, "{:<10}{}", "FILTER", filter.type_to_str(kind, version))?;
        writeln!(text, "{:<10}{}", "CUTOFF", hex(filter.cutoff))?;
        writeln!(text, "{:<10}{}", "RES", hex(filter.res))?;
        writeln!(text, "{:<10}{}", "AMP", hex(instrument.amp.amp))?;
        writeln!(text, "{:<10}{}", "LIM", instrument.amp.limit_to_str())?;
        writeln!(text, "{:<10}{}", "PAN", hex(mixer.pan))?;
        writeln!(text, "{:<10}{}", "DRY", hex(mixer.dry))?;
        writeln!(
            text,
            "{:<10}{} {} {}",
            "CHO/DEL/REV",
            hex(mixer.chorus),
            hex(mixer.delay),
            hex(mixer.reverb)
        )?;

        for (number, envelope) in instrument.envelopes.iter().enumerate() {
            writeln!(
                text,
                "ENV{}      {} AMT {} A/H/D {} {} {}",
                number + 1,
                envelope.dest_to_str(kind),
                hex(envelope.amount),
                hex(envelope.attack),
                hex(envelope.hold),
                hex(envelope.decay)
            )?;
        }

        for (number, lfo) in instrument.lfos().iter().enumerate() {
            writeln!(
                text,
                "LFO{}      {} {} {} FREQ {} AMT {}",
                number + 1,
                lfo.shape_to_str(),
                lfo.dest_to_str(kind),
                lfo.trigger_mode_to_str(),
                hex(lfo.freq),
                hex(lfo.amount)
            )?;
        }
    }

    Ok(text)
}

fn scale(scale: &Scale) -> Result<String> {
    let mut text = String::new();
    writeln!(text, "SCALE {}", scale.name)?;

    for (note, interval) in NOTE_NAMES.iter().zip(&scale.intervals) {
        let enabled = if interval.enabled { "ON " } else { "-- " };
        writeln!(text, "{note} {enabled}{}", interval.offset_to_str())?;
    }

    Ok(text)
}

fn theme(theme: &Theme) -> Result<String> {
    let mut text = String::new();

    for (name, color) in theme.colors() {
        writeln!(text, "{:<14}{}", name.to_uppercase(), color.to_hex())?;
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use m8::{fx::Fx, instrument::InstrumentKind, version::Version};

    #[test]
    fn song_page_is_clamped() {
        let song = Song::new(Version::LATEST);
        let text = song_rows(&song, 250).unwrap();
        let rows: Vec<&str> = text.lines().skip(2).collect();

        assert_eq!(rows.len(), PAGE);
        assert!(rows[0].starts_with("F0 -- --"));
        assert!(rows[15].starts_with("FF"));
    }

    #[test]
    fn phrase_fx_follow_the_instrument() {
        let mut song = Song::new(Version::LATEST);
        song.instruments_mut()[2] = Instrument::new(InstrumentKind::Sampler, Version::LATEST);

        let step = &mut song.phrases_mut()[4].steps[0];
        step.note = 36;
        step.instrument = 2;
        step.fx[0] = Fx {
            command: 0x83,
            value: 0x01,
        };

        let text = phrase(&song, 4).unwrap();
        assert_eq!(
            text.lines().nth(2),
            Some("0 C-4 -- 02 PLY 01 --- 00 --- 00")
        );
    }

    #[test]
    fn inert_instruments_skip_the_shared_groups() {
        let midi = Instrument::new(InstrumentKind::MidiOut, Version::LATEST);
        let text = instrument(&midi).unwrap();
        assert!(text.contains("MIDIOUT"));
        assert!(!text.contains("FILTER"));

        let fm = Instrument::new(InstrumentKind::FmSynth, Version::LATEST);
        let text = instrument(&fm).unwrap();
        assert!(text.contains("A>B>C>D"));
        assert!(text.contains("LFO2"));

        let unknown = Instrument::new(InstrumentKind::Unknown(0x05), Version::LATEST);
        let text = instrument(&unknown).unwrap();
        assert!(text.contains("UNK (05)"));
        assert!(text.contains("197 raw bytes"));
        assert!(!text.contains("FILTER"));
    }

    #[test]
    fn wrong_kinds_are_reported() {
        let file = M8File::new(Version::LATEST, Body::Theme(Theme::default()));
        let error = expect_song(&file, "phrase").unwrap_err();
        assert_eq!(
            error.to_string(),
            "This is a Theme file, which has no phrase to view"
        );
    }
}

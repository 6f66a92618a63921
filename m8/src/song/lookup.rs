//! Questions about a song that span more than one bank

use super::{Chain, Song};
use crate::{
    display::{lookup, unknown},
    fx::Fx,
    instrument::Instrument,
    song::MidiMapping,
};

/// Where a phrase is being played: which track, which song row, which step of the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackPosition {
    pub track: usize,
    pub song_step: usize,
    pub chain_step: usize,
}

impl Song {
    /// Find the instrument that plays a phrase step
    ///
    /// A step that names an instrument plays that one. Otherwise the instrument is
    /// inherited from the nearest earlier step in the same phrase. If that doesn't give an
    /// answer and the position of the phrase in the song is known, the search carries on
    /// backwards through the earlier steps of the chain, and then through the earlier song
    /// rows on the same track.
    ///
    /// `None` means no instrument plays the step. Coordinates outside of the song are not
    /// an error, they simply resolve to `None`.
    pub fn phrase_step_instrument(
        &self,
        phrase: u8,
        step: usize,
        position: Option<TrackPosition>,
    ) -> Option<u8> {
        if let Some(instrument) = self
            .phrases
            .get(phrase as usize)
            .and_then(|phrase| phrase.last_instrument_at(step))
        {
            return Some(instrument);
        }

        let position = position?;
        let chain_at = |row: usize| {
            self.rows
                .get(row)
                .and_then(|row| row.chain(position.track))
                .and_then(|chain| self.chains.get(chain as usize))
        };

        if let Some(instrument) = chain_at(position.song_step)
            .and_then(|chain| self.last_instrument_in_chain(chain, position.chain_step))
        {
            return Some(instrument);
        }

        (0..position.song_step.min(Self::ROW_COUNT))
            .rev()
            .filter_map(chain_at)
            .find_map(|chain| self.last_instrument_in_chain(chain, chain.steps.len()))
    }

    // The last instrument named by the phrases in the chain steps before `end`
    fn last_instrument_in_chain(&self, chain: &Chain, end: usize) -> Option<u8> {
        chain
            .steps
            .iter()
            .take(end)
            .rev()
            .filter(|step| !step.is_empty())
            .filter_map(|step| self.phrases.get(step.phrase as usize))
            .find_map(|phrase| phrase.last_instrument_at(phrase.steps.len() - 1))
    }

    /// Is the phrase used by exactly one chain step?
    pub fn is_phrase_unique(&self, phrase: u8) -> bool {
        self.chains
            .iter()
            .flat_map(|chain| chain.steps.iter())
            .filter(|step| !step.is_empty() && step.phrase == phrase)
            .count()
            == 1
    }

    /// Is the chain used by exactly one song row and track?
    pub fn is_chain_unique(&self, chain: u8) -> bool {
        self.rows
            .iter()
            .flat_map(|row| row.tracks.iter())
            .filter(|track| **track == chain)
            .count()
            == 1
    }

    /// Is the table triggered (through `TBL`) by exactly one phrase step?
    pub fn is_table_unique(&self, table: u8) -> bool {
        self.phrases
            .iter()
            .flat_map(|phrase| phrase.steps.iter())
            .filter(|step| {
                step.fx
                    .iter()
                    .any(|fx| fx.command == Fx::TABLE_COMMAND && fx.value == table)
            })
            .count()
            == 1
    }

    /// Render an effect of a phrase step, named after the instrument that plays it
    pub fn fx_to_str(
        &self,
        phrase: u8,
        step: usize,
        slot: usize,
        position: Option<TrackPosition>,
    ) -> String {
        let fx = self
            .phrases
            .get(phrase as usize)
            .and_then(|phrase| phrase.steps.get(step))
            .and_then(|step| step.fx.get(slot))
            .copied()
            .unwrap_or(Fx::EMPTY);

        let kind = self
            .phrase_step_instrument(phrase, step, position)
            .and_then(|instrument| self.instruments.get(instrument as usize))
            .map(Instrument::kind);

        fx.to_str(kind)
    }

    /// Render an effect of a table step
    ///
    /// The first 128 tables belong to the instrument with the same index, whose kind names
    /// the instrument commands.
    pub fn table_fx_to_str(&self, table: u8, step: usize, slot: usize) -> String {
        let fx = self
            .tables
            .get(table as usize)
            .and_then(|table| table.steps.get(step))
            .and_then(|step| step.fx.get(slot))
            .copied()
            .unwrap_or(Fx::EMPTY);

        let kind = self.instruments.get(table as usize).map(Instrument::kind);

        fx.to_str(kind)
    }

    /// Describe what a MIDI mapping controls, e.g. `I03 CUTOFF` or `DJ FILTER`
    pub fn midi_mapping_dest_to_str(&self, mapping: usize) -> String {
        let Some(mapping) = self.midi_mappings.get(mapping) else {
            return "---".to_owned();
        };

        if mapping.is_empty() {
            return "---".to_owned();
        }

        match mapping.kind {
            MidiMapping::KIND_INSTRUMENT => {
                let labels = self
                    .instruments
                    .get(mapping.value as usize)
                    .map(|instrument| instrument.kind().midi_labels())
                    .unwrap_or_default();

                format!(
                    "I{:02X} {}",
                    mapping.value,
                    lookup(&labels, mapping.param_index)
                )
            }
            MidiMapping::KIND_MIXER => lookup(&MidiMapping::MIXER_LABELS, mapping.param_index),
            MidiMapping::KIND_EFFECTS => {
                lookup(&MidiMapping::EFFECTS_LABELS, mapping.param_index)
            }
            kind => unknown(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        instrument::InstrumentKind,
        song::{ChainStep, PhraseStep},
        version::Version,
    };

    fn song() -> Song {
        let mut song = Song::new(Version::LATEST);
        song.instruments_mut()[5] = Instrument::new(InstrumentKind::Sampler, Version::LATEST);
        song.instruments_mut()[7] = Instrument::new(InstrumentKind::FmSynth, Version::LATEST);
        song
    }

    #[test]
    fn instrument_from_the_phrase_itself() {
        let mut song = song();
        song.phrases_mut()[0].steps[1].instrument = 5;

        // Step 0 has nothing before it to inherit from
        assert_eq!(song.phrase_step_instrument(0, 0, None), None);
        assert_eq!(song.phrase_step_instrument(0, 1, None), Some(5));
        assert_eq!(song.phrase_step_instrument(0, 9, None), Some(5));
    }

    #[test]
    fn instrument_from_the_chain_and_song() {
        let mut song = song();
        song.phrases_mut()[0].steps[1].instrument = 5;
        song.phrases_mut()[2].steps[12].instrument = 7;

        // Row 0 plays chain 0 (phrase 2), row 1 plays chain 1 (phrases 1, 0)
        song.chains_mut()[0].steps[0] = ChainStep {
            phrase: 2,
            transpose: 0,
        };
        song.chains_mut()[1].steps[0] = ChainStep {
            phrase: 1,
            transpose: 0,
        };
        song.chains_mut()[1].steps[1] = ChainStep {
            phrase: 0,
            transpose: 0,
        };
        song.rows_mut()[0].tracks[2] = 0;
        song.rows_mut()[1].tracks[2] = 1;

        let position = |song_step, chain_step| {
            Some(TrackPosition {
                track: 2,
                song_step,
                chain_step,
            })
        };

        // Phrase 0 step 0 in row 1: phrase 1 is empty, so the search reaches row 0
        assert_eq!(song.phrase_step_instrument(0, 0, position(1, 1)), Some(7));

        // Phrase 2 step 0 in row 0 has nothing before it
        assert_eq!(song.phrase_step_instrument(2, 0, position(0, 0)), None);

        // Other tracks don't count
        let other_track = Some(TrackPosition {
            track: 3,
            song_step: 1,
            chain_step: 1,
        });
        assert_eq!(song.phrase_step_instrument(0, 0, other_track), None);
    }

    #[test]
    fn resolution_never_panics() {
        let song = song();
        let far = Some(TrackPosition {
            track: 100,
            song_step: usize::MAX,
            chain_step: usize::MAX,
        });

        assert_eq!(song.phrase_step_instrument(0xFF, usize::MAX, far), None);
        assert_eq!(song.fx_to_str(0xFF, 99, 99, far), "--- 00");
    }

    #[test]
    fn uniqueness() {
        let mut song = song();
        song.chains_mut()[0].steps[0].phrase = 4;
        song.chains_mut()[1].steps[3].phrase = 4;
        song.chains_mut()[2].steps[0].phrase = 5;
        assert!(!song.is_phrase_unique(4));
        assert!(song.is_phrase_unique(5));
        assert!(!song.is_phrase_unique(6));

        song.rows_mut()[0].tracks[0] = 1;
        song.rows_mut()[4].tracks[6] = 2;
        song.rows_mut()[5].tracks[6] = 2;
        assert!(song.is_chain_unique(1));
        assert!(!song.is_chain_unique(2));

        let table = Fx {
            command: Fx::TABLE_COMMAND,
            value: 0x09,
        };
        song.phrases_mut()[0].steps[0].fx = [table, table, Fx::EMPTY];
        assert!(song.is_table_unique(0x09));
        song.phrases_mut()[1].steps[5].fx[2] = table;
        assert!(!song.is_table_unique(0x09));
    }

    #[test]
    fn fx_names_follow_the_instrument() {
        let mut song = song();
        song.phrases_mut()[0].steps[0] = PhraseStep {
            note: 0x30,
            volume: 0xFF,
            instrument: 7,
            fx: [
                Fx {
                    command: 0x83,
                    value: 0x02,
                },
                Fx::EMPTY,
                Fx::EMPTY,
            ],
        };
        song.phrases_mut()[0].steps[1].fx[0] = Fx {
            command: 0x83,
            value: 0x01,
        };

        assert_eq!(song.fx_to_str(0, 0, 0, None), "ALG 02");
        assert_eq!(song.fx_to_str(0, 1, 0, None), "ALG 01");

        song.tables_mut()[5].steps[0].fx[0] = Fx {
            command: 0x83,
            value: 0x00,
        };
        assert_eq!(song.table_fx_to_str(5, 0, 0), "PLY 00");
    }

    #[test]
    fn midi_mapping_destinations() {
        let mut song = song();
        song.midi_mappings_mut()[0] = MidiMapping {
            control_number: 0x4A,
            value: 5,
            kind: MidiMapping::KIND_INSTRUMENT,
            param_index: 3,
            ..MidiMapping::EMPTY
        };
        song.midi_mappings_mut()[1] = MidiMapping {
            control_number: 0x4B,
            kind: MidiMapping::KIND_MIXER,
            param_index: 25,
            ..MidiMapping::EMPTY
        };
        song.midi_mappings_mut()[2] = MidiMapping {
            control_number: 0x4C,
            kind: 9,
            ..MidiMapping::EMPTY
        };

        assert_eq!(song.midi_mapping_dest_to_str(0), "I05 PLAY MODE");
        assert_eq!(song.midi_mapping_dest_to_str(1), "DJ FILTER");
        assert_eq!(song.midi_mapping_dest_to_str(2), "UNK (09)");
        assert_eq!(song.midi_mapping_dest_to_str(3), "---");
        assert_eq!(song.midi_mapping_dest_to_str(500), "---");
    }
}

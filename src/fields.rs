//! Field model for the production log sheet.
//!
//! Every slot on the printed sheet is one [`Field`]. The extractor and the
//! web form both work in terms of [`SheetFields`], a closed record with one
//! string member per field. An unknown or unreadable value is the empty
//! string, never a missing key.

use serde::{Deserialize, Serialize};

/// One named slot of the production log sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Date,
    Tube,
    Line,
    Weld,
    PelletType,
    StdChill,
    EmbossChill,
    Tpo,
    Covestro,
    Lubrizol,
    Down3010,
    ExtrOnly,
    DoubleTape,
    Remote,
    Local,
    LineSpeed,
    Output,
    ScrewSpeed,
    DieLip,
    Zone1,
    Zone2,
    Zone3,
    Die1,
    Die2,
    Die3,
    Die4,
    PctLoad,
    HeadPressure,
    S1Start,
    S2Start,
    S3Start,
    S1End,
    S2End,
    S3End,
    Comments,
}

impl Field {
    /// All fields in sheet order. This drives form rendering and the
    /// extractor's total-coverage guarantee.
    pub const ALL: [Field; 35] = [
        Field::Date,
        Field::Tube,
        Field::Line,
        Field::Weld,
        Field::PelletType,
        Field::StdChill,
        Field::EmbossChill,
        Field::Tpo,
        Field::Covestro,
        Field::Lubrizol,
        Field::Down3010,
        Field::ExtrOnly,
        Field::DoubleTape,
        Field::Remote,
        Field::Local,
        Field::LineSpeed,
        Field::Output,
        Field::ScrewSpeed,
        Field::DieLip,
        Field::Zone1,
        Field::Zone2,
        Field::Zone3,
        Field::Die1,
        Field::Die2,
        Field::Die3,
        Field::Die4,
        Field::PctLoad,
        Field::HeadPressure,
        Field::S1Start,
        Field::S2Start,
        Field::S3Start,
        Field::S1End,
        Field::S2End,
        Field::S3End,
        Field::Comments,
    ];

    /// Stable form-identifier key. Doubles as the serde name on
    /// [`SheetFields`] and as the input id in the web form.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Tube => "tube",
            Field::Line => "line",
            Field::Weld => "weld",
            Field::PelletType => "pelletType",
            Field::StdChill => "stdChill",
            Field::EmbossChill => "embossChill",
            Field::Tpo => "tpo",
            Field::Covestro => "covestro",
            Field::Lubrizol => "lubrizol",
            Field::Down3010 => "down3010",
            Field::ExtrOnly => "extrOnly",
            Field::DoubleTape => "doubleTape",
            Field::Remote => "remote",
            Field::Local => "local",
            Field::LineSpeed => "lineSpeed",
            Field::Output => "output",
            Field::ScrewSpeed => "screwSpeed",
            Field::DieLip => "dieLip",
            Field::Zone1 => "zone1",
            Field::Zone2 => "zone2",
            Field::Zone3 => "zone3",
            Field::Die1 => "die1",
            Field::Die2 => "die2",
            Field::Die3 => "die3",
            Field::Die4 => "die4",
            Field::PctLoad => "pctLoad",
            Field::HeadPressure => "headPressure",
            Field::S1Start => "s1start",
            Field::S2Start => "s2start",
            Field::S3Start => "s3start",
            Field::S1End => "s1end",
            Field::S2End => "s2end",
            Field::S3End => "s3end",
            Field::Comments => "comments",
        }
    }

    /// Human-readable label for the web form.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::Tube => "Tube #",
            Field::Line => "Line",
            Field::Weld => "Weld",
            Field::PelletType => "Pellet Type",
            Field::StdChill => "Std Chill",
            Field::EmbossChill => "Emboss Chill",
            Field::Tpo => "TPO",
            Field::Covestro => "Covestro",
            Field::Lubrizol => "Lubrizol",
            Field::Down3010 => "3010 Down",
            Field::ExtrOnly => "Extr Only",
            Field::DoubleTape => "Double Tape",
            Field::Remote => "Remote",
            Field::Local => "Local",
            Field::LineSpeed => "Line Speed",
            Field::Output => "Output",
            Field::ScrewSpeed => "Screw Speed",
            Field::DieLip => "Die Lip",
            Field::Zone1 => "Zone 1",
            Field::Zone2 => "Zone 2",
            Field::Zone3 => "Zone 3",
            Field::Die1 => "Die 1",
            Field::Die2 => "Die 2",
            Field::Die3 => "Die 3",
            Field::Die4 => "Die 4",
            Field::PctLoad => "% Load",
            Field::HeadPressure => "Head Pressure",
            Field::S1Start => "S1 (Start)",
            Field::S2Start => "S2 (Start)",
            Field::S3Start => "S3 (Start)",
            Field::S1End => "S1 (End)",
            Field::S2End => "S2 (End)",
            Field::S3End => "S3 (End)",
            Field::Comments => "Comments",
        }
    }

    /// Categorical presence flags render as checkboxes and extract as "1".
    pub fn is_flag(&self) -> bool {
        matches!(
            self,
            Field::StdChill
                | Field::EmbossChill
                | Field::Tpo
                | Field::Covestro
                | Field::Lubrizol
                | Field::Down3010
                | Field::ExtrOnly
                | Field::DoubleTape
                | Field::Remote
                | Field::Local
        )
    }
}

/// The full set of sheet fields as captured from one scan (or as edited in
/// the form). Every field is always present; empty string means unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetFields {
    pub date: String,
    pub tube: String,
    pub line: String,
    pub weld: String,
    pub pellet_type: String,
    pub std_chill: String,
    pub emboss_chill: String,
    pub tpo: String,
    pub covestro: String,
    pub lubrizol: String,
    pub down3010: String,
    pub extr_only: String,
    pub double_tape: String,
    pub remote: String,
    pub local: String,
    pub line_speed: String,
    pub output: String,
    pub screw_speed: String,
    pub die_lip: String,
    pub zone1: String,
    pub zone2: String,
    pub zone3: String,
    pub die1: String,
    pub die2: String,
    pub die3: String,
    pub die4: String,
    pub pct_load: String,
    pub head_pressure: String,
    #[serde(rename = "s1start")]
    pub s1_start: String,
    #[serde(rename = "s2start")]
    pub s2_start: String,
    #[serde(rename = "s3start")]
    pub s3_start: String,
    #[serde(rename = "s1end")]
    pub s1_end: String,
    #[serde(rename = "s2end")]
    pub s2_end: String,
    #[serde(rename = "s3end")]
    pub s3_end: String,
    pub comments: String,
}

impl SheetFields {
    /// Read a field by name.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Date => &self.date,
            Field::Tube => &self.tube,
            Field::Line => &self.line,
            Field::Weld => &self.weld,
            Field::PelletType => &self.pellet_type,
            Field::StdChill => &self.std_chill,
            Field::EmbossChill => &self.emboss_chill,
            Field::Tpo => &self.tpo,
            Field::Covestro => &self.covestro,
            Field::Lubrizol => &self.lubrizol,
            Field::Down3010 => &self.down3010,
            Field::ExtrOnly => &self.extr_only,
            Field::DoubleTape => &self.double_tape,
            Field::Remote => &self.remote,
            Field::Local => &self.local,
            Field::LineSpeed => &self.line_speed,
            Field::Output => &self.output,
            Field::ScrewSpeed => &self.screw_speed,
            Field::DieLip => &self.die_lip,
            Field::Zone1 => &self.zone1,
            Field::Zone2 => &self.zone2,
            Field::Zone3 => &self.zone3,
            Field::Die1 => &self.die1,
            Field::Die2 => &self.die2,
            Field::Die3 => &self.die3,
            Field::Die4 => &self.die4,
            Field::PctLoad => &self.pct_load,
            Field::HeadPressure => &self.head_pressure,
            Field::S1Start => &self.s1_start,
            Field::S2Start => &self.s2_start,
            Field::S3Start => &self.s3_start,
            Field::S1End => &self.s1_end,
            Field::S2End => &self.s2_end,
            Field::S3End => &self.s3_end,
            Field::Comments => &self.comments,
        }
    }

    /// Write a field by name.
    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Date => &mut self.date,
            Field::Tube => &mut self.tube,
            Field::Line => &mut self.line,
            Field::Weld => &mut self.weld,
            Field::PelletType => &mut self.pellet_type,
            Field::StdChill => &mut self.std_chill,
            Field::EmbossChill => &mut self.emboss_chill,
            Field::Tpo => &mut self.tpo,
            Field::Covestro => &mut self.covestro,
            Field::Lubrizol => &mut self.lubrizol,
            Field::Down3010 => &mut self.down3010,
            Field::ExtrOnly => &mut self.extr_only,
            Field::DoubleTape => &mut self.double_tape,
            Field::Remote => &mut self.remote,
            Field::Local => &mut self.local,
            Field::LineSpeed => &mut self.line_speed,
            Field::Output => &mut self.output,
            Field::ScrewSpeed => &mut self.screw_speed,
            Field::DieLip => &mut self.die_lip,
            Field::Zone1 => &mut self.zone1,
            Field::Zone2 => &mut self.zone2,
            Field::Zone3 => &mut self.zone3,
            Field::Die1 => &mut self.die1,
            Field::Die2 => &mut self.die2,
            Field::Die3 => &mut self.die3,
            Field::Die4 => &mut self.die4,
            Field::PctLoad => &mut self.pct_load,
            Field::HeadPressure => &mut self.head_pressure,
            Field::S1Start => &mut self.s1_start,
            Field::S2Start => &mut self.s2_start,
            Field::S3Start => &mut self.s3_start,
            Field::S1End => &mut self.s1_end,
            Field::S2End => &mut self.s2_end,
            Field::S3End => &mut self.s3_end,
            Field::Comments => &mut self.comments,
        };
        *slot = value;
    }

    /// True when the field has not been set yet. First match wins in the
    /// extractor, so a rule only writes into an empty slot.
    pub fn is_empty(&self, field: Field) -> bool {
        self.get(field).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_covers_every_field_once() {
        let mut seen = std::collections::HashSet::new();
        for field in Field::ALL {
            assert!(seen.insert(field.key()), "duplicate key {}", field.key());
        }
        assert_eq!(seen.len(), 35);
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut fields = SheetFields::default();
        for field in Field::ALL {
            assert_eq!(fields.get(field), "");
            fields.set(field, field.key().to_string());
        }
        for field in Field::ALL {
            assert_eq!(fields.get(field), field.key());
        }
    }

    #[test]
    fn test_serde_keys_match_field_keys() {
        let mut fields = SheetFields::default();
        fields.set(Field::PelletType, "TPO-22".to_string());
        fields.set(Field::S1Start, "12.5".to_string());
        fields.set(Field::Down3010, "1".to_string());

        let value = serde_json::to_value(&fields).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 35);
        for field in Field::ALL {
            assert!(map.contains_key(field.key()), "missing {}", field.key());
        }
        assert_eq!(value["pelletType"], "TPO-22");
        assert_eq!(value["s1start"], "12.5");
        assert_eq!(value["down3010"], "1");
    }
}

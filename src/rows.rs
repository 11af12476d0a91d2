//! Row derivation for saved entries.
//!
//! One confirmed form submission becomes exactly two table rows: the sheet
//! records a start-of-run and an end-of-run measurement snapshot sharing
//! every process field but the three grams-per-minute samples and the
//! comment. [`build_rows`] performs that split, renames internal field keys
//! to display column names, and derives the sample average.

use serde::{Deserialize, Serialize};

use crate::fields::SheetFields;

/// Which measurement snapshot of the run a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snapshot {
    Start,
    End,
}

impl Snapshot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Snapshot::Start => "Start",
            Snapshot::End => "End",
        }
    }

    /// The three raw sample values for this snapshot.
    fn samples<'a>(&self, form: &'a SheetFields) -> [&'a str; 3] {
        match self {
            Snapshot::Start => [&form.s1_start, &form.s2_start, &form.s3_start],
            Snapshot::End => [&form.s1_end, &form.s2_end, &form.s3_end],
        }
    }
}

/// One persisted table row. Serde names are the display column names, so
/// the stored JSON, the API payload, and the CSV export all agree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Tube #")]
    pub tube: String,
    #[serde(rename = "Line")]
    pub line: String,
    #[serde(rename = "Weld")]
    pub weld: String,
    #[serde(rename = "Pellet Type")]
    pub pellet_type: String,
    #[serde(rename = "Std Chill")]
    pub std_chill: String,
    #[serde(rename = "Emboss Chill")]
    pub emboss_chill: String,
    #[serde(rename = "TPO")]
    pub tpo: String,
    #[serde(rename = "Covestro")]
    pub covestro: String,
    #[serde(rename = "Lubrizol")]
    pub lubrizol: String,
    #[serde(rename = "3010 Down")]
    pub down3010: String,
    #[serde(rename = "Extr Only")]
    pub extr_only: String,
    #[serde(rename = "Double Tape")]
    pub double_tape: String,
    #[serde(rename = "Remote")]
    pub remote: String,
    #[serde(rename = "Local")]
    pub local: String,
    #[serde(rename = "Line Speed")]
    pub line_speed: String,
    #[serde(rename = "Output")]
    pub output: String,
    #[serde(rename = "Screw Speed")]
    pub screw_speed: String,
    #[serde(rename = "Die Lip")]
    pub die_lip: String,
    #[serde(rename = "Zone 1")]
    pub zone1: String,
    #[serde(rename = "Zone 2")]
    pub zone2: String,
    #[serde(rename = "Zone 3")]
    pub zone3: String,
    #[serde(rename = "Die 1")]
    pub die1: String,
    #[serde(rename = "Die 2")]
    pub die2: String,
    #[serde(rename = "Die 3")]
    pub die3: String,
    #[serde(rename = "Die 4")]
    pub die4: String,
    #[serde(rename = "% Load")]
    pub pct_load: String,
    #[serde(rename = "Head Pressure")]
    pub head_pressure: String,
    #[serde(rename = "S1")]
    pub s1: String,
    #[serde(rename = "S2")]
    pub s2: String,
    #[serde(rename = "S3")]
    pub s3: String,
    #[serde(rename = "Avg")]
    pub avg: String,
    #[serde(rename = "Melt Index")]
    pub melt_index: String,
    #[serde(rename = "Comments")]
    pub comments: String,
}

impl EntryRow {
    /// Fixed column order for the table and the CSV export.
    pub const COLUMNS: [&'static str; 34] = [
        "Date",
        "Tube #",
        "Line",
        "Weld",
        "Pellet Type",
        "Std Chill",
        "Emboss Chill",
        "TPO",
        "Covestro",
        "Lubrizol",
        "3010 Down",
        "Extr Only",
        "Double Tape",
        "Remote",
        "Local",
        "Line Speed",
        "Output",
        "Screw Speed",
        "Die Lip",
        "Zone 1",
        "Zone 2",
        "Zone 3",
        "Die 1",
        "Die 2",
        "Die 3",
        "Die 4",
        "% Load",
        "Head Pressure",
        "S1",
        "S2",
        "S3",
        "Avg",
        "Melt Index",
        "Comments",
    ];

    /// Resolve a display column name to its value. Unknown columns are
    /// empty rather than a panic; callers iterate [`EntryRow::COLUMNS`].
    pub fn get(&self, column: &str) -> &str {
        match column {
            "Date" => &self.date,
            "Tube #" => &self.tube,
            "Line" => &self.line,
            "Weld" => &self.weld,
            "Pellet Type" => &self.pellet_type,
            "Std Chill" => &self.std_chill,
            "Emboss Chill" => &self.emboss_chill,
            "TPO" => &self.tpo,
            "Covestro" => &self.covestro,
            "Lubrizol" => &self.lubrizol,
            "3010 Down" => &self.down3010,
            "Extr Only" => &self.extr_only,
            "Double Tape" => &self.double_tape,
            "Remote" => &self.remote,
            "Local" => &self.local,
            "Line Speed" => &self.line_speed,
            "Output" => &self.output,
            "Screw Speed" => &self.screw_speed,
            "Die Lip" => &self.die_lip,
            "Zone 1" => &self.zone1,
            "Zone 2" => &self.zone2,
            "Zone 3" => &self.zone3,
            "Die 1" => &self.die1,
            "Die 2" => &self.die2,
            "Die 3" => &self.die3,
            "Die 4" => &self.die4,
            "% Load" => &self.pct_load,
            "Head Pressure" => &self.head_pressure,
            "S1" => &self.s1,
            "S2" => &self.s2,
            "S3" => &self.s3,
            "Avg" => &self.avg,
            "Melt Index" => &self.melt_index,
            "Comments" => &self.comments,
            _ => "",
        }
    }
}

/// Derive the Start and End rows from confirmed form values.
///
/// Always returns exactly two rows with identical column sets; they differ
/// only in the sample columns, the derived average, and the tag-prefixed
/// comment.
pub fn build_rows(form: &SheetFields) -> (EntryRow, EntryRow) {
    (
        build_row(form, Snapshot::Start),
        build_row(form, Snapshot::End),
    )
}

fn build_row(form: &SheetFields, snapshot: Snapshot) -> EntryRow {
    let samples = snapshot.samples(form).map(normalize_sample);
    let avg = average(&samples);
    let [s1, s2, s3] = samples.map(|s| s.map(|(text, _)| text).unwrap_or_default());

    EntryRow {
        date: form.date.clone(),
        tube: form.tube.clone(),
        line: form.line.clone(),
        weld: form.weld.clone(),
        pellet_type: form.pellet_type.clone(),
        std_chill: form.std_chill.clone(),
        emboss_chill: form.emboss_chill.clone(),
        tpo: form.tpo.clone(),
        covestro: form.covestro.clone(),
        lubrizol: form.lubrizol.clone(),
        down3010: form.down3010.clone(),
        extr_only: form.extr_only.clone(),
        double_tape: form.double_tape.clone(),
        remote: form.remote.clone(),
        local: form.local.clone(),
        line_speed: form.line_speed.clone(),
        output: form.output.clone(),
        screw_speed: form.screw_speed.clone(),
        die_lip: form.die_lip.clone(),
        zone1: form.zone1.clone(),
        zone2: form.zone2.clone(),
        zone3: form.zone3.clone(),
        die1: form.die1.clone(),
        die2: form.die2.clone(),
        die3: form.die3.clone(),
        die4: form.die4.clone(),
        pct_load: form.pct_load.clone(),
        head_pressure: form.head_pressure.clone(),
        avg,
        s1,
        s2,
        s3,
        melt_index: String::new(),
        comments: format!("{} - {}", snapshot.as_str(), form.comments),
    }
}

/// A sample that parses as a number keeps its trimmed text; anything else
/// (empty, garbled OCR residue) is treated as missing, not as zero.
fn normalize_sample(raw: &str) -> Option<(String, f64)> {
    let trimmed = raw.trim();
    let value: f64 = trimmed.parse().ok()?;
    Some((trimmed.to_string(), value))
}

/// Mean of the three samples to two decimals, only when all three are
/// present and non-zero. A zero reading counts as missing here; see
/// DESIGN.md for the rationale.
fn average(samples: &[Option<(String, f64)>; 3]) -> String {
    let mut sum = 0.0;
    for sample in samples {
        match sample {
            Some((_, value)) if *value != 0.0 => sum += value,
            _ => return String::new(),
        }
    }
    format!("{:.2}", sum / 3.0)
}

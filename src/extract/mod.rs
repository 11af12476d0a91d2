//! Field extraction from recognized log sheet text.
//!
//! OCR output for a log sheet photo is noisy free text: lines arrive
//! reordered, labels get dropped, values split onto the next line. The
//! extractor maps that text onto [`SheetFields`] deterministically:
//!
//! - one ordered list of per-field rules, evaluated per line
//! - first match wins; once a field is set, later matches are ignored
//! - unmatched fields stay empty; extraction is total and never fails
//!
//! A few sheet quirks need more than a label rule: the production line
//! identifier (`L-3-N` → `3N`), the grams-per-minute sample triple that may
//! wrap onto the following line, and the chill roller type which is a pair
//! of categorical flags rather than a captured value. Whole-text fallbacks
//! for date and tube number run last, for scans where OCR ate the label but
//! kept the value.

use std::sync::LazyLock;

use regex::Regex;

use crate::fields::{Field, SheetFields};

/// What a rule does when its recognizer matches a line.
enum Action {
    /// Extract capture group 1 as the field value.
    Capture(Regex),
    /// Set the field to "1" (checkbox-style mark on the sheet).
    SetFlag,
}

/// One per-field matching rule: a recognizer deciding whether a line is
/// about the field, and an action producing the value.
struct LineRule {
    field: Field,
    recognize: Regex,
    action: Action,
}

fn capture(field: Field, recognize: &str, capture: &str) -> LineRule {
    LineRule {
        field,
        recognize: Regex::new(recognize).unwrap(),
        action: Action::Capture(Regex::new(capture).unwrap()),
    }
}

fn flag(field: Field, recognize: &str) -> LineRule {
    LineRule {
        field,
        recognize: Regex::new(recognize).unwrap(),
        action: Action::SetFlag,
    }
}

/// Ordered label rules. Multi-word labels come before single-word ones so a
/// line like "Line Speed 120" is consumed by the more specific rule first.
static LINE_RULES: LazyLock<Vec<LineRule>> = LazyLock::new(|| {
    vec![
        capture(Field::Date, r"(?i)\bdate\b", r"(\d{1,2}/\d{1,2}/\d{2,4})"),
        capture(Field::Tube, r"(?i)tube", r"(?i)tube\D*(\d+)"),
        capture(
            Field::PelletType,
            r"(?i)pellet\s*type",
            r"(?i)pellet\s*type[:#\s]*(.+)",
        ),
        capture(Field::Weld, r"(?i)\bweld\b", r"(?i)weld\D*(\d+(?:\.\d+)?)"),
        capture(
            Field::LineSpeed,
            r"(?i)line\s*speed",
            r"(?i)line\s*speed\D*(\d+(?:\.\d+)?)",
        ),
        capture(
            Field::ScrewSpeed,
            r"(?i)screw\s*speed",
            r"(?i)screw\s*speed\D*(\d+(?:\.\d+)?)",
        ),
        capture(
            Field::DieLip,
            r"(?i)die\s*lip",
            r"(?i)die\s*lip\D*(\d+(?:\.\d+)?)",
        ),
        capture(
            Field::HeadPressure,
            r"(?i)head\s*press",
            r"(?i)head\s*press\w*\D*(\d+(?:\.\d+)?)",
        ),
        capture(Field::Zone1, r"(?i)zone\s*1", r"(?i)zone\s*1\D*(\d+(?:\.\d+)?)"),
        capture(Field::Zone2, r"(?i)zone\s*2", r"(?i)zone\s*2\D*(\d+(?:\.\d+)?)"),
        capture(Field::Zone3, r"(?i)zone\s*3", r"(?i)zone\s*3\D*(\d+(?:\.\d+)?)"),
        capture(Field::Die1, r"(?i)die\s*1\b", r"(?i)die\s*1\D*(\d+(?:\.\d+)?)"),
        capture(Field::Die2, r"(?i)die\s*2\b", r"(?i)die\s*2\D*(\d+(?:\.\d+)?)"),
        capture(Field::Die3, r"(?i)die\s*3\b", r"(?i)die\s*3\D*(\d+(?:\.\d+)?)"),
        capture(Field::Die4, r"(?i)die\s*4\b", r"(?i)die\s*4\D*(\d+(?:\.\d+)?)"),
        capture(
            Field::PctLoad,
            r"(?i)load",
            r"(?i)load\D*(\d+(?:\.\d+)?)",
        ),
        capture(
            Field::Output,
            r"(?i)\boutput\b",
            r"(?i)output\D*(\d+(?:\.\d+)?)",
        ),
        capture(
            Field::Comments,
            r"(?i)\bcomments?\b",
            r"(?i)comments?[:\s]+(.+)",
        ),
        flag(Field::Tpo, r"(?i)\btpo\b"),
        flag(Field::Covestro, r"(?i)covestro"),
        flag(Field::Lubrizol, r"(?i)lubrizol"),
        flag(Field::Down3010, r"(?i)3010\s*down|down\s*3010"),
        flag(Field::ExtrOnly, r"(?i)extr\w*\s*only"),
        flag(Field::DoubleTape, r"(?i)double\s*tape"),
        flag(Field::Remote, r"(?i)\bremote\b"),
        flag(Field::Local, r"(?i)\blocal\b"),
    ]
});

/// Production line identifier: a letter prefix, one digit, one direction
/// letter. The separator on the printed label is inconsistent (hyphen,
/// en-dash, or nothing), so both are optional.
static LINE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bL\s*[-–]?\s*(\d)\s*[-–]?\s*([NSEW])\b").unwrap());

/// Header of the chill roller type row. The value is which of the two
/// type words also appears on the line, not a capture.
static CHILL_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)type\s*of\s*chill\s*roller").unwrap());
static CHILL_STANDARD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)standard").unwrap());
static CHILL_EMBOSSED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)emboss").unwrap());

/// Grams-per-minute sample header and its three-value payload.
static GRAMS_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)grams\s*per\s*min").unwrap());
static SAMPLE_TRIPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)").unwrap()
});

/// Whole-text fallbacks for scans where OCR dropped the label word.
static DATE_ANYWHERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2}/\d{1,2}/\d{2,4})\b").unwrap());
static TUBE_ANYWHERE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4,}").unwrap());

/// Extract sheet fields from recognized text.
///
/// Total over all inputs: every field of [`SheetFields`] is present in the
/// result, empty when nothing matched. Pure and deterministic.
pub fn extract(text: &str) -> SheetFields {
    let mut fields = SheetFields::default();

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    for (idx, line) in lines.iter().enumerate() {
        apply_line_rules(&mut fields, line);
        apply_line_identifier(&mut fields, line);
        apply_chill_flags(&mut fields, line);
        apply_sample_rule(&mut fields, line, lines.get(idx + 1).copied());
    }

    // Label-anchored rules missed; look for the bare value shapes anywhere.
    if fields.date.is_empty() {
        if let Some(caps) = DATE_ANYWHERE.captures(text) {
            fields.date = caps[1].to_string();
        }
    }
    if fields.tube.is_empty() {
        if let Some(m) = TUBE_ANYWHERE.find(text) {
            fields.tube = m.as_str().to_string();
        }
    }

    fields
}

fn apply_line_rules(fields: &mut SheetFields, line: &str) {
    for rule in LINE_RULES.iter() {
        if !fields.is_empty(rule.field) || !rule.recognize.is_match(line) {
            continue;
        }
        match &rule.action {
            Action::Capture(pattern) => {
                if let Some(value) = pattern
                    .captures(line)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str().trim())
                    .filter(|v| !v.is_empty())
                {
                    fields.set(rule.field, value.to_string());
                }
            }
            Action::SetFlag => fields.set(rule.field, "1".to_string()),
        }
    }
}

fn apply_line_identifier(fields: &mut SheetFields, line: &str) {
    if !fields.line.is_empty() {
        return;
    }
    if let Some(caps) = LINE_ID.captures(line) {
        fields.line = format!("{}{}", &caps[1], caps[2].to_uppercase());
    }
}

fn apply_chill_flags(fields: &mut SheetFields, line: &str) {
    if !CHILL_HEADER.is_match(line) {
        return;
    }
    if fields.std_chill.is_empty() && CHILL_STANDARD.is_match(line) {
        fields.std_chill = "1".to_string();
    }
    if fields.emboss_chill.is_empty() && CHILL_EMBOSSED.is_match(line) {
        fields.emboss_chill = "1".to_string();
    }
}

/// The three sample values may share the header line or, when OCR split the
/// row, sit on the immediately following line. One line of lookahead, no
/// more. The first matching header fills the Start samples, a second one
/// fills the End samples.
fn apply_sample_rule(fields: &mut SheetFields, line: &str, next: Option<&str>) {
    if !GRAMS_LABEL.is_match(line) {
        return;
    }

    let caps = SAMPLE_TRIPLE
        .captures(line)
        .or_else(|| next.and_then(|n| SAMPLE_TRIPLE.captures(n)));
    let Some(caps) = caps else {
        return;
    };

    let start_open = [Field::S1Start, Field::S2Start, Field::S3Start]
        .iter()
        .all(|f| fields.is_empty(*f));
    let targets = if start_open {
        [Field::S1Start, Field::S2Start, Field::S3Start]
    } else {
        [Field::S1End, Field::S2End, Field::S3End]
    };

    if targets.iter().all(|f| fields.is_empty(*f)) {
        for (slot, group) in targets.iter().zip(1usize..=3) {
            fields.set(*slot, caps[group].to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_coverage_on_empty_input() {
        let fields = extract("");
        for field in Field::ALL {
            assert_eq!(fields.get(field), "", "{} not empty", field.key());
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "Date 4/23/25\nTube # 10482\nGrams per Minute\n12.5 13.0 12.8\n";
        assert_eq!(extract(text), extract(text));
    }

    #[test]
    fn test_date_label_rule() {
        let fields = extract("Production Date: 4/23/25\n");
        assert_eq!(fields.date, "4/23/25");
    }

    #[test]
    fn test_first_match_wins() {
        let fields = extract("Date 4/23/25\nDate 5/1/25\n");
        assert_eq!(fields.date, "4/23/25");
    }

    #[test]
    fn test_line_identifier_hyphen() {
        let fields = extract("Production Line   L-3-N\n");
        assert_eq!(fields.line, "3N");
    }

    #[test]
    fn test_line_identifier_no_dash() {
        let fields = extract("Production Line L3N\n");
        assert_eq!(fields.line, "3N");
    }

    #[test]
    fn test_line_identifier_en_dash() {
        let fields = extract("Production Line L-3–N\n");
        assert_eq!(fields.line, "3N");
    }

    #[test]
    fn test_sample_lookahead_next_line() {
        let fields = extract("Grams per Minute\n12.5 13.0 12.8\n");
        assert_eq!(fields.s1_start, "12.5");
        assert_eq!(fields.s2_start, "13.0");
        assert_eq!(fields.s3_start, "12.8");
        assert_eq!(fields.s1_end, "");
    }

    #[test]
    fn test_sample_same_line() {
        let fields = extract("Grams per Minute  11.1 11.2 11.3\n");
        assert_eq!(fields.s1_start, "11.1");
        assert_eq!(fields.s3_start, "11.3");
    }

    #[test]
    fn test_second_sample_header_fills_end() {
        let text = "Grams per Minute 10.0 10.1 10.2\nGrams per Minute 9.7 9.8 9.9\n";
        let fields = extract(text);
        assert_eq!(fields.s1_start, "10.0");
        assert_eq!(fields.s1_end, "9.7");
        assert_eq!(fields.s3_end, "9.9");
    }

    #[test]
    fn test_sample_lookahead_is_one_line_only() {
        let fields = extract("Grams per Minute\nsmudge\n12.5 13.0 12.8\n");
        assert_eq!(fields.s1_start, "");
    }

    #[test]
    fn test_date_fallback_anywhere() {
        let fields = extract("tube 10482\ninspected 4/23/25 ok\n");
        assert_eq!(fields.date, "4/23/25");
    }

    #[test]
    fn test_tube_fallback_anywhere() {
        let fields = extract("serial 10482 stamped\n");
        assert_eq!(fields.tube, "10482");
    }

    #[test]
    fn test_tube_fallback_needs_four_digits() {
        let fields = extract("lot 123 noted\n");
        assert_eq!(fields.tube, "");
    }

    #[test]
    fn test_chill_standard_only() {
        let fields = extract("Type of Chill Roller: Standard\n");
        assert_eq!(fields.std_chill, "1");
        assert_eq!(fields.emboss_chill, "");
    }

    #[test]
    fn test_chill_both() {
        let fields = extract("Type of Chill Roller: Standard / Embossed\n");
        assert_eq!(fields.std_chill, "1");
        assert_eq!(fields.emboss_chill, "1");
    }

    #[test]
    fn test_chill_header_without_type_word() {
        let fields = extract("Type of Chill Roller:\n");
        assert_eq!(fields.std_chill, "");
        assert_eq!(fields.emboss_chill, "");
    }

    #[test]
    fn test_process_flags() {
        let text = "Covestro\n3010 Down\nDouble Tape\nWeld Control: Remote\n";
        let fields = extract(text);
        assert_eq!(fields.covestro, "1");
        assert_eq!(fields.down3010, "1");
        assert_eq!(fields.double_tape, "1");
        assert_eq!(fields.remote, "1");
        assert_eq!(fields.local, "");
        assert_eq!(fields.tpo, "");
    }

    #[test]
    fn test_labeled_numerics() {
        let text = "Line Speed 120.5\nScrew Speed: 44\nZone 1: 350 Zone 2: 360 Zone 3: 370\nDie 1 400 Die 2 405 Die 3 410 Die 4 415\n% Load 62\nHead Pressure 2150\nDie Lip: 45\nOutput 880\n";
        let fields = extract(text);
        assert_eq!(fields.line_speed, "120.5");
        assert_eq!(fields.screw_speed, "44");
        assert_eq!(fields.zone1, "350");
        assert_eq!(fields.zone2, "360");
        assert_eq!(fields.zone3, "370");
        assert_eq!(fields.die1, "400");
        assert_eq!(fields.die4, "415");
        assert_eq!(fields.pct_load, "62");
        assert_eq!(fields.head_pressure, "2150");
        assert_eq!(fields.die_lip, "45");
        assert_eq!(fields.output, "880");
    }

    #[test]
    fn test_comments_capture_rest_of_line() {
        let fields = extract("Comments: roll change at 2pm\n");
        assert_eq!(fields.comments, "roll change at 2pm");
    }

    #[test]
    fn test_pellet_type_text_value() {
        let fields = extract("Pellet Type: TPO-22\n");
        assert_eq!(fields.pellet_type, "TPO-22");
        // Independent rules: the same line legitimately marks the TPO flag.
        assert_eq!(fields.tpo, "1");
    }

    #[test]
    fn test_shared_line_with_two_labels() {
        // OCR often merges neighboring cells onto one line; each rule must
        // anchor its capture to its own label.
        let fields = extract("Date 4/23/25      Tube # 10482\n");
        assert_eq!(fields.date, "4/23/25");
        assert_eq!(fields.tube, "10482");
    }

    #[test]
    fn test_noise_lines_ignored() {
        let text = "\n   \n~~~###\nDate 4/23/25\n|||\n";
        let fields = extract(text);
        assert_eq!(fields.date, "4/23/25");
    }
}

//! Legacy-name translation: 14-field names to attribute patterns and back
//!
//! Legacy consumers only ever see hyphen-delimited names with exactly 14
//! ordered fields (foundry, family, weight, slant, width style, additional
//! style, pixel size, point size, horizontal/vertical resolution, spacing,
//! average width, charset registry, charset encoding). The system matcher
//! only ever sees attribute patterns. This crate is the sole translation
//! boundary between the two, and other tools compare the strings it emits
//! literally, so the normalization and bucketing rules here are wire
//! format, not style.

// this_file: crates/fontbridge-xlfd/src/lib.rs

use fontbridge_core::pattern::{slant, spacing, weight};
use fontbridge_core::{
    Attr, FontPattern, FontSpec, ParseError, Rasterizer, Result, SpecSize,
};

/// Required field count of a well-formed legacy name
pub const FIELD_COUNT: usize = 14;

/// Which 0-based field positions carry numeric semantics
///
/// A wildcard surviving normalization in one of these slots is rewritten to
/// a literal `0` so downstream numeric parsing does not choke on `*`.
const NUMERIC_FIELDS: [bool; FIELD_COUNT] = [
    false, false, false, false, false, false, false, true, false, false, false, true, false, false,
];

fn count_dashes(name: &str) -> usize {
    name.bytes().filter(|b| *b == b'-').count()
}

/// Pad NAME out to exactly 14 hyphen-delimited fields
///
/// Compatibility-only heuristic, preserved exactly: short names (fewer than
/// four dashes once a leading dash is ensured) get `-*` fields appended;
/// longer ones get `*-` fields spliced in immediately after the third dash
/// of the original input, on the assumption that the missing fields sit in
/// the middle of the name once at least four real fields exist.
fn pad_fields(name: &str) -> String {
    let mut ndashes = count_dashes(name);
    let mut add = FIELD_COUNT as i32 - ndashes as i32;
    let mut out = String::with_capacity(name.len() + add.max(0) as usize * 2 + 1);

    if !name.starts_with('-') {
        out.push('-');
        add -= 1;
        ndashes += 1;
    }

    if ndashes < 4 {
        out.push_str(name);
        for _ in 0..add.max(0) {
            out.push_str("-*");
        }
    } else {
        // Boundary right after the third dash of the original input.
        let mut cut = name.len();
        let mut seen = 0;
        for (i, b) in name.bytes().enumerate() {
            if b == b'-' {
                seen += 1;
                if seen == 3 {
                    cut = i + 1;
                    break;
                }
            }
        }
        out.push_str(&name[..cut]);
        for _ in 0..add.max(0) {
            out.push_str("*-");
        }
        out.push_str(&name[cut..]);
    }
    out
}

/// Normalize NAME to the full 14-field form
///
/// Pads the field list, then rewrites wildcards in numeric slots to `0`.
/// Normalizing an already-complete name is a no-op. A name with more than
/// 14 fields passes through apart from the numeric rewrite; the legacy
/// parser rejects it and the free-form grammar takes over.
pub fn normalize(name: &str) -> String {
    let padded = pad_fields(name);
    let mut parts: Vec<String> = padded.split('-').map(str::to_owned).collect();
    for (n, numeric) in NUMERIC_FIELDS.iter().enumerate() {
        if let Some(field) = parts.get_mut(n + 1) {
            if *numeric && field == "*" {
                *field = "0".to_owned();
            }
        }
    }
    parts.join("-")
}

fn add_if_literal(pattern: &mut FontPattern, attr: Attr, field: &str) {
    if !field.is_empty() && field != "*" {
        pattern.add_str(attr, field);
    }
}

fn numeric_field(fields: &[&str], position: usize) -> std::result::Result<i32, ParseError> {
    fields[position].parse().map_err(|_| ParseError::BadField {
        position,
        value: fields[position].to_owned(),
    })
}

/// Legacy field-by-field parse; Ok(None) signals a structural failure and
/// the caller falls back to the free-form grammar, while a non-numeric
/// value in a numeric slot is a hard parse error.
fn parse_legacy(name: &str) -> std::result::Result<Option<FontPattern>, ParseError> {
    let full = normalize(name);
    let parts: Vec<&str> = full.split('-').collect();
    if parts.len() != FIELD_COUNT + 1 || !parts[0].is_empty() {
        return Ok(None);
    }
    let fields = &parts[1..];

    let mut pattern = FontPattern::new();
    add_if_literal(&mut pattern, Attr::Foundry, fields[0]);
    add_if_literal(&mut pattern, Attr::Family, fields[1]);
    // Weight and slant stay free strings here; only the match step buckets
    // them through the reference tables.
    add_if_literal(&mut pattern, Attr::Weight, fields[2]);
    add_if_literal(&mut pattern, Attr::Slant, fields[3]);
    add_if_literal(&mut pattern, Attr::Width, fields[4]);

    if fields[6] != "*" && !fields[6].is_empty() {
        let px = numeric_field(fields, 6)?;
        if px > 0 {
            pattern.add_double(Attr::PixelSize, f64::from(px));
        }
    }
    // Point size is in decipoints.
    if fields[7] != "*" && !fields[7].is_empty() {
        let deci = numeric_field(fields, 7)?;
        if deci > 0 {
            pattern.add_double(Attr::Size, f64::from(deci) / 10.0);
        }
    }
    match fields[10].to_ascii_lowercase().as_str() {
        "p" => pattern.add_int(Attr::Spacing, spacing::PROPORTIONAL),
        "d" => pattern.add_int(Attr::Spacing, spacing::DUAL),
        "m" => pattern.add_int(Attr::Spacing, spacing::MONO),
        "c" => pattern.add_int(Attr::Spacing, spacing::CHARCELL),
        _ => {}
    }
    Ok(Some(pattern))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Free-form grammar: `families[-sizes][:key=value]...`
fn parse_freeform(name: &str) -> std::result::Result<FontPattern, ParseError> {
    if name.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut pattern = FontPattern::new();
    let mut segments = name.split(':');
    let head = segments.next().unwrap_or_default();

    if !head.is_empty() {
        // A trailing `-sizes` suffix is only a size list when it parses as
        // one; otherwise the dash belongs to the family name.
        let mut family = head;
        if let Some(pos) = head.rfind('-') {
            let sizes: Vec<&str> = head[pos + 1..].split(',').collect();
            if !sizes.is_empty() && sizes.iter().all(|s| s.parse::<f64>().is_ok()) {
                family = &head[..pos];
                for size in sizes {
                    if let Ok(pt) = size.parse::<f64>() {
                        pattern.add_double(Attr::Size, pt);
                    }
                }
            }
        }
        for fam in family.split(',') {
            if !fam.is_empty() {
                pattern.add_str(Attr::Family, fam);
            }
        }
    }

    for segment in segments {
        if segment.is_empty() {
            continue;
        }
        let Some((key, value)) = segment.split_once('=') else {
            log::trace!("skipping bare pattern segment {segment:?}");
            continue;
        };
        match key.to_ascii_lowercase().as_str() {
            "foundry" => pattern.add_str(Attr::Foundry, value),
            "family" => pattern.add_str(Attr::Family, value),
            "file" => pattern.add_str(Attr::File, value),
            "weight" | "slant" | "width" | "spacing" => {
                let attr = match key.to_ascii_lowercase().as_str() {
                    "weight" => Attr::Weight,
                    "slant" => Attr::Slant,
                    "width" => Attr::Width,
                    _ => Attr::Spacing,
                };
                // Symbolic values ride through as strings for the matcher.
                match value.parse::<i32>() {
                    Ok(v) => pattern.add_int(attr, v),
                    Err(_) => pattern.add_str(attr, value),
                }
            }
            "pixelsize" => {
                if let Ok(v) = value.parse::<f64>() {
                    pattern.add_double(Attr::PixelSize, v);
                }
            }
            "size" => {
                if let Ok(v) = value.parse::<f64>() {
                    pattern.add_double(Attr::Size, v);
                }
            }
            "antialias" => {
                if let Some(v) = parse_bool(value) {
                    pattern.add_bool(Attr::Antialias, v);
                }
            }
            other => log::trace!("skipping unknown pattern key {other:?}"),
        }
    }
    Ok(pattern)
}

/// Parse NAME, legacy-shaped or free-form, into an attribute pattern
///
/// Names beginning with `-` take the legacy path first; a structural
/// failure there (too many fields) falls back to the free-form grammar,
/// so this never fails for a well-formed pattern of either kind. A name
/// that is legacy-shaped but carries garbage in a numeric slot is
/// reported as [`ParseError::BadField`].
pub fn parse(name: &str) -> std::result::Result<FontPattern, ParseError> {
    if name.starts_with('-') {
        if let Some(pattern) = parse_legacy(name)? {
            return Ok(pattern);
        }
        log::debug!("legacy parse failed for {name:?}, trying free-form");
    }
    parse_freeform(name)
}

/// Bucket a matcher weight value into its legacy field name
///
/// Nearest-midpoint thresholds with strict `<` against the reference
/// constants; a value exactly at a midpoint falls through the comparison.
pub fn weight_bucket(value: i32) -> &'static str {
    if value < (weight::LIGHT + weight::MEDIUM) / 2 {
        return "light";
    }
    if value < (weight::MEDIUM + weight::DEMIBOLD) / 2 {
        return "regular";
    }
    if value < (weight::DEMIBOLD + weight::BOLD) / 2 {
        return "demibold";
    }
    if value < (weight::BOLD + weight::BLACK) / 2 {
        return "bold";
    }
    "black"
}

/// Bucket a matcher slant value into its legacy field name
pub fn slant_bucket(value: i32) -> &'static str {
    if value < (slant::ROMAN + slant::ITALIC) / 2 {
        return "r";
    }
    if value < (slant::ITALIC + slant::OBLIQUE) / 2 {
        return "i";
    }
    "o"
}

/// Inverse of [`weight_bucket`]: bucket name to reference weight
pub fn weight_value(name: &str) -> Option<i32> {
    match name.to_ascii_lowercase().as_str() {
        "light" => Some(weight::LIGHT),
        "regular" | "medium" => Some(weight::MEDIUM),
        "demibold" => Some(weight::DEMIBOLD),
        "bold" => Some(weight::BOLD),
        "black" => Some(weight::BLACK),
        _ => None,
    }
}

/// Inverse of [`slant_bucket`]: bucket name to reference slant
pub fn slant_value(name: &str) -> Option<i32> {
    match name.to_ascii_lowercase().as_str() {
        "r" | "roman" => Some(slant::ROMAN),
        "i" | "italic" => Some(slant::ITALIC),
        "o" | "oblique" => Some(slant::OBLIQUE),
        _ => None,
    }
}

/// Re-encode a matched pattern as a legacy 14-field name
///
/// Foundry and family ride through verbatim (`*` when absent), weight and
/// slant are bucketed, pixel size is rounded to nearest and clamped to
/// [0, 9999], and the remaining fields are fixed.
pub fn unparse(pattern: &FontPattern) -> String {
    let foundry = pattern.get_str(Attr::Foundry, 0).unwrap_or("*");
    let family = pattern.get_str(Attr::Family, 0).unwrap_or("*");
    let weight_name = pattern
        .get_int(Attr::Weight, 0)
        .map_or("*", weight_bucket);
    let slant_name = pattern.get_int(Attr::Slant, 0).map_or("*", slant_bucket);
    let pixel = pattern.get_double(Attr::PixelSize, 0).unwrap_or(0.0);
    let pixel = pixel.round().clamp(0.0, 9999.0) as i32;

    format!("-{foundry}-{family}-{weight_name}-{slant_name}-*-*-{pixel}-*-*-*-*-0-iso10646-1")
}

/// Resolve NAME against the installed fonts and hand back a legacy name
pub fn resolve_name(rasterizer: &dyn Rasterizer, name: &str) -> Result<String> {
    let pattern = parse(name)?;
    let matched = rasterizer.match_pattern(&pattern)?;
    Ok(unparse(&matched))
}

/// Fill the host's font-spec slots from a parsed name
///
/// Foundry and family are lowercased for the host's interned symbols; the
/// slant value is offset by +100 into the host's convention; size comes
/// from pixel size (whole pixels) or, failing that, point size.
pub fn parse_into_spec(name: &str, spec: &mut FontSpec) -> std::result::Result<(), ParseError> {
    let pattern = parse(name)?;

    if let Some(foundry) = pattern.get_str(Attr::Foundry, 0) {
        spec.foundry = Some(foundry.to_lowercase());
    }
    if let Some(family) = pattern.get_str(Attr::Family, 0) {
        spec.family = Some(family.to_lowercase());
    }
    if let Some(weight) = pattern.get_int(Attr::Weight, 0) {
        spec.weight = Some(weight);
    }
    if let Some(slant) = pattern.get_int(Attr::Slant, 0) {
        spec.slant = Some(slant + 100);
    }
    if let Some(width) = pattern.get_int(Attr::Width, 0) {
        spec.width = Some(width);
    }
    if let Some(px) = pattern.get_double(Attr::PixelSize, 0) {
        spec.size = Some(SpecSize::Pixels(px as i32));
    } else if let Some(pt) = pattern.get_double(Attr::Size, 0) {
        spec.size = Some(SpecSize::Points(pt));
    }
    Ok(())
}

//! Time zones and the zone compaction table
//!
//! Region names are long and repetitive, so storage writes a compact `u16`
//! id instead. The mapping comes from a bundled manifest:
//!
//! ```text
//! # version: 2024b
//! Europe/Kyiv
//! Europe/Kiev -> Europe/Kyiv
//! ```
//!
//! Canonical names get ids `1..=n` in line order; `Old -> New` lines are
//! aliases and resolve, possibly through other aliases, to a canonical name.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{FixedOffset, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;

use crate::error::{ValueError, ValueResult};

const BUNDLED_MANIFEST: &str = include_str!("../../resources/zone_ids.txt");

const VERSION_MARKER: &str = "version:";

const ALIAS_SEPARATOR: &str = "->";

/// Largest offset magnitude accepted for fixed offsets
pub(crate) const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

/// Process-wide zone table built from the bundled manifest
///
/// Zones known to the linked tz database but missing from the manifest are
/// appended after it. Built on first access; a malformed bundled manifest is
/// a build defect and panics.
pub static TIME_ZONES: Lazy<TimeZoneTable> = Lazy::new(|| {
    let mut table = TimeZoneTable::parse(BUNDLED_MANIFEST)
        .unwrap_or_else(|e| panic!("bundled time zone manifest is malformed: {e}"));
    let appended = table.register_missing(chrono_tz::TZ_VARIANTS.iter().map(|tz| tz.name()));
    if appended > 0 {
        tracing::warn!(appended, "tz database zones missing from the bundled manifest");
    }
    tracing::debug!(
        zones = table.len(),
        aliases = table.alias_count(),
        version = table.version().unwrap_or("unknown"),
        "time zone table built"
    );
    table
});

/// Bidirectional mapping between zone names and compact ids
#[derive(Debug, Clone)]
pub struct TimeZoneTable {
    version: Option<String>,
    names: Vec<String>,
    ids: HashMap<String, u16>,
    aliases: HashMap<String, u16>,
}

impl TimeZoneTable {
    /// Parse a manifest
    pub fn parse(manifest: &str) -> ValueResult<Self> {
        let mut version = None;
        let mut names: Vec<String> = Vec::new();
        let mut ids = HashMap::new();
        let mut links: Vec<(String, String)> = Vec::new();

        for (number, raw) in manifest.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                if let Some(v) = comment.trim().strip_prefix(VERSION_MARKER) {
                    version = Some(v.trim().to_string());
                }
                continue;
            }
            if let Some((old, new)) = line.split_once(ALIAS_SEPARATOR) {
                let (old, new) = (old.trim(), new.trim());
                if !is_zone_name(old) || !is_zone_name(new) {
                    return Err(malformed(number, raw));
                }
                links.push((old.to_string(), new.to_string()));
                continue;
            }
            if !is_zone_name(line) {
                return Err(malformed(number, raw));
            }
            let id = u16::try_from(names.len() + 1)
                .map_err(|_| ValueError::invalid_argument("Zone manifest holds more than 65535 zones"))?;
            if ids.insert(line.to_string(), id).is_some() {
                return Err(ValueError::invalid_argument(format!(
                    "Zone '{line}' is listed twice in the manifest"
                )));
            }
            names.push(line.to_string());
        }

        let aliases = resolve_links(&ids, &links)?;
        Ok(Self {
            version,
            names,
            ids,
            aliases,
        })
    }

    /// Append every name not yet known as a canonical zone, in iteration order
    ///
    /// Returns the number of zones added.
    pub fn register_missing<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) -> usize {
        let mut added = 0;
        for name in names {
            if self.ids.contains_key(name) || self.aliases.contains_key(name) {
                continue;
            }
            let Ok(id) = u16::try_from(self.names.len() + 1) else {
                break;
            };
            self.ids.insert(name.to_string(), id);
            self.names.push(name.to_string());
            added += 1;
        }
        added
    }

    /// Compact id of a canonical name or alias
    pub fn id_of(&self, name: &str) -> ValueResult<u16> {
        self.ids
            .get(name)
            .or_else(|| self.aliases.get(name))
            .copied()
            .ok_or_else(|| ValueError::invalid_argument(format!("Unknown time zone: '{name}'")))
    }

    /// Canonical name of a compact id
    pub fn name_of(&self, id: u16) -> ValueResult<&str> {
        usize::from(id)
            .checked_sub(1)
            .and_then(|index| self.names.get(index))
            .map(String::as_str)
            .ok_or_else(|| ValueError::invalid_argument(format!("Unknown time zone id: {id}")))
    }

    /// Canonical name for a canonical name or alias
    pub fn canonical_name(&self, name: &str) -> ValueResult<&str> {
        self.id_of(name).and_then(|id| self.name_of(id))
    }

    /// The tz database release named by the manifest's version marker
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Number of canonical zones
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the table has no zones
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of aliases
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// Canonical names in id order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

fn is_zone_name(s: &str) -> bool {
    !s.is_empty() && !s.contains(char::is_whitespace) && !s.contains(ALIAS_SEPARATOR)
}

fn malformed(number: usize, line: &str) -> ValueError {
    ValueError::invalid_argument(format!(
        "Malformed zone manifest line {}: '{line}'",
        number + 1
    ))
}

fn resolve_links(
    ids: &HashMap<String, u16>,
    links: &[(String, String)],
) -> ValueResult<HashMap<String, u16>> {
    let targets: HashMap<&str, &str> = links
        .iter()
        .map(|(old, new)| (old.as_str(), new.as_str()))
        .collect();

    let mut aliases = HashMap::with_capacity(links.len());
    for (old, _) in links {
        if ids.contains_key(old) {
            return Err(ValueError::invalid_argument(format!(
                "Zone '{old}' is both canonical and an alias"
            )));
        }
        let mut current = old.as_str();
        let mut hops = 0;
        let id = loop {
            if let Some(&id) = ids.get(current) {
                break id;
            }
            let Some(&next) = targets.get(current) else {
                return Err(ValueError::invalid_argument(format!(
                    "Alias '{old}' points at unknown zone '{current}'"
                )));
            };
            hops += 1;
            if hops > links.len() {
                return Err(ValueError::invalid_argument(format!(
                    "Alias '{old}' is part of a cycle"
                )));
            }
            current = next;
        };
        aliases.insert(old.clone(), id);
    }
    Ok(aliases)
}

// ==================== ZoneId ====================

/// A region zone registered in [`TIME_ZONES`]
#[derive(Debug, Clone, Copy)]
pub struct RegionZone {
    id: u16,
    tz: Tz,
}

impl RegionZone {
    /// Compact id from the zone table
    pub fn id(&self) -> u16 {
        self.id
    }

    /// The tz database zone
    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        self.tz.name()
    }
}

/// Time zone of a zoned value: a fixed offset or a named region
#[derive(Debug, Clone, Copy)]
pub enum ZoneId {
    Offset(FixedOffset),
    Region(RegionZone),
}

impl ZoneId {
    /// UTC as a fixed offset
    pub fn utc() -> Self {
        Self::Offset(Utc.fix())
    }

    /// Fixed offset from seconds east of UTC
    pub fn offset_seconds(seconds: i32) -> ValueResult<Self> {
        fixed_offset(seconds).map(Self::Offset)
    }

    /// Named region; aliases resolve to their canonical zone
    pub fn region(name: &str) -> ValueResult<Self> {
        let id = TIME_ZONES.id_of(name)?;
        Self::region_by_id(id)
    }

    /// Named region from its compact id
    pub fn region_by_id(id: u16) -> ValueResult<Self> {
        let canonical = TIME_ZONES.name_of(id)?;
        let tz = Tz::from_str(canonical).map_err(|_| {
            ValueError::invalid_argument(format!("Time zone '{canonical}' is not in the tz database"))
        })?;
        Ok(Self::Region(RegionZone { id, tz }))
    }

    /// Parse `Z`, `±HH`, `±HHMM`, `±HH:MM` or a region name
    pub fn parse(text: &str) -> ValueResult<Self> {
        match text.as_bytes().first() {
            Some(b'+' | b'-') => parse_offset(text).map(Self::Offset),
            _ if text.eq_ignore_ascii_case("z") => Ok(Self::utc()),
            _ => Self::region(text),
        }
    }

    /// Zone id or offset text, as used in printed values
    pub fn name(&self) -> String {
        match self {
            Self::Offset(offset) => format_offset(*offset),
            Self::Region(region) => region.name().to_string(),
        }
    }

    /// Compact region id, if this is a region
    pub fn region_id(&self) -> Option<u16> {
        match self {
            Self::Offset(_) => None,
            Self::Region(region) => Some(region.id),
        }
    }

    /// Offset in effect at a UTC instant
    pub fn offset_at(&self, utc: &NaiveDateTime) -> FixedOffset {
        match self {
            Self::Offset(offset) => *offset,
            Self::Region(region) => region.tz.offset_from_utc_datetime(utc).fix(),
        }
    }

    /// Local date-time at a UTC instant
    ///
    /// Fails when the wall clock falls outside the representable range.
    pub fn local_at(&self, utc: &NaiveDateTime) -> ValueResult<NaiveDateTime> {
        let offset = self.offset_at(utc);
        utc.checked_add_signed(offset_delta(offset))
            .ok_or_else(|| beyond_range(utc, offset))
    }

    /// UTC instant of a local date-time in this zone
    ///
    /// A local time in a transition gap is moved forward by the length of the
    /// gap; an ambiguous local time takes the earlier offset.
    pub fn resolve_local(&self, local: &NaiveDateTime) -> ValueResult<NaiveDateTime> {
        let offset = match self {
            Self::Offset(offset) => *offset,
            Self::Region(region) => match region.tz.from_local_datetime(local) {
                LocalResult::Single(dt) => return Ok(dt.naive_utc()),
                LocalResult::Ambiguous(earliest, _) => return Ok(earliest.naive_utc()),
                LocalResult::None => {
                    // gap: interpret with the offset in effect before it
                    let before = local
                        .checked_sub_signed(TimeDelta::days(1))
                        .ok_or_else(|| beyond_range(local, Utc.fix()))?;
                    region.tz.offset_from_utc_datetime(&before).fix()
                }
            },
        };
        local
            .checked_sub_signed(offset_delta(offset))
            .ok_or_else(|| beyond_range(local, offset))
    }

    /// UTC instant of a local date-time that must carry the given offset
    pub fn resolve_local_with_offset(
        &self,
        local: &NaiveDateTime,
        offset: FixedOffset,
    ) -> ValueResult<NaiveDateTime> {
        let utc = local
            .checked_sub_signed(offset_delta(offset))
            .ok_or_else(|| beyond_range(local, offset))?;
        if self.offset_at(&utc) == offset {
            Ok(utc)
        } else {
            Err(ValueError::invalid_argument(format!(
                "Timezone {} and offset {} do not match at {local}",
                self.name(),
                format_offset(offset)
            )))
        }
    }
}

impl PartialEq for ZoneId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Offset(a), Self::Offset(b)) => a == b,
            (Self::Region(a), Self::Region(b)) => a.id == b.id,
            _ => false,
        }
    }
}

impl Eq for ZoneId {}

impl std::hash::Hash for ZoneId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::Offset(offset) => offset.local_minus_utc().hash(state),
            Self::Region(region) => region.id.hash(state),
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for ZoneId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<FixedOffset> for ZoneId {
    fn from(offset: FixedOffset) -> Self {
        Self::Offset(offset)
    }
}

// ==================== Offsets ====================

fn offset_delta(offset: FixedOffset) -> TimeDelta {
    TimeDelta::seconds(i64::from(offset.local_minus_utc()))
}

fn beyond_range(date_time: &NaiveDateTime, offset: FixedOffset) -> ValueError {
    ValueError::invalid_argument(format!(
        "Date-time {date_time} shifted by {} is out of range",
        format_offset(offset)
    ))
}

/// Fixed offset from seconds east of UTC, limited to ±18 hours
pub fn fixed_offset(seconds: i32) -> ValueResult<FixedOffset> {
    if seconds.abs() > MAX_OFFSET_SECONDS {
        return Err(ValueError::invalid_argument(format!(
            "Zone offset {seconds}s is out of range"
        )));
    }
    FixedOffset::east_opt(seconds)
        .ok_or_else(|| ValueError::invalid_argument(format!("Zone offset {seconds}s is out of range")))
}

/// Parse `Z`, `±HH`, `±HHMM` or `±HH:MM`
pub fn parse_offset(text: &str) -> ValueResult<FixedOffset> {
    let invalid = || ValueError::parse_error("zone offset", text);
    if text.eq_ignore_ascii_case("z") {
        return fixed_offset(0);
    }
    let (sign, rest) = match text.as_bytes().first() {
        Some(b'+') => (1, &text[1..]),
        Some(b'-') => (-1, &text[1..]),
        _ => return Err(invalid()),
    };
    let digits: String = rest.chars().filter(|&c| c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let (hours, minutes) = match digits.len() {
        2 => (&digits[..2], "0"),
        4 => (&digits[..2], &digits[2..]),
        _ => return Err(invalid()),
    };
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }
    fixed_offset(sign * (hours * 3600 + minutes * 60)).map_err(|_| invalid())
}

/// `Z` for UTC, otherwise `±HH:MM` with `:SS` when needed
pub fn format_offset(offset: FixedOffset) -> String {
    let total = offset.local_minus_utc();
    if total == 0 {
        return "Z".to_string();
    }
    let sign = if total < 0 { '-' } else { '+' };
    let abs = total.unsigned_abs();
    let (hours, minutes, seconds) = (abs / 3600, abs / 60 % 60, abs % 60);
    if seconds == 0 {
        format!("{sign}{hours:02}:{minutes:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    const MANIFEST: &str = "\
# version: test-1
# a comment
Europe/Kyiv
Europe/London

GB -> Europe/London
Europe/Belfast -> GB
Europe/Kiev -> Europe/Kyiv
";

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, 0))
            .unwrap()
    }

    #[test]
    fn test_parse_manifest() {
        let table = TimeZoneTable::parse(MANIFEST).unwrap();
        assert_eq!(table.version(), Some("test-1"));
        assert_eq!(table.len(), 2);
        assert_eq!(table.alias_count(), 3);
        assert_eq!(table.id_of("Europe/Kyiv").unwrap(), 1);
        assert_eq!(table.id_of("Europe/Kiev").unwrap(), 1);
        assert_eq!(table.id_of("Europe/Belfast").unwrap(), 2);
        assert_eq!(table.canonical_name("GB").unwrap(), "Europe/London");
        assert_eq!(table.name_of(2).unwrap(), "Europe/London");
    }

    #[test]
    fn test_unknown_lookups_fail() {
        let table = TimeZoneTable::parse(MANIFEST).unwrap();
        assert!(table.id_of("Mars/Olympus").unwrap_err().is_invalid_argument());
        assert!(table.name_of(0).is_err());
        assert!(table.name_of(3).is_err());
    }

    #[test]
    fn test_malformed_manifests() {
        assert!(TimeZoneTable::parse("A/B\nA/B").is_err());
        assert!(TimeZoneTable::parse("A/B\nC -> D").is_err());
        assert!(TimeZoneTable::parse("A/B\nC -> D\nD -> C").is_err());
        assert!(TimeZoneTable::parse("A/B\nA/B -> A/B").is_err());
        assert!(TimeZoneTable::parse("not a zone").is_err());
    }

    #[test]
    fn test_bundled_table_round_trips() {
        for name in TIME_ZONES.names() {
            let id = TIME_ZONES.id_of(name).unwrap();
            assert_eq!(TIME_ZONES.id_of(TIME_ZONES.name_of(id).unwrap()).unwrap(), id);
            ZoneId::region_by_id(id).unwrap();
        }
        assert!(TIME_ZONES.version().is_some());
    }

    #[test]
    fn test_every_tz_database_zone_resolves() {
        for tz in chrono_tz::TZ_VARIANTS {
            let zone = ZoneId::region(tz.name()).unwrap();
            let id = zone.region_id().unwrap();
            assert_eq!(ZoneId::region_by_id(id).unwrap(), zone);
        }
        for name in ["Europe/Oslo", "Europe/Copenhagen", "America/Detroit", "Asia/Kuwait"] {
            assert_eq!(ZoneId::region(name).unwrap().name(), name);
        }
    }

    #[test]
    fn test_register_missing_appends_after_manifest() {
        let mut table = TimeZoneTable::parse(MANIFEST).unwrap();
        let added = table.register_missing(["Europe/London", "Europe/Kiev", "Europe/Oslo"]);
        assert_eq!(added, 1);
        assert_eq!(table.id_of("Europe/Oslo").unwrap(), 3);
        assert_eq!(table.id_of("Europe/Kiev").unwrap(), 1);
    }

    #[test]
    fn test_offsets_near_range_limits_fail() {
        let plus_18 = ZoneId::offset_seconds(18 * 3600).unwrap();
        let minus_18 = ZoneId::offset_seconds(-18 * 3600).unwrap();
        assert!(plus_18.local_at(&NaiveDateTime::MAX).unwrap_err().is_invalid_argument());
        assert!(minus_18.local_at(&NaiveDateTime::MIN).is_err());
        assert!(minus_18.resolve_local(&NaiveDateTime::MAX).is_err());
        assert!(plus_18.resolve_local(&NaiveDateTime::MIN).is_err());
        let london = ZoneId::region("Europe/London").unwrap();
        assert!(london.resolve_local_with_offset(&NaiveDateTime::MIN, fixed_offset(3600).unwrap()).is_err());
    }

    #[test]
    fn test_zone_parse() {
        assert_eq!(ZoneId::parse("Z").unwrap(), ZoneId::utc());
        assert_eq!(
            ZoneId::parse("+01:30").unwrap(),
            ZoneId::offset_seconds(5400).unwrap()
        );
        assert_eq!(ZoneId::parse("-0200").unwrap().name(), "-02:00");
        assert_eq!(ZoneId::parse("Asia/Calcutta").unwrap().name(), "Asia/Kolkata");
        assert!(ZoneId::parse("+19:00").is_err());
        assert!(ZoneId::parse("Nowhere/City").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_resolve_local_gap_moves_forward() {
        let london = ZoneId::region("Europe/London").unwrap();
        // 2021-03-28 01:30 does not exist in London
        let utc = london.resolve_local(&local(2021, 3, 28, 1, 30)).unwrap();
        assert_eq!(utc, local(2021, 3, 28, 1, 30));
        assert_eq!(london.local_at(&utc).unwrap(), local(2021, 3, 28, 2, 30));
    }

    #[test]
    fn test_resolve_local_overlap_takes_earlier() {
        let london = ZoneId::region("Europe/London").unwrap();
        let utc = london.resolve_local(&local(2021, 10, 31, 1, 30)).unwrap();
        assert_eq!(utc, local(2021, 10, 31, 0, 30));
        let later = london
            .resolve_local_with_offset(&local(2021, 10, 31, 1, 30), fixed_offset(0).unwrap())
            .unwrap();
        assert_eq!(later, local(2021, 10, 31, 1, 30));
    }

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(fixed_offset(0).unwrap()), "Z");
        assert_eq!(format_offset(fixed_offset(-3600).unwrap()), "-01:00");
        assert_eq!(format_offset(fixed_offset(3661).unwrap()), "+01:01:01");
    }
}

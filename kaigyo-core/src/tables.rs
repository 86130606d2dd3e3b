//! Compact Unicode property tables
//!
//! Two read-only lookups back the matcher: a class table mapping each code
//! point to its raw `(Line_Break, General_Category)` pair, and code-point
//! sets for the East-Asian-wide and Extended_Pictographic properties. Both
//! are parsed from a range-compressed JSON form and memoised process-wide
//! by source key, so checkers sharing a source share one table.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

use crate::error::{Error, Result};
use crate::types::{GeneralCategory, LineBreakClass};

const LINE_BREAK_16: &str = include_str!("../data/line_break_16.json");
const LINE_BREAK_17: &str = include_str!("../data/line_break_17.json");
const EAST_ASIAN: &str = include_str!("../data/east_asian.json");
const EXT_PICT: &str = include_str!("../data/ext_pict.json");

static CLASS_TABLES: OnceLock<Mutex<HashMap<String, Arc<ClassTable>>>> = OnceLock::new();
static CODE_POINT_SETS: OnceLock<Mutex<HashMap<String, Arc<CodePointSet>>>> = OnceLock::new();

/// Where a class table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassTableSource {
    /// Embedded table for the Unicode 16.0 rule set
    V16,
    /// Embedded table for the Unicode 17.0 rule set
    V17,
    /// External JSON file in the same compact format
    Path(PathBuf),
}

/// Where a code-point set comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodePointSetSource {
    /// Embedded East_Asian_Width ∈ {F, W, H} set
    EastAsian,
    /// Embedded Extended_Pictographic set
    ExtPict,
    /// External JSON file: a list of `[start]` / `[start, stop)` ranges
    Path(PathBuf),
}

/// A code point range carrying its raw property pair
#[derive(Debug, Clone, Copy)]
struct ClassRange {
    start: u32,
    end: u32,
    class: LineBreakClass,
    gc: GeneralCategory,
}

/// Range-compressed `(Line_Break, General_Category)` lookup
#[derive(Debug)]
pub struct ClassTable {
    ranges: Vec<ClassRange>,
}

impl ClassTable {
    /// Parse the compact JSON form: class → general category → ranges.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, HashMap<String, Vec<Vec<i64>>>> = serde_json::from_str(json)?;

        let mut ranges = Vec::new();
        for (class_name, by_gc) in &raw {
            let class = LineBreakClass::from_abbrev(class_name).ok_or_else(|| {
                Error::InvalidTable(format!("unknown line break class `{class_name}`"))
            })?;
            for (gc_name, raw_ranges) in by_gc {
                let gc = GeneralCategory::from_abbrev(gc_name).ok_or_else(|| {
                    Error::InvalidTable(format!("unknown general category `{gc_name}`"))
                })?;
                for raw_range in raw_ranges {
                    let (start, end) = parse_range(raw_range)?;
                    ranges.push(ClassRange {
                        start,
                        end,
                        class,
                        gc,
                    });
                }
            }
        }
        // Sorted once so lookups are deterministic regardless of the JSON
        // object iteration order.
        ranges.sort_by_key(|r| r.start);
        Ok(Self { ranges })
    }

    /// Raw property pair for a code point.
    ///
    /// Code points absent from the table degrade to `(AL, Cn)`.
    pub fn lookup(&self, cp: u32) -> (LineBreakClass, GeneralCategory) {
        let idx = self.ranges.partition_point(|r| r.end <= cp);
        match self.ranges.get(idx) {
            Some(r) if r.start <= cp => (r.class, r.gc),
            _ => (LineBreakClass::AL, GeneralCategory::Cn),
        }
    }

    /// Number of compressed ranges in the table
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// True if the table holds no ranges
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Sorted set of code-point ranges with membership lookup
#[derive(Debug)]
pub struct CodePointSet {
    ranges: Vec<(u32, u32)>,
}

impl CodePointSet {
    /// Parse a JSON list of `[start]` / `[start, stop)` ranges.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Vec<Vec<i64>> = serde_json::from_str(json)?;
        let mut ranges = raw
            .iter()
            .map(|r| parse_range(r))
            .collect::<Result<Vec<_>>>()?;
        ranges.sort_unstable();
        Ok(Self { ranges })
    }

    /// True if the code point lies in any range
    pub fn contains(&self, cp: u32) -> bool {
        let idx = self.ranges.partition_point(|&(_, end)| end <= cp);
        matches!(self.ranges.get(idx), Some(&(start, _)) if start <= cp)
    }
}

fn parse_range(raw: &[i64]) -> Result<(u32, u32)> {
    let (start, end) = match *raw {
        [start] => (start, start + 1),
        [start, end] => (start, end),
        _ => {
            return Err(Error::InvalidTable(format!(
                "range must have 1 or 2 bounds, got {}",
                raw.len()
            )))
        }
    };
    if start < 0 || end <= start || end > 0x11_0000 {
        return Err(Error::InvalidTable(format!(
            "invalid code point range [{start}, {end})"
        )));
    }
    Ok((start as u32, end as u32))
}

impl ClassTableSource {
    fn cache_key(&self) -> String {
        match self {
            Self::V16 => "v16".to_string(),
            Self::V17 => "v17".to_string(),
            Self::Path(p) => format!("path:{}", p.display()),
        }
    }

    /// Load this table, reusing a previously loaded copy for the same source.
    pub fn load(&self) -> Result<Arc<ClassTable>> {
        let cache = CLASS_TABLES.get_or_init(|| Mutex::new(HashMap::new()));
        let mut cache = cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(table) = cache.get(&self.cache_key()) {
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(match self {
            Self::V16 => ClassTable::from_json(LINE_BREAK_16)?,
            Self::V17 => ClassTable::from_json(LINE_BREAK_17)?,
            Self::Path(p) => ClassTable::from_json(&std::fs::read_to_string(p)?)?,
        });
        cache.insert(self.cache_key(), Arc::clone(&table));
        Ok(table)
    }
}

impl CodePointSetSource {
    fn cache_key(&self) -> String {
        match self {
            Self::EastAsian => "east_asian".to_string(),
            Self::ExtPict => "ext_pict".to_string(),
            Self::Path(p) => format!("path:{}", p.display()),
        }
    }

    /// Load this set, reusing a previously loaded copy for the same source.
    pub fn load(&self) -> Result<Arc<CodePointSet>> {
        let cache = CODE_POINT_SETS.get_or_init(|| Mutex::new(HashMap::new()));
        let mut cache = cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(set) = cache.get(&self.cache_key()) {
            return Ok(Arc::clone(set));
        }
        let set = Arc::new(match self {
            Self::EastAsian => CodePointSet::from_json(EAST_ASIAN)?,
            Self::ExtPict => CodePointSet::from_json(EXT_PICT)?,
            Self::Path(p) => CodePointSet::from_json(&std::fs::read_to_string(p)?)?,
        });
        cache.insert(self.cache_key(), Arc::clone(&set));
        Ok(set)
    }
}

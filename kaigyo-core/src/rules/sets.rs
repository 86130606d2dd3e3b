//! Built-in rule sets
//!
//! The UAX #14 rule lists for Unicode 16.0 and 17.0, written in the rule
//! mini-language. Rules apply in declaration order; the first rule whose
//! both sides match decides the position. LB1 (class resolution) happens
//! during class assignment and LB10 inside the combining-sequence
//! transform, so neither appears here. LB9 carries the side effect that
//! activates the transformed class stream for every later rule.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use super::parser::parse_rules;
use super::pattern::{Rule, RuleSpec};
use crate::error::Result;
use crate::tables::ClassTableSource;

/// Name of the side effect bound to the combining-sequence rule
pub const STD_REMOVE_CM_SEQUENCES: &str = "std_remove_cm_sequences";

static COMPILED: OnceLock<Mutex<HashMap<&'static str, Arc<Vec<Rule>>>>> = OnceLock::new();

/// Which UAX #14 revision's rule list to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleSet {
    /// Unicode 16.0
    V16,
    /// Unicode 17.0
    #[default]
    V17,
}

type RawRule = (&'static str, &'static str, Option<&'static str>);

#[rustfmt::skip]
const RULES_V16: &[RawRule] = &[
    ("LB2",   "sot × any", None),
    ("LB3",   "any ! eot", None),
    ("LB4",   "BK ! any", None),
    ("LB5",   "CR × LF", None),
    ("LB5",   "CR ! any", None),
    ("LB5",   "LF ! any", None),
    ("LB5",   "NL ! any", None),
    ("LB6",   "any × ( BK | CR | LF | NL )", None),
    ("LB7",   "any × ( SP | ZW )", None),
    ("LB8",   "ZW * SP ÷ any", None),
    ("LB8a",  "ZWJ × any", None),
    ("LB9",   "( ^ ( BK | CR | LF | NL | SP | ZW | sot ) ) × ( CM | ZWJ )",
              Some(STD_REMOVE_CM_SEQUENCES)),
    ("LB11",  "any × WJ", None),
    ("LB11",  "WJ × any", None),
    ("LB12",  "GL × any", None),
    ("LB12a", "( ^ ( SP | BA | HY ) ) × GL", None),
    ("LB13",  "any × ( CL | CP | EX | SY )", None),
    ("LB14",  "OP * SP × any", None),
    ("LB15a", "( sot | BK | CR | LF | NL | OP | QU | GL | SP | ZW ) ( QU - gc(Pf) ) * SP × any", None),
    ("LB15b", "any × ( QU - gc(Pi) ) ( SP | GL | WJ | CL | QU | CP | EX | IS | SY | BK | CR | LF | NL | ZW | eot )", None),
    ("LB15c", "SP ÷ IS NU", None),
    ("LB15d", "any × IS", None),
    ("LB16",  "( CL | CP ) * SP × NS", None),
    ("LB17",  "B2 * SP × B2", None),
    ("LB18",  "SP ÷ any", None),
    ("LB19",  "any × ( QU - gc(Pi) )", None),
    ("LB19",  "( QU - gc(Pf) ) × any", None),
    ("LB19a", "( ^ eastasian ) × QU", None),
    ("LB19a", "any × QU ( ^ eastasian | eot )", None),
    ("LB19a", "QU × ( ^ eastasian )", None),
    ("LB19a", "( sot | ^ eastasian ) QU × any", None),
    ("LB20",  "any ÷ CB", None),
    ("LB20",  "CB ÷ any", None),
    ("LB20a", "( sot | BK | CR | LF | NL | SP | ZW | CB | GL ) ( HY | \\u2010 ) × AL", None),
    ("LB21",  "any × ( BA | HY | NS )", None),
    ("LB21",  "BB × any", None),
    ("LB21a", "HL ( HY | ( BA - eastasian ) ) × ( ^ HL )", None),
    ("LB21b", "SY × HL", None),
    ("LB22",  "any × IN", None),
    ("LB23",  "( AL | HL ) × NU", None),
    ("LB23",  "NU × ( AL | HL )", None),
    ("LB23a", "PR × ( ID | EB | EM )", None),
    ("LB23a", "( ID | EB | EM ) × PO", None),
    ("LB24",  "( PR | PO ) × ( AL | HL )", None),
    ("LB24",  "( AL | HL ) × ( PR | PO )", None),
    ("LB25",  "NU * ( SY | IS ) CL × PO", None),
    ("LB25",  "NU * ( SY | IS ) CP × PO", None),
    ("LB25",  "NU * ( SY | IS ) CL × PR", None),
    ("LB25",  "NU * ( SY | IS ) CP × PR", None),
    ("LB25",  "NU * ( SY | IS ) × PO", None),
    ("LB25",  "NU * ( SY | IS ) × PR", None),
    ("LB25",  "PO × OP NU", None),
    ("LB25",  "PO × OP IS NU", None),
    ("LB25",  "PO × NU", None),
    ("LB25",  "PR × OP NU", None),
    ("LB25",  "PR × OP IS NU", None),
    ("LB25",  "PR × NU", None),
    ("LB25",  "HY × NU", None),
    ("LB25",  "IS × NU", None),
    ("LB25",  "NU * ( SY | IS ) × NU", None),
    ("LB26",  "JL × ( JL | JV | H2 | H3 )", None),
    ("LB26",  "( JV | H2 ) × ( JV | JT )", None),
    ("LB26",  "( JT | H3 ) × JT", None),
    ("LB27",  "( JL | JV | JT | H2 | H3 ) × PO", None),
    ("LB27",  "PR × ( JL | JV | JT | H2 | H3 )", None),
    ("LB28",  "( AL | HL ) × ( AL | HL )", None),
    ("LB28a", "AP × ( AK | \\u25CC | AS )", None),
    ("LB28a", "( AK | \\u25CC | AS ) × ( VF | VI )", None),
    ("LB28a", "( AK | \\u25CC | AS ) VI × ( AK | \\u25CC )", None),
    ("LB28a", "( AK | \\u25CC | AS ) × ( AK | \\u25CC | AS ) VF", None),
    ("LB29",  "IS × ( AL | HL )", None),
    ("LB30",  "( AL | HL | NU ) × ( OP - eastasian )", None),
    ("LB30",  "( CP - eastasian ) × ( AL | HL | NU )", None),
    ("LB30a", "sot * [ RI RI ] RI × RI", None),
    ("LB30a", "( ^ RI ) * [ RI RI ] RI × RI", None),
    ("LB30b", "EB × EM", None),
    ("LB30b", "( extpict & gc(Cn) ) × EM", None),
    ("LB31",  "any ÷ any", None),
];

// Unicode 17.0 gives unambiguous hyphens their own class HH; the rules
// that previously reached them through BA or a code point literal name
// HH directly, and LB25 lets HH glue onto a following number.
#[rustfmt::skip]
const RULES_V17: &[RawRule] = &[
    ("LB2",   "sot × any", None),
    ("LB3",   "any ! eot", None),
    ("LB4",   "BK ! any", None),
    ("LB5",   "CR × LF", None),
    ("LB5",   "CR ! any", None),
    ("LB5",   "LF ! any", None),
    ("LB5",   "NL ! any", None),
    ("LB6",   "any × ( BK | CR | LF | NL )", None),
    ("LB7",   "any × ( SP | ZW )", None),
    ("LB8",   "ZW * SP ÷ any", None),
    ("LB8a",  "ZWJ × any", None),
    ("LB9",   "( ^ ( BK | CR | LF | NL | SP | ZW | sot ) ) × ( CM | ZWJ )",
              Some(STD_REMOVE_CM_SEQUENCES)),
    ("LB11",  "any × WJ", None),
    ("LB11",  "WJ × any", None),
    ("LB12",  "GL × any", None),
    ("LB12a", "( ^ ( SP | BA | HY | HH ) ) × GL", None),
    ("LB13",  "any × ( CL | CP | EX | SY )", None),
    ("LB14",  "OP * SP × any", None),
    ("LB15a", "( sot | BK | CR | LF | NL | OP | QU | GL | SP | ZW ) ( QU - gc(Pf) ) * SP × any", None),
    ("LB15b", "any × ( QU - gc(Pi) ) ( SP | GL | WJ | CL | QU | CP | EX | IS | SY | BK | CR | LF | NL | ZW | eot )", None),
    ("LB15c", "SP ÷ IS NU", None),
    ("LB15d", "any × IS", None),
    ("LB16",  "( CL | CP ) * SP × NS", None),
    ("LB17",  "B2 * SP × B2", None),
    ("LB18",  "SP ÷ any", None),
    ("LB19",  "any × ( QU - gc(Pi) )", None),
    ("LB19",  "( QU - gc(Pf) ) × any", None),
    ("LB19a", "( ^ eastasian ) × QU", None),
    ("LB19a", "any × QU ( ^ eastasian | eot )", None),
    ("LB19a", "QU × ( ^ eastasian )", None),
    ("LB19a", "( sot | ^ eastasian ) QU × any", None),
    ("LB20",  "any ÷ CB", None),
    ("LB20",  "CB ÷ any", None),
    ("LB20a", "( sot | BK | CR | LF | NL | SP | ZW | CB | GL ) ( HY | HH ) × AL", None),
    ("LB21",  "any × ( BA | HY | HH | NS )", None),
    ("LB21",  "BB × any", None),
    ("LB21a", "HL ( HY | HH ) × ( ^ HL )", None),
    ("LB21b", "SY × HL", None),
    ("LB22",  "any × IN", None),
    ("LB23",  "( AL | HL ) × NU", None),
    ("LB23",  "NU × ( AL | HL )", None),
    ("LB23a", "PR × ( ID | EB | EM )", None),
    ("LB23a", "( ID | EB | EM ) × PO", None),
    ("LB24",  "( PR | PO ) × ( AL | HL )", None),
    ("LB24",  "( AL | HL ) × ( PR | PO )", None),
    ("LB25",  "NU * ( SY | IS ) CL × PO", None),
    ("LB25",  "NU * ( SY | IS ) CP × PO", None),
    ("LB25",  "NU * ( SY | IS ) CL × PR", None),
    ("LB25",  "NU * ( SY | IS ) CP × PR", None),
    ("LB25",  "NU * ( SY | IS ) × PO", None),
    ("LB25",  "NU * ( SY | IS ) × PR", None),
    ("LB25",  "PO × OP NU", None),
    ("LB25",  "PO × OP IS NU", None),
    ("LB25",  "PO × NU", None),
    ("LB25",  "PR × OP NU", None),
    ("LB25",  "PR × OP IS NU", None),
    ("LB25",  "PR × NU", None),
    ("LB25",  "HY × NU", None),
    ("LB25",  "HH × NU", None),
    ("LB25",  "IS × NU", None),
    ("LB25",  "NU * ( SY | IS ) × NU", None),
    ("LB26",  "JL × ( JL | JV | H2 | H3 )", None),
    ("LB26",  "( JV | H2 ) × ( JV | JT )", None),
    ("LB26",  "( JT | H3 ) × JT", None),
    ("LB27",  "( JL | JV | JT | H2 | H3 ) × PO", None),
    ("LB27",  "PR × ( JL | JV | JT | H2 | H3 )", None),
    ("LB28",  "( AL | HL ) × ( AL | HL )", None),
    ("LB28a", "AP × ( AK | \\u25CC | AS )", None),
    ("LB28a", "( AK | \\u25CC | AS ) × ( VF | VI )", None),
    ("LB28a", "( AK | \\u25CC | AS ) VI × ( AK | \\u25CC )", None),
    ("LB28a", "( AK | \\u25CC | AS ) × ( AK | \\u25CC | AS ) VF", None),
    ("LB29",  "IS × ( AL | HL )", None),
    ("LB30",  "( AL | HL | NU ) × ( OP - eastasian )", None),
    ("LB30",  "( CP - eastasian ) × ( AL | HL | NU )", None),
    ("LB30a", "sot * [ RI RI ] RI × RI", None),
    ("LB30a", "( ^ RI ) * [ RI RI ] RI × RI", None),
    ("LB30b", "EB × EM", None),
    ("LB30b", "( extpict & gc(Cn) ) × EM", None),
    ("LB31",  "any ÷ any", None),
];

impl RuleSet {
    fn raw(self) -> &'static [RawRule] {
        match self {
            Self::V16 => RULES_V16,
            Self::V17 => RULES_V17,
        }
    }

    fn cache_key(self) -> &'static str {
        match self {
            Self::V16 => "v16",
            Self::V17 => "v17",
        }
    }

    /// The class table matching this rule set's Unicode version
    pub fn table_source(self) -> ClassTableSource {
        match self {
            Self::V16 => ClassTableSource::V16,
            Self::V17 => ClassTableSource::V17,
        }
    }

    /// The raw rules of this set, for inspection or tailoring
    pub fn specs(self) -> Vec<RuleSpec> {
        self.raw()
            .iter()
            .map(|&(name, pattern, side_effect)| RuleSpec {
                name: name.to_string(),
                pattern: pattern.to_string(),
                side_effect: side_effect.map(str::to_string),
            })
            .collect()
    }

    /// Compile this rule set, sharing the parsed list process-wide.
    pub(crate) fn compiled(self) -> Result<Arc<Vec<Rule>>> {
        let cache = COMPILED.get_or_init(|| Mutex::new(HashMap::new()));
        let mut cache = cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(rules) = cache.get(self.cache_key()) {
            return Ok(Arc::clone(rules));
        }
        let rules = Arc::new(parse_rules(&self.specs())?);
        cache.insert(self.cache_key(), Arc::clone(&rules));
        Ok(rules)
    }
}

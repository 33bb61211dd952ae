//! Domain vocabulary for packet filter sentences.
//!
//! Three tables map surface terms to protocol, filter-type and direction
//! values. The annotation step applies them as highest-priority overrides:
//! any exact (case-insensitive) match becomes a NOUN carrying the matching
//! [`DomainTag`]. Number-like and URL-like tokens become NOUNs tagged
//! [`DomainTag::Number`].

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Protocol qualifiers understood by packet filter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Ether,
    Ip,
    Ip6,
    Arp,
    Rarp,
    Tcp,
    Udp,
    Sctp,
    Vlan,
    Mpls,
    Icmp,
    Icmp6,
}

/// Type qualifiers: what kind of thing the id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Host,
    Net,
    Port,
    Portrange,
    Proto,
    Protochain,
}

/// Direction qualifiers.
///
/// `SrcOrDst` and `SrcAndDst` never appear as surface terms; they come from
/// classifying a "source and destination" style combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Src,
    Dst,
    SrcOrDst,
    SrcAndDst,
}

impl Direction {
    /// True for the two single directions that can form a combo.
    pub fn is_single(self) -> bool {
        matches!(self, Direction::Src | Direction::Dst)
    }
}

/// Category tag attached to a token by vocabulary matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainTag {
    Protocol,
    FilterType,
    Direction,
    Number,
}

impl DomainTag {
    /// Protocol, type and direction terms are filter keywords; numbers are values.
    pub fn is_field_keyword(self) -> bool {
        !matches!(self, DomainTag::Number)
    }

    pub fn label(self) -> &'static str {
        match self {
            DomainTag::Protocol => "PROTO",
            DomainTag::FilterType => "TYP",
            DomainTag::Direction => "DIR",
            DomainTag::Number => "NN",
        }
    }
}

/// A vocabulary match with its typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VocabTerm {
    Protocol(Protocol),
    FilterType(FilterType),
    Direction(Direction),
}

impl VocabTerm {
    pub fn tag(self) -> DomainTag {
        match self {
            VocabTerm::Protocol(_) => DomainTag::Protocol,
            VocabTerm::FilterType(_) => DomainTag::FilterType,
            VocabTerm::Direction(_) => DomainTag::Direction,
        }
    }
}

pub const PROTOCOLS: &[(&str, Protocol)] = &[
    ("ether", Protocol::Ether),
    ("ethernet", Protocol::Ether),
    ("ip4", Protocol::Ip),
    ("ipv4", Protocol::Ip),
    ("ip6", Protocol::Ip6),
    ("ipv6", Protocol::Ip6),
    ("arp", Protocol::Arp),
    ("rarp", Protocol::Rarp),
    ("tcp", Protocol::Tcp),
    ("udp", Protocol::Udp),
    ("sctp", Protocol::Sctp),
    ("vlan", Protocol::Vlan),
    ("mpls", Protocol::Mpls),
    ("icmp", Protocol::Icmp),
    ("icmp6", Protocol::Icmp6),
];

pub const FILTER_TYPES: &[(&str, FilterType)] = &[
    ("host", FilterType::Host),
    ("hostname", FilterType::Host),
    ("net", FilterType::Net),
    ("network", FilterType::Net),
    ("port", FilterType::Port),
    ("portrange", FilterType::Portrange),
    ("proto", FilterType::Proto),
    ("protochain", FilterType::Protochain),
];

pub const DIRECTIONS: &[(&str, Direction)] = &[
    ("src", Direction::Src),
    ("source", Direction::Src),
    ("dst", Direction::Dst),
    ("destination", Direction::Dst),
];

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "billion",
];

const URL_PREFIXES: &[&str] = &["http://", "https://", "ftp://", "www."];

const TOP_LEVEL_LABELS: &[&str] = &[
    "com", "net", "org", "edu", "gov", "mil", "int", "io", "dev", "app", "local", "lan",
    "arpa", "info", "biz", "us", "uk", "de", "fr", "nl", "jp", "cn", "ru", "ca", "au",
];

static BUILTIN: Lazy<Vocabulary> = Lazy::new(|| {
    let mut vocabulary = Vocabulary::empty();
    for (term, protocol) in PROTOCOLS {
        vocabulary.add_protocol(term, *protocol);
    }
    for (term, filter_type) in FILTER_TYPES {
        vocabulary.add_filter_type(term, *filter_type);
    }
    for (term, direction) in DIRECTIONS {
        vocabulary.add_direction(term, *direction);
    }
    vocabulary
});

/// Case-insensitive lookup tables for the three term categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    protocols: HashMap<String, Protocol>,
    filter_types: HashMap<String, FilterType>,
    directions: HashMap<String, Direction>,
}

impl Vocabulary {
    /// The builtin tables, indexed once per process.
    pub fn builtin() -> &'static Vocabulary {
        &BUILTIN
    }

    pub fn empty() -> Self {
        Self {
            protocols: HashMap::new(),
            filter_types: HashMap::new(),
            directions: HashMap::new(),
        }
    }

    pub fn add_protocol(&mut self, term: &str, protocol: Protocol) {
        self.protocols.insert(term.to_lowercase(), protocol);
    }

    pub fn add_filter_type(&mut self, term: &str, filter_type: FilterType) {
        self.filter_types.insert(term.to_lowercase(), filter_type);
    }

    pub fn add_direction(&mut self, term: &str, direction: Direction) {
        self.directions.insert(term.to_lowercase(), direction);
    }

    pub fn protocol(&self, text: &str) -> Option<Protocol> {
        self.protocols.get(&text.to_lowercase()).copied()
    }

    pub fn filter_type(&self, text: &str) -> Option<FilterType> {
        self.filter_types.get(&text.to_lowercase()).copied()
    }

    pub fn direction(&self, text: &str) -> Option<Direction> {
        self.directions.get(&text.to_lowercase()).copied()
    }

    /// Look a surface term up in protocol, type and direction order.
    pub fn lookup(&self, text: &str) -> Option<VocabTerm> {
        self.protocol(text)
            .map(VocabTerm::Protocol)
            .or_else(|| self.filter_type(text).map(VocabTerm::FilterType))
            .or_else(|| self.direction(text).map(VocabTerm::Direction))
    }

    /// The tag the annotation overrides assign to `text`, if any.
    ///
    /// A `Some` result also means the token's part of speech is forced to NOUN.
    pub fn annotate(&self, text: &str) -> Option<DomainTag> {
        match self.lookup(text) {
            Some(term) => Some(term.tag()),
            None if is_number_like(text) || is_url_like(text) => Some(DomainTag::Number),
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.protocols.len() + self.filter_types.len() + self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

/// Digits with optional sign and separators, a simple fraction, or a number word.
///
/// Dotted quads ("10.0.0.1") count as numbers.
pub fn is_number_like(text: &str) -> bool {
    let unsigned = text
        .strip_prefix(|c: char| matches!(c, '+' | '-' | '~'))
        .unwrap_or(text);

    let digits: String = unsigned.chars().filter(|c| *c != ',' && *c != '.').collect();
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }

    if let Some((numerator, denominator)) = unsigned.split_once('/') {
        let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if all_digits(numerator) && all_digits(denominator) {
            return true;
        }
    }

    NUMBER_WORDS.contains(&unsigned.to_lowercase().as_str())
}

/// Scheme or `www.` prefix, or a dotted name ending in a known top-level label.
pub fn is_url_like(text: &str) -> bool {
    let lower = text.to_lowercase();
    if URL_PREFIXES.iter().any(|prefix| lower.starts_with(prefix)) {
        return true;
    }
    if lower.starts_with('.') || lower.ends_with('.') || lower.contains('@') {
        return false;
    }

    let Some((_, last_label)) = lower.rsplit_once('.') else {
        return false;
    };
    let last_label = last_label.split(':').next().unwrap_or(last_label);
    if last_label.ends_with('/') {
        return true;
    }
    TOP_LEVEL_LABELS.contains(&last_label)
}

//! Parsed sentences shared by the scenario and property tests.
//!
//! Each token is `(text, POS, dependency, head)`; chunks are
//! `(start, end inclusive, root)`. Vocabulary overrides are applied as the
//! annotation step would.

use crate::{DepRole, PosCategory, SentenceGraph, Vocabulary};

pub(crate) fn graph(
    text: &str,
    tokens: &[(&str, &str, &str, usize)],
    chunks: &[(usize, usize, usize)],
) -> SentenceGraph {
    let mut builder = SentenceGraph::builder(text).annotate_with(Vocabulary::builtin());
    for &(token, pos, dep, head) in tokens {
        let pos = PosCategory::from_label(pos).unwrap();
        builder = builder.token(token, pos, DepRole::parse(dep), head);
    }
    for &(start, end, root) in chunks {
        builder = builder.noun_chunk(start, end, root);
    }
    builder.build().unwrap()
}

pub(crate) fn has_source_host_of_foo() -> SentenceGraph {
    graph(
        "ip4 that has a source host of foo",
        &[
            ("ip4", "NOUN", "ROOT", 0),
            ("that", "PRON", "nsubj", 2),
            ("has", "VERB", "relcl", 0),
            ("a", "DET", "det", 5),
            ("source", "NOUN", "compound", 5),
            ("host", "NOUN", "dobj", 2),
            ("of", "ADP", "prep", 5),
            ("foo", "NOUN", "pobj", 6),
        ],
        &[(0, 0, 0), (1, 1, 1), (3, 7, 5)],
    )
}

pub(crate) fn does_not_have_source_host() -> SentenceGraph {
    graph(
        "ip4 that does not have a source host of foo",
        &[
            ("ip4", "NOUN", "ROOT", 0),
            ("that", "PRON", "nsubj", 4),
            ("does", "AUX", "aux", 4),
            ("not", "PART", "neg", 4),
            ("have", "VERB", "relcl", 0),
            ("a", "DET", "det", 7),
            ("source", "NOUN", "compound", 7),
            ("host", "NOUN", "dobj", 4),
            ("of", "ADP", "prep", 7),
            ("foo", "NOUN", "pobj", 8),
        ],
        &[(0, 0, 0), (1, 1, 1), (5, 9, 7)],
    )
}

pub(crate) fn doesnt_have_source_host() -> SentenceGraph {
    graph(
        "ip4 that doesn't have a source host of foo",
        &[
            ("ip4", "NOUN", "ROOT", 0),
            ("that", "PRON", "nsubj", 4),
            ("does", "AUX", "aux", 4),
            ("n't", "PART", "neg", 4),
            ("have", "VERB", "relcl", 0),
            ("a", "DET", "det", 7),
            ("source", "NOUN", "compound", 7),
            ("host", "NOUN", "dobj", 4),
            ("of", "ADP", "prep", 7),
            ("foo", "NOUN", "pobj", 8),
        ],
        &[(0, 0, 0), (1, 1, 1), (5, 9, 7)],
    )
}

pub(crate) fn not_ip4_that_has() -> SentenceGraph {
    graph(
        "not ip4 that has a source host of foo",
        &[
            ("not", "PART", "neg", 1),
            ("ip4", "NOUN", "ROOT", 1),
            ("that", "PRON", "nsubj", 3),
            ("has", "VERB", "relcl", 1),
            ("a", "DET", "det", 6),
            ("source", "NOUN", "compound", 6),
            ("host", "NOUN", "dobj", 3),
            ("of", "ADP", "prep", 6),
            ("foo", "NOUN", "pobj", 7),
        ],
        &[(0, 1, 1), (2, 2, 2), (4, 8, 6)],
    )
}

pub(crate) fn without_source_host() -> SentenceGraph {
    graph(
        "ip4 without a source host of foo",
        &[
            ("ip4", "NOUN", "ROOT", 0),
            ("without", "ADP", "prep", 0),
            ("a", "DET", "det", 4),
            ("source", "NOUN", "compound", 4),
            ("host", "NOUN", "pobj", 1),
            ("of", "ADP", "prep", 4),
            ("foo", "NOUN", "pobj", 5),
        ],
        &[(0, 0, 0), (2, 6, 4)],
    )
}

pub(crate) fn not_with_source_host() -> SentenceGraph {
    graph(
        "ip4 not with source host foo",
        &[
            ("ip4", "NOUN", "ROOT", 0),
            ("not", "PART", "neg", 2),
            ("with", "ADP", "prep", 0),
            ("source", "NOUN", "compound", 5),
            ("host", "NOUN", "compound", 5),
            ("foo", "NOUN", "pobj", 2),
        ],
        &[(0, 0, 0), (3, 5, 5)],
    )
}

/// "ip4 that has source {conjunction} destination host foo"
pub(crate) fn source_conj_destination(conjunction: &str) -> SentenceGraph {
    graph(
        &format!("ip4 that has source {} destination host foo", conjunction),
        &[
            ("ip4", "NOUN", "ROOT", 0),
            ("that", "PRON", "nsubj", 2),
            ("has", "VERB", "relcl", 0),
            ("source", "NOUN", "compound", 6),
            (conjunction, "CCONJ", "cc", 3),
            ("destination", "NOUN", "conj", 3),
            ("host", "NOUN", "compound", 7),
            ("foo", "NOUN", "dobj", 2),
        ],
        &[(0, 0, 0), (1, 1, 1), (3, 7, 7)],
    )
}

pub(crate) fn does_not_have_source_and_destination() -> SentenceGraph {
    graph(
        "ip4 that does not have source and destination host foo",
        &[
            ("ip4", "NOUN", "ROOT", 0),
            ("that", "PRON", "nsubj", 4),
            ("does", "AUX", "aux", 4),
            ("not", "PART", "neg", 4),
            ("have", "VERB", "relcl", 0),
            ("source", "NOUN", "compound", 8),
            ("and", "CCONJ", "cc", 5),
            ("destination", "NOUN", "conj", 5),
            ("host", "NOUN", "compound", 9),
            ("foo", "NOUN", "dobj", 4),
        ],
        &[(0, 0, 0), (1, 1, 1), (5, 9, 9)],
    )
}

pub(crate) fn protocol_tcp_and_protocol_ip4() -> SentenceGraph {
    graph(
        "ether with protocol tcp and protocol ip4",
        &[
            ("ether", "NOUN", "ROOT", 0),
            ("with", "ADP", "prep", 0),
            ("protocol", "NOUN", "compound", 3),
            ("tcp", "NOUN", "pobj", 1),
            ("and", "CCONJ", "cc", 3),
            ("protocol", "NOUN", "compound", 6),
            ("ip4", "NOUN", "conj", 3),
        ],
        &[(0, 0, 0), (2, 3, 3), (5, 6, 6)],
    )
}

pub(crate) fn direction_type_value() -> SentenceGraph {
    graph(
        "ip4 that has direction source and type host and value foo",
        &[
            ("ip4", "NOUN", "ROOT", 0),
            ("that", "PRON", "nsubj", 2),
            ("has", "VERB", "relcl", 0),
            ("direction", "NOUN", "compound", 4),
            ("source", "NOUN", "dobj", 2),
            ("and", "CCONJ", "cc", 4),
            ("type", "NOUN", "compound", 7),
            ("host", "NOUN", "conj", 4),
            ("and", "CCONJ", "cc", 7),
            ("value", "NOUN", "compound", 10),
            ("foo", "NOUN", "conj", 7),
        ],
        &[(0, 0, 0), (1, 1, 1), (3, 4, 4), (6, 7, 7), (9, 10, 10)],
    )
}

/// One "not" governed by the verb both chunks hang from.
pub(crate) fn shared_not() -> SentenceGraph {
    graph(
        "host foo does not have port 80",
        &[
            ("host", "NOUN", "compound", 1),
            ("foo", "NOUN", "nsubj", 4),
            ("does", "AUX", "aux", 4),
            ("not", "PART", "neg", 4),
            ("have", "VERB", "ROOT", 4),
            ("port", "NOUN", "compound", 6),
            ("80", "NUM", "dobj", 4),
        ],
        &[(0, 1, 1), (5, 6, 6)],
    )
}

pub(crate) fn unresolved_pronoun() -> SentenceGraph {
    graph(
        "it does not matter",
        &[
            ("it", "PRON", "nsubj", 3),
            ("does", "AUX", "aux", 3),
            ("not", "PART", "neg", 3),
            ("matter", "VERB", "ROOT", 3),
        ],
        &[(0, 0, 0)],
    )
}

pub(crate) fn passive_subject() -> SentenceGraph {
    graph(
        "udp packets are dropped",
        &[
            ("udp", "NOUN", "compound", 1),
            ("packets", "NOUN", "nsubjpass", 3),
            ("are", "AUX", "auxpass", 3),
            ("dropped", "VERB", "ROOT", 3),
        ],
        &[(0, 1, 1)],
    )
}

/// A conjunct whose governing noun was never chunked.
pub(crate) fn orphan_conjunct() -> SentenceGraph {
    graph(
        "tcp or udp",
        &[
            ("tcp", "NOUN", "ROOT", 0),
            ("or", "CCONJ", "cc", 0),
            ("udp", "NOUN", "conj", 0),
        ],
        &[(2, 2, 2)],
    )
}

pub(crate) fn protocol_or_chain() -> SentenceGraph {
    graph(
        "tcp or udp or icmp",
        &[
            ("tcp", "NOUN", "ROOT", 0),
            ("or", "CCONJ", "cc", 0),
            ("udp", "NOUN", "conj", 0),
            ("or", "CCONJ", "cc", 2),
            ("icmp", "NOUN", "conj", 2),
        ],
        &[(0, 0, 0), (2, 2, 2), (4, 4, 4)],
    )
}

pub(crate) fn unmarked_conjunct() -> SentenceGraph {
    graph(
        "tcp udp",
        &[("tcp", "NOUN", "ROOT", 0), ("udp", "NOUN", "conj", 0)],
        &[(0, 0, 0), (1, 1, 1)],
    )
}

/// Every well-formed sentence above.
pub(crate) fn all() -> Vec<SentenceGraph> {
    vec![
        has_source_host_of_foo(),
        does_not_have_source_host(),
        doesnt_have_source_host(),
        not_ip4_that_has(),
        without_source_host(),
        not_with_source_host(),
        source_conj_destination("or"),
        source_conj_destination("and"),
        does_not_have_source_and_destination(),
        protocol_tcp_and_protocol_ip4(),
        direction_type_value(),
        protocol_or_chain(),
        shared_not(),
        unresolved_pronoun(),
        passive_subject(),
        unmarked_conjunct(),
    ]
}

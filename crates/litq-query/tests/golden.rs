//! Golden parse results for both grammars.
//!
//! Every query is parsed with a keyword snapshot that holds the fields used below, so
//! words such as `auzor` or `ellis` are never mistaken for keywords.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use litq_query::{KeywordSet, Node, QueryParser, convert};

fn parser() -> QueryParser {
    QueryParser::new().with_keywords(KeywordSet::from_iter([
        "999", "999C5", "999__u", "a", "ac", "af", "aff", "arXiv", "author", "cited",
        "collaboration", "d", "da", "date", "du", "ea", "j", "primarch", "refersto", "t",
        "tc", "texkey", "title", "topcite", "year",
    ]))
}

fn vq(text: &str) -> Node {
    Node::value_query(Node::value(text))
}

fn kw(keyword: &str, value: Node) -> Node {
    Node::keyword(keyword, value)
}

fn v(text: &str) -> Node {
    Node::value(text)
}

fn sf(keyword: &str, value: Node) -> Node {
    Node::legacy_field(keyword, value)
}

fn author_bar() -> Node {
    kw("author", v("bar"))
}

fn check(cases: Vec<(&str, Node)>, parse: impl Fn(&str) -> Node) {
    for (query, expected) in cases {
        let tree = parse(query);
        assert_eq!(
            tree, expected,
            "query: {query:?}\nparsed tree: {tree}\nexpected tree: {expected}"
        );
    }
}

fn native_cases() -> Vec<(&'static str, Node)> {
    vec![
        ("", Node::empty("")),
        ("    \t", Node::empty("    \t")),
        ("bar", vq("bar")),
        ("2004", vq("2004")),
        ("'bar'", Node::value_query(Node::single_quoted("bar"))),
        ("\"bar\"", Node::value_query(Node::double_quoted("bar"))),
        ("J. Ellis", Node::and(vq("J."), vq("Ellis"))),
        ("$e^{+}e^{-}$", vq("$e^{+}e^{-}$")),
        // keyword:value
        ("author:bar", author_bar()),
        ("author: bar", author_bar()),
        ("author: 2004", kw("author", v("2004"))),
        ("999: bar", kw("999", v("bar"))),
        ("999C5: bar", kw("999C5", v("bar"))),
        ("999__u: bar", kw("999__u", v("bar"))),
        ("  author  :  bar  ", author_bar()),
        // quoting
        ("author: 'bar'", kw("author", Node::single_quoted("bar"))),
        ("author: \"bar\"", kw("author", Node::double_quoted("bar"))),
        ("author: /bar/", kw("author", Node::regex("bar"))),
        ("author: \"'bar'\"", kw("author", Node::double_quoted("'bar'"))),
        ("author:\"Ellis, J\"", kw("author", Node::double_quoted("Ellis, J"))),
        ("author: \"bar", kw("author", v("\"bar"))),
        ("author: 'bar", kw("author", v("'bar"))),
        // ranges
        ("year: 2000->2012", kw("year", Node::range(v("2000"), v("2012")))),
        (
            "year: 2000-10->2012-09",
            kw("year", Node::range(v("2000-10"), v("2012-09"))),
        ),
        ("cited: 3->30", kw("cited", Node::range(v("3"), v("30")))),
        ("author: Albert->John", kw("author", Node::range(v("Albert"), v("John")))),
        (
            "author: \"Albert\"->John",
            kw("author", Node::range(Node::double_quoted("Albert"), v("John"))),
        ),
        (
            "author: Albert->\"John\"",
            kw("author", Node::range(v("Albert"), Node::double_quoted("John"))),
        ),
        (
            "author: \"Albert\"->\"John\"",
            kw(
                "author",
                Node::range(Node::double_quoted("Albert"), Node::double_quoted("John")),
            ),
        ),
        // wildcards
        ("bar*", vq("bar*")),
        ("author: hello*", kw("author", v("hello*"))),
        ("author: 'hello*'", kw("author", Node::single_quoted("hello*"))),
        ("author: \"hello*\"", kw("author", Node::double_quoted("hello*"))),
        ("author: he*o", kw("author", v("he*o"))),
        ("author: he*lo*", kw("author", v("he*lo*"))),
        ("author: *hello", kw("author", v("*hello"))),
        // special characters
        ("author: O'Shea", kw("author", v("O'Shea"))),
        ("author: e(-)", kw("author", v("e(-)"))),
        ("author: e(+)e(-)", kw("author", v("e(+)e(-)"))),
        ("title: Si-28(p(pol.),n(pol.))", kw("title", v("Si-28(p(pol.),n(pol.))"))),
        ("author: пушкин", kw("author", v("пушкин"))),
        ("author: Lemaître", kw("author", v("Lemaître"))),
        ("author: \"Lemaître\"", kw("author", Node::double_quoted("Lemaître"))),
        ("refersto:hep-th/0201100", kw("refersto", v("hep-th/0201100"))),
        // combinations
        ("author:bar author:bar", Node::and(author_bar(), author_bar())),
        ("author:bar and author:bar", Node::and(author_bar(), author_bar())),
        ("author:bar AND author:bar", Node::and(author_bar(), author_bar())),
        ("author and bar", Node::and(vq("author"), vq("bar"))),
        ("author:bar or author:bar", Node::or(author_bar(), author_bar())),
        ("author:bar | author:bar", Node::or(author_bar(), author_bar())),
        ("author:bar not author:bar", Node::and(author_bar(), Node::not(author_bar()))),
        ("author:bar and not author:bar", Node::and(author_bar(), Node::not(author_bar()))),
        ("author:bar -author:bar", Node::and(author_bar(), Node::not(author_bar()))),
        ("author:bar- author:bar", Node::and(kw("author", v("bar-")), author_bar())),
        ("(author:bar)", author_bar()),
        ("((author:bar))", author_bar()),
        ("(((author:bar)))", author_bar()),
        ("(author:bar) or author:bar", Node::or(author_bar(), author_bar())),
        ("author:bar or (author:bar)", Node::or(author_bar(), author_bar())),
        ("(author:bar) or (author:bar)", Node::or(author_bar(), author_bar())),
        ("(author:bar)or(author:bar)", Node::or(author_bar(), author_bar())),
        ("(author:bar)|(author:bar)", Node::or(author_bar(), author_bar())),
        ("(author:bar)| (author:bar)", Node::or(author_bar(), author_bar())),
        ("( author:bar) or ( author:bar)", Node::or(author_bar(), author_bar())),
        ("(author:bar) or (author:bar )", Node::or(author_bar(), author_bar())),
        (
            "(author:bar1 or a:bar2) and (title:bar3 or t:bar4)",
            Node::and(
                Node::or(kw("author", v("bar1")), kw("a", v("bar2"))),
                Node::or(kw("title", v("bar3")), kw("t", v("bar4"))),
            ),
        ),
        (
            "author:bar and author:bar and author:bar",
            Node::and(Node::and(author_bar(), author_bar()), author_bar()),
        ),
        (
            "aaa +bbb -ccc +ddd",
            Node::and(
                Node::and(Node::and(vq("aaa"), vq("bbb")), Node::not(vq("ccc"))),
                vq("ddd"),
            ),
        ),
        ("author:bar and -author:bar", Node::and(author_bar(), Node::not(author_bar()))),
        ("-author:bar", Node::not(author_bar())),
        ("-author", Node::not(vq("author"))),
        ("author:bar or -author:bar", Node::or(author_bar(), Node::not(author_bar()))),
        ("author:bar or not author:bar", Node::or(author_bar(), Node::not(author_bar()))),
        (
            "bar + (not a:\"Ba, r\")",
            Node::and(vq("bar"), Node::not(kw("a", Node::double_quoted("Ba, r")))),
        ),
        ("bar | -author:bar", Node::or(vq("bar"), Node::not(author_bar()))),
        // nested fields
        ("refersto:author:Ellis", kw("refersto", kw("author", v("Ellis")))),
        (
            "refersto:refersto:author:Ellis",
            kw("refersto", kw("refersto", kw("author", v("Ellis")))),
        ),
        // keyword-like values
        ("auzor:me", Node::and(v("auzor:"), vq("me"))),
        ("high-energies: annual", Node::and(v("high-energies:"), vq("annual"))),
        ("au-thor me:", Node::and(vq("au-thor"), v("me:"))),
        // popular queries
        ("arXiv:1004.0648", kw("arXiv", v("1004.0648"))),
        (
            "(author:'Hiroshi Okada' OR (author:'H Okada' hep-ph) OR \
             title: 'Dark matter in supersymmetric U(1(B-L) model' OR \
             title: 'Non-Abelian discrete symmetry for flavors')",
            Node::or(
                Node::or(
                    Node::or(
                        kw("author", Node::single_quoted("Hiroshi Okada")),
                        Node::and(kw("author", Node::single_quoted("H Okada")), vq("hep-ph")),
                    ),
                    kw(
                        "title",
                        Node::single_quoted("Dark matter in supersymmetric U(1(B-L) model"),
                    ),
                ),
                kw(
                    "title",
                    Node::single_quoted("Non-Abelian discrete symmetry for flavors"),
                ),
            ),
        ),
    ]
}

fn legacy_cases() -> Vec<(&'static str, Node)> {
    vec![
        ("find t quark", sf("t", v("quark"))),
        ("find a:richter", sf("a", v("richter"))),
        ("find a:\"richter, b\"", sf("a", Node::double_quoted("richter, b"))),
        // multi-word values
        ("find a richter, b", sf("a", v("richter, b"))),
        ("find texkey Allison:1980vw", sf("texkey", v("Allison:1980vw"))),
        ("find title bbb:ccc ddd:eee", sf("title", v("bbb:ccc ddd:eee"))),
        ("find da today-2", sf("da", v("today-2"))),
        ("find da today - 2", sf("da", v("today - 2"))),
        ("find da 2012-01-01", sf("da", v("2012-01-01"))),
        ("find t quark andorinword", sf("t", v("quark andorinword"))),
        // whitespace
        ("find t quark   ", sf("t", v("quark"))),
        ("   find t quark   ", sf("t", v("quark"))),
        ("find t quark ellis  ", sf("t", v("quark ellis"))),
        // combinations
        (
            "find t quark and a ellis",
            Node::and(sf("t", v("quark")), sf("a", v("ellis"))),
        ),
        (
            "find t quark or a ellis",
            Node::or(sf("t", v("quark")), sf("a", v("ellis"))),
        ),
        (
            "find (t aaa or t bbb or t ccc)or t ddd",
            Node::or(
                Node::or(
                    Node::or(sf("t", v("aaa")), sf("t", v("bbb"))),
                    sf("t", v("ccc")),
                ),
                sf("t", v("ddd")),
            ),
        ),
        (
            "find a:richter and t quark",
            Node::and(sf("a", v("richter")), sf("t", v("quark"))),
        ),
        (
            "find (t quark) or (a ellis)",
            Node::or(sf("t", v("quark")), sf("a", v("ellis"))),
        ),
        (
            "find (t quark or a ellis)",
            Node::or(sf("t", v("quark")), sf("a", v("ellis"))),
        ),
        (
            "find ((t quark) or (a ellis))",
            Node::or(sf("t", v("quark")), sf("a", v("ellis"))),
        ),
        (
            "find (( t quark )or( a ellis ))",
            Node::or(sf("t", v("quark")), sf("a", v("ellis"))),
        ),
        (
            "find (( t quark )or( a:ellis ))",
            Node::or(sf("t", v("quark")), sf("a", v("ellis"))),
        ),
        (
            "find collaboration LIGO and a whiting, b f and a Weiss, r",
            Node::and(
                Node::and(sf("collaboration", v("LIGO")), sf("a", v("whiting, b f"))),
                sf("a", v("Weiss, r")),
            ),
        ),
        (
            "find (collaboration LIGO and a whiting, b f) and a Weiss, r",
            Node::and(
                Node::and(sf("collaboration", v("LIGO")), sf("a", v("whiting, b f"))),
                sf("a", v("Weiss, r")),
            ),
        ),
        (
            "find collaboration LIGO and (a whiting, b f and a Weiss, r)",
            Node::and(
                sf("collaboration", v("LIGO")),
                Node::and(sf("a", v("whiting, b f")), sf("a", v("Weiss, r"))),
            ),
        ),
        (
            "find (aff IMPERIAL and d <1989 and a ELLISON) or\
             (a ELLISON and aff RIVERSIDE and tc P)",
            Node::or(
                Node::and(
                    Node::and(
                        sf("aff", v("IMPERIAL")),
                        sf("d", Node::lower(v("1989"))),
                    ),
                    sf("a", v("ELLISON")),
                ),
                Node::and(
                    Node::and(sf("a", v("ELLISON")), sf("aff", v("RIVERSIDE"))),
                    sf("tc", v("P")),
                ),
            ),
        ),
        // keyword inheritance
        (
            "find a john and ellis",
            Node::and(sf("a", v("john")), sf("a", v("ellis"))),
        ),
        (
            "find a john and (ellis or albert)",
            Node::and(sf("a", v("john")), Node::or(vq("ellis"), vq("albert"))),
        ),
        (
            "find a john and t quark or higgs",
            Node::or(
                Node::and(sf("a", v("john")), sf("t", v("quark"))),
                sf("t", v("higgs")),
            ),
        ),
        (
            "find john and t quark or higgs",
            Node::or(
                Node::and(vq("john"), sf("t", v("quark"))),
                sf("t", v("higgs")),
            ),
        ),
        (
            "find a l everett or t light higgs and j phys.rev.lett. and primarch hep-ph",
            Node::and(
                Node::and(
                    Node::or(sf("a", v("l everett")), sf("t", v("light higgs"))),
                    sf("j", v("phys.rev.lett.")),
                ),
                sf("primarch", v("hep-ph")),
            ),
        ),
        (
            "find a l everett or t light higgs and j phys.rev.lett. and monkey",
            Node::and(
                Node::and(
                    Node::or(sf("a", v("l everett")), sf("t", v("light higgs"))),
                    sf("j", v("phys.rev.lett.")),
                ),
                sf("j", v("monkey")),
            ),
        ),
        // nested fields
        ("find refersto a ellis", sf("refersto", sf("a", v("ellis")))),
        (
            "find refersto j Phys.Rev.Lett.",
            sf("refersto", sf("j", v("Phys.Rev.Lett."))),
        ),
        ("find refersto a ellis, j", sf("refersto", sf("a", v("ellis, j")))),
        ("find refersto ellis, j", sf("refersto", vq("ellis, j"))),
        (
            "find a parke, s j and refersto author witten",
            Node::and(
                sf("a", v("parke, s j")),
                sf("refersto", sf("author", v("witten"))),
            ),
        ),
        (
            "fin af oxford u. and refersto title muon*",
            Node::and(
                sf("af", v("oxford u.")),
                sf("refersto", sf("title", v("muon*"))),
            ),
        ),
        (
            "find refersto a parke or refersto a lykken and a witten",
            Node::and(
                Node::or(
                    sf("refersto", sf("a", v("parke"))),
                    sf("refersto", sf("a", v("lykken"))),
                ),
                sf("a", v("witten")),
            ),
        ),
        (
            "find refersto:refersto:author:maldacena",
            sf("refersto", sf("refersto", sf("author", v("maldacena")))),
        ),
        (
            "find refersto hep-th/9711200 and t nucl*",
            Node::and(
                sf("refersto", vq("hep-th/9711200")),
                sf("t", v("nucl*")),
            ),
        ),
        ("find refersto:a ellis", sf("refersto", sf("a", v("ellis")))),
        ("find refersto: a ellis", sf("refersto", sf("a", v("ellis")))),
        // comparisons
        ("find date > 1984", sf("date", Node::greater(v("1984")))),
        ("find ac > 5", sf("ac", Node::greater(v("5")))),
        ("find date after 1984", sf("date", Node::greater(v("1984")))),
        ("find date < 1984", sf("date", Node::lower(v("1984")))),
        ("find ac < 5", sf("ac", Node::lower(v("5")))),
        ("find date before 1984", sf("date", Node::lower(v("1984")))),
        ("find date >= 1984", sf("date", Node::greater_equal(v("1984")))),
        ("find date <= 2014-10-01", sf("date", Node::lower_equal(v("2014-10-01")))),
        ("find du > today-2", sf("du", Node::greater(v("today-2")))),
        ("find du > today - 2", sf("du", Node::greater(v("today - 2")))),
        ("find topcite 200+", sf("topcite", Node::greater_equal(v("200")))),
        ("find topcite 200-", sf("topcite", Node::lower_equal(v("200")))),
        // journals
        ("find j Phys.Rev.,D41,2330", sf("j", v("Phys.Rev.,D41,2330"))),
        ("find j Phys.Rev.,D41, 2330", sf("j", v("Phys.Rev.,D41, 2330"))),
        // popular queries
        ("find ea chowdhury, borun d", sf("ea", v("chowdhury, borun d"))),
        ("f a Oleg Antipin", sf("a", v("Oleg Antipin"))),
        ("FIND a Oleg Antipin", sf("a", v("Oleg Antipin"))),
        (
            "f a rodrigo,g and not rodrigo,j",
            Node::and(sf("a", v("rodrigo,g")), Node::not(sf("a", v("rodrigo,j")))),
        ),
    ]
}

#[test]
fn native_golden_table() {
    let parser = parser();
    check(native_cases(), |query| parser.parse_native(query).unwrap());
}

#[test]
fn legacy_golden_table() {
    let parser = parser();
    check(legacy_cases(), |query| parser.parse_legacy(query).unwrap());
}

#[test]
fn auto_detection_matches_grammar_choice() {
    let parser = parser();
    for (query, expected) in native_cases() {
        assert_eq!(parser.parse(query).unwrap(), expected, "query: {query:?}");
    }
    for (query, expected) in legacy_cases() {
        assert_eq!(parser.parse(query).unwrap(), convert(&expected), "query: {query:?}");
    }
}

#[test]
fn converted_legacy_matches_native_counterpart() {
    let parser = parser();
    let pairs = [
        ("find t quark", "t:quark"),
        ("find a ellis and t quark", "a:ellis and t:quark"),
        ("find a:\"richter, b\"", "a:\"richter, b\""),
        ("find date > 1984", "date:>1984"),
        ("find date 2000->2012", "date:2000->2012"),
        ("find (t aaa or t bbb) and a x", "(t:aaa or t:bbb) and a:x"),
        ("find refersto a ellis", "refersto:a:ellis"),
        ("find a x and not t y", "a:x -t:y"),
    ];
    for (legacy, native) in pairs {
        let converted = convert(&parser.parse_legacy(legacy).unwrap());
        let expected = parser.parse_native(native).unwrap();
        assert_eq!(converted, expected, "legacy: {legacy:?}, native: {native:?}");
    }
}

#[test]
fn legacy_trees_are_equivalent_to_their_conversion() {
    let parser = parser();
    for (query, _) in legacy_cases() {
        let tree = parser.parse_legacy(query).unwrap();
        assert!(tree.equivalent(&convert(&tree)), "query: {query:?}");
    }
}

#[test]
fn legacy_rendering_quotes_multi_word_values() {
    let parser = parser();
    let cases = [
        (
            "find a richter, b",
            "a:\"richter, b\"",
            kw("a", Node::double_quoted("richter, b")),
        ),
        (
            "find t quark and a ellis",
            "t:quark and a:ellis",
            Node::and(kw("t", v("quark")), kw("a", v("ellis"))),
        ),
    ];
    for (query, rendered, reparsed) in cases {
        let tree = parser.parse(query).unwrap();
        assert_eq!(tree.to_native_syntax(), rendered, "query: {query:?}");
        assert_eq!(parser.parse_native(rendered).unwrap(), reparsed);
    }
}

#[test]
fn native_rendering_reparses_to_the_same_tree() {
    let parser = parser();
    for (query, tree) in native_cases() {
        if matches!(tree, Node::EmptyQuery(_)) {
            continue;
        }
        let rendered = tree.to_native_syntax();
        assert_eq!(
            parser.parse_native(&rendered).unwrap(),
            tree,
            "query: {query:?}, rendered: {rendered:?}"
        );
    }
}

//! End-to-end tokenization scenarios and stream-level properties.

use css::{
    CssTokenizer, HashFlag, NumericValue, ParseErrorKind, TokenKind, TokenizerConfig, describe,
    tokenize, tokenize_with,
};

fn lex(input: &str) -> CssTokenizer {
    tokenize(input).expect("recover-mode tokenization cannot fail")
}

fn snapshots(tokenizer: &CssTokenizer) -> Vec<String> {
    tokenizer.tokens().iter().map(|t| describe(&t)).collect()
}

#[test]
fn simple_rule() {
    let tokenizer = lex("a { color: #FF0099; }");
    assert_eq!(
        snapshots(&tokenizer),
        [
            "IDENT \"a\"",
            "WHITESPACE",
            "LEFT_BRACE",
            "WHITESPACE",
            "IDENT \"color\"",
            "COLON",
            "WHITESPACE",
            "HASH(ID) \"FF0099\"",
            "SEMICOLON",
            "WHITESPACE",
            "RIGHT_BRACE",
        ]
    );
    assert!(tokenizer.errors().is_empty());
}

#[test]
fn url_variants() {
    assert_eq!(snapshots(&lex("url( foo )")), ["URL \"foo\""]);

    assert_eq!(
        snapshots(&lex("url(\"foo\")")),
        ["FUNCTION \"url\"", "STRING \"foo\"", "RIGHT_PARENTHESIS"]
    );

    let recovered = lex("url(fo\"o)");
    assert_eq!(recovered.tokens().get(0).kind(), TokenKind::BadUrl);
    assert_eq!(recovered.errors()[0].kind, ParseErrorKind::BadUrl);

    let error = tokenize_with(
        TokenizerConfig {
            recover: false,
            ..TokenizerConfig::default()
        },
        "url(fo\"o)",
    )
    .err()
    .expect("strict mode must fail on a bad url");
    assert_eq!(error.kind, ParseErrorKind::BadUrl);
}

#[test]
fn numeric_tokens_and_escaped_ident() {
    let tokenizer = lex("10px -3.5e+2 .5% \\41 BC");
    assert_eq!(
        snapshots(&tokenizer),
        [
            "DIMENSION 10 px",
            "WHITESPACE",
            "NUMBER -350.0",
            "WHITESPACE",
            "PERCENTAGE 0.5",
            "WHITESPACE",
            "IDENT \"ABC\"",
        ]
    );

    let tokens = tokenizer.tokens();
    let dimension = tokens.get(0);
    assert_eq!(dimension.numeric_value(), Some(NumericValue::Integer(10)));
    assert_eq!(dimension.unit().unwrap(), "px");
    assert!(!dimension.has_decoded_escape());

    let ident = tokens.get(6);
    assert_eq!(ident.string_value().unwrap(), "ABC");
    assert!(ident.has_decoded_escape());
}

#[test]
fn cdo_cdc_and_filtered_comment() {
    let tokenizer = lex("<!-- x --> /* c */ y");
    assert_eq!(
        snapshots(&tokenizer),
        [
            "CDO",
            "WHITESPACE",
            "IDENT \"x\"",
            "WHITESPACE",
            "CDC",
            "WHITESPACE",
            "WHITESPACE",
            "IDENT \"y\"",
        ]
    );
}

#[test]
fn string_with_hex_escaped_line_feed() {
    let tokenizer = lex("\"line\\Abreak\"");
    let string = tokenizer.tokens().get(0);
    assert_eq!(string.kind(), TokenKind::String);
    assert_eq!(string.string_value().unwrap(), "line\nbreak");
    assert!(string.has_decoded_escape());
}

#[test]
fn raw_line_feed_in_string_is_a_parse_error() {
    let tokenizer = lex("\"line\n");
    assert_eq!(tokenizer.errors().len(), 1);
    assert_eq!(tokenizer.errors()[0].kind, ParseErrorKind::UnterminatedString);
    assert_eq!(snapshots(&tokenizer), ["STRING \"line\"", "WHITESPACE"]);

    let error = tokenize_with(
        TokenizerConfig {
            recover: false,
            ..TokenizerConfig::default()
        },
        "\"line\n",
    )
    .err()
    .expect("strict mode must fail on an unterminated string");
    assert_eq!(error.kind, ParseErrorKind::UnterminatedString);
}

#[test]
fn vendor_prefixed_at_keyword() {
    let tokenizer = lex("@-webkit-keyframes");
    assert_eq!(snapshots(&tokenizer), ["AT_KEYWORD \"-webkit-keyframes\""]);
}

#[test]
fn token_ranges_cover_the_normalized_source() {
    let inputs = [
        "a { color: #FF0099; }",
        "url( foo ) url(\"bar\") /* c */ 10px\n\"s\\74 r\"",
        "\r\n@media\t(min-width: 10.5e2px) {}\r",
        "\"open",
        "url(bad\"url) x",
    ];
    for input in inputs {
        let tokenizer = lex(input);
        let source = tokenizer.source();
        let normalized = source.slice_string(0, source.len());
        let tokens = tokenizer.tokens();

        let mut covered = String::new();
        let mut previous_end = 0;
        for index in 0..tokens.len() {
            let token = tokens.get(index);
            assert_eq!(token.start(), previous_end, "tokens must partition the source");
            assert!(token.end() > token.start(), "no token is zero-width");
            covered.push_str(&token.source_string());
            previous_end = token.end();
        }
        assert_eq!(previous_end, source.len());
        assert_eq!(covered, normalized);
    }
}

#[test]
fn tokenization_is_deterministic() {
    let input = "a{b:url( x );c:#def 1e3px}/*!*/";
    let first = snapshots(&lex(input));
    let second = snapshots(&lex(input));
    assert_eq!(first, second);
}

#[test]
fn hex_escapes_round_trip() {
    let cases: [(u32, u32); 6] = [
        (0x41, 0x41),
        (0xE9, 0xE9),
        (0x1F600, 0x1F600),
        (0x0, 0xFFFD),
        (0xD800, 0xFFFD),
        (0x110000, 0xFFFD),
    ];
    for (escaped, decoded) in cases {
        let input = format!("\\{escaped:x} ");
        let tokenizer = lex(&input);
        let ident = tokenizer.tokens().get(0);
        assert_eq!(ident.kind(), TokenKind::Ident, "input {input:?}");
        assert_eq!(
            ident.string_value_code_points().unwrap(),
            &[decoded],
            "input {input:?}"
        );
    }
}

#[test]
fn origins_report_lines_and_columns() {
    let tokenizer = lex("a\n  #b\n@c");
    let origins: Vec<(TokenKind, u32, u32)> = tokenizer
        .tokens()
        .iter()
        .map(|t| (t.kind(), t.origin().line, t.origin().column))
        .collect();
    assert_eq!(
        origins,
        [
            (TokenKind::Ident, 1, 1),
            (TokenKind::Whitespace, 1, 2),
            (TokenKind::Hash, 2, 3),
            (TokenKind::Whitespace, 2, 5),
            (TokenKind::AtKeyword, 3, 1),
        ]
    );
}

#[test]
fn hash_flag_reflects_the_decoded_identifier() {
    let tokenizer = lex("#\\41 bc #9");
    let first = tokenizer.tokens().get(0);
    assert_eq!(first.hash_flag(), Some(HashFlag::Id));
    assert_eq!(first.string_value().unwrap(), "Abc");

    let last_index = tokenizer.tokens().len() - 1;
    let second = tokenizer.tokens().get(last_index);
    assert_eq!(second.hash_flag(), Some(HashFlag::Unrestricted));
    assert_eq!(second.string_value().unwrap(), "9");
}

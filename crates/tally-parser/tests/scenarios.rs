//! End-to-end checks of the analyser over scanned source text.

use tally_parser::{
    check_str, tokenize, Event, LexerAdapter, Nonterminal, ParseError, RecordingSink, Symbol,
    SyntaxAnalyser,
};

/// Helper to check a source string and keep the recorded events
fn check(source: &str) -> (Result<(), ParseError>, RecordingSink) {
    let mut sink = RecordingSink::new();
    let result = check_str(source, &mut sink);
    (result, sink)
}

fn assert_accepts(source: &str) -> RecordingSink {
    let (result, sink) = check(source);
    assert!(result.is_ok(), "Failed to accept {:?}: {:?}", source, result);
    assert!(sink.succeeded());
    assert_eq!(sink.open_productions(), Some(Vec::new()));
    assert!(!sink.events().iter().any(|e| matches!(e, Event::Error { .. })));
    sink
}

fn assert_rejects(source: &str) -> (ParseError, RecordingSink) {
    let (result, sink) = check(source);
    match result {
        Err(e) => {
            assert!(!sink.succeeded(), "{:?} reported success and an error", source);
            let open = sink.open_productions().expect("productions are nested");
            assert!(!open.is_empty() || e.depth() == 0);
            (e, sink)
        }
        Ok(()) => panic!("Expected {:?} to be rejected", source),
    }
}

#[test]
fn test_scenario_a_single_assignment() {
    let sink = assert_accepts("begin x := 1 end");
    assert_eq!(
        sink.trace_lines(),
        vec![
            "BEGIN StatementPart",
            "TOKEN begin on line 0",
            "BEGIN StatementList",
            "BEGIN Statement",
            "BEGIN AssignmentStatement",
            "TOKEN identifier 'x' on line 0",
            "TOKEN := on line 0",
            "BEGIN Expression",
            "BEGIN Term",
            "BEGIN Factor",
            "TOKEN numberConstant '1' on line 0",
            "END Factor",
            "END Term",
            "END Expression",
            "END AssignmentStatement",
            "END Statement",
            "END StatementList",
            "TOKEN end on line 0",
            "END StatementPart",
            "SUCCESS",
        ]
    );
}

#[test]
fn test_scenario_b_procedure_call() {
    let sink = assert_accepts("begin call p(a,b) end");
    let texts: Vec<&str> = sink.terminals().iter().map(|t| t.text()).collect();
    assert_eq!(texts, vec!["begin", "call", "p", "(", "a", ",", "b", ")", "end"]);
    assert!(sink.events().contains(&Event::Finish(Nonterminal::ArgumentList)));
}

#[test]
fn test_scenario_c_missing_expression() {
    let (err, _) = assert_rejects("begin x := end");
    let token = err.token().expect("grammatical error");
    assert_eq!(token.symbol(), Symbol::End);
    assert_eq!(err.line(), Some(1));
    assert_eq!(
        err.diagnostic(),
        "SYNTAX ERROR on line 1: Expected stringConstant, identifier, numberConstant, or ( in <AssignmentStatement> (Encountered token: end 'end')"
    );
}

#[test]
fn test_scenario_d_missing_closing_if() {
    let (err, sink) = assert_rejects("begin if x > 1 then y := 2 end");
    assert_eq!(err.message(), Some("Expected token if but found end-of-input"));
    assert_eq!(
        err.diagnostic(),
        "SYNTAX ERROR on line 1: Expected token if but found end-of-input (Encountered token: end-of-input '')"
    );
    assert_eq!(
        err.productions(),
        vec![
            Nonterminal::StatementPart,
            Nonterminal::StatementList,
            Nonterminal::Statement,
            Nonterminal::IfStatement,
        ]
    );
    assert_eq!(Some(err.productions()), sink.open_productions());
}

#[test]
fn test_scenario_e_trailing_semicolon() {
    let (err, _) = assert_rejects("begin x := 1; y := 2; end");
    assert_eq!(err.token().map(|t| t.symbol()), Some(Symbol::End));
    assert_eq!(
        err.message(),
        Some("Invalid start of <Statement>; expecting identifier, if, while, call, do, or for")
    );
    assert_eq!(err.productions().last(), Some(&Nonterminal::Statement));
}

#[test]
fn test_empty_statement_list_is_rejected() {
    let (err, _) = assert_rejects("begin end");
    assert_eq!(err.token().map(|t| t.symbol()), Some(Symbol::End));
    assert_eq!(err.depth(), 3);
}

#[test]
fn test_trailing_input_is_rejected() {
    let (err, sink) = assert_rejects("begin x := 1 end garbage");
    assert_eq!(err.depth(), 0);
    assert_eq!(err.message(), Some("Expected token end-of-input but found identifier"));
    assert_eq!(sink.open_productions(), Some(Vec::new()));
    assert!(sink.events().contains(&Event::Finish(Nonterminal::StatementPart)));
}

#[test]
fn test_every_statement_form() {
    let source = r#"
begin
    total := 0;
    name := "tally";
    if total >= 10 then
        call report(total, name)
    else
        total := total + 1
    end if;
    while total < 100 loop
        total := (total * 2) % 7 - total / 3
    end loop;
    do
        total := total - 1
    until total = 0;
    for (i := 0; i != 10; i := i + 1) do
        call tick(i)
    end loop
end
"#;
    let sink = assert_accepts(source);
    for nonterminal in Nonterminal::ALL {
        assert!(
            sink.events().contains(&Event::Commence(nonterminal)),
            "{} was never entered",
            nonterminal
        );
    }
}

#[test]
fn test_nested_statements() {
    assert_accepts(
        "begin if a = b then while c <= d loop do e := 1 until e > f end loop end if end",
    );
}

#[test]
fn test_condition_accepts_string_operand() {
    assert_accepts("begin if name = \"bob\" then x := 1 end if end");
}

#[test]
fn test_condition_rejects_expression_operand() {
    let (err, _) = assert_rejects("begin if a = b + 1 then x := 1 end if end");
    assert_eq!(err.message(), Some("Expected token then but found +"));
}

#[test]
fn test_call_requires_arguments() {
    let (err, _) = assert_rejects("begin call p() end");
    assert_eq!(err.productions().last(), Some(&Nonterminal::ArgumentList));
}

#[test]
fn test_diagnostic_reports_one_based_line() {
    let (err, _) = assert_rejects("begin\n  x := 1;\n  y := 2\n  z := 3\nend");
    assert_eq!(err.line(), Some(4));
    assert!(err.diagnostic().starts_with("SYNTAX ERROR on line 4: Expected token end but found identifier"));
}

#[test]
fn test_render_chain_lists_productions() {
    let (err, _) = assert_rejects("begin while x < 1 loop y := 2 end end");
    assert_eq!(
        err.render_chain(),
        "SYNTAX ERROR on line 1: Expected token loop but found end (Encountered token: end 'end')\n  \
         while parsing <WhileStatement>\n  \
         while parsing <Statement>\n  \
         while parsing <StatementList>\n  \
         while parsing <StatementPart>"
    );
}

#[test]
fn test_events_are_deterministic() -> Result<(), tally_parser::ScanError> {
    let tokens = tokenize("begin for (i := 0; i < n; i := i + 1) do call f(i) end loop end")?;

    let run = |tokens: Vec<tally_parser::Token>| {
        let mut analyser =
            SyntaxAnalyser::new(LexerAdapter::from_tokens(tokens), RecordingSink::new());
        let result = analyser.parse();
        (result.is_ok(), analyser.into_sink().into_events())
    };

    let first = run(tokens.clone());
    let second = run(tokens);
    assert!(first.0);
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_failed_parse_events_are_deterministic() {
    let (_, first) = check("begin x := (1 + 2; end");
    let (_, second) = check("begin x := (1 + 2; end");
    assert_eq!(first.events(), second.events());
}

#[test]
fn test_commence_finish_nesting_on_many_inputs() {
    let inputs = [
        "begin x := 1 end",
        "begin x := (a + (b * c)) end",
        "begin x := 1; end",
        "begin if x then y := 1 end if end",
        "begin for (i := 0; i < 3; i := i + 1) do x := i end for end",
        "begin call f(a, b, ) end",
        "begin do x := 1 until x end",
        "",
    ];
    for input in inputs {
        let (result, sink) = check(input);
        let open = sink
            .open_productions()
            .unwrap_or_else(|| panic!("events for {:?} are not stack-nested", input));
        assert_eq!(open.is_empty(), result.is_ok(), "{:?}", input);
    }
}

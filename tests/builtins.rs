/*
 * ==========================================================================
 * SWAZI - Lugha ya programu kwa Kiswahili
 * ==========================================================================
 *
 * Crate:    swazi (evaluator core)
 *
 * License:
 * This file is part of the Swazi programming language project.
 *
 * Swazi is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

mod common;

use common::{error_of, output_of};
use pretty_assertions::assert_eq;
use swazi::ast::build::*;
use swazi::ErrorKind;

#[test]
fn string_methods_chain() {
    let program = vec![
        var("s", string("  Habari Dunia ")),
        print(vec![method_call(method_call(ident("s"), "trim", vec![]), "upper", vec![])]),
        print(vec![method_call(method_call(ident("s"), "trim", vec![]), "split", vec![string(" ")])]),
        print(vec![member(string("héllo"), "urefu"), method_call(string("ab"), "repeat", vec![num(2.0)])]),
        print(vec![method_call(string("a1b22"), "replaceRegex", vec![string(r"\d+"), string("#")])]),
    ];
    assert_eq!(output_of(&program), "HABARI DUNIA\n[ \"Habari\", \"Dunia\" ]\n5 abab\na#b#\n");
}

#[test]
fn indexing_strings_and_arrays() {
    let program = vec![
        var("xs", array(vec![num(10.0), num(20.0)])),
        print(vec![
            index(ident("xs"), num(1.0)),
            index(ident("xs"), num(5.0)),
            index(string("swazi"), num(0.0)),
            optional_index(null(), num(0.0)),
        ]),
    ];
    assert_eq!(output_of(&program), "20 null s null\n");
}

#[test]
fn unknown_members_are_type_errors() {
    assert_eq!(error_of(&[print(vec![member(num(1.0), "nothing")])]).kind, ErrorKind::TypeError);
    assert_eq!(error_of(&[print(vec![member(null(), "x")])]).kind, ErrorKind::TypeError);
    assert_eq!(error_of(&[print(vec![index(null(), num(0.0))])]).kind, ErrorKind::TypeError);
}

#[test]
fn reflective_type_properties() {
    let program = vec![print(vec![
        member(num(1.0), "aina"),
        member(string("x"), "nineno"),
        member(array(vec![]), "niorodha"),
        member(null(), "ninull"),
        member(lambda(&[], vec![]), "nikazi"),
    ])];
    assert_eq!(output_of(&program), "namba kweli kweli kweli kweli\n");
}

#[test]
fn array_callbacks_run_through_the_evaluator() {
    let program = vec![
        var("xs", array(vec![num(1.0), num(2.0), num(3.0), num(4.0)])),
        print(vec![method_call(
            ident("xs"),
            "map",
            vec![lambda(&["x", "i"], vec![ret(mul(ident("x"), ident("i")))])],
        )]),
        print(vec![method_call(
            ident("xs"),
            "filter",
            vec![lambda(&["x"], vec![ret(eq(binary(swazi::ast::BinaryOp::Modulo, ident("x"), num(2.0)), num(0.0)))])],
        )]),
        print(vec![method_call(
            ident("xs"),
            "reduce",
            vec![lambda(&["acc", "x"], vec![ret(add(ident("acc"), ident("x")))]), num(0.0)],
        )]),
        print(vec![method_call(ident("xs"), "join", vec![string("-")]), method_call(ident("xs"), "includes", vec![num(3.0)])]),
    ];
    assert_eq!(output_of(&program), "[ 0, 2, 6, 12 ]\n[ 2, 4 ]\n10\n1-2-3-4 kweli\n");
}

#[test]
fn array_mutators() {
    let program = vec![
        var("xs", array(vec![num(3.0), num(1.0), num(2.0)])),
        print(vec![method_call(ident("xs"), "push", vec![num(0.0)]), method_call(ident("xs"), "shift", vec![])]),
        expr_stmt(method_call(ident("xs"), "sort", vec![])),
        print(vec![ident("xs"), member(ident("xs"), "urefu")]),
        print(vec![method_call(array(vec![]), "pop", vec![])]),
    ];
    assert_eq!(output_of(&program), "4 3\n[ 0, 1, 2 ] 3\nnull\n");
}

#[test]
fn reducing_an_empty_array_without_a_seed_fails() {
    let program = vec![print(vec![method_call(
        array(vec![]),
        "reduce",
        vec![lambda(&["a", "b"], vec![ret(ident("a"))])],
    )])];
    assert_eq!(error_of(&program).kind, ErrorKind::TypeError);
}

#[test]
fn number_methods() {
    let program = vec![print(vec![
        method_call(num(3.14159), "toFixed", vec![num(2.0)]),
        method_call(num(-2.5), "abs", vec![]),
        method_call(num(2.4), "ceil", vec![]),
    ])];
    assert_eq!(output_of(&program), "3.14 2.5 3\n");
}

#[test]
fn conversion_functions() {
    let program = vec![print(vec![
        call(ident("Namba"), vec![string("42")]),
        call(ident("Neno"), vec![boolean(true)]),
        call(ident("Bool"), vec![string("")]),
        call(ident("Orodha"), vec![num(1.0), num(2.0)]),
        call(ident("ainaya"), vec![object(vec![])]),
    ])];
    assert_eq!(output_of(&program), "42 kweli sikweli [ 1, 2 ] object\n");

    let bad = vec![print(vec![call(ident("Namba"), vec![string("abc")])])];
    assert_eq!(error_of(&bad).kind, ErrorKind::ValueError);
}

#[test]
fn json_of_an_instance_skips_methods_and_private_fields() {
    let program = vec![
        ClassBuilder::new("User")
            .property("name", string("Zawadi"))
            .private_property("token", string("t"))
            .method("greet", vec![], vec![ret(string("hi"))])
            .build(),
        print(vec![method_call(ident("json"), "stringify", vec![new_instance(ident("User"), vec![])])]),
    ];
    assert_eq!(output_of(&program), "{\"name\":\"Zawadi\"}\n");
}

#[test]
fn process_namespace_reports_the_version() {
    let program = vec![print(vec![member(member(ident("swazi"), "version"), "aina")])];
    assert_eq!(output_of(&program), "neno\n");
}

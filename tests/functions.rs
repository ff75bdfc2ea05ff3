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

use common::{error_of, output_of, run_with, test_config};
use pretty_assertions::assert_eq;
use swazi::ast::build::*;
use swazi::ast::{BinaryOp, Param, UpdateOp};
use swazi::ErrorKind;

fn arity_probe() -> swazi::ast::Stmt {
    func(
        "f",
        vec![Param::new("a"), Param::with_default("b", num(2.0)), Param::rest("rest")],
        vec![ret(array(vec![ident("a"), ident("b"), ident("rest")]))],
    )
}

#[test]
fn missing_required_argument_is_a_type_error() {
    let program = vec![arity_probe(), expr_stmt(call(ident("f"), vec![]))];
    let err = error_of(&program);
    assert_eq!(err.kind, ErrorKind::TypeError);
    assert!(err.message.contains("at least 1"), "{}", err.message);
}

#[test]
fn defaults_and_rest_collection() {
    let program = vec![
        arity_probe(),
        print(vec![call(ident("f"), vec![num(5.0)])]),
        print(vec![call(ident("f"), vec![num(5.0), num(6.0), num(7.0), num(8.0)])]),
    ];
    assert_eq!(output_of(&program), "[ 5, 2, [] ]\n[ 5, 6, [ 7, 8 ] ]\n");
}

#[test]
fn defaults_can_reference_earlier_parameters() {
    let program = vec![
        func(
            "area",
            vec![Param::new("w"), Param::with_default("h", ident("w"))],
            vec![ret(mul(ident("w"), ident("h")))],
        ),
        print(vec![call(ident("area"), vec![num(3.0)]), call(ident("area"), vec![num(3.0), num(4.0)])]),
    ];
    assert_eq!(output_of(&program), "9 12\n");
}

#[test]
fn exact_rest_takes_only_its_count() {
    let program = vec![
        func(
            "pair",
            vec![Param::rest_exact("two", 2), Param::with_default("tail", string("none"))],
            vec![ret(array(vec![ident("two"), ident("tail")]))],
        ),
        print(vec![call(ident("pair"), vec![num(1.0), num(2.0)])]),
        print(vec![call(ident("pair"), vec![num(1.0), num(2.0), num(3.0)])]),
        expr_stmt(call(ident("pair"), vec![num(1.0)])),
    ];
    let (result, output) = common::run(&program);
    assert_eq!(output, "[ [ 1, 2 ], \"none\" ]\n[ [ 1, 2 ], 3 ]\n");
    assert_eq!(result.unwrap_err().kind, ErrorKind::TypeError);
}

#[test]
fn closures_keep_their_defining_scope() {
    let program = vec![
        func(
            "counter",
            vec![],
            vec![
                var("n", num(0.0)),
                ret(lambda(&[], vec![expr_stmt(increment(ident("n"))), ret(ident("n"))])),
            ],
        ),
        var("next", call(ident("counter"), vec![])),
        var("other", call(ident("counter"), vec![])),
        expr_stmt(call(ident("next"), vec![])),
        expr_stmt(call(ident("next"), vec![])),
        print(vec![call(ident("next"), vec![]), call(ident("other"), vec![])]),
    ];
    assert_eq!(output_of(&program), "3 1\n");
}

#[test]
fn recursion() {
    let program = vec![
        func(
            "fib",
            vec![Param::new("n")],
            vec![
                if_(lt(ident("n"), num(2.0)), vec![ret(ident("n"))], None),
                ret(add(
                    call(ident("fib"), vec![sub(ident("n"), num(1.0))]),
                    call(ident("fib"), vec![sub(ident("n"), num(2.0))]),
                )),
            ],
        ),
        print(vec![call(ident("fib"), vec![num(10.0)])]),
    ];
    assert_eq!(output_of(&program), "55\n");
}

#[test]
fn runaway_recursion_hits_the_call_depth_limit() {
    let program = vec![
        func("down", vec![], vec![ret(call(ident("down"), vec![]))]),
        expr_stmt(call(ident("down"), vec![])),
    ];
    let (result, _) = run_with(test_config().with_max_call_depth(16), &program);
    assert_eq!(result.unwrap_err().kind, ErrorKind::RuntimeError);
}

#[test]
fn calling_a_non_function_is_a_type_error() {
    let program = vec![var("x", num(1.0)), expr_stmt(call(ident("x"), vec![]))];
    assert_eq!(error_of(&program).kind, ErrorKind::TypeError);
}

#[test]
fn undefined_identifier_is_a_reference_error() {
    let err = error_of(&[print(vec![ident("nowhere")])]);
    assert_eq!(err.kind, ErrorKind::ReferenceError);
    assert!(err.message.contains("nowhere"));
}

#[test]
fn optional_call_on_null_short_circuits() {
    let program = vec![
        var("maybe", null()),
        var("count", num(0.0)),
        print(vec![optional_call(ident("maybe"), vec![increment(ident("count"))]), ident("count")]),
    ];
    assert_eq!(output_of(&program), "null 0\n");
}

#[test]
fn spreading_a_string_passes_characters() {
    let program = vec![
        func(
            "join3",
            vec![Param::new("a"), Param::new("b"), Param::new("c")],
            vec![ret(add(add(ident("c"), ident("b")), ident("a")))],
        ),
        print(vec![call(ident("join3"), vec![spread(string("abc"))])]),
    ];
    assert_eq!(output_of(&program), "cba\n");
}

#[test]
fn equality_rules() {
    let program = vec![
        var("list", array(vec![num(1.0)])),
        print(vec![
            eq(num(1.0), string("1")),
            strict_eq(num(1.0), string("1")),
            eq(array(vec![num(1.0), num(2.0)]), array(vec![num(1.0), num(2.0)])),
            strict_eq(array(vec![num(1.0)]), array(vec![num(1.0)])),
            strict_eq(ident("list"), ident("list")),
            eq(null(), null()),
        ]),
    ];
    assert_eq!(output_of(&program), "kweli sikweli kweli sikweli kweli kweli\n");
}

#[test]
fn division_and_modulo_by_zero() {
    assert_eq!(error_of(&[print(vec![div(num(1.0), num(0.0))])]).kind, ErrorKind::DivisionByZero);
    let modulo = binary(BinaryOp::Modulo, num(5.0), num(0.0));
    assert_eq!(error_of(&[print(vec![modulo])]).kind, ErrorKind::ModuloByZero);
}

#[test]
fn arithmetic_and_concatenation() {
    let program = vec![print(vec![
        add(string("n="), num(2.5)),
        add(num(1.0), num(2.0)),
        binary(BinaryOp::Power, num(2.0), num(10.0)),
        binary(BinaryOp::Modulo, num(7.0), num(3.0)),
        add(array(vec![num(1.0)]), array(vec![num(2.0)])),
    ])];
    assert_eq!(output_of(&program), "n=2.5 3 1024 1 [ 1, 2 ]\n");
}

#[test]
fn compound_assignment() {
    let program = vec![
        var("n", num(10.0)),
        expr_stmt(add_assign(ident("n"), num(5.0))),
        expr_stmt(update(UpdateOp::SubtractAssign, ident("n"), Some(num(3.0)))),
        expr_stmt(update(UpdateOp::MultiplyAssign, ident("n"), Some(num(2.0)))),
        expr_stmt(update(UpdateOp::Decrement, ident("n"), None)),
        var("s", string("ab")),
        expr_stmt(add_assign(ident("s"), num(1.0))),
        print(vec![ident("n"), ident("s")]),
    ];
    assert_eq!(output_of(&program), "23 ab1\n");
}

#[test]
fn increment_of_a_string_is_a_type_error() {
    let program = vec![var("s", string("a")), expr_stmt(increment(ident("s")))];
    assert_eq!(error_of(&program).kind, ErrorKind::TypeError);
}

#[test]
fn template_literals_render_values() {
    let program = vec![
        var("name", string("Asha")),
        var("items", array(vec![num(1.0), num(2.0)])),
        print(vec![template(&["Habari ", ", una ", "!"], vec![ident("name"), ident("items")])]),
    ];
    assert_eq!(output_of(&program), "Habari Asha, una [ 1, 2 ]!\n");
}

#[test]
fn logical_operators_short_circuit() {
    let program = vec![
        var("hits", num(0.0)),
        func("touch", vec![], vec![expr_stmt(increment(ident("hits"))), ret(boolean(true))]),
        print(vec![
            binary(BinaryOp::And, boolean(false), call(ident("touch"), vec![])),
            binary(BinaryOp::Or, boolean(true), call(ident("touch"), vec![])),
            binary(BinaryOp::Or, num(0.0), call(ident("touch"), vec![])),
            ident("hits"),
        ]),
    ];
    assert_eq!(output_of(&program), "sikweli kweli kweli 1\n");
}

#[test]
fn ternary_and_unary() {
    let program = vec![print(vec![
        ternary(lt(num(1.0), num(2.0)), string("yes"), string("no")),
        not(string("")),
        neg(string("4")),
    ])];
    assert_eq!(output_of(&program), "yes kweli -4\n");
}

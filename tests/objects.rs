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
use swazi::ast::Param;
use swazi::ErrorKind;

fn account() -> swazi::ast::Stmt {
    var(
        "account",
        object(vec![
            prop("owner", string("Neema")),
            private_prop("pin", num(1234.0)),
            locked_prop("id", num(7.0)),
            method_prop("checkPin", vec![Param::new("guess")], vec![ret(eq(member(receiver(), "pin"), ident("guess")))]),
            method_prop("rename", vec![Param::new("id")], vec![assign(member(receiver(), "id"), ident("id"))]),
        ]),
    )
}

#[test]
fn private_properties_are_hidden_from_outside() {
    let program = vec![account(), print(vec![member(ident("account"), "pin")])];
    assert_eq!(error_of(&program).kind, ErrorKind::PermissionError);
}

#[test]
fn methods_see_private_properties_through_the_receiver() {
    let program = vec![
        account(),
        print(vec![
            method_call(ident("account"), "checkPin", vec![num(1234.0)]),
            method_call(ident("account"), "checkPin", vec![num(1.0)]),
        ]),
    ];
    assert_eq!(output_of(&program), "kweli sikweli\n");
}

#[test]
fn locked_properties_only_change_from_inside() {
    let program = vec![
        account(),
        expr_stmt(method_call(ident("account"), "rename", vec![num(9.0)])),
        print(vec![member(ident("account"), "id")]),
        assign(member(ident("account"), "id"), num(1.0)),
    ];
    let (result, output) = common::run(&program);
    assert_eq!(output, "9\n");
    assert_eq!(result.unwrap_err().kind, ErrorKind::PermissionError);
}

#[test]
fn readonly_values_and_getters() {
    let program = vec![
        var(
            "person",
            object(vec![
                prop("first", string("Ali")),
                prop("last", string("Said")),
                readonly_prop("kind", string("mtu")),
                getter_prop(
                    "full",
                    vec![ret(add(add(member(receiver(), "first"), string(" ")), member(receiver(), "last")))],
                ),
            ]),
        ),
        assign(member(ident("person"), "first"), string("Amina")),
        print(vec![member(ident("person"), "full"), member(ident("person"), "kind")]),
        assign(member(ident("person"), "kind"), string("other")),
    ];
    let (result, output) = common::run(&program);
    assert_eq!(output, "Amina Said mtu\n");
    assert_eq!(result.unwrap_err().kind, ErrorKind::PermissionError);
}

#[test]
fn frozen_objects_silently_ignore_writes() {
    let program = vec![
        var("o", object(vec![prop("a", num(1.0))])),
        expr_stmt(method_call(ident("Object"), "freeze", vec![ident("o")])),
        assign(member(ident("o"), "a"), num(2.0)),
        assign(member(ident("o"), "b"), num(3.0)),
        print(vec![member(ident("o"), "a"), member(ident("o"), "b")]),
        print(vec![method_call(ident("Object"), "isFrozen", vec![ident("o")])]),
    ];
    assert_eq!(output_of(&program), "1 null\nkweli\n");
}

#[test]
fn spread_and_computed_keys() {
    let program = vec![
        var("base", object(vec![prop("a", num(1.0)), prop("b", num(2.0))])),
        var("key", string("c")),
        var(
            "merged",
            object(vec![spread_into(ident("base")), prop("b", num(20.0)), computed_prop(ident("key"), num(3.0))]),
        ),
        print(vec![ident("merged"), ident("base")]),
    ];
    assert_eq!(output_of(&program), "{ a: 1, b: 20, c: 3 } { a: 1, b: 2 }\n");
}

#[test]
fn nested_containers_render_expanded() {
    let program = vec![print(vec![object(vec![
        prop("a", num(1.0)),
        prop("list", array(vec![num(1.0), num(2.0)])),
    ])])];
    assert_eq!(output_of(&program), "{\n  a: 1,\n  list: [ 1, 2 ]\n}\n");
}

#[test]
fn plain_function_properties_receive_the_object_when_called_as_methods() {
    let program = vec![
        var(
            "box",
            object(vec![
                prop("size", num(4.0)),
                prop("double", lambda(&[], vec![ret(mul(member(receiver(), "size"), num(2.0)))])),
            ]),
        ),
        print(vec![method_call(ident("box"), "double", vec![])]),
    ];
    assert_eq!(output_of(&program), "8\n");
}

#[test]
fn object_namespace_and_json() {
    let program = vec![
        var(
            "o",
            object(vec![
                prop("a", num(1.0)),
                private_prop("hidden", num(0.0)),
                prop("b", array(vec![boolean(true), null()])),
            ]),
        ),
        print(vec![method_call(ident("Object"), "keys", vec![ident("o")])]),
        print(vec![method_call(ident("json"), "stringify", vec![ident("o")])]),
        var("parsed", method_call(ident("json"), "parse", vec![string(r#"{"x":[1,2.5]}"#)])),
        print(vec![index(member(ident("parsed"), "x"), num(1.0))]),
    ];
    assert_eq!(output_of(&program), "[ \"a\", \"b\" ]\n{\"a\":1,\"b\":[true,null]}\n2.5\n");
}

#[test]
fn missing_properties_read_as_null() {
    let program = vec![var("o", object(vec![])), print(vec![member(ident("o"), "ghost"), optional_member(null(), "x")])];
    assert_eq!(output_of(&program), "null null\n");
}

#[test]
fn array_index_assignment() {
    let program = vec![
        var("xs", array(vec![num(1.0)])),
        assign(index(ident("xs"), num(3.0)), num(4.0)),
        print(vec![ident("xs")]),
        assign(index(ident("xs"), num(-1.0)), num(0.0)),
    ];
    let (result, output) = common::run(&program);
    assert_eq!(output, "[ 1, null, null, 4 ]\n");
    assert_eq!(result.unwrap_err().kind, ErrorKind::ValueError);
}

#[test]
fn oversized_index_writes_are_rejected() {
    let program = vec![
        var("xs", array(vec![])),
        assign(index(ident("xs"), num(1e19)), num(1.0)),
    ];
    let err = error_of(&program);
    assert_eq!(err.kind, ErrorKind::ValueError);
    assert!(err.message.contains("maximum array length"), "{}", err.message);
}

#[test]
fn self_containing_arrays_compare_without_recursing_forever() {
    let program = vec![
        var("a", array(vec![])),
        var("b", array(vec![])),
        expr_stmt(method_call(ident("a"), "push", vec![ident("a")])),
        expr_stmt(method_call(ident("b"), "push", vec![ident("b")])),
        print(vec![eq(ident("a"), ident("b"))]),
    ];
    assert_eq!(output_of(&program), "kweli\n");
}

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
use swazi::ast::{Param, Stmt};
use swazi::ErrorKind;

fn animal() -> Stmt {
    ClassBuilder::new("Animal")
        .property("legs", num(4.0))
        .method("sound", vec![], vec![ret(string("..."))])
        .method("describe", vec![], vec![ret(add(string("sauti: "), method_call(receiver(), "sound", vec![])))])
        .build()
}

fn dog() -> Stmt {
    ClassBuilder::new("Dog")
        .extends("Animal")
        .method("sound", vec![], vec![ret(string("woof"))])
        .method("both", vec![], vec![ret(add(super_method("sound", vec![]), method_call(receiver(), "sound", vec![])))])
        .build()
}

#[test]
fn subclasses_inherit_fields_and_override_methods() {
    let program = vec![
        animal(),
        dog(),
        var("d", new_instance(ident("Dog"), vec![])),
        print(vec![member(ident("d"), "legs"), method_call(ident("d"), "describe", vec![])]),
    ];
    assert_eq!(output_of(&program), "4 sauti: woof\n");
}

#[test]
fn explicit_super_constructor_chain() {
    let program = vec![
        ClassBuilder::new("A")
            .property("x", num(1.0))
            .constructor(vec![], vec![])
            .method("who", vec![], vec![ret(string("A"))])
            .build(),
        ClassBuilder::new("B")
            .extends("A")
            .constructor(vec![], vec![expr_stmt(super_call(vec![]))])
            .method("who", vec![], vec![ret(string("B"))])
            .build(),
        var("b", new_instance(ident("B"), vec![])),
        print(vec![eq(member(ident("b"), "x"), num(1.0)), method_call(ident("b"), "who", vec![])]),
    ];
    assert_eq!(output_of(&program), "kweli B\n");
}

#[test]
fn super_method_calls_the_parent_implementation() {
    let program = vec![
        animal(),
        dog(),
        print(vec![method_call(new_instance(ident("Dog"), vec![]), "both", vec![])]),
    ];
    assert_eq!(output_of(&program), "...woof\n");
}

#[test]
fn constructors_and_super_calls() {
    let program = vec![
        ClassBuilder::new("Point")
            .empty_property("x")
            .empty_property("y")
            .constructor(
                vec![Param::new("x"), Param::new("y")],
                vec![assign(member(receiver(), "x"), ident("x")), assign(member(receiver(), "y"), ident("y"))],
            )
            .method("sum", vec![], vec![ret(add(member(receiver(), "x"), member(receiver(), "y")))])
            .build(),
        ClassBuilder::new("Point3")
            .extends("Point")
            .empty_property("z")
            .constructor(
                vec![Param::new("x"), Param::new("y"), Param::new("z")],
                vec![
                    expr_stmt(super_call(vec![ident("x"), ident("y")])),
                    assign(member(receiver(), "z"), ident("z")),
                ],
            )
            .build(),
        var("p", new_instance(ident("Point"), vec![num(2.0), num(3.0)])),
        print(vec![ident("p"), method_call(ident("p"), "sum", vec![])]),
        var("q", new_instance(ident("Point3"), vec![num(1.0), num(2.0), num(3.0)])),
        print(vec![member(ident("q"), "x"), member(ident("q"), "z"), method_call(ident("q"), "sum", vec![])]),
    ];
    assert_eq!(output_of(&program), "Point { x: 2, y: 3, sum: [tabia sum] } 5\n1 3 3\n");
}

fn safe() -> Stmt {
    ClassBuilder::new("Safe")
        .private_property("code", num(42.0))
        .locked_property("serial", string("S-1"))
        .private_method("reveal", vec![], vec![ret(member(receiver(), "code"))])
        .method("open", vec![Param::new("guess")], vec![ret(eq(method_call(receiver(), "reveal", vec![]), ident("guess")))])
        .getter("label", vec![ret(add(string("safe "), member(receiver(), "serial")))])
        .build()
}

#[test]
fn private_members_are_reachable_only_from_methods() {
    let program = vec![
        safe(),
        var("s", new_instance(ident("Safe"), vec![])),
        print(vec![method_call(ident("s"), "open", vec![num(42.0)]), member(ident("s"), "label")]),
    ];
    assert_eq!(output_of(&program), "kweli safe S-1\n");

    for probe in [member(ident("s"), "code"), method_call(ident("s"), "reveal", vec![])] {
        let program = vec![safe(), var("s", new_instance(ident("Safe"), vec![])), print(vec![probe])];
        assert_eq!(error_of(&program).kind, ErrorKind::PermissionError);
    }
}

#[test]
fn locked_fields_and_getters_reject_outside_writes() {
    for target in ["serial", "label"] {
        let program = vec![
            safe(),
            var("s", new_instance(ident("Safe"), vec![])),
            assign(member(ident("s"), target), string("x")),
        ];
        assert_eq!(error_of(&program).kind, ErrorKind::PermissionError, "{}", target);
    }
}

fn counter() -> Stmt {
    ClassBuilder::new("Counter")
        .static_property("made", num(0.0))
        .private_static_property("secret", string("siri"))
        .static_method("bump", vec![], vec![expr_stmt(increment(member(receiver(), "made"))), ret(member(receiver(), "made"))])
        .method("peek", vec![], vec![ret(member(ident("Counter"), "secret"))])
        .build()
}

#[test]
fn static_members_live_on_the_class() {
    let program = vec![
        counter(),
        expr_stmt(method_call(ident("Counter"), "bump", vec![])),
        print(vec![method_call(ident("Counter"), "bump", vec![]), member(ident("Counter"), "made")]),
        print(vec![method_call(new_instance(ident("Counter"), vec![]), "peek", vec![])]),
    ];
    assert_eq!(output_of(&program), "2 2\nsiri\n");

    let outside = vec![counter(), print(vec![member(ident("Counter"), "secret")])];
    assert_eq!(error_of(&outside).kind, ErrorKind::PermissionError);
}

#[test]
fn delete_runs_the_destructor_and_empties_the_instance() {
    let program = vec![
        ClassBuilder::new("Temp")
            .property("v", num(1.0))
            .destructor(vec![], vec![print(vec![string("bye"), member(receiver(), "v")])])
            .build(),
        var("t", new_instance(ident("Temp"), vec![])),
        expr_stmt(delete(ident("t"), vec![])),
        print(vec![ident("t")]),
    ];
    assert_eq!(output_of(&program), "bye 1\n{}\n");
}

#[test]
fn iterating_the_receiver_skips_the_class_backlink() {
    let bag = ClassBuilder::new("Bag")
        .property("a", num(1.0))
        .private_property("b", num(2.0))
        .method(
            "list",
            vec![],
            vec![
                var("out", array(vec![])),
                for_in("k", None, receiver(), vec![expr_stmt(method_call(ident("out"), "push", vec![ident("k")]))]),
                ret(ident("out")),
            ],
        )
        .build();
    let program = vec![
        bag,
        var("g", new_instance(ident("Bag"), vec![])),
        print(vec![method_call(ident("g"), "list", vec![])]),
    ];
    assert_eq!(output_of(&program), "[ \"a\", \"b\", \"list\" ]\n");
}

#[test]
fn fields_initialise_base_first() {
    let program = vec![
        ClassBuilder::new("Base").property("a", num(1.0)).build(),
        ClassBuilder::new("Derived")
            .extends("Base")
            .property("b", add(member(receiver(), "a"), num(1.0)))
            .build(),
        print(vec![member(new_instance(ident("Derived"), vec![]), "b")]),
    ];
    assert_eq!(output_of(&program), "2\n");
}

#[test]
fn super_outside_a_constructor_is_a_syntax_error() {
    let program = vec![expr_stmt(super_call(vec![]))];
    assert_eq!(error_of(&program).kind, ErrorKind::SyntaxError);
}

#[test]
fn extending_a_non_class_is_a_type_error() {
    let program = vec![var("NotAClass", num(1.0)), ClassBuilder::new("C").extends("NotAClass").build()];
    assert_eq!(error_of(&program).kind, ErrorKind::TypeError);
}

#[test]
fn new_requires_a_class() {
    let program = vec![var("f", lambda(&[], vec![])), expr_stmt(new_instance(ident("f"), vec![]))];
    assert_eq!(error_of(&program).kind, ErrorKind::TypeError);
}

#[test]
fn classes_are_values() {
    let program = vec![
        animal(),
        print(vec![ident("Animal"), member(ident("Animal"), "aina"), member(new_instance(ident("Animal"), vec![]), "aina")]),
    ];
    assert_eq!(output_of(&program), "[muundo Animal] muundo object\n");
}

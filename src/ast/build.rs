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

//! Terse constructors for syntax trees.
//!
//! Hosts without a parser (embedders, tests) assemble programs with these.
//! Every node gets `Span::default()`; use `.at(span)` to place it.

use std::rc::Rc;

use crate::ast::{
    ArrayPatternElement, BinaryOp, ClassBody, ClassDecl, ClassMethod, ClassProperty, Expr,
    ExprKind, FunctionDecl, MethodFlags, ObjectMember, ObjectPatternProperty, Param, Pattern,
    PropertyKey, PropertyNode, Stmt, StmtKind, UnaryOp, UpdateOp,
};
use crate::span::Span;

fn expr(kind: ExprKind) -> Expr {
    Expr::new(kind, Span::default())
}

fn stmt(kind: StmtKind) -> Stmt {
    Stmt::new(kind, Span::default())
}

/* ============================================================================
 * Expressions
 * ============================================================================
 */

pub fn num(n: f64) -> Expr {
    expr(ExprKind::Number(n))
}

pub fn string(s: &str) -> Expr {
    expr(ExprKind::String(s.to_string()))
}

pub fn boolean(b: bool) -> Expr {
    expr(ExprKind::Bool(b))
}

pub fn null() -> Expr {
    expr(ExprKind::Null)
}

pub fn ident(name: &str) -> Expr {
    expr(ExprKind::Identifier(name.to_string()))
}

/// `$` / `this`
pub fn receiver() -> Expr {
    expr(ExprKind::Receiver)
}

pub fn template(quasis: &[&str], expressions: Vec<Expr>) -> Expr {
    expr(ExprKind::Template {
        quasis: quasis.iter().map(|q| q.to_string()).collect(),
        expressions,
    })
}

pub fn array(items: Vec<Expr>) -> Expr {
    expr(ExprKind::Array(items))
}

pub fn object(members: Vec<ObjectMember>) -> Expr {
    expr(ExprKind::Object(members))
}

fn property(key: &str, value: Expr) -> PropertyNode {
    PropertyNode {
        key: PropertyKey::Named(key.to_string()),
        value,
        is_private: false,
        is_readonly: false,
        is_locked: false,
        is_method: false,
        span: Span::default(),
    }
}

pub fn prop(key: &str, value: Expr) -> ObjectMember {
    ObjectMember::Property(property(key, value))
}

pub fn computed_prop(key: Expr, value: Expr) -> ObjectMember {
    ObjectMember::Property(PropertyNode {
        key: PropertyKey::Computed(key),
        ..property("", value)
    })
}

pub fn private_prop(key: &str, value: Expr) -> ObjectMember {
    ObjectMember::Property(PropertyNode {
        is_private: true,
        ..property(key, value)
    })
}

pub fn locked_prop(key: &str, value: Expr) -> ObjectMember {
    ObjectMember::Property(PropertyNode {
        is_locked: true,
        ..property(key, value)
    })
}

pub fn readonly_prop(key: &str, value: Expr) -> ObjectMember {
    ObjectMember::Property(PropertyNode {
        is_readonly: true,
        ..property(key, value)
    })
}

/// `tabia key(params) { body }` inside an object literal.
pub fn method_prop(key: &str, params: Vec<Param>, body: Vec<Stmt>) -> ObjectMember {
    ObjectMember::Property(PropertyNode {
        is_method: true,
        ..property(key, function(Some(key), params, body))
    })
}

/// Readonly method property, read through the getter convention.
pub fn getter_prop(key: &str, body: Vec<Stmt>) -> ObjectMember {
    ObjectMember::Property(PropertyNode {
        is_method: true,
        is_readonly: true,
        ..property(key, function(Some(key), vec![], body))
    })
}

pub fn spread_into(source: Expr) -> ObjectMember {
    ObjectMember::Spread(source)
}

pub fn spread(source: Expr) -> Expr {
    expr(ExprKind::Spread(Box::new(source)))
}

pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    expr(ExprKind::Unary {
        op,
        operand: Box::new(operand),
    })
}

pub fn not(operand: Expr) -> Expr {
    unary(UnaryOp::Not, operand)
}

pub fn neg(operand: Expr) -> Expr {
    unary(UnaryOp::Negate, operand)
}

pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    expr(ExprKind::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn add(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Add, left, right)
}

pub fn sub(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Subtract, left, right)
}

pub fn mul(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Multiply, left, right)
}

pub fn div(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Divide, left, right)
}

pub fn lt(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Less, left, right)
}

pub fn eq(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Equal, left, right)
}

pub fn strict_eq(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::StrictEqual, left, right)
}

pub fn update(op: UpdateOp, target: Expr, value: Option<Expr>) -> Expr {
    expr(ExprKind::Update {
        op,
        target: Box::new(target),
        value: value.map(Box::new),
    })
}

pub fn increment(target: Expr) -> Expr {
    update(UpdateOp::Increment, target, None)
}

pub fn add_assign(target: Expr, value: Expr) -> Expr {
    update(UpdateOp::AddAssign, target, Some(value))
}

pub fn ternary(condition: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
    expr(ExprKind::Ternary {
        condition: Box::new(condition),
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
    })
}

pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    expr(ExprKind::Call {
        callee: Box::new(callee),
        args,
        optional: false,
    })
}

/// `callee?.(args)`
pub fn optional_call(callee: Expr, args: Vec<Expr>) -> Expr {
    expr(ExprKind::Call {
        callee: Box::new(callee),
        args,
        optional: true,
    })
}

pub fn member(object: Expr, property: &str) -> Expr {
    expr(ExprKind::Member {
        object: Box::new(object),
        property: property.to_string(),
        optional: false,
    })
}

pub fn optional_member(object: Expr, property: &str) -> Expr {
    expr(ExprKind::Member {
        object: Box::new(object),
        property: property.to_string(),
        optional: true,
    })
}

pub fn index(object: Expr, index: Expr) -> Expr {
    expr(ExprKind::Index {
        object: Box::new(object),
        index: Box::new(index),
        optional: false,
    })
}

pub fn optional_index(object: Expr, index: Expr) -> Expr {
    expr(ExprKind::Index {
        object: Box::new(object),
        index: Box::new(index),
        optional: true,
    })
}

/// `object.name(args)`
pub fn method_call(object: Expr, name: &str, args: Vec<Expr>) -> Expr {
    call(member(object, name), args)
}

pub fn function_decl(name: Option<&str>, params: Vec<Param>, body: Vec<Stmt>) -> Rc<FunctionDecl> {
    Rc::new(FunctionDecl::new(
        name.map(str::to_string),
        params,
        body,
        Span::default(),
    ))
}

pub fn function(name: Option<&str>, params: Vec<Param>, body: Vec<Stmt>) -> Expr {
    expr(ExprKind::Function(function_decl(name, params, body)))
}

/// Anonymous function with single-name parameters.
pub fn lambda(params: &[&str], body: Vec<Stmt>) -> Expr {
    function(None, params.iter().map(|p| Param::new(*p)).collect(), body)
}

pub fn new_instance(class: Expr, args: Vec<Expr>) -> Expr {
    expr(ExprKind::New {
        class: Box::new(class),
        args,
    })
}

pub fn super_call(args: Vec<Expr>) -> Expr {
    expr(ExprKind::Super { method: None, args })
}

pub fn super_method(name: &str, args: Vec<Expr>) -> Expr {
    expr(ExprKind::Super {
        method: Some(name.to_string()),
        args,
    })
}

pub fn delete(target: Expr, args: Vec<Expr>) -> Expr {
    expr(ExprKind::Delete {
        target: Box::new(target),
        args,
    })
}

/* ============================================================================
 * Statements
 * ============================================================================
 */

pub fn expr_stmt(e: Expr) -> Stmt {
    stmt(StmtKind::Expression(e))
}

pub fn print(expressions: Vec<Expr>) -> Stmt {
    stmt(StmtKind::Print {
        expressions,
        newline: true,
    })
}

/// Print without the trailing newline.
pub fn print_inline(expressions: Vec<Expr>) -> Stmt {
    stmt(StmtKind::Print {
        expressions,
        newline: false,
    })
}

pub fn var(name: &str, value: Expr) -> Stmt {
    declare(Pattern::Identifier(name.to_string()), Some(value), false)
}

/// Declaration without initializer (value starts as null).
pub fn var_uninit(name: &str) -> Stmt {
    declare(Pattern::Identifier(name.to_string()), None, false)
}

pub fn constant(name: &str, value: Expr) -> Stmt {
    declare(Pattern::Identifier(name.to_string()), Some(value), true)
}

pub fn declare(target: Pattern, value: Option<Expr>, is_constant: bool) -> Stmt {
    stmt(StmtKind::VarDecl {
        target,
        value,
        is_constant,
    })
}

pub fn array_pattern(elements: &[&str]) -> Pattern {
    Pattern::Array(
        elements
            .iter()
            .map(|e| {
                if e.is_empty() {
                    ArrayPatternElement::Hole
                } else if let Some(rest) = e.strip_prefix("...") {
                    ArrayPatternElement::Rest(rest.to_string())
                } else {
                    ArrayPatternElement::Binding(e.to_string())
                }
            })
            .collect(),
    )
}

/// `{ key: target, ... }` pairs.
pub fn object_pattern(pairs: &[(&str, &str)]) -> Pattern {
    Pattern::Object(
        pairs
            .iter()
            .map(|(key, target)| ObjectPatternProperty {
                key: key.to_string(),
                target: target.to_string(),
            })
            .collect(),
    )
}

pub fn assign(target: Expr, value: Expr) -> Stmt {
    stmt(StmtKind::Assign { target, value })
}

pub fn ret(value: Expr) -> Stmt {
    stmt(StmtKind::Return(Some(value)))
}

pub fn ret_none() -> Stmt {
    stmt(StmtKind::Return(None))
}

pub fn block(body: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::Block(body))
}

pub fn if_(condition: Expr, then_branch: Vec<Stmt>, else_branch: Option<Vec<Stmt>>) -> Stmt {
    stmt(StmtKind::If {
        condition,
        then_branch,
        else_branch,
    })
}

pub fn for_(init: Option<Stmt>, condition: Option<Expr>, post: Option<Stmt>, body: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::For {
        init: init.map(Box::new),
        condition,
        post: post.map(Box::new),
        body,
    })
}

pub fn for_in(first: &str, second: Option<&str>, iterable: Expr, body: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::ForIn {
        first: first.to_string(),
        second: second.map(str::to_string),
        iterable,
        body,
    })
}

pub fn while_(condition: Expr, body: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::While { condition, body })
}

pub fn do_while(body: Vec<Stmt>, condition: Expr) -> Stmt {
    stmt(StmtKind::DoWhile { body, condition })
}

pub fn break_() -> Stmt {
    stmt(StmtKind::Break)
}

pub fn continue_() -> Stmt {
    stmt(StmtKind::Continue)
}

pub fn func(name: &str, params: Vec<Param>, body: Vec<Stmt>) -> Stmt {
    stmt(StmtKind::Function(function_decl(Some(name), params, body)))
}

/* ============================================================================
 * Classes
 * ============================================================================
 */

/// Incrementally assembles a class declaration statement.
#[derive(Debug, Clone)]
pub struct ClassBuilder {
    name: String,
    superclass: Option<String>,
    body: ClassBody,
}

impl ClassBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            superclass: None,
            body: ClassBody::default(),
        }
    }

    pub fn extends(mut self, superclass: &str) -> Self {
        self.superclass = Some(superclass.to_string());
        self
    }

    fn push_property(mut self, name: &str, value: Option<Expr>, is_private: bool, is_static: bool, is_locked: bool) -> Self {
        self.body.properties.push(ClassProperty {
            name: name.to_string(),
            value,
            is_private,
            is_static,
            is_locked,
            span: Span::default(),
        });
        self
    }

    pub fn property(self, name: &str, value: Expr) -> Self {
        self.push_property(name, Some(value), false, false, false)
    }

    /// Field declared without an initializer.
    pub fn empty_property(self, name: &str) -> Self {
        self.push_property(name, None, false, false, false)
    }

    pub fn private_property(self, name: &str, value: Expr) -> Self {
        self.push_property(name, Some(value), true, false, false)
    }

    pub fn locked_property(self, name: &str, value: Expr) -> Self {
        self.push_property(name, Some(value), false, false, true)
    }

    pub fn static_property(self, name: &str, value: Expr) -> Self {
        self.push_property(name, Some(value), false, true, false)
    }

    pub fn private_static_property(self, name: &str, value: Expr) -> Self {
        self.push_property(name, Some(value), true, true, false)
    }

    pub fn method_with(mut self, name: &str, params: Vec<Param>, body: Vec<Stmt>, flags: MethodFlags) -> Self {
        self.body.methods.push(ClassMethod {
            name: name.to_string(),
            function: function_decl(Some(name), params, body),
            flags,
            span: Span::default(),
        });
        self
    }

    pub fn method(self, name: &str, params: Vec<Param>, body: Vec<Stmt>) -> Self {
        self.method_with(name, params, body, MethodFlags::default())
    }

    pub fn private_method(self, name: &str, params: Vec<Param>, body: Vec<Stmt>) -> Self {
        let flags = MethodFlags {
            is_private: true,
            ..MethodFlags::default()
        };
        self.method_with(name, params, body, flags)
    }

    pub fn static_method(self, name: &str, params: Vec<Param>, body: Vec<Stmt>) -> Self {
        let flags = MethodFlags {
            is_static: true,
            ..MethodFlags::default()
        };
        self.method_with(name, params, body, flags)
    }

    pub fn getter(self, name: &str, body: Vec<Stmt>) -> Self {
        let flags = MethodFlags {
            is_getter: true,
            ..MethodFlags::default()
        };
        self.method_with(name, vec![], body, flags)
    }

    pub fn constructor(self, params: Vec<Param>, body: Vec<Stmt>) -> Self {
        let flags = MethodFlags {
            is_constructor: true,
            ..MethodFlags::default()
        };
        let name = self.name.clone();
        self.method_with(&name, params, body, flags)
    }

    pub fn destructor(self, params: Vec<Param>, body: Vec<Stmt>) -> Self {
        let flags = MethodFlags {
            is_destructor: true,
            ..MethodFlags::default()
        };
        let name = self.name.clone();
        self.method_with(&name, params, body, flags)
    }

    pub fn build_decl(self) -> Rc<ClassDecl> {
        Rc::new(ClassDecl {
            name: self.name,
            superclass: self.superclass,
            body: self.body,
            span: Span::default(),
        })
    }

    pub fn build(self) -> Stmt {
        stmt(StmtKind::Class(self.build_decl()))
    }
}

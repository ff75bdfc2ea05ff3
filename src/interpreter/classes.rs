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

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::ast::{ClassDecl, ClassMethod, Expr};
use crate::error::{EvalResult, SwaziError};
use crate::interpreter::display::CLASS_LINK;
use crate::interpreter::environment::{EnvRef, Environment, OWNER_CLASS, RECEIVER};
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::{ClassValue, FunctionValue, ObjectRef, ObjectValue, PropertyDescriptor, Value};

/// ==========================================================================
/// CLASS DECLARATION
/// ==========================================================================

impl Interpreter {
    /// Builds a `Value::Class` from its declaration and binds it in `env`.
    ///
    /// Static properties are initialised once, here, with the receiver
    /// bound to the class's static table. Static methods are installed on
    /// the same table.
    pub(crate) fn declare_class(&self, decl: &Rc<ClassDecl>, env: &EnvRef, span: Span) -> EvalResult<Rc<ClassValue>> {
        let superclass = match &decl.superclass {
            Some(name) => match env.borrow().get(name, span)?.value {
                Value::Class(class) => Some(class),
                other => {
                    return Err(SwaziError::type_error(
                        format!(
                            "Class '{}' cannot extend '{}', a value of type `{}`",
                            decl.name,
                            name,
                            other.type_name()
                        ),
                        span,
                    ))
                }
            },
            None => None,
        };

        let class = Rc::new(ClassValue {
            name: decl.name.clone(),
            superclass,
            decl: decl.clone(),
            static_table: Rc::new(RefCell::new(ObjectValue::new())),
            defining_env: env.clone(),
        });
        env.borrow_mut()
            .define_constant(decl.name.clone(), Value::Class(class.clone()));

        let static_receiver = Value::Object(class.static_table.clone());
        let static_env = self.receiver_scope(&class, static_receiver.clone());

        for property in decl.body.properties.iter().filter(|p| p.is_static) {
            let value = match &property.value {
                Some(expr) => self.eval_expr(expr, &static_env)?,
                None => Value::Null,
            };
            class.static_table.borrow_mut().insert(
                property.name.clone(),
                PropertyDescriptor {
                    value,
                    is_private: property.is_private,
                    is_readonly: false,
                    is_locked: property.is_locked,
                    span: property.span,
                },
            );
        }

        for method in decl.body.methods.iter().filter(|m| m.flags.is_static && m.is_plain()) {
            self.install_method(&class, method, static_receiver.clone(), &class.static_table);
        }

        debug!(class = %class.name, superclass = ?class.superclass.as_ref().map(|s| s.name.clone()), "declared class");
        Ok(class)
    }

    /// Child of the class's defining scope with the receiver and owning
    /// class bound.
    fn receiver_scope(&self, class: &Rc<ClassValue>, receiver: Value) -> EnvRef {
        let scope = Environment::child(&class.defining_env);
        {
            let mut scope = scope.borrow_mut();
            scope.define(RECEIVER, receiver);
            scope.define(OWNER_CLASS, Value::Class(class.clone()));
        }
        scope
    }

    /// Turns a declared method into a function closed over `receiver`.
    fn materialize_method(&self, class: &Rc<ClassValue>, method: &ClassMethod, receiver: Value) -> Value {
        let closure = self.receiver_scope(class, receiver);
        Value::Function(Rc::new(FunctionValue::user(method.function.clone(), closure)))
    }

    fn install_method(&self, class: &Rc<ClassValue>, method: &ClassMethod, receiver: Value, target: &ObjectRef) {
        let function = self.materialize_method(class, method, receiver);
        target.borrow_mut().insert(
            method.name.clone(),
            PropertyDescriptor {
                value: function,
                is_private: method.flags.is_private,
                is_readonly: method.flags.is_getter,
                is_locked: method.flags.is_locked,
                span: method.span,
            },
        );
    }

    /// ==========================================================================
    /// INSTANCE CONSTRUCTION
    /// ==========================================================================

    /// `new Class(args)` with already-evaluated arguments.
    pub fn construct(&self, class: &Rc<ClassValue>, args: Vec<Value>, env: &EnvRef, span: Span) -> EvalResult<Value> {
        let instance = self.instantiate(class)?;
        let receiver = Value::Object(instance);
        self.run_constructor(class, receiver.clone(), args, env, span)?;
        Ok(receiver)
    }

    /// `new` as an expression: arguments are evaluated in the caller's
    /// scope once fields and methods are in place.
    pub(crate) fn construct_from_exprs(
        &self,
        class: &Rc<ClassValue>,
        args: &[Expr],
        env: &EnvRef,
        span: Span,
    ) -> EvalResult<Value> {
        let instance = self.instantiate(class)?;
        let receiver = Value::Object(instance);
        if class.decl.body.constructor().is_some() {
            let args = self.eval_args(args, env)?;
            self.run_constructor(class, receiver.clone(), args, env, span)?;
        }
        Ok(receiver)
    }

    /// Allocates the instance, runs field initialisers base-first, then
    /// installs instance methods base-first so overrides win.
    fn instantiate(&self, class: &Rc<ClassValue>) -> EvalResult<ObjectRef> {
        debug!(class = %class.name, "constructing instance");

        let instance: ObjectRef = Rc::new(RefCell::new(ObjectValue::new()));
        instance.borrow_mut().insert(
            CLASS_LINK,
            PropertyDescriptor {
                is_private: true,
                ..PropertyDescriptor::public(Value::Class(class.clone()), class.decl.span)
            },
        );
        let receiver = Value::Object(instance.clone());
        let chain = class.chain_base_first();

        for owner in &chain {
            for property in owner.decl.body.properties.iter().filter(|p| !p.is_static) {
                let init_env = self.receiver_scope(owner, receiver.clone());
                let value = match &property.value {
                    Some(expr) => self.eval_expr(expr, &init_env)?,
                    None => Value::Null,
                };
                instance.borrow_mut().insert(
                    property.name.clone(),
                    PropertyDescriptor {
                        value,
                        is_private: property.is_private,
                        is_readonly: false,
                        is_locked: property.is_locked,
                        span: property.span,
                    },
                );
            }
        }

        for owner in &chain {
            for method in owner.decl.body.methods.iter().filter(|m| !m.flags.is_static && m.is_plain()) {
                self.install_method(owner, method, receiver.clone(), &instance);
            }
        }

        Ok(instance)
    }

    /// Runs the constructor declared directly on `class`, if any, with the
    /// class context set for nested `super(...)` calls.
    fn run_constructor(
        &self,
        class: &Rc<ClassValue>,
        receiver: Value,
        args: Vec<Value>,
        env: &EnvRef,
        span: Span,
    ) -> EvalResult<()> {
        let Some(constructor) = class.decl.body.constructor() else {
            return Ok(());
        };
        let function = self.materialize_method(class, constructor, receiver.clone());

        let previous = self.class_context.replace(Some(class.clone()));
        let result = self.call_function_with_receiver(&function, receiver, args, env, span);
        *self.class_context.borrow_mut() = previous;

        result.map(|_| ())
    }

    /// ==========================================================================
    /// SUPER
    /// ==========================================================================

    /// `super(args)`: runs the immediate superclass constructor against the
    /// current receiver.
    pub(crate) fn call_super_constructor(&self, args: &[Expr], env: &EnvRef, span: Span) -> EvalResult<Value> {
        let context = self.class_context.borrow().clone().ok_or_else(|| {
            SwaziError::syntax_error("'super(...)' can only be used inside a constructor", span)
        })?;
        let parent = context.superclass.clone().ok_or_else(|| {
            SwaziError::type_error(format!("Class '{}' has no superclass", context.name), span)
        })?;
        let receiver = self.current_receiver(env, span)?;
        let args = self.eval_args(args, env)?;

        self.run_constructor(&parent, receiver, args, env, span)?;
        Ok(Value::Null)
    }

    /// `super.name(args)`: calls the nearest inherited `name` above the
    /// class that owns the running method.
    pub(crate) fn call_super_method(&self, name: &str, args: &[Expr], env: &EnvRef, span: Span) -> EvalResult<Value> {
        let owner = match env.borrow().lookup(OWNER_CLASS).map(|v| v.value) {
            Some(Value::Class(class)) => Some(class),
            _ => None,
        };
        let owner = owner
            .or_else(|| self.class_context.borrow().clone())
            .ok_or_else(|| SwaziError::syntax_error("'super' can only be used inside a class", span))?;

        let parent = owner.superclass.clone().ok_or_else(|| {
            SwaziError::type_error(format!("Class '{}' has no superclass", owner.name), span)
        })?;
        let (defining, method) = parent.find_method(name).ok_or_else(|| {
            SwaziError::type_error(format!("Superclass of '{}' has no method '{}'", owner.name, name), span)
        })?;

        let receiver = self.current_receiver(env, span)?;
        let args = self.eval_args(args, env)?;
        let function = self.materialize_method(&defining, &method, receiver.clone());
        self.call_function_with_receiver(&function, receiver, args, env, span)
    }

    pub(crate) fn current_receiver(&self, env: &EnvRef, span: Span) -> EvalResult<Value> {
        env.borrow()
            .lookup(RECEIVER)
            .map(|v| v.value)
            .ok_or_else(|| SwaziError::reference_error("No receiver ('$' / this) is bound here", span))
    }

    /// ==========================================================================
    /// DELETE
    /// ==========================================================================

    /// Runs the destructor of the instance's own class (no inheritance),
    /// then clears every property. Frozen objects are cleared too.
    pub fn delete_instance(&self, target: &Value, args: Vec<Value>, env: &EnvRef, span: Span) -> EvalResult<Value> {
        let Value::Object(object) = target else {
            return Err(SwaziError::type_error(
                format!("Cannot delete a value of type `{}`", target.type_name()),
                span,
            ));
        };

        let class = match object.borrow().raw_get(CLASS_LINK) {
            Some(Value::Class(class)) => Some(class),
            _ => None,
        };

        if let Some(class) = class {
            if let Some(destructor) = class.decl.body.destructor() {
                let function = self.materialize_method(&class, destructor, target.clone());
                self.call_function_with_receiver(&function, target.clone(), args, env, span)?;
            }
        }

        object.borrow_mut().clear();
        Ok(Value::Null)
    }
}

//! Lowering of collected declarations into Go methods.

use std::collections::BTreeSet;

use valgen_ir::{
    Check, Enumeration, Failure, Field, FileInfo, Operand, Record, ScalarKind, TypeShape,
};

use crate::ast::{Expr, Func, GoFile, Receiver, SimpleStmt, Stmt};

const ERRORS: &str = "errors";
const FMT: &str = "fmt";

/// Lower every declaration of `info` into a Go file.
///
/// Enumerations come first, then records, each group in declaration order.
pub fn lower(info: &FileInfo, header: &str) -> GoFile {
    let mut lowering = Lowering::default();

    let mut funcs: Vec<Func> = info
        .enumerations()
        .map(|(name, enumeration)| lowering.enumeration(name, enumeration))
        .collect();
    funcs.extend(
        info.records()
            .map(|(name, record)| lowering.record(name, record)),
    );

    GoFile {
        header: header.to_string(),
        package: info.package.clone(),
        imports: lowering.imports.into_iter().map(str::to_string).collect(),
        funcs,
    }
}

#[derive(Default)]
struct Lowering {
    imports: BTreeSet<&'static str>,
}

impl Lowering {
    fn use_import(&mut self, path: &'static str) {
        self.imports.insert(path);
    }

    fn enumeration(&mut self, name: &str, enumeration: &Enumeration) -> Func {
        self.use_import(FMT);

        let verb = match enumeration.base {
            ScalarKind::Text => "%s",
            ScalarKind::Integer => "%d",
            ScalarKind::Float => "%v",
        };
        let set = Expr::Set {
            key_type: enumeration.underlying.clone(),
            keys: enumeration
                .allowed
                .iter()
                .map(|literal| literal.spelling().to_string())
                .collect(),
        };
        let converted = Expr::call(Expr::ident(&enumeration.underlying), vec![receiver()]);
        let message = format!("invalid value for {}: {}", name, verb);

        let body = vec![
            Stmt::define(&["valid"], set),
            Stmt::if_init(
                SimpleStmt::Define(
                    vec!["_".to_string(), "ok".to_string()],
                    Expr::ident("valid").index(converted),
                ),
                Expr::ident("ok").not(),
                vec![Stmt::Return(errorf(vec![Expr::str(message), receiver()]))],
            ),
            Stmt::Return(Expr::nil()),
        ];
        Func::validate(Receiver::value(name), body)
    }

    fn record(&mut self, name: &str, record: &Record) -> Func {
        let mut checks = Vec::new();
        for field in &record.fields {
            checks.extend(self.rule_checks(field));
            if field.nested {
                let access = receiver().field(&field.name);
                checks.extend(self.nested(access, &field.shape, Path::new(&field.name), 0));
            }
        }
        // rules with no bounds set render nothing
        if checks.is_empty() {
            return Func::validate(Receiver::pointer(name), vec![Stmt::Return(Expr::nil())]);
        }
        self.use_import(ERRORS);

        let mut body = Vec::with_capacity(checks.len() + 2);
        body.push(Stmt::Var {
            name: "errs".to_string(),
            ty: "error".to_string(),
        });
        body.extend(checks);
        body.push(Stmt::Return(Expr::ident("errs")));

        tracing::trace!(record = name, statements = body.len(), "lowered record");
        Func::validate(Receiver::pointer(name), body)
    }

    /// Rule checks of one field, guarded by a nil check per optional layer.
    fn rule_checks(&mut self, field: &Field) -> Vec<Stmt> {
        if field.rules.is_empty() {
            return Vec::new();
        }

        let (depth, _) = field.shape.peel_optional();
        let mut access = receiver().field(&field.name);
        let mut guards = Vec::with_capacity(depth);
        for _ in 0..depth {
            guards.push(access.clone().not_nil());
            access = access.deref();
        }

        let access = access.to_string();
        let checks: Vec<Stmt> = field
            .rules
            .iter()
            .flat_map(|rule| rule.render(&field.name, &access))
            .map(|check| self.check(&check))
            .collect();

        match guards.into_iter().reduce(|lhs, rhs| lhs.binary("&&", rhs)) {
            Some(guard) if !checks.is_empty() => vec![Stmt::if_(guard, checks)],
            _ => checks,
        }
    }

    fn check(&mut self, check: &Check) -> Stmt {
        let operand = operand(&check.condition.operand);
        let cond = operand
            .clone()
            .binary(check.condition.op.symbol(), Expr::raw(check.condition.bound.to_string()));
        let failure = self.failure(&check.failure, &check.condition.operand, operand);
        Stmt::if_(cond, vec![join(failure)])
    }

    fn failure(&mut self, failure: &Failure, operand: &Operand, actual: Expr) -> Expr {
        let message = match &failure.code {
            Some(code) => format!("[{}] {}", code, failure.message),
            None => failure.message.clone(),
        };

        if !failure.report_actual {
            return Expr::call(Expr::ident(ERRORS).field("New"), vec![Expr::str(message)]);
        }
        self.use_import(FMT);
        let verb = match operand {
            Operand::Len(_) => "%d",
            Operand::Value(_) => "%v",
        };
        let format = format!("{}, got {}", message.replace('%', "%%"), verb);
        errorf(vec![Expr::str(format), actual])
    }

    /// Recursive `Validate()` calls for a nested field.
    fn nested(&mut self, access: Expr, shape: &TypeShape, path: Path, depth: usize) -> Vec<Stmt> {
        match shape {
            TypeShape::Direct(_) => vec![self.validate_call(access, &path)],
            // a pointer to a validated type carries the method itself
            TypeShape::Optional(inner) if matches!(**inner, TypeShape::Direct(_)) => {
                let call = self.validate_call(access.clone(), &path);
                vec![Stmt::if_(access.not_nil(), vec![call])]
            }
            TypeShape::Optional(inner) => {
                let body = self.nested(access.clone().deref(), inner, path, depth);
                if body.is_empty() {
                    return body;
                }
                vec![Stmt::if_(access.not_nil(), body)]
            }
            TypeShape::Sequence(inner) => {
                let (index, item) = (suffixed("i", depth), suffixed("item", depth));
                let body = self.nested(
                    Expr::ident(&item),
                    inner,
                    path.element("[%d]", &index),
                    depth + 1,
                );
                vec![Stmt::Range {
                    key: index,
                    value: item,
                    over: access,
                    body,
                }]
            }
            TypeShape::Mapping(inner) => {
                let (key, value) = (suffixed("k", depth), suffixed("value", depth));
                let body = self.nested(
                    Expr::ident(&value),
                    inner,
                    path.element("[%v]", &key),
                    depth + 1,
                );
                vec![Stmt::Range {
                    key,
                    value,
                    over: access,
                    body,
                }]
            }
        }
    }

    /// `if err := x.Validate(); err != nil { errs = errors.Join(errs, fmt.Errorf("path: %w", ..., err)) }`
    fn validate_call(&mut self, target: Expr, path: &Path) -> Stmt {
        self.use_import(FMT);
        let mut args = vec![Expr::str(format!("{}: %w", path.format))];
        args.extend(path.args.iter().map(|arg| Expr::ident(arg.as_str())));
        args.push(Expr::ident("err"));

        Stmt::if_init(
            SimpleStmt::Define(vec!["err".to_string()], target.method("Validate", vec![])),
            Expr::ident("err").not_nil(),
            vec![join(errorf(args))],
        )
    }
}

/// Format string and arguments naming the value being validated.
#[derive(Debug, Clone)]
struct Path {
    format: String,
    args: Vec<String>,
}

impl Path {
    fn new(field: &str) -> Self {
        Self {
            format: field.to_string(),
            args: Vec::new(),
        }
    }

    fn element(&self, verb: &str, arg: &str) -> Self {
        let mut args = self.args.clone();
        args.push(arg.to_string());
        Self {
            format: format!("{}{}", self.format, verb),
            args,
        }
    }
}

fn receiver() -> Expr {
    Expr::ident("r")
}

fn operand(operand: &Operand) -> Expr {
    match operand {
        Operand::Len(access) => Expr::call(Expr::ident("len"), vec![Expr::raw(access)]),
        Operand::Value(access) => Expr::raw(access),
    }
}

fn errorf(args: Vec<Expr>) -> Expr {
    Expr::call(Expr::ident(FMT).field("Errorf"), args)
}

/// `errs = errors.Join(errs, err)`
fn join(err: Expr) -> Stmt {
    let errs = Expr::ident("errs");
    Stmt::assign(
        errs.clone(),
        Expr::call(Expr::ident(ERRORS).field("Join"), vec![errs, err]),
    )
}

fn suffixed(name: &str, depth: usize) -> String {
    match depth {
        0 => name.to_string(),
        n => format!("{}{}", name, n),
    }
}

//! Tests for the visitor traits: default recursion, pruning, error
//! propagation and in-place rewriting.

mod common;
use common::*;

use std::convert::Infallible;

use pgsql_ast::ast::{
    BinaryExpr, DataType, Expr, ExprRef, Literal, LiteralValue, QName, SelectStatement, Statement,
    TableRef, UnaryExpr, UnaryOp,
};
use pgsql_ast::visitor::{walk_select, walk_unary};
use pgsql_ast::{Visit, VisitMut, Visitor, VisitorMut};

/// Collects the name of every `ref` node.
#[derive(Default)]
struct RefNames(Vec<String>);

impl Visitor for RefNames {
    type Error = Infallible;

    fn visit_ref(&mut self, reference: &ExprRef) -> Result<(), Infallible> {
        self.0.push(reference.name.clone());
        Ok(())
    }
}

/// Implements nothing.
struct Nothing;

impl Visitor for Nothing {
    type Error = Infallible;
}

// ===================================================================
// Default recursion
// ===================================================================

#[test]
fn visits_ref_when_implemented() {
    let expr = Expr::unary(UnaryOp::Not, Expr::reference("x"));
    let mut names = RefNames::default();
    expr.visit(&mut names).unwrap();
    assert_eq!(names.0, ["x"]);
}

#[test]
fn does_not_visit_ref_when_not_implemented() {
    let expr = Expr::unary(UnaryOp::Not, Expr::reference("x"));
    assert!(expr.visit(&mut Nothing).is_ok());
}

#[test]
fn unhandled_ancestors_do_not_block_descendants() {
    let stmt = parse(
        "SELECT lower(a.name) FROM t JOIN u ON t.id = u.tid \
         WHERE b BETWEEN c AND d AND e NOT IN (SELECT f FROM g WHERE h) \
         ORDER BY CASE WHEN i THEN CAST(j AS text) ELSE k::int END",
    );
    let mut names = RefNames::default();
    stmt.visit(&mut names).unwrap();
    assert_eq!(
        names.0,
        ["name", "id", "tid", "b", "c", "d", "e", "f", "h", "i", "j", "k"]
    );
}

#[test]
fn visits_each_node_once() {
    #[derive(Default)]
    struct Count {
        exprs: usize,
        refs: usize,
    }

    impl Visitor for Count {
        type Error = Infallible;

        fn visit_expr(&mut self, expr: &Expr) -> Result<(), Infallible> {
            self.exprs += 1;
            pgsql_ast::visitor::walk_expr(self, expr)
        }

        fn visit_ref(&mut self, _reference: &ExprRef) -> Result<(), Infallible> {
            self.refs += 1;
            Ok(())
        }
    }

    // a, b, 1, (b + 1), (a = b + 1)
    let expr = parse_expr("a = b + 1");
    let mut count = Count::default();
    expr.visit(&mut count).unwrap();
    assert_eq!(count.exprs, 5);
    assert_eq!(count.refs, 2);
}

#[test]
fn visits_statement_lists() {
    let stmts = parse_all("DELETE FROM t WHERE a; UPDATE t SET x = b RETURNING c");
    let mut names = RefNames::default();
    stmts.visit(&mut names).unwrap();
    assert_eq!(names.0, ["a", "b", "c"]);
}

#[test]
fn visits_sequence_data_types() {
    #[derive(Default)]
    struct Types(Vec<DataType>);

    impl Visitor for Types {
        type Error = Infallible;

        fn visit_data_type(&mut self, data_type: &DataType) -> Result<(), Infallible> {
            self.0.push(data_type.clone());
            Ok(())
        }
    }

    let mut types = Types::default();
    for sql in [
        "CREATE SEQUENCE s AS bigint",
        "ALTER SEQUENCE s AS integer CACHE 2",
        "DROP SEQUENCE s",
        "SELECT x::smallint",
    ] {
        parse(sql).visit(&mut types).unwrap();
    }
    assert_eq!(
        types.0,
        [
            DataType::new("bigint"),
            DataType::new("integer"),
            DataType::new("smallint"),
        ]
    );
}

// ===================================================================
// Handlers control their subtree
// ===================================================================

#[test]
fn handler_without_walk_prunes_subtree() {
    /// Collects refs, but never looks inside subqueries.
    #[derive(Default)]
    struct TopLevel(RefNames, usize);

    impl Visitor for TopLevel {
        type Error = Infallible;

        fn visit_select(&mut self, select: &SelectStatement) -> Result<(), Infallible> {
            self.1 += 1;
            if self.1 == 1 {
                walk_select(self, select)
            } else {
                Ok(())
            }
        }

        fn visit_ref(&mut self, reference: &ExprRef) -> Result<(), Infallible> {
            self.0.visit_ref(reference)
        }
    }

    let stmt = parse("SELECT a FROM t WHERE b IN (SELECT c FROM u)");
    let mut top = TopLevel::default();
    stmt.visit(&mut top).unwrap();
    assert_eq!(top.0 .0, ["a", "b"]);
    assert_eq!(top.1, 2);
}

#[test]
fn handler_can_recurse_manually() {
    /// Records the depth of NOT nesting at every ref.
    #[derive(Default)]
    struct NotDepth {
        depth: usize,
        seen: Vec<(String, usize)>,
    }

    impl Visitor for NotDepth {
        type Error = Infallible;

        fn visit_unary(&mut self, unary: &UnaryExpr) -> Result<(), Infallible> {
            let is_not = unary.op == UnaryOp::Not;
            if is_not {
                self.depth += 1;
            }
            walk_unary(self, unary)?;
            if is_not {
                self.depth -= 1;
            }
            Ok(())
        }

        fn visit_ref(&mut self, reference: &ExprRef) -> Result<(), Infallible> {
            self.seen.push((reference.name.clone(), self.depth));
            Ok(())
        }
    }

    let mut v = NotDepth::default();
    parse_expr("NOT (a AND NOT b) OR c").visit(&mut v).unwrap();
    assert_eq!(
        v.seen,
        [
            (String::from("a"), 1),
            (String::from("b"), 2),
            (String::from("c"), 0),
        ]
    );
}

// ===================================================================
// Errors
// ===================================================================

#[test]
fn handler_error_aborts_traversal() {
    #[derive(Debug, PartialEq)]
    struct Forbidden(String);

    struct Deny {
        forbidden: &'static str,
        visited: Vec<String>,
    }

    impl Visitor for Deny {
        type Error = Forbidden;

        fn visit_ref(&mut self, reference: &ExprRef) -> Result<(), Forbidden> {
            if reference.name == self.forbidden {
                return Err(Forbidden(reference.name.clone()));
            }
            self.visited.push(reference.name.clone());
            Ok(())
        }
    }

    let stmt = parse("SELECT a, secret, b FROM t WHERE c");
    let mut deny = Deny {
        forbidden: "secret",
        visited: vec![],
    };
    assert_eq!(
        stmt.visit(&mut deny),
        Err(Forbidden(String::from("secret")))
    );
    assert_eq!(deny.visited, ["a"]);
}

// ===================================================================
// Mutable visitor
// ===================================================================

#[test]
fn rename_table_everywhere() {
    struct RenameTable {
        from: &'static str,
        to: &'static str,
    }

    impl RenameTable {
        fn rename(&self, name: &mut QName) {
            if name.name == self.from {
                name.name = String::from(self.to);
            }
        }
    }

    impl VisitorMut for RenameTable {
        type Error = Infallible;

        fn visit_table_ref_mut(&mut self, table_ref: &mut TableRef) -> Result<(), Infallible> {
            if let TableRef::Table { table, .. } = table_ref {
                self.rename(table);
            }
            pgsql_ast::visitor::walk_table_ref_mut(self, table_ref)
        }

        fn visit_ref_mut(&mut self, reference: &mut ExprRef) -> Result<(), Infallible> {
            if let Some(table) = &mut reference.table {
                self.rename(table);
            }
            Ok(())
        }
    }

    let mut stmt = parse("SELECT old.a FROM old JOIN x ON x.id = old.id");
    stmt.visit_mut(&mut RenameTable {
        from: "old",
        to: "new",
    })
    .unwrap();
    assert_eq!(stmt, parse("SELECT new.a FROM new JOIN x ON x.id = new.id"));
}

#[test]
fn fold_constant_negation() {
    struct FoldNot;

    impl VisitorMut for FoldNot {
        type Error = Infallible;

        fn visit_expr_mut(&mut self, expr: &mut Expr) -> Result<(), Infallible> {
            pgsql_ast::visitor::walk_expr_mut(self, expr)?;
            let folded = match expr {
                Expr::Unary(UnaryExpr {
                    op: UnaryOp::Not,
                    operand,
                }) => match operand.as_ref() {
                    Expr::Literal(Literal {
                        value: LiteralValue::Boolean(b),
                    }) => Some(!b),
                    _ => None,
                },
                _ => None,
            };
            if let Some(value) = folded {
                *expr = Expr::boolean(value);
            }
            Ok(())
        }
    }

    let mut stmt = parse("SELECT * FROM t WHERE NOT NOT TRUE AND NOT FALSE");
    stmt.visit_mut(&mut FoldNot).unwrap();
    let Statement::Select(select) = stmt else {
        panic!("expected select");
    };
    assert!(matches!(
        select.where_clause,
        Some(Expr::Binary(BinaryExpr { ref left, ref right, .. }))
            if **left == Expr::boolean(true) && **right == Expr::boolean(true)
    ));
}

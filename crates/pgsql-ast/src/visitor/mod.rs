//! AST visitor infrastructure.
//!
//! Two visitor traits and their walk functions:
//!
//! - [`Visitor`]: read-only traversal, for analysis and collection passes
//! - [`VisitorMut`]: mutable traversal, for in-place rewriting passes
//!
//! Implement a trait overriding only the node kinds you care about. Every
//! other kind falls back to its `walk_*` function, which visits the node's
//! children in declaration order, so a handler deep in the tree fires even
//! when none of its ancestors are handled.
//!
//! ```
//! use std::convert::Infallible;
//!
//! use pgsql_ast::ast::ExprRef;
//! use pgsql_ast::parser::parse_statement;
//! use pgsql_ast::visitor::{Visit, Visitor};
//!
//! #[derive(Default)]
//! struct Refs(Vec<String>);
//!
//! impl Visitor for Refs {
//!     type Error = Infallible;
//!
//!     fn visit_ref(&mut self, reference: &ExprRef) -> Result<(), Infallible> {
//!         self.0.push(reference.name.clone());
//!         Ok(())
//!     }
//! }
//!
//! let stmt = parse_statement("SELECT a FROM t WHERE NOT b").unwrap();
//! let mut refs = Refs::default();
//! stmt.visit(&mut refs).unwrap();
//! assert_eq!(refs.0, ["a", "b"]);
//! ```

mod visit;
mod visit_mut;

pub use visit::{
    walk_alter_sequence, walk_binary, walk_call, walk_case, walk_cast, walk_create_sequence,
    walk_delete, walk_expr, walk_in_list, walk_insert, walk_select, walk_statement,
    walk_table_ref, walk_ternary, walk_unary, walk_update, Visitor,
};
pub use visit_mut::{
    walk_alter_sequence_mut, walk_binary_mut, walk_call_mut, walk_case_mut, walk_cast_mut,
    walk_create_sequence_mut, walk_delete_mut, walk_expr_mut, walk_in_list_mut, walk_insert_mut,
    walk_select_mut, walk_statement_mut, walk_table_ref_mut, walk_ternary_mut, walk_unary_mut,
    walk_update_mut, VisitorMut,
};

use crate::ast::{Expr, Statement};

/// A node that can be handed to a [`Visitor`].
pub trait Visit {
    /// Visits `self` with `visitor`.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by a handler.
    fn visit<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error>;
}

/// A node that can be handed to a [`VisitorMut`].
pub trait VisitMut {
    /// Visits `self` with `visitor`, allowing it to rewrite the node.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by a handler.
    fn visit_mut<V: VisitorMut + ?Sized>(&mut self, visitor: &mut V) -> Result<(), V::Error>;
}

impl Visit for Statement {
    fn visit<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        visitor.visit_statement(self)
    }
}

impl Visit for Expr {
    fn visit<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        visitor.visit_expr(self)
    }
}

impl<T: Visit> Visit for [T] {
    fn visit<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        for node in self {
            node.visit(visitor)?;
        }
        Ok(())
    }
}

impl VisitMut for Statement {
    fn visit_mut<V: VisitorMut + ?Sized>(&mut self, visitor: &mut V) -> Result<(), V::Error> {
        visitor.visit_statement_mut(self)
    }
}

impl VisitMut for Expr {
    fn visit_mut<V: VisitorMut + ?Sized>(&mut self, visitor: &mut V) -> Result<(), V::Error> {
        visitor.visit_expr_mut(self)
    }
}

impl<T: VisitMut> VisitMut for [T] {
    fn visit_mut<V: VisitorMut + ?Sized>(&mut self, visitor: &mut V) -> Result<(), V::Error> {
        for node in self {
            node.visit_mut(visitor)?;
        }
        Ok(())
    }
}

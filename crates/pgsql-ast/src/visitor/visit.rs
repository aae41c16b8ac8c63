//! Read-only traversal.

use crate::ast::{
    AlterSequenceChange, AlterSequenceStatement, BinaryExpr, CallExpr, CaseExpr, CastExpr,
    CreateSequenceStatement, DataType, DeleteStatement, DropSequenceStatement, Expr, ExprRef,
    InListExpr, InsertSource, InsertStatement, Literal, Parameter, SelectColumn, SelectStatement,
    Statement, TableRef, TernaryExpr, UnaryExpr, UpdateStatement,
};

/// Read-only AST visitor. Default implementations recurse into all children.
///
/// Override a method to handle that node kind. The override decides whether
/// to descend further: call the matching `walk_*` function to continue the
/// default recursion, or return without it to prune the subtree. Nodes below
/// a kind you do not override are still reached.
///
/// Any error returned by a method aborts the traversal and is propagated
/// unchanged. Visitors that cannot fail use [`std::convert::Infallible`].
pub trait Visitor {
    /// Error produced by handlers.
    type Error;

    // Statements

    fn visit_statement(&mut self, statement: &Statement) -> Result<(), Self::Error> {
        walk_statement(self, statement)
    }

    fn visit_select(&mut self, select: &SelectStatement) -> Result<(), Self::Error> {
        walk_select(self, select)
    }

    fn visit_insert(&mut self, insert: &InsertStatement) -> Result<(), Self::Error> {
        walk_insert(self, insert)
    }

    fn visit_update(&mut self, update: &UpdateStatement) -> Result<(), Self::Error> {
        walk_update(self, update)
    }

    fn visit_delete(&mut self, delete: &DeleteStatement) -> Result<(), Self::Error> {
        walk_delete(self, delete)
    }

    fn visit_create_sequence(
        &mut self,
        create: &CreateSequenceStatement,
    ) -> Result<(), Self::Error> {
        walk_create_sequence(self, create)
    }

    fn visit_alter_sequence(&mut self, alter: &AlterSequenceStatement) -> Result<(), Self::Error> {
        walk_alter_sequence(self, alter)
    }

    /// Leaf: a DROP SEQUENCE holds only names.
    fn visit_drop_sequence(&mut self, _drop: &DropSequenceStatement) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_table_ref(&mut self, table_ref: &TableRef) -> Result<(), Self::Error> {
        walk_table_ref(self, table_ref)
    }

    // Expressions

    fn visit_expr(&mut self, expr: &Expr) -> Result<(), Self::Error> {
        walk_expr(self, expr)
    }

    fn visit_ref(&mut self, _reference: &ExprRef) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_literal(&mut self, _literal: &Literal) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_parameter(&mut self, _parameter: &Parameter) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_unary(&mut self, unary: &UnaryExpr) -> Result<(), Self::Error> {
        walk_unary(self, unary)
    }

    fn visit_binary(&mut self, binary: &BinaryExpr) -> Result<(), Self::Error> {
        walk_binary(self, binary)
    }

    fn visit_ternary(&mut self, ternary: &TernaryExpr) -> Result<(), Self::Error> {
        walk_ternary(self, ternary)
    }

    fn visit_in_list(&mut self, in_list: &InListExpr) -> Result<(), Self::Error> {
        walk_in_list(self, in_list)
    }

    fn visit_call(&mut self, call: &CallExpr) -> Result<(), Self::Error> {
        walk_call(self, call)
    }

    fn visit_cast(&mut self, cast: &CastExpr) -> Result<(), Self::Error> {
        walk_cast(self, cast)
    }

    fn visit_case(&mut self, case: &CaseExpr) -> Result<(), Self::Error> {
        walk_case(self, case)
    }

    // Types

    fn visit_data_type(&mut self, _data_type: &DataType) -> Result<(), Self::Error> {
        Ok(())
    }
}

// ============================================================================
// Walk functions
// ============================================================================

pub fn walk_statement<V: Visitor + ?Sized>(v: &mut V, statement: &Statement) -> Result<(), V::Error> {
    match statement {
        Statement::Select(select) => v.visit_select(select),
        Statement::Insert(insert) => v.visit_insert(insert),
        Statement::Update(update) => v.visit_update(update),
        Statement::Delete(delete) => v.visit_delete(delete),
        Statement::CreateSequence(create) => v.visit_create_sequence(create),
        Statement::AlterSequence(alter) => v.visit_alter_sequence(alter),
        Statement::DropSequence(drop) => v.visit_drop_sequence(drop),
    }
}

pub fn walk_select<V: Visitor + ?Sized>(v: &mut V, select: &SelectStatement) -> Result<(), V::Error> {
    walk_columns(v, &select.columns)?;
    if let Some(from) = &select.from {
        v.visit_table_ref(from)?;
    }
    if let Some(where_clause) = &select.where_clause {
        v.visit_expr(where_clause)?;
    }
    for expr in &select.group_by {
        v.visit_expr(expr)?;
    }
    if let Some(having) = &select.having {
        v.visit_expr(having)?;
    }
    for order in &select.order_by {
        v.visit_expr(&order.by)?;
    }
    if let Some(limit) = &select.limit {
        v.visit_expr(limit)?;
    }
    if let Some(offset) = &select.offset {
        v.visit_expr(offset)?;
    }
    Ok(())
}

fn walk_columns<V: Visitor + ?Sized>(v: &mut V, columns: &[SelectColumn]) -> Result<(), V::Error> {
    for column in columns {
        v.visit_expr(&column.expr)?;
    }
    Ok(())
}

pub fn walk_insert<V: Visitor + ?Sized>(v: &mut V, insert: &InsertStatement) -> Result<(), V::Error> {
    match &insert.values {
        InsertSource::Values(rows) => {
            for expr in rows.iter().flatten() {
                v.visit_expr(expr)?;
            }
        }
        InsertSource::Query(query) => v.visit_select(query)?,
        InsertSource::DefaultValues => {}
    }
    walk_columns(v, &insert.returning)
}

pub fn walk_update<V: Visitor + ?Sized>(v: &mut V, update: &UpdateStatement) -> Result<(), V::Error> {
    for assignment in &update.sets {
        v.visit_expr(&assignment.value)?;
    }
    if let Some(from) = &update.from {
        v.visit_table_ref(from)?;
    }
    if let Some(where_clause) = &update.where_clause {
        v.visit_expr(where_clause)?;
    }
    walk_columns(v, &update.returning)
}

pub fn walk_delete<V: Visitor + ?Sized>(v: &mut V, delete: &DeleteStatement) -> Result<(), V::Error> {
    if let Some(where_clause) = &delete.where_clause {
        v.visit_expr(where_clause)?;
    }
    walk_columns(v, &delete.returning)
}

pub fn walk_create_sequence<V: Visitor + ?Sized>(
    v: &mut V,
    create: &CreateSequenceStatement,
) -> Result<(), V::Error> {
    match &create.options.as_type {
        Some(data_type) => v.visit_data_type(data_type),
        None => Ok(()),
    }
}

pub fn walk_alter_sequence<V: Visitor + ?Sized>(
    v: &mut V,
    alter: &AlterSequenceStatement,
) -> Result<(), V::Error> {
    match &alter.change {
        AlterSequenceChange::SetOptions(change) => match &change.options.as_type {
            Some(data_type) => v.visit_data_type(data_type),
            None => Ok(()),
        },
        AlterSequenceChange::Rename { .. }
        | AlterSequenceChange::OwnerTo { .. }
        | AlterSequenceChange::SetSchema { .. } => Ok(()),
    }
}

pub fn walk_table_ref<V: Visitor + ?Sized>(v: &mut V, table_ref: &TableRef) -> Result<(), V::Error> {
    match table_ref {
        TableRef::Table { .. } => Ok(()),
        TableRef::Subquery { query, .. } => v.visit_select(query),
        TableRef::Join { left, join } => {
            v.visit_table_ref(left)?;
            v.visit_table_ref(&join.table)?;
            if let Some(on) = &join.on {
                v.visit_expr(on)?;
            }
            Ok(())
        }
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(v: &mut V, expr: &Expr) -> Result<(), V::Error> {
    match expr {
        Expr::Ref(reference) => v.visit_ref(reference),
        Expr::Literal(literal) => v.visit_literal(literal),
        Expr::Parameter(parameter) => v.visit_parameter(parameter),
        Expr::Unary(unary) => v.visit_unary(unary),
        Expr::Binary(binary) => v.visit_binary(binary),
        Expr::Ternary(ternary) => v.visit_ternary(ternary),
        Expr::InList(in_list) => v.visit_in_list(in_list),
        Expr::Call(call) => v.visit_call(call),
        Expr::Cast(cast) => v.visit_cast(cast),
        Expr::Case(case) => v.visit_case(case),
        Expr::Select(select) => v.visit_select(select),
    }
}

pub fn walk_unary<V: Visitor + ?Sized>(v: &mut V, unary: &UnaryExpr) -> Result<(), V::Error> {
    v.visit_expr(&unary.operand)
}

pub fn walk_binary<V: Visitor + ?Sized>(v: &mut V, binary: &BinaryExpr) -> Result<(), V::Error> {
    v.visit_expr(&binary.left)?;
    v.visit_expr(&binary.right)
}

pub fn walk_ternary<V: Visitor + ?Sized>(v: &mut V, ternary: &TernaryExpr) -> Result<(), V::Error> {
    v.visit_expr(&ternary.value)?;
    v.visit_expr(&ternary.lo)?;
    v.visit_expr(&ternary.hi)
}

pub fn walk_in_list<V: Visitor + ?Sized>(v: &mut V, in_list: &InListExpr) -> Result<(), V::Error> {
    v.visit_expr(&in_list.operand)?;
    for expr in &in_list.list {
        v.visit_expr(expr)?;
    }
    Ok(())
}

pub fn walk_call<V: Visitor + ?Sized>(v: &mut V, call: &CallExpr) -> Result<(), V::Error> {
    for arg in &call.args {
        v.visit_expr(arg)?;
    }
    Ok(())
}

pub fn walk_cast<V: Visitor + ?Sized>(v: &mut V, cast: &CastExpr) -> Result<(), V::Error> {
    v.visit_expr(&cast.operand)?;
    v.visit_data_type(&cast.to)
}

pub fn walk_case<V: Visitor + ?Sized>(v: &mut V, case: &CaseExpr) -> Result<(), V::Error> {
    if let Some(value) = &case.value {
        v.visit_expr(value)?;
    }
    for arm in &case.whens {
        v.visit_expr(&arm.when)?;
        v.visit_expr(&arm.value)?;
    }
    if let Some(else_value) = &case.else_value {
        v.visit_expr(else_value)?;
    }
    Ok(())
}

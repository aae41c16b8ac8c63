//! In-place rewriting traversal.
//!
//! Mirrors [`Visitor`](super::Visitor) over `&mut` nodes. Methods carry a
//! `_mut` suffix so one type can implement both traits.

use crate::ast::{
    AlterSequenceChange, AlterSequenceStatement, BinaryExpr, CallExpr, CaseExpr, CastExpr,
    CreateSequenceStatement, DataType, DeleteStatement, DropSequenceStatement, Expr, ExprRef,
    InListExpr, InsertSource, InsertStatement, Literal, Parameter, SelectColumn, SelectStatement,
    Statement, TableRef, TernaryExpr, UnaryExpr, UpdateStatement,
};

/// Mutable AST visitor. Default implementations recurse into all children.
///
/// An override may replace the node it receives wholesale (for example
/// `*expr = Expr::null()` in `visit_expr_mut`).
pub trait VisitorMut {
    /// Error produced by handlers.
    type Error;

    fn visit_statement_mut(&mut self, statement: &mut Statement) -> Result<(), Self::Error> {
        walk_statement_mut(self, statement)
    }

    fn visit_select_mut(&mut self, select: &mut SelectStatement) -> Result<(), Self::Error> {
        walk_select_mut(self, select)
    }

    fn visit_insert_mut(&mut self, insert: &mut InsertStatement) -> Result<(), Self::Error> {
        walk_insert_mut(self, insert)
    }

    fn visit_update_mut(&mut self, update: &mut UpdateStatement) -> Result<(), Self::Error> {
        walk_update_mut(self, update)
    }

    fn visit_delete_mut(&mut self, delete: &mut DeleteStatement) -> Result<(), Self::Error> {
        walk_delete_mut(self, delete)
    }

    fn visit_create_sequence_mut(
        &mut self,
        create: &mut CreateSequenceStatement,
    ) -> Result<(), Self::Error> {
        walk_create_sequence_mut(self, create)
    }

    fn visit_alter_sequence_mut(
        &mut self,
        alter: &mut AlterSequenceStatement,
    ) -> Result<(), Self::Error> {
        walk_alter_sequence_mut(self, alter)
    }

    fn visit_drop_sequence_mut(
        &mut self,
        _drop: &mut DropSequenceStatement,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_table_ref_mut(&mut self, table_ref: &mut TableRef) -> Result<(), Self::Error> {
        walk_table_ref_mut(self, table_ref)
    }

    fn visit_expr_mut(&mut self, expr: &mut Expr) -> Result<(), Self::Error> {
        walk_expr_mut(self, expr)
    }

    fn visit_ref_mut(&mut self, _reference: &mut ExprRef) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_literal_mut(&mut self, _literal: &mut Literal) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_parameter_mut(&mut self, _parameter: &mut Parameter) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_unary_mut(&mut self, unary: &mut UnaryExpr) -> Result<(), Self::Error> {
        walk_unary_mut(self, unary)
    }

    fn visit_binary_mut(&mut self, binary: &mut BinaryExpr) -> Result<(), Self::Error> {
        walk_binary_mut(self, binary)
    }

    fn visit_ternary_mut(&mut self, ternary: &mut TernaryExpr) -> Result<(), Self::Error> {
        walk_ternary_mut(self, ternary)
    }

    fn visit_in_list_mut(&mut self, in_list: &mut InListExpr) -> Result<(), Self::Error> {
        walk_in_list_mut(self, in_list)
    }

    fn visit_call_mut(&mut self, call: &mut CallExpr) -> Result<(), Self::Error> {
        walk_call_mut(self, call)
    }

    fn visit_cast_mut(&mut self, cast: &mut CastExpr) -> Result<(), Self::Error> {
        walk_cast_mut(self, cast)
    }

    fn visit_case_mut(&mut self, case: &mut CaseExpr) -> Result<(), Self::Error> {
        walk_case_mut(self, case)
    }

    fn visit_data_type_mut(&mut self, _data_type: &mut DataType) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub fn walk_statement_mut<V: VisitorMut + ?Sized>(
    v: &mut V,
    statement: &mut Statement,
) -> Result<(), V::Error> {
    match statement {
        Statement::Select(select) => v.visit_select_mut(select),
        Statement::Insert(insert) => v.visit_insert_mut(insert),
        Statement::Update(update) => v.visit_update_mut(update),
        Statement::Delete(delete) => v.visit_delete_mut(delete),
        Statement::CreateSequence(create) => v.visit_create_sequence_mut(create),
        Statement::AlterSequence(alter) => v.visit_alter_sequence_mut(alter),
        Statement::DropSequence(drop) => v.visit_drop_sequence_mut(drop),
    }
}

pub fn walk_select_mut<V: VisitorMut + ?Sized>(
    v: &mut V,
    select: &mut SelectStatement,
) -> Result<(), V::Error> {
    walk_columns_mut(v, &mut select.columns)?;
    if let Some(from) = &mut select.from {
        v.visit_table_ref_mut(from)?;
    }
    if let Some(where_clause) = &mut select.where_clause {
        v.visit_expr_mut(where_clause)?;
    }
    for expr in &mut select.group_by {
        v.visit_expr_mut(expr)?;
    }
    if let Some(having) = &mut select.having {
        v.visit_expr_mut(having)?;
    }
    for order in &mut select.order_by {
        v.visit_expr_mut(&mut order.by)?;
    }
    if let Some(limit) = &mut select.limit {
        v.visit_expr_mut(limit)?;
    }
    if let Some(offset) = &mut select.offset {
        v.visit_expr_mut(offset)?;
    }
    Ok(())
}

fn walk_columns_mut<V: VisitorMut + ?Sized>(
    v: &mut V,
    columns: &mut [SelectColumn],
) -> Result<(), V::Error> {
    for column in columns {
        v.visit_expr_mut(&mut column.expr)?;
    }
    Ok(())
}

pub fn walk_insert_mut<V: VisitorMut + ?Sized>(
    v: &mut V,
    insert: &mut InsertStatement,
) -> Result<(), V::Error> {
    match &mut insert.values {
        InsertSource::Values(rows) => {
            for expr in rows.iter_mut().flatten() {
                v.visit_expr_mut(expr)?;
            }
        }
        InsertSource::Query(query) => v.visit_select_mut(query)?,
        InsertSource::DefaultValues => {}
    }
    walk_columns_mut(v, &mut insert.returning)
}

pub fn walk_update_mut<V: VisitorMut + ?Sized>(
    v: &mut V,
    update: &mut UpdateStatement,
) -> Result<(), V::Error> {
    for assignment in &mut update.sets {
        v.visit_expr_mut(&mut assignment.value)?;
    }
    if let Some(from) = &mut update.from {
        v.visit_table_ref_mut(from)?;
    }
    if let Some(where_clause) = &mut update.where_clause {
        v.visit_expr_mut(where_clause)?;
    }
    walk_columns_mut(v, &mut update.returning)
}

pub fn walk_delete_mut<V: VisitorMut + ?Sized>(
    v: &mut V,
    delete: &mut DeleteStatement,
) -> Result<(), V::Error> {
    if let Some(where_clause) = &mut delete.where_clause {
        v.visit_expr_mut(where_clause)?;
    }
    walk_columns_mut(v, &mut delete.returning)
}

pub fn walk_create_sequence_mut<V: VisitorMut + ?Sized>(
    v: &mut V,
    create: &mut CreateSequenceStatement,
) -> Result<(), V::Error> {
    match &mut create.options.as_type {
        Some(data_type) => v.visit_data_type_mut(data_type),
        None => Ok(()),
    }
}

pub fn walk_alter_sequence_mut<V: VisitorMut + ?Sized>(
    v: &mut V,
    alter: &mut AlterSequenceStatement,
) -> Result<(), V::Error> {
    match &mut alter.change {
        AlterSequenceChange::SetOptions(change) => match &mut change.options.as_type {
            Some(data_type) => v.visit_data_type_mut(data_type),
            None => Ok(()),
        },
        AlterSequenceChange::Rename { .. }
        | AlterSequenceChange::OwnerTo { .. }
        | AlterSequenceChange::SetSchema { .. } => Ok(()),
    }
}

pub fn walk_table_ref_mut<V: VisitorMut + ?Sized>(
    v: &mut V,
    table_ref: &mut TableRef,
) -> Result<(), V::Error> {
    match table_ref {
        TableRef::Table { .. } => Ok(()),
        TableRef::Subquery { query, .. } => v.visit_select_mut(query),
        TableRef::Join { left, join } => {
            v.visit_table_ref_mut(left)?;
            v.visit_table_ref_mut(&mut join.table)?;
            if let Some(on) = &mut join.on {
                v.visit_expr_mut(on)?;
            }
            Ok(())
        }
    }
}

pub fn walk_expr_mut<V: VisitorMut + ?Sized>(v: &mut V, expr: &mut Expr) -> Result<(), V::Error> {
    match expr {
        Expr::Ref(reference) => v.visit_ref_mut(reference),
        Expr::Literal(literal) => v.visit_literal_mut(literal),
        Expr::Parameter(parameter) => v.visit_parameter_mut(parameter),
        Expr::Unary(unary) => v.visit_unary_mut(unary),
        Expr::Binary(binary) => v.visit_binary_mut(binary),
        Expr::Ternary(ternary) => v.visit_ternary_mut(ternary),
        Expr::InList(in_list) => v.visit_in_list_mut(in_list),
        Expr::Call(call) => v.visit_call_mut(call),
        Expr::Cast(cast) => v.visit_cast_mut(cast),
        Expr::Case(case) => v.visit_case_mut(case),
        Expr::Select(select) => v.visit_select_mut(select),
    }
}

pub fn walk_unary_mut<V: VisitorMut + ?Sized>(
    v: &mut V,
    unary: &mut UnaryExpr,
) -> Result<(), V::Error> {
    v.visit_expr_mut(&mut unary.operand)
}

pub fn walk_binary_mut<V: VisitorMut + ?Sized>(
    v: &mut V,
    binary: &mut BinaryExpr,
) -> Result<(), V::Error> {
    v.visit_expr_mut(&mut binary.left)?;
    v.visit_expr_mut(&mut binary.right)
}

pub fn walk_ternary_mut<V: VisitorMut + ?Sized>(
    v: &mut V,
    ternary: &mut TernaryExpr,
) -> Result<(), V::Error> {
    v.visit_expr_mut(&mut ternary.value)?;
    v.visit_expr_mut(&mut ternary.lo)?;
    v.visit_expr_mut(&mut ternary.hi)
}

pub fn walk_in_list_mut<V: VisitorMut + ?Sized>(
    v: &mut V,
    in_list: &mut InListExpr,
) -> Result<(), V::Error> {
    v.visit_expr_mut(&mut in_list.operand)?;
    for expr in &mut in_list.list {
        v.visit_expr_mut(expr)?;
    }
    Ok(())
}

pub fn walk_call_mut<V: VisitorMut + ?Sized>(v: &mut V, call: &mut CallExpr) -> Result<(), V::Error> {
    for arg in &mut call.args {
        v.visit_expr_mut(arg)?;
    }
    Ok(())
}

pub fn walk_cast_mut<V: VisitorMut + ?Sized>(v: &mut V, cast: &mut CastExpr) -> Result<(), V::Error> {
    v.visit_expr_mut(&mut cast.operand)?;
    v.visit_data_type_mut(&mut cast.to)
}

pub fn walk_case_mut<V: VisitorMut + ?Sized>(v: &mut V, case: &mut CaseExpr) -> Result<(), V::Error> {
    if let Some(value) = &mut case.value {
        v.visit_expr_mut(value)?;
    }
    for arm in &mut case.whens {
        v.visit_expr_mut(&mut arm.when)?;
        v.visit_expr_mut(&mut arm.value)?;
    }
    if let Some(else_value) = &mut case.else_value {
        v.visit_expr_mut(else_value)?;
    }
    Ok(())
}

//! Tests for CREATE / ALTER / DROP SEQUENCE.

mod common;
use common::*;

use pgsql_ast::ast::{
    AlterSequenceChange, CreateSequenceStatement, Cycle, DataType, DropBehavior, MaxValue,
    MinValue, OwnedBy, OwnerColumn, QName, Restart,
};
use pgsql_ast::ParseErrorKind;
use serde_json::json;

// ===================================================================
// Wire format of representative statements
// ===================================================================

#[test]
fn create_full_option_set() {
    assert_eq!(
        json(
            "CREATE SEQUENCE if not exists public.myseq START WITH 1 INCREMENT BY 1 \
             NO MINVALUE NO MAXVALUE CACHE 1 as bigint cycle"
        ),
        json!({
            "type": "create sequence",
            "name": "myseq",
            "schema": "public",
            "startWith": 1,
            "incrementBy": 1,
            "minValue": "no minvalue",
            "maxValue": "no maxvalue",
            "cache": 1,
            "as": { "type": "bigint" },
            "cycle": "cycle",
            "ifNotExists": true
        })
    );
}

#[test]
fn create_temp_owned_by_column() {
    assert_eq!(
        json("CREATE temp SEQUENCE myseq owned by tbl.col"),
        json!({
            "type": "create sequence",
            "name": "myseq",
            "temp": true,
            "ownedBy": { "table": "tbl", "column": "col" }
        })
    );
}

#[test]
fn create_owned_by_none() {
    assert_eq!(
        json("CREATE SEQUENCE myseq owned by none"),
        json!({ "type": "create sequence", "name": "myseq", "ownedBy": "none" })
    );
}

#[test]
fn create_no_cycle() {
    assert_eq!(
        json("CREATE SEQUENCE myseq NO CYCLE"),
        json!({ "type": "create sequence", "name": "myseq", "cycle": "no cycle" })
    );
}

#[test]
fn create_bare() {
    assert_eq!(
        json("CREATE SEQUENCE myseq"),
        json!({ "type": "create sequence", "name": "myseq" })
    );
}

#[test]
fn create_json_round_trip() {
    json_round_trip(
        "CREATE UNLOGGED SEQUENCE IF NOT EXISTS s AS integer START 5 INCREMENT -1 \
         MINVALUE -100 MAXVALUE 100 CACHE 10 NO CYCLE OWNED BY app.orders.id",
    );
    json_round_trip("CREATE SEQUENCE s OWNED BY NONE");
}

// ===================================================================
// Clause order independence
// ===================================================================

fn permutations(items: &[&'static str]) -> Vec<Vec<&'static str>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = vec![];
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}

#[test]
fn clause_order_is_irrelevant() {
    let clauses = [
        "START WITH 10",
        "INCREMENT BY 2",
        "NO MINVALUE",
        "MAXVALUE 500",
        "CACHE 3",
        "NO CYCLE",
    ];
    let expected = parse_create_sequence(&format!("CREATE SEQUENCE s {}", clauses.join(" ")));

    let all = permutations(&clauses);
    assert_eq!(all.len(), 720);
    for order in all {
        let sql = format!("CREATE SEQUENCE s {}", order.join(" "));
        assert_eq!(parse_create_sequence(&sql), expected, "{sql}");
    }
}

#[test]
fn clause_order_with_as_and_owned_by() {
    let a = parse_create_sequence("CREATE SEQUENCE s AS bigint OWNED BY t.c CYCLE");
    let b = parse_create_sequence("CREATE SEQUENCE s CYCLE OWNED BY t.c AS bigint");
    let c = parse_create_sequence("CREATE SEQUENCE s OWNED BY t.c CYCLE AS bigint");
    assert_eq!(a, b);
    assert_eq!(b, c);
}

// ===================================================================
// Tri-state clauses
// ===================================================================

#[test]
fn cycle_has_three_states() {
    let cycle = parse_create_sequence("CREATE SEQUENCE s CYCLE");
    let no_cycle = parse_create_sequence("CREATE SEQUENCE s NO CYCLE");
    let absent = parse_create_sequence("CREATE SEQUENCE s");

    assert_eq!(cycle.options.cycle, Cycle::Cycle);
    assert_eq!(no_cycle.options.cycle, Cycle::NoCycle);
    assert_eq!(absent.options.cycle, Cycle::Unspecified);

    assert_eq!(json("CREATE SEQUENCE s CYCLE")["cycle"], json!("cycle"));
    assert_eq!(json("CREATE SEQUENCE s NO CYCLE")["cycle"], json!("no cycle"));
    assert!(json("CREATE SEQUENCE s").get("cycle").is_none());
}

#[test]
fn min_and_max_value_have_three_states() {
    let stmt = parse_create_sequence("CREATE SEQUENCE s MINVALUE -5 NO MAXVALUE");
    assert_eq!(stmt.options.min_value, MinValue::Value(-5));
    assert_eq!(stmt.options.max_value, MaxValue::NoMaxValue);

    let stmt = parse_create_sequence("CREATE SEQUENCE s NO MINVALUE MAXVALUE 9");
    assert_eq!(stmt.options.min_value, MinValue::NoMinValue);
    assert_eq!(stmt.options.max_value, MaxValue::Value(9));

    let stmt = parse_create_sequence("CREATE SEQUENCE s");
    assert!(stmt.options.min_value.is_unspecified());
    assert!(stmt.options.max_value.is_unspecified());
}

#[test]
fn owned_by_has_three_states() {
    let stmt = parse_create_sequence("CREATE SEQUENCE s OWNED BY NONE");
    assert_eq!(stmt.options.owned_by, OwnedBy::None);

    let stmt = parse_create_sequence("CREATE SEQUENCE s OWNED BY public.tbl.col");
    assert_eq!(
        stmt.options.owned_by,
        OwnedBy::Column(OwnerColumn {
            schema: Some(String::from("public")),
            table: String::from("tbl"),
            column: String::from("col"),
        })
    );

    assert!(parse_create_sequence("CREATE SEQUENCE s")
        .options
        .owned_by
        .is_unspecified());
}

#[test]
fn optional_noise_words() {
    let short = parse_create_sequence("CREATE SEQUENCE s START 3 INCREMENT 4");
    let long = parse_create_sequence("CREATE SEQUENCE s START WITH 3 INCREMENT BY 4");
    assert_eq!(short, long);
    assert_eq!(short.options.start_with, Some(3));
    assert_eq!(short.options.increment_by, Some(4));
}

#[test]
fn data_type_with_modifiers() {
    let stmt = parse_create_sequence("CREATE SEQUENCE s AS numeric(10)");
    assert_eq!(
        stmt.options.as_type,
        Some(DataType::with_config("numeric", vec![10]))
    );
}

#[test]
fn sequence_options_are_not_reserved() {
    // `start`, `cycle` and `cache` remain valid names elsewhere.
    let stmt = parse_create_sequence("CREATE SEQUENCE start OWNED BY cycle.cache");
    assert_eq!(stmt.name, "start");
    assert_eq!(
        stmt.options.owned_by,
        OwnedBy::Column(OwnerColumn {
            schema: None,
            table: String::from("cycle"),
            column: String::from("cache"),
        })
    );
}

#[test]
fn create_sequence_builder_matches_parse() {
    let mut expected = CreateSequenceStatement::new("s");
    expected.temp = true;
    expected.options.cache = Some(20);
    assert_eq!(
        parse_create_sequence("CREATE TEMPORARY SEQUENCE s CACHE 20;"),
        expected
    );
}

// ===================================================================
// Rejected input
// ===================================================================

#[test]
fn duplicate_clause_is_rejected() {
    let err = parse_err("CREATE SEQUENCE s CACHE 1 CACHE 2");
    assert_eq!(err.kind, ParseErrorKind::Syntax);
    assert_eq!(err.message, "Duplicate CACHE clause");
    assert_eq!((err.span.start, err.span.end), (26, 33));
}

#[test]
fn negated_and_positive_forms_are_one_clause() {
    let err = parse_err("CREATE SEQUENCE s CYCLE NO CYCLE");
    assert_eq!(err.message, "Duplicate CYCLE clause");

    let err = parse_err("CREATE SEQUENCE s NO MINVALUE MINVALUE 1");
    assert_eq!(err.message, "Duplicate MINVALUE clause");
}

#[test]
fn trailing_garbage_is_rejected() {
    let err = parse_err("CREATE SEQUENCE s CACHE 1 bogus");
    assert_eq!(err.kind, ParseErrorKind::Syntax);
    assert_eq!((err.span.start, err.span.end), (26, 31));
    assert_eq!(
        err.message,
        "Unexpected token: expected sequence option or end of statement, found identifier \"bogus\""
    );
}

#[test]
fn trailing_garbage_before_semicolon_is_rejected() {
    let err = parse_err("CREATE SEQUENCE s NO CYCLE 42;");
    assert!(err.is_syntax());
}

#[test]
fn no_requires_a_negatable_clause() {
    let err = parse_err("CREATE SEQUENCE s NO CACHE");
    assert_eq!(err.expected.as_deref(), Some("MINVALUE, MAXVALUE or CYCLE"));
}

#[test]
fn missing_clause_argument() {
    let err = parse_err("CREATE SEQUENCE s CACHE");
    assert_eq!(err.message, "Unexpected end of input: expected integer");
}

#[test]
fn owned_by_needs_a_column() {
    let err = parse_err("CREATE SEQUENCE s OWNED BY tbl");
    assert_eq!(
        err.message,
        "OWNED BY expects NONE or a table.column reference"
    );
}

// ===================================================================
// ALTER SEQUENCE
// ===================================================================

#[test]
fn alter_options_and_restart() {
    let stmt = parse_alter_sequence("ALTER SEQUENCE IF EXISTS s INCREMENT BY 5 RESTART WITH 100");
    assert!(stmt.if_exists);
    let AlterSequenceChange::SetOptions(change) = stmt.change else {
        panic!("expected set options");
    };
    assert_eq!(change.options.increment_by, Some(5));
    assert_eq!(change.restart, Restart::With(100));

    assert_eq!(
        json("ALTER SEQUENCE s RESTART NO CYCLE"),
        json!({
            "type": "alter sequence",
            "name": "s",
            "change": { "type": "set options", "restart": true, "cycle": "no cycle" }
        })
    );
}

#[test]
fn alter_rename_owner_and_schema() {
    assert_eq!(
        parse_alter_sequence("ALTER SEQUENCE app.s RENAME TO t").change,
        AlterSequenceChange::Rename {
            new_name: String::from("t")
        }
    );
    assert_eq!(
        parse_alter_sequence("ALTER SEQUENCE s OWNER TO admin").change,
        AlterSequenceChange::OwnerTo {
            owner: String::from("admin")
        }
    );
    assert_eq!(
        json("ALTER SEQUENCE s SET SCHEMA archive")["change"],
        json!({ "type": "set schema", "newSchema": "archive" })
    );
}

#[test]
fn alter_rejects_duplicate_and_empty() {
    assert_eq!(
        parse_err("ALTER SEQUENCE s RESTART RESTART WITH 1").message,
        "Duplicate RESTART clause"
    );
    assert!(parse_err("ALTER SEQUENCE s").is_syntax());
}

#[test]
fn alter_set_logged_is_unsupported() {
    let err = parse_err("ALTER SEQUENCE s SET LOGGED");
    assert_eq!(err.kind, ParseErrorKind::Unsupported);
}

#[test]
fn bigint_bounds_accepted() {
    let stmt = parse_create_sequence(
        "CREATE SEQUENCE s AS bigint MINVALUE -9223372036854775808 MAXVALUE 9223372036854775807",
    );
    assert_eq!(stmt.options.min_value, MinValue::Value(i64::MIN));
    assert_eq!(stmt.options.max_value, MaxValue::Value(i64::MAX));
    assert_eq!(
        json("CREATE SEQUENCE s MINVALUE -9223372036854775808"),
        json!({ "type": "create sequence", "name": "s", "minValue": i64::MIN })
    );

    let AlterSequenceChange::SetOptions(change) =
        parse_alter_sequence("ALTER SEQUENCE s RESTART -9223372036854775808").change
    else {
        panic!("expected SET options");
    };
    assert_eq!(change.restart, Restart::With(i64::MIN));
}

#[test]
fn bigint_overflow_is_syntax_error() {
    for sql in [
        "CREATE SEQUENCE s START 9223372036854775808",
        "CREATE SEQUENCE s INCREMENT BY -99999999999999999999",
        "ALTER SEQUENCE s RESTART 9223372036854775808",
    ] {
        let err = parse_err(sql);
        assert!(err.is_syntax(), "{sql}");
        assert_eq!(err.message, "Integer out of range for bigint", "{sql}");
    }
}

#[test]
fn restart_is_alter_only() {
    let err = parse_err("CREATE SEQUENCE s RESTART");
    assert!(err.is_syntax());
}

// ===================================================================
// DROP SEQUENCE
// ===================================================================

#[test]
fn drop_several() {
    let stmt = parse_drop_sequence("DROP SEQUENCE IF EXISTS a, app.b CASCADE");
    assert!(stmt.if_exists);
    assert_eq!(stmt.names, vec![QName::new("a"), QName::qualified("app", "b")]);
    assert_eq!(stmt.cascade, Some(DropBehavior::Cascade));

    assert_eq!(
        json("DROP SEQUENCE s RESTRICT"),
        json!({ "type": "drop sequence", "names": [{ "name": "s" }], "cascade": "restrict" })
    );
}

#[test]
fn drop_trailing_garbage() {
    let err = parse_err("DROP SEQUENCE s CASCADE now");
    assert_eq!(err.expected.as_deref(), Some("end of statement"));
}

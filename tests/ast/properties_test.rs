//! Tree-level guarantees: inversion, structural equality, bind checking,
//! determinism and sharing across threads.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::thread;

use quarry::cache::RenderCache;
use quarry::prelude::*;

fn users() -> Table {
    Table::new("users")
}

fn predicates() -> Vec<Node> {
    let users = users();
    let posts = Table::new("posts");
    vec![
        users.col("id").eq(1),
        users.col("id").not_eq(bind(2)),
        users.col("age").gt(18),
        users.col("age").lteq(65),
        users.col("deleted_at").is_null(),
        users.col("age").between(18, 65),
        users.col("role").in_list(["admin", "owner"]),
        users.col("id").in_values([1, 2, 3]),
        users.col("name").matches("a%"),
        users.col("name").matches_regexp("^a", true),
        users.col("id").is_distinct_from(bind(5)),
        posts
            .from()
            .filter(posts.col("user_id").eq(users.col("id")))
            .exists(),
        users
            .col("id")
            .eq(1)
            .and(users.col("age").gt(18).or(users.col("vip").eq(true))),
        sql("score > 10"),
        lit(true),
        users.col("id").eq(1).not(),
        users.col("age").between(18, 65).not(),
        sql("score > 10").not(),
    ]
}

fn hash_of(node: &Node) -> u64 {
    let mut hasher = DefaultHasher::new();
    node.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_invert_twice_is_identity() {
    for predicate in predicates() {
        let twice = predicate.invert().unwrap().invert().unwrap();
        if let Node::Not(inner) = &predicate {
            // NOT x comes back as the complement of x, not as NOT x.
            assert_eq!(twice, inner.invert().unwrap());
            continue;
        }
        assert_eq!(twice, predicate);
        for dialect in Dialect::ALL {
            assert_eq!(
                twice.to_sql(dialect).ok(),
                predicate.to_sql(dialect).ok(),
                "{:?} on {}",
                predicate,
                dialect
            );
        }
    }
}

#[test]
fn test_invert_renders_complement() {
    let users = users();
    let cases = [
        (users.col("age").gt(18), r#""users"."age" <= 18"#),
        (users.col("id").eq(null()), r#""users"."id" IS NOT NULL"#),
        (
            users.col("age").between(18, 65),
            r#""users"."age" NOT BETWEEN 18 AND 65"#,
        ),
        (
            users.col("role").in_list(["admin"]),
            r#""users"."role" NOT IN ('admin')"#,
        ),
        (
            users.col("id").eq(1).and(users.col("age").eq(2)),
            r#""users"."id" <> 1 OR "users"."age" <> 2"#,
        ),
        (sql("score > 10"), "NOT (score > 10)"),
        (users.col("id").eq(1).not(), r#""users"."id" = 1"#),
    ];
    for (predicate, expected) in cases {
        let inverted = predicate.invert().unwrap();
        assert_eq!(inverted.to_sql(Dialect::Generic).unwrap().sql, expected);
    }
}

#[test]
fn test_invert_rejects_non_boolean_nodes() {
    let users = users();
    assert!(matches!(
        users.col("id").invert(),
        Err(Error::NotInvertible { node: "attribute" })
    ));
    assert!(matches!(
        users.col("price").mul(2).invert(),
        Err(Error::NotInvertible { .. })
    ));
    assert!(matches!(
        count_star().invert(),
        Err(Error::NotInvertible { .. })
    ));
    assert!(matches!(
        users.col("id").not().invert(),
        Err(Error::NotInvertible { node: "attribute" })
    ));
}

#[test]
fn test_structural_equality_and_hash() {
    let build = |leaf: i64| {
        let users = users();
        users
            .project([users.col("id")])
            .filter(users.col("id").eq(bind(leaf)))
            .order([users.col("id").asc()])
            .into_statement()
    };

    let a = build(1);
    let b = build(1);
    let c = build(2);
    assert_eq!(a, b);
    assert_ne!(a, c);

    let set: HashSet<_> = [a.clone(), b, c].into_iter().collect();
    assert_eq!(set.len(), 2);

    let x = users().col("id").eq(lit(1.5));
    let y = users().col("id").eq(lit(1.5));
    assert_eq!(hash_of(&x), hash_of(&y));
}

#[test]
fn test_positional_bind_count_is_checked() {
    let err = BoundSqlLiteral::positional("a = ? AND b = ?", vec![bind(1)]).unwrap_err();
    assert!(matches!(err, Error::Bind { .. }));
    assert_eq!(
        err.to_string(),
        "wrong number of bind variables (1 for 2) in: a = ? AND b = ?"
    );
}

#[test]
fn test_named_binds_render_in_order() {
    let literal = BoundSqlLiteral::named(
        "created_at::date = :day AND owner = :owner",
        [("day", bind("2024-01-01")), ("owner", bind(7))],
    )
    .unwrap();
    let users = users();
    let query = users
        .from()
        .filter(users.col("active").eq(bind(true)))
        .filter(Node::from(literal));

    let rendered = query.to_sql(Dialect::Postgres).unwrap();
    assert_eq!(
        rendered.sql,
        r#"SELECT * FROM "users" WHERE "users"."active" = $1 AND created_at::date = $2 AND owner = $3"#
    );
    assert_eq!(
        rendered.binds,
        vec![Value::from(true), Value::from("2024-01-01"), Value::from(7)]
    );
}

#[test]
fn test_inline_rendering_has_no_binds() {
    let users = users();
    let query = users
        .from()
        .filter(users.col("name").eq(bind("o'neil")))
        .filter(users.col("id").in_values([1, 2]));
    let inline = RenderOptions {
        prepared_statements: false,
    };

    let rendered = query.to_sql_with(Dialect::Generic, inline).unwrap();
    assert_eq!(
        rendered.sql,
        r#"SELECT * FROM "users" WHERE "users"."name" = 'o''neil' AND "users"."id" IN (1, 2)"#
    );
    assert!(rendered.binds.is_empty());
}

#[test]
fn test_placeholder_count_matches_binds() {
    let users = users();
    let query = users
        .project([users.col("id")])
        .filter(users.col("id").in_values([1, 2, 3]))
        .filter(users.col("name").eq(bind("x")))
        .take(bind(10));

    let rendered = query.to_sql(Dialect::TSql).unwrap();
    assert_eq!(rendered.binds.len(), 5);
    for n in 1..=5 {
        assert!(rendered.sql.contains(&format!("@P{}", n)), "{}", rendered.sql);
    }
    assert!(!rendered.sql.contains("@P6"));
}

#[test]
fn test_trees_survive_json() {
    let users = users();
    let statement = Statement::from(
        users
            .project([users.col("id"), count_star().alias("n")])
            .filter(users.col("score").gt(lit(2.5)))
            .group([users.col("id")])
            .take(10),
    );

    let json = serde_json::to_string(&statement).unwrap();
    let back: Statement = serde_json::from_str(&json).unwrap();
    assert_eq!(back, statement);
    assert_eq!(
        back.to_sql(Dialect::MySql).unwrap(),
        statement.to_sql(Dialect::MySql).unwrap()
    );
}

#[test]
fn test_fingerprint_follows_structure() {
    let users = users();
    let a = Statement::from(users.from().filter(users.col("id").eq(1)));
    let b = Statement::from(users.from().filter(users.col("id").eq(1)));
    let c = Statement::from(users.from().filter(users.col("id").eq(2)));

    let fa = a.fingerprint().unwrap();
    assert_eq!(fa.len(), 64);
    assert_eq!(fa, b.fingerprint().unwrap());
    assert_ne!(fa, c.fingerprint().unwrap());
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_trees_are_shareable() {
    assert_send_sync::<Node>();
    assert_send_sync::<Statement>();
    assert_send_sync::<SelectManager>();
    assert_send_sync::<RenderCache>();

    let users = users();
    let statement = Statement::from(
        users
            .project([users.col("id")])
            .filter(users.col("name").eq(bind("nick"))),
    );
    let expected: Vec<Rendered> = Dialect::ALL
        .iter()
        .map(|d| statement.to_sql(*d).unwrap())
        .collect();

    let cache = Arc::new(RenderCache::default());
    thread::scope(|s| {
        for _ in 0..4 {
            let cache = Arc::clone(&cache);
            let statement = &statement;
            let expected = &expected;
            s.spawn(move || {
                for (dialect, want) in Dialect::ALL.iter().zip(expected) {
                    assert_eq!(&statement.to_sql(*dialect).unwrap(), want);
                    assert_eq!(&cache.render(statement, *dialect).unwrap(), want);
                }
            });
        }
    });
    assert_eq!(cache.len(), Dialect::ALL.len());
}

//! Builder behaviour: accumulation, overwriting, forking and accessors.

use quarry::prelude::*;

fn users() -> Table {
    Table::new("users")
}

fn generic(stmt: &impl ToSql) -> String {
    stmt.to_sql(Dialect::Generic).unwrap().sql
}

#[test]
fn test_list_clauses_accumulate() {
    let users = users();
    let query = users
        .project([users.col("id")])
        .project([users.col("name")])
        .filter(users.col("age").gt(18))
        .filter(users.col("active").eq(true))
        .order([users.col("name").asc()])
        .order([users.col("id").desc()]);

    assert_eq!(query.projections().len(), 2);
    assert_eq!(query.constraints().len(), 2);
    assert_eq!(
        generic(&query),
        r#"SELECT "users"."id", "users"."name" FROM "users" WHERE "users"."age" > 18 AND "users"."active" = TRUE ORDER BY "users"."name" ASC, "users"."id" DESC"#
    );
}

#[test]
fn test_single_valued_clauses_overwrite() {
    let users = users();
    let admins = Table::new("admins");
    let query = users.from().from(&admins).take(5).take(10).skip(1).skip(2);

    assert_eq!(query.limit(), Some(&lit(10)));
    assert_eq!(query.offset(), Some(&lit(2)));
    assert_eq!(generic(&query), r#"SELECT * FROM "admins" LIMIT 10 OFFSET 2"#);
}

#[test]
fn test_clone_forks_a_query() {
    let users = users();
    let base = users.project([users.col("id")]);
    let active = base.clone().filter(users.col("active").eq(true));
    let recent = base.clone().order([users.col("id").desc()]).take(5);

    assert_eq!(generic(&base), r#"SELECT "users"."id" FROM "users""#);
    assert_eq!(
        generic(&active),
        r#"SELECT "users"."id" FROM "users" WHERE "users"."active" = TRUE"#
    );
    assert_eq!(
        generic(&recent),
        r#"SELECT "users"."id" FROM "users" ORDER BY "users"."id" DESC LIMIT 5"#
    );
}

#[test]
fn test_table_entry_points_match_manager() {
    let users = users();
    assert_eq!(users.from(), SelectManager::new().from(&users));
    assert_eq!(
        users.filter(users.col("id").eq(1)),
        SelectManager::new()
            .from(&users)
            .filter(users.col("id").eq(1))
    );
}

#[test]
fn test_join_accessors() {
    let users = users();
    let posts = Table::new("posts");
    let query = users
        .from()
        .join(&posts, posts.col("user_id").eq(users.col("id")))
        .cross_join("tags");

    let source = query.join_sources().unwrap();
    assert_eq!(source.joins.len(), 2);
    assert_eq!(
        generic(&query),
        r#"SELECT * FROM "users" INNER JOIN "posts" ON "posts"."user_id" = "users"."id" CROSS JOIN "tags""#
    );
}

#[test]
fn test_blank_string_join_is_rejected() {
    let users = users();
    assert!(matches!(users.from().join_sql(""), Err(Error::EmptyJoin)));
    assert!(matches!(users.from().join_sql("   "), Err(Error::EmptyJoin)));
}

#[test]
fn test_query_as_derived_table() {
    let users = users();
    let inner = users
        .project([users.col("id")])
        .filter(users.col("active").eq(true));
    let query = SelectManager::new()
        .from(inner.as_relation("u"))
        .project([col("id")]);

    assert_eq!(
        generic(&query),
        r#"SELECT "id" FROM (SELECT "users"."id" FROM "users" WHERE "users"."active" = TRUE) AS "u""#
    );
}

#[test]
fn test_compound_statement_clauses() {
    let users = users();
    let admins = Table::new("admins");
    let query = users
        .project([users.col("id")])
        .compound(SetOp::UnionAll, admins.project([admins.col("id")]))
        .order([col("id").asc()])
        .take(5);

    assert_eq!(
        generic(&query),
        r#"SELECT "users"."id" FROM "users" UNION ALL SELECT "admins"."id" FROM "admins" ORDER BY "id" ASC LIMIT 5"#
    );
}

#[test]
fn test_predicate_helpers() {
    let users = users();
    let cases = [
        (
            users.col("id").eq_any([1, 2]),
            r#"("users"."id" = 1 OR "users"."id" = 2)"#,
        ),
        (
            users.col("id").not_eq_all([1, 2]),
            r#"("users"."id" <> 1 AND "users"."id" <> 2)"#,
        ),
        (
            users.col("price").mul(users.col("qty")).gt(100),
            r#""users"."price" * "users"."qty" > 100"#,
        ),
        (
            users.col("base").add(5).mul(2),
            r#"("users"."base" + 5) * 2"#,
        ),
        (
            count_distinct(users.col("email")),
            r#"COUNT(DISTINCT "users"."email")"#,
        ),
        (
            coalesce(vec![users.col("nick"), lit("anon")]),
            r#"COALESCE("users"."nick", 'anon')"#,
        ),
        (
            all_of(Vec::<Node>::new()),
            "1=1",
        ),
        (
            any_of(Vec::<Node>::new()),
            "1=0",
        ),
    ];
    for (node, expected) in cases {
        assert_eq!(generic(&node), expected);
    }
}

#[test]
fn test_simple_case() {
    let users = users();
    let status = CaseBuilder::on(users.col("status"))
        .when(1, "active")
        .otherwise("other")
        .build();
    assert_eq!(
        generic(&status),
        r#"CASE "users"."status" WHEN 1 THEN 'active' ELSE 'other' END"#
    );
}

#[test]
fn test_aggregate_filter() {
    let users = users();
    let adults = count_star().with_filter(users.col("age").gteq(18)).unwrap();
    assert_eq!(
        generic(&adults),
        r#"COUNT(*) FILTER (WHERE "users"."age" >= 18)"#
    );

    assert!(matches!(
        users.col("age").with_filter(users.col("age").gt(1)),
        Err(Error::Composition(_))
    ));
}

#[test]
fn test_insert_manager_accumulates_rows() {
    let insert = InsertManager::new()
        .into("users")
        .insert([("name", bind("a")), ("age", bind(1))])
        .values([bind("b"), bind(2)]);
    let rendered = insert.to_sql(Dialect::Postgres).unwrap();

    assert_eq!(
        rendered.sql,
        r#"INSERT INTO "users" ("name", "age") VALUES ($1, $2), ($3, $4)"#
    );
    assert_eq!(rendered.binds.len(), 4);
}

#[test]
fn test_update_manager_accumulates_assignments() {
    let users = users();
    let update = UpdateManager::new()
        .table(&users)
        .set("name", bind("nick"))
        .set("age", 40)
        .filter(users.col("id").eq(1))
        .filter(users.col("active").eq(true));

    assert_eq!(update.ast().values.len(), 2);
    assert_eq!(
        generic(&update),
        r#"UPDATE "users" SET "name" = ?, "age" = 40 WHERE "users"."id" = 1 AND "users"."active" = TRUE"#
    );
}

#[test]
fn test_statement_conversion() {
    let users = users();
    let select: Statement = users.from().into();
    assert_eq!(select.kind(), "select");

    let delete = Statement::from(DeleteManager::new().from(&users));
    assert_eq!(delete.kind(), "delete");
}

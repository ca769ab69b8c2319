//! SELECT rendering across clauses.

mod common;

use common::{assert_parses, assert_unsupported, sql_for};
use insta::assert_snapshot;
use quarry::prelude::*;

fn users() -> Table {
    Table::new("users")
}

fn posts() -> Table {
    Table::new("posts")
}

#[test]
fn test_simple_select_with_limit() {
    let users = users();
    let query = users
        .project([users.col("id")])
        .filter(users.col("id").eq(1))
        .take(1);

    let sql = sql_for(&query, Dialect::Generic);
    assert_snapshot!(sql, @r#"SELECT "users"."id" FROM "users" WHERE "users"."id" = 1 LIMIT 1"#);
    assert_parses(&sql, Dialect::Generic);
}

#[test]
fn test_rendering_twice_is_identical() {
    let users = users();
    let query = users
        .project([users.col("id"), users.col("name")])
        .filter(users.col("name").eq(bind("nick")))
        .order([users.col("id").desc()]);

    for dialect in Dialect::ALL {
        assert_eq!(query.to_sql(dialect).unwrap(), query.to_sql(dialect).unwrap());
    }
}

#[test]
fn test_empty_projection_selects_star() {
    let users = users();
    assert_eq!(sql_for(&users.from(), Dialect::Generic), r#"SELECT * FROM "users""#);
    assert_eq!(
        sql_for(&users.project([users.star()]), Dialect::Generic),
        r#"SELECT "users".* FROM "users""#
    );
}

#[test]
fn test_left_join_with_offset_on_mysql() {
    let (users, posts) = (users(), posts());
    let query = users
        .project([users.col("name"), posts.col("title")])
        .left_join(&posts, posts.col("user_id").eq(users.col("id")))
        .order([posts.col("created_at").desc()])
        .skip(5);

    let sql = sql_for(&query, Dialect::MySql);
    assert_eq!(
        sql,
        "SELECT `users`.`name`, `posts`.`title` FROM `users` \
         LEFT OUTER JOIN `posts` ON `posts`.`user_id` = `users`.`id` \
         ORDER BY `posts`.`created_at` DESC LIMIT 18446744073709551615 OFFSET 5"
    );
    assert_parses(&sql, Dialect::MySql);
}

#[test]
fn test_aliased_and_schema_qualified_tables() {
    let u = Table::with_schema("app", "users").alias("u");
    let query = u.project([u.col("id")]).filter(u.col("id").gt(10));
    assert_eq!(
        sql_for(&query, Dialect::Postgres),
        r#"SELECT "u"."id" FROM "app"."users" AS "u" WHERE "u"."id" > 10"#
    );
    // Oracle aliases tables without AS
    assert_eq!(
        sql_for(&query, Dialect::Oracle),
        r#"SELECT "U"."ID" FROM "APP"."USERS" "U" WHERE "U"."ID" > 10"#
    );
}

#[test]
fn test_full_outer_join_gate() {
    let (users, posts) = (users(), posts());
    let query = users
        .from()
        .full_join(&posts, posts.col("user_id").eq(users.col("id")));
    assert_eq!(
        sql_for(&query, Dialect::Postgres),
        r#"SELECT * FROM "users" FULL OUTER JOIN "posts" ON "posts"."user_id" = "users"."id""#
    );
    assert_unsupported(&query, Dialect::MySql, "FULL OUTER JOIN");
}

#[test]
fn test_string_join_is_emitted_verbatim() {
    let users = users();
    let query = users.from().join_sql("NATURAL JOIN posts").unwrap();
    assert_eq!(
        sql_for(&query, Dialect::Generic),
        r#"SELECT * FROM "users" NATURAL JOIN posts"#
    );
}

#[test]
fn test_lateral_join() {
    let (users, posts) = (users(), posts());
    let latest = posts
        .project([posts.col("id")])
        .filter(posts.col("user_id").eq(users.col("id")))
        .order([posts.col("id").desc()])
        .take(1);
    let query = users.project([users.col("id")]).lateral_join(latest, "latest");

    let sql = sql_for(&query, Dialect::Postgres);
    assert_eq!(
        sql,
        r#"SELECT "users"."id" FROM "users" CROSS JOIN LATERAL (SELECT "posts"."id" FROM "posts" WHERE "posts"."user_id" = "users"."id" ORDER BY "posts"."id" DESC LIMIT 1) AS "latest""#
    );
    assert_parses(&sql, Dialect::Postgres);
    assert_unsupported(&query, Dialect::Sqlite, "LATERAL");
}

#[test]
fn test_or_groups_inside_where_list() {
    let users = users();
    let either = users.col("id").eq(1).or(users.col("id").eq(2));

    let alone = users.from().filter(either.clone());
    assert_eq!(
        sql_for(&alone, Dialect::Generic),
        r#"SELECT * FROM "users" WHERE "users"."id" = 1 OR "users"."id" = 2"#
    );

    let combined = alone.filter(users.col("active").eq(true));
    assert_eq!(
        sql_for(&combined, Dialect::Generic),
        r#"SELECT * FROM "users" WHERE ("users"."id" = 1 OR "users"."id" = 2) AND "users"."active" = TRUE"#
    );
}

#[test]
fn test_group_by_and_having() {
    let users = users();
    let query = users
        .project([users.col("dept"), count_star()])
        .group([users.col("dept")])
        .having(count_star().gt(5));

    let sql = sql_for(&query, Dialect::Generic);
    assert_snapshot!(sql, @r#"SELECT "users"."dept", COUNT(*) FROM "users" GROUP BY "users"."dept" HAVING COUNT(*) > 5"#);
    assert_parses(&sql, Dialect::Generic);
}

#[test]
fn test_exists_subquery() {
    let (users, posts) = (users(), posts());
    let has_posts = posts
        .from()
        .filter(posts.col("user_id").eq(users.col("id")))
        .exists();
    let query = users.project([users.col("id")]).filter(has_posts);

    assert_eq!(
        sql_for(&query, Dialect::Generic),
        r#"SELECT "users"."id" FROM "users" WHERE EXISTS (SELECT * FROM "posts" WHERE "posts"."user_id" = "users"."id")"#
    );
}

#[test]
fn test_binds_are_numbered_across_subqueries() {
    let (users, posts) = (users(), posts());
    let scored = posts
        .project([posts.col("user_id")])
        .filter(posts.col("score").gt(bind(5)));
    let query = users
        .project([users.col("id")])
        .filter(users.col("name").eq(bind("a")))
        .filter(users.col("id").in_select(scored));

    let rendered = query.to_sql(Dialect::Postgres).unwrap();
    assert_eq!(
        rendered.sql,
        r#"SELECT "users"."id" FROM "users" WHERE "users"."name" = $1 AND "users"."id" IN (SELECT "posts"."user_id" FROM "posts" WHERE "posts"."score" > $2)"#
    );
    assert_eq!(rendered.binds, vec![Value::from("a"), Value::from(5)]);
    assert_parses(&rendered.sql, Dialect::Postgres);
}

#[test]
fn test_union_as_derived_table() {
    let users = users();
    let admins = Table::new("admins");
    let ids = users
        .project([users.col("id")])
        .union(admins.project([admins.col("id")]));

    assert_eq!(
        sql_for(&ids, Dialect::Generic),
        r#"(SELECT "users"."id" FROM "users" UNION SELECT "admins"."id" FROM "admins")"#
    );

    let query = SelectManager::new().from(Relation::Derived {
        node: Box::new(ids),
        alias: "ids".into(),
    });
    let sql = sql_for(&query, Dialect::Generic);
    assert_eq!(
        sql,
        r#"SELECT * FROM (SELECT "users"."id" FROM "users" UNION SELECT "admins"."id" FROM "admins") AS "ids""#
    );
    assert_parses(&sql, Dialect::Generic);
}

#[test]
fn test_compound_select_uses_dialect_except() {
    let users = users();
    let admins = Table::new("admins");
    let query = users
        .project([users.col("id")])
        .compound(SetOp::Except, admins.project([admins.col("id")]));

    assert_eq!(
        sql_for(&query, Dialect::Generic),
        r#"SELECT "users"."id" FROM "users" EXCEPT SELECT "admins"."id" FROM "admins""#
    );
    assert_eq!(
        sql_for(&query, Dialect::Oracle),
        r#"SELECT "USERS"."ID" FROM "USERS" MINUS SELECT "ADMINS"."ID" FROM "ADMINS""#
    );
}

#[test]
fn test_recursive_cte() {
    let nodes = Table::new("nodes");
    let tree = Table::new("tree");
    let roots = nodes
        .project([nodes.col("id")])
        .filter(nodes.col("parent_id").is_null());
    let query = tree
        .project([tree.star()])
        .with_recursive([Cte::new("tree", roots).columns(["id"])]);

    assert_eq!(
        sql_for(&query, Dialect::Postgres),
        r#"WITH RECURSIVE "tree" ("id") AS (SELECT "nodes"."id" FROM "nodes" WHERE "nodes"."parent_id" IS NULL) SELECT "tree".* FROM "tree""#
    );
    // T-SQL infers recursion and rejects the keyword
    assert_eq!(
        sql_for(&query, Dialect::TSql),
        "WITH [tree] ([id]) AS (SELECT [nodes].[id] FROM [nodes] WHERE [nodes].[parent_id] IS NULL) SELECT [tree].* FROM [tree]"
    );
}

#[test]
fn test_materialized_cte_gate() {
    let users = users();
    let active = users.from().filter(users.col("active").eq(true));
    let query = Table::new("active")
        .from()
        .with([Cte::new("active", active).materialized(false)]);

    assert_eq!(
        sql_for(&query, Dialect::Postgres),
        r#"WITH "active" AS NOT MATERIALIZED (SELECT * FROM "users" WHERE "users"."active" = TRUE) SELECT * FROM "active""#
    );
    assert_unsupported(&query, Dialect::TSql, "MATERIALIZED CTEs");
}

#[test]
fn test_cycle_requires_recursive_with() {
    let nodes = Table::new("nodes");
    let cte = Cte::new("walk", nodes.project([nodes.col("id")])).cycle(["id"], "is_cycle", "path");

    let plain = Table::new("walk").from().with([cte.clone()]);
    assert!(matches!(
        plain.to_sql(Dialect::Postgres),
        Err(Error::Composition(_))
    ));

    let recursive = Table::new("walk").from().with_recursive([cte]);
    assert_eq!(
        sql_for(&recursive, Dialect::Postgres),
        r#"WITH RECURSIVE "walk" AS (SELECT "nodes"."id" FROM "nodes") CYCLE "id" SET "is_cycle" USING "path" SELECT * FROM "walk""#
    );
    assert_unsupported(&recursive, Dialect::MySql, "CTE CYCLE");
}

#[test]
fn test_inline_window() {
    let users = users();
    let window = Window::new()
        .partition([users.col("dept")])
        .order([users.col("salary").desc()]);
    let query = users.project([row_number().over(window).alias("rn")]);

    let sql = sql_for(&query, Dialect::Postgres);
    assert_eq!(
        sql,
        r#"SELECT ROW_NUMBER() OVER (PARTITION BY "users"."dept" ORDER BY "users"."salary" DESC) AS "rn" FROM "users""#
    );
    assert_parses(&sql, Dialect::Postgres);
}

#[test]
fn test_named_window() {
    let users = users();
    let query = users
        .project([rank().over("w")])
        .window("w", Window::new().order([users.col("id").asc()]));

    assert_eq!(
        sql_for(&query, Dialect::Generic),
        r#"SELECT RANK() OVER "w" FROM "users" WINDOW "w" AS (ORDER BY "users"."id" ASC)"#
    );
    assert_unsupported(&query, Dialect::Oracle, "named windows");
    assert_unsupported(&query, Dialect::TSql, "named windows");
}

#[test]
fn test_window_frames() {
    let users = users();
    let rolling = Window::new()
        .order([users.col("day").asc()])
        .rows(FrameBound::Preceding(2), FrameBound::CurrentRow);
    let query = users.project([sum(users.col("amount")).over(rolling)]);
    assert_eq!(
        sql_for(&query, Dialect::Generic),
        r#"SELECT SUM("users"."amount") OVER (ORDER BY "users"."day" ASC ROWS BETWEEN 2 PRECEDING AND CURRENT ROW) FROM "users""#
    );

    let peers = Window::new()
        .order([users.col("day").asc()])
        .groups(FrameBound::UnboundedPreceding, FrameBound::CurrentRow);
    let query = users.project([sum(users.col("amount")).over(peers)]);
    assert_unsupported(&query, Dialect::MySql, "GROUPS frames");
}

#[test]
fn test_distinct_on() {
    let users = users();
    let query = users
        .from()
        .distinct_on([users.col("email")])
        .project([users.col("id")]);

    let sql = sql_for(&query, Dialect::Postgres);
    assert_eq!(
        sql,
        r#"SELECT DISTINCT ON ("users"."email") "users"."id" FROM "users""#
    );
    assert_parses(&sql, Dialect::Postgres);
    assert_unsupported(&query, Dialect::MySql, "DISTINCT ON");
}

#[test]
fn test_row_locking() {
    let users = users();
    let query = users
        .project([users.col("id")])
        .filter(users.col("id").eq(1))
        .lock(Lock::ForUpdate);

    assert_eq!(
        sql_for(&query, Dialect::Postgres),
        r#"SELECT "users"."id" FROM "users" WHERE "users"."id" = 1 FOR UPDATE"#
    );
    // SQLite locks the whole database and drops the clause
    assert_eq!(
        sql_for(&query, Dialect::Sqlite),
        r#"SELECT "users"."id" FROM "users" WHERE "users"."id" = 1"#
    );
    assert_unsupported(&query, Dialect::TSql, "row locking");

    let skip_locked = users.from().lock(Lock::Sql("FOR UPDATE SKIP LOCKED".into()));
    assert_eq!(
        sql_for(&skip_locked, Dialect::Postgres),
        r#"SELECT * FROM "users" FOR UPDATE SKIP LOCKED"#
    );
}

#[test]
fn test_hints_and_comments() {
    let users = users();
    let query = users
        .from()
        .optimizer_hints(["INDEX(users idx_users_email)"])
        .comment("nightly report */ DROP TABLE users");

    assert_eq!(
        sql_for(&query, Dialect::Generic),
        r#"SELECT /*+ INDEX(users idx_users_email) */ * FROM "users" /* nightly report * / DROP TABLE users */"#
    );
}

#[test]
fn test_case_expression() {
    let users = users();
    let tier = CaseBuilder::new()
        .when(users.col("score").gteq(90), "gold")
        .when(users.col("score").gteq(50), "silver")
        .otherwise("bronze")
        .build();
    let query = users.project([tier.alias("tier")]);

    assert_eq!(
        sql_for(&query, Dialect::Generic),
        r#"SELECT CASE WHEN "users"."score" >= 90 THEN 'gold' WHEN "users"."score" >= 50 THEN 'silver' ELSE 'bronze' END AS "tier" FROM "users""#
    );
}

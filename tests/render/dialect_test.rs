//! The same trees rendered for every dialect.

mod common;

use common::{assert_parses, assert_unsupported, sql_for};
use insta::assert_snapshot;
use quarry::prelude::*;

fn users() -> Table {
    Table::new("users")
}

fn first_user() -> SelectManager {
    let users = users();
    users
        .project([users.col("id")])
        .filter(users.col("id").eq(1))
        .take(1)
}

#[test]
fn test_limit_per_dialect() {
    let query = first_user();
    let expected = [
        (
            Dialect::Generic,
            r#"SELECT "users"."id" FROM "users" WHERE "users"."id" = 1 LIMIT 1"#,
        ),
        (
            Dialect::Postgres,
            r#"SELECT "users"."id" FROM "users" WHERE "users"."id" = 1 LIMIT 1"#,
        ),
        (
            Dialect::MySql,
            "SELECT `users`.`id` FROM `users` WHERE `users`.`id` = 1 LIMIT 1",
        ),
        (
            Dialect::Sqlite,
            r#"SELECT "users"."id" FROM "users" WHERE "users"."id" = 1 LIMIT 1"#,
        ),
        (
            Dialect::Oracle,
            r#"SELECT "USERS"."ID" FROM "USERS" WHERE "USERS"."ID" = 1 AND ROWNUM <= 1"#,
        ),
        (
            Dialect::TSql,
            "SELECT [users].[id] FROM [users] WHERE [users].[id] = 1 ORDER BY (SELECT NULL) OFFSET 0 ROWS FETCH NEXT 1 ROWS ONLY",
        ),
    ];

    for (dialect, sql) in expected {
        let rendered = sql_for(&query, dialect);
        assert_eq!(rendered, sql, "{}", dialect);
        if dialect != Dialect::Oracle {
            assert_parses(&rendered, dialect);
        }
    }
}

#[test]
fn test_offset_only_per_dialect() {
    let users = users();
    let query = users.project([users.col("id")]).skip(20);

    assert_eq!(
        sql_for(&query, Dialect::Postgres),
        r#"SELECT "users"."id" FROM "users" OFFSET 20"#
    );
    assert_eq!(
        sql_for(&query, Dialect::Sqlite),
        r#"SELECT "users"."id" FROM "users" LIMIT -1 OFFSET 20"#
    );
    assert_eq!(
        sql_for(&query, Dialect::MySql),
        "SELECT `users`.`id` FROM `users` LIMIT 18446744073709551615 OFFSET 20"
    );
    assert_eq!(
        sql_for(&query, Dialect::TSql),
        "SELECT [users].[id] FROM [users] ORDER BY (SELECT NULL) OFFSET 20 ROWS"
    );
    assert_eq!(
        sql_for(&query, Dialect::Oracle),
        r#"SELECT * FROM (SELECT raw_sql_.*, rownum raw_rnum_ FROM (SELECT "USERS"."ID" FROM "USERS") raw_sql_) WHERE raw_rnum_ > 20"#
    );
}

#[test]
fn test_tsql_keeps_existing_order_for_paging() {
    let users = users();
    let query = users
        .project([users.col("id")])
        .order([users.col("id").asc()])
        .take(10)
        .skip(20);

    let sql = sql_for(&query, Dialect::TSql);
    assert_snapshot!(sql, @"SELECT [users].[id] FROM [users] ORDER BY [users].[id] ASC OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY");
    assert_parses(&sql, Dialect::TSql);
}

#[test]
fn test_oracle_rownum_wrapping() {
    let users = users();

    let ordered = users
        .project([users.col("id")])
        .order([users.col("id").asc()])
        .take(10);
    assert_eq!(
        sql_for(&ordered, Dialect::Oracle),
        r#"SELECT * FROM (SELECT "USERS"."ID" FROM "USERS" ORDER BY "USERS"."ID" ASC) WHERE ROWNUM <= 10"#
    );

    let grouped = users
        .project([users.col("role"), count_star()])
        .group([users.col("role")])
        .take(2);
    assert_eq!(
        sql_for(&grouped, Dialect::Oracle),
        r#"SELECT * FROM (SELECT "USERS"."ROLE", COUNT(*) FROM "USERS" GROUP BY "USERS"."ROLE") WHERE ROWNUM <= 2"#
    );

    let filtered_groups = users
        .project([users.col("role")])
        .group([users.col("role")])
        .having(count_star().gt(1))
        .take(5);
    assert_eq!(
        sql_for(&filtered_groups, Dialect::Oracle),
        r#"SELECT * FROM (SELECT "USERS"."ROLE" FROM "USERS" GROUP BY "USERS"."ROLE" HAVING COUNT(*) > 1) WHERE ROWNUM <= 5"#
    );

    let page = users.project([users.col("id")]).take(10).skip(20);
    assert_eq!(
        sql_for(&page, Dialect::Oracle),
        r#"SELECT * FROM (SELECT raw_sql_.*, rownum raw_rnum_ FROM (SELECT "USERS"."ID" FROM "USERS") raw_sql_ WHERE rownum <= 30) WHERE raw_rnum_ > 20"#
    );

    let bound_page = users
        .project([users.col("id")])
        .take(bind(10))
        .skip(bind(20));
    let rendered = bound_page.to_sql(Dialect::Oracle).unwrap();
    assert_eq!(
        rendered.sql,
        r#"SELECT * FROM (SELECT raw_sql_.*, rownum raw_rnum_ FROM (SELECT "USERS"."ID" FROM "USERS") raw_sql_ WHERE rownum <= (:a1 + :a2)) WHERE raw_rnum_ > :a3"#
    );
    assert_eq!(
        rendered.binds,
        vec![Value::from(20), Value::from(10), Value::from(20)]
    );

    let locked = first_user().lock(Lock::ForUpdate);
    assert_unsupported(
        &locked,
        Dialect::Oracle,
        "row locking combined with LIMIT or OFFSET",
    );
}

#[test]
fn test_nulls_ordering_emulation() {
    let users = users();
    let query = users
        .project([users.col("name")])
        .order([users.col("name").asc().nulls_last()]);

    assert_eq!(
        sql_for(&query, Dialect::Postgres),
        r#"SELECT "users"."name" FROM "users" ORDER BY "users"."name" ASC NULLS LAST"#
    );
    assert_eq!(
        sql_for(&query, Dialect::MySql),
        "SELECT `users`.`name` FROM `users` ORDER BY `users`.`name` IS NULL, `users`.`name` ASC"
    );
    assert_eq!(
        sql_for(&query, Dialect::TSql),
        "SELECT [users].[name] FROM [users] ORDER BY CASE WHEN [users].[name] IS NULL THEN 1 ELSE 0 END, [users].[name] ASC"
    );

    let nulls_first = users
        .project([users.col("name")])
        .order([users.col("name").desc().nulls_first()]);
    assert_eq!(
        sql_for(&nulls_first, Dialect::MySql),
        "SELECT `users`.`name` FROM `users` ORDER BY `users`.`name` IS NOT NULL, `users`.`name` DESC"
    );
}

#[test]
fn test_placeholders_and_literals() {
    let users = users();
    let predicate = users
        .col("name")
        .eq(bind("a"))
        .and(users.col("active").eq(true))
        .and(users.col("bio").eq("it's"));

    let cases = [
        (
            Dialect::Generic,
            r#""users"."name" = ? AND "users"."active" = TRUE AND "users"."bio" = 'it''s'"#,
        ),
        (
            Dialect::Postgres,
            r#""users"."name" = $1 AND "users"."active" = TRUE AND "users"."bio" = E'it''s'"#,
        ),
        (
            Dialect::MySql,
            "`users`.`name` = ? AND `users`.`active` = 1 AND `users`.`bio` = 'it''s'",
        ),
        (
            Dialect::Oracle,
            r#""USERS"."NAME" = :a1 AND "USERS"."ACTIVE" = 1 AND "USERS"."BIO" = 'it''s'"#,
        ),
        (
            Dialect::TSql,
            "[users].[name] = @P1 AND [users].[active] = 1 AND [users].[bio] = 'it''s'",
        ),
    ];
    for (dialect, sql) in cases {
        assert_eq!(sql_for(&predicate, dialect), sql, "{}", dialect);
    }
}

#[test]
fn test_string_escaping() {
    let path = lit(r"C:\temp");
    assert_eq!(sql_for(&path, Dialect::Generic), r"'C:\temp'");
    assert_eq!(sql_for(&path, Dialect::Postgres), r"E'C:\\temp'");
    assert_eq!(sql_for(&path, Dialect::MySql), r"'C:\\temp'");
    assert_eq!(sql_for(&lit("naïve"), Dialect::TSql), "N'naïve'");
}

#[test]
fn test_identifier_escaping() {
    let weird = Table::new(r#"we"ird"#);
    let query = weird.project([weird.col("a]b"), weird.col("c`d")]);
    assert_eq!(
        sql_for(&query, Dialect::Generic),
        r#"SELECT "we""ird"."a]b", "we""ird"."c`d" FROM "we""ird""#
    );
    assert_eq!(
        sql_for(&query, Dialect::TSql),
        r#"SELECT [we"ird].[a]]b], [we"ird].[c`d] FROM [we"ird]"#
    );
    assert_eq!(
        sql_for(&query, Dialect::MySql),
        r#"SELECT `we"ird`.`a]b`, `we"ird`.`c``d` FROM `we"ird`"#
    );
}

#[test]
fn test_concatenation() {
    let users = users();
    let full = users.col("first").concat(users.col("last"));
    assert_eq!(
        sql_for(&full, Dialect::Postgres),
        r#""users"."first" || "users"."last""#
    );
    assert_eq!(
        sql_for(&full, Dialect::MySql),
        "CONCAT(`users`.`first`, `users`.`last`)"
    );
    assert_eq!(sql_for(&full, Dialect::TSql), "[users].[first] + [users].[last]");
}

#[test]
fn test_pattern_matching() {
    let users = users();
    let insensitive = users.col("name").matches("a%");
    assert_eq!(
        sql_for(&insensitive, Dialect::Postgres),
        r#""users"."name" ILIKE E'a%'"#
    );
    assert_eq!(
        sql_for(&insensitive, Dialect::Generic),
        r#""users"."name" LIKE 'a%'"#
    );

    let sensitive = users.col("name").matches_case_sensitive("a%");
    assert_eq!(
        sql_for(&sensitive, Dialect::MySql),
        "`users`.`name` LIKE BINARY 'a%'"
    );

    let escaped = users.col("name").matches_escape("100!%", '!');
    assert_eq!(
        sql_for(&escaped, Dialect::Generic),
        r#""users"."name" LIKE '100!%' ESCAPE '!'"#
    );

    let regexp = users.col("name").matches_regexp("^a", false);
    assert_eq!(sql_for(&regexp, Dialect::Postgres), r#""users"."name" ~* E'^a'"#);
    assert_eq!(sql_for(&regexp, Dialect::MySql), "`users`.`name` REGEXP '^a'");
    assert_unsupported(&regexp, Dialect::Sqlite, "regular expression matching");
}

#[test]
fn test_extract() {
    let users = users();
    let year = users.col("created_at").extract("YEAR");
    assert_eq!(
        sql_for(&year, Dialect::Postgres),
        r#"EXTRACT(YEAR FROM "users"."created_at")"#
    );
    assert_eq!(
        sql_for(&year, Dialect::TSql),
        "DATEPART(YEAR, [users].[created_at])"
    );
    assert_unsupported(&year, Dialect::Sqlite, "EXTRACT");
}

#[test]
fn test_function_names_pass_through() {
    let users = users();
    let f = func("nvl", vec![users.col("nick"), users.col("name")]);
    assert_eq!(
        sql_for(&f, Dialect::Postgres),
        r#"NVL("users"."nick", "users"."name")"#
    );
    assert_eq!(
        sql_for(&f, Dialect::MySql),
        "NVL(`users`.`nick`, `users`.`name`)"
    );
    assert_eq!(
        sql_for(&f, Dialect::TSql),
        "NVL([users].[nick], [users].[name])"
    );

    let now = func("now", vec![]);
    for dialect in Dialect::ALL {
        assert_eq!(sql_for(&now, dialect), "NOW()", "{}", dialect);
    }
}

#[test]
fn test_grouping_elements() {
    let users = users();
    let query = users
        .project([users.col("a"), users.col("b"), count_star()])
        .group([cube(vec![users.col("a"), users.col("b")])]);

    assert_eq!(
        sql_for(&query, Dialect::Postgres),
        r#"SELECT "users"."a", "users"."b", COUNT(*) FROM "users" GROUP BY CUBE("users"."a", "users"."b")"#
    );
    assert_unsupported(&query, Dialect::Sqlite, "CUBE and ROLLUP");

    let sets = users
        .project([count_star()])
        .group([grouping_sets(vec![vec![users.col("a")], vec![]])]);
    assert_eq!(
        sql_for(&sets, Dialect::Postgres),
        r#"SELECT COUNT(*) FROM "users" GROUP BY GROUPING SETS (("users"."a"), ())"#
    );
    assert_unsupported(&sets, Dialect::MySql, "GROUPING SETS");
}

#[test]
fn test_array_operators() {
    let users = users();
    let tagged = users.col("tags").contains(lit("{admin}"));
    assert_eq!(
        sql_for(&tagged, Dialect::Postgres),
        r#""users"."tags" @> E'{admin}'"#
    );
    assert_unsupported(&tagged, Dialect::MySql, "array operators");
}

#[test]
fn test_oracle_splits_long_in_lists() {
    let users = users();
    let ids: Vec<i64> = (1..=1001).collect();
    let predicate = users.col("id").in_values(ids);

    let rendered = predicate.to_sql(Dialect::Oracle).unwrap();
    assert_eq!(rendered.binds.len(), 1001);
    assert!(rendered.sql.starts_with(r#"("USERS"."ID" IN (:a1, :a2"#));
    assert!(rendered
        .sql
        .ends_with(r#":a1000) OR "USERS"."ID" IN (:a1001))"#));
    assert_eq!(rendered.sql.matches(" OR ").count(), 1);

    // Other dialects keep a single list
    let rendered = predicate.to_sql(Dialect::Postgres).unwrap();
    assert!(!rendered.sql.contains(" OR "));
}

#[test]
fn test_unsupported_error_message() {
    let users = users();
    let query = users.from().distinct_on([users.col("email")]);
    let err = query.to_sql(Dialect::MySql).unwrap_err();
    assert_eq!(
        err.to_string(),
        "DISTINCT ON is not supported by the mysql dialect"
    );
}

#[test]
fn test_dialect_names_round_trip() {
    for dialect in Dialect::ALL {
        let parsed: Dialect = dialect.to_string().parse().unwrap();
        assert_eq!(parsed, dialect);
    }
    assert_eq!("mssql".parse::<Dialect>().unwrap(), Dialect::TSql);
    assert!("db2".parse::<Dialect>().is_err());
}

//! SQL identifier quoting utilities
//!
//! Provides safe quoting for identifiers used in the destructive statements
//! the reset tool builds from table manifests.

/// Quote a SQL identifier to prevent injection.
///
/// Wraps the identifier in double quotes and escapes any embedded double quotes
/// by doubling them, following the SQL standard.
///
/// # Examples
/// ```
/// use ops_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("users"), r#""users""#);
/// assert_eq!(quote_ident(r#"my"table"#), r#""my""table""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a table inside a schema namespace as `"schema"."table"`.
///
/// Unlike a dotted split, both parts are quoted whole, so a `.` inside
/// either part stays part of the identifier.
///
/// # Examples
/// ```
/// use ops_core::sql_utils::quote_schema_table;
/// assert_eq!(quote_schema_table("public", "user"), r#""public"."user""#);
/// ```
pub fn quote_schema_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(table))
}

/// Build the `DROP TABLE IF EXISTS ... CASCADE;` statement for one table.
pub fn drop_table_cascade(schema: &str, table: &str) -> String {
    format!(
        "DROP TABLE IF EXISTS {} CASCADE;",
        quote_schema_table(schema, table)
    )
}

#[cfg(test)]
#[path = "sql_utils_test.rs"]
mod tests;

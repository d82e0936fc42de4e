//! v001: versioned cells of the wide-column activity table.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS cells (
    table_id   TEXT    NOT NULL,
    row_key    TEXT    NOT NULL,
    family     TEXT    NOT NULL,
    qualifier  TEXT    NOT NULL,
    version    INTEGER NOT NULL,
    value      BLOB    NOT NULL,
    PRIMARY KEY (table_id, row_key, family, qualifier, version)
) WITHOUT ROWID;
";

//! v002: column-first index so a range scan of one column walks keys in order.

pub const MIGRATION_SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_cells_column_row
    ON cells(table_id, family, qualifier, row_key, version DESC);
";

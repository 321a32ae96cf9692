//! Scene field names, delimiters and coercion defaults.

/// Prefix used by the authoring tool for attribute-key column names (`:id`).
pub const C_COLUMN_PREFIX: &str = ":";
/// Separators accepted between list items (ASCII and full-width comma).
pub const TUP_LIST_DELIMITERS: [char; 2] = [',', '\u{ff0c}'];

/// Scene identifier field.
pub const C_FIELD_ID: &str = "id";
/// Scene title field.
pub const C_FIELD_TITLE: &str = "title";
/// Scene status field (`idea`, `draft`, `revise`, `done`).
pub const C_FIELD_STATUS: &str = "status";
/// Successor identifiers field.
pub const C_FIELD_NEXT: &str = "next";
/// Raw tension score field.
pub const C_FIELD_TENSION_SCORE: &str = "tensionscore";
/// Raw estimated word count field.
pub const C_FIELD_WORDS: &str = "words";
/// Raw character-list field.
pub const C_FIELD_CHARACTERS: &str = "characters";

/// Derived numeric tension score column.
pub const C_COL_TENSION_SCORE: &str = "tensionscore";
/// Derived numeric word count column.
pub const C_COL_WORDS: &str = "words";
/// Derived character count column.
pub const C_COL_CHARACTER_COUNT: &str = "character_count";

/// Value substituted for missing or unparseable numeric cells.
pub const N_NUMERIC_DEFAULT: f64 = 0.0;

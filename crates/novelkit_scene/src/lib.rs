//! `novelkit_scene` v1:
//! Scene-table loading and normalization shared by the exporters.
//!
//! Layout:
//! - `conf`  : field names, delimiters and coercion defaults
//! - `spec`  : read options and errors
//! - `util`  : pure helpers (parse-or-default, splitting, field lookup)
//! - `table` : CSV loading and the normalized [`SceneTable`]
pub mod conf;
pub mod spec;
pub mod table;
pub mod util;

pub use conf::{
    C_COL_CHARACTER_COUNT, C_COL_TENSION_SCORE, C_COL_WORDS, C_FIELD_CHARACTERS, C_FIELD_ID,
    C_FIELD_NEXT, C_FIELD_STATUS, C_FIELD_TENSION_SCORE, C_FIELD_TITLE, C_FIELD_WORDS,
    N_NUMERIC_DEFAULT,
};
pub use spec::{SceneTableError, SpecSceneReadOptions};
pub use table::{SceneTable, load_scene_table, normalize_scene_frame, read_scene_frame};
pub use util::{
    count_characters, derive_f64_from_any_value, derive_text_from_any_value, parse_numeric,
    parse_or_default, resolve_field_column, split_scene_refs,
};

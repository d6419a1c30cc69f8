//! Shared numeric helpers.

mod matrix;

pub use matrix::{
    center_columns, center_vector, detect_aliased_columns, detect_constant_columns,
    invert_via_qr, select_columns,
};

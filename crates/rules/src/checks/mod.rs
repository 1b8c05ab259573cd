//! The five design-lint checks.
//!
//! Each check looks at one top-level container and its subtree and returns
//! at most one issue for it.

pub mod color_token;
pub mod contrast;
pub mod primary_button;
pub mod spacing;
pub mod text_style;

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

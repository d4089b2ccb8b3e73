pub mod catalog;
pub mod chat;
pub mod config;
pub mod recommend;

use std::fmt::Write as _;

use bharatshop_core::ScoredProduct;

/// Outcome of a command: what to print and how to exit.
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

impl CommandResult {
    pub fn ok(output: String) -> Self {
        Self { exit_code: 0, output }
    }

    pub fn failure(output: String) -> Self {
        Self { exit_code: 1, output }
    }
}

/// Human-readable rendering shared by `recommend` and `chat`.
pub(crate) fn render_products(products: &[ScoredProduct]) -> String {
    let mut out = String::new();
    for scored in products {
        let _ = writeln!(
            out,
            "  {:>2}%  {}  (₹{})",
            scored.match_percentage, scored.product.name, scored.product.price_rupees
        );
        let _ = writeln!(out, "       {}", scored.match_reason);
    }
    out
}

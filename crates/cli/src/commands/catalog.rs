use std::fmt::Write as _;

use bharatshop_core::Catalog;

use super::CommandResult;

/// List every catalog product in catalog order.
pub fn run(json: bool) -> CommandResult {
    let catalog = Catalog::demo();

    if json {
        return match serde_json::to_string_pretty(catalog.products()) {
            Ok(body) => CommandResult::ok(body),
            Err(error) => CommandResult::failure(format!("serialization error: {error}")),
        };
    }

    let mut out = String::new();
    for product in catalog.products() {
        let _ = writeln!(
            out,
            "{:<28} {:>7}  {:<8} {:<10} {}",
            product.id.0,
            format!("₹{}", product.price_rupees),
            product.category().as_str(),
            product.sub_category,
            product.name
        );
    }
    CommandResult::ok(out)
}

pub mod preference;
pub mod product;

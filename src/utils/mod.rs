pub mod database;
pub mod money;
pub mod pagination;
pub mod validation;

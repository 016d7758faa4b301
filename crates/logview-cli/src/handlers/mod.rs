pub mod create;
pub mod scan;
pub mod view;

pub mod fixtures;

pub use fixtures::ProjectFixture;

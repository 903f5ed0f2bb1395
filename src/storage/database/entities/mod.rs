/// Item entity module
pub mod item;

pub use item::Entity as ItemEntity;

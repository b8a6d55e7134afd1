pub mod harvest;
pub mod ingredient;
pub mod measure;
pub mod plant_class;
pub mod plot;
pub mod purchase;
pub mod recipe;
pub mod vegetation;
pub mod worker;

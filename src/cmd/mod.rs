pub mod inspect;
pub mod randomize;

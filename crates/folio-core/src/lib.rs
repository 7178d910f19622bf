pub mod catalog;
pub mod content;
pub mod form;
pub mod layout;
pub mod selection;
pub mod storage;
pub mod submit;
pub mod theme;

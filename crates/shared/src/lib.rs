pub mod category;
pub mod dataset;
pub mod geometry;
pub mod local_search;
pub mod modal;
pub mod models;
pub mod pan;
pub mod pin_edit;
pub mod places;
pub mod queries;
pub mod resolve;

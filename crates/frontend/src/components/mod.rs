pub mod category_filter;
pub mod edit_toolbar;
pub mod intro_dialog;
pub mod map_view;
pub mod pin_editor;
pub mod store_modal;

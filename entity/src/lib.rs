pub mod blob_folder;
pub mod blob_object;
pub mod setting;
pub mod sheet_header;
pub mod sheet_row;

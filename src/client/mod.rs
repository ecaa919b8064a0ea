mod file_store;

pub use file_store::{attachment_object_name, StorageClient};

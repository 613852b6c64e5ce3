pub mod handlers;

pub use handlers::{create_table, delete_record, get_data, insert_record, search};

pub mod content_id;

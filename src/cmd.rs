pub mod console_url;

pub mod settings_entry;

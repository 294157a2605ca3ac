pub mod alert_handler;

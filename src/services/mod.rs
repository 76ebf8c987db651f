pub mod timestamp_service;

mod export_service;


pub use export_service::schedule_and_export;

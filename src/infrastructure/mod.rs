pub mod entity;
pub mod in_memory_user_repository;
pub mod smtp_mail_provider;
pub mod user_repository;
pub mod uuid_id_generator;

pub mod id_service;
pub mod mail_service;

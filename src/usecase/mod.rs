pub mod create_user_usecase;

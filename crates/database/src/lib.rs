pub mod db;
pub mod entities;
pub mod gateway;
pub mod services;
pub mod validator;

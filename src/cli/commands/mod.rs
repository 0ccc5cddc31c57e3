pub mod alunos;
pub mod auth;
pub mod server;

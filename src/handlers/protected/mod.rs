pub mod alunos;
pub mod auth;

pub mod aluno;
pub mod identity;
pub mod profile;

pub use aluno::{Aluno, AlunoChanges, NewAluno};
pub use identity::Identity;
pub use profile::Profile;

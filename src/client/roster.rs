//! In-memory working set of the caller's alunos plus a search term.
//!
//! Filtering is a pure function over the held set; it never issues requests.
//! After every create/update/delete the caller refreshes the whole set from
//! the server rather than patching incrementally.

use crate::client::{ApiClient, ClientError};
use crate::database::models::Aluno;

#[derive(Default)]
pub struct Roster {
    alunos: Vec<Aluno>,
    search: String,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full working set, preserving server order.
    pub fn replace_all(&mut self, alunos: Vec<Aluno>) {
        self.alunos = alunos;
    }

    /// Full re-fetch of the owned set through the façade.
    pub async fn refresh(&mut self, client: &ApiClient) -> Result<(), ClientError> {
        self.alunos = client.list_alunos().await?;
        Ok(())
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn all(&self) -> &[Aluno] {
        &self.alunos
    }

    /// Records matching the search term: case-insensitive substring match
    /// over nome OR email. An empty term matches everything.
    pub fn visible(&self) -> Vec<&Aluno> {
        let needle = self.search.trim().to_lowercase();
        self.alunos
            .iter()
            .filter(|aluno| {
                needle.is_empty()
                    || aluno.nome.to_lowercase().contains(&needle)
                    || aluno.email.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

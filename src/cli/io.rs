use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::errors::LedgerError;

/// Capability for asking the user a yes/no question before a destructive
/// operation. Injected so scripted runs and tests answer deterministically.
pub trait Confirmer {
    fn confirm(&self, question: &str) -> Result<bool, LedgerError>;
}

/// Interactive confirmation via a dialoguer prompt, defaulting to "no".
pub struct DialoguerConfirmer;

impl Confirmer for DialoguerConfirmer {
    fn confirm(&self, question: &str) -> Result<bool, LedgerError> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(|err| LedgerError::Io(std::io::Error::other(err.to_string())))
    }
}

/// Answers every question with a fixed response. Used for scripted runs
/// and in tests.
pub struct StaticConfirmer(pub bool);

impl Confirmer for StaticConfirmer {
    fn confirm(&self, _question: &str) -> Result<bool, LedgerError> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_confirmer_returns_its_fixed_answer() {
        assert!(StaticConfirmer(true).confirm("sure?").unwrap());
        assert!(!StaticConfirmer(false).confirm("sure?").unwrap());
    }
}
